//! Calculation preferences, one variant per methodology.

use astro_config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PreferenceError;
use crate::methodology::MethodologyKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseSystem {
    Placidus,
    Koch,
    Equal,
    #[serde(rename = "Whole Sign")]
    WholeSign,
    Campanus,
    Regiomontanus,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 6] = [
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Equal,
        HouseSystem::WholeSign,
        HouseSystem::Campanus,
        HouseSystem::Regiomontanus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "Placidus",
            HouseSystem::Koch => "Koch",
            HouseSystem::Equal => "Equal",
            HouseSystem::WholeSign => "Whole Sign",
            HouseSystem::Campanus => "Campanus",
            HouseSystem::Regiomontanus => "Regiomontanus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ayanamsha {
    Lahiri,
    Raman,
    Krishnamurti,
    Yukteshwar,
    Fagan,
}

impl Ayanamsha {
    pub const ALL: [Ayanamsha; 5] = [
        Ayanamsha::Lahiri,
        Ayanamsha::Raman,
        Ayanamsha::Krishnamurti,
        Ayanamsha::Yukteshwar,
        Ayanamsha::Fagan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Ayanamsha::Lahiri => "Lahiri",
            Ayanamsha::Raman => "Raman",
            Ayanamsha::Krishnamurti => "Krishnamurti",
            Ayanamsha::Yukteshwar => "Yukteshwar",
            Ayanamsha::Fagan => "Fagan",
        }
    }
}

// "Whole Sign", "whole_sign" and "wholesign" all name the same thing.
fn canonical(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for HouseSystem {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = canonical(s);
        HouseSystem::ALL
            .into_iter()
            .find(|h| canonical(h.name()) == key)
            .ok_or_else(|| PreferenceError::Unrecognized {
                kind: "house system",
                value: s.to_string(),
            })
    }
}

impl FromStr for Ayanamsha {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = canonical(s);
        Ayanamsha::ALL
            .into_iter()
            .find(|a| canonical(a.name()) == key)
            .ok_or_else(|| PreferenceError::Unrecognized {
                kind: "ayanamsha",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Ayanamsha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpPreferences {
    pub ayanamsha: Ayanamsha,
    #[serde(rename = "houseSystem")]
    pub house_system: HouseSystem,
    #[serde(rename = "enableSubLords")]
    pub enable_sub_lords: bool,
    #[serde(rename = "enableSignificators")]
    pub enable_significators: bool,
    #[serde(rename = "enableRulingPlanets")]
    pub enable_ruling_planets: bool,
    #[serde(rename = "enablePredictions")]
    pub enable_predictions: bool,
}

impl Default for KpPreferences {
    fn default() -> Self {
        Self {
            ayanamsha: Ayanamsha::Krishnamurti,
            house_system: HouseSystem::Placidus,
            enable_sub_lords: true,
            enable_significators: true,
            enable_ruling_planets: true,
            enable_predictions: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaiminiPreferences {
    pub ayanamsha: Ayanamsha,
    #[serde(rename = "houseSystem")]
    pub house_system: HouseSystem,
    #[serde(rename = "enableCharaKarakas")]
    pub enable_chara_karakas: bool,
    #[serde(rename = "enableArudhaPadas")]
    pub enable_arudha_padas: bool,
    #[serde(rename = "enableCharaDasha")]
    pub enable_chara_dasha: bool,
    #[serde(rename = "enableRashiDrishti")]
    pub enable_rashi_drishti: bool,
}

impl Default for JaiminiPreferences {
    fn default() -> Self {
        Self {
            ayanamsha: Ayanamsha::Lahiri,
            house_system: HouseSystem::WholeSign,
            enable_chara_karakas: true,
            enable_arudha_padas: true,
            enable_chara_dasha: true,
            enable_rashi_drishti: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParasharaPreferences {
    pub ayanamsha: Ayanamsha,
    #[serde(rename = "houseSystem")]
    pub house_system: HouseSystem,
}

impl Default for ParasharaPreferences {
    fn default() -> Self {
        Self {
            ayanamsha: Ayanamsha::Lahiri,
            house_system: HouseSystem::WholeSign,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WesternPreferences {
    #[serde(rename = "houseSystem")]
    pub house_system: HouseSystem,
}

impl Default for WesternPreferences {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
        }
    }
}

/// Preference envelope tagged by methodology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "methodology", rename_all = "lowercase")]
pub enum Preferences {
    Kp(KpPreferences),
    Jaimini(JaiminiPreferences),
    Parashara(ParasharaPreferences),
    Western(WesternPreferences),
}

impl Preferences {
    pub fn kind(&self) -> MethodologyKind {
        match self {
            Preferences::Kp(_) => MethodologyKind::Kp,
            Preferences::Jaimini(_) => MethodologyKind::Jaimini,
            Preferences::Parashara(_) => MethodologyKind::Parashara,
            Preferences::Western(_) => MethodologyKind::Western,
        }
    }

    pub fn defaults_for(kind: MethodologyKind) -> Self {
        match kind {
            MethodologyKind::Kp => Preferences::Kp(KpPreferences::default()),
            MethodologyKind::Jaimini => Preferences::Jaimini(JaiminiPreferences::default()),
            MethodologyKind::Parashara => Preferences::Parashara(ParasharaPreferences::default()),
            MethodologyKind::Western => Preferences::Western(WesternPreferences::default()),
        }
    }

    /// Built-in defaults overlaid with the `[kp]`/`[jaimini]`/... config tables.
    pub fn from_config(kind: MethodologyKind, config: &EngineConfig) -> Result<Self, PreferenceError> {
        let prefs = match kind {
            MethodologyKind::Kp => {
                let mut p = KpPreferences::default();
                let c = &config.kp;
                override_parsed(&mut p.ayanamsha, c.ayanamsha.as_deref())?;
                override_parsed(&mut p.house_system, c.house_system.as_deref())?;
                override_flag(&mut p.enable_sub_lords, c.enable_sub_lords);
                override_flag(&mut p.enable_significators, c.enable_significators);
                override_flag(&mut p.enable_ruling_planets, c.enable_ruling_planets);
                override_flag(&mut p.enable_predictions, c.enable_predictions);
                Preferences::Kp(p)
            }
            MethodologyKind::Jaimini => {
                let mut p = JaiminiPreferences::default();
                let c = &config.jaimini;
                override_parsed(&mut p.ayanamsha, c.ayanamsha.as_deref())?;
                override_parsed(&mut p.house_system, c.house_system.as_deref())?;
                override_flag(&mut p.enable_chara_karakas, c.enable_chara_karakas);
                override_flag(&mut p.enable_arudha_padas, c.enable_arudha_padas);
                override_flag(&mut p.enable_chara_dasha, c.enable_chara_dasha);
                override_flag(&mut p.enable_rashi_drishti, c.enable_rashi_drishti);
                Preferences::Jaimini(p)
            }
            MethodologyKind::Parashara => {
                let mut p = ParasharaPreferences::default();
                override_parsed(&mut p.ayanamsha, config.parashara.ayanamsha.as_deref())?;
                override_parsed(&mut p.house_system, config.parashara.house_system.as_deref())?;
                Preferences::Parashara(p)
            }
            MethodologyKind::Western => {
                let mut p = WesternPreferences::default();
                override_parsed(&mut p.house_system, config.western.house_system.as_deref())?;
                Preferences::Western(p)
            }
        };
        Ok(prefs)
    }
}

fn override_parsed<T>(slot: &mut T, value: Option<&str>) -> Result<(), PreferenceError>
where
    T: FromStr<Err = PreferenceError>,
{
    if let Some(v) = value {
        *slot = v.parse()?;
    }
    Ok(())
}

fn override_flag(slot: &mut bool, value: Option<bool>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Reject a house system outside `accepted`.
pub(crate) fn require_house_system(
    methodology: MethodologyKind,
    found: HouseSystem,
    accepted: &[HouseSystem],
) -> Result<(), PreferenceError> {
    if accepted.contains(&found) {
        return Ok(());
    }
    log::warn!("{}: rejected house system '{}'", methodology.name(), found);
    Err(PreferenceError::UnsupportedHouseSystem {
        methodology: methodology.display_name().to_string(),
        found: found.name().to_string(),
        accepted: accepted.iter().map(|h| h.name().to_string()).collect(),
    })
}

/// Reject an ayanamsha outside `accepted`.
pub(crate) fn require_ayanamsha(
    methodology: MethodologyKind,
    found: Ayanamsha,
    accepted: &[Ayanamsha],
) -> Result<(), PreferenceError> {
    if accepted.contains(&found) {
        return Ok(());
    }
    log::warn!("{}: rejected ayanamsha '{}'", methodology.name(), found);
    Err(PreferenceError::UnsupportedAyanamsha {
        methodology: methodology.display_name().to_string(),
        found: found.name().to_string(),
        accepted: accepted.iter().map(|a| a.name().to_string()).collect(),
    })
}

pub(crate) fn wrong_methodology(expected: MethodologyKind, prefs: &Preferences) -> PreferenceError {
    log::warn!(
        "{}: received preferences tagged '{}'",
        expected.name(),
        prefs.kind().name()
    );
    PreferenceError::WrongMethodology {
        expected: expected.display_name().to_string(),
        found: prefs.kind().name().to_string(),
    }
}
