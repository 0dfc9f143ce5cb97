use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{BirthData, EphemerisSnapshot};
use crate::error::{ChartError, PreferenceError};
use crate::jaimini::arudha::{calculate_arudha_padas, ArudhaPadas};
use crate::jaimini::chara_dasha::{calculate_chara_dasha, CharaDashaTimeline, CurrentDasha};
use crate::jaimini::drishti::{drishti_table, SignDrishti};
use crate::jaimini::karakas::{
    calculate_chara_karakas, calculate_karakamsha, calculate_sthira_karakas, CharaKarakas,
    KarakaRole, Karakamsha, SthiraKarakas,
};
use crate::jaimini::yogas::{detect_all, JaiminiYoga};
use crate::methodology::preferences::{
    require_house_system, wrong_methodology, HouseSystem, JaiminiPreferences, Preferences,
};
use crate::methodology::result::{ChartPayload, ChartResult};
use crate::methodology::{Methodology, MethodologyKind};

const FEATURES: &[&str] = &[
    "planetary_positions",
    "houses",
    "ascendant",
    "chara_karakas",
    "karakamsha",
    "arudha_padas",
    "rashi_drishti",
    "chara_dasha",
    "jaimini_yogas",
    "pada_lagna",
];

const HOUSE_SYSTEMS: &[HouseSystem] = &[HouseSystem::WholeSign, HouseSystem::Equal];

/// Jaimini payload. Sections switched off in the preferences are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JaiminiChart {
    #[serde(rename = "charaKarakas", skip_serializing_if = "Option::is_none")]
    pub chara_karakas: Option<CharaKarakas>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub karakamsha: Option<Karakamsha>,
    #[serde(rename = "sthiraKarakas", skip_serializing_if = "Option::is_none")]
    pub sthira_karakas: Option<SthiraKarakas>,
    #[serde(rename = "arudhaPadas", skip_serializing_if = "Option::is_none")]
    pub arudha_padas: Option<ArudhaPadas>,
    #[serde(rename = "rashiDrishti", skip_serializing_if = "Option::is_none")]
    pub rashi_drishti: Option<Vec<SignDrishti>>,
    #[serde(rename = "charaDasha", skip_serializing_if = "Option::is_none")]
    pub chara_dasha: Option<CharaDashaTimeline>,
    #[serde(rename = "currentDasha", skip_serializing_if = "Option::is_none")]
    pub current_dasha: Option<CurrentDasha>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yogas: Option<Vec<JaiminiYoga>>,
}

pub struct JaiminiMethodology;

impl JaiminiMethodology {
    fn preferences<'p>(
        &self,
        preferences: &'p Preferences,
    ) -> Result<&'p JaiminiPreferences, PreferenceError> {
        match preferences {
            Preferences::Jaimini(p) => Ok(p),
            other => Err(wrong_methodology(MethodologyKind::Jaimini, other)),
        }
    }

    /// Derive the Jaimini payload from positions.
    ///
    /// Karakamsha and sthira karakas ride on the chara karaka switch. Yogas
    /// also need rashi drishti switched on.
    pub fn build_chart(
        &self,
        birth: &BirthData,
        snapshot: &EphemerisSnapshot,
        prefs: &JaiminiPreferences,
    ) -> Result<JaiminiChart, ChartError> {
        let mut chart = JaiminiChart::default();

        if prefs.enable_chara_karakas {
            let karakas = calculate_chara_karakas(snapshot)?;
            chart.karakamsha = Some(calculate_karakamsha(karakas.get(KarakaRole::Atmakaraka)));
            chart.sthira_karakas = Some(calculate_sthira_karakas(snapshot)?);
            if prefs.enable_rashi_drishti {
                chart.yogas = Some(detect_all(snapshot, &karakas)?);
            }
            chart.chara_karakas = Some(karakas);
        }
        if prefs.enable_arudha_padas {
            chart.arudha_padas = Some(calculate_arudha_padas(snapshot)?);
        }
        if prefs.enable_rashi_drishti {
            chart.rashi_drishti = Some(drishti_table());
        }
        if prefs.enable_chara_dasha {
            let timeline = calculate_chara_dasha(snapshot, birth.date_time.with_timezone(&Utc))?;
            chart.current_dasha = timeline.current_period(Utc::now());
            chart.chara_dasha = Some(timeline);
        }

        Ok(chart)
    }
}

impl Methodology for JaiminiMethodology {
    fn name(&self) -> &'static str {
        MethodologyKind::Jaimini.name()
    }

    fn display_name(&self) -> &'static str {
        MethodologyKind::Jaimini.display_name()
    }

    fn supported_features(&self) -> &'static [&'static str] {
        FEATURES
    }

    fn validate_preferences(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        let prefs = self.preferences(preferences)?;
        require_house_system(MethodologyKind::Jaimini, prefs.house_system, HOUSE_SYSTEMS)
    }

    fn compute_chart(
        &self,
        birth: &BirthData,
        snapshot: &EphemerisSnapshot,
        preferences: &Preferences,
    ) -> Result<ChartResult, ChartError> {
        self.validate_preferences(preferences)?;
        snapshot.validate()?;
        let prefs = self.preferences(preferences)?;
        log::info!("Computing Jaimini chart for {}", birth.date_time);

        let chart = self.build_chart(birth, snapshot, prefs)?;
        Ok(ChartResult::new(
            MethodologyKind::Jaimini,
            birth,
            snapshot,
            ChartPayload::Jaimini(chart),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::{AscendantData, Planet, PlanetPosition};
    use crate::methodology::preferences::KpPreferences;
    use chrono::DateTime;

    fn birth() -> BirthData {
        BirthData {
            date_time: DateTime::parse_from_rfc3339("1990-06-15T08:30:00+05:30").unwrap(),
            latitude: 28.6,
            longitude: 77.2,
            timezone: "Asia/Kolkata".to_string(),
            location_name: None,
            name: None,
        }
    }

    fn snapshot() -> EphemerisSnapshot {
        let planets = Planet::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| PlanetPosition::from_longitude(*p, i as f64 * 37.0 + 3.5, false));
        EphemerisSnapshot::new(planets, AscendantData::whole_sign(12.0))
    }

    #[test]
    fn test_house_system_validation() {
        let m = JaiminiMethodology;
        let mut prefs = JaiminiPreferences::default();
        assert!(m.validate_preferences(&Preferences::Jaimini(prefs.clone())).is_ok());
        prefs.house_system = HouseSystem::Equal;
        assert!(m.validate_preferences(&Preferences::Jaimini(prefs.clone())).is_ok());
        prefs.house_system = HouseSystem::Placidus;
        assert!(matches!(
            m.validate_preferences(&Preferences::Jaimini(prefs)),
            Err(PreferenceError::UnsupportedHouseSystem { .. })
        ));
    }

    #[test]
    fn test_rejects_other_variant() {
        let m = JaiminiMethodology;
        let err = m
            .validate_preferences(&Preferences::Kp(KpPreferences::default()))
            .unwrap_err();
        assert!(matches!(err, PreferenceError::WrongMethodology { .. }));
    }

    #[test]
    fn test_full_chart() {
        let m = JaiminiMethodology;
        let result = m
            .compute_chart(&birth(), &snapshot(), &Preferences::Jaimini(JaiminiPreferences::default()))
            .unwrap();
        assert_eq!(result.methodology, MethodologyKind::Jaimini);
        let ChartPayload::Jaimini(chart) = result.payload else {
            panic!("expected a Jaimini payload");
        };
        assert_eq!(chart.chara_karakas.unwrap().iter().count(), 7);
        assert!(chart.karakamsha.is_some());
        assert_eq!(chart.arudha_padas.unwrap().padas.len(), 12);
        assert_eq!(chart.rashi_drishti.unwrap().len(), 12);
        assert_eq!(chart.chara_dasha.unwrap().maha_dashas.len(), 12);
        assert!(chart.yogas.is_some());
    }

    #[test]
    fn test_disabled_sections() {
        let prefs = JaiminiPreferences {
            enable_chara_karakas: false,
            enable_chara_dasha: false,
            ..JaiminiPreferences::default()
        };
        let chart = JaiminiMethodology.build_chart(&birth(), &snapshot(), &prefs).unwrap();
        assert!(chart.chara_karakas.is_none());
        assert!(chart.yogas.is_none());
        assert!(chart.chara_dasha.is_none());
        assert!(chart.current_dasha.is_none());
        assert!(chart.arudha_padas.is_some());
    }

    #[test]
    fn test_yogas_need_drishti() {
        let prefs = JaiminiPreferences {
            enable_rashi_drishti: false,
            ..JaiminiPreferences::default()
        };
        let chart = JaiminiMethodology.build_chart(&birth(), &snapshot(), &prefs).unwrap();
        assert!(chart.chara_karakas.is_some());
        assert!(chart.sthira_karakas.is_some());
        assert!(chart.rashi_drishti.is_none());
        assert!(chart.yogas.is_none());
    }

    #[test]
    fn test_out_of_range_sign_is_an_error() {
        let mut snap = snapshot();
        if let Some(mars) = snap.planets.get_mut(&Planet::Mars) {
            mars.sign = 0;
        }
        let err = JaiminiMethodology
            .compute_chart(&birth(), &snap, &Preferences::Jaimini(JaiminiPreferences::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::Input(crate::error::InputError::SignOutOfRange { sign: 0 })
        ));
    }

    #[test]
    fn test_features() {
        assert!(JaiminiMethodology.is_feature_supported("chara_dasha"));
        assert!(!JaiminiMethodology.is_feature_supported("sub_lords"));
    }
}
