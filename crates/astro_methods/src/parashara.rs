//! Parashara (traditional Vedic) methodology.
//!
//! Positions are echoed from the ephemeris and each body gets its nakshatra
//! placement with lord and pada.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::types::{BirthData, EphemerisSnapshot, Planet};
use crate::error::{ChartError, PreferenceError};
use crate::methodology::preferences::{
    require_ayanamsha, require_house_system, wrong_methodology, Ayanamsha, HouseSystem,
    ParasharaPreferences, Preferences,
};
use crate::methodology::result::{ChartPayload, ChartResult};
use crate::methodology::{Methodology, MethodologyKind};
use crate::nakshatra::{nakshatra_for_longitude, NakshatraPlacement};

const FEATURES: &[&str] = &[
    "planetary_positions",
    "houses",
    "ascendant",
    "nakshatras",
];

const AYANAMSHAS: &[Ayanamsha] = &[
    Ayanamsha::Lahiri,
    Ayanamsha::Raman,
    Ayanamsha::Krishnamurti,
    Ayanamsha::Yukteshwar,
    Ayanamsha::Fagan,
];

const HOUSE_SYSTEMS: &[HouseSystem] = &[
    HouseSystem::WholeSign,
    HouseSystem::Placidus,
    HouseSystem::Koch,
    HouseSystem::Equal,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParasharaChart {
    pub nakshatras: BTreeMap<Planet, NakshatraPlacement>,
    #[serde(rename = "ascendantNakshatra")]
    pub ascendant_nakshatra: NakshatraPlacement,
}

pub struct ParasharaMethodology;

impl ParasharaMethodology {
    fn preferences<'p>(
        &self,
        preferences: &'p Preferences,
    ) -> Result<&'p ParasharaPreferences, PreferenceError> {
        match preferences {
            Preferences::Parashara(p) => Ok(p),
            other => Err(wrong_methodology(MethodologyKind::Parashara, other)),
        }
    }

    pub fn build_chart(&self, snapshot: &EphemerisSnapshot) -> ParasharaChart {
        ParasharaChart {
            nakshatras: snapshot
                .planets
                .values()
                .map(|p| (p.planet, nakshatra_for_longitude(p.longitude)))
                .collect(),
            ascendant_nakshatra: nakshatra_for_longitude(snapshot.ascendant.longitude),
        }
    }
}

impl Methodology for ParasharaMethodology {
    fn name(&self) -> &'static str {
        MethodologyKind::Parashara.name()
    }

    fn display_name(&self) -> &'static str {
        MethodologyKind::Parashara.display_name()
    }

    fn supported_features(&self) -> &'static [&'static str] {
        FEATURES
    }

    fn validate_preferences(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        let prefs = self.preferences(preferences)?;
        require_ayanamsha(MethodologyKind::Parashara, prefs.ayanamsha, AYANAMSHAS)?;
        require_house_system(MethodologyKind::Parashara, prefs.house_system, HOUSE_SYSTEMS)
    }

    fn compute_chart(
        &self,
        birth: &BirthData,
        snapshot: &EphemerisSnapshot,
        preferences: &Preferences,
    ) -> Result<ChartResult, ChartError> {
        self.validate_preferences(preferences)?;
        snapshot.validate()?;
        log::info!("Computing Parashara chart for {}", birth.date_time);
        let chart = self.build_chart(snapshot);
        Ok(ChartResult::new(
            MethodologyKind::Parashara,
            birth,
            snapshot,
            ChartPayload::Parashara(chart),
        ))
    }
}
