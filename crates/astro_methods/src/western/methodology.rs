use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::types::{BirthData, EphemerisSnapshot, Planet};
use crate::error::{ChartError, PreferenceError};
use crate::methodology::preferences::{
    require_house_system, wrong_methodology, HouseSystem, Preferences, WesternPreferences,
};
use crate::methodology::result::{ChartPayload, ChartResult};
use crate::methodology::{Methodology, MethodologyKind};
use crate::western::dignities::{dignities_for, DignityResult};

const FEATURES: &[&str] = &["planetary_positions", "houses", "ascendant", "dignities"];

const HOUSE_SYSTEMS: &[HouseSystem] = &[
    HouseSystem::Placidus,
    HouseSystem::Koch,
    HouseSystem::Equal,
    HouseSystem::Campanus,
    HouseSystem::Regiomontanus,
    HouseSystem::WholeSign,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WesternChart {
    pub dignities: BTreeMap<Planet, Vec<DignityResult>>,
}

pub struct WesternMethodology;

impl WesternMethodology {
    fn preferences<'p>(
        &self,
        preferences: &'p Preferences,
    ) -> Result<&'p WesternPreferences, PreferenceError> {
        match preferences {
            Preferences::Western(p) => Ok(p),
            other => Err(wrong_methodology(MethodologyKind::Western, other)),
        }
    }

    pub fn build_chart(&self, snapshot: &EphemerisSnapshot) -> WesternChart {
        WesternChart {
            dignities: snapshot
                .planets
                .values()
                .map(|p| (p.planet, dignities_for(p.planet, p.longitude)))
                .collect(),
        }
    }
}

impl Methodology for WesternMethodology {
    fn name(&self) -> &'static str {
        MethodologyKind::Western.name()
    }

    fn display_name(&self) -> &'static str {
        MethodologyKind::Western.display_name()
    }

    fn supported_features(&self) -> &'static [&'static str] {
        FEATURES
    }

    fn validate_preferences(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        let prefs = self.preferences(preferences)?;
        require_house_system(MethodologyKind::Western, prefs.house_system, HOUSE_SYSTEMS)
    }

    fn compute_chart(
        &self,
        birth: &BirthData,
        snapshot: &EphemerisSnapshot,
        preferences: &Preferences,
    ) -> Result<ChartResult, ChartError> {
        self.validate_preferences(preferences)?;
        snapshot.validate()?;
        log::info!("Computing Western chart for {}", birth.date_time);
        let chart = self.build_chart(snapshot);
        Ok(ChartResult::new(
            MethodologyKind::Western,
            birth,
            snapshot,
            ChartPayload::Western(chart),
        ))
    }
}
