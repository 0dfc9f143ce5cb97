use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::types::{BirthData, EphemerisSnapshot, Planet};
use crate::error::{ChartError, PreferenceError};
use crate::kp::prediction::{EventPrediction, PredictionEngine};
use crate::kp::ruling::{calculate_ruling_planets, RulingPlanets};
use crate::kp::significators::{HouseSignificators, PlanetSignifications, SignificatorCalculator};
use crate::kp::sub_lord::{calculate_sub_lord, SubLordResult};
use crate::methodology::preferences::{
    require_ayanamsha, require_house_system, wrong_methodology, Ayanamsha, HouseSystem,
    KpPreferences, Preferences,
};
use crate::methodology::result::{ChartPayload, ChartResult};
use crate::methodology::{Methodology, MethodologyKind};

const FEATURES: &[&str] = &[
    "planetary_positions",
    "houses",
    "ascendant",
    "nakshatras",
    "kp_cusps",
    "sub_lords",
    "ruling_planets",
    "significators",
    "kp_predictions",
];

/// KP payload. Sections switched off in the preferences are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpChart {
    #[serde(rename = "planetSubLords", skip_serializing_if = "Option::is_none")]
    pub planet_sub_lords: Option<BTreeMap<Planet, SubLordResult>>,
    #[serde(rename = "ascendantSubLord", skip_serializing_if = "Option::is_none")]
    pub ascendant_sub_lord: Option<SubLordResult>,
    #[serde(rename = "houseCuspSubLords", skip_serializing_if = "Option::is_none")]
    pub house_cusp_sub_lords: Option<Vec<SubLordResult>>,
    #[serde(rename = "rulingPlanets", skip_serializing_if = "Option::is_none")]
    pub ruling_planets: Option<RulingPlanets>,
    #[serde(rename = "houseSignificators", skip_serializing_if = "Option::is_none")]
    pub house_significators: Option<Vec<HouseSignificators>>,
    #[serde(rename = "planetSignifications", skip_serializing_if = "Option::is_none")]
    pub planet_significations: Option<BTreeMap<Planet, PlanetSignifications>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<EventPrediction>>,
}

pub struct KpMethodology;

impl KpMethodology {
    fn preferences<'p>(&self, preferences: &'p Preferences) -> Result<&'p KpPreferences, PreferenceError> {
        match preferences {
            Preferences::Kp(p) => Ok(p),
            other => Err(wrong_methodology(MethodologyKind::Kp, other)),
        }
    }

    /// Derive the KP payload from positions.
    pub fn build_chart(
        &self,
        birth: &BirthData,
        snapshot: &EphemerisSnapshot,
        prefs: &KpPreferences,
    ) -> Result<KpChart, ChartError> {
        let mut chart = KpChart::default();

        if prefs.enable_sub_lords {
            let cusps = snapshot.cusps()?;
            chart.planet_sub_lords = Some(
                snapshot
                    .planets
                    .values()
                    .map(|p| (p.planet, calculate_sub_lord(p.longitude)))
                    .collect(),
            );
            chart.ascendant_sub_lord = Some(calculate_sub_lord(snapshot.ascendant.longitude));
            chart.house_cusp_sub_lords =
                Some(cusps.as_slice().iter().map(|c| calculate_sub_lord(*c)).collect());
        }

        let needs_ruling = prefs.enable_ruling_planets || prefs.enable_predictions;
        let ruling = if needs_ruling {
            Some(calculate_ruling_planets(&birth.date_time, snapshot)?)
        } else {
            None
        };

        let needs_significators = prefs.enable_significators || prefs.enable_predictions;
        let houses = if needs_significators {
            let calc = SignificatorCalculator::new(snapshot)?;
            let houses = calc.all_house_significators()?;
            if prefs.enable_significators {
                let mut by_planet = BTreeMap::new();
                for planet in snapshot.planets.keys() {
                    by_planet.insert(*planet, calc.planet_significations(*planet)?);
                }
                chart.planet_significations = Some(by_planet);
            }
            Some(houses)
        } else {
            None
        };

        if prefs.enable_predictions {
            if let (Some(houses), Some(ruling)) = (&houses, &ruling) {
                chart.predictions = Some(PredictionEngine::new(houses, ruling).predict_all());
            }
        }
        if prefs.enable_significators {
            chart.house_significators = houses;
        }
        if prefs.enable_ruling_planets {
            chart.ruling_planets = ruling;
        }

        Ok(chart)
    }
}

impl Methodology for KpMethodology {
    fn name(&self) -> &'static str {
        MethodologyKind::Kp.name()
    }

    fn display_name(&self) -> &'static str {
        MethodologyKind::Kp.display_name()
    }

    fn supported_features(&self) -> &'static [&'static str] {
        FEATURES
    }

    fn validate_preferences(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        let prefs = self.preferences(preferences)?;
        require_ayanamsha(MethodologyKind::Kp, prefs.ayanamsha, &[Ayanamsha::Krishnamurti])?;
        require_house_system(MethodologyKind::Kp, prefs.house_system, &[HouseSystem::Placidus])?;
        Ok(())
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
        log::info!("Computing KP chart for {}", birth.date_time);

        let chart = self.build_chart(birth, snapshot, prefs)?;
        Ok(ChartResult::new(
            MethodologyKind::Kp,
            birth,
            snapshot,
            ChartPayload::Kp(chart),
        ))
    }
}
