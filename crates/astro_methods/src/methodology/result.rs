use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{AscendantData, BirthData, EphemerisSnapshot, PlanetPosition};
use crate::jaimini::JaiminiChart;
use crate::kp::KpChart;
use crate::methodology::MethodologyKind;
use crate::parashara::ParasharaChart;
use crate::western::WesternChart;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ChartPayload {
    Kp(KpChart),
    Jaimini(JaiminiChart),
    Parashara(ParasharaChart),
    Western(WesternChart),
}

/// Output of one `compute_chart` call: the input echo plus the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResult {
    pub methodology: MethodologyKind,
    #[serde(rename = "birthData")]
    pub birth_data: BirthData,
    pub planets: Vec<PlanetPosition>,
    pub ascendant: AscendantData,
    pub payload: ChartPayload,
    #[serde(rename = "calculatedAt")]
    pub calculated_at: DateTime<Utc>,
}

impl ChartResult {
    pub fn new(
        methodology: MethodologyKind,
        birth: &BirthData,
        snapshot: &EphemerisSnapshot,
        payload: ChartPayload,
    ) -> Self {
        Self {
            methodology,
            birth_data: birth.clone(),
            planets: snapshot.planets.values().cloned().collect(),
            ascendant: snapshot.ascendant.clone(),
            payload,
            calculated_at: Utc::now(),
        }
    }
}
