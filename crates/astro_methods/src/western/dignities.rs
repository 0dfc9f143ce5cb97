//! Traditional essential dignities.
//!
//! Rulership, detriment, exaltation and fall from sign tables, plus an
//! exact exaltation check when a planet sits within orb of its exaltation
//! degree.

use serde::{Deserialize, Serialize};

use crate::ephemeris::types::Planet;
use crate::zodiac::{normalize_degrees, sign_name, sign_of_longitude};

pub const EXACT_EXALTATION_ORB: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DignityType {
    Rulership,
    Detriment,
    Exaltation,
    Fall,
    ExactExaltation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DignityResult {
    #[serde(rename = "type")]
    pub dignity_type: DignityType,
    pub sign: u8,
    #[serde(rename = "signName")]
    pub sign_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<f64>,
}

struct DignityRow {
    rules: &'static [u8],
    detriment: &'static [u8],
    exaltation: u8,
    fall: u8,
    /// Exaltation degree as an absolute longitude.
    exact: f64,
}

fn row(planet: Planet) -> Option<DignityRow> {
    let row = match planet {
        Planet::Sun => DignityRow { rules: &[5], detriment: &[11], exaltation: 1, fall: 7, exact: 19.0 },
        Planet::Moon => DignityRow { rules: &[4], detriment: &[10], exaltation: 2, fall: 8, exact: 33.0 },
        Planet::Mercury => DignityRow { rules: &[3, 6], detriment: &[9, 12], exaltation: 6, fall: 12, exact: 165.0 },
        Planet::Venus => DignityRow { rules: &[2, 7], detriment: &[1, 8], exaltation: 12, fall: 6, exact: 357.0 },
        Planet::Mars => DignityRow { rules: &[1, 8], detriment: &[2, 7], exaltation: 10, fall: 4, exact: 298.0 },
        Planet::Jupiter => DignityRow { rules: &[9, 12], detriment: &[3, 6], exaltation: 4, fall: 10, exact: 95.0 },
        Planet::Saturn => DignityRow { rules: &[10, 11], detriment: &[4, 5], exaltation: 7, fall: 1, exact: 201.0 },
        Planet::Rahu | Planet::Ketu => return None,
    };
    Some(row)
}

fn within_orb(longitude: f64, target: f64, orb: f64) -> bool {
    let diff = (normalize_degrees(longitude) - target).abs();
    diff.min(360.0 - diff) <= orb
}

/// Dignities held by `planet` at `longitude`. The nodes hold none.
pub fn dignities_for(planet: Planet, longitude: f64) -> Vec<DignityResult> {
    let Some(row) = row(planet) else {
        return Vec::new();
    };
    let sign = sign_of_longitude(longitude);
    let result = |dignity_type, degree| DignityResult {
        dignity_type,
        sign,
        sign_name: sign_name(sign).to_string(),
        degree,
    };

    let mut dignities = Vec::new();
    if row.rules.contains(&sign) {
        dignities.push(result(DignityType::Rulership, None));
    } else if row.detriment.contains(&sign) {
        dignities.push(result(DignityType::Detriment, None));
    }
    if sign == row.exaltation {
        dignities.push(result(DignityType::Exaltation, None));
    } else if sign == row.fall {
        dignities.push(result(DignityType::Fall, None));
    }
    if within_orb(longitude, row.exact, EXACT_EXALTATION_ORB) {
        dignities.push(result(DignityType::ExactExaltation, Some(row.exact)));
    }
    dignities
}
