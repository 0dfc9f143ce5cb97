//! Nakshatra utilities.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters). Lordship cycles through
//! the nine Vimshottari lords starting from Ketu.

use serde::{Deserialize, Serialize};
use crate::ephemeris::types::Planet;
use crate::zodiac::normalize_degrees;

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

/// Vimshottari lords with their year weights, in cycle order. Totals 120.
pub const VIMSHOTTARI_SEQUENCE: [(Planet, f64); 9] = [
    (Planet::Ketu, 7.0),
    (Planet::Venus, 20.0),
    (Planet::Sun, 6.0),
    (Planet::Moon, 10.0),
    (Planet::Mars, 7.0),
    (Planet::Rahu, 18.0),
    (Planet::Jupiter, 16.0),
    (Planet::Saturn, 19.0),
    (Planet::Mercury, 17.0),
];

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

// (slug, display_name)
const NAKSHATRA_ORDER: [(&str, &str); NAKSHATRA_COUNT] = [
    ("ashwini", "Ashwini"),
    ("bharani", "Bharani"),
    ("krittika", "Krittika"),
    ("rohini", "Rohini"),
    ("mrigashira", "Mrigashira"),
    ("ardra", "Ardra"),
    ("punarvasu", "Punarvasu"),
    ("pushya", "Pushya"),
    ("ashlesha", "Ashlesha"),
    ("magha", "Magha"),
    ("purva_phalguni", "Purva Phalguni"),
    ("uttara_phalguni", "Uttara Phalguni"),
    ("hasta", "Hasta"),
    ("chitra", "Chitra"),
    ("swati", "Swati"),
    ("vishakha", "Vishakha"),
    ("anuradha", "Anuradha"),
    ("jyeshtha", "Jyeshtha"),
    ("mula", "Mula"),
    ("purva_ashadha", "Purva Ashadha"),
    ("uttara_ashadha", "Uttara Ashadha"),
    ("shravana", "Shravana"),
    ("dhanishta", "Dhanishta"),
    ("shatabhisha", "Shatabhisha"),
    ("purva_bhadrapada", "Purva Bhadrapada"),
    ("uttara_bhadrapada", "Uttara Bhadrapada"),
    ("revati", "Revati"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: Planet,
    pub start: f64,
    pub end: f64,
    /// 1-based.
    pub number: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    #[serde(flatten)]
    pub base: NakshatraRecord,
    pub offset: f64,
    pub progress: f64,
    pub pada: u8,
    #[serde(rename = "padaFraction")]
    pub pada_fraction: f64,
}

fn build_nakshatra_table() -> Vec<NakshatraRecord> {
    let mut table = Vec::with_capacity(NAKSHATRA_COUNT);
    for (idx, (slug, display_name)) in NAKSHATRA_ORDER.iter().enumerate() {
        let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
        table.push(NakshatraRecord {
            id: slug.to_string(),
            name: display_name.to_string(),
            lord: VIMSHOTTARI_SEQUENCE[idx % 9].0,
            start,
            end: start + NAKSHATRA_SEGMENT_SIZE,
            number: idx as u8 + 1,
        });
    }
    table
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<NakshatraRecord> = build_nakshatra_table();
}

/// 1-based nakshatra number containing the longitude.
pub fn nakshatra_number(longitude: f64) -> u8 {
    let lon = normalize_degrees(longitude);
    ((lon / NAKSHATRA_SEGMENT_SIZE) as usize % NAKSHATRA_COUNT) as u8 + 1
}

/// Star lord of a 1-based nakshatra number.
pub fn nakshatra_lord(number: u8) -> Planet {
    VIMSHOTTARI_SEQUENCE[(number as usize + 8) % 9].0
}

pub fn nakshatra_record(number: u8) -> &'static NakshatraRecord {
    &NAKSHATRA_TABLE[(number as usize + NAKSHATRA_COUNT - 1) % NAKSHATRA_COUNT]
}

/// Return the nakshatra containing the given longitude with pada details.
pub fn nakshatra_for_longitude(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let entry = nakshatra_record(nakshatra_number(lon));

    let offset = lon - entry.start;
    let pada = ((offset / PADA_SIZE) as u8).min(3) + 1;
    let pada_offset = offset - ((pada - 1) as f64 * PADA_SIZE);

    NakshatraPlacement {
        base: entry.clone(),
        offset,
        progress: offset / NAKSHATRA_SEGMENT_SIZE,
        pada,
        pada_fraction: pada_offset / PADA_SIZE,
    }
}
