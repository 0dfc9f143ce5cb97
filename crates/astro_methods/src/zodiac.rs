//! Sign tables and modular sign arithmetic shared by every methodology.
//!
//! Signs are numbered 1 (Aries) through 12 (Pisces). All counting helpers
//! wrap around the zodiac.

use serde::{Deserialize, Serialize};
use crate::ephemeris::types::Planet;

pub const SIGN_SIZE: f64 = 30.0;

pub const SIGN_NAMES: [&str; 12] = [
    "Aries", "Taurus", "Gemini", "Cancer",
    "Leo", "Virgo", "Libra", "Scorpio",
    "Sagittarius", "Capricorn", "Aquarius", "Pisces",
];

// Traditional rulers, Scorpio -> Mars and Aquarius -> Saturn.
const SIGN_LORDS: [Planet; 12] = [
    Planet::Mars,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
    Planet::Sun,
    Planet::Mercury,
    Planet::Venus,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Saturn,
    Planet::Jupiter,
];

fn sign_index(sign: u8) -> usize {
    (sign as usize + 11) % 12
}

/// Display name of a 1-based sign number.
pub fn sign_name(sign: u8) -> &'static str {
    SIGN_NAMES[sign_index(sign)]
}

/// Ruling planet of a 1-based sign number.
pub fn sign_lord(sign: u8) -> Planet {
    SIGN_LORDS[sign_index(sign)]
}

/// Signs ruled by a planet, ascending. Empty for the nodes.
pub fn signs_ruled_by(planet: Planet) -> Vec<u8> {
    (1..=12u8).filter(|s| sign_lord(*s) == planet).collect()
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let mut normalized = value % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    normalized
}

/// 1-based sign containing a longitude.
pub fn sign_of_longitude(longitude: f64) -> u8 {
    let lon = normalize_degrees(longitude);
    ((lon / SIGN_SIZE) as u8 % 12) + 1
}

pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_degrees(longitude) % SIGN_SIZE
}

/// The `n`th sign counted from `sign`, where `sign` itself is the 1st.
pub fn nth_sign_from(sign: u8, n: u8) -> u8 {
    ((sign_index(sign) + n as usize + 11) % 12) as u8 + 1
}

/// Inclusive forward count from `from` to `to` (same sign counts as 1).
pub fn count_forward(from: u8, to: u8) -> u8 {
    ((to as i32 - from as i32).rem_euclid(12) + 1) as u8
}

/// Inclusive backward count from `from` to `to` (same sign counts as 1).
pub fn count_backward(from: u8, to: u8) -> u8 {
    ((from as i32 - to as i32).rem_euclid(12) + 1) as u8
}

/// One step forward (+1) or backward (-1) around the zodiac.
pub fn step_sign(sign: u8, forward: bool) -> u8 {
    if forward {
        (sign % 12) + 1
    } else {
        ((sign as i32 - 2).rem_euclid(12) + 1) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Movable,
    Fixed,
    Dual,
}

impl Modality {
    pub fn of(sign: u8) -> Self {
        match sign_index(sign) % 3 {
            0 => Modality::Movable,
            1 => Modality::Fixed,
            _ => Modality::Dual,
        }
    }

    /// Signs of this modality in zodiacal order.
    pub fn signs(self) -> [u8; 4] {
        match self {
            Modality::Movable => [1, 4, 7, 10],
            Modality::Fixed => [2, 5, 8, 11],
            Modality::Dual => [3, 6, 9, 12],
        }
    }

    /// Sign offset where the navamsa count starts.
    pub fn navamsa_offset(self) -> u8 {
        match self {
            Modality::Movable => 0,
            Modality::Fixed => 8,
            Modality::Dual => 4,
        }
    }

    /// The modality this class casts its sign aspects onto.
    pub fn aspect_target(self) -> Self {
        match self {
            Modality::Movable => Modality::Fixed,
            Modality::Fixed => Modality::Dual,
            Modality::Dual => Modality::Movable,
        }
    }
}
