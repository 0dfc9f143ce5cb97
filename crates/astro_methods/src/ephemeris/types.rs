use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::InputError;
use crate::nakshatra::nakshatra_number;
use crate::zodiac::{degree_in_sign, sign_lord, sign_of_longitude};

/// The seven classical planets plus the two lunar nodes.
///
/// Declaration order is the canonical iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

impl Planet {
    pub const ALL: [Planet; 9] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mars,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Saturn,
        Planet::Rahu,
        Planet::Ketu,
    ];

    /// Planets eligible for the Chara Karaka ranking (nodes excluded).
    pub const CLASSICAL: [Planet; 7] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mars,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Saturn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mars => "Mars",
            Planet::Mercury => "Mercury",
            Planet::Jupiter => "Jupiter",
            Planet::Venus => "Venus",
            Planet::Saturn => "Saturn",
            Planet::Rahu => "Rahu",
            Planet::Ketu => "Ketu",
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sidereal position of one planet as supplied by the ephemeris provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub planet: Planet,
    /// Sidereal longitude in degrees [0, 360)
    pub longitude: f64,
    /// Sign number 1-12
    pub sign: u8,
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64,
    /// Nakshatra number 1-27
    pub nakshatra: u8,
    #[serde(default)]
    pub retrograde: bool,
}

impl PlanetPosition {
    /// Derive sign, degree and nakshatra from a sidereal longitude.
    pub fn from_longitude(planet: Planet, longitude: f64, retrograde: bool) -> Self {
        Self {
            planet,
            longitude,
            sign: sign_of_longitude(longitude),
            degree_in_sign: degree_in_sign(longitude),
            nakshatra: nakshatra_number(longitude),
            retrograde,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AscendantData {
    pub longitude: f64,
    pub sign: u8,
    #[serde(rename = "houseCusps")]
    pub house_cusps: Vec<f64>,
}

impl AscendantData {
    pub fn new(longitude: f64, house_cusps: Vec<f64>) -> Self {
        Self {
            longitude,
            sign: sign_of_longitude(longitude),
            house_cusps,
        }
    }

    /// Equal twelve-sign cusps starting at 0° of the ascendant's sign.
    pub fn whole_sign(longitude: f64) -> Self {
        let sign = sign_of_longitude(longitude);
        let cusps = (0..12)
            .map(|i| ((sign as usize - 1 + i) % 12) as f64 * 30.0)
            .collect();
        Self {
            longitude,
            sign,
            house_cusps: cusps,
        }
    }
}

/// Twelve cusp longitudes; house `h` spans cusp `h` up to cusp `h + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps([f64; 12]);

impl HouseCusps {
    pub fn from_slice(cusps: &[f64]) -> Result<Self, InputError> {
        let arr: [f64; 12] = cusps
            .try_into()
            .map_err(|_| InputError::MissingCusps { found: cusps.len() })?;
        for value in arr {
            if !(0.0..360.0).contains(&value) {
                return Err(InputError::LongitudeOutOfRange { value });
            }
        }
        Ok(Self(arr))
    }

    pub fn cusp(&self, house: u8) -> Result<f64, InputError> {
        if !(1..=12).contains(&house) {
            return Err(InputError::HouseOutOfRange { house });
        }
        Ok(self.0[house as usize - 1])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sign occupied by the cusp of `house`.
    pub fn cusp_sign(&self, house: u8) -> Result<u8, InputError> {
        self.cusp(house).map(sign_of_longitude)
    }

    /// Whether `longitude` lies in the span of `house`, wrapping at 0°.
    pub fn contains(&self, house: u8, longitude: f64) -> Result<bool, InputError> {
        let start = self.cusp(house)?;
        let end = self.0[house as usize % 12];
        Ok(if start < end {
            start <= longitude && longitude < end
        } else {
            longitude >= start || longitude < end
        })
    }

    /// House holding `longitude`. Falls back to house 1 for degenerate cusps.
    pub fn house_of(&self, longitude: f64) -> u8 {
        (1..=12u8)
            .find(|h| self.contains(*h, longitude).unwrap_or(false))
            .unwrap_or(1)
    }

    pub fn sign_lord_of_cusp(&self, house: u8) -> Result<Planet, InputError> {
        self.cusp_sign(house).map(sign_lord)
    }
}

/// Everything the rule engines consume for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSnapshot {
    pub planets: BTreeMap<Planet, PlanetPosition>,
    pub ascendant: AscendantData,
}

impl EphemerisSnapshot {
    pub fn new(planets: impl IntoIterator<Item = PlanetPosition>, ascendant: AscendantData) -> Self {
        Self {
            planets: planets.into_iter().map(|p| (p.planet, p)).collect(),
            ascendant,
        }
    }

    /// Parse a provider payload and check it is internally usable.
    pub fn from_json(text: &str) -> Result<Self, crate::error::ChartError> {
        let snapshot: EphemerisSnapshot = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        for pos in self.planets.values() {
            if !(0.0..360.0).contains(&pos.longitude) {
                return Err(InputError::LongitudeOutOfRange { value: pos.longitude });
            }
            if !(1..=12).contains(&pos.sign) {
                return Err(InputError::SignOutOfRange { sign: pos.sign });
            }
        }
        if !(0.0..360.0).contains(&self.ascendant.longitude) {
            return Err(InputError::LongitudeOutOfRange {
                value: self.ascendant.longitude,
            });
        }
        if !(1..=12).contains(&self.ascendant.sign) {
            return Err(InputError::SignOutOfRange {
                sign: self.ascendant.sign,
            });
        }
        Ok(())
    }

    pub fn planet(&self, planet: Planet) -> Result<&PlanetPosition, InputError> {
        self.planets
            .get(&planet)
            .ok_or(InputError::MissingPlanet { planet })
    }

    /// Sign of a planet, failing when the provider omitted it.
    pub fn planet_sign(&self, planet: Planet) -> Result<u8, InputError> {
        self.planet(planet).map(|p| p.sign)
    }

    pub fn cusps(&self) -> Result<HouseCusps, InputError> {
        HouseCusps::from_slice(&self.ascendant.house_cusps)
    }

    pub fn lagna_sign(&self) -> u8 {
        self.ascendant.sign
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    #[serde(rename = "dateTime")]
    pub date_time: DateTime<FixedOffset>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    #[serde(rename = "locationName", default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
