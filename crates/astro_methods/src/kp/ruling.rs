//! KP ruling planets for the birth moment.

use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{EphemerisSnapshot, Planet};
use crate::error::InputError;
use crate::kp::sub_lord::calculate_sub_lord;

// Indexed from Sunday.
const WEEKDAY_LORDS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

/// Five positional slots; a planet may fill more than one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulingPlanets {
    #[serde(rename = "dayLord")]
    pub day_lord: Planet,
    #[serde(rename = "ascendantStarLord")]
    pub ascendant_star_lord: Planet,
    #[serde(rename = "ascendantSubLord")]
    pub ascendant_sub_lord: Planet,
    #[serde(rename = "moonStarLord")]
    pub moon_star_lord: Planet,
    #[serde(rename = "moonSubLord")]
    pub moon_sub_lord: Planet,
}

impl RulingPlanets {
    pub fn as_list(&self) -> [Planet; 5] {
        [
            self.day_lord,
            self.ascendant_star_lord,
            self.ascendant_sub_lord,
            self.moon_star_lord,
            self.moon_sub_lord,
        ]
    }

    /// Lords that add weight to an event prediction.
    pub fn strength_lords(&self) -> [Planet; 3] {
        [self.day_lord, self.ascendant_star_lord, self.moon_star_lord]
    }
}

/// Lord of the local weekday of `date_time`.
pub fn day_lord(date_time: &DateTime<FixedOffset>) -> Planet {
    WEEKDAY_LORDS[date_time.weekday().num_days_from_sunday() as usize]
}

pub fn calculate_ruling_planets(
    date_time: &DateTime<FixedOffset>,
    snapshot: &EphemerisSnapshot,
) -> Result<RulingPlanets, InputError> {
    let asc = calculate_sub_lord(snapshot.ascendant.longitude);
    let moon = calculate_sub_lord(snapshot.planet(Planet::Moon)?.longitude);

    Ok(RulingPlanets {
        day_lord: day_lord(date_time),
        ascendant_star_lord: asc.star_lord,
        ascendant_sub_lord: asc.sub_lord,
        moon_star_lord: moon.star_lord,
        moon_sub_lord: moon.sub_lord,
    })
}
