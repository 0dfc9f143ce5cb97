//! Chara (sign) dasha timeline.
//!
//! Twelve sign periods run from the lagna, forward or backward depending on
//! the lagna sign. Each maha period is split into twelve antar periods whose
//! lengths are proportional to the antar signs' own year counts.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{EphemerisSnapshot, Planet};
use crate::error::InputError;
use crate::zodiac::{count_backward, count_forward, sign_lord, sign_name, step_sign};

pub const CHARA_YEAR_DAYS: f64 = 365.25;

const FORWARD_SIGNS: [u8; 6] = [1, 2, 3, 7, 8, 9];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaDirection {
    Forward,
    Backward,
}

impl DashaDirection {
    pub fn from_lagna(lagna_sign: u8) -> Self {
        if FORWARD_SIGNS.contains(&lagna_sign) {
            DashaDirection::Forward
        } else {
            DashaDirection::Backward
        }
    }

    pub fn is_forward(self) -> bool {
        self == DashaDirection::Forward
    }
}

/// The twelve signs starting at `seed`, stepping in `direction`.
pub fn dasha_order(seed: u8, direction: DashaDirection) -> [u8; 12] {
    let mut order = [seed; 12];
    for i in 1..12 {
        order[i] = step_sign(order[i - 1], direction.is_forward());
    }
    order
}

/// Years for a sign: 12 when its lord sits in it, otherwise the inclusive
/// count from the sign to its lord in `direction`.
pub fn dasha_years(sign: u8, lord_sign: u8, direction: DashaDirection) -> u8 {
    if sign == lord_sign {
        return 12;
    }
    match direction {
        DashaDirection::Forward => count_forward(sign, lord_sign),
        DashaDirection::Backward => count_backward(sign, lord_sign),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntarDasha {
    pub sign: u8,
    #[serde(rename = "signName")]
    pub sign_name: String,
    pub lord: Planet,
    pub years: f64,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharaDashaPeriod {
    pub sign: u8,
    #[serde(rename = "signName")]
    pub sign_name: String,
    pub lord: Planet,
    #[serde(rename = "lordSign")]
    pub lord_sign: u8,
    pub years: u8,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "antarDashas")]
    pub antar_dashas: Vec<AntarDasha>,
}

/// The running maha and antar period at some instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDasha {
    #[serde(rename = "mahaSign")]
    pub maha_sign: u8,
    #[serde(rename = "mahaSignName")]
    pub maha_sign_name: String,
    #[serde(rename = "mahaLord")]
    pub maha_lord: Planet,
    #[serde(rename = "antarSign", skip_serializing_if = "Option::is_none")]
    pub antar_sign: Option<u8>,
    #[serde(rename = "antarSignName", skip_serializing_if = "Option::is_none")]
    pub antar_sign_name: Option<String>,
    #[serde(rename = "antarLord", skip_serializing_if = "Option::is_none")]
    pub antar_lord: Option<Planet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharaDashaTimeline {
    pub direction: DashaDirection,
    #[serde(rename = "lagnaSign")]
    pub lagna_sign: u8,
    #[serde(rename = "mahaDashas")]
    pub maha_dashas: Vec<CharaDashaPeriod>,
    #[serde(rename = "totalCycleYears")]
    pub total_cycle_years: u32,
}

impl CharaDashaTimeline {
    /// Maha and antar periods containing `now`, start inclusive and end exclusive.
    pub fn current_period(&self, now: DateTime<Utc>) -> Option<CurrentDasha> {
        let maha = self
            .maha_dashas
            .iter()
            .find(|m| m.start_date <= now && now < m.end_date)?;
        let antar = maha
            .antar_dashas
            .iter()
            .find(|a| a.start_date <= now && now < a.end_date);

        Some(CurrentDasha {
            maha_sign: maha.sign,
            maha_sign_name: maha.sign_name.clone(),
            maha_lord: maha.lord,
            antar_sign: antar.map(|a| a.sign),
            antar_sign_name: antar.map(|a| a.sign_name.clone()),
            antar_lord: antar.map(|a| a.lord),
        })
    }
}

fn out_of_range(what: &str, sign: u8) -> InputError {
    InputError::DateOutOfRange {
        context: format!("{} dasha of {}", what, sign_name(sign)),
    }
}

fn sign_years(
    snapshot: &EphemerisSnapshot,
    sign: u8,
    direction: DashaDirection,
) -> Result<(u8, u8), InputError> {
    let lord_sign = snapshot.planet_sign(sign_lord(sign))?;
    Ok((lord_sign, dasha_years(sign, lord_sign, direction)))
}

fn antar_dashas(
    snapshot: &EphemerisSnapshot,
    maha_sign: u8,
    maha_years: u8,
    start: DateTime<Utc>,
    direction: DashaDirection,
) -> Result<Vec<AntarDasha>, InputError> {
    let order = dasha_order(maha_sign, direction);
    let mut weights = Vec::with_capacity(12);
    for sign in order {
        weights.push(sign_years(snapshot, sign, direction)?.1 as f64);
    }
    let total: f64 = weights.iter().sum();

    let mut current = start;
    let mut periods = Vec::with_capacity(12);
    for (sign, weight) in order.into_iter().zip(weights) {
        let years = maha_years as f64 * weight / total;
        let days = (years * CHARA_YEAR_DAYS) as i64;
        let end = current
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| out_of_range("antar", sign))?;
        periods.push(AntarDasha {
            sign,
            sign_name: sign_name(sign).to_string(),
            lord: sign_lord(sign),
            years,
            start_date: current,
            end_date: end,
        });
        current = end;
    }
    Ok(periods)
}

/// Build the full twelve-sign cycle starting at `birth`.
pub fn calculate_chara_dasha(
    snapshot: &EphemerisSnapshot,
    birth: DateTime<Utc>,
) -> Result<CharaDashaTimeline, InputError> {
    let lagna_sign = snapshot.lagna_sign();
    let direction = DashaDirection::from_lagna(lagna_sign);

    let mut current = birth;
    let mut maha_dashas = Vec::with_capacity(12);
    for sign in dasha_order(lagna_sign, direction) {
        let (lord_sign, years) = sign_years(snapshot, sign, direction)?;
        let end = current
            .checked_add_months(Months::new(12 * years as u32))
            .ok_or_else(|| out_of_range("maha", sign))?;
        let antar = antar_dashas(snapshot, sign, years, current, direction)?;
        maha_dashas.push(CharaDashaPeriod {
            sign,
            sign_name: sign_name(sign).to_string(),
            lord: sign_lord(sign),
            lord_sign,
            years,
            start_date: current,
            end_date: end,
            antar_dashas: antar,
        });
        current = end;
    }

    let total_cycle_years = maha_dashas.iter().map(|m| m.years as u32).sum();
    log::debug!(
        "Chara dasha: {:?} from {}, {} years",
        direction,
        sign_name(lagna_sign),
        total_cycle_years
    );
    Ok(CharaDashaTimeline {
        direction,
        lagna_sign,
        maha_dashas,
        total_cycle_years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::{AscendantData, PlanetPosition};
    use chrono::TimeZone;

    fn snapshot(lagna_longitude: f64) -> EphemerisSnapshot {
        let signs = [
            (Planet::Sun, 5u8),
            (Planet::Moon, 4),
            (Planet::Mars, 8),
            (Planet::Mercury, 3),
            (Planet::Jupiter, 9),
            (Planet::Venus, 2),
            (Planet::Saturn, 10),
        ];
        let planets = signs
            .iter()
            .map(|(p, s)| PlanetPosition::from_longitude(*p, (*s as f64 - 1.0) * 30.0 + 10.0, false));
        EphemerisSnapshot::new(planets, AscendantData::whole_sign(lagna_longitude))
    }

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_direction() {
        assert_eq!(DashaDirection::from_lagna(1), DashaDirection::Forward);
        assert_eq!(DashaDirection::from_lagna(9), DashaDirection::Forward);
        assert_eq!(DashaDirection::from_lagna(4), DashaDirection::Backward);
        assert_eq!(DashaDirection::from_lagna(12), DashaDirection::Backward);
    }

    #[test]
    fn test_order() {
        assert_eq!(&dasha_order(1, DashaDirection::Forward)[..3], &[1, 2, 3]);
        assert_eq!(&dasha_order(4, DashaDirection::Backward)[..3], &[4, 3, 2]);
        assert_eq!(&dasha_order(1, DashaDirection::Backward)[..3], &[1, 12, 11]);
    }

    #[test]
    fn test_years() {
        assert_eq!(dasha_years(1, 8, DashaDirection::Forward), 8);
        assert_eq!(dasha_years(2, 2, DashaDirection::Forward), 12);
        assert_eq!(dasha_years(1, 8, DashaDirection::Backward), 6);
        assert_eq!(dasha_years(10, 2, DashaDirection::Forward), 5);
    }

    #[test]
    fn test_timeline_cycle() {
        let timeline = calculate_chara_dasha(&snapshot(15.0), birth()).unwrap();
        assert_eq!(timeline.direction, DashaDirection::Forward);
        assert_eq!(timeline.maha_dashas.len(), 12);
        assert_eq!(timeline.maha_dashas[0].years, 8);
        assert_eq!(timeline.maha_dashas[1].years, 12);

        let sum: u32 = timeline.maha_dashas.iter().map(|m| m.years as u32).sum();
        assert_eq!(sum, timeline.total_cycle_years);

        let first_end = Utc.with_ymd_and_hms(1998, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(timeline.maha_dashas[0].end_date, first_end);
        assert_eq!(timeline.maha_dashas[1].start_date, first_end);
    }

    #[test]
    fn test_antar_proportions() {
        let timeline = calculate_chara_dasha(&snapshot(15.0), birth()).unwrap();
        for maha in &timeline.maha_dashas {
            assert_eq!(maha.antar_dashas.len(), 12);
            assert_eq!(maha.antar_dashas[0].sign, maha.sign);
            let total: f64 = maha.antar_dashas.iter().map(|a| a.years).sum();
            assert!((total - maha.years as f64).abs() < 1e-9);
            let last = &maha.antar_dashas[11];
            let gap = (maha.end_date - last.end_date).num_days().abs();
            assert!(gap <= 15);
        }
    }

    #[test]
    fn test_current_period() {
        let timeline = calculate_chara_dasha(&snapshot(15.0), birth()).unwrap();
        let current = timeline.current_period(birth()).unwrap();
        assert_eq!(current.maha_sign, 1);
        assert_eq!(current.antar_sign, Some(1));

        let boundary = timeline.maha_dashas[1].start_date;
        assert_eq!(timeline.current_period(boundary).unwrap().maha_sign, 2);

        let before = birth() - Duration::days(1);
        assert!(timeline.current_period(before).is_none());
    }

    #[test]
    fn test_missing_lord() {
        let mut snap = snapshot(15.0);
        snap.planets.remove(&Planet::Venus);
        assert_eq!(
            calculate_chara_dasha(&snap, birth()).unwrap_err(),
            InputError::MissingPlanet { planet: Planet::Venus }
        );
    }
}
