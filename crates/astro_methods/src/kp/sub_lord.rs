//! Stellar sub-lord division.
//!
//! Every nakshatra is cut into nine unequal sub spans whose widths follow the
//! Vimshottari year weights, and each sub span is cut again by the same
//! weights to give the sub-sub-lord. The spans always cycle from Ketu.

use serde::{Deserialize, Serialize};

use crate::ephemeris::types::Planet;
use crate::nakshatra::{
    nakshatra_lord, nakshatra_number, NAKSHATRA_SEGMENT_SIZE, VIMSHOTTARI_SEQUENCE,
    VIMSHOTTARI_TOTAL_YEARS,
};
use crate::zodiac::normalize_degrees;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubLordResult {
    #[serde(rename = "nakshatraNumber")]
    pub nakshatra_number: u8,
    #[serde(rename = "starLord")]
    pub star_lord: Planet,
    #[serde(rename = "subLord")]
    pub sub_lord: Planet,
    #[serde(rename = "subSubLord")]
    pub sub_sub_lord: Planet,
    pub longitude: f64,
    #[serde(rename = "positionInNakshatra")]
    pub position_in_nakshatra: f64,
}

/// One sub-lord span in absolute degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubDivision {
    pub lord: Planet,
    pub start: f64,
    pub end: f64,
}

// Find the weighted slot holding `position` within a span of `span` units.
// Returns (lord, slot start, slot width). The last slot absorbs rounding at
// the upper edge so the division stays total.
fn locate(position: f64, span: f64) -> (Planet, f64, f64) {
    let mut cumulative = 0.0;
    for (lord, weight) in VIMSHOTTARI_SEQUENCE {
        let width = weight / VIMSHOTTARI_TOTAL_YEARS * span;
        if position < cumulative + width {
            return (lord, cumulative, width);
        }
        cumulative += width;
    }
    let (lord, weight) = VIMSHOTTARI_SEQUENCE[VIMSHOTTARI_SEQUENCE.len() - 1];
    let width = weight / VIMSHOTTARI_TOTAL_YEARS * span;
    (lord, span - width, width)
}

/// Star, sub and sub-sub lord for a sidereal longitude.
pub fn calculate_sub_lord(longitude: f64) -> SubLordResult {
    let lon = normalize_degrees(longitude);
    let number = nakshatra_number(lon);
    let position_in_nakshatra = (lon % NAKSHATRA_SEGMENT_SIZE).max(0.0);

    // Work in weight units: a full nakshatra is 120 units.
    let units = position_in_nakshatra * VIMSHOTTARI_TOTAL_YEARS / NAKSHATRA_SEGMENT_SIZE;
    let (sub_lord, sub_start, sub_width) = locate(units, VIMSHOTTARI_TOTAL_YEARS);
    let (sub_sub_lord, _, _) = locate(units - sub_start, sub_width);

    SubLordResult {
        nakshatra_number: number,
        star_lord: nakshatra_lord(number),
        sub_lord,
        sub_sub_lord,
        longitude: lon,
        position_in_nakshatra,
    }
}

/// The nine sub spans of a 1-based nakshatra, in order.
pub fn sub_divisions(nakshatra: u8) -> Vec<SubDivision> {
    let base = ((nakshatra as usize + 26) % 27) as f64 * NAKSHATRA_SEGMENT_SIZE;
    let mut start = base;
    VIMSHOTTARI_SEQUENCE
        .iter()
        .map(|(lord, weight)| {
            let width = weight / VIMSHOTTARI_TOTAL_YEARS * NAKSHATRA_SEGMENT_SIZE;
            let division = SubDivision {
                lord: *lord,
                start,
                end: start + width,
            };
            start += width;
            division
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_zodiac() {
        let result = calculate_sub_lord(0.0);
        assert_eq!(result.nakshatra_number, 1);
        assert_eq!(result.star_lord, Planet::Ketu);
        assert_eq!(result.sub_lord, Planet::Ketu);
        assert_eq!(result.sub_sub_lord, Planet::Ketu);
    }

    #[test]
    fn test_second_sub_span() {
        // 1° is 9 units in: past Ketu's 7 units, 2 units into Venus's 20.
        let result = calculate_sub_lord(1.0);
        assert_eq!(result.sub_lord, Planet::Venus);
        assert_eq!(result.sub_sub_lord, Planet::Venus);
    }

    #[test]
    fn test_upper_edge_is_total() {
        let result = calculate_sub_lord(359.999_999_999);
        assert_eq!(result.nakshatra_number, 27);
        assert_eq!(result.star_lord, Planet::Mercury);
        assert_eq!(result.sub_lord, Planet::Mercury);
        assert_eq!(result.sub_sub_lord, Planet::Mercury);
    }

    #[test]
    fn test_sub_divisions_partition_nakshatra() {
        for n in 1..=27u8 {
            let divisions = sub_divisions(n);
            assert_eq!(divisions.len(), 9);
            let total: f64 = divisions.iter().map(|d| d.end - d.start).sum();
            assert!((total - NAKSHATRA_SEGMENT_SIZE).abs() < 1e-9);
            for pair in divisions.windows(2) {
                assert!((pair[0].end - pair[1].start).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_sub_lord_matches_divisions() {
        for n in [1u8, 5, 14, 27] {
            for d in sub_divisions(n) {
                let mid = (d.start + d.end) / 2.0;
                assert_eq!(calculate_sub_lord(mid).sub_lord, d.lord);
            }
        }
    }
}
