//! Rashi drishti: sign-to-sign aspects.
//!
//! Movable signs aspect the fixed signs, fixed signs aspect the dual signs and
//! dual signs aspect the movable signs, in each case skipping the sign that
//! sits next to the aspecting one.

use serde::{Deserialize, Serialize};

use crate::zodiac::{sign_name, Modality};

lazy_static::lazy_static! {
    /// Aspected signs for each sign, indexed by sign - 1.
    static ref DRISHTI_TABLE: Vec<Vec<u8>> = (1..=12u8)
        .map(|sign| {
            Modality::of(sign)
                .aspect_target()
                .signs()
                .into_iter()
                .filter(|target| !is_adjacent(sign, *target))
                .collect()
        })
        .collect();
}

fn is_adjacent(a: u8, b: u8) -> bool {
    matches!((a as i32 - b as i32).abs(), 1 | 11)
}

/// Signs aspected by `sign`, in zodiacal order. Out-of-range signs have none.
pub fn aspected_signs(sign: u8) -> &'static [u8] {
    match sign {
        1..=12 => &DRISHTI_TABLE[sign as usize - 1],
        _ => &[],
    }
}

/// True when `source` casts an aspect on `target`.
pub fn sign_aspects(source: u8, target: u8) -> bool {
    aspected_signs(source).contains(&target)
}

/// True when either sign aspects the other.
///
/// Under this rule no pair of signs aspects in both directions, so "in aspect"
/// for a pair of planets is read one way or the other.
pub fn signs_in_aspect(a: u8, b: u8) -> bool {
    sign_aspects(a, b) || sign_aspects(b, a)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDrishti {
    pub sign: u8,
    #[serde(rename = "signName")]
    pub sign_name: String,
    pub aspects: Vec<u8>,
    #[serde(rename = "aspectNames")]
    pub aspect_names: Vec<String>,
}

/// The whole table in a serializable form, Aries first.
pub fn drishti_table() -> Vec<SignDrishti> {
    (1..=12u8)
        .map(|sign| {
            let aspects = aspected_signs(sign).to_vec();
            SignDrishti {
                sign,
                sign_name: sign_name(sign).to_string(),
                aspect_names: aspects.iter().map(|s| sign_name(*s).to_string()).collect(),
                aspects,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aries_aspects() {
        assert_eq!(aspected_signs(1), &[5, 8, 11]);
        assert!(!sign_aspects(1, 2));
    }

    #[test]
    fn test_each_sign_aspects_three() {
        for sign in 1..=12u8 {
            let targets = aspected_signs(sign);
            assert_eq!(targets.len(), 3, "sign {}", sign);
            let target_modality = Modality::of(sign).aspect_target();
            assert!(targets.iter().all(|t| Modality::of(*t) == target_modality));
        }
    }

    #[test]
    fn test_wraparound_adjacency() {
        // Pisces is next to Aries across the wrap.
        assert_eq!(aspected_signs(12), &[4, 7, 10]);
        // Aquarius is next to Capricorn.
        assert_eq!(aspected_signs(11), &[3, 6, 9]);
    }

    #[test]
    fn test_no_mutual_pairs() {
        for a in 1..=12u8 {
            for b in 1..=12u8 {
                assert!(!(sign_aspects(a, b) && sign_aspects(b, a)));
            }
        }
        assert!(signs_in_aspect(5, 1));
        assert!(!signs_in_aspect(1, 4));
    }

    #[test]
    fn test_out_of_range() {
        assert!(aspected_signs(0).is_empty());
        assert!(aspected_signs(13).is_empty());
    }

    #[test]
    fn test_table_form() {
        let table = drishti_table();
        assert_eq!(table.len(), 12);
        assert_eq!(table[0].aspect_names, vec!["Leo", "Scorpio", "Aquarius"]);
    }
}
