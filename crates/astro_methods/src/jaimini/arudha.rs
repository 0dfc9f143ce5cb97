//! Arudha padas for the twelve houses.

use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{EphemerisSnapshot, Planet};
use crate::error::InputError;
use crate::zodiac::{nth_sign_from, sign_lord, sign_name};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArudhaPada {
    /// "A1" .. "A12".
    pub label: String,
    pub house: u8,
    #[serde(rename = "houseSign")]
    pub house_sign: u8,
    pub lord: Planet,
    #[serde(rename = "lordSign")]
    pub lord_sign: u8,
    #[serde(rename = "padaSign")]
    pub pada_sign: u8,
    #[serde(rename = "padaSignName")]
    pub pada_sign_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArudhaPadas {
    pub padas: Vec<ArudhaPada>,
    /// Arudha Lagna, the pada of the 1st house.
    #[serde(rename = "arudhaLagna")]
    pub arudha_lagna: u8,
    /// Upapada Lagna, the pada of the 12th house.
    #[serde(rename = "upapadaLagna")]
    pub upapada_lagna: u8,
}

impl ArudhaPadas {
    pub fn pada(&self, house: u8) -> Option<&ArudhaPada> {
        self.padas.iter().find(|p| p.house == house)
    }
}

/// Pada sign for a house sign whose lord sits in `lord_sign`.
pub fn pada_sign(house_sign: u8, lord_sign: u8) -> u8 {
    // Exclusive distance, with the lord in the house itself counted as 12.
    let mut distance = (lord_sign as i32 - house_sign as i32).rem_euclid(12) as u8;
    if distance == 0 {
        distance = 12;
    }
    let mut pada = nth_sign_from(lord_sign, distance + 1);

    if pada == house_sign || pada == nth_sign_from(house_sign, 7) {
        pada = nth_sign_from(pada, 10);
    }
    if distance == 12 {
        pada = nth_sign_from(house_sign, 10);
    }
    pada
}

/// Padas for houses 1-12 counted as whole signs from the lagna.
pub fn calculate_arudha_padas(snapshot: &EphemerisSnapshot) -> Result<ArudhaPadas, InputError> {
    let lagna = snapshot.lagna_sign();
    let mut padas = Vec::with_capacity(12);
    for house in 1..=12u8 {
        let house_sign = nth_sign_from(lagna, house);
        let lord = sign_lord(house_sign);
        let lord_sign = snapshot.planet_sign(lord)?;
        let pada = pada_sign(house_sign, lord_sign);
        padas.push(ArudhaPada {
            label: format!("A{}", house),
            house,
            house_sign,
            lord,
            lord_sign,
            pada_sign: pada,
            pada_sign_name: sign_name(pada).to_string(),
        });
    }

    let arudha_lagna = padas[0].pada_sign;
    let upapada_lagna = padas[11].pada_sign;
    log::debug!("Arudha: AL {} UL {}", sign_name(arudha_lagna), sign_name(upapada_lagna));
    Ok(ArudhaPadas {
        padas,
        arudha_lagna,
        upapada_lagna,
    })
}
