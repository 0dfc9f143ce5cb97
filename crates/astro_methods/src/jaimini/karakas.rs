//! Chara (variable) karakas, the Karakamsha and the Sthira (fixed) karakas.

use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{EphemerisSnapshot, Planet, PlanetPosition};
use crate::error::InputError;
use crate::zodiac::{degree_in_sign, sign_name, sign_of_longitude, Modality};

const NAVAMSA_SPAN: f64 = 30.0 / 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KarakaRole {
    Atmakaraka,
    Amatyakaraka,
    Bhratrikaraka,
    Matrikaraka,
    Putrakaraka,
    Gnatikaraka,
    Darakaraka,
}

impl KarakaRole {
    /// Roles in rank order, highest degree first.
    pub const ALL: [KarakaRole; 7] = [
        KarakaRole::Atmakaraka,
        KarakaRole::Amatyakaraka,
        KarakaRole::Bhratrikaraka,
        KarakaRole::Matrikaraka,
        KarakaRole::Putrakaraka,
        KarakaRole::Gnatikaraka,
        KarakaRole::Darakaraka,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KarakaRole::Atmakaraka => "Atmakaraka",
            KarakaRole::Amatyakaraka => "Amatyakaraka",
            KarakaRole::Bhratrikaraka => "Bhratrikaraka",
            KarakaRole::Matrikaraka => "Matrikaraka",
            KarakaRole::Putrakaraka => "Putrakaraka",
            KarakaRole::Gnatikaraka => "Gnatikaraka",
            KarakaRole::Darakaraka => "Darakaraka",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            KarakaRole::Atmakaraka => "AK",
            KarakaRole::Amatyakaraka => "AmK",
            KarakaRole::Bhratrikaraka => "BK",
            KarakaRole::Matrikaraka => "MK",
            KarakaRole::Putrakaraka => "PK",
            KarakaRole::Gnatikaraka => "GK",
            KarakaRole::Darakaraka => "DK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharaKaraka {
    pub role: KarakaRole,
    pub planet: Planet,
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64,
    pub sign: u8,
    pub longitude: f64,
}

/// The seven role assignments, ordered Atmakaraka .. Darakaraka.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharaKarakas(Vec<CharaKaraka>);

impl CharaKarakas {
    pub fn get(&self, role: KarakaRole) -> &CharaKaraka {
        &self.0[role as usize]
    }

    pub fn planet(&self, role: KarakaRole) -> Planet {
        self.get(role).planet
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharaKaraka> {
        self.0.iter()
    }
}

/// Rank the seven classical planets by degree-in-sign, highest first.
///
/// The sort is stable, so equal degrees keep the canonical planet order.
pub fn calculate_chara_karakas(snapshot: &EphemerisSnapshot) -> Result<CharaKarakas, InputError> {
    let mut ranked: Vec<&PlanetPosition> = Planet::CLASSICAL
        .iter()
        .map(|p| snapshot.planet(*p))
        .collect::<Result<_, _>>()?;
    ranked.sort_by(|a, b| b.degree_in_sign.total_cmp(&a.degree_in_sign));

    let karakas = KarakaRole::ALL
        .iter()
        .zip(ranked)
        .map(|(role, pos)| CharaKaraka {
            role: *role,
            planet: pos.planet,
            degree_in_sign: pos.degree_in_sign,
            sign: pos.sign,
            longitude: pos.longitude,
        })
        .collect();
    Ok(CharaKarakas(karakas))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Karakamsha {
    pub planet: Planet,
    #[serde(rename = "navamsaSign")]
    pub navamsa_sign: u8,
    #[serde(rename = "navamsaSignName")]
    pub navamsa_sign_name: String,
    #[serde(rename = "rasiSign")]
    pub rasi_sign: u8,
    #[serde(rename = "rasiSignName")]
    pub rasi_sign_name: String,
}

/// Navamsa (D9) sign of a longitude.
pub fn navamsa_sign(longitude: f64) -> u8 {
    let sign = sign_of_longitude(longitude);
    let part = ((degree_in_sign(longitude) / NAVAMSA_SPAN) as u8).min(8);
    let offset = Modality::of(sign).navamsa_offset();
    ((sign - 1 + offset + part) % 12) + 1
}

/// Navamsa placement of the Atmakaraka.
pub fn calculate_karakamsha(atmakaraka: &CharaKaraka) -> Karakamsha {
    let navamsa = navamsa_sign(atmakaraka.longitude);
    let rasi = sign_of_longitude(atmakaraka.longitude);
    Karakamsha {
        planet: atmakaraka.planet,
        navamsa_sign: navamsa,
        navamsa_sign_name: sign_name(navamsa).to_string(),
        rasi_sign: rasi,
        rasi_sign_name: sign_name(rasi).to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SthiraKaraka {
    pub planet: Planet,
    pub houses: Vec<u8>,
    pub significations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SthiraKarakas {
    pub karakas: Vec<SthiraKaraka>,
    #[serde(rename = "fatherSignificator")]
    pub father_significator: Planet,
    #[serde(rename = "motherSignificator")]
    pub mother_significator: Planet,
}

const STHIRA_TABLE: [(Planet, &[u8], &[&str]); 9] = [
    (Planet::Sun, &[1], &["Self", "Lagna", "Father (if stronger than Venus)"]),
    (Planet::Moon, &[4], &["4th house", "Mother (if stronger than Venus)", "Emotions"]),
    (Planet::Mars, &[3, 6], &["3rd house", "6th house", "Younger siblings", "Mother (secondary)"]),
    (Planet::Mercury, &[10], &["10th house", "Uncles", "Aunts", "Maternal relatives"]),
    (Planet::Jupiter, &[2, 5, 9, 11], &["2nd, 5th, 9th, 11th houses", "Paternal grandfather", "Wisdom"]),
    (Planet::Venus, &[7], &["7th house", "Husband", "Father (if stronger)", "Mother (if stronger)"]),
    (Planet::Saturn, &[8, 12], &["8th house", "12th house", "Sons", "Longevity"]),
    (Planet::Rahu, &[], &["Paternal grandfather (male)", "Maternal grandfather (male)"]),
    (Planet::Ketu, &[], &["Paternal grandmother (female)", "Maternal grandmother (female)"]),
];

// Degree within sign counted twice, plus a retrograde bonus.
fn parent_strength(pos: &PlanetPosition) -> f64 {
    let mut strength = pos.degree_in_sign * 2.0;
    if pos.retrograde {
        strength += 10.0;
    }
    strength
}

pub fn calculate_sthira_karakas(snapshot: &EphemerisSnapshot) -> Result<SthiraKarakas, InputError> {
    let sun = parent_strength(snapshot.planet(Planet::Sun)?);
    let moon = parent_strength(snapshot.planet(Planet::Moon)?);
    let venus = parent_strength(snapshot.planet(Planet::Venus)?);

    let karakas = STHIRA_TABLE
        .iter()
        .map(|(planet, houses, significations)| SthiraKaraka {
            planet: *planet,
            houses: houses.to_vec(),
            significations: significations.iter().map(|s| s.to_string()).collect(),
        })
        .collect();

    Ok(SthiraKarakas {
        karakas,
        father_significator: if sun > venus { Planet::Sun } else { Planet::Venus },
        mother_significator: if moon > venus { Planet::Moon } else { Planet::Venus },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::AscendantData;

    fn snapshot(degrees: [f64; 7]) -> EphemerisSnapshot {
        // One planet per sign so longitudes stay distinct.
        let planets = Planet::CLASSICAL
            .iter()
            .zip(degrees)
            .enumerate()
            .map(|(i, (p, d))| PlanetPosition::from_longitude(*p, i as f64 * 30.0 + d, false));
        EphemerisSnapshot::new(planets, AscendantData::whole_sign(0.0))
    }

    #[test]
    fn test_ranking_descending() {
        let snap = snapshot([10.0, 25.0, 3.0, 17.0, 29.0, 8.0, 12.0]);
        let karakas = calculate_chara_karakas(&snap).unwrap();
        assert_eq!(karakas.planet(KarakaRole::Atmakaraka), Planet::Jupiter);
        assert_eq!(karakas.planet(KarakaRole::Amatyakaraka), Planet::Moon);
        assert_eq!(karakas.planet(KarakaRole::Darakaraka), Planet::Mars);
        let degrees: Vec<f64> = karakas.iter().map(|k| k.degree_in_sign).collect();
        assert!(degrees.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_ties_keep_planet_order() {
        let snap = snapshot([15.0, 15.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let karakas = calculate_chara_karakas(&snap).unwrap();
        assert_eq!(karakas.planet(KarakaRole::Atmakaraka), Planet::Sun);
        assert_eq!(karakas.planet(KarakaRole::Amatyakaraka), Planet::Moon);
    }

    #[test]
    fn test_missing_planet_fails() {
        let mut snap = snapshot([1.0; 7]);
        snap.planets.remove(&Planet::Saturn);
        assert_eq!(
            calculate_chara_karakas(&snap).unwrap_err(),
            InputError::MissingPlanet { planet: Planet::Saturn }
        );
    }

    #[test]
    fn test_navamsa_offsets() {
        // Aries (movable) 0° -> Aries; Taurus (fixed) 0° -> Capricorn; Gemini (dual) 0° -> Libra.
        assert_eq!(navamsa_sign(0.0), 1);
        assert_eq!(navamsa_sign(30.0), 10);
        assert_eq!(navamsa_sign(60.0), 7);
        // Last navamsa of Pisces is Pisces.
        assert_eq!(navamsa_sign(359.9), 12);
        // 4th part of Leo: Leo starts at Aries, +3 -> Cancer.
        assert_eq!(navamsa_sign(120.0 + 11.0), 4);
    }

    #[test]
    fn test_karakamsha() {
        let ak = CharaKaraka {
            role: KarakaRole::Atmakaraka,
            planet: Planet::Venus,
            degree_in_sign: 28.0,
            sign: 7,
            longitude: 208.0,
        };
        let k = calculate_karakamsha(&ak);
        assert_eq!(k.rasi_sign, 7);
        // Libra is movable; part 8 -> 7 + 8 = Gemini.
        assert_eq!(k.navamsa_sign, 3);
        assert_eq!(k.navamsa_sign_name, "Gemini");
    }

    #[test]
    fn test_parent_significators() {
        let mut snap = snapshot([20.0, 6.0, 1.0, 1.0, 1.0, 10.0, 1.0]);
        let sthira = calculate_sthira_karakas(&snap).unwrap();
        assert_eq!(sthira.father_significator, Planet::Sun);
        assert_eq!(sthira.mother_significator, Planet::Venus);
        assert_eq!(sthira.karakas.len(), 9);

        if let Some(moon) = snap.planets.get_mut(&Planet::Moon) {
            moon.retrograde = true;
        }
        let sthira = calculate_sthira_karakas(&snap).unwrap();
        assert_eq!(sthira.mother_significator, Planet::Moon);
    }
}
