//! Jaimini yoga detection: karaka raja yogas, Moon combinations, career and
//! marriage indications.

use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{EphemerisSnapshot, Planet};
use crate::error::InputError;
use crate::jaimini::drishti::{sign_aspects, signs_in_aspect};
use crate::jaimini::karakas::{CharaKarakas, KarakaRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YogaType {
    Raja,
    Career,
    Marriage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YogaStrength {
    Weak,
    Strong,
    VeryStrong,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JaiminiYoga {
    pub name: String,
    #[serde(rename = "type")]
    pub yoga_type: YogaType,
    pub strength: YogaStrength,
    pub description: String,
    #[serde(rename = "karakasInvolved")]
    pub karakas_involved: Vec<KarakaRole>,
    #[serde(rename = "planetsInvolved")]
    pub planets_involved: Vec<Planet>,
    #[serde(rename = "conditionsMet")]
    pub conditions_met: Vec<String>,
    pub effects: String,
}

const KARAKA_PAIRS: [(KarakaRole, KarakaRole, &str); 6] = [
    (KarakaRole::Atmakaraka, KarakaRole::Amatyakaraka, "Supreme Raja Yoga - Self + Career"),
    (KarakaRole::Atmakaraka, KarakaRole::Putrakaraka, "Creative Power Yoga - Self + Children"),
    (KarakaRole::Atmakaraka, KarakaRole::Darakaraka, "Partnership Yoga - Self + Spouse"),
    (KarakaRole::Amatyakaraka, KarakaRole::Putrakaraka, "Career Success Yoga - Career + Creativity"),
    (KarakaRole::Amatyakaraka, KarakaRole::Darakaraka, "Professional Partnership Yoga"),
    (KarakaRole::Putrakaraka, KarakaRole::Darakaraka, "Creative Partnership Yoga"),
];

const MOON_ASPECT_CANDIDATES: [Planet; 6] = [
    Planet::Sun,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

const KENDRA: [u8; 4] = [1, 4, 7, 10];
const TRIKONA: [u8; 3] = [1, 5, 9];
const DUSTHANA: [u8; 3] = [6, 8, 12];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// Whole-sign house of `sign` counted from `from`.
fn house_from(from: u8, sign: u8) -> u8 {
    ((sign as i32 - from as i32).rem_euclid(12) + 1) as u8
}

/// Conjunctions and aspects between the six karaka pairs.
pub fn karaka_raja_yogas(
    snapshot: &EphemerisSnapshot,
    karakas: &CharaKarakas,
) -> Result<Vec<JaiminiYoga>, InputError> {
    let mut yogas = Vec::new();
    for (k1, k2, name) in KARAKA_PAIRS {
        let p1 = karakas.planet(k1);
        let p2 = karakas.planet(k2);
        let s1 = snapshot.planet_sign(p1)?;
        let s2 = snapshot.planet_sign(p2)?;

        let (strength, description, condition, effects) = if s1 == s2 {
            (
                YogaStrength::VeryStrong,
                format!("{} ({}) and {} ({}) are conjunct in same sign", k1.name(), p1, k2.name(), p2),
                "Conjunction in same sign",
                "Strong success, power, and achievement in related life areas",
            )
        } else if signs_in_aspect(s1, s2) {
            (
                YogaStrength::Strong,
                format!("{} ({}) and {} ({}) aspect each other", k1.name(), p1, k2.name(), p2),
                "Mutual Rashi Drishti",
                "Success and achievement through cooperation and mutual support",
            )
        } else {
            continue;
        };

        yogas.push(JaiminiYoga {
            name: name.to_string(),
            yoga_type: YogaType::Raja,
            strength,
            description,
            karakas_involved: vec![k1, k2],
            planets_involved: vec![p1, p2],
            conditions_met: strings(&[condition]),
            effects: effects.to_string(),
        });
    }
    Ok(yogas)
}

/// Moon-Venus combination and the multi-planet Moon aspect yoga.
pub fn special_yogas(snapshot: &EphemerisSnapshot) -> Result<Vec<JaiminiYoga>, InputError> {
    let mut yogas = Vec::new();
    let moon = snapshot.planet_sign(Planet::Moon)?;
    let venus = snapshot.planet_sign(Planet::Venus)?;

    let moon_venus = if moon == venus {
        Some((
            YogaStrength::VeryStrong,
            "Moon and Venus conjunct - exceptional charm and prosperity",
            "Moon-Venus conjunction",
            "Exceptional charm, beauty, wealth, artistic talents, and social success",
        ))
    } else if signs_in_aspect(moon, venus) {
        Some((
            YogaStrength::Strong,
            "Moon and Venus in mutual aspect - charm and prosperity",
            "Moon-Venus mutual aspect",
            "Charm, artistic talents, wealth, and social grace",
        ))
    } else {
        None
    };
    if let Some((strength, description, condition, effects)) = moon_venus {
        yogas.push(JaiminiYoga {
            name: "Moon-Venus Raja Yoga".to_string(),
            yoga_type: YogaType::Raja,
            strength,
            description: description.to_string(),
            karakas_involved: Vec::new(),
            planets_involved: vec![Planet::Moon, Planet::Venus],
            conditions_met: strings(&[condition]),
            effects: effects.to_string(),
        });
    }

    let mut aspecting = Vec::new();
    for planet in MOON_ASPECT_CANDIDATES {
        if sign_aspects(snapshot.planet_sign(planet)?, moon) {
            aspecting.push(planet);
        }
    }
    if aspecting.len() >= 3 {
        let names: Vec<&str> = aspecting.iter().map(|p| p.name()).collect();
        let mut planets = vec![Planet::Moon];
        planets.extend(&aspecting);
        yogas.push(JaiminiYoga {
            name: "Multi-Planet Moon Aspect Yoga".to_string(),
            yoga_type: YogaType::Raja,
            strength: YogaStrength::VeryStrong,
            description: format!("Moon aspected by {} planets: {}", aspecting.len(), names.join(", ")),
            karakas_involved: Vec::new(),
            planets_involved: planets,
            conditions_met: vec![format!("{} planets aspecting Moon", aspecting.len())],
            effects: "Excellent Raja Yoga - fame, power, wealth, and recognition".to_string(),
        });
    }
    Ok(yogas)
}

/// Placement of the Amatyakaraka counted from the Atmakaraka. At most one fires.
pub fn career_yogas(
    snapshot: &EphemerisSnapshot,
    karakas: &CharaKarakas,
) -> Result<Vec<JaiminiYoga>, InputError> {
    let ak = karakas.planet(KarakaRole::Atmakaraka);
    let amk = karakas.planet(KarakaRole::Amatyakaraka);
    let house = house_from(snapshot.planet_sign(ak)?, snapshot.planet_sign(amk)?);

    let found = if KENDRA.contains(&house) {
        Some((
            "Amatyakaraka in Kendra from Atmakaraka",
            YogaStrength::Strong,
            format!("Amatyakaraka ({}) in Kendra from Atmakaraka ({})", amk, ak),
            "AmK in Kendra from AK",
            "Easy career success, recognition, and achievement with minimal struggle",
        ))
    } else if TRIKONA.contains(&house) {
        Some((
            "Amatyakaraka in Trikona from Atmakaraka",
            YogaStrength::Strong,
            format!("Amatyakaraka ({}) in Trikona from Atmakaraka ({})", amk, ak),
            "AmK in Trikona from AK",
            "Fortunate career, dharmic work, and fulfilling professional life",
        ))
    } else if DUSTHANA.contains(&house) {
        Some((
            "Amatyakaraka in Dusthana from Atmakaraka",
            YogaStrength::Weak,
            format!("Amatyakaraka ({}) in {}th house from Atmakaraka ({})", amk, house, ak),
            "AmK in Dusthana from AK",
            "Career struggles, obstacles, and need for persistent effort",
        ))
    } else {
        None
    };

    Ok(found
        .map(|(name, strength, description, condition, effects)| JaiminiYoga {
            name: name.to_string(),
            yoga_type: YogaType::Career,
            strength,
            description,
            karakas_involved: vec![KarakaRole::Amatyakaraka, KarakaRole::Atmakaraka],
            planets_involved: vec![amk, ak],
            conditions_met: strings(&[condition]),
            effects: effects.to_string(),
        })
        .into_iter()
        .collect())
}

/// Placement of the Darakaraka counted from the lagna.
pub fn marriage_yogas(
    snapshot: &EphemerisSnapshot,
    karakas: &CharaKarakas,
) -> Result<Vec<JaiminiYoga>, InputError> {
    let dk = karakas.planet(KarakaRole::Darakaraka);
    let house = house_from(snapshot.lagna_sign(), snapshot.planet_sign(dk)?);

    let found = if house == 7 {
        Some((
            "Darakaraka in 7th House",
            YogaStrength::VeryStrong,
            format!("Darakaraka ({}) in 7th house - excellent for marriage", dk),
            "DK in 7th house",
            "Strong, harmonious, and fulfilling marriage partnership",
        ))
    } else if KENDRA.contains(&house) {
        Some((
            "Darakaraka in Kendra",
            YogaStrength::Strong,
            format!("Darakaraka ({}) in Kendra ({}th house)", dk, house),
            "DK in Kendra",
            "Good marriage prospects, supportive spouse, and stable partnership",
        ))
    } else {
        None
    };

    Ok(found
        .map(|(name, strength, description, condition, effects)| JaiminiYoga {
            name: name.to_string(),
            yoga_type: YogaType::Marriage,
            strength,
            description,
            karakas_involved: vec![KarakaRole::Darakaraka],
            planets_involved: vec![dk],
            conditions_met: strings(&[condition]),
            effects: effects.to_string(),
        })
        .into_iter()
        .collect())
}

/// All four passes, in order: karaka pairs, special, career, marriage.
pub fn detect_all(
    snapshot: &EphemerisSnapshot,
    karakas: &CharaKarakas,
) -> Result<Vec<JaiminiYoga>, InputError> {
    let mut yogas = karaka_raja_yogas(snapshot, karakas)?;
    yogas.extend(special_yogas(snapshot)?);
    yogas.extend(career_yogas(snapshot, karakas)?);
    yogas.extend(marriage_yogas(snapshot, karakas)?);
    log::debug!("Jaimini yogas: {} found", yogas.len());
    Ok(yogas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::{AscendantData, PlanetPosition};
    use crate::jaimini::karakas::calculate_chara_karakas;

    // (planet, sign, degree in sign)
    fn snapshot(lagna: u8, placements: &[(Planet, u8, f64)]) -> EphemerisSnapshot {
        let planets = placements.iter().map(|(p, sign, deg)| {
            PlanetPosition::from_longitude(*p, (*sign as f64 - 1.0) * 30.0 + deg, false)
        });
        EphemerisSnapshot::new(planets, AscendantData::whole_sign((lagna as f64 - 1.0) * 30.0 + 1.0))
    }

    fn find<'a>(yogas: &'a [JaiminiYoga], name: &str) -> Option<&'a JaiminiYoga> {
        yogas.iter().find(|y| y.name == name)
    }

    #[test]
    fn test_ak_amk_conjunction() {
        // Sun (29°) and Moon (28°) both in Leo.
        let snap = snapshot(
            1,
            &[
                (Planet::Sun, 5, 29.0),
                (Planet::Moon, 5, 28.0),
                (Planet::Mars, 1, 5.0),
                (Planet::Mercury, 2, 6.0),
                (Planet::Jupiter, 3, 7.0),
                (Planet::Venus, 4, 8.0),
                (Planet::Saturn, 6, 4.0),
            ],
        );
        let karakas = calculate_chara_karakas(&snap).unwrap();
        let yogas = karaka_raja_yogas(&snap, &karakas).unwrap();
        let supreme = find(&yogas, "Supreme Raja Yoga - Self + Career").unwrap();
        assert_eq!(supreme.strength, YogaStrength::VeryStrong);
        assert_eq!(supreme.planets_involved, vec![Planet::Sun, Planet::Moon]);
        assert_eq!(
            supreme.description,
            "Atmakaraka (Sun) and Amatyakaraka (Moon) are conjunct in same sign"
        );
    }

    #[test]
    fn test_ak_amk_one_way_aspect() {
        // Aries aspects Leo, Leo does not aspect Aries.
        let snap = snapshot(
            1,
            &[
                (Planet::Sun, 1, 29.0),
                (Planet::Moon, 5, 28.0),
                (Planet::Mars, 2, 5.0),
                (Planet::Mercury, 3, 6.0),
                (Planet::Jupiter, 4, 7.0),
                (Planet::Venus, 6, 8.0),
                (Planet::Saturn, 7, 4.0),
            ],
        );
        assert!(sign_aspects(1, 5));
        assert!(!sign_aspects(5, 1));

        let karakas = calculate_chara_karakas(&snap).unwrap();
        let yogas = karaka_raja_yogas(&snap, &karakas).unwrap();
        let supreme = find(&yogas, "Supreme Raja Yoga - Self + Career").unwrap();
        assert_eq!(supreme.strength, YogaStrength::Strong);
        assert_eq!(
            supreme.description,
            "Atmakaraka (Sun) and Amatyakaraka (Moon) aspect each other"
        );
    }

    #[test]
    fn test_moon_venus_aspect() {
        // Venus in Aries aspects the Moon in Leo.
        let snap = snapshot(1, &[(Planet::Moon, 5, 10.0), (Planet::Venus, 1, 10.0)]);
        let err = special_yogas(&snap).unwrap_err();
        assert!(matches!(err, InputError::MissingPlanet { .. }));

        let snap = snapshot(
            1,
            &[
                (Planet::Moon, 5, 10.0),
                (Planet::Venus, 1, 10.0),
                (Planet::Sun, 2, 1.0),
                (Planet::Mars, 2, 1.0),
                (Planet::Mercury, 2, 1.0),
                (Planet::Jupiter, 2, 1.0),
                (Planet::Saturn, 2, 1.0),
            ],
        );
        let yogas = special_yogas(&snap).unwrap();
        let mv = find(&yogas, "Moon-Venus Raja Yoga").unwrap();
        assert_eq!(mv.strength, YogaStrength::Strong);
        assert!(find(&yogas, "Multi-Planet Moon Aspect Yoga").is_none());
    }

    #[test]
    fn test_multi_planet_moon_aspect() {
        // Aries, Libra and Capricorn all aspect Leo.
        let snap = snapshot(
            1,
            &[
                (Planet::Moon, 5, 10.0),
                (Planet::Venus, 2, 10.0),
                (Planet::Sun, 1, 1.0),
                (Planet::Mars, 7, 1.0),
                (Planet::Mercury, 2, 1.0),
                (Planet::Jupiter, 10, 1.0),
                (Planet::Saturn, 2, 1.0),
            ],
        );
        let yogas = special_yogas(&snap).unwrap();
        let multi = find(&yogas, "Multi-Planet Moon Aspect Yoga").unwrap();
        assert_eq!(multi.description, "Moon aspected by 3 planets: Sun, Mars, Jupiter");
        assert_eq!(
            multi.planets_involved,
            vec![Planet::Moon, Planet::Sun, Planet::Mars, Planet::Jupiter]
        );
    }

    #[test]
    fn test_career_kendra_wins_over_trikona() {
        // AK Jupiter in Aries, AmK Sun in Aries: house 1 is both.
        let snap = snapshot(
            1,
            &[
                (Planet::Jupiter, 1, 29.0),
                (Planet::Sun, 1, 28.0),
                (Planet::Moon, 3, 1.0),
                (Planet::Mars, 3, 2.0),
                (Planet::Mercury, 3, 3.0),
                (Planet::Venus, 3, 4.0),
                (Planet::Saturn, 3, 5.0),
            ],
        );
        let karakas = calculate_chara_karakas(&snap).unwrap();
        let yogas = career_yogas(&snap, &karakas).unwrap();
        assert_eq!(yogas.len(), 1);
        assert_eq!(yogas[0].name, "Amatyakaraka in Kendra from Atmakaraka");
    }

    #[test]
    fn test_career_dusthana() {
        // AmK Sun in Virgo, 6th from AK Jupiter in Aries.
        let snap = snapshot(
            1,
            &[
                (Planet::Jupiter, 1, 29.0),
                (Planet::Sun, 6, 28.0),
                (Planet::Moon, 3, 1.0),
                (Planet::Mars, 3, 2.0),
                (Planet::Mercury, 3, 3.0),
                (Planet::Venus, 3, 4.0),
                (Planet::Saturn, 3, 5.0),
            ],
        );
        let karakas = calculate_chara_karakas(&snap).unwrap();
        let yogas = career_yogas(&snap, &karakas).unwrap();
        assert_eq!(yogas[0].strength, YogaStrength::Weak);
        assert_eq!(yogas[0].description, "Amatyakaraka (Sun) in 6th house from Atmakaraka (Jupiter)");
    }

    #[test]
    fn test_marriage_seventh() {
        // DK Mars (lowest degree) in Libra with an Aries lagna.
        let snap = snapshot(
            1,
            &[
                (Planet::Sun, 3, 20.0),
                (Planet::Moon, 3, 21.0),
                (Planet::Mars, 7, 0.5),
                (Planet::Mercury, 3, 22.0),
                (Planet::Jupiter, 3, 23.0),
                (Planet::Venus, 3, 24.0),
                (Planet::Saturn, 3, 25.0),
            ],
        );
        let karakas = calculate_chara_karakas(&snap).unwrap();
        let yogas = marriage_yogas(&snap, &karakas).unwrap();
        assert_eq!(yogas.len(), 1);
        assert_eq!(yogas[0].strength, YogaStrength::VeryStrong);
        assert_eq!(yogas[0].planets_involved, vec![Planet::Mars]);
    }

    #[test]
    fn test_strength_serialization() {
        let json = serde_json::to_string(&YogaStrength::VeryStrong).unwrap();
        assert_eq!(json, "\"very_strong\"");
    }
}
