//! Six-step house significators and the planet -> houses reverse lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ephemeris::types::{EphemerisSnapshot, HouseCusps, Planet};
use crate::error::InputError;
use crate::kp::sub_lord::calculate_sub_lord;
use crate::nakshatra::{nakshatra_lord, nakshatra_number};
use crate::zodiac::{sign_lord, signs_ruled_by};

/// House offsets each planet casts an aspect to, counted from its own house.
pub fn kp_aspect_offsets(planet: Planet) -> &'static [u8] {
    match planet {
        Planet::Mars => &[4, 7, 8],
        Planet::Jupiter | Planet::Rahu | Planet::Ketu => &[5, 7, 9],
        Planet::Saturn => &[3, 7, 10],
        _ => &[7],
    }
}

fn aspected_house(from_house: u8, offset: u8) -> u8 {
    ((from_house - 1 + offset) % 12) + 1
}

fn push_unique(list: &mut Vec<Planet>, planet: Planet) {
    if !list.contains(&planet) {
        list.push(planet);
    }
}

fn unique_union(lists: &[&[Planet]]) -> Vec<Planet> {
    let mut out = Vec::new();
    for list in lists {
        for planet in list.iter() {
            push_unique(&mut out, *planet);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseSignificators {
    pub house: u8,
    #[serde(rename = "cuspLongitude")]
    pub cusp_longitude: f64,
    #[serde(rename = "cuspSign")]
    pub cusp_sign: u8,
    #[serde(rename = "cuspStarLord")]
    pub cusp_star_lord: Planet,
    #[serde(rename = "cuspSubLord")]
    pub cusp_sub_lord: Planet,
    #[serde(rename = "cuspSubSubLord")]
    pub cusp_sub_sub_lord: Planet,
    pub occupants: Vec<Planet>,
    pub owners: Vec<Planet>,
    #[serde(rename = "starOfOccupants")]
    pub star_of_occupants: Vec<Planet>,
    #[serde(rename = "starOfOwners")]
    pub star_of_owners: Vec<Planet>,
    pub aspecting: Vec<Planet>,
    #[serde(rename = "starOfAspecting")]
    pub star_of_aspecting: Vec<Planet>,
    /// Cusp sub-lord first, then steps 1-6 in order, each planet once.
    #[serde(rename = "allSignificators")]
    pub all_significators: Vec<Planet>,
    pub strong: Vec<Planet>,
    pub medium: Vec<Planet>,
    pub weak: Vec<Planet>,
}

impl HouseSignificators {
    pub fn signifies(&self, planet: Planet) -> bool {
        self.all_significators.contains(&planet)
    }
}

/// Houses a single planet signifies, by route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSignifications {
    pub planet: Planet,
    #[serde(rename = "byOccupation")]
    pub by_occupation: Vec<u8>,
    #[serde(rename = "byOwnership")]
    pub by_ownership: Vec<u8>,
    #[serde(rename = "byStarLordship")]
    pub by_star_lordship: Vec<u8>,
    #[serde(rename = "byAspect")]
    pub by_aspect: Vec<u8>,
    #[serde(rename = "allHouses")]
    pub all_houses: Vec<u8>,
}

pub struct SignificatorCalculator<'a> {
    snapshot: &'a EphemerisSnapshot,
    cusps: HouseCusps,
}

impl<'a> SignificatorCalculator<'a> {
    pub fn new(snapshot: &'a EphemerisSnapshot) -> Result<Self, InputError> {
        Ok(Self {
            snapshot,
            cusps: snapshot.cusps()?,
        })
    }

    pub fn cusps(&self) -> &HouseCusps {
        &self.cusps
    }

    fn star_lord_of(&self, planet: Planet) -> Result<Planet, InputError> {
        let pos = self.snapshot.planet(planet)?;
        Ok(nakshatra_lord(nakshatra_number(pos.longitude)))
    }

    fn star_lords_of(&self, planets: &[Planet]) -> Result<Vec<Planet>, InputError> {
        let mut lords = Vec::new();
        for planet in planets {
            push_unique(&mut lords, self.star_lord_of(*planet)?);
        }
        Ok(lords)
    }

    /// House a planet occupies.
    pub fn planet_house(&self, planet: Planet) -> Result<u8, InputError> {
        let pos = self.snapshot.planet(planet)?;
        Ok(self.cusps.house_of(pos.longitude))
    }

    pub fn occupants(&self, house: u8) -> Result<Vec<Planet>, InputError> {
        let mut occupants = Vec::new();
        for pos in self.snapshot.planets.values() {
            if self.cusps.contains(house, pos.longitude)? {
                occupants.push(pos.planet);
            }
        }
        Ok(occupants)
    }

    pub fn aspecting(&self, house: u8) -> Result<Vec<Planet>, InputError> {
        if !(1..=12).contains(&house) {
            return Err(InputError::HouseOutOfRange { house });
        }
        let mut aspecting = Vec::new();
        for pos in self.snapshot.planets.values() {
            let from = self.cusps.house_of(pos.longitude);
            if kp_aspect_offsets(pos.planet)
                .iter()
                .any(|off| aspected_house(from, *off) == house)
            {
                aspecting.push(pos.planet);
            }
        }
        Ok(aspecting)
    }

    pub fn house_significators(&self, house: u8) -> Result<HouseSignificators, InputError> {
        let cusp_longitude = self.cusps.cusp(house)?;
        let cusp_sign = self.cusps.cusp_sign(house)?;
        let cusp = calculate_sub_lord(cusp_longitude);

        let occupants = self.occupants(house)?;
        let owners = vec![sign_lord(cusp_sign)];
        let star_of_occupants = self.star_lords_of(&occupants)?;
        let star_of_owners = self.star_lords_of(&owners)?;
        let aspecting = self.aspecting(house)?;
        let star_of_aspecting = self.star_lords_of(&aspecting)?;

        let sub_lord = [cusp.sub_lord];
        let all_significators = unique_union(&[
            &sub_lord,
            &occupants,
            &owners,
            &star_of_occupants,
            &star_of_owners,
            &aspecting,
            &star_of_aspecting,
        ]);
        let strong = unique_union(&[&sub_lord, &occupants]);
        let medium = unique_union(&[&owners, &star_of_occupants, &star_of_owners]);
        let weak = unique_union(&[&aspecting, &star_of_aspecting]);

        Ok(HouseSignificators {
            house,
            cusp_longitude,
            cusp_sign,
            cusp_star_lord: cusp.star_lord,
            cusp_sub_lord: cusp.sub_lord,
            cusp_sub_sub_lord: cusp.sub_sub_lord,
            occupants,
            owners,
            star_of_occupants,
            star_of_owners,
            aspecting,
            star_of_aspecting,
            all_significators,
            strong,
            medium,
            weak,
        })
    }

    /// Significators for houses 1 through 12, in order.
    pub fn all_house_significators(&self) -> Result<Vec<HouseSignificators>, InputError> {
        (1..=12u8).map(|h| self.house_significators(h)).collect()
    }

    pub fn planet_significations(&self, planet: Planet) -> Result<PlanetSignifications, InputError> {
        let own_house = self.planet_house(planet)?;

        let mut by_ownership = Vec::new();
        for sign in signs_ruled_by(planet) {
            for house in 1..=12u8 {
                if self.cusps.cusp_sign(house)? == sign {
                    by_ownership.push(house);
                }
            }
        }

        let mut by_star_lordship = Vec::new();
        for house in 1..=12u8 {
            for occupant in self.occupants(house)? {
                if self.star_lord_of(occupant)? == planet && !by_star_lordship.contains(&house) {
                    by_star_lordship.push(house);
                }
            }
        }

        let by_aspect: Vec<u8> = kp_aspect_offsets(planet)
            .iter()
            .map(|off| aspected_house(own_house, *off))
            .collect();

        let by_occupation = vec![own_house];
        let all_houses: BTreeSet<u8> = by_occupation
            .iter()
            .chain(&by_ownership)
            .chain(&by_star_lordship)
            .chain(&by_aspect)
            .copied()
            .collect();

        Ok(PlanetSignifications {
            planet,
            by_occupation,
            by_ownership,
            by_star_lordship,
            by_aspect,
            all_houses: all_houses.into_iter().collect(),
        })
    }
}
