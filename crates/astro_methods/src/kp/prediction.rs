//! Event promise evaluation from house significators.
//!
//! Each catalogued event names its primary, secondary and denial houses. The
//! cusp sub-lords of the primary houses vote for promise or denial depending
//! on which houses they themselves signify.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ephemeris::types::Planet;
use crate::kp::ruling::RulingPlanets;
use crate::kp::significators::HouseSignificators;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromiseStatus {
    Promised,
    Denied,
    Delayed,
    Uncertain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionStrength {
    Strong,
    Medium,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRule {
    pub event_type: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub primary: &'static [u8],
    pub secondary: &'static [u8],
    pub denial: &'static [u8],
}

pub const EVENT_CATALOGUE: [EventRule; 10] = [
    EventRule {
        event_type: "marriage",
        name: "Marriage",
        description: "Marriage and partnerships",
        primary: &[7],
        secondary: &[2, 11],
        denial: &[1, 6, 10],
    },
    EventRule {
        event_type: "career",
        name: "Career Success",
        description: "Career and professional advancement",
        primary: &[10],
        secondary: &[2, 6, 11],
        denial: &[4, 8, 12],
    },
    EventRule {
        event_type: "children",
        name: "Children",
        description: "Birth of children",
        primary: &[5],
        secondary: &[2, 11],
        denial: &[1, 6, 10],
    },
    EventRule {
        event_type: "education",
        name: "Education",
        description: "Educational achievements",
        primary: &[4],
        secondary: &[9, 11],
        denial: &[3, 6, 8],
    },
    EventRule {
        event_type: "property",
        name: "Property Acquisition",
        description: "Buying or inheriting property",
        primary: &[4],
        secondary: &[11],
        denial: &[6, 8, 12],
    },
    EventRule {
        event_type: "foreign_travel",
        name: "Foreign Travel/Settlement",
        description: "Travel abroad or foreign settlement",
        primary: &[12],
        secondary: &[3, 9],
        denial: &[1, 4, 10],
    },
    EventRule {
        event_type: "business",
        name: "Business",
        description: "Starting or expanding business",
        primary: &[10],
        secondary: &[7, 11],
        denial: &[5, 8, 12],
    },
    EventRule {
        event_type: "health",
        name: "Health & Recovery",
        description: "Good health and recovery from illness",
        primary: &[1],
        secondary: &[5, 11],
        denial: &[6, 8, 12],
    },
    EventRule {
        event_type: "financial_gains",
        name: "Financial Gains",
        description: "Financial prosperity and income",
        primary: &[11],
        secondary: &[2, 5],
        denial: &[6, 8, 12],
    },
    EventRule {
        event_type: "spiritual_growth",
        name: "Spiritual Growth",
        description: "Spiritual development and liberation",
        primary: &[12],
        secondary: &[9],
        denial: &[2, 7, 11],
    },
];

pub fn event_rule(event_type: &str) -> Option<&'static EventRule> {
    EVENT_CATALOGUE.iter().find(|e| e.event_type == event_type)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPrediction {
    #[serde(rename = "eventType")]
    pub event_type: String,
    #[serde(rename = "eventName")]
    pub event_name: String,
    pub description: String,
    #[serde(rename = "housesInvolved")]
    pub houses_involved: Vec<u8>,
    #[serde(rename = "commonSignificators")]
    pub common_significators: Vec<Planet>,
    #[serde(rename = "promiseStatus")]
    pub promise_status: PromiseStatus,
    pub strength: PredictionStrength,
    #[serde(rename = "subLordAnalysis")]
    pub sub_lord_analysis: String,
    pub recommendations: Vec<String>,
}

fn format_houses(houses: &BTreeSet<u8>) -> String {
    let parts: Vec<String> = houses.iter().map(|h| h.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn format_planets(planets: &[Planet]) -> String {
    planets.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
}

pub struct PredictionEngine<'a> {
    houses: &'a [HouseSignificators],
    ruling: &'a RulingPlanets,
}

impl<'a> PredictionEngine<'a> {
    /// `houses` holds the significator sets for houses 1-12.
    pub fn new(houses: &'a [HouseSignificators], ruling: &'a RulingPlanets) -> Self {
        Self { houses, ruling }
    }

    fn house(&self, house: u8) -> Option<&HouseSignificators> {
        self.houses.iter().find(|h| h.house == house)
    }

    /// Houses whose combined significator list contains `planet`.
    pub fn houses_signified_by(&self, planet: Planet) -> BTreeSet<u8> {
        self.houses
            .iter()
            .filter(|h| h.signifies(planet))
            .map(|h| h.house)
            .collect()
    }

    /// Planets present in every listed house, in the first house's order.
    pub fn common_significators(&self, houses: &[u8]) -> Vec<Planet> {
        let Some((first, rest)) = houses.split_first() else {
            return Vec::new();
        };
        let Some(first) = self.house(*first) else {
            return Vec::new();
        };
        first
            .all_significators
            .iter()
            .copied()
            .filter(|p| {
                rest.iter()
                    .filter_map(|h| self.house(*h))
                    .all(|sig| sig.signifies(*p))
            })
            .collect()
    }

    fn sub_lord_promise(&self, rule: &EventRule) -> (PromiseStatus, String) {
        let promise_houses: BTreeSet<u8> =
            rule.primary.iter().chain(rule.secondary).copied().collect();
        let denial_houses: BTreeSet<u8> = rule.denial.iter().copied().collect();

        let mut promise_votes = 0;
        let mut denial_votes = 0;
        let mut analysis = Vec::new();

        for house in rule.primary {
            let Some(sig) = self.house(*house) else {
                continue;
            };
            let sub_lord = sig.cusp_sub_lord;
            let signified = self.houses_signified_by(sub_lord);

            let promised: BTreeSet<u8> = promise_houses.intersection(&signified).copied().collect();
            if !promised.is_empty() {
                promise_votes += 1;
                analysis.push(format!(
                    "House {} sub-lord {} signifies promise houses {}",
                    house,
                    sub_lord,
                    format_houses(&promised)
                ));
            }
            let denied: BTreeSet<u8> = denial_houses.intersection(&signified).copied().collect();
            if !denied.is_empty() {
                denial_votes += 1;
                analysis.push(format!(
                    "House {} sub-lord {} signifies denial houses {}",
                    house,
                    sub_lord,
                    format_houses(&denied)
                ));
            }
        }

        let status = if denial_votes > promise_votes {
            PromiseStatus::Denied
        } else if promise_votes > denial_votes {
            PromiseStatus::Promised
        } else if promise_votes > 0 {
            PromiseStatus::Delayed
        } else {
            PromiseStatus::Uncertain
        };
        let analysis = if analysis.is_empty() {
            "Insufficient data for sub-lord analysis".to_string()
        } else {
            analysis.join("; ")
        };
        (status, analysis)
    }

    fn strength(&self, common: &[Planet], status: PromiseStatus) -> PredictionStrength {
        let mut score: i32 = 0;
        if common.len() >= 3 {
            score += 2;
        } else if !common.is_empty() {
            score += 1;
        }
        let lords = self.ruling.strength_lords();
        if common.iter().any(|p| lords.contains(p)) {
            score += 1;
        }
        score += match status {
            PromiseStatus::Promised => 2,
            PromiseStatus::Delayed => 1,
            PromiseStatus::Denied => -2,
            PromiseStatus::Uncertain => 0,
        };

        if score >= 4 {
            PredictionStrength::Strong
        } else if score >= 2 {
            PredictionStrength::Medium
        } else {
            PredictionStrength::Weak
        }
    }

    pub fn predict(&self, rule: &EventRule) -> EventPrediction {
        let houses_involved: Vec<u8> = rule.primary.iter().chain(rule.secondary).copied().collect();
        let common = self.common_significators(&houses_involved);
        let (status, analysis) = self.sub_lord_promise(rule);
        let strength = self.strength(&common, status);
        let recommendations = recommendations(rule.event_type, status, strength, &common);

        log::debug!(
            "KP prediction '{}': {:?}/{:?} ({} common significators)",
            rule.event_type,
            status,
            strength,
            common.len()
        );

        EventPrediction {
            event_type: rule.event_type.to_string(),
            event_name: rule.name.to_string(),
            description: rule.description.to_string(),
            houses_involved,
            common_significators: common,
            promise_status: status,
            strength,
            sub_lord_analysis: analysis,
            recommendations,
        }
    }

    /// Predictions for every catalogued event, in catalogue order.
    pub fn predict_all(&self) -> Vec<EventPrediction> {
        EVENT_CATALOGUE.iter().map(|rule| self.predict(rule)).collect()
    }
}

fn recommendations(
    event_type: &str,
    status: PromiseStatus,
    strength: PredictionStrength,
    common: &[Planet],
) -> Vec<String> {
    let mut out = Vec::new();
    let top = |n: usize| format_planets(&common[..common.len().min(n)]);

    match (status, strength) {
        (PromiseStatus::Promised, PredictionStrength::Strong) => out.push(format!(
            "The event is strongly promised. Favorable periods are during dasha/antardasha of: {}",
            top(3)
        )),
        (PromiseStatus::Promised, PredictionStrength::Medium) => out.push(format!(
            "The event is promised but with moderate strength. Watch for periods of: {}",
            top(3)
        )),
        (PromiseStatus::Delayed, _) => {
            out.push("The event may be delayed. Patience and proper timing are important.".to_string());
            if !common.is_empty() {
                out.push(format!("Favorable periods: dasha/antardasha of {}", top(2)));
            }
        }
        (PromiseStatus::Denied, _) => out.push(
            "The event faces significant obstacles or denial. Consider alternative approaches."
                .to_string(),
        ),
        _ => out.push("Uncertain outcome. Consult detailed horoscope analysis for clarity.".to_string()),
    }

    let promised_or_delayed = matches!(status, PromiseStatus::Promised | PromiseStatus::Delayed);
    match event_type {
        "marriage" if promised_or_delayed => {
            out.push("Consider matching horoscopes (Kundali Milan) for compatibility.".to_string())
        }
        "career" if promised_or_delayed => out.push(
            "Focus on skill development and networking during favorable periods.".to_string(),
        ),
        "health" if status == PromiseStatus::Denied => out.push(
            "Take preventive health measures and consult medical professionals.".to_string(),
        ),
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(n: u8, sub_lord: Planet, all: Vec<Planet>) -> HouseSignificators {
        HouseSignificators {
            house: n,
            cusp_longitude: (n as f64 - 1.0) * 30.0,
            cusp_sign: n,
            cusp_star_lord: Planet::Ketu,
            cusp_sub_lord: sub_lord,
            cusp_sub_sub_lord: Planet::Ketu,
            occupants: Vec::new(),
            owners: Vec::new(),
            star_of_occupants: Vec::new(),
            star_of_owners: Vec::new(),
            aspecting: Vec::new(),
            star_of_aspecting: Vec::new(),
            all_significators: all,
            strong: Vec::new(),
            medium: Vec::new(),
            weak: Vec::new(),
        }
    }

    fn ruling() -> RulingPlanets {
        RulingPlanets {
            day_lord: Planet::Venus,
            ascendant_star_lord: Planet::Moon,
            ascendant_sub_lord: Planet::Sun,
            moon_star_lord: Planet::Ketu,
            moon_sub_lord: Planet::Rahu,
        }
    }

    fn houses() -> Vec<HouseSignificators> {
        (1..=12u8)
            .map(|n| match n {
                7 => house(7, Planet::Venus, vec![Planet::Venus, Planet::Jupiter, Planet::Mars]),
                2 => house(2, Planet::Sun, vec![Planet::Jupiter, Planet::Venus, Planet::Mars]),
                11 => house(11, Planet::Sun, vec![Planet::Mars, Planet::Venus, Planet::Jupiter]),
                _ => house(n, Planet::Saturn, vec![Planet::Saturn]),
            })
            .collect()
    }

    #[test]
    fn test_catalogue_shape() {
        assert_eq!(EVENT_CATALOGUE.len(), 10);
        let marriage = event_rule("marriage").unwrap();
        assert_eq!(marriage.primary, &[7]);
        assert_eq!(marriage.secondary, &[2, 11]);
        assert_eq!(marriage.denial, &[1, 6, 10]);
        assert!(event_rule("lottery").is_none());
    }

    #[test]
    fn test_common_significators_keep_first_house_order() {
        let h = houses();
        let rp = ruling();
        let engine = PredictionEngine::new(&h, &rp);
        assert_eq!(
            engine.common_significators(&[7, 2, 11]),
            vec![Planet::Venus, Planet::Jupiter, Planet::Mars]
        );
        assert!(engine.common_significators(&[]).is_empty());
    }

    #[test]
    fn test_marriage_promised_strong() {
        let h = houses();
        let rp = ruling();
        let engine = PredictionEngine::new(&h, &rp);
        let marriage = engine.predict(event_rule("marriage").unwrap());
        assert_eq!(marriage.promise_status, PromiseStatus::Promised);
        // 3 common (+2), Venus is day lord (+1), promised (+2).
        assert_eq!(marriage.strength, PredictionStrength::Strong);
        assert_eq!(
            marriage.sub_lord_analysis,
            "House 7 sub-lord Venus signifies promise houses [2, 7, 11]"
        );
        assert_eq!(
            marriage.recommendations[0],
            "The event is strongly promised. Favorable periods are during dasha/antardasha of: Venus, Jupiter, Mars"
        );
        assert_eq!(
            marriage.recommendations[1],
            "Consider matching horoscopes (Kundali Milan) for compatibility."
        );
    }

    #[test]
    fn test_tied_votes_are_delayed() {
        // Saturn is the sub-lord everywhere outside 2, 7, 11 and signifies those houses.
        let h = houses();
        let rp = ruling();
        let engine = PredictionEngine::new(&h, &rp);
        let health = engine.predict(event_rule("health").unwrap());
        // One promise vote and one denial vote.
        assert_eq!(health.promise_status, PromiseStatus::Delayed);

        let property = engine.predict(event_rule("property").unwrap());
        assert_eq!(property.promise_status, PromiseStatus::Delayed);
    }

    #[test]
    fn test_uncertain_and_denied_status() {
        let mut h = houses();
        // House 12 sub-lord Moon signifies nothing.
        h[11] = house(12, Planet::Moon, vec![Planet::Saturn]);
        let rp = ruling();
        let engine = PredictionEngine::new(&h, &rp);
        let spiritual = engine.predict(event_rule("spiritual_growth").unwrap());
        assert_eq!(spiritual.promise_status, PromiseStatus::Uncertain);
        assert_eq!(spiritual.sub_lord_analysis, "Insufficient data for sub-lord analysis");

        // House 12 sub-lord Venus signifies 2, 7, 11: all denial for spiritual growth.
        h[11] = house(12, Planet::Venus, vec![Planet::Saturn]);
        let engine = PredictionEngine::new(&h, &rp);
        let spiritual = engine.predict(event_rule("spiritual_growth").unwrap());
        assert_eq!(spiritual.promise_status, PromiseStatus::Denied);
        assert_eq!(spiritual.strength, PredictionStrength::Weak);
        assert_eq!(
            spiritual.recommendations,
            vec!["The event faces significant obstacles or denial. Consider alternative approaches."]
        );
    }

    #[test]
    fn test_predict_all_in_catalogue_order() {
        let h = houses();
        let rp = ruling();
        let engine = PredictionEngine::new(&h, &rp);
        let all = engine.predict_all();
        let types: Vec<&str> = all.iter().map(|p| p.event_type.as_str()).collect();
        assert_eq!(types[0], "marriage");
        assert_eq!(types[9], "spiritual_growth");
    }
}
