//! Krishnamurti Paddhati: stellar sub-lords, significators, ruling planets
//! and event predictions.

pub mod methodology;
pub mod prediction;
pub mod ruling;
pub mod significators;
pub mod sub_lord;

pub use methodology::{KpChart, KpMethodology};
pub use prediction::{EventPrediction, PredictionEngine, PredictionStrength, PromiseStatus};
pub use ruling::{calculate_ruling_planets, RulingPlanets};
pub use significators::{HouseSignificators, PlanetSignifications, SignificatorCalculator};
pub use sub_lord::{calculate_sub_lord, SubLordResult};
