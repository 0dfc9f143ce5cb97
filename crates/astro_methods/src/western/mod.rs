//! Western (tropical) methodology with traditional dignities.

pub mod dignities;
pub mod methodology;

pub use dignities::{dignities_for, DignityResult, DignityType};
pub use methodology::{WesternChart, WesternMethodology};
