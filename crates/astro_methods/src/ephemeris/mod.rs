pub mod provider;
pub mod types;

pub use provider::{EphemerisProvider, FixedEphemeris};
pub use types::{AscendantData, BirthData, EphemerisSnapshot, HouseCusps, Planet, PlanetPosition};
