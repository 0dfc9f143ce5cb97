//! Rule engines for several astrological methodologies.
//!
//! Positions come from an [`EphemerisProvider`]; each [`Methodology`] turns
//! them into a [`ChartResult`]. The [`MethodologyRegistry`] resolves a
//! methodology by name and is read-only once built.

pub mod ephemeris;
pub mod error;
pub mod jaimini;
pub mod kp;
pub mod methodology;
pub mod nakshatra;
pub mod parashara;
pub mod western;
pub mod zodiac;

pub use ephemeris::{
    AscendantData, BirthData, EphemerisProvider, EphemerisSnapshot, FixedEphemeris, Planet,
    PlanetPosition,
};
pub use error::{ChartError, InputError, PreferenceError};
pub use methodology::{
    Ayanamsha, ChartPayload, ChartResult, HouseSystem, Methodology, MethodologyInfo,
    MethodologyKind, MethodologyRegistry, Preferences,
};
