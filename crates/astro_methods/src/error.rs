use thiserror::Error;
use crate::ephemeris::types::Planet;

/// Preferences that a methodology refuses to compute with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("{methodology} does not support house system '{found}' (accepted: {})", .accepted.join(", "))]
    UnsupportedHouseSystem {
        methodology: String,
        found: String,
        accepted: Vec<String>,
    },

    #[error("{methodology} does not support ayanamsha '{found}' (accepted: {})", .accepted.join(", "))]
    UnsupportedAyanamsha {
        methodology: String,
        found: String,
        accepted: Vec<String>,
    },

    #[error("Preferences for '{found}' were passed to the {expected} methodology")]
    WrongMethodology { expected: String, found: String },

    #[error("Unrecognized {kind} '{value}'")]
    Unrecognized { kind: &'static str, value: String },
}

/// Ephemeris payload is missing something a stage needs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Planet {planet} missing from ephemeris payload")]
    MissingPlanet { planet: Planet },

    #[error("Expected 12 house cusps, found {found}")]
    MissingCusps { found: usize },

    #[error("House {house} out of range (1-12)")]
    HouseOutOfRange { house: u8 },

    #[error("Sign {sign} out of range (1-12)")]
    SignOutOfRange { sign: u8 },

    #[error("Longitude {value} out of range [0, 360)")]
    LongitudeOutOfRange { value: f64 },

    #[error("Date arithmetic overflowed while building {context}")]
    DateOutOfRange { context: String },
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Unknown methodology: {name}")]
    UnknownMethodology { name: String },

    #[error("Ephemeris provider failed: {0}")]
    Ephemeris(String),

    #[error("Malformed ephemeris payload: {0}")]
    Payload(#[from] serde_json::Error),
}
