use crate::ephemeris::types::{BirthData, EphemerisSnapshot};
use crate::error::ChartError;
use crate::methodology::preferences::Preferences;

/// Source of sidereal positions for a birth moment.
///
/// Implementations apply the ayanamsha and house system named in the
/// preferences; the rule engines never compute positions themselves.
pub trait EphemerisProvider: Send + Sync {
    fn positions(
        &self,
        birth: &BirthData,
        preferences: &Preferences,
    ) -> Result<EphemerisSnapshot, ChartError>;
}

/// Provider that hands back a snapshot computed elsewhere.
#[derive(Debug, Clone)]
pub struct FixedEphemeris {
    snapshot: EphemerisSnapshot,
}

impl FixedEphemeris {
    pub fn new(snapshot: EphemerisSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json(text: &str) -> Result<Self, ChartError> {
        Ok(Self::new(EphemerisSnapshot::from_json(text)?))
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn positions(
        &self,
        _birth: &BirthData,
        _preferences: &Preferences,
    ) -> Result<EphemerisSnapshot, ChartError> {
        self.snapshot.validate()?;
        Ok(self.snapshot.clone())
    }
}
