//! The pluggable methodology contract and its closed set of implementations.

pub mod preferences;
pub mod registry;
pub mod result;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::ephemeris::types::{BirthData, EphemerisSnapshot};
use crate::error::{ChartError, PreferenceError};
use crate::jaimini::JaiminiMethodology;
use crate::kp::KpMethodology;
use crate::parashara::ParasharaMethodology;
use crate::western::WesternMethodology;

pub use preferences::{
    Ayanamsha, HouseSystem, JaiminiPreferences, KpPreferences, ParasharaPreferences, Preferences,
    WesternPreferences,
};
pub use registry::{MethodologyInfo, MethodologyRegistry};
pub use result::{ChartPayload, ChartResult};

/// One rule system the engine can compute charts with.
pub trait Methodology: Send + Sync {
    /// Registry key, e.g. "kp".
    fn name(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    fn supported_features(&self) -> &'static [&'static str];

    fn is_feature_supported(&self, feature: &str) -> bool {
        self.supported_features().contains(&feature)
    }

    fn validate_preferences(&self, preferences: &Preferences) -> Result<(), PreferenceError>;

    /// Validate preferences and derive the methodology payload from `snapshot`.
    fn compute_chart(
        &self,
        birth: &BirthData,
        snapshot: &EphemerisSnapshot,
        preferences: &Preferences,
    ) -> Result<ChartResult, ChartError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodologyKind {
    Parashara,
    Kp,
    Jaimini,
    Western,
}

impl MethodologyKind {
    pub const ALL: [MethodologyKind; 4] = [
        MethodologyKind::Parashara,
        MethodologyKind::Kp,
        MethodologyKind::Jaimini,
        MethodologyKind::Western,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MethodologyKind::Parashara => "parashara",
            MethodologyKind::Kp => "kp",
            MethodologyKind::Jaimini => "jaimini",
            MethodologyKind::Western => "western",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MethodologyKind::Parashara => "Parashara (Traditional Vedic)",
            MethodologyKind::Kp => "KP System (Krishnamurti Paddhati)",
            MethodologyKind::Jaimini => "Jaimini Astrology",
            MethodologyKind::Western => "Western Astrology",
        }
    }

    pub fn implementation(self) -> Arc<dyn Methodology> {
        match self {
            MethodologyKind::Parashara => Arc::new(ParasharaMethodology),
            MethodologyKind::Kp => Arc::new(KpMethodology),
            MethodologyKind::Jaimini => Arc::new(JaiminiMethodology),
            MethodologyKind::Western => Arc::new(WesternMethodology),
        }
    }
}

impl fmt::Display for MethodologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MethodologyKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        MethodologyKind::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| ChartError::UnknownMethodology {
                name: s.to_string(),
            })
    }
}
