use astro_config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::BirthData;
use crate::error::ChartError;
use crate::methodology::preferences::Preferences;
use crate::methodology::result::ChartResult;
use crate::methodology::{Methodology, MethodologyKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodologyInfo {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "supportedFeatures")]
    pub supported_features: Vec<String>,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
}

/// Name -> methodology table.
///
/// Filled through `&mut self` during startup, then shared behind an `Arc`
/// and only read afterwards.
#[derive(Clone, Default)]
pub struct MethodologyRegistry {
    methodologies: HashMap<String, Arc<dyn Methodology>>,
}

impl MethodologyRegistry {
    pub fn new() -> Self {
        Self {
            methodologies: HashMap::new(),
        }
    }

    /// All four built-in methodologies.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in MethodologyKind::ALL {
            registry.register(kind.implementation());
        }
        registry
    }

    /// Registry holding only the named methodologies.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ChartError> {
        let mut registry = Self::new();
        for name in names {
            let kind: MethodologyKind = name.as_ref().parse()?;
            registry.register(kind.implementation());
        }
        Ok(registry)
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ChartError> {
        Self::from_names(config.enabled_methodologies.as_slice())
    }

    /// Register a methodology. Keeps the first registration for a name;
    /// returns whether `methodology` was added.
    pub fn register(&mut self, methodology: Arc<dyn Methodology>) -> bool {
        let name = methodology.name().to_string();
        if self.methodologies.contains_key(&name) {
            log::debug!("MethodologyRegistry: '{}' already registered", name);
            return false;
        }
        log::debug!("MethodologyRegistry: Registered methodology '{}'", name);
        self.methodologies.insert(name, methodology);
        true
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Methodology>> {
        self.methodologies.get(name).cloned()
    }

    /// List all registered methodology names (sorted)
    pub fn list_available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methodologies.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn describe(&self) -> Vec<MethodologyInfo> {
        self.list_available()
            .into_iter()
            .filter_map(|name| self.methodologies.get(&name))
            .map(|m| MethodologyInfo {
                name: m.name().to_string(),
                display_name: m.display_name().to_string(),
                supported_features: m.supported_features().iter().map(|f| f.to_string()).collect(),
                is_available: true,
            })
            .collect()
    }

    /// Resolve `name`, fetch positions from `provider` and compute the chart.
    pub fn compute(
        &self,
        name: &str,
        birth: &BirthData,
        provider: &dyn EphemerisProvider,
        preferences: &Preferences,
    ) -> Result<ChartResult, ChartError> {
        let methodology = self.get(name).ok_or_else(|| ChartError::UnknownMethodology {
            name: name.to_string(),
        })?;
        methodology.validate_preferences(preferences)?;
        let snapshot = provider.positions(birth, preferences)?;
        methodology.compute_chart(birth, &snapshot, preferences)
    }
}

impl fmt::Debug for MethodologyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodologyRegistry")
            .field("methodologies", &self.list_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = MethodologyRegistry::new();
        assert!(registry.register(MethodologyKind::Kp.implementation()));
        assert!(!registry.register(MethodologyKind::Kp.implementation()));
        assert_eq!(registry.list_available(), vec!["kp"]);
    }

    #[test]
    fn test_defaults_sorted() {
        let registry = MethodologyRegistry::with_defaults();
        assert_eq!(
            registry.list_available(),
            vec!["jaimini", "kp", "parashara", "western"]
        );
        assert!(registry.get("kp").is_some());
        assert!(registry.get("chinese").is_none());
    }

    #[test]
    fn test_from_names_rejects_unknown() {
        let err = MethodologyRegistry::from_names(&["kp", "tarot"]).unwrap_err();
        assert!(matches!(err, ChartError::UnknownMethodology { name } if name == "tarot"));
    }

    #[test]
    fn test_describe() {
        let registry = MethodologyRegistry::from_names(&["jaimini"]).unwrap();
        let info = registry.describe();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].name, "jaimini");
        assert!(info[0].supported_features.contains(&"chara_karakas".to_string()));
    }
}
