use serde::Deserialize;
use std::fs;

/// Methodology tags the engine knows how to build.
pub const KNOWN_METHODOLOGIES: &[&str] = &["parashara", "kp", "jaimini", "western"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KpDefaults {
    #[serde(default)]
    pub ayanamsha: Option<String>,
    #[serde(default)]
    pub house_system: Option<String>,
    #[serde(default)]
    pub enable_sub_lords: Option<bool>,
    #[serde(default)]
    pub enable_significators: Option<bool>,
    #[serde(default)]
    pub enable_ruling_planets: Option<bool>,
    #[serde(default)]
    pub enable_predictions: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JaiminiDefaults {
    #[serde(default)]
    pub ayanamsha: Option<String>,
    #[serde(default)]
    pub house_system: Option<String>,
    #[serde(default)]
    pub enable_chara_karakas: Option<bool>,
    #[serde(default)]
    pub enable_arudha_padas: Option<bool>,
    #[serde(default)]
    pub enable_chara_dasha: Option<bool>,
    #[serde(default)]
    pub enable_rashi_drishti: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParasharaDefaults {
    #[serde(default)]
    pub ayanamsha: Option<String>,
    #[serde(default)]
    pub house_system: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WesternDefaults {
    #[serde(default)]
    pub house_system: Option<String>,
}

/// Engine settings resolved from `configs/astro.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub default_methodology: String,
    pub enabled_methodologies: Vec<String>,
    pub kp: KpDefaults,
    pub jaimini: JaiminiDefaults,
    pub parashara: ParasharaDefaults,
    pub western: WesternDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_methodology: default_methodology(),
            enabled_methodologies: KNOWN_METHODOLOGIES.iter().map(|m| m.to_string()).collect(),
            kp: KpDefaults::default(),
            jaimini: JaiminiDefaults::default(),
            parashara: ParasharaDefaults::default(),
            western: WesternDefaults::default(),
        }
    }
}

impl EngineConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled_methodologies.iter().any(|m| m == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct EngineToml {
    #[serde(default = "default_methodology")]
    default_methodology: String,
    #[serde(default)]
    enabled_methodologies: Option<Vec<String>>,
}

fn default_methodology() -> String {
    "parashara".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: Option<EngineToml>,
    #[serde(default)]
    kp: Option<KpDefaults>,
    #[serde(default)]
    jaimini: Option<JaiminiDefaults>,
    #[serde(default)]
    parashara: Option<ParasharaDefaults>,
    #[serde(default)]
    western: Option<WesternDefaults>,
}

/// Try the usual relative locations for `configs/astro.toml`.
pub fn read_config_text() -> anyhow::Result<String> {
    let paths = ["configs/astro.toml", "../../configs/astro.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load astro.toml from {:?}", paths);
}

pub fn parse_engine_config(text: &str) -> anyhow::Result<EngineConfig> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse astro.toml: {e}"))?;

    let (default_methodology, enabled) = match root.engine {
        Some(engine) => (engine.default_methodology, engine.enabled_methodologies),
        None => (default_methodology(), None),
    };
    let enabled_methodologies = enabled.unwrap_or_else(|| {
        KNOWN_METHODOLOGIES.iter().map(|m| m.to_string()).collect()
    });

    if enabled_methodologies.is_empty() {
        anyhow::bail!("engine.enabled_methodologies must name at least one methodology");
    }
    for name in &enabled_methodologies {
        if !KNOWN_METHODOLOGIES.contains(&name.as_str()) {
            anyhow::bail!(
                "Unknown methodology '{}' in engine.enabled_methodologies (expected one of {:?})",
                name,
                KNOWN_METHODOLOGIES
            );
        }
    }
    if !enabled_methodologies.iter().any(|m| *m == default_methodology) {
        anyhow::bail!(
            "engine.default_methodology '{}' is not listed in engine.enabled_methodologies",
            default_methodology
        );
    }

    Ok(EngineConfig {
        default_methodology,
        enabled_methodologies,
        kp: root.kp.unwrap_or_default(),
        jaimini: root.jaimini.unwrap_or_default(),
        parashara: root.parashara.unwrap_or_default(),
        western: root.western.unwrap_or_default(),
    })
}

pub fn load_engine_config() -> anyhow::Result<EngineConfig> {
    let text = read_config_text()?;
    parse_engine_config(&text)
}
