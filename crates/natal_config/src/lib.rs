//! Configuration loaded once at start-up.
//!
//! Every section has a built-in default, so an empty JSON object (or no
//! file at all) is a complete configuration. Files only name what they
//! change:
//!
//! ```json
//! {
//!   "node_mode": "crossing",
//!   "node_search": { "window_days": 35 },
//!   "cache": { "capacity": 4096, "ttl_secs": null }
//! }
//! ```

pub mod error;

use std::path::Path;

use natal_base::NodeMode;
use natal_core::CacheConfig;
use natal_geo::{CorrectionTable, LineConfig};
use natal_orbit::{KeplerConfig, MinorBodyFrame, OrbitalElements};
use natal_search::NodeSearchConfig;
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "NATAL_CONFIG";

/// A named minor body propagated from fixed elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinorBody {
    pub name: String,
    pub elements: OrbitalElements,
}

impl MinorBody {
    pub fn chiron() -> Self {
        Self {
            name: "chiron".to_string(),
            elements: OrbitalElements::CHIRON,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NatalConfig {
    pub kepler: KeplerConfig,
    pub minor_bodies: Vec<MinorBody>,
    pub minor_body_frame: MinorBodyFrame,
    pub node_mode: NodeMode,
    pub node_search: NodeSearchConfig,
    /// `None` disables the ephemeris cache.
    pub cache: Option<CacheConfig>,
    pub corrections: CorrectionTable,
    pub lines: LineConfig,
}

impl Default for NatalConfig {
    fn default() -> Self {
        Self {
            kepler: KeplerConfig::default(),
            minor_bodies: vec![MinorBody::chiron()],
            minor_body_frame: MinorBodyFrame::default(),
            node_mode: NodeMode::default(),
            node_search: NodeSearchConfig::default(),
            cache: None,
            corrections: CorrectionTable::default(),
            lines: LineConfig::default(),
        }
    }
}

impl NatalConfig {
    /// Read and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The file named by `NATAL_CONFIG` if set, else the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.kepler
            .validate()
            .map_err(|e| ConfigError::invalid("kepler", e))?;
        self.node_search
            .validate()
            .map_err(|e| ConfigError::invalid("node_search", e))?;
        if let Some(cache) = &self.cache {
            cache.validate().map_err(|e| ConfigError::invalid("cache", e))?;
        }
        self.corrections
            .validate()
            .map_err(|e| ConfigError::invalid("corrections", e))?;
        self.lines
            .validate()
            .map_err(|e| ConfigError::invalid("lines", e))?;

        for (i, body) in self.minor_bodies.iter().enumerate() {
            if body.name.trim().is_empty() {
                return Err(ConfigError::invalid("minor_bodies", "name must not be empty"));
            }
            if self.minor_bodies[..i]
                .iter()
                .any(|b| b.name.eq_ignore_ascii_case(&body.name))
            {
                return Err(ConfigError::invalid(
                    "minor_bodies",
                    format!("duplicate name {:?}", body.name),
                ));
            }
            body.elements
                .validate()
                .map_err(|e| ConfigError::invalid("minor_bodies", format!("{}: {e}", body.name)))?;
        }
        Ok(())
    }

    /// Look up a configured minor body by case-insensitive name.
    pub fn minor_body(&self, name: &str) -> Option<&MinorBody> {
        self.minor_bodies
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }
}
