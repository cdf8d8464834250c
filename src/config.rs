//! `.mcpdrift.toml` configuration
//!
//! Lookup order: explicit path, `./.mcpdrift.toml`, `./mcpdrift.toml`,
//! then `<config_dir>/mcpdrift/config.toml`. No file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drift::DriftSeverity;
use crate::errors::ConfigError;
use crate::fingerprinting::FingerprintOptions;
use crate::golden::{ComparisonMode, Tolerance};
use crate::normalize::DEFAULT_MAX_DEPTH;

/// Project-local config file names, in lookup order
pub const CONFIG_FILE_NAMES: [&str; 2] = [".mcpdrift.toml", "mcpdrift.toml"];

/// Default golden store location
pub const DEFAULT_STORE_PATH: &str = ".mcpdrift/golden.json";

/// Commented template written by `mcpdrift init`
pub const TEMPLATE: &str = r#"# mcpdrift configuration

[golden]
# Golden store path
store = ".mcpdrift/golden.json"
# exact | structural | semantic
mode = "structural"
normalize_timestamps = true
normalize_uuids = true
# Allowed-drift patterns applied to new captures, e.g. ["$.meta.*"]
allowed_drift = []

[schema]
# Depth limit for fingerprinting and diffing
max_depth = 32

[ci]
# none | info | warning | breaking
fail_on = "breaking"
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub golden: GoldenConfig,
    pub schema: SchemaConfig,
    pub ci: CiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GoldenConfig {
    pub store: PathBuf,
    pub mode: ComparisonMode,
    pub normalize_timestamps: bool,
    pub normalize_uuids: bool,
    pub allowed_drift: Vec<String>,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            store: PathBuf::from(DEFAULT_STORE_PATH),
            mode: ComparisonMode::Structural,
            normalize_timestamps: true,
            normalize_uuids: true,
            allowed_drift: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub max_depth: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CiConfig {
    pub fail_on: DriftSeverity,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            fail_on: DriftSeverity::Breaking,
        }
    }
}

impl Config {
    /// Load from an explicit path, or the first file found on the search path
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::discover() {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// First existing config file on the search path
    pub fn discover() -> Option<PathBuf> {
        let local = CONFIG_FILE_NAMES.iter().map(PathBuf::from);
        let global = dirs::config_dir().map(|dir| dir.join("mcpdrift").join("config.toml"));
        local.chain(global).find(|p| p.is_file())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(path, content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse TOML text; `path` only labels diagnostics
    pub fn parse(path: &Path, content: String) -> Result<Self, ConfigError> {
        match toml::from_str::<Config>(&content) {
            Ok(config) => config.validated(path, content),
            Err(e) => {
                let span = e.span();
                let message = e.message().to_string();
                Err(ConfigError::parse(path, content, span, message))
            }
        }
    }

    fn validated(self, path: &Path, content: String) -> Result<Self, ConfigError> {
        if self.schema.max_depth == 0 {
            return Err(ConfigError::parse(
                path,
                content,
                None,
                "schema.max_depth must be at least 1",
            ));
        }
        Ok(self)
    }

    /// Tolerance applied to new captures
    pub fn tolerance(&self) -> Tolerance {
        Tolerance {
            mode: self.golden.mode,
            allowed_drift: self.golden.allowed_drift.clone(),
            normalize_timestamps: self.golden.normalize_timestamps,
            normalize_uuids: self.golden.normalize_uuids,
        }
    }

    pub fn fingerprint_options(&self) -> FingerprintOptions {
        FingerprintOptions::default().with_max_depth(self.schema.max_depth)
    }
}
