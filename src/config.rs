//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/f1dash/f1dash.toml`
//! 3. Environment variables: `F1DASH_*` prefix, `__` between table and key
//!    (e.g. `F1DASH_SAMPLES__SORT=50`)
//! 4. Command line flags (applied by the CLI)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::recursion::{FACTORIAL_U64_MAX, FIBONACCI_U64_MAX};
use crate::domain::{SortAlgorithm, SortField};

/// How many leading driver records each view works on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SampleSizes {
    pub sort: usize,
    pub buckets: usize,
    pub tree: usize,
    pub sum: usize,
}

impl Default for SampleSizes {
    fn default() -> Self {
        Self {
            sort: 100,
            buckets: 30,
            tree: 20,
            sum: 50,
        }
    }
}

/// Upper bounds for the naive recursive utilities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    pub factorial_max: u32,
    pub fibonacci_max: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            factorial_max: 20,
            fibonacci_max: 30,
        }
    }
}

/// Unified configuration for f1dash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding results.csv, drivers.csv and races.csv
    pub data_dir: PathBuf,
    /// Number of buckets in the demonstration hash table
    pub bucket_count: usize,
    pub default_algorithm: SortAlgorithm,
    pub default_field: SortField,
    pub samples: SampleSizes,
    pub limits: Limits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("archive"),
            bucket_count: 10,
            default_algorithm: SortAlgorithm::default(),
            default_field: SortField::default(),
            samples: SampleSizes::default(),
            limits: Limits::default(),
        }
    }
}

/// Get the XDG config directory for f1dash.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "f1dash").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("f1dash.toml"))
}

impl Settings {
    /// Load settings from defaults, the global config file and `F1DASH_*` variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` instead of the global config location.
    ///
    /// A missing file is not an error: defaults apply.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = match config_file {
            Some(path) if path.exists() => Self::from_toml_file(path)?,
            _ => Self::default(),
        };

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Parse a TOML file; keys it leaves out keep their defaults.
    fn from_toml_file(path: &Path) -> Result<Self, ApplicationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
            message: format!("read {}: {}", path.display(), e),
        })?;
        toml::from_str(&content).map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })
    }

    /// Apply F1DASH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("F1DASH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<usize>("bucket_count") {
            settings.bucket_count = val;
        }
        if let Ok(val) = config.get_string("default_algorithm") {
            settings.default_algorithm = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("F1DASH_DEFAULT_ALGORITHM: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("default_field") {
            settings.default_field = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("F1DASH_DEFAULT_FIELD: {e}"),
            })?;
        }
        if let Ok(val) = config.get::<usize>("samples.sort") {
            settings.samples.sort = val;
        }
        if let Ok(val) = config.get::<usize>("samples.buckets") {
            settings.samples.buckets = val;
        }
        if let Ok(val) = config.get::<usize>("samples.tree") {
            settings.samples.tree = val;
        }
        if let Ok(val) = config.get::<usize>("samples.sum") {
            settings.samples.sum = val;
        }
        if let Ok(val) = config.get::<u32>("limits.factorial_max") {
            settings.limits.factorial_max = val;
        }
        if let Ok(val) = config.get::<u32>("limits.fibonacci_max") {
            settings.limits.fibonacci_max = val;
        }

        Ok(settings)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the data directory.
    fn expand_paths(&mut self) {
        let raw = self.data_dir.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw)
            .map(|s| s.into_owned())
            .unwrap_or(raw);
        self.data_dir = PathBuf::from(expanded);
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.bucket_count == 0 {
            return Err(ApplicationError::Config {
                message: "bucket_count must be positive".into(),
            });
        }
        let caps = [
            ("factorial_max", self.limits.factorial_max, FACTORIAL_U64_MAX),
            ("fibonacci_max", self.limits.fibonacci_max, FIBONACCI_U64_MAX),
        ];
        for (name, value, max) in caps {
            if value > max {
                return Err(ApplicationError::Config {
                    message: format!("limits.{name} = {value} overflows u64 (max {max})"),
                });
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# f1dash configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/f1dash/f1dash.toml
#   Env:    F1DASH_* environment variables (F1DASH_SAMPLES__SORT=50)
#   Flags:  --data-dir

# Directory with the Ergast CSV export (results.csv, drivers.csv, races.csv)
# data_dir = "archive"

# Buckets in the hash table demonstration
# bucket_count = 10

# Algorithm and field used when `sort` gets no flags
# default_algorithm = "quick"   # quick | bubble | selection | insertion | merge
# default_field = "points"      # points | laps | grid

[samples]
# Leading driver records used by each view
# sort = 100
# buckets = 30
# tree = 20
# sum = 50

[limits]
# Largest accepted input for the naive recursive utilities
# factorial_max = 20           # at most 20
# fibonacci_max = 30           # at most 93
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
