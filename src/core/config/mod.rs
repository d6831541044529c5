//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Lexroot has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Per-project overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$LEXROOT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/lexroot/config.toml`
//! 3. `~/.lexroot/config.toml` (canonical write location)
//!
//! # Project Config Locations
//!
//! Searched in order:
//! 1. `<root>/lexroot.toml` (canonical)
//! 2. `<root>/.lexroot.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use lexroot::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("form threshold: {}", config.form_threshold());
//! if let Some(dir) = config.resources_dir() {
//!     println!("resources: {}", dir.display());
//! }
//! ```

pub mod schema;

pub use schema::{ClusterDefaults, GlobalConfig, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default within-group threshold for form subclusters.
pub const DEFAULT_FORM_THRESHOLD: f64 = 0.55;

/// Default within-group threshold for meaning subclusters.
pub const DEFAULT_MEANING_THRESHOLD: f64 = 0.35;

/// Default group-size ceiling for similarity subclustering.
pub const DEFAULT_MAX_GROUP: usize = 400;

/// Default language tag for ingested records.
pub const DEFAULT_LANGUAGE: &str = "arabic";

/// Environment variable overriding the global config path.
pub const CONFIG_ENV: &str = "LEXROOT_CONFIG";

/// Environment variable naming the external resources directory.
pub const RESOURCES_ENV: &str = "LC_RESOURCES_DIR";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration with precedence applied on access.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global (user) scope values.
    pub global: GlobalConfig,
    /// Project scope values.
    pub project: ProjectConfig,
}

impl Config {
    /// Load configuration for a project root.
    ///
    /// Missing files are not errors; they contribute nothing. Parse and
    /// validation failures are errors.
    pub fn load(root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let global = match global_config_path() {
            Ok(path) if path.exists() => {
                let parsed: GlobalConfig = read_toml(&path)?;
                parsed.validate()?;
                parsed
            }
            _ => GlobalConfig::default(),
        };

        let project = match root {
            Some(root) => load_project(root, &mut warnings)?,
            None => ProjectConfig::default(),
        };

        Ok(ConfigLoadResult {
            config: Config { global, project },
            warnings,
        })
    }

    // =========================================================================
    // Accessors with precedence applied
    // =========================================================================

    /// Resolved resources directory, if any.
    ///
    /// Precedence: `LC_RESOURCES_DIR` env, project, global.
    pub fn resources_dir(&self) -> Option<PathBuf> {
        if let Ok(dir) = std::env::var(RESOURCES_ENV) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }
        self.project
            .resources_dir
            .clone()
            .or_else(|| self.global.resources_dir.clone())
    }

    /// Language tag recorded in ingested records.
    pub fn language(&self) -> String {
        self.project
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    /// Default quiet mode.
    pub fn quiet(&self) -> bool {
        self.global.quiet.unwrap_or(false)
    }

    /// Form-similarity clustering threshold.
    pub fn form_threshold(&self) -> f64 {
        self.cluster_value(|c| c.form_threshold)
            .unwrap_or(DEFAULT_FORM_THRESHOLD)
    }

    /// Meaning-similarity clustering threshold.
    pub fn meaning_threshold(&self) -> f64 {
        self.cluster_value(|c| c.meaning_threshold)
            .unwrap_or(DEFAULT_MEANING_THRESHOLD)
    }

    /// Group-size ceiling for subclustering.
    pub fn max_group(&self) -> usize {
        self.cluster_value(|c| c.max_group)
            .unwrap_or(DEFAULT_MAX_GROUP)
    }

    fn cluster_value<T>(&self, pick: impl Fn(&ClusterDefaults) -> Option<T>) -> Option<T> {
        self.project
            .cluster
            .as_ref()
            .and_then(&pick)
            .or_else(|| self.global.cluster.as_ref().and_then(&pick))
    }

    // =========================================================================
    // Key-based access for `lx config`
    // =========================================================================

    /// All known dotted keys, with their resolved display values.
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "resources_dir".into(),
                self.resources_dir()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(unset)".into()),
            ),
            ("language".into(), self.language()),
            ("quiet".into(), self.quiet().to_string()),
            (
                "cluster.form_threshold".into(),
                self.form_threshold().to_string(),
            ),
            (
                "cluster.meaning_threshold".into(),
                self.meaning_threshold().to_string(),
            ),
            ("cluster.max_group".into(), self.max_group().to_string()),
        ]
    }

    /// Get the resolved value for a dotted key.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        self.list()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }
}

/// Apply a `key = value` assignment to a project config.
///
/// # Errors
///
/// Returns `ConfigError::UnknownKey` for keys outside the schema and
/// `ConfigError::InvalidValue` for unparseable or out-of-range values.
pub fn set_project_value(
    config: &mut ProjectConfig,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match key {
        "language" => config.language = Some(value.to_string()),
        "resources_dir" => config.resources_dir = Some(PathBuf::from(value)),
        "cluster.form_threshold" => {
            cluster_mut(config).form_threshold = Some(parse_f64(key, value)?)
        }
        "cluster.meaning_threshold" => {
            cluster_mut(config).meaning_threshold = Some(parse_f64(key, value)?)
        }
        "cluster.max_group" => cluster_mut(config).max_group = Some(parse_usize(key, value)?),
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    config.validate()
}

fn cluster_mut(config: &mut ProjectConfig) -> &mut ClusterDefaults {
    config.cluster.get_or_insert_with(ClusterDefaults::default)
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{} expects a number, got '{}'", key, value)))
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::InvalidValue(format!("{} expects an integer, got '{}'", key, value))
    })
}

/// Canonical path of the global config file.
///
/// # Errors
///
/// Returns `ConfigError::NoHomeDir` if no home directory can be determined
/// and neither override is set.
pub fn global_config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            let candidate = PathBuf::from(xdg).join("lexroot").join("config.toml");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".lexroot").join("config.toml"))
}

/// Load the project config, handling the compatibility location.
fn load_project(
    root: &Path,
    warnings: &mut Vec<ConfigWarning>,
) -> Result<ProjectConfig, ConfigError> {
    let canonical = root.join("lexroot.toml");
    if canonical.exists() {
        let parsed: ProjectConfig = read_toml(&canonical)?;
        parsed.validate()?;
        return Ok(parsed);
    }

    let compat = root.join(".lexroot.toml");
    if compat.exists() {
        warnings.push(ConfigWarning {
            message: "using legacy config location; rename to lexroot.toml".into(),
            path: compat.clone(),
        });
        let parsed: ProjectConfig = read_toml(&compat)?;
        parsed.validate()?;
        return Ok(parsed);
    }

    Ok(ProjectConfig::default())
}

/// Write a project config to its canonical location.
pub fn save_project(root: &Path, config: &ProjectConfig) -> Result<(), ConfigError> {
    let path = root.join("lexroot.toml");
    let body = toml::to_string_pretty(config).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        message: e.to_string(),
    })?;
    fs::write(&path, body).map_err(|source| ConfigError::WriteError {
        path: path.clone(),
        source,
    })
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let body = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&body).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
