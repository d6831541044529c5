//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$LEXROOT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/lexroot/config.toml`
//! 3. `~/.lexroot/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! Located at `<root>/lexroot.toml` (canonical).
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected ranges (e.g., thresholds must lie in [0, 1]).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// resources_dir = "/datasets/arabic"
/// quiet = false
///
/// [cluster]
/// form_threshold = 0.55
/// meaning_threshold = 0.35
/// max_group = 400
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default external resources directory
    pub resources_dir: Option<PathBuf>,

    /// Default quiet mode
    pub quiet: Option<bool>,

    /// Clustering defaults
    pub cluster: Option<ClusterDefaults>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(cluster) = &self.cluster {
            cluster.validate()?;
        }
        Ok(())
    }
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// language = "arabic"
/// resources_dir = "../resources"
///
/// [cluster]
/// form_threshold = 0.6
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Primary language tag recorded in ingested records (default: "arabic")
    pub language: Option<String>,

    /// External resources directory (overrides global)
    pub resources_dir: Option<PathBuf>,

    /// Clustering defaults (override global)
    pub cluster: Option<ClusterDefaults>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(language) = &self.language {
            if language.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "language cannot be empty".into(),
                ));
            }
        }
        if let Some(cluster) = &self.cluster {
            cluster.validate()?;
        }
        Ok(())
    }
}

/// Clustering parameter defaults.
///
/// CLI flags always win over these; they exist so a project can pin its
/// thresholds without repeating them on every invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterDefaults {
    /// Within-binary-root threshold for form subclusters
    pub form_threshold: Option<f64>,

    /// Within-binary-root threshold for meaning subclusters
    pub meaning_threshold: Option<f64>,

    /// Skip subclustering for groups larger than this
    pub max_group: Option<usize>,
}

impl ClusterDefaults {
    /// Validate threshold ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("cluster.form_threshold", self.form_threshold),
            ("cluster.meaning_threshold", self.meaning_threshold),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::InvalidValue(format!(
                        "{} must be in [0, 1], got {}",
                        name, v
                    )));
                }
            }
        }
        if let Some(max_group) = self.max_group {
            if max_group == 0 {
                return Err(ConfigError::InvalidValue(
                    "cluster.max_group must be at least 1".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_config() {
        let toml = r#"
            resources_dir = "/datasets"
            quiet = true

            [cluster]
            form_threshold = 0.6
            max_group = 200
        "#;
        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.resources_dir, Some(PathBuf::from("/datasets")));
        assert_eq!(config.quiet, Some(true));
        let cluster = config.cluster.unwrap();
        assert_eq!(cluster.form_threshold, Some(0.6));
        assert_eq!(cluster.meaning_threshold, None);
        assert_eq!(cluster.max_group, Some(200));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<ProjectConfig, _> = toml::from_str("trunk = \"main\"");
        assert!(result.is_err());
    }

    #[test]
    fn validates_threshold_range() {
        let cluster = ClusterDefaults {
            form_threshold: Some(1.5),
            ..Default::default()
        };
        assert!(cluster.validate().is_err());

        let cluster = ClusterDefaults {
            meaning_threshold: Some(0.35),
            ..Default::default()
        };
        assert!(cluster.validate().is_ok());
    }

    #[test]
    fn validates_max_group() {
        let cluster = ClusterDefaults {
            max_group: Some(0),
            ..Default::default()
        };
        assert!(cluster.validate().is_err());
    }

    #[test]
    fn validates_language() {
        let project = ProjectConfig {
            language: Some("  ".into()),
            ..Default::default()
        };
        assert!(project.validate().is_err());
    }
}
