//! Deployment settings with hierarchical precedence
//!
//! Settings are resolved from the following layers (low to high):
//! 1. Built-in defaults
//! 2. Optional YAML settings file (brokkr.yaml)
//! 3. Environment variables (BROKKR_* prefix)
//!
//! # Environment Variables
//!
//! - `BROKKR_PROFILES`: colon-separated list of active deployment profiles.
//!   Example: `BROKKR_PROFILES=staging:eu`
//! - `BROKKR_CONFIG_DIRS`: colon-separated list of directories searched for
//!   property files.
//! - `BROKKR_DEACTIVATED`: colon-separated list of extension ids that must
//!   not participate in deployment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the active profiles
pub const PROFILES_ENV: &str = "BROKKR_PROFILES";

/// Environment variable naming the config search directories
pub const CONFIG_DIRS_ENV: &str = "BROKKR_CONFIG_DIRS";

/// Environment variable naming deactivated extension ids
pub const DEACTIVATED_ENV: &str = "BROKKR_DEACTIVATED";

/// Settings governing a single deployment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct DeploymentSettings {
    /// Active deployment profiles, in override order (later wins)
    pub profiles: Vec<String>,

    /// Directories searched for property files, in priority order
    pub config_dirs: Vec<PathBuf>,

    /// Extension ids switched off for this deployment
    pub deactivated: Vec<String>,
}

impl Default for DeploymentSettings {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            config_dirs: vec![PathBuf::from("config"), PathBuf::from(".")],
            deactivated: Vec::new(),
        }
    }
}

impl DeploymentSettings {
    /// Load settings with hierarchical precedence.
    ///
    /// `settings_file` is optional; when absent only defaults and
    /// environment overrides apply.
    pub fn load(settings_file: Option<&Path>) -> Result<Self> {
        let mut settings = match settings_file {
            Some(path) if path.exists() => {
                debug!("Loading deployment settings from {}", path.display());
                let content = fs::read_to_string(path)?;
                serde_yaml_ng::from_str(&content)?
            }
            Some(path) => {
                debug!(
                    "Settings file {} not found, using defaults",
                    path.display()
                );
                Self::default()
            }
            None => Self::default(),
        };

        settings = settings.apply_env_overrides();
        settings.validate()?;

        info!(
            "Deployment settings: {} profile(s), {} config dir(s), {} deactivated extension(s)",
            settings.profiles.len(),
            settings.config_dirs.len(),
            settings.deactivated.len()
        );

        Ok(settings)
    }

    /// Apply BROKKR_* environment variable overrides
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(val) = env::var(PROFILES_ENV) {
            self.profiles = split_list(&val);
        }

        if let Ok(val) = env::var(CONFIG_DIRS_ENV) {
            self.config_dirs = split_list(&val).into_iter().map(PathBuf::from).collect();
        }

        if let Ok(val) = env::var(DEACTIVATED_ENV) {
            self.deactivated = split_list(&val);
        }

        self
    }

    /// Builder-style profile override
    pub fn with_profiles(mut self, profiles: Vec<String>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Builder-style config directory override
    pub fn with_config_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.config_dirs = dirs;
        self
    }

    /// Builder-style deactivation override
    pub fn with_deactivated(mut self, deactivated: Vec<String>) -> Self {
        self.deactivated = deactivated;
        self
    }

    /// Reject settings that cannot be used safely.
    ///
    /// Profile names become part of derived file names, so they must not
    /// contain path separators.
    pub fn validate(&self) -> Result<()> {
        for profile in &self.profiles {
            if profile.contains('/') || profile.contains('\\') {
                return Err(Error::invalid_settings(format!(
                    "profile name '{profile}' must not contain path separators"
                )));
            }
        }
        Ok(())
    }

    /// Whether the given extension id is deactivated
    pub fn is_deactivated(&self, extension_id: &str) -> bool {
        self.deactivated.iter().any(|id| id == extension_id)
    }
}

/// Split a colon-separated list, dropping empty segments
fn split_list(value: &str) -> Vec<String> {
    value
        .split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = DeploymentSettings::default();
        assert!(settings.profiles.is_empty());
        assert_eq!(
            settings.config_dirs,
            vec![PathBuf::from("config"), PathBuf::from(".")]
        );
        assert!(settings.deactivated.is_empty());
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("brokkr.yaml");
        fs::write(
            &path,
            r#"
profiles:
  - staging
config-dirs:
  - /etc/app
deactivated:
  - config-sources
"#,
        )
        .unwrap();

        let settings = DeploymentSettings::load(Some(&path)).unwrap();
        assert_eq!(settings.profiles, vec!["staging"]);
        assert_eq!(settings.config_dirs, vec![PathBuf::from("/etc/app")]);
        assert!(settings.is_deactivated("config-sources"));
    }

    #[test]
    #[serial]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.yaml");
        let settings = DeploymentSettings::load(Some(&path)).unwrap();
        assert_eq!(settings, DeploymentSettings::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var(PROFILES_ENV, "prod:eu");
        env::set_var(CONFIG_DIRS_ENV, "/srv/config:/etc/app");
        env::set_var(DEACTIVATED_ENV, "config-sources");

        let settings = DeploymentSettings::load(None).unwrap();
        assert_eq!(settings.profiles, vec!["prod", "eu"]);
        assert_eq!(
            settings.config_dirs,
            vec![PathBuf::from("/srv/config"), PathBuf::from("/etc/app")]
        );
        assert!(settings.is_deactivated("config-sources"));

        env::remove_var(PROFILES_ENV);
        env::remove_var(CONFIG_DIRS_ENV);
        env::remove_var(DEACTIVATED_ENV);
    }

    #[test]
    fn test_split_list_drops_empty_segments() {
        assert_eq!(split_list("a::b: "), vec!["a", "b"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    #[serial]
    fn test_profile_with_path_separator_is_rejected() {
        env::set_var(PROFILES_ENV, "../escape");
        let err = DeploymentSettings::load(None).unwrap_err();
        env::remove_var(PROFILES_ENV);
        assert!(matches!(err, crate::error::Error::InvalidSettings { .. }));
    }

    #[test]
    fn test_builder_overrides() {
        let settings = DeploymentSettings::default()
            .with_profiles(vec!["dev".to_string()])
            .with_deactivated(vec!["other".to_string()]);
        assert_eq!(settings.profiles, vec!["dev"]);
        assert!(settings.is_deactivated("other"));
        assert!(!settings.is_deactivated("config-sources"));
    }
}
