//! Environment-variant expansion of property files
//!
//! A user registration names one logical property file. The expander fans
//! that name out into the concrete sources for the current deployment: the
//! base file plus one overlay per active profile
//! (`app.properties` -> `app-staging.properties`, ...). Profile overlays
//! carry a higher default ordinal than the base file so they override it;
//! either may still override its own ordinal via the in-file
//! `config_ordinal` key.

use crate::error::Result;
use crate::properties::PropertiesFileConfigSource;
use crate::settings::DeploymentSettings;
use crate::source::{ConfigSource, DEFAULT_ORDINAL};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default ordinal for profile overlay files (overrides the base file)
pub const PROFILE_VARIANT_ORDINAL: i32 = DEFAULT_ORDINAL + 10;

/// Expands one property-file name into its concrete config sources
pub trait VariantExpander {
    /// Produce the sources for `file_name`, in override order
    fn expand(&self, file_name: &str) -> Result<Vec<Box<dyn ConfigSource>>>;
}

/// Expander that derives per-profile variants of a property file and loads
/// whichever variants exist in the configured search directories
pub struct EnvironmentVariantExpander {
    /// Directories probed for each variant, in priority order
    config_dirs: Vec<PathBuf>,

    /// Active profiles, in override order
    profiles: Vec<String>,
}

impl EnvironmentVariantExpander {
    /// Create an expander from deployment settings
    pub fn new(settings: &DeploymentSettings) -> Self {
        Self {
            config_dirs: settings.config_dirs.clone(),
            profiles: settings.profiles.clone(),
        }
    }

    /// Derive the variant file name for a profile:
    /// `app.properties` -> `app-staging.properties`
    fn variant_name(file_name: &str, profile: &str) -> String {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}-{profile}.{ext}"),
            None => format!("{file_name}-{profile}"),
        }
    }

    /// Find the first existing file with this name across the search dirs
    fn locate(&self, file_name: &str) -> Option<PathBuf> {
        // Absolute names bypass the search path
        let direct = Path::new(file_name);
        if direct.is_absolute() {
            return direct.exists().then(|| direct.to_path_buf());
        }

        self.config_dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.exists())
    }

    /// Load one variant if present
    fn load_variant(
        &self,
        file_name: &str,
        default_ordinal: i32,
    ) -> Result<Option<Box<dyn ConfigSource>>> {
        match self.locate(file_name) {
            Some(path) => {
                debug!("Expanding config source variant {}", path.display());
                let source = PropertiesFileConfigSource::load(&path, default_ordinal)?;
                Ok(Some(Box::new(source)))
            }
            None => {
                debug!("No file found for config source variant '{}'", file_name);
                Ok(None)
            }
        }
    }
}

impl VariantExpander for EnvironmentVariantExpander {
    fn expand(&self, file_name: &str) -> Result<Vec<Box<dyn ConfigSource>>> {
        let mut sources = Vec::new();

        if let Some(base) = self.load_variant(file_name, DEFAULT_ORDINAL)? {
            sources.push(base);
        } else {
            warn!("Property file '{}' not found in any config dir", file_name);
        }

        for profile in &self.profiles {
            let name = Self::variant_name(file_name, profile);
            if let Some(variant) = self.load_variant(&name, PROFILE_VARIANT_ORDINAL)? {
                sources.push(variant);
            }
        }

        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    fn expander(dirs: Vec<PathBuf>, profiles: Vec<&str>) -> EnvironmentVariantExpander {
        let settings = DeploymentSettings::default()
            .with_config_dirs(dirs)
            .with_profiles(profiles.into_iter().map(String::from).collect());
        EnvironmentVariantExpander::new(&settings)
    }

    #[test]
    fn test_variant_name() {
        assert_eq!(
            EnvironmentVariantExpander::variant_name("app.properties", "prod"),
            "app-prod.properties"
        );
        assert_eq!(
            EnvironmentVariantExpander::variant_name("noext", "prod"),
            "noext-prod"
        );
    }

    #[test]
    fn test_expand_base_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("app.properties"), "k=base\n").unwrap();

        let exp = expander(vec![temp.path().to_path_buf()], vec![]);
        let sources = exp.expand("app.properties").unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].ordinal(), DEFAULT_ORDINAL);
        assert_eq!(sources[0].get("k"), Some("base".to_string()));
    }

    #[test]
    fn test_expand_with_profiles() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("app.properties"), "k=base\n").unwrap();
        fs::write(temp.path().join("app-staging.properties"), "k=staging\n").unwrap();
        fs::write(temp.path().join("app-eu.properties"), "region=eu\n").unwrap();

        let exp = expander(vec![temp.path().to_path_buf()], vec!["staging", "eu"]);
        let sources = exp.expand("app.properties").unwrap();

        assert_eq!(sources.len(), 3);
        // Base first, then profiles in settings order
        assert!(sources[0].name().ends_with("app.properties"));
        assert!(sources[1].name().ends_with("app-staging.properties"));
        assert!(sources[2].name().ends_with("app-eu.properties"));
        assert_eq!(sources[1].ordinal(), PROFILE_VARIANT_ORDINAL);
    }

    #[test]
    fn test_expand_missing_base_still_loads_profiles() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("app-prod.properties"), "k=prod\n").unwrap();

        let exp = expander(vec![temp.path().to_path_buf()], vec!["prod"]);
        let sources = exp.expand("app.properties").unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].name().ends_with("app-prod.properties"));
    }

    #[test]
    fn test_expand_nothing_found_is_empty() {
        let temp = TempDir::new().unwrap();
        let exp = expander(vec![temp.path().to_path_buf()], vec!["prod"]);
        let sources = exp.expand("ghost.properties").unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_search_dir_precedence() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("app.properties"), "k=first\n").unwrap();
        fs::write(second.path().join("app.properties"), "k=second\n").unwrap();

        let exp = expander(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            vec![],
        );
        let sources = exp.expand("app.properties").unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].get("k"), Some("first".to_string()));
    }

    #[test]
    fn test_parse_failure_propagates() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("app.properties"), "broken-line\n").unwrap();

        let exp = expander(vec![temp.path().to_path_buf()], vec![]);
        let err = exp.expand("app.properties").unwrap_err();
        assert!(matches!(err, Error::InvalidProperties { .. }));
    }
}
