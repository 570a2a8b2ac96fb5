//! Shared configuration resolver registry
//!
//! The resolver owns every installed config source for the lifetime of the
//! deployment. Contributors install sources in batches via
//! `add_config_sources` and the composition root decides how widely the
//! resolver is shared (typically behind an `Arc`). Lookup precedence:
//! higher ordinal wins; among equal ordinals the source installed later
//! wins, so later contributions override earlier ones.

use crate::source::ConfigSource;
use std::sync::RwLock;
use tracing::{debug, info};

/// Process-wide registry of configuration sources
pub struct ConfigResolver {
    /// Installed sources in installation order
    sources: RwLock<Vec<Box<dyn ConfigSource>>>,
}

impl ConfigResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self {
            sources: RwLock::new(Vec::new()),
        }
    }

    /// Install a batch of sources.
    ///
    /// The whole batch becomes visible at once; ownership transfers to the
    /// resolver. An empty batch is legal and records nothing.
    pub fn add_config_sources(&self, sources: Vec<Box<dyn ConfigSource>>) {
        let mut installed = self.sources.write().expect("resolver lock poisoned");
        info!("Installing {} config source(s)", sources.len());
        for source in &sources {
            debug!(
                "Installing config source '{}' (ordinal {})",
                source.name(),
                source.ordinal()
            );
        }
        installed.extend(sources);
    }

    /// Release every installed source
    pub fn free_config_sources(&self) {
        let mut installed = self.sources.write().expect("resolver lock poisoned");
        if !installed.is_empty() {
            info!("Releasing {} config source(s)", installed.len());
        }
        installed.clear();
    }

    /// Resolve a property value.
    ///
    /// Sources are consulted by descending ordinal; among equal ordinals
    /// the most recently installed source is consulted first.
    pub fn get_property_value(&self, key: &str) -> Option<String> {
        let installed = self.sources.read().expect("resolver lock poisoned");

        let mut best: Option<(i32, usize, String)> = None;
        for (index, source) in installed.iter().enumerate() {
            if let Some(value) = source.get(key) {
                let candidate = (source.ordinal(), index, value);
                match &best {
                    Some((ordinal, position, _))
                        if (*ordinal, *position) >= (candidate.0, candidate.1) => {}
                    _ => best = Some(candidate),
                }
            }
        }

        best.map(|(_, _, value)| value)
    }

    /// Number of installed sources
    pub fn source_count(&self) -> usize {
        self.sources.read().expect("resolver lock poisoned").len()
    }

    /// Names of installed sources, in installation order
    pub fn source_names(&self) -> Vec<String> {
        self.sources
            .read()
            .expect("resolver lock poisoned")
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MapConfigSource;
    use std::collections::BTreeMap;

    fn source(name: &str, ordinal: i32, key: &str, value: &str) -> Box<dyn ConfigSource> {
        let mut props = BTreeMap::new();
        props.insert(key.to_string(), value.to_string());
        Box::new(MapConfigSource::new(name, ordinal, props))
    }

    #[test]
    fn test_batch_install_and_count() {
        let resolver = ConfigResolver::new();
        resolver.add_config_sources(vec![
            source("a", 100, "k", "1"),
            source("b", 100, "k2", "2"),
        ]);
        assert_eq!(resolver.source_count(), 2);
        assert_eq!(resolver.source_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_higher_ordinal_wins() {
        let resolver = ConfigResolver::new();
        resolver.add_config_sources(vec![
            source("low", 100, "k", "base"),
            source("high", 200, "k", "override"),
        ]);
        assert_eq!(resolver.get_property_value("k"), Some("override".to_string()));
    }

    #[test]
    fn test_later_install_wins_among_equal_ordinals() {
        let resolver = ConfigResolver::new();
        resolver.add_config_sources(vec![source("first", 100, "k", "old")]);
        resolver.add_config_sources(vec![source("second", 100, "k", "new")]);
        assert_eq!(resolver.get_property_value("k"), Some("new".to_string()));
    }

    #[test]
    fn test_lookup_falls_through_missing_keys() {
        let resolver = ConfigResolver::new();
        resolver.add_config_sources(vec![
            source("a", 100, "only.in.a", "va"),
            source("b", 200, "only.in.b", "vb"),
        ]);
        assert_eq!(
            resolver.get_property_value("only.in.a"),
            Some("va".to_string())
        );
        assert_eq!(resolver.get_property_value("absent"), None);
    }

    #[test]
    fn test_free_config_sources() {
        let resolver = ConfigResolver::new();
        resolver.add_config_sources(vec![source("a", 100, "k", "v")]);
        resolver.free_config_sources();
        assert_eq!(resolver.source_count(), 0);
        assert_eq!(resolver.get_property_value("k"), None);
    }

    #[test]
    fn test_free_is_idempotent() {
        let resolver = ConfigResolver::new();
        resolver.free_config_sources();
        resolver.free_config_sources();
        assert_eq!(resolver.source_count(), 0);
    }

    #[test]
    fn test_empty_batch_is_legal() {
        let resolver = ConfigResolver::new();
        resolver.add_config_sources(Vec::new());
        assert_eq!(resolver.source_count(), 0);
    }
}
