//! Configuration source contracts
//!
//! Two traits live here:
//! - `ConfigSource` is the resolver-facing contract: an installed source
//!   answers key lookups and carries an ordinal that decides precedence.
//! - `PropertyConfigSource` is the user-facing capability: a registration
//!   that names the property file its configuration should be read from.

use std::collections::BTreeMap;

/// Default ordinal for sources that do not specify one
pub const DEFAULT_ORDINAL: i32 = 100;

/// A concrete configuration source installed in the resolver.
///
/// Sources are owned by the resolver once installed. Higher ordinals take
/// precedence during lookup; among equal ordinals the source installed
/// later wins.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Human-readable name of this source, used in logs
    fn name(&self) -> &str;

    /// Precedence of this source (higher wins)
    fn ordinal(&self) -> i32;

    /// Look up a single property value
    fn get(&self, key: &str) -> Option<String>;

    /// All properties held by this source
    fn properties(&self) -> &BTreeMap<String, String>;
}

/// The capability a user registration provides: name the property file
/// backing it.
///
/// Instances are produced by user-supplied factories during materialisation
/// and discarded immediately after the file name has been read.
pub trait PropertyConfigSource {
    /// Name of the property file to read, e.g. `myapp.properties`
    fn property_file_name(&self) -> String;
}

/// In-memory configuration source backed by a plain map
#[derive(Debug, Clone)]
pub struct MapConfigSource {
    name: String,
    ordinal: i32,
    properties: BTreeMap<String, String>,
}

impl MapConfigSource {
    /// Create a new in-memory source
    pub fn new(
        name: impl Into<String>,
        ordinal: i32,
        properties: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            ordinal,
            properties,
        }
    }

    /// Create an empty source with the default ordinal
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_ORDINAL, BTreeMap::new())
    }
}

impl ConfigSource for MapConfigSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_lookup() {
        let mut props = BTreeMap::new();
        props.insert("db.host".to_string(), "localhost".to_string());
        let source = MapConfigSource::new("test", 120, props);

        assert_eq!(source.name(), "test");
        assert_eq!(source.ordinal(), 120);
        assert_eq!(source.get("db.host"), Some("localhost".to_string()));
        assert_eq!(source.get("missing"), None);
    }

    #[test]
    fn test_empty_source_uses_default_ordinal() {
        let source = MapConfigSource::empty("empty");
        assert_eq!(source.ordinal(), DEFAULT_ORDINAL);
        assert!(source.properties().is_empty());
    }
}
