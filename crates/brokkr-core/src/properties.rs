//! `.properties` file parsing
//!
//! Supports the common subset of the properties format:
//! - `key=value` and `key: value` separators
//! - `#` and `!` comment lines
//! - blank lines
//! - trailing-backslash line continuations
//!
//! A source loaded from a file may override its own ordinal via the
//! reserved `config_ordinal` key; the key is consumed during loading and
//! never surfaced as a property.

use crate::error::{Error, Result};
use crate::source::{ConfigSource, DEFAULT_ORDINAL};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reserved key a property file can use to set its own ordinal
pub const ORDINAL_KEY: &str = "config_ordinal";

/// Parse properties from a string.
///
/// `origin` is only used in error messages.
pub fn parse_str(content: &str, origin: &str) -> Result<BTreeMap<String, String>> {
    let mut properties = BTreeMap::new();

    let mut pending = String::new();
    let mut logical_start = 0usize;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_start();

        if pending.is_empty() {
            logical_start = line_no;
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
        }

        if let Some(stripped) = strip_continuation(line) {
            pending.push_str(stripped);
            continue;
        }

        pending.push_str(line);
        let logical = std::mem::take(&mut pending);
        let (key, value) = split_pair(&logical, origin, logical_start)?;
        properties.insert(key, value);
    }

    // A dangling continuation means the file was truncated mid-entry
    if !pending.is_empty() {
        let (key, value) = split_pair(&pending, origin, logical_start)?;
        properties.insert(key, value);
    }

    Ok(properties)
}

/// Strip a trailing continuation backslash, if present and unescaped
fn strip_continuation(line: &str) -> Option<&str> {
    let stripped = line.strip_suffix('\\')?;
    // An even number of trailing backslashes means the last one is escaped
    let trailing = stripped.chars().rev().take_while(|c| *c == '\\').count();
    if trailing % 2 == 0 {
        Some(stripped)
    } else {
        None
    }
}

/// Split a logical line into key and value at the first `=` or `:`
fn split_pair(line: &str, origin: &str, line_no: usize) -> Result<(String, String)> {
    let sep = line
        .char_indices()
        .find(|(_, c)| *c == '=' || *c == ':')
        .map(|(i, _)| i)
        .ok_or_else(|| {
            Error::invalid_properties(origin, line_no, format!("missing separator in '{line}'"))
        })?;

    let key = line[..sep].trim();
    let value = line[sep + 1..].trim();

    if key.is_empty() {
        return Err(Error::invalid_properties(origin, line_no, "empty key"));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Load and parse a properties file from disk
pub fn load_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content, &path.display().to_string())
}

/// A configuration source backed by a single parsed properties file
pub struct PropertiesFileConfigSource {
    name: String,
    ordinal: i32,
    properties: BTreeMap<String, String>,
}

impl PropertiesFileConfigSource {
    /// Load a properties file as a config source.
    ///
    /// `default_ordinal` applies unless the file carries the reserved
    /// `config_ordinal` key.
    pub fn load(path: &Path, default_ordinal: i32) -> Result<Self> {
        let mut properties = load_file(path)?;

        let ordinal = match properties.remove(ORDINAL_KEY) {
            Some(raw) => raw.parse::<i32>().unwrap_or_else(|_| {
                warn!(
                    "Ignoring non-numeric {} '{}' in {}",
                    ORDINAL_KEY,
                    raw,
                    path.display()
                );
                default_ordinal
            }),
            None => default_ordinal,
        };

        debug!(
            "Loaded {} properties from {} (ordinal {})",
            properties.len(),
            path.display(),
            ordinal
        );

        Ok(Self {
            name: path.display().to_string(),
            ordinal,
            properties,
        })
    }

    /// Build a file source from already-parsed content (for embedders)
    pub fn from_properties(
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
}

impl ConfigSource for PropertiesFileConfigSource {
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

impl std::fmt::Debug for PropertiesFileConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertiesFileConfigSource")
            .field("name", &self.name)
            .field("ordinal", &self.ordinal)
            .field("properties", &self.properties.len())
            .finish()
    }
}
