//! # brokkr-core
//!
//! Core library for Brokkr providing:
//! - The `ConfigSource` contract and the user-facing `PropertyConfigSource` capability
//! - `.properties` file parsing
//! - The `ConfigResolver` registry shared across the deployment
//! - Deployment settings (profiles, search directories, deactivation switches)
//! - Environment-variant expansion of property files

pub mod error;
pub mod expander;
pub mod properties;
pub mod resolver;
pub mod settings;
pub mod source;

pub use error::{Error, Result};
pub use expander::{EnvironmentVariantExpander, VariantExpander};
pub use properties::PropertiesFileConfigSource;
pub use resolver::ConfigResolver;
pub use settings::DeploymentSettings;
pub use source::{ConfigSource, MapConfigSource, PropertyConfigSource};
