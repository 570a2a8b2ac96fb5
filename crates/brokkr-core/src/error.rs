//! Error types for brokkr-core

use thiserror::Error;

/// Result type alias using brokkr-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Brokkr
#[derive(Error, Debug)]
pub enum Error {
    /// A user-registered source factory could not produce an instance
    #[error("Cannot create user config source {type_name}: {message}")]
    SourceInstantiation { type_name: String, message: String },

    /// The activation policy evaluator failed
    #[error("Activation policy evaluation failed: {message}")]
    ActivationPolicy { message: String },

    /// A lifecycle event arrived in a phase where it is not legal
    #[error("Lifecycle violation: {event} received in phase {phase}")]
    Lifecycle { event: String, phase: String },

    /// Malformed `.properties` content
    #[error("Invalid properties file {path} (line {line}): {message}")]
    InvalidProperties {
        path: String,
        line: usize,
        message: String,
    },

    /// Invalid deployment settings
    #[error("Invalid deployment settings: {message}")]
    InvalidSettings { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a source instantiation error naming the offending registration
    pub fn source_instantiation(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceInstantiation {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create an activation policy error
    pub fn activation_policy(message: impl Into<String>) -> Self {
        Self::ActivationPolicy {
            message: message.into(),
        }
    }

    /// Create a lifecycle violation error
    pub fn lifecycle(event: impl Into<String>, phase: impl Into<String>) -> Self {
        Self::Lifecycle {
            event: event.into(),
            phase: phase.into(),
        }
    }

    /// Create an invalid properties error
    pub fn invalid_properties(
        path: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidProperties {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid settings error
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }
}
