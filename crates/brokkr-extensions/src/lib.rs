//! Extension handling for Brokkr
//!
//! This crate handles:
//! - Candidate collection during container type scan
//! - Activation policy evaluation
//! - Materialisation of user config sources after deployment validation
//! - Source release at container shutdown
//! - A deployment driver for embedders without a host container

pub mod activation;
pub mod candidate;
pub mod deployment;
pub mod extension;

pub use activation::{ActivationPolicy, AlwaysActivated, SettingsActivationPolicy};
pub use candidate::{SourceCandidate, SourceFactory, TypeDescriptor, TypeKind};
pub use deployment::DeploymentDriver;
pub use extension::{ConfigSourceExtension, LifecyclePhase, EXTENSION_ID};
