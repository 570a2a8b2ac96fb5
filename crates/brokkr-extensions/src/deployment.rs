//! Deployment driver
//!
//! Embedders with a real host container deliver the lifecycle events
//! themselves; this driver serves everyone else. It feeds the extension in
//! the order the container contract guarantees: pre-scan strictly before
//! any per-type event, all per-type events before post-validation, and
//! post-validation before pre-shutdown. Everything runs serially on the
//! calling thread.

use crate::activation::ActivationPolicy;
use crate::candidate::SourceCandidate;
use crate::extension::{ConfigSourceExtension, LifecyclePhase};
use anyhow::{Context, Result};
use brokkr_core::{ConfigResolver, VariantExpander};
use std::sync::Arc;
use tracing::info;

/// Drives the config-source extension through a full deployment
pub struct DeploymentDriver {
    extension: ConfigSourceExtension,
    policy: Box<dyn ActivationPolicy>,
}

impl DeploymentDriver {
    /// Create a driver wiring the extension to a resolver, expander and
    /// activation policy
    pub fn new(
        resolver: Arc<ConfigResolver>,
        expander: Box<dyn VariantExpander>,
        policy: Box<dyn ActivationPolicy>,
    ) -> Self {
        Self {
            extension: ConfigSourceExtension::new(resolver, expander),
            policy,
        }
    }

    /// Run the scan portion of the deployment: pre-scan, every per-type
    /// event, then post-validation.
    ///
    /// Any failure aborts the deployment with no sources installed.
    pub fn run_scan(
        &mut self,
        candidates: impl IntoIterator<Item = SourceCandidate>,
    ) -> Result<()> {
        self.extension
            .before_scan(self.policy.as_ref())
            .context("Activation gate failed")?;

        for candidate in candidates {
            let name = candidate.descriptor.name.clone();
            self.extension
                .process_type(candidate)
                .with_context(|| format!("Failed to process announced type '{name}'"))?;
        }

        self.extension
            .after_validation()
            .context("Config source registration failed")?;

        info!(
            "Deployment scan complete (activated: {})",
            self.extension.is_activated()
        );
        Ok(())
    }

    /// Deliver the pre-shutdown event
    pub fn shutdown(&mut self) -> Result<()> {
        self.extension
            .before_shutdown()
            .context("Config source release failed")
    }

    /// Current phase of the driven extension
    pub fn phase(&self) -> LifecyclePhase {
        self.extension.phase()
    }
}
