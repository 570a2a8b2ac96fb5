//! Extension activation policy
//!
//! The policy is consulted exactly once per extension, at pre-scan time.
//! Every later handler observes the stored decision, so a site-wide
//! deactivation switch behaves consistently across the whole deployment.

use brokkr_core::{DeploymentSettings, Result};
use tracing::info;

/// Decides whether an extension participates in deployment
pub trait ActivationPolicy {
    /// Evaluate activation for the given extension id.
    ///
    /// A failure here is fatal: the extension must not run in an undefined
    /// state.
    fn is_activated(&self, extension_id: &str) -> Result<bool>;
}

/// Policy driven by the deployment settings' deactivation list
pub struct SettingsActivationPolicy {
    settings: DeploymentSettings,
}

impl SettingsActivationPolicy {
    /// Create a policy backed by the given settings
    pub fn new(settings: DeploymentSettings) -> Self {
        Self { settings }
    }
}

impl ActivationPolicy for SettingsActivationPolicy {
    fn is_activated(&self, extension_id: &str) -> Result<bool> {
        let activated = !self.settings.is_deactivated(extension_id);
        if !activated {
            info!("Extension '{}' is deactivated by settings", extension_id);
        }
        Ok(activated)
    }
}

/// Policy that activates every extension; useful for embedders and tests
pub struct AlwaysActivated;

impl ActivationPolicy for AlwaysActivated {
    fn is_activated(&self, _extension_id: &str) -> Result<bool> {
        Ok(true)
    }
}
