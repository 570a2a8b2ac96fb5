//! The config-source deployment extension
//!
//! Drives a four-phase lifecycle fed by the host container:
//!
//! ```text
//! [unscanned] --(pre-scan)-->        [gated]
//! [gated]     --(per-type)-->        [gated]      (repeatable)
//! [gated]     --(post-validation)--> [registered]
//! [registered]--(pre-shutdown)-->    [released]
//! ```
//!
//! Pre-scan evaluates the activation policy once; when the extension is
//! deactivated the middle transitions are accepted but perform nothing.
//! Post-validation materialises every collected candidate and installs the
//! resulting sources into the resolver in a single batch. Pre-shutdown
//! releases the resolver's sources unconditionally. Events arriving in the
//! wrong phase are lifecycle violations, not silent no-ops.

use crate::activation::ActivationPolicy;
use crate::candidate::{SourceCandidate, TypeKind};
use brokkr_core::{ConfigResolver, ConfigSource, Error, Result, VariantExpander};
use std::sync::Arc;
use tracing::{debug, info};

/// Identity under which the activation policy is consulted
pub const EXTENSION_ID: &str = "config-sources";

/// Phase of the extension lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Created, no event seen yet
    Unscanned,
    /// Activation decided, collecting candidates
    Gated,
    /// Materialisation finished, sources installed
    Registered,
    /// Shutdown seen, sources released
    Released,
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LifecyclePhase::Unscanned => "unscanned",
            LifecyclePhase::Gated => "gated",
            LifecyclePhase::Registered => "registered",
            LifecyclePhase::Released => "released",
        };
        write!(f, "{label}")
    }
}

/// Deployment extension that collects user config-source registrations and
/// installs their materialised sources into the shared resolver
pub struct ConfigSourceExtension {
    resolver: Arc<ConfigResolver>,
    expander: Box<dyn VariantExpander>,
    phase: LifecyclePhase,
    activated: bool,
    candidates: Vec<SourceCandidate>,
}

impl ConfigSourceExtension {
    /// Create an extension bound to a resolver and an expander
    pub fn new(resolver: Arc<ConfigResolver>, expander: Box<dyn VariantExpander>) -> Self {
        Self {
            resolver,
            expander,
            phase: LifecyclePhase::Unscanned,
            activated: false,
            candidates: Vec::new(),
        }
    }

    /// Pre-scan handler: evaluate the activation policy once.
    ///
    /// Legal only in the unscanned phase. A policy failure propagates and
    /// leaves the extension unscanned.
    pub fn before_scan(&mut self, policy: &dyn ActivationPolicy) -> Result<()> {
        self.expect_phase(LifecyclePhase::Unscanned, "pre-scan")?;

        self.activated = policy.is_activated(EXTENSION_ID)?;
        self.phase = LifecyclePhase::Gated;
        debug!(
            "Extension '{}' gated (activated: {})",
            EXTENSION_ID, self.activated
        );
        Ok(())
    }

    /// Per-type handler: admit one announced registration.
    ///
    /// Legal only in the gated phase, repeatable. Performs nothing when the
    /// extension is deactivated. Only concrete classes are admissible:
    /// annotations, interfaces, synthetics, arrays and enums cannot be
    /// instantiated with a zero-argument factory and are rejected. The
    /// filter is a structural check only; a class whose factory fails is
    /// still admitted here and fails during materialisation.
    pub fn process_type(&mut self, candidate: SourceCandidate) -> Result<()> {
        self.expect_phase(LifecyclePhase::Gated, "per-type")?;

        if !self.activated {
            return Ok(());
        }

        if candidate.descriptor.kind != TypeKind::Class {
            debug!(
                "Rejecting config source candidate '{}': {} types are not instantiable",
                candidate.descriptor.name, candidate.descriptor.kind
            );
            return Ok(());
        }

        debug!(
            "Collected config source candidate '{}'",
            candidate.descriptor.name
        );
        self.candidates.push(candidate);
        Ok(())
    }

    /// Post-validation handler: materialise every candidate and install the
    /// accumulated sources in one batch.
    ///
    /// Legal only in the gated phase. When deactivated the resolver is not
    /// touched at all; when activated exactly one `add_config_sources` call
    /// is made, even for an empty candidate list. Any failure aborts the
    /// whole materialisation with nothing installed.
    pub fn after_validation(&mut self) -> Result<()> {
        self.expect_phase(LifecyclePhase::Gated, "post-validation")?;

        if !self.activated {
            self.candidates.clear();
            self.phase = LifecyclePhase::Registered;
            return Ok(());
        }

        let mut sources: Vec<Box<dyn ConfigSource>> = Vec::new();
        for candidate in self.candidates.drain(..) {
            let name = candidate.descriptor.name;
            let instance = (candidate.factory)()
                .map_err(|e| Error::source_instantiation(&name, e.to_string()))?;

            let file_name = instance.property_file_name();
            debug!(
                "Materialising config source '{}' from '{}'",
                name, file_name
            );
            sources.extend(self.expander.expand(&file_name)?);
        }

        info!(
            "Registering {} config source(s) from user registrations",
            sources.len()
        );
        self.resolver.add_config_sources(sources);
        self.phase = LifecyclePhase::Registered;
        Ok(())
    }

    /// Pre-shutdown handler: release the resolver's sources.
    ///
    /// Runs unconditionally, even when the extension was deactivated or
    /// never saw post-validation: the resolver is a shared registry and
    /// this extension owns the shutdown hook for it. Legal from any phase
    /// except released; a second shutdown is a lifecycle violation.
    pub fn before_shutdown(&mut self) -> Result<()> {
        if self.phase == LifecyclePhase::Released {
            return Err(Error::lifecycle("pre-shutdown", self.phase.to_string()));
        }

        self.resolver.free_config_sources();
        self.phase = LifecyclePhase::Released;
        debug!("Extension '{}' released config sources", EXTENSION_ID);
        Ok(())
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Whether the activation gate passed (meaningful after pre-scan)
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Number of candidates collected so far
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    fn expect_phase(&self, expected: LifecyclePhase, event: &str) -> Result<()> {
        if self.phase != expected {
            return Err(Error::lifecycle(event, self.phase.to_string()));
        }
        Ok(())
    }
}
