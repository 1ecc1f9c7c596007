//! Build step orchestration.
//!
//! Translates the resolved options into a [`BuildInvocation`] and drives the
//! native build system through configure and build, unless the skip policy
//! is active.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::conf::SKIP_TEST;
use crate::invocation::BuildInvocation;
use crate::options::OptionSet;
use crate::ports::{BuildSystemError, BuildSystemPort};
use crate::recipe::Recipe;
use crate::settings::Settings;

/// Record of a completed build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub reference: String,
    pub settings: Settings,
    pub options: OptionSet,
    pub invocation: BuildInvocation,
    pub finished_at: DateTime<Utc>,
}

/// Successful outcome of [`BuildOrchestrator::build`].
///
/// Failures are returned as `Err(BuildSystemError)` exactly as the build
/// system reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Configure and build ran and succeeded.
    Built(BuildReport),
    /// The skip policy was active; the build system was not invoked.
    Skipped,
}

impl BuildOutcome {
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub const fn report(&self) -> Option<&BuildReport> {
        match self {
            Self::Built(report) => Some(report),
            Self::Skipped => None,
        }
    }
}

/// Sequences configure and build against a [`BuildSystemPort`].
///
/// Holds no state between calls.
pub struct BuildOrchestrator {
    recipe: Recipe,
    build_system: Arc<dyn BuildSystemPort>,
}

impl BuildOrchestrator {
    pub fn new(recipe: Recipe, build_system: Arc<dyn BuildSystemPort>) -> Self {
        Self {
            recipe,
            build_system,
        }
    }

    /// Run the build.
    ///
    /// With `skip_policy` set nothing is configured or compiled. Otherwise
    /// the coverage and examples options are forwarded verbatim, then
    /// configure and build run once each with no retries.
    pub fn build(
        &self,
        settings: &Settings,
        options: &OptionSet,
        skip_policy: bool,
    ) -> Result<BuildOutcome, BuildSystemError> {
        if skip_policy {
            info!(conf = SKIP_TEST, "Skipping configure and build");
            return Ok(BuildOutcome::Skipped);
        }

        let invocation = BuildInvocation::from_options(options);
        info!(
            reference = %self.recipe.reference(),
            %settings,
            coverage = invocation.coverage(),
            examples = invocation.examples(),
            "Configuring"
        );
        self.build_system.configure(settings, &invocation)?;

        info!("Building");
        self.build_system.build()?;

        Ok(BuildOutcome::Built(BuildReport {
            reference: self.recipe.reference(),
            settings: settings.clone(),
            options: options.clone(),
            invocation,
            finished_at: Utc::now(),
        }))
    }
}
