//! Health events emitted while the host bootstraps.
//!
//! Bootstrap events bracket the whole sequence. Stage events carry the
//! stage's position in [`StartupStage::ORDER`] so an operator reading a
//! failure can tell how far process creation got.

use std::sync::Arc;
use std::time::Duration;

use hostlife_config::Config;

use crate::bootstrap::BootstrapError;
use crate::startup::{StartupError, StartupStage};

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer notified as bootstrap progresses.
pub trait HealthReporter: Send + Sync {
    /// Bootstrap is about to load the configuration.
    fn bootstrap_starting(&self);

    /// Bootstrap finished; the controller exists.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Bootstrap stopped with `error`.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// `stage` is about to run.
    fn stage_starting(&self, stage: StartupStage);

    /// `stage` completed after `elapsed`.
    fn stage_ready(&self, stage: StartupStage, elapsed: Duration);

    /// A stage failed; later stages will not run.
    fn stage_failed(&self, error: &StartupError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter + ?Sized,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn stage_starting(&self, stage: StartupStage) {
        (**self).stage_starting(stage);
    }

    fn stage_ready(&self, stage: StartupStage, elapsed: Duration) {
        (**self).stage_ready(stage, elapsed);
    }

    fn stage_failed(&self, error: &StartupError) {
        (**self).stage_failed(error);
    }
}

/// Reporter that turns health events into `tracing` events under the
/// `hostlifed::health` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            stages = StartupStage::ORDER.len(),
            "starting host bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            application_id = %config.application_id(),
            expire_priority = %config.expire_priority(),
            preferred_locale = config.preferred_locale().unwrap_or("system"),
            "host ready in the foreground"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "host bootstrap failed"
        );
    }

    fn stage_starting(&self, stage: StartupStage) {
        tracing::debug!(
            target: HEALTH_TARGET,
            event = "stage_starting",
            stage = %stage,
            position = stage.position(),
            of = StartupStage::ORDER.len(),
            "running startup stage"
        );
    }

    fn stage_ready(&self, stage: StartupStage, elapsed: Duration) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "stage_ready",
            stage = %stage,
            position = stage.position(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "startup stage ready"
        );
    }

    fn stage_failed(&self, error: &StartupError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "stage_failed",
            stage = %error.stage,
            position = error.stage.position(),
            skipped = StartupStage::ORDER.len() - error.stage.position(),
            message = %error.message(),
            "startup stage failed"
        );
    }
}
