//! Foreground/background state machine of the host process.
//!
//! The [`LifecycleController`] receives pause, resume, and configuration
//! change notifications from the host, serially on one owner thread, and
//! drives the collaborators in a fixed order:
//!
//! * **pause**: publish the background phase, suspend the engine and schedule
//!   history expiry when the pausing UI allows it, then stop every monitor.
//! * **resume**: wake the engine if it was suspended, start every monitor,
//!   then publish the foreground phase.
//! * **configuration change**: in the foreground, run the locale corrector;
//!   always finish with the default propagation to [`Resources`].
//!
//! Locale correction is skipped while backgrounded. Correcting the locale
//! itself raises configuration changes, and doing so in the background only
//! risks a feedback loop. Changes missed this way are not replayed on resume.

mod handle;
mod state;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use hostlife_config::ExpirePriority;

use crate::context::{ConfigurationSnapshot, HostContext, Resources};
use crate::engine::EngineSignal;
use crate::locale::{LocaleCorrector, LocaleError};
use crate::maintenance::{BackgroundTaskRunner, HistoryStore, history_expiry_task};
use crate::monitors::{MonitorError, MonitorSet};

pub use handle::LifecycleHandle;
pub use state::{ActivityStatus, EngineState, LifecyclePhase, PausePlan, ResumePlan};

const LIFECYCLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lifecycle");

/// Errors escaping a lifecycle entry point.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A monitor failed to start or stop.
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    /// The locale corrector failed for a reason other than a missing context.
    #[error(transparent)]
    Locale(LocaleError),
}

/// External services the controller drives but does not own the behaviour of.
pub struct Collaborators {
    /// Receives backgrounding and foregrounding notifications.
    pub engine: Box<dyn EngineSignal>,
    /// Connectivity, power, and network monitors.
    pub monitors: MonitorSet,
    /// Runs the deferred history expiry.
    pub tasks: Box<dyn BackgroundTaskRunner>,
    /// Store whose history is expired on backgrounding.
    pub history: Arc<dyn HistoryStore>,
    /// Reconciles the rendering locale on configuration changes.
    pub locale: Box<dyn LocaleCorrector>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Collaborators")
            .field("monitors", &self.monitors)
            .finish_non_exhaustive()
    }
}

/// Lifecycle state machine for the host process.
#[derive(Debug)]
pub struct LifecycleController {
    phase: LifecyclePhase,
    context: Arc<HostContext>,
    resources: Resources,
    expire_priority: ExpirePriority,
    collaborators: Collaborators,
    handle: LifecycleHandle,
}

impl LifecycleController {
    /// Builds a controller in the foreground with an active engine.
    #[must_use]
    pub fn new(
        context: HostContext,
        expire_priority: ExpirePriority,
        collaborators: Collaborators,
    ) -> Self {
        let context = Arc::new(context);
        let handle = LifecycleHandle::new(Arc::clone(&context));
        Self {
            phase: LifecyclePhase::Foreground,
            context,
            resources: Resources::default(),
            expire_priority,
            collaborators,
            handle,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Returns `true` while the host is backgrounded.
    #[must_use]
    pub fn is_backgrounded(&self) -> bool {
        self.phase.is_background()
    }

    /// Context handed to collaborators.
    #[must_use]
    pub fn context(&self) -> &HostContext {
        &self.context
    }

    /// Resource state after the most recent configuration change.
    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Cloneable handle exposing the background query and the theme.
    #[must_use]
    pub fn handle(&self) -> LifecycleHandle {
        self.handle.clone()
    }

    /// Handles the host UI being paused.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Monitor`] when a monitor fails to stop. The
    /// phase is already background at that point.
    pub fn on_pause(&mut self, activity: ActivityStatus) -> Result<(), LifecycleError> {
        let from = self.phase;
        let plan = from.pause(activity);
        self.set_phase(plan.entered);

        if plan.suspend_engine {
            self.collaborators.engine.notify_backgrounding();
            self.collaborators.tasks.submit(history_expiry_task(
                Arc::clone(&self.collaborators.history),
                self.expire_priority,
            ));
            tracing::info!(
                target: LIFECYCLE_TARGET,
                priority = %self.expire_priority,
                "engine suspended; history expiry scheduled"
            );
        }
        self.set_phase(plan.settled);

        self.collaborators.monitors.stop_all()?;

        tracing::debug!(
            target: LIFECYCLE_TARGET,
            from = %from,
            to = %self.phase,
            finishing = activity.is_finishing,
            owns_engine_ui = activity.owns_engine_ui,
            "paused"
        );
        Ok(())
    }

    /// Handles the host UI being resumed. The activity status is accepted for
    /// symmetry with [`on_pause`](Self::on_pause) and does not influence the
    /// transition.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Monitor`] when a monitor fails to start. The
    /// phase stays background in that case.
    pub fn on_resume(&mut self, activity: ActivityStatus) -> Result<(), LifecycleError> {
        let from = self.phase;
        let plan = from.resume();

        if plan.resume_engine {
            self.collaborators.engine.notify_foregrounding();
            tracing::info!(target: LIFECYCLE_TARGET, "engine resumed");
        }
        self.set_phase(plan.engine_restored);

        self.collaborators.monitors.start_all(&self.context)?;
        self.set_phase(plan.settled);

        tracing::debug!(
            target: LIFECYCLE_TARGET,
            from = %from,
            to = %self.phase,
            finishing = activity.is_finishing,
            owns_engine_ui = activity.owns_engine_ui,
            "resumed"
        );
        Ok(())
    }

    /// Handles a system configuration change.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Locale`] when the corrector fails for any
    /// reason other than [`LocaleError::UninitializedContext`]. The
    /// configuration has been propagated to the resources even then.
    pub fn on_configuration_changed(
        &mut self,
        config: ConfigurationSnapshot,
    ) -> Result<(), LifecycleError> {
        tracing::debug!(
            target: LIFECYCLE_TARGET,
            locale = config.locale().unwrap_or("unset"),
            background = self.phase.is_background(),
            "configuration changed"
        );

        if self.phase.is_background() {
            self.resources.apply_configuration(config);
            return Ok(());
        }

        let outcome = match self
            .collaborators
            .locale
            .correct(&self.context, &mut self.resources, &config)
        {
            Err(error) if error.is_uninitialized_context() => {
                tracing::warn!(
                    target: LIFECYCLE_TARGET,
                    error = %error,
                    "could not correct locale"
                );
                Ok(())
            }
            other => other.map_err(LifecycleError::Locale),
        };

        self.resources.apply_configuration(config);
        outcome
    }

    fn set_phase(&mut self, phase: LifecyclePhase) {
        self.phase = phase;
        self.handle.publish_background(phase.is_background());
    }
}
