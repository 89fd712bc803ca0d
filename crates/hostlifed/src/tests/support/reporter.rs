//! Health reporter double that keeps the bootstrap event sequence.

use std::sync::Mutex;
use std::time::Duration;

use hostlife_config::Config;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::startup::{StartupError, StartupStage};

/// One observed health notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    StageStarting(StartupStage),
    StageReady(StartupStage),
    StageFailed {
        stage: StartupStage,
        message: String,
    },
}

#[derive(Debug, Default)]
struct Observed {
    events: Vec<HealthEvent>,
    elapsed: Vec<(StartupStage, Duration)>,
}

/// Reporter that records notifications in arrival order.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    observed: Mutex<Observed>,
}

impl RecordingHealthReporter {
    fn with_observed<R>(&self, read: impl FnOnce(&mut Observed) -> R) -> R {
        let mut observed = self.observed.lock().expect("health reporter mutex poisoned");
        read(&mut observed)
    }

    /// Every event so far.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.with_observed(|observed| observed.events.clone())
    }

    /// Stages reported ready, in order.
    #[must_use]
    pub fn completed_stages(&self) -> Vec<StartupStage> {
        self.with_observed(|observed| observed.elapsed.iter().map(|(stage, _)| *stage).collect())
    }

    /// The stage reported as failed, if any.
    #[must_use]
    pub fn failed_stage(&self) -> Option<StartupStage> {
        self.with_observed(|observed| {
            observed.events.iter().find_map(|event| match event {
                HealthEvent::StageFailed { stage, .. } => Some(*stage),
                _ => None,
            })
        })
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.with_observed(|observed| observed.events.push(HealthEvent::BootstrapStarting));
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.with_observed(|observed| observed.events.push(HealthEvent::BootstrapSucceeded));
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        let event = HealthEvent::BootstrapFailed(error.to_string());
        self.with_observed(|observed| observed.events.push(event));
    }

    fn stage_starting(&self, stage: StartupStage) {
        self.with_observed(|observed| observed.events.push(HealthEvent::StageStarting(stage)));
    }

    fn stage_ready(&self, stage: StartupStage, elapsed: Duration) {
        self.with_observed(|observed| {
            observed.events.push(HealthEvent::StageReady(stage));
            observed.elapsed.push((stage, elapsed));
        });
    }

    fn stage_failed(&self, error: &StartupError) {
        let event = HealthEvent::StageFailed {
            stage: error.stage,
            message: error.message().to_owned(),
        };
        self.with_observed(|observed| observed.events.push(event));
    }
}
