//! Test process initialiser: records stages and supports an injected failure.

use std::sync::{Arc, Mutex};

use crate::context::HostContext;
use crate::startup::{ProcessInitializer, StartupError, StartupStage};

/// Initialiser that records every stage it is asked to run.
#[derive(Clone, Default)]
pub struct RecordingInitializer {
    state: Arc<Mutex<InitializerState>>,
}

#[derive(Default)]
struct InitializerState {
    stages: Vec<StartupStage>,
    failure: Option<(StartupStage, String)>,
}

impl RecordingInitializer {
    /// Configures the initialiser to fail at `stage`.
    pub fn fail_on(&self, stage: StartupStage, message: impl Into<String>) {
        let mut state = self.state.lock().expect("initializer mutex poisoned");
        state.failure = Some((stage, message.into()));
    }

    /// Stages run so far, in order.
    #[must_use]
    pub fn stages(&self) -> Vec<StartupStage> {
        self.state
            .lock()
            .expect("initializer mutex poisoned")
            .stages
            .clone()
    }
}

impl ProcessInitializer for RecordingInitializer {
    fn initialize(&self, stage: StartupStage, context: &HostContext) -> Result<(), StartupError> {
        let failure = {
            let mut state = self.state.lock().expect("initializer mutex poisoned");
            state.stages.push(stage);
            state.failure.clone()
        };
        match failure {
            Some((failing, message)) if failing == stage => {
                Err(StartupError::new(stage, message))
            }
            _ => {
                // Touch the context to ensure it was built from the configuration.
                let _ = context.application_id();
                Ok(())
            }
        }
    }
}
