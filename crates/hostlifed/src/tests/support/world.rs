//! BDD test world: owns the loader, reporter, recording collaborators, and
//! the bootstrapped host for step functions.

use std::cell::RefCell;
use std::sync::Arc;

use hostlife_config::ExpirePriority;

use crate::bootstrap::{BootstrapError, ConfigLoader, Host, bootstrap_with};
use crate::context::ConfigurationSnapshot;
use crate::lifecycle::{ActivityStatus, LifecycleController, LifecycleError, LifecyclePhase};

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::initializer::RecordingInitializer;
use super::recorder::Recorder;
use super::reporter::RecordingHealthReporter;

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    pub recorder: Recorder,
    pub initializer: RecordingInitializer,
    host: Option<Host>,
    bootstrap_error: Option<BootstrapError>,
    last_result: Option<Result<(), LifecycleError>>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            recorder: Recorder::default(),
            initializer: RecordingInitializer::default(),
            host: None,
            bootstrap_error: None,
            last_result: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.reset_results();
    }

    /// Installs a loader with the given expiry priority.
    pub fn use_expire_priority(&mut self, priority: ExpirePriority) {
        self.loader = Box::new(TestConfigLoader::with_expire_priority(priority));
        self.reset_results();
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.host.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        match bootstrap_with(
            &*self.loader,
            self.reporter.clone(),
            &self.initializer,
            self.recorder.collaborators(),
        ) {
            Ok(host) => self.host = Some(host),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Returns the bootstrap error, if any.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns the host, if bootstrap succeeded.
    #[must_use]
    pub fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Controller of the bootstrapped host, bootstrapping on first use.
    pub fn controller(&mut self) -> Result<&mut LifecycleController, String> {
        self.bootstrap();
        match self.host.as_mut() {
            Some(host) => Ok(host.controller_mut()),
            None => Err(format!(
                "host failed to bootstrap: {:?}",
                self.bootstrap_error
            )),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&mut self) -> Result<LifecyclePhase, String> {
        Ok(self.controller()?.phase())
    }

    /// Delivers a pause notification.
    pub fn pause(&mut self, activity: ActivityStatus) -> Result<(), String> {
        let result = self.controller()?.on_pause(activity);
        self.last_result = Some(result);
        Ok(())
    }

    /// Delivers a resume notification.
    pub fn resume(&mut self) -> Result<(), String> {
        let result = self.controller()?.on_resume(ActivityStatus::default());
        self.last_result = Some(result);
        Ok(())
    }

    /// Delivers a configuration change.
    pub fn change_configuration(&mut self, config: ConfigurationSnapshot) -> Result<(), String> {
        let result = self.controller()?.on_configuration_changed(config);
        self.last_result = Some(result);
        Ok(())
    }

    /// Result of the most recent lifecycle entry point.
    #[must_use]
    pub fn last_result(&self) -> Option<&Result<(), LifecycleError>> {
        self.last_result.as_ref()
    }

    fn reset_results(&mut self) {
        self.host = None;
        self.bootstrap_error = None;
        self.last_result = None;
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
