//! Host bootstrap orchestration.

use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;

use hostlife_config::Config;

use crate::context::HostContext;
use crate::health::HealthReporter;
use crate::lifecycle::{Collaborators, LifecycleController, LifecycleHandle};
use crate::startup::{ProcessInitializer, StartupError, on_process_create};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the host configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that returns a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// A process-create stage failed.
    #[error("failed to initialise the process: {source}")]
    Startup {
        /// Error reported by the failing stage.
        #[source]
        source: StartupError,
    },
}

/// Result of a successful bootstrap: the lifecycle context value for the
/// rest of the process.
#[derive(Debug)]
pub struct Host {
    config: Config,
    controller: LifecycleController,
    telemetry: TelemetryHandle,
}

impl Host {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The lifecycle controller of the process.
    #[must_use]
    pub fn controller(&self) -> &LifecycleController {
        &self.controller
    }

    /// Mutable access for the thread delivering host events.
    pub fn controller_mut(&mut self) -> &mut LifecycleController {
        &mut self.controller
    }

    /// Shareable view of the lifecycle state.
    #[must_use]
    pub fn handle(&self) -> LifecycleHandle {
        self.controller.handle()
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }
}

/// Bootstraps the host using the supplied collaborators.
///
/// Loads the configuration, installs telemetry, runs every process-create
/// stage in order, and finally builds the lifecycle controller in the
/// foreground with an active engine.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    initializer: &dyn ProcessInitializer,
    collaborators: Collaborators,
) -> Result<Host, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let context = HostContext::from_config(&config);
    if let Err(source) = on_process_create(initializer, &context, &*reporter) {
        let error = BootstrapError::Startup { source };
        reporter.bootstrap_failed(&error);
        return Err(error);
    }

    let controller = LifecycleController::new(context, config.expire_priority(), collaborators);
    reporter.bootstrap_succeeded(&config);

    Ok(Host {
        config,
        controller,
        telemetry,
    })
}
