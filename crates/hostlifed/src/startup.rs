//! One-time process initialisation run before the controller exists.

use std::fmt;
use std::time::Instant;

use thiserror::Error;

use crate::context::HostContext;
use crate::health::HealthReporter;

/// Initialisation stages, listed in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartupStage {
    /// Probes hardware capabilities such as screen class and CPU features.
    HardwareProbe,
    /// Binds the system clipboard.
    Clipboard,
    /// Registers the file picker.
    FilePicker,
    /// Loads the embedded engine's native libraries.
    EngineLoader,
    /// Prepares the home panel manager.
    HomePanels,
    /// Warms up the notification subsystem.
    Notifications,
}

impl StartupStage {
    /// Every stage in execution order.
    pub const ORDER: [Self; 6] = [
        Self::HardwareProbe,
        Self::Clipboard,
        Self::FilePicker,
        Self::EngineLoader,
        Self::HomePanels,
        Self::Notifications,
    ];

    /// One-based position of the stage in [`ORDER`](Self::ORDER).
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for StartupStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HardwareProbe => "hardware_probe",
            Self::Clipboard => "clipboard",
            Self::FilePicker => "file_picker",
            Self::EngineLoader => "engine_loader",
            Self::HomePanels => "home_panels",
            Self::Notifications => "notifications",
        };
        formatter.write_str(label)
    }
}

/// Errors surfaced when a startup stage fails.
#[derive(Debug, Error)]
#[error("startup stage {stage} failed: {message}")]
pub struct StartupError {
    /// Stage that failed.
    pub stage: StartupStage,
    message: String,
    /// Optional source error reported by the initialiser.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StartupError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(stage: StartupStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        stage: StartupStage,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            stage,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-readable message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Trait implemented by types capable of running a startup stage.
pub trait ProcessInitializer {
    /// Runs the given stage against the host context.
    fn initialize(&self, stage: StartupStage, context: &HostContext) -> Result<(), StartupError>;
}

/// Runs every startup stage in order, stopping at the first failure.
pub fn on_process_create(
    initializer: &dyn ProcessInitializer,
    context: &HostContext,
    reporter: &dyn HealthReporter,
) -> Result<(), StartupError> {
    for stage in StartupStage::ORDER {
        reporter.stage_starting(stage);
        let started = Instant::now();
        if let Err(error) = initializer.initialize(stage, context) {
            reporter.stage_failed(&error);
            return Err(error);
        }
        reporter.stage_ready(stage, started.elapsed());
    }
    Ok(())
}
