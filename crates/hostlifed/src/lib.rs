//! Lifecycle controller for a host process embedding a rendering engine.
//!
//! The host is either in the foreground or in the background. Pause and
//! resume notifications from the host environment drive a small state machine
//! that notifies the embedded engine, schedules storage maintenance, and
//! starts or stops the connectivity, power, and network monitors. Locale
//! correction runs on configuration changes while the host is visible.
//!
//! Bootstrap happens once per process: configuration is loaded through
//! [`hostlife_config`], structured telemetry is installed, and every
//! [`StartupStage`] runs in order before the [`LifecycleController`] is built.
//! Health reporting hooks emit structured telemetry at each step so operators
//! can tell which stage failed.
//!
//! The `hostlifed` binary feeds newline-delimited JSON host events from
//! standard input into the controller; see [`HostEvent`].

mod bootstrap;
mod context;
mod engine;
mod events;
mod health;
mod lifecycle;
mod locale;
mod maintenance;
mod monitors;
mod placeholder;
mod process;
mod startup;
mod telemetry;
mod theme;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Host, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use context::{ConfigurationSnapshot, HostContext, Orientation, Resources};
pub use engine::{ChannelEngineSignal, EngineEvent, EngineSignal};
pub use events::{HostEvent, StreamSummary, dispatch, run_event_stream};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use lifecycle::{
    ActivityStatus, Collaborators, EngineState, LifecycleController, LifecycleError,
    LifecycleHandle, LifecyclePhase, PausePlan, ResumePlan,
};
pub use locale::{LocaleCorrector, LocaleError, PinnedLocaleCorrector};
pub use maintenance::{
    BackgroundTaskRunner, HistoryStore, MaintenanceError, Task, WorkerTaskRunner,
    history_expiry_task,
};
pub use monitors::{MonitorError, MonitorKind, MonitorService, MonitorSet};
pub use process::{LaunchError, run_host};
pub use startup::{ProcessInitializer, StartupError, StartupStage, on_process_create};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use theme::{Palette, Theme};
