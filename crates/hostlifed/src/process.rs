//! Host process driver: wires the collaborators, bootstraps, and consumes the
//! host event stream until end of input.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ortho_config::OrthoError;
use thiserror::Error;

use hostlife_config::Config;

use crate::bootstrap::{BootstrapError, ConfigLoader, StaticConfigLoader, bootstrap_with};
use crate::context::HostContext;
use crate::engine::{ChannelEngineSignal, EngineEvent};
use crate::events::{StreamSummary, run_event_stream};
use crate::health::HealthReporter;
use crate::lifecycle::Collaborators;
use crate::locale::PinnedLocaleCorrector;
use crate::maintenance::WorkerTaskRunner;
use crate::monitors::{MonitorKind, MonitorSet};
use crate::placeholder::{LoggingMonitor, NoopHistoryStore, NoopProcessInitializer};
use crate::{StructuredHealthReporter, SystemConfigLoader};

const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");
const ENGINE_THREAD: &str = "hostlife-engine";
const MAINTENANCE_THREAD: &str = "hostlife-maintenance";

/// Errors surfaced while launching or running the host process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Config {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// A supporting thread could not be spawned.
    #[error("failed to spawn thread '{name}': {source}")]
    Thread {
        /// Name of the thread.
        name: &'static str,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Bootstrap failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    /// Reading the host event stream failed.
    #[error("failed to read host events: {source}")]
    Input {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Runs the host against `input` using the system configuration sources.
///
/// # Errors
///
/// Returns a [`LaunchError`] when configuration, bootstrap, or reading the
/// event stream fails. Malformed events and failing transitions are logged
/// and do not end the run.
pub fn run_host<R: BufRead>(input: R) -> Result<StreamSummary, LaunchError> {
    run_host_with(
        &SystemConfigLoader,
        Arc::new(StructuredHealthReporter::new()),
        input,
    )
}

pub(crate) fn run_host_with<R: BufRead>(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    input: R,
) -> Result<StreamSummary, LaunchError> {
    let config = loader.load().map_err(|source| LaunchError::Config { source })?;

    let (engine, engine_events) = ChannelEngineSignal::channel();
    let engine_thread = thread::Builder::new()
        .name(ENGINE_THREAD.to_owned())
        .spawn(move || {
            for event in engine_events {
                log_engine_event(event);
            }
        })
        .map_err(|source| LaunchError::Thread {
            name: ENGINE_THREAD,
            source,
        })?;

    let tasks =
        WorkerTaskRunner::spawn(MAINTENANCE_THREAD).map_err(|source| LaunchError::Thread {
            name: MAINTENANCE_THREAD,
            source,
        })?;
    let corrector = Arc::new(PinnedLocaleCorrector::new(
        config.preferred_locale().map(str::to_owned),
    ));

    let summary = drive(&config, reporter, engine, tasks, &corrector, input);
    join_engine(engine_thread);
    summary
}

fn drive<R: BufRead>(
    config: &Config,
    reporter: Arc<dyn HealthReporter>,
    engine: ChannelEngineSignal,
    tasks: WorkerTaskRunner,
    corrector: &Arc<PinnedLocaleCorrector>,
    input: R,
) -> Result<StreamSummary, LaunchError> {
    let collaborators = Collaborators {
        engine: Box::new(engine),
        monitors: placeholder_monitors(),
        tasks: Box::new(tasks),
        history: Arc::new(NoopHistoryStore),
        locale: Box::new(Arc::clone(corrector)),
    };

    let loader = StaticConfigLoader::new(config.clone());
    let mut host = bootstrap_with(&loader, reporter, &NoopProcessInitializer, collaborators)?;
    let handle = host.handle();

    let mut on_ui_attached = |context: &HostContext| {
        corrector.attach(context.clone());
        let theme = handle.prepare_theme();
        tracing::info!(
            target: PROCESS_TARGET,
            application_id = theme.application_id(),
            "primary UI attached"
        );
    };
    let summary = run_event_stream(host.controller_mut(), input, &mut on_ui_attached)
        .map_err(|source| LaunchError::Input { source })?;

    tracing::info!(
        target: PROCESS_TARGET,
        dispatched = summary.dispatched,
        rejected = summary.rejected,
        failed = summary.failed,
        phase = %host.controller().phase(),
        "host event stream ended"
    );
    // Dropping the host closes the engine channel and drains the maintenance
    // worker.
    drop(host);
    Ok(summary)
}

fn placeholder_monitors() -> MonitorSet {
    let mut monitors = MonitorSet::default();
    for kind in MonitorKind::ALL {
        monitors.push(LoggingMonitor::new(kind));
    }
    monitors
}

fn log_engine_event(event: EngineEvent) {
    tracing::info!(
        target: PROCESS_TARGET,
        event = %event,
        "engine notified"
    );
}

fn join_engine(engine_thread: JoinHandle<()>) {
    if engine_thread.join().is_err() {
        tracing::error!(target: PROCESS_TARGET, "engine listener panicked");
    }
}
