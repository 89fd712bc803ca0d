//! Placeholder collaborators used until the platform integrations land.
//!
//! They log what a real integration would do so the daemon can be driven end
//! to end from a host event stream.

use std::sync::atomic::{AtomicBool, Ordering};

use hostlife_config::ExpirePriority;

use crate::context::HostContext;
use crate::maintenance::{HistoryStore, MaintenanceError};
use crate::monitors::{MonitorError, MonitorKind, MonitorService};
use crate::startup::{ProcessInitializer, StartupError, StartupStage};

const PLACEHOLDER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::placeholder");

/// Monitor that only tracks whether it is running.
#[derive(Debug)]
pub(crate) struct LoggingMonitor {
    kind: MonitorKind,
    running: AtomicBool,
}

impl LoggingMonitor {
    pub(crate) fn new(kind: MonitorKind) -> Self {
        Self {
            kind,
            running: AtomicBool::new(false),
        }
    }
}

impl MonitorService for LoggingMonitor {
    fn kind(&self) -> MonitorKind {
        self.kind
    }

    fn start(&self, context: &HostContext) -> Result<(), MonitorError> {
        if !self.running.swap(true, Ordering::Relaxed) {
            tracing::info!(
                target: PLACEHOLDER_TARGET,
                monitor = %self.kind,
                application_id = %context,
                "monitor started"
            );
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), MonitorError> {
        if self.running.swap(false, Ordering::Relaxed) {
            tracing::info!(
                target: PLACEHOLDER_TARGET,
                monitor = %self.kind,
                "monitor stopped"
            );
        }
        Ok(())
    }
}

/// History store without persistent state.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NoopHistoryStore;

impl HistoryStore for NoopHistoryStore {
    fn expire_history(&self, priority: ExpirePriority) -> Result<(), MaintenanceError> {
        tracing::warn!(
            target: PLACEHOLDER_TARGET,
            priority = %priority,
            "history expiry requested but no store is configured"
        );
        Ok(())
    }
}

/// Initialiser that accepts every stage.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NoopProcessInitializer;

impl ProcessInitializer for NoopProcessInitializer {
    fn initialize(&self, stage: StartupStage, context: &HostContext) -> Result<(), StartupError> {
        tracing::debug!(
            target: PLACEHOLDER_TARGET,
            stage = %stage,
            application_id = %context,
            "startup stage has no platform integration yet"
        );
        Ok(())
    }
}
