//! Monitoring services whose lifetime follows the foreground state.
//!
//! The host runs a fixed set of independent monitors (connectivity, power,
//! and network state). They are started together whenever the host returns to
//! the foreground and stopped together whenever it is backgrounded. Each
//! service owns its own idempotence: stopping a stopped service or starting a
//! running one must be harmless, because the controller calls them on every
//! transition without tracking their state.

use std::fmt;

use thiserror::Error;

use crate::context::HostContext;

const MONITOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::monitors");

/// Monitoring services managed by the lifecycle controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorKind {
    /// Reachability of the network as a whole.
    Connectivity,
    /// Battery and charging state.
    Power,
    /// Link type and metering information.
    Network,
}

impl MonitorKind {
    /// Every monitor in the order the host starts them.
    pub const ALL: [Self; 3] = [Self::Power, Self::Connectivity, Self::Network];
}

impl fmt::Display for MonitorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connectivity => "connectivity",
            Self::Power => "power",
            Self::Network => "network",
        };
        formatter.write_str(label)
    }
}

/// Errors surfaced when a monitor fails to start or stop.
#[derive(Debug, Error)]
#[error("{kind} monitor failed: {message}")]
pub struct MonitorError {
    /// Kind of monitor that failed.
    pub kind: MonitorKind,
    message: String,
    /// Optional source error reported by the monitor implementation.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl MonitorError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(kind: MonitorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        kind: MonitorKind,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            kind,
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

/// A monitoring service with a start/stop lifecycle.
pub trait MonitorService: Send {
    /// Identifies the service in logs and errors.
    fn kind(&self) -> MonitorKind;

    /// Starts the service; a no-op when it is already running.
    fn start(&self, context: &HostContext) -> Result<(), MonitorError>;

    /// Stops the service; a no-op when it is already stopped.
    fn stop(&self) -> Result<(), MonitorError>;
}

/// The fixed set of monitors driven by the lifecycle controller.
///
/// Services are started and stopped in registration order. The first failure
/// aborts the sweep and is returned to the caller; the remaining services are
/// left untouched for that transition.
#[derive(Default)]
pub struct MonitorSet {
    services: Vec<Box<dyn MonitorService>>,
}

impl MonitorSet {
    /// Builds a set over the supplied services.
    #[must_use]
    pub fn new(services: Vec<Box<dyn MonitorService>>) -> Self {
        Self { services }
    }

    /// Adds a service to the end of the sweep order.
    pub fn push(&mut self, service: impl MonitorService + 'static) {
        self.services.push(Box::new(service));
    }

    /// Kinds of the registered services, in sweep order.
    #[must_use]
    pub fn kinds(&self) -> Vec<MonitorKind> {
        self.services.iter().map(|service| service.kind()).collect()
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` when no services are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Starts every service once.
    pub fn start_all(&self, context: &HostContext) -> Result<(), MonitorError> {
        for service in &self.services {
            tracing::debug!(
                target: MONITOR_TARGET,
                monitor = %service.kind(),
                "starting monitor"
            );
            service.start(context)?;
        }
        Ok(())
    }

    /// Stops every service once.
    pub fn stop_all(&self) -> Result<(), MonitorError> {
        for service in &self.services {
            tracing::debug!(
                target: MONITOR_TARGET,
                monitor = %service.kind(),
                "stopping monitor"
            );
            service.stop()?;
        }
        Ok(())
    }
}

impl fmt::Debug for MonitorSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MonitorSet")
            .field("services", &self.kinds())
            .finish()
    }
}
