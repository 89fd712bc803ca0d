//! Deferred storage maintenance run off the lifecycle thread.
//!
//! When the host is backgrounded the controller hands a history-expiry task
//! to a [`BackgroundTaskRunner`]. The task is fire-and-forget: nothing waits
//! for it, it is not cancelled by a later resume, and its outcome is only
//! logged.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use thiserror::Error;

use hostlife_config::ExpirePriority;

const MAINTENANCE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::maintenance");

/// Unit of work executed by a [`BackgroundTaskRunner`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Accepts tasks for asynchronous execution. No result is observed by the
/// submitter.
pub trait BackgroundTaskRunner: Send {
    /// Queues the task; returns without waiting for it to run.
    fn submit(&self, task: Task);
}

/// Runner backed by one dedicated worker thread draining an unbounded queue.
///
/// Dropping the runner closes the queue and joins the worker after it has
/// finished every task already submitted.
pub struct WorkerTaskRunner {
    sender: Option<Sender<Task>>,
    worker: Option<JoinHandle<()>>,
}

impl WorkerTaskRunner {
    /// Spawns the worker thread with the given name.
    pub fn spawn(name: impl Into<String>) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<Task>();
        let worker = thread::Builder::new().name(name.into()).spawn(move || {
            for task in receiver {
                task();
            }
        })?;
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }
}

impl BackgroundTaskRunner for WorkerTaskRunner {
    fn submit(&self, task: Task) {
        let delivered = self
            .sender
            .as_ref()
            .is_some_and(|sender| sender.send(task).is_ok());
        if !delivered {
            tracing::warn!(
                target: MAINTENANCE_TARGET,
                "background worker stopped; dropping task"
            );
        }
    }
}

impl Drop for WorkerTaskRunner {
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::error!(
                target: MAINTENANCE_TARGET,
                "background worker panicked"
            );
        }
    }
}

impl fmt::Debug for WorkerTaskRunner {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WorkerTaskRunner")
            .field("running", &self.sender.is_some())
            .finish()
    }
}

/// Error reported by a history store while expiring entries.
#[derive(Debug, Error)]
#[error("history expiry failed: {message}")]
pub struct MaintenanceError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl MaintenanceError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
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

/// Persistent browsing history that supports expiry.
pub trait HistoryStore: Send + Sync {
    /// Removes entries beyond the retention limits for `priority`.
    fn expire_history(&self, priority: ExpirePriority) -> Result<(), MaintenanceError>;
}

/// Builds the history-expiry task scheduled on backgrounding.
#[must_use]
pub fn history_expiry_task(store: Arc<dyn HistoryStore>, priority: ExpirePriority) -> Task {
    Box::new(move || match store.expire_history(priority) {
        Ok(()) => tracing::info!(
            target: MAINTENANCE_TARGET,
            priority = %priority,
            "history expiry completed"
        ),
        Err(error) => tracing::warn!(
            target: MAINTENANCE_TARGET,
            priority = %priority,
            error = %error,
            "history expiry failed"
        ),
    })
}
