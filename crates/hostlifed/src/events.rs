//! Newline-delimited JSON host events driving the lifecycle controller.
//!
//! Each input line carries one event tagged by `event`:
//!
//! ```json
//! {"event":"pause","finishing":false,"owns_engine_ui":false}
//! {"event":"resume"}
//! {"event":"configuration_changed","config":{"locale":"de-DE"}}
//! {"event":"ui_attached"}
//! ```
//!
//! Malformed lines and failing transitions are logged and counted; the stream
//! keeps going until end of input.

use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};

use crate::context::{ConfigurationSnapshot, HostContext};
use crate::lifecycle::{ActivityStatus, LifecycleController, LifecycleError};

const EVENTS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::events");

/// Notification delivered by the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// The foreground UI paused.
    Pause {
        /// The UI is finishing.
        #[serde(default)]
        finishing: bool,
        /// Another UI still owns the engine.
        #[serde(default)]
        owns_engine_ui: bool,
    },
    /// A UI resumed.
    Resume {
        /// The UI is finishing.
        #[serde(default)]
        finishing: bool,
        /// Another UI still owns the engine.
        #[serde(default)]
        owns_engine_ui: bool,
    },
    /// The system configuration changed.
    ConfigurationChanged {
        /// The new configuration.
        #[serde(default)]
        config: ConfigurationSnapshot,
    },
    /// The primary UI attached and established its context.
    UiAttached,
}

impl HostEvent {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Counters describing a processed event stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Events handed to the controller successfully.
    pub dispatched: usize,
    /// Lines that could not be parsed.
    pub rejected: usize,
    /// Events whose transition returned an error.
    pub failed: usize,
}

/// Applies one event to the controller.
///
/// `on_ui_attached` runs for [`HostEvent::UiAttached`] with the controller's
/// context.
pub fn dispatch(
    controller: &mut LifecycleController,
    event: HostEvent,
    on_ui_attached: &mut dyn FnMut(&HostContext),
) -> Result<(), LifecycleError> {
    match event {
        HostEvent::Pause {
            finishing,
            owns_engine_ui,
        } => controller.on_pause(ActivityStatus::new(finishing, owns_engine_ui)),
        HostEvent::Resume {
            finishing,
            owns_engine_ui,
        } => controller.on_resume(ActivityStatus::new(finishing, owns_engine_ui)),
        HostEvent::ConfigurationChanged { config } => controller.on_configuration_changed(config),
        HostEvent::UiAttached => {
            on_ui_attached(controller.context());
            Ok(())
        }
    }
}

/// Reads events from `reader` until end of input.
///
/// # Errors
///
/// Returns the underlying IO error when reading a line fails.
pub fn run_event_stream<R: BufRead>(
    controller: &mut LifecycleController,
    reader: R,
    on_ui_attached: &mut dyn FnMut(&HostContext),
) -> io::Result<StreamSummary> {
    let mut summary = StreamSummary::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let event = match HostEvent::parse(trimmed) {
            Ok(event) => event,
            Err(error) => {
                tracing::warn!(
                    target: EVENTS_TARGET,
                    line = index + 1,
                    error = %error,
                    "skipping malformed host event"
                );
                summary.rejected += 1;
                continue;
            }
        };

        match dispatch(controller, event, on_ui_attached) {
            Ok(()) => summary.dispatched += 1,
            Err(error) => {
                tracing::error!(
                    target: EVENTS_TARGET,
                    line = index + 1,
                    error = %error,
                    "host event failed"
                );
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
