//! Notifications sent to the embedded engine on app-level transitions.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

const ENGINE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::engine");

/// App-level transition delivered to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEvent {
    /// The host went to the background; the engine may release resources.
    Backgrounding,
    /// The host returned to the foreground.
    Foregrounding,
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Backgrounding => "backgrounding",
            Self::Foregrounding => "foregrounding",
        };
        formatter.write_str(label)
    }
}

/// Fire-and-forget notifications to the embedded engine.
///
/// Implementations must return promptly and never report failure back to the
/// lifecycle controller.
pub trait EngineSignal: Send {
    /// Tells the engine the host has been backgrounded.
    fn notify_backgrounding(&self);

    /// Tells the engine the host has been foregrounded.
    fn notify_foregrounding(&self);
}

/// Engine signal that posts [`EngineEvent`]s onto an unbounded channel.
///
/// The receiving side is owned by whatever drives the engine. No
/// acknowledgement flows back; once the receiver is gone events are dropped
/// with a warning.
#[derive(Debug, Clone)]
pub struct ChannelEngineSignal {
    sender: Sender<EngineEvent>,
}

impl ChannelEngineSignal {
    /// Wraps an existing sender.
    #[must_use]
    pub fn new(sender: Sender<EngineEvent>) -> Self {
        Self { sender }
    }

    /// Creates a signal together with the receiver the engine should drain.
    #[must_use]
    pub fn channel() -> (Self, Receiver<EngineEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self::new(sender), receiver)
    }

    fn post(&self, event: EngineEvent) {
        if self.sender.send(event).is_err() {
            tracing::warn!(
                target: ENGINE_TARGET,
                event = %event,
                "engine receiver closed; dropping event"
            );
        }
    }
}

impl EngineSignal for ChannelEngineSignal {
    fn notify_backgrounding(&self) {
        self.post(EngineEvent::Backgrounding);
    }

    fn notify_foregrounding(&self) {
        self.post(EngineEvent::Foregrounding);
    }
}
