//! Lifecycle phase and the pure transition rules behind it.
//!
//! The host is either in the foreground or in the background. Only in the
//! background can the engine be suspended, so the engine axis lives inside
//! [`LifecyclePhase::Background`] and "foreground with a suspended engine"
//! cannot be represented.

use std::fmt;

/// Whether the embedded engine has been told to release its resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// The engine runs normally.
    #[default]
    Active,
    /// The engine received a backgrounding notification and no
    /// foregrounding notification since.
    Suspended,
}

impl fmt::Display for EngineState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        };
        formatter.write_str(label)
    }
}

/// Status of the UI that triggered a pause or resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityStatus {
    /// The UI is finishing and will not come back.
    pub is_finishing: bool,
    /// Another live UI still owns the engine's surface.
    pub owns_engine_ui: bool,
}

impl ActivityStatus {
    /// Builds a status from the two host flags.
    #[must_use]
    pub const fn new(is_finishing: bool, owns_engine_ui: bool) -> Self {
        Self {
            is_finishing,
            owns_engine_ui,
        }
    }

    /// Suspending the engine is premature when the UI is finishing and
    /// redundant while another UI owns the engine.
    #[must_use]
    pub const fn permits_engine_suspend(self) -> bool {
        !self.is_finishing && !self.owns_engine_ui
    }
}

/// Foreground/background state of the host process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// The host is visible; the engine is always active here.
    #[default]
    Foreground,
    /// The host has been paused and not resumed since.
    Background {
        /// Engine state while backgrounded.
        engine: EngineState,
    },
}

impl LifecyclePhase {
    /// Returns `true` while the host is backgrounded.
    #[must_use]
    pub const fn is_background(self) -> bool {
        matches!(self, Self::Background { .. })
    }

    /// Engine state implied by the phase.
    #[must_use]
    pub const fn engine(self) -> EngineState {
        match self {
            Self::Foreground => EngineState::Active,
            Self::Background { engine } => engine,
        }
    }

    /// Plans a pause from this phase.
    ///
    /// The engine is suspended at most once per background stay: a repeated
    /// pause finds it already suspended and leaves it alone.
    #[must_use]
    pub const fn pause(self, activity: ActivityStatus) -> PausePlan {
        let suspend_engine =
            activity.permits_engine_suspend() && matches!(self.engine(), EngineState::Active);
        let engine = if suspend_engine {
            EngineState::Suspended
        } else {
            self.engine()
        };
        PausePlan {
            entered: Self::Background {
                engine: self.engine(),
            },
            suspend_engine,
            settled: Self::Background { engine },
        }
    }

    /// Plans a resume from this phase.
    #[must_use]
    pub const fn resume(self) -> ResumePlan {
        let resume_engine = matches!(self.engine(), EngineState::Suspended);
        let engine_restored = match self {
            Self::Foreground => Self::Foreground,
            Self::Background { .. } => Self::Background {
                engine: EngineState::Active,
            },
        };
        ResumePlan {
            resume_engine,
            engine_restored,
            settled: Self::Foreground,
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Foreground => formatter.write_str("foreground"),
            Self::Background { engine } => write!(formatter, "background (engine {engine})"),
        }
    }
}

/// Steps of a pause, in the order the controller applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PausePlan {
    /// Phase published before any collaborator runs.
    pub entered: LifecyclePhase,
    /// Whether to notify the engine and schedule maintenance.
    pub suspend_engine: bool,
    /// Phase once the engine decision has been applied.
    pub settled: LifecyclePhase,
}

/// Steps of a resume, in the order the controller applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumePlan {
    /// Whether to notify the engine of the foregrounding.
    pub resume_engine: bool,
    /// Phase once the engine is active again but monitors have not started.
    pub engine_restored: LifecyclePhase,
    /// Phase once every step has completed.
    pub settled: LifecyclePhase,
}
