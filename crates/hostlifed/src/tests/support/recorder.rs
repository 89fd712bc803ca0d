//! Recording collaborators sharing one ordered call log.
//!
//! Every double built from the same [`Recorder`] appends to the same log, so
//! scenarios can assert the relative order of engine notifications, task
//! submissions, monitor sweeps, and locale corrections.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use hostlife_config::ExpirePriority;

use crate::context::{ConfigurationSnapshot, HostContext, Resources};
use crate::engine::EngineSignal;
use crate::lifecycle::Collaborators;
use crate::locale::{LocaleCorrector, LocaleError};
use crate::maintenance::{BackgroundTaskRunner, HistoryStore, MaintenanceError, Task};
use crate::monitors::{MonitorError, MonitorKind, MonitorService, MonitorSet};

/// Observable collaborator interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// The engine was told the host is backgrounded.
    EngineBackgrounding,
    /// The engine was told the host is foregrounded.
    EngineForegrounding,
    /// A task was queued on the background runner.
    TaskSubmitted,
    /// The history store ran an expiry.
    HistoryExpired(ExpirePriority),
    /// A monitor start was requested.
    MonitorStarted(MonitorKind),
    /// A monitor stop was requested.
    MonitorStopped(MonitorKind),
    /// The locale corrector ran for a configuration with this locale.
    LocaleCorrected(Option<String>),
}

/// Scripted outcome of the recording locale corrector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocaleScript {
    /// Succeed without touching the resources.
    #[default]
    Succeed,
    /// Succeed after overriding the locale.
    Override(String),
    /// Fail because the primary UI is not attached yet.
    Uninitialized,
    /// Fail with a correction error.
    Fail(String),
}

#[derive(Default)]
struct RecorderState {
    calls: Vec<Call>,
    pending: Vec<Task>,
    start_failures: HashSet<MonitorKind>,
    stop_failures: HashSet<MonitorKind>,
    history_failure: Option<String>,
    locale: LocaleScript,
}

/// Shared state behind every recording double.
#[derive(Clone, Default)]
pub struct Recorder {
    state: Arc<Mutex<RecorderState>>,
}

impl Recorder {
    fn lock(&self) -> MutexGuard<'_, RecorderState> {
        self.state.lock().expect("recorder mutex poisoned")
    }

    fn record(&self, call: Call) {
        self.lock().calls.push(call);
    }

    /// Builds collaborators with one monitor per kind, in start order.
    #[must_use]
    pub fn collaborators(&self) -> Collaborators {
        let mut monitors = MonitorSet::default();
        for kind in MonitorKind::ALL {
            monitors.push(RecordingMonitor {
                kind,
                recorder: self.clone(),
            });
        }
        Collaborators {
            engine: Box::new(RecordingEngine(self.clone())),
            monitors,
            tasks: Box::new(RecordingTaskRunner(self.clone())),
            history: Arc::new(RecordingHistoryStore(self.clone())),
            locale: Box::new(RecordingLocaleCorrector(self.clone())),
        }
    }

    /// Snapshot of the calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls equal to `call`.
    #[must_use]
    pub fn count(&self, call: &Call) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|recorded| *recorded == call)
            .count()
    }

    /// Forgets the calls recorded so far.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Number of submitted tasks that have not run.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.lock().pending.len()
    }

    /// Runs every submitted task on the calling thread.
    pub fn run_pending_tasks(&self) {
        let tasks = std::mem::take(&mut self.lock().pending);
        for task in tasks {
            task();
        }
    }

    /// Makes `kind` fail whenever it is started.
    pub fn fail_start(&self, kind: MonitorKind) {
        self.lock().start_failures.insert(kind);
    }

    /// Makes `kind` fail whenever it is stopped.
    pub fn fail_stop(&self, kind: MonitorKind) {
        self.lock().stop_failures.insert(kind);
    }

    /// Makes the history store fail with `message`.
    pub fn fail_history(&self, message: impl Into<String>) {
        self.lock().history_failure = Some(message.into());
    }

    /// Scripts the next locale corrections.
    pub fn script_locale(&self, script: LocaleScript) {
        self.lock().locale = script;
    }
}

struct RecordingEngine(Recorder);

impl EngineSignal for RecordingEngine {
    fn notify_backgrounding(&self) {
        self.0.record(Call::EngineBackgrounding);
    }

    fn notify_foregrounding(&self) {
        self.0.record(Call::EngineForegrounding);
    }
}

struct RecordingTaskRunner(Recorder);

impl BackgroundTaskRunner for RecordingTaskRunner {
    fn submit(&self, task: Task) {
        let mut state = self.0.lock();
        state.calls.push(Call::TaskSubmitted);
        state.pending.push(task);
    }
}

struct RecordingHistoryStore(Recorder);

impl HistoryStore for RecordingHistoryStore {
    fn expire_history(&self, priority: ExpirePriority) -> Result<(), MaintenanceError> {
        let failure = {
            let mut state = self.0.lock();
            state.calls.push(Call::HistoryExpired(priority));
            state.history_failure.clone()
        };
        match failure {
            Some(message) => Err(MaintenanceError::new(message)),
            None => Ok(()),
        }
    }
}

struct RecordingMonitor {
    kind: MonitorKind,
    recorder: Recorder,
}

impl MonitorService for RecordingMonitor {
    fn kind(&self) -> MonitorKind {
        self.kind
    }

    fn start(&self, _context: &HostContext) -> Result<(), MonitorError> {
        let mut state = self.recorder.lock();
        state.calls.push(Call::MonitorStarted(self.kind));
        if state.start_failures.contains(&self.kind) {
            return Err(MonitorError::new(self.kind, "injected start failure"));
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), MonitorError> {
        let mut state = self.recorder.lock();
        state.calls.push(Call::MonitorStopped(self.kind));
        if state.stop_failures.contains(&self.kind) {
            return Err(MonitorError::new(self.kind, "injected stop failure"));
        }
        Ok(())
    }
}

struct RecordingLocaleCorrector(Recorder);

impl LocaleCorrector for RecordingLocaleCorrector {
    fn correct(
        &self,
        _context: &HostContext,
        resources: &mut Resources,
        config: &ConfigurationSnapshot,
    ) -> Result<(), LocaleError> {
        let script = {
            let mut state = self.0.lock();
            state
                .calls
                .push(Call::LocaleCorrected(config.locale().map(str::to_owned)));
            state.locale.clone()
        };
        match script {
            LocaleScript::Succeed => Ok(()),
            LocaleScript::Override(locale) => {
                resources.override_locale(locale);
                Ok(())
            }
            LocaleScript::Uninitialized => Err(LocaleError::UninitializedContext),
            LocaleScript::Fail(message) => Err(LocaleError::correction(message)),
        }
    }
}
