//! Cloneable view of the lifecycle state for the rest of the process.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;

use crate::context::HostContext;
use crate::theme::Theme;

/// Shared handle handed out by the controller.
///
/// The background flag is written only by the controller's owner thread and
/// read with relaxed ordering; readers on other threads may briefly observe a
/// stale value.
#[derive(Debug, Clone)]
pub struct LifecycleHandle {
    context: Arc<HostContext>,
    background: Arc<AtomicBool>,
    theme: Arc<OnceCell<Theme>>,
}

impl LifecycleHandle {
    pub(crate) fn new(context: Arc<HostContext>) -> Self {
        Self {
            context,
            background: Arc::new(AtomicBool::new(false)),
            theme: Arc::new(OnceCell::new()),
        }
    }

    /// Context of the host process.
    #[must_use]
    pub fn context(&self) -> &HostContext {
        &self.context
    }

    /// Returns `true` while the host is backgrounded.
    #[must_use]
    pub fn is_backgrounded(&self) -> bool {
        self.background.load(Ordering::Relaxed)
    }

    /// Theme, when it has been prepared.
    #[must_use]
    pub fn theme(&self) -> Option<&Theme> {
        self.theme.get()
    }

    /// Returns the theme, building it on first use.
    pub fn prepare_theme(&self) -> &Theme {
        self.theme.get_or_init(|| Theme::new(&self.context))
    }

    pub(crate) fn publish_background(&self, background: bool) {
        self.background.store(background, Ordering::Relaxed);
    }
}
