//! Locale correction invoked on configuration changes.
//!
//! The system may report a locale that differs from the one the user picked
//! inside the host. A [`LocaleCorrector`] reconciles the two by mutating the
//! host [`Resources`]. Correctors that depend on the primary UI cannot work
//! before it attaches and report [`LocaleError::UninitializedContext`] until
//! then; the lifecycle controller treats that case as expected and moves on.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::context::{ConfigurationSnapshot, HostContext, Resources};

const LOCALE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::locale");

/// Errors reported by a [`LocaleCorrector`].
#[derive(Debug, Error)]
pub enum LocaleError {
    /// The corrector was invoked before its context was established.
    #[error("locale corrector has no context yet")]
    UninitializedContext,
    /// Correction was attempted and failed.
    #[error("failed to correct locale: {message}")]
    Correction {
        /// Description of the failure.
        message: String,
        /// Underlying error, when available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LocaleError {
    /// Builds a correction failure without an underlying source.
    #[must_use]
    pub fn correction(message: impl Into<String>) -> Self {
        Self::Correction {
            message: message.into(),
            source: None,
        }
    }

    /// Returns `true` for the initialisation-order error.
    #[must_use]
    pub fn is_uninitialized_context(&self) -> bool {
        matches!(self, Self::UninitializedContext)
    }
}

/// Reconciles resource locale state with a new configuration.
pub trait LocaleCorrector: Send {
    /// Corrects `resources` for `config`, if needed.
    fn correct(
        &self,
        context: &HostContext,
        resources: &mut Resources,
        config: &ConfigurationSnapshot,
    ) -> Result<(), LocaleError>;
}

impl<T> LocaleCorrector for Arc<T>
where
    T: LocaleCorrector + Sync,
{
    fn correct(
        &self,
        context: &HostContext,
        resources: &mut Resources,
        config: &ConfigurationSnapshot,
    ) -> Result<(), LocaleError> {
        (**self).correct(context, resources, config)
    }
}

/// Keeps the rendering locale pinned to the user's preferred locale.
///
/// The corrector only works once the primary UI has attached via
/// [`PinnedLocaleCorrector::attach`]; before that every call fails with
/// [`LocaleError::UninitializedContext`].
#[derive(Debug, Default)]
pub struct PinnedLocaleCorrector {
    preferred: Option<String>,
    attached: OnceCell<HostContext>,
}

impl PinnedLocaleCorrector {
    /// Builds a corrector for the given preferred locale. `None` means the
    /// user follows the system locale.
    #[must_use]
    pub fn new(preferred: Option<String>) -> Self {
        Self {
            preferred,
            attached: OnceCell::new(),
        }
    }

    /// Records the context of the primary UI. Later calls are ignored.
    pub fn attach(&self, context: HostContext) {
        if self.attached.set(context).is_err() {
            tracing::debug!(
                target: LOCALE_TARGET,
                "locale corrector already attached"
            );
        }
    }

    /// Returns `true` once [`attach`](Self::attach) has been called.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.get().is_some()
    }
}

impl LocaleCorrector for PinnedLocaleCorrector {
    fn correct(
        &self,
        _context: &HostContext,
        resources: &mut Resources,
        config: &ConfigurationSnapshot,
    ) -> Result<(), LocaleError> {
        if !self.is_attached() {
            return Err(LocaleError::UninitializedContext);
        }
        let Some(preferred) = self.preferred.as_deref() else {
            return Ok(());
        };
        if config.locale() != Some(preferred) {
            tracing::info!(
                target: LOCALE_TARGET,
                system = config.locale().unwrap_or("unset"),
                preferred,
                "restoring preferred locale"
            );
            resources.override_locale(preferred);
        }
        Ok(())
    }
}
