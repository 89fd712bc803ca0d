//! Shared configuration for the hostlife lifecycle controller.
//!
//! Values are layered with `ortho_config`: built-in defaults are overridden by
//! a configuration file, then by `HOSTLIFE_*` environment variables, and
//! finally by command-line flags. The daemon binary loads the configuration
//! once during bootstrap and hands the resolved [`Config`] to telemetry and to
//! the host context.

mod defaults;
mod logging;
mod maintenance;

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_APPLICATION_ID, DEFAULT_LOG_FILTER, default_application_id, default_expire_priority,
    default_log_filter, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use maintenance::{ExpirePriority, ExpirePriorityParseError};

/// Resolved configuration for the lifecycle host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTLIFE")]
#[serde(default)]
pub struct Config {
    /// `tracing` filter expression applied to the global subscriber.
    pub log_filter: String,
    /// Output format for structured logs.
    pub log_format: LogFormat,
    /// Priority used when the background history expiry runs.
    pub expire_priority: ExpirePriority,
    /// Identifier carried in the host context handed to collaborators.
    pub application_id: String,
    /// Locale the user selected inside the host, kept even when the system
    /// locale changes underneath it.
    pub preferred_locale: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter().to_owned(),
            log_format: default_log_format(),
            expire_priority: default_expire_priority(),
            application_id: default_application_id().to_owned(),
            preferred_locale: None,
        }
    }
}

impl Config {
    /// Resolves the configuration from the process arguments, the
    /// environment, and any configuration file.
    ///
    /// # Errors
    ///
    /// Returns the loader error when a layer cannot be read or a value does
    /// not parse.
    pub fn load() -> Result<Self, Arc<OrthoError>> {
        <Self as OrthoConfig>::load()
    }

    /// Resolves the configuration using `args` in place of the process
    /// arguments. The first item is the program name.
    ///
    /// # Errors
    ///
    /// Returns the loader error when a layer cannot be read or a value does
    /// not parse.
    pub fn load_from_iter(
        args: impl IntoIterator<Item = OsString>,
    ) -> Result<Self, Arc<OrthoError>> {
        <Self as OrthoConfig>::load_from_iter(args)
    }

    /// Filter expression for the telemetry subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format for the telemetry subscriber.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Priority for the deferred history expiry.
    #[must_use]
    pub fn expire_priority(&self) -> ExpirePriority {
        self.expire_priority
    }

    /// Application identifier for the host context.
    #[must_use]
    pub fn application_id(&self) -> &str {
        self.application_id.as_str()
    }

    /// Locale pinned by the user, if any.
    #[must_use]
    pub fn preferred_locale(&self) -> Option<&str> {
        self.preferred_locale.as_deref()
    }
}
