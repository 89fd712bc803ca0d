use crate::logging::LogFormat;
use crate::maintenance::ExpirePriority;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application identifier reported to collaborators when none is configured.
pub const DEFAULT_APPLICATION_ID: &str = "org.hostlife.host";

/// Default log filter expression used by the binaries.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binaries.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default priority used by the background history expiry.
#[must_use]
pub fn default_expire_priority() -> ExpirePriority {
    ExpirePriority::Normal
}

/// Default application identifier.
#[must_use]
pub fn default_application_id() -> &'static str {
    DEFAULT_APPLICATION_ID
}
