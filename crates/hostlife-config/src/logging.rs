//! Output format of the host's structured logs.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Rendering used by the telemetry subscriber installed at bootstrap.
///
/// Set with `--log-format` or `HOSTLIFE_LOG_FORMAT`; parsing ignores case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One flattened JSON object per event.
    #[default]
    Json,
    /// Terse single-line text for terminals.
    Compact,
}

/// Error returned when a log format name is not recognised.
pub type LogFormatParseError = strum::ParseError;
