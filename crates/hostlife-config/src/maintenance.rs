//! Settings for the deferred storage maintenance run on backgrounding.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Priority handed to the history store when expiring old entries.
///
/// `Normal` trims history down to the regular retention limits, while
/// `Aggressive` is meant for low-storage conditions and removes more.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ExpirePriority {
    /// Regular retention limits.
    #[default]
    Normal,
    /// Reduced retention limits.
    Aggressive,
}

/// Errors encountered while parsing an [`ExpirePriority`] from text.
pub type ExpirePriorityParseError = strum::ParseError;
