//! Lookups from the names used in feature files to domain values.

use crate::monitors::MonitorKind;
use crate::startup::StartupStage;

/// Finds the monitor whose display name is `name`.
pub fn monitor_kind(name: &str) -> Result<MonitorKind, String> {
    MonitorKind::ALL
        .into_iter()
        .find(|kind| kind.to_string() == name)
        .ok_or_else(|| format!("unknown monitor '{name}'"))
}

/// Finds the startup stage whose display name is `name`.
pub fn startup_stage(name: &str) -> Result<StartupStage, String> {
    StartupStage::ORDER
        .into_iter()
        .find(|stage| stage.to_string() == name)
        .ok_or_else(|| format!("unknown startup stage '{name}'"))
}
