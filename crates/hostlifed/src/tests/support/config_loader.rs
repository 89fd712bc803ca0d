//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::OrthoError;

use hostlife_config::{Config, ExpirePriority};

use crate::bootstrap::ConfigLoader;

/// Application identifier used throughout the test suites.
pub const TEST_APPLICATION_ID: &str = "org.hostlife.test";

/// Loader that returns a fixed configuration.
pub struct TestConfigLoader {
    expire_priority: ExpirePriority,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expire_priority: ExpirePriority::Normal,
        }
    }

    /// Loader whose configuration carries the given expiry priority.
    #[must_use]
    pub fn with_expire_priority(expire_priority: ExpirePriority) -> Self {
        Self { expire_priority }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            application_id: TEST_APPLICATION_ID.to_owned(),
            expire_priority: self.expire_priority,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing an invalid CLI argument.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("hostlifed"),
            OsString::from("--log-format"),
            OsString::from("verbose"),
        ];
        Config::load_from_iter(args)
    }
}
