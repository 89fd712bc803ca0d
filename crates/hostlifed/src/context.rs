//! Host context, resource state, and configuration snapshots.
//!
//! The [`HostContext`] is the application-level handle passed to monitor
//! services and the locale corrector. [`Resources`] holds the configuration
//! the host currently renders with, plus any locale override applied by the
//! corrector.

use std::fmt;

use serde::{Deserialize, Serialize};

use hostlife_config::Config;

/// Application-level context handed to collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    application_id: String,
}

impl HostContext {
    /// Builds a context for the given application identifier.
    #[must_use]
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
        }
    }

    /// Builds the context described by the resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.application_id())
    }

    /// Identifier of the hosting application.
    #[must_use]
    pub fn application_id(&self) -> &str {
        self.application_id.as_str()
    }
}

impl fmt::Display for HostContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.application_id)
    }
}

/// Screen orientation reported with a configuration change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Orientation was not reported.
    #[default]
    Undefined,
    /// Taller than wide.
    Portrait,
    /// Wider than tall.
    Landscape,
}

/// Environment, display, and locale settings delivered on configuration
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigurationSnapshot {
    /// BCP 47 tag of the system locale, e.g. `de-DE`.
    pub locale: Option<String>,
    /// Current screen orientation.
    pub orientation: Orientation,
    /// Whether the system night theme is active.
    pub night_mode: bool,
    /// Font scale in percent of the default size.
    pub font_scale_percent: Option<u16>,
}

impl ConfigurationSnapshot {
    /// Builds a snapshot that only carries a locale.
    #[must_use]
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            ..Self::default()
        }
    }

    /// System locale carried by the snapshot.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

/// Resource state the host renders with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resources {
    configuration: ConfigurationSnapshot,
    locale_override: Option<String>,
    generation: u64,
}

impl Resources {
    /// Builds resources for an initial configuration.
    #[must_use]
    pub fn new(configuration: ConfigurationSnapshot) -> Self {
        Self {
            configuration,
            locale_override: None,
            generation: 0,
        }
    }

    /// Configuration most recently propagated to the resources.
    #[must_use]
    pub fn configuration(&self) -> &ConfigurationSnapshot {
        &self.configuration
    }

    /// Number of configuration changes propagated so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Locale used for rendering: the override when present, otherwise the
    /// system locale from the current configuration.
    #[must_use]
    pub fn effective_locale(&self) -> Option<&str> {
        self.locale_override
            .as_deref()
            .or_else(|| self.configuration.locale())
    }

    /// Locale forced by the corrector, if any.
    #[must_use]
    pub fn locale_override(&self) -> Option<&str> {
        self.locale_override.as_deref()
    }

    /// Forces the rendering locale regardless of the system locale.
    pub fn override_locale(&mut self, locale: impl Into<String>) {
        self.locale_override = Some(locale.into());
    }

    /// Default handling for a configuration change. The locale override is
    /// left untouched.
    pub fn apply_configuration(&mut self, configuration: ConfigurationSnapshot) {
        self.configuration = configuration;
        self.generation = self.generation.saturating_add(1);
    }
}
