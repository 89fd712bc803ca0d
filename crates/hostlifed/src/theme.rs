//! Lightweight theme shared by every window of the host.

use crate::context::HostContext;

/// Colours applied to the host chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Accent colour as a `#rrggbb` string.
    pub accent: String,
    /// Foreground text colour as a `#rrggbb` string.
    pub text: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: String::from("#0a84ff"),
            text: String::from("#0c0c0d"),
        }
    }
}

/// Theme owned by the lifecycle handle. Built on first request and kept for
/// the rest of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    application_id: String,
    palette: Palette,
}

impl Theme {
    /// Builds the default theme for the host.
    #[must_use]
    pub fn new(context: &HostContext) -> Self {
        Self {
            application_id: context.application_id().to_owned(),
            palette: Palette::default(),
        }
    }

    /// Application the theme was built for.
    #[must_use]
    pub fn application_id(&self) -> &str {
        self.application_id.as_str()
    }

    /// Colours of the theme.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
