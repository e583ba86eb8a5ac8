//! Page-wide UI state handed to the header's event handlers.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemePreference::Dark)
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewport, scroll lock, the document's dark-mode marker and the store
/// that remembers the theme between visits.
pub struct UiSession {
    pub viewport_width: u32,
    pub prefers_dark: bool,
    scroll_locked: bool,
    dark: bool,
    theme_key: String,
    store: Arc<dyn PreferenceStore>,
}

impl UiSession {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        theme_key: &str,
        viewport_width: u32,
        prefers_dark: bool,
    ) -> Self {
        Self {
            viewport_width,
            prefers_dark,
            scroll_locked: false,
            dark: false,
            theme_key: theme_key.to_string(),
            store,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn theme(&self) -> ThemePreference {
        if self.dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    /// Saved theme, if any. Only an exact `dark` reads as dark; any other
    /// stored value reads as light.
    pub fn stored_theme(&self) -> Option<ThemePreference> {
        match self.store.get(&self.theme_key) {
            Ok(Some(v)) if v.is_empty() => None,
            Ok(Some(v)) if v == ThemePreference::Dark.as_str() => Some(ThemePreference::Dark),
            Ok(Some(_)) => Some(ThemePreference::Light),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read theme preference");
                None
            }
        }
    }

    /// Apply the saved theme, or the OS preference when nothing is saved.
    pub fn init_theme(&mut self) -> ThemePreference {
        let theme = self.stored_theme().unwrap_or(if self.prefers_dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        });
        self.dark = theme.is_dark();
        theme
    }

    /// Flip the marker and persist the new choice.
    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.dark = !self.dark;
        let theme = self.theme();
        if let Err(e) = self.store.set(&self.theme_key, theme.as_str()) {
            warn!(error = %e, "failed to persist theme preference");
        }
        theme
    }
}
