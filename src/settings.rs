//! Widget settings and preferences
//!
//! Only the theme is persisted, under its own storage key so it can be read
//! before anything else renders. Motion preference follows the browser.

use serde::{Deserialize, Serialize};

use crate::consts::{
    ANIMATION_DURATION_MS, ANIMATION_DURATION_REDUCED_MS, SETTLE_DURATION_MS, THEME_DEBOUNCE_MS,
};
use crate::persistence::Store;

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Label for the toggle button (names the theme it switches to)
    pub fn toggle_label(&self) -> String {
        format!("Switch to {} mode", self.toggled().as_str())
    }
}

/// Theme switch with a cooldown between toggles
#[derive(Debug, Clone, Default)]
pub struct ThemeToggle {
    theme: Theme,
    last_toggle_ms: Option<f64>,
}

impl ThemeToggle {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            last_toggle_ms: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme at `now_ms` and persist it.
    ///
    /// Returns the new theme, or `None` while still cooling down from the
    /// previous toggle.
    pub fn toggle(&mut self, now_ms: f64, store: &mut impl Store) -> Option<Theme> {
        if let Some(last) = self.last_toggle_ms {
            if now_ms - last < THEME_DEBOUNCE_MS {
                return None;
            }
        }
        self.last_toggle_ms = Some(now_ms);
        self.theme = self.theme.toggled();

        if let Err(e) = store.save_theme(self.theme) {
            log::warn!("Failed to save theme: {e}");
        }
        Some(self.theme)
    }
}

/// Motion preferences, read from the browser at runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Short animation, no settle bounce or shadow
    pub reduced_motion: bool,
}

impl Settings {
    pub fn new(reduced_motion: bool) -> Self {
        Self { reduced_motion }
    }

    /// How long the presentation layer waits before completing a flip
    pub fn animation_duration_ms(&self) -> u32 {
        if self.reduced_motion {
            ANIMATION_DURATION_REDUCED_MS
        } else {
            ANIMATION_DURATION_MS
        }
    }

    /// Landing bounce duration (none with reduced motion)
    pub fn settle_duration_ms(&self) -> Option<u32> {
        (!self.reduced_motion).then_some(SETTLE_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, THEME_KEY};

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::from_str("Light"), Some(Theme::Light));
        assert_eq!(Theme::from_str(" dark "), Some(Theme::Dark));
        assert_eq!(Theme::from_str("blue"), None);
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light mode");
    }

    #[test]
    fn test_theme_toggle_debounce() {
        let mut store = MemoryStore::new();
        let mut toggle = ThemeToggle::new(Theme::Dark);

        assert_eq!(toggle.toggle(0.0, &mut store), Some(Theme::Light));
        assert_eq!(toggle.toggle(200.0, &mut store), None);
        assert_eq!(toggle.theme(), Theme::Light);
        assert_eq!(toggle.toggle(500.0, &mut store), Some(Theme::Dark));
        assert_eq!(store.get_item(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_theme_toggle_survives_storage_failure() {
        let mut store = MemoryStore::read_only();
        let mut toggle = ThemeToggle::new(Theme::Dark);
        assert_eq!(toggle.toggle(0.0, &mut store), Some(Theme::Light));
    }

    #[test]
    fn test_reduced_motion_durations() {
        let mut settings = Settings::default();
        assert_eq!(settings.animation_duration_ms(), 3000);
        assert_eq!(settings.settle_duration_ms(), Some(300));

        settings.reduced_motion = true;
        assert_eq!(settings.animation_duration_ms(), 500);
        assert_eq!(settings.settle_duration_ms(), None);
    }

    #[test]
    fn test_motion_preference_changes_mid_session() {
        let mut settings = Settings::new(false);
        let flip_ms = settings.animation_duration_ms();

        settings.reduced_motion = true;
        assert!(settings.animation_duration_ms() < flip_ms);
        assert_eq!(settings.settle_duration_ms(), None);

        settings.reduced_motion = false;
        assert_eq!(settings.animation_duration_ms(), flip_ms);
    }
}
