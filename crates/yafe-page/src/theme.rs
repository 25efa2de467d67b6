//! Theme selection with persistence.
//!
//! Two themes, dark by default. The choice survives reloads through the
//! host's [`Storage`]; a broken store degrades to session-only.

use crate::services::Storage;

/// Storage key the theme choice is persisted under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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

    /// Parse a persisted value. Anything unrecognized means dark.
    pub fn from_stored(value: Option<&str>) -> Theme {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn other(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// The page's theme switch.
#[derive(Debug)]
pub struct ThemeSwitch {
    current: Theme,
}

impl ThemeSwitch {
    /// Restore the persisted choice, defaulting to dark.
    pub fn load(storage: &dyn Storage) -> Self {
        let current = Theme::from_stored(storage.get(THEME_KEY).as_deref());
        ThemeSwitch { current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist the new choice. A failed write keeps
    /// the flip for this session and logs a warning.
    pub fn toggle(&mut self, storage: &mut dyn Storage) -> Theme {
        self.current = self.current.other();
        if let Err(err) = storage.set(THEME_KEY, self.current.as_str()) {
            log::warn!("theme not persisted: {err}");
        }
        self.current
    }
}
