use serde::{Deserialize, Serialize};

/// Slots in the key-value store. Both share one namespace and must not collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Library,
    Theme,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Library => "myLibrary",
            StorageKey::Theme => "theme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
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

    /// Parses a stored value; anything unrecognised reads as the default.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeUpdate {
    pub theme: Theme,
}
