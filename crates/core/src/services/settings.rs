use std::sync::Arc;

use crate::error::Result;
use crate::models::{StorageKey, Theme};
use crate::storage::KeyValueStore;

/// Colour theme preference, stored next to the library under `theme`.
pub struct SettingsService {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored theme, or dark when unset or unreadable.
    pub fn theme(&self) -> Theme {
        match self.store.get(StorageKey::Theme.as_str()) {
            Ok(Some(bytes)) => Theme::from_stored(String::from_utf8_lossy(&bytes).trim()),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Theme read failed, using default");
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Theme> {
        self.store
            .set(StorageKey::Theme.as_str(), theme.as_str().as_bytes())?;
        Ok(theme)
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        self.set_theme(self.theme().toggled())
    }
}
