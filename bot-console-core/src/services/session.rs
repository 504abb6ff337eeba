//! Page-session state
//!
//! Lives as long as the page; a reload starts from the defaults.

use std::sync::Mutex;

use crate::types::{Id, Platform};
use crate::utils::lock;

/// Connection whose prompts are being managed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedConnection {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct SessionContext {
    selected_connection: Mutex<Option<SelectedConnection>>,
    settings_tab: Mutex<Platform>,
}

impl SessionContext {
    pub fn select_connection(&self, id: Id, name: impl Into<String>) {
        *lock(&self.selected_connection) = Some(SelectedConnection {
            id,
            name: name.into(),
        });
    }

    pub fn clear_connection(&self) {
        *lock(&self.selected_connection) = None;
    }

    pub fn selected_connection(&self) -> Option<SelectedConnection> {
        lock(&self.selected_connection).clone()
    }

    pub fn settings_tab(&self) -> Platform {
        *lock(&self.settings_tab)
    }

    pub fn set_settings_tab(&self, platform: Platform) {
        *lock(&self.settings_tab) = platform;
    }
}
