//! View-model Traits
//!
//! The workflows never look up rendering elements; every piece of UI they
//! touch is reached through one of these traits.

use crate::render::Node;
use crate::types::{FieldValue, Id, Platform, SettingsField};

/// Container of a rendered resource list
pub trait ListView: Send + Sync {
    /// Replace the whole content of the container
    fn replace(&self, nodes: Vec<Node>);

    /// Turn icon placeholders of the current content into icons
    fn materialize_icons(&self);

    /// Flip the switch bound to `id` without re-rendering
    fn set_switch(&self, id: Id, on: bool);
}

/// Labeling mode of a resource form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// Form bound to a draft type
pub trait FormView<D>: Send + Sync {
    /// Current field values
    fn read(&self) -> D;

    /// Overwrite every field
    fn write(&self, draft: &D);

    /// Switch title and submit labels
    fn set_mode(&self, mode: FormMode);

    /// Busy indicator of the form's secondary action (connection check)
    fn set_busy(&self, _busy: bool) {}
}

/// One modal dialog
pub trait ModalView: Send + Sync {
    /// Layout visibility (`display`)
    fn set_visible(&self, visible: bool);

    /// Transition class (`show`) that fades the dialog in and out
    fn set_shown(&self, shown: bool);
}

/// Page-level state shared by all modals
pub trait PageView: Send + Sync {
    fn set_scroll_locked(&self, locked: bool);
}

/// Tab strip of the settings modal
pub trait TabView: Send + Sync {
    fn activate_tab(&self, platform: Platform);
}

/// Plain text label (e.g. the prompts panel header)
pub trait TextSlot: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Settings form, tolerant of controls missing from the current view
pub trait SettingsForm: Send + Sync {
    /// Whether the control for `field` exists
    fn has(&self, field: SettingsField) -> bool;

    /// Checked state of a flag control; `None` if absent
    fn read_flag(&self, field: SettingsField) -> Option<bool>;

    /// Raw text of a numeric control; `None` if absent
    fn read_text(&self, field: SettingsField) -> Option<String>;

    /// Write a value into an existing control
    fn write(&self, field: SettingsField, value: FieldValue);
}
