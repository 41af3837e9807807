//! Keyboard shortcuts of the designer dialog.

use egui::{Key, Modifiers};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: Key,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: Key, action: ShortcutAction, description: &'static str) -> Self {
        Self {
            key,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Delete").
    pub fn format(&self) -> &'static str {
        self.key.name()
    }
}

/// What a shortcut does in the designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Delete the selected element.
    DeleteSelected,
    /// Clear the selection, or close the dialog when nothing is selected.
    Dismiss,
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new(Key::Delete, ShortcutAction::DeleteSelected, "Delete selected element"),
            Shortcut::new(Key::Backspace, ShortcutAction::DeleteSelected, "Delete selected element"),
            Shortcut::new(Key::Escape, ShortcutAction::Dismiss, "Clear selection or close"),
        ]
    }

    /// Resolve a key press. Modified presses are left to text fields and
    /// the system.
    pub fn resolve(key: Key, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.any() {
            return None;
        }
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.key == key)
            .map(|shortcut| shortcut.action)
    }

    /// Find the first shortcut pressed this frame.
    pub fn pressed(input: &egui::InputState) -> Option<ShortcutAction> {
        input.events.iter().find_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => Self::resolve(*key, *modifiers),
            _ => None,
        })
    }
}
