//! Keymap configuration module
//!
//! Customizable keyboard shortcuts: a preset plus optional user overrides.

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{format_key_display, parse_key_string, KeyBinding, ParsedKey};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub preset: KeymapPreset,

    /// User-defined overrides (checked before preset)
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Resolve a key event to an action.
    ///
    /// Terminals report Shift+Tab as `BackTab` and shifted symbols like `?`
    /// with the SHIFT modifier still set, so SHIFT is dropped for those before
    /// matching.
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let modifiers = match code {
            KeyCode::BackTab => modifiers.difference(KeyModifiers::SHIFT),
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
                modifiers.difference(KeyModifiers::SHIFT)
            }
            _ => modifiers,
        };
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    /// Overrides first, then preset bindings whose action is not overridden
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|b| !self.overrides.iter().any(|o| o.action == b.action)),
        );
        bindings
    }

    /// Display string of the first key bound to `action`
    pub fn key_for(&self, action: Action) -> String {
        self.all_bindings()
            .iter()
            .find(|b| b.action == action)
            .map_or_else(|| format!("{:?}", action), KeyBinding::display)
    }
}
