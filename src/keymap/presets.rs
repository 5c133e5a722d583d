//! Preset keymaps: Standard, Vim, Emacs

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

/// Available keymap presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Tab, Enter, Esc
    #[default]
    Standard,
    /// hjkl movement
    Vim,
    /// Ctrl+N/P/B/F movement
    Emacs,
}

impl KeymapPreset {
    pub fn bindings(&self) -> Vec<KeyBinding> {
        let specific: &[(&str, Action)] = match self {
            KeymapPreset::Standard => &[
                ("up", Action::MoveUp),
                ("down", Action::MoveDown),
                ("left", Action::MoveLeft),
                ("right", Action::MoveRight),
                ("c", Action::Create),
                ("r", Action::Refresh),
                ("f5", Action::Refresh),
            ],
            KeymapPreset::Vim => &[
                ("k", Action::MoveUp),
                ("j", Action::MoveDown),
                ("h", Action::MoveLeft),
                ("l", Action::MoveRight),
                ("n", Action::NextMarker),
                ("p", Action::PrevMarker),
                ("o", Action::Create),
                ("r", Action::Refresh),
            ],
            KeymapPreset::Emacs => &[
                ("ctrl+p", Action::MoveUp),
                ("ctrl+n", Action::MoveDown),
                ("ctrl+b", Action::MoveLeft),
                ("ctrl+f", Action::MoveRight),
                ("ctrl+g", Action::Cancel),
                ("ctrl+o", Action::Create),
                ("ctrl+r", Action::Refresh),
            ],
        };

        // Arrows, Tab and the global keys work in every preset
        let shared: &[(&str, Action)] = &[
            ("up", Action::MoveUp),
            ("down", Action::MoveDown),
            ("left", Action::MoveLeft),
            ("right", Action::MoveRight),
            ("tab", Action::NextMarker),
            ("backtab", Action::PrevMarker),
            ("+", Action::ZoomIn),
            ("=", Action::ZoomIn),
            ("-", Action::ZoomOut),
            ("enter", Action::Confirm),
            ("esc", Action::Cancel),
            ("q", Action::Quit),
            ("ctrl+c", Action::Quit),
            ("?", Action::Help),
        ];

        let mut bindings: Vec<KeyBinding> = specific
            .iter()
            .map(|(key, action)| KeyBinding::new(key, *action))
            .collect();
        for (key, action) in shared {
            if !bindings.iter().any(|b| b.key == *key) {
                bindings.push(KeyBinding::new(key, *action));
            }
        }
        bindings
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}
