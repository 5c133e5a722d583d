//! Key binding strings such as "ctrl+r", "shift+tab" or "j".

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Maps one key combination to an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key string (e.g., "j", "down", "ctrl+r")
    pub key: String,
    pub action: Action,
}

/// A key string resolved to crossterm types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }

    /// Whether this binding matches a key event. Unparseable keys never match.
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        parse_key_string(&self.key)
            .map(|parsed| parsed.code == code && parsed.modifiers == modifiers)
            .unwrap_or(false)
    }

    /// Display form for help and footer hints (e.g., "Ctrl+R")
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }
}

/// Parse "ctrl+shift+n" style strings. The last `+`-separated part is the key.
pub fn parse_key_string(key: &str) -> Result<ParsedKey, String> {
    let key = key.trim().to_lowercase();
    let (modifier_parts, key_part) = match key.rsplit_once('+') {
        // A bare "+" is the plus key itself
        Some((mods, "")) if mods.is_empty() => ("", "+"),
        Some((mods, "")) => (mods.trim_end_matches('+'), "+"),
        Some((mods, last)) => (mods, last),
        None => ("", key.as_str()),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts.split('+').filter(|p| !p.is_empty()) {
        modifiers |= match part.trim() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "option" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            other => return Err(format!("Unknown modifier: {}", other)),
        };
    }

    Ok(ParsedKey {
        code: parse_key_code(key_part.trim())?,
        modifiers,
    })
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    let code = match key {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        _ => {
            if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                KeyCode::F(n)
            } else {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(format!("Unknown key: {}", key)),
                }
            }
        }
    };
    Ok(code)
}

/// Format a key string for display (e.g., "ctrl+r" -> "Ctrl+R")
pub fn format_key_display(key: &str) -> String {
    if key.trim() == "+" {
        return "+".to_string();
    }
    key.split('+')
        .map(|part| match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => "Ctrl".to_string(),
            "alt" | "option" => "Alt".to_string(),
            "shift" => "Shift".to_string(),
            "up" => "↑".to_string(),
            "down" => "↓".to_string(),
            "left" => "←".to_string(),
            "right" => "→".to_string(),
            "enter" | "return" => "Enter".to_string(),
            "esc" | "escape" => "Esc".to_string(),
            "tab" => "Tab".to_string(),
            "backtab" => "Shift+Tab".to_string(),
            "space" => "Space".to_string(),
            other if other.chars().count() == 1 => other.to_uppercase(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("+")
}
