//! Theme and style system
//!
//! One global palette, selected at startup from the config's `theme` value.
//! The dark and light palettes share the teal/blue brand colours of the
//! orphanages app.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// Brand teal used for markers and the create button (#15c3d6)
const TEAL: Color = Color::Rgb(0x15, 0xc3, 0xd6);
/// Callout label blue (#0089a5)
const CALLOUT_BLUE: Color = Color::Rgb(0x00, 0x89, 0xa5);
/// Footer label grey (#8fa7b3)
const SLATE: Color = Color::Rgb(0x8f, 0xa7, 0xb3);

static THEME: RwLock<Theme> = RwLock::new(Theme {
    theme_type: ThemeType::Dark,
    primary: TEAL,
    callout: CALLOUT_BLUE,
    callout_bg: Color::White,
    marker: TEAL,
    land: Color::DarkGray,
    text: Color::White,
    text_muted: SLATE,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    border: Color::DarkGray,
    background: Color::Reset,
});

/// Install the global theme (once at startup)
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = Theme::new(theme_type);
}

/// Current theme
pub fn theme() -> Theme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// No colours at all (`NO_COLOR=1` or theme = "nocolor")
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,
    /// Titles, focused borders, the create button
    pub primary: Color,
    /// Callout label text
    pub callout: Color,
    /// Callout bubble background
    pub callout_bg: Color,
    /// Map pins
    pub marker: Color,
    /// Coastlines drawn under the pins
    pub land: Color,
    pub text: Color,
    /// Footer counter and hints
    pub text_muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
    pub background: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            primary: TEAL,
            callout: CALLOUT_BLUE,
            callout_bg: Color::White,
            marker: TEAL,
            land: Color::DarkGray,
            text: Color::White,
            text_muted: SLATE,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::DarkGray,
            background: Color::Reset,
        }
    }

    pub fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            primary: CALLOUT_BLUE,
            callout: CALLOUT_BLUE,
            callout_bg: Color::Gray,
            marker: CALLOUT_BLUE,
            land: Color::Gray,
            text: Color::Black,
            text_muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            error: Color::Red,
            border: Color::DarkGray,
            background: Color::Reset,
        }
    }

    /// Palette values are unused here; the helpers below fall back to modifiers.
    pub fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            primary: Color::Reset,
            callout: Color::Reset,
            callout_bg: Color::Reset,
            marker: Color::Reset,
            land: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            border: Color::Reset,
            background: Color::Reset,
        }
    }

    fn is_plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    pub fn title_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::DIM);
        }
        Style::default().fg(self.text_muted)
    }

    pub fn marker_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.marker).add_modifier(Modifier::BOLD)
    }

    /// Callout bubble: label colour on the bubble background
    pub fn callout_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        Style::default()
            .fg(self.callout)
            .bg(self.callout_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// The `[ + ]` create button
    pub fn button_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        Style::default()
            .fg(Color::White)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn land_color(&self) -> Color {
        if self.is_plain() {
            return Color::Reset;
        }
        self.land
    }

    pub fn error_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.error)
    }

    pub fn border_style(&self) -> Style {
        if self.is_plain() {
            return Style::default();
        }
        Style::default().fg(self.border)
    }

    pub fn border_focused_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.primary)
    }
}
