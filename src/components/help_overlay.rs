//! Help Overlay Component
//!
//! Displays current keybindings when user presses '?' key.

use crate::keymap::Keymap;
use crate::styles::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Renders the help overlay showing current keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    /// Centered popup area: 60% wide, 70% tall, bounded so it stays readable
    pub fn popup_area(area: Rect) -> Rect {
        let width = ((f32::from(area.width) * 0.60) as u16).clamp(40.min(area.width), 80);
        let height = ((f32::from(area.height) * 0.70) as u16).clamp(12.min(area.height), 30);
        Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width.min(area.width),
            height.min(area.height),
        )
    }

    /// Render the help overlay in the center of the screen
    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, config_path: &str) {
        let t = theme();
        let popup_area = Self::popup_area(area);

        frame.render_widget(Clear, popup_area);

        let title = format!(" Atalhos de teclado - predefinição {} ", keymap.preset.name());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(t.border_focused_style());

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [bindings_area, footer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(inner_area);

        let mut lines = vec![Line::from("")];
        for binding in keymap.all_bindings() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:12}", binding.display()),
                    t.title_style(),
                ),
                Span::styled(binding.action.description(), t.text_style()),
            ]));
        }

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            bindings_area,
        );

        let footer = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Edite os atalhos em: {}", config_path),
                t.muted_style(),
            )),
            Line::from(Span::styled(
                "Pressione qualquer tecla para fechar",
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(footer, footer_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_is_centered_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = HelpOverlay::popup_area(area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 28);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 6);
    }

    #[test]
    fn test_popup_fits_tiny_terminal() {
        let area = Rect::new(0, 0, 20, 8);
        let popup = HelpOverlay::popup_area(area);
        assert!(popup.width <= 20);
        assert!(popup.height <= 8);
    }
}
