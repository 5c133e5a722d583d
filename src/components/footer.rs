use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Label of the create button drawn at the right edge of the footer
pub const CREATE_BUTTON: &str = "[ + ]";

/// Counter text for the number of orphanages currently on screen
pub fn counter_label(count: usize) -> String {
    format!("{} orfanatos encontrados", count)
}

/// Color key hints written as `Label: key | Label: key`
pub fn hint_spans(text: &str) -> Vec<Span<'_>> {
    let t = theme();
    let mut spans = Vec::new();

    for (i, part) in text.split(" | ").enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", t.border_style()));
        }

        if let Some((label, keys)) = part.split_once(": ") {
            spans.push(Span::styled(format!("{}: ", label), t.muted_style()));
            spans.push(Span::styled(keys, t.title_style()));
        } else {
            spans.push(Span::styled(part, t.text_style()));
        }
    }
    spans
}

/// Footer bar of the orphanages map: counter, key hints and the create button
pub struct Footer;

impl Footer {
    /// Render the footer into `area` (3 lines: bordered, one row of content).
    ///
    /// Returns the cells covered by the create button so mouse clicks can be
    /// matched against it.
    pub fn render(frame: &mut Frame, area: Rect, count: usize, hints: &str) -> Rect {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let counter = counter_label(count);
        let [counter_area, hints_area, button_area] = Layout::horizontal([
            Constraint::Length(counter.chars().count() as u16 + 2),
            Constraint::Min(0),
            Constraint::Length(CREATE_BUTTON.chars().count() as u16 + 1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {}", counter), t.muted_style())),
            counter_area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(hint_spans(hints))).alignment(Alignment::Center),
            hints_area,
        );

        let button = Rect {
            width: button_area.width.min(CREATE_BUTTON.chars().count() as u16),
            ..button_area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(CREATE_BUTTON, t.button_style())),
            button,
        );
        button
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_counter_label() {
        assert_eq!(counter_label(0), "0 orfanatos encontrados");
        assert_eq!(counter_label(3), "3 orfanatos encontrados");
    }

    #[test]
    fn test_hint_spans_split_label_and_keys() {
        let spans = hint_spans("Abrir: Enter | Sair: q");
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Abrir: Enter | Sair: q");
        assert_eq!(spans.len(), 5);
    }

    #[test]
    fn test_footer_renders_counter_and_button() {
        let mut terminal = Terminal::new(TestBackend::new(80, 3)).unwrap();
        let mut button = Rect::default();
        terminal
            .draw(|frame| {
                button = Footer::render(frame, frame.area(), 0, "Sair: q");
            })
            .unwrap();

        let row = row_text(&terminal, 1);
        assert!(row.contains("0 orfanatos encontrados"), "{}", row);
        assert!(row.contains(CREATE_BUTTON), "{}", row);
        assert_eq!(button.y, 1);
        assert_eq!(button.width, 5);
        assert!(button.right() <= 79);
    }
}
