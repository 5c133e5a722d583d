//! Location picker for registering a new orphanage.
//!
//! Shows the configured region with a crosshair. Arrow keys nudge the
//! crosshair, a left click drops it on the clicked cell, Enter confirms.

use crate::components::footer::hint_spans;
use crate::components::map_view::{MapView, Viewport};
use crate::keymap::Action;
use crate::models::{Coordinate, Region};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Cursor moves by this fraction of the visible span per key press
const STEPS_PER_SPAN: f64 = 20.0;

pub struct SelectMapPositionScreen {
    region: Region,
    cursor: Coordinate,
    map_area: Rect,
}

impl SelectMapPositionScreen {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            cursor: region.center(),
            map_area: Rect::default(),
        }
    }

    pub fn cursor(&self) -> Coordinate {
        self.cursor
    }

    /// Move the cursor by whole steps, staying inside the region
    pub fn nudge(&mut self, north_steps: f64, east_steps: f64) {
        self.cursor = self.region.clamp(Coordinate {
            latitude: self.cursor.latitude
                + north_steps * self.region.latitude_delta / STEPS_PER_SPAN,
            longitude: self.cursor.longitude
                + east_steps * self.region.longitude_delta / STEPS_PER_SPAN,
        });
    }

    /// Drop the cursor on a terminal cell of the map. Ignored outside the map.
    pub fn place_at(&mut self, position: Position) -> bool {
        match Viewport::new(self.region, self.map_area).to_coordinate(position) {
            Some(coordinate) => {
                self.cursor = coordinate;
                true
            }
            None => false,
        }
    }
}

impl Screen for SelectMapPositionScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let [header_area, map_block_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Selecione um local no mapa ", t.title_style()),
                Span::styled(
                    format!("{:.6}, {:.6}", self.cursor.latitude, self.cursor.longitude),
                    t.muted_style(),
                ),
            ])),
            header_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style());
        self.map_area = block.inner(map_block_area);
        frame.render_widget(block, map_block_area);
        frame.render_widget(
            MapView::new(self.region, &[]).cursor(Some(self.cursor)),
            self.map_area,
        );

        let keymap = &ctx.config.keymap;
        let hint = format!(
            "Mover: setas/clique | Confirmar: {} | Voltar: {}",
            keymap.key_for(Action::Confirm),
            keymap.key_for(Action::Cancel),
        );
        frame.render_widget(
            Paragraph::new(Line::from(hint_spans(&hint))).alignment(Alignment::Center),
            footer_area,
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(action) = ctx.config.keymap.get_action(key.code, key.modifiers) else {
                    return Ok(ScreenAction::None);
                };
                Ok(match action {
                    Action::MoveUp => {
                        self.nudge(1.0, 0.0);
                        ScreenAction::None
                    }
                    Action::MoveDown => {
                        self.nudge(-1.0, 0.0);
                        ScreenAction::None
                    }
                    Action::MoveLeft => {
                        self.nudge(0.0, -1.0);
                        ScreenAction::None
                    }
                    Action::MoveRight => {
                        self.nudge(0.0, 1.0);
                        ScreenAction::None
                    }
                    Action::Confirm => ScreenAction::PositionSelected(self.cursor),
                    Action::Cancel => ScreenAction::Back,
                    Action::Help => ScreenAction::ShowHelp,
                    Action::Quit => ScreenAction::Quit,
                    _ => ScreenAction::None,
                })
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.place_at(Position::new(mouse.column, mouse.row));
                Ok(ScreenAction::None)
            }
            _ => Ok(ScreenAction::None),
        }
    }
}
