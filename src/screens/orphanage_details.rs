//! Orphanage details screen controller.
//!
//! Opened from a marker callout with the record id as its only parameter.
//! Loads `GET orphanages/{id}` on focus through the same sequenced fetch
//! service as the map.

use crate::api::OrphanageApi;
use crate::components::footer::hint_spans;
use crate::components::map_view::{markers, MapView};
use crate::keymap::Action;
use crate::models::{LocationRecord, Region};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{FetchOutcome, FetchService};
use crate::styles::theme;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsState {
    Loading,
    Loaded(LocationRecord),
    Failed(String),
}

pub struct OrphanageDetailsScreen<A> {
    api: Arc<A>,
    id: i64,
    state: DetailsState,
    /// Span of the small map, centered on the record once loaded
    span: Region,
    fetches: FetchService<LocationRecord>,
}

impl<A: OrphanageApi> OrphanageDetailsScreen<A> {
    pub fn new(api: Arc<A>, id: i64, span: Region) -> Self {
        Self {
            api,
            id,
            state: DetailsState::Loading,
            span,
            fetches: FetchService::new("orphanage details"),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn state(&self) -> &DetailsState {
        &self.state
    }

    pub fn load(&mut self, runtime: &Handle) -> Option<u64> {
        let api = Arc::clone(&self.api);
        let id = self.id;
        self.fetches
            .start(runtime, async move { api.get_orphanage(id).await })
    }

    fn record_region(&self, record: &LocationRecord) -> Region {
        Region {
            latitude: record.latitude,
            longitude: record.longitude,
            ..self.span
        }
    }
}

impl<A: OrphanageApi> Screen for OrphanageDetailsScreen<A> {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" Orfanato #{} ", self.id))
            .border_style(t.border_focused_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [info_area, map_area, hint_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let lines = match &self.state {
            DetailsState::Loading => vec![Line::from(Span::styled("Carregando…", t.muted_style()))],
            DetailsState::Failed(message) => {
                vec![Line::from(Span::styled(message.clone(), t.error_style()))]
            }
            DetailsState::Loaded(record) => vec![
                Line::from(Span::styled(record.name.clone(), t.title_style())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Latitude:  ", t.muted_style()),
                    Span::styled(format!("{:.6}", record.latitude), t.text_style()),
                ]),
                Line::from(vec![
                    Span::styled("Longitude: ", t.muted_style()),
                    Span::styled(format!("{:.6}", record.longitude), t.text_style()),
                ]),
            ],
        };
        frame.render_widget(Paragraph::new(lines), info_area);

        if let DetailsState::Loaded(record) = &self.state {
            let pins = markers(std::slice::from_ref(record));
            frame.render_widget(
                MapView::new(self.record_region(record), &pins),
                map_area,
            );
        }

        let keymap = &ctx.config.keymap;
        let hint = format!(
            "Voltar: {} | Atualizar: {} | Sair: {}",
            keymap.key_for(Action::Cancel),
            keymap.key_for(Action::Refresh),
            keymap.key_for(Action::Quit),
        );
        frame.render_widget(
            Paragraph::new(Line::from(hint_spans(&hint)))
                .alignment(Alignment::Center),
            hint_area,
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        Ok(match ctx.config.keymap.get_action(key.code, key.modifiers) {
            Some(Action::Cancel) => ScreenAction::Back,
            Some(Action::Refresh) => {
                self.load(ctx.runtime);
                ScreenAction::None
            }
            Some(Action::Help) => ScreenAction::ShowHelp,
            Some(Action::Quit) => ScreenAction::Quit,
            _ => ScreenAction::None,
        })
    }

    fn on_focus(&mut self, ctx: &ScreenContext) -> Result<()> {
        self.load(ctx.runtime);
        Ok(())
    }

    fn tick(&mut self) -> ScreenAction {
        for outcome in self.fetches.poll() {
            match outcome {
                FetchOutcome::Success { value, .. } => {
                    info!("orphanage details: loaded #{} ({})", value.id, value.name);
                    self.state = DetailsState::Loaded(value);
                }
                // keep showing a loaded record if only a refresh failed
                FetchOutcome::Failure {
                    error,
                    latest: true,
                    ..
                } if !matches!(self.state, DetailsState::Loaded(_)) => {
                    self.state = DetailsState::Failed(format!(
                        "Não foi possível carregar o orfanato: {}",
                        error
                    ));
                }
                FetchOutcome::Failure { .. } => {}
            }
        }
        ScreenAction::None
    }

    fn unmount(&mut self) {
        self.fetches.unmount();
    }
}
