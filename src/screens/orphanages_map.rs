//! Orphanages map screen controller.
//!
//! Root screen of the app. Every time it gains focus it fetches the full
//! orphanage listing and replaces its state with the response; the map,
//! the markers and the footer counter are all derived from that list on
//! each render.
//!
//! The viewport starts at the configured region. Arrow keys pan it, `+`/`-`
//! zoom, and selecting a marker outside it re-centers the map on that marker.

use crate::api::OrphanageApi;
use crate::components::map_view::{markers, MapView, MarkerSpec, Viewport};
use crate::components::Footer;
use crate::keymap::{Action, Keymap};
use crate::models::{LocationRecord, Region};
use crate::navigation::Route;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{FetchOutcome, FetchService};
use crate::styles::theme;
use crate::widgets::Toast;
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info};

/// Fraction of the visible span one pan step moves
const PAN_FRACTION: f64 = 0.25;
/// Span multiplier of one zoom step
const ZOOM_STEP: f64 = 2.0;

/// The orphanages map: markers for every record, create button, counter.
pub struct OrphanagesMapScreen<A> {
    api: Arc<A>,
    /// Records in server order; replaced wholesale on each committed fetch
    orphanages: Vec<LocationRecord>,
    /// Id of the marker whose callout is open
    selected: Option<i64>,
    /// Current viewport; starts at the configured region
    region: Region,
    fetches: FetchService<Vec<LocationRecord>>,
    last_refreshed: Option<DateTime<Local>>,
    /// Where the map and the create button were last drawn (mouse hit-testing)
    map_area: Rect,
    button_area: Rect,
}

impl<A: OrphanageApi> OrphanagesMapScreen<A> {
    pub fn new(api: Arc<A>, region: Region) -> Self {
        Self {
            api,
            orphanages: Vec::new(),
            selected: None,
            region,
            fetches: FetchService::new("orphanages"),
            last_refreshed: None,
            map_area: Rect::default(),
            button_area: Rect::default(),
        }
    }

    /// Issue a fresh `GET orphanages`. Earlier requests are left running;
    /// whichever was issued last wins.
    pub fn refresh(&mut self, runtime: &Handle) -> Option<u64> {
        let api = Arc::clone(&self.api);
        self.fetches
            .start(runtime, async move { api.list_orphanages().await })
    }

    /// Navigation for a pressed callout. The id is not checked against the state.
    pub fn on_marker_activate(&self, id: i64) -> ScreenAction {
        ScreenAction::Navigate(Route::OrphanagesDetails { id })
    }

    pub fn on_create_request(&self) -> ScreenAction {
        ScreenAction::Navigate(Route::SelectMapPosition)
    }

    pub fn orphanages(&self) -> &[LocationRecord] {
        &self.orphanages
    }

    pub fn markers(&self) -> Vec<MarkerSpec> {
        markers(&self.orphanages)
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Shift the viewport by whole pan steps (a quarter of the span each)
    pub fn pan(&mut self, north_steps: f64, east_steps: f64) {
        self.region = self
            .region
            .panned(north_steps * PAN_FRACTION, east_steps * PAN_FRACTION);
    }

    pub fn zoom_in(&mut self) {
        self.region = self.region.zoomed(1.0 / ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.region = self.region.zoomed(ZOOM_STEP);
    }

    pub fn is_refreshing(&self) -> bool {
        self.fetches.in_flight() > 0
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Local>> {
        self.last_refreshed
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.orphanages.iter().position(|o| o.id == id)
    }

    /// Open the callout of the next marker (wrapping)
    pub fn select_next(&mut self) {
        if self.orphanages.is_empty() {
            return;
        }
        let next = match self.selected_index() {
            Some(i) => (i + 1) % self.orphanages.len(),
            None => 0,
        };
        self.selected = Some(self.orphanages[next].id);
        self.reveal_selected();
    }

    /// Open the callout of the previous marker (wrapping)
    pub fn select_prev(&mut self) {
        if self.orphanages.is_empty() {
            return;
        }
        let prev = match self.selected_index() {
            Some(0) | None => self.orphanages.len() - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(self.orphanages[prev].id);
        self.reveal_selected();
    }

    /// Re-center the viewport on the selected record if it is out of view
    fn reveal_selected(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        let coordinate = self.orphanages[index].coordinate();
        if !self.region.contains(coordinate) {
            debug!("orphanages: centering on off-screen record {}", self.orphanages[index].id);
            self.region = self.region.centered_on(coordinate);
        }
    }

    pub fn select(&mut self, id: Option<i64>) {
        self.selected = id;
    }

    fn apply_listing(&mut self, token: u64, orphanages: Vec<LocationRecord>) {
        info!("orphanages: showing {} records (fetch #{})", orphanages.len(), token);
        self.orphanages = orphanages;
        if self.selected.is_some() && self.selected_index().is_none() {
            debug!("orphanages: selected record is gone, clearing selection");
            self.selected = None;
        }
        self.last_refreshed = Some(Local::now());
    }

    fn handle_action(&mut self, action: Action, ctx: &ScreenContext) -> ScreenAction {
        match action {
            Action::NextMarker => {
                self.select_next();
                ScreenAction::None
            }
            Action::PrevMarker => {
                self.select_prev();
                ScreenAction::None
            }
            Action::MoveUp => {
                self.pan(1.0, 0.0);
                ScreenAction::None
            }
            Action::MoveDown => {
                self.pan(-1.0, 0.0);
                ScreenAction::None
            }
            Action::MoveLeft => {
                self.pan(0.0, -1.0);
                ScreenAction::None
            }
            Action::MoveRight => {
                self.pan(0.0, 1.0);
                ScreenAction::None
            }
            Action::ZoomIn => {
                self.zoom_in();
                ScreenAction::None
            }
            Action::ZoomOut => {
                self.zoom_out();
                ScreenAction::None
            }
            Action::Confirm => match self.selected {
                Some(id) => self.on_marker_activate(id),
                None => ScreenAction::None,
            },
            Action::Cancel => {
                self.selected = None;
                ScreenAction::None
            }
            Action::Create => self.on_create_request(),
            Action::Refresh => {
                self.refresh(ctx.runtime);
                ScreenAction::None
            }
            Action::Help => ScreenAction::ShowHelp,
            Action::Quit => ScreenAction::Quit,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> ScreenAction {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.button_area.contains(position) {
                    return self.on_create_request();
                }
                if !self.map_area.contains(position) {
                    return ScreenAction::None;
                }

                let viewport = Viewport::new(self.region, self.map_area);
                let markers = self.markers();

                let on_open_callout = self
                    .selected
                    .and_then(|id| markers.iter().find(|m| m.key == id))
                    .and_then(|m| viewport.callout_rect(m).map(|rect| (m, rect)))
                    .filter(|(_, rect)| rect.contains(position));
                if let Some((marker, _)) = on_open_callout {
                    return ScreenAction::Navigate(marker.callout.on_press);
                }

                match viewport.hit_test(&markers, position) {
                    Some(marker) if self.selected == Some(marker.key) => {
                        self.on_marker_activate(marker.key)
                    }
                    Some(marker) => {
                        self.selected = Some(marker.key);
                        ScreenAction::None
                    }
                    None => {
                        self.selected = None;
                        ScreenAction::None
                    }
                }
            }
            MouseEventKind::ScrollDown => {
                self.select_next();
                ScreenAction::None
            }
            MouseEventKind::ScrollUp => {
                self.select_prev();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn hints(keymap: &Keymap) -> String {
        format!(
            "Selecionar: {} | Abrir: {} | Zoom: {}/{} | Ajuda: {} | Sair: {}",
            keymap.key_for(Action::NextMarker),
            keymap.key_for(Action::Confirm),
            keymap.key_for(Action::ZoomIn),
            keymap.key_for(Action::ZoomOut),
            keymap.key_for(Action::Help),
            keymap.key_for(Action::Quit),
        )
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let mut spans = vec![Span::styled(" Orfanatos ", t.title_style())];
        if self.is_refreshing() {
            spans.push(Span::styled("⟳ atualizando ", t.muted_style()));
        }
        if let Some(at) = self.last_refreshed {
            spans.push(Span::styled(
                format!("atualizado às {}", at.format("%H:%M:%S")),
                t.muted_style(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl<A: OrphanageApi> Screen for OrphanagesMapScreen<A> {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let [header_area, map_block_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .areas(area);

        self.render_header(frame, header_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style());
        self.map_area = block.inner(map_block_area);
        frame.render_widget(block, map_block_area);

        let markers = self.markers();
        frame.render_widget(
            MapView::new(self.region, &markers).selected(self.selected),
            self.map_area,
        );

        self.button_area = Footer::render(
            frame,
            footer_area,
            self.orphanages.len(),
            &Self::hints(&ctx.config.keymap),
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match ctx.config.keymap.get_action(key.code, key.modifiers) {
                    Some(action) => self.handle_action(action, ctx),
                    None => ScreenAction::None,
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => ScreenAction::None,
        })
    }

    fn on_focus(&mut self, ctx: &ScreenContext) -> Result<()> {
        self.refresh(ctx.runtime);
        Ok(())
    }

    fn tick(&mut self) -> ScreenAction {
        let mut action = ScreenAction::None;
        for outcome in self.fetches.poll() {
            match outcome {
                FetchOutcome::Success { token, value } => self.apply_listing(token, value),
                FetchOutcome::Failure {
                    error,
                    latest: true,
                    ..
                } => {
                    action = ScreenAction::Notify(Toast::error(format!(
                        "Não foi possível carregar os orfanatos: {}",
                        error
                    )));
                }
                FetchOutcome::Failure { .. } => {}
            }
        }
        action
    }

    fn unmount(&mut self) {
        self.fetches.unmount();
    }
}
