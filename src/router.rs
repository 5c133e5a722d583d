//! Screen router: executes the actions screens return.
//!
//! Keeps one screen per entry of the navigation stack. Only the top screen
//! receives input, every mounted screen is ticked so its fetches are
//! collected, and popped screens are unmounted before they are dropped.
//! Notifications from screens below the top are dropped.

use crate::api::OrphanageApi;
use crate::components::HelpOverlay;
use crate::config::Config;
use crate::navigation::{NavigationStack, Route};
use crate::screens::{
    OrphanageDetailsScreen, OrphanagesMapScreen, RenderContext, Screen, ScreenAction,
    ScreenContext, SelectMapPositionScreen,
};
use crate::widgets::{Toast, ToastManager};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Router<A> {
    api: Arc<A>,
    nav: NavigationStack,
    /// Parallel to `nav`: `screens[i]` shows `nav` entry `i`
    screens: Vec<Box<dyn Screen>>,
    toasts: ToastManager,
    show_help: bool,
    should_quit: bool,
}

impl<A: OrphanageApi> Router<A> {
    pub fn new(api: Arc<A>, config: &Config) -> Self {
        let nav = NavigationStack::default();
        let root = Self::build_screen(&api, nav.current(), config);
        Self {
            api,
            nav,
            screens: vec![root],
            toasts: ToastManager::new(),
            show_help: false,
            should_quit: false,
        }
    }

    fn build_screen(api: &Arc<A>, route: Route, config: &Config) -> Box<dyn Screen> {
        match route {
            Route::OrphanagesMap => Box::new(OrphanagesMapScreen::new(Arc::clone(api), config.map)),
            Route::OrphanagesDetails { id } => {
                Box::new(OrphanageDetailsScreen::new(Arc::clone(api), id, config.map))
            }
            Route::SelectMapPosition => Box::new(SelectMapPositionScreen::new(config.map)),
        }
    }

    fn top(&mut self) -> Option<&mut Box<dyn Screen>> {
        self.screens.last_mut()
    }

    /// Focus the root screen for the first time
    pub fn start(&mut self, ctx: &ScreenContext) -> Result<()> {
        info!("showing {}", self.nav.current().name());
        if let Some(screen) = self.top() {
            screen.on_focus(ctx)?;
        }
        Ok(())
    }

    pub fn current_route(&self) -> Route {
        self.nav.current()
    }

    pub fn depth(&self) -> usize {
        self.nav.depth()
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn current_toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    pub fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<()> {
        if self.show_help {
            // any key closes help
            if matches!(&event, Event::Key(key) if key.kind == KeyEventKind::Press) {
                self.show_help = false;
            }
            return Ok(());
        }

        let action = match self.top() {
            Some(screen) => screen.handle_event(event, ctx)?,
            None => ScreenAction::None,
        };
        self.apply(action, ctx)
    }

    /// Collect finished work from every mounted screen and expire toasts
    pub fn tick(&mut self, ctx: &ScreenContext) -> Result<()> {
        let top = self.screens.len().saturating_sub(1);
        let actions: Vec<(usize, ScreenAction)> = self
            .screens
            .iter_mut()
            .map(|s| s.tick())
            .enumerate()
            .collect();
        for (index, action) in actions {
            match action {
                ScreenAction::Notify(toast) if index != top => {
                    debug!("dropping notification from a covered screen: {}", toast.message);
                }
                action => self.apply(action, ctx)?,
            }
        }
        self.toasts.tick();
        Ok(())
    }

    pub fn apply(&mut self, action: ScreenAction, ctx: &ScreenContext) -> Result<()> {
        match action {
            ScreenAction::None => {}
            ScreenAction::Navigate(route) => {
                if let Some(screen) = self.top() {
                    screen.on_blur(ctx)?;
                }
                let screen = Self::build_screen(&self.api, route, ctx.config);
                self.mount(route, screen, ctx)?;
            }
            ScreenAction::Back => {
                if self.nav.go_back().is_some() {
                    if let Some(mut popped) = self.screens.pop() {
                        popped.unmount();
                    }
                    if let Some(screen) = self.top() {
                        screen.on_focus(ctx)?;
                    }
                } else {
                    debug!("back ignored at the root screen");
                }
            }
            ScreenAction::PositionSelected(position) => {
                info!(
                    "position selected: {:.6}, {:.6}",
                    position.latitude, position.longitude
                );
                self.toasts.success(format!(
                    "Local selecionado: {:.6}, {:.6}",
                    position.latitude, position.longitude
                ));
                self.apply(ScreenAction::Back, ctx)?;
            }
            ScreenAction::Notify(toast) => self.toasts.push(toast),
            ScreenAction::ShowHelp => self.show_help = true,
            ScreenAction::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    /// Focus a new screen and only then push it; a failed focus leaves the
    /// stack untouched.
    fn mount(&mut self, route: Route, mut screen: Box<dyn Screen>, ctx: &ScreenContext) -> Result<()> {
        screen.on_focus(ctx)?;
        self.nav.navigate(route);
        self.screens.push(screen);
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame, ctx: &RenderContext, config_path: &str) -> Result<()> {
        let area = frame.area();
        if let Some(screen) = self.screens.last_mut() {
            screen.render(frame, area, ctx)?;
        }
        self.toasts.render(frame, area);
        if self.show_help {
            HelpOverlay::render(frame, area, &ctx.config.keymap, config_path);
        }
        Ok(())
    }

    /// Unmount every screen, top first
    pub fn shutdown(&mut self) {
        while let Some(mut screen) = self.screens.pop() {
            screen.unmount();
        }
    }
}
