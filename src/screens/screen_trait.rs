//! Screen trait and associated types.
//!
//! Screens own their state, draw themselves and turn input into a
//! `ScreenAction`. They never switch views or touch global state: the
//! router executes whatever action they return.

use crate::config::Config;
use crate::models::Coordinate;
use crate::navigation::Route;
use crate::widgets::Toast;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::runtime::Handle;

/// Context provided for rendering screens.
pub struct RenderContext<'a> {
    /// Application configuration.
    pub config: &'a Config,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

/// Context provided for handling events and lifecycle hooks.
pub struct ScreenContext<'a> {
    /// Application configuration.
    pub config: &'a Config,
    /// Runtime that fetches are spawned on.
    pub runtime: &'a Handle,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, runtime: &'a Handle) -> Self {
        Self { config, runtime }
    }
}

/// What a screen asks the router to do after an event or a tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenAction {
    /// Stay on the current screen.
    #[default]
    None,
    /// Push a route on the navigation stack.
    Navigate(Route),
    /// Pop the current screen.
    Back,
    /// The location picker confirmed a position.
    PositionSelected(Coordinate),
    /// Show a transient notification.
    Notify(Toast),
    /// Open help overlay.
    ShowHelp,
    /// Request to quit the application.
    Quit,
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::Navigate(Route::SelectMapPosition))
///     }
/// }
/// ```
pub trait Screen {
    /// Render the screen.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Called every time the screen becomes the top of the navigation stack,
    /// including the first time it is shown.
    fn on_focus(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }

    /// Called when another screen is pushed on top of this one.
    fn on_blur(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }

    /// Called on every tick of the UI loop, focused or not.
    ///
    /// Screens collect finished background work here.
    fn tick(&mut self) -> ScreenAction {
        ScreenAction::None
    }

    /// Called once when the screen is popped or the app shuts down.
    /// Nothing the screen started may change its state afterwards.
    fn unmount(&mut self) {}
}
