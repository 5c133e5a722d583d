//! Routes and the navigation stack.
//!
//! Screens never switch views themselves: they return
//! `ScreenAction::Navigate(route)` and the app hands the route to the
//! `NavigationStack`. Navigation is fire-and-forget; nothing is returned to
//! the screen that asked for it.

use serde_json::{json, Value};
use tracing::info;

/// A destination in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Root: the orphanages map
    OrphanagesMap,
    /// Details of one orphanage
    OrphanagesDetails { id: i64 },
    /// Location picker used to start registering a new orphanage
    SelectMapPosition,
}

impl Route {
    /// Route name as registered with the navigator
    pub fn name(&self) -> &'static str {
        match self {
            Route::OrphanagesMap => "OrphanagesMap",
            Route::OrphanagesDetails { .. } => "OrphanagesDetails",
            Route::SelectMapPosition => "SelectMapPosition",
        }
    }

    /// Route parameters, if the route takes any
    pub fn params(&self) -> Option<Value> {
        match self {
            Route::OrphanagesDetails { id } => Some(json!({ "id": id })),
            Route::OrphanagesMap | Route::SelectMapPosition => None,
        }
    }
}

/// Stack of visited routes. The root route is never popped.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    stack: Vec<Route>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::OrphanagesMap)
    }
}

impl NavigationStack {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    /// The visible route
    pub fn current(&self) -> Route {
        // stack always holds the root
        self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push `route` on top of the stack.
    pub fn navigate(&mut self, route: Route) {
        match route.params() {
            Some(params) => info!("navigate {} {}", route.name(), params),
            None => info!("navigate {}", route.name()),
        }
        self.stack.push(route);
    }

    /// Pop the visible route. Returns the popped route, or `None` at the root.
    pub fn go_back(&mut self) -> Option<Route> {
        if self.stack.len() <= 1 {
            return None;
        }
        let popped = self.stack.pop();
        info!("back to {}", self.current().name());
        popped
    }
}
