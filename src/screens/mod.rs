//! Screen controllers for the application.
//!
//! Each screen implements the `Screen` trait, owns its state and turns input
//! into a `ScreenAction`. The router keeps one screen per entry of the
//! navigation stack.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                        App                           │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │                  Router                        │  │
//! │  │  NavigationStack  +  one Box<dyn Screen>       │  │
//! │  │  per route; only the top one gets input        │  │
//! │  └────────────────────────────────────────────────┘  │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │               Screen Trait                     │  │
//! │  │  - render(frame, area, context)                │  │
//! │  │  - handle_event(event, context) -> Action      │  │
//! │  │  - on_focus / on_blur / tick / unmount         │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod orphanage_details;
pub mod orphanages_map;
pub mod screen_trait;
pub mod select_map_position;

pub use orphanage_details::{DetailsState, OrphanageDetailsScreen};
pub use orphanages_map::OrphanagesMapScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
pub use select_map_position::SelectMapPositionScreen;
