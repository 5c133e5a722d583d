// Reusable drawing pieces shared by the screens

pub mod footer;
pub mod help_overlay;
pub mod map_view;

pub use footer::Footer;
pub use help_overlay::HelpOverlay;
pub use map_view::{markers, MapView, MarkerSpec, Viewport};
