//! orphanmap - browse orphanages on a map in the terminal
//!
//! The library holds everything but process setup: the API client, the
//! sequenced fetch service, the screens and the router that drives them.

// Core modules
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod keymap;
pub mod models;
pub mod navigation;
pub mod router;
pub mod screens;
pub mod services;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use api::{ApiClient, ApiError, OrphanageApi};
pub use config::Config;
pub use models::{Coordinate, LocationRecord, Region};
pub use navigation::{NavigationStack, Route};

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
