//! Application services layer.
//!
//! Services keep asynchronous work out of the screens. The screens own their
//! state; services only tell them what finished and whether it is still
//! worth applying.

pub mod fetch_service;

pub use fetch_service::{FetchOutcome, FetchService};
