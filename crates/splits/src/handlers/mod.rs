//! HTTP request handlers for the splits API.
//!
//! This module re-exports handlers from focused submodules organized by domain.

pub mod docs;
pub mod handicap;
pub mod predict;
pub mod stats;
pub mod targets;

pub use docs::{ApiDoc, openapi_json};
pub use handicap::get_handicap;
pub use predict::predict_placement;
pub use stats::{health_check, list_checkpoints};
pub use targets::calculate_targets;
