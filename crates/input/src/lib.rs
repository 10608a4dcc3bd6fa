//! Terminal input module (renderer-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::ViewerAction`] and keeps a held-key table that
//! works in terminals without key-release events.

pub mod handler;
pub mod map;

pub use raycaster_types as types;

pub use handler::InputHandler;
pub use map::{action_for_key, should_quit, toggle_for_key, ViewToggle};
