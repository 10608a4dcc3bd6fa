//! Console ray-caster (workspace facade crate).
//!
//! Re-exports the renderer crates under `console_raycaster::{core,input,term,types}`
//! and hosts the binary's configuration layer.

pub mod config;

pub use raycaster_core as core;
pub use raycaster_input as input;
pub use raycaster_term as term;
pub use raycaster_types as types;
