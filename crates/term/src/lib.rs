//! Terminal presentation layer.
//!
//! Rendered glyph frames from `core` are styled into a cell framebuffer
//! ([`SceneView`]) and flushed to the terminal with run-based diffing
//! ([`TerminalRenderer`]). Nothing here feeds back into the simulation.

pub mod fb;
pub mod renderer;
pub mod scene_view;

pub use raycaster_core as core;
pub use raycaster_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, PresentStats, TerminalRenderer};
pub use scene_view::{HudStats, Palette, SceneView};
