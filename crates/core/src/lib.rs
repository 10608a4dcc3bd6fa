//! Core renderer module - pure, deterministic, and testable
//!
//! This crate contains the ray-casting pipeline and the state it reads. It has
//! **no dependencies** on terminals, input devices, or clocks, which keeps it:
//!
//! - **Deterministic**: the same map, viewer, and config always render the same frame
//! - **Testable**: every stage can be exercised headless
//! - **Portable**: the glyph buffer can be presented by any backend
//!
//! # Module Structure
//!
//! - [`map`]: immutable wall grid with text parsing and bounds-checked lookups
//! - [`viewer`]: viewer position/heading and per-frame movement
//! - [`raycast`]: fixed-step ray marching with out-of-bounds and max-depth saturation
//! - [`projector`]: wall distance to ceiling/floor rows and a shade tier
//! - [`frame`]: per-column render loop into a reusable glyph buffer
//! - [`simulation`]: the context object the frame loop owns
//!
//! # Pipeline
//!
//! For each screen column `x`:
//!
//! 1. `angle = heading - fov/2 + (x / width) * fov`
//! 2. march a ray from the viewer until it enters a wall, leaves the map, or
//!    reaches `max_depth`
//! 3. `ceiling = h/2 - h/distance`, `floor = h - ceiling`, shade by distance band
//! 4. write the shade glyph for rows in `[ceiling, floor)` and background elsewhere
//!
//! # Example
//!
//! ```
//! use raycaster_core::Simulation;
//! use raycaster_types::MoveInput;
//!
//! let mut sim = Simulation::default().with_size(80, 24);
//! let frame = sim.step(MoveInput::default(), 0.016);
//! assert_eq!(frame.width(), 80);
//!
//! // The default viewer faces a pillar; the center column sees a wall.
//! assert!(frame.columns()[40].hit.hit);
//! ```

pub mod frame;
pub mod map;
pub mod projector;
pub mod raycast;
pub mod simulation;
pub mod viewer;

pub use raycaster_types as types;

// Re-export commonly used types for convenience
pub use frame::{render, render_into, ColumnSample, Frame, RenderConfig};
pub use map::{Map, MapError, DEFAULT_MAP};
pub use projector::{project, ColumnProjection};
pub use raycast::{cast, cast_with_step, HitKind, RayHit, RayMarch, RaySample};
pub use simulation::Simulation;
pub use viewer::{MotionConfig, ViewerState};
