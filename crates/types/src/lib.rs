//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types shared by the renderer core, the
//! input layer, and the terminal presenter. All types are plain data with no
//! external dependencies.
//!
//! # Screen and World Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCREEN_WIDTH` | 120 | Default character columns |
//! | `SCREEN_HEIGHT` | 40 | Default character rows |
//! | `MAX_DEPTH` | 16.0 | Ray range limit in map cells |
//! | `DEFAULT_STEP` | 0.1 | Ray march step in map cells |
//! | `MIN_STEP` | 0.001 | Finest accepted march step |
//! | `DEFAULT_FOV` | π/4 | Horizontal field of view in radians |
//! | `WALKING_SPEED` | 1.0 | Cells per second |
//! | `ROTATION_SPEED` | 0.5 | Radians per second |
//!
//! # Shading
//!
//! Wall columns are shaded by distance into four bands, nearest first:
//!
//! | Tier | Glyph | Distance band |
//! |------|-------|---------------|
//! | `Full` | `█` | `d < depth/4` |
//! | `Dark` | `▓` | `d < depth/3` |
//! | `Medium` | `▒` | `d < depth/2` |
//! | `Light` | `░` | `d < depth` |
//! | `Background` | ` ` | otherwise |
//!
//! # Examples
//!
//! ```
//! use raycaster_types::{ShadeTier, ViewerAction, MoveInput, MAX_DEPTH};
//!
//! assert_eq!(ShadeTier::for_distance(1.0, MAX_DEPTH), ShadeTier::Full);
//! assert_eq!(ShadeTier::for_distance(MAX_DEPTH, MAX_DEPTH).glyph(), ' ');
//!
//! let mut input = MoveInput::default();
//! input.set(ViewerAction::MoveForward, true);
//! assert!(input.forward);
//! assert!(!input.is_idle());
//! ```

use std::f32::consts::PI;

/// Default screen width in character columns
pub const SCREEN_WIDTH: u16 = 120;

/// Default screen height in character rows
pub const SCREEN_HEIGHT: u16 = 40;

/// Ray range limit in map cells
pub const MAX_DEPTH: f32 = 16.0;

/// Ray march step length in map cells
pub const DEFAULT_STEP: f32 = 0.1;

/// Smallest accepted ray march step; finer steps are raised to this
pub const MIN_STEP: f32 = 1e-3;

/// Horizontal field of view in radians (45°)
pub const DEFAULT_FOV: f32 = PI / 4.0;

/// Forward/backward speed in map cells per second
pub const WALKING_SPEED: f32 = 1.0;

/// Turning speed in radians per second
pub const ROTATION_SPEED: f32 = 0.5;

/// Distances at or below this are treated as touching the viewer.
pub const NEAR_EPSILON: f32 = 1e-4;

/// Target frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Largest elapsed time fed into a single movement update
pub const MAX_FRAME_DT_MS: u32 = 100;

/// Discrete distance bucket used to pick a wall glyph.
///
/// Ordered from most to least opaque; `Background` means no wall is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShadeTier {
    Full,
    Dark,
    Medium,
    Light,
    Background,
}

impl ShadeTier {
    /// All tiers, nearest first.
    pub const ALL: [ShadeTier; 5] = [
        ShadeTier::Full,
        ShadeTier::Dark,
        ShadeTier::Medium,
        ShadeTier::Light,
        ShadeTier::Background,
    ];

    /// Pick the tier for a wall `distance` away with the given ray range.
    ///
    /// # Examples
    ///
    /// ```
    /// use raycaster_types::ShadeTier;
    ///
    /// assert_eq!(ShadeTier::for_distance(3.9, 16.0), ShadeTier::Full);
    /// assert_eq!(ShadeTier::for_distance(4.0, 16.0), ShadeTier::Dark);
    /// assert_eq!(ShadeTier::for_distance(6.0, 16.0), ShadeTier::Medium);
    /// assert_eq!(ShadeTier::for_distance(15.9, 16.0), ShadeTier::Light);
    /// assert_eq!(ShadeTier::for_distance(16.0, 16.0), ShadeTier::Background);
    /// ```
    pub fn for_distance(distance: f32, max_depth: f32) -> Self {
        if distance < max_depth / 4.0 {
            ShadeTier::Full
        } else if distance < max_depth / 3.0 {
            ShadeTier::Dark
        } else if distance < max_depth / 2.0 {
            ShadeTier::Medium
        } else if distance < max_depth {
            ShadeTier::Light
        } else {
            ShadeTier::Background
        }
    }

    /// Glyph written into the frame for wall rows of this tier.
    pub fn glyph(&self) -> char {
        match self {
            ShadeTier::Full => '\u{2588}',
            ShadeTier::Dark => '\u{2593}',
            ShadeTier::Medium => '\u{2592}',
            ShadeTier::Light => '\u{2591}',
            ShadeTier::Background => BACKGROUND_GLYPH,
        }
    }

    /// Reverse lookup from a frame glyph.
    pub fn from_glyph(ch: char) -> Option<Self> {
        ShadeTier::ALL.into_iter().find(|t| t.glyph() == ch)
    }

    pub fn is_wall(&self) -> bool {
        *self != ShadeTier::Background
    }
}

/// Glyph used for ceiling, floor, and out-of-range columns
pub const BACKGROUND_GLYPH: char = ' ';

/// Movement commands the viewer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerAction {
    /// Rotate heading counter-clockwise on the map (decreasing angle)
    TurnLeft,
    /// Rotate heading clockwise on the map (increasing angle)
    TurnRight,
    /// Walk along the heading
    MoveForward,
    /// Walk against the heading
    MoveBackward,
}

impl ViewerAction {
    pub const ALL: [ViewerAction; 4] = [
        ViewerAction::TurnLeft,
        ViewerAction::TurnRight,
        ViewerAction::MoveForward,
        ViewerAction::MoveBackward,
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use raycaster_types::ViewerAction;
    ///
    /// assert_eq!(ViewerAction::from_str("turnLeft"), Some(ViewerAction::TurnLeft));
    /// assert_eq!(ViewerAction::from_str("FORWARD"), Some(ViewerAction::MoveForward));
    /// assert_eq!(ViewerAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "turnleft" | "left" => Some(ViewerAction::TurnLeft),
            "turnright" | "right" => Some(ViewerAction::TurnRight),
            "moveforward" | "forward" => Some(ViewerAction::MoveForward),
            "movebackward" | "backward" => Some(ViewerAction::MoveBackward),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerAction::TurnLeft => "turnLeft",
            ViewerAction::TurnRight => "turnRight",
            ViewerAction::MoveForward => "moveForward",
            ViewerAction::MoveBackward => "moveBackward",
        }
    }
}

/// The four boolean movement commands sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl MoveInput {
    pub fn set(&mut self, action: ViewerAction, held: bool) {
        match action {
            ViewerAction::TurnLeft => self.turn_left = held,
            ViewerAction::TurnRight => self.turn_right = held,
            ViewerAction::MoveForward => self.forward = held,
            ViewerAction::MoveBackward => self.backward = held,
        }
    }

    pub fn is_held(&self, action: ViewerAction) -> bool {
        match action {
            ViewerAction::TurnLeft => self.turn_left,
            ViewerAction::TurnRight => self.turn_right,
            ViewerAction::MoveForward => self.forward,
            ViewerAction::MoveBackward => self.backward,
        }
    }

    /// True when no command is active.
    pub fn is_idle(&self) -> bool {
        !(self.turn_left || self.turn_right || self.forward || self.backward)
    }
}
