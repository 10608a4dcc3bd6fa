//! Viewer state and per-frame movement.

use crate::map::Map;
use crate::types::{MoveInput, ROTATION_SPEED, WALKING_SPEED};

/// Position (map-cell units) and heading (radians) of the observer.
///
/// Heading 0 looks along +x, π/2 along +y (down the map rows). The heading is
/// never wrapped; only its sine and cosine are used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl ViewerState {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading }
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn direction(&self) -> (f32, f32) {
        (self.heading.cos(), self.heading.sin())
    }

    /// Apply one frame of movement.
    ///
    /// Turning right increases the heading. With `motion.block_walls` set, a
    /// step that would end inside a wall or outside the map is dropped (the
    /// heading change still applies).
    pub fn apply(&mut self, input: MoveInput, dt: f32, motion: &MotionConfig, map: &Map) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt == 0.0 || input.is_idle() {
            return;
        }

        let mut turn = 0.0;
        if input.turn_left {
            turn -= 1.0;
        }
        if input.turn_right {
            turn += 1.0;
        }
        self.heading += turn * motion.rotation_speed * dt;

        let mut walk = 0.0;
        if input.forward {
            walk += 1.0;
        }
        if input.backward {
            walk -= 1.0;
        }
        if walk == 0.0 {
            return;
        }

        let (dx, dy) = self.direction();
        let step = walk * motion.walking_speed * dt;
        let nx = self.x + dx * step;
        let ny = self.y + dy * step;

        if motion.block_walls && !map.is_open_at(nx, ny) {
            return;
        }
        self.x = nx;
        self.y = ny;
    }
}

impl ViewerState {
    /// Starting viewer for `map`.
    ///
    /// Uses the map's `P` marker when present, else the built-in spawn point
    /// if it is open in this map, else the centre of the first open cell. The
    /// heading is always the built-in one. A map with no open cell keeps the
    /// built-in spawn.
    pub fn spawn_on(map: &Map) -> Self {
        let default = Self::default();
        let cell = match map.spawn() {
            Some(cell) => Some(cell),
            None if map.is_open_at(default.x, default.y) => return default,
            None => map.first_open(),
        };
        match cell {
            Some((col, row)) => Self::new(col as f32 + 0.5, row as f32 + 0.5, default.heading),
            None => default,
        }
    }
}

impl Default for ViewerState {
    /// Spawn point inside the built-in map, facing the pillar.
    fn default() -> Self {
        Self::new(13.0, 6.0, std::f32::consts::FRAC_PI_2)
    }
}

/// Movement tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// Cells per second.
    pub walking_speed: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    /// Refuse steps that end inside a wall or off the map.
    pub block_walls: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walking_speed: WALKING_SPEED,
            rotation_speed: ROTATION_SPEED,
            block_walls: true,
        }
    }
}
