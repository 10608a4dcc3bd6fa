//! Simulation context owned by the frame loop.
//!
//! Bundles the map, viewer, tuning, and the reusable frame so the loop can
//! advance one frame with a single call and nothing lives in globals.

use crate::frame::{render_into, Frame, RenderConfig};
use crate::map::Map;
use crate::types::{MoveInput, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::viewer::{MotionConfig, ViewerState};

#[derive(Debug, Clone)]
pub struct Simulation {
    map: Map,
    pub viewer: ViewerState,
    pub motion: MotionConfig,
    pub render: RenderConfig,
    frame: Frame,
    frames: u64,
}

impl Simulation {
    pub fn new(map: Map, viewer: ViewerState) -> Self {
        log::debug!(
            "simulation: map {}x{}, viewer at ({:.2}, {:.2})",
            map.width(),
            map.height(),
            viewer.x,
            viewer.y
        );
        Self {
            map,
            viewer,
            motion: MotionConfig::default(),
            render: RenderConfig::default(),
            frame: Frame::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            frames: 0,
        }
    }

    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.frame.resize(width, height);
        self
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Number of frames produced by [`Simulation::step`].
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.frame.width(), self.frame.height()) {
            log::debug!("simulation: resize to {}x{}", width, height);
        }
        self.frame.resize(width, height);
    }

    /// Apply `input` for `dt` seconds, then render the full frame.
    pub fn step(&mut self, input: MoveInput, dt: f32) -> &Frame {
        self.viewer.apply(input, dt, &self.motion, &self.map);
        self.redraw()
    }

    /// Render the current viewer without moving it.
    pub fn redraw(&mut self) -> &Frame {
        render_into(&self.map, &self.viewer, &self.render, &mut self.frame);
        self.frames += 1;
        &self.frame
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Map::default(), ViewerState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_steps_are_stable() {
        let mut sim = Simulation::default().with_size(40, 12);
        let first = sim.step(MoveInput::default(), 0.016).clone();
        let viewer = sim.viewer;
        for _ in 0..5 {
            assert_eq!(sim.step(MoveInput::default(), 0.016), &first);
        }
        assert_eq!(sim.viewer, viewer);
        assert_eq!(sim.frames(), 6);
    }

    #[test]
    fn walking_toward_the_pillar_grows_the_wall() {
        let mut sim = Simulation::default().with_size(40, 20);
        let mid = 20;
        let before = sim.redraw().columns()[mid].projection.span();

        let forward = MoveInput {
            forward: true,
            ..MoveInput::default()
        };
        for _ in 0..30 {
            sim.step(forward, 0.1);
        }
        let after = sim.frame().columns()[mid].projection.span();
        assert!(after > before, "span {before} -> {after}");
    }

    #[test]
    fn resize_changes_frame_size() {
        let mut sim = Simulation::default();
        assert_eq!(sim.frame().width(), SCREEN_WIDTH);
        sim.resize(10, 5);
        let frame = sim.redraw();
        assert_eq!((frame.width(), frame.height()), (10, 5));
    }
}
