//! SceneView: maps a rendered `core::Frame` into a styled terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Frame, Map, ViewerState};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ShadeTier;

/// Per-frame numbers shown on the HUD line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HudStats {
    pub fps: f32,
}

/// Colors for the scene layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub ceiling: CellStyle,
    pub floor: CellStyle,
    /// Indexed by tier, nearest first. `Background` uses ceiling/floor.
    pub walls: [CellStyle; 4],
    pub hud: CellStyle,
    pub minimap_wall: CellStyle,
    pub minimap_open: CellStyle,
    pub minimap_viewer: CellStyle,
}

impl Default for Palette {
    fn default() -> Self {
        let ceiling_bg = Rgb::new(20, 20, 45);
        let floor_bg = Rgb::new(35, 35, 35);
        let wall = |v: u8| CellStyle::new(Rgb::new(v, v, v.saturating_add(10)), ceiling_bg);
        Self {
            ceiling: CellStyle::new(Rgb::gray(200), ceiling_bg),
            floor: CellStyle::new(Rgb::gray(200), floor_bg),
            walls: [wall(235), wall(190), wall(145), wall(100)],
            hud: CellStyle::new(Rgb::new(255, 255, 255), Rgb::gray(0)).bold(),
            minimap_wall: CellStyle::new(Rgb::gray(180), Rgb::gray(0)),
            minimap_open: CellStyle::new(Rgb::gray(70), Rgb::gray(0)),
            minimap_viewer: CellStyle::new(Rgb::new(250, 210, 60), Rgb::gray(0)).bold(),
        }
    }
}

/// A lightweight presenter for rendered frames.
#[derive(Debug, Clone)]
pub struct SceneView {
    show_hud: bool,
    show_minimap: bool,
    palette: Palette,
}

impl Default for SceneView {
    fn default() -> Self {
        Self {
            show_hud: true,
            show_minimap: false,
            palette: Palette::default(),
        }
    }
}

impl SceneView {
    pub fn new(show_hud: bool, show_minimap: bool) -> Self {
        Self {
            show_hud,
            show_minimap,
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn show_hud(&self) -> bool {
        self.show_hud
    }

    pub fn show_minimap(&self) -> bool {
        self.show_minimap
    }

    pub fn toggle_hud(&mut self) {
        self.show_hud = !self.show_hud;
    }

    pub fn toggle_minimap(&mut self) {
        self.show_minimap = !self.show_minimap;
    }

    /// Render the scene into an existing framebuffer.
    ///
    /// The framebuffer is resized to the frame. This is the allocation-free hot
    /// path once the framebuffer has reached its size.
    pub fn render_into(
        &self,
        frame: &Frame,
        map: &Map,
        viewer: &ViewerState,
        stats: &HudStats,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(frame.width(), frame.height());
        self.draw_scene(frame, fb);

        let mut top = 0;
        if self.show_hud && frame.height() > 0 {
            self.draw_hud(fb, viewer, stats);
            top = 1;
        }
        if self.show_minimap {
            self.draw_minimap(fb, map, viewer, top);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        frame: &Frame,
        map: &Map,
        viewer: &ViewerState,
        stats: &HudStats,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(frame.width(), frame.height());
        self.render_into(frame, map, viewer, stats, &mut fb);
        fb
    }

    fn draw_scene(&self, frame: &Frame, fb: &mut FrameBuffer) {
        for (x, col) in frame.columns().iter().enumerate() {
            let x = x as u16;
            let proj = col.projection;
            let wall_style = self.wall_style(proj.tier);
            for y in 0..frame.height() {
                let ch = frame.get(x, y).unwrap_or(' ');
                let style = if y < proj.ceiling {
                    self.palette.ceiling
                } else if y >= proj.floor {
                    self.palette.floor
                } else {
                    wall_style
                };
                fb.put_char(x, y, ch, style);
            }
        }
    }

    fn wall_style(&self, tier: ShadeTier) -> CellStyle {
        match tier {
            ShadeTier::Full => self.palette.walls[0],
            ShadeTier::Dark => self.palette.walls[1],
            ShadeTier::Medium => self.palette.walls[2],
            ShadeTier::Light => self.palette.walls[3],
            ShadeTier::Background => self.palette.floor,
        }
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, viewer: &ViewerState, stats: &HudStats) {
        let style = self.palette.hud;
        for x in 0..fb.width() {
            fb.put_char(x, 0, ' ', style);
        }
        fb.put_fmt(
            0,
            0,
            format_args!(
                "X={:.2} Y={:.2} A={:.2} FPS={:.1}",
                viewer.x, viewer.y, viewer.heading, stats.fps
            ),
            style,
        );
    }

    fn draw_minimap(&self, fb: &mut FrameBuffer, map: &Map, viewer: &ViewerState, top: u16) {
        let (w, h) = (map.width(), map.height());
        if w > fb.width() as usize || h + top as usize > fb.height() as usize {
            return;
        }

        for (row, cells) in map.rows().enumerate() {
            for (col, &wall) in cells.iter().enumerate() {
                let (ch, style) = if wall {
                    ('#', self.palette.minimap_wall)
                } else {
                    ('.', self.palette.minimap_open)
                };
                fb.put_char(col as u16, top + row as u16, ch, style);
            }
        }

        if let Some((col, row)) = map.cell_at(viewer.x, viewer.y) {
            fb.put_char(col as u16, top + row as u16, 'P', self.palette.minimap_viewer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{render, RenderConfig};

    fn scene(w: u16, h: u16) -> (Frame, Map, ViewerState) {
        let map = Map::default();
        let viewer = ViewerState::default();
        let frame = render(&map, &viewer, &RenderConfig::default(), w, h);
        (frame, map, viewer)
    }

    #[test]
    fn scene_copies_frame_glyphs() {
        let (frame, map, viewer) = scene(40, 20);
        let view = SceneView::new(false, false);
        let fb = view.render(&frame, &map, &viewer, &HudStats::default());
        for y in 0..20 {
            for x in 0..40 {
                assert_eq!(fb.get(x, y).unwrap().ch, frame.get(x, y).unwrap());
            }
        }
    }

    #[test]
    fn ceiling_and_floor_use_their_styles() {
        let (frame, map, viewer) = scene(40, 20);
        let view = SceneView::new(false, false);
        let fb = view.render(&frame, &map, &viewer, &HudStats::default());
        let palette = Palette::default();
        assert_eq!(fb.get(0, 0).unwrap().style, palette.ceiling);
        assert_eq!(fb.get(0, 19).unwrap().style, palette.floor);
    }

    #[test]
    fn wall_cells_use_tier_style() {
        let (frame, map, viewer) = scene(40, 20);
        let col = frame.columns()[20];
        assert!(col.projection.span() > 0);
        let view = SceneView::new(false, false);
        let fb = view.render(&frame, &map, &viewer, &HudStats::default());
        let mid = fb.get(20, 10).unwrap();
        assert_eq!(mid.style, view.wall_style(col.projection.tier));
    }
}
