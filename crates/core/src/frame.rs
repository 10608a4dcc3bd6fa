//! Frame renderer - one ray per screen column into a glyph buffer.
//!
//! The frame owns a row-major `width x height` glyph buffer plus the per-column
//! ray/projection samples that produced it. It is reused across frames; every
//! render overwrites every cell.

use std::fmt;

use rayon::prelude::*;

use crate::map::Map;
use crate::projector::{project, ColumnProjection};
use crate::raycast::{cast_with_step, RayHit};
use crate::types::{BACKGROUND_GLYPH, DEFAULT_FOV, DEFAULT_STEP, MAX_DEPTH};
use crate::viewer::ViewerState;

/// Ray and projection settings shared by every column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Horizontal field of view in radians.
    pub fov: f32,
    /// Ray range in map cells.
    pub max_depth: f32,
    /// Ray march step in map cells.
    pub step: f32,
    /// Cast columns on the rayon pool.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            max_depth: MAX_DEPTH,
            step: DEFAULT_STEP,
            parallel: false,
        }
    }
}

impl RenderConfig {
    /// Ray angle for screen column `x` of `width`.
    ///
    /// Angles are spread evenly across the field of view starting at the left
    /// edge (`heading - fov/2`). This is not perspective-correct; wide fields
    /// of view show fisheye bending.
    #[inline]
    pub fn column_angle(&self, heading: f32, x: u16, width: u16) -> f32 {
        let t = if width == 0 {
            0.0
        } else {
            x as f32 / width as f32
        };
        heading - self.fov / 2.0 + t * self.fov
    }
}

/// What one screen column saw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnSample {
    pub angle: f32,
    pub hit: RayHit,
    pub projection: ColumnProjection,
}

/// Rendered glyph buffer plus per-column samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u16,
    height: u16,
    /// Row-major (y * width + x).
    cells: Vec<char>,
    columns: Vec<ColumnSample>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![BACKGROUND_GLYPH; len],
            columns: vec![ColumnSample::default(); width as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocations when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, BACKGROUND_GLYPH);
        self.columns.resize(width as usize, ColumnSample::default());
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn columns(&self) -> &[ColumnSample] {
        &self.columns
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[(y as usize) * (self.width as usize) + (x as usize)])
    }

    pub fn row(&self, y: u16) -> Option<&[char]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = (y as usize) * w;
        Some(&self.cells[start..start + w])
    }

    fn write_cells(&mut self) {
        let w = self.width as usize;
        if w == 0 {
            return;
        }
        for (y, row) in self.cells.chunks_mut(w).enumerate() {
            let y = y as u16;
            for (cell, col) in row.iter_mut().zip(self.columns.iter()) {
                *cell = col.projection.glyph_at(y);
            }
        }
    }
}

impl fmt::Display for Frame {
    /// Rows joined by `\n`, for headless output and tests.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            if let Some(row) = self.row(y) {
                for &ch in row {
                    write!(f, "{}", ch)?;
                }
            }
        }
        Ok(())
    }
}

#[inline]
fn sample_column(
    map: &Map,
    viewer: &ViewerState,
    config: &RenderConfig,
    x: u16,
    width: u16,
    height: u16,
) -> ColumnSample {
    let angle = config.column_angle(viewer.heading, x, width);
    let hit = cast_with_step(map, viewer.x, viewer.y, angle, config.max_depth, config.step);
    ColumnSample {
        angle,
        hit,
        projection: project(hit.distance, height, config.max_depth),
    }
}

/// Render into an existing frame (the allocation-free hot path).
///
/// The frame keeps its current size; callers resize it when the output surface
/// changes.
pub fn render_into(map: &Map, viewer: &ViewerState, config: &RenderConfig, frame: &mut Frame) {
    let (width, height) = (frame.width, frame.height);

    if config.parallel {
        frame
            .columns
            .par_iter_mut()
            .enumerate()
            .for_each(|(x, col)| {
                *col = sample_column(map, viewer, config, x as u16, width, height);
            });
    } else {
        for (x, col) in frame.columns.iter_mut().enumerate() {
            *col = sample_column(map, viewer, config, x as u16, width, height);
        }
    }

    frame.write_cells();
}

/// Convenience helper that allocates a new frame.
///
/// # Examples
///
/// ```
/// use raycaster_core::{render, Map, RenderConfig, ViewerState};
///
/// let map = Map::default();
/// let frame = render(&map, &ViewerState::default(), &RenderConfig::default(), 120, 40);
/// assert_eq!(frame.cells().len(), 120 * 40);
/// assert_eq!(frame.columns().len(), 120);
/// ```
pub fn render(
    map: &Map,
    viewer: &ViewerState,
    config: &RenderConfig,
    width: u16,
    height: u16,
) -> Frame {
    let mut frame = Frame::new(width, height);
    render_into(map, viewer, config, &mut frame);
    frame
}
