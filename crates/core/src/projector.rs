//! Column projector - wall distance to a vertical screen span.

use std::ops::Range;

use crate::types::{ShadeTier, NEAR_EPSILON};

/// Wall rows `[ceiling, floor)` of one screen column plus its shade.
///
/// The span is symmetric around the vertical center. A `Background` tier
/// always comes with an empty span at `screen_height / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnProjection {
    pub ceiling: u16,
    pub floor: u16,
    pub tier: ShadeTier,
}

impl ColumnProjection {
    /// Empty span centred on a screen of `screen_height` rows.
    pub fn empty(screen_height: u16) -> Self {
        let mid = screen_height / 2;
        Self {
            ceiling: mid,
            floor: mid,
            tier: ShadeTier::Background,
        }
    }

    /// Rows covered by wall glyphs.
    pub fn wall_rows(&self) -> Range<u16> {
        self.ceiling..self.floor
    }

    #[inline]
    pub fn is_wall_row(&self, y: u16) -> bool {
        y >= self.ceiling && y < self.floor
    }

    /// Number of wall rows.
    pub fn span(&self) -> u16 {
        self.floor.saturating_sub(self.ceiling)
    }

    /// Glyph for row `y` of this column.
    #[inline]
    pub fn glyph_at(&self, y: u16) -> char {
        if self.is_wall_row(y) {
            self.tier.glyph()
        } else {
            ShadeTier::Background.glyph()
        }
    }
}

impl Default for ColumnProjection {
    fn default() -> Self {
        Self::empty(0)
    }
}

/// Project a wall `distance` away onto a column of `screen_height` rows.
///
/// `ceiling = h/2 - h/distance`, clamped to `[0, h/2]` before it becomes a
/// row index; `floor = h - ceiling`. Distances at or below [`NEAR_EPSILON`]
/// fill the whole column, and anything at or beyond `max_depth` projects to
/// nothing.
///
/// # Examples
///
/// ```
/// use raycaster_core::project;
/// use raycaster_types::ShadeTier;
///
/// let p = project(4.0, 40, 16.0);
/// assert_eq!((p.ceiling, p.floor), (10, 30));
/// assert_eq!(p.tier, ShadeTier::Dark);
///
/// let far = project(16.0, 40, 16.0);
/// assert_eq!((far.ceiling, far.floor, far.tier), (20, 20, ShadeTier::Background));
/// ```
pub fn project(distance: f32, screen_height: u16, max_depth: f32) -> ColumnProjection {
    // Also catches NaN distance or depth.
    if !(distance < max_depth) {
        return ColumnProjection::empty(screen_height);
    }

    let half = screen_height / 2;
    let h = screen_height as f32;
    let ceiling = if distance <= NEAR_EPSILON {
        0.0
    } else {
        (h / 2.0 - h / distance).clamp(0.0, half as f32)
    };
    let ceiling = ceiling as u16;

    ColumnProjection {
        ceiling,
        floor: screen_height - ceiling,
        tier: ShadeTier::for_distance(distance, max_depth),
    }
}
