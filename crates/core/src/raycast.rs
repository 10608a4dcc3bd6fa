//! Ray caster - fixed-step marching through the wall grid
//!
//! A ray starts at the viewer and advances in equal linear steps. At each step
//! the sample point is converted to a map cell with `floor`; the first wall cell
//! (or the first sample that leaves the grid) ends the march.
//!
//! Stop policies:
//! - **Wall**: report the distance reached after the step into the wall
//!   (never zero), `hit = true`.
//! - **Out of bounds**: report `max_depth`, `hit = true`. Leaving the grid looks
//!   the same as "too far to see".
//! - **Max depth**: report `max_depth`, `hit = false`.
//!
//! There is no sub-step refinement; distances carry up to one step of error.

use crate::map::Map;
use crate::types::{DEFAULT_STEP, MIN_STEP};

/// How a cast ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Wall,
    OutOfBounds,
    MaxDepth,
}

/// Result of a single cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance travelled, in `(0, max_depth]` for a positive range.
    pub distance: f32,
    pub hit: bool,
    pub kind: HitKind,
}

impl RayHit {
    fn saturated(max_depth: f32, kind: HitKind) -> Self {
        Self {
            distance: max_depth,
            hit: kind != HitKind::MaxDepth,
            kind,
        }
    }
}

impl Default for RayHit {
    fn default() -> Self {
        Self {
            distance: 0.0,
            hit: false,
            kind: HitKind::MaxDepth,
        }
    }
}

/// One point visited by a marching ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySample {
    pub distance: f32,
    /// `None` when the sample lies outside the map.
    pub cell: Option<(usize, usize)>,
}

/// Iterator over the samples of a ray, nearest first.
///
/// Yields samples at `0, step, 2*step, ...` strictly below `max_depth`. The
/// distance of sample `i` is computed as `i * step`, so distances never
/// regress through accumulated rounding. The march also ends once the sample
/// index is exhausted, so it terminates for any depth.
#[derive(Debug, Clone)]
pub struct RayMarch<'a> {
    map: &'a Map,
    origin: (f32, f32),
    dir: (f32, f32),
    step: f32,
    max_depth: f32,
    index: u32,
}

impl<'a> RayMarch<'a> {
    pub fn new(map: &'a Map, x: f32, y: f32, angle: f32, max_depth: f32, step: f32) -> Self {
        Self {
            map,
            origin: (x, y),
            dir: (angle.cos(), angle.sin()),
            step: sanitize_step(step),
            max_depth,
            index: 0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Iterator for RayMarch<'_> {
    type Item = RaySample;

    #[inline]
    fn next(&mut self) -> Option<RaySample> {
        let distance = self.index as f32 * self.step;
        // Negated compare so NaN depth ends the march.
        if !(distance < self.max_depth) {
            return None;
        }
        self.index = self.index.checked_add(1)?;
        let sx = self.origin.0 + distance * self.dir.0;
        let sy = self.origin.1 + distance * self.dir.1;
        Some(RaySample {
            distance,
            cell: self.map.cell_at(sx, sy),
        })
    }
}

fn sanitize_step(step: f32) -> f32 {
    if step.is_finite() && step > 0.0 {
        step.max(MIN_STEP)
    } else {
        DEFAULT_STEP
    }
}

/// Cast with the default step length.
///
/// # Examples
///
/// ```
/// use raycaster_core::{cast, Map};
///
/// let map = Map::parse("#####\n#...#\n#####").unwrap();
/// // Facing +x from the middle of the corridor: the wall at col 4 is ~2.5 away.
/// let hit = cast(&map, 1.5, 1.5, 0.0, 16.0);
/// assert!(hit.hit);
/// assert!(hit.distance > 2.5 && hit.distance < 2.75);
/// ```
pub fn cast(map: &Map, x: f32, y: f32, angle: f32, max_depth: f32) -> RayHit {
    cast_with_step(map, x, y, angle, max_depth, DEFAULT_STEP)
}

/// Cast a ray from `(x, y)` along `angle`, marching in `step`-sized increments.
///
/// Total over its numeric domain: a non-positive or NaN `max_depth` returns a
/// zero-length miss, a bad `step` falls back to [`DEFAULT_STEP`], and a step
/// finer than [`MIN_STEP`] is raised to it.
pub fn cast_with_step(map: &Map, x: f32, y: f32, angle: f32, max_depth: f32, step: f32) -> RayHit {
    if !(max_depth > 0.0) {
        return RayHit::default();
    }

    let march = RayMarch::new(map, x, y, angle, max_depth, step);
    let step = march.step();
    for sample in march {
        match sample.cell {
            None => return RayHit::saturated(max_depth, HitKind::OutOfBounds),
            Some((col, row)) if map.is_wall(col, row) => {
                return RayHit {
                    distance: (sample.distance + step).min(max_depth),
                    hit: true,
                    kind: HitKind::Wall,
                };
            }
            Some(_) => {}
        }
    }

    RayHit::saturated(max_depth, HitKind::MaxDepth)
}
