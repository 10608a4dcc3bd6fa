//! Map module - immutable wall grid
//!
//! The map is a fixed `width x height` grid where each cell is a wall or open.
//! Uses a flat row-major vector. Coordinates: (col, row) where col grows to the
//! right and row grows downward, matching the text layout it is parsed from.

use thiserror::Error;

/// Built-in 16x16 arena: a walled border with one pillar at (13, 11).
pub const DEFAULT_MAP: &str = "\
################
#..............#
#..............#
#..............#
#..............#
#..............#
#..............#
#..............#
#..............#
#..............#
#..............#
#............#.#
#..............#
#..............#
#..............#
################
";

/// Reasons a map layout is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// No rows, or rows with no cells.
    #[error("map has no cells")]
    Empty,
    /// A row's length differs from the first row.
    #[error("map row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is neither a wall, an open cell, nor the spawn marker.
    #[error("invalid map cell {ch:?} at ({col}, {row})")]
    InvalidCell { col: usize, row: usize, ch: char },
    /// More than one `P` marker.
    #[error("second spawn marker at ({col}, {row})")]
    DuplicateSpawn { col: usize, row: usize },
    /// Flat cell vector does not match the declared dimensions.
    #[error("map has {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },
}

/// Immutable wall grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    /// Row-major (row * width + col); `true` is a wall.
    cells: Vec<bool>,
    spawn: Option<(usize, usize)>,
}

impl Map {
    /// Build a map from a flat row-major cell vector.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(MapError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
            spawn: None,
        })
    }

    /// Parse a text layout: `#` is a wall, `.` or space is open, and `P` is an
    /// open cell where the viewer spawns (at most one).
    ///
    /// Leading and trailing blank lines are ignored; a trailing `\r` on each
    /// line is stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use raycaster_core::Map;
    ///
    /// let map = Map::parse("###\n#.#\n###").unwrap();
    /// assert_eq!((map.width(), map.height()), (3, 3));
    /// assert!(map.is_wall(0, 0));
    /// assert!(!map.is_wall(1, 1));
    /// ```
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();

        let first = lines.iter().position(|l| !l.trim().is_empty());
        let last = lines.iter().rposition(|l| !l.trim().is_empty());
        let rows = match (first, last) {
            (Some(a), Some(b)) => &lines[a..=b],
            _ => return Err(MapError::Empty),
        };

        let width = rows[0].chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        let mut spawn = None;
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => cells.push(true),
                    '.' | ' ' => cells.push(false),
                    'P' => {
                        if spawn.is_some() {
                            return Err(MapError::DuplicateSpawn { col, row });
                        }
                        spawn = Some((col, row));
                        cells.push(false);
                    }
                    _ => return Err(MapError::InvalidCell { col, row, ch }),
                }
            }
        }

        let mut map = Self::from_cells(width, rows.len(), cells)?;
        map.spawn = spawn;
        Ok(map)
    }

    /// A map with no walls at all.
    pub fn open(width: usize, height: usize) -> Result<Self, MapError> {
        Self::from_cells(width, height, vec![false; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Wall lookup for an in-bounds cell.
    ///
    /// Callers must keep `col < width` and `row < height`; out-of-range
    /// queries panic. Use [`Map::get`] for a checked lookup.
    #[inline(always)]
    pub fn is_wall(&self, col: usize, row: usize) -> bool {
        assert!(col < self.width && row < self.height, "map query out of bounds");
        self.cells[row * self.width + col]
    }

    /// Checked lookup; `None` outside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<bool> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// Cell containing the continuous point `(x, y)`.
    ///
    /// Uses `floor`, so any negative coordinate lies outside the grid rather
    /// than truncating into column/row 0.
    #[inline]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let fx = x.floor();
        let fy = y.floor();
        // Also rejects NaN.
        if !(fx >= 0.0 && fy >= 0.0) {
            return None;
        }
        if fx >= self.width as f32 || fy >= self.height as f32 {
            return None;
        }
        Some((fx as usize, fy as usize))
    }

    /// True when `(x, y)` is inside the grid and on an open cell.
    pub fn is_open_at(&self, x: f32, y: f32) -> bool {
        self.cell_at(x, y)
            .map(|(col, row)| !self.is_wall(col, row))
            .unwrap_or(false)
    }

    /// Cell marked `P` in the parsed layout, if any.
    pub fn spawn(&self) -> Option<(usize, usize)> {
        self.spawn
    }

    /// First open cell in row-major order.
    pub fn first_open(&self) -> Option<(usize, usize)> {
        let i = self.cells.iter().position(|&wall| !wall)?;
        Some((i % self.width, i / self.width))
    }

    /// Iterate rows as slices of wall flags.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }
}

impl Default for Map {
    fn default() -> Self {
        // DEFAULT_MAP is a constant layout covered by tests.
        match Self::parse(DEFAULT_MAP) {
            Ok(map) => map,
            Err(e) => unreachable!("built-in map is invalid: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_shape() {
        let map = Map::default();
        assert_eq!(map.width(), 16);
        assert_eq!(map.height(), 16);
        for i in 0..16 {
            assert!(map.is_wall(i, 0));
            assert!(map.is_wall(i, 15));
            assert!(map.is_wall(0, i));
            assert!(map.is_wall(15, i));
        }
        assert!(map.is_wall(13, 11));
        assert!(!map.is_wall(13, 6));
        assert!(!map.is_wall(11, 13));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Map::parse("###\n#.\n###").unwrap_err();
        assert_eq!(
            err,
            MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_cells() {
        let err = Map::parse("##\n#x").unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidCell {
                col: 1,
                row: 1,
                ch: 'x'
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Map::parse(""), Err(MapError::Empty));
        assert_eq!(Map::parse("\n  \n"), Err(MapError::Empty));
    }

    #[test]
    fn parse_skips_outer_blank_lines_and_crlf() {
        let map = Map::parse("\n\n##\r\n#.\r\n\n").unwrap();
        assert_eq!((map.width(), map.height()), (2, 2));
        assert!(!map.is_wall(1, 1));
    }

    #[test]
    fn from_cells_checks_count() {
        assert_eq!(
            Map::from_cells(2, 2, vec![false; 3]),
            Err(MapError::CellCount {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(Map::from_cells(0, 2, vec![]), Err(MapError::Empty));
    }

    #[test]
    fn cell_at_uses_floor() {
        let map = Map::open(4, 4).unwrap();
        assert_eq!(map.cell_at(0.0, 0.0), Some((0, 0)));
        assert_eq!(map.cell_at(3.99, 1.5), Some((3, 1)));
        assert_eq!(map.cell_at(-0.5, 1.0), None);
        assert_eq!(map.cell_at(1.0, -0.01), None);
        assert_eq!(map.cell_at(4.0, 0.0), None);
        assert_eq!(map.cell_at(0.0, 4.0), None);
        assert_eq!(map.cell_at(f32::NAN, 0.0), None);
    }

    #[test]
    fn checked_get() {
        let map = Map::parse("#.\n..").unwrap();
        assert_eq!(map.get(0, 0), Some(true));
        assert_eq!(map.get(1, 0), Some(false));
        assert_eq!(map.get(2, 0), None);
        assert_eq!(map.get(0, 2), None);
        assert!(map.is_open_at(1.5, 0.5));
        assert!(!map.is_open_at(0.5, 0.5));
        assert!(!map.is_open_at(2.5, 0.5));
    }

    #[test]
    fn spawn_marker_is_an_open_cell() {
        let map = Map::parse("####\n#.P#\n####").unwrap();
        assert_eq!(map.spawn(), Some((2, 1)));
        assert!(!map.is_wall(2, 1));
        assert_eq!(map.first_open(), Some((1, 1)));

        let err = Map::parse("####\n#PP#\n####").unwrap_err();
        assert_eq!(err, MapError::DuplicateSpawn { col: 2, row: 1 });
    }

    #[test]
    fn solid_map_has_no_open_cell() {
        let map = Map::parse("##\n##").unwrap();
        assert_eq!(map.spawn(), None);
        assert_eq!(map.first_open(), None);
    }
}
