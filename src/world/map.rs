//! Static map descriptions.
//!
//! Two shapes are supported:
//! * [`GridMap`]    – rows of digit characters, one cell per character.
//! * [`SegmentMap`] – free-standing line segments forming the boundary.
//!
//! Both are immutable after construction; casters only ever borrow them.
//!
//! Grid cells are centred on integer coordinates.  Cell *(row r, col c)*
//! covers `[c-0.5, c+0.5] × [r-0.5, r+0.5]`: **x is the column axis, y the
//! row axis**.

use glam::{Vec2, vec2};
use thiserror::Error;

use crate::world::geometry::{Aabb, Segment};
use crate::world::material::{Material, Tile};

/// Problems found while building or querying a map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// No rows, no columns or no segments.
    #[error("map is empty")]
    Empty,

    /// A grid row differs in length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A grid cell is not one of `'0'..='9'`.
    #[error("invalid tile {found:?} at row {row}, column {col}")]
    BadTile { row: usize, col: usize, found: char },

    /// A material tag is not one of `'1'..='9'`.
    #[error("invalid material {0:?}")]
    BadMaterial(char),

    /// Segment `{0}` starts and ends at the same point.
    #[error("segment {0} has zero length")]
    DegenerateSegment(usize),

    /// Grid lookup outside `0..height × 0..width`.
    #[error("cell (row {row}, column {col}) is outside the grid")]
    OutOfBounds { row: i64, col: i64 },
}

/*──────────────────────────── grid ────────────────────────────*/

/// Character-grid map.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl GridMap {
    /// Parse and validate rows of digit characters.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(MapError::BadTile {
                    row,
                    col,
                    found: ch,
                })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            tiles,
            width,
            height: rows.len(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at `(row, col)`.  Indices are signed so raw rounded ray
    /// coordinates can be passed in; anything outside the grid is an error.
    #[inline]
    pub fn material_at(&self, row: i64, col: i64) -> Result<Tile, MapError> {
        if row < 0 || col < 0 || row >= self.height as i64 || col >= self.width as i64 {
            return Err(MapError::OutOfBounds { row, col });
        }
        Ok(self.tiles[row as usize * self.width + col as usize])
    }

    /// World-space extent of all cells.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            vec2(-0.5, -0.5),
            vec2(self.width as f32 - 0.5, self.height as f32 - 0.5),
        )
    }

    /// Rows back in map-file form.
    pub fn rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width)
            .map(|row| row.iter().map(|t| t.to_char()).collect())
            .collect()
    }

    /// Material of the face between two cells, if one is a wall and the
    /// other open floor.  Cells outside the grid never form a face.
    fn face(&self, a: (i64, i64), b: (i64, i64)) -> Option<Material> {
        let ta = self.material_at(a.0, a.1).ok()?;
        let tb = self.material_at(b.0, b.1).ok()?;
        match (ta, tb) {
            (Tile::Wall(m), Tile::Empty) | (Tile::Empty, Tile::Wall(m)) => Some(m),
            _ => None,
        }
    }

    /// Every wall face visible from open floor, as material-tagged segments.
    ///
    /// Adjacent collinear faces of the same material are merged into one
    /// segment, so a straight wall costs one intersection test.
    pub fn to_segments(&self) -> Vec<Segment> {
        let (w, h) = (self.width as i64, self.height as i64);
        let mut out = Vec::new();

        // horizontal faces: boundary between row r-1 and row r
        for r in 0..=h {
            let y = r as f32 - 0.5;
            push_runs(
                &mut out,
                (0..w).map(|c| self.face((r - 1, c), (r, c))),
                |start, end, m| {
                    Segment::new(
                        vec2(start as f32 - 0.5, y),
                        vec2(end as f32 + 0.5, y),
                        m,
                    )
                },
            );
        }

        // vertical faces: boundary between column c-1 and column c
        for c in 0..=w {
            let x = c as f32 - 0.5;
            push_runs(
                &mut out,
                (0..h).map(|r| self.face((r, c - 1), (r, c))),
                |start, end, m| {
                    Segment::new(
                        vec2(x, start as f32 - 0.5),
                        vec2(x, end as f32 + 0.5),
                        m,
                    )
                },
            );
        }

        out
    }
}

/// Collapse a line of optional faces into runs of equal material.
fn push_runs<I, F>(out: &mut Vec<Segment>, faces: I, make: F)
where
    I: Iterator<Item = Option<Material>>,
    F: Fn(i64, i64, Material) -> Segment,
{
    let mut run: Option<(i64, i64, Material)> = None;
    for (i, face) in faces.enumerate() {
        let i = i as i64;
        run = match (run, face) {
            (Some((start, _, m)), Some(f)) if f == m => Some((start, i, m)),
            (prev, next) => {
                if let Some((start, end, m)) = prev {
                    out.push(make(start, end, m));
                }
                next.map(|m| (i, i, m))
            }
        };
    }
    if let Some((start, end, m)) = run {
        out.push(make(start, end, m));
    }
}

/*─────────────────────────── segments ──────────────────────────*/

/// Boundary made of free line segments.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentMap {
    segments: Vec<Segment>,
    bounds: Aabb,
}

impl SegmentMap {
    pub fn new(segments: Vec<Segment>) -> Result<Self, MapError> {
        if let Some(i) = segments.iter().position(|s| s.length() <= f32::EPSILON) {
            return Err(MapError::DegenerateSegment(i));
        }
        let bounds = Aabb::from_points(segments.iter().flat_map(|s| [s.p1, s.p2]))
            .ok_or(MapError::Empty)?;
        Ok(Self { segments, bounds })
    }

    /// Closed polygon through `points`, every edge tagged `material`.
    pub fn polygon(points: &[Vec2], material: Material) -> Result<Self, MapError> {
        let segments = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(&a, &b)| Segment::new(a, b, material))
            .collect();
        Self::new(segments)
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/*───────────────────────────── map ─────────────────────────────*/

/// Either map shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Map {
    Grid(GridMap),
    Segments(SegmentMap),
}

impl Map {
    pub fn bounds(&self) -> Aabb {
        match self {
            Map::Grid(g) => g.bounds(),
            Map::Segments(s) => s.bounds(),
        }
    }

    /// Boundary segments for exact intersection.
    pub fn boundary(&self) -> Vec<Segment> {
        match self {
            Map::Grid(g) => g.to_segments(),
            Map::Segments(s) => s.segments().to_vec(),
        }
    }

    pub fn as_grid(&self) -> Option<&GridMap> {
        match self {
            Map::Grid(g) => Some(g),
            Map::Segments(_) => None,
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
