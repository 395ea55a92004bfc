//! Fixed-step grid march.
//!
//! The ray advances `resolution` units at a time along `heading(angle)` and
//! stops on the first cell that is not open floor.  Accuracy is bounded by
//! the step size, cost grows with distance and walls thinner than one step
//! can be skipped; [`SegmentCaster`](crate::engine::intersect::SegmentCaster)
//! has none of these problems and is the default.
//!
//! Every cell index is bounds-checked before the lookup.

use glam::{Vec2, vec2};

use crate::engine::caster::{CastError, RayCaster};
use crate::engine::types::{Hit, Ray};
use crate::world::{GridMap, heading};

pub struct Marcher<'a> {
    grid: &'a GridMap,
    resolution: f32,
    max_steps: u32,
}

impl<'a> Marcher<'a> {
    /// `resolution` must be positive.
    pub fn new(grid: &'a GridMap, resolution: f32, max_steps: u32) -> Self {
        debug_assert!(resolution > 0.0);
        Self {
            grid,
            resolution,
            max_steps,
        }
    }
}

/// `(row, col)` of the cell containing `p`.
#[inline]
fn cell_of(p: Vec2) -> (i64, i64) {
    (p.y.round() as i64, p.x.round() as i64)
}

/// Whether the last step entered its cell through a face of constant x.
///
/// When one step changes both row and column the face crossed last is the
/// one the step overshot by the smaller fraction.
fn entered_through_column_face(cur: Vec2, step: Vec2, prev: (i64, i64), dr: i64, dc: i64) -> bool {
    match (dr != 0, dc != 0) {
        (true, true) => {
            let face_x = prev.1 as f32 + 0.5 * dc as f32;
            let face_y = prev.0 as f32 + 0.5 * dr as f32;
            let past_x = ((cur.x - face_x) / step.x).abs();
            let past_y = ((cur.y - face_y) / step.y).abs();
            past_x <= past_y
        }
        (_, crossed_col) => crossed_col,
    }
}

impl RayCaster for Marcher<'_> {
    fn cast(&self, ray: &Ray) -> Result<Hit, CastError> {
        let step = heading(ray.angle_deg) * self.resolution;
        let mut cur = ray.origin;
        let mut prev = cell_of(cur);

        for i in 1..=self.max_steps {
            if i as f32 * self.resolution > ray.max_range {
                return Err(CastError::NoIntersection {
                    angle: ray.angle_deg,
                    max_range: ray.max_range,
                });
            }

            cur += step;
            let (row, col) = cell_of(cur);
            let tile = self
                .grid
                .material_at(row, col)
                .map_err(|_| CastError::OutOfBounds { row, col })?;

            if let Some(material) = tile.material() {
                let (dr, dc) = ((row - prev.0).signum(), (col - prev.1).signum());
                let normal = if entered_through_column_face(cur, step, prev, dr, dc) {
                    vec2(-(dc as f32), 0.0)
                } else {
                    vec2(0.0, -(dr as f32))
                };
                return Ok(Hit {
                    distance: (cur - ray.origin).length(),
                    material,
                    point: cur,
                    normal,
                });
            }
            prev = (row, col);
        }

        Err(CastError::IterationCap {
            steps: self.max_steps,
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
