//! Exact ray/segment intersection.
//!
//! For a ray `O + t1·d` and a segment `P3 + t2·(P4 - P3)`:
//!
//! ```text
//! v1 = O - P3        v2 = P4 - P3        v3 = (-d.y, d.x)
//! t1 = cross(v2, v1) / dot(v2, v3)       distance along the ray
//! t2 = dot(v1, v3)   / dot(v2, v3)       position along the segment
//! ```
//!
//! A crossing counts when `t1 >= 0` and `0 <= t2 <= 1`.  Both ends of the
//! segment are stretched by [`EDGE_EPSILON`] world units so a ray through a
//! vertex shared by two segments cannot slip between them.

use glam::Vec2;

use crate::engine::caster::{CastError, RayCaster};
use crate::engine::types::{Hit, Ray};
use crate::world::geometry::ray_normal;
use crate::world::{Segment, cross, heading};

/// Slack past either segment end, in world units.
pub const EDGE_EPSILON: f32 = 1e-5;

/// Parametric crossing `(t1, t2)` of the ray `origin + t·dir` with `seg`.
///
/// `None` when the ray is parallel to the segment, points away from it, or
/// passes beyond either end.
#[inline]
pub fn intersect(origin: Vec2, dir: Vec2, seg: &Segment) -> Option<(f32, f32)> {
    let v1 = origin - seg.p1;
    let v2 = seg.p2 - seg.p1;
    let v3 = ray_normal(dir);

    let denom = v2.dot(v3);
    if denom == 0.0 {
        return None; // parallel
    }

    let t1 = cross(v2, v1) / denom;
    let t2 = v1.dot(v3) / denom;

    let slack = EDGE_EPSILON / v2.length();
    let on_segment = (-slack..=1.0 + slack).contains(&t2);
    (t1 >= 0.0 && on_segment).then_some((t1, t2))
}

/// Tests a ray against every boundary segment and keeps the closest.
pub struct SegmentCaster<'a> {
    segments: &'a [Segment],
}

impl<'a> SegmentCaster<'a> {
    pub fn new(segments: &'a [Segment]) -> Self {
        Self { segments }
    }
}

impl RayCaster for SegmentCaster<'_> {
    fn cast(&self, ray: &Ray) -> Result<Hit, CastError> {
        let dir = heading(ray.angle_deg);

        // closest candidate so far, carried by value
        let mut best: Option<(f32, Vec2, Segment)> = None;
        for seg in self.segments {
            let Some((t1, _)) = intersect(ray.origin, dir, seg) else {
                continue;
            };
            let point = ray.origin + dir * t1;
            let distance = (point - ray.origin).length();
            if distance > ray.max_range {
                continue;
            }
            if best.is_none_or(|(d, _, _)| distance < d) {
                best = Some((distance, point, *seg));
            }
        }

        let (distance, point, seg) = best.ok_or(CastError::NoIntersection {
            angle: ray.angle_deg,
            max_range: ray.max_range,
        })?;

        Ok(Hit {
            distance,
            material: seg.material,
            point,
            normal: seg.normal_toward(ray.origin),
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
