//! Geometry kernel.
//!
//! `glam::Vec2` is the value type for every point and direction in the crate:
//! subtraction, `dot`, `length` (magnitude) and `normalize` come straight from
//! glam.  This module adds the scalar cross product, the angle ↔ direction
//! convention and the two small shapes the map is built from.
//!
//! ### Axis convention
//! One convention is used everywhere (movement, rays, normals):
//!
//! ```text
//! heading(θ) = (sin θ, cos θ)      θ = 0  → +y,  θ = 90° → +x
//! right_of(θ) = (cos θ, -sin θ)    clockwise perpendicular
//! ```
//!
//! Angles cross the API in **degrees**; trigonometry runs in radians.

use glam::Vec2;

use crate::world::material::Material;

/// Degrees → radians.
#[inline]
pub fn to_radians(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Radians → degrees.
#[inline]
pub fn to_degrees(rad: f32) -> f32 {
    rad * 180.0 / std::f32::consts::PI
}

/// 2-D scalar cross product, `a.x * b.y - a.y * b.x`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Unit vector an observer facing `deg` degrees looks along.
#[inline]
pub fn heading(deg: f32) -> Vec2 {
    let (s, c) = to_radians(deg).sin_cos();
    Vec2::new(s, c)
}

/// Unit vector to the observer's right when facing `deg` degrees.
#[inline]
pub fn right_of(deg: f32) -> Vec2 {
    let (s, c) = to_radians(deg).sin_cos();
    Vec2::new(c, -s)
}

/// `dir` rotated by +90°: `(-dir.y, dir.x)`.
#[inline]
pub fn ray_normal(dir: Vec2) -> Vec2 {
    Vec2::new(-dir.y, dir.x)
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Smallest box holding every point; `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vec2>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(Self::new(first, first), |b, p| {
            Self::new(b.min.min(p), b.max.max(p))
        }))
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// One directed wall boundary `p1 → p2`, tagged with its material.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    #[serde(rename = "from")]
    pub p1: Vec2,
    #[serde(rename = "to")]
    pub p2: Vec2,
    pub material: Material,
}

impl Segment {
    pub fn new(p1: Vec2, p2: Vec2, material: Material) -> Self {
        Self { p1, p2, material }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.p2 - self.p1).length()
    }

    /// Unit normal on the side of the segment where `point` lies.
    ///
    /// Precondition: the segment has non-zero length.  Map construction
    /// rejects degenerate segments, so every segment reaching a caster
    /// satisfies it.
    pub fn normal_toward(&self, point: Vec2) -> Vec2 {
        let n = (self.p2 - self.p1).perp().normalize();
        if n.dot(point - self.p1) < 0.0 { -n } else { n }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
