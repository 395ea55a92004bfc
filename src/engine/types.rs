use glam::Vec2;

use crate::world::Material;

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: f32, // horizon row
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_h: h as f32 * 0.5,
        }
    }
}

/// One view ray, created fresh per column per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub angle_deg: f32,
    pub max_range: f32,
}

impl Ray {
    pub fn new(origin: Vec2, angle_deg: f32, max_range: f32) -> Self {
        Self {
            origin,
            angle_deg,
            max_range,
        }
    }
}

/// Closest surface a ray reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f32, // always >= 0
    pub material: Material,
    pub point: Vec2,
    pub normal: Vec2, // unit, facing the ray origin
}

/// What the shader needs to draw one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderColumn {
    /// Euclidean distance to the wall; drives attenuation.
    pub distance: f32,
    /// Distance used for the strip height (fish-eye corrected when enabled).
    pub depth: f32,
    pub material: Material,
}
