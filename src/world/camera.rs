use glam::Vec2;

use crate::world::geometry::heading;

/// Frozen view of the player for one frame.
///
/// * Built once per frame by the engine and shared read-only by every
///   column, so columns can be cast in any order or in parallel.
/// * `yaw` and `fov` are in **degrees**; yaw 0 looks along +y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pos: Vec2,
    yaw: f32, // degrees, clockwise from +y
    fov: f32, // horizontal spread in degrees
}

impl Camera {
    pub fn new(pos: Vec2, yaw: f32, fov: f32) -> Self {
        Self { pos, yaw, fov }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Unit vector the camera looks along.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        heading(self.yaw)
    }

    /// Angle offset from the view centre for screen column `x`.
    ///
    /// ```text
    /// offset = (x + 0.5) / width * fov - fov / 2
    /// ```
    #[inline]
    pub fn column_offset(self, x: usize, width: usize) -> f32 {
        (x as f32 + 0.5) / width as f32 * self.fov - self.fov * 0.5
    }

    /// Absolute ray angle (degrees) for screen column `x`.
    #[inline]
    pub fn column_angle(self, x: usize, width: usize) -> f32 {
        self.yaw + self.column_offset(x, width)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
