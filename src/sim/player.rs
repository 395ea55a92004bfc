use glam::Vec2;

use crate::config::PlayerConfig;
use crate::sim::InputCmd;
use crate::world::{Aabb, Camera, heading, right_of};

/// Longest frame step applied to movement; a stalled frame does not teleport
/// the player.
pub const MAX_FRAME_MS: f32 = 100.0;

/// Player position and heading.  Only the frame driver mutates it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub rot: f32,       // degrees, [0, 360)
    pub speed: f32,     // units / ms
    pub rot_speed: f32, // degrees / ms
    pub respawn: Vec2,
}

impl Player {
    pub fn new(cfg: &PlayerConfig) -> Self {
        Self {
            pos: cfg.position,
            rot: cfg.rot.rem_euclid(360.0),
            speed: cfg.speed,
            rot_speed: cfg.rot_speed,
            respawn: cfg.respawn,
        }
    }

    /// Apply one frame of input.
    ///
    /// * turn first, then move along the *old* heading (forward) and its
    ///   right-hand perpendicular (strafe);
    /// * any axis that leaves `bounds` is reset to the respawn value.
    ///   This is a crude "respawn" clamp, not collision.
    pub fn advance(&mut self, cmd: &InputCmd, elapsed_ms: f32, bounds: Aabb) {
        let dt = elapsed_ms.clamp(0.0, MAX_FRAME_MS);
        let forward = cmd.forward.clamp(-1.0, 1.0);
        let strafe = cmd.strafe.clamp(-1.0, 1.0);
        let turn = cmd.turn.clamp(-1.0, 1.0);

        let facing = self.rot;
        self.rot = (self.rot + turn * self.rot_speed * dt).rem_euclid(360.0);

        let step = self.speed * dt;
        self.pos += heading(facing) * forward * step + right_of(facing) * strafe * step;

        if self.pos.x < bounds.min.x || self.pos.x > bounds.max.x {
            log::debug!("player left map on x at {:.2}; respawning", self.pos.x);
            self.pos.x = self.respawn.x;
        }
        if self.pos.y < bounds.min.y || self.pos.y > bounds.max.y {
            log::debug!("player left map on y at {:.2}; respawning", self.pos.y);
            self.pos.y = self.respawn.y;
        }
    }

    /// Frozen view for this frame.
    #[inline]
    pub fn camera(&self, fov: f32) -> Camera {
        Camera::new(self.pos, self.rot, fov)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn bounds() -> Aabb {
        Aabb::new(vec2(-0.5, -0.5), vec2(9.5, 4.5))
    }

    fn player() -> Player {
        Player::new(&PlayerConfig::default())
    }

    fn cmd(forward: f32, strafe: f32, turn: f32) -> InputCmd {
        InputCmd {
            forward,
            strafe,
            turn,
            ..Default::default()
        }
    }

    #[test]
    fn forward_moves_along_heading() {
        let mut p = player();
        p.advance(&cmd(1.0, 0.0, 0.0), 100.0, bounds());
        // 0.002 units/ms × 100 ms along +y
        assert!((p.pos - vec2(6.0, 2.2)).length() < 1e-5);
    }

    #[test]
    fn strafe_moves_right() {
        let mut p = player();
        p.advance(&cmd(0.0, 1.0, 0.0), 50.0, bounds());
        assert!((p.pos - vec2(6.1, 2.0)).length() < 1e-5);
        p.advance(&cmd(0.0, -1.0, 0.0), 50.0, bounds());
        assert!((p.pos - vec2(6.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn turning_wraps_into_range() {
        let mut p = player();
        p.advance(&cmd(0.0, 0.0, -1.0), 50.0, bounds());
        assert!((p.rot - 350.0).abs() < 1e-3);
        p.advance(&cmd(0.0, 0.0, 1.0), 100.0, bounds());
        assert!((p.rot - 10.0).abs() < 1e-3);
        assert_eq!(p.pos, vec2(6.0, 2.0));
    }

    #[test]
    fn leaving_the_map_respawns_that_axis() {
        let mut p = player();
        p.pos = vec2(9.45, 3.0);
        p.rot = 90.0;
        p.advance(&cmd(1.0, 0.0, 0.0), 100.0, bounds());
        assert_eq!(p.pos.x, 2.0);
        assert!((p.pos.y - 3.0).abs() < 1e-4);

        p.pos = vec2(5.0, -0.45);
        p.rot = 180.0;
        p.advance(&cmd(1.0, 0.0, 0.0), 100.0, bounds());
        assert!((p.pos.x - 5.0).abs() < 1e-4);
        assert_eq!(p.pos.y, 2.0);
    }

    #[test]
    fn elapsed_time_is_clamped() {
        let mut p = player();
        p.advance(&cmd(1.0, 0.0, 0.0), 10_000.0, bounds());
        assert!((p.pos.y - (2.0 + 0.002 * MAX_FRAME_MS)).abs() < 1e-5);

        let before = p;
        p.advance(&cmd(1.0, 1.0, 1.0), -5.0, bounds());
        assert_eq!(p, before);
    }

    #[test]
    fn axes_are_clamped() {
        let mut a = player();
        let mut b = player();
        a.advance(&cmd(7.0, 0.0, 0.0), 20.0, bounds());
        b.advance(&cmd(1.0, 0.0, 0.0), 20.0, bounds());
        assert_eq!(a, b);
    }

    #[test]
    fn camera_snapshot_matches_player() {
        let mut p = player();
        p.rot = 30.0;
        let cam = p.camera(75.0);
        assert_eq!(cam.pos(), p.pos);
        assert_eq!(cam.yaw(), 30.0);
        assert_eq!(cam.fov(), 75.0);
    }
}
