//! Top-down diagnostics map drawn over the top-left corner of the frame.
//!
//! Shows every boundary segment in its material colour, the player, the
//! centre view ray up to its hit and the normal of the surface it hit.

use glam::Vec2;

use crate::{
    engine::types::Hit,
    renderer::{PixelSink, Rgba, palette::material_color},
    world::{Aabb, Camera, Segment},
};

/// Share of the frame's width/height taken by the map.
pub const MINIMAP_FRACTION: f32 = 0.3;
const MARGIN: f32 = 4.0;
const MIN_SIDE: usize = 16;

const BACKDROP: Rgba = 0x00_101010;
const PLAYER: Rgba = 0x00_FFFFFF;
const VIEW_RAY: Rgba = 0x00_FFFF00;
const NORMAL: Rgba = 0x00_FF00FF;

/// Length of the drawn normal, in world units.
const NORMAL_LEN: f32 = 0.75;

/// Map-space → overlay-pixel transform (y flipped so +y points up).
struct MapView {
    origin: Vec2,
    scale: f32,
    w: usize,
    h: usize,
}

impl MapView {
    fn fit(bounds: Aabb, w: usize, h: usize) -> Option<Self> {
        if w < MIN_SIDE || h < MIN_SIDE || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return None;
        }
        let sx = (w as f32 - 2.0 * MARGIN) / bounds.width();
        let sy = (h as f32 - 2.0 * MARGIN) / bounds.height();
        Some(Self {
            origin: bounds.min,
            scale: sx.min(sy),
            w,
            h,
        })
    }

    #[inline]
    fn to_screen(&self, p: Vec2) -> (i32, i32) {
        let sx = MARGIN + (p.x - self.origin.x) * self.scale;
        let sy = self.h as f32 - MARGIN - (p.y - self.origin.y) * self.scale;
        (sx.round() as i32, sy.round() as i32)
    }

    fn line<S: PixelSink + ?Sized>(&self, sink: &mut S, a: Vec2, b: Vec2, colour: Rgba) {
        let (x0, y0) = self.to_screen(a);
        let (x1, y1) = self.to_screen(b);
        draw_line(sink, self.w, self.h, x0, y0, x1, y1, colour);
    }
}

/// Draw the overlay.  Does nothing when the sink is too small to hold it.
pub fn draw_minimap<S: PixelSink + ?Sized>(
    sink: &mut S,
    segments: &[Segment],
    bounds: Aabb,
    camera: Camera,
    centre_hit: Option<&Hit>,
) {
    let w = (sink.width() as f32 * MINIMAP_FRACTION) as usize;
    let h = (sink.height() as f32 * MINIMAP_FRACTION) as usize;
    let Some(view) = MapView::fit(bounds, w, h) else {
        return;
    };

    for y in 0..h {
        for x in 0..w {
            sink.set_pixel(x, y, BACKDROP);
        }
    }

    for s in segments {
        view.line(sink, s.p1, s.p2, material_color(s.material));
    }

    let eye = camera.pos();
    match centre_hit {
        Some(hit) => {
            view.line(sink, eye, hit.point, VIEW_RAY);
            view.line(sink, hit.point, hit.point + hit.normal * NORMAL_LEN, NORMAL);
        }
        None => {
            let reach = bounds.width().max(bounds.height());
            view.line(sink, eye, eye + camera.forward() * reach, VIEW_RAY);
        }
    }

    let (px, py) = view.to_screen(eye);
    for dy in -1..=1 {
        for dx in -1..=1 {
            put(sink, w, h, px + dx, py + dy, PLAYER);
        }
    }
}

#[inline]
fn put<S: PixelSink + ?Sized>(sink: &mut S, w: usize, h: usize, x: i32, y: i32, colour: Rgba) {
    if (0..w as i32).contains(&x) && (0..h as i32).contains(&y) {
        sink.set_pixel(x as usize, y as usize, colour);
    }
}

/// Integer Bresenham line-drawing algorithm, clipped to `w × h`.
#[allow(clippy::too_many_arguments)]
fn draw_line<S: PixelSink + ?Sized>(
    sink: &mut S,
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: Rgba,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(sink, w, h, x0, y0, colour);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuffer;
    use crate::world::{Material, SegmentMap};
    use glam::vec2;

    fn square() -> SegmentMap {
        SegmentMap::polygon(
            &[
                vec2(-5.0, 5.0),
                vec2(5.0, 5.0),
                vec2(5.0, -5.0),
                vec2(-5.0, -5.0),
            ],
            Material::Sand,
        )
        .unwrap()
    }

    #[test]
    fn draws_inside_the_corner_only() {
        let map = square();
        let mut fb = FrameBuffer::new(200, 100);
        let cam = Camera::new(Vec2::ZERO, 0.0, 60.0);
        draw_minimap(&mut fb, map.segments(), map.bounds(), cam, None);

        let (w, h) = (60, 30);
        let mut saw_wall = false;
        for y in 0..100 {
            for x in 0..200 {
                let px = fb.pixel(x, y);
                if x >= w || y >= h {
                    assert_eq!(px, 0, "({x}, {y}) outside the overlay");
                } else {
                    saw_wall |= px == material_color(Material::Sand);
                }
            }
        }
        assert!(saw_wall);
        assert_eq!(fb.pixel(1, 1), BACKDROP);
    }

    #[test]
    fn player_and_hit_are_marked() {
        let map = square();
        let mut fb = FrameBuffer::new(200, 200);
        let cam = Camera::new(Vec2::ZERO, 0.0, 60.0);
        let hit = Hit {
            distance: 5.0,
            material: Material::Sand,
            point: vec2(0.0, 5.0),
            normal: vec2(0.0, -1.0),
        };
        draw_minimap(&mut fb, map.segments(), map.bounds(), cam, Some(&hit));
        let px = fb.pixels();
        assert!(px.contains(&PLAYER));
        assert!(px.contains(&VIEW_RAY));
        assert!(px.contains(&NORMAL));
    }

    #[test]
    fn tiny_frames_are_left_alone() {
        let map = square();
        let mut fb = FrameBuffer::new(20, 20);
        let cam = Camera::new(Vec2::ZERO, 0.0, 60.0);
        draw_minimap(&mut fb, map.segments(), map.bounds(), cam, None);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }
}
