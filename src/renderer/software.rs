//! ---------------------------------------------------------------------------
//! Column shader
//!
//! * One call paints one full screen column: ceiling, wall strip, floor.
//! * Strip half-height is inverse to depth:
//!   `h = distance_scale / depth * wall_scale`.
//! * Wall colour is the material's flat colour darkened linearly with
//!   distance; at or beyond `far_clip` the column is background only.
//! ---------------------------------------------------------------------------

use crate::{
    config::Tunables,
    engine::types::{RenderColumn, Screen},
    renderer::{
        PixelSink, Rgba,
        palette::{CEILING, FLOOR, attenuate, attenuation, material_color},
    },
};

/// Depth floor used before dividing; a wall touching the eye fills the column.
pub const MIN_DEPTH: f32 = 1e-3;

/// Projects ray results into wall strips.
#[derive(Clone, Copy, Debug)]
pub struct Shader {
    wall_scale: f32,
    distance_scale: f32,
    far_clip: f32,
}

impl Shader {
    pub fn new(t: &Tunables) -> Self {
        Self {
            wall_scale: t.wall_scale,
            distance_scale: t.distance_scale,
            far_clip: t.far_clip,
        }
    }

    /// Half the strip height in pixels for a wall `depth` units away.
    #[inline]
    pub fn half_height(&self, depth: f32) -> f32 {
        self.distance_scale / depth.max(MIN_DEPTH) * self.wall_scale
    }

    /// Colour and half-height of the strip, `None` when nothing is drawn.
    fn strip(&self, column: Option<&RenderColumn>) -> Option<(f32, Rgba)> {
        let c = column.filter(|c| c.distance < self.far_clip)?;
        let color = attenuate(
            material_color(c.material),
            attenuation(c.distance, self.far_clip),
        );
        Some((self.half_height(c.depth), color))
    }

    /// Paint screen column `x`.  `None` draws floor and ceiling only.
    pub fn draw_column<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        screen: Screen,
        x: usize,
        column: Option<&RenderColumn>,
    ) {
        let strip = self.strip(column);

        for y in 0..screen.h {
            let yf = y as f32;
            let color = match strip {
                Some((h, wall)) if (screen.half_h - yf).abs() < h => wall,
                _ if yf > screen.half_h => FLOOR,
                _ => CEILING,
            };
            sink.set_pixel(x, y, color);
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::{FrameBuffer, palette::pack_rgb},
        world::Material,
    };

    fn shader() -> Shader {
        Shader::new(&Tunables::default())
    }

    fn column(distance: f32) -> RenderColumn {
        RenderColumn {
            distance,
            depth: distance,
            material: Material::Brick,
        }
    }

    /* tiny helpers ---------------------------------------------------*/
    fn draw(col: Option<RenderColumn>) -> Vec<Rgba> {
        let mut fb = FrameBuffer::new(1, 100);
        shader().draw_column(&mut fb, Screen::new(1, 100), 0, col.as_ref());
        fb.column(0)
    }

    fn background() -> Vec<Rgba> {
        (0..100)
            .map(|y| if y as f32 > 50.0 { FLOOR } else { CEILING })
            .collect()
    }

    #[test]
    fn empty_column_is_background() {
        assert_eq!(draw(None), background());
    }

    #[test]
    fn far_walls_are_background_only() {
        let far = Tunables::default().far_clip;
        for d in [far, far + 0.001, far * 3.0, f32::INFINITY] {
            assert_eq!(draw(Some(column(d))), background(), "distance {d}");
        }
    }

    #[test]
    fn strip_is_centred_and_shrinks_with_distance() {
        let wall_rows = |d: f32| {
            draw(Some(column(d)))
                .iter()
                .zip(background())
                .filter(|(a, b)| *a != b)
                .count()
        };
        let near = wall_rows(4.0);
        let far = wall_rows(8.0);
        assert!(near > far && far > 0, "{near} vs {far}");

        let px = draw(Some(column(8.0)));
        assert_ne!(px[50], CEILING);
        assert_eq!(px[0], CEILING);
        assert_eq!(px[99], FLOOR);
    }

    #[test]
    fn wall_colour_is_attenuated() {
        // default far clip 10 → distance 5 halves every channel
        let px = draw(Some(column(5.0)));
        assert_eq!(px[50], pack_rgb(0x7F, 0, 0));
    }

    #[test]
    fn zero_distance_fills_the_column() {
        let px = draw(Some(column(0.0)));
        assert!(px.iter().all(|&c| c == pack_rgb(0xFF, 0, 0)));
    }

    #[test]
    fn half_height_is_inverse_to_depth() {
        let s = shader();
        assert!((s.half_height(2.0) * 2.0 - s.half_height(1.0)).abs() < 1e-4);
        assert!(s.half_height(0.0).is_finite());
    }
}
