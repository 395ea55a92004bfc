// Flat colours for walls, floor and ceiling, plus distance attenuation.
// Colours are 0x00RRGGBB words; the top byte is never touched by shading.

use crate::renderer::Rgba;
use crate::world::Material;

/// Rows above the horizon.
pub const CEILING: Rgba = 0x00_FFFFFF;
/// Rows below the horizon.
pub const FLOOR: Rgba = 0x00_AAAAAA;

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> Rgba {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Fixed material → colour table.
pub const fn material_color(m: Material) -> Rgba {
    match m {
        Material::Brick => pack_rgb(0xFF, 0x00, 0x00),
        Material::Moss => pack_rgb(0x00, 0xFF, 0x00),
        Material::Clay => pack_rgb(0xFF, 0x00, 0x00),
        Material::Sand => pack_rgb(0xFF, 0xFF, 0x00),
        Material::Rust => pack_rgb(0xFF, 0x00, 0x00),
        Material::Ochre => pack_rgb(0xFF, 0x00, 0x00),
        Material::Slate => pack_rgb(0x00, 0x00, 0xFF),
        Material::Ivy => pack_rgb(0x00, 0xFF, 0x00),
        Material::Cobalt => pack_rgb(0x00, 0x00, 0xFF),
    }
}

/// Linear falloff: 1 at the eye, 0 at `far_clip` and beyond.
#[inline]
pub fn attenuation(distance: f32, far_clip: f32) -> f32 {
    (far_clip - distance).clamp(0.0, far_clip) / far_clip
}

/// Scale R, G and B by `factor`, each clamped to `[0, 255]`.
/// The top byte passes through unchanged.
pub fn attenuate(color: Rgba, factor: f32) -> Rgba {
    let channel = |shift: u32| -> u32 {
        let c = ((color >> shift) & 0xFF) as f32 * factor;
        (c.clamp(0.0, 255.0) as u32) << shift
    };
    (color & 0xFF00_0000) | channel(16) | channel(8) | channel(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channels() {
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x00_123456);
    }

    #[test]
    fn every_material_has_a_visible_colour() {
        for m in Material::ALL {
            assert_ne!(material_color(m), 0, "{m}");
        }
    }

    #[test]
    fn attenuation_is_linear_and_clamped() {
        assert_eq!(attenuation(0.0, 10.0), 1.0);
        assert!((attenuation(2.5, 10.0) - 0.75).abs() < 1e-6);
        assert_eq!(attenuation(10.0, 10.0), 0.0);
        assert_eq!(attenuation(25.0, 10.0), 0.0);
        assert_eq!(attenuation(-3.0, 10.0), 1.0);
    }

    #[test]
    fn channels_attenuate_independently() {
        let c = pack_rgb(200, 100, 50);
        assert_eq!(attenuate(c, 0.5), pack_rgb(100, 50, 25));
        assert_eq!(attenuate(c, 1.0), c);
        assert_eq!(attenuate(c, 0.0), 0);
        // over-bright factors saturate instead of bleeding into the next channel
        assert_eq!(attenuate(c, 2.0), pack_rgb(255, 200, 100));
    }

    #[test]
    fn top_byte_is_untouched() {
        assert_eq!(attenuate(0xAB_FF8040, 0.5), 0xAB_7F4020);
        assert_eq!(attenuate(0xFF_000000, 0.0), 0xFF_000000);
    }
}
