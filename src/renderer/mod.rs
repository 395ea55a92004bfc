//! Pixel output.
//!
//! *The engine never touches a window.*  It writes through the
//! [`PixelSink`] capability; the front-end decides what a pixel is backed by.
//!
//! * [`FrameBuffer`] is the in-memory sink: a row-major `Vec<Rgba>` that can
//!   be handed to any presenter once the frame is done.
//! * [`software::Shader`] turns ray results into wall strips.
//! * [`overlay`] draws the top-down diagnostics map.

pub mod overlay;
pub mod palette;
pub mod software;

/// Pixel format of the frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Anything that can receive pixels.
///
/// Coordinates must satisfy `x < width()` and `y < height()`; writing outside
/// that range is a caller bug, not a sink error.
pub trait PixelSink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba);
}

/// Row-major software frame-buffer.
#[derive(Clone, Debug, Default)]
pub struct FrameBuffer {
    pixels: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Vertical strip `x` as a vector, top to bottom.
    pub fn column(&self, x: usize) -> Vec<Rgba> {
        (0..self.height).map(|y| self.pixel(x, y)).collect()
    }

    /// **Loan** the finished frame to `submit(pixels, w, h)`.
    ///
    /// Software callers pass
    /// `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    pub fn present<F, T>(&self, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T,
    {
        submit(&self.pixels, self.width, self.height)
    }
}

impl PixelSink for FrameBuffer {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x] = color;
    }
}
