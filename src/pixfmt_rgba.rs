//! RGBA pixel format with alpha blending.
//!
//! Pixel format that reads and writes RGBA32 pixels (4 bytes per pixel,
//! non-premultiplied alpha) with source-over blending.
//!
//! Provides the `PixelFormat` trait and `PixfmtRgba32` concrete implementation.

use crate::color::Rgba8;
use crate::rendering_buffer::{RenderingBuffer, BYTES_PER_PIXEL};

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Trait for pixel formats that can store and blend colors.
///
/// This is the abstraction layer between the renderer and the raw pixel data.
/// Coordinates must lie inside `width() x height()`; [`RendererBase`]
/// clips before calling in.
///
/// [`RendererBase`]: crate::renderer_base::RendererBase
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Get the pixel color at (x, y).
    fn pixel(&self, x: i32, y: i32) -> Self::ColorType;

    /// Copy (overwrite) a single pixel at (x, y) with color `c`.
    fn copy_pixel(&mut self, x: i32, y: i32, c: &Self::ColorType);

    /// Copy (overwrite) a horizontal line of `len` pixels with color `c`.
    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType);

    /// Composite `c` over a single pixel.
    fn blend_pixel(&mut self, x: i32, y: i32, c: &Self::ColorType);

    /// Composite `c` over a horizontal line of `len` pixels.
    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType);
}

// ============================================================================
// PixfmtRgba32: non-premultiplied RGBA, 8 bits per channel
// ============================================================================

/// Pixel format for non-premultiplied RGBA32 (4 bytes per pixel).
///
/// Component order: R=0, G=1, B=2, A=3.
#[derive(Debug)]
pub struct PixfmtRgba32<'a> {
    rbuf: RenderingBuffer<'a>,
}

impl<'a> PixfmtRgba32<'a> {
    pub fn new(rbuf: RenderingBuffer<'a>) -> Self {
        Self { rbuf }
    }

    pub fn rbuf(&self) -> &RenderingBuffer<'a> {
        &self.rbuf
    }

    /// Give the rendering buffer back.
    pub fn into_inner(self) -> RenderingBuffer<'a> {
        self.rbuf
    }

    /// Clear the entire buffer to a solid color.
    pub fn clear(&mut self, c: &Rgba8) {
        for y in 0..self.rbuf.height() {
            for px in self.rbuf.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
    }

    /// Non-premultiplied source-over:
    /// `a = sa + da*(1-sa)`, `c = (sc*sa + dc*da*(1-sa)) / a`.
    #[inline]
    fn blend_pix(p: &mut [u8], c: &Rgba8) {
        let da = p[3];
        if c.is_opaque() || da == 0 {
            p.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        } else if da == 255 {
            p[0] = Rgba8::lerp(p[0], c.r, c.a);
            p[1] = Rgba8::lerp(p[1], c.g, c.a);
            p[2] = Rgba8::lerp(p[2], c.b, c.a);
        } else {
            let sa = c.a as u32;
            // Destination weight and result alpha, both scaled by 255
            let dw = da as u32 * (255 - sa);
            let a255 = sa * 255 + dw;
            let mix = |dc: u8, sc: u8| -> u8 {
                ((sc as u32 * sa * 255 + dc as u32 * dw + a255 / 2) / a255) as u8
            };
            p[0] = mix(p[0], c.r);
            p[1] = mix(p[1], c.g);
            p[2] = mix(p[2], c.b);
            p[3] = ((a255 + 127) / 255) as u8;
        }
    }

    #[inline]
    fn span_mut(&mut self, x: i32, y: i32, len: u32) -> &mut [u8] {
        let start = x as usize * BYTES_PER_PIXEL;
        let end = start + len as usize * BYTES_PER_PIXEL;
        &mut self.rbuf.row_mut(y as u32)[start..end]
    }
}

impl<'a> PixelFormat for PixfmtRgba32<'a> {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.rbuf.width()
    }

    fn height(&self) -> u32 {
        self.rbuf.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        let off = x as usize * BYTES_PER_PIXEL;
        let row = self.rbuf.row(y as u32);
        Rgba8::new(row[off], row[off + 1], row[off + 2], row[off + 3])
    }

    fn copy_pixel(&mut self, x: i32, y: i32, c: &Rgba8) {
        self.copy_hline(x, y, 1, c);
    }

    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8) {
        for px in self.span_mut(x, y, len).chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8) {
        self.blend_hline(x, y, 1, c);
    }

    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8) {
        if c.a == 0 {
            return;
        }
        for px in self.span_mut(x, y, len).chunks_exact_mut(BYTES_PER_PIXEL) {
            Self::blend_pix(px, c);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
