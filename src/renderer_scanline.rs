//! Scanline renderer.
//!
//! Drives a [`RasterizerScanline`] sweep and paints every span into a
//! [`RendererBase`] with one solid color.

use crate::pixfmt_rgba::PixelFormat;
use crate::rasterizer_scanline::{RasterizerScanline, Scanline};
use crate::renderer_base::RendererBase;
use crate::scanline_bin::ScanlineBin;

// ============================================================================
// render_scanlines_bin_solid
// ============================================================================

/// Render all scanlines of `ras` with a solid `color`.
///
/// Returns the number of pixels covered, before clipping by `ren`.
pub fn render_scanlines_bin_solid<PF: PixelFormat>(
    ras: &mut RasterizerScanline,
    sl: &mut ScanlineBin,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) -> u64 {
    if !ras.rewind_scanlines() {
        return 0;
    }

    let mut covered = 0u64;
    while ras.sweep_scanline(sl) {
        covered += render_scanline_bin_solid(sl, ren, color);
    }
    covered
}

/// Render a single binary scanline.
fn render_scanline_bin_solid<PF: PixelFormat>(
    sl: &ScanlineBin,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) -> u64 {
    let y = sl.y();
    let mut covered = 0u64;
    for span in sl.spans() {
        ren.blend_hline(span.x, y, span.x_end(), color);
        covered += span.len as u64;
    }
    covered
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Polyline;
    use crate::basics::{FillRule, PointD};
    use crate::color::Rgba8;
    use crate::pixfmt_rgba::PixfmtRgba32;
    use crate::rendering_buffer::RenderingBuffer;

    fn make_rgba_buffer(w: u32, h: u32) -> Vec<u8> {
        vec![255u8; (w * h * 4) as usize]
    }

    #[test]
    fn test_render_triangle_solid_red() {
        let mut buf = make_rgba_buffer(100, 100);
        let pf = PixfmtRgba32::new(RenderingBuffer::new_packed(&mut buf, 100, 100).unwrap());
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanline::new();
        let mut sl = ScanlineBin::new();

        // Triangle (20,20) → (80,20) → (50,80)
        ras.move_to_d(20.0, 20.0);
        ras.line_to_d(80.0, 20.0);
        ras.line_to_d(50.0, 80.0);

        let red = Rgba8::new(255, 0, 0, 255);
        let covered = render_scanlines_bin_solid(&mut ras, &mut sl, &mut ren, &red);
        assert!(covered > 1700 && covered < 1900, "covered={}", covered);

        assert_eq!(ren.ren().pixel(50, 40), red);
        assert_eq!(ren.ren().pixel(0, 0), Rgba8::WHITE);
        // No anti-aliasing: every pixel is either untouched or fully red
        for y in 0..100 {
            for x in 0..100 {
                let p = ren.ren().pixel(x, y);
                assert!(p == red || p == Rgba8::WHITE);
            }
        }
    }

    #[test]
    fn test_render_rectangle() {
        let mut buf = make_rgba_buffer(100, 100);
        let pf = PixfmtRgba32::new(RenderingBuffer::new_packed(&mut buf, 100, 100).unwrap());
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanline::new();
        let mut sl = ScanlineBin::new();

        ras.move_to_d(10.0, 10.0);
        ras.line_to_d(90.0, 10.0);
        ras.line_to_d(90.0, 90.0);
        ras.line_to_d(10.0, 90.0);

        let blue = Rgba8::new(0, 0, 255, 255);
        let covered = render_scanlines_bin_solid(&mut ras, &mut sl, &mut ren, &blue);
        assert_eq!(covered, 80 * 80);
        assert_eq!(ren.ren().pixel(10, 10), blue);
        assert_eq!(ren.ren().pixel(89, 89), blue);
        assert_eq!(ren.ren().pixel(90, 50), Rgba8::WHITE);
        assert_eq!(ren.ren().pixel(9, 50), Rgba8::WHITE);
    }

    #[test]
    fn test_render_clipped_by_renderer() {
        let mut buf = make_rgba_buffer(20, 20);
        let pf = PixfmtRgba32::new(RenderingBuffer::new_packed(&mut buf, 20, 20).unwrap());
        let mut ren = RendererBase::new(pf);
        ren.clip_box_i(5, 5, 9, 9);
        let mut ras = RasterizerScanline::new();
        let mut sl = ScanlineBin::new();
        ras.add_polyline(&Polyline::from_points(
            vec![
                PointD::new(0.0, 0.0),
                PointD::new(20.0, 0.0),
                PointD::new(20.0, 20.0),
                PointD::new(0.0, 20.0),
            ],
            true,
        ));
        render_scanlines_bin_solid(&mut ras, &mut sl, &mut ren, &Rgba8::BLACK);
        ren.reset_clipping();
        assert_eq!(ren.pixel(5, 5), Rgba8::BLACK);
        assert_eq!(ren.pixel(9, 9), Rgba8::BLACK);
        assert_eq!(ren.pixel(10, 10), Rgba8::WHITE);
        assert_eq!(ren.pixel(4, 5), Rgba8::WHITE);
    }

    #[test]
    fn test_render_even_odd_ring() {
        let mut buf = make_rgba_buffer(30, 30);
        let pf = PixfmtRgba32::new(RenderingBuffer::new_packed(&mut buf, 30, 30).unwrap());
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanline::new();
        ras.set_filling_rule(FillRule::EvenOdd);
        let mut sl = ScanlineBin::new();
        for (a, b) in [(0.0, 30.0), (10.0, 20.0)] {
            ras.move_to_d(a, a);
            ras.line_to_d(b, a);
            ras.line_to_d(b, b);
            ras.line_to_d(a, b);
        }
        render_scanlines_bin_solid(&mut ras, &mut sl, &mut ren, &Rgba8::BLACK);
        assert_eq!(ren.pixel(5, 15), Rgba8::BLACK);
        assert_eq!(ren.pixel(15, 15), Rgba8::WHITE);
    }

    #[test]
    fn test_render_empty() {
        let mut buf = make_rgba_buffer(10, 10);
        let pf = PixfmtRgba32::new(RenderingBuffer::new_packed(&mut buf, 10, 10).unwrap());
        let mut ren = RendererBase::new(pf);
        let mut ras = RasterizerScanline::new();
        let mut sl = ScanlineBin::new();
        assert_eq!(
            render_scanlines_bin_solid(&mut ras, &mut sl, &mut ren, &Rgba8::BLACK),
            0
        );
        assert_eq!(ren.pixel(5, 5), Rgba8::WHITE);
    }
}
