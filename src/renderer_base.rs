//! Base renderer with clipping.
//!
//! Wraps a pixel format with a clip rectangle, ensuring all rendering
//! operations are bounded within the visible area.

use crate::basics::RectI;
use crate::pixfmt_rgba::PixelFormat;

// ============================================================================
// RendererBase: clip-and-delegate renderer
// ============================================================================

/// Base renderer that clips all operations to a rectangle before delegating
/// to the underlying pixel format.
#[derive(Debug)]
pub struct RendererBase<PF: PixelFormat> {
    ren: PF,
    clip_box: RectI,
}

impl<PF: PixelFormat> RendererBase<PF> {
    /// Create a new renderer wrapping the given pixel format.
    /// The clip box is initialized to the full buffer extent.
    pub fn new(ren: PF) -> Self {
        let clip_box = Self::full_box(&ren);
        Self { ren, clip_box }
    }

    fn full_box(ren: &PF) -> RectI {
        RectI::new(0, 0, ren.width() as i32 - 1, ren.height() as i32 - 1)
    }

    pub fn width(&self) -> u32 {
        self.ren.width()
    }
    pub fn height(&self) -> u32 {
        self.ren.height()
    }

    /// Set the clip rectangle (will be intersected with the buffer bounds).
    pub fn clip_box_i(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let mut cb = RectI::new(x1, y1, x2, y2);
        cb.normalize();
        if cb.clip(&Self::full_box(&self.ren)) {
            self.clip_box = cb;
            true
        } else {
            self.clip_box = RectI::new(1, 1, 0, 0);
            false
        }
    }

    /// Reset clipping to the full buffer.
    pub fn reset_clipping(&mut self) {
        self.clip_box = Self::full_box(&self.ren);
    }

    pub fn clip_box(&self) -> &RectI {
        &self.clip_box
    }
    pub fn xmin(&self) -> i32 {
        self.clip_box.x1
    }
    pub fn ymin(&self) -> i32 {
        self.clip_box.y1
    }
    pub fn xmax(&self) -> i32 {
        self.clip_box.x2
    }
    pub fn ymax(&self) -> i32 {
        self.clip_box.y2
    }

    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        self.clip_box.hit_test(x, y)
    }

    /// Get a reference to the underlying pixel format.
    pub fn ren(&self) -> &PF {
        &self.ren
    }

    /// Get a mutable reference to the underlying pixel format.
    pub fn ren_mut(&mut self) -> &mut PF {
        &mut self.ren
    }

    /// Give the pixel format back.
    pub fn into_inner(self) -> PF {
        self.ren
    }

    // ========================================================================
    // Rendering operations (clip then delegate)
    // ========================================================================

    /// Overwrite every pixel inside the clip box with `c`.
    pub fn clear(&mut self, c: &PF::ColorType) {
        for y in self.ymin()..=self.ymax() {
            self.copy_hline(self.xmin(), y, self.xmax(), c);
        }
    }

    /// Copy a single pixel (clipped).
    pub fn copy_pixel(&mut self, x: i32, y: i32, c: &PF::ColorType) {
        if self.inbox(x, y) {
            self.ren.copy_pixel(x, y, c);
        }
    }

    /// Blend a single pixel (clipped).
    pub fn blend_pixel(&mut self, x: i32, y: i32, c: &PF::ColorType) {
        if self.inbox(x, y) {
            self.ren.blend_pixel(x, y, c);
        }
    }

    /// Get the pixel at (x, y), or default if outside clip.
    pub fn pixel(&self, x: i32, y: i32) -> PF::ColorType
    where
        PF::ColorType: Default,
    {
        if self.inbox(x, y) {
            self.ren.pixel(x, y)
        } else {
            PF::ColorType::default()
        }
    }

    /// Clip the inclusive span `x1..=x2` on row `y`; `None` when nothing
    /// is left.
    fn clip_hline(&self, mut x1: i32, y: i32, mut x2: i32) -> Option<(i32, u32)> {
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
        }
        if y > self.ymax() || y < self.ymin() || x1 > self.xmax() || x2 < self.xmin() {
            return None;
        }
        x1 = x1.max(self.xmin());
        x2 = x2.min(self.xmax());
        Some((x1, (x2 - x1 + 1) as u32))
    }

    /// Copy a horizontal line (clipped). x1, x2 are inclusive endpoints.
    pub fn copy_hline(&mut self, x1: i32, y: i32, x2: i32, c: &PF::ColorType) {
        if let Some((x, len)) = self.clip_hline(x1, y, x2) {
            self.ren.copy_hline(x, y, len, c);
        }
    }

    /// Blend a horizontal line (clipped). x1, x2 are inclusive endpoints.
    pub fn blend_hline(&mut self, x1: i32, y: i32, x2: i32, c: &PF::ColorType) {
        if let Some((x, len)) = self.clip_hline(x1, y, x2) {
            self.ren.blend_hline(x, y, len, c);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
