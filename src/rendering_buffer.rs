//! Rendering buffer: row-oriented access to caller-owned pixel data.
//!
//! [`RenderingBuffer`] borrows a byte slice laid out top-down, `stride`
//! bytes per row, and hands out row slices. The dimensions are checked
//! once at construction so row access never goes out of bounds.

use crate::error::{Draw2dError, Draw2dResult};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

// ============================================================================
// RenderingBuffer
// ============================================================================

/// Borrowed rectangular pixel buffer.
#[derive(Debug)]
pub struct RenderingBuffer<'a> {
    buf: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> RenderingBuffer<'a> {
    /// Attach to `buf`.
    ///
    /// Fails when a row of `width` pixels does not fit in `stride`, or when
    /// `buf` holds fewer than `height` rows.
    pub fn new(buf: &'a mut [u8], width: u32, height: u32, stride: usize) -> Draw2dResult<Self> {
        let len = buf.len();
        let invalid = || Draw2dError::InvalidDimensions {
            width,
            height,
            stride,
            len,
        };
        let row_bytes = (width as usize)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(invalid)?;
        let needed = stride.checked_mul(height as usize).ok_or_else(invalid)?;
        if stride < row_bytes || len < needed {
            let err = invalid();
            log::warn!(target: "draw2d", "{}", err);
            return Err(err);
        }
        Ok(Self {
            buf,
            width,
            height,
            stride,
        })
    }

    /// Attach to a tightly packed buffer (`stride = width * 4`).
    pub fn new_packed(buf: &'a mut [u8], width: u32, height: u32) -> Draw2dResult<Self> {
        Self::new(buf, width, height, width as usize * BYTES_PER_PIXEL)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The pixel bytes of row `y` (`width * 4` bytes).
    ///
    /// # Panics
    /// When `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.buf[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Mutable pixel bytes of row `y`.
    ///
    /// # Panics
    /// When `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        &mut self.buf[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Release the borrowed slice.
    pub fn into_inner(self) -> &'a mut [u8] {
        self.buf
    }
}

// ============================================================================
// Tests
// ============================================================================
