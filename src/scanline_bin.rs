//! Binary scanline container (ScanlineBin).
//!
//! Simplest scanline type with no coverage data. Each span just records X
//! and length, which is all an aliased fill needs.

use crate::rasterizer_scanline::Scanline;

// ============================================================================
// BinSpan: a span in a binary scanline
// ============================================================================

/// A horizontal span in a binary scanline (no coverage data).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinSpan {
    pub x: i32,
    pub len: i32,
}

impl BinSpan {
    /// Inclusive last pixel of the span.
    pub fn x_end(&self) -> i32 {
        self.x + self.len - 1
    }
}

// ============================================================================
// ScanlineBin: binary scanline (no coverage data)
// ============================================================================

/// Binary scanline container: just on/off spans.
///
/// Spans touching the previous one are merged.
#[derive(Debug, Clone)]
pub struct ScanlineBin {
    last_x: i32,
    y_val: i32,
    spans: Vec<BinSpan>,
}

const NO_LAST_X: i32 = 0x7FFF_FFF0;

impl ScanlineBin {
    pub fn new() -> Self {
        Self {
            last_x: NO_LAST_X,
            y_val: 0,
            spans: Vec::new(),
        }
    }

    /// Spans of the current scanline, left to right.
    pub fn spans(&self) -> &[BinSpan] {
        &self.spans
    }
}

impl Scanline for ScanlineBin {
    fn reset_spans(&mut self) {
        self.last_x = NO_LAST_X;
        self.spans.clear();
    }

    fn add_span(&mut self, x: i32, len: u32) {
        if len == 0 {
            return;
        }
        match self.spans.last_mut() {
            Some(span) if x == self.last_x + 1 => span.len += len as i32,
            _ => self.spans.push(BinSpan { x, len: len as i32 }),
        }
        self.last_x = x + len as i32 - 1;
    }

    fn finalize(&mut self, y: i32) {
        self.y_val = y;
    }

    fn num_spans(&self) -> u32 {
        self.spans.len() as u32
    }

    fn y(&self) -> i32 {
        self.y_val
    }
}

impl Default for ScanlineBin {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let sl = ScanlineBin::new();
        assert_eq!(sl.num_spans(), 0);
    }

    #[test]
    fn test_add_span_and_finalize() {
        let mut sl = ScanlineBin::new();
        sl.reset_spans();
        sl.add_span(10, 5);
        sl.finalize(7);
        assert_eq!(sl.y(), 7);
        assert_eq!(sl.spans(), &[BinSpan { x: 10, len: 5 }]);
        assert_eq!(sl.spans()[0].x_end(), 14);
    }

    #[test]
    fn test_adjacent_spans_merge() {
        let mut sl = ScanlineBin::new();
        sl.reset_spans();
        sl.add_span(10, 5);
        sl.add_span(15, 3);
        sl.add_span(20, 2);
        assert_eq!(sl.num_spans(), 2);
        assert_eq!(sl.spans()[0], BinSpan { x: 10, len: 8 });
        assert_eq!(sl.spans()[1], BinSpan { x: 20, len: 2 });
    }

    #[test]
    fn test_reset_clears() {
        let mut sl = ScanlineBin::new();
        sl.add_span(0, 4);
        sl.add_span(9, 0);
        assert_eq!(sl.num_spans(), 1);
        sl.reset_spans();
        assert_eq!(sl.num_spans(), 0);
        sl.add_span(5, 1);
        assert_eq!(sl.spans()[0], BinSpan { x: 5, len: 1 });
    }
}
