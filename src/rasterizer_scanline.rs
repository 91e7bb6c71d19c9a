//! Scanline polygon rasterizer.
//!
//! Aliased scan conversion of closed polygons. Edges are stored in
//! floating point, sorted by their top y, and swept with an active-edge
//! list. Every pixel row is sampled once at its vertical center; a pixel
//! is inside when its center lies in an inside interval of the signed
//! crossing count under the current [`FillRule`].
//!
//! Usage mirrors the classic rasterizer: add polygons with
//! [`move_to_d`](RasterizerScanline::move_to_d) /
//! [`line_to_d`](RasterizerScanline::line_to_d) or
//! [`add_polyline`](RasterizerScanline::add_polyline), then call
//! [`rewind_scanlines`](RasterizerScanline::rewind_scanlines) and
//! [`sweep_scanline`](RasterizerScanline::sweep_scanline) until it
//! returns `false`.

use crate::array::Polyline;
use crate::basics::{FillRule, PointD, RectI};

// ============================================================================
// Scanline trait
// ============================================================================

/// Trait for scanline containers that receive spans from the rasterizer.
pub trait Scanline {
    /// Prepare for a new scanline, clearing all span data.
    fn reset_spans(&mut self);

    /// Add a horizontal span of `len` pixels starting at `x`.
    /// Spans arrive left to right and never overlap.
    fn add_span(&mut self, x: i32, len: u32);

    /// Finalize the scanline at the given Y coordinate.
    fn finalize(&mut self, y: i32);

    /// Number of spans in this scanline (0 means empty).
    fn num_spans(&self) -> u32;

    /// The Y coordinate of this scanline.
    fn y(&self) -> i32;
}

// ============================================================================
// Edge
// ============================================================================

/// A non-horizontal polygon edge, stored top to bottom.
#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    y1: f64,
    dxdy: f64,
    /// +1 when the original edge pointed down, -1 when it pointed up.
    dir: i32,
}

impl Edge {
    fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Option<Self> {
        if y0 == y1 {
            return None;
        }
        let (dir, x0, y0, x1, y1) = if y0 < y1 {
            (1, x0, y0, x1, y1)
        } else {
            (-1, x1, y1, x0, y0)
        };
        Some(Self {
            x0,
            y0,
            y1,
            dxdy: (x1 - x0) / (y1 - y0),
            dir,
        })
    }

    /// Half-open vertical extent: the top is included, the bottom is not.
    #[inline]
    fn spans_y(&self, y: f64) -> bool {
        self.y0 <= y && y < self.y1
    }

    #[inline]
    fn x_at(&self, y: f64) -> f64 {
        self.x0 + (y - self.y0) * self.dxdy
    }
}

// ============================================================================
// RasterizerScanline
// ============================================================================

/// Clip box used when no clipping was requested. Wide enough for any
/// buffer while keeping span arithmetic inside `i32`.
const UNCLIPPED: RectI = RectI {
    x1: -(1 << 30),
    y1: -(1 << 30),
    x2: 1 << 30,
    y2: 1 << 30,
};

/// Polygon rasterizer producing binary coverage spans.
#[derive(Debug, Clone)]
pub struct RasterizerScanline {
    edges: Vec<Edge>,
    sorted: bool,
    filling_rule: FillRule,
    clip_box: RectI,
    min_y: f64,
    max_y: f64,
    start: Option<PointD>,
    last: PointD,
    // Sweep state
    scan_y: i32,
    scan_end_y: i32,
    next_edge: usize,
    active: Vec<usize>,
    crossings: Vec<(f64, i32)>,
}

impl RasterizerScanline {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            sorted: false,
            filling_rule: FillRule::Winding,
            clip_box: UNCLIPPED,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            start: None,
            last: PointD::new(0.0, 0.0),
            scan_y: 0,
            scan_end_y: -1,
            next_edge: 0,
            active: Vec::new(),
            crossings: Vec::new(),
        }
    }

    /// Drop all edges; keeps the fill rule and clip box.
    pub fn reset(&mut self) {
        self.edges.clear();
        self.sorted = false;
        self.min_y = f64::INFINITY;
        self.max_y = f64::NEG_INFINITY;
        self.start = None;
        self.active.clear();
        self.next_edge = 0;
        self.scan_end_y = -1;
        self.scan_y = 0;
    }

    pub fn set_filling_rule(&mut self, rule: FillRule) {
        self.filling_rule = rule;
    }
    pub fn filling_rule(&self) -> FillRule {
        self.filling_rule
    }

    /// Restrict output to the inclusive pixel rectangle.
    pub fn clip_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let mut cb = RectI::new(x1, y1, x2, y2);
        cb.normalize();
        self.clip_box = cb;
    }

    pub fn reset_clipping(&mut self) {
        self.clip_box = UNCLIPPED;
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    // ========================================================================
    // Polygon input
    // ========================================================================

    /// Close the current polygon back to its first vertex.
    pub fn close_polygon(&mut self) {
        if let Some(start) = self.start.take() {
            let last = self.last;
            self.edge_d(last.x, last.y, start.x, start.y);
        }
    }

    /// Start a new polygon, closing the previous one.
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        self.close_polygon();
        self.start = Some(PointD::new(x, y));
        self.last = PointD::new(x, y);
    }

    /// Add an edge from the last vertex. Without a preceding `move_to_d`
    /// this starts the polygon instead.
    pub fn line_to_d(&mut self, x: f64, y: f64) {
        if self.start.is_none() {
            self.move_to_d(x, y);
            return;
        }
        let last = self.last;
        self.edge_d(last.x, last.y, x, y);
        self.last = PointD::new(x, y);
    }

    /// Add a single edge. Horizontal and non-finite edges are dropped.
    pub fn edge_d(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
            log::trace!(target: "draw2d", "rasterizer: dropping non-finite edge");
            return;
        }
        if let Some(edge) = Edge::new(x1, y1, x2, y2) {
            self.min_y = self.min_y.min(edge.y0);
            self.max_y = self.max_y.max(edge.y1);
            self.edges.push(edge);
            self.sorted = false;
        }
    }

    /// Add a polyline as one polygon. Open polylines are closed implicitly.
    pub fn add_polyline(&mut self, pl: &Polyline) {
        if pl.points.len() < 2 {
            return;
        }
        let first = pl.points[0];
        self.move_to_d(first.x, first.y);
        for p in &pl.points[1..] {
            self.line_to_d(p.x, p.y);
        }
        self.close_polygon();
    }

    pub fn add_polylines(&mut self, pls: &[Polyline]) {
        for pl in pls {
            self.add_polyline(pl);
        }
    }

    // ========================================================================
    // Sweeping
    // ========================================================================

    /// Sort edges and prepare the sweep. Returns `false` when nothing
    /// can produce a span.
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        if self.edges.is_empty() || !self.clip_box.is_valid() {
            return false;
        }
        if !self.sorted {
            self.edges.sort_by(|a, b| a.y0.total_cmp(&b.y0));
            self.sorted = true;
        }
        // Rows whose center y + 0.5 lies in [min_y, max_y)
        let first = (self.min_y - 0.5).ceil().max(self.clip_box.y1 as f64);
        let last = ((self.max_y - 0.5).ceil() - 1.0).min(self.clip_box.y2 as f64);
        self.scan_y = first as i32;
        self.scan_end_y = last as i32;
        self.next_edge = 0;
        self.active.clear();
        self.scan_y <= self.scan_end_y
    }

    /// Produce the next non-empty scanline into `sl`.
    pub fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool {
        while self.scan_y <= self.scan_end_y {
            let y = self.scan_y;
            self.scan_y += 1;
            let sy = y as f64 + 0.5;

            while self.next_edge < self.edges.len() && self.edges[self.next_edge].y0 <= sy {
                self.active.push(self.next_edge);
                self.next_edge += 1;
            }
            let edges = &self.edges;
            self.active.retain(|&i| edges[i].y1 > sy);
            if self.active.is_empty() {
                continue;
            }

            self.crossings.clear();
            for &i in &self.active {
                let e = &self.edges[i];
                if e.spans_y(sy) {
                    self.crossings.push((e.x_at(sy), e.dir));
                }
            }
            self.crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            sl.reset_spans();
            emit_spans(&self.crossings, self.filling_rule, &self.clip_box, sl);
            if sl.num_spans() > 0 {
                sl.finalize(y);
                return true;
            }
        }
        false
    }

    /// Whether pixel (tx, ty) would be filled. Ignores the clip box.
    pub fn hit_test(&self, tx: i32, ty: i32) -> bool {
        let sy = ty as f64 + 0.5;
        let cx = tx as f64 + 0.5;
        let count: i32 = self
            .edges
            .iter()
            .filter(|e| e.spans_y(sy) && e.x_at(sy) <= cx)
            .map(|e| e.dir)
            .sum();
        let pending = self
            .start
            .map(|s| {
                Edge::new(self.last.x, self.last.y, s.x, s.y)
                    .filter(|e| e.spans_y(sy) && e.x_at(sy) <= cx)
                    .map_or(0, |e| e.dir)
            })
            .unwrap_or(0);
        self.filling_rule.is_inside(count + pending)
    }
}

/// Walk sorted crossings left to right and emit the inside intervals as
/// pixel spans, clipped horizontally.
fn emit_spans<SL: Scanline>(crossings: &[(f64, i32)], rule: FillRule, clip: &RectI, sl: &mut SL) {
    let mut count = 0;
    let mut span_start = 0.0;
    for &(x, dir) in crossings {
        let was_inside = rule.is_inside(count);
        count += dir;
        let is_inside = rule.is_inside(count);
        if !was_inside && is_inside {
            span_start = x;
        } else if was_inside && !is_inside {
            // Pixel px is covered when px + 0.5 lies in [span_start, x)
            let px1 = (span_start - 0.5).ceil().max(clip.x1 as f64);
            let px2 = ((x - 0.5).ceil() - 1.0).min(clip.x2 as f64);
            if px1 <= px2 {
                sl.add_span(px1 as i32, (px2 - px1) as u32 + 1);
            }
        }
    }
}

impl Default for RasterizerScanline {
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
    use crate::scanline_bin::{BinSpan, ScanlineBin};

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Polyline {
        Polyline::from_points(
            vec![
                PointD::new(x1, y1),
                PointD::new(x2, y1),
                PointD::new(x2, y2),
                PointD::new(x1, y2),
            ],
            true,
        )
    }

    fn collect(ras: &mut RasterizerScanline) -> Vec<(i32, Vec<BinSpan>)> {
        let mut sl = ScanlineBin::new();
        let mut rows = Vec::new();
        if ras.rewind_scanlines() {
            while ras.sweep_scanline(&mut sl) {
                rows.push((sl.y(), sl.spans().to_vec()));
            }
        }
        rows
    }

    #[test]
    fn test_new_defaults() {
        let ras = RasterizerScanline::new();
        assert!(ras.is_empty());
        assert_eq!(ras.filling_rule(), FillRule::Winding);
    }

    #[test]
    fn test_empty_rewind_false() {
        let mut ras = RasterizerScanline::new();
        assert!(!ras.rewind_scanlines());
    }

    #[test]
    fn test_integer_rect_covers_exact_pixels() {
        let mut ras = RasterizerScanline::new();
        ras.add_polyline(&rect(10.0, 10.0, 20.0, 15.0));
        let rows = collect(&mut ras);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].0, 10);
        assert_eq!(rows[4].0, 14);
        for (_, spans) in &rows {
            assert_eq!(spans, &vec![BinSpan { x: 10, len: 10 }]);
        }
    }

    #[test]
    fn test_pixel_center_rule() {
        let mut ras = RasterizerScanline::new();
        // Covers centers 10.5 only on x, and rows 3 only (3.5 in [3.4, 3.6))
        ras.add_polyline(&rect(10.4, 3.4, 10.6, 3.6));
        let rows = collect(&mut ras);
        assert_eq!(rows, vec![(3, vec![BinSpan { x: 10, len: 1 }])]);

        ras.reset();
        ras.add_polyline(&rect(10.6, 3.0, 11.4, 4.0));
        assert!(collect(&mut ras).is_empty());
    }

    #[test]
    fn test_shared_vertex_counts_once() {
        let mut ras = RasterizerScanline::new();
        // Diamond whose left and right vertices sit exactly on a row center
        ras.move_to_d(10.0, 0.5);
        ras.line_to_d(20.0, 10.5);
        ras.line_to_d(10.0, 20.5);
        ras.line_to_d(0.0, 10.5);
        let rows = collect(&mut ras);
        let middle = rows.iter().find(|(y, _)| *y == 10).unwrap();
        assert_eq!(middle.1, vec![BinSpan { x: 0, len: 20 }]);
    }

    #[test]
    fn test_fill_rules_on_nested_same_direction() {
        let mut ras = RasterizerScanline::new();
        ras.add_polyline(&rect(0.0, 0.0, 30.0, 30.0));
        ras.add_polyline(&rect(10.0, 10.0, 20.0, 20.0));
        assert!(ras.hit_test(15, 15));
        ras.set_filling_rule(FillRule::EvenOdd);
        assert!(!ras.hit_test(15, 15));
        assert!(ras.hit_test(5, 15));

        let rows = collect(&mut ras);
        let row = rows.iter().find(|(y, _)| *y == 15).unwrap();
        assert_eq!(
            row.1,
            vec![BinSpan { x: 0, len: 10 }, BinSpan { x: 20, len: 10 }]
        );
    }

    #[test]
    fn test_opposite_direction_hole_under_winding() {
        let mut ras = RasterizerScanline::new();
        ras.add_polyline(&rect(0.0, 0.0, 30.0, 30.0));
        let mut inner = rect(10.0, 10.0, 20.0, 20.0);
        inner.reverse();
        ras.add_polyline(&inner);
        assert!(!ras.hit_test(15, 15));
        assert!(ras.hit_test(25, 15));
    }

    #[test]
    fn test_clip_box() {
        let mut ras = RasterizerScanline::new();
        ras.clip_box(0, 0, 9, 9);
        ras.add_polyline(&rect(-5.0, -5.0, 5.0, 50.0));
        let rows = collect(&mut ras);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].1, vec![BinSpan { x: 0, len: 5 }]);

        ras.reset();
        ras.add_polyline(&rect(20.0, 20.0, 30.0, 30.0));
        assert!(!ras.rewind_scanlines() || collect(&mut ras).is_empty());
    }

    #[test]
    fn test_open_polyline_closed_implicitly() {
        let mut ras = RasterizerScanline::new();
        let pl = Polyline::from_points(
            vec![
                PointD::new(0.0, 0.0),
                PointD::new(10.0, 0.0),
                PointD::new(10.0, 10.0),
            ],
            false,
        );
        ras.add_polyline(&pl);
        assert_eq!(ras.num_edges(), 2);
        assert!(ras.hit_test(8, 2));
        assert!(!ras.hit_test(2, 8));
    }

    #[test]
    fn test_non_finite_edges_dropped() {
        let mut ras = RasterizerScanline::new();
        ras.edge_d(0.0, 0.0, f64::NAN, 10.0);
        ras.edge_d(0.0, 0.0, 10.0, f64::INFINITY);
        ras.edge_d(0.0, 5.0, 10.0, 5.0);
        assert!(ras.is_empty());
    }

    #[test]
    fn test_triangle_rows_monotonic() {
        let mut ras = RasterizerScanline::new();
        ras.move_to_d(0.0, 0.0);
        ras.line_to_d(40.0, 40.0);
        ras.line_to_d(0.0, 40.0);
        let rows = collect(&mut ras);
        // Row y covers centers left of x = y + 0.5, so row 0 is empty
        assert_eq!(rows.len(), 39);
        assert_eq!(rows[0], (1, vec![BinSpan { x: 0, len: 1 }]));
        for w in rows.windows(2) {
            assert!(w[1].1[0].len >= w[0].1[0].len);
        }
    }
}
