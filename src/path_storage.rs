//! Path storage: subpaths built from move/line/curve/arc/close commands.
//!
//! A [`Path`] is a plain value: it can be built standalone and handed to
//! the graphic context's render calls next to the context's own path.
//! Coordinates are stored untransformed (user space).
//!
//! Degenerate commands (non-finite coordinates, zero-length lines,
//! collapsed curves, zero-radius or zero-sweep arcs) leave the path
//! untouched.

use crate::basics::PointD;
use crate::bezier_arc::{BezierArc, DEFAULT_ARC_TOLERANCE};
use crate::math::VERTEX_DIST_EPSILON;
use crate::trans_affine::TransAffine;

// ============================================================================
// Segment
// ============================================================================

/// One drawing step of a subpath, starting at the previous segment's end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(PointD),
    CubicCurve(PointD, PointD, PointD),
}

impl Segment {
    /// End point of the segment.
    pub fn end(&self) -> PointD {
        match *self {
            Segment::Line(p) => p,
            Segment::CubicCurve(_, _, p) => p,
        }
    }

    fn transformed(&self, mtx: &TransAffine) -> Segment {
        let tp = |p: PointD| {
            let (mut x, mut y) = (p.x, p.y);
            mtx.transform(&mut x, &mut y);
            PointD::new(x, y)
        };
        match *self {
            Segment::Line(p) => Segment::Line(tp(p)),
            Segment::CubicCurve(c1, c2, p) => Segment::CubicCurve(tp(c1), tp(c2), tp(p)),
        }
    }
}

// ============================================================================
// SubPath
// ============================================================================

/// A contiguous move-then-draw sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    start: PointD,
    segments: Vec<Segment>,
    closed: bool,
}

impl SubPath {
    fn new(start: PointD) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    pub fn start(&self) -> PointD {
        self.start
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Point reached after the last segment (the start when there is none).
    pub fn end(&self) -> PointD {
        self.segments.last().map_or(self.start, Segment::end)
    }
}

// ============================================================================
// Path
// ============================================================================

/// Ordered collection of subpaths. Only the last subpath receives appends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

#[inline]
fn coincident(a: &PointD, b: &PointD) -> bool {
    a.distance(b) <= VERTEX_DIST_EPSILON
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self {
            subpaths: Vec::new(),
        }
    }

    /// Remove all subpaths.
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    /// `true` when no subpath holds a drawing segment.
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.segments.is_empty())
    }

    /// The point the next relative command starts from, if any.
    ///
    /// After `close` this is the start of the closed subpath.
    pub fn current_point(&self) -> Option<PointD> {
        self.subpaths.last().map(|s| {
            if s.closed {
                s.start
            } else {
                s.end()
            }
        })
    }

    // ---------------------------------------------------------------
    // Path construction
    // ---------------------------------------------------------------

    /// Begin a new subpath at `(x, y)`. Consecutive moves collapse into one.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let p = PointD::new(x, y);
        if !p.is_finite() {
            log::trace!(target: "draw2d", "move_to: ignoring non-finite point {} {}", x, y);
            return;
        }
        match self.subpaths.last_mut() {
            Some(last) if last.segments.is_empty() && !last.closed => last.start = p,
            _ => self.subpaths.push(SubPath::new(p)),
        }
    }

    /// Move relative to the current point (the origin when there is none).
    pub fn rmove_to(&mut self, dx: f64, dy: f64) {
        let base = self.current_point().unwrap_or_default();
        self.move_to(base.x + dx, base.y + dy);
    }

    /// The subpath that receives the next segment. After `close`, a new
    /// subpath is opened at the closed subpath's start.
    fn open_subpath(&mut self) -> Option<&mut SubPath> {
        let restart = match self.subpaths.last() {
            None => return None,
            Some(last) if last.closed => Some(last.start),
            Some(_) => None,
        };
        if let Some(start) = restart {
            self.subpaths.push(SubPath::new(start));
        }
        self.subpaths.last_mut()
    }

    /// Append a straight line. Without a current point this acts as `move_to`.
    pub fn line_to(&mut self, x: f64, y: f64) {
        let p = PointD::new(x, y);
        if !p.is_finite() {
            log::trace!(target: "draw2d", "line_to: ignoring non-finite point {} {}", x, y);
            return;
        }
        let Some(current) = self.current_point() else {
            self.move_to(x, y);
            return;
        };
        if coincident(&current, &p) {
            log::trace!(target: "draw2d", "line_to: ignoring zero-length segment at {} {}", x, y);
            return;
        }
        if let Some(sub) = self.open_subpath() {
            sub.segments.push(Segment::Line(p));
        }
    }

    /// Line relative to the current point (the origin when there is none).
    pub fn rline_to(&mut self, dx: f64, dy: f64) {
        let base = self.current_point().unwrap_or_default();
        self.line_to(base.x + dx, base.y + dy);
    }

    /// Append a cubic Bezier curve. Without a current point the subpath
    /// starts at the first control point.
    pub fn cubic_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        let c1 = PointD::new(c1x, c1y);
        let c2 = PointD::new(c2x, c2y);
        let p = PointD::new(x, y);
        if !(c1.is_finite() && c2.is_finite() && p.is_finite()) {
            log::trace!(target: "draw2d", "cubic_curve_to: ignoring non-finite arguments");
            return;
        }
        let current = match self.current_point() {
            Some(current) => current,
            None => {
                self.move_to(c1x, c1y);
                c1
            }
        };
        if coincident(&current, &c1) && coincident(&current, &c2) && coincident(&current, &p) {
            log::trace!(target: "draw2d", "cubic_curve_to: ignoring collapsed curve at {} {}", x, y);
            return;
        }
        if let Some(sub) = self.open_subpath() {
            sub.segments.push(Segment::CubicCurve(c1, c2, p));
        }
    }

    /// Cubic curve relative to the current point.
    pub fn rcubic_curve_to(&mut self, dc1x: f64, dc1y: f64, dc2x: f64, dc2y: f64, dx: f64, dy: f64) {
        let b = self.current_point().unwrap_or_default();
        self.cubic_curve_to(b.x + dc1x, b.y + dc1y, b.x + dc2x, b.y + dc2y, b.x + dx, b.y + dy);
    }

    /// Append a quadratic Bezier curve, stored as the equivalent cubic.
    pub fn quad_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let c = PointD::new(cx, cy);
        let p = PointD::new(x, y);
        if !(c.is_finite() && p.is_finite()) {
            log::trace!(target: "draw2d", "quad_curve_to: ignoring non-finite arguments");
            return;
        }
        let p0 = self.current_point().unwrap_or(c);
        let c1 = p0.lerp(&c, 2.0 / 3.0);
        let c2 = p.lerp(&c, 2.0 / 3.0);
        if self.current_point().is_none() {
            self.move_to(cx, cy);
        }
        self.cubic_curve_to(c1.x, c1.y, c2.x, c2.y, x, y);
    }

    /// Append an elliptical arc centred on `(cx, cy)`.
    ///
    /// Angles are in radians; a positive sweep turns from +x toward +y.
    /// A connecting line is added when the current point is not the arc
    /// start; on an empty path the arc start begins the subpath.
    pub fn arc_to(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, sweep: f64) {
        self.arc_to_within(cx, cy, rx, ry, start_angle, sweep, DEFAULT_ARC_TOLERANCE);
    }

    /// [`arc_to`](Self::arc_to) with the cubic pieces kept within
    /// `tolerance` of the ellipse.
    #[allow(clippy::too_many_arguments)]
    pub fn arc_to_within(
        &mut self,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        start_angle: f64,
        sweep: f64,
        tolerance: f64,
    ) {
        let args = [cx, cy, rx, ry, start_angle, sweep];
        if args.iter().any(|v| !v.is_finite()) {
            log::trace!(target: "draw2d", "arc_to: ignoring non-finite arguments");
            return;
        }
        if rx == 0.0 || ry == 0.0 || sweep == 0.0 {
            log::trace!(target: "draw2d", "arc_to: ignoring degenerate arc");
            return;
        }
        let arc = BezierArc::with_tolerance(cx, cy, rx, ry, start_angle, sweep, tolerance);
        let start = arc.start_point();
        match self.current_point() {
            None => self.move_to(start.x, start.y),
            Some(_) => self.line_to(start.x, start.y),
        }
        if let Some(sub) = self.open_subpath() {
            sub.segments.extend(
                arc.curves()
                    .iter()
                    .map(|[c1, c2, p]| Segment::CubicCurve(*c1, *c2, *p)),
            );
        }
    }

    /// Close the active subpath; the current point returns to its start.
    pub fn close(&mut self) {
        if let Some(last) = self.subpaths.last_mut() {
            last.closed = true;
        }
    }

    /// Closed rectangle with corner `(x, y)`, width `w` and height `h`.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close();
    }

    /// Copy of the path with every point mapped through `mtx`.
    pub fn transform(&self, mtx: &TransAffine) -> Path {
        let subpaths = self
            .subpaths
            .iter()
            .map(|s| {
                let (mut x, mut y) = (s.start.x, s.start.y);
                mtx.transform(&mut x, &mut y);
                SubPath {
                    start: PointD::new(x, y),
                    segments: s.segments.iter().map(|seg| seg.transformed(mtx)).collect(),
                    closed: s.closed,
                }
            })
            .collect();
        Path { subpaths }
    }
}

// ============================================================================
// Tests
// ============================================================================
