//! Cubic Bezier curve flattening.
//!
//! Subdivision flattener: a curve is split at t = 0.5 (de Casteljau) until
//! both control points lie within the tolerance of the chord segment.
//! Work is kept on an explicit stack with a hard depth limit and a point
//! budget, so even pathological control points terminate quickly.

use crate::basics::PointD;
use crate::math::calc_segment_point_distance;

/// Maximum subdivision depth.
pub const CURVE_RECURSION_LIMIT: u32 = 32;

/// Once a curve has produced this many points, remaining pieces are
/// emitted as straight chords.
pub const CURVE_POINT_LIMIT: usize = 1 << 16;

/// Default flattening tolerance, in device pixels.
pub const DEFAULT_FLATNESS: f64 = 0.25;

// ============================================================================
// Curve4Div
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Piece {
    p: [PointD; 4],
    level: u32,
}

/// Subdivision cubic Bezier curve flattener.
///
/// After [`init`](Self::init), [`points`](Self::points) holds the polyline
/// from the first to the last anchor point.
#[derive(Debug, Clone)]
pub struct Curve4Div {
    tolerance: f64,
    points: Vec<PointD>,
    stack: Vec<Piece>,
}

impl Curve4Div {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_FLATNESS)
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            points: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Maximum allowed distance between curve and polyline.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn points(&self) -> &[PointD] {
        &self.points
    }

    /// Flatten the curve `p1`→`p4` with control points `p2`, `p3`.
    pub fn init(&mut self, p1: PointD, p2: PointD, p3: PointD, p4: PointD) {
        self.points.clear();
        self.points.push(p1);
        self.stack.clear();
        self.stack.push(Piece {
            p: [p1, p2, p3, p4],
            level: 0,
        });

        while let Some(piece) = self.stack.pop() {
            let [a, b, c, d] = piece.p;
            if piece.level >= CURVE_RECURSION_LIMIT
                || self.points.len() >= CURVE_POINT_LIMIT
                || self.is_flat(&piece.p)
            {
                self.points.push(d);
                continue;
            }

            // de Casteljau split at t = 0.5
            let ab = a.mid(&b);
            let bc = b.mid(&c);
            let cd = c.mid(&d);
            let abc = ab.mid(&bc);
            let bcd = bc.mid(&cd);
            let m = abc.mid(&bcd);

            let level = piece.level + 1;
            // Right half first so the left half is emitted first
            self.stack.push(Piece {
                p: [m, bcd, cd, d],
                level,
            });
            self.stack.push(Piece {
                p: [a, ab, abc, m],
                level,
            });
        }
    }

    fn is_flat(&self, p: &[PointD; 4]) -> bool {
        let d1 = calc_segment_point_distance(&p[0], &p[3], &p[1]);
        let d2 = calc_segment_point_distance(&p[0], &p[3], &p[2]);
        d1.max(d2) <= self.tolerance
    }
}

impl Default for Curve4Div {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten one cubic curve into a fresh point list.
pub fn flatten_cubic(p1: PointD, p2: PointD, p3: PointD, p4: PointD, tolerance: f64) -> Vec<PointD> {
    let mut curve = Curve4Div::with_tolerance(tolerance);
    curve.init(p1, p2, p3, p4);
    curve.points
}

// ============================================================================
// Tests
// ============================================================================
