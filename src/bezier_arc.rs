//! Bezier arc generator.
//!
//! Converts elliptical arcs into sequences of cubic Bezier curves. Each
//! curve spans at most 90 degrees, and fewer when the radius is large
//! enough that a quarter-turn cubic would stray past the arc tolerance.
//! Sweeps beyond a full turn produce repeated revolutions so that filled
//! circles accumulate winding.

use crate::basics::{PointD, PI};
use crate::curves::DEFAULT_FLATNESS;

/// Upper bound on the number of full turns a single arc may cover.
pub const MAX_ARC_REVOLUTIONS: f64 = 128.0;

/// Default maximum distance between an arc and its cubic pieces.
///
/// A sixteenth of the flattening tolerance, so the flattened polyline of
/// an arc stays within the flattening tolerance of the true ellipse.
pub const DEFAULT_ARC_TOLERANCE: f64 = DEFAULT_FLATNESS / 16.0;

/// Radial error of one quarter-turn cubic on the unit circle.
const QUARTER_ARC_ERROR: f64 = 2.73e-4;

/// Most pieces a quarter turn is ever split into.
pub const MAX_QUARTER_SPLITS: f64 = 64.0;

/// Number of pieces per quarter turn that keeps the cubic error of an arc
/// with radius `r` under `tolerance`.
///
/// The error of one piece shrinks with the sixth power of its angle.
fn quarter_splits(r: f64, tolerance: f64) -> f64 {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return 1.0;
    }
    let ratio = QUARTER_ARC_ERROR * r / tolerance;
    if ratio <= 1.0 {
        return 1.0;
    }
    ratio.powf(1.0 / 6.0).ceil().min(MAX_QUARTER_SPLITS)
}

/// Convert an arc piece of at most 90 degrees to one cubic Bezier curve.
///
/// Returns `[start, ctrl1, ctrl2, end]`. A point at angle `a` lies at
/// `(cx + rx*cos(a), cy + ry*sin(a))`; the control handles are scaled by
/// `k = 4/3 * tan(sweep/4)`, which carries the sweep's sign.
pub fn arc_to_bezier(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    start_angle: f64,
    sweep_angle: f64,
) -> [PointD; 4] {
    let end_angle = start_angle + sweep_angle;
    let k = 4.0 / 3.0 * (sweep_angle / 4.0).tan();

    let (s0, c0) = start_angle.sin_cos();
    let (s1, c1) = end_angle.sin_cos();

    let p0 = PointD::new(cx + rx * c0, cy + ry * s0);
    let p3 = PointD::new(cx + rx * c1, cy + ry * s1);
    // Tangent of the parametric ellipse is (-rx*sin, ry*cos)
    let p1 = PointD::new(p0.x - k * rx * s0, p0.y + k * ry * c0);
    let p2 = PointD::new(p3.x + k * rx * s1, p3.y - k * ry * c1);
    [p0, p1, p2, p3]
}

/// An elliptical arc expressed as consecutive cubic Bezier curves.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierArc {
    start: PointD,
    curves: Vec<[PointD; 3]>,
}

impl BezierArc {
    /// Build the curves for an arc centred on `(cx, cy)` within
    /// [`DEFAULT_ARC_TOLERANCE`].
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Self::with_tolerance(cx, cy, rx, ry, start_angle, sweep_angle, DEFAULT_ARC_TOLERANCE)
    }

    /// Build the curves for an arc, keeping every cubic piece within
    /// `tolerance` of the ellipse.
    ///
    /// `|sweep_angle|` is clamped to [`MAX_ARC_REVOLUTIONS`] full turns.
    /// A zero sweep yields no curves.
    pub fn with_tolerance(
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        start_angle: f64,
        sweep_angle: f64,
        tolerance: f64,
    ) -> Self {
        let limit = MAX_ARC_REVOLUTIONS * 2.0 * PI;
        let sweep = sweep_angle.clamp(-limit, limit);

        let (s0, c0) = start_angle.sin_cos();
        let start = PointD::new(cx + rx * c0, cy + ry * s0);

        let mut curves = Vec::new();
        if sweep != 0.0 {
            let splits = quarter_splits(rx.abs().max(ry.abs()), tolerance);
            let max_piece = PI * 0.5 / splits;
            // Tolerate rounding so that exactly 90/180/... degrees stay whole pieces
            let pieces = ((sweep.abs() / max_piece) - 1e-9).ceil().max(1.0) as usize;
            let piece = sweep / pieces as f64;
            curves.reserve(pieces);
            for i in 0..pieces {
                let a = start_angle + piece * i as f64;
                let [_, c1, c2, p] = arc_to_bezier(cx, cy, rx, ry, a, piece);
                curves.push([c1, c2, p]);
            }
        }
        Self { start, curves }
    }

    pub fn start_point(&self) -> PointD {
        self.start
    }

    pub fn end_point(&self) -> PointD {
        self.curves.last().map_or(self.start, |c| c[2])
    }

    /// Curves as `[ctrl1, ctrl2, end]`; each starts where the previous ends.
    pub fn curves(&self) -> &[[PointD; 3]] {
        &self.curves
    }

    pub fn num_curves(&self) -> usize {
        self.curves.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
