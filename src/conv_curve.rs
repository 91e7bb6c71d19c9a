//! Curve flattening converter.
//!
//! Turns a [`Path`] into one [`Polyline`] per subpath by replacing every
//! cubic segment with the points produced by [`Curve4Div`].

use crate::array::Polyline;
use crate::curves::Curve4Div;
use crate::path_storage::{Path, Segment};

/// A closed polyline whose last point lies this close to its first point
/// drops the last point; the closing edge covers it.
const CLOSE_EPSILON: f64 = 1e-9;

// ============================================================================
// ConvCurve
// ============================================================================

/// Path flattener.
pub struct ConvCurve {
    curve4: Curve4Div,
}

impl ConvCurve {
    /// Flattener with the given tolerance, in path coordinates.
    pub fn new(tolerance: f64) -> Self {
        Self {
            curve4: Curve4Div::with_tolerance(tolerance),
        }
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.curve4.set_tolerance(tolerance);
    }

    pub fn tolerance(&self) -> f64 {
        self.curve4.tolerance()
    }

    /// Append the polylines of every subpath of `path` to `out`.
    ///
    /// Subpaths that flatten to fewer than two distinct points are dropped.
    pub fn flatten_into(&mut self, path: &Path, out: &mut Vec<Polyline>) {
        for sub in path.subpaths() {
            let mut pl = Polyline::new(sub.is_closed());
            pl.push(sub.start());
            let mut last = sub.start();
            for seg in sub.segments() {
                match *seg {
                    Segment::Line(p) => pl.push(p),
                    Segment::CubicCurve(c1, c2, p) => {
                        self.curve4.init(last, c1, c2, p);
                        for q in &self.curve4.points()[1..] {
                            pl.push(*q);
                        }
                    }
                }
                last = seg.end();
            }
            if pl.closed
                && pl.len() > 1
                && pl.points[0].distance(&pl.points[pl.len() - 1]) <= CLOSE_EPSILON
            {
                pl.points.pop();
            }
            if pl.len() >= 2 {
                out.push(pl);
            }
        }
    }

    pub fn flatten(&mut self, path: &Path) -> Vec<Polyline> {
        let mut out = Vec::new();
        self.flatten_into(path, &mut out);
        out
    }
}

/// One polyline per subpath of `path`, curves flattened within `tolerance`.
pub fn flatten_path(path: &Path, tolerance: f64) -> Vec<Polyline> {
    ConvCurve::new(tolerance).flatten(path)
}

/// Flatten several paths into one polyline list.
pub fn flatten_paths(paths: &[&Path], tolerance: f64) -> Vec<Polyline> {
    let mut conv = ConvCurve::new(tolerance);
    let mut out = Vec::new();
    for path in paths {
        conv.flatten_into(path, &mut out);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
