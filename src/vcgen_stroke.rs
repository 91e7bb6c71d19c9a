//! Stroke outline generator.
//!
//! Turns one flattened [`Polyline`] into the polygons covering the area a
//! pen of the configured width sweeps along it, using [`MathStroke`] for
//! the cap and join geometry. Open polylines become one polygon (cap,
//! forward rail, cap, backward rail); closed ones become two rails with
//! opposite orientation and no caps.

use crate::array::{Polyline, VertexDist, VertexSequence};
use crate::basics::PointD;
use crate::math::calc_polygon_area;
use crate::math_stroke::{LineCap, LineJoin, MathStroke};

// ============================================================================
// VcgenStroke
// ============================================================================

/// Stroke generator.
///
/// Holds the stroke parameters and reusable scratch buffers; call
/// [`generate`](Self::generate) once per polyline.
#[derive(Debug, Clone, Default)]
pub struct VcgenStroke {
    stroker: MathStroke,
    src_vertices: VertexSequence,
    join_vertices: Vec<PointD>,
}

impl VcgenStroke {
    pub fn new() -> Self {
        Self {
            stroker: MathStroke::new(),
            src_vertices: VertexSequence::new(),
            join_vertices: Vec::new(),
        }
    }

    // Parameter forwarding to MathStroke
    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.stroker.set_line_cap(lc);
    }
    pub fn line_cap(&self) -> LineCap {
        self.stroker.line_cap()
    }

    pub fn set_line_join(&mut self, lj: LineJoin) {
        self.stroker.set_line_join(lj);
    }
    pub fn line_join(&self) -> LineJoin {
        self.stroker.line_join()
    }

    pub fn set_width(&mut self, w: f64) {
        self.stroker.set_width(w);
    }
    pub fn width(&self) -> f64 {
        self.stroker.width()
    }

    pub fn set_miter_limit(&mut self, ml: f64) {
        self.stroker.set_miter_limit(ml);
    }
    pub fn miter_limit(&self) -> f64 {
        self.stroker.miter_limit()
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.stroker.set_approximation_scale(s);
    }
    pub fn approximation_scale(&self) -> f64 {
        self.stroker.approximation_scale()
    }

    /// Stroke `src`, appending closed outline polygons to `out`.
    ///
    /// The polygons of one call are oriented so the one with the largest
    /// area is positive; polylines with a single distinct point produce
    /// nothing.
    pub fn generate(&mut self, src: &Polyline, out: &mut Vec<Polyline>) {
        self.src_vertices.remove_all();
        for p in &src.points {
            self.src_vertices.add(VertexDist::new(p.x, p.y));
        }
        let closed = src.closed && self.src_vertices.size() >= 3;
        self.src_vertices.close(closed);

        let n = self.src_vertices.size();
        if n < 2 {
            log::trace!(target: "draw2d", "stroke: skipping degenerate polyline");
            return;
        }

        let first = out.len();
        if closed {
            let outer = self.closed_rail(true);
            let inner = self.closed_rail(false);
            out.push(outer);
            out.push(inner);
        } else {
            let outline = self.open_outline();
            out.push(outline);
        }
        normalize_orientation(&mut out[first..]);
    }

    /// Stroke every polyline of `src`.
    pub fn generate_all(&mut self, src: &[Polyline]) -> Vec<Polyline> {
        let mut out = Vec::new();
        for pl in src {
            self.generate(pl, &mut out);
        }
        out
    }

    fn append_joins(&self, poly: &mut Polyline) {
        for p in &self.join_vertices {
            poly.push(*p);
        }
    }

    fn open_outline(&mut self) -> Polyline {
        let v = self.src_vertices.as_slice().to_vec();
        let n = v.len();
        let mut poly = Polyline::new(true);

        self.stroker.calc_cap(&mut self.join_vertices, &v[0], &v[1], v[0].dist);
        self.append_joins(&mut poly);

        for i in 1..n - 1 {
            self.stroker.calc_join(
                &mut self.join_vertices,
                &v[i - 1],
                &v[i],
                &v[i + 1],
                v[i - 1].dist,
                v[i].dist,
            );
            self.append_joins(&mut poly);
        }

        self.stroker
            .calc_cap(&mut self.join_vertices, &v[n - 1], &v[n - 2], v[n - 2].dist);
        self.append_joins(&mut poly);

        for i in (1..n - 1).rev() {
            self.stroker.calc_join(
                &mut self.join_vertices,
                &v[i + 1],
                &v[i],
                &v[i - 1],
                v[i].dist,
                v[i - 1].dist,
            );
            self.append_joins(&mut poly);
        }
        poly
    }

    fn closed_rail(&mut self, forward: bool) -> Polyline {
        let n = self.src_vertices.size();
        let mut poly = Polyline::new(true);
        for k in 0..n {
            let i = if forward { k } else { n - 1 - k };
            let prev = *self.src_vertices.prev(i);
            let curr = *self.src_vertices.curr(i);
            let next = *self.src_vertices.next(i);
            if forward {
                self.stroker
                    .calc_join(&mut self.join_vertices, &prev, &curr, &next, prev.dist, curr.dist);
            } else {
                self.stroker
                    .calc_join(&mut self.join_vertices, &next, &curr, &prev, curr.dist, prev.dist);
            }
            self.append_joins(&mut poly);
        }
        poly
    }
}

/// Reverse every polygon of one stroke when its dominant polygon has
/// negative area.
fn normalize_orientation(polys: &mut [Polyline]) {
    let dominant = polys
        .iter()
        .map(|p| calc_polygon_area(&p.points))
        .max_by(|a, b| a.abs().total_cmp(&b.abs()));
    if let Some(area) = dominant {
        if area < 0.0 {
            for p in polys.iter_mut() {
                p.reverse();
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
