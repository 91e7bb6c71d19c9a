//! Vertex containers used between the flattener, dasher and stroker.
//!
//! [`Polyline`] is the flattened form of one subpath. [`VertexSequence`]
//! is the stroker's working copy of a polyline: coincident points are
//! dropped and every vertex carries the length of its outgoing edge.

use crate::basics::PointD;
use crate::math::{calc_distance, VERTEX_DIST_EPSILON};
use crate::trans_affine::TransAffine;

// ============================================================================
// Polyline
// ============================================================================

/// A flattened subpath: straight edges between consecutive points, plus the
/// closing edge back to the first point when `closed` is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<PointD>,
    pub closed: bool,
}

impl Polyline {
    pub fn new(closed: bool) -> Self {
        Self {
            points: Vec::new(),
            closed,
        }
    }

    pub fn from_points(points: Vec<PointD>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Append a point unless it coincides with the current last point.
    pub fn push(&mut self, p: PointD) {
        if let Some(last) = self.points.last() {
            if calc_distance(last.x, last.y, p.x, p.y) <= VERTEX_DIST_EPSILON {
                return;
            }
        }
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total arc length, including the closing edge of a closed polyline.
    pub fn length(&self) -> f64 {
        let mut total: f64 = self.points.windows(2).map(|w| w[0].distance(&w[1])).sum();
        if self.closed && self.points.len() > 2 {
            total += self.points[self.points.len() - 1].distance(&self.points[0]);
        }
        total
    }

    /// Apply `mtx` to every point in place.
    pub fn transform(&mut self, mtx: &TransAffine) {
        for p in &mut self.points {
            mtx.transform(&mut p.x, &mut p.y);
        }
    }

    /// Reverse the traversal direction.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }
}

// ============================================================================
// Vertex dist
// ============================================================================

/// A vertex with coordinates and the distance to the next vertex.
///
/// The `calc_dist` method computes the distance to another vertex
/// and returns `true` if the distance exceeds `VERTEX_DIST_EPSILON`
/// (i.e., the vertices are not coincident).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexDist {
    pub x: f64,
    pub y: f64,
    pub dist: f64,
}

impl VertexDist {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, dist: 0.0 }
    }

    /// Calculate distance to `val` and store it. Returns `true` if the
    /// points are not coincident (distance > VERTEX_DIST_EPSILON).
    /// If coincident, sets dist to `1.0 / VERTEX_DIST_EPSILON`.
    pub fn calc_dist(&mut self, val: &VertexDist) -> bool {
        self.dist = calc_distance(self.x, self.y, val.x, val.y);
        let ret = self.dist > VERTEX_DIST_EPSILON;
        if !ret {
            self.dist = 1.0 / VERTEX_DIST_EPSILON;
        }
        ret
    }

    pub fn point(&self) -> PointD {
        PointD::new(self.x, self.y)
    }
}

// ============================================================================
// Vertex sequence
// ============================================================================

/// A sequence of vertices that filters coincident points.
///
/// Points are collected with [`add`](Self::add); [`close`](Self::close)
/// then removes coincident neighbours (and a last point equal to the
/// first one for closed sequences) and fills in every `dist`.
#[derive(Debug, Clone, Default)]
pub struct VertexSequence {
    vertices: Vec<VertexDist>,
}

impl VertexSequence {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Add a vertex, replacing the previous one if the two coincide.
    pub fn add(&mut self, val: VertexDist) {
        if let Some(last) = self.vertices.last_mut() {
            if !last.calc_dist(&val) {
                *last = val;
                return;
            }
        }
        self.vertices.push(val);
    }

    /// Finish the sequence and compute every outgoing edge length.
    pub fn close(&mut self, closed: bool) {
        if closed {
            while self.vertices.len() > 1 {
                let first = self.vertices[0];
                let n = self.vertices.len();
                if self.vertices[n - 1].calc_dist(&first) {
                    break;
                }
                self.vertices.pop();
            }
        }
        let n = self.vertices.len();
        for i in 0..n {
            if i + 1 < n {
                let next = self.vertices[i + 1];
                self.vertices[i].calc_dist(&next);
            } else if closed && n > 1 {
                let first = self.vertices[0];
                self.vertices[i].calc_dist(&first);
            } else {
                self.vertices[i].dist = 0.0;
            }
        }
    }

    pub fn remove_all(&mut self) {
        self.vertices.clear();
    }

    /// Vertex before `idx`, wrapping around.
    pub fn prev(&self, idx: usize) -> &VertexDist {
        let n = self.vertices.len();
        &self.vertices[(idx + n - 1) % n]
    }

    /// Vertex at `idx`, wrapping around.
    pub fn curr(&self, idx: usize) -> &VertexDist {
        &self.vertices[idx % self.vertices.len()]
    }

    /// Vertex after `idx`, wrapping around.
    pub fn next(&self, idx: usize) -> &VertexDist {
        &self.vertices[(idx + 1) % self.vertices.len()]
    }

    pub fn as_slice(&self) -> &[VertexDist] {
        &self.vertices
    }
}

impl core::ops::Index<usize> for VertexSequence {
    type Output = VertexDist;

    fn index(&self, i: usize) -> &VertexDist {
        &self.vertices[i]
    }
}

// ============================================================================
// Tests
// ============================================================================
