//! Stroke math: cap, join, and miter calculations for stroked paths.
//!
//! Geometry for converting a centre line into a stroked polygon with
//! configurable line caps, line joins and miter limit.

use core::str::FromStr;

use crate::array::VertexDist;
use crate::basics::{PointD, PI};
use crate::error::Draw2dError;
use crate::math::{calc_distance, calc_intersection, cross_product};

/// Most interior vertices a round cap or join is split into.
pub const MAX_ARC_STEPS: usize = 4096;

// ============================================================================
// Enums
// ============================================================================

/// Line cap style for the ends of open subpaths.
///
/// The integer codes follow draw2d: `0` round, `1` butt, `2` square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat end exactly at the end point.
    #[default]
    Butt,
    /// Flat end extended by half the line width.
    Square,
    /// Semicircle of radius half the line width.
    Round,
}

/// Line join style at path corners.
///
/// The integer codes follow draw2d: `0` bevel, `1` round, `2` miter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Sharp corner; falls back to bevel beyond the miter limit.
    #[default]
    Miter,
    /// Circular arc around the vertex.
    Round,
    /// Straight cut between the two offset end points.
    Bevel,
}

impl FromStr for LineCap {
    type Err = Draw2dError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "butt" => Ok(LineCap::Butt),
            "square" => Ok(LineCap::Square),
            "round" => Ok(LineCap::Round),
            _ => Err(Draw2dError::InvalidLineCap(s.to_string())),
        }
    }
}

impl TryFrom<u8> for LineCap {
    type Error = Draw2dError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LineCap::Round),
            1 => Ok(LineCap::Butt),
            2 => Ok(LineCap::Square),
            _ => Err(Draw2dError::InvalidLineCap(code.to_string())),
        }
    }
}

impl FromStr for LineJoin {
    type Err = Draw2dError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "miter" => Ok(LineJoin::Miter),
            "round" => Ok(LineJoin::Round),
            "bevel" => Ok(LineJoin::Bevel),
            _ => Err(Draw2dError::InvalidLineJoin(s.to_string())),
        }
    }
}

impl TryFrom<u8> for LineJoin {
    type Error = Draw2dError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LineJoin::Bevel),
            1 => Ok(LineJoin::Round),
            2 => Ok(LineJoin::Miter),
            _ => Err(Draw2dError::InvalidLineJoin(code.to_string())),
        }
    }
}

// ============================================================================
// MathStroke
// ============================================================================

/// Stroke geometry calculator.
///
/// Computes cap and join vertices for stroked paths. Output vertices are
/// pushed into a `Vec<PointD>` consumer. The width is kept halved.
#[derive(Debug, Clone)]
pub struct MathStroke {
    width: f64,
    width_eps: f64,
    miter_limit: f64,
    inner_miter_limit: f64,
    approx_scale: f64,
    line_cap: LineCap,
    line_join: LineJoin,
}

impl MathStroke {
    pub fn new() -> Self {
        Self {
            width: 0.5,
            width_eps: 0.5 / 1024.0,
            miter_limit: 4.0,
            inner_miter_limit: 1.01,
            approx_scale: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }

    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.line_cap = lc;
    }
    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn set_line_join(&mut self, lj: LineJoin) {
        self.line_join = lj;
    }
    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }

    /// Full line width; negative values are taken by magnitude.
    pub fn set_width(&mut self, w: f64) {
        self.width = w.abs() * 0.5;
        self.width_eps = self.width / 1024.0;
    }

    pub fn width(&self) -> f64 {
        self.width * 2.0
    }

    /// Maximum ratio of miter length to half the line width.
    pub fn set_miter_limit(&mut self, ml: f64) {
        self.miter_limit = ml;
    }
    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    /// Scale from stroke coordinates to device pixels; controls how finely
    /// round caps and joins are subdivided.
    pub fn set_approximation_scale(&mut self, s: f64) {
        self.approx_scale = s;
    }
    pub fn approximation_scale(&self) -> f64 {
        self.approx_scale
    }

    /// Angular step that keeps a round arc within 1/8 device pixel.
    fn arc_step(&self) -> f64 {
        (self.width / (self.width + 0.125 / self.approx_scale)).acos() * 2.0
    }

    /// Number of interior vertices for a round arc spanning `angle`, and
    /// the step between them. At most [`MAX_ARC_STEPS`] vertices are used.
    fn arc_division(&self, angle: f64) -> (usize, f64) {
        let step = self.arc_step();
        let n = if step > 0.0 {
            (angle / step).clamp(0.0, MAX_ARC_STEPS as f64) as usize
        } else {
            MAX_ARC_STEPS
        };
        (n, angle / (n + 1) as f64)
    }

    /// Calculate cap vertices at a line endpoint.
    ///
    /// Output is pushed to `vc`. `v0` is the endpoint, `v1` is the adjacent
    /// vertex, `len` is the distance between them.
    pub fn calc_cap(&self, vc: &mut Vec<PointD>, v0: &VertexDist, v1: &VertexDist, len: f64) {
        vc.clear();

        let dx1 = (v1.y - v0.y) / len * self.width;
        let dy1 = (v1.x - v0.x) / len * self.width;

        match self.line_cap {
            LineCap::Butt | LineCap::Square => {
                let (dx2, dy2) = if self.line_cap == LineCap::Square {
                    (dy1, dx1)
                } else {
                    (0.0, 0.0)
                };
                vc.push(PointD::new(v0.x - dx1 - dx2, v0.y + dy1 - dy2));
                vc.push(PointD::new(v0.x + dx1 - dx2, v0.y - dy1 - dy2));
            }
            LineCap::Round => {
                let (n, da) = self.arc_division(PI);

                vc.push(PointD::new(v0.x - dx1, v0.y + dy1));
                let mut a1 = dy1.atan2(-dx1) + da;
                for _ in 0..n {
                    vc.push(PointD::new(
                        v0.x + a1.cos() * self.width,
                        v0.y + a1.sin() * self.width,
                    ));
                    a1 += da;
                }
                vc.push(PointD::new(v0.x + dx1, v0.y - dy1));
            }
        }
    }

    /// Calculate join vertices at the junction of two line segments.
    ///
    /// `v0`→`v1` is the first segment, `v1`→`v2` is the second.
    /// `len1` and `len2` are the segment lengths.
    #[allow(clippy::too_many_arguments)]
    pub fn calc_join(
        &self,
        vc: &mut Vec<PointD>,
        v0: &VertexDist,
        v1: &VertexDist,
        v2: &VertexDist,
        len1: f64,
        len2: f64,
    ) {
        let dx1 = self.width * (v1.y - v0.y) / len1;
        let dy1 = self.width * (v1.x - v0.x) / len1;
        let dx2 = self.width * (v2.y - v1.y) / len2;
        let dy2 = self.width * (v2.x - v1.x) / len2;

        vc.clear();

        let cp = cross_product(v0.x, v0.y, v1.x, v1.y, v2.x, v2.y);
        if cp > 0.0 {
            // Inner join: miter when the offset lines meet inside both
            // segments, otherwise route through the vertex itself.
            let limit = (len1.min(len2) / self.width).max(self.inner_miter_limit);
            let d = (dx1 - dx2) * (dx1 - dx2) + (dy1 - dy2) * (dy1 - dy2);
            if d < len1 * len1 && d < len2 * len2 {
                self.calc_miter(vc, v0, v1, v2, dx1, dy1, dx2, dy2, limit);
            } else {
                vc.push(PointD::new(v1.x + dx1, v1.y - dy1));
                vc.push(PointD::new(v1.x, v1.y));
                vc.push(PointD::new(v1.x + dx2, v1.y - dy2));
            }
            return;
        }

        // Outer join
        let dx = (dx1 + dx2) / 2.0;
        let dy = (dy1 + dy2) / 2.0;
        let dbevel = (dx * dx + dy * dy).sqrt();

        if (self.line_join == LineJoin::Round || self.line_join == LineJoin::Bevel)
            && self.approx_scale * (self.width - dbevel) < self.width_eps
        {
            // Nearly straight: a single point is enough
            match calc_intersection(
                v0.x + dx1,
                v0.y - dy1,
                v1.x + dx1,
                v1.y - dy1,
                v1.x + dx2,
                v1.y - dy2,
                v2.x + dx2,
                v2.y - dy2,
            ) {
                Some((ix, iy)) => vc.push(PointD::new(ix, iy)),
                None => vc.push(PointD::new(v1.x + dx1, v1.y - dy1)),
            }
            return;
        }

        match self.line_join {
            LineJoin::Miter => {
                self.calc_miter(vc, v0, v1, v2, dx1, dy1, dx2, dy2, self.miter_limit);
            }
            LineJoin::Round => {
                self.calc_arc(vc, v1.x, v1.y, dx1, -dy1, dx2, -dy2);
            }
            LineJoin::Bevel => {
                vc.push(PointD::new(v1.x + dx1, v1.y - dy1));
                vc.push(PointD::new(v1.x + dx2, v1.y - dy2));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn calc_arc(
        &self,
        vc: &mut Vec<PointD>,
        x: f64,
        y: f64,
        dx1: f64,
        dy1: f64,
        dx2: f64,
        dy2: f64,
    ) {
        let mut a1 = dy1.atan2(dx1);
        let mut a2 = dy2.atan2(dx2);
        vc.push(PointD::new(x + dx1, y + dy1));
        if a1 > a2 {
            a2 += 2.0 * PI;
        }
        let (n, da) = self.arc_division(a2 - a1);
        a1 += da;
        for _ in 0..n {
            vc.push(PointD::new(x + a1.cos() * self.width, y + a1.sin() * self.width));
            a1 += da;
        }
        vc.push(PointD::new(x + dx2, y + dy2));
    }

    /// Miter join, or a bevel when the miter would exceed `mlimit`.
    #[allow(clippy::too_many_arguments)]
    fn calc_miter(
        &self,
        vc: &mut Vec<PointD>,
        v0: &VertexDist,
        v1: &VertexDist,
        v2: &VertexDist,
        dx1: f64,
        dy1: f64,
        dx2: f64,
        dy2: f64,
        mlimit: f64,
    ) {
        let lim = self.width * mlimit;
        let mut miter_limit_exceeded = true;

        if let Some((xi, yi)) = calc_intersection(
            v0.x + dx1,
            v0.y - dy1,
            v1.x + dx1,
            v1.y - dy1,
            v1.x + dx2,
            v1.y - dy2,
            v2.x + dx2,
            v2.y - dy2,
        ) {
            let di = calc_distance(v1.x, v1.y, xi, yi);
            if di <= lim {
                vc.push(PointD::new(xi, yi));
                miter_limit_exceeded = false;
            }
        } else {
            // Parallel offsets: collinear continuation needs one point,
            // a full reversal falls through to the bevel.
            let x2 = v1.x + dx1;
            let y2 = v1.y - dy1;
            if (cross_product(v0.x, v0.y, v1.x, v1.y, x2, y2) < 0.0)
                == (cross_product(v1.x, v1.y, v2.x, v2.y, x2, y2) < 0.0)
            {
                vc.push(PointD::new(v1.x + dx1, v1.y - dy1));
                miter_limit_exceeded = false;
            }
        }

        if miter_limit_exceeded {
            vc.push(PointD::new(v1.x + dx1, v1.y - dy1));
            vc.push(PointD::new(v1.x + dx2, v1.y - dy2));
        }
    }
}

impl Default for MathStroke {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
