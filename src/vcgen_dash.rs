//! Dash generator.
//!
//! Splits flattened polylines into the "on" runs of a cyclic dash pattern.
//! Every run becomes an independent open polyline, so the stroker caps both
//! of its ends.

use crate::array::Polyline;
use crate::basics::PointD;
use crate::error::{Draw2dError, Draw2dResult};

/// Most pattern cycles dashed along one polyline. Longer polylines (or
/// finer patterns) are passed through solid.
pub const MAX_DASH_CYCLES: f64 = 65536.0;

// ============================================================================
// VcgenDash
// ============================================================================

/// Dash pattern state.
///
/// Even entries of the pattern are "on" lengths, odd entries are gaps.
/// A pattern of odd length is repeated once to make the cycle even.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VcgenDash {
    dashes: Vec<f64>,
    total_dash_len: f64,
    dash_start: f64,
}

/// Position inside the dash cycle.
#[derive(Debug, Clone, Copy)]
struct DashCursor {
    curr_dash: usize,
    curr_rest: f64,
}

impl VcgenDash {
    pub fn new() -> Self {
        Self {
            dashes: Vec::new(),
            total_dash_len: 0.0,
            dash_start: 0.0,
        }
    }

    /// Install a pattern and its phase.
    ///
    /// Negative entries are rejected. An empty, all-zero or non-finite
    /// pattern disables dashing.
    pub fn set_pattern(&mut self, dashes: &[f64], phase: f64) -> Draw2dResult<()> {
        if let Some((index, &value)) = dashes
            .iter()
            .enumerate()
            .find(|(_, v)| v.is_finite() && **v < 0.0)
        {
            return Err(Draw2dError::InvalidDashPattern { index, value });
        }
        self.remove_all_dashes();
        let total: f64 = dashes.iter().sum();
        if dashes.iter().any(|v| !v.is_finite()) || !(total > 0.0) || !total.is_finite() {
            return Ok(());
        }
        self.dashes.extend_from_slice(dashes);
        if dashes.len() % 2 == 1 {
            self.dashes.extend_from_slice(dashes);
        }
        self.total_dash_len = self.dashes.iter().sum();
        self.dash_start = if phase.is_finite() { phase } else { 0.0 };
        Ok(())
    }

    pub fn remove_all_dashes(&mut self) {
        self.dashes.clear();
        self.total_dash_len = 0.0;
        self.dash_start = 0.0;
    }

    pub fn is_enabled(&self) -> bool {
        self.total_dash_len > 0.0
    }

    /// The effective (even-length) pattern.
    pub fn dashes(&self) -> &[f64] {
        &self.dashes
    }

    pub fn total_dash_len(&self) -> f64 {
        self.total_dash_len
    }

    pub fn dash_start(&self) -> f64 {
        self.dash_start
    }

    /// Cursor for the start of every subpath: the phase is reduced modulo
    /// the cycle length, so negative phases wrap forward.
    fn calc_dash_start(&self) -> DashCursor {
        let mut ds = self.dash_start.rem_euclid(self.total_dash_len);
        let mut curr_dash = 0;
        loop {
            let len = self.dashes[curr_dash];
            if ds >= len && ds > 0.0 {
                ds -= len;
                curr_dash = (curr_dash + 1) % self.dashes.len();
            } else {
                return DashCursor {
                    curr_dash,
                    curr_rest: len - ds,
                };
            }
        }
    }

    /// Append the dashed pieces of `src` to `out`.
    ///
    /// With dashing disabled the polyline is copied through unchanged, and
    /// so is a polyline that would need more than [`MAX_DASH_CYCLES`]
    /// repetitions of the pattern.
    pub fn generate(&self, src: &Polyline, out: &mut Vec<Polyline>) {
        if !self.is_enabled() {
            out.push(src.clone());
            return;
        }
        if src.len() < 2 {
            return;
        }
        let cycles = src.length() / self.total_dash_len;
        if cycles.is_nan() || cycles > MAX_DASH_CYCLES {
            log::trace!(
                target: "draw2d",
                "dash pattern of length {} too fine for this polyline; drawing solid",
                self.total_dash_len
            );
            out.push(src.clone());
            return;
        }

        let mut cursor = self.calc_dash_start();
        let mut run: Option<Polyline> = None;
        if cursor.curr_dash % 2 == 0 {
            run = Some(Self::start_run(src.points[0]));
        }

        let n = src.len();
        let edges = if src.closed { n } else { n - 1 };
        for i in 0..edges {
            let v1 = src.points[i];
            let v2 = src.points[(i + 1) % n];
            let edge_len = v1.distance(&v2);
            let mut pos = 0.0;

            while edge_len - pos >= cursor.curr_rest {
                pos += cursor.curr_rest;
                let p = v1.lerp(&v2, pos / edge_len);
                if let Some(mut pl) = run.take() {
                    pl.push(p);
                    Self::finish_run(pl, out);
                }
                cursor.curr_dash = (cursor.curr_dash + 1) % self.dashes.len();
                cursor.curr_rest = self.dashes[cursor.curr_dash];
                if cursor.curr_dash % 2 == 0 {
                    run = Some(Self::start_run(p));
                }
            }
            cursor.curr_rest -= edge_len - pos;
            if let Some(pl) = run.as_mut() {
                pl.push(v2);
            }
        }
        if let Some(pl) = run {
            Self::finish_run(pl, out);
        }
    }

    /// Dash every polyline of `src`, restarting the pattern for each one.
    pub fn generate_all(&self, src: &[Polyline]) -> Vec<Polyline> {
        let mut out = Vec::new();
        for pl in src {
            self.generate(pl, &mut out);
        }
        out
    }

    fn start_run(p: PointD) -> Polyline {
        let mut pl = Polyline::new(false);
        pl.push(p);
        pl
    }

    fn finish_run(pl: Polyline, out: &mut Vec<Polyline>) {
        // Zero-length runs draw nothing
        if pl.len() >= 2 {
            out.push(pl);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
