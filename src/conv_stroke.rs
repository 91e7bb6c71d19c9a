//! Stroke converter for flattened paths.
//!
//! Convenience wrapper that chains [`VcgenDash`] and [`VcgenStroke`]:
//! polylines are cut into dashes (when a pattern is set) and every
//! resulting polyline is expanded into its outline polygons.

use crate::array::Polyline;
use crate::error::Draw2dResult;
use crate::math_stroke::{LineCap, LineJoin};
use crate::vcgen_dash::VcgenDash;
use crate::vcgen_stroke::VcgenStroke;

// ============================================================================
// ConvStroke
// ============================================================================

/// Dash-then-stroke converter producing fillable outlines.
#[derive(Debug, Clone, Default)]
pub struct ConvStroke {
    dash: VcgenDash,
    stroke: VcgenStroke,
}

impl ConvStroke {
    pub fn new() -> Self {
        Self {
            dash: VcgenDash::new(),
            stroke: VcgenStroke::new(),
        }
    }

    // Parameter forwarding
    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.stroke.set_line_cap(lc);
    }
    pub fn line_cap(&self) -> LineCap {
        self.stroke.line_cap()
    }

    pub fn set_line_join(&mut self, lj: LineJoin) {
        self.stroke.set_line_join(lj);
    }
    pub fn line_join(&self) -> LineJoin {
        self.stroke.line_join()
    }

    pub fn set_width(&mut self, w: f64) {
        self.stroke.set_width(w);
    }
    pub fn width(&self) -> f64 {
        self.stroke.width()
    }

    pub fn set_miter_limit(&mut self, ml: f64) {
        self.stroke.set_miter_limit(ml);
    }
    pub fn miter_limit(&self) -> f64 {
        self.stroke.miter_limit()
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.stroke.set_approximation_scale(s);
    }
    pub fn approximation_scale(&self) -> f64 {
        self.stroke.approximation_scale()
    }

    /// Set the dash pattern; see [`VcgenDash::set_pattern`].
    pub fn set_dash(&mut self, dashes: &[f64], phase: f64) -> Draw2dResult<()> {
        self.dash.set_pattern(dashes, phase)
    }

    pub fn remove_dash(&mut self) {
        self.dash.remove_all_dashes();
    }

    pub fn is_dashed(&self) -> bool {
        self.dash.is_enabled()
    }

    /// Outline polygons for `polylines`, all meant to be filled under the
    /// winding rule.
    pub fn outline(&mut self, polylines: &[Polyline]) -> Vec<Polyline> {
        let mut out = Vec::new();
        if self.dash.is_enabled() {
            let mut pieces = Vec::new();
            for pl in polylines {
                self.dash.generate(pl, &mut pieces);
            }
            for pl in &pieces {
                self.stroke.generate(pl, &mut out);
            }
        } else {
            for pl in polylines {
                self.stroke.generate(pl, &mut out);
            }
        }
        out
    }
}

// ============================================================================
// Tests
// ============================================================================
