//! Drawing state that can be saved and restored.

use crate::basics::FillRule;
use crate::color::Rgba8;
use crate::config::DEFAULT_MITER_LIMIT;
use crate::math_stroke::{LineCap, LineJoin};
use crate::trans_affine::TransAffine;

/// Paint and style attributes of a graphic context.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    /// Color used by `stroke`.
    pub stroke_color: Rgba8,
    /// Color used by `fill` and `clear`.
    pub fill_color: Rgba8,
    /// Line width in user units.
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    /// Dash pattern as given by the caller; empty means solid.
    pub line_dash: Vec<f64>,
    pub line_dash_offset: f64,
    pub fill_rule: FillRule,
    /// User space to device space.
    pub transform: TransAffine,
}

impl DrawingState {
    pub fn with_miter_limit(miter_limit: f64) -> Self {
        Self {
            miter_limit,
            ..Self::default()
        }
    }
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            stroke_color: Rgba8::BLACK,
            fill_color: Rgba8::WHITE,
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: DEFAULT_MITER_LIMIT,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            fill_rule: FillRule::default(),
            transform: TransAffine::new(),
        }
    }
}
