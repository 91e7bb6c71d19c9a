//! Graphic context: the stateful drawing façade.
//!
//! A [`GraphicContext`] owns the current path, the style state (with a
//! save/restore stack) and a renderer over a borrowed pixel buffer. Path
//! commands only record geometry; `stroke`, `fill` and `fill_stroke` run
//! the pipeline:
//!
//! 1. flatten the context's path plus any extra paths, in user space, with
//!    the configured flatness divided by the transform's scale;
//! 2. for strokes, dash and expand the polylines into outline polygons;
//! 3. map the polygons to device space and scan-convert them with the
//!    aliased rasterizer, blending the paint color into the buffer.

use crate::array::Polyline;
use crate::basics::{FillRule, PointD};
use crate::color::Rgba8;
use crate::config::{validate_miter_limit, RenderConfig, ZeroWidthPolicy};
use crate::conv_curve::ConvCurve;
use crate::conv_stroke::ConvStroke;
use crate::drawing_state::DrawingState;
use crate::error::{Draw2dError, Draw2dResult};
use crate::math_stroke::{LineCap, LineJoin};
use crate::path_storage::Path;
use crate::pixfmt_rgba::PixelFormat;
use crate::rasterizer_scanline::RasterizerScanline;
use crate::renderer_base::RendererBase;
use crate::renderer_scanline::render_scanlines_bin_solid;
use crate::scanline_bin::ScanlineBin;
use crate::trans_affine::TransAffine;
use crate::vcgen_dash::VcgenDash;

// ============================================================================
// GraphicContext
// ============================================================================

/// Stateful 2D drawing context over an RGBA8 pixel format.
pub struct GraphicContext<PF: PixelFormat<ColorType = Rgba8>> {
    ren: RendererBase<PF>,
    ras: RasterizerScanline,
    sl: ScanlineBin,
    path: Path,
    state: DrawingState,
    state_stack: Vec<DrawingState>,
    config: RenderConfig,
}

impl<PF: PixelFormat<ColorType = Rgba8>> GraphicContext<PF> {
    /// Context with the default [`RenderConfig`].
    pub fn new(pixf: PF) -> Self {
        let config = RenderConfig::default();
        let state = DrawingState::with_miter_limit(config.miter_limit);
        let ren = RendererBase::new(pixf);
        let mut ras = RasterizerScanline::new();
        let cb = *ren.clip_box();
        ras.clip_box(cb.x1, cb.y1, cb.x2, cb.y2);
        Self {
            ren,
            ras,
            sl: ScanlineBin::new(),
            path: Path::new(),
            state,
            state_stack: Vec::new(),
            config,
        }
    }

    /// Context with a custom configuration, validated first.
    pub fn with_config(pixf: PF, config: RenderConfig) -> Draw2dResult<Self> {
        if let Err(err) = config.validate() {
            log::warn!(target: "draw2d", "rejecting render config: {}", err);
            return Err(err);
        }
        let mut gc = Self::new(pixf);
        gc.state.miter_limit = config.miter_limit;
        gc.config = config;
        Ok(gc)
    }

    pub fn width(&self) -> u32 {
        self.ren.width()
    }

    pub fn height(&self) -> u32 {
        self.ren.height()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The clipped renderer, for reading pixels back.
    pub fn renderer(&self) -> &RendererBase<PF> {
        &self.ren
    }

    /// Give the pixel format (and with it the buffer borrow) back.
    pub fn into_inner(self) -> PF {
        self.ren.into_inner()
    }

    // ========================================================================
    // Path commands
    // ========================================================================

    /// The context's own path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_point(&self) -> Option<PointD> {
        self.path.current_point()
    }

    /// Discard the current path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "draw2d", "begin_path");
        self.path.clear();
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        log::debug!(target: "draw2d", "move_to {} {}", x, y);
        self.path.move_to(x, y);
    }

    pub fn rmove_to(&mut self, dx: f64, dy: f64) {
        log::debug!(target: "draw2d", "rmove_to {} {}", dx, dy);
        self.path.rmove_to(dx, dy);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        log::debug!(target: "draw2d", "line_to {} {}", x, y);
        self.path.line_to(x, y);
    }

    pub fn rline_to(&mut self, dx: f64, dy: f64) {
        log::debug!(target: "draw2d", "rline_to {} {}", dx, dy);
        self.path.rline_to(dx, dy);
    }

    pub fn quad_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        log::debug!(target: "draw2d", "quad_curve_to {} {} {} {}", cx, cy, x, y);
        self.path.quad_curve_to(cx, cy, x, y);
    }

    pub fn cubic_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        log::debug!(
            target: "draw2d",
            "cubic_curve_to {} {} {} {} {} {}",
            c1x, c1y, c2x, c2y, x, y
        );
        self.path.cubic_curve_to(c1x, c1y, c2x, c2y, x, y);
    }

    pub fn rcubic_curve_to(&mut self, dc1x: f64, dc1y: f64, dc2x: f64, dc2y: f64, dx: f64, dy: f64) {
        log::debug!(
            target: "draw2d",
            "rcubic_curve_to {} {} {} {} {} {}",
            dc1x, dc1y, dc2x, dc2y, dx, dy
        );
        self.path.rcubic_curve_to(dc1x, dc1y, dc2x, dc2y, dx, dy);
    }

    /// Elliptical arc; see [`Path::arc_to`].
    ///
    /// The cubic pieces are sized for the current transform, so the arc
    /// stays within the configured flatness in device space.
    pub fn arc_to(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, sweep: f64) {
        log::debug!(
            target: "draw2d",
            "arc_to {} {} {} {} {} {}",
            cx, cy, rx, ry, start_angle, sweep
        );
        let tolerance = self.arc_tolerance();
        self.path
            .arc_to_within(cx, cy, rx, ry, start_angle, sweep, tolerance);
    }

    /// User-space arc tolerance: a sixteenth of the flatness, in device
    /// pixels.
    fn arc_tolerance(&self) -> f64 {
        let scale = self.state.transform.max_scale();
        let tolerance = self.config.flatness / 16.0;
        if scale.is_finite() && scale > 0.0 {
            tolerance / scale
        } else {
            tolerance
        }
    }

    pub fn close(&mut self) {
        log::debug!(target: "draw2d", "close");
        self.path.close();
    }

    /// Closed rectangle with corner `(x, y)`, width `w` and height `h`.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        log::debug!(target: "draw2d", "rect {} {} {} {}", x, y, w, h);
        self.path.rect(x, y, w, h);
    }

    // ========================================================================
    // State stack
    // ========================================================================

    /// Push a copy of the style state.
    pub fn save(&mut self) {
        log::debug!(target: "draw2d", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Pop the last saved style state; does nothing when none was saved.
    pub fn restore(&mut self) {
        log::debug!(target: "draw2d", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    // ========================================================================
    // Style
    // ========================================================================

    pub fn set_stroke_color(&mut self, c: Rgba8) {
        log::debug!(target: "draw2d", "set_stroke_color {:?}", c);
        self.state.stroke_color = c;
    }
    pub fn stroke_color(&self) -> Rgba8 {
        self.state.stroke_color
    }

    pub fn set_fill_color(&mut self, c: Rgba8) {
        log::debug!(target: "draw2d", "set_fill_color {:?}", c);
        self.state.fill_color = c;
    }
    pub fn fill_color(&self) -> Rgba8 {
        self.state.fill_color
    }

    /// Set the line width in user units.
    ///
    /// Negative widths are rejected. A non-finite width is accepted and
    /// disables stroking.
    pub fn set_line_width(&mut self, width: f64) -> Draw2dResult<()> {
        log::debug!(target: "draw2d", "set_line_width {}", width);
        if width < 0.0 {
            let err = Draw2dError::NegativeLineWidth(width);
            log::warn!(target: "draw2d", "{}", err);
            return Err(err);
        }
        self.state.line_width = width;
        Ok(())
    }
    pub fn line_width(&self) -> f64 {
        self.state.line_width
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        log::debug!(target: "draw2d", "set_line_cap {:?}", cap);
        self.state.line_cap = cap;
    }
    pub fn line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        log::debug!(target: "draw2d", "set_line_join {:?}", join);
        self.state.line_join = join;
    }
    pub fn line_join(&self) -> LineJoin {
        self.state.line_join
    }

    /// Set the miter limit; must be finite and at least 1.
    pub fn set_miter_limit(&mut self, limit: f64) -> Draw2dResult<()> {
        log::debug!(target: "draw2d", "set_miter_limit {}", limit);
        if let Err(err) = validate_miter_limit(limit) {
            log::warn!(target: "draw2d", "{}", err);
            return Err(err);
        }
        self.state.miter_limit = limit;
        Ok(())
    }
    pub fn miter_limit(&self) -> f64 {
        self.state.miter_limit
    }

    /// Set the dash pattern and its phase.
    ///
    /// Negative entries are rejected; empty, all-zero or non-finite patterns
    /// draw solid lines.
    pub fn set_line_dash(&mut self, dashes: &[f64], phase: f64) -> Draw2dResult<()> {
        log::debug!(target: "draw2d", "set_line_dash {:?} {}", dashes, phase);
        if let Err(err) = VcgenDash::new().set_pattern(dashes, phase) {
            log::warn!(target: "draw2d", "{}", err);
            return Err(err);
        }
        self.state.line_dash = dashes.to_vec();
        self.state.line_dash_offset = phase;
        Ok(())
    }
    pub fn line_dash(&self) -> (&[f64], f64) {
        (&self.state.line_dash, self.state.line_dash_offset)
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        log::debug!(target: "draw2d", "set_fill_rule {:?}", rule);
        self.state.fill_rule = rule;
    }
    pub fn fill_rule(&self) -> FillRule {
        self.state.fill_rule
    }

    // ========================================================================
    // Transform
    // ========================================================================

    pub fn matrix(&self) -> TransAffine {
        self.state.transform
    }

    /// Replace the user-to-device transform.
    pub fn set_matrix(&mut self, m: TransAffine) {
        log::debug!(target: "draw2d", "set_matrix {:?}", m);
        self.state.transform = m;
    }

    /// Compose `m` with the current transform; `m` applies first.
    pub fn compose_matrix(&mut self, m: &TransAffine) {
        log::debug!(target: "draw2d", "compose_matrix {:?}", m);
        self.state.transform.premultiply(m);
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        log::debug!(target: "draw2d", "translate {} {}", tx, ty);
        self.state.transform.premultiply(&TransAffine::new_translation(tx, ty));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        log::debug!(target: "draw2d", "scale {} {}", sx, sy);
        self.state.transform.premultiply(&TransAffine::new_scaling(sx, sy));
    }

    /// Rotate by `angle` radians; positive turns +x toward +y.
    pub fn rotate(&mut self, angle: f64) {
        log::debug!(target: "draw2d", "rotate {}", angle);
        self.state.transform.premultiply(&TransAffine::new_rotation(angle));
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Overwrite the whole buffer with the fill color.
    pub fn clear(&mut self) {
        log::debug!(target: "draw2d", "clear {:?}", self.state.fill_color);
        let c = self.state.fill_color;
        self.ren.clear(&c);
    }

    /// Stroke the current path and `extra` paths with the stroke color.
    pub fn stroke(&mut self, extra: &[&Path]) {
        log::debug!(target: "draw2d", "stroke ({} extra paths)", extra.len());
        if let Some(scale) = self.device_scale() {
            let polylines = self.flatten(extra, scale);
            self.stroke_polylines(&polylines, scale);
        }
        self.finish_render();
    }

    /// Fill the current path and `extra` paths with the fill color under
    /// the current fill rule.
    pub fn fill(&mut self, extra: &[&Path]) {
        log::debug!(target: "draw2d", "fill ({} extra paths)", extra.len());
        if let Some(scale) = self.device_scale() {
            let polylines = self.flatten(extra, scale);
            self.fill_polylines(&polylines);
        }
        self.finish_render();
    }

    /// Fill, then stroke, the same geometry.
    pub fn fill_stroke(&mut self, extra: &[&Path]) {
        log::debug!(target: "draw2d", "fill_stroke ({} extra paths)", extra.len());
        if let Some(scale) = self.device_scale() {
            let polylines = self.flatten(extra, scale);
            self.fill_polylines(&polylines);
            self.stroke_polylines(&polylines, scale);
        }
        self.finish_render();
    }

    /// Scale of the current transform, or `None` when nothing can be drawn.
    fn device_scale(&self) -> Option<f64> {
        let mtx = &self.state.transform;
        if !mtx.is_finite() || mtx.determinant() == 0.0 {
            log::trace!(target: "draw2d", "skipping render: degenerate transform {:?}", mtx);
            return None;
        }
        if !self.ren.clip_box().is_valid() {
            return None;
        }
        Some(mtx.max_scale())
    }

    fn flatten(&self, extra: &[&Path], scale: f64) -> Vec<Polyline> {
        let mut conv = ConvCurve::new(self.config.flatness / scale);
        let mut out = Vec::new();
        conv.flatten_into(&self.path, &mut out);
        for path in extra {
            conv.flatten_into(path, &mut out);
        }
        out
    }

    fn fill_polylines(&mut self, polylines: &[Polyline]) {
        let rule = self.state.fill_rule;
        let color = self.state.fill_color;
        self.rasterize(polylines, rule, color);
    }

    fn stroke_polylines(&mut self, polylines: &[Polyline], scale: f64) {
        let width = match self.effective_line_width(scale) {
            Some(w) => w,
            None => return,
        };
        let mut stroker = ConvStroke::new();
        stroker.set_width(width);
        stroker.set_line_cap(self.state.line_cap);
        stroker.set_line_join(self.state.line_join);
        stroker.set_miter_limit(self.state.miter_limit);
        stroker.set_approximation_scale(scale);
        if let Err(err) = stroker.set_dash(&self.state.line_dash, self.state.line_dash_offset) {
            log::warn!(target: "draw2d", "stroking solid: {}", err);
        }
        let outline = stroker.outline(polylines);
        let color = self.state.stroke_color;
        self.rasterize(&outline, FillRule::Winding, color);
    }

    /// Line width in user units after applying the zero-width policy.
    fn effective_line_width(&self, scale: f64) -> Option<f64> {
        let width = self.state.line_width;
        if !width.is_finite() {
            log::trace!(target: "draw2d", "skipping stroke: non-finite line width");
            return None;
        }
        if width > 0.0 {
            return Some(width);
        }
        match self.config.zero_width {
            ZeroWidthPolicy::Hairline => Some(1.0 / scale),
            ZeroWidthPolicy::Invisible => None,
        }
    }

    /// Map user-space polygons to device space and paint them.
    fn rasterize(&mut self, polygons: &[Polyline], rule: FillRule, color: Rgba8) {
        if color.is_transparent() {
            log::trace!(target: "draw2d", "skipping fully transparent paint");
            return;
        }
        self.ras.reset();
        self.ras.set_filling_rule(rule);
        let mtx = self.state.transform;
        for poly in polygons {
            let mut device = poly.clone();
            device.transform(&mtx);
            self.ras.add_polyline(&device);
        }
        let covered = render_scanlines_bin_solid(&mut self.ras, &mut self.sl, &mut self.ren, &color);
        log::debug!(
            target: "draw2d",
            "rasterized {} polygons, {} pixels",
            polygons.len(),
            covered
        );
    }

    fn finish_render(&mut self) {
        if self.config.clear_path_after_render {
            self.path.clear();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
