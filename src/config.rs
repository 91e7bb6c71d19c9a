//! Rendering configuration.
//!
//! [`RenderConfig`] collects the knobs that are fixed for the lifetime of a
//! [`GraphicContext`](crate::graphic_context::GraphicContext): flattening
//! precision, the initial miter limit, the meaning of a zero line width and
//! whether the context's own path survives a render call.

use crate::curves::DEFAULT_FLATNESS;
use crate::error::{Draw2dError, Draw2dResult};

/// Default miter limit of a new context, as a ratio of miter length to
/// half the line width.
pub const DEFAULT_MITER_LIMIT: f64 = 4.0;

/// What a line width of exactly 0 draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroWidthPolicy {
    /// A line one device pixel wide, whatever the transform.
    #[default]
    Hairline,
    /// Nothing.
    Invisible,
}

/// Context-wide rendering settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Maximum distance, in device pixels, between a curve and its
    /// flattened polyline.
    pub flatness: f64,
    /// Miter limit a new context starts with.
    pub miter_limit: f64,
    pub zero_width: ZeroWidthPolicy,
    /// Clear the context's own path after `stroke`, `fill` and
    /// `fill_stroke`.
    pub clear_path_after_render: bool,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self {
            flatness: DEFAULT_FLATNESS,
            miter_limit: DEFAULT_MITER_LIMIT,
            zero_width: ZeroWidthPolicy::Hairline,
            clear_path_after_render: false,
        }
    }

    pub fn with_flatness(mut self, flatness: f64) -> Self {
        self.flatness = flatness;
        self
    }

    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit;
        self
    }

    pub fn with_zero_width(mut self, policy: ZeroWidthPolicy) -> Self {
        self.zero_width = policy;
        self
    }

    pub fn with_clear_path_after_render(mut self, clear: bool) -> Self {
        self.clear_path_after_render = clear;
        self
    }

    /// Check every field; the first offending one is reported.
    pub fn validate(&self) -> Draw2dResult<()> {
        if !(self.flatness.is_finite() && self.flatness > 0.0) {
            return Err(Draw2dError::InvalidTolerance(self.flatness));
        }
        validate_miter_limit(self.miter_limit)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A miter limit must be finite and at least 1.
pub(crate) fn validate_miter_limit(limit: f64) -> Draw2dResult<()> {
    if limit.is_finite() && limit >= 1.0 {
        Ok(())
    } else {
        Err(Draw2dError::InvalidMiterLimit(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RenderConfig::default();
        assert!((cfg.flatness - 0.25).abs() < 1e-12);
        assert!((cfg.miter_limit - 4.0).abs() < 1e-12);
        assert_eq!(cfg.zero_width, ZeroWidthPolicy::Hairline);
        assert!(!cfg.clear_path_after_render);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let cfg = RenderConfig::new()
            .with_flatness(0.1)
            .with_miter_limit(10.0)
            .with_zero_width(ZeroWidthPolicy::Invisible)
            .with_clear_path_after_render(true);
        assert!((cfg.flatness - 0.1).abs() < 1e-12);
        assert!((cfg.miter_limit - 10.0).abs() < 1e-12);
        assert_eq!(cfg.zero_width, ZeroWidthPolicy::Invisible);
        assert!(cfg.clear_path_after_render);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for f in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                RenderConfig::new().with_flatness(f).validate().is_err(),
                "flatness {}",
                f
            );
        }
        assert_eq!(
            RenderConfig::new().with_miter_limit(0.5).validate(),
            Err(Draw2dError::InvalidMiterLimit(0.5))
        );
        assert!(RenderConfig::new().with_miter_limit(1.0).validate().is_ok());
    }
}
