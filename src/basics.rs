//! Foundation types and constants.
//!
//! Points, integer rectangles, rounding helpers and the polygon fill rule.
//! Everything else in the crate depends on this module.

use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

use crate::error::Draw2dError;

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Floor a double to the nearest integer toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

/// Ceiling of a double as a signed integer.
#[inline]
pub fn iceil(v: f64) -> i32 {
    v.ceil() as i32
}

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point (or vector) in double precision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &PointD) -> f64 {
        (*other - *self).length()
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    #[inline]
    pub fn lerp(&self, other: &PointD, t: f64) -> PointD {
        PointD::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Midpoint of `self` and `other`.
    #[inline]
    pub fn mid(&self, other: &PointD) -> PointD {
        PointD::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl Add for PointD {
    type Output = PointD;
    fn add(self, rhs: PointD) -> PointD {
        PointD::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointD {
    type Output = PointD;
    fn sub(self, rhs: PointD) -> PointD {
        PointD::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for PointD {
    type Output = PointD;
    fn mul(self, rhs: f64) -> PointD {
        PointD::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for PointD {
    type Output = PointD;
    fn neg(self) -> PointD {
        PointD::new(-self.x, -self.y)
    }
}

// ============================================================================
// RectI
// ============================================================================

/// An integer rectangle defined by two inclusive corner points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Intersect with `r`. Returns `false` when the result is empty.
    pub fn clip(&mut self, r: &RectI) -> bool {
        self.x1 = self.x1.max(r.x1);
        self.y1 = self.y1.max(r.y1);
        self.x2 = self.x2.min(r.x2);
        self.y2 = self.y2.min(r.y2);
        self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    pub fn hit_test(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

// ============================================================================
// Fill rule
// ============================================================================

/// Rule deciding which regions of a self-overlapping polygon are inside.
///
/// The integer codes follow draw2d: `0` is even-odd, `1` is winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Inside when the signed crossing count is non-zero.
    #[default]
    Winding,
    /// Inside when the crossing count is odd.
    EvenOdd,
}

impl FillRule {
    /// Whether a running crossing count means "inside" under this rule.
    #[inline]
    pub fn is_inside(self, count: i32) -> bool {
        match self {
            FillRule::Winding => count != 0,
            FillRule::EvenOdd => count & 1 != 0,
        }
    }
}

impl FromStr for FillRule {
    type Err = Draw2dError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "winding" | "nonzero" => Ok(FillRule::Winding),
            "evenodd" | "even-odd" => Ok(FillRule::EvenOdd),
            _ => Err(Draw2dError::InvalidFillRule(s.to_string())),
        }
    }
}

impl TryFrom<u8> for FillRule {
    type Error = Draw2dError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FillRule::EvenOdd),
            1 => Ok(FillRule::Winding),
            _ => Err(Draw2dError::InvalidFillRule(code.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iround() {
        assert_eq!(iround(0.5), 1);
        assert_eq!(iround(0.49), 0);
        assert_eq!(iround(-0.5), -1);
        assert_eq!(iround(-0.49), 0);
        assert_eq!(iround(2.5), 3);
    }

    #[test]
    fn test_ifloor() {
        assert_eq!(ifloor(1.5), 1);
        assert_eq!(ifloor(-1.5), -2);
        assert_eq!(ifloor(-2.0), -2);
        assert_eq!(ifloor(0.0), 0);
    }

    #[test]
    fn test_iceil() {
        assert_eq!(iceil(1.2), 2);
        assert_eq!(iceil(-1.2), -1);
        assert_eq!(iceil(3.0), 3);
    }

    #[test]
    fn test_deg2rad_roundtrip() {
        assert!((deg2rad(180.0) - PI).abs() < 1e-12);
        assert!((rad2deg(PI / 2.0) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_ops() {
        let a = PointD::new(1.0, 2.0);
        let b = PointD::new(4.0, 6.0);
        assert_eq!(b - a, PointD::new(3.0, 4.0));
        assert_eq!(a + b, PointD::new(5.0, 8.0));
        assert_eq!(a * 2.0, PointD::new(2.0, 4.0));
        assert_eq!(-a, PointD::new(-1.0, -2.0));
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.mid(&b), PointD::new(2.5, 4.0));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(PointD::new(1.0, 2.0).is_finite());
        assert!(!PointD::new(f64::NAN, 2.0).is_finite());
        assert!(!PointD::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_rect_clip() {
        let mut r = RectI::new(-10, -10, 50, 50);
        assert!(r.clip(&RectI::new(0, 0, 20, 30)));
        assert_eq!(r, RectI::new(0, 0, 20, 30));

        let mut outside = RectI::new(100, 100, 120, 120);
        assert!(!outside.clip(&RectI::new(0, 0, 20, 20)));
    }

    #[test]
    fn test_rect_normalize_and_hit() {
        let mut r = RectI::new(10, 20, 0, 5);
        r.normalize();
        assert_eq!(r, RectI::new(0, 5, 10, 20));
        assert!(r.hit_test(0, 5));
        assert!(r.hit_test(10, 20));
        assert!(!r.hit_test(11, 20));
    }

    #[test]
    fn test_fill_rule_inside() {
        assert!(FillRule::Winding.is_inside(2));
        assert!(FillRule::Winding.is_inside(-1));
        assert!(!FillRule::Winding.is_inside(0));
        assert!(!FillRule::EvenOdd.is_inside(2));
        assert!(FillRule::EvenOdd.is_inside(-1));
        assert!(FillRule::EvenOdd.is_inside(3));
    }

    #[test]
    fn test_fill_rule_parse() {
        assert_eq!(FillRule::default(), FillRule::Winding);
        assert_eq!("EvenOdd".parse::<FillRule>().unwrap(), FillRule::EvenOdd);
        assert_eq!("nonzero".parse::<FillRule>().unwrap(), FillRule::Winding);
        assert!("spiral".parse::<FillRule>().is_err());
        assert_eq!(FillRule::try_from(0).unwrap(), FillRule::EvenOdd);
        assert_eq!(FillRule::try_from(1).unwrap(), FillRule::Winding);
        assert!(FillRule::try_from(7).is_err());
    }
}
