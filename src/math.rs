//! Geometric math utilities.
//!
//! Distances, intersections, cross products and polygon area.

use crate::basics::PointD;

// ============================================================================
// Constants
// ============================================================================

/// Coinciding points maximal distance (epsilon).
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

/// Epsilon for intersection calculations.
pub const INTERSECTION_EPSILON: f64 = 1.0e-30;

// ============================================================================
// Cross product
// ============================================================================

/// Cross product of vectors (x2-x1, y2-y1) and (x-x2, y-y2).
/// The sign indicates which side of the line (x1,y1)→(x2,y2) the point (x,y) is on.
#[inline]
pub fn cross_product(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    (x - x2) * (y2 - y1) - (y - y2) * (x2 - x1)
}

// ============================================================================
// Distance calculations
// ============================================================================

/// Euclidean distance between two points.
#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn calc_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

/// Distance from `p` to the closest point of segment `a`→`b`.
///
/// A degenerate segment degrades to the point distance from `a`.
pub fn calc_segment_point_distance(a: &PointD, b: &PointD, p: &PointD) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return calc_distance(a.x, a.y, p.x, p.y);
    }
    let u = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2;
    if u <= 0.0 {
        calc_distance(a.x, a.y, p.x, p.y)
    } else if u >= 1.0 {
        calc_distance(b.x, b.y, p.x, p.y)
    } else {
        calc_distance(a.x + u * dx, a.y + u * dy, p.x, p.y)
    }
}

// ============================================================================
// Intersection
// ============================================================================

/// Calculate the intersection point of the lines through
/// (ax,ay)→(bx,by) and (cx,cy)→(dx,dy).
/// Returns `Some((x, y))` if they intersect, `None` if parallel.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn calc_intersection(
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
    dx: f64,
    dy: f64,
) -> Option<(f64, f64)> {
    let num = (ay - cy) * (dx - cx) - (ax - cx) * (dy - cy);
    let den = (bx - ax) * (dy - cy) - (by - ay) * (dx - cx);
    if den.abs() < INTERSECTION_EPSILON {
        return None;
    }
    let r = num / den;
    Some((ax + r * (bx - ax), ay + r * (by - ay)))
}

// ============================================================================
// Polygon area
// ============================================================================

/// Signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise order in a y-up frame, which is clockwise
/// on a y-down raster.
pub fn calc_polygon_area(points: &[PointD]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut prev = points[points.len() - 1];
    for p in points {
        sum += prev.x * p.y - p.x * prev.y;
        prev = *p;
    }
    sum * 0.5
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_product_sides() {
        // Point to the right of a rightward line (y-down frame: below it)
        assert!(cross_product(0.0, 0.0, 10.0, 0.0, 5.0, 5.0) < 0.0);
        assert!(cross_product(0.0, 0.0, 10.0, 0.0, 5.0, -5.0) > 0.0);
        assert_eq!(cross_product(0.0, 0.0, 10.0, 0.0, 20.0, 0.0), 0.0);
    }

    #[test]
    fn test_distances() {
        assert!((calc_distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-12);
        assert!((calc_sq_distance(0.0, 0.0, 3.0, 4.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_point_distance() {
        let a = PointD::new(0.0, 0.0);
        let b = PointD::new(10.0, 0.0);
        // Perpendicular foot inside the segment
        let d = calc_segment_point_distance(&a, &b, &PointD::new(5.0, 3.0));
        assert!((d - 3.0).abs() < 1e-12);
        // Beyond the end: distance to the endpoint, not the infinite line
        let d = calc_segment_point_distance(&a, &b, &PointD::new(14.0, 3.0));
        assert!((d - 5.0).abs() < 1e-12);
        // Degenerate segment
        let d = calc_segment_point_distance(&a, &a, &PointD::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_intersection() {
        let (x, y) = calc_intersection(0.0, 0.0, 10.0, 10.0, 0.0, 10.0, 10.0, 0.0).unwrap();
        assert!((x - 5.0).abs() < 1e-12);
        assert!((y - 5.0).abs() < 1e-12);
        assert!(calc_intersection(0.0, 0.0, 10.0, 0.0, 0.0, 1.0, 10.0, 1.0).is_none());
    }

    #[test]
    fn test_polygon_area() {
        let square = [
            PointD::new(0.0, 0.0),
            PointD::new(10.0, 0.0),
            PointD::new(10.0, 10.0),
            PointD::new(0.0, 10.0),
        ];
        assert!((calc_polygon_area(&square) - 100.0).abs() < 1e-12);
        let reversed: Vec<PointD> = square.iter().rev().copied().collect();
        assert!((calc_polygon_area(&reversed) + 100.0).abs() < 1e-12);
        assert_eq!(calc_polygon_area(&square[..2]), 0.0);
    }
}
