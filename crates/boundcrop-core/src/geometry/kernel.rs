//! Pure point/line functions used by the constraint resolvers.
//!
//! The numerics here are deliberately simple (slope/intercept intersections,
//! exact float comparisons for vertical and horizontal lines) so that a box
//! clamped by this crate lands on exactly the same coordinates as one clamped
//! by the host's interactive editor.

use super::Point;

/// Where a point lies relative to a pair of parallel boundary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Between the lines, on one of them, or in a region where the two
    /// individual classifications disagree.
    Inside,
    /// Strictly on the positive-cross-product side of both lines.
    Low,
    /// Strictly on the negative-cross-product side of both lines.
    High,
}

/// Intersection of the infinite lines AB and CD.
///
/// Returns `None` when the lines are parallel. Vertical and horizontal lines
/// are handled separately since their slope is undefined (or zero, which
/// cannot be divided by when solving for `x`).
pub fn intersect(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let (x1, y1, x2, y2) = (a.x, a.y, b.x, b.y);
    let (x3, y3, x4, y4) = (c.x, c.y, d.x, d.y);

    // Vertical lines
    if x1 == x2 {
        if x3 == x4 {
            return None;
        }
        let m2 = (y4 - y3) / (x4 - x3);
        let b2 = y3 - m2 * x3;
        return Some(Point::new(x1, m2 * x1 + b2));
    }

    if x3 == x4 {
        let m1 = (y2 - y1) / (x2 - x1);
        let b1 = y1 - m1 * x1;
        return Some(Point::new(x3, m1 * x3 + b1));
    }

    // Horizontal lines
    if y1 == y2 {
        if y3 == y4 {
            return None;
        }
        let m2 = (y4 - y3) / (x4 - x3);
        let b2 = y3 - m2 * x3;
        return Some(Point::new((y1 - b2) / m2, y1));
    }

    if y3 == y4 {
        let m1 = (y2 - y1) / (x2 - x1);
        let b1 = y1 - m1 * x1;
        return Some(Point::new((y3 - b1) / m1, y3));
    }

    let m1 = (y2 - y1) / (x2 - x1);
    let b1 = y1 - m1 * x1;
    let m2 = (y4 - y3) / (x4 - x3);
    let b2 = y3 - m2 * x3;

    if m1 == m2 {
        return None;
    }

    let x = (b2 - b1) / (m1 - m2);
    Some(Point::new(x, m1 * x + b1))
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// Uses the line's coefficient form `A·x + B·y + C = 0`.
pub fn point_to_line_distance(p: Point, a: Point, b: Point) -> f64 {
    let coef_a = b.y - a.y;
    let coef_b = a.x - b.x;
    let coef_c = b.x * a.y - a.x * b.y;

    (coef_a * p.x + coef_b * p.y + coef_c).abs() / (coef_a * coef_a + coef_b * coef_b).sqrt()
}

/// The point on line AB at `distance_to_b` from B, walking toward A.
///
/// Extrapolates past A when the distance exceeds `|AB|`.
pub fn point_at_distance_from_b(a: Point, b: Point, distance_to_b: f64) -> Point {
    let t = distance_to_b / distance(a, b);
    Point::new(b.x + t * (a.x - b.x), b.y + t * (a.y - b.y))
}

/// Orthogonal projection of `p` onto segment AB, clamped to the endpoints.
pub fn project_onto_segment(a: Point, b: Point, p: Point) -> Point {
    let ab = b - a;
    let ap = p - a;
    let t = (ap.dot(ab) / ab.dot(ab)).clamp(0.0, 1.0);
    Point::new(a.x + t * ab.x, a.y + t * ab.y)
}

/// Classify `p` against lines AB and CD at the same time.
///
/// Reports [`Side::Low`] only when `p` is on the positive side of both lines,
/// [`Side::High`] only when it is on the negative side of both, and
/// [`Side::Inside`] otherwise.
pub fn same_side_of_two_lines(a: Point, b: Point, c: Point, d: Point, p: Point) -> Side {
    let first = (b - a).cross(p - a);
    let second = (d - c).cross(p - c);

    if first > 0.0 && second > 0.0 {
        Side::Low
    } else if first < 0.0 && second < 0.0 {
        Side::High
    } else {
        Side::Inside
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
