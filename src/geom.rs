//! Shared geometry utilities.

use kurbo::{Point, Rect, Vec2};

/// Absolute tolerance for treating two points as the same point.
pub const POINT_TOLERANCE: f64 = 1e-5;

/// Vectors shorter than this normalize to zero.
const NORMALIZE_EPSILON: f64 = 1e-11;

/// Whether two points coincide within [`POINT_TOLERANCE`] on both axes.
pub fn points_equal(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= POINT_TOLERANCE && (a.y - b.y).abs() <= POINT_TOLERANCE
}

/// 2D cross product. Positive when `v` turns counter-clockwise from `u`.
pub fn which_side(u: Vec2, v: Vec2) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Unit vector in the direction of `v`, or zero for (near) zero-length input.
pub fn normalize(v: Vec2) -> Vec2 {
    let d = v.hypot();
    if d.abs() > NORMALIZE_EPSILON {
        v / d
    } else {
        Vec2::ZERO
    }
}

/// Unit vector pointing along `angle` (radians).
pub fn direction(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Axis-aligned box over a set of points, `None` when empty.
pub fn control_bounds(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let init = Rect::from_points(first, first);
    Some(points.fold(init, |rect, p| rect.union_pt(p)))
}

/// Strict overlap of the y-ranges; touching edges do not count.
pub fn rects_overlap_vertically(a: &Rect, b: &Rect) -> bool {
    a.y0.max(b.y0) < a.y1.min(b.y1)
}

/// Strict overlap of the x-ranges; touching edges do not count.
pub fn rects_overlap_horizontally(a: &Rect, b: &Rect) -> bool {
    a.x0.max(b.x0) < a.x1.min(b.x1)
}

pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    rects_overlap_vertically(a, b) && rects_overlap_horizontally(a, b)
}

/// Signed area of a polygon via the shoelace formula.
///
/// Positive = counter-clockwise, negative = clockwise.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            points[i].x * points[j].y - points[j].x * points[i].y
        })
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_vectors_normalize_to_zero() {
        assert_eq!(normalize(Vec2::new(1e-12, 0.0)), Vec2::ZERO);
        let n = normalize(Vec2::new(3.0, 4.0));
        assert!((n.x - 0.6).abs() < 1e-12 && (n.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 2.0, 1.0);
        assert!(rects_overlap_vertically(&a, &b));
        assert!(!rects_overlap_horizontally(&a, &b));
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn point_tolerance() {
        assert!(points_equal(Point::new(1.0, 1.0), Point::new(1.000001, 0.999999)));
        assert!(!points_equal(Point::new(1.0, 1.0), Point::new(1.0001, 1.0)));
    }

    #[test]
    fn control_bounds_of_empty_set() {
        assert!(control_bounds(std::iter::empty()).is_none());
        let r = control_bounds([Point::new(2.0, -1.0), Point::new(-3.0, 4.0)]).unwrap();
        assert_eq!(r, Rect::new(-3.0, -1.0, 2.0, 4.0));
    }
}
