//! Splitting curves where their tangent runs parallel to a cutting angle.
//!
//! The curve is rotated by `-angle` so that "parallel to the angle" becomes
//! "horizontal", and the roots of the rotated y-derivative give the split
//! parameters.

use kurbo::{Affine, CubicBez, Vec2};

use crate::error::GeometryError;
use crate::segment::Segment;

/// Leading coefficients smaller than this are treated as zero.
const QUADRATIC_EPSILON: f64 = 1e-10;

/// Split `segment` where its tangent is parallel to `angle` (radians).
///
/// Returns `(segment, None)` when there is no such point in `[0, 1)`, or when
/// the crossing runs backwards (negative rotated x-derivative) and
/// `both_directions` is false. Two parallel points are not supported.
pub fn split_curve_at_angle(
    segment: &Segment,
    angle: f64,
    both_directions: bool,
) -> Result<(Segment, Option<Segment>), GeometryError> {
    let cubic = match segment {
        // A line's direction is constant: it never turns parallel to the cut.
        Segment::Line(_) => return Ok((*segment, None)),
        Segment::Cubic(c) => *c,
    };

    let rotate = Affine::rotate(-angle);
    let rotated = CubicBez::new(
        rotate * cubic.p0,
        rotate * cubic.p1,
        rotate * cubic.p2,
        rotate * cubic.p3,
    );
    let (a, b, c) = polynomial_coefficients(&rotated);

    let roots: Vec<f64> = solve_quadratic(3.0 * a.y, 2.0 * b.y, c.y)
        .into_iter()
        .filter(|t| (0.0..1.0).contains(t))
        .collect();

    match roots.as_slice() {
        [] => Ok((*segment, None)),
        [t] => {
            let t = *t;
            let dx = 3.0 * a.x * t * t + 2.0 * b.x * t + c.x;
            if both_directions || dx > 0.0 {
                let (before, after) = segment.split_at_t(t);
                Ok((before, Some(after)))
            } else {
                Ok((*segment, None))
            }
        }
        _ => Err(GeometryError::CurveTooComplex { roots: roots.len() }),
    }
}

/// Power-basis coefficients `a t³ + b t² + c t + d` of a cubic (without `d`).
fn polynomial_coefficients(cubic: &CubicBez) -> (Vec2, Vec2, Vec2) {
    let c = (cubic.p1 - cubic.p0) * 3.0;
    let b = (cubic.p2 - cubic.p1) * 3.0 - c;
    let a = cubic.p3 - cubic.p0 - c - b;
    (a, b, c)
}

/// Solve At² + Bt + C = 0, returning real roots.
///
/// A zero discriminant still yields two (equal) roots, so a tangent that
/// only touches the cut direction counts twice. `kurbo::common::solve_quadratic`
/// collapses the double root, which would change which curves are too complex.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < QUADRATIC_EPSILON {
        if b.abs() < QUADRATIC_EPSILON {
            return vec![];
        }
        return vec![-c / b];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return vec![];
    }
    let sqrt_disc = disc.sqrt();
    vec![(-b + sqrt_disc) / (2.0 * a), (-b - sqrt_disc) / (2.0 * a)]
}
