//! Oblique shear around a vertical pivot line, with advance recomputation.

use kurbo::{Affine, Point};

use crate::path::Path;

/// Shear by `angle` around the vertical line `x = pivot_x`.
///
/// Points are first compressed horizontally by `cos(angle)` and then slanted
/// upward by `tan(angle)` per unit of x, so a horizontal edge rotates by
/// `angle` while verticals stay vertical.
pub fn shear_transform(angle: f64, pivot_x: f64) -> Affine {
    Affine::translate((pivot_x, 0.0))
        * Affine::skew(0.0, angle.tan())
        * Affine::scale_non_uniform(angle.cos(), 1.0)
        * Affine::translate((-pivot_x, 0.0))
}

/// Shear `path` and shift it so the sheared origin sits at `x = 0`.
///
/// Returns the new path and the new advance: the horizontal distance between
/// the sheared images of `(0, 0)` and `(advance, 0)`.
pub fn shear_path(path: &Path, angle: f64, pivot_x: f64, advance: f64) -> (Path, f64) {
    let t = shear_transform(angle, pivot_x);
    let lsb = (t * Point::ZERO).x;
    let rsb = (t * Point::new(advance, 0.0)).x;
    (path.transform(t).translate(-lsb, 0.0), rsb - lsb)
}
