//! bezextrude: split, depth-sort and extrude bezier outlines.
//!
//! Turns flat outlines (lines and cubic beziers) into the pieces of a
//! pseudo-3D extrusion: the outline is cut along the extrusion angle into
//! open fragments, the fragments are put into paint order, and each one gets
//! a closed side-wall ribbon joining it to its depth-shifted copy.
//!
//! # Example
//!
//! ```
//! use bezextrude::kurbo::Point;
//! use bezextrude::{extrude_outline, ExtrusionConfig, Pen, PathBuilder};
//!
//! let mut pen = PathBuilder::new();
//! pen.move_to(Point::new(0.0, 0.0));
//! pen.line_to(Point::new(0.0, 100.0));
//! pen.line_to(Point::new(100.0, 100.0));
//! pen.line_to(Point::new(100.0, 0.0));
//! pen.close_path();
//! let outline = pen.finish()?;
//!
//! let extrusion = extrude_outline(&outline, &ExtrusionConfig::default())?;
//! assert_eq!(extrusion.faces.len(), extrusion.sides.len());
//! # Ok::<(), bezextrude::GeometryError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod contour;
mod geom;
mod path;
mod pen;
mod segment;
mod split;

pub mod depth;
pub mod error;
pub mod shear;

// Re-export kurbo so downstream users get the same version
// used for points, rects and transforms.
pub use kurbo;

pub use config::ExtrusionConfig;
pub use contour::{Contour, SHARP_CORNER_THRESHOLD};
pub use error::GeometryError;
pub use geom::POINT_TOLERANCE;
pub use path::Path;
pub use pen::{Pen, PenCommand, PathBuilder, RecordingPen};
pub use segment::Segment;
pub use split::split_curve_at_angle;

use kurbo::Affine;

/// The result of extruding an outline.
#[derive(Debug, Clone, Default)]
pub struct Extrusion {
    /// Open outline fragments, in paint order (first = bottom-most).
    pub faces: Path,
    /// One closed side-wall ribbon per fragment, index-aligned with `faces`.
    pub sides: Path,
}

/// Full pipeline: closed outline → paint-ordered fragments and side walls.
///
/// Pipeline: cut at the extrusion angle and break at sharp corners,
/// depth-sort the fragments, build one ribbon per fragment.
pub fn extrude_outline(path: &Path, config: &ExtrusionConfig) -> Result<Extrusion, GeometryError> {
    // ── Split ─────────────────────────────────────────────
    let fragments = path.split_for_extrusion(config.angle, config.corner_threshold)?;
    log::debug!(
        "split {} contours at {:.1}\u{00b0} into {} fragments",
        path.len(),
        config.angle.to_degrees(),
        fragments.len(),
    );

    // ── Depth sort ────────────────────────────────────────
    // Compare with the extrusion direction pointing toward -x, so fragments
    // further along it paint first.
    let frame = comparison_frame(config.angle);
    let order =
        depth::paint_order_with_depth(fragments.contours(), frame, config.max_subdivision_depth)?;
    let mut slots: Vec<Option<Contour>> = fragments.into_contours().into_iter().map(Some).collect();
    let faces = Path::from_contours(order.iter().filter_map(|&i| slots[i].take()).collect());

    // ── Extrude ───────────────────────────────────────────
    let sides = faces.extrude(config.angle, -config.depth, config.reverse)?;
    let segments: usize = sides.contours().iter().map(Contour::len).sum();
    log::debug!(
        "extruded {} ribbons ({} segments), depth {}",
        sides.len(),
        segments,
        config.depth,
    );

    Ok(Extrusion { faces, sides })
}

/// The frame in which [`extrude_outline`] compares fragments.
pub fn comparison_frame(angle: f64) -> Affine {
    Affine::FLIP_X * Affine::rotate(-angle)
}

/// Highlight bands for a set of (typically open) stroke contours.
pub fn highlight_outline(strokes: &Path, config: &ExtrusionConfig) -> Path {
    let bands = strokes.highlight_bands(config.angle, config.highlight_width);
    log::debug!("built {} of {} highlight bands", bands.len(), strokes.len());
    bands
}

/// Convenience: shear an outline with the configured angle and pivot.
///
/// Returns the sheared outline and its new advance.
pub fn shear_outline(path: &Path, advance: f64, config: &ExtrusionConfig) -> (Path, f64) {
    if config.shear_angle == 0.0 {
        return (path.clone(), advance);
    }
    shear::shear_path(path, config.shear_angle, config.shear_pivot_x, advance)
}
