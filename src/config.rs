use crate::contour::SHARP_CORNER_THRESHOLD;
use crate::depth::MAX_SUBDIVISION_DEPTH;

/// All extrusion parameters in one struct.
///
/// Angles are in radians. Build variations with struct-update syntax:
/// `ExtrusionConfig { depth: 200.0, ..Default::default() }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionConfig {
    // -- Extrusion --
    /// Direction the outline is cut along and the side walls are measured on.
    pub angle: f64,
    /// Side-wall depth. The walls recede opposite to `angle`.
    pub depth: f64,
    /// Flip the ribbon winding (needed for nonzero-fill layer compositing).
    pub reverse: bool,

    // -- Splitting --
    /// Cross product of successive unit tangents above which a join is a
    /// sharp corner. Lower = more fragments.
    pub corner_threshold: f64,

    // -- Depth sorting --
    /// How many times overlapping segment halves are bisected again before a
    /// pair is left unordered.
    pub max_subdivision_depth: usize,

    // -- Highlight --
    /// Half-width of highlight bands, measured along `angle`.
    pub highlight_width: f64,

    // -- Shear --
    /// Oblique shear applied before extrusion. 0 = no shear.
    pub shear_angle: f64,
    /// x of the vertical line the shear pivots around.
    pub shear_pivot_x: f64,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            angle: (-30f64).to_radians(),
            depth: 100.0,
            reverse: true,
            corner_threshold: SHARP_CORNER_THRESHOLD,
            max_subdivision_depth: MAX_SUBDIVISION_DEPTH,
            highlight_width: 6.0,
            shear_angle: 30f64.to_radians(),
            shear_pivot_x: 100.0,
        }
    }
}
