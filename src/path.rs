//! Collections of contours.

use kurbo::{Affine, Rect};

use crate::contour::{Contour, SHARP_CORNER_THRESHOLD};
use crate::depth;
use crate::error::GeometryError;
use crate::pen::Pen;

/// An ordered collection of contours.
///
/// Once sorted with [`Path::sort_by_paint_order`], the order is the paint
/// order: the first contour is drawn first (bottom-most).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    contours: Vec<Contour>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contours(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn into_contours(self) -> Vec<Contour> {
        self.contours
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn push(&mut self, contour: Contour) {
        self.contours.push(contour);
    }

    /// Append all contours of `other`.
    pub fn extend(&mut self, other: Path) {
        self.contours.extend(other.contours);
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Path {
        self.map(|c| c.translate(dx, dy))
    }

    pub fn transform(&self, affine: Affine) -> Path {
        self.map(|c| c.transform(affine))
    }

    /// Reverse every contour, keeping the contour order.
    pub fn reverse(&self) -> Path {
        self.map(Contour::reverse)
    }

    fn map(&self, f: impl Fn(&Contour) -> Contour) -> Path {
        Path::from_contours(self.contours.iter().map(f).collect())
    }

    /// Box over all control points, `None` when there are none.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.contours
            .iter()
            .filter_map(Contour::bounding_box)
            .reduce(|a, b| a.union(b))
    }

    /// Split every (closed) contour at `angle`; see [`Contour::split_at_angle`].
    pub fn split_at_angle(&self, angle: f64) -> Result<(Path, Path), GeometryError> {
        let mut positive = Path::new();
        let mut negative = Path::new();
        for contour in &self.contours {
            let (pos, neg) = contour.split_at_angle(angle)?;
            positive.extend(pos);
            negative.extend(neg);
        }
        Ok((positive, negative))
    }

    /// Split every (open) contour at its sharp corners.
    pub fn split_at_sharp_corners(&self) -> Result<Path, GeometryError> {
        self.split_at_sharp_corners_with(SHARP_CORNER_THRESHOLD)
    }

    pub fn split_at_sharp_corners_with(&self, threshold: f64) -> Result<Path, GeometryError> {
        let mut path = Path::new();
        for contour in &self.contours {
            path.extend(contour.split_at_sharp_corners_with(threshold)?);
        }
        Ok(path)
    }

    /// Break a closed outline into the open fragments that get side walls.
    ///
    /// The negative-side runs keep their direction, the non-negative runs are
    /// reversed so every fragment runs the same way relative to the cut; the
    /// result is then broken at sharp corners.
    pub fn split_for_extrusion(&self, angle: f64, threshold: f64) -> Result<Path, GeometryError> {
        let (positive, negative) = self.split_at_angle(angle)?;
        let mut fragments = negative;
        fragments.extend(positive.reverse());
        fragments.split_at_sharp_corners_with(threshold)
    }

    /// One side-wall ribbon per contour; see [`Contour::extrude`].
    pub fn extrude(&self, angle: f64, depth: f64, reverse: bool) -> Result<Path, GeometryError> {
        let contours = self
            .contours
            .iter()
            .map(|c| c.extrude(angle, depth, reverse))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Path::from_contours(contours))
    }

    /// Highlight bands around every contour, skipping the ones too short to
    /// carry a band.
    pub fn highlight_bands(&self, angle: f64, width: f64) -> Path {
        let mut bands = Path::new();
        for (index, contour) in self.contours.iter().enumerate() {
            match contour.highlight_band(angle, width) {
                Some(band) => bands.push(band),
                None => log::warn!(
                    "skipping highlight contour {index}: it has {} segment(s)",
                    contour.len()
                ),
            }
        }
        bands
    }

    /// Reorder the contours into paint order, compared in the frame given by
    /// `transform`; see [`depth::paint_order`].
    pub fn sort_by_paint_order(&self, transform: Affine) -> Result<Path, GeometryError> {
        let sorted = depth::sort_contours(self.contours.clone(), transform)?;
        Ok(Path::from_contours(sorted))
    }

    /// Replay every contour as drawing commands.
    pub fn draw(&self, pen: &mut impl Pen) {
        for contour in &self.contours {
            contour.draw(pen);
        }
    }
}
