use kurbo::{Affine, Point, Rect, Vec2};

use crate::error::GeometryError;
use crate::geom::{control_bounds, direction, normalize, points_equal, signed_area, which_side};
use crate::path::Path;
use crate::pen::Pen;
use crate::segment::Segment;
use crate::split::split_curve_at_angle;

/// Default sensitivity of [`Contour::split_at_sharp_corners`]: the cross
/// product of successive unit tangents above which a corner counts as sharp.
pub const SHARP_CORNER_THRESHOLD: f64 = 0.1;

/// An ordered chain of segments, open or closed.
///
/// Consecutive segments share endpoints. A closed contour ends where it starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    segments: Vec<Segment>,
    closed: bool,
    /// The last segment is a line added by [`Contour::close`].
    implied_close: bool,
}

impl Contour {
    /// Build a contour, checking that the segments chain up.
    pub fn new(segments: Vec<Segment>, closed: bool) -> Result<Self, GeometryError> {
        for (index, pair) in segments.windows(2).enumerate() {
            if !points_equal(pair[0].end(), pair[1].start()) {
                return Err(GeometryError::Discontinuous { index: index + 1 });
            }
        }
        if closed {
            let (first, last) = match (segments.first(), segments.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => return Err(GeometryError::EmptyContour),
            };
            if !points_equal(last.end(), first.start()) {
                return Err(GeometryError::OpenEnds);
            }
        }
        Ok(Self::from_segments(segments, closed))
    }

    /// Segments already known to be continuous.
    pub(crate) fn from_segments(segments: Vec<Segment>, closed: bool) -> Self {
        Self {
            segments,
            closed,
            implied_close: false,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(Segment::start)
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(Segment::end)
    }

    /// Closed copy of this contour.
    ///
    /// A closing line is appended when the end is not exactly the start.
    /// That line is implied by `close_path` when the contour is drawn.
    pub fn close(&self) -> Result<Contour, GeometryError> {
        let (start, end) = match (self.start(), self.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(GeometryError::EmptyContour),
        };
        let mut segments = self.segments.clone();
        let mut implied_close = self.implied_close;
        if start != end {
            segments.push(Segment::line(end, start));
            implied_close = true;
        }
        Ok(Self {
            segments,
            closed: true,
            implied_close,
        })
    }

    /// Same contour traversed the other way. An implied closing line becomes
    /// the first segment and is drawn like any other.
    pub fn reverse(&self) -> Contour {
        let segments = self.segments.iter().rev().map(Segment::reverse).collect();
        Self::from_segments(segments, self.closed)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Contour {
        self.map_segments(|s| s.translate(dx, dy))
    }

    pub fn transform(&self, affine: Affine) -> Contour {
        self.map_segments(|s| s.transform(affine))
    }

    fn map_segments(&self, f: impl Fn(&Segment) -> Segment) -> Contour {
        Self {
            segments: self.segments.iter().map(f).collect(),
            closed: self.closed,
            implied_close: self.implied_close,
        }
    }

    /// Box over all control points, `None` for an empty contour.
    pub fn bounding_box(&self) -> Option<Rect> {
        control_bounds(self.segments.iter().flat_map(Segment::points))
    }

    /// Signed area of the on-curve polygon. Positive = counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        let points: Vec<Point> = self.segments.iter().map(Segment::start).collect();
        signed_area(&points)
    }

    /// Split a closed contour into the runs lying on either side of `angle`.
    ///
    /// A segment's side is the sign of the cross product of the cut direction
    /// with its entry vector. The first path collects the non-negative side,
    /// the second the negative side. Cubics whose entry and exit vectors
    /// disagree are split where their tangent is parallel to the cut.
    /// All resulting contours are open.
    pub fn split_at_angle(&self, angle: f64) -> Result<(Path, Path), GeometryError> {
        if !self.closed {
            return Err(GeometryError::NotClosed);
        }
        let (first, last) = match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(GeometryError::EmptyContour),
        };
        if !points_equal(last.end(), first.start()) {
            return Err(GeometryError::OpenEnds);
        }

        let cut = direction(angle);
        let side_of = |v: Vec2| if which_side(cut, v) >= 0.0 { 0 } else { 1 };

        let mut sides: [Vec<Vec<Segment>>; 2] = [Vec::new(), Vec::new()];
        let mut previous: Option<usize> = None;

        for segment in &self.segments {
            let side1 = side_of(segment.entry_delta());
            let mut side2 = side1;
            match segment {
                Segment::Line(_) => push_run(&mut sides[side1], previous == Some(side1), *segment),
                Segment::Cubic(_) => {
                    side2 = side_of(segment.exit_delta());
                    if side1 == side2 {
                        push_run(&mut sides[side1], previous == Some(side1), *segment);
                    } else {
                        let (before, after) = split_curve_at_angle(segment, angle, true)?;
                        push_run(&mut sides[side1], previous == Some(side1), before);
                        match after {
                            Some(after) => sides[side2].push(vec![after]),
                            // No crossing found after all: keep tracking side1
                            // so the next segment does not open a new run.
                            None => side2 = side1,
                        }
                    }
                }
            }
            previous = Some(side2);
        }

        // Join the run that wraps around the closing seam.
        for groups in sides.iter_mut() {
            if groups.len() > 1 {
                let wraps = match (groups.last().and_then(|g| g.last()), groups[0].first()) {
                    (Some(tail), Some(head)) => points_equal(tail.end(), head.start()),
                    _ => false,
                };
                if wraps {
                    if let Some(mut tail) = groups.pop() {
                        tail.append(&mut groups[0]);
                        groups[0] = tail;
                    }
                }
            }
        }

        let [positive, negative] = sides;
        Ok((open_path(positive), open_path(negative)))
    }

    /// Split an open contour wherever the direction changes sharply.
    pub fn split_at_sharp_corners(&self) -> Result<Path, GeometryError> {
        self.split_at_sharp_corners_with(SHARP_CORNER_THRESHOLD)
    }

    /// [`split_at_sharp_corners`](Self::split_at_sharp_corners) with an
    /// explicit corner sensitivity.
    pub fn split_at_sharp_corners_with(&self, threshold: f64) -> Result<Path, GeometryError> {
        if self.closed {
            return Err(GeometryError::AlreadyClosed);
        }
        let mut groups: Vec<Vec<Segment>> = Vec::new();
        let mut last_delta: Option<Vec2> = None;
        for segment in &self.segments {
            let sharp = last_delta.is_some_and(|d| {
                which_side(normalize(d), normalize(segment.entry_delta())).abs() > threshold
            });
            push_run(&mut groups, !sharp, *segment);
            last_delta = Some(segment.exit_delta());
        }
        Ok(open_path(groups))
    }

    /// Side wall between this contour and a copy shifted `depth` along `angle`.
    ///
    /// The ribbon runs along the contour, across to the shifted copy, back
    /// along it in reverse, and across to the start: `2n + 2` segments.
    pub fn extrude(&self, angle: f64, depth: f64, reverse: bool) -> Result<Contour, GeometryError> {
        let (start, end) = match (self.start(), self.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(GeometryError::EmptyContour),
        };
        let offset = direction(angle) * depth;
        let back = self.translate(offset.x, offset.y).reverse();

        let mut segments = Vec::with_capacity(self.len() * 2 + 2);
        segments.extend_from_slice(&self.segments);
        segments.push(Segment::line(end, end + offset));
        segments.extend_from_slice(&back.segments);
        segments.push(Segment::line(start + offset, start));

        let ribbon = Self::from_segments(segments, true);
        Ok(if reverse { ribbon.reverse() } else { ribbon })
    }

    /// Closed band of half-width `width` around this contour, measured along
    /// `angle`, pinched to the contour's own start and end points.
    ///
    /// Returns `None` for contours with fewer than two segments.
    pub fn highlight_band(&self, angle: f64, width: f64) -> Option<Contour> {
        let n = self.segments.len();
        if n < 2 {
            return None;
        }
        let first = self.segments[0].start();
        let last = self.segments[n - 1].end();
        let offset = direction(angle) * width;

        let mut segments = self.translate(offset.x, offset.y).segments;
        segments[0] = segments[0].with_start(first);
        segments[n - 1] = segments[n - 1].with_end(last);

        let mut other = self.translate(-offset.x, -offset.y).reverse().segments;
        other[0] = other[0].with_start(last);
        other[n - 1] = other[n - 1].with_end(first);

        segments.append(&mut other);
        Some(Self::from_segments(segments, true))
    }

    /// Replay as drawing commands.
    ///
    /// A closing line added by [`Contour::close`] is implied by `close_path`
    /// and is not drawn; every other segment is.
    pub fn draw(&self, pen: &mut impl Pen) {
        let Some(start) = self.start() else {
            return;
        };
        pen.move_to(start);
        let drawn = if self.closed && self.implied_close {
            &self.segments[..self.segments.len() - 1]
        } else {
            &self.segments[..]
        };
        for segment in drawn {
            match *segment {
                Segment::Line(l) => pen.line_to(l.p1),
                Segment::Cubic(c) => pen.curve_to(c.p1, c.p2, c.p3),
            }
        }
        if self.closed {
            pen.close_path();
        } else {
            pen.end_path();
        }
    }
}

/// Append to the current run, or start a new one.
fn push_run(groups: &mut Vec<Vec<Segment>>, continues: bool, segment: Segment) {
    match groups.last_mut() {
        Some(group) if continues => group.push(segment),
        _ => groups.push(vec![segment]),
    }
}

fn open_path(groups: Vec<Vec<Segment>>) -> Path {
    Path::from_contours(
        groups
            .into_iter()
            .map(|segments| Contour::from_segments(segments, false))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::ParamCurveArclen;

    fn polygon(points: &[(f64, f64)]) -> Contour {
        let pts: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let segments = pts
            .windows(2)
            .map(|w| Segment::line(w[0], w[1]))
            .collect();
        Contour::from_segments(segments, false).close().unwrap()
    }

    fn open_polyline(points: &[(f64, f64)]) -> Contour {
        let pts: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let segments = pts.windows(2).map(|w| Segment::line(w[0], w[1])).collect();
        Contour::new(segments, false).unwrap()
    }

    /// Clockwise circle-ish outline made of four cubics.
    fn blob() -> Contour {
        let k = 0.5523 * 100.0;
        let segments = vec![
            Segment::cubic(
                Point::new(0.0, 100.0),
                Point::new(k, 100.0),
                Point::new(100.0, k),
                Point::new(100.0, 0.0),
            ),
            Segment::cubic(
                Point::new(100.0, 0.0),
                Point::new(100.0, -k),
                Point::new(k, -100.0),
                Point::new(0.0, -100.0),
            ),
            Segment::cubic(
                Point::new(0.0, -100.0),
                Point::new(-k, -100.0),
                Point::new(-100.0, -k),
                Point::new(-100.0, 0.0),
            ),
            Segment::cubic(
                Point::new(-100.0, 0.0),
                Point::new(-100.0, k),
                Point::new(-k, 100.0),
                Point::new(0.0, 100.0),
            ),
        ];
        Contour::new(segments, true).unwrap()
    }

    /// Arc length, accurate well below the tolerances the tests use.
    fn arclen(segment: &Segment) -> f64 {
        match segment {
            Segment::Line(l) => l.arclen(1e-9),
            Segment::Cubic(c) => c.arclen(1e-9),
        }
    }

    #[test]
    fn new_rejects_gaps() {
        let segments = vec![
            Segment::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
            Segment::line(Point::new(2.0, 0.0), Point::new(3.0, 0.0)),
        ];
        assert_eq!(
            Contour::new(segments, false),
            Err(GeometryError::Discontinuous { index: 1 })
        );
        let open = vec![Segment::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0))];
        assert_eq!(Contour::new(open, true), Err(GeometryError::OpenEnds));
        assert_eq!(Contour::new(vec![], true), Err(GeometryError::EmptyContour));
    }

    #[test]
    fn close_synthesizes_closing_line() {
        let c = polygon(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        assert!(c.is_closed());
        assert_eq!(c.len(), 4);
        assert_eq!(c.end(), c.start());
        // Already closed shape: no extra segment.
        assert_eq!(c.close().unwrap().len(), 4);
    }

    #[test]
    fn reverse_flips_winding() {
        let c = polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!(c.signed_area() > 0.0);
        let r = c.reverse();
        assert!(r.signed_area() < 0.0);
        assert_eq!(r.reverse().segments(), c.segments());
    }

    #[test]
    fn square_split_at_horizontal_angle() {
        let square = polygon(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let (positive, negative) = square.split_at_angle(0.0).unwrap();

        // Left, top and (via the seam) bottom edges have cross >= 0.
        assert_eq!(positive.len(), 1);
        let run = &positive.contours()[0];
        assert!(!run.is_closed());
        assert_eq!(run.len(), 3);
        assert_eq!(run.start(), Some(Point::new(10.0, 0.0)));
        assert_eq!(run.end(), Some(Point::new(10.0, 10.0)));

        // Right edge runs downward.
        assert_eq!(negative.len(), 1);
        assert_eq!(
            negative.contours()[0].segments(),
            &[Segment::line(Point::new(10.0, 10.0), Point::new(10.0, 0.0))]
        );
    }

    #[test]
    fn split_at_angle_conserves_arc() {
        let shape = blob();
        let original: f64 = shape.segments().iter().map(arclen).sum();
        for degrees in [0.0f64, 10.0, 45.0, 90.0, 150.0, -30.0] {
            let (a, b) = shape.split_at_angle(degrees.to_radians()).unwrap();
            let runs: Vec<&Contour> = a.contours().iter().chain(b.contours()).collect();
            let pieces: Vec<Segment> = runs
                .iter()
                .flat_map(|c| c.segments().iter().copied())
                .collect();
            assert!(pieces.len() >= shape.len());
            // A dropped or duplicated piece changes the total length.
            let split: f64 = pieces.iter().map(arclen).sum();
            assert!((split - original).abs() < 1e-6, "{degrees}: {split} vs {original}");
            for c in &runs {
                assert!(!c.is_closed());
                assert!(Contour::new(c.segments().to_vec(), false).is_ok());
            }
            // Runs alternate around the outline: every run ends where a run
            // of the other side starts.
            for run in a.contours() {
                let end = run.end().unwrap();
                let next = b
                    .contours()
                    .iter()
                    .filter(|r| points_equal(r.start().unwrap(), end))
                    .count();
                assert_eq!(next, 1, "{degrees}: run ending at {end:?}");
            }
            for run in b.contours() {
                let end = run.end().unwrap();
                let next = a
                    .contours()
                    .iter()
                    .filter(|r| points_equal(r.start().unwrap(), end))
                    .count();
                assert_eq!(next, 1, "{degrees}: run ending at {end:?}");
            }
        }
    }

    #[test]
    fn unsplittable_cubic_keeps_its_entry_side() {
        // Enters downward and flattens out: entry and exit vectors disagree
        // at angle 0, but the only parallel point is the double root t = 1.
        let hook = Segment::cubic(
            Point::new(0.0, 0.0),
            Point::new(1.0, -1.0),
            Point::new(2.0, -1.0),
            Point::new(3.0, -1.0),
        );
        let (whole, after) = split_curve_at_angle(&hook, 0.0, true).unwrap();
        assert_eq!(whole, hook);
        assert!(after.is_none());

        let down = Segment::line(Point::new(3.0, -1.0), Point::new(4.0, -3.0));
        let up = Segment::line(Point::new(4.0, -3.0), Point::new(4.0, 5.0));
        let back = Segment::line(Point::new(4.0, 5.0), Point::new(0.0, 0.0));
        let contour = Contour::new(vec![hook, down, up, back], true).unwrap();

        let (positive, negative) = contour.split_at_angle(0.0).unwrap();
        assert_eq!(positive.len(), 1);
        assert_eq!(positive.contours()[0].segments(), &[up]);
        // The cubic stays whole on the negative side and the line after it
        // extends the same run, which then joins `back` across the seam.
        assert_eq!(negative.len(), 1);
        assert_eq!(negative.contours()[0].segments(), &[back, hook, down]);
    }

    #[test]
    fn blob_splits_into_one_run_per_side() {
        // A convex outline has exactly one run on each side of any cut.
        let (a, b) = blob().split_at_angle(0.0).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        let a = &a.contours()[0];
        let b = &b.contours()[0];
        assert_eq!(a.end(), b.start());
        assert_eq!(b.end(), a.start());
    }

    #[test]
    fn split_at_angle_requires_closed() {
        let open = open_polyline(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(open.split_at_angle(0.0).unwrap_err(), GeometryError::NotClosed);
    }

    #[test]
    fn sharp_corners_split_polyline() {
        let c = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.5), (20.0, 10.0)]);
        let parts = c.split_at_sharp_corners().unwrap();
        // The first bend is gentle (cross ~0.05), the second is a right angle.
        assert_eq!(parts.len(), 2);
        assert_eq!(parts.contours()[0].len(), 2);
        assert_eq!(parts.contours()[1].len(), 1);
        assert_eq!(parts.contours()[1].start(), Some(Point::new(20.0, 0.5)));
    }

    #[test]
    fn sharp_corners_ignore_zero_length_segments() {
        let c = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        // The degenerate segment normalizes to zero, so neither joint around
        // it is sharp.
        let parts = c.split_at_sharp_corners().unwrap();
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn sharp_corners_require_open() {
        let square = polygon(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)]);
        assert_eq!(
            square.split_at_sharp_corners().unwrap_err(),
            GeometryError::AlreadyClosed
        );
        let empty = Contour::default();
        assert!(empty.split_at_sharp_corners().unwrap().is_empty());
    }

    #[test]
    fn extruded_ribbon_is_closed() {
        for contour in [blob(), open_polyline(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)])] {
            for reverse in [false, true] {
                let ribbon = contour.extrude(-0.5, 40.0, reverse).unwrap();
                assert!(ribbon.is_closed());
                assert_eq!(ribbon.len(), contour.len() * 2 + 2);
                assert_eq!(ribbon.start(), ribbon.end());
                assert!(Contour::new(ribbon.segments().to_vec(), true).is_ok());
            }
        }
        assert_eq!(
            Contour::default().extrude(0.0, 1.0, false).unwrap_err(),
            GeometryError::EmptyContour
        );
    }

    #[test]
    fn reversed_ribbon_has_opposite_winding() {
        let edge = open_polyline(&[(0.0, 0.0), (10.0, 0.0)]);
        let ribbon = edge.extrude(std::f64::consts::FRAC_PI_2, 5.0, false).unwrap();
        let flipped = edge.extrude(std::f64::consts::FRAC_PI_2, 5.0, true).unwrap();
        assert!((ribbon.signed_area() - 50.0).abs() < 1e-9);
        assert!((ribbon.signed_area() + flipped.signed_area()).abs() < 1e-9);
    }

    #[test]
    fn highlight_band_is_pinched() {
        let stroke = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let band = stroke.highlight_band(std::f64::consts::FRAC_PI_2, 3.0).unwrap();
        assert!(band.is_closed());
        assert_eq!(band.len(), 4);
        assert_eq!(band.start(), Some(Point::new(0.0, 0.0)));
        assert_eq!(band.segments()[0].end(), Point::new(10.0, 3.0));
        assert_eq!(band.segments()[2].end(), Point::new(10.0, -3.0));
        assert_eq!(band.end(), Some(Point::new(0.0, 0.0)));

        let single = open_polyline(&[(0.0, 0.0), (10.0, 0.0)]);
        assert!(single.highlight_band(0.0, 3.0).is_none());
    }
}
