//! Drawing-command interface: building paths from pen calls and replaying
//! them.

use kurbo::{BezPath, PathEl, Point};

use crate::contour::Contour;
use crate::error::GeometryError;
use crate::path::Path;
use crate::segment::Segment;

/// Consumer of outline drawing commands.
pub trait Pen {
    /// Start a new contour at `p`.
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);
    /// Close the current contour, implying a line back to its start.
    fn close_path(&mut self);
    /// Finish the current contour without closing it.
    fn end_path(&mut self);
}

impl<P: Pen + ?Sized> Pen for &mut P {
    fn move_to(&mut self, p: Point) {
        (**self).move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        (**self).line_to(p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        (**self).curve_to(c1, c2, p);
    }

    fn close_path(&mut self) {
        (**self).close_path();
    }

    fn end_path(&mut self) {
        (**self).end_path();
    }
}

/// A pen that collects drawing commands into a [`Path`].
///
/// Errors (drawing before `move_to`) are held back and reported by
/// [`PathBuilder::finish`].
#[derive(Debug, Default)]
pub struct PathBuilder {
    contours: Vec<Contour>,
    segments: Vec<Segment>,
    current: Option<Point>,
    error: Option<GeometryError>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished path, or the first error encountered while drawing.
    pub fn finish(mut self) -> Result<Path, GeometryError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.flush_open();
        Ok(Path::from_contours(self.contours))
    }

    fn push_segment(&mut self, make: impl FnOnce(Point) -> Segment) {
        match self.current {
            Some(current) => {
                let segment = make(current);
                self.current = Some(segment.end());
                self.segments.push(segment);
            }
            None => self.fail(GeometryError::MissingMoveTo),
        }
    }

    fn fail(&mut self, err: GeometryError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Keep the pending segments as an open contour.
    fn flush_open(&mut self) {
        let segments = std::mem::take(&mut self.segments);
        if segments.is_empty() {
            if self.current.is_some() {
                log::debug!("dropping contour without segments");
            }
        } else {
            self.contours.push(Contour::from_segments(segments, false));
        }
        self.current = None;
    }
}

impl Pen for PathBuilder {
    fn move_to(&mut self, p: Point) {
        self.flush_open();
        self.current = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        self.push_segment(|current| Segment::line(current, p));
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.push_segment(|current| Segment::cubic(current, c1, c2, p));
    }

    fn close_path(&mut self) {
        if self.current.is_none() {
            self.fail(GeometryError::MissingMoveTo);
            return;
        }
        let segments = std::mem::take(&mut self.segments);
        match Contour::from_segments(segments, false).close() {
            Ok(contour) => self.contours.push(contour),
            Err(_) => log::debug!("dropping contour without segments"),
        }
        self.current = None;
    }

    fn end_path(&mut self) {
        self.flush_open();
    }
}

/// A single recorded drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenCommand {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    ClosePath,
    EndPath,
}

/// A pen that remembers every command it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingPen {
    pub commands: Vec<PenCommand>,
}

impl RecordingPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send the recorded commands to another pen.
    pub fn replay(&self, pen: &mut impl Pen) {
        for command in &self.commands {
            match *command {
                PenCommand::MoveTo(p) => pen.move_to(p),
                PenCommand::LineTo(p) => pen.line_to(p),
                PenCommand::CurveTo(c1, c2, p) => pen.curve_to(c1, c2, p),
                PenCommand::ClosePath => pen.close_path(),
                PenCommand::EndPath => pen.end_path(),
            }
        }
    }
}

impl Pen for RecordingPen {
    fn move_to(&mut self, p: Point) {
        self.commands.push(PenCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(PenCommand::LineTo(p));
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.commands.push(PenCommand::CurveTo(c1, c2, p));
    }

    fn close_path(&mut self) {
        self.commands.push(PenCommand::ClosePath);
    }

    fn end_path(&mut self) {
        self.commands.push(PenCommand::EndPath);
    }
}

/// Open subpaths simply stop; kurbo has no explicit end marker.
impl Pen for BezPath {
    fn move_to(&mut self, p: Point) {
        BezPath::move_to(self, p);
    }

    fn line_to(&mut self, p: Point) {
        BezPath::line_to(self, p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        BezPath::curve_to(self, c1, c2, p);
    }

    fn close_path(&mut self) {
        BezPath::close_path(self);
    }

    fn end_path(&mut self) {}
}

impl Path {
    /// Build a path from a kurbo `BezPath`. Quadratic segments are raised to
    /// cubics.
    pub fn from_bezpath(bez: &BezPath) -> Result<Path, GeometryError> {
        let mut builder = PathBuilder::new();
        let mut current = Point::ZERO;
        for el in bez.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    builder.move_to(p);
                    current = p;
                }
                PathEl::LineTo(p) => {
                    builder.line_to(p);
                    current = p;
                }
                PathEl::QuadTo(c, p) => {
                    let cubic = kurbo::QuadBez::new(current, c, p).raise();
                    builder.curve_to(cubic.p1, cubic.p2, cubic.p3);
                    current = p;
                }
                PathEl::CurveTo(c1, c2, p) => {
                    builder.curve_to(c1, c2, p);
                    current = p;
                }
                PathEl::ClosePath => builder.close_path(),
            }
        }
        builder.finish()
    }

    pub fn to_bezpath(&self) -> BezPath {
        let mut bez = BezPath::new();
        self.draw(&mut bez);
        bez
    }
}
