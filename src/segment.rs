//! Line and cubic segments.

use kurbo::{Affine, CubicBez, Line, ParamCurve, Point, Rect, Vec2};

use crate::geom::control_bounds;

/// A single piece of a contour: a straight line or a cubic bezier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Cubic(CubicBez),
}

impl Segment {
    pub fn line(p0: Point, p1: Point) -> Self {
        Segment::Line(Line::new(p0, p1))
    }

    pub fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Segment::Cubic(CubicBez::new(p0, p1, p2, p3))
    }

    pub fn start(&self) -> Point {
        match self {
            Segment::Line(l) => l.p0,
            Segment::Cubic(c) => c.p0,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Line(l) => l.p1,
            Segment::Cubic(c) => c.p3,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line(_))
    }

    /// All defining points in drawing order (2 for a line, 4 for a cubic).
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (pts, n) = match *self {
            Segment::Line(l) => ([l.p0, l.p1, Point::ZERO, Point::ZERO], 2),
            Segment::Cubic(c) => ([c.p0, c.p1, c.p2, c.p3], 4),
        };
        pts.into_iter().take(n)
    }

    /// Vector from the first point to the second one.
    pub fn entry_delta(&self) -> Vec2 {
        match self {
            Segment::Line(l) => l.p1 - l.p0,
            Segment::Cubic(c) => c.p1 - c.p0,
        }
    }

    /// Vector from the second-to-last point to the last one.
    pub fn exit_delta(&self) -> Vec2 {
        match self {
            Segment::Line(l) => l.p1 - l.p0,
            Segment::Cubic(c) => c.p3 - c.p2,
        }
    }

    pub fn eval(&self, t: f64) -> Point {
        match self {
            Segment::Line(l) => l.eval(t),
            Segment::Cubic(c) => c.eval(t),
        }
    }

    /// Same shape, traversed the other way.
    pub fn reverse(&self) -> Self {
        match *self {
            Segment::Line(l) => Segment::line(l.p1, l.p0),
            Segment::Cubic(c) => Segment::cubic(c.p3, c.p2, c.p1, c.p0),
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        self.map_points(|p| p + Vec2::new(dx, dy))
    }

    pub fn transform(&self, affine: Affine) -> Self {
        self.map_points(|p| affine * p)
    }

    pub(crate) fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        match *self {
            Segment::Line(l) => Segment::line(f(l.p0), f(l.p1)),
            Segment::Cubic(c) => Segment::cubic(f(c.p0), f(c.p1), f(c.p2), f(c.p3)),
        }
    }

    /// Replace the first point, keeping everything else.
    pub(crate) fn with_start(&self, p: Point) -> Self {
        match *self {
            Segment::Line(l) => Segment::line(p, l.p1),
            Segment::Cubic(c) => Segment::cubic(p, c.p1, c.p2, c.p3),
        }
    }

    /// Replace the last point, keeping everything else.
    pub(crate) fn with_end(&self, p: Point) -> Self {
        match *self {
            Segment::Line(l) => Segment::line(l.p0, p),
            Segment::Cubic(c) => Segment::cubic(c.p0, c.p1, c.p2, p),
        }
    }

    /// Split at parameter `t`. Both halves share the split point exactly.
    pub fn split_at_t(&self, t: f64) -> (Segment, Segment) {
        match *self {
            Segment::Line(l) => {
                let mid = l.p0.lerp(l.p1, t);
                (Segment::line(l.p0, mid), Segment::line(mid, l.p1))
            }
            Segment::Cubic(c) => {
                let (left, right) = subdivide(c, t);
                (Segment::Cubic(left), Segment::Cubic(right))
            }
        }
    }

    /// Box over the control points. Conservative, not the tight curve bounds.
    pub fn bounding_box(&self) -> Rect {
        // A segment always has at least two points.
        control_bounds(self.points()).unwrap_or_default()
    }
}

/// De Casteljau subdivision at parameter t.
fn subdivide(c: CubicBez, t: f64) -> (CubicBez, CubicBez) {
    let ab = c.p0.lerp(c.p1, t);
    let bc = c.p1.lerp(c.p2, t);
    let cd = c.p2.lerp(c.p3, t);
    let abc = ab.lerp(bc, t);
    let bcd = bc.lerp(cd, t);
    let mid = abc.lerp(bcd, t);
    (
        CubicBez::new(c.p0, ab, abc, mid),
        CubicBez::new(mid, bcd, cd, c.p3),
    )
}
