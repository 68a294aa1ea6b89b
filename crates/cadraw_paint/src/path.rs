//! Entity paths
//!
//! A `Path` is a single connected sequence of line and cubic Bézier segments
//! starting at `start`. This is the geometry the drawing frontend hands to
//! the backend for open paths and filled-region boundaries.

use crate::bezier::Bezier4P;
use crate::outline::{Outline, OutlineCommand};
use crate::primitives::Point;
use crate::{PaintError, Result};
use smallvec::SmallVec;

const CLOSE_EPS: f64 = 1e-9;

/// Path segment, each segment starts at the end of its predecessor
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    LineTo {
        end: Point,
    },
    CurveTo {
        ctrl1: Point,
        ctrl2: Point,
        end: Point,
    },
}

impl PathSegment {
    pub fn end(&self) -> Point {
        match *self {
            PathSegment::LineTo { end } | PathSegment::CurveTo { end, .. } => end,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    start: Point,
    segments: SmallVec<[PathSegment; 8]>,
}

impl Path {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: SmallVec::new(),
        }
    }

    /// Build a path from outline commands.
    ///
    /// Only line and cubic commands are accepted; quadratic curves, sub-path
    /// moves and explicit closes fail with [`PaintError::UnsupportedSegment`].
    pub fn try_from_commands(start: Point, commands: &[OutlineCommand]) -> Result<Self> {
        let mut path = Path::new(start);
        for cmd in commands {
            match *cmd {
                OutlineCommand::LineTo(end) => path.line_to(end),
                OutlineCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => path.curve_to(control1, control2, end),
                OutlineCommand::QuadTo { .. } => {
                    return Err(PaintError::UnsupportedSegment("QUAD_TO"))
                }
                OutlineCommand::MoveTo(_) => return Err(PaintError::UnsupportedSegment("MOVE_TO")),
                OutlineCommand::Close => return Err(PaintError::UnsupportedSegment("CLOSE")),
            }
        }
        Ok(path)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    /// End point of the last segment, or the start point of an empty path
    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, PathSegment::end)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.start.is_close(self.end(), CLOSE_EPS)
    }

    pub fn line_to(&mut self, end: Point) {
        self.segments.push(PathSegment::LineTo { end });
    }

    pub fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, end: Point) {
        self.segments.push(PathSegment::CurveTo { ctrl1, ctrl2, end });
    }

    /// Append cubic curves, connecting with a line if the first curve does
    /// not start at the current end point.
    pub fn add_curves(&mut self, curves: &[Bezier4P]) {
        let Some(first) = curves.first() else {
            return;
        };
        if !first.start().is_close(self.end(), CLOSE_EPS) {
            self.line_to(first.start());
        }
        for curve in curves {
            let [_, ctrl1, ctrl2, end] = *curve.control_points();
            self.curve_to(ctrl1, ctrl2, end);
        }
    }

    /// Append a counter-clockwise circular arc, angles in radians
    pub fn add_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<()> {
        let curves = Bezier4P::from_arc(center, radius, start_angle, end_angle, 1)?;
        self.add_curves(&curves);
        Ok(())
    }

    /// Close the path by a line back to the start point, if necessary
    pub fn close(&mut self) {
        if !self.is_closed() {
            self.line_to(self.start);
        }
    }

    /// Start point followed by all control and end points of the segments
    pub fn control_vertices(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().flat_map(|seg| {
            let pts: SmallVec<[Point; 3]> = match *seg {
                PathSegment::LineTo { end } => smallvec::smallvec![end],
                PathSegment::CurveTo { ctrl1, ctrl2, end } => smallvec::smallvec![ctrl1, ctrl2, end],
            };
            pts
        }))
    }

    /// Orientation of the control polygon, y-axis pointing up
    pub fn has_clockwise_orientation(&self) -> bool {
        let vertices: Vec<Point> = self.control_vertices().collect();
        let mut sum = 0.0;
        for (p1, p2) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
            sum += (p2.x - p1.x) * (p2.y + p1.y);
        }
        sum > 0.0
    }

    /// The same geometry traversed in opposite direction
    pub fn reversed(&self) -> Path {
        let mut path = Path::new(self.end());
        let mut previous_ends = std::iter::once(self.start)
            .chain(self.segments.iter().map(PathSegment::end))
            .collect::<Vec<_>>();
        previous_ends.pop();
        for (seg, end) in self.segments.iter().rev().zip(previous_ends.into_iter().rev()) {
            match *seg {
                PathSegment::LineTo { .. } => path.line_to(end),
                PathSegment::CurveTo { ctrl1, ctrl2, .. } => path.curve_to(ctrl2, ctrl1, end),
            }
        }
        path
    }

    pub fn clockwise(&self) -> Path {
        if self.has_clockwise_orientation() {
            self.clone()
        } else {
            self.reversed()
        }
    }

    pub fn counter_clockwise(&self) -> Path {
        if self.has_clockwise_orientation() {
            self.reversed()
        } else {
            self.clone()
        }
    }

    /// Append this path as a new sub-path of `outline`
    pub fn append_to(&self, outline: &mut Outline) {
        outline.push(OutlineCommand::MoveTo(self.start));
        for seg in &self.segments {
            outline.push(match *seg {
                PathSegment::LineTo { end } => OutlineCommand::LineTo(end),
                PathSegment::CurveTo { ctrl1, ctrl2, end } => OutlineCommand::CubicTo {
                    control1: ctrl1,
                    control2: ctrl2,
                    end,
                },
            });
        }
    }

    pub fn to_outline(&self) -> Outline {
        let mut outline = Outline::new();
        self.append_to(&mut outline);
        outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ccw() -> Path {
        let mut path = Path::new(Point::new(0.0, 0.0));
        path.line_to(Point::new(1.0, 0.0));
        path.line_to(Point::new(1.0, 1.0));
        path.line_to(Point::new(0.0, 1.0));
        path.close();
        path
    }

    #[test]
    fn test_orientation() {
        let ccw = square_ccw();
        assert!(!ccw.has_clockwise_orientation());
        assert!(ccw.reversed().has_clockwise_orientation());
        assert!(ccw.clockwise().has_clockwise_orientation());
        assert_eq!(ccw.counter_clockwise(), ccw);
    }

    #[test]
    fn test_reversed_swaps_curve_controls() {
        let mut path = Path::new(Point::new(0.0, 0.0));
        path.line_to(Point::new(1.0, 0.0));
        path.curve_to(Point::new(2.0, 0.0), Point::new(3.0, 1.0), Point::new(3.0, 2.0));
        let rev = path.reversed();
        assert_eq!(rev.start(), Point::new(3.0, 2.0));
        assert_eq!(
            rev.segments(),
            &[
                PathSegment::CurveTo {
                    ctrl1: Point::new(3.0, 1.0),
                    ctrl2: Point::new(2.0, 0.0),
                    end: Point::new(1.0, 0.0),
                },
                PathSegment::LineTo {
                    end: Point::new(0.0, 0.0)
                },
            ]
        );
        assert_eq!(rev.reversed(), path);
    }

    #[test]
    fn test_try_from_commands_rejects_quads() {
        let ok = Path::try_from_commands(
            Point::ZERO,
            &[
                OutlineCommand::LineTo(Point::new(1.0, 0.0)),
                OutlineCommand::CubicTo {
                    control1: Point::new(1.0, 1.0),
                    control2: Point::new(2.0, 1.0),
                    end: Point::new(2.0, 0.0),
                },
            ],
        )
        .unwrap();
        assert_eq!(ok.segments().len(), 2);

        let err = Path::try_from_commands(
            Point::ZERO,
            &[OutlineCommand::QuadTo {
                control: Point::new(1.0, 1.0),
                end: Point::new(2.0, 0.0),
            }],
        )
        .unwrap_err();
        assert_eq!(err, PaintError::UnsupportedSegment("QUAD_TO"));
    }

    #[test]
    fn test_add_arc_connects_with_line() {
        let mut path = Path::new(Point::ZERO);
        path.add_arc(Point::new(2.0, 0.0), 1.0, 0.0, std::f64::consts::PI)
            .unwrap();
        assert!(matches!(path.segments()[0], PathSegment::LineTo { end } if end.is_close(Point::new(3.0, 0.0), 1e-12)));
        assert!(path.end().is_close(Point::new(1.0, 0.0), 1e-9));
    }

    #[test]
    fn test_to_outline() {
        let outline = square_ccw().to_outline();
        assert_eq!(outline.commands()[0], OutlineCommand::MoveTo(Point::ZERO));
        assert_eq!(outline.commands().len(), 5);
    }
}
