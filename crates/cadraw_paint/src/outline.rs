//! Scene outlines
//!
//! An `Outline` is what the scene sink consumes for path primitives: glyph
//! outlines, converted entity paths and filled regions. Unlike an entity
//! [`Path`](crate::Path) it may hold several sub-paths and quadratic curves.

use crate::bezier::Bezier4P;
use crate::primitives::{Point, Rect, Transform2D};
use smallvec::SmallVec;

/// Outline command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        control: Point,
        end: Point,
    },
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    Close,
}

impl OutlineCommand {
    fn map(self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            OutlineCommand::MoveTo(p) => OutlineCommand::MoveTo(f(p)),
            OutlineCommand::LineTo(p) => OutlineCommand::LineTo(f(p)),
            OutlineCommand::QuadTo { control, end } => OutlineCommand::QuadTo {
                control: f(control),
                end: f(end),
            },
            OutlineCommand::CubicTo {
                control1,
                control2,
                end,
            } => OutlineCommand::CubicTo {
                control1: f(control1),
                control2: f(control2),
                end: f(end),
            },
            OutlineCommand::Close => OutlineCommand::Close,
        }
    }
}

/// A 2D outline composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    commands: SmallVec<[OutlineCommand; 16]>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed rectangle outline
    pub fn rect(rect: Rect) -> Self {
        let [p0, p1, p2, p3] = rect.corners();
        OutlineBuilder::new()
            .move_to(p0)
            .line_to(p1)
            .line_to(p2)
            .line_to(p3)
            .close()
            .build()
    }

    pub fn commands(&self) -> &[OutlineCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: OutlineCommand) {
        self.commands.push(command);
    }

    /// Append all commands of `other`
    pub fn extend(&mut self, other: &Outline) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Map every point (end and control points) through `transform`
    pub fn transformed(&self, transform: &Transform2D) -> Outline {
        Outline {
            commands: self
                .commands
                .iter()
                .map(|cmd| cmd.map(|p| transform.map_point(p)))
                .collect(),
        }
    }

    /// Iterate over all end and control points
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(|cmd| {
            let pts: SmallVec<[Point; 3]> = match *cmd {
                OutlineCommand::MoveTo(p) | OutlineCommand::LineTo(p) => smallvec::smallvec![p],
                OutlineCommand::QuadTo { control, end } => smallvec::smallvec![control, end],
                OutlineCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => smallvec::smallvec![control1, control2, end],
                OutlineCommand::Close => SmallVec::new(),
            };
            pts
        })
    }

    /// Exact bounding rectangle of the drawn geometry, `None` if the outline
    /// has no points.
    ///
    /// Not cached; computing it on a built outline is cheap.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let mut current = Point::ZERO;
        let mut include = |r: Rect| {
            bounds = Some(match bounds {
                Some(b) => b.union(&r),
                None => r,
            });
        };
        for cmd in &self.commands {
            match *cmd {
                OutlineCommand::MoveTo(p) | OutlineCommand::LineTo(p) => {
                    include(Rect::from_points(p, p));
                    current = p;
                }
                OutlineCommand::QuadTo { control, end } => {
                    // degree elevation to a cubic
                    let c1 = current + (control - current) * (2.0 / 3.0);
                    let c2 = end + (control - end) * (2.0 / 3.0);
                    include(Bezier4P::new([current, c1, c2, end]).bounding_box());
                    current = end;
                }
                OutlineCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(Bezier4P::new([current, control1, control2, end]).bounding_box());
                    current = end;
                }
                OutlineCommand::Close => {}
            }
        }
        bounds
    }
}

/// Builder for constructing outlines
pub struct OutlineBuilder {
    outline: Outline,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self {
            outline: Outline::new(),
        }
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.outline.push(OutlineCommand::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.outline.push(OutlineCommand::LineTo(p));
        self
    }

    pub fn quad_to(mut self, control: Point, end: Point) -> Self {
        self.outline.push(OutlineCommand::QuadTo { control, end });
        self
    }

    pub fn cubic_to(mut self, control1: Point, control2: Point, end: Point) -> Self {
        self.outline.push(OutlineCommand::CubicTo {
            control1,
            control2,
            end,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.outline.push(OutlineCommand::Close);
        self
    }

    pub fn build(self) -> Outline {
        self.outline
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
