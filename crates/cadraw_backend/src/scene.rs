//! Scene sink contract and an in-memory recording scene

use crate::entity::EntityTag;
use cadraw_paint::{Color, FillStyle, LineStyle, Outline, Point, Rect, Transform2D};

/// Retained scene receiving the backend's primitives.
///
/// Every `add_*` call creates exactly one primitive and returns a handle the
/// backend uses to attach the entity tag.
pub trait SceneSink {
    /// Opaque primitive handle
    type Handle: Copy;

    /// Point marker; `radius` is divided by the view scale at paint time so
    /// the marker keeps its size on screen.
    fn add_point(&mut self, position: Point, radius: f64, fill: FillStyle) -> Self::Handle;

    fn add_line(&mut self, start: Point, end: Point, pen: LineStyle) -> Self::Handle;

    fn add_path(&mut self, outline: Outline, pen: LineStyle, fill: FillStyle) -> Self::Handle;

    fn add_polygon(&mut self, points: Vec<Point>, pen: LineStyle, fill: FillStyle)
        -> Self::Handle;

    fn set_background(&mut self, color: Color);

    fn set_tag(&mut self, handle: Self::Handle, tag: EntityTag);

    /// Remove all primitives
    fn clear(&mut self);

    /// Compute the bounding rectangle of all primitives and make it the scene
    /// rectangle
    fn compute_and_set_bounds(&mut self) -> Rect;
}

/// Index of a primitive in a [`RecordingScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveId(pub usize);

/// Scene primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Point {
        position: Point,
        /// Radius before the view scale, see [`Primitive::radius_at`]
        radius: f64,
        fill: FillStyle,
    },
    Line {
        start: Point,
        end: Point,
        pen: LineStyle,
    },
    Path {
        outline: Outline,
        pen: LineStyle,
        fill: FillStyle,
    },
    Polygon {
        points: Vec<Point>,
        pen: LineStyle,
        fill: FillStyle,
    },
}

impl Primitive {
    /// World-space extent. Pen widths and point radii depend on the view and
    /// do not contribute.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Primitive::Point { position, .. } => Some(Rect::from_points(*position, *position)),
            Primitive::Line { start, end, .. } => Some(Rect::from_points(*start, *end)),
            Primitive::Path { outline, .. } => outline.bounding_rect(),
            Primitive::Polygon { points, .. } => Rect::bounding(points.iter().copied()),
        }
    }

    /// World-space radius of a point marker under the view transform,
    /// constant on screen. `None` for other primitives and for a view that
    /// collapses the x axis.
    pub fn radius_at(&self, view: &Transform2D) -> Option<f64> {
        match self {
            Primitive::Point { radius, .. } => {
                let scale = view.x_scale();
                (scale > 0.0 && scale.is_finite()).then(|| radius / scale)
            }
            _ => None,
        }
    }

    pub fn pen(&self) -> Option<&LineStyle> {
        match self {
            Primitive::Point { .. } => None,
            Primitive::Line { pen, .. }
            | Primitive::Path { pen, .. }
            | Primitive::Polygon { pen, .. } => Some(pen),
        }
    }

    pub fn fill(&self) -> Option<&FillStyle> {
        match self {
            Primitive::Line { .. } => None,
            Primitive::Point { fill, .. }
            | Primitive::Path { fill, .. }
            | Primitive::Polygon { fill, .. } => Some(fill),
        }
    }
}

/// Primitive with its entity tag
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPrimitive {
    pub primitive: Primitive,
    pub tag: Option<EntityTag>,
}

/// [`SceneSink`] keeping everything in memory
#[derive(Debug, Default)]
pub struct RecordingScene {
    primitives: Vec<RecordedPrimitive>,
    background: Option<Color>,
    scene_rect: Option<Rect>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[RecordedPrimitive] {
        &self.primitives
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&RecordedPrimitive> {
        self.primitives.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Scene rectangle set by the last `compute_and_set_bounds`
    pub fn scene_rect(&self) -> Option<Rect> {
        self.scene_rect
    }

    /// Primitives tagged with the entity of the given handle
    pub fn find_by_handle<'a>(
        &'a self,
        handle: &'a str,
    ) -> impl Iterator<Item = &'a RecordedPrimitive> + 'a {
        self.primitives.iter().filter(move |p| {
            p.tag
                .as_ref()
                .and_then(|t| t.entity.as_ref())
                .is_some_and(|e| e.handle == handle)
        })
    }

    fn push(&mut self, primitive: Primitive) -> PrimitiveId {
        self.primitives.push(RecordedPrimitive {
            primitive,
            tag: None,
        });
        PrimitiveId(self.primitives.len() - 1)
    }
}

impl SceneSink for RecordingScene {
    type Handle = PrimitiveId;

    fn add_point(&mut self, position: Point, radius: f64, fill: FillStyle) -> PrimitiveId {
        self.push(Primitive::Point {
            position,
            radius,
            fill,
        })
    }

    fn add_line(&mut self, start: Point, end: Point, pen: LineStyle) -> PrimitiveId {
        self.push(Primitive::Line { start, end, pen })
    }

    fn add_path(&mut self, outline: Outline, pen: LineStyle, fill: FillStyle) -> PrimitiveId {
        self.push(Primitive::Path { outline, pen, fill })
    }

    fn add_polygon(&mut self, points: Vec<Point>, pen: LineStyle, fill: FillStyle) -> PrimitiveId {
        self.push(Primitive::Polygon { points, pen, fill })
    }

    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn set_tag(&mut self, handle: PrimitiveId, tag: EntityTag) {
        if let Some(recorded) = self.primitives.get_mut(handle.0) {
            recorded.tag = Some(tag);
        }
    }

    fn clear(&mut self) {
        self.primitives.clear();
        self.scene_rect = None;
    }

    fn compute_and_set_bounds(&mut self) -> Rect {
        let rect = self
            .primitives
            .iter()
            .filter_map(|p| p.primitive.bounds())
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        self.scene_rect = Some(rect);
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_union() {
        let mut scene = RecordingScene::new();
        scene.add_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), LineStyle::default());
        scene.add_point(Point::new(5.0, 5.0), 0.5, FillStyle::Solid(Color::WHITE));
        let rect = scene.compute_and_set_bounds();
        assert_eq!(rect, Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(scene.scene_rect(), Some(rect));
    }

    #[test]
    fn test_empty_scene_bounds() {
        let mut scene = RecordingScene::new();
        assert_eq!(scene.compute_and_set_bounds(), Rect::default());
    }

    #[test]
    fn test_point_radius_follows_view_zoom() {
        let point = Primitive::Point {
            position: Point::ZERO,
            radius: 0.5,
            fill: FillStyle::None,
        };
        assert_eq!(point.radius_at(&Transform2D::identity()), Some(0.5));
        assert_eq!(point.radius_at(&Transform2D::scale(4.0, 4.0)), Some(0.125));
        let rotated = Transform2D::rotate(0.3).then(&Transform2D::scale(2.0, 2.0));
        assert!((point.radius_at(&rotated).unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_point_radius_degenerate_view() {
        let point = Primitive::Point {
            position: Point::ZERO,
            radius: 0.5,
            fill: FillStyle::None,
        };
        assert_eq!(point.radius_at(&Transform2D::scale(0.0, 0.0)), None);
        assert_eq!(point.radius_at(&Transform2D::scale(0.0, 3.0)), None);
        assert_eq!(point.radius_at(&Transform2D::scale(f64::NAN, 1.0)), None);
    }

    #[test]
    fn test_tags_and_clear() {
        let mut scene = RecordingScene::new();
        let id = scene.add_polygon(
            vec![Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
            LineStyle::NONE,
            FillStyle::None,
        );
        let tag = EntityTag {
            entity: Some(crate::entity::EntityRef::new("A1", "SOLID")),
            parents: Vec::new(),
        };
        scene.set_tag(id, tag.clone());
        assert_eq!(scene.get(id).unwrap().tag, Some(tag));
        assert_eq!(scene.find_by_handle("A1").count(), 1);
        scene.clear();
        assert!(scene.is_empty());
    }
}
