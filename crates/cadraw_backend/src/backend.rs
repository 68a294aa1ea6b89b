//! Rendering backend façade
//!
//! The backend owns the scene sink and all style and text caches for one
//! drawing pass. Draw calls resolve the entity's properties into pens and
//! brushes, emit exactly one primitive each and tag it with the entity
//! stack.
//!
//! Lifecycle: `Idle` until the first draw call, then `Drawing`, then
//! `Finalized` after [`RenderingBackend::finalize`]. A finalized backend
//! rejects draw calls until [`RenderingBackend::clear`] is called.

use crate::config::BackendParams;
use crate::entity::{EntityRef, EntityTag};
use crate::properties::Properties;
use crate::scene::SceneSink;
use crate::style::StyleResolver;
use crate::{RenderError, Result};
use cadraw_paint::{FillStyle, LineStyle, Matrix44, Outline, Path, Point};
use cadraw_text::{
    map_weight, FontDescriptor, FontMeasurements, FontWeight, OutlineSource, ResolvedFont,
    SystemOutlineSource, TextEntity, TextPlacer,
};

/// Lifecycle state of the current scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneState {
    #[default]
    Idle,
    Drawing,
    Finalized,
}

pub struct RenderingBackend<S: SceneSink, O: OutlineSource = SystemOutlineSource> {
    scene: S,
    params: BackendParams,
    styles: StyleResolver,
    text: TextPlacer<O>,
    entity_stack: Vec<EntityRef>,
    state: SceneState,
}

impl<S: SceneSink> RenderingBackend<S> {
    /// Backend drawing text with the installed system fonts
    pub fn new(scene: S, params: BackendParams) -> Self {
        Self::with_outline_source(scene, params, SystemOutlineSource::new())
    }
}

impl<S: SceneSink, O: OutlineSource> RenderingBackend<S, O> {
    pub fn with_outline_source(scene: S, params: BackendParams, source: O) -> Self {
        let default_font = ResolvedFont::new(
            params.default_font_family.clone(),
            map_weight(&FontWeight::NORMAL),
            false,
        );
        Self {
            scene,
            styles: StyleResolver::new(&params),
            text: TextPlacer::new(source, default_font, params.use_text_cache),
            params,
            entity_stack: Vec::new(),
            state: SceneState::Idle,
        }
    }

    pub fn params(&self) -> &BackendParams {
        &self.params
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Replace the scene sink, returning the previous one. The new scene
    /// starts idle.
    pub fn set_scene(&mut self, scene: S) -> S {
        tracing::debug!("Scene replaced");
        self.state = SceneState::Idle;
        std::mem::replace(&mut self.scene, scene)
    }

    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    pub fn text_placer(&self) -> &TextPlacer<O> {
        &self.text
    }

    /// Drop cached glyph outlines; color, dash and font caches are kept
    pub fn clear_text_cache(&mut self) {
        self.text.clear_cache();
    }

    // =========================================================================
    // Entity stack
    // =========================================================================

    /// Start drawing `entity`, nested in the current entity if there is one
    pub fn enter_entity(&mut self, entity: EntityRef) {
        self.entity_stack.push(entity);
    }

    pub fn exit_entity(&mut self) -> Option<EntityRef> {
        self.entity_stack.pop()
    }

    pub fn current_entity(&self) -> Option<&EntityRef> {
        self.entity_stack.last()
    }

    fn text_entity(&self) -> TextEntity {
        self.current_entity()
            .map_or(TextEntity::Text, |e| TextEntity::from_dxftype(&e.dxftype))
    }

    fn tag(&mut self, handle: S::Handle) {
        let tag = EntityTag::from_stack(&self.entity_stack);
        self.scene.set_tag(handle, tag);
    }

    fn begin_draw(&mut self) -> Result<()> {
        match self.state {
            SceneState::Finalized => Err(RenderError::SceneFinalized),
            SceneState::Idle | SceneState::Drawing => {
                self.state = SceneState::Drawing;
                Ok(())
            }
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    pub fn set_background(&mut self, color: &str) -> Result<()> {
        let color = self.styles.colors().resolve(color)?;
        self.scene.set_background(color);
        Ok(())
    }

    /// Point marker with radius `point_size / 2`, divided by the view scale
    /// when painted
    pub fn draw_point(&mut self, position: Point, properties: &Properties) -> Result<()> {
        self.begin_draw()?;
        let color = self.styles.colors().resolve(&properties.color)?;
        let radius = self.params.point_size * 0.5;
        let handle = self
            .scene
            .add_point(position, radius, FillStyle::Solid(color));
        self.tag(handle);
        Ok(())
    }

    pub fn draw_line(&mut self, start: Point, end: Point, properties: &Properties) -> Result<()> {
        self.begin_draw()?;
        let pen = self.styles.pen_for(properties)?;
        let handle = self.scene.add_line(start, end, pen);
        self.tag(handle);
        Ok(())
    }

    /// Open path, stroked and never filled
    pub fn draw_path(&mut self, path: &Path, properties: &Properties) -> Result<()> {
        self.begin_draw()?;
        let pen = self.styles.pen_for(properties)?;
        let handle = self.scene.add_path(path.to_outline(), pen, FillStyle::None);
        self.tag(handle);
        Ok(())
    }

    /// Filled region: `paths` are outer boundaries and drawn counter-clockwise,
    /// `holes` are drawn clockwise. Skipped entirely if hatches are hidden.
    pub fn draw_filled_paths(
        &mut self,
        paths: &[Path],
        holes: &[Path],
        properties: &Properties,
    ) -> Result<()> {
        self.begin_draw()?;
        if !self.params.show_hatch {
            return Ok(());
        }
        let mut outline = Outline::new();
        for path in paths {
            path.counter_clockwise().append_to(&mut outline);
        }
        for path in holes {
            path.clockwise().append_to(&mut outline);
        }
        let pen = self.styles.pen_for(properties)?;
        let brush = self.styles.brush_for(properties)?;
        let handle = self.scene.add_path(outline, pen, brush);
        self.tag(handle);
        Ok(())
    }

    /// Filled polygon without outline
    pub fn draw_filled_polygon(
        &mut self,
        points: impl IntoIterator<Item = Point>,
        properties: &Properties,
    ) -> Result<()> {
        self.begin_draw()?;
        let brush = self.styles.brush_for(properties)?;
        let handle = self
            .scene
            .add_polygon(points.into_iter().collect(), LineStyle::NONE, brush);
        self.tag(handle);
        Ok(())
    }

    /// Text filled with the entity color. `transform` places the text after
    /// it has been scaled to `cap_height`; blank text draws nothing.
    pub fn draw_text(
        &mut self,
        text: &str,
        transform: &Matrix44,
        properties: &Properties,
        cap_height: f64,
    ) -> Result<()> {
        self.begin_draw()?;
        let entity = self.text_entity();
        let Some(outline) = self.text.place(
            text,
            entity,
            transform,
            cap_height,
            properties.font.as_ref(),
        )?
        else {
            return Ok(());
        };
        let color = self.styles.colors().resolve(&properties.color)?;
        let handle = self
            .scene
            .add_path(outline, LineStyle::NONE, FillStyle::Solid(color));
        self.tag(handle);
        Ok(())
    }

    // =========================================================================
    // Text measurement
    // =========================================================================

    /// Font measurements scaled to `cap_height`
    pub fn font_measurements(
        &mut self,
        cap_height: f64,
        font: Option<&FontDescriptor>,
    ) -> Result<FontMeasurements> {
        Ok(self.text.font_measurements(cap_height, font)?)
    }

    /// Width of a single text line at `cap_height`, 0 for blank text
    pub fn measure_line_width(
        &mut self,
        text: &str,
        cap_height: f64,
        font: Option<&FontDescriptor>,
    ) -> Result<f64> {
        let entity = self.text_entity();
        Ok(self
            .text
            .measure_line_width(text, entity, cap_height, font)?)
    }

    // =========================================================================
    // Scene lifecycle
    // =========================================================================

    /// Empty the scene and start a new one
    pub fn clear(&mut self) {
        tracing::debug!("Clearing scene (state {:?})", self.state);
        self.scene.clear();
        self.state = SceneState::Drawing;
    }

    /// Fix the scene bounds to its content. With `debug_draw_rect` the bounds
    /// are outlined by one extra untagged primitive.
    pub fn finalize(&mut self) -> Result<()> {
        if self.state == SceneState::Finalized {
            return Err(RenderError::SceneFinalized);
        }
        let bounds = self.scene.compute_and_set_bounds();
        tracing::debug!("Scene finalized with bounds {:?}", bounds);
        if self.params.debug_draw_rect {
            let pen = self.styles.pen_for(&Properties::with_color("#000000"))?;
            self.scene
                .add_path(Outline::rect(bounds), pen, FillStyle::None);
        }
        self.state = SceneState::Finalized;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Primitive, RecordingScene};
    use cadraw_text::BlockOutlineSource;

    fn backend(params: BackendParams) -> RenderingBackend<RecordingScene, BlockOutlineSource> {
        RenderingBackend::with_outline_source(
            RecordingScene::new(),
            params,
            BlockOutlineSource::default(),
        )
    }

    #[test]
    fn test_lifecycle() {
        let mut backend = backend(BackendParams::default());
        let props = Properties::default();
        assert_eq!(backend.state(), SceneState::Idle);
        backend
            .draw_line(Point::ZERO, Point::new(1.0, 0.0), &props)
            .unwrap();
        assert_eq!(backend.state(), SceneState::Drawing);
        backend.finalize().unwrap();
        assert_eq!(backend.state(), SceneState::Finalized);

        assert!(matches!(
            backend.draw_point(Point::ZERO, &props),
            Err(RenderError::SceneFinalized)
        ));
        assert!(matches!(backend.finalize(), Err(RenderError::SceneFinalized)));
        assert_eq!(backend.scene().len(), 1);

        backend.clear();
        assert_eq!(backend.state(), SceneState::Drawing);
        assert!(backend.scene().is_empty());
        backend.draw_point(Point::ZERO, &props).unwrap();
        assert_eq!(backend.scene().len(), 1);
    }

    #[test]
    fn test_set_scene_returns_previous() {
        let mut backend = backend(BackendParams::default());
        backend
            .draw_point(Point::ZERO, &Properties::default())
            .unwrap();
        backend.finalize().unwrap();
        let old = backend.set_scene(RecordingScene::new());
        assert_eq!(old.len(), 1);
        assert!(backend.scene().is_empty());
        assert_eq!(backend.state(), SceneState::Idle);
    }

    #[test]
    fn test_point_radius_from_point_size() {
        let params = BackendParams {
            point_size: 3.0,
            ..Default::default()
        };
        let mut backend = backend(params);
        backend
            .draw_point(Point::new(1.0, 2.0), &Properties::with_color("#00ff00"))
            .unwrap();
        match &backend.scene().primitives()[0].primitive {
            Primitive::Point { radius, fill, .. } => {
                assert_eq!(*radius, 1.5);
                assert_eq!(fill.color().map(|c| c.to_rgba8()), Some([0, 255, 0, 255]));
            }
            other => panic!("expected point, got {other:?}"),
        }
    }

    #[test]
    fn test_text_entity_selects_normalization() {
        let mut backend = backend(BackendParams::default());
        // "A\tB": the tab becomes one '?' for TEXT and eight spaces for MTEXT
        let text_width = backend.measure_line_width("A\tB", 1.0, None).unwrap();
        backend.enter_entity(EntityRef::new("10", "MTEXT"));
        let mtext_width = backend.measure_line_width("A\tB", 1.0, None).unwrap();
        assert!((text_width - 1.7).abs() < 1e-12);
        assert!((mtext_width - 5.9).abs() < 1e-12);
    }

    #[test]
    fn test_bad_color_propagates() {
        let mut backend = backend(BackendParams::default());
        let err = backend
            .draw_line(Point::ZERO, Point::new(1.0, 0.0), &Properties::with_color("#12"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Paint(_)));
        assert!(backend.set_background("#123").is_err());
        backend.set_background("#202020").unwrap();
        assert_eq!(
            backend.scene().background().map(|c| c.to_rgba8()),
            Some([32, 32, 32, 255])
        );
    }
}
