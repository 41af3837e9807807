//! Renderer trait abstraction.

use crate::display::{DisplayItem, build_display_list};
use kurbo::{Point, Rect};
use merchcraft_core::{ElementId, SceneController};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid canvas bounds: {0:?}")]
    InvalidCanvas(Rect),
    #[error("Image element {0} has no decodable data URI")]
    MissingImageData(ElementId),
    #[error("Texture decode failed: {0}")]
    TextureDecode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// An in-flight drag gesture, shown as a ghost outline at the drop spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPreview {
    /// Element the gesture began on.
    pub element: ElementId,
    /// Pointer position in window coordinates.
    pub pointer: Point,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The designer to render.
    pub controller: &'a SceneController,
    /// Canvas rectangle in window coordinates.
    pub canvas_rect: Rect,
    /// Background color behind the product.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Delete handle fill.
    pub delete_color: Color,
    /// Drag gesture in progress.
    pub drag_preview: Option<DragPreview>,
    /// Text shown while the scene is empty.
    pub empty_hint: &'a str,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(controller: &'a SceneController, canvas_rect: Rect) -> Self {
        Self {
            controller,
            canvas_rect,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            delete_color: Color::from_rgba8(239, 68, 68, 255),     // Red
            drag_preview: None,
            empty_hint: "Add an image or text",
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Set the in-flight drag gesture.
    pub fn with_drag_preview(mut self, preview: Option<DragPreview>) -> Self {
        self.drag_preview = preview;
        self
    }

    /// Set the empty-state hint.
    pub fn with_empty_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = hint;
        self
    }

    /// Check the canvas rectangle can be painted into.
    pub fn validate(&self) -> RenderResult<()> {
        let rect = self.canvas_rect;
        if !rect.is_finite() || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(RendererError::InvalidCanvas(rect));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
///
/// Backends only need to paint individual display items; ordering and
/// visibility are decided by [`build_display_list`].
pub trait Renderer {
    /// Paint one item. Coordinates are relative to the canvas origin.
    fn draw(&mut self, item: &DisplayItem<'_>, ctx: &RenderContext);

    /// Paint a whole frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        for item in build_display_list(ctx) {
            self.draw(&item, ctx);
        }
        Ok(())
    }
}
