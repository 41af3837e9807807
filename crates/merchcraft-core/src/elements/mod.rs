//! Design elements placed on the product preview.

mod image;
mod text;

pub use image::{ACCEPTED_MIME_TYPES, ImageFormat, ImagePayload};
pub use text::{FontFamily, ParseColorError, TextBlock, TextColor};

use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for design elements.
pub type ElementId = Uuid;

/// Where new elements are dropped on the canvas.
pub const DEFAULT_POSITION: Point = Point::new(50.0, 50.0);
/// Default box of a freshly uploaded image.
pub const DEFAULT_IMAGE_SIZE: Size = Size::new(100.0, 100.0);
/// Default wrapping box of a freshly added text.
pub const DEFAULT_TEXT_SIZE: Size = Size::new(200.0, 50.0);

/// Smallest edge the size control accepts.
pub const MIN_EXTENT: f64 = 20.0;
/// Largest edge the size control accepts.
pub const MAX_EXTENT: f64 = 200.0;
/// Rotation limits in degrees.
pub const MIN_ROTATION: f64 = -180.0;
pub const MAX_ROTATION: f64 = 180.0;

/// Variant tag of an element, used for pricing and UI branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Image,
    Text,
}

impl ElementKind {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Image => "Image",
            ElementKind::Text => "Text",
        }
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementContent {
    /// An uploaded picture, kept as a data URI.
    Image(ImagePayload),
    /// A block of user-typed text.
    Text(TextBlock),
}

/// One placed item on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignElement {
    pub(crate) id: ElementId,
    /// Kind-specific content.
    pub content: ElementContent,
    /// Top-left corner, relative to the canvas origin.
    pub position: Point,
    /// Box size. Images fill it, text wraps inside it.
    pub size: Size,
    /// Rotation in degrees around the box center.
    pub rotation: f64,
}

impl DesignElement {
    /// Create an image element at the default spot.
    pub fn image(payload: ImagePayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: ElementContent::Image(payload),
            position: DEFAULT_POSITION,
            size: DEFAULT_IMAGE_SIZE,
            rotation: 0.0,
        }
    }

    /// Create a text element at the default spot.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: ElementContent::Text(TextBlock::new(text)),
            position: DEFAULT_POSITION,
            size: DEFAULT_TEXT_SIZE,
            rotation: 0.0,
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the variant tag.
    pub fn kind(&self) -> ElementKind {
        match self.content {
            ElementContent::Image(_) => ElementKind::Image,
            ElementContent::Text(_) => ElementKind::Text,
        }
    }

    /// Get the text block if this is a text element.
    pub fn as_text(&self) -> Option<&TextBlock> {
        match &self.content {
            ElementContent::Text(text) => Some(text),
            ElementContent::Image(_) => None,
        }
    }

    /// Get the image payload if this is an image element.
    pub fn as_image(&self) -> Option<&ImagePayload> {
        match &self.content {
            ElementContent::Image(image) => Some(image),
            ElementContent::Text(_) => None,
        }
    }

    /// Unrotated box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Transform from the element's local box (origin at its top-left) to
    /// canvas coordinates, rotating around the box center.
    pub fn transform(&self) -> Affine {
        let center = self.bounds().center();
        Affine::translate(center.to_vec2())
            * Affine::rotate(self.rotation.to_radians())
            * Affine::translate((-self.size.width / 2.0, -self.size.height / 2.0))
    }

    /// Rotated corners in canvas coordinates: top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let t = self.transform();
        let (w, h) = (self.size.width, self.size.height);
        [
            t * Point::new(0.0, 0.0),
            t * Point::new(w, 0.0),
            t * Point::new(w, h),
            t * Point::new(0.0, h),
        ]
    }

    /// Check if a canvas point hits the rotated box.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.transform().inverse() * point;
        Rect::from_origin_size(Point::ORIGIN, self.size)
            .inflate(tolerance, tolerance)
            .contains(local)
    }

    /// Merge a partial update into this element, clamping every value to its
    /// accepted range. Returns true if any field was written.
    pub fn apply(&mut self, patch: &ElementPatch) -> bool {
        let mut changed = false;

        if let Some(position) = patch.position.filter(|p| p.is_finite()) {
            self.position = position;
            changed = true;
        }
        if let Some(size) = patch.size.filter(|s| s.is_finite()) {
            self.size = Size::new(
                size.width.clamp(MIN_EXTENT, MAX_EXTENT),
                size.height.clamp(MIN_EXTENT, MAX_EXTENT),
            );
            changed = true;
        }
        if let Some(rotation) = patch.rotation.filter(|r| r.is_finite()) {
            self.rotation = rotation.clamp(MIN_ROTATION, MAX_ROTATION);
            changed = true;
        }

        match &mut self.content {
            ElementContent::Text(text) => {
                if let Some(color) = patch.color {
                    text.color = color;
                    changed = true;
                }
                if let Some(font_size) = patch.font_size.filter(|s| s.is_finite()) {
                    text.set_font_size(font_size);
                    changed = true;
                }
            }
            ElementContent::Image(_) => {
                if patch.color.is_some() || patch.font_size.is_some() {
                    log::debug!("Ignoring text styling sent to image element {}", self.id);
                }
            }
        }

        changed
    }
}

/// A partial update for an element. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub rotation: Option<f64>,
    pub color: Option<TextColor>,
    pub font_size: Option<f64>,
}

impl ElementPatch {
    /// Move the element.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Set width and height to the same value, as the size slider does.
    pub fn with_uniform_size(mut self, extent: f64) -> Self {
        self.size = Some(Size::new(extent, extent));
        self
    }

    /// Set the rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: TextColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the font size in pixels.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Check if the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> ImagePayload {
        ImagePayload::from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap()
    }

    #[test]
    fn test_defaults() {
        let image = DesignElement::image(sample_payload());
        assert_eq!(image.kind(), ElementKind::Image);
        assert_eq!(image.position, DEFAULT_POSITION);
        assert_eq!(image.size, Size::new(100.0, 100.0));
        assert_eq!(image.rotation, 0.0);

        let text = DesignElement::text("Hi");
        assert_eq!(text.kind(), ElementKind::Text);
        assert_eq!(text.size, Size::new(200.0, 50.0));
        let block = text.as_text().unwrap();
        assert_eq!(block.text, "Hi");
        assert_eq!(block.color, TextColor::BLACK);
        assert_eq!(block.font_size, 16.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = DesignElement::text("a");
        let b = DesignElement::text("a");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_patch_clamps_ranges() {
        let mut text = DesignElement::text("Hi");
        let patch = ElementPatch::default()
            .with_uniform_size(500.0)
            .with_rotation(-270.0)
            .with_font_size(4.0);
        assert!(text.apply(&patch));
        assert_eq!(text.size, Size::new(200.0, 200.0));
        assert_eq!(text.rotation, -180.0);
        assert_eq!(text.as_text().unwrap().font_size, 8.0);

        let patch = ElementPatch::default().with_uniform_size(1.0).with_font_size(99.0);
        text.apply(&patch);
        assert_eq!(text.size, Size::new(20.0, 20.0));
        assert_eq!(text.as_text().unwrap().font_size, 48.0);
    }

    #[test]
    fn test_patch_ignores_text_fields_on_image() {
        let mut image = DesignElement::image(sample_payload());
        let before = image.clone();
        let patch = ElementPatch::default()
            .with_color(TextColor::new(255, 0, 0))
            .with_font_size(20.0);
        assert!(!image.apply(&patch));
        assert_eq!(image, before);
    }

    #[test]
    fn test_patch_rejects_non_finite() {
        let mut text = DesignElement::text("Hi");
        let patch = ElementPatch::default().with_rotation(f64::NAN);
        assert!(!text.apply(&patch));
        assert_eq!(text.rotation, 0.0);
    }

    #[test]
    fn test_hit_test_follows_rotation() {
        let mut text = DesignElement::text("wide");
        // Box 200x50 at (50, 50), center (150, 75).
        assert!(text.hit_test(Point::new(60.0, 60.0), 0.0));
        assert!(!text.hit_test(Point::new(150.0, 140.0), 0.0));

        text.rotation = 90.0;
        // Rotated box spans x 125..175, y -25..175.
        assert!(!text.hit_test(Point::new(60.0, 60.0), 0.0));
        assert!(text.hit_test(Point::new(150.0, 140.0), 0.0));
    }

    #[test]
    fn test_corners_without_rotation() {
        let image = DesignElement::image(sample_payload());
        let corners = image.corners();
        assert!((corners[0] - Point::new(50.0, 50.0)).hypot() < 1e-9);
        assert!((corners[2] - Point::new(150.0, 150.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_empty_patch() {
        assert!(ElementPatch::default().is_empty());
        assert!(!ElementPatch::default().with_rotation(0.0).is_empty());
    }
}
