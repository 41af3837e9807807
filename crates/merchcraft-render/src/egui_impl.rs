//! egui painter backend.

use crate::display::DisplayItem;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use egui::epaint::{Shadow, TextShape};
use egui::emath::Rot2;
use egui::{
    Align2, Color32, ColorImage, Context, CornerRadius, FontId, Mesh, Painter, Pos2, Shape,
    Stroke, StrokeKind, TextureHandle, TextureOptions, Vec2, pos2,
};
use kurbo::{Point, Rect, Size};
use merchcraft_core::elements::{ImagePayload, TextBlock};
use merchcraft_core::{DesignElement, ElementId};
use peniko::Color;
use std::collections::HashMap;

/// Convert a peniko color to egui.
pub fn to_color32(color: Color) -> Color32 {
    let c = color.to_rgba8();
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Decode an image payload into pixels egui can upload.
pub fn decode_image(id: ElementId, payload: &ImagePayload) -> RenderResult<ColorImage> {
    let raw_data = payload
        .decode_bytes()
        .ok_or(RendererError::MissingImageData(id))?;
    let decoded = ::image::load_from_memory(&raw_data)
        .map_err(|err| RendererError::TextureDecode(err.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
    ))
}

/// Uploaded textures keyed by element.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<ElementId, TextureHandle>,
    failed: HashMap<ElementId, String>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the texture of an image element, decoding it on first use.
    /// Failures are remembered so a broken file is decoded only once.
    pub fn load(
        &mut self,
        ctx: &Context,
        id: ElementId,
        payload: &ImagePayload,
    ) -> RenderResult<&TextureHandle> {
        if let Some(reason) = self.failed.get(&id) {
            return Err(RendererError::TextureDecode(reason.clone()));
        }
        if !self.textures.contains_key(&id) {
            match decode_image(id, payload) {
                Ok(image) => {
                    let texture = ctx.load_texture(format!("element-{id}"), image, TextureOptions::LINEAR);
                    log::debug!("Uploaded texture for element {id}");
                    self.textures.insert(id, texture);
                }
                Err(err) => {
                    log::warn!("Failed to decode image element {id}: {err}");
                    self.failed.insert(id, err.to_string());
                    return Err(err);
                }
            }
        }
        self.textures.get(&id).ok_or(RendererError::MissingImageData(id))
    }

    /// Drop textures of elements that no longer exist.
    pub fn retain(&mut self, live: &[ElementId]) {
        self.textures.retain(|id, _| live.contains(id));
        self.failed.retain(|id, _| live.contains(id));
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.failed.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Crop rectangle in UV space that makes an image cover a box.
pub fn cover_uv(image_size: [usize; 2], target: Size) -> egui::Rect {
    let full = egui::Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0));
    if image_size[0] == 0 || image_size[1] == 0 || target.width <= 0.0 || target.height <= 0.0 {
        return full;
    }
    let image_aspect = image_size[0] as f64 / image_size[1] as f64;
    let target_aspect = target.width / target.height;
    if image_aspect > target_aspect {
        let margin = ((1.0 - target_aspect / image_aspect) / 2.0) as f32;
        egui::Rect::from_min_max(pos2(margin, 0.0), pos2(1.0 - margin, 1.0))
    } else {
        let margin = ((1.0 - image_aspect / target_aspect) / 2.0) as f32;
        egui::Rect::from_min_max(pos2(0.0, margin), pos2(1.0, 1.0 - margin))
    }
}

/// Paints display items with an egui painter.
pub struct EguiRenderer<'a> {
    painter: &'a Painter,
    textures: &'a mut TextureCache,
}

impl<'a> EguiRenderer<'a> {
    pub fn new(painter: &'a Painter, textures: &'a mut TextureCache) -> Self {
        Self { painter, textures }
    }

    fn to_screen(ctx: &RenderContext, point: Point) -> Pos2 {
        let origin = ctx.canvas_rect.origin();
        pos2((origin.x + point.x) as f32, (origin.y + point.y) as f32)
    }

    fn to_screen_rect(ctx: &RenderContext, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            Self::to_screen(ctx, Point::new(rect.x0, rect.y0)),
            Self::to_screen(ctx, Point::new(rect.x1, rect.y1)),
        )
    }

    fn polygon(ctx: &RenderContext, corners: &[Point; 4]) -> Vec<Pos2> {
        corners.iter().map(|p| Self::to_screen(ctx, *p)).collect()
    }

    fn draw_image(&mut self, ctx: &RenderContext, element: &DesignElement, payload: &ImagePayload) {
        let texture = match self.textures.load(self.painter.ctx(), element.id(), payload) {
            Ok(texture) => texture,
            Err(err) => {
                log::trace!("Drawing placeholder for {}: {err}", element.id());
                self.draw_image_placeholder(ctx, element);
                return;
            }
        };

        let uv = cover_uv(texture.size(), element.size);
        let mut mesh = Mesh::with_texture(texture.id());
        mesh.add_rect_with_uv(Self::to_screen_rect(ctx, element.bounds()), uv, Color32::WHITE);
        let center = Self::to_screen(ctx, element.bounds().center());
        mesh.rotate(Rot2::from_angle(element.rotation.to_radians() as f32), center);
        self.painter.add(Shape::mesh(mesh));
    }

    /// Gray box with an X for images that could not be decoded.
    fn draw_image_placeholder(&self, ctx: &RenderContext, element: &DesignElement) {
        let corners = Self::polygon(ctx, &element.corners());
        self.painter.add(Shape::convex_polygon(
            corners.clone(),
            Color32::from_gray(200),
            Stroke::new(2.0, Color32::from_gray(100)),
        ));
        let stroke = Stroke::new(2.0, Color32::from_gray(150));
        self.painter.line_segment([corners[0], corners[2]], stroke);
        self.painter.line_segment([corners[1], corners[3]], stroke);
    }

    fn draw_text(&self, ctx: &RenderContext, element: &DesignElement, block: &TextBlock) {
        let color = to_color32(block.color.into());
        let galley = self.painter.layout(
            block.text.clone(),
            FontId::proportional(block.font_size as f32),
            color,
            element.size.width as f32,
        );
        let text_size = galley.size();
        // Top-left of the centered text block, in the element's local frame.
        let local = Point::new(
            (element.size.width - text_size.x as f64) / 2.0,
            (element.size.height - text_size.y as f64) / 2.0,
        );
        let anchor = Self::to_screen(ctx, element.transform() * local);
        let shape = TextShape::new(anchor, galley, color)
            .with_angle(element.rotation.to_radians() as f32);
        self.painter.add(shape);
    }
}

impl Renderer for EguiRenderer<'_> {
    fn draw(&mut self, item: &DisplayItem<'_>, ctx: &RenderContext) {
        match item {
            DisplayItem::ProductBase {
                rect,
                corner_radius,
                fill,
            } => {
                let rect = Self::to_screen_rect(ctx, *rect);
                let radius = CornerRadius::same(*corner_radius as u8);
                let shadow = Shadow {
                    spread: 0,
                    blur: 12,
                    offset: [0, 4],
                    color: Color32::from_black_alpha(25),
                };
                self.painter.add(shadow.as_shape(rect, radius));
                self.painter.rect(
                    rect,
                    radius,
                    to_color32(*fill),
                    Stroke::new(1.0, Color32::from_gray(220)),
                    StrokeKind::Inside,
                );
            }
            DisplayItem::MugHandle { rect, fill } => {
                let rect = Self::to_screen_rect(ctx, *rect);
                let radius = (rect.width() / 2.0) as u8;
                let corners = CornerRadius {
                    nw: 0,
                    ne: radius,
                    sw: 0,
                    se: radius,
                };
                self.painter.rect_filled(rect, corners, to_color32(*fill));
            }
            DisplayItem::Image { element, payload } => self.draw_image(ctx, element, payload),
            DisplayItem::Text { element, block } => self.draw_text(ctx, element, block),
            DisplayItem::SelectionOutline { corners, color } => {
                self.painter.add(Shape::closed_line(
                    Self::polygon(ctx, corners),
                    Stroke::new(2.0, to_color32(*color)),
                ));
            }
            DisplayItem::HoverOutline { corners, color } => {
                self.painter.add(Shape::closed_line(
                    Self::polygon(ctx, corners),
                    Stroke::new(1.0, to_color32(*color)),
                ));
            }
            DisplayItem::DeleteHandle { handle, color } => {
                let center = Self::to_screen(ctx, handle.position);
                let radius = handle.radius as f32;
                self.painter.circle_filled(center, radius, to_color32(*color));
                let arm = radius * 0.4;
                let stroke = Stroke::new(1.5, Color32::WHITE);
                self.painter
                    .line_segment([center + Vec2::new(-arm, -arm), center + Vec2::new(arm, arm)], stroke);
                self.painter
                    .line_segment([center + Vec2::new(arm, -arm), center + Vec2::new(-arm, arm)], stroke);
            }
            DisplayItem::DragGhost { corners, color } => {
                let mut points = Self::polygon(ctx, corners);
                points.push(points[0]);
                self.painter.extend(Shape::dashed_line(
                    &points,
                    Stroke::new(1.5, to_color32(*color)),
                    6.0,
                    4.0,
                ));
            }
            DisplayItem::EmptyHint { center, text } => {
                self.painter.text(
                    Self::to_screen(ctx, *center),
                    Align2::CENTER_CENTER,
                    *text,
                    FontId::proportional(16.0),
                    Color32::from_gray(120),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use uuid::Uuid;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = ::image::RgbaImage::from_pixel(width, height, ::image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        ::image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ::image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_image() {
        let payload = ImagePayload::from_bytes(&png_bytes(3, 2)).unwrap();
        let image = decode_image(Uuid::new_v4(), &payload).unwrap();
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels[0], Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_decode_truncated_image() {
        // Valid signature, no image data behind it.
        let payload =
            ImagePayload::from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
        assert!(matches!(
            decode_image(Uuid::new_v4(), &payload),
            Err(RendererError::TextureDecode(_))
        ));
    }

    #[test]
    fn test_texture_cache() {
        let ctx = Context::default();
        let mut cache = TextureCache::new();
        let (good, bad) = (Uuid::new_v4(), Uuid::new_v4());
        let payload = ImagePayload::from_bytes(&png_bytes(4, 4)).unwrap();
        let broken =
            ImagePayload::from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();

        assert_eq!(cache.load(&ctx, good, &payload).unwrap().size(), [4, 4]);
        assert!(cache.load(&ctx, bad, &broken).is_err());
        assert!(cache.load(&ctx, bad, &broken).is_err());
        assert_eq!(cache.len(), 1);

        cache.retain(&[bad]);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cover_uv() {
        let full = cover_uv([100, 100], Size::new(50.0, 50.0));
        assert_eq!(full, egui::Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0)));

        // 2:1 image in a square box crops a quarter off each side.
        let wide = cover_uv([200, 100], Size::new(100.0, 100.0));
        assert!((wide.min.x - 0.25).abs() < 1e-6);
        assert!((wide.max.x - 0.75).abs() < 1e-6);
        assert_eq!(wide.min.y, 0.0);

        let tall = cover_uv([100, 400], Size::new(100.0, 100.0));
        assert!((tall.min.y - 0.375).abs() < 1e-6);
        assert_eq!(tall.min.x, 0.0);
    }

    #[test]
    fn test_to_color32() {
        assert_eq!(
            to_color32(Color::from_rgba8(10, 20, 30, 255)),
            Color32::from_rgb(10, 20, 30)
        );
    }
}
