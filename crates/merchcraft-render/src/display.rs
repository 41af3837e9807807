//! Display list construction.
//!
//! Turns a designer into an ordered list of paint operations in canvas
//! coordinates. Building the list is pure so it can be checked without a
//! GPU; backends only translate each item into draw calls.

use crate::renderer::RenderContext;
use kurbo::{Point, Rect, Size};
use merchcraft_core::elements::{ImagePayload, TextBlock};
use merchcraft_core::widget::Handle;
use merchcraft_core::{DesignElement, ElementContent, ProductKind, WidgetState, clamp_drop};
use peniko::Color;

/// Gap between the canvas edge and the product blank.
pub const PRODUCT_INSET: f64 = 16.0;
/// Corner radius of the product blank.
pub const PRODUCT_CORNER_RADIUS: f64 = 8.0;
/// Size of the decorative mug handle.
pub const MUG_HANDLE_SIZE: Size = Size::new(32.0, 64.0);

/// One paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem<'a> {
    /// The product blank in its palette color.
    ProductBase {
        rect: Rect,
        corner_radius: f64,
        fill: Color,
    },
    /// Decorative handle drawn on mugs.
    MugHandle { rect: Rect, fill: Color },
    /// An uploaded picture filling the element box.
    Image {
        element: &'a DesignElement,
        payload: &'a ImagePayload,
    },
    /// Text centered and wrapped in the element box.
    Text {
        element: &'a DesignElement,
        block: &'a TextBlock,
    },
    /// Outline around the selected element.
    SelectionOutline { corners: [Point; 4], color: Color },
    /// Faint outline around the element under the pointer.
    HoverOutline { corners: [Point; 4], color: Color },
    /// Delete affordance of the selected element.
    DeleteHandle { handle: Handle, color: Color },
    /// Where a dragged element will land.
    DragGhost { corners: [Point; 4], color: Color },
    /// Placeholder message for an empty scene.
    EmptyHint { center: Point, text: &'a str },
}

impl DisplayItem<'_> {
    /// Short name for logs and tests.
    pub fn name(&self) -> &'static str {
        match self {
            DisplayItem::ProductBase { .. } => "product",
            DisplayItem::MugHandle { .. } => "mug-handle",
            DisplayItem::Image { .. } => "image",
            DisplayItem::Text { .. } => "text",
            DisplayItem::SelectionOutline { .. } => "selection",
            DisplayItem::HoverOutline { .. } => "hover",
            DisplayItem::DeleteHandle { .. } => "delete-handle",
            DisplayItem::DragGhost { .. } => "drag-ghost",
            DisplayItem::EmptyHint { .. } => "empty-hint",
        }
    }
}

/// Build the paint operations for a frame, back to front.
pub fn build_display_list<'a>(ctx: &RenderContext<'a>) -> Vec<DisplayItem<'a>> {
    let controller = ctx.controller;
    let canvas = Rect::from_origin_size(Point::ZERO, ctx.canvas_rect.size());
    let mut items = Vec::new();

    let base = canvas.inset(-PRODUCT_INSET);
    items.push(DisplayItem::ProductBase {
        rect: base,
        corner_radius: PRODUCT_CORNER_RADIUS,
        fill: controller.product().color().fill(),
    });
    if controller.product().kind() == ProductKind::Mug {
        items.push(DisplayItem::MugHandle {
            rect: Rect::from_center_size(base.center(), MUG_HANDLE_SIZE),
            fill: Color::from_rgba8(156, 163, 175, 128),
        });
    }

    for element in controller.scene().iter() {
        items.push(match &element.content {
            ElementContent::Image(payload) => DisplayItem::Image { element, payload },
            ElementContent::Text(block) => DisplayItem::Text { element, block },
        });

        match controller.widget_state(element.id()) {
            WidgetState::Selected | WidgetState::Dragging => {
                items.push(DisplayItem::SelectionOutline {
                    corners: element.corners(),
                    color: ctx.selection_color,
                });
            }
            WidgetState::Hovered => {
                items.push(DisplayItem::HoverOutline {
                    corners: element.corners(),
                    color: ctx.selection_color.with_alpha(0.5),
                });
            }
            WidgetState::Normal => {}
        }
    }

    // The handle sits above every element so it is never hidden.
    if let Some(handle) = controller.delete_handle() {
        items.push(DisplayItem::DeleteHandle {
            handle,
            color: ctx.delete_color,
        });
    }

    let dragged = ctx
        .drag_preview
        .filter(|preview| controller.dragged_id() == Some(preview.element))
        .and_then(|preview| Some((preview, controller.scene().get(preview.element)?)));
    if let Some((preview, element)) = dragged {
        let mut ghost = element.clone();
        ghost.position = clamp_drop(preview.pointer, ctx.canvas_rect);
        items.push(DisplayItem::DragGhost {
            corners: ghost.corners(),
            color: ctx.selection_color.with_alpha(0.6),
        });
    }

    if controller.scene().is_empty() {
        items.push(DisplayItem::EmptyHint {
            center: canvas.center(),
            text: ctx.empty_hint,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DragPreview;
    use merchcraft_core::{ProductColor, SceneController};

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn canvas_rect() -> Rect {
        Rect::from_origin_size(Point::new(20.0, 40.0), Size::new(640.0, 384.0))
    }

    fn names(items: &[DisplayItem<'_>]) -> Vec<&'static str> {
        items.iter().map(DisplayItem::name).collect()
    }

    #[test]
    fn test_empty_tshirt() {
        let mut controller = SceneController::new(ProductKind::TShirt);
        controller.set_product_color(ProductColor::Blue);
        let ctx = RenderContext::new(&controller, canvas_rect());
        let items = build_display_list(&ctx);
        assert_eq!(names(&items), vec!["product", "empty-hint"]);

        match &items[0] {
            DisplayItem::ProductBase { rect, fill, .. } => {
                assert_eq!(*rect, Rect::new(16.0, 16.0, 624.0, 368.0));
                assert_eq!(*fill, ProductColor::Blue.fill());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_elements_in_z_order_with_selection() {
        let mut controller = SceneController::new(ProductKind::Mug);
        let text = controller.add_text_str("Hi").unwrap();
        let image = controller.add_image(Some(&PNG_MAGIC[..])).unwrap();
        controller.select(text);

        let ctx = RenderContext::new(&controller, canvas_rect());
        let items = build_display_list(&ctx);
        assert_eq!(
            names(&items),
            vec!["product", "mug-handle", "text", "selection", "image", "delete-handle"]
        );

        match &items[4] {
            DisplayItem::Image { element, .. } => assert_eq!(element.id(), image),
            other => panic!("unexpected {other:?}"),
        }
        match &items[5] {
            DisplayItem::DeleteHandle { handle, .. } => {
                assert!((handle.position - Point::new(250.0, 50.0)).hypot() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_no_chrome_without_selection() {
        let mut controller = SceneController::new(ProductKind::TShirt);
        controller.add_text_str("Hi").unwrap();
        let ctx = RenderContext::new(&controller, canvas_rect());
        assert_eq!(names(&build_display_list(&ctx)), vec!["product", "text"]);
    }

    #[test]
    fn test_hover_outline() {
        let mut controller = SceneController::new(ProductKind::TShirt);
        controller.add_text_str("Hi").unwrap();
        controller.hover(Some(Point::new(60.0, 60.0)));
        let ctx = RenderContext::new(&controller, canvas_rect());
        assert_eq!(names(&build_display_list(&ctx)), vec!["product", "text", "hover"]);
    }

    #[test]
    fn test_drag_ghost_at_clamped_drop() {
        let mut controller = SceneController::new(ProductKind::TShirt);
        let id = controller.add_text_str("Hi").unwrap();
        controller.select(id);
        controller.begin_drag(id);

        let preview = DragPreview {
            element: id,
            pointer: Point::new(10_000.0, 140.0),
        };
        let ctx = RenderContext::new(&controller, canvas_rect()).with_drag_preview(Some(preview));
        let items = build_display_list(&ctx);
        assert_eq!(
            names(&items),
            vec!["product", "text", "selection", "delete-handle", "drag-ghost"]
        );
        match items.last() {
            Some(DisplayItem::DragGhost { corners, .. }) => {
                assert!((corners[0] - Point::new(590.0, 100.0)).hypot() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_stale_preview_ignored() {
        let mut controller = SceneController::new(ProductKind::TShirt);
        let id = controller.add_text_str("Hi").unwrap();
        let preview = DragPreview {
            element: id,
            pointer: Point::new(100.0, 100.0),
        };
        // No drag began on the element.
        let ctx = RenderContext::new(&controller, canvas_rect()).with_drag_preview(Some(preview));
        assert_eq!(names(&build_display_list(&ctx)), vec!["product", "text"]);
    }
}
