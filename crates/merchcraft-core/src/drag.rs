//! Drop placement for dragged elements.

use kurbo::{Point, Rect};

/// Extent reserved at the far edges when clamping a drop, regardless of
/// the dragged element's real size.
pub const DRAG_EXTENT: f64 = 50.0;

/// Convert a pointer position in window coordinates into an element
/// position relative to the canvas, keeping it inside the canvas.
///
/// Each axis is clamped to `[0, dimension - DRAG_EXTENT]`. A canvas
/// smaller than the extent pins the axis to 0.
pub fn clamp_drop(pointer: Point, canvas: Rect) -> Point {
    let local = pointer - canvas.origin();
    let max_x = (canvas.width() - DRAG_EXTENT).max(0.0);
    let max_y = (canvas.height() - DRAG_EXTENT).max(0.0);
    Point::new(local.x.clamp(0.0, max_x), local.y.clamp(0.0, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::new(100.0, 20.0, 740.0, 404.0)
    }

    #[test]
    fn test_drop_inside() {
        assert_eq!(clamp_drop(Point::new(300.0, 220.0), canvas()), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_drop_clamped_to_edges() {
        assert_eq!(clamp_drop(Point::new(0.0, 0.0), canvas()), Point::ZERO);
        assert_eq!(
            clamp_drop(Point::new(2000.0, 2000.0), canvas()),
            Point::new(590.0, 334.0)
        );
    }

    #[test]
    fn test_tiny_canvas() {
        let tiny = Rect::new(0.0, 0.0, 30.0, 30.0);
        assert_eq!(clamp_drop(Point::new(25.0, 25.0), tiny), Point::ZERO);
    }
}
