//! Handle definitions for selected elements.

use crate::elements::DesignElement;
use kurbo::Point;

/// Radius of the delete handle in canvas pixels.
pub const DELETE_HANDLE_RADIUS: f64 = 10.0;

/// A manipulation handle on a selected element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Center in canvas coordinates.
    pub position: Point,
    /// Hit and draw radius.
    pub radius: f64,
}

/// The kind of handle - determines what a press on it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Removes the element.
    Delete,
}

impl Handle {
    /// Create a new handle.
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self {
            kind,
            position,
            radius: DELETE_HANDLE_RADIUS,
        }
    }

    /// Check if a canvas point hits this handle.
    pub fn hit_test(&self, point: Point) -> bool {
        (point - self.position).hypot() <= self.radius
    }
}

/// Handles shown on a selected element. The delete handle sits on the
/// rotated top-right corner.
pub fn element_handles(element: &DesignElement) -> Vec<Handle> {
    let [_, top_right, _, _] = element.corners();
    vec![Handle::new(HandleKind::Delete, top_right)]
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(element: &DesignElement, point: Point) -> Option<HandleKind> {
    element_handles(element)
        .into_iter()
        .find(|handle| handle.hit_test(point))
        .map(|handle| handle.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_handle_on_top_right() {
        let text = DesignElement::text("Hi");
        let handles = element_handles(&text);
        assert_eq!(handles.len(), 1);
        assert!((handles[0].position - Point::new(250.0, 50.0)).hypot() < 1e-9);

        assert_eq!(hit_test_handles(&text, Point::new(252.0, 48.0)), Some(HandleKind::Delete));
        assert_eq!(hit_test_handles(&text, Point::new(150.0, 75.0)), None);
    }

    #[test]
    fn test_delete_handle_follows_rotation() {
        let mut text = DesignElement::text("Hi");
        text.rotation = 180.0;
        // Half a turn puts the top-right corner on the bottom-left.
        let handle = element_handles(&text)[0];
        assert!((handle.position - Point::new(50.0, 100.0)).hypot() < 1e-9);
    }
}
