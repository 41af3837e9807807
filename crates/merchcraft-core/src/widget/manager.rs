//! Widget manager for tracking UI state of elements.

use super::state::WidgetState;
use crate::elements::ElementId;

/// Tracks selection, drag and hover for one designer instance.
///
/// Elements remain pure data; this holds the interaction state around
/// them. At most one element is selected and at most one is mid-drag.
#[derive(Debug, Clone, Default)]
pub struct WidgetManager {
    /// Currently selected element.
    selected: Option<ElementId>,
    /// Element a drag gesture began on.
    dragged: Option<ElementId>,
    /// Element currently under the pointer.
    hovered: Option<ElementId>,
}

impl WidgetManager {
    /// Create a new widget manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state of an element.
    pub fn state(&self, id: ElementId) -> WidgetState {
        if self.dragged == Some(id) && self.selected == Some(id) {
            WidgetState::Dragging
        } else if self.selected == Some(id) {
            WidgetState::Selected
        } else if self.hovered == Some(id) {
            WidgetState::Hovered
        } else {
            WidgetState::Normal
        }
    }

    /// Select a single element, replacing any previous selection.
    pub fn select(&mut self, id: ElementId) {
        self.selected = Some(id);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Get the selected element ID (if any).
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Check if an element is selected.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Record the element a drag gesture began on.
    pub fn begin_drag(&mut self, id: ElementId) {
        self.dragged = Some(id);
    }

    /// Finish the drag if it belongs to `id`. Returns false for a stale
    /// release that does not match the tracked drag.
    pub fn end_drag(&mut self, id: ElementId) -> bool {
        if self.dragged == Some(id) {
            self.dragged = None;
            true
        } else {
            false
        }
    }

    /// Abandon the current drag without a drop.
    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// Get the element being dragged (if any).
    pub fn dragged(&self) -> Option<ElementId> {
        self.dragged
    }

    /// Get the hovered element ID (if any).
    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Set the hovered element.
    pub fn set_hovered(&mut self, id: Option<ElementId>) {
        self.hovered = id;
    }

    /// Remove state for a deleted element.
    pub fn remove(&mut self, id: ElementId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.dragged == Some(id) {
            self.dragged = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_single_selection() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut widgets = WidgetManager::new();
        widgets.select(a);
        widgets.select(b);
        assert!(!widgets.is_selected(a));
        assert!(widgets.is_selected(b));
        assert_eq!(widgets.state(a), WidgetState::Normal);
        assert_eq!(widgets.state(b), WidgetState::Selected);
    }

    #[test]
    fn test_stale_drag_release() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut widgets = WidgetManager::new();
        widgets.begin_drag(a);
        assert!(!widgets.end_drag(b));
        assert_eq!(widgets.dragged(), Some(a));
        assert!(widgets.end_drag(a));
        assert_eq!(widgets.dragged(), None);
        assert!(!widgets.end_drag(a));
    }

    #[test]
    fn test_states() {
        let id = Uuid::new_v4();
        let mut widgets = WidgetManager::new();
        widgets.set_hovered(Some(id));
        assert_eq!(widgets.state(id), WidgetState::Hovered);
        widgets.select(id);
        widgets.begin_drag(id);
        assert_eq!(widgets.state(id), WidgetState::Dragging);
        assert!(widgets.state(id).is_selected());

        widgets.remove(id);
        assert_eq!(widgets.state(id), WidgetState::Normal);
        assert_eq!(widgets.selected(), None);
        assert_eq!(widgets.dragged(), None);
        assert_eq!(widgets.hovered(), None);
    }
}
