//! Widget state definitions.

/// The UI state of an element on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// Pointer is hovering over the element.
    Hovered,
    /// Element is selected (outline and delete handle shown).
    Selected,
    /// Element is selected and a drag gesture started on it.
    Dragging,
}

impl WidgetState {
    /// Check if the element shows selection chrome.
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected | Self::Dragging)
    }

    /// Check if a drag is in flight on the element.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging)
    }
}
