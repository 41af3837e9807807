//! Color swatch components.

use egui::{Color32, CursorIcon, Sense, Stroke, Ui, Vec2, vec2};

use crate::{sizing, theme};

/// A clickable circular color swatch.
///
/// Always drawn with a thin border so light colors stay visible on white
/// cards. Selection is shown as an inner offset ring.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
    size: Vec2,
}

impl<'a> ColorSwatch<'a> {
    /// Create a new color swatch.
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
            size: vec2(sizing::MEDIUM, sizing::MEDIUM),
        }
    }

    /// Set whether this swatch is selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Show the swatch and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let radius = rect.width().min(rect.height()) / 2.0;
            let painter = ui.painter();

            painter.circle_filled(center, radius, self.color);
            painter.circle_stroke(center, radius, Stroke::new(1.0, theme::BORDER));

            if self.selected {
                let ring = if is_dark(self.color) {
                    Color32::WHITE
                } else {
                    Color32::from_gray(30)
                };
                painter.circle_stroke(center, radius - 4.0, Stroke::new(2.0, ring));
            } else if response.hovered() {
                painter.circle_stroke(center, radius, Stroke::new(2.0, theme::ACCENT));
            }
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Show a row of swatches and return the index of a clicked one.
pub fn swatch_row(ui: &mut Ui, options: &[(Color32, &str)], selected: Option<usize>) -> Option<usize> {
    let mut clicked = None;
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        for (index, (color, label)) in options.iter().enumerate() {
            if ColorSwatch::new(*color, label)
                .selected(selected == Some(index))
                .show(ui)
            {
                clicked = Some(index);
            }
        }
    });
    clicked
}

/// Perceived brightness below the midpoint.
fn is_dark(color: Color32) -> bool {
    let luma = 0.299 * color.r() as f32 + 0.587 * color.g() as f32 + 0.114 * color.b() as f32;
    luma < 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dark() {
        assert!(is_dark(Color32::BLACK));
        assert!(is_dark(Color32::from_rgb(59, 130, 246)));
        assert!(!is_dark(Color32::WHITE));
        assert!(!is_dark(Color32::from_rgb(250, 204, 21)));
    }
}
