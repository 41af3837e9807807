//! Layout helpers: separators, section labels, headings, sliders.

use std::ops::RangeInclusive;

use egui::{Color32, Response, RichText, Stroke, Ui};

use crate::theme;

/// Draw a horizontal separator line.
pub fn separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let y = rect.top() + 4.0;
    ui.painter().line_segment(
        [
            egui::Pos2::new(rect.left(), y),
            egui::Pos2::new(rect.right(), y),
        ],
        Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(8.0);
}

/// Draw a section label (small, muted text).
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(12.0).color(theme::TEXT_MUTED));
}

/// Centered page section title with a muted subtitle. Returns the title
/// response so callers can scroll to it.
pub fn section_heading(ui: &mut Ui, title: &str, subtitle: &str) -> Response {
    let title = ui
        .vertical_centered(|ui| {
            let title = ui.label(RichText::new(title).size(30.0).strong().color(theme::TEXT));
            ui.add_space(4.0);
            ui.label(RichText::new(subtitle).size(15.0).color(theme::TEXT_MUTED));
            title
        })
        .inner;
    ui.add_space(24.0);
    title
}

/// Label above a full-width slider showing the current value.
/// Returns true if the value changed.
pub fn labeled_slider(
    ui: &mut Ui,
    label: &str,
    value: &mut f64,
    range: RangeInclusive<f64>,
    suffix: &str,
) -> bool {
    section_label(ui, &format!("{label}: {}{suffix}", value.round()));
    ui.spacing_mut().slider_width = ui.available_width() - 8.0;
    let response = ui.add(egui::Slider::new(value, range).show_value(false).step_by(1.0));
    response.changed()
}
