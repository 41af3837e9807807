//! Card components: frames, price badges, notice banners.

use egui::{Align2, Color32, CornerRadius, CursorIcon, Frame, Margin, RichText, Sense, Stroke, Ui, vec2};

use crate::{sizing, theme};

/// Create a standard white card frame with shadow.
pub fn card_frame() -> Frame {
    Frame::new()
        .fill(theme::CARD_BG)
        .corner_radius(CornerRadius::same(sizing::CARD_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(16))
}

/// Create a frame for modal dialogs (heavier shadow, more padding).
pub fn dialog_frame() -> Frame {
    Frame::new()
        .fill(theme::CARD_BG)
        .corner_radius(CornerRadius::same(sizing::CARD_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 24,
            offset: [0, 8],
            color: Color32::from_black_alpha(40),
        })
        .inner_margin(Margin::same(20))
}

/// Pill with an emphasized price.
pub fn price_badge(ui: &mut Ui, text: &str) {
    Frame::new()
        .fill(theme::ACCENT)
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::symmetric(12, 4))
        .show(ui, |ui| {
            ui.label(RichText::new(text).size(16.0).strong().color(Color32::WHITE));
        });
}

/// Dismissible warning strip. Returns true if the close mark was clicked.
pub fn notice_banner(ui: &mut Ui, text: &str) -> bool {
    let mut dismissed = false;
    Frame::new()
        .fill(Color32::from_rgb(254, 242, 242))
        .stroke(Stroke::new(1.0, Color32::from_rgb(254, 202, 202)))
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .inner_margin(Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(text).color(Color32::from_rgb(153, 27, 27)));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (rect, response) = ui.allocate_exact_size(vec2(16.0, 16.0), Sense::click());
                    let color = if response.hovered() {
                        theme::DANGER
                    } else {
                        theme::TEXT_MUTED
                    };
                    ui.painter().text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        "×",
                        egui::FontId::proportional(16.0),
                        color,
                    );
                    dismissed = response.on_hover_cursor(CursorIcon::PointingHand).clicked();
                });
            });
        });
    dismissed
}
