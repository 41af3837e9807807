//! Button components: primary actions and navigation links.

use egui::{Align2, Color32, CornerRadius, CursorIcon, Sense, Ui, vec2};

use crate::{sizing, theme};

/// A filled call-to-action button.
pub struct PrimaryButton<'a> {
    label: &'a str,
    enabled: bool,
    danger: bool,
    full_width: bool,
}

impl<'a> PrimaryButton<'a> {
    /// Create a new primary button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
            danger: false,
            full_width: false,
        }
    }

    /// Grey out the button and ignore clicks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Use the destructive color.
    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    /// Stretch to the available width.
    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    /// Show the button and return true if clicked while enabled.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(14.0);
        let galley = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
        let width = if self.full_width {
            ui.available_width()
        } else {
            galley.size().x + 32.0
        };
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(vec2(width, sizing::BUTTON_HEIGHT), sense);

        if ui.is_rect_visible(rect) {
            let bg = match (self.enabled, self.danger, response.hovered()) {
                (false, _, _) => Color32::from_gray(210),
                (true, true, _) => theme::DANGER,
                (true, false, true) => theme::ACCENT_HOVER,
                (true, false, false) => theme::ACCENT,
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg);
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, Color32::WHITE);
        }

        if !self.enabled {
            return false;
        }
        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A plain text link, used for page navigation.
pub struct TextButton<'a> {
    label: &'a str,
    active: bool,
}

impl<'a> TextButton<'a> {
    /// Create a new text button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            active: false,
        }
    }

    /// Highlight as the current section.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(14.0);
        let galley = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
        let size = vec2(galley.size().x + 16.0, 28.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let color = if self.active || response.hovered() {
                theme::ACCENT
            } else {
                theme::TEXT
            };
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, color);
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
