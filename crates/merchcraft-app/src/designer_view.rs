//! Product designer dialog: preview canvas and controls panel.

use egui::{
    Align, Align2, Color32, CursorIcon, Id, Key, Layout, Pos2, RichText, Sense, Stroke, TextEdit,
    Ui, Vec2,
};
use kurbo::{Point, Rect};
use merchcraft_core::elements::{
    ImagePayload, MAX_EXTENT, MAX_ROTATION, MIN_EXTENT, MIN_ROTATION, TextBlock, TextColor,
};
use merchcraft_core::pricing::{IMAGE_SURCHARGE, TEXT_SURCHARGE};
use merchcraft_core::upload::{UPLOAD_GUIDANCE_BYTES, UploadResult};
use merchcraft_core::{
    ElementId, ElementPatch, HandleKind, ProductColor, ProductKind, SceneController, UploadLimits,
    UploadTicket, WidgetState, format_price,
};
use merchcraft_render::{DragPreview, EguiRenderer, RenderContext, Renderer, TextureCache, to_color32};
use merchcraft_widgets::{
    PrimaryButton, card_frame, dialog_frame, labeled_slider, notice_banner,
    price_badge, section_label, swatch_row, theme,
};

use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use crate::ui::UiAction;

/// Pointer travel (in points) below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

/// Width of the controls column.
const CONTROLS_WIDTH: f32 = 280.0;

/// What a pointer press on the canvas landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The delete affordance of the selected element.
    DeleteHandle(ElementId),
    /// The topmost element under the pointer.
    Element(ElementId),
    /// Bare canvas.
    Empty,
}

/// Find what a press at a canvas point hits. The delete handle wins over
/// elements since it overlaps their corner.
pub fn route_press(controller: &SceneController, point: Point) -> PointerTarget {
    let on_handle = controller.handle_at(point) == Some(HandleKind::Delete);
    if let Some(id) = controller.selected_id().filter(|_| on_handle) {
        return PointerTarget::DeleteHandle(id);
    }
    match controller.element_at(point) {
        Some(id) => PointerTarget::Element(id),
        None => PointerTarget::Empty,
    }
}

/// A press that started on an element and has not been released yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// Element the press landed on.
    pub element: ElementId,
    /// Press position in window coordinates.
    pub origin: Point,
    /// Latest pointer position in window coordinates.
    pub pointer: Point,
    /// Whether the pointer left the click slop.
    pub moved: bool,
}

impl Gesture {
    fn new(element: ElementId, origin: Point) -> Self {
        Self {
            element,
            origin,
            pointer: origin,
            moved: false,
        }
    }

    fn track(&mut self, pointer: Point) {
        self.pointer = pointer;
        if (pointer - self.origin).hypot() > CLICK_SLOP {
            self.moved = true;
        }
    }
}

/// One open designer dialog.
pub struct DesignerDialog {
    controller: SceneController,
    textures: TextureCache,
    gesture: Option<Gesture>,
    notices: Vec<String>,
    uploads_in_flight: usize,
}

impl DesignerDialog {
    /// Open a fresh, empty designer.
    pub fn open(kind: ProductKind) -> Self {
        Self {
            controller: SceneController::new(kind),
            textures: TextureCache::new(),
            gesture: None,
            notices: Vec::new(),
            uploads_in_flight: 0,
        }
    }

    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SceneController {
        &mut self.controller
    }

    pub fn gesture(&self) -> Option<Gesture> {
        self.gesture
    }

    /// Tear down before the dialog is dropped. Uploads still in flight
    /// will be discarded when they arrive.
    pub fn close(&mut self) {
        self.controller.unmount();
        self.textures.clear();
        self.gesture = None;
    }

    // --- Pointer routing ---

    /// Handle a primary press at `local` (canvas coordinates).
    pub fn press(&mut self, local: Point, window: Point) -> PointerTarget {
        let target = route_press(&self.controller, local);
        match target {
            PointerTarget::DeleteHandle(id) => {
                self.controller.delete_element(id);
            }
            PointerTarget::Element(id) => {
                self.controller.select(id);
                self.controller.begin_drag(id);
                self.gesture = Some(Gesture::new(id, window));
            }
            PointerTarget::Empty => self.controller.clear_selection(),
        }
        target
    }

    /// Follow the pointer while a press is held.
    pub fn pointer_moved(&mut self, window: Point) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.track(window);
        }
    }

    /// Handle the primary release. A drag drops the element of the
    /// gesture; a click leaves it where it was.
    pub fn release(&mut self, window: Point, canvas_rect: Rect) -> bool {
        let Some(mut gesture) = self.gesture.take() else {
            return false;
        };
        gesture.track(window);
        if gesture.moved {
            self.controller.end_drag(gesture.element, window, canvas_rect)
        } else {
            self.controller.cancel_drag();
            false
        }
    }

    /// Apply a keyboard shortcut. Returns true if the dialog should close.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::DeleteSelected => {
                if let Some(id) = self.controller.selected_id() {
                    self.controller.delete_element(id);
                }
                false
            }
            ShortcutAction::Dismiss => {
                if self.controller.selected_id().is_some() {
                    self.controller.clear_selection();
                    false
                } else {
                    true
                }
            }
        }
    }

    // --- Uploads ---

    /// Reserve a ticket for a file about to be read.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.uploads_in_flight += 1;
        self.controller.begin_upload()
    }

    /// Deliver a finished upload.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: UploadResult<ImagePayload>,
    ) -> Option<ElementId> {
        if ticket.instance() == self.controller.instance_id() {
            self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
        }
        self.controller.complete_upload(ticket, result)
    }

    pub fn upload_limits(&self) -> UploadLimits {
        self.controller.config().upload_limits
    }

    // --- Drawing ---

    /// Show the dialog. Pushes `CloseDesigner` when the user dismisses it.
    pub fn show(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let mut close = false;
        let kind = self.controller.product().kind();
        let canvas_width = self.controller.config().canvas_size.width as f32;

        // Semi-transparent backdrop
        let screen_rect = ctx.input(|i| i.content_rect());
        egui::Area::new(Id::new("designer_backdrop"))
            .fixed_pos(Pos2::ZERO)
            .order(egui::Order::Middle)
            .interactable(true)
            .show(ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(screen_rect.size(), Sense::click());
                ui.painter().rect_filled(rect, 0.0, Color32::from_black_alpha(100));
                close |= response.clicked();
            });

        egui::Area::new(Id::new("designer_dialog"))
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .order(egui::Order::Foreground)
            .interactable(true)
            .show(ctx, |ui| {
                dialog_frame().show(ui, |ui| {
                    ui.set_width(canvas_width + CONTROLS_WIDTH + 48.0);
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{} designer", kind.display_name()))
                                .size(22.0)
                                .strong()
                                .color(theme::TEXT),
                        );
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            close |= ui.button("✕").on_hover_text("Close").clicked();
                        });
                    });
                    ui.add_space(12.0);

                    self.show_notices(ui);

                    ui.horizontal_top(|ui| {
                        card_frame().show(ui, |ui| {
                            section_label(ui, "Preview");
                            ui.add_space(6.0);
                            self.show_canvas(ui);
                        });
                        ui.add_space(16.0);
                        ui.vertical(|ui| {
                            ui.set_width(CONTROLS_WIDTH);
                            egui::ScrollArea::vertical()
                                .max_height(560.0)
                                .show(ui, |ui| self.show_controls(ui, actions));
                        });
                    });
                });
            });

        let shortcut = if ctx.wants_keyboard_input() {
            None
        } else {
            ctx.input(ShortcutRegistry::pressed)
        };
        if let Some(action) = shortcut {
            close |= self.apply_shortcut(action);
        }
        if close {
            actions.push(UiAction::CloseDesigner);
        }
    }

    fn show_notices(&mut self, ui: &mut Ui) {
        self.notices
            .extend(self.controller.take_notices().iter().map(ToString::to_string));
        let mut dismissed = None;
        for (index, notice) in self.notices.iter().enumerate() {
            if notice_banner(ui, notice) {
                dismissed = Some(index);
            }
            ui.add_space(8.0);
        }
        if let Some(index) = dismissed {
            self.notices.remove(index);
        }
    }

    fn show_canvas(&mut self, ui: &mut Ui) {
        let size = self.controller.config().canvas_size;
        let (response, painter) = ui.allocate_painter(
            egui::vec2(size.width as f32, size.height as f32),
            Sense::click_and_drag(),
        );
        let rect = response.rect;
        let canvas_rect = Rect::new(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.max.x as f64,
            rect.max.y as f64,
        );

        let (pressed, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        match pointer {
            Some(pos) => {
                let window = Point::new(pos.x as f64, pos.y as f64);
                let local = window - canvas_rect.origin().to_vec2();
                if pressed && response.hovered() {
                    self.press(local, window);
                }
                self.pointer_moved(window);
                if released {
                    self.release(window, canvas_rect);
                }
                self.controller.hover(response.hovered().then_some(local));
            }
            None => self.controller.hover(None),
        }

        // Dashed drop-zone border
        let border = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        painter.extend(egui::Shape::dashed_line(
            &border,
            Stroke::new(2.0, Color32::from_gray(209)),
            8.0,
            5.0,
        ));

        let preview = self
            .gesture
            .filter(|gesture| gesture.moved)
            .map(|gesture| DragPreview {
                element: gesture.element,
                pointer: gesture.pointer,
            });
        self.textures.retain(&self.controller.scene().ids());

        let render_ctx = RenderContext::new(&self.controller, canvas_rect)
            .with_empty_hint("Upload an image or add text to start")
            .with_drag_preview(preview);
        let mut renderer = EguiRenderer::new(&painter, &mut self.textures);
        if let Err(err) = renderer.build_scene(&render_ctx) {
            log::warn!("Skipping designer frame: {err}");
        }

        if self.gesture.is_some_and(|gesture| gesture.moved) {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if self.controller.scene().iter().any(|e| {
            self.controller.widget_state(e.id()) == WidgetState::Hovered
        }) {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }
    }

    fn show_controls(&mut self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            self.show_product_settings(ui);
        });
        ui.add_space(12.0);

        card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            self.show_add_elements(ui, actions);
        });
        ui.add_space(12.0);

        if self.controller.selected_id().is_some() {
            card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                self.show_element_controls(ui);
            });
            ui.add_space(12.0);
        }

        card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            self.show_price(ui, actions);
        });
    }

    fn show_product_settings(&mut self, ui: &mut Ui) {
        let product = *self.controller.product();
        ui.label(RichText::new("Product settings").strong().color(theme::TEXT));
        ui.add_space(8.0);

        section_label(ui, "Size");
        let mut chosen = None;
        egui::ComboBox::from_id_salt(("product_size", self.controller.instance_id()))
            .selected_text(product.size().display_name())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for &size in product.kind().sizes() {
                    if ui
                        .selectable_label(product.size() == size, size.display_name())
                        .clicked()
                    {
                        chosen = Some(size);
                    }
                }
            });
        if let Some(size) = chosen {
            if let Err(err) = self.controller.set_product_size(size) {
                self.notices.push(err.to_string());
            }
        }
        ui.add_space(8.0);

        section_label(ui, "Color");
        let options: Vec<(Color32, &str)> = ProductColor::ALL
            .iter()
            .map(|color| (to_color32(color.fill()), color.key()))
            .collect();
        let selected = ProductColor::ALL.iter().position(|c| *c == product.color());
        if let Some(index) = swatch_row(ui, &options, selected) {
            self.controller.set_product_color(ProductColor::ALL[index]);
        }
    }

    fn show_add_elements(&mut self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        ui.label(RichText::new("Add elements").strong().color(theme::TEXT));
        ui.add_space(8.0);

        section_label(ui, "Image");
        let uploading = self.uploads_in_flight > 0;
        let label = if uploading { "Uploading..." } else { "Upload image" };
        if PrimaryButton::new(label).full_width().enabled(!uploading).show(ui) {
            actions.push(UiAction::PickImage);
        }
        ui.label(
            RichText::new(format!(
                "PNG, JPEG, GIF, WebP or BMP up to {} MB",
                UPLOAD_GUIDANCE_BYTES / (1024 * 1024)
            ))
            .size(11.0)
            .color(theme::TEXT_MUTED),
        );
        ui.add_space(8.0);

        section_label(ui, "Text");
        let mut text = self.controller.text_input().to_owned();
        let response = ui.add(
            TextEdit::singleline(&mut text)
                .hint_text("Enter text")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.controller.set_text_input(text);
        }
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        ui.add_space(4.0);
        let clicked = PrimaryButton::new("Add text")
            .full_width()
            .enabled(self.controller.can_add_text())
            .show(ui);
        if clicked || submitted {
            self.controller.add_text();
        }
    }

    fn show_element_controls(&mut self, ui: &mut Ui) {
        let Some(element) = self.controller.selected_element() else {
            return;
        };
        let id = element.id();
        let kind = element.kind();
        let mut extent = element.size.width;
        let mut rotation = element.rotation;
        let text = element.as_text().cloned();

        ui.label(
            RichText::new(format!("{} settings", kind.display_name()))
                .strong()
                .color(theme::TEXT),
        );
        ui.add_space(8.0);

        if labeled_slider(ui, "Size", &mut extent, MIN_EXTENT..=MAX_EXTENT, " px") {
            self.controller
                .update_element(id, &ElementPatch::default().with_uniform_size(extent));
        }
        if labeled_slider(ui, "Rotation", &mut rotation, MIN_ROTATION..=MAX_ROTATION, "°") {
            self.controller
                .update_element(id, &ElementPatch::default().with_rotation(rotation));
        }

        if let Some(block) = text {
            self.show_text_controls(ui, id, &block);
        }

        ui.add_space(8.0);
        if PrimaryButton::new("Delete element").danger().full_width().show(ui) {
            self.controller.delete_element(id);
        }
    }

    fn show_text_controls(&mut self, ui: &mut Ui, id: ElementId, block: &TextBlock) {
        section_label(ui, "Text color");
        let mut rgb = [block.color.r, block.color.g, block.color.b];
        ui.horizontal(|ui| {
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                let color = TextColor::new(rgb[0], rgb[1], rgb[2]);
                self.controller
                    .update_element(id, &ElementPatch::default().with_color(color));
            }
            ui.label(RichText::new(block.color.to_hex()).monospace().color(theme::TEXT_MUTED));
        });
        ui.add_space(4.0);

        let mut font_size = block.font_size;
        if labeled_slider(
            ui,
            "Font size",
            &mut font_size,
            TextBlock::MIN_FONT_SIZE..=TextBlock::MAX_FONT_SIZE,
            " px",
        ) {
            self.controller
                .update_element(id, &ElementPatch::default().with_font_size(font_size));
        }
    }

    fn show_price(&mut self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        let summary = self.controller.design_summary();
        ui.horizontal(|ui| {
            ui.label(RichText::new("Price").strong().color(theme::TEXT));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                price_badge(ui, &format_price(self.controller.price()));
            });
        });
        ui.add_space(6.0);

        let muted = |text: String| RichText::new(text).size(12.0).color(theme::TEXT_MUTED);
        ui.label(muted(format!(
            "{} ({}): {}",
            summary.product.display_name(),
            summary.size.display_name(),
            format_price(summary.product.base_price())
        )));
        if summary.images > 0 {
            ui.label(muted(format!(
                "Images: {} × {}",
                summary.images,
                format_price(IMAGE_SURCHARGE)
            )));
        }
        if summary.texts > 0 {
            ui.label(muted(format!(
                "Text: {} × {}",
                summary.texts,
                format_price(TEXT_SURCHARGE)
            )));
        }
        ui.add_space(8.0);

        if PrimaryButton::new("Add to cart").full_width().show(ui) {
            actions.push(UiAction::AddToCart(summary));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use merchcraft_core::UploadError;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn canvas_rect() -> Rect {
        Rect::from_origin_size(Point::new(100.0, 100.0), Size::new(640.0, 384.0))
    }

    fn window(local: Point) -> Point {
        local + canvas_rect().origin().to_vec2()
    }

    #[test]
    fn test_route_press() {
        let mut dialog = DesignerDialog::open(ProductKind::Mug);
        let text = dialog.controller_mut().add_text_str("Hi").unwrap();
        assert_eq!(route_press(dialog.controller(), Point::new(60.0, 60.0)), PointerTarget::Element(text));
        assert_eq!(route_press(dialog.controller(), Point::new(400.0, 300.0)), PointerTarget::Empty);

        // The handle only exists once the element is selected.
        assert_eq!(route_press(dialog.controller(), Point::new(255.0, 45.0)), PointerTarget::Empty);
        dialog.controller_mut().select(text);
        assert_eq!(
            route_press(dialog.controller(), Point::new(255.0, 45.0)),
            PointerTarget::DeleteHandle(text)
        );
    }

    #[test]
    fn test_press_selects_and_click_does_not_move() {
        let mut dialog = DesignerDialog::open(ProductKind::Mug);
        let text = dialog.controller_mut().add_text_str("Hi").unwrap();

        let local = Point::new(60.0, 60.0);
        assert_eq!(dialog.press(local, window(local)), PointerTarget::Element(text));
        assert_eq!(dialog.controller().selected_id(), Some(text));
        assert_eq!(dialog.controller().dragged_id(), Some(text));

        assert!(!dialog.release(window(Point::new(61.0, 61.0)), canvas_rect()));
        assert_eq!(dialog.controller().dragged_id(), None);
        let element = dialog.controller().scene().get(text).unwrap();
        assert_eq!(element.position, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_drag_drops_at_pointer() {
        let mut dialog = DesignerDialog::open(ProductKind::Mug);
        let text = dialog.controller_mut().add_text_str("Hi").unwrap();

        let local = Point::new(60.0, 60.0);
        dialog.press(local, window(local));
        dialog.pointer_moved(window(Point::new(200.0, 150.0)));
        assert!(dialog.gesture().unwrap().moved);
        assert!(dialog.release(window(Point::new(300.0, 200.0)), canvas_rect()));

        let element = dialog.controller().scene().get(text).unwrap();
        assert_eq!(element.position, Point::new(300.0, 200.0));
        assert_eq!(dialog.gesture(), None);
    }

    #[test]
    fn test_press_on_empty_clears_selection() {
        let mut dialog = DesignerDialog::open(ProductKind::TShirt);
        let text = dialog.controller_mut().add_text_str("Hi").unwrap();
        dialog.controller_mut().select(text);

        let local = Point::new(500.0, 300.0);
        assert_eq!(dialog.press(local, window(local)), PointerTarget::Empty);
        assert_eq!(dialog.controller().selected_id(), None);
        assert!(!dialog.release(window(local), canvas_rect()));
    }

    #[test]
    fn test_press_on_delete_handle() {
        let mut dialog = DesignerDialog::open(ProductKind::Mug);
        let text = dialog.controller_mut().add_text_str("Hi").unwrap();
        dialog.controller_mut().select(text);

        let local = Point::new(250.0, 50.0);
        assert_eq!(dialog.press(local, window(local)), PointerTarget::DeleteHandle(text));
        assert!(dialog.controller().scene().is_empty());
        assert_eq!(dialog.controller().price(), 350);
        assert_eq!(dialog.gesture(), None);
    }

    #[test]
    fn test_shortcuts() {
        let mut dialog = DesignerDialog::open(ProductKind::Mug);
        let text = dialog.controller_mut().add_text_str("Hi").unwrap();

        dialog.controller_mut().select(text);
        assert!(!dialog.apply_shortcut(ShortcutAction::Dismiss));
        assert_eq!(dialog.controller().selected_id(), None);
        assert!(dialog.apply_shortcut(ShortcutAction::Dismiss));

        // Delete without a selection does nothing.
        assert!(!dialog.apply_shortcut(ShortcutAction::DeleteSelected));
        assert_eq!(dialog.controller().scene().len(), 1);

        dialog.controller_mut().select(text);
        assert!(!dialog.apply_shortcut(ShortcutAction::DeleteSelected));
        assert!(dialog.controller().scene().is_empty());
    }

    #[test]
    fn test_uploads() {
        let mut dialog = DesignerDialog::open(ProductKind::Mug);
        let ticket = dialog.begin_upload();
        assert_eq!(dialog.uploads_in_flight, 1);

        let payload = ImagePayload::from_bytes(&PNG_MAGIC).unwrap();
        assert!(dialog.finish_upload(ticket, Ok(payload)).is_some());
        assert_eq!(dialog.uploads_in_flight, 0);
        assert_eq!(dialog.controller().price(), 400);

        let failed = dialog.begin_upload();
        assert!(dialog.finish_upload(failed, Err(UploadError::UnsupportedFormat)).is_none());
        assert_eq!(dialog.controller().notices().len(), 1);
    }

    #[test]
    fn test_upload_after_close_discarded() {
        let mut dialog = DesignerDialog::open(ProductKind::Mug);
        let ticket = dialog.begin_upload();
        dialog.close();

        let payload = ImagePayload::from_bytes(&PNG_MAGIC).unwrap();
        assert!(dialog.finish_upload(ticket, Ok(payload)).is_none());
        assert!(dialog.controller().scene().is_empty());
    }
}
