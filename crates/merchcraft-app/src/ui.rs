//! Storefront page: header, sections, contact form and designer dialog.

use egui::{
    Align, Align2, Color32, Context, CornerRadius, Frame, Layout, Margin, RichText, ScrollArea,
    Sense, Stroke, TextEdit, Ui, vec2,
};
use merchcraft_core::{DesignSummary, ProductKind};
use merchcraft_widgets::{
    PrimaryButton, TextButton, card_frame, section_heading, section_label, separator, theme,
};

use crate::content::{
    self, CONTACTS, GALLERY, GalleryItem, PRICE_NOTE, PRICE_TABLE, REVIEWS, Review, SERVICES,
    SHOP_NAME, Service,
};
use crate::designer_view::DesignerDialog;

/// Maximum width of the page column.
const PAGE_WIDTH: f32 = 1040.0;

/// Page sections reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Services,
    Gallery,
    Prices,
    Reviews,
    Contacts,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Services,
        Section::Gallery,
        Section::Prices,
        Section::Reviews,
        Section::Contacts,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Services => "Services",
            Section::Gallery => "Gallery",
            Section::Prices => "Prices",
            Section::Reviews => "Reviews",
            Section::Contacts => "Contacts",
        }
    }

    fn subtitle(&self) -> &'static str {
        match self {
            Section::Services => "Everything we print, copy and digitize",
            Section::Gallery => "A look at our studio and finished orders",
            Section::Prices => "Typical prices for popular services",
            Section::Reviews => "What our customers say",
            Section::Contacts => "Leave a request and we will call you back",
        }
    }
}

/// Actions that can be triggered from the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    OpenDesigner(ProductKind),
    CloseDesigner,
    PickImage,
    AddToCart(DesignSummary),
    ScrollTo(Section),
    SubmitContact,
}

/// Contact request form buffers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    /// Id of the chosen service.
    pub service: Option<&'static str>,
    pub message: String,
}

impl ContactForm {
    /// Name and phone are required.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.trim().is_empty()
    }

    fn service_title(&self) -> Option<&'static str> {
        self.service.and_then(content::service).map(|s| s.title)
    }

    /// One-line description for the log.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}) about {}: {}",
            self.name.trim(),
            self.phone.trim(),
            self.service_title().unwrap_or("no service"),
            self.message.trim()
        )
    }
}

/// UI state that persists across frames.
#[derive(Default)]
pub struct UiState {
    /// The open designer dialog, if any.
    pub designer: Option<DesignerDialog>,
    pub contact: ContactForm,
    /// Section to bring into view on the next frame.
    pub scroll_target: Option<Section>,
    /// Last section navigated to, highlighted in the header.
    pub active_section: Option<Section>,
    /// Feedback line under the contact form.
    pub contact_status: Option<String>,
}

impl UiState {
    /// Open a fresh designer, closing any dialog already open.
    pub fn open_designer(&mut self, kind: ProductKind) {
        self.close_designer();
        log::info!("Opening {} designer", kind.display_name());
        self.designer = Some(DesignerDialog::open(kind));
    }

    pub fn close_designer(&mut self) {
        if let Some(mut dialog) = self.designer.take() {
            log::info!(
                "Closing {} designer",
                dialog.controller().product().kind().display_name()
            );
            dialog.close();
        }
    }

    pub fn scroll_to(&mut self, section: Section) {
        self.scroll_target = Some(section);
        self.active_section = Some(section);
    }

    /// Submit the contact form. Nothing is sent anywhere; the request is
    /// logged and the form cleared.
    pub fn submit_contact(&mut self) -> bool {
        if !self.contact.is_complete() {
            log::warn!("Contact form submitted without name or phone");
            self.contact_status = Some("Please enter your name and phone.".to_string());
            return false;
        }
        log::info!("Contact request: {}", self.contact.describe());
        self.contact = ContactForm::default();
        self.contact_status = Some("Thank you! We will call you back soon.".to_string());
        true
    }
}

/// Render all UI and return the actions triggered this frame.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState) -> Vec<UiAction> {
    let mut actions = Vec::new();

    render_header(ctx, ui_state, &mut actions);

    egui::CentralPanel::default()
        .frame(Frame::new().fill(theme::PAGE_BG))
        .show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    page_column(ui, |ui| {
                        ui.add_space(32.0);
                        render_hero(ui, &mut actions);
                        ui.add_space(64.0);
                        render_services(ui, ui_state, &mut actions);
                        ui.add_space(48.0);
                        render_gallery(ui, ui_state);
                        ui.add_space(48.0);
                        render_prices(ui, ui_state);
                        ui.add_space(48.0);
                        render_reviews(ui, ui_state);
                        ui.add_space(48.0);
                        render_contacts(ui, ui_state, &mut actions);
                        ui.add_space(48.0);
                        render_footer(ui);
                    });
                });
        });

    if let Some(dialog) = ui_state.designer.as_mut() {
        dialog.show(ctx, &mut actions);
    }

    actions
}

/// Center a fixed-width column in the available space.
fn page_column(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    let width = PAGE_WIDTH.min(ui.available_width() - 48.0).max(0.0);
    let margin = ((ui.available_width() - width) / 2.0).max(0.0);
    ui.horizontal(|ui| {
        ui.add_space(margin);
        ui.vertical(|ui| {
            ui.set_width(width);
            add_contents(ui);
        });
    });
}

/// Section title that scrolls into view when navigated to.
fn section_start(ui: &mut Ui, ui_state: &mut UiState, section: Section) {
    let title = section_heading(ui, section.title(), section.subtitle());
    if ui_state.scroll_target == Some(section) {
        title.scroll_to_me(Some(Align::TOP));
        ui_state.scroll_target = None;
    }
}

fn render_header(ctx: &Context, ui_state: &UiState, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::top("header")
        .frame(
            Frame::new()
                .fill(theme::CARD_BG)
                .stroke(Stroke::new(1.0, theme::BORDER))
                .inner_margin(Margin::symmetric(24, 12)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(SHOP_NAME).size(20.0).strong().color(theme::ACCENT));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    for section in Section::ALL.iter().rev() {
                        let active = ui_state.active_section == Some(*section);
                        if TextButton::new(section.title()).active(active).show(ui) {
                            actions.push(UiAction::ScrollTo(*section));
                        }
                    }
                });
            });
        });
}

fn hero_button(ui: &mut Ui, label: &str, filled: bool) -> bool {
    let (fill, text) = if filled {
        (Color32::WHITE, theme::ACCENT)
    } else {
        (Color32::from_white_alpha(30), Color32::WHITE)
    };
    ui.add(
        egui::Button::new(RichText::new(label).size(16.0).strong().color(text))
            .fill(fill)
            .stroke(Stroke::new(1.0, Color32::WHITE))
            .corner_radius(CornerRadius::same(8))
            .min_size(vec2(160.0, 44.0)),
    )
    .on_hover_cursor(egui::CursorIcon::PointingHand)
    .clicked()
}

fn render_hero(ui: &mut Ui, actions: &mut Vec<UiAction>) {
    Frame::new()
        .fill(theme::ACCENT)
        .corner_radius(CornerRadius::same(16))
        .inner_margin(Margin::same(48))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new("Print on anything")
                    .size(42.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.add_space(8.0);
            ui.label(
                RichText::new(
                    "Mugs, t-shirts, photos and copies. Design your own mug or t-shirt right here.",
                )
                .size(18.0)
                .color(Color32::from_rgb(237, 233, 254)),
            );
            ui.add_space(28.0);
            ui.horizontal(|ui| {
                if hero_button(ui, "Order now", true) {
                    actions.push(UiAction::ScrollTo(Section::Contacts));
                }
                ui.add_space(8.0);
                if hero_button(ui, "Our services", false) {
                    actions.push(UiAction::ScrollTo(Section::Services));
                }
                ui.add_space(8.0);
                if hero_button(ui, "Design a mug", false) {
                    actions.push(UiAction::OpenDesigner(ProductKind::Mug));
                }
            });
        });
}

fn service_card(ui: &mut Ui, service: &Service, actions: &mut Vec<UiAction>) {
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(service.title).size(18.0).strong().color(theme::TEXT));
        ui.add_space(4.0);
        ui.label(RichText::new(service.description).color(theme::TEXT_MUTED));
        ui.add_space(8.0);
        ui.label(RichText::new(service.price).strong().color(theme::ACCENT));
        if let Some(kind) = service.designer {
            ui.add_space(8.0);
            if PrimaryButton::new("Create design").full_width().show(ui) {
                actions.push(UiAction::OpenDesigner(kind));
            }
        }
    });
    ui.add_space(16.0);
}

fn render_services(ui: &mut Ui, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    section_start(ui, ui_state, Section::Services);
    ui.columns(3, |columns| {
        for (index, service) in SERVICES.iter().enumerate() {
            service_card(&mut columns[index % 3], service, actions);
        }
    });
}

fn gallery_tile(ui: &mut Ui, item: &GalleryItem) {
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), 200.0), Sense::hover());
    let (r, g, b) = item.tint;
    let painter = ui.painter();
    painter.rect_filled(rect, CornerRadius::same(12), Color32::from_rgb(r, g, b));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        item.title,
        egui::FontId::proportional(18.0),
        theme::TEXT,
    );
}

fn render_gallery(ui: &mut Ui, ui_state: &mut UiState) {
    section_start(ui, ui_state, Section::Gallery);
    ui.columns(GALLERY.len(), |columns| {
        for (column, item) in columns.iter_mut().zip(GALLERY) {
            gallery_tile(column, item);
        }
    });
}

fn render_prices(ui: &mut Ui, ui_state: &mut UiState) {
    section_start(ui, ui_state, Section::Prices);
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("price_table")
            .num_columns(2)
            .striped(true)
            .spacing(vec2(24.0, 12.0))
            .min_col_width(ui.available_width() / 2.0 - 24.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Service").strong().color(theme::TEXT));
                ui.label(RichText::new("Price").strong().color(theme::TEXT));
                ui.end_row();
                for (service, price) in PRICE_TABLE {
                    ui.label(RichText::new(*service).color(theme::TEXT));
                    ui.label(RichText::new(*price).strong().color(theme::ACCENT));
                    ui.end_row();
                }
            });
        ui.add_space(12.0);
        ui.label(RichText::new(PRICE_NOTE).size(12.0).color(theme::TEXT_MUTED));
    });
}

fn review_card(ui: &mut Ui, review: &Review) {
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        let stars = "★".repeat(usize::from(review.rating));
        ui.label(RichText::new(stars).color(Color32::from_rgb(250, 204, 21)));
        ui.add_space(6.0);
        ui.label(RichText::new(review.text).italics().color(theme::TEXT));
        ui.add_space(8.0);
        ui.label(RichText::new(review.name).strong().color(theme::TEXT_MUTED));
    });
}

fn render_reviews(ui: &mut Ui, ui_state: &mut UiState) {
    section_start(ui, ui_state, Section::Reviews);
    ui.columns(REVIEWS.len(), |columns| {
        for (column, review) in columns.iter_mut().zip(REVIEWS) {
            review_card(column, review);
        }
    });
}

fn render_contacts(ui: &mut Ui, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    section_start(ui, ui_state, Section::Contacts);
    ui.columns(2, |columns| {
        card_frame().show(&mut columns[0], |ui| {
            ui.set_width(ui.available_width());
            for (label, value) in CONTACTS {
                section_label(ui, label);
                ui.label(RichText::new(*value).color(theme::TEXT));
                ui.add_space(8.0);
            }
        });
        card_frame().show(&mut columns[1], |ui| {
            ui.set_width(ui.available_width());
            contact_form(ui, ui_state, actions);
        });
    });
}

fn contact_form(ui: &mut Ui, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    let form = &mut ui_state.contact;

    section_label(ui, "Name");
    ui.add(TextEdit::singleline(&mut form.name).desired_width(f32::INFINITY));
    ui.add_space(6.0);

    section_label(ui, "Phone");
    ui.add(
        TextEdit::singleline(&mut form.phone)
            .hint_text("+7 (___) ___-__-__")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);

    section_label(ui, "Service");
    let selected = form.service_title().unwrap_or("Choose a service");
    egui::ComboBox::from_id_salt("contact_service")
        .selected_text(selected)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for service in SERVICES {
                ui.selectable_value(&mut form.service, Some(service.id), service.title);
            }
        });
    ui.add_space(6.0);

    section_label(ui, "Message");
    ui.add(
        TextEdit::multiline(&mut form.message)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(10.0);

    if PrimaryButton::new("Send request")
        .full_width()
        .enabled(form.is_complete())
        .show(ui)
    {
        actions.push(UiAction::SubmitContact);
    }
    if let Some(status) = &ui_state.contact_status {
        ui.add_space(6.0);
        ui.label(RichText::new(status).size(12.0).color(theme::TEXT_MUTED));
    }
}

fn render_footer(ui: &mut Ui) {
    separator(ui);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(SHOP_NAME).strong().color(theme::TEXT));
        ui.label(
            RichText::new("Printing, photo services and digitization")
                .size(12.0)
                .color(theme::TEXT_MUTED),
        );
    });
    ui.add_space(24.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_designer_resets_scene() {
        let mut state = UiState::default();
        state.open_designer(ProductKind::Mug);
        let dialog = state.designer.as_mut().unwrap();
        dialog.controller_mut().add_text_str("Hi");
        assert_eq!(dialog.controller().price(), 380);

        state.open_designer(ProductKind::Mug);
        let dialog = state.designer.as_ref().unwrap();
        assert!(dialog.controller().scene().is_empty());
        assert_eq!(dialog.controller().price(), 350);
    }

    #[test]
    fn test_close_designer() {
        let mut state = UiState::default();
        state.open_designer(ProductKind::TShirt);
        state.close_designer();
        assert!(state.designer.is_none());
        // Closing twice is harmless.
        state.close_designer();
    }

    #[test]
    fn test_scroll_to() {
        let mut state = UiState::default();
        state.scroll_to(Section::Prices);
        assert_eq!(state.scroll_target, Some(Section::Prices));
        assert_eq!(state.active_section, Some(Section::Prices));
    }

    #[test]
    fn test_contact_form() {
        let mut state = UiState::default();
        state.contact.name = "Anna".to_string();
        assert!(!state.submit_contact());
        assert_eq!(state.contact.name, "Anna");

        state.contact.phone = "+7 900".to_string();
        state.contact.service = Some("mugs");
        assert!(state.contact.describe().contains("Mug printing"));
        assert!(state.submit_contact());
        assert_eq!(state.contact, ContactForm::default());
        assert!(state.contact_status.is_some());
    }
}
