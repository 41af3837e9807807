//! Reusable egui storefront components with Tailwind-inspired styling.
//!
//! This crate provides the styled pieces the shop pages are built from:
//!
//! - **Buttons**: Primary actions, navigation links
//! - **Colors**: Palette swatches and swatch rows
//! - **Cards**: Card and dialog frames, price badges, notice banners
//! - **Layout**: Section headings, labels, separators, labeled sliders

pub mod buttons;
pub mod cards;
pub mod colors;
pub mod layout;

pub use buttons::{PrimaryButton, TextButton};
pub use cards::{card_frame, dialog_frame, notice_banner, price_badge};
pub use colors::{ColorSwatch, swatch_row};
pub use layout::{labeled_slider, section_heading, section_label, separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Medium swatch size (product colors)
    pub const MEDIUM: f32 = 28.0;
    /// Standard button height
    pub const BUTTON_HEIGHT: f32 = 32.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 6;
    /// Card corner radius
    pub const CARD_RADIUS: u8 = 10;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(31, 41, 55);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(229, 231, 235);
    /// Brand/active color (violet)
    pub const ACCENT: Color32 = Color32::from_rgb(124, 58, 237);
    /// Brand color when hovered
    pub const ACCENT_HOVER: Color32 = Color32::from_rgb(109, 40, 217);
    /// Destructive actions
    pub const DANGER: Color32 = Color32::from_rgb(239, 68, 68);
    /// Page background
    pub const PAGE_BG: Color32 = Color32::from_rgb(249, 250, 251);
    /// Card background
    pub const CARD_BG: Color32 = Color32::WHITE;
}
