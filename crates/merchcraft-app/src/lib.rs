//! MerchCraft Application
//!
//! The application shell providing windowing, the storefront page and the
//! product designer dialogs.

mod app;
mod content;
mod designer_view;
mod file_ops;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use designer_view::{DesignerDialog, Gesture, PointerTarget};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
pub use ui::{Section, UiAction, UiState, render_ui};
