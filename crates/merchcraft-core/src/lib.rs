//! MerchCraft Core Library
//!
//! Platform-agnostic state model for the MerchCraft product designer:
//! placed elements, selection and drag tracking, product configuration and
//! the running price.

pub mod designer;
pub mod drag;
pub mod elements;
pub mod pricing;
pub mod product;
pub mod scene;
pub mod summary;
pub mod upload;
pub mod widget;

pub use designer::{DesignerConfig, HIT_TOLERANCE, Notice, SceneController};
pub use drag::{DRAG_EXTENT, clamp_drop};
pub use elements::{DesignElement, ElementContent, ElementId, ElementKind, ElementPatch};
pub use pricing::{Price, PriceLedger, format_price};
pub use product::{ConfigError, ProductColor, ProductConfig, ProductKind, ProductSize};
pub use scene::Scene;
pub use summary::DesignSummary;
pub use upload::{UploadError, UploadLimits, UploadTicket};
pub use widget::{Handle, HandleKind, WidgetManager, WidgetState};
