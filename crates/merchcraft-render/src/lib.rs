//! MerchCraft Render Library
//!
//! Renderer abstraction for the product designer preview.
//! The display list is built without any GPU or UI dependency; the default
//! backend paints it with egui.

mod display;
mod egui_impl;
mod renderer;

pub use display::{DisplayItem, MUG_HANDLE_SIZE, PRODUCT_CORNER_RADIUS, PRODUCT_INSET, build_display_list};
pub use egui_impl::{EguiRenderer, TextureCache, cover_uv, decode_image, to_color32};
pub use renderer::{DragPreview, RenderContext, RenderResult, Renderer, RendererError};
