//! Widget system for managing interactive element states.
//!
//! This module provides a unified way to manage UI state for elements:
//! - Single selection with a delete handle
//! - Drag tracking with a stale-release guard
//! - Hover state
//!
//! Elements remain pure data. Widgets wrap elements with UI state.

mod handles;
mod manager;
mod state;

pub use handles::{DELETE_HANDLE_RADIUS, Handle, HandleKind, element_handles, hit_test_handles};
pub use manager::WidgetManager;
pub use state::WidgetState;
