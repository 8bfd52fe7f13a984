//! Display abstraction and shared rendering for the Detent printer UI
//!
//! This crate provides:
//! - `DisplayBackend` trait for different display types (OLED, TFT, etc.)
//! - Screen buffer types with selection highlighting
//! - Text formatting helpers (durations, millimeters, percentages)
//! - Renderers that turn core menu descriptors and telemetry into rows
//!
//! The control core stays display-agnostic; firmware picks a backend
//! implementation and feeds it the buffers produced here.

#![no_std]

pub mod backend;
pub mod format;
pub mod render;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
