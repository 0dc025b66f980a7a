//! Data layer - Static mappings and constants
//!
//! This module contains the static data used by the terminal backend:
//! - Box-drawing glyph sets
//! - ANSI style token mappings

pub mod glyphs;
pub mod styles;

// Re-export commonly used items
pub use glyphs::{BoxGlyphs, BOX_LIGHT};
pub use styles::{push_reset, push_sgr, resolve, RESET, STYLE_CODES};
