//! Feature modules
//!
//! Specialized handlers layered on top of the core pipeline:
//! - Inline attribute lists (Pandoc and Kramdown forms) for captions

pub mod ial;

// Re-export commonly used types
pub use ial::{parse_ial_content, parse_trailing_ial, Attributes};
