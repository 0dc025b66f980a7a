//! Rendering backends
//!
//! Two independent consumers of the annotated tree: a box-drawing ANSI
//! terminal renderer working from the logical grid, and an HTML attribute
//! injector patching a default backend's output. Both are pure readers;
//! they never mutate the tree and never talk to each other.

pub mod html;
pub mod terminal;
pub mod theme;

pub use html::inject_table_attributes;
pub use terminal::{render_document, render_table, TerminalOptions};
pub use theme::Theme;
