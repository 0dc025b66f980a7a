//! # gridmark
//!
//! Span-aware Markdown table post-processor written in Rust.
//!
//! ## Features
//!
//! - **Span Inference**: `<<` and `^^` markers merge cells into
//!   multi-column and multi-row spans
//! - **Captions**: `[Caption]` / `: Caption` paragraphs and caption rows,
//!   with Pandoc/Kramdown attribute blocks
//! - **Footer Sections**: `===` rule rows start a footer that propagates
//!   to the end of the table
//! - **Per-Cell Alignment**: leading/trailing `:` markers override column
//!   alignment
//! - **Two Backends**: ANSI box-drawing terminal output and HTML
//!   attribute injection over a default backend's markup
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Terminal rendering
//!
//! ```rust
//! use gridmark::render_terminal;
//!
//! let out = render_terminal("| A | B |\n|---|---|\n| wide | << |\n");
//! assert!(out.contains("┌"));
//! ```
//!
//! ### HTML patching
//!
//! ```rust
//! use gridmark::inject_html;
//!
//! let html = "<table><tr><th>A</th><th>&lt;&lt;</th></tr></table>";
//! let patched = inject_html("| A | << |\n", html);
//! assert!(patched.contains("colspan=\"2\""));
//! ```

/// Core pipeline modules
pub mod core;

/// Data layer - static glyph and style tables
pub mod data;

/// Feature modules - attribute list parsing
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core types and functions
pub use core::{
    inject_table_attributes, parse_markdown, process_document, process_table, render_document,
    render_table, Alignment, Annotations, Caption, Document, GridSlot, InferOptions, LogicalGrid,
    NodeId, NodeKind, TerminalOptions, Theme,
};

// Re-export feature modules
pub use features::ial;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{GridmarkError, GridmarkResult};

/// Parse a markdown fragment and run span & caption inference over it.
///
/// This is the whole pipeline short of rendering: the returned document
/// carries the annotations both backends consume.
pub fn process_markdown(input: &str) -> Document {
    process_markdown_with_options(input, &InferOptions::default())
}

/// Like [`process_markdown`] with explicit inference options.
pub fn process_markdown_with_options(input: &str, options: &InferOptions) -> Document {
    let mut doc = parse_markdown(input);
    process_document(&mut doc, options);
    doc
}

/// Parse, infer and render a markdown fragment for the terminal with the
/// default theme.
pub fn render_terminal(input: &str) -> String {
    render_terminal_with(input, &Theme::default(), &TerminalOptions::default())
}

/// Like [`render_terminal`] with an explicit theme and options.
pub fn render_terminal_with(input: &str, theme: &Theme, options: &TerminalOptions) -> String {
    let doc = process_markdown(input);
    render_document(&doc, theme, options)
}

/// Parse and infer a markdown fragment, then patch `html` (the default
/// backend's output for the same fragment) with span and removal
/// attributes.
pub fn inject_html(input: &str, html: &str) -> String {
    let doc = process_markdown(input);
    inject_table_attributes(&doc, html)
}
