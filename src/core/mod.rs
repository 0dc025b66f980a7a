//! Core modules
//!
//! This module contains the table structure pipeline:
//! - `tree`: the arena document tree and typed annotations
//! - `source`: the minimal markdown reader (fixture-grade front end)
//! - `infer`: the span & caption inference pass
//! - `grid`: the logical grid materializer
//! - `render`: the terminal and HTML backends

pub mod grid;
pub mod infer;
pub mod render;
pub mod source;
pub mod tree;

// Re-export main types and functions
pub use grid::{GridSlot, LogicalGrid};
pub use infer::{process_document, process_table, InferOptions};
pub use render::{
    inject_table_attributes, render_document, render_table, TerminalOptions, Theme,
};
pub use source::parse_markdown;
pub use tree::{Alignment, Annotations, Caption, Document, Node, NodeId, NodeKind};
