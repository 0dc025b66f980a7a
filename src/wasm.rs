//! WASM bindings for gridmark
//!
//! This module provides JavaScript-accessible functions for table
//! post-processing: ANSI rendering for xterm-style widgets and HTML
//! patching for browser-side table enhancement.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{
    inject_table_attributes, parse_markdown, process_document, render_document, InferOptions,
    TerminalOptions, Theme,
};

/// Processing options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Recognize leading/trailing ':' as per-cell alignment
    #[serde(default = "default_true")]
    pub per_cell_alignment: bool,
    /// Use 256-color escape defaults in terminal output
    #[serde(default)]
    pub color256: bool,
}

#[cfg(feature = "wasm")]
impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptions {
            per_cell_alignment: true,
            color256: false,
        }
    }
}

#[cfg(feature = "wasm")]
fn default_true() -> bool {
    true
}

/// Result of a check run (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckOutput {
    pub messages: Vec<String>,
    pub errors: usize,
    pub warnings: usize,
}

/// Initialize panic hook for better error messages in the browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Render a markdown fragment to ANSI terminal output
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn render_ansi(input: &str, options: JsValue) -> Result<String, JsValue> {
    let options: ProcessOptions = if options.is_undefined() || options.is_null() {
        ProcessOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    let mut doc = parse_markdown(input);
    process_document(
        &mut doc,
        &InferOptions {
            per_cell_alignment: options.per_cell_alignment,
        },
    );
    Ok(render_document(
        &doc,
        &Theme::default(),
        &TerminalOptions {
            use_256_color: options.color256,
            indent: 0,
        },
    ))
}

/// Patch default-rendered HTML with span and removal attributes
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn inject_html(input: &str, html: &str) -> String {
    let mut doc = parse_markdown(input);
    process_document(&mut doc, &InferOptions::default());
    inject_table_attributes(&doc, html)
}

/// Check a markdown fragment for marker issues
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn check(input: &str) -> Result<JsValue, JsValue> {
    let doc = parse_markdown(input);
    let result = crate::utils::diagnostics::check_document(&doc);
    let output = CheckOutput {
        messages: result.diagnostics.iter().map(|d| d.to_string()).collect(),
        errors: result.errors,
        warnings: result.warnings,
    };
    serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}
