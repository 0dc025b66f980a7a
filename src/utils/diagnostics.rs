//! Table marker diagnostics
//!
//! An advisory lint pass over a document tree. It reports marker
//! look-alikes and near-miss conventions that the inference pass will
//! (correctly, but perhaps surprisingly) treat as ordinary content:
//!
//! - `<<` embedded in longer cell text
//! - `^^` in a table's first row
//! - footer rule rows where only some cells are `===`
//! - caption-shaped paragraphs with an unterminated attribute block
//!
//! Diagnostics never change behavior; the pipeline itself has no error
//! channel.

use std::fmt;

use crate::core::infer::{is_equals_run, is_footer_rule_row};
use crate::core::tree::{Document, NodeId, NodeKind};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output might not be what the author intended
    Warning,
    /// Error - the construct cannot work at all
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Table index in the document (0-based)
    pub table: Option<usize>,
    /// Row index within the table (0-based)
    pub row: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            table: None,
            row: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add table/row location information
    pub fn with_location(mut self, table: usize, row: usize) -> Self {
        self.table = Some(table);
        self.row = Some(row);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(table), Some(row)) = (self.table, self.row) {
            write!(f, "\n  --> table {}, row {}", table + 1, row + 1)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a document tree for table marker issues
pub fn check_document(doc: &Document) -> CheckResult {
    let mut result = CheckResult::new();

    for (t, table) in doc.tables().into_iter().enumerate() {
        for (r, row) in doc.table_rows(table).into_iter().enumerate() {
            check_row(doc, t, r, row, &mut result);
        }
    }

    check_caption_paragraphs(doc, &mut result);

    result
}

fn check_row(
    doc: &Document,
    table_idx: usize,
    row_idx: usize,
    row: NodeId,
    result: &mut CheckResult,
) {
    let cells = doc.row_cells(row);

    for (c, &cell) in cells.iter().enumerate() {
        let text = doc.plain_text(cell);
        let trimmed = text.trim();

        if trimmed != "<<" && trimmed.contains("<<") {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    "cell contains '<<' alongside other content; it renders literally",
                )
                .with_location(table_idx, row_idx)
                .with_source(trimmed.to_string())
                .with_suggestion("put '<<' alone in the cell to merge it into the previous column"),
            );
        }

        if trimmed == "^^" && row_idx == 0 {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    "row-span marker in the first row has no cell above to merge into",
                )
                .with_location(table_idx, row_idx),
            );
        }

        if trimmed == "<<" && c == 0 {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    "column-span marker at the start of a row has no merge target",
                )
                .with_location(table_idx, row_idx),
            );
        }
    }

    // Partial rule rows are easy to write by accident and quietly render
    // as content.
    let equals_cells = cells
        .iter()
        .filter(|&&cell| is_equals_run(doc.plain_text(cell).trim(), 3))
        .count();
    if equals_cells > 0 && !is_footer_rule_row(doc, row) {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                "only some cells are '===' runs; the row is treated as content, not a footer rule",
            )
            .with_location(table_idx, row_idx)
            .with_suggestion("make every cell in the row '===' to start the footer section"),
        );
    }

    let dash_cells = cells
        .iter()
        .filter(|&&cell| doc.plain_text(cell).trim() == "—")
        .count();
    if dash_cells > 0 && dash_cells < cells.len() {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                "only some cells are em-dash separators; the row is kept as content",
            )
            .with_location(table_idx, row_idx),
        );
    }
}

/// Caption-shaped paragraphs with a `{` but no closing `}` silently lose
/// their attribute block.
fn check_caption_paragraphs(doc: &Document, result: &mut CheckResult) {
    for &child in doc.children(doc.root()) {
        if !matches!(doc.kind(child), NodeKind::Paragraph) {
            continue;
        }
        let text = doc.plain_text(child);
        let trimmed = text.trim();
        let caption_shaped = trimmed.starts_with('[') || trimmed.starts_with(": ");
        if caption_shaped && trimmed.contains('{') && !trimmed.contains('}') {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    "caption has an unterminated attribute block",
                )
                .with_source(trimmed.to_string())
                .with_suggestion("close the '{...}' block or remove the brace"),
            );
        }
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
