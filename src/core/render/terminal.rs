//! Span-aware terminal table renderer
//!
//! Consumes the logical grid to compute column widths, resolve alignment
//! and draw box-drawing borders with ANSI styling. Output is a plain
//! `String` of escape-sequenced lines; an empty grid renders to an empty
//! string rather than partial output.

use fxhash::FxHashSet;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::core::grid::LogicalGrid;
use crate::core::tree::{Alignment, Document, NodeId, NodeKind};
use crate::data::glyphs::BOX_LIGHT;
use crate::data::styles;

/// Terminal renderer options
#[derive(Debug, Clone, Default)]
pub struct TerminalOptions {
    /// Emit 256-color escape defaults instead of the basic palette
    pub use_256_color: bool,
    /// Indent level (two spaces each) applied to every line
    pub indent: usize,
}

/// Render every block of the document: paragraphs and headings as styled
/// text, tables through the grid renderer. Nodes flagged removed (consumed
/// captions, separator rows) produce no output.
pub fn render_document(doc: &Document, theme: &Theme, opts: &TerminalOptions) -> String {
    let mut out = String::new();
    for &child in doc.children(doc.root()) {
        render_block(doc, child, theme, opts, &mut out);
    }
    out
}

fn render_block(
    doc: &Document,
    node: NodeId,
    theme: &Theme,
    opts: &TerminalOptions,
    out: &mut String,
) {
    if doc.ann(node).removed {
        return;
    }
    match doc.kind(node) {
        NodeKind::Paragraph => {
            push_indent(out, opts.indent);
            for &child in doc.children(node) {
                serialize_inline(doc, child, theme, out);
            }
            out.push_str("\n\n");
        }
        NodeKind::Heading { .. } => {
            push_indent(out, opts.indent);
            styles::push_sgr(out, theme.header_token());
            for &child in doc.children(node) {
                serialize_inline(doc, child, theme, out);
            }
            styles::push_reset(out);
            out.push_str("\n\n");
        }
        NodeKind::Table => {
            out.push_str(&render_table(doc, node, theme, opts));
            if let Some(caption) = &doc.ann(node).caption {
                if !caption.text.is_empty() {
                    push_indent(out, opts.indent);
                    styles::push_sgr(out, theme.caption_token());
                    out.push_str(&caption.text);
                    styles::push_reset(out);
                    out.push('\n');
                }
            }
            out.push('\n');
        }
        // Inline kinds never appear at the block level; anything else
        // just descends.
        _ => {
            for &child in doc.children(node) {
                render_block(doc, child, theme, opts, out);
            }
        }
    }
}

/// Render one table as a box-drawn grid. Empty tables render to "".
pub fn render_table(
    doc: &Document,
    table: NodeId,
    theme: &Theme,
    opts: &TerminalOptions,
) -> String {
    let Some(grid) = LogicalGrid::build(doc, table) else {
        return String::new();
    };
    let visible = grid.visible_cols();

    // Column widths from owner cells; a multi-column span spreads its
    // width over the columns it covers (ceiling division).
    let mut col_widths = vec![0usize; grid.cols()];
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let Some(slot) = grid.at(r, c) else { continue };
            if !slot.is_owner {
                continue;
            }
            let Some(cell) = slot.cell else { continue };
            let width = cell_width(doc, cell);
            let span = (slot.col_span as usize).max(1);
            if span == 1 {
                col_widths[c] = col_widths[c].max(width);
            } else {
                let per = width.div_ceil(span);
                for k in 0..span.min(grid.cols() - c) {
                    col_widths[c + k] = col_widths[c + k].max(per);
                }
            }
        }
    }

    // Column defaults come from the header row's annotations.
    let mut col_align = vec![Alignment::Default; grid.cols()];
    for (c, align) in col_align.iter_mut().enumerate() {
        if let Some(slot) = grid.at(0, c) {
            if slot.is_owner {
                if let Some(cell) = slot.cell {
                    *align = doc.ann(cell).alignment;
                }
            }
        }
    }

    let border = theme.border_token(opts.use_256_color);
    let glyphs = &BOX_LIGHT;
    let mut out = String::new();
    let mut printed: FxHashSet<NodeId> = FxHashSet::default();

    draw_rule(
        &mut out,
        glyphs.top_left,
        glyphs.top_sep,
        glyphs.top_right,
        &col_widths,
        visible,
        border,
        opts.indent,
    );

    for r in 0..grid.rows() {
        // Footer rule rows draw as a divider, never as content. The rule
        // cells were removal-flagged by inference, so we consult the
        // source row's text rather than (now absent) owner slots.
        if grid.row_node(r).is_some_and(|row| is_rule_row(doc, row)) {
            draw_rule(
                &mut out,
                glyphs.mid_left,
                glyphs.mid_sep,
                glyphs.mid_right,
                &col_widths,
                visible,
                border,
                opts.indent,
            );
            continue;
        }

        let is_header = r == 0;

        push_indent(&mut out, opts.indent);
        push_border(&mut out, glyphs.vertical, border);

        let mut c = 0usize;
        while c < visible {
            let slot = grid.at(r, c);
            let owner = slot.and_then(|s| {
                if s.is_owner {
                    s.cell.map(|cell| (cell, (s.col_span as usize).max(1)))
                } else {
                    None
                }
            });

            let Some((cell, span)) = owner else {
                // Empty slot or the interior of a span: blank padding.
                let target = col_widths[c].max(1);
                out.push_str(&" ".repeat(target + 2));
                push_border(&mut out, glyphs.vertical, border);
                c += 1;
                continue;
            };

            let span = span.min(visible - c);

            // Merged cells reclaim the padding and border characters of
            // the columns they absorb: 3 extra characters per merged
            // border.
            let mut block_width = 0usize;
            for k in 0..span {
                block_width += col_widths[c + k].max(1);
            }
            if span > 1 {
                block_width += 3 * span - 3;
            }

            let actual = if printed.contains(&cell) {
                0
            } else {
                cell_width(doc, cell)
            };

            let mut align = match col_align[c] {
                Alignment::Default => Alignment::Left,
                other => other,
            };
            if doc.ann(cell).alignment != Alignment::Default {
                align = doc.ann(cell).alignment;
            }

            let extra = block_width.saturating_sub(actual);
            let (left_extra, right_extra) = match align {
                Alignment::Right => (extra, 0),
                Alignment::Center => (extra / 2, extra - extra / 2),
                Alignment::Left | Alignment::Default => (0, extra),
            };

            out.push_str(&" ".repeat(1 + left_extra));
            if printed.insert(cell) {
                if is_header {
                    styles::push_sgr(&mut out, theme.header_token());
                }
                for &child in doc.children(cell) {
                    serialize_inline(doc, child, theme, &mut out);
                }
                if is_header {
                    styles::push_reset(&mut out);
                }
            }
            out.push_str(&" ".repeat(1 + right_extra));
            push_border(&mut out, glyphs.vertical, border);

            c += span;
        }

        out.push('\n');

        if is_header {
            draw_rule(
                &mut out,
                glyphs.mid_left,
                glyphs.mid_sep,
                glyphs.mid_right,
                &col_widths,
                visible,
                border,
                opts.indent,
            );
        }
    }

    draw_rule(
        &mut out,
        glyphs.bottom_left,
        glyphs.bottom_sep,
        glyphs.bottom_right,
        &col_widths,
        visible,
        border,
        opts.indent,
    );

    out
}

/// Serialize inline content with theme styling. Width accounting assumes
/// only literal text reaches the output, so no decoration characters are
/// added here.
fn serialize_inline(doc: &Document, node: NodeId, theme: &Theme, out: &mut String) {
    match doc.kind(node) {
        NodeKind::Text(text) | NodeKind::HtmlInline(text) => out.push_str(text),
        NodeKind::Code(code) => {
            styles::push_sgr(out, theme.code_token());
            out.push_str(code);
            styles::push_reset(out);
        }
        NodeKind::Emphasis => {
            styles::push_sgr(out, theme.emphasis_token());
            for &child in doc.children(node) {
                serialize_inline(doc, child, theme, out);
            }
            styles::push_reset(out);
        }
        NodeKind::Strong => {
            styles::push_sgr(out, theme.strong_token());
            for &child in doc.children(node) {
                serialize_inline(doc, child, theme, out);
            }
            styles::push_reset(out);
        }
        NodeKind::Link { .. } => {
            styles::push_sgr(out, theme.link_token());
            for &child in doc.children(node) {
                serialize_inline(doc, child, theme, out);
            }
            styles::push_reset(out);
        }
        // Block kinds inside a cell: flatten.
        _ => {
            for &child in doc.children(node) {
                serialize_inline(doc, child, theme, out);
            }
        }
    }
}

/// Visible width of a cell's content, escapes and markup excluded.
fn cell_width(doc: &Document, cell: NodeId) -> usize {
    let text = doc.plain_text(cell).replace(['\n', '\r'], " ");
    UnicodeWidthStr::width(text.as_str())
}

/// A source row whose every cell is a run of '=' (the cells may already be
/// removal-flagged).
fn is_rule_row(doc: &Document, row: NodeId) -> bool {
    let cells = doc.row_cells(row);
    !cells.is_empty() && cells.iter().all(|&cell| {
        let text = doc.plain_text(cell);
        let trimmed = text.trim();
        !trimmed.is_empty() && trimmed.chars().all(|ch| ch == '=')
    })
}

#[allow(clippy::too_many_arguments)]
fn draw_rule(
    out: &mut String,
    left: &str,
    sep: &str,
    right: &str,
    col_widths: &[usize],
    visible: usize,
    border: &str,
    indent: usize,
) {
    push_indent(out, indent);
    styles::push_sgr(out, border);
    out.push_str(left);
    for c in 0..visible {
        let inner = col_widths[c].max(1);
        for _ in 0..inner + 2 {
            out.push_str(BOX_LIGHT.horizontal);
        }
        out.push_str(if c == visible - 1 { right } else { sep });
    }
    styles::push_reset(out);
    out.push('\n');
}

fn push_border(out: &mut String, glyph: &str, border: &str) {
    styles::push_sgr(out, border);
    out.push_str(glyph);
    styles::push_reset(out);
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}
