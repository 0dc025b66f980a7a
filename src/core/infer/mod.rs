//! Span & caption inference
//!
//! A single forward pass over each table's rows annotates cells with
//! column/row spans, removal flags, per-cell alignment and footer
//! membership, and attaches captions found next to (or inside) the table.
//! Later consumers read only the annotations and never re-inspect cell
//! text.
//!
//! The pass never fails: a marker look-alike that does not fully match is
//! left alone as ordinary content, and structural misses (a `^^` with no
//! cell above it) degrade to a local no-op. Running the pass twice yields
//! the same annotations as running it once.

pub mod caption;

#[cfg(test)]
mod tests;

use crate::core::tree::{Alignment, Document, NodeId};

/// Options for the inference pass
#[derive(Debug, Clone)]
pub struct InferOptions {
    /// Recognize leading/trailing `:` on cell text as per-cell alignment
    pub per_cell_alignment: bool,
}

impl Default for InferOptions {
    fn default() -> Self {
        InferOptions {
            per_cell_alignment: true,
        }
    }
}

/// Run inference over every table in the document.
pub fn process_document(doc: &mut Document, options: &InferOptions) {
    for table in doc.tables() {
        caption::attach_caption(doc, table);
        process_table(doc, table, options);
    }
}

/// Annotate one table's rows and cells.
pub fn process_table(doc: &mut Document, table: NodeId, options: &InferOptions) {
    let rows = doc.table_rows(table);
    if rows.is_empty() {
        return;
    }

    // Working width for the cross-row state: the widest row by current
    // logical columns. Sized to this table, never a fixed bound.
    let max_cols = rows
        .iter()
        .map(|&row| {
            doc.row_cells(row)
                .iter()
                .map(|&cell| doc.ann(cell).col_span as usize)
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0);

    // Active rowspan target per logical column, persisted across rows for
    // the whole table. A normal cell overwrites its column's slot; a `^^`
    // cell merges into whatever is active there.
    let mut active: Vec<Option<NodeId>> = vec![None; max_cols];

    let mut in_tfoot = false;
    let mut prev_row: Option<NodeId> = None;

    for &row in &rows {
        // Rows consumed elsewhere (caption rows, prior runs) contribute
        // nothing and are not the "previous row" for rowspan lookups.
        if doc.ann(row).removed {
            continue;
        }

        // Footer rule row: every cell is a run of 3+ '='. The rule row and
        // everything below it belongs to the footer; the rule cells
        // themselves are presentation, not data.
        if is_footer_rule_row(doc, row) {
            in_tfoot = true;
            doc.ann_mut(row).tfoot = true;
            for cell in doc.row_cells(row) {
                if is_equals_run(doc.plain_text(cell).trim(), 3) {
                    doc.ann_mut(cell).removed = true;
                }
            }
        } else if in_tfoot {
            doc.ann_mut(row).tfoot = true;
        }

        // Pure separator row: every cell is a single em-dash. The whole
        // row disappears, and the rowspan state carries straight across it.
        if is_separator_row(doc, row) {
            doc.ann_mut(row).removed = true;
            for cell in doc.row_cells(row) {
                doc.ann_mut(cell).removed = true;
            }
            continue;
        }

        let cells = doc.row_cells(row);
        let mut col = 0usize;

        for (i, &cell) in cells.iter().enumerate() {
            if doc.ann(cell).removed {
                // Already merged away (rule cells, previous runs): keep the
                // cursor aligned but nothing else to do.
                col += doc.ann(cell).col_span as usize;
                continue;
            }

            if options.per_cell_alignment {
                apply_cell_alignment(doc, cell);
            }

            let text = doc.plain_text(cell);
            let trimmed = text.trim();
            let is_marker = trimmed == "<<";
            let is_empty_cell = doc.is_childless(cell);

            if is_marker || is_empty_cell {
                merge_colspan(doc, &cells, i, is_marker);
            } else if trimmed == "^^" {
                merge_rowspan(doc, &mut active, prev_row, col, cell);
            }

            // A surviving normal cell becomes the rowspan target for its
            // column. This runs after the cell's own resolution, so `^^`
            // cells in this row saw last row's target.
            if trimmed != "^^" && !doc.ann(cell).removed && col < active.len() {
                active[col] = Some(cell);
            }

            col += doc.ann(cell).col_span as usize;
        }

        prev_row = Some(row);
    }
}

/// Column-span resolution for the candidate at `cells[index]`.
///
/// `is_marker` distinguishes an explicit `<<` cell from a plain empty
/// cell. Markers always merge when a target exists; empty cells only
/// merge when they are not an isolated missing value sitting between two
/// content cells.
fn merge_colspan(doc: &mut Document, cells: &[NodeId], index: usize, is_marker: bool) {
    let cell = cells[index];

    // Nearest preceding cell in the same row that still renders.
    let target = cells[..index]
        .iter()
        .rev()
        .copied()
        .find(|&c| !doc.ann(c).removed);

    let Some(target) = target else {
        // Dangling candidate at the row start: an empty cell vanishes, a
        // literal `<<` stays visible as ordinary content.
        if doc.is_childless(cell) {
            doc.ann_mut(cell).removed = true;
        }
        return;
    };

    let target_is_empty = doc.is_childless(target);
    let next_has_content = cells
        .get(index + 1)
        .map(|&next| !doc.is_childless(next))
        .unwrap_or(false);

    let should_merge = is_marker || target_is_empty || !next_has_content;
    if !should_merge {
        return;
    }

    doc.ann_mut(target).col_span += 1;
    doc.ann_mut(cell).removed = true;
}

/// Row-span resolution for a `^^` cell at logical column `col`.
fn merge_rowspan(
    doc: &mut Document,
    active: &mut [Option<NodeId>],
    prev_row: Option<NodeId>,
    col: usize,
    cell: NodeId,
) {
    let mut target = active.get(col).copied().flatten();

    if target.is_none() {
        // No active cell yet for this column: look one row up at the same
        // logical column, skipping removed cells.
        if let Some(prev) = prev_row {
            target = cell_at_logical_col(doc, prev, col);
            if let (Some(found), Some(slot)) = (target, active.get_mut(col)) {
                *slot = Some(found);
            }
        }
    }

    if let Some(target) = target {
        doc.ann_mut(target).row_span += 1;
    }

    // Removed even without a target, so a bare marker never renders.
    doc.ann_mut(cell).removed = true;
}

/// Find the non-removed cell of `row` whose span covers logical column
/// `col`, walking a cursor the same way the row scan does.
fn cell_at_logical_col(doc: &Document, row: NodeId, col: usize) -> Option<NodeId> {
    let mut cursor = 0usize;
    for cell in doc.row_cells(row) {
        let span = doc.ann(cell).col_span as usize;
        if col < cursor + span {
            if doc.ann(cell).removed {
                return None;
            }
            return Some(cell);
        }
        cursor += span;
    }
    None
}

/// Leading/trailing `:` markers on the cell's first text node set per-cell
/// alignment and are stripped from the content. A colon with nothing left
/// after stripping is a pattern miss and the text stays untouched.
fn apply_cell_alignment(doc: &mut Document, cell: NodeId) {
    let Some(text_id) = doc.first_text_descendant(cell) else {
        return;
    };
    let Some(lit) = doc.literal(text_id) else {
        return;
    };
    let lit = lit.to_string();
    let trimmed = lit.trim();
    if trimmed.is_empty() {
        return;
    }

    let has_leading = trimmed.starts_with(':');
    let has_trailing = trimmed.len() > 1 && trimmed.ends_with(':');
    if !has_leading && !has_trailing {
        return;
    }

    let mut inner = trimmed;
    if has_leading {
        inner = &inner[1..];
    }
    if has_trailing {
        inner = &inner[..inner.len() - 1];
    }
    if inner.trim().is_empty() {
        return;
    }

    let alignment = match (has_leading, has_trailing) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => unreachable!(),
    };

    // Keep whatever outer whitespace the source had.
    let lead_ws = &lit[..lit.len() - lit.trim_start().len()];
    let trail_ws = &lit[lit.trim_end().len()..];
    let rebuilt = format!("{}{}{}", lead_ws, inner, trail_ws);

    doc.set_literal(text_id, rebuilt);
    doc.ann_mut(cell).alignment = alignment;
}

/// Every cell is a run of `min_len`-or-more '=' characters (and the row
/// has at least one cell).
pub(crate) fn is_footer_rule_row(doc: &Document, row: NodeId) -> bool {
    let cells = doc.row_cells(row);
    !cells.is_empty()
        && cells
            .iter()
            .all(|&cell| is_equals_run(doc.plain_text(cell).trim(), 3))
}

/// Every cell is exactly the em-dash separator character.
fn is_separator_row(doc: &Document, row: NodeId) -> bool {
    let cells = doc.row_cells(row);
    !cells.is_empty() && cells.iter().all(|&cell| doc.plain_text(cell).trim() == "—")
}

pub(crate) fn is_equals_run(text: &str, min_len: usize) -> bool {
    text.len() >= min_len && !text.is_empty() && text.chars().all(|c| c == '=')
}
