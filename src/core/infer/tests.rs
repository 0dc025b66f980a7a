//! Regression tests for span & caption inference

use super::*;
use crate::core::tree::{Caption, Document, NodeId, NodeKind};
use pretty_assertions::assert_eq;

fn table(rows: &[&[&str]]) -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    let table = doc.push(root, NodeKind::Table);
    for row in rows {
        let row_id = doc.push(table, NodeKind::TableRow);
        for cell in *row {
            let cell_id = doc.push(row_id, NodeKind::TableCell);
            if !cell.is_empty() {
                doc.push_text(cell_id, *cell);
            }
        }
    }
    (doc, table)
}

fn cells_of(doc: &Document, table: NodeId, row: usize) -> Vec<NodeId> {
    let rows = doc.table_rows(table);
    doc.row_cells(rows[row])
}

#[test]
fn test_colspan_marker_merges() {
    let (mut doc, table) = table(&[&["Wide", "<<"], &["1", "2"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let header = cells_of(&doc, table, 0);
    assert_eq!(doc.ann(header[0]).col_span, 2);
    assert!(doc.ann(header[1]).removed);
}

#[test]
fn test_marker_with_other_content_never_merges() {
    let (mut doc, table) = table(&[&["A", "B"], &["raw <<", "x"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let row = cells_of(&doc, table, 1);
    assert_eq!(doc.ann(row[0]).col_span, 1);
    assert!(!doc.ann(row[0]).removed);
    assert_eq!(cells_of(&doc, table, 0).iter().map(|&c| doc.ann(c).col_span).max(), Some(1));
}

#[test]
fn test_marker_with_surrounding_whitespace_merges() {
    let (mut doc, table) = table(&[&["A", "  <<  "], &["1", "2"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let header = cells_of(&doc, table, 0);
    assert_eq!(doc.ann(header[0]).col_span, 2);
    assert!(doc.ann(header[1]).removed);
}

#[test]
fn test_double_marker_accumulates() {
    let (mut doc, table) = table(&[&["Wide", "<<", "<<"], &["1", "2", "3"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let header = cells_of(&doc, table, 0);
    assert_eq!(doc.ann(header[0]).col_span, 3);
    assert!(doc.ann(header[1]).removed);
    assert!(doc.ann(header[2]).removed);
}

#[test]
fn test_rowspan_chain() {
    let (mut doc, table) = table(&[&["A", "B"], &["^^", "C"], &["^^", "D"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let owner = cells_of(&doc, table, 0)[0];
    assert_eq!(doc.ann(owner).row_span, 3);
    assert!(doc.ann(cells_of(&doc, table, 1)[0]).removed);
    assert!(doc.ann(cells_of(&doc, table, 2)[0]).removed);
}

#[test]
fn test_rowspan_without_target_still_removed() {
    let (mut doc, table) = table(&[&["^^", "B"], &["1", "2"]]);
    process_table(&mut doc, table, &InferOptions::default());

    // No cell above to merge into, but the marker must never render.
    assert!(doc.ann(cells_of(&doc, table, 0)[0]).removed);
}

#[test]
fn test_rowspan_target_replaced_by_newer_cell() {
    // The active cell for a column is the most recent normal cell, not
    // the first one.
    let (mut doc, table) = table(&[&["A", "x"], &["B", "y"], &["^^", "z"]]);
    process_table(&mut doc, table, &InferOptions::default());

    assert_eq!(doc.ann(cells_of(&doc, table, 0)[0]).row_span, 1);
    assert_eq!(doc.ann(cells_of(&doc, table, 1)[0]).row_span, 2);
}

#[test]
fn test_footer_propagation() {
    let (mut doc, table) = table(&[
        &["A", "B"],
        &["1", "2"],
        &["===", "==="],
        &["t1", "t2"],
        &["t3", "t4"],
    ]);
    process_table(&mut doc, table, &InferOptions::default());

    let rows = doc.table_rows(table);
    assert!(!doc.ann(rows[0]).tfoot);
    assert!(!doc.ann(rows[1]).tfoot);
    assert!(doc.ann(rows[2]).tfoot);
    assert!(doc.ann(rows[3]).tfoot);
    assert!(doc.ann(rows[4]).tfoot);

    // The rule cells themselves are presentation, not data.
    for cell in doc.row_cells(rows[2]) {
        assert!(doc.ann(cell).removed);
    }
    for cell in doc.row_cells(rows[3]) {
        assert!(!doc.ann(cell).removed);
    }
}

#[test]
fn test_mixed_equals_row_is_content() {
    let (mut doc, table) = table(&[&["A", "B"], &["===", "Total"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let rows = doc.table_rows(table);
    assert!(!doc.ann(rows[1]).tfoot);
    for cell in doc.row_cells(rows[1]) {
        assert!(!doc.ann(cell).removed);
    }
}

#[test]
fn test_separator_row_removed_and_state_preserved() {
    let (mut doc, table) = table(&[&["A", "B"], &["—", "—"], &["^^", "C"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let rows = doc.table_rows(table);
    assert!(doc.ann(rows[1]).removed);

    // The rowspan in row 2 still finds A across the removed separator.
    assert_eq!(doc.ann(cells_of(&doc, table, 0)[0]).row_span, 2);
    assert!(doc.ann(cells_of(&doc, table, 2)[0]).removed);
}

#[test]
fn test_isolated_empty_cell_is_a_missing_value() {
    // `| a |  | b ||`: the empty second cell sits between two content
    // cells and stays; the trailing empty cell merges into b.
    let (mut doc, table) = table(&[&["H1", "H2", "H3", "H4"], &["a", "", "b", ""]]);
    process_table(&mut doc, table, &InferOptions::default());

    let row = cells_of(&doc, table, 1);
    assert_eq!(doc.ann(row[0]).col_span, 1);
    assert!(!doc.ann(row[1]).removed);
    assert_eq!(doc.ann(row[2]).col_span, 2);
    assert!(doc.ann(row[3]).removed);
}

#[test]
fn test_leading_empty_cells_are_dropped() {
    let (mut doc, table) = table(&[&["H1", "H2", "H3"], &["", "", "x"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let row = cells_of(&doc, table, 1);
    // Neither empty cell has a surviving cell before it to merge into,
    // so both vanish instead of rendering as blank columns.
    assert!(doc.ann(row[0]).removed);
    assert!(doc.ann(row[1]).removed);
    assert!(!doc.ann(row[2]).removed);
}

#[test]
fn test_leading_marker_stays_as_content() {
    let (mut doc, table) = table(&[&["<<", "B"], &["1", "2"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let header = cells_of(&doc, table, 0);
    assert!(!doc.ann(header[0]).removed);
    assert_eq!(doc.ann(header[0]).col_span, 1);
}

#[test]
fn test_per_cell_alignment_markers() {
    let (mut doc, table) = table(&[&["A", "B", "C"], &[":l", "r:", ":c:"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let row = cells_of(&doc, table, 1);
    assert_eq!(doc.ann(row[0]).alignment, Alignment::Left);
    assert_eq!(doc.ann(row[1]).alignment, Alignment::Right);
    assert_eq!(doc.ann(row[2]).alignment, Alignment::Center);

    // Colons are stripped from the rendered content.
    assert_eq!(doc.plain_text(row[0]), "l");
    assert_eq!(doc.plain_text(row[1]), "r");
    assert_eq!(doc.plain_text(row[2]), "c");
}

#[test]
fn test_alignment_disabled_by_option() {
    let options = InferOptions {
        per_cell_alignment: false,
    };
    let (mut doc, table) = table(&[&["A"], &[":left"]]);
    process_table(&mut doc, table, &options);

    let row = cells_of(&doc, table, 1);
    assert_eq!(doc.ann(row[0]).alignment, Alignment::Default);
    assert_eq!(doc.plain_text(row[0]), ":left");
}

#[test]
fn test_bare_colons_are_not_alignment() {
    let (mut doc, table) = table(&[&["A", "B"], &[":", "::"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let row = cells_of(&doc, table, 1);
    assert_eq!(doc.ann(row[0]).alignment, Alignment::Default);
    assert_eq!(doc.ann(row[1]).alignment, Alignment::Default);
    assert_eq!(doc.plain_text(row[0]), ":");
    assert_eq!(doc.plain_text(row[1]), "::");
}

#[test]
fn test_alignment_survives_merge() {
    let (mut doc, table) = table(&[&[":wide:", "<<"], &["1", "2"]]);
    process_table(&mut doc, table, &InferOptions::default());

    let header = cells_of(&doc, table, 0);
    assert_eq!(doc.ann(header[0]).alignment, Alignment::Center);
    assert_eq!(doc.ann(header[0]).col_span, 2);
    assert_eq!(doc.plain_text(header[0]), "wide");
}

#[test]
fn test_inference_is_idempotent() {
    let (mut doc, table) = table(&[
        &["H1", "H2", "H3"],
        &["wide", "<<", ":r:"],
        &["^^", "a", "b"],
        &["===", "===", "==="],
        &["f1", "f2", "f3"],
    ]);
    let options = InferOptions::default();
    process_table(&mut doc, table, &options);

    let snapshot: Vec<_> = doc
        .table_rows(table)
        .into_iter()
        .flat_map(|row| {
            let mut anns = vec![doc.ann(row).clone()];
            anns.extend(doc.row_cells(row).into_iter().map(|c| doc.ann(c).clone()));
            anns
        })
        .collect();

    process_table(&mut doc, table, &options);

    let rerun: Vec<_> = doc
        .table_rows(table)
        .into_iter()
        .flat_map(|row| {
            let mut anns = vec![doc.ann(row).clone()];
            anns.extend(doc.row_cells(row).into_iter().map(|c| doc.ann(c).clone()));
            anns
        })
        .collect();

    assert_eq!(snapshot, rerun);
}

// ---------------------------------------------------------------------------
// Captions
// ---------------------------------------------------------------------------

fn doc_with_caption_paragraph(before: Option<&str>, after: Option<&str>) -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    if let Some(text) = before {
        let para = doc.push(root, NodeKind::Paragraph);
        doc.push_text(para, text);
    }
    let table = doc.push(root, NodeKind::Table);
    let row = doc.push(table, NodeKind::TableRow);
    let cell = doc.push(row, NodeKind::TableCell);
    doc.push_text(cell, "A");
    if let Some(text) = after {
        let para = doc.push(root, NodeKind::Paragraph);
        doc.push_text(para, text);
    }
    (doc, table)
}

#[test]
fn test_caption_from_preceding_paragraph() {
    let (mut doc, table) = doc_with_caption_paragraph(Some("[Results]"), None);
    process_document(&mut doc, &InferOptions::default());

    let caption = doc.ann(table).caption.clone().unwrap();
    assert_eq!(caption.text, "Results");
    assert!(caption.attrs.is_empty());

    let para = doc.prev_sibling(table).unwrap();
    assert!(doc.ann(para).removed);
}

#[test]
fn test_caption_with_ial_attributes() {
    let (mut doc, table) = doc_with_caption_paragraph(Some("[Caption] {#tbl .wide}"), None);
    process_document(&mut doc, &InferOptions::default());

    let caption = doc.ann(table).caption.clone().unwrap();
    assert_eq!(caption.text, "Caption");
    assert_eq!(caption.attrs.id.as_deref(), Some("tbl"));
    assert_eq!(caption.attrs.classes, vec!["wide".to_string()]);
}

#[test]
fn test_caption_colon_form() {
    let (mut doc, table) = doc_with_caption_paragraph(None, Some(": Quarterly totals {: .numbers}"));
    process_document(&mut doc, &InferOptions::default());

    let caption = doc.ann(table).caption.clone().unwrap();
    assert_eq!(caption.text, "Quarterly totals");
    assert_eq!(caption.attrs.classes, vec!["numbers".to_string()]);
}

#[test]
fn test_preceding_caption_wins_over_following() {
    let (mut doc, table) =
        doc_with_caption_paragraph(Some("[Before]"), Some("[After]"));
    process_document(&mut doc, &InferOptions::default());

    let caption = doc.ann(table).caption.clone().unwrap();
    assert_eq!(caption.text, "Before");

    // The losing paragraph stays renderable.
    let after = doc.next_sibling(table).unwrap();
    assert!(!doc.ann(after).removed);
}

#[test]
fn test_ordinary_paragraph_is_not_consumed() {
    let (mut doc, table) = doc_with_caption_paragraph(Some("Just some prose."), None);
    process_document(&mut doc, &InferOptions::default());

    assert!(doc.ann(table).caption.is_none());
    let para = doc.prev_sibling(table).unwrap();
    assert!(!doc.ann(para).removed);
}

#[test]
fn test_caption_search_skips_heading() {
    let mut doc = Document::new();
    let root = doc.root();
    let para = doc.push(root, NodeKind::Paragraph);
    doc.push_text(para, "[Skipped over the heading]");
    let heading = doc.push(root, NodeKind::Heading { level: 2 });
    doc.push_text(heading, "Data");
    let table = doc.push(root, NodeKind::Table);
    let row = doc.push(table, NodeKind::TableRow);
    let cell = doc.push(row, NodeKind::TableCell);
    doc.push_text(cell, "A");

    process_document(&mut doc, &InferOptions::default());

    let caption = doc.ann(table).caption.clone().unwrap();
    assert_eq!(caption.text, "Skipped over the heading");
}

#[test]
fn test_caption_row_inside_table() {
    let (mut doc, table) = table(&[&["A", "B"], &["1", "2"], &["[Inline caption]"]]);
    process_document(&mut doc, &InferOptions::default());

    assert_eq!(
        doc.ann(table).caption,
        Some(Caption {
            text: "Inline caption".to_string(),
            attrs: Default::default(),
        })
    );

    let rows = doc.table_rows(table);
    assert!(doc.ann(rows[2]).removed);
}

#[test]
fn test_caption_set_at_most_once() {
    let (mut doc, table) = doc_with_caption_paragraph(Some("[First]"), None);
    process_document(&mut doc, &InferOptions::default());
    process_document(&mut doc, &InferOptions::default());

    assert_eq!(doc.ann(table).caption.clone().unwrap().text, "First");
}
