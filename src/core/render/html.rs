//! HTML attribute injection
//!
//! The default HTML backend is span-unaware: it renders every cell,
//! including merged helpers and separator rows. This pass patches its
//! output after the fact: cells flagged removed are deleted outright, and
//! span/alignment annotations are spliced into the opening tags.
//!
//! It is a textual patch, not an HTML rewrite. Cell positions are matched
//! by counting `<table>`, `<tr>` and `<td>`/`<th>` boundaries with the
//! same counters the tree walk uses; markup the default backend does not
//! produce passes through untouched.

use fxhash::FxHashMap;

use crate::core::tree::Document;

#[derive(Debug, Clone)]
enum CellPatch {
    /// Delete the whole `<td>...</td>` / `<th>...</th>` element
    Remove,
    /// Attribute text to splice before the opening tag's `>`
    Attrs(String),
}

/// Cells with non-default annotations, keyed by (table, row, cell) index.
/// Row and cell indices count every source node, removed ones included,
/// because the unaware backend rendered them all.
fn collect_patches(doc: &Document) -> FxHashMap<(usize, usize, usize), CellPatch> {
    let mut patches = FxHashMap::default();
    for (t, table) in doc.tables().into_iter().enumerate() {
        for (r, row) in doc.table_rows(table).into_iter().enumerate() {
            for (c, cell) in doc.row_cells(row).into_iter().enumerate() {
                let ann = doc.ann(cell);
                if ann.removed {
                    patches.insert((t, r, c), CellPatch::Remove);
                } else {
                    let attrs = ann.to_attr_text();
                    if !attrs.is_empty() {
                        patches.insert((t, r, c), CellPatch::Attrs(attrs));
                    }
                }
            }
        }
    }
    patches
}

/// Patch a rendered HTML fragment with the document's table annotations.
pub fn inject_table_attributes(doc: &Document, html: &str) -> String {
    let patches = collect_patches(doc);
    if patches.is_empty() {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len() + 64);
    let mut i = 0usize;
    let mut table_idx: isize = -1;
    let mut row_idx: isize = -1;
    let mut col_idx = 0usize;
    let mut in_table = false;
    let mut in_row = false;

    while i < html.len() {
        let rest = &html[i..];

        // Track structure before cell handling so indices line up.
        if tag_open(rest, "<table") {
            in_table = true;
            table_idx += 1;
            row_idx = -1;
        } else if rest.starts_with("</table>") {
            in_table = false;
        } else if in_table && tag_open(rest, "<tr") {
            in_row = true;
            row_idx += 1;
            col_idx = 0;
        } else if in_row && rest.starts_with("</tr>") {
            in_row = false;
        }

        if in_row && (tag_open(rest, "<td") || tag_open(rest, "<th")) {
            let is_th = rest.starts_with("<th");
            let key = (
                table_idx.max(0) as usize,
                row_idx.max(0) as usize,
                col_idx,
            );
            match patches.get(&key) {
                Some(CellPatch::Remove) => {
                    let close = if is_th { "</th>" } else { "</td>" };
                    match rest.find(close) {
                        Some(pos) => i += pos + close.len(),
                        // No close tag: drop just the opening tag.
                        None => match rest.find('>') {
                            Some(gt) => i += gt + 1,
                            None => i = html.len(),
                        },
                    }
                    col_idx += 1;
                    continue;
                }
                Some(CellPatch::Attrs(attrs)) => {
                    match rest.find('>') {
                        Some(gt) => {
                            out.push_str(&rest[..gt]);
                            out.push_str(attrs);
                            out.push('>');
                            i += gt + 1;
                        }
                        None => {
                            out.push_str(rest);
                            i = html.len();
                        }
                    }
                    col_idx += 1;
                    continue;
                }
                None => col_idx += 1,
            }
        }

        let step = rest.chars().next().map_or(1, char::len_utf8);
        out.push_str(&rest[..step]);
        i += step;
    }

    out
}

/// `text` starts with `name` followed by the end of an opening tag's name
/// (`>`, whitespace, or `/`). Keeps `<th` from matching `<thead>`.
fn tag_open(text: &str, name: &str) -> bool {
    if !text.starts_with(name) {
        return false;
    }
    matches!(
        text.as_bytes().get(name.len()),
        Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'/')
    )
}
