//! Table caption detection
//!
//! A caption may sit in a paragraph just before the table, a paragraph
//! just after it, or in a dedicated final table row. The first source to
//! match wins; the consumed paragraph/row is flagged removed so it never
//! renders on its own. A trailing IAL block contributes id/class/key-value
//! attributes to the table.

use crate::core::tree::{Caption, Document, NodeId, NodeKind};
use crate::features::ial::{parse_trailing_ial, Attributes};

/// Attach a caption to `table` if one of the three sources matches.
/// Does nothing when the table already carries a caption.
pub fn attach_caption(doc: &mut Document, table: NodeId) {
    if doc.ann(table).caption.is_some() {
        return;
    }

    if let Some(para) = find_preceding_paragraph(doc, table) {
        if try_consume_paragraph(doc, table, para) {
            return;
        }
    }

    if let Some(para) = find_following_paragraph(doc, table) {
        if try_consume_paragraph(doc, table, para) {
            return;
        }
    }

    try_consume_caption_row(doc, table);
}

/// Nearest preceding sibling that is a non-blank paragraph, skipping blank
/// paragraphs and headings.
fn find_preceding_paragraph(doc: &Document, table: NodeId) -> Option<NodeId> {
    let mut current = doc.prev_sibling(table);
    while let Some(node) = current {
        match doc.kind(node) {
            NodeKind::Paragraph => {
                if doc.plain_text(node).trim().is_empty() {
                    current = doc.prev_sibling(node);
                } else {
                    return Some(node);
                }
            }
            NodeKind::Heading { .. } => current = doc.prev_sibling(node),
            _ => return None,
        }
    }
    None
}

/// Nearest following sibling paragraph, skipping blank paragraphs.
fn find_following_paragraph(doc: &Document, table: NodeId) -> Option<NodeId> {
    let mut current = doc.next_sibling(table);
    while let Some(node) = current {
        match doc.kind(node) {
            NodeKind::Paragraph => {
                if doc.plain_text(node).trim().is_empty() {
                    current = doc.next_sibling(node);
                } else {
                    return Some(node);
                }
            }
            _ => return None,
        }
    }
    None
}

/// If the paragraph matches a caption pattern, attach it and mark the
/// paragraph removed. Returns true when the caption was consumed.
fn try_consume_paragraph(doc: &mut Document, table: NodeId, para: NodeId) -> bool {
    if doc.ann(para).removed {
        return false;
    }
    let text = doc.plain_text(para);
    let Some(caption) = parse_caption_text(&text) else {
        return false;
    };
    doc.ann_mut(table).caption = Some(caption);
    doc.ann_mut(para).removed = true;
    true
}

/// Last table row whose only content is `[Caption]` (single cell, or every
/// cell carrying the bracket text). Consumed the same way a paragraph is.
fn try_consume_caption_row(doc: &mut Document, table: NodeId) {
    let rows = doc.table_rows(table);
    let caption_row = rows
        .iter()
        .rev()
        .copied()
        .find(|&row| is_caption_row(doc, row));
    let Some(row) = caption_row else {
        return;
    };

    let caption_cell = doc
        .row_cells(row)
        .into_iter()
        .find(|&cell| bracket_caption(doc.plain_text(cell).trim()).is_some());
    let Some(cell) = caption_cell else {
        return;
    };

    let text = doc.plain_text(cell);
    if let Some(inner) = bracket_caption(text.trim()) {
        doc.ann_mut(table).caption = Some(Caption {
            text: inner.to_string(),
            attrs: Attributes::default(),
        });
        doc.ann_mut(row).removed = true;
        for cell in doc.row_cells(row) {
            doc.ann_mut(cell).removed = true;
        }
    }
}

fn is_caption_row(doc: &Document, row: NodeId) -> bool {
    let cells = doc.row_cells(row);
    if cells.is_empty() {
        return false;
    }
    let matching = cells
        .iter()
        .filter(|&&cell| bracket_caption(doc.plain_text(cell).trim()).is_some())
        .count();
    matching > 0 && (cells.len() == 1 || matching == cells.len())
}

/// `[Caption]` with nothing after the bracket: returns the inner text.
fn bracket_caption(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('[')?;
    let close = rest.find(']')?;
    if rest[close + 1..].trim().is_empty() {
        Some(&rest[..close])
    } else {
        None
    }
}

/// Parse a caption paragraph.
///
/// Accepted shapes:
/// - `[Caption]` optionally followed by an IAL block
/// - `: Caption` (colon + space, at most three leading spaces) with an
///   optional trailing IAL block
pub(crate) fn parse_caption_text(text: &str) -> Option<Caption> {
    // Bracket form
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            let inner = &rest[..close];
            let after = rest[close + 1..].trim_start();
            if after.is_empty() {
                return Some(Caption {
                    text: inner.to_string(),
                    attrs: Attributes::default(),
                });
            }
            if after.starts_with('{') {
                if let Some((attrs, 0)) = parse_trailing_ial(after) {
                    return Some(Caption {
                        text: inner.to_string(),
                        attrs,
                    });
                }
            }
            return None;
        }
    }

    // Colon form: up to three leading spaces, then `: `
    let mut spaces = 0;
    let bytes = text.as_bytes();
    while spaces < 3 && spaces < bytes.len() && bytes[spaces] == b' ' {
        spaces += 1;
    }
    let rest = &text[spaces..];
    let body = rest
        .strip_prefix(": ")
        .or_else(|| rest.strip_prefix(":\t"))?;

    if let Some((attrs, ial_start)) = parse_trailing_ial(body) {
        let caption = body[..ial_start].trim();
        if caption.is_empty() && attrs.is_empty() {
            return None;
        }
        return Some(Caption {
            text: caption.to_string(),
            attrs,
        });
    }

    let caption = body.trim();
    if caption.is_empty() {
        return None;
    }
    Some(Caption {
        text: caption.to_string(),
        attrs: Attributes::default(),
    })
}
