//! Minimal document reader
//!
//! The real front end for this crate is a full CommonMark/GFM parser; it
//! hands over a finished tree and is out of scope here. This reader is the
//! fixture-grade stand-in used by the CLI, the wasm bindings and tests:
//! it understands blank-line-separated paragraphs, `#` headings and pipe
//! tables (with the GFM delimiter row), and keeps all cell content as
//! plain text. No inline grammar is interpreted.

use crate::core::tree::{Alignment, Document, NodeKind};

/// Parse a markdown-shaped string into a document tree.
pub fn parse_markdown(input: &str) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let lines: Vec<&str> = input.lines().collect();

    let mut i = 0;
    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if let Some((level, text)) = parse_heading(trimmed) {
            let heading = doc.push(root, NodeKind::Heading { level });
            doc.push_text(heading, text);
            i += 1;
            continue;
        }

        if is_table_line(trimmed) {
            let start = i;
            while i < lines.len() && is_table_line(lines[i].trim()) {
                i += 1;
            }
            build_table(&mut doc, &lines[start..i]);
            continue;
        }

        // Paragraph: consecutive plain lines joined with newlines.
        let start = i;
        while i < lines.len() {
            let t = lines[i].trim();
            if t.is_empty() || is_table_line(t) || t.starts_with('#') {
                break;
            }
            i += 1;
        }
        let text = lines[start..i].join("\n").trim().to_string();
        let para = doc.push(root, NodeKind::Paragraph);
        doc.push_text(para, text);
    }

    doc
}

fn parse_heading(line: &str) -> Option<(u8, String)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') && !rest.is_empty() {
        return None;
    }
    Some((hashes as u8, rest.trim().to_string()))
}

fn is_table_line(trimmed: &str) -> bool {
    trimmed.starts_with('|')
}

fn build_table(doc: &mut Document, lines: &[&str]) {
    let root = doc.root();
    let table = doc.push(root, NodeKind::Table);
    let mut column_aligns: Option<Vec<Alignment>> = None;

    for (idx, line) in lines.iter().enumerate() {
        let cells = split_row(line.trim());
        if idx == 1 && is_delimiter_row(&cells) {
            column_aligns = Some(cells.iter().map(|c| delimiter_alignment(c.trim())).collect());
            continue;
        }

        let row = doc.push(table, NodeKind::TableRow);
        for cell_text in &cells {
            let cell = doc.push(row, NodeKind::TableCell);
            let text = cell_text.trim();
            if !text.is_empty() {
                doc.push_text(cell, text);
            }
        }
    }

    // The delimiter row's alignments become the header cells' defaults,
    // which is where the terminal renderer reads column alignment from.
    if let Some(aligns) = column_aligns {
        if let Some(&header) = doc.table_rows(table).first() {
            for (c, cell) in doc.row_cells(header).into_iter().enumerate() {
                if let Some(&align) = aligns.get(c) {
                    if align != Alignment::Default {
                        doc.ann_mut(cell).alignment = align;
                    }
                }
            }
        }
    }
}

/// Split a pipe row into raw cell strings. One leading and one trailing
/// pipe delimit the row; `\|` escapes a literal pipe inside a cell.
fn split_row(trimmed: &str) -> Vec<String> {
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('|') => current.push('|'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '|' => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells
}

fn is_delimiter_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let t = cell.trim();
            !t.is_empty() && t.contains('-') && t.chars().all(|c| c == '-' || c == ':')
        })
}

fn delimiter_alignment(spec: &str) -> Alignment {
    match (spec.starts_with(':'), spec.ends_with(':')) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::Default,
    }
}
