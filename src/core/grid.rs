//! Logical grid materializer
//!
//! Turns an annotated table (rows of variable cell counts) into a dense
//! `rows × cols` grid of slots, each either empty or pointing at the cell
//! that covers it. Renderers consume the grid instead of re-deriving span
//! geometry from the tree.

use crate::core::tree::{Document, NodeId};

/// One grid position. `cell` is the covering cell, `is_owner` marks the
/// top-left slot of its span; the rest of the span are members.
#[derive(Debug, Clone, Default)]
pub struct GridSlot {
    pub cell: Option<NodeId>,
    pub row_span: u32,
    pub col_span: u32,
    pub is_owner: bool,
}

/// Dense span-aware view of a table
#[derive(Debug, Clone)]
pub struct LogicalGrid {
    rows: usize,
    cols: usize,
    visible_cols: usize,
    slots: Vec<GridSlot>,
    /// Source row node per grid row, so consumers can read row flags
    row_nodes: Vec<NodeId>,
}

impl LogicalGrid {
    /// Materialize the grid for `table`. Pure reader of annotations.
    /// Returns `None` for tables with no renderable rows or columns.
    pub fn build(doc: &Document, table: NodeId) -> Option<LogicalGrid> {
        let all_rows = doc.table_rows(table);

        // Logical width: the widest row by summed col_span, counting
        // removed helper cells too so indices stay aligned with the
        // annotations the HTML side uses.
        let cols = all_rows
            .iter()
            .map(|&row| {
                doc.row_cells(row)
                    .iter()
                    .map(|&cell| doc.ann(cell).col_span as usize)
                    .sum::<usize>()
            })
            .max()
            .unwrap_or(0);

        let rows: Vec<NodeId> = all_rows
            .into_iter()
            .filter(|&row| !doc.ann(row).removed)
            .collect();

        if rows.is_empty() || cols == 0 {
            return None;
        }

        let mut grid = LogicalGrid {
            rows: rows.len(),
            cols,
            visible_cols: 0,
            slots: vec![GridSlot::default(); rows.len() * cols],
            row_nodes: rows.clone(),
        };

        for (r, &row) in rows.iter().enumerate() {
            let mut col = 0usize;
            for cell in doc.row_cells(row) {
                let ann = doc.ann(cell);
                let col_span = (ann.col_span as usize).max(1);
                let row_span = (ann.row_span as usize).max(1);

                if !ann.removed {
                    // Skip slots already claimed by a span from above.
                    while col < cols && grid.at(r, col).map(|s| s.cell.is_some()) == Some(true) {
                        col += 1;
                    }
                    if col >= cols {
                        break;
                    }

                    for rr in 0..row_span {
                        for cc in 0..col_span {
                            let Some(slot) = grid.at_mut(r + rr, col + cc) else {
                                continue; // clamp at the grid bounds
                            };
                            slot.cell = Some(cell);
                            slot.row_span = row_span as u32;
                            slot.col_span = col_span as u32;
                            slot.is_owner = rr == 0 && cc == 0;
                        }
                    }
                }

                // Removed helpers still advance the cursor by their span
                // so later cells land where the annotations expect them.
                col += col_span;
            }
        }

        // Trailing columns that exist only as span bookkeeping are never
        // drawn.
        let mut last_used = None;
        for r in 0..grid.rows {
            for c in 0..grid.cols {
                if grid.at(r, c).map(|s| s.cell.is_some()) == Some(true) {
                    last_used = Some(last_used.map_or(c, |prev: usize| prev.max(c)));
                }
            }
        }
        grid.visible_cols = last_used.map_or(0, |c| c + 1);
        if grid.visible_cols == 0 {
            return None;
        }

        Some(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Full logical width including trailing helper columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Width actually drawn by renderers
    pub fn visible_cols(&self) -> usize {
        self.visible_cols
    }

    /// Source row node for grid row `r`
    pub fn row_node(&self, r: usize) -> Option<NodeId> {
        self.row_nodes.get(r).copied()
    }

    pub fn at(&self, r: usize, c: usize) -> Option<&GridSlot> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        self.slots.get(r * self.cols + c)
    }

    fn at_mut(&mut self, r: usize, c: usize) -> Option<&mut GridSlot> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        self.slots.get_mut(r * self.cols + c)
    }
}
