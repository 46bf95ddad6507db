// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use tracing::trace;

use crate::token::{Token, TokenStream};

// -------------------------------------------------------------------------------------------------
// Cell Buffers
// -------------------------------------------------------------------------------------------------

/// A fully rendered cell: its tokens, the intrinsic width they occupy, and
/// the padded width the cell must reach when emitted.
pub(crate) struct CellBuffer {
    hpad: Token,
    buffer: Vec<Token>,
    min_width: usize,
    width: usize,
}

impl CellBuffer {
    pub(crate) fn new(hpad: Token) -> CellBuffer {
        assert!(!hpad.is_line(), "cell padding must not be a newline");
        CellBuffer {
            hpad,
            buffer: Vec::new(),
            min_width: 0,
            width: 0,
        }
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.min_width += token.width();
        // The padded width never drops below the intrinsic width.
        self.width = self.width.max(self.min_width);
        self.buffer.push(token);
    }

    pub(crate) fn extend<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        for token in tokens {
            self.push(token);
        }
    }

    pub(crate) fn min_width(&self) -> usize {
        self.min_width
    }

    pub(crate) fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    pub(crate) fn render_into(&self, out: &mut TokenStream, padding: bool) {
        out.extend(self.buffer.iter().cloned());
        if padding {
            for _ in 0..self.width.saturating_sub(self.min_width) {
                out.push(self.hpad.clone());
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Row Buffers
// -------------------------------------------------------------------------------------------------

/// A buffered row: cells plus the separator token and the per-column minimum
/// widths the row has accumulated so far.
pub(crate) struct RowBuffer {
    hsep: Token,
    min_col_widths: Vec<Option<usize>>,
    min_n_cols: usize,
    buffer: Vec<CellBuffer>,
}

impl RowBuffer {
    pub(crate) fn new(hsep: Token, min_col_widths: Vec<Option<usize>>) -> RowBuffer {
        assert!(!hsep.is_line(), "cell separator must not be a newline");
        RowBuffer {
            hsep,
            min_col_widths,
            min_n_cols: 0,
            buffer: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, cell: CellBuffer) {
        self.min_n_cols += 1;
        self.buffer.push(cell);
    }

    pub(crate) fn min_n_cols(&self) -> usize {
        self.min_n_cols
    }

    pub(crate) fn cells(&self) -> &[CellBuffer] {
        &self.buffer
    }

    pub(crate) fn min_col_widths(&self) -> &[Option<usize>] {
        &self.min_col_widths
    }

    /// Merge externally provided per-column minimums, element-wise maximum
    /// with missing positions treated as zero.
    pub(crate) fn merge_min_col_widths(&mut self, min_col_widths: &[Option<usize>]) {
        self.min_n_cols = self.min_n_cols.max(min_col_widths.len());
        let len = self.min_col_widths.len().max(min_col_widths.len());
        let mut merged = Vec::with_capacity(len);
        for j in 0..len {
            let w1 = self.min_col_widths.get(j).copied().flatten().unwrap_or(0);
            let w2 = min_col_widths.get(j).copied().flatten().unwrap_or(0);
            merged.push(Some(w1.max(w2)));
        }
        self.min_col_widths = merged;
    }

    /// Propagate the accumulated column minimums into the cell widths.
    pub(crate) fn update(&mut self) {
        for (cell, min_width) in self.buffer.iter_mut().zip(&self.min_col_widths) {
            if let Some(width) = min_width {
                cell.set_width(*width);
            }
        }
    }

    /// Every cell but the last is padded out to its column width and followed
    /// by the separator; the final cell carries no trailing padding.
    pub(crate) fn render_into(&self, out: &mut TokenStream) {
        let last = self.buffer.len().saturating_sub(1);
        for (j, cell) in self.buffer.iter().enumerate() {
            if j < last {
                cell.render_into(out, true);
                out.push(self.hsep.clone());
            } else {
                cell.render_into(out, false);
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Table Buffers
// -------------------------------------------------------------------------------------------------

/// Buffered rows with column widths unified across all of them.
#[derive(Default)]
pub(crate) struct TableBuffer {
    n_cols: usize,
    buffer: Vec<RowBuffer>,
    col_widths: Vec<usize>,
}

impl TableBuffer {
    pub(crate) fn new() -> TableBuffer {
        TableBuffer::default()
    }

    pub(crate) fn push(&mut self, row: RowBuffer) {
        self.n_cols = self.n_cols.max(row.min_n_cols());
        let cell_minima: Vec<Option<usize>> = row
            .cells()
            .iter()
            .map(|cell| Some(cell.min_width()))
            .collect();
        self.merge_col_widths(&cell_minima);
        let declared = row.min_col_widths().to_vec();
        self.merge_col_widths(&declared);
        self.buffer.push(row);
    }

    fn merge_col_widths(&mut self, widths: &[Option<usize>]) {
        if self.col_widths.is_empty() {
            self.col_widths = widths.iter().map(|w| w.unwrap_or(0)).collect();
            return;
        }
        let len = self.col_widths.len().max(widths.len());
        let mut merged = Vec::with_capacity(len);
        for j in 0..len {
            let w1 = self.col_widths.get(j).copied().unwrap_or(0);
            let w2 = widths.get(j).copied().flatten().unwrap_or(0);
            merged.push(w1.max(w2));
        }
        self.col_widths = merged;
    }

    /// Push the unified column widths back down into every row and cell.
    pub(crate) fn update(&mut self) {
        let col_widths: Vec<Option<usize>> = self.col_widths.iter().map(|w| Some(*w)).collect();
        for row in &mut self.buffer {
            row.merge_min_col_widths(&col_widths);
            row.update();
        }
        trace!(
            n_cols = self.n_cols,
            n_rows = self.buffer.len(),
            "unified table column widths"
        );
    }

    pub(crate) fn render_into(&self, out: &mut TokenStream) {
        for row in &self.buffer {
            row.render_into(out);
            out.push(Token::line());
        }
    }
}
