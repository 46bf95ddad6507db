// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::doc::{Doc, DocNode, RowInfo};
use crate::table::{CellBuffer, RowBuffer, TableBuffer};
use crate::token::{Token, TokenStream};

pub(crate) mod simple;
pub(crate) mod smart;

use simple::SimpleLayout;

// -------------------------------------------------------------------------------------------------
// Errors
// -------------------------------------------------------------------------------------------------

/// A document could not be rendered.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A `Fail` document was selected and no alternative remained.
    #[error("no renderable alternative: a Fail document was selected")]
    Fail,
    /// An emit hook refused the token stream.
    #[error("emit hook aborted rendering: {0}")]
    Aborted(String),
}

/// Internal control flow for the render recursion. `LineWidthExceeded` is the
/// strict-mode signal; it is always caught by the `Alt` speculation that
/// enabled strict mode and never crosses the public API.
pub(crate) enum RenderHalt {
    LineWidthExceeded,
    Error(RenderError),
}

impl From<RenderError> for RenderHalt {
    fn from(error: RenderError) -> RenderHalt {
        RenderHalt::Error(error)
    }
}

pub(crate) type RenderResult<T> = Result<T, RenderHalt>;

// -------------------------------------------------------------------------------------------------
// Positions and Emit Hooks
// -------------------------------------------------------------------------------------------------

/// A renderer's current output position. `line` and `column` are 0-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// An emit hook: sees every token about to be emitted, in registration
/// order, and may replace it or abort the render.
pub type OnEmit = Box<dyn FnMut(&Position, Token) -> Result<Token, RenderError>>;

/// Per-render state shared by both renderers: the output position, the
/// position stack backing scoped buffering, the registered emit hooks, and
/// the scoped strict-mode width budget.
pub(crate) struct RenderState {
    pub(crate) layout: SimpleLayout,
    pub(crate) pos: Position,
    pub(crate) position_stack: Vec<Position>,
    pub(crate) on_emit: Vec<OnEmit>,
    buffer_depth: usize,
    strict_width: Option<usize>,
    strict_depth: usize,
}

impl RenderState {
    pub(crate) fn new(layout: SimpleLayout) -> RenderState {
        RenderState {
            layout,
            pos: Position::default(),
            position_stack: Vec::new(),
            on_emit: Vec::new(),
            buffer_depth: 0,
            strict_width: None,
            strict_depth: 0,
        }
    }

    /// Drop per-render state; registered hooks are configuration and stay.
    fn reset(&mut self) {
        self.pos = Position::default();
        self.position_stack.clear();
        self.buffer_depth = 0;
        self.strict_width = None;
        self.strict_depth = 0;
    }
}

// -------------------------------------------------------------------------------------------------
// Rendering Core
// -------------------------------------------------------------------------------------------------

/// The shared render recursion. `render_doc` is the dispatch point each
/// renderer owns: the simple renderer forwards straight to `render_simple`,
/// the smart renderer intercepts alternatives for lookahead. Everything else
/// is provided.
pub(crate) trait RenderCore {
    fn state(&mut self) -> &mut RenderState;

    fn render_doc(&mut self, doc: &Doc, out: &mut TokenStream) -> RenderResult<()>;

    /// The emission contract: every token passes through the registered
    /// hooks in order, then the strict-mode budget check, then the position
    /// update, and only then lands in the output.
    ///
    /// While buffering, the hook chain is bypassed: buffered tokens are
    /// either discarded or re-emitted at commit, and hooks must see each
    /// committed token exactly once. The position still advances (the
    /// buffering scope restores it on exit) so strict mode can account for
    /// the speculative column.
    fn emit(&mut self, token: Token, out: &mut TokenStream) -> RenderResult<()> {
        let state = self.state();
        let mut token = token;
        if state.buffer_depth == 0 {
            for hook in &mut state.on_emit {
                token = hook(&state.pos, token).map_err(RenderHalt::Error)?;
            }
        }
        if let Some(limit) = state.strict_width {
            // A line break resets the column and can never overflow.
            if !token.is_line() && state.pos.column + token.width() > limit {
                return Err(RenderHalt::LineWidthExceeded);
            }
        }
        if token.is_line() {
            state.pos.line += 1;
            state.pos.column = 0;
        } else {
            state.pos.column += token.width();
        }
        out.push(token);
        Ok(())
    }

    fn emit_repeat(
        &mut self,
        token: Token,
        count: usize,
        out: &mut TokenStream,
    ) -> RenderResult<()> {
        for _ in 0..count {
            self.emit(token.clone(), out)?;
        }
        Ok(())
    }

    /// Render into a scratch stream under a saved position. The position is
    /// restored on every exit path; the speculative end position is reported
    /// alongside the buffer so callers can judge the result.
    fn buffered<F>(&mut self, f: F) -> RenderResult<(TokenStream, Position)>
    where
        Self: Sized,
        F: FnOnce(&mut Self, &mut TokenStream) -> RenderResult<()>,
    {
        let state = self.state();
        state.position_stack.push(state.pos);
        state.buffer_depth += 1;
        let mut buffer = TokenStream::new();
        let result = f(self, &mut buffer);
        let state = self.state();
        state.buffer_depth -= 1;
        let end = state.pos;
        if let Some(saved) = state.position_stack.pop() {
            state.pos = saved;
        }
        result.map(|()| (buffer, end))
    }

    /// Run `f` with the strict width budget enabled; nesting-safe.
    fn with_strict<T>(&mut self, limit: usize, f: impl FnOnce(&mut Self) -> T) -> T
    where
        Self: Sized,
    {
        {
            let state = self.state();
            state.strict_depth += 1;
            state.strict_width = Some(limit);
        }
        let result = f(self);
        let state = self.state();
        state.strict_depth -= 1;
        if state.strict_depth == 0 {
            state.strict_width = None;
        }
        result
    }

    /// The per-variant rules that need no lookahead.
    fn render_simple(&mut self, doc: &Doc, out: &mut TokenStream) -> RenderResult<()>
    where
        Self: Sized,
    {
        match doc.node() {
            DocNode::Text(token) => self.emit(token.clone(), out),
            DocNode::Alt(alts) => {
                let layout = self.state().layout;
                match layout.pick(alts) {
                    Some(chosen) => self.render_doc(chosen, out),
                    None => Err(RenderError::Fail.into()),
                }
            }
            DocNode::Cat(docs) => {
                for doc in docs {
                    self.render_doc(doc, out)?;
                }
                Ok(())
            }
            DocNode::Row { cells, info } => {
                let row_buffer = self.buffer_row(cells, info)?;
                let mut tokens = TokenStream::new();
                row_buffer.render_into(&mut tokens);
                for token in tokens {
                    self.emit(token, out)?;
                }
                self.emit(Token::line(), out)
            }
            DocNode::Table(rows) => {
                let table_buffer = self.buffer_table(rows)?;
                let mut tokens = TokenStream::new();
                table_buffer.render_into(&mut tokens);
                for token in tokens {
                    self.emit(token, out)?;
                }
                Ok(())
            }
            DocNode::Nest {
                indent,
                doc,
                overlap,
            } => self.render_nest(*indent, doc, *overlap, out),
            DocNode::Edit { function, doc } => {
                let (buffer, _) = self.buffered(|r, buf| r.render_doc(doc, buf))?;
                for token in function.apply(buffer) {
                    self.emit(token, out)?;
                }
                Ok(())
            }
        }
    }

    /// Buffer the nested document, then re-emit it with indentation spliced
    /// in before each line's first content token. Leading spaces accumulate
    /// as extra caller-requested indent; the first line only gets pushed out
    /// when `overlap` asks for it and the indent lies beyond the current
    /// column.
    fn render_nest(
        &mut self,
        indent: usize,
        doc: &Doc,
        overlap: bool,
        out: &mut TokenStream,
    ) -> RenderResult<()>
    where
        Self: Sized,
    {
        let start_column = self.state().pos.column;
        let (tokens, _) = self.buffered(|r, buf| r.render_doc(doc, buf))?;
        let mut first_line = true;
        let mut has_content = false;
        let mut line_indent = 0usize;
        for token in tokens {
            if token.is_line() {
                first_line = false;
                has_content = false;
                line_indent = 0;
                self.emit(token, out)?;
            } else if has_content {
                self.emit(token, out)?;
            } else if token.is_space() {
                line_indent += 1;
            } else {
                has_content = true;
                if first_line {
                    if overlap && indent > start_column {
                        self.emit_repeat(
                            Token::space(),
                            line_indent + indent - start_column,
                            out,
                        )?;
                    }
                } else {
                    self.emit_repeat(Token::space(), line_indent + indent, out)?;
                }
                self.emit(token, out)?;
            }
        }
        Ok(())
    }

    fn buffer_row(&mut self, cells: &[Doc], info: &RowInfo) -> RenderResult<RowBuffer>
    where
        Self: Sized,
    {
        let mut row_buffer = RowBuffer::new(info.hsep.clone(), info.min_col_widths.clone());
        for cell in cells {
            let (tokens, _) = self.buffered(|r, buf| r.render_doc(cell, buf))?;
            let mut cell_buffer = CellBuffer::new(info.hpad.clone());
            cell_buffer.extend(tokens);
            row_buffer.push(cell_buffer);
        }
        row_buffer.update();
        Ok(row_buffer)
    }

    fn buffer_table(&mut self, rows: &[Doc]) -> RenderResult<TableBuffer>
    where
        Self: Sized,
    {
        let mut table_buffer = TableBuffer::new();
        for row in rows {
            match row.node() {
                DocNode::Row { cells, info } => {
                    table_buffer.push(self.buffer_row(cells, info)?);
                }
                _ => unreachable!("table contains non-row"),
            }
        }
        table_buffer.update();
        Ok(table_buffer)
    }
}

// -------------------------------------------------------------------------------------------------
// Public Interface
// -------------------------------------------------------------------------------------------------

/// Render documents as token streams.
///
/// A renderer owns its in-flight position state, so one instance must not be
/// shared between concurrent renderings; per-render state is reset at the
/// start of every call, while registered emit hooks persist as
/// configuration.
pub trait DocRenderer {
    /// Render a document as a stream of tokens.
    fn render(&mut self, doc: &Doc) -> Result<TokenStream, RenderError>;

    /// Render a document and concatenate the token texts.
    fn to_str(&mut self, doc: &Doc) -> Result<String, RenderError> {
        Ok(self.render(doc)?.to_string())
    }
}

impl<R: RenderCore> DocRenderer for R {
    fn render(&mut self, doc: &Doc) -> Result<TokenStream, RenderError> {
        self.state().reset();
        let mut out = TokenStream::new();
        match self.render_doc(doc, &mut out) {
            Ok(()) => Ok(out),
            Err(RenderHalt::Error(error)) => Err(error),
            // Strict mode only exists inside an Alt speculation, and every
            // speculation catches this signal.
            Err(RenderHalt::LineWidthExceeded) => {
                unreachable!("line-width signal escaped speculative rendering")
            }
        }
    }
}
