// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use tracing::trace;

use crate::doc::{Doc, DocNode};
use crate::render::simple::SimpleLayout;
use crate::render::{
    OnEmit, Position, RenderCore, RenderError, RenderHalt, RenderResult, RenderState,
};
use crate::token::{Token, TokenStream};
use crate::width::{suffix_hints, WidthHint, UNKNOWN};

// -------------------------------------------------------------------------------------------------
// Lookahead Rendering
// -------------------------------------------------------------------------------------------------

/// A renderer that chooses between layout alternatives with bounded
/// lookahead so lines stay within a width budget.
///
/// Alternatives are assumed to be ordered narrowest first, so candidates are
/// tried in reverse: the widest single-line form first, falling back towards
/// the first alternative, which is rendered unconditionally when nothing
/// wider fits. Candidates are rendered speculatively under strict mode,
/// which aborts the attempt as soon as any token would push the column past
/// the budget; the estimated width of whatever follows on the same line is
/// charged against the candidate as well.
pub struct SmartDocRenderer {
    state: RenderState,
    max_line_width: usize,
}

impl SmartDocRenderer {
    pub fn new(max_line_width: usize) -> SmartDocRenderer {
        SmartDocRenderer {
            state: RenderState::new(SimpleLayout::ShortestLines),
            max_line_width,
        }
    }

    pub fn max_line_width(&self) -> usize {
        self.max_line_width
    }

    /// Register an emit hook; hooks run in registration order on every
    /// committed token and may replace it or abort the render. Buffered
    /// speculation is invisible to hooks.
    pub fn on_emit<F>(&mut self, hook: F)
    where
        F: FnMut(&Position, Token) -> Result<Token, RenderError> + 'static,
    {
        self.state.on_emit.push(Box::new(hook) as OnEmit);
    }

    fn render_smart(
        &mut self,
        doc: &Doc,
        suffix: WidthHint,
        out: &mut TokenStream,
    ) -> RenderResult<()> {
        match doc.node() {
            DocNode::Alt(alts) if alts.len() > 1 => self.render_with_lookahead(alts, suffix, out),
            DocNode::Cat(docs) => {
                // Thread the estimated width of each child's remainder so
                // alternatives can account for what shares their line.
                let suffixes = suffix_hints(docs, suffix);
                for (child, child_suffix) in docs.iter().zip(suffixes) {
                    self.render_smart(child, child_suffix, out)?;
                }
                Ok(())
            }
            _ => self.render_simple(doc, out),
        }
    }

    fn render_with_lookahead(
        &mut self,
        alts: &[Doc],
        suffix: WidthHint,
        out: &mut TokenStream,
    ) -> RenderResult<()> {
        let Some((fallback, candidates)) = alts.split_first() else {
            return Err(RenderError::Fail.into());
        };
        let limit = self.max_line_width;
        for (index, candidate) in candidates.iter().enumerate().rev() {
            let attempt =
                self.with_strict(limit, |r| r.buffered(|r, buf| r.render_simple(candidate, buf)));
            match attempt {
                Ok((tokens, end)) => {
                    if end.column + suffix.width > limit {
                        trace!(
                            candidate = index + 1,
                            end_column = end.column,
                            suffix_width = suffix.width,
                            "candidate leaves no room for the rest of the line"
                        );
                        continue;
                    }
                    trace!(candidate = index + 1, "candidate fits");
                    for token in tokens {
                        self.emit(token, out)?;
                    }
                    return Ok(());
                }
                Err(RenderHalt::LineWidthExceeded) => {
                    trace!(candidate = index + 1, "candidate exceeds the width budget");
                    continue;
                }
                Err(halt) => return Err(halt),
            }
        }
        self.render_smart(fallback, suffix, out)
    }
}

impl Default for SmartDocRenderer {
    /// The conventional 80-column budget.
    fn default() -> SmartDocRenderer {
        SmartDocRenderer::new(80)
    }
}

impl RenderCore for SmartDocRenderer {
    fn state(&mut self) -> &mut RenderState {
        &mut self.state
    }

    fn render_doc(&mut self, doc: &Doc, out: &mut TokenStream) -> RenderResult<()> {
        self.render_smart(doc, UNKNOWN, out)
    }
}
