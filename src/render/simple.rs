// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::doc::Doc;
use crate::render::{OnEmit, Position, RenderCore, RenderError, RenderResult, RenderState};
use crate::token::{Token, TokenStream};

// -------------------------------------------------------------------------------------------------
// Simple Rendering
// -------------------------------------------------------------------------------------------------

/// How the simple renderer resolves alternatives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimpleLayout {
    /// Always pick the first (narrowest, most line-broken) alternative.
    #[default]
    ShortestLines,
    /// Always pick the last (widest, most single-line) alternative.
    LongestLines,
}

impl SimpleLayout {
    pub(crate) fn pick<'a>(&self, alts: &'a [Doc]) -> Option<&'a Doc> {
        match self {
            SimpleLayout::ShortestLines => alts.first(),
            SimpleLayout::LongestLines => alts.last(),
        }
    }
}

/// A renderer that never weighs layouts: every alternative resolves by the
/// configured [`SimpleLayout`], rows and tables are buffered to measure
/// their columns, and everything else streams straight through.
pub struct SimpleDocRenderer {
    state: RenderState,
}

impl SimpleDocRenderer {
    pub fn new(simple_layout: SimpleLayout) -> SimpleDocRenderer {
        SimpleDocRenderer {
            state: RenderState::new(simple_layout),
        }
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
}

impl Default for SimpleDocRenderer {
    fn default() -> SimpleDocRenderer {
        SimpleDocRenderer::new(SimpleLayout::ShortestLines)
    }
}

impl RenderCore for SimpleDocRenderer {
    fn state(&mut self) -> &mut RenderState {
        &mut self.state
    }

    fn render_doc(&mut self, doc: &Doc, out: &mut TokenStream) -> RenderResult<()> {
        self.render_simple(doc, out)
    }
}
