// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

//! Streaming pretty-printing with layout alternatives, bounded lookahead,
//! and aligned tables.
//!
//! A [`Doc`] is an algebraic description of a document: plain text, hard and
//! soft line breaks, concatenations, ordered layout [alternatives](alt),
//! [indentation](Doc::nest), and horizontally aligned [rows](row) and
//! [tables](table). Renderers turn a `Doc` into a [`TokenStream`]:
//! [`SimpleDocRenderer`] always resolves alternatives the same way, while
//! [`SmartDocRenderer`] speculatively renders the wider layouts and falls
//! back until each line fits within its width budget.
//!
//! ```rust
//! use pretty_stream::*;
//!
//! let items = Doc::softline().join(["aaa", "bbb", "ccc", "ddd"].map(Doc::text));
//! let doc = Doc::text("items:").concat_space(items.nest(2));
//!
//! let mut renderer = SmartDocRenderer::new(14);
//! assert_eq!(renderer.to_str(&doc).unwrap(), "items: aaa bbb\n  ccc ddd");
//! ```

mod codec;
mod doc;
mod edit;
mod render;
mod table;
mod token;
mod width;

#[cfg(test)]
mod tests;

pub use doc::{alt, cat, create_tables, inline, row, table, Doc, RowInfo};
pub use edit::{double_quote, single_quote, smart_quote, EditFn};
pub use render::simple::{SimpleDocRenderer, SimpleLayout};
pub use render::smart::SmartDocRenderer;
pub use render::{DocRenderer, OnEmit, Position, RenderError};
pub use token::{Token, TokenStream};
pub use width::{WidthHint, UNKNOWN};

// -------------------------------------------------------------------------------------------------
// Main Trait
// -------------------------------------------------------------------------------------------------

/// Conversion of domain values into documents.
pub trait ToDoc {
    fn to_doc(&self) -> Doc;

    /// Render through a [`SmartDocRenderer`] with the given line budget.
    fn render(&self, max_line_width: usize) -> Result<String, RenderError> {
        SmartDocRenderer::new(max_line_width).to_str(&self.to_doc())
    }
}
