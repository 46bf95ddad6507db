// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::{BitOr, Div};
use std::rc::Rc;

use once_cell::unsync::Lazy;

use crate::edit::EditFn;
use crate::token::Token;
use crate::width::{WidthHint, UNKNOWN};

// -------------------------------------------------------------------------------------------------
// Documents
// -------------------------------------------------------------------------------------------------

/// An algebraic description of a document: what to print and which layouts
/// are acceptable. Documents are immutable and cheaply shareable; all
/// normalization happens in the constructors, and the invariants they
/// establish hold for the lifetime of the value.
pub struct Doc(Rc<DocNode>);

pub(crate) enum DocNode {
    /// One token. Never contains whitespace other than the three sentinels.
    Text(Token),
    /// Concatenation. No child is a `Cat` or `Empty`; at least two children.
    Cat(Vec<Doc>),
    /// Ordered layout alternatives, narrowest first. No child is an `Alt`.
    Alt(Vec<Doc>),
    /// Indentation. `indent > 0`, child is neither a `Nest` nor `Empty`.
    Nest {
        indent: usize,
        doc: Doc,
        overlap: bool,
    },
    /// Horizontally aligned cells. No cell is a `Row`.
    Row { cells: Vec<Doc>, info: RowInfo },
    /// A sequence of rows rendered with unified column widths.
    Table(Vec<Doc>),
    /// A post-render token filter applied to the rendering of `doc`.
    Edit { function: EditFn, doc: Doc },
}

impl DocNode {
    fn into_doc(self) -> Doc {
        Doc(Rc::new(self))
    }
}

impl Clone for Doc {
    fn clone(&self) -> Self {
        Doc(Rc::clone(&self.0))
    }
}

impl PartialEq for Doc {
    fn eq(&self, other: &Doc) -> bool {
        self.ptr_eq(other) || self.node() == other.node()
    }
}

impl Eq for Doc {}

impl PartialEq for DocNode {
    fn eq(&self, other: &DocNode) -> bool {
        use DocNode as N;
        match (self, other) {
            (N::Text(a), N::Text(b)) => a == b,
            (N::Cat(a), N::Cat(b)) => a == b,
            (N::Alt(a), N::Alt(b)) => a == b,
            (
                N::Nest {
                    indent: ia,
                    doc: da,
                    overlap: oa,
                },
                N::Nest {
                    indent: ib,
                    doc: db,
                    overlap: ob,
                },
            ) => ia == ib && oa == ob && da == db,
            (
                N::Row {
                    cells: ca,
                    info: fa,
                },
                N::Row {
                    cells: cb,
                    info: fb,
                },
            ) => fa == fb && ca == cb,
            (N::Table(a), N::Table(b)) => a == b,
            (
                N::Edit {
                    function: fa,
                    doc: da,
                },
                N::Edit {
                    function: fb,
                    doc: db,
                },
            ) => fa == fb && da == db,
            _ => false,
        }
    }
}

impl Eq for DocNode {}

// -----------------------------------------------
// Row Settings
// -----------------------------------------------

/// Layout settings shared by every cell of a row.
///
/// `hpad` pads short cells up to the column width and must be a single
/// non-newline character; `hsep` separates adjacent cells and must not be a
/// newline. `min_col_widths` declares per-column lower bounds, and
/// `table_type` tags rows so that only like-tagged neighbours are grouped by
/// [`create_tables`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowInfo {
    pub table_type: Option<String>,
    pub hpad: Token,
    pub hsep: Token,
    pub min_col_widths: Vec<Option<usize>>,
}

impl Default for RowInfo {
    fn default() -> Self {
        RowInfo {
            table_type: None,
            hpad: Token::space(),
            hsep: Token::space(),
            min_col_widths: Vec::new(),
        }
    }
}

// -----------------------------------------------
// Thread Locals
// -----------------------------------------------

thread_local! {
    static EMPTY_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::empty())));
    static SPACE_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::space())));
    static LINE_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::line())));
    static SOFTLINE_DOC: Lazy<Rc<DocNode>> =
        Lazy::new(|| Rc::new(DocNode::Alt(vec![Doc::line(), Doc::space()])));
    static FAIL_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Alt(Vec::new())));
    static LPAREN_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::new("("))));
    static RPAREN_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::new(")"))));
    static LANGLE_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::new("<"))));
    static RANGLE_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::new(">"))));
    static LBRACKET_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::new("["))));
    static RBRACKET_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::new("]"))));
    static LBRACE_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::new("{"))));
    static RBRACE_DOC: Lazy<Rc<DocNode>> = Lazy::new(|| Rc::new(DocNode::Text(Token::new("}"))));
}

impl Doc {
    // -------------------------------------------
    // Core Constructors
    // -------------------------------------------

    /// The empty document: renders to nothing, identity for [`cat`].
    pub fn empty() -> Doc {
        EMPTY_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// A single blank.
    pub fn space() -> Doc {
        SPACE_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// A hard line break.
    pub fn line() -> Doc {
        LINE_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// Break here if needed, otherwise print one space: `Alt(Line, Space)`.
    pub fn softline() -> Doc {
        SOFTLINE_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// The unrenderable document: an `Alt` with no alternatives.
    pub fn fail() -> Doc {
        FAIL_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// A document holding exactly one token.
    ///
    /// `""`, `" "`, and `"\n"` resolve to the interned [`Doc::empty`],
    /// [`Doc::space`], and [`Doc::line`]; any other whitespace in `text` is a
    /// programmer error. Use [`Doc::words`] or [`Doc::lines`] (or the `From`
    /// impls for strings) to build documents out of free-form text.
    pub fn text<S: Into<String>>(text: S) -> Doc {
        Doc::from_token(Token::new(text))
    }

    pub(crate) fn from_token(token: Token) -> Doc {
        if token.is_empty() {
            Doc::empty()
        } else if token.is_space() {
            Doc::space()
        } else if token.is_line() {
            Doc::line()
        } else {
            DocNode::Text(token).into_doc()
        }
    }

    /// Split `text` on single whitespace characters and join the pieces with
    /// spaces. Runs of whitespace are preserved one space per character.
    pub fn words(text: &str) -> Doc {
        Doc::space().join(text.split(|c: char| c.is_whitespace()).map(Doc::text))
    }

    /// Split `text` into lines (and each line into words) joined with hard
    /// line breaks.
    pub fn lines(text: &str) -> Doc {
        Doc::line().join(text.lines().map(Doc::words))
    }

    /// `n` spaces.
    pub fn spaces(n: usize) -> Doc {
        cat((0..n).map(|_| Doc::space()))
    }

    // -------------------------------------------
    // Combinators
    // -------------------------------------------

    /// Compose two documents; also available as the `/` operator.
    pub fn concat<D: Into<Doc>>(self, other: D) -> Doc {
        cat([self, other.into()])
    }

    /// Compose two documents separated by a single space, dropping the space
    /// when either side is empty, is itself a space, or already touches a
    /// space at the seam.
    pub fn concat_space<D: Into<Doc>>(self, other: D) -> Doc {
        let other: Doc = other.into();
        if self.is_empty() || self.ptr_eq(&Doc::space()) {
            return other;
        }
        if other.is_empty() || other.ptr_eq(&Doc::space()) {
            return self;
        }
        let touches_space = matches!(
            self.node(),
            DocNode::Cat(docs) if docs.last().is_some_and(|d| d.ptr_eq(&Doc::space()))
        ) || matches!(
            other.node(),
            DocNode::Cat(docs) if docs.first().is_some_and(|d| d.ptr_eq(&Doc::space()))
        );
        if touches_space {
            self.concat(other)
        } else {
            cat([self, Doc::space(), other])
        }
    }

    /// Compose a series of documents separated by this document.
    ///
    /// Separators go between the top-level items only; an item that is
    /// already a `Cat` is treated as one unit and flattened afterwards.
    pub fn join<I>(&self, docs: I) -> Doc
    where
        I: IntoIterator,
        I::Item: Into<Doc>,
    {
        let mut parts: Vec<Doc> = Vec::new();
        for doc in docs {
            if !parts.is_empty() {
                parts.push(self.clone());
            }
            parts.push(doc.into());
        }
        cat(parts)
    }

    /// Indent every line of `self` after the first by `indent` columns.
    ///
    /// Nested nests merge by summing indents; nesting the empty document is
    /// the empty document; a zero indent is a no-op.
    pub fn nest(self, indent: usize) -> Doc {
        Doc::make_nest(indent, self, false)
    }

    /// Like [`Doc::nest`], but the first line is also pushed out to `indent`
    /// when the current column has not reached it yet.
    pub fn nest_overlap(self, indent: usize) -> Doc {
        Doc::make_nest(indent, self, true)
    }

    pub(crate) fn make_nest(indent: usize, doc: Doc, overlap: bool) -> Doc {
        if doc.is_empty() {
            return Doc::empty();
        }
        let (indent, doc) = if let DocNode::Nest {
            indent: inner,
            doc: inner_doc,
            ..
        } = doc.node()
        {
            (indent + *inner, inner_doc.clone())
        } else {
            (indent, doc)
        };
        if indent == 0 {
            return doc;
        }
        DocNode::Nest {
            indent,
            doc,
            overlap,
        }
        .into_doc()
    }

    /// Surround `self` with `(` and `)`.
    pub fn parens(self) -> Doc {
        cat([Doc::lparen(), self, Doc::rparen()])
    }

    /// Surround `self` with `<` and `>`.
    pub fn angles(self) -> Doc {
        cat([Doc::langle(), self, Doc::rangle()])
    }

    /// Surround `self` with `[` and `]`.
    pub fn brackets(self) -> Doc {
        cat([Doc::lbracket(), self, Doc::rbracket()])
    }

    /// Surround `self` with `{` and `}`.
    pub fn braces(self) -> Doc {
        cat([Doc::lbrace(), self, Doc::rbrace()])
    }

    // -------------------------------------------
    // Constant Constructors
    // -------------------------------------------

    /// The `(` document.
    pub fn lparen() -> Doc {
        LPAREN_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// The `)` document.
    pub fn rparen() -> Doc {
        RPAREN_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// The `<` document.
    pub fn langle() -> Doc {
        LANGLE_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// The `>` document.
    pub fn rangle() -> Doc {
        RANGLE_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// The `[` document.
    pub fn lbracket() -> Doc {
        LBRACKET_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// The `]` document.
    pub fn rbracket() -> Doc {
        RBRACKET_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// The `{` document.
    pub fn lbrace() -> Doc {
        LBRACE_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    /// The `}` document.
    pub fn rbrace() -> Doc {
        RBRACE_DOC.with(|lazy| Doc(Rc::clone(lazy)))
    }

    // -------------------------------------------
    // Inspection
    // -------------------------------------------

    pub(crate) fn node(&self) -> &DocNode {
        &self.0
    }

    /// Identity comparison: true when both values share one interned or
    /// constructed node.
    pub fn ptr_eq(&self, other: &Doc) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.ptr_eq(&Doc::empty())
    }

    /// Estimate the width of this document's first rendered line.
    pub fn width_hint(&self) -> WidthHint {
        match self.node() {
            DocNode::Text(token) => {
                if token.is_line() {
                    WidthHint::new(0, true)
                } else {
                    WidthHint::new(token.width(), false)
                }
            }
            DocNode::Cat(docs) => {
                let mut hint = UNKNOWN;
                for doc in docs {
                    hint += doc.width_hint();
                    if hint.end_of_line {
                        break;
                    }
                }
                hint
            }
            // The first alternative is assumed to have the narrowest first line.
            DocNode::Alt(alts) => alts.first().map(Doc::width_hint).unwrap_or(UNKNOWN),
            DocNode::Nest {
                indent,
                doc,
                overlap,
            } => {
                if *overlap {
                    WidthHint::new(*indent, false) + doc.width_hint()
                } else {
                    doc.width_hint()
                }
            }
            DocNode::Row { cells, info } => {
                let mut width = 0;
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        width += info.hsep.width();
                    }
                    width += cell.width_hint().width;
                }
                // Rows always terminate their line.
                WidthHint::new(width, true)
            }
            DocNode::Table(rows) => rows.first().map(Doc::width_hint).unwrap_or(UNKNOWN),
            // Editors must not materially change width.
            DocNode::Edit { doc, .. } => doc.width_hint(),
        }
    }

    // -------------------------------------------
    // Checked Construction
    // -------------------------------------------

    pub(crate) fn new_alt(alts: Vec<Doc>) -> Doc {
        if alts.is_empty() {
            return Doc::fail();
        }
        if alts.len() == 2 && alts[0] == Doc::line() && alts[1] == Doc::space() {
            return Doc::softline();
        }
        DocNode::Alt(alts).into_doc()
    }

    pub(crate) fn new_row(cells: Vec<Doc>, info: RowInfo) -> Doc {
        assert!(
            !info.hpad.is_line() && info.hpad.width() == 1,
            "row hpad must be a single non-newline character: {:?}",
            info.hpad
        );
        assert!(
            !info.hsep.is_line(),
            "row hsep must not be a newline: {:?}",
            info.hsep
        );
        assert!(
            cells
                .iter()
                .all(|cell| !matches!(cell.node(), DocNode::Row { .. })),
            "row contains row"
        );
        DocNode::Row { cells, info }.into_doc()
    }

    pub(crate) fn new_table(rows: Vec<Doc>) -> Doc {
        assert!(
            rows.iter()
                .all(|row| matches!(row.node(), DocNode::Row { .. })),
            "table contains non-row"
        );
        DocNode::Table(rows).into_doc()
    }

    pub(crate) fn new_edit(function: EditFn, doc: Doc) -> Doc {
        DocNode::Edit { function, doc }.into_doc()
    }
}

// -------------------------------------------------------------------------------------------------
// Smart Constructors
// -------------------------------------------------------------------------------------------------

/// Concatenate a series of documents.
///
/// Inputs are normalized: existing `Cat`s are flattened, empties are dropped,
/// and strings are split into words and lines. Zero surviving children yield
/// [`Doc::empty`], one yields that child. `cat` and `Doc::empty()` form a
/// monoid.
pub fn cat<I>(docs: I) -> Doc
where
    I: IntoIterator,
    I::Item: Into<Doc>,
{
    let mut flat: Vec<Doc> = Vec::new();
    for doc in docs {
        let doc: Doc = doc.into();
        if doc.is_empty() {
            continue;
        }
        if let DocNode::Cat(children) = doc.node() {
            flat.extend(children.iter().cloned());
        } else {
            flat.push(doc);
        }
    }
    match flat.len() {
        0 => Doc::empty(),
        1 => flat.swap_remove(0),
        _ => DocNode::Cat(flat).into_doc(),
    }
}

/// Combine a series of documents as ordered layout alternatives, narrowest
/// first. Existing `Alt`s are flattened; a single alternative collapses to
/// itself; none at all is [`Doc::fail`].
pub fn alt<I>(docs: I) -> Doc
where
    I: IntoIterator,
    I::Item: Into<Doc>,
{
    let mut alts: Vec<Doc> = Vec::new();
    for doc in docs {
        let doc: Doc = doc.into();
        if let DocNode::Alt(children) = doc.node() {
            alts.extend(children.iter().cloned());
        } else {
            alts.push(doc);
        }
    }
    if alts.len() == 1 {
        return alts.swap_remove(0);
    }
    Doc::new_alt(alts)
}

/// Build a row of horizontally aligned cells.
///
/// A cell that is itself a `Row` with identical settings contributes its
/// cells instead of nesting; rows with different settings may not be mixed.
pub fn row<I>(cells: I, info: RowInfo) -> Doc
where
    I: IntoIterator,
    I::Item: Into<Doc>,
{
    let mut adopted: Vec<Doc> = Vec::new();
    for cell in cells {
        let cell: Doc = cell.into();
        if let DocNode::Row {
            cells: inner,
            info: inner_info,
        } = cell.node()
        {
            assert!(
                *inner_info == info,
                "row can only adopt cells from a row with identical settings"
            );
            adopted.extend(inner.iter().cloned());
        } else {
            adopted.push(cell);
        }
    }
    Doc::new_row(adopted, info)
}

/// Build a table from a sequence of rows. Every element must be a `Row`.
pub fn table<I>(rows: I) -> Doc
where
    I: IntoIterator<Item = Doc>,
{
    Doc::new_table(rows.into_iter().collect())
}

/// Drop every hard line break from the rendering of `doc`.
pub fn inline(doc: Doc) -> Doc {
    Doc::new_edit(EditFn::Inline, doc)
}

// -----------------------------------------------
// Table Discovery
// -----------------------------------------------

fn row_candidate(doc: &Doc) -> Option<(&Doc, &RowInfo)> {
    match doc.node() {
        DocNode::Row { info, .. } => Some((doc, info)),
        DocNode::Alt(alts) => {
            for alt in alts {
                if let DocNode::Row { info, .. } = alt.node() {
                    return Some((alt, info));
                }
            }
            None
        }
        _ => None,
    }
}

/// Group runs of adjacent row candidates into tables.
///
/// A candidate is a `Row`, or an `Alt` offering a `Row` as one of its
/// layouts. Each run of two or more consecutive candidates with equal
/// `table_type` becomes an alternative between the original documents joined
/// by line breaks (the narrow fallback) and a `Table` over the rows; shorter
/// runs and every other document pass through untouched.
pub fn create_tables<I>(docs: I) -> Vec<Doc>
where
    I: IntoIterator<Item = Doc>,
{
    let mut output: Vec<Doc> = Vec::new();
    let mut group: Vec<(Doc, Doc)> = Vec::new();
    let mut group_type: Option<String> = None;

    fn flush(output: &mut Vec<Doc>, group: &mut Vec<(Doc, Doc)>) {
        if group.len() >= 2 {
            let originals = group.iter().map(|(doc, _)| doc.clone());
            let rows = group.iter().map(|(_, row)| row.clone()).collect();
            output.push(alt([Doc::line().join(originals), Doc::new_table(rows)]));
            group.clear();
        } else {
            output.extend(group.drain(..).map(|(doc, _)| doc));
        }
    }

    for doc in docs {
        let candidate =
            row_candidate(&doc).map(|(row, info)| (row.clone(), info.table_type.clone()));
        match candidate {
            Some((row, table_type)) => {
                if !group.is_empty() && group_type != table_type {
                    flush(&mut output, &mut group);
                }
                group_type = table_type;
                group.push((doc, row));
            }
            None => {
                flush(&mut output, &mut group);
                output.push(doc);
            }
        }
    }
    flush(&mut output, &mut group);
    output
}

// -------------------------------------------------------------------------------------------------
// Conversions and Operators
// -------------------------------------------------------------------------------------------------

impl From<Token> for Doc {
    fn from(token: Token) -> Doc {
        Doc::from_token(token)
    }
}

impl From<&str> for Doc {
    fn from(text: &str) -> Doc {
        Doc::lines(text)
    }
}

impl From<String> for Doc {
    fn from(text: String) -> Doc {
        Doc::lines(&text)
    }
}

impl From<Option<Doc>> for Doc {
    fn from(doc: Option<Doc>) -> Doc {
        doc.unwrap_or_else(Doc::empty)
    }
}

impl From<Vec<Doc>> for Doc {
    fn from(docs: Vec<Doc>) -> Doc {
        cat(docs)
    }
}

impl<D: Into<Doc>> Div<D> for Doc {
    type Output = Doc;

    /// Compose two documents.
    fn div(self, rhs: D) -> Doc {
        self.concat(rhs.into())
    }
}

impl<D: Into<Doc>> BitOr<D> for Doc {
    type Output = Doc;

    /// Combine two documents as alternatives.
    fn bitor(self, rhs: D) -> Doc {
        alt([self, rhs.into()])
    }
}

impl fmt::Debug for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ptr_eq(&Doc::softline()) {
            return write!(f, "SoftLine");
        }
        if self.ptr_eq(&Doc::fail()) {
            return write!(f, "Fail");
        }
        match self.node() {
            DocNode::Text(token) => {
                if token.is_empty() || token.is_space() || token.is_line() {
                    write!(f, "{token:?}")
                } else {
                    write!(f, "Text({:?})", token.text())
                }
            }
            DocNode::Cat(docs) => {
                let mut tuple = f.debug_tuple("Cat");
                for doc in docs {
                    tuple.field(doc);
                }
                tuple.finish()
            }
            DocNode::Alt(alts) => {
                let mut tuple = f.debug_tuple("Alt");
                for alt in alts {
                    tuple.field(alt);
                }
                tuple.finish()
            }
            DocNode::Nest {
                indent,
                doc,
                overlap,
            } => f
                .debug_struct("Nest")
                .field("indent", indent)
                .field("overlap", overlap)
                .field("doc", doc)
                .finish(),
            DocNode::Row { cells, info } => f
                .debug_struct("Row")
                .field("cells", cells)
                .field("info", info)
                .finish(),
            DocNode::Table(rows) => {
                let mut tuple = f.debug_tuple("Table");
                for row in rows {
                    tuple.field(row);
                }
                tuple.finish()
            }
            DocNode::Edit { function, doc } => f
                .debug_struct("Edit")
                .field("function", function)
                .field("doc", doc)
                .finish(),
        }
    }
}
