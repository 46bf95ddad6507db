// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

//! The dictionary form of documents: `{"type": "Cat", "docs": [...]}` and
//! friends, used by golden tests. Not a wire format.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::doc::{alt, cat, Doc, DocNode, RowInfo};
use crate::edit::EditFn;
use crate::token::Token;

// -------------------------------------------------------------------------------------------------
// Tagged Representation
// -------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum DocRepr {
    Empty,
    Space,
    Line,
    Text {
        text: String,
    },
    Cat {
        docs: Vec<DocRepr>,
    },
    Fail,
    SoftLine,
    Alt {
        alts: Vec<DocRepr>,
    },
    Nest {
        indent: usize,
        overlap: bool,
        doc: Box<DocRepr>,
    },
    Edit {
        function: EditFn,
        doc: Box<DocRepr>,
    },
    Row {
        cells: Vec<DocRepr>,
        info: RowInfoRepr,
    },
    Table {
        rows: Vec<DocRepr>,
    },
}

#[derive(Serialize, Deserialize)]
struct RowInfoRepr {
    table_type: Option<String>,
    hpad: String,
    hsep: String,
    min_col_widths: Vec<Option<usize>>,
}

#[derive(Debug, Error)]
enum DecodeError {
    #[error("text token contains whitespace: {0:?}")]
    WhitespaceText(String),
    #[error("row hpad must be a single non-newline character: {0:?}")]
    InvalidPad(String),
    #[error("row hsep must not be a newline")]
    InvalidSep,
    #[error("row contains row")]
    RowInRow,
    #[error("table contains non-row")]
    NonRowInTable,
}

// -------------------------------------------------------------------------------------------------
// Encoding
// -------------------------------------------------------------------------------------------------

fn to_repr(doc: &Doc) -> DocRepr {
    if doc.ptr_eq(&Doc::fail()) {
        return DocRepr::Fail;
    }
    if doc.ptr_eq(&Doc::softline()) {
        return DocRepr::SoftLine;
    }
    match doc.node() {
        DocNode::Text(token) => {
            if token.is_empty() {
                DocRepr::Empty
            } else if token.is_space() {
                DocRepr::Space
            } else if token.is_line() {
                DocRepr::Line
            } else {
                DocRepr::Text {
                    text: token.text().to_string(),
                }
            }
        }
        DocNode::Cat(docs) => DocRepr::Cat {
            docs: docs.iter().map(to_repr).collect(),
        },
        DocNode::Alt(alts) => DocRepr::Alt {
            alts: alts.iter().map(to_repr).collect(),
        },
        DocNode::Nest {
            indent,
            doc,
            overlap,
        } => DocRepr::Nest {
            indent: *indent,
            overlap: *overlap,
            doc: Box::new(to_repr(doc)),
        },
        DocNode::Edit { function, doc } => DocRepr::Edit {
            function: *function,
            doc: Box::new(to_repr(doc)),
        },
        DocNode::Row { cells, info } => DocRepr::Row {
            cells: cells.iter().map(to_repr).collect(),
            info: RowInfoRepr {
                table_type: info.table_type.clone(),
                hpad: info.hpad.text().to_string(),
                hsep: info.hsep.text().to_string(),
                min_col_widths: info.min_col_widths.clone(),
            },
        },
        DocNode::Table(rows) => DocRepr::Table {
            rows: rows.iter().map(to_repr).collect(),
        },
    }
}

// -------------------------------------------------------------------------------------------------
// Decoding
// -------------------------------------------------------------------------------------------------

fn decode_token(text: &str) -> Result<Token, DecodeError> {
    match text {
        "" | " " | "\n" => Ok(Token::new(text)),
        _ if text.chars().any(char::is_whitespace) => {
            Err(DecodeError::WhitespaceText(text.to_string()))
        }
        _ => Ok(Token::new(text)),
    }
}

fn decode_all(reprs: Vec<DocRepr>) -> Result<Vec<Doc>, DecodeError> {
    reprs.into_iter().map(from_repr).collect()
}

/// Rebuild through the smart constructors so interning and normalization
/// survive a round trip.
fn from_repr(repr: DocRepr) -> Result<Doc, DecodeError> {
    Ok(match repr {
        DocRepr::Empty => Doc::empty(),
        DocRepr::Space => Doc::space(),
        DocRepr::Line => Doc::line(),
        DocRepr::Fail => Doc::fail(),
        DocRepr::SoftLine => Doc::softline(),
        DocRepr::Text { text } => Doc::from_token(decode_token(&text)?),
        DocRepr::Cat { docs } => cat(decode_all(docs)?),
        DocRepr::Alt { alts } => alt(decode_all(alts)?),
        DocRepr::Nest {
            indent,
            overlap,
            doc,
        } => Doc::make_nest(indent, from_repr(*doc)?, overlap),
        DocRepr::Edit { function, doc } => Doc::new_edit(function, from_repr(*doc)?),
        DocRepr::Row { cells, info } => {
            let hpad = decode_token(&info.hpad)?;
            if hpad.is_line() || hpad.width() != 1 {
                return Err(DecodeError::InvalidPad(info.hpad));
            }
            let hsep = decode_token(&info.hsep)?;
            if hsep.is_line() {
                return Err(DecodeError::InvalidSep);
            }
            let cells = decode_all(cells)?;
            if cells
                .iter()
                .any(|cell| matches!(cell.node(), DocNode::Row { .. }))
            {
                return Err(DecodeError::RowInRow);
            }
            Doc::new_row(
                cells,
                RowInfo {
                    table_type: info.table_type,
                    hpad,
                    hsep,
                    min_col_widths: info.min_col_widths,
                },
            )
        }
        DocRepr::Table { rows } => {
            let rows = decode_all(rows)?;
            if rows
                .iter()
                .any(|row| !matches!(row.node(), DocNode::Row { .. }))
            {
                return Err(DecodeError::NonRowInTable);
            }
            Doc::new_table(rows)
        }
    })
}

impl Serialize for Doc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_repr(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Doc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Doc, D::Error> {
        let repr = DocRepr::deserialize(deserializer)?;
        from_repr(repr).map_err(D::Error::custom)
    }
}
