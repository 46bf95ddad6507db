// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::doc::{cat, Doc};
use crate::token::{Token, TokenStream};

// -------------------------------------------------------------------------------------------------
// Token-Stream Editors
// -------------------------------------------------------------------------------------------------

/// The closed set of post-render token-stream editors.
///
/// Editors are identified by their snake_case serde name in the dictionary
/// form (`escape_single`, `smart_quote`, ...). They rewrite a fully buffered
/// stream and must not materially change its width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditFn {
    EscapeSingle,
    EscapeSingleAndUnescapeDouble,
    EscapeDouble,
    EscapeDoubleAndUnescapeSingle,
    /// Wrap the stream in whichever quote delimiter needs fewer escapes;
    /// ties choose double quotes.
    SmartQuote,
    /// Drop every hard line break.
    Inline,
}

impl EditFn {
    pub(crate) fn apply(&self, tokens: TokenStream) -> TokenStream {
        match self {
            EditFn::EscapeSingle => map_tokens(tokens, |token| escape(token, '\'')),
            EditFn::EscapeSingleAndUnescapeDouble => {
                map_tokens(tokens, |token| escape(unescape(token, '"'), '\''))
            }
            EditFn::EscapeDouble => map_tokens(tokens, |token| escape(token, '"')),
            EditFn::EscapeDoubleAndUnescapeSingle => {
                map_tokens(tokens, |token| escape(unescape(token, '\''), '"'))
            }
            EditFn::SmartQuote => smart_quote_stream(tokens),
            EditFn::Inline => tokens.into_iter().filter(|token| !token.is_line()).collect(),
        }
    }
}

fn map_tokens(tokens: TokenStream, f: impl Fn(Token) -> Token) -> TokenStream {
    tokens.into_iter().map(f).collect()
}

/// Backslash-escape every `quote` not already preceded by a backslash in the
/// source text.
fn escape(token: Token, quote: char) -> Token {
    let text = token.text();
    if !text.contains(quote) {
        return token;
    }
    let mut out = String::with_capacity(text.len() + 1);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if c == quote && prev != Some('\\') {
            out.push('\\');
        }
        out.push(c);
        prev = Some(c);
    }
    Token::new(out)
}

/// Drop the backslash from every `\quote` pair, left to right.
fn unescape(token: Token, quote: char) -> Token {
    let text = token.text();
    if !text.contains('\\') {
        return token;
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&quote) {
            continue;
        }
        out.push(c);
    }
    Token::new(out)
}

fn smart_quote_stream(tokens: TokenStream) -> TokenStream {
    let mut single = 0usize;
    let mut double = 0usize;
    for token in &tokens {
        single += token.text().matches('\'').count();
        double += token.text().matches('"').count();
    }
    let (quote, edit) = if single < double {
        ("'", EditFn::EscapeSingleAndUnescapeDouble)
    } else {
        ("\"", EditFn::EscapeDoubleAndUnescapeSingle)
    };
    let mut out = TokenStream::new();
    out.push(Token::new(quote));
    out.extend(edit.apply(tokens));
    out.push(Token::new(quote));
    out
}

// -------------------------------------------------------------------------------------------------
// Quoting Builders
// -------------------------------------------------------------------------------------------------

/// Wrap the concatenated documents in single quotes, escaping embedded
/// single quotes and unescaping needlessly escaped double quotes.
pub fn single_quote<I>(docs: I) -> Doc
where
    I: IntoIterator,
    I::Item: Into<Doc>,
{
    let doc = Doc::new_edit(EditFn::EscapeSingleAndUnescapeDouble, cat(docs));
    cat([Doc::text("'"), doc, Doc::text("'")])
}

/// Wrap the concatenated documents in double quotes, escaping embedded
/// double quotes and unescaping needlessly escaped single quotes.
pub fn double_quote<I>(docs: I) -> Doc
where
    I: IntoIterator,
    I::Item: Into<Doc>,
{
    let doc = Doc::new_edit(EditFn::EscapeDoubleAndUnescapeSingle, cat(docs));
    cat([Doc::text("\""), doc, Doc::text("\"")])
}

/// Quote the concatenated documents with whichever delimiter minimizes
/// escaping; the delimiter is decided from the rendered tokens.
pub fn smart_quote<I>(docs: I) -> Doc
where
    I: IntoIterator,
    I::Item: Into<Doc>,
{
    Doc::new_edit(EditFn::SmartQuote, cat(docs))
}
