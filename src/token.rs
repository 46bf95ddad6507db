// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::rc::Rc;

use once_cell::unsync::Lazy;

// -------------------------------------------------------------------------------------------------
// Tokens
// -------------------------------------------------------------------------------------------------

thread_local! {
    static EMPTY_TOKEN: Lazy<Rc<String>> = Lazy::new(|| Rc::new(String::new()));
    static SPACE_TOKEN: Lazy<Rc<String>> = Lazy::new(|| Rc::new(" ".to_string()));
    static LINE_TOKEN: Lazy<Rc<String>> = Lazy::new(|| Rc::new("\n".to_string()));
}

/// A single unit of rendered output.
///
/// Tokens are either plain text with no whitespace in it, or one of the three
/// interned sentinels: [`Token::empty`] (zero-width, never emitted by the
/// renderers), [`Token::space`] (one blank), and [`Token::line`] (the newline
/// that demarcates rows of output). The sentinels are canonical per thread, so
/// identity comparison via [`Token::ptr_eq`] is meaningful.
pub struct Token(Rc<String>);

impl Token {
    /// The zero-width sentinel (`""`).
    pub fn empty() -> Token {
        EMPTY_TOKEN.with(|lazy| Token(Rc::clone(lazy)))
    }

    /// The single-blank sentinel (`" "`).
    pub fn space() -> Token {
        SPACE_TOKEN.with(|lazy| Token(Rc::clone(lazy)))
    }

    /// The newline sentinel (`"\n"`).
    pub fn line() -> Token {
        LINE_TOKEN.with(|lazy| Token(Rc::clone(lazy)))
    }

    /// Construct a token from raw text.
    ///
    /// `""`, `" "`, and `"\n"` resolve to the canonical sentinels. Any other
    /// text must be whitespace-free; violating that is a programmer error and
    /// panics immediately.
    pub fn new<S: Into<String>>(text: S) -> Token {
        let text = text.into();
        if text.is_empty() {
            return Token::empty();
        }
        if text == " " {
            return Token::space();
        }
        if text == "\n" {
            return Token::line();
        }
        assert!(
            !text.chars().any(char::is_whitespace),
            "text token contains whitespace: {text:?}"
        );
        Token(Rc::new(text))
    }

    /// The token's text.
    pub fn text(&self) -> &str {
        &self.0
    }

    /// The token's visual width in columns.
    ///
    /// Counts characters, so the newline sentinel has width 1 for the strict
    /// budget accounting done by the smart renderer. Layout estimation treats
    /// newlines as zero-width ends of line instead; see `WidthHint`.
    pub fn width(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.ptr_eq(&Token::empty())
    }

    pub fn is_space(&self) -> bool {
        self.ptr_eq(&Token::space())
    }

    pub fn is_line(&self) -> bool {
        self.ptr_eq(&Token::line())
    }

    /// Identity comparison against another token.
    pub fn ptr_eq(&self, other: &Token) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Clone for Token {
    fn clone(&self) -> Self {
        Token(Rc::clone(&self.0))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Token) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Empty")
        } else if self.is_space() {
            write!(f, "Space")
        } else if self.is_line() {
            write!(f, "Line")
        } else {
            write!(f, "Token({:?})", self.text())
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

// -------------------------------------------------------------------------------------------------
// Token Streams
// -------------------------------------------------------------------------------------------------

/// A finite, ordered stream of rendered tokens.
///
/// Streams are produced by the renderers; token order is exactly the emission
/// order. `Display` concatenates the token texts into the final string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> TokenStream {
        TokenStream { tokens: Vec::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl Extend<Token> for TokenStream {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> TokenStream {
        TokenStream {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token.text())?;
        }
        Ok(())
    }
}
