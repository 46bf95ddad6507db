// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::{Add, AddAssign};

use crate::doc::Doc;

// -------------------------------------------------------------------------------------------------
// Width Hints
// -------------------------------------------------------------------------------------------------

/// A cheap estimate of the width of a document's first rendered line.
///
/// `end_of_line` becomes true as soon as a newline is encountered; from then
/// on the estimate is closed and further additions are ignored. Hints are
/// advisory: the smart renderer uses them to account for trailing content
/// when judging a layout candidate, but rendering never depends on them for
/// correctness.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct WidthHint {
    pub width: usize,
    pub end_of_line: bool,
}

/// The zero hint: nothing known yet.
pub const UNKNOWN: WidthHint = WidthHint {
    width: 0,
    end_of_line: false,
};

impl WidthHint {
    pub fn new(width: usize, end_of_line: bool) -> WidthHint {
        WidthHint { width, end_of_line }
    }

    pub fn is_unknown(&self) -> bool {
        *self == UNKNOWN
    }
}

impl Add for WidthHint {
    type Output = WidthHint;

    /// Sequential composition: `self` first, then `other` on the same line.
    /// Short-circuits once `self` has already seen the end of its line.
    fn add(self, other: WidthHint) -> WidthHint {
        if self.end_of_line {
            self
        } else {
            WidthHint {
                width: self.width + other.width,
                end_of_line: other.end_of_line,
            }
        }
    }
}

impl AddAssign for WidthHint {
    fn add_assign(&mut self, other: WidthHint) {
        *self = *self + other;
    }
}

impl fmt::Debug for WidthHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "Unknown")
        } else {
            write!(
                f,
                "WidthHint(width={}, end_of_line={})",
                self.width, self.end_of_line
            )
        }
    }
}

/// For each child of a concatenation, the estimated width of everything that
/// follows it on the same line, closed off by `tail` (the context beyond the
/// concatenation itself).
pub(crate) fn suffix_hints(docs: &[Doc], tail: WidthHint) -> Vec<WidthHint> {
    let mut suffixes = vec![UNKNOWN; docs.len()];
    let mut acc = tail;
    for (i, doc) in docs.iter().enumerate().rev() {
        suffixes[i] = acc;
        acc = doc.width_hint() + acc;
    }
    suffixes
}
