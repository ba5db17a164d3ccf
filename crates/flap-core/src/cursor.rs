#![forbid(unsafe_code)]

//! Token cursor: the position of one flap wheel within its vocabulary.
//!
//! The wheel only turns forward. Advancing past the last token wraps to the
//! first, so reaching a token that sits earlier in the vocabulary takes a
//! full lap.
//!
//! # Invariants
//!
//! 1. For a non-empty vocabulary, `0 <= position < len` at all times.
//! 2. `next()` called `len` times returns to the starting token.
//! 3. An empty vocabulary has no current token and `next()` never mutates.

use crate::token::{Token, Vocabulary};

/// Cyclic cursor over a shared vocabulary.
#[derive(Debug, Clone, Default)]
pub struct TokenCursor {
    vocabulary: Vocabulary,
    position: usize,
}

impl TokenCursor {
    /// A cursor resting on the vocabulary's first token.
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            position: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Current index, or `None` for an empty vocabulary.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        (!self.vocabulary.is_empty()).then_some(self.position)
    }

    /// The token under the cursor.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.vocabulary.get(self.position)
    }

    /// The vocabulary's first token.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Token> {
        self.vocabulary.first()
    }

    /// Jump to `token`. Unknown tokens leave the position unchanged.
    pub fn set_current(&mut self, token: &str) {
        if let Some(index) = self.vocabulary.position(token) {
            self.position = index;
        }
    }

    /// Advance one token, wrapping at the end, and return the new current.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Token> {
        let len = self.vocabulary.len();
        if len == 0 {
            return None;
        }
        self.position = (self.position + 1) % len;
        self.vocabulary.get(self.position)
    }

    /// Forward steps needed to show `token`; `Some(0)` if already shown.
    #[must_use]
    pub fn distance_to(&self, token: &str) -> Option<usize> {
        let target = self.vocabulary.position(token)?;
        let len = self.vocabulary.len();
        Some((target + len - self.position) % len)
    }
}
