#![forbid(unsafe_code)]

//! Token parser.
//!
//! Splits text into the tokens of a [`Vocabulary`]. Characters are read one
//! grapheme cluster at a time into a candidate buffer. As soon as the buffer
//! equals a vocabulary token it is emitted and the buffer restarts empty.
//!
//! The match is the *shortest accumulated* one: with both `"foo"` and
//! `"foot"` in the vocabulary, `"foot"` yields `"foo"` and the trailing `"t"`
//! never resolves.
//!
//! # Invariants
//!
//! 1. Parsing is pure: the same vocabulary and text always give the same
//!    tokens.
//! 2. Concatenating the emitted tokens gives a prefix of the input.
//! 3. Every emitted token is a member of the vocabulary.
//! 4. A lookup never scans past the byte length of the longest vocabulary
//!    token, so unmatched text costs linear time overall.
//!
//! # Failure Modes
//!
//! - Text that never resolves into a token: the unmatched tail is dropped and
//!   only the tokens found before it are returned. This is not an error.
//! - Empty vocabulary or empty text: no tokens.

use ahash::AHashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::token::{Token, Vocabulary};

/// Greedy shortest-match tokenizer over a fixed vocabulary.
///
/// Holds no state besides the vocabulary, so one parser can serve any number
/// of callers (it is `Send + Sync`).
#[derive(Debug, Clone, Default)]
pub struct TokenParser {
    vocabulary: Vocabulary,
    members: AHashSet<Token>,
    /// Byte length of the longest token; no longer buffer can match.
    longest: usize,
}

impl TokenParser {
    /// Build a parser for `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        let members = vocabulary.iter().cloned().collect();
        let longest = vocabulary.iter().map(|token| token.as_str().len()).max().unwrap_or(0);
        Self {
            vocabulary,
            members,
            longest,
        }
    }

    /// The vocabulary this parser matches against.
    #[inline]
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Find the first token of `text`.
    ///
    /// Returns the token and the number of bytes of `text` it consumed, or
    /// `None` if no prefix of `text` ever resolves into a token.
    #[must_use]
    pub fn next_token(&self, text: &str) -> Option<(Token, usize)> {
        if self.members.is_empty() {
            return None;
        }
        for (offset, grapheme) in text.grapheme_indices(true) {
            let end = offset + grapheme.len();
            if end > self.longest {
                break;
            }
            if let Some(token) = self.members.get(&text[..end]) {
                return Some((token.clone(), end));
            }
        }
        None
    }

    /// Split `text` into tokens, dropping any unresolved tail.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<Token> {
        self.tokens(text).collect()
    }

    /// Lazy form of [`TokenParser::parse`].
    pub fn tokens<'p, 't>(&'p self, text: &'t str) -> Tokens<'p, 't> {
        Tokens { parser: self, rest: text }
    }
}

/// Iterator returned by [`TokenParser::tokens`].
#[derive(Debug, Clone)]
pub struct Tokens<'p, 't> {
    parser: &'p TokenParser,
    rest: &'t str,
}

impl<'t> Tokens<'_, 't> {
    /// The input not yet consumed.
    #[must_use]
    pub fn remainder(&self) -> &'t str {
        self.rest
    }
}

impl Iterator for Tokens<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (token, used) = self.parser.next_token(self.rest)?;
        self.rest = &self.rest[used..];
        Some(token)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
