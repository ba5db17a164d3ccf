#![forbid(unsafe_code)]

//! Tokens and vocabularies.
//!
//! A [`Token`] is the atomic unit a flap can show: a single character, a
//! multi-character label such as `"12"`, or the blank `" "` filler. A
//! [`Vocabulary`] is the ordered list of tokens a flap wheel carries; its
//! order is the order the wheel spins through.
//!
//! # Invariants
//!
//! 1. Tokens compare by exact string value.
//! 2. A vocabulary never contains the same token twice; construction keeps the
//!    first occurrence and drops later duplicates.
//! 3. A vocabulary is immutable once built. Cloning shares storage.
//!
//! # Failure Modes
//!
//! - Empty vocabulary: legal. `first()` is `None` and every lookup misses.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use ahash::AHashSet;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// An immutable, cheaply clonable token string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(Arc<str>);

impl Token {
    /// Create a token from any string-like value.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    /// The token text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// An ordered, duplicate-free, shared list of tokens.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Vocabulary {
    tokens: Arc<[Token]>,
}

impl Vocabulary {
    /// Build a vocabulary, keeping the first occurrence of each token.
    #[must_use]
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let mut seen: AHashSet<Token> = AHashSet::new();
        let tokens: Vec<Token> = tokens
            .into_iter()
            .map(Into::into)
            .filter(|token| seen.insert(token.clone()))
            .collect();
        Self {
            tokens: tokens.into(),
        }
    }

    /// An empty vocabulary.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The first token, the wheel's resting face.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// Index of `token` in wheel order.
    #[must_use]
    pub fn position(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t.as_str() == token)
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.position(token).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// The tokens as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether both handles share the same storage.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tokens, &other.tokens)
    }
}

impl fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl<T: Into<Token>> FromIterator<T> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

// ---------------------------------------------------------------------------
// Built-in sets
// ---------------------------------------------------------------------------

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

fn chars(sets: &[&str]) -> Vocabulary {
    sets.iter()
        .flat_map(|set| set.chars())
        .map(|c| Token::from(c.to_string()))
        .collect()
}

/// Ready-made vocabularies for common boards.
#[derive(Debug, Clone, Copy)]
pub struct TokenSets;

impl TokenSets {
    /// `"0"` through `"9"`.
    #[must_use]
    pub fn numeric() -> Vocabulary {
        chars(&[DIGITS])
    }

    /// Lower case then upper case latin letters.
    #[must_use]
    pub fn alphabetic() -> Vocabulary {
        chars(&[LOWER, UPPER])
    }

    /// Letters (lower, upper) followed by digits.
    #[must_use]
    pub fn alphanumeric() -> Vocabulary {
        chars(&[LOWER, UPPER, DIGITS])
    }

    /// The blank token followed by [`TokenSets::alphanumeric`].
    #[must_use]
    pub fn alphanumeric_and_space() -> Vocabulary {
        chars(&[" ", LOWER, UPPER, DIGITS])
    }

    /// Hour labels `"1"` through `"12"`.
    #[must_use]
    pub fn twelve_hour_clock() -> Vocabulary {
        (1..=12).map(|hour: u32| hour.to_string()).collect()
    }

    /// Hour labels `"00"` through `"23"`.
    #[must_use]
    pub fn twenty_four_hour_clock() -> Vocabulary {
        (0..24).map(|hour: u32| format!("{hour:02}")).collect()
    }

    /// Minute/second labels `"00"` through `"59"`.
    #[must_use]
    pub fn minute_and_second() -> Vocabulary {
        (0..60).map(|minute: u32| format!("{minute:02}")).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
