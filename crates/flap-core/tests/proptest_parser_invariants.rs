//! Property-based invariant tests for TokenParser.
//!
//! 1. Parsing is pure (same input -> same output).
//! 2. Every emitted token belongs to the vocabulary.
//! 3. The concatenation of emitted tokens is a prefix of the input.
//! 4. An empty vocabulary never emits anything.
//! 5. `next_token` consumes exactly the bytes of the token it returns.
//! 6. Text built only from vocabulary tokens parses back completely when no
//!    token is a proper prefix of another.

use flap_core::{TokenParser, TokenSets, Vocabulary};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn vocabulary_strategy() -> impl Strategy<Value = Vocabulary> {
    prop::collection::vec("[a-c0-2]{1,3}", 0..8).prop_map(Vocabulary::new)
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-c0-2$ é]{0,24}"
}

// ═════════════════════════════════════════════════════════════════════════
// Invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_is_pure(vocabulary in vocabulary_strategy(), text in text_strategy()) {
        let parser = TokenParser::new(vocabulary);
        prop_assert_eq!(parser.parse(&text), parser.parse(&text));
    }

    #[test]
    fn tokens_come_from_vocabulary(vocabulary in vocabulary_strategy(), text in text_strategy()) {
        let parser = TokenParser::new(vocabulary.clone());
        for token in parser.parse(&text) {
            prop_assert!(vocabulary.contains(&token), "{token:?} not in {vocabulary:?}");
        }
    }

    #[test]
    fn concatenation_is_input_prefix(vocabulary in vocabulary_strategy(), text in text_strategy()) {
        let parser = TokenParser::new(vocabulary);
        let joined: String = parser.parse(&text).iter().map(|t| t.as_str()).collect();
        prop_assert!(text.starts_with(&joined), "{joined:?} is not a prefix of {text:?}");
    }

    #[test]
    fn empty_vocabulary_emits_nothing(text in text_strategy()) {
        let parser = TokenParser::new(Vocabulary::empty());
        prop_assert!(parser.parse(&text).is_empty());
        prop_assert!(parser.next_token(&text).is_none());
    }

    #[test]
    fn next_token_consumes_token_bytes(vocabulary in vocabulary_strategy(), text in text_strategy()) {
        let parser = TokenParser::new(vocabulary);
        if let Some((token, used)) = parser.next_token(&text) {
            prop_assert_eq!(used, token.len());
            prop_assert_eq!(&text[..used], token.as_str());
        }
    }

    #[test]
    fn single_character_tokens_round_trip(indices in prop::collection::vec(0usize..62, 0..32)) {
        let vocabulary = TokenSets::alphanumeric();
        let text: String = indices
            .iter()
            .filter_map(|&i| vocabulary.get(i))
            .map(|t| t.as_str())
            .collect();
        let parser = TokenParser::new(vocabulary);
        let joined: String = parser.parse(&text).iter().map(|t| t.as_str()).collect();
        prop_assert_eq!(joined, text);
    }
}
