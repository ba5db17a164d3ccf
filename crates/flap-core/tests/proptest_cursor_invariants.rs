//! Property-based invariant tests for TokenCursor.
//!
//! 1. `next()` cycles: stepping `len` times returns to the start.
//! 2. `distance_to(t)` steps of `next()` land on `t`.
//! 3. Distances are always smaller than the vocabulary length.
//! 4. `set_current` with an unknown token leaves the position unchanged.

use flap_core::{TokenCursor, Vocabulary};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn vocabulary_strategy() -> impl Strategy<Value = Vocabulary> {
    prop::collection::vec("[a-z]{1,2}", 1..16).prop_map(Vocabulary::new)
}

fn cursor_strategy() -> impl Strategy<Value = (TokenCursor, usize)> {
    (vocabulary_strategy(), any::<prop::sample::Index>()).prop_map(|(vocabulary, start)| {
        let start = start.index(vocabulary.len());
        let mut cursor = TokenCursor::new(vocabulary.clone());
        if let Some(token) = vocabulary.get(start) {
            cursor.set_current(token);
        }
        (cursor, start)
    })
}

// ═════════════════════════════════════════════════════════════════════════
// Invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_cycle_returns_to_start((mut cursor, start) in cursor_strategy()) {
        let len = cursor.vocabulary().len();
        for _ in 0..len {
            cursor.next();
        }
        prop_assert_eq!(cursor.position(), Some(start));
    }

    #[test]
    fn distance_steps_land_on_target(
        (mut cursor, _start) in cursor_strategy(),
        target in any::<prop::sample::Index>(),
    ) {
        let vocabulary = cursor.vocabulary().clone();
        let target = target.index(vocabulary.len());
        let token = vocabulary.get(target).cloned().expect("index within vocabulary");

        let distance = cursor.distance_to(&token);
        prop_assert!(distance.is_some_and(|d| d < vocabulary.len()));
        for _ in 0..distance.unwrap_or(0) {
            cursor.next();
        }
        prop_assert_eq!(cursor.current(), Some(&token));
    }

    #[test]
    fn unknown_token_keeps_position((mut cursor, start) in cursor_strategy()) {
        cursor.set_current("UNKNOWN");
        prop_assert_eq!(cursor.position(), Some(start));
    }
}
