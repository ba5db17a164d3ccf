#![no_main]

use arbitrary::Arbitrary;
use flap_core::{TokenParser, Vocabulary};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    vocabulary: Vec<String>,
    pieces: Vec<Piece>,
}

#[derive(Arbitrary, Debug)]
enum Piece {
    /// A vocabulary token by index.
    Token(u8),
    /// Arbitrary text between tokens.
    Noise(String),
}

fuzz_target!(|input: Input| {
    let vocabulary = Vocabulary::new(input.vocabulary.iter().take(64).map(String::as_str));
    let mut text = String::new();
    for piece in input.pieces.iter().take(256) {
        match piece {
            Piece::Token(i) if !vocabulary.is_empty() => {
                if let Some(token) = vocabulary.get(usize::from(*i) % vocabulary.len()) {
                    text.push_str(token);
                }
            }
            Piece::Token(_) => {}
            Piece::Noise(noise) => text.push_str(noise),
        }
    }

    let parser = TokenParser::new(vocabulary.clone());
    let mut consumed = 0;
    for token in parser.tokens(&text) {
        assert!(vocabulary.contains(&token));
        consumed += token.len();
    }
    assert!(consumed <= text.len());
});
