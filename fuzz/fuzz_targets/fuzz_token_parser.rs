#![no_main]

use flap_core::{TokenParser, TokenSets};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for vocabulary in [
        TokenSets::alphanumeric_and_space(),
        TokenSets::twelve_hour_clock(),
        TokenSets::minute_and_second(),
    ] {
        let parser = TokenParser::new(vocabulary);
        let tokens = parser.parse(&text);
        let joined: String = tokens.iter().map(|t| t.as_str()).collect();
        assert!(text.starts_with(&joined));
    }
});
