//! Property tests for remote command quoting.

use proptest::prelude::*;

use compose_deploy::shell::quote;

/// Undo POSIX single-quote quoting the way `sh` would read one word
fn unquote(word: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = word.chars();
    let mut quoted = false;
    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('\'', _) => quoted = !quoted,
            ('\\', false) => out.push(chars.next()?),
            (c, _) => out.push(c),
        }
    }
    (!quoted).then_some(out)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The shell reads back exactly the original string.
    #[test]
    fn property_quote_round_trips(s in "(?s).{0,64}") {
        prop_assert_eq!(unquote(&quote(&s)), Some(s));
    }
}
