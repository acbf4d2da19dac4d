//! Shared proptest strategies.

use proptest::prelude::*;

/// Short human-readable text: ASCII and accented Latin letters, digits,
/// spaces, apostrophes and hyphens.
pub(crate) fn arb_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ a-zA-Z0-9àáâãçéêíóôõúüñÀÉÓÇ'\\-]{0,30}")
        .expect("valid regex")
}

/// Lowercase personal names made of one to four words.
pub(crate) fn arb_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zàéíóúç]{1,10}", 1..=4).prop_map(|words| words.join(" "))
}
