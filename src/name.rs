//! Title casing for personal names.
//!
//! The lowercased name is split on each delimiter in [`WORD_SPLITTERS`] in
//! turn, so later delimiters see the output of earlier passes. Order matters:
//! the space pass capitalizes `mclaren` to `Mclaren`, which is what lets the
//! `Mc` pass find and re-attach its delimiter.

use crate::case::{to_lower, to_upper, upper_first};
use crate::encoding::Encoding;

const WORD_SPLITTERS: [&str; 8] = [" ", "-", "O'", "L'", "D'", "St.", "Mc", "Mac"];

const LOWERCASE_EXCEPTIONS: [&str; 14] = [
    "the", "van", "den", "von", "und", "der", "de", "di", "da", "do", "of", "and", "l'", "d'",
];

const UPPERCASE_EXCEPTIONS: [&str; 8] = ["I", "II", "III", "IV", "VI", "VII", "VIII", "IX"];

fn capitalize_word(word: &str, encoding: Encoding) -> String {
    let upper = to_upper(word, encoding);
    if UPPERCASE_EXCEPTIONS.contains(&upper.as_str()) {
        return upper;
    }
    if LOWERCASE_EXCEPTIONS.contains(&word) {
        return word.to_string();
    }
    upper_first(word, encoding)
}

fn joiner(delimiter: &str, encoding: Encoding) -> String {
    let lower = to_lower(delimiter, encoding);
    if LOWERCASE_EXCEPTIONS.contains(&lower.as_str()) {
        lower
    } else {
        delimiter.to_string()
    }
}

/// Capitalizes a personal name.
///
/// Roman numerals up to IX are uppercased, particles such as `da`, `van` and
/// `d'` stay lowercase, and `Mc`/`Mac`/`O'` prefixes capitalize the letter
/// that follows them.
pub(crate) fn capitalize_name(name: &str, encoding: Encoding) -> String {
    let mut name = to_lower(name, encoding);
    for delimiter in WORD_SPLITTERS {
        let words: Vec<String> = name
            .split(delimiter)
            .map(|word| capitalize_word(word, encoding))
            .collect();
        name = words.join(&joiner(delimiter, encoding));
    }
    name
}
