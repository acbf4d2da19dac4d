//! Encoding-aware case conversion.
//!
//! Mappings come from the Unicode tables in `char`, but a mapping is only
//! applied when every resulting character exists in the target encoding.
//! In ISO-8859-1, `ÿ` stays `ÿ` because `Ÿ` has no Latin-1 code point.

use crate::encoding::Encoding;

// Letters whose title case differs from their upper case.
const TITLE_DIGRAPHS: [(char, char); 12] = [
    ('\u{01C4}', '\u{01C5}'),
    ('\u{01C5}', '\u{01C5}'),
    ('\u{01C6}', '\u{01C5}'),
    ('\u{01C7}', '\u{01C8}'),
    ('\u{01C8}', '\u{01C8}'),
    ('\u{01C9}', '\u{01C8}'),
    ('\u{01CA}', '\u{01CB}'),
    ('\u{01CB}', '\u{01CB}'),
    ('\u{01CC}', '\u{01CB}'),
    ('\u{01F1}', '\u{01F2}'),
    ('\u{01F2}', '\u{01F2}'),
    ('\u{01F3}', '\u{01F2}'),
];

fn push_mapped<I>(out: &mut String, original: char, mapped: I, encoding: Encoding)
where
    I: Iterator<Item = char> + Clone,
{
    if mapped.clone().all(|c| encoding.can_represent(c)) {
        out.extend(mapped);
    } else {
        out.push(original);
    }
}

fn title_mapping(ch: char) -> String {
    if let Some(&(_, title)) = TITLE_DIGRAPHS.iter().find(|(c, _)| *c == ch) {
        return title.to_string();
    }
    if ch == 'ß' {
        return "Ss".to_string();
    }
    ch.to_uppercase().collect()
}

fn is_cased(ch: char) -> bool {
    ch.is_lowercase() || ch.is_uppercase() || TITLE_DIGRAPHS.iter().any(|(c, _)| *c == ch)
}

/// Characters that neither start nor end a word for title casing.
fn is_case_ignorable(ch: char) -> bool {
    matches!(
        ch,
        '\'' | '.' | ':' | '^' | '`' | '\u{00AD}' | '\u{00B7}' | '\u{2019}' | '\u{0300}'..='\u{036F}'
    )
}

pub(crate) fn to_lower(text: &str, encoding: Encoding) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_mapped(&mut out, ch, ch.to_lowercase(), encoding);
    }
    out
}

pub(crate) fn to_upper(text: &str, encoding: Encoding) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_mapped(&mut out, ch, ch.to_uppercase(), encoding);
    }
    out
}

/// Title case: the first cased character of each word is title-cased and the
/// rest of the word lowercased.
pub(crate) fn to_title(text: &str, encoding: Encoding) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if is_cased(ch) {
            if in_word {
                push_mapped(&mut out, ch, ch.to_lowercase(), encoding);
            } else {
                let title = title_mapping(ch);
                push_mapped(&mut out, ch, title.chars(), encoding);
            }
            in_word = true;
        } else if is_case_ignorable(ch) {
            out.push(ch);
        } else {
            out.push(ch);
            in_word = ch.is_numeric();
        }
    }
    out
}

/// Uppercases the first codepoint and leaves the rest untouched.
pub(crate) fn upper_first(text: &str, encoding: Encoding) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(text.len());
    push_mapped(&mut out, first, first.to_uppercase(), encoding);
    out.push_str(chars.as_str());
    out
}
