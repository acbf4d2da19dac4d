use std::ops::{BitOr, BitOrAssign};

const EMAIL_EXTRA: &str = "!#$%&'*+-=?^_`{|}~@.[]";
const URL_EXTRA: &str = "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";

/// Named sanitize policy applied by [`TextHolder::sanitize_with`](crate::TextHolder::sanitize_with).
///
/// Filters only remove or encode characters; they never reject input.
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::{Filter, FilterFlags};
///
/// let clean = Filter::String.apply("<b>\"hi\"</b>", FilterFlags::NO_ENCODE_QUOTES);
/// assert_eq!(clean, "\"hi\"");
///
/// let encoded = Filter::String.apply("<b>\"hi\"</b>", FilterFlags::NONE);
/// assert_eq!(encoded, "&#34;hi&#34;");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Strips HTML tags and NUL; HTML-encodes quotes unless
    /// [`FilterFlags::NO_ENCODE_QUOTES`] is set.
    #[default]
    String,
    /// Encodes `'"<>&` and characters below 32 as numeric entities.
    SpecialChars,
    /// Encodes `&"'<>` as named entities (quotes kept with
    /// [`FilterFlags::NO_ENCODE_QUOTES`]).
    FullSpecialChars,
    /// Keeps ASCII letters, digits and `!#$%&'*+-=?^_`{|}~@.[]`.
    Email,
    /// Keeps ASCII letters, digits and the characters legal in a URL.
    Url,
    /// Keeps digits, `+` and `-`.
    NumberInt,
    /// Keeps digits, `+`, `-` and the separators enabled by the `ALLOW_*` flags.
    NumberFloat,
    /// Backslash-escapes quotes, backslashes and NUL.
    AddSlashes,
    /// Applies only the flag-driven strip and encode steps.
    UnsafeRaw,
}

/// Options modifying a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FilterFlags(u32);

impl FilterFlags {
    /// No options.
    pub const NONE: Self = Self(0);
    /// Leave `'` and `"` as they are.
    pub const NO_ENCODE_QUOTES: Self = Self(1 << 0);
    /// Remove characters below 32.
    pub const STRIP_LOW: Self = Self(1 << 1);
    /// Remove characters from 127 up.
    pub const STRIP_HIGH: Self = Self(1 << 2);
    /// Remove backticks.
    pub const STRIP_BACKTICK: Self = Self(1 << 3);
    /// Encode characters below 32.
    pub const ENCODE_LOW: Self = Self(1 << 4);
    /// Encode characters from 127 up.
    pub const ENCODE_HIGH: Self = Self(1 << 5);
    /// Encode `&`.
    pub const ENCODE_AMP: Self = Self(1 << 6);
    /// Keep `.` in [`Filter::NumberFloat`].
    pub const ALLOW_FRACTION: Self = Self(1 << 7);
    /// Keep `,` in [`Filter::NumberFloat`].
    pub const ALLOW_THOUSAND: Self = Self(1 << 8);
    /// Keep `e` and `E` in [`Filter::NumberFloat`].
    pub const ALLOW_SCIENTIFIC: Self = Self(1 << 9);

    /// Returns `true` if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FilterFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FilterFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Filter {
    /// Runs the filter over `input`.
    pub fn apply(self, input: &str, flags: FilterFlags) -> String {
        match self {
            Self::String => {
                let stripped = strip_tags(&strip_by_flags(input, flags));
                let encode_quotes = !flags.contains(FilterFlags::NO_ENCODE_QUOTES);
                encode_numeric(&stripped, |c| {
                    (encode_quotes && matches!(c, '\'' | '"')) || flag_encodes(c, flags)
                })
            }
            Self::SpecialChars => {
                let stripped = strip_by_flags(input, flags);
                encode_numeric(&stripped, |c| {
                    matches!(c, '\'' | '"' | '<' | '>' | '&')
                        || u32::from(c) < 32
                        || (flags.contains(FilterFlags::ENCODE_HIGH) && u32::from(c) >= 127)
                })
            }
            Self::FullSpecialChars => {
                let keep_quotes = flags.contains(FilterFlags::NO_ENCODE_QUOTES);
                let mut out = String::with_capacity(input.len());
                for c in input.chars() {
                    match c {
                        '&' => out.push_str("&amp;"),
                        '<' => out.push_str("&lt;"),
                        '>' => out.push_str("&gt;"),
                        '"' if !keep_quotes => out.push_str("&quot;"),
                        '\'' if !keep_quotes => out.push_str("&#039;"),
                        _ => out.push(c),
                    }
                }
                out
            }
            Self::Email => keep_only(input, |c| c.is_ascii_alphanumeric() || EMAIL_EXTRA.contains(c)),
            Self::Url => keep_only(input, |c| c.is_ascii_alphanumeric() || URL_EXTRA.contains(c)),
            Self::NumberInt => keep_only(input, |c| c.is_ascii_digit() || matches!(c, '+' | '-')),
            Self::NumberFloat => keep_only(input, |c| {
                c.is_ascii_digit()
                    || matches!(c, '+' | '-')
                    || (c == '.' && flags.contains(FilterFlags::ALLOW_FRACTION))
                    || (c == ',' && flags.contains(FilterFlags::ALLOW_THOUSAND))
                    || (matches!(c, 'e' | 'E') && flags.contains(FilterFlags::ALLOW_SCIENTIFIC))
            }),
            Self::AddSlashes => add_slashes(input),
            Self::UnsafeRaw => {
                let stripped = strip_by_flags(input, flags);
                encode_numeric(&stripped, |c| flag_encodes(c, flags))
            }
        }
    }
}

fn flag_encodes(c: char, flags: FilterFlags) -> bool {
    let code = u32::from(c);
    (c == '&' && flags.contains(FilterFlags::ENCODE_AMP))
        || (code < 32 && flags.contains(FilterFlags::ENCODE_LOW))
        || (code >= 127 && flags.contains(FilterFlags::ENCODE_HIGH))
}

fn strip_by_flags(input: &str, flags: FilterFlags) -> String {
    keep_only(input, |c| {
        let code = u32::from(c);
        !((code < 32 && flags.contains(FilterFlags::STRIP_LOW))
            || (code >= 127 && flags.contains(FilterFlags::STRIP_HIGH))
            || (c == '`' && flags.contains(FilterFlags::STRIP_BACKTICK)))
    })
}

fn keep_only(input: &str, keep: impl Fn(char) -> bool) -> String {
    input.chars().filter(|c| keep(*c)).collect()
}

fn encode_numeric(input: &str, encode: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if encode(c) {
            out.push_str(&format!("&#{};", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    out
}

/// Backslash-escapes `'`, `"`, `\` and NUL.
pub(crate) fn add_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\'' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}

enum TagState {
    Text,
    Tag { depth: usize, quote: Option<char> },
    Comment,
}

/// Removes HTML/XML tags, comments and NUL characters.
///
/// A `<` followed by whitespace is kept as text. An unterminated tag swallows
/// the rest of the input.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = TagState::Text;
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        state = match state {
            TagState::Text => match c {
                '\0' => TagState::Text,
                '<' if rest.chars().next().is_some_and(char::is_whitespace) => {
                    out.push(c);
                    TagState::Text
                }
                '<' if rest.starts_with("!--") => {
                    rest = &rest[3..];
                    TagState::Comment
                }
                '<' => TagState::Tag {
                    depth: 1,
                    quote: None,
                },
                _ => {
                    out.push(c);
                    TagState::Text
                }
            },
            TagState::Tag { depth, quote } => match (c, quote) {
                ('"' | '\'', None) => TagState::Tag {
                    depth,
                    quote: Some(c),
                },
                (_, Some(q)) if c == q => TagState::Tag { depth, quote: None },
                ('<', None) => TagState::Tag {
                    depth: depth + 1,
                    quote,
                },
                ('>', None) if depth > 1 => TagState::Tag {
                    depth: depth - 1,
                    quote,
                },
                ('>', None) => TagState::Text,
                _ => TagState::Tag { depth, quote },
            },
            TagState::Comment => {
                if c == '-' && rest.starts_with("->") {
                    rest = &rest[2..];
                    TagState::Text
                } else {
                    TagState::Comment
                }
            }
        };
    }
    out
}
