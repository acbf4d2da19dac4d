use crate::case;
use crate::encoding::{redetect, Encoding};
use crate::error::{Error, Result};
use crate::filter::{add_slashes, Filter, FilterFlags};
use crate::holder::{ensure_present, HolderKind};
use crate::name::capitalize_name;

/// Characters removed by the trim family when no mask is given.
pub const DEFAULT_TRIM_MASK: &str = " \t\n\r\0\x0B";

/// A coerced, possibly-null string with a chainable transformation pipeline.
///
/// Every transformation consumes the holder and returns it. When the held
/// value is null, transformations pass it through unchanged. Case and
/// encoding operations follow the holder's configured [`Encoding`]
/// (UTF-8 unless changed with [`set_encoding`](Self::set_encoding)).
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::TextHolder;
///
/// let name = TextHolder::new(Some("<b>JOANA D'ARC</b> ".to_string()), false)
///     .unwrap()
///     .sanitize()
///     .capitalize_name();
/// assert_eq!(name.val(), Some("Joana d'Arc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHolder {
    val: Option<String>,
    nullable: bool,
    encoding: Encoding,
}

impl TextHolder {
    /// Creates a holder, rejecting `None` unless `nullable` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `value` is `None` and `nullable` is `false`.
    pub fn new(value: Option<String>, nullable: bool) -> Result<Self> {
        ensure_present(&value, nullable, HolderKind::Text)?;
        Ok(Self {
            val: value,
            nullable,
            encoding: Encoding::default(),
        })
    }

    fn map(mut self, f: impl FnOnce(&str, Encoding) -> String) -> Self {
        if let Some(val) = self.val.as_deref() {
            self.val = Some(f(val, self.encoding));
        }
        self
    }

    /// Uppercases every character.
    pub fn upper(self) -> Self {
        self.map(case::to_upper)
    }

    /// Lowercases every character.
    pub fn lower(self) -> Self {
        self.map(case::to_lower)
    }

    /// Title-cases every word.
    pub fn capitalize(self) -> Self {
        self.map(case::to_title)
    }

    /// Lowercases the string, then uppercases its first character.
    pub fn upper_first(self) -> Self {
        self.map(|val, enc| case::upper_first(&case::to_lower(val, enc), enc))
    }

    /// Strips `mask` (default [`DEFAULT_TRIM_MASK`]) from both ends.
    ///
    /// Masks may contain ranges such as `"a..z"`.
    pub fn trim(self, mask: Option<&str>) -> Self {
        let mask = TrimMask::parse(mask);
        self.map(|val, _| val.trim_matches(|c: char| mask.contains(c)).to_string())
    }

    /// Strips `mask` (default [`DEFAULT_TRIM_MASK`]) from the start.
    pub fn ltrim(self, mask: Option<&str>) -> Self {
        let mask = TrimMask::parse(mask);
        self.map(|val, _| val.trim_start_matches(|c: char| mask.contains(c)).to_string())
    }

    /// Strips `mask` (default [`DEFAULT_TRIM_MASK`]) from the end.
    pub fn rtrim(self, mask: Option<&str>) -> Self {
        let mask = TrimMask::parse(mask);
        self.map(|val, _| val.trim_end_matches(|c: char| mask.contains(c)).to_string())
    }

    /// Strips HTML tags without encoding quotes, then trims whitespace.
    pub fn sanitize(self) -> Self {
        self.sanitize_with(Filter::String, FilterFlags::NO_ENCODE_QUOTES)
    }

    /// Applies `filter` with `flags`, then trims whitespace.
    pub fn sanitize_with(self, filter: Filter, flags: FilterFlags) -> Self {
        self.map(|val, _| {
            filter
                .apply(val, flags)
                .trim_matches(|c: char| DEFAULT_TRIM_MASK.contains(c))
                .to_string()
        })
    }

    /// Backslash-escapes quotes, backslashes and NUL.
    ///
    /// This is a display/storage convenience. It does not make a value safe
    /// to splice into SQL; use parameterized queries for that.
    pub fn escape(self) -> Self {
        self.map(|val, _| add_slashes(val))
    }

    /// Replaces every occurrence of `search` with `replace`.
    ///
    /// An empty `search` leaves the value unchanged.
    pub fn replace(self, search: &str, replace: &str) -> Self {
        if search.is_empty() {
            return self;
        }
        self.map(|val, _| val.replace(search, replace))
    }

    /// Prepends `before` and appends `after`, skipping either when `None`.
    pub fn concat(self, before: Option<&str>, after: Option<&str>) -> Self {
        self.map(|val, _| {
            let mut out = String::new();
            out.push_str(before.unwrap_or_default());
            out.push_str(val);
            out.push_str(after.unwrap_or_default());
            out
        })
    }

    /// Reverses the string by codepoint.
    pub fn reverse(self) -> Self {
        self.map(|val, _| val.chars().rev().collect())
    }

    /// Takes a substring by codepoint position.
    ///
    /// A negative `start` counts from the end. A negative `length` leaves
    /// that many characters off the end; `None` runs to the end.
    pub fn substr(self, start: i64, length: Option<i64>) -> Self {
        self.map(|val, _| {
            let count = val.chars().count() as i64;
            let from = if start < 0 {
                (count + start).max(0)
            } else {
                start.min(count)
            };
            let to = match length {
                None => count,
                Some(len) if len < 0 => (count + len).max(from),
                Some(len) => from.saturating_add(len).min(count),
            };
            val.chars()
                .skip(from as usize)
                .take((to - from) as usize)
                .collect()
        })
    }

    /// Changes the encoding used by later case and encoding operations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] if `label` names no supported
    /// encoding.
    pub fn set_encoding(mut self, label: &str) -> Result<Self> {
        self.encoding = Encoding::for_label(label)?;
        tracing::trace!(encoding = %self.encoding, "text encoding changed");
        Ok(self)
    }

    /// Re-reads text whose real encoding was misidentified, then checks it
    /// fits the configured encoding.
    ///
    /// UTF-8 that was decoded as Latin-1 (`"cafÃ©"`) is repaired to
    /// `"café"`. Detection among UTF-8, ISO-8859-1 and ISO-8859-15 is
    /// heuristic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unrepresentable`] if the text contains a character
    /// the configured encoding cannot represent.
    pub fn convert_encoding(mut self) -> Result<Self> {
        if let Some(val) = self.val.as_deref() {
            let converted = redetect(val).into_owned();
            if let Some(ch) = converted.chars().find(|c| !self.encoding.can_represent(*c)) {
                return Err(Error::Unrepresentable {
                    ch,
                    encoding: self.encoding,
                });
            }
            self.val = Some(converted);
        }
        Ok(self)
    }

    /// Title-cases a personal name.
    ///
    /// Handles particles (`d'`, `da`, `van`), roman numerals (`I`..`IX`),
    /// hyphenated surnames and `Mc`/`Mac`/`O'` prefixes:
    /// `"john mclaren"` becomes `"John McLaren"`.
    pub fn capitalize_name(self) -> Self {
        self.map(capitalize_name)
    }

    /// Returns the held text as bytes in the configured encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unrepresentable`] if a character has no
    /// representation in the configured encoding.
    pub fn encode(&self) -> Result<Option<Vec<u8>>> {
        self.val
            .as_deref()
            .map(|val| self.encoding.encode(val))
            .transpose()
    }

    /// Returns the held value.
    pub fn val(&self) -> Option<&str> {
        self.val.as_deref()
    }

    /// Consumes the holder and returns the held value.
    pub fn into_val(self) -> Option<String> {
        self.val
    }

    /// Returns the configured encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns `true` if the held value is null.
    pub fn is_null(&self) -> bool {
        self.val.is_none()
    }

    /// Returns `true` if the holder accepts null.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// A set of characters to trim, with `a..z` ranges expanded.
struct TrimMask {
    chars: Vec<char>,
    ranges: Vec<(char, char)>,
}

impl TrimMask {
    fn parse(mask: Option<&str>) -> Self {
        let chars: Vec<char> = mask.unwrap_or(DEFAULT_TRIM_MASK).chars().collect();
        let mut single = Vec::new();
        let mut ranges = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let is_range = i + 3 < chars.len()
                && chars[i + 1] == '.'
                && chars[i + 2] == '.'
                && chars[i] <= chars[i + 3];
            if is_range {
                ranges.push((chars[i], chars[i + 3]));
                i += 4;
            } else {
                single.push(chars[i]);
                i += 1;
            }
        }
        Self {
            chars: single,
            ranges,
        }
    }

    fn contains(&self, c: char) -> bool {
        self.chars.contains(&c) || self.ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c))
    }
}
