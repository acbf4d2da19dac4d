//! Character encodings understood by the text pipeline.
//!
//! Held text is always a Rust `String`; an [`Encoding`] decides which
//! characters a case mapping may produce, how raw bytes are decoded, and how
//! text is written back out with [`Encoding::encode`].

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

/// Candidates consulted, in order, when the encoding of input is unknown.
pub const DETECTION_CANDIDATES: [Encoding; 3] =
    [Encoding::Utf8, Encoding::Iso8859_1, Encoding::Iso8859_15];

// Code points where ISO-8859-15 departs from ISO-8859-1.
const LATIN9_OVERRIDES: [(u8, char); 8] = [
    (0xA4, '\u{20AC}'),
    (0xA6, '\u{0160}'),
    (0xA8, '\u{0161}'),
    (0xB4, '\u{017D}'),
    (0xB8, '\u{017E}'),
    (0xBC, '\u{0152}'),
    (0xBD, '\u{0153}'),
    (0xBE, '\u{0178}'),
];

/// A supported character encoding.
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::Encoding;
///
/// let latin9 = Encoding::for_label("latin9").unwrap();
/// assert_eq!(latin9, Encoding::Iso8859_15);
/// assert_eq!(latin9.encode("€uro").unwrap(), b"\xA4uro");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8, the default.
    #[default]
    Utf8,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1 (Latin-1).
    Iso8859_1,
    /// ISO-8859-15 (Latin-9).
    Iso8859_15,
}

impl Encoding {
    /// Resolves an encoding label such as `"UTF-8"`, `"latin1"` or `"ISO_8859-15"`.
    ///
    /// Matching ignores ASCII case, dashes and underscores.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] for labels that name no
    /// supported encoding.
    pub fn for_label(label: &str) -> Result<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" => Ok(Self::Utf8),
            "ascii" | "usascii" | "ansix3.41968" => Ok(Self::Ascii),
            "iso88591" | "iso8859.1" | "latin1" | "l1" => Ok(Self::Iso8859_1),
            "iso885915" | "latin9" | "l9" => Ok(Self::Iso8859_15),
            _ => Err(Error::UnsupportedEncoding(label.to_string())),
        }
    }

    /// Canonical name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "ASCII",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Iso8859_15 => "ISO-8859-15",
        }
    }

    /// Returns `true` if `ch` has a representation in this encoding.
    pub fn can_represent(self, ch: char) -> bool {
        match self {
            Self::Utf8 => true,
            _ => self.encode_char(ch).is_some(),
        }
    }

    fn encode_char(self, ch: char) -> Option<u8> {
        let code = u32::from(ch);
        match self {
            Self::Utf8 => None,
            Self::Ascii => (code < 0x80).then_some(code as u8),
            Self::Iso8859_1 => (code <= 0xFF).then_some(code as u8),
            Self::Iso8859_15 => {
                if let Some(&(byte, _)) = LATIN9_OVERRIDES.iter().find(|(_, c)| *c == ch) {
                    return Some(byte);
                }
                let displaced = LATIN9_OVERRIDES.iter().any(|(b, _)| u32::from(*b) == code);
                (code <= 0xFF && !displaced).then_some(code as u8)
            }
        }
    }

    fn decode_byte(self, byte: u8) -> Option<char> {
        match self {
            Self::Utf8 => None,
            Self::Ascii => byte.is_ascii().then_some(char::from(byte)),
            Self::Iso8859_1 => Some(char::from(byte)),
            Self::Iso8859_15 => Some(
                LATIN9_OVERRIDES
                    .iter()
                    .find(|(b, _)| *b == byte)
                    .map_or(char::from(byte), |(_, c)| *c),
            ),
        }
    }

    /// Encodes `text` into this encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unrepresentable`] for the first character with no
    /// representation.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        if self == Self::Utf8 {
            return Ok(text.as_bytes().to_vec());
        }
        text.chars()
            .map(|ch| {
                self.encode_char(ch)
                    .ok_or(Error::Unrepresentable { ch, encoding: self })
            })
            .collect()
    }

    /// Strictly decodes `bytes`, returning `None` if they are not valid in
    /// this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            _ => bytes.iter().map(|&b| self.decode_byte(b)).collect(),
        }
    }

    /// Returns the first candidate that strictly decodes `bytes`.
    pub fn detect(bytes: &[u8], candidates: &[Encoding]) -> Option<Encoding> {
        candidates
            .iter()
            .copied()
            .find(|enc| enc.decode(bytes).is_some())
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decodes bytes of unknown encoding using [`DETECTION_CANDIDATES`].
///
/// ISO-8859-1 accepts every byte sequence, so this never fails.
pub(crate) fn decode_detected(bytes: &[u8]) -> String {
    Encoding::detect(bytes, &DETECTION_CANDIDATES)
        .and_then(|enc| enc.decode(bytes))
        .unwrap_or_else(|| bytes.iter().map(|&b| char::from(b)).collect())
}

/// Re-reads text whose characters may be raw bytes that were decoded as
/// Latin-1.
///
/// If every character fits in one byte and those bytes form multi-byte
/// UTF-8, the UTF-8 reading wins. Any other text is returned unchanged.
pub(crate) fn redetect(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    let bytes: Option<Vec<u8>> = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect();

    match bytes {
        Some(bytes) => match Encoding::detect(&bytes, &DETECTION_CANDIDATES) {
            Some(Encoding::Utf8) => Cow::Owned(decode_detected(&bytes)),
            _ => Cow::Borrowed(text),
        },
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_case_insensitively() {
        assert_eq!(Encoding::for_label("UTF-8").unwrap(), Encoding::Utf8);
        assert_eq!(Encoding::for_label("utf8").unwrap(), Encoding::Utf8);
        assert_eq!(Encoding::for_label("US-ASCII").unwrap(), Encoding::Ascii);
        assert_eq!(
            Encoding::for_label("ISO_8859-1").unwrap(),
            Encoding::Iso8859_1
        );
        assert_eq!(Encoding::for_label("Latin1").unwrap(), Encoding::Iso8859_1);
        assert_eq!(
            Encoding::for_label("iso-8859-15").unwrap(),
            Encoding::Iso8859_15
        );
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = Encoding::for_label("EBCDIC").unwrap_err();
        assert_eq!(err, Error::UnsupportedEncoding("EBCDIC".to_string()));
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(Encoding::Iso8859_15.to_string(), "ISO-8859-15");
        assert_eq!(Encoding::default(), Encoding::Utf8);
    }

    #[test]
    fn latin9_replaces_currency_sign() {
        assert!(Encoding::Iso8859_15.can_represent('€'));
        assert!(!Encoding::Iso8859_15.can_represent('¤'));
        assert!(Encoding::Iso8859_1.can_represent('¤'));
        assert!(!Encoding::Iso8859_1.can_represent('€'));
    }

    #[test]
    fn encode_reports_first_unrepresentable_char() {
        let err = Encoding::Ascii.encode("naïve").unwrap_err();
        assert_eq!(
            err,
            Error::Unrepresentable {
                ch: 'ï',
                encoding: Encoding::Ascii
            }
        );
    }

    #[test]
    fn latin1_round_trips_accents() {
        let bytes = Encoding::Iso8859_1.encode("àèìòù").unwrap();
        assert_eq!(bytes, vec![0xE0, 0xE8, 0xEC, 0xF2, 0xF9]);
        assert_eq!(Encoding::Iso8859_1.decode(&bytes).unwrap(), "àèìòù");
    }

    #[test]
    fn detect_prefers_utf8() {
        assert_eq!(
            Encoding::detect("ação".as_bytes(), &DETECTION_CANDIDATES),
            Some(Encoding::Utf8)
        );
        assert_eq!(
            Encoding::detect(b"a\xE7\xE3o", &DETECTION_CANDIDATES),
            Some(Encoding::Iso8859_1)
        );
        assert_eq!(Encoding::detect(b"\xFF", &[Encoding::Utf8, Encoding::Ascii]), None);
    }

    #[test]
    fn decode_detected_handles_latin1_bytes() {
        assert_eq!(decode_detected(b"a\xE7\xE3o"), "ação");
        assert_eq!(decode_detected("ação".as_bytes()), "ação");
    }

    #[test]
    fn redetect_repairs_utf8_read_as_latin1() {
        // "é" as UTF-8 bytes (C3 A9) mis-read as Latin-1
        assert_eq!(redetect("caf\u{00C3}\u{00A9}"), "café");
    }

    #[test]
    fn redetect_leaves_genuine_latin1_alone() {
        assert_eq!(redetect("café"), "café");
        assert_eq!(redetect("plain"), "plain");
        assert_eq!(redetect("Łódź"), "Łódź");
    }
}
