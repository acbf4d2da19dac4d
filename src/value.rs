use std::borrow::Cow;
use std::fmt;

use crate::encoding::decode_detected;

/// Significant digits used when a float is rendered as text.
const FLOAT_TEXT_PRECISION: usize = 14;

/// An untyped raw input, before coercion.
///
/// Request data arrives as strings, but callers may also hand over numbers,
/// booleans, bytes of unknown encoding, or nothing at all. Each variant has
/// an explicit conversion table for every coercion target; nothing relies on
/// implicit conversions.
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::Value;
///
/// assert_eq!(Value::from("59$").to_integer_lossy(), 59);
/// assert_eq!(Value::from(32.5).as_text(), "32.5");
/// assert_eq!(Value::from(None::<i64>), Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A Unicode string.
    Text(String),
    /// Bytes of unknown encoding; decoded with detection when read as text.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for an empty string or an empty byte buffer.
    pub fn is_empty_string(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bytes(b) => b.is_empty(),
            _ => false,
        }
    }

    /// Null or empty string: the inputs that coerce to a type's absent default.
    pub(crate) fn is_blank(&self) -> bool {
        self.is_null() || self.is_empty_string()
    }

    /// String representation of the value.
    ///
    /// `true` renders as `"1"`, `false` and null as `""`, floats with 14
    /// significant digits (`1.0E+25` outside `[1e-4, 1e14)`), and bytes are
    /// decoded with encoding detection.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null | Self::Bool(false) => Cow::Borrowed(""),
            Self::Bool(true) => Cow::Borrowed("1"),
            Self::Int(i) => Cow::Owned(i.to_string()),
            Self::Float(f) => Cow::Owned(format_float(*f)),
            Self::Text(s) => Cow::Borrowed(s),
            Self::Bytes(b) => Cow::Owned(decode_detected(b)),
        }
    }

    /// Integer conversion that never fails.
    ///
    /// Strings are read up to the end of their leading number; anything that
    /// does not start with a number yields `0`.
    pub fn to_integer_lossy(&self) -> i64 {
        match self {
            Self::Null => 0,
            Self::Bool(b) => i64::from(*b),
            Self::Int(i) => *i,
            Self::Float(f) => float_to_int(*f),
            Self::Text(_) | Self::Bytes(_) => integer_prefix(&self.as_text()),
        }
    }

    /// Truthiness table used when no explicit boolean rule matches.
    ///
    /// Null, `false`, `0`, `0.0`, `""`, `"0"` and their byte equivalents are
    /// false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !(s.is_empty() || s == "0"),
            Self::Bytes(b) => !(b.is_empty() || b.as_slice() == b"0"),
        }
    }

    /// Returns `true` if the value compares loosely equal to the integer 1.
    ///
    /// Strings match when they are numeric (surrounding whitespace allowed)
    /// and their numeric value is 1.
    pub fn loosely_equals_one(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i == 1,
            Self::Float(f) => *f == 1.0,
            Self::Text(_) | Self::Bytes(_) => {
                numeric_string_value(&self.as_text()).is_some_and(|v| v == 1.0)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Location of a leading number inside a string.
struct NumericPrefix {
    start: usize,
    end: usize,
    is_float: bool,
}

fn is_numeric_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0B' | b'\x0C')
}

/// Finds `[ws][sign]digits[.digits][e[sign]digits]` at the start of `s`.
fn scan_numeric_prefix(s: &str) -> Option<NumericPrefix> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    while i < bytes.len() && is_numeric_whitespace(bytes[i]) {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }

    let int_end = digits_from(i);
    let int_digits = int_end - i;
    i = int_end;

    let mut is_float = false;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_end = digits_from(i + 1);
        if int_digits > 0 || frac_end > i + 1 {
            i = frac_end;
            is_float = true;
        }
    }
    if int_digits == 0 && !is_float {
        return None;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
            is_float = true;
        }
    }

    Some(NumericPrefix {
        start,
        end: i,
        is_float,
    })
}

/// Truncates toward zero; NaN, infinities and out-of-range values give 0.
pub(crate) fn float_to_int(value: f64) -> i64 {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && (-LIMIT..LIMIT).contains(&value) {
        value.trunc() as i64
    } else {
        0
    }
}

/// Integer value of the leading number in `s`, or 0.
///
/// Pure integer prefixes saturate at the `i64` range.
pub(crate) fn integer_prefix(s: &str) -> i64 {
    let Some(prefix) = scan_numeric_prefix(s) else {
        return 0;
    };
    let digits = &s[prefix.start..prefix.end];
    if prefix.is_float {
        return float_to_int(digits.parse().unwrap_or(0.0));
    }
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Float value of the leading number in `s`, or 0.0.
pub(crate) fn float_prefix(s: &str) -> f64 {
    scan_numeric_prefix(s)
        .and_then(|p| s[p.start..p.end].parse().ok())
        .unwrap_or(0.0)
}

/// Numeric value of `s` if the whole string (modulo surrounding whitespace)
/// is a number.
fn numeric_string_value(s: &str) -> Option<f64> {
    let prefix = scan_numeric_prefix(s)?;
    let rest_is_blank = s.as_bytes()[prefix.end..]
        .iter()
        .all(|b| is_numeric_whitespace(*b));
    if !rest_is_blank {
        return None;
    }
    s[prefix.start..prefix.end].parse().ok()
}

/// Renders a float with [`FLOAT_TEXT_PRECISION`] significant digits.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", FLOAT_TEXT_PRECISION - 1, value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -4 || exponent >= FLOAT_TEXT_PRECISION as i32 {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{lead}.{rest}E{exp_sign}{}", exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{sign}{digits}{zeros}")
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac_part}")
    }
}
