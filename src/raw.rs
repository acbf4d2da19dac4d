use crate::error::Result;
use crate::float::FloatHolder;
use crate::holder::{BooleanHolder, HolderKind, IntegerHolder};
use crate::text::TextHolder;
use crate::value::{float_prefix, Value};

/// An untyped input waiting to be coerced.
///
/// `RawValue` is the entry point of every chain: it is produced by
/// [`Input`](crate::Input) lookups (or built directly), optionally marked
/// nullable, and then coerced exactly once per target type. Each coercion
/// re-derives its result from the original value, so calling several on the
/// same wrapper yields independent holders.
///
/// # Nullable mode
///
/// With nullability off (the default), null and `""` coerce to the target's
/// zero value: `0`, `0.0`, `""`, `false`. With nullability on they coerce to
/// `None`.
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::RawValue;
///
/// let price = RawValue::new("R$ 3.290,93").to_float(',').unwrap();
/// assert_eq!(price.val(), Some(3290.93));
///
/// let missing = RawValue::new("").nullable().to_integer().unwrap();
/// assert_eq!(missing.val(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawValue {
    value: Value,
    nullable: bool,
}

impl RawValue {
    /// Wraps a raw value with nullability disabled.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            nullable: false,
        }
    }

    /// Sets whether null and empty input coerce to `None`.
    pub fn set_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Shorthand for `set_nullable(true)`.
    pub fn nullable(self) -> Self {
        self.set_nullable(true)
    }

    /// Returns `true` if nullable mode is enabled.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Nullable mode and a null or empty input: the coercion yields `None`.
    fn yields_null(&self) -> bool {
        self.nullable && self.value.is_blank()
    }

    /// Coerces to an integer.
    ///
    /// Strings are read up to the end of their leading number:
    /// `"59,8"` → 59, `"59$"` → 59, `"R$59"` → 0.
    ///
    /// # Errors
    ///
    /// Only fails if the holder invariant is broken, which this coercion
    /// never does.
    pub fn to_integer(&self) -> Result<IntegerHolder> {
        tracing::trace!(target_kind = %HolderKind::Integer, nullable = self.nullable, "coercing raw value");
        let value = if self.yields_null() {
            None
        } else if self.value.is_blank() {
            Some(0)
        } else {
            Some(self.value.to_integer_lossy())
        };
        IntegerHolder::new(value, self.nullable)
    }

    /// Coerces to text.
    ///
    /// `true` becomes `"1"`; `false` becomes `""`, as does null outside
    /// nullable mode.
    ///
    /// # Errors
    ///
    /// Only fails if the holder invariant is broken, which this coercion
    /// never does.
    pub fn to_text(&self) -> Result<TextHolder> {
        tracing::trace!(target_kind = %HolderKind::Text, nullable = self.nullable, "coercing raw value");
        let value = if self.yields_null() {
            None
        } else {
            Some(self.value.as_text().into_owned())
        };
        TextHolder::new(value, self.nullable)
    }

    /// Coerces to a boolean.
    ///
    /// Rules, in order: the integer `0` or a string equal to `"false"` in any
    /// case is false; the string `"true"` or anything loosely equal to 1 is
    /// true; everything else follows [`Value::is_truthy`].
    ///
    /// # Errors
    ///
    /// Only fails if the holder invariant is broken, which this coercion
    /// never does.
    pub fn to_boolean(&self) -> Result<BooleanHolder> {
        tracing::trace!(target_kind = %HolderKind::Boolean, nullable = self.nullable, "coercing raw value");
        let value = if self.yields_null() {
            None
        } else {
            Some(self.boolean_rule())
        };
        BooleanHolder::new(value, self.nullable)
    }

    fn boolean_rule(&self) -> bool {
        let is_false_word = match &self.value {
            Value::Text(_) | Value::Bytes(_) => self.value.as_text().to_lowercase() == "false",
            _ => false,
        };
        if matches!(self.value, Value::Int(0)) || is_false_word {
            return false;
        }
        if matches!(&self.value, Value::Text(s) if s == "true") || self.value.loosely_equals_one() {
            return true;
        }
        self.value.is_truthy()
    }

    /// Coerces to a float, treating `decimal_separator` as the decimal point.
    ///
    /// Every character other than an ASCII digit or the separator is
    /// discarded first, which drops currency symbols, thousands separators
    /// and minus signs alike. Name `','` for `"3.290,93"` and `'.'` for
    /// `"3,290.93"`.
    ///
    /// # Errors
    ///
    /// Only fails if the holder invariant is broken, which this coercion
    /// never does.
    pub fn to_float(&self, decimal_separator: char) -> Result<FloatHolder> {
        tracing::trace!(target_kind = %HolderKind::Float, nullable = self.nullable, "coercing raw value");
        let value = if self.yields_null() {
            None
        } else if self.value.is_blank() {
            Some(0.0)
        } else {
            let digits: String = self
                .value
                .as_text()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == decimal_separator)
                .map(|c| if c == decimal_separator { '.' } else { c })
                .collect();
            Some(float_prefix(&digits))
        };
        FloatHolder::new(value, self.nullable)
    }

    /// Coerces to a float with `.` as the decimal point.
    ///
    /// # Errors
    ///
    /// See [`to_float`](Self::to_float).
    pub fn to_float_default(&self) -> Result<FloatHolder> {
        self.to_float('.')
    }
}
