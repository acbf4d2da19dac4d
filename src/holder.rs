use std::fmt;

use crate::error::{Error, Result};

/// The four typed holder variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolderKind {
    /// [`IntegerHolder`]
    Integer,
    /// [`FloatHolder`](crate::FloatHolder)
    Float,
    /// [`BooleanHolder`]
    Boolean,
    /// [`TextHolder`](crate::TextHolder)
    Text,
}

impl fmt::Display for HolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Enforces the holder invariant: a null value requires nullability.
///
/// Every holder constructor goes through this check, so the invariant holds
/// no matter how the holder was built.
pub(crate) fn ensure_present<T>(value: &Option<T>, nullable: bool, kind: HolderKind) -> Result<()> {
    if value.is_none() && !nullable {
        return Err(Error::Validation { kind });
    }
    Ok(())
}

/// A coerced, possibly-null integer.
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::IntegerHolder;
///
/// let holder = IntegerHolder::new(Some(41), false).unwrap();
/// assert_eq!(holder.val(), Some(41));
///
/// assert!(IntegerHolder::new(None, false).is_err());
/// assert_eq!(IntegerHolder::new(None, true).unwrap().val(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerHolder {
    val: Option<i64>,
    nullable: bool,
}

impl IntegerHolder {
    /// Creates a holder, rejecting `None` unless `nullable` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `value` is `None` and `nullable` is `false`.
    pub fn new(value: Option<i64>, nullable: bool) -> Result<Self> {
        ensure_present(&value, nullable, HolderKind::Integer)?;
        Ok(Self {
            val: value,
            nullable,
        })
    }

    /// Returns the held value.
    pub fn val(&self) -> Option<i64> {
        self.val
    }

    /// Consumes the holder and returns the held value.
    pub fn into_val(self) -> Option<i64> {
        self.val
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

/// A coerced, possibly-null boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanHolder {
    val: Option<bool>,
    nullable: bool,
}

impl BooleanHolder {
    /// Creates a holder, rejecting `None` unless `nullable` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `value` is `None` and `nullable` is `false`.
    pub fn new(value: Option<bool>, nullable: bool) -> Result<Self> {
        ensure_present(&value, nullable, HolderKind::Boolean)?;
        Ok(Self {
            val: value,
            nullable,
        })
    }

    /// Returns the held value.
    pub fn val(&self) -> Option<bool> {
        self.val
    }

    /// Consumes the holder and returns the held value.
    pub fn into_val(self) -> Option<bool> {
        self.val
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_present_allows_values() {
        assert!(ensure_present(&Some(1), false, HolderKind::Integer).is_ok());
        assert!(ensure_present(&None::<i64>, true, HolderKind::Integer).is_ok());
    }

    #[test]
    fn ensure_present_names_the_holder() {
        let err = ensure_present(&None::<bool>, false, HolderKind::Boolean).unwrap_err();
        assert_eq!(
            err,
            Error::Validation {
                kind: HolderKind::Boolean
            }
        );
    }

    #[test]
    fn integer_holder_rejects_null_when_not_nullable() {
        let result = IntegerHolder::new(None, false);
        assert!(matches!(
            result,
            Err(Error::Validation {
                kind: HolderKind::Integer
            })
        ));
    }

    #[test]
    fn integer_holder_reports_state() {
        let holder = IntegerHolder::new(None, true).unwrap();
        assert!(holder.is_null());
        assert!(holder.is_nullable());

        let holder = IntegerHolder::new(Some(54), true).unwrap();
        assert_eq!(holder.val(), Some(54));
        assert!(!holder.is_null());
        assert_eq!(holder.into_val(), Some(54));
    }

    #[test]
    fn boolean_holder_keeps_false() {
        let holder = BooleanHolder::new(Some(false), true).unwrap();
        assert_eq!(holder.val(), Some(false));
    }

    #[test]
    fn boolean_holder_rejects_null_when_not_nullable() {
        assert!(BooleanHolder::new(None, false).is_err());
        assert_eq!(BooleanHolder::new(None, true).unwrap().val(), None);
    }

    #[test]
    fn holder_kinds_display() {
        assert_eq!(format!("{}", HolderKind::Integer), "integer");
        assert_eq!(format!("{}", HolderKind::Float), "float");
        assert_eq!(format!("{}", HolderKind::Boolean), "boolean");
        assert_eq!(format!("{}", HolderKind::Text), "text");
    }
}
