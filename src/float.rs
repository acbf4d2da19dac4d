use crate::error::Result;
use crate::holder::{ensure_present, HolderKind};

/// Tie-breaking rule for [`FloatHolder::round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Ties round away from zero: `2.5 → 3`, `-2.5 → -3`.
    #[default]
    HalfUp,
    /// Ties round toward zero: `2.5 → 2`, `-2.5 → -2`.
    HalfDown,
    /// Ties round to the even neighbour: `2.5 → 2`, `3.5 → 4`.
    HalfEven,
    /// Ties round to the odd neighbour: `2.5 → 3`, `3.5 → 3`.
    HalfOdd,
}

impl RoundingMode {
    fn apply(self, value: f64) -> f64 {
        let floor = value.floor();
        let diff = value - floor;
        if diff > 0.5 {
            return floor + 1.0;
        }
        if diff < 0.5 {
            return floor;
        }

        let floor_is_even = floor % 2.0 == 0.0;
        let round_down = match self {
            Self::HalfUp => value < 0.0,
            Self::HalfDown => value >= 0.0,
            Self::HalfEven => floor_is_even,
            Self::HalfOdd => !floor_is_even,
        };
        if round_down {
            floor
        } else {
            floor + 1.0
        }
    }
}

/// Rounds to 15 significant digits, absorbing binary representation error
/// such as `1.955 * 100 == 195.49999999999997`.
fn pre_round(value: f64) -> f64 {
    format!("{:.14e}", value).parse().unwrap_or(value)
}

fn round_to(value: f64, precision: i32, mode: RoundingMode) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(precision.saturating_abs());
    if precision < 0 && !factor.is_finite() {
        return 0.0f64.copysign(value);
    }
    let scaled = if precision >= 0 {
        value * factor
    } else {
        value / factor
    };
    if !scaled.is_finite() {
        return value;
    }

    let rounded = mode.apply(pre_round(scaled));
    let result = if precision >= 0 {
        rounded / factor
    } else {
        rounded * factor
    };
    if result.is_finite() {
        pre_round(result)
    } else {
        value
    }
}

/// A coerced, possibly-null float with rounding transformations.
///
/// Transformations consume the holder and return it, so calls chain. A null
/// value passes through every transformation unchanged.
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::{FloatHolder, RoundingMode};
///
/// let price = FloatHolder::new(Some(1.955), false)
///     .unwrap()
///     .round(2, RoundingMode::HalfUp);
/// assert_eq!(price.val(), Some(1.96));
///
/// let none = FloatHolder::new(None, true).unwrap().ceil();
/// assert_eq!(none.val(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatHolder {
    val: Option<f64>,
    nullable: bool,
}

impl FloatHolder {
    /// Creates a holder, rejecting `None` unless `nullable` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if `value` is
    /// `None` and `nullable` is `false`.
    pub fn new(value: Option<f64>, nullable: bool) -> Result<Self> {
        ensure_present(&value, nullable, HolderKind::Float)?;
        Ok(Self {
            val: value,
            nullable,
        })
    }

    /// Rounds to `precision` decimal digits using `mode` for ties.
    ///
    /// Negative precision rounds to the left of the decimal point:
    /// `round(-2, HalfUp)` turns `1250.0` into `1300.0`.
    pub fn round(mut self, precision: i32, mode: RoundingMode) -> Self {
        self.val = self.val.map(|v| round_to(v, precision, mode));
        self
    }

    /// Rounds to an integral value, ties away from zero.
    pub fn round_default(self) -> Self {
        self.round(0, RoundingMode::default())
    }

    /// Rounds up to the next integral value.
    pub fn ceil(mut self) -> Self {
        self.val = self.val.map(f64::ceil);
        self
    }

    /// Rounds down to the previous integral value.
    pub fn floor(mut self) -> Self {
        self.val = self.val.map(f64::floor);
        self
    }

    /// Returns the held value.
    pub fn val(&self) -> Option<f64> {
        self.val
    }

    /// Consumes the holder and returns the held value.
    pub fn into_val(self) -> Option<f64> {
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
