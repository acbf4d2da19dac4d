//! Fluent type coercion and string sanitization for untrusted input.
//!
//! Every chain starts from a raw value, coerces it exactly once into a typed
//! holder, and then applies transformations in call order:
//! - [`RawValue`]: an untyped input plus a nullable flag
//! - [`IntegerHolder`], [`FloatHolder`], [`BooleanHolder`], [`TextHolder`]:
//!   typed results that are either a value or null
//! - [`Input`]: strict or lenient lookups over query, form and server sources
//!
//! Coercion follows loose-typing rules: malformed numbers degrade to `0`, and
//! null or empty input becomes the target's zero value unless the chain was
//! marked nullable.
//!
//! # Examples
//!
//! ```
//! use fluent_sanitizer::{Input, RawValue, RoundingMode};
//!
//! let mut input = Input::new();
//! input.add_form_field("name", "  JOANA D'ARC ");
//! input.add_form_field("price", "R$ 3.290,93");
//!
//! let name = input.post("name")?.to_text()?.trim(None).capitalize_name();
//! assert_eq!(name.val(), Some("Joana d'Arc"));
//!
//! let price = input.post("price")?.to_float(',')?.round(1, RoundingMode::HalfUp);
//! assert_eq!(price.val(), Some(3290.9));
//!
//! let obs = RawValue::new("").nullable().to_text()?;
//! assert!(obs.is_null());
//! # Ok::<(), fluent_sanitizer::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod case;
mod encoding;
mod error;
mod filter;
mod float;
mod holder;
pub mod input;
mod name;
mod raw;
mod text;
mod value;

#[cfg(test)]
mod test_utils;

pub use encoding::{Encoding, DETECTION_CANDIDATES};
pub use error::{Error, ErrorKind, Result};
pub use filter::{Filter, FilterFlags};
pub use float::{FloatHolder, RoundingMode};
pub use holder::{BooleanHolder, HolderKind, IntegerHolder};
pub use input::{ExtractInput, Input, InputSource};
pub use raw::RawValue;
pub use text::{TextHolder, DEFAULT_TRIM_MASK};
pub use value::Value;
