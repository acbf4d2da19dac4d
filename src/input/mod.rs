//! Input lookup surface.
//!
//! This module is the boundary between a host application's request data and
//! the coercion chain. It never reads process-wide state: the query string,
//! form body and server metadata are handed to [`Input`] by the caller, either
//! directly or through an [`ExtractInput`] implementation on a framework's
//! request type.
//!
//! # Integration Model
//!
//! Framework-specific code should:
//! 1. Build an `Input` from its request type (see [`ExtractInput`])
//! 2. Optionally enable strict mode to turn missing keys into errors
//! 3. Call `get`, `post` or `server` to obtain a [`RawValue`](crate::RawValue)
//! 4. Coerce and transform the value
//!
//! # Example Flow
//!
//! ```
//! use fluent_sanitizer::Input;
//!
//! let mut input = Input::new();
//! input.add_query_param("name", "john doe mcfly i");
//! input.add_query_param("size", "150.5 cm");
//!
//! let name = input.get("name")?.to_text()?.sanitize().capitalize_name();
//! assert_eq!(name.val(), Some("John Doe McFly I"));
//!
//! let size = input.get("size")?.to_float('.')?;
//! assert_eq!(size.val(), Some(150.5));
//! # Ok::<(), fluent_sanitizer::Error>(())
//! ```

use std::fmt;

mod adapter;
mod extract;

pub use adapter::Input;
pub use extract::ExtractInput;

/// The request section a key is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// URL query parameters
    Query,
    /// Submitted form fields
    Form,
    /// Server and environment metadata
    Server,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Query => "query",
            Self::Form => "form",
            Self::Server => "server",
        };
        f.write_str(name)
    }
}
