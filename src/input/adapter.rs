//! Injected request sources with strict or lenient lookup.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::raw::RawValue;
use crate::value::Value;

use super::{ExtractInput, InputSource};

/// Holds the three request sources a value can be looked up in.
///
/// `Input` owns plain maps so that it stays independent of any web
/// framework. Framework-specific code should fill it through the `add_*`
/// methods or [`Input::with_sources`], or implement
/// [`ExtractInput`] on its own request type.
///
/// # Strict mode
///
/// Off by default: a missing key yields a null [`RawValue`], which coerces to
/// the target's zero value. With strict mode on, a key that is absent or
/// mapped to [`Value::Null`] fails with [`Error::Lookup`]. [`Input::var`] is
/// never affected.
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::{ErrorKind, Input};
///
/// let mut input = Input::new();
/// input.add_form_field("age", "41");
///
/// let age = input.post("age").unwrap().to_integer().unwrap();
/// assert_eq!(age.val(), Some(41));
///
/// let missing = input.post("email").unwrap().to_integer().unwrap();
/// assert_eq!(missing.val(), Some(0));
///
/// input.set_strict_mode(true);
/// let err = input.post("email").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Lookup);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Input {
    query: HashMap<String, Value>,
    form: HashMap<String, Value>,
    server: HashMap<String, Value>,
    strict: bool,
}

impl Input {
    /// Creates an input with empty sources and strict mode off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input from already collected sources.
    pub fn with_sources(
        query: HashMap<String, Value>,
        form: HashMap<String, Value>,
        server: HashMap<String, Value>,
    ) -> Self {
        Self {
            query,
            form,
            server,
            strict: false,
        }
    }

    /// Adds a URL query parameter.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.query.insert(key.into(), value.into());
    }

    /// Adds a submitted form field.
    pub fn add_form_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.form.insert(key.into(), value.into());
    }

    /// Adds a server metadata variable.
    pub fn add_server_var(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.server.insert(key.into(), value.into());
    }

    /// Enables or disables strict lookups.
    pub fn set_strict_mode(&mut self, enabled: bool) -> &mut Self {
        self.strict = enabled;
        self
    }

    /// Returns `true` if missing keys fail instead of yielding null.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Looks `key` up in the query parameters.
    ///
    /// # Errors
    ///
    /// See [`lookup`](Self::lookup).
    pub fn get(&self, key: &str) -> Result<RawValue> {
        self.lookup(InputSource::Query, key)
    }

    /// Looks `key` up in the form fields.
    ///
    /// # Errors
    ///
    /// See [`lookup`](Self::lookup).
    pub fn post(&self, key: &str) -> Result<RawValue> {
        self.lookup(InputSource::Form, key)
    }

    /// Looks `key` up in the server variables.
    ///
    /// # Errors
    ///
    /// See [`lookup`](Self::lookup).
    pub fn server(&self, key: &str) -> Result<RawValue> {
        self.lookup(InputSource::Server, key)
    }

    /// Looks `key` up in `source` and wraps the result for coercion.
    ///
    /// The returned wrapper has nullability disabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] in strict mode when the key is absent or its
    /// value is null.
    pub fn lookup(&self, source: InputSource, key: &str) -> Result<RawValue> {
        let value = self.source(source).get(key);
        let present = value.is_some_and(|v| !v.is_null());
        debug!(source = %source, key, present, strict = self.strict, "input lookup");

        if self.strict && !present {
            debug!(source = %source, key, "strict lookup failed");
            return Err(Error::Lookup {
                input: source,
                key: key.to_string(),
            });
        }

        Ok(RawValue::new(value.cloned().unwrap_or_default()))
    }

    /// Wraps an arbitrary value. Strict mode does not apply.
    pub fn var(&self, value: impl Into<Value>) -> RawValue {
        RawValue::new(value)
    }

    fn source(&self, source: InputSource) -> &HashMap<String, Value> {
        match source {
            InputSource::Query => &self.query,
            InputSource::Form => &self.form,
            InputSource::Server => &self.server,
        }
    }
}

impl ExtractInput for Input {
    fn extract_input(&self) -> Input {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn request_fields(input: &mut Input, add: fn(&mut Input, &'static str, Value)) {
        add(input, "name", Value::from("john doe mcfly i"));
        add(input, "age", Value::from("41"));
        add(input, "size", Value::from("150.5 cm"));
        add(input, "money", Value::from(""));
        add(input, "obs", Value::Null);
    }

    fn assert_lenient_flow(input: &Input, source: InputSource) {
        let name = input
            .lookup(source, "name")
            .unwrap()
            .to_text()
            .unwrap()
            .sanitize()
            .capitalize_name();
        assert_eq!(name.val(), Some("John Doe McFly I"));

        let age = input.lookup(source, "age").unwrap().to_integer().unwrap();
        assert_eq!(age.val(), Some(41));

        let size = input.lookup(source, "size").unwrap().to_float('.').unwrap();
        assert_eq!(size.val(), Some(150.5));

        let money = input.lookup(source, "money").unwrap().to_float('.').unwrap();
        assert_eq!(money.val(), Some(0.0));

        let obs = input
            .lookup(source, "obs")
            .unwrap()
            .nullable()
            .to_text()
            .unwrap()
            .sanitize();
        assert_eq!(obs.val(), None);

        let zero = input
            .lookup(source, "this-shouldnt-exist")
            .unwrap()
            .to_integer()
            .unwrap();
        assert_eq!(zero.val(), Some(0));
    }

    #[test]
    fn query_lookup_lenient() {
        let mut input = Input::new();
        request_fields(&mut input, |i, k, v| i.add_query_param(k, v));
        assert_lenient_flow(&input, InputSource::Query);
    }

    #[test]
    fn form_lookup_lenient() {
        let mut input = Input::new();
        request_fields(&mut input, |i, k, v| i.add_form_field(k, v));
        assert_lenient_flow(&input, InputSource::Form);
    }

    #[test]
    fn server_lookup_strips_markup() {
        let mut input = Input::new();
        input.add_server_var("my-sv-name", "<b>pollus web server</b>");

        let name = input
            .server("my-sv-name")
            .unwrap()
            .to_text()
            .unwrap()
            .sanitize()
            .capitalize_name();
        assert_eq!(name.val(), Some("Pollus Web Server"));

        let zero = input.server("this-shouldnt-exist").unwrap().to_integer().unwrap();
        assert_eq!(zero.val(), Some(0));
    }

    #[test]
    fn strict_mode_rejects_missing_keys() {
        let mut input = Input::new();
        input.add_query_param("name", "john doe mcfly i");
        input.set_strict_mode(true);

        assert!(input.get("name").is_ok());
        let err = input.get("this-shouldnt-exist").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert_eq!(
            err,
            Error::Lookup {
                input: InputSource::Query,
                key: "this-shouldnt-exist".to_string(),
            }
        );
    }

    #[test]
    fn strict_mode_checks_the_requested_source_only() {
        let mut input = Input::new();
        input.add_server_var("my-sv-name", "<b>pollus web server</b>");
        input.set_strict_mode(true);

        assert!(input.server("my-sv-name").is_ok());
        assert!(input.get("my-sv-name").is_err());
        assert!(input.post("my-sv-name").is_err());
    }

    #[test]
    fn strict_mode_treats_null_as_missing() {
        let mut input = Input::new();
        input.add_form_field("obs", Value::Null);
        input.add_form_field("money", "");
        input.set_strict_mode(true);

        assert!(input.post("obs").is_err());
        assert!(input.post("money").is_ok());
    }

    #[test]
    fn strict_mode_can_be_toggled() {
        let mut input = Input::new();
        assert!(!input.is_strict());
        input.set_strict_mode(true).set_strict_mode(false);
        assert!(!input.is_strict());
        assert!(input.get("anything").is_ok());
    }

    #[test]
    fn var_ignores_strict_mode() {
        let mut input = Input::new();
        input.set_strict_mode(true);
        let hello = input.var("World").to_text().unwrap();
        assert_eq!(hello.val(), Some("World"));
    }

    #[test]
    fn with_sources_keeps_each_map_separate() {
        let query = HashMap::from([("page".to_string(), Value::from(2))]);
        let form = HashMap::from([("page".to_string(), Value::from("7"))]);
        let input = Input::with_sources(query, form, HashMap::new());

        assert_eq!(input.get("page").unwrap().to_integer().unwrap().val(), Some(2));
        assert_eq!(input.post("page").unwrap().to_integer().unwrap().val(), Some(7));
        assert_eq!(input.server("page").unwrap().value(), &Value::Null);
    }

    #[test]
    fn lookups_return_non_nullable_wrappers() {
        let mut input = Input::new();
        input.add_query_param("q", "x");
        assert!(!input.get("q").unwrap().is_nullable());
    }
}
