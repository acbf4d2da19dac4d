//! Extraction boundary trait for framework integration.

use super::Input;

/// Builds an [`Input`] from a framework-specific request.
///
/// This is the boundary between a web framework's request type and the
/// lookup adapter. Implementations copy query parameters, form fields and
/// server metadata into an `Input`; they do not coerce or sanitize anything.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use fluent_sanitizer::{ExtractInput, Input};
///
/// struct MyFrameworkRequest {
///     query: HashMap<String, String>,
///     remote_addr: String,
/// }
///
/// impl ExtractInput for MyFrameworkRequest {
///     fn extract_input(&self) -> Input {
///         let mut input = Input::new();
///         for (k, v) in &self.query {
///             input.add_query_param(k.as_str(), v.as_str());
///         }
///         input.add_server_var("REMOTE_ADDR", self.remote_addr.as_str());
///         input
///     }
/// }
///
/// let req = MyFrameworkRequest {
///     query: HashMap::from([("page".to_string(), "3".to_string())]),
///     remote_addr: "127.0.0.1".to_string(),
/// };
/// let input = req.extract_input();
/// assert_eq!(input.get("page").unwrap().to_integer().unwrap().val(), Some(3));
/// ```
pub trait ExtractInput {
    /// Collects the request's sources into an `Input`.
    fn extract_input(&self) -> Input;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    struct TestRequest {
        query: Vec<(&'static str, &'static str)>,
        form: Vec<(&'static str, Value)>,
    }

    impl ExtractInput for TestRequest {
        fn extract_input(&self) -> Input {
            let mut input = Input::new();
            for (k, v) in &self.query {
                input.add_query_param(*k, *v);
            }
            for (k, v) in &self.form {
                input.add_form_field(*k, v.clone());
            }
            input
        }
    }

    #[test]
    fn extract_input_trait_works() {
        let req = TestRequest {
            query: vec![("name", "joana d'arc")],
            form: vec![("accepted", Value::from("on"))],
        };

        let input = req.extract_input();
        let name = input.get("name").unwrap().to_text().unwrap().capitalize_name();
        assert_eq!(name.val(), Some("Joana d'Arc"));
        let accepted = input.post("accepted").unwrap().to_boolean().unwrap();
        assert_eq!(accepted.val(), Some(true));
    }

    #[test]
    fn extracted_input_starts_lenient() {
        let req = TestRequest {
            query: Vec::new(),
            form: Vec::new(),
        };
        let input = req.extract_input();
        assert!(!input.is_strict());
        assert!(input.get("missing").is_ok());
    }

    #[test]
    fn input_extracts_an_independent_copy() {
        let mut original = Input::new();
        original.add_query_param("k", "v");
        original.set_strict_mode(true);

        let mut copy = original.extract_input();
        copy.add_query_param("other", "w");

        assert!(copy.is_strict());
        assert!(original.get("other").is_err());
        assert!(copy.get("other").is_ok());
    }
}
