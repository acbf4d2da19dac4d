//! Form sanitizing demonstration.
//!
//! This example walks a submitted signup form through the crate:
//! 1. Build an `Input` from the request's sources
//! 2. Look fields up (leniently, then strictly)
//! 3. Coerce each field once
//! 4. Chain transformations and read the results
//!
//! Run with: `cargo run --example form_sanitizing`

use std::collections::HashMap;

use fluent_sanitizer::{ExtractInput, Input, RoundingMode, Value};

/// Simulates a framework request carrying a posted form
struct SignupRequest {
    form: Vec<(&'static str, &'static str)>,
    remote_addr: &'static str,
}

impl ExtractInput for SignupRequest {
    fn extract_input(&self) -> Input {
        let form: HashMap<String, Value> = self
            .form
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect();
        let server = HashMap::from([("REMOTE_ADDR".to_string(), Value::from(self.remote_addr))]);
        Input::with_sources(HashMap::new(), form, server)
    }
}

fn handle_signup(request: &SignupRequest) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Processing Signup ===");

    // Step 1: Collect the request's sources
    let mut input = request.extract_input();
    println!("1. Extracted input from request");

    // Step 2: Coerce and clean every field
    let name = input
        .post("name")?
        .to_text()?
        .sanitize()
        .capitalize_name();
    let age = input.post("age")?.to_integer()?;
    let salary = input
        .post("salary")?
        .to_float(',')?
        .round(0, RoundingMode::HalfUp);
    let newsletter = input.post("newsletter")?.to_boolean()?;
    let nickname = input.post("nickname")?.nullable().to_text()?.trim(None);

    println!("2. ✓ Fields coerced");
    println!("   Name: {:?}", name.val());
    println!("   Age: {:?}", age.val());
    println!("   Salary: {:?}", salary.val());
    println!("   Newsletter: {:?}", newsletter.val());
    println!("   Nickname: {:?}", nickname.val());

    // Step 3: Required server metadata, looked up strictly
    input.set_strict_mode(true);
    let addr = input.server("REMOTE_ADDR")?.to_text()?;
    println!("3. ✓ Client address: {:?}", addr.val());

    match input.post("referrer") {
        Ok(_) => println!("   Referrer present"),
        Err(e) => println!("   ✗ {}", e),
    }

    Ok(())
}

fn main() {
    println!("Form Sanitizing Demo");
    println!("====================");

    let request = SignupRequest {
        form: vec![
            ("name", "  <b>JOANA D'ARC</b> "),
            ("age", "41 years"),
            ("salary", "R$ 3.290,93"),
            ("newsletter", "on"),
            ("nickname", ""),
        ],
        remote_addr: "203.0.113.7",
    };

    if let Err(e) = handle_signup(&request) {
        println!("✗ Request failed: {}", e);
    }
}
