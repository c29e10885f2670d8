//! OpenAPI Specification Generator Binary
//!
//! Prints the Headcount OpenAPI specification as JSON to stdout.
//!
//! Usage:
//!   cargo run -p headcount-api --bin generate-openapi > openapi.json

use headcount_api::ApiDoc;

fn main() {
    match ApiDoc::to_pretty_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI spec: {}", e);
            std::process::exit(1);
        }
    }
}
