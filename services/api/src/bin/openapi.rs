//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the portal's JSON endpoints.
//!
//! Usage: `openapi [OUTPUT]`, where `OUTPUT` defaults to `openapi.json`.
//! Passing `-` prints the document to stdout instead.

use portal_api::web::rest::ApiDoc;
use std::io::Write;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let document = ApiDoc::openapi().to_pretty_json()?;

    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", document)?;
    } else {
        std::fs::write(&output, document)?;
        eprintln!("OpenAPI document written to {}", output);
    }
    Ok(())
}
