//! services/api/src/bin/openapi.rs
//!
//! Writes the daily-quote API's OpenAPI 3.0 document to disk so clients can
//! pick up the contract without a running server (the live equivalent is
//! served at `/api-docs/openapi.json`).

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

/// Renders the OpenAPI document as pretty-printed JSON.
fn render_spec() -> Result<String, Box<dyn std::error::Error>> {
    Ok(ApiDoc::openapi().to_pretty_json()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Output path is the first argument, defaulting to the repo convention.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "daily-spark-openapi.json".to_string());
    std::fs::write(&path, render_spec()?)?;
    println!("Wrote OpenAPI document to {path}");
    Ok(())
}
