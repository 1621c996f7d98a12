//! Raw endpoint access.

use anyhow::Result;
use stride_sdk::{ApiError, Record, RequestDescriptor, Response};

use super::auth::failed;
use super::GetArgs;
use crate::context::Context;

/// A success body ready for printing.
#[derive(Debug, PartialEq)]
enum Body {
    Json(Record),
    Text(String),
}

/// JSON bodies are decoded; anything else with a non-JSON content type is text.
fn decode(response: &Response) -> Result<Body, ApiError> {
    match response.content_type() {
        Some(ct) if !ct.contains("json") => response.text().map(Body::Text),
        _ => response.json().map(Body::Json),
    }
}

/// Run the get command. Bypasses the query cache.
pub async fn run(args: GetArgs, ctx: &Context) -> Result<()> {
    ctx.navigator.navigate(args.path.clone());

    let descriptor = args
        .query
        .into_iter()
        .fold(RequestDescriptor::get(&args.path), |d, (k, v)| d.query(k, v));

    ctx.output
        .debug(&format!("GET {}{}", ctx.config.base_url, args.path));
    let spinner = ctx.output.spinner(&format!("GET {}", args.path));
    let result = ctx.client.gateway().send_raw(descriptor).await;
    spinner.finish_and_clear();

    let response = result.map_err(|e| failed(e, ctx))?;
    match decode(&response).map_err(|e| failed(e, ctx))? {
        Body::Json(record) => ctx.output.json(&record),
        Body::Text(text) => println!("{}", text),
    }
    Ok(())
}
