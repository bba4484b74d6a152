use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tracing::{debug, debug_span, error, info, info_span};

use crate::errors::{Result, SynthtapError};

/// Fetch the "last raw" measurement window for one chunk of test ids.
///
/// The endpoint signals a fatal failure for the chunk through a `Message`
/// field in the JSON body. A non-fatal `error` field can ride alongside valid
/// `detail` data; it is logged and the payload is still returned.
pub async fn fetch_last_raw(
    client: &ClientWithMiddleware,
    token: &str,
    url: &str,
) -> Result<Value> {
    let span = info_span!("http.last_raw", source = %url);
    let _g = span.enter();

    let req_span = debug_span!("http.request", method = "GET", source = %url);
    let _req_g = req_span.enter();
    let started = std::time::Instant::now();

    let resp = client
        .get(url)
        .header(http::header::ACCEPT, "application/json")
        .bearer_auth(token)
        .send()
        .await?;

    let status = resp.status();
    debug!(status = %status, elapsed_ms = started.elapsed().as_millis() as u64, "http response received");

    let json: Value = resp.json().await?;

    if let Some(message) = json.get("Message").and_then(Value::as_str) {
        error!(source = %url, message, "raw data endpoint rejected request");
        return Err(SynthtapError::FetchFailure(message.to_owned()));
    }

    let start = json.get("start").cloned().unwrap_or(Value::Null);
    let end = json.get("end").cloned().unwrap_or(Value::Null);
    info!(source = %url, start = %start, end = %end, "fetched raw test data");

    if let Some(provider_error) = json.get("error") {
        error!(source = %url, error = %provider_error, "provider reported an error, check the test configuration");
    }

    Ok(json)
}
