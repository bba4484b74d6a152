use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, info_span};

use crate::errors::{Result, SynthtapError};

/// Obtain an OAuth2 client-credentials token from the provider.
///
/// The endpoint signals failure through a `Message` field in the JSON body,
/// not through the status code. A missing `access_token` is treated the same
/// way: without a token nothing else in the run can proceed.
pub async fn get_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String> {
    let span = info_span!("auth.token", source = %token_url);
    let _g = span.enter();

    info!("requesting access token");
    let started = std::time::Instant::now();

    let resp = client
        .post(token_url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()
        .await?;

    let status = resp.status();
    debug!(status = %status, elapsed_ms = started.elapsed().as_millis() as u64, "token response received");

    let json: Value = resp.json().await?;

    if let Some(message) = json.get("Message").and_then(Value::as_str) {
        return Err(SynthtapError::AuthFailure(message.to_owned()));
    }

    let token = json
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| SynthtapError::AuthFailure("response carried no access_token".into()))?;

    info!("received access token");
    Ok(token.to_owned())
}
