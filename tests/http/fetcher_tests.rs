use serde_json::json;
use synthtap::errors::SynthtapError;
use synthtap::http::fetcher::fetch_last_raw;
use synthtap::utils::http_retry::build_client_with_retry;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_sends_bearer_token_and_returns_payload() {
    let server = MockServer::start().await;
    let payload = json!({
        "start": "2024-03-01T12:00:00Z",
        "end": "2024-03-01T12:15:00Z",
        "detail": {
            "fields": { "synthetic_metrics": [{ "name": "rtt" }] },
            "items": []
        }
    });
    Mock::given(method("GET"))
        .and(path("/v1/lastraw"))
        .and(query_param("tests", "101,102"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client_with_retry(reqwest::Client::new());
    let url = format!("{}/v1/lastraw?tests=101,102", server.uri());

    let fetched = fetch_last_raw(&client, "tok-123", &url).await.unwrap();
    assert_eq!(fetched, payload);
}

#[tokio::test]
async fn test_message_response_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/lastraw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Message": "Tests not found"
        })))
        .mount(&server)
        .await;

    let client = build_client_with_retry(reqwest::Client::new());
    let url = format!("{}/v1/lastraw?tests=999", server.uri());

    match fetch_last_raw(&client, "tok-123", &url).await {
        Err(SynthtapError::FetchFailure(message)) => assert_eq!(message, "Tests not found"),
        other => panic!("expected FetchFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_fatal_error_field_still_returns_payload() {
    let server = MockServer::start().await;
    let payload = json!({
        "error": "one of the requested tests is disabled",
        "detail": {
            "fields": { "synthetic_metrics": [{ "name": "rtt" }] },
            "items": [{
                "synthetic_metrics": [4],
                "dimension": { "name": "2024-03-01T12:15:00Z" }
            }]
        }
    });
    Mock::given(method("GET"))
        .and(path("/v1/lastraw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let client = build_client_with_retry(reqwest::Client::new());
    let url = format!("{}/v1/lastraw?tests=101", server.uri());

    let fetched = fetch_last_raw(&client, "tok-123", &url).await.unwrap();
    assert_eq!(fetched, payload);
}
