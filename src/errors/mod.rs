// src/errors/mod.rs
use thiserror::Error;

/// Main error type for synthtap operations
#[derive(Error, Debug)]
pub enum SynthtapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Persist error: {0}")]
    Persist(#[from] mongodb::error::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    #[error("Malformed provider schema: {0}")]
    MalformedSchema(String),
}

/// Convenience Result type that uses SynthtapError
pub type Result<T> = std::result::Result<T, SynthtapError>;
