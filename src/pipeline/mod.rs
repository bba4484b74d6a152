use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{Result, SynthtapError};
use crate::writer::{DocumentSink, mongo::MongoSink};

// ================== Public types ==================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider: Provider,
    pub storage: Storage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub base_url: String,
    pub token_path: String,
    pub last_raw_path: String,
    pub auth: ProviderAuth,
    /// category -> ordered test ids; insertion order drives sweep order
    pub tests: IndexMap<String, Vec<String>>,
}

impl Provider {
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url, self.token_path)
    }

    /// The raw-data endpoint takes the chunk's ids comma-joined at the end of
    /// the path.
    pub fn last_raw_url(&self, chunk: &[String]) -> String {
        format!("{}{}{}", self.base_url, self.last_raw_path, chunk.join(","))
    }
}

/// Credentials are configured as env var names, never inline secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderAuth {
    pub client_id_env: String,
    pub client_secret_env: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ProviderAuth {
    pub fn resolve(&self) -> Result<Credentials> {
        let client_id = std::env::var(&self.client_id_env).map_err(|_| {
            SynthtapError::ConfigError(format!("env var not set: {}", self.client_id_env))
        })?;
        let client_secret = std::env::var(&self.client_secret_env).map_err(|_| {
            SynthtapError::ConfigError(format!("env var not set: {}", self.client_secret_env))
        })?;
        Ok(Credentials {
            client_id,
            client_secret,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    pub url: String,
    pub database: String,
    pub collection: String,
}

impl Storage {
    /// Sink factory; the sink itself connects per insert call.
    pub fn make_sink(&self) -> Arc<dyn DocumentSink> {
        Arc::new(MongoSink::new(&self.url, &self.database, &self.collection))
    }
}

pub mod run;
