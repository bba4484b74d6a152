// src/writer/mongo.rs

use async_trait::async_trait;
use mongodb::Client;
use serde_json::Value;
use tracing::info;

use crate::errors::Result;
use crate::writer::DocumentSink;

//=============== MongoDB Document Sink =======================================//

/// Inserts document batches into one named collection.
///
/// A fresh client is built for every call and shut down afterwards, success or
/// failure, so a wedged connection cannot outlive one chunk.
pub struct MongoSink {
    url: String,
    database: String,
    collection: String,
}

impl MongoSink {
    pub fn new(
        url: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl DocumentSink for MongoSink {
    async fn insert(&self, docs: Vec<Value>) -> Result<u64> {
        info!(
            database = %self.database,
            collection = %self.collection,
            documents = docs.len(),
            "inserting documents"
        );

        let client = Client::with_uri_str(&self.url).await?;
        let result = client
            .database(&self.database)
            .collection::<Value>(&self.collection)
            .insert_many(&docs)
            .await;
        client.shutdown().await;

        let inserted = result?.inserted_ids.len() as u64;
        info!(inserted, "documents inserted");
        Ok(inserted)
    }
}
