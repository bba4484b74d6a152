use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;

pub mod mongo;

/// Storage seam for the pipeline: hand over one batch of documents, get back
/// the inserted count. Implementations own their connection lifecycle per
/// call, so the orchestrator holds no storage state between chunks.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn insert(&self, docs: Vec<Value>) -> Result<u64>;
}
