use indexmap::IndexMap;
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;
use tracing::{error, info, info_span};

use crate::{
    errors::Result,
    http::fetcher::fetch_last_raw,
    pipeline::Provider,
    transform::{TransformOutcome, transform},
    writer::DocumentSink,
};

// ============================ Batch planning =================================

/// Split every category's id list into chunks of at most `chunk_size`,
/// preserving category insertion order and id order within each category.
/// Every id lands in exactly one chunk.
pub fn plan_batches(
    tests: &IndexMap<String, Vec<String>>,
    chunk_size: usize,
) -> Vec<Vec<Vec<String>>> {
    tests
        .values()
        .map(|ids| {
            ids.chunks(chunk_size.max(1))
                .map(<[String]>::to_vec)
                .collect()
        })
        .collect()
}

// ============================ Chunk cycle ====================================

#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    Persisted(u64),
    NoData,
}

/// One fetch → transform → persist cycle for a single chunk url. An empty
/// document sequence is valid and skips the sink without counting as no-data.
pub async fn process_chunk(
    client: &ClientWithMiddleware,
    token: &str,
    url: &str,
    sink: &dyn DocumentSink,
) -> Result<ChunkOutcome> {
    let raw = fetch_last_raw(client, token, url).await?;
    match transform(&raw)? {
        TransformOutcome::NoData => Ok(ChunkOutcome::NoData),
        TransformOutcome::Documents(docs) if docs.is_empty() => Ok(ChunkOutcome::Persisted(0)),
        TransformOutcome::Documents(docs) => {
            let inserted = sink.insert(docs).await?;
            Ok(ChunkOutcome::Persisted(inserted))
        }
    }
}

// ============================ Sweep ==========================================

#[derive(Debug, Default, Clone)]
pub struct SweepStats {
    pub chunks: usize,
    pub documents_inserted: u64,
    pub no_data_chunks: usize,
    pub failed_chunks: usize,
}

/// Walk every planned chunk strictly in order, one cycle at a time. A chunk
/// failure is logged with its url and skipped so one provider hiccup cannot
/// abort the whole sweep.
pub async fn run_sweep(
    client: &ClientWithMiddleware,
    token: &str,
    provider: &Provider,
    chunk_size: usize,
    sink: Arc<dyn DocumentSink>,
) -> SweepStats {
    let mut stats = SweepStats::default();
    let planned = plan_batches(&provider.tests, chunk_size);

    for (category, chunks) in provider.tests.keys().zip(planned) {
        let span = info_span!("sweep.category", category = %category, chunks = chunks.len());
        let _g = span.enter();

        for chunk in chunks {
            let url = provider.last_raw_url(&chunk);
            stats.chunks += 1;

            match process_chunk(client, token, &url, sink.as_ref()).await {
                Ok(ChunkOutcome::Persisted(inserted)) => {
                    stats.documents_inserted += inserted;
                }
                Ok(ChunkOutcome::NoData) => {
                    stats.no_data_chunks += 1;
                    info!(source = %url, "No Data for the last 15 minutes");
                }
                Err(error) => {
                    stats.failed_chunks += 1;
                    error!(source = %url, %error, "chunk failed, continuing with next chunk");
                }
            }
        }
    }
    stats
}
