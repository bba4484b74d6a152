use std::time::Instant;

use crate::config::load_config_from_path;
use crate::errors::Result;
use crate::http::{Http, auth::get_token};
use crate::pipeline::run::run_sweep;
use crate::utils::http_retry;
use clap::Parser;
use tracing::{debug, info, instrument};

const CHUNK_SIZE: usize = 50;

/// CLI
#[derive(Parser, Debug)]
#[command(
    name = "synthtap-run",
    version,
    about = "Extract last-raw synthetic metrics from a monitoring API, reshape, load into MongoDB.",
    long_about = "Extract last-raw synthetic metrics from a monitoring API, reshape, load into MongoDB.\n\n\
Resources:\n  • YAML config: provider endpoints, credential env var names, test id categories, storage target\n  • Execution: token → chunked fetch (≤50 ids per request) → reshape to flat documents → insert_many"
)]
pub struct Cli {
    #[arg(
        long = "yaml-config",
        short = 'y',
        value_name = "FILE",
        default_value = "synthtap.yaml"
    )]
    pub yaml_config: String,
}

#[instrument(skip_all, fields(cfg_path))]
pub async fn run_pipeline(cfg_path: &str) -> Result<()> {
    info!("starting synthtap run");

    let t0 = Instant::now();

    let cfg = load_config_from_path(cfg_path)?;
    info!("loaded yaml config");

    let credentials = cfg.provider.auth.resolve()?;

    // One pooled client serves the token call and every chunk fetch
    let base_client = Http::new().header("accept", "application/json").build_client();

    // No token means nothing else can proceed: auth failures abort the run here
    let token = get_token(
        &base_client,
        &cfg.provider.token_url(),
        &credentials.client_id,
        &credentials.client_secret,
    )
    .await?;

    let client = http_retry::build_client_with_retry(base_client);
    let sink = cfg.storage.make_sink();

    debug!(
        chunk_size = CHUNK_SIZE,
        categories = cfg.provider.tests.len(),
        "sweep options"
    );

    info!("starting fetch → transform → load");
    let stats = run_sweep(&client, &token, &cfg.provider, CHUNK_SIZE, sink).await;

    info!(
        chunks = stats.chunks,
        inserted = stats.documents_inserted,
        no_data = stats.no_data_chunks,
        failed = stats.failed_chunks,
        total_ms = t0.elapsed().as_millis() as u64,
        "sweep finished"
    );
    Ok(())
}
