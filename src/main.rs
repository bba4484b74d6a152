use clap::Parser;
use synthtap::cmd::{Cli, run_pipeline};
use synthtap::errors::Result;
use synthtap::log::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    run_pipeline(&cli.yaml_config).await
}
