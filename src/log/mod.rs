// src/log/mod.rs
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

/// Install the global tracing subscriber for a run.
///
/// Level comes from `SYNTHTAP_LOG_LEVEL`, falling back to `RUST_LOG`, then
/// `info`. `SYNTHTAP_LOG_FORMAT=json` switches to the JSON formatter; any
/// other value keeps the human-readable one with file/line locations.
pub fn init_tracing() {
    let filter = std::env::var("SYNTHTAP_LOG_LEVEL")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        });

    let json = matches!(
        std::env::var("SYNTHTAP_LOG_FORMAT"), Ok(v) if v.eq_ignore_ascii_case("json")
    );

    let fmt_layer = if json {
        fmt::layer().json().with_target(false).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to set global tracing subscriber");
}
