//! Status page entry point: checks the API once and prints what the page shows.

use client::{ClientConfig, HttpStatusApi, StatusPanel};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &ClientConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Diagnostics go to stderr so stdout carries only the page.
    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let config = ClientConfig::from_env();
    init_tracing(&config);

    let api = HttpStatusApi::new(&config.api_url).expect("invalid PDV_API_URL");
    tracing::info!(api_url = %api.base_url(), "checking API status");

    let panel = StatusPanel::new(api);
    panel.init().settled().await;

    println!("{}", panel.snapshot().await);
}
