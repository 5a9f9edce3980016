//! Entry point for the Rescisão Engine binary.
//!
//! Running this binary will start an HTTP server that exposes the
//! severance calculator.  Settings come from `RESCISAO_*` environment
//! variables (see [`rescisao_engine::config`]); log filtering follows
//! `RUST_LOG`.

use rescisao_engine::config::ServerConfig;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {:#}", err);
            std::process::exit(2);
        }
    };
    init_tracing(config.log_json);
    if let Err(err) = rescisao_engine::api::serve(config).await {
        error!(error = %format!("{:#}", err), "server stopped");
        std::process::exit(1);
    }
}
