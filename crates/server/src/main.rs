use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cineshelf_core::Config;
use cineshelf_server::ServerConfig;

const DEFAULT_LOG_FILTER: &str = "info,cineshelf_server=debug,cineshelf_core=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // before the subscriber, so RUST_LOG may come from .env
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load config (is TMDB_API_KEY set?)")?;
    tracing::info!(
        tmdb = %config.tmdb_base_url,
        language = %config.tmdb_language,
        "Starting CineShelf"
    );

    cineshelf_server::start_server(config, ServerConfig::from_env()).await
}
