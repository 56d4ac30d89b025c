use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use filmoteka::config::{Config, FlatConfig};
use filmoteka::http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from(FlatConfig::parse());

    info!("Connecting pool to DB...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.db.database_url)
        .await?;
    info!("Connected to DB!");

    sqlx::migrate!("./migrations").run(&pool).await?;

    http::serve(config, pool).await
}
