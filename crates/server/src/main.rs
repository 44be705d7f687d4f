use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sales_report::ReportRenderer;
use sales_report_server::{run_server, server, AppState, Config, PgSalesRepository};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    server::init_tracing();

    if let Err(err) = run(config).await {
        tracing::error!("Error: {}", err);
        for cause in err.chain().skip(1) {
            tracing::error!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let renderer = ReportRenderer::new()
        .with_locale(config.locale.clone())
        .with_font_source(config.font_source());
    if !renderer.font_source().is_available() {
        tracing::warn!(
            source = ?renderer.font_source(),
            "report fonts not found; every report request will fail until they are installed"
        );
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;

    let state = AppState::new(
        Arc::new(PgSalesRepository::new(pool)),
        Arc::new(renderer),
    );

    run_server(state, &config.host, config.port).await
}
