use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::{handlers::AppState, router::create_router};

const DEFAULT_LOG_FILTER: &str = "sales_report_server=info,sales_report=info,tower_http=debug";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter; records from the `log` facade are forwarded as well.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();
}

/// Run the API server until the listener fails
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!("Starting server on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
