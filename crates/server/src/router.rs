use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Path of the sales report endpoint.
pub const SALES_REPORT_PATH: &str = "/relvendas";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(SALES_REPORT_PATH, get(handlers::sales_report))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
