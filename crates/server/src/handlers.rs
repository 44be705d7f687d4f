use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sales_report::ReportRenderer;
use serde_json::json;
use std::sync::Arc;

use crate::{error::ApiError, repository::SalesRepository, Result};

/// Message returned when there are no customers to report on.
pub const NO_DATA_MESSAGE: &str = "Dados não encontrados";

/// Suggested file name for the downloaded report.
pub const REPORT_FILENAME: &str = "relatorio_vendas.pdf";

fn content_disposition() -> String {
    format!("attachment; filename=\"{REPORT_FILENAME}\"")
}

/// Dependencies shared by every request, wired together once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn SalesRepository>,
    pub renderer: Arc<ReportRenderer>,
}

impl AppState {
    pub fn new(repository: Arc<dyn SalesRepository>, renderer: Arc<ReportRenderer>) -> Self {
        Self {
            repository,
            renderer,
        }
    }
}

fn no_data_response() -> Response {
    (StatusCode::OK, Json(json!({ "message": NO_DATA_MESSAGE }))).into_response()
}

/// GET /relvendas
/// Returns the sales-by-customer report as a PDF download
pub async fn sales_report(State(state): State<AppState>) -> Result<Response> {
    let rows = state.repository.fetch_customer_totals().await?;
    if rows.is_empty() {
        tracing::info!("no customer totals found; report not rendered");
        return Ok(no_data_response());
    }

    let renderer = Arc::clone(&state.renderer);
    let rendered = tokio::task::spawn_blocking(move || renderer.render(&rows))
        .await
        .map_err(|err| ApiError::Internal(format!("render task failed: {err}")))??;

    let Some(report) = rendered else {
        return Ok(no_data_response());
    };

    tracing::info!(
        rows = report.totals.row_count(),
        pages = report.page_count,
        bytes = report.bytes.len(),
        "sales report rendered"
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_owned()),
        (header::CONTENT_DISPOSITION, content_disposition()),
    ];
    Ok((StatusCode::OK, headers, report.bytes).into_response())
}
