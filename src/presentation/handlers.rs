// HTTP request handlers
use crate::infrastructure::csv_store::CsvStoreError;
use crate::presentation::app_state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// All records from the CSV file
pub async fn get_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.csv_store.clone();
    let result = tokio::task::spawn_blocking(move || store.load()).await;

    match result {
        Ok(Ok(rows)) => (StatusCode::OK, Json(json!(rows))),
        Ok(Err(e)) => {
            let status = match e {
                CsvStoreError::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!("Error reading {}: {}", state.csv_store.path().display(), e);
            (status, Json(json!({ "error": e.to_string() })))
        }
        Err(e) => {
            tracing::error!("CSV reader task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}
