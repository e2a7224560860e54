//! Read-only HTTP API listing the stored questions.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use quizbank_error::{ServerError, ServerErrorKind};
use quizbank_interface::QuestionStore;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// API state containing the question store.
#[derive(Clone)]
pub struct ApiState {
    store: Arc<dyn QuestionStore>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }
}

/// Creates the listing API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/health", get(health_check))
        .fallback(fallback)
        .with_state(state)
}

/// Bind `addr` and serve the listing API in the background.
///
/// # Errors
///
/// Returns error if the address cannot be bound.
pub async fn spawn_api(
    addr: SocketAddr,
    state: ApiState,
) -> Result<(SocketAddr, JoinHandle<Result<(), ServerError>>), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(format!("{}: {}", addr, e))))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(format!("{}: {}", addr, e))))?;

    info!(addr = %local_addr, "Listing API listening");
    let handle = tokio::spawn(async move {
        axum::serve(listener, create_router(state))
            .await
            .map_err(|e| ServerError::new(ServerErrorKind::Http(e.to_string())))
    });

    Ok((local_addr, handle))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Every stored question, ordered by id.
async fn list_questions(State(state): State<ApiState>) -> Response {
    match state.store.fetch_all().await {
        Ok(questions) => (StatusCode::OK, Json(questions)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list questions");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null)).into_response()
        }
    }
}

/// Unknown paths answer `null`.
async fn fallback() -> impl IntoResponse {
    Json(Value::Null)
}
