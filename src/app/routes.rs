use crate::app::errors::rate_limited_response;
use crate::core::ingest::{IngestService, Submission};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::sync::Arc;

pub const CREATE_DOCUMENT_PATH: &str = "/api/v3/lk/documents/create";

#[derive(Clone)]
pub struct AppState {
    service: Arc<IngestService>,
}

impl AppState {
    pub fn new(service: IngestService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &IngestService {
        &self.service
    }
}

/// Only POST is routed; other methods get 405 from the method router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(CREATE_DOCUMENT_PATH, post(create_document))
        .with_state(state)
}

async fn create_document(State(state): State<AppState>, body: Bytes) -> Response {
    let service = state.service();
    let document = match service.decode(&body) {
        Ok(document) => document,
        Err(e) => return e.into_response(),
    };

    match service.submit(document).await {
        Ok(Submission::Accepted { .. }) => StatusCode::OK.into_response(),
        Ok(Submission::Rejected) => rate_limited_response(service.admission().limit()),
        Err(e) => e.into_response(),
    }
}
