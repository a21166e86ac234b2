use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::game::{GameError, GameService};
use crate::maps::{MapStorage, MapStorageError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub game: GameService,
    pub map_storage: Arc<dyn MapStorage>,
}

impl AppState {
    pub fn new(game: GameService, map_storage: Arc<dyn MapStorage>) -> Self {
        Self { game, map_storage }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    MapStorage(#[from] MapStorageError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Stable error code reported alongside the message
    pub fn kind(&self) -> &str {
        match self {
            AppError::Game(e) => e.kind(),
            AppError::MapStorage(e) => e.kind(),
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal => "Internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Game(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Game(_) => StatusCode::BAD_REQUEST,
            AppError::MapStorage(MapStorageError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MapStorage(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::MapStorage(MapStorageError::Io(e)) => {
                error!(error = %e, "Map storage failure");
                "Could not store the uploaded map".to_string()
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "kind": self.kind(),
            "error": error_message
        }));

        (status, body).into_response()
    }
}
