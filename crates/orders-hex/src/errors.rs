use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orders_types::domain::order::ValidationErrors;
use orders_types::ports::order_repository::RepoError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        AppError::Internal(e.into())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [orders_types::domain::order::FieldError]>,
}

fn json(code: StatusCode, body: &ErrorBody<'_>) -> Response {
    let body = serde_json::to_string(body)
        .unwrap_or_else(|_| "{\"error\":\"internal serialization\"}".into());
    (code, [("content-type", "application/json")], body).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest(m) => json(
                StatusCode::BAD_REQUEST,
                &ErrorBody {
                    error: m,
                    fields: None,
                },
            ),
            AppError::Validation(errors) => json(
                StatusCode::BAD_REQUEST,
                &ErrorBody {
                    error: "validation failed",
                    fields: Some(errors.fields.as_slice()),
                },
            ),
            AppError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorBody {
                        error: "internal error",
                        fields: None,
                    },
                )
            }
        }
    }
}
