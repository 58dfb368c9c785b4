use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug)]
pub enum HttpError {
    BadRequest { error: &'static str, detail: String },
    Internal { error: &'static str, detail: String },
}

impl From<rewards_application::AppError> for HttpError {
    fn from(value: rewards_application::AppError) -> Self {
        match value {
            rewards_application::AppError::Validation(detail) => HttpError::BadRequest {
                error: "validation_error",
                detail,
            },
            rewards_application::AppError::StoreAccess(err) => HttpError::Internal {
                error: "store_access_error",
                detail: format!("{:#}", err),
            },
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(value: JsonRejection) -> Self {
        HttpError::BadRequest {
            error: "invalid_body",
            detail: value.body_text(),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(value: QueryRejection) -> Self {
        HttpError::BadRequest {
            error: "invalid_query",
            detail: value.body_text(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match self {
            HttpError::BadRequest { error, detail } => (StatusCode::BAD_REQUEST, error, detail),
            HttpError::Internal { error, detail } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error, detail)
            }
        };
        (status, Json(ErrorBody { error, detail })).into_response()
    }
}
