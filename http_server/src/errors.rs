use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use locations::LocationStoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Service unavailable")]
    ServiceUnavailable(#[source] anyhow::Error),
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<LocationStoreError> for ApiError {
    fn from(value: LocationStoreError) -> Self {
        match value {
            LocationStoreError::InvalidLocation(err) => ApiError::BadRequest(err.to_string()),
            err @ LocationStoreError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            err @ LocationStoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            LocationStoreError::BackendUnavailable(err) => ApiError::ServiceUnavailable(err),
            LocationStoreError::Internal(err) => ApiError::InternalServerError(err),
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::ServiceUnavailable(err) | ApiError::InternalServerError(err) => {
                tracing::error!("{:?}", err)
            }
            _ => {}
        }
        let err_json = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(err_json)
    }
}
