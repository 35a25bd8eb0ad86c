use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stellar_core::BookingError;

#[derive(Debug)]
pub enum AppError {
    Authentication(String),
    BadRequest(String),
    Booking(BookingError),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::Booking(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Booking(BookingError::Store(source)) => {
                tracing::error!("Store failure: {}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Booking(err) => {
                let status = match &err {
                    BookingError::NotFound(_) => StatusCode::NOT_FOUND,
                    BookingError::Forbidden(_) => StatusCode::FORBIDDEN,
                    BookingError::RelationshipMismatch
                    | BookingError::InvalidRange
                    | BookingError::InvalidQuantity => StatusCode::BAD_REQUEST,
                    BookingError::IllegalTransition => StatusCode::CONFLICT,
                    BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
