use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::Debug;

use crate::pricing::PricingError;

pub const INVALID_INVOCATION: i32 = 100;
pub const INVALID_INPUT: i32 = 101;
pub const UNAUTHORIZED: i32 = 102;
pub const NOT_FOUND: i32 = 103;
pub const INVALID_CAPACITY: i32 = 110;
pub const INVALID_PAYMENT_INPUT: i32 = 111;
pub const INVALID_PRICE: i32 = 112;
pub const INVALID_ROUTE: i32 = 113;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::database_error(err)
    }
}

impl From<PricingError> for Error {
    fn from(err: PricingError) -> Self {
        let code = match err {
            PricingError::InvalidCapacity { .. } => INVALID_CAPACITY,
            PricingError::InvalidPaymentInput(_) => INVALID_PAYMENT_INPUT,
            PricingError::InvalidPrice(_) => INVALID_PRICE,
            PricingError::InvalidRoute(_) => INVALID_ROUTE,
        };

        tracing::warn!("pricing rejected input: {}", err);

        Error {
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            UNAUTHORIZED => (StatusCode::FORBIDDEN, self.message.as_str()),
            NOT_FOUND => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    pub fn invalid_invocation_error() -> Error {
        Error {
            code: INVALID_INVOCATION,
            message: "invalid invocation".into(),
        }
    }

    pub fn invalid_input_error() -> Error {
        Error {
            code: INVALID_INPUT,
            message: "invalid input".into(),
        }
    }

    pub fn unauthorized_error() -> Error {
        Error {
            code: UNAUTHORIZED,
            message: "unauthorized".into(),
        }
    }

    pub fn not_found_error() -> Error {
        Error {
            code: NOT_FOUND,
            message: "not found".into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Error {
        Error {
            code: 4,
            message: message.into(),
        }
    }

    pub fn database_error<T: Debug>(err: T) -> Error {
        tracing::error!("database error: {:?}", err);

        Error {
            code: 2,
            message: "database error".into(),
        }
    }

    pub fn unexpected_error() -> Error {
        Error {
            code: 5,
            message: "unexpected error".into(),
        }
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == INVALID_INPUT
    }

    pub fn is_not_found_error(&self) -> bool {
        self.code == NOT_FOUND
    }

    pub fn is_internal(&self) -> bool {
        (1..=99).contains(&self.code)
    }
}

#[test]
fn pricing_errors_are_client_errors() {
    let err: Error = PricingError::InvalidCapacity {
        total_seats: 2,
        booked_seats: 3,
    }
    .into();
    assert_eq!(err.code, INVALID_CAPACITY);
    assert!(!err.is_internal());

    let err: Error = PricingError::InvalidPaymentInput("negative".into()).into();
    assert_eq!(err.code, INVALID_PAYMENT_INPUT);
    assert!(err.message.contains("negative"));
}

#[test]
fn internal_errors_hide_their_message() {
    let response = Error::database_error("connection reset").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = Error::not_found_error().into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = Error::invalid_input_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
