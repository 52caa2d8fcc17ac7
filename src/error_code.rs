//! The business error codes returned to API clients.
//!
//! Clients receive a stable code independent of the internal [Error](crate::Error)
//! variant that caused it. The JSON body has the shape
//! `{"status": ..., "message": ..., "statusCode": ...}` and the HTTP status of
//! the response always equals `statusCode`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// A business error code from the error catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// An unexpected error occurred on the server.
    TEA001,
    /// The request did not carry valid authentication credentials.
    TEA002,
    /// The request failed validation.
    TEA003,
    /// No route matches the requested path.
    TEA004,
    /// The route exists but does not support the request method.
    TEA005,
    /// The financial transaction category does not exist or is not visible to the caller.
    FTC001,
}

impl ErrorCode {
    /// The short symbolic name of the error.
    pub fn business_status(&self) -> &'static str {
        match self {
            ErrorCode::TEA001 => "TEA_INTERNAL_SERVER_ERROR",
            ErrorCode::TEA002 => "TEA_UNAUTHORIZED",
            ErrorCode::TEA003 => "TEA_VALIDATION_ERROR",
            ErrorCode::TEA004 => "TEA_NOT_FOUND",
            ErrorCode::TEA005 => "TEA_METHOD_NOT_ALLOWED",
            ErrorCode::FTC001 => "FINANCIAL_TRANSACTION_CATEGORY_NOT_FOUND",
        }
    }

    /// The human readable description of the error.
    pub fn business_message(&self) -> &'static str {
        match self {
            ErrorCode::TEA001 => {
                "An unexpected error occurred, check the server logs for more details."
            }
            ErrorCode::TEA002 => "Valid authentication credentials are required.",
            ErrorCode::TEA003 => "The request contains invalid data.",
            ErrorCode::TEA004 => "The requested resource could not be found.",
            ErrorCode::TEA005 => "The requested method is not supported for this resource.",
            ErrorCode::FTC001 => "The financial transaction category could not be found.",
        }
    }

    /// The numeric code of the error, aligned with HTTP status codes.
    pub fn business_status_code(&self) -> u16 {
        match self {
            ErrorCode::TEA001 => 500,
            ErrorCode::TEA002 => 401,
            ErrorCode::TEA003 => 400,
            ErrorCode::TEA004 => 404,
            ErrorCode::TEA005 => 405,
            ErrorCode::FTC001 => 404,
        }
    }

    /// The body sent to the client for this error.
    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.business_status().to_owned(),
            message: self.business_message().to_owned(),
            status_code: self.business_status_code(),
        }
    }
}

/// The JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// See [ErrorCode::business_status].
    pub status: String,
    /// See [ErrorCode::business_message].
    pub message: String,
    /// See [ErrorCode::business_status_code].
    pub status_code: u16,
}

impl IntoResponse for ErrorCode {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.business_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_response_body())).into_response()
    }
}

#[cfg(test)]
mod error_code_tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    use super::{ErrorCode, ErrorResponse};

    #[test]
    fn body_uses_camel_case_status_code() {
        let body = serde_json::to_value(ErrorCode::TEA003.to_response_body()).unwrap();

        assert_eq!(
            body,
            json!({
                "status": "TEA_VALIDATION_ERROR",
                "message": "The request contains invalid data.",
                "statusCode": 400,
            })
        );
    }

    #[test]
    fn every_code_maps_to_a_valid_http_status() {
        for code in [
            ErrorCode::TEA001,
            ErrorCode::TEA002,
            ErrorCode::TEA003,
            ErrorCode::TEA004,
            ErrorCode::TEA005,
            ErrorCode::FTC001,
        ] {
            let status = StatusCode::from_u16(code.business_status_code());

            assert!(status.is_ok(), "{code:?} has an invalid status code");
        }
    }

    #[tokio::test]
    async fn response_status_matches_status_code() {
        let response = ErrorCode::TEA003.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, ErrorCode::TEA003.to_response_body());
    }
}
