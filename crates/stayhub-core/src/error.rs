//! Unified error handling for StayHub
//!
//! This module provides a comprehensive error type that covers all possible
//! failure scenarios in the application, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Database Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Booking row was written but a dependent payment/invoice write failed.
    /// The booking id is preserved so callers can reconcile out of band.
    #[error("Booking {booking_id} persisted but billing records failed: {detail}")]
    PartialBooking { booking_id: Uuid, detail: String },

    // ==================== Authentication Errors ====================
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: insufficient permissions")]
    Forbidden,

    // ==================== Business Logic Errors ====================
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Room type not found: {0}")]
    RoomTypeNotFound(String),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Payment not found for booking: {0}")]
    PaymentNotFound(String),

    #[error("Invoice not found for booking: {0}")]
    InvoiceNotFound(String),

    #[error("Room unavailable: {0}")]
    RoomUnavailable(String),

    #[error("No rate configured for room {0} in the requested range")]
    RateNotConfigured(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Room does not belong to property: {0}")]
    PropertyMismatch(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_) | AppError::InvalidInput(_) | AppError::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }

            // 401 Unauthorized
            AppError::InvalidToken(_) | AppError::TokenExpired => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            AppError::Forbidden | AppError::Unauthorized(_) => StatusCode::FORBIDDEN,

            // 404 Not Found
            AppError::RoomNotFound(_)
            | AppError::RoomTypeNotFound(_)
            | AppError::BookingNotFound(_)
            | AppError::PaymentNotFound(_)
            | AppError::InvoiceNotFound(_)
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::Conflict(_) | AppError::InvalidTransition { .. } => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            AppError::RoomUnavailable(_)
            | AppError::RateNotConfigured(_)
            | AppError::PropertyMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::Transaction(_) => "transaction_error",
            AppError::PartialBooking { .. } => "dependency_error",
            AppError::TokenExpired => "token_expired",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden => "forbidden",
            AppError::RoomNotFound(_) => "room_not_found",
            AppError::RoomTypeNotFound(_) => "room_type_not_found",
            AppError::BookingNotFound(_) => "booking_not_found",
            AppError::PaymentNotFound(_) => "payment_not_found",
            AppError::InvoiceNotFound(_) => "invoice_not_found",
            AppError::RoomUnavailable(_) => "room_unavailable",
            AppError::RateNotConfigured(_) => "rate_not_configured",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::PropertyMismatch(_) => "property_mismatch",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::MissingField(_) => "missing_field",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }

    /// Message safe to expose in API responses.
    ///
    /// Repository/collaborator failures carry internal detail (SQL text,
    /// connection errors) that must not leak to clients; everything else is
    /// deterministic domain wording and is returned verbatim.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Transaction(_)
            | AppError::Internal(_)
            | AppError::Config(_)
            | AppError::Serialization(_) => "An internal error occurred".to_string(),
            AppError::PartialBooking { booking_id, .. } => format!(
                "Booking {} was created but billing records require reconciliation",
                booking_id
            ),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.public_message(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::Validation("bad dates".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RoomNotFound("123".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::RoomUnavailable("room booked".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InvalidTransition {
                from: "Cancelled".to_string(),
                to: "Confirmed".to_string()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::RateNotConfigured("room-1".to_string()).error_code(),
            "rate_not_configured"
        );
        assert_eq!(
            AppError::PartialBooking {
                booking_id: Uuid::nil(),
                detail: "payment insert failed".to_string()
            }
            .error_code(),
            "dependency_error"
        );
    }

    #[test]
    fn test_public_message_hides_internal_detail() {
        let err = AppError::Database("connection refused at 10.0.0.5:5432".to_string());
        assert_eq!(err.public_message(), "An internal error occurred");

        let err = AppError::RoomUnavailable("room booked".to_string());
        assert!(err.public_message().contains("room booked"));
    }

    #[test]
    fn test_partial_booking_keeps_booking_id() {
        let id = Uuid::new_v4();
        let err = AppError::PartialBooking {
            booking_id: id,
            detail: "invoice insert failed".to_string(),
        };
        assert!(err.public_message().contains(&id.to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
