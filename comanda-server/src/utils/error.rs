//! Unified error handling
//!
//! Application-level error type and response envelope:
//! - [`AppError`] - application error enum with HTTP mapping
//! - [`AppResponse`] - API response structure
//!
//! # Error code scheme
//!
//! | Code | Meaning |
//! |-------|-----------------------------|
//! | E0000 | Success |
//! | E0002 | Validation failed |
//! | E0003 | Resource not found |
//! | E0004 | Conflict (lost update race) |
//! | E0005 | Business rule violation |
//! | E0007 | Table lock busy |
//! | E0008 | Nothing to close |
//! | E0009 | Partial close |
//! | E9001 | Internal server error |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::orders::closing::{CloseError, FailedClose};
use crate::orders::OrderError;

/// Unified API response envelope
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 means success)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Lost a conditional-update race; refetch and retry (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// State machine rejection and other domain rules (422)
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Another close is holding the table lock (423)
    #[error("Table busy: {0}")]
    LockBusy(String),

    /// A close found no matching active orders (409)
    #[error("Nothing to close: {0}")]
    NothingToClose(String),

    /// A close landed some orders and lost others; carries both lists so the
    /// terminal can show exactly what happened (409, with data payload)
    #[error("Partial close on table {table_id}")]
    PartialClose {
        table_id: String,
        closed: Vec<String>,
        failed: Vec<FailedClose>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Partial-close detail rendered into the response `data` field
#[derive(Debug, Serialize)]
struct PartialCloseDetail {
    table_id: String,
    closed: Vec<String>,
    failed: Vec<FailedClose>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.clone())
            }
            AppError::LockBusy(msg) => (StatusCode::LOCKED, "E0007", msg.clone()),
            AppError::NothingToClose(msg) => (StatusCode::CONFLICT, "E0008", msg.clone()),
            AppError::PartialClose { table_id, .. } => (
                StatusCode::CONFLICT,
                "E0009",
                format!("Table {} partially closed", table_id),
            ),
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let data = match self {
            AppError::PartialClose {
                table_id,
                closed,
                failed,
            } => Some(PartialCloseDetail {
                table_id,
                closed,
                failed,
            }),
            _ => None,
        };

        let body = Json(AppResponse {
            code: code.to_string(),
            message,
            data,
        });

        (status, body).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::OrderNotFound(id) => AppError::NotFound(format!("Order {} not found", id)),
            OrderError::EmptyBill(table) => {
                AppError::NotFound(format!("No active orders for table {}", table))
            }
            OrderError::Conflict(msg) => AppError::Conflict(msg),
            OrderError::InvalidTransition { .. } => AppError::BusinessRule(e.to_string()),
            OrderError::InvalidOperation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<CloseError> for AppError {
    fn from(e: CloseError) -> Self {
        match e {
            CloseError::TableLockBusy(table) => {
                AppError::LockBusy(format!("Another close is in progress for table {}", table))
            }
            CloseError::NothingToClose(table) => {
                AppError::NothingToClose(format!("No active orders to close for table {}", table))
            }
            CloseError::PartialCloseFailure {
                table_id,
                closed,
                failed,
            } => AppError::PartialClose {
                table_id,
                closed,
                failed,
            },
            CloseError::Order(inner) => inner.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderStatus;

    #[test]
    fn test_order_error_mapping() {
        let e: AppError = OrderError::OrderNotFound("o1".to_string()).into();
        assert!(matches!(e, AppError::NotFound(_)));

        let e: AppError = OrderError::InvalidTransition {
            order_id: "o1".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Ready,
        }
        .into();
        assert!(matches!(e, AppError::BusinessRule(_)));
    }

    #[test]
    fn test_success_envelope_shape() {
        let body = ok(vec!["a", "b"]);
        let json = serde_json::to_value(&body.0).unwrap();
        assert_eq!(json["code"], "E0000");
        assert_eq!(json["message"], "Success");
        assert_eq!(json["data"][1], "b");
    }

    #[test]
    fn test_close_error_mapping() {
        let e: AppError = CloseError::TableLockBusy("t1".to_string()).into();
        assert!(matches!(e, AppError::LockBusy(_)));

        let e: AppError = CloseError::PartialCloseFailure {
            table_id: "t1".to_string(),
            closed: vec!["a".to_string()],
            failed: vec![],
        }
        .into();
        assert!(matches!(e, AppError::PartialClose { .. }));
    }
}
