use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

pub const WORKED_EXCEEDS_WORKING: &str = "Worked days cannot exceed total working days";
pub const WORKING_EXCEEDS_TOTAL: &str = "Working days cannot exceed total days in month";

/// Failures reported by the attendance operations.
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Employee not found")]
    EmployeeNotFound { employee_id: u64 },

    #[error("Invalid week number")]
    InvalidWeekNumber { week_number: i32, week_count: usize },

    #[error("{0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl AttendanceError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::ValidationFailed(reason.into())
    }
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::EmployeeNotFound { .. } => StatusCode::NOT_FOUND,
            AttendanceError::InvalidWeekNumber { .. } | AttendanceError::ValidationFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            AttendanceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AttendanceError::Storage(e) => {
                tracing::error!(error = %e, "Attendance storage failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn storage_details_are_not_leaked() {
        let err = AttendanceError::from(StoreError::query("connection reset by peer"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "Internal Server Error");
    }

    #[test]
    fn domain_failures_map_to_client_errors() {
        assert_eq!(
            AttendanceError::EmployeeNotFound { employee_id: 9 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AttendanceError::InvalidWeekNumber { week_number: 7, week_count: 5 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AttendanceError::validation(WORKED_EXCEEDS_WORKING).to_string(),
            WORKED_EXCEEDS_WORKING
        );
    }
}
