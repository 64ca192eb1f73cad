use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Request-level failures surfaced to API callers.
///
/// Every variant renders as `{"error": "<message>"}`. Storage faults keep the
/// underlying cause out of the response body on release builds; callers see a
/// generic message and the cause goes to the log instead.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", _0)]
    InvalidInput(String),
    #[display(fmt = "{}", _0)]
    Conflict(String),
    #[display(fmt = "storage error: {}", _0)]
    Storage(sqlx::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Storage(cause) => {
                let mut body = json!({ "error": "internal storage error" });
                // detail only on debug builds
                if cfg!(debug_assertions) {
                    body["detail"] = json!(cause.to_string());
                }
                HttpResponse::build(self.status_code()).json(body)
            }
            _ => HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() })),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // SQLSTATE 23000: integrity constraint violation, e.g. moving a record
        // onto an (employee_id, date) pair that already has one.
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some("23000") {
                return ApiError::Conflict(
                    "an attendance record already exists for this employee and date".to_string(),
                );
            }
        }
        ApiError::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Storage(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_database_errors_map_to_storage() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::Storage(_)));
    }

    #[test]
    fn display_carries_the_message() {
        let err = ApiError::InvalidInput("date is required".into());
        assert_eq!(err.to_string(), "date is required");
    }
}
