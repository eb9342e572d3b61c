//! Error Types
//!
//! Backend failures stay flat: any non-2xx response is one `Status` error.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Failure talking to the meal-planner backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("API Error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The only status the client treats differently (week auto-creation)
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Errors surfaced by coordinator operations that return to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("No week is loaded")]
    NoWeekLoaded,

    #[error("Week id is empty")]
    EmptyWeekId,

    #[error("Recipe text is empty")]
    EmptyRecipeText,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_carries_code_and_text() {
        let err = ApiError::Status { status: 502, status_text: "Bad Gateway".into() };
        assert_eq!(err.to_string(), "API Error: 502 Bad Gateway");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_structural() {
        let err = ApiError::Status { status: 404, status_text: "Not Found".into() };
        assert!(err.is_not_found());
        // a transport message mentioning 404 is not a not-found response
        assert!(!ApiError::Transport("proxy said 404".into()).is_not_found());
    }

    #[test]
    fn planner_error_wraps_api_error_transparently() {
        let err: PlannerError = ApiError::Transport("connection refused".into()).into();
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }
}
