use axum::http::StatusCode;
use thiserror::Error;

/// Rejected body measurement. BMI and goal math never see these values.
#[derive(Debug, Error, PartialEq)]
pub enum MetricError {
    #[error("{field} must be a positive number, got {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Errors raised by the repository and the report builders.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("goal not found: {0}")]
    GoalNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Metric(#[from] MetricError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::UserNotFound(_) | TrackerError::GoalNotFound(_) => {
                Self::not_found(err.to_string())
            }
            TrackerError::Validation(_) | TrackerError::Metric(_) | TrackerError::Calendar(_) => {
                Self::bad_request(err.to_string())
            }
        }
    }
}

impl From<MetricError> for AppError {
    fn from(err: MetricError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
