// src/handlers/error.rs
use std::fmt;

use warp::reject::Reject;

/// Error carried through warp rejections; the route recovery handler
/// renders it as `{"error": message}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
        }
    }

    pub fn upstream(err: impl fmt::Display) -> Self {
        ApiError {
            message: format!("Failed to fetch emissions data: {}", err),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
impl Reject for ApiError {}
