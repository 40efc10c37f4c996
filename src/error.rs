use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Custom error type for the cache endpoints
///
/// Every per-request failure is reported the same way: a plain-text body
/// carrying the error's message and HTTP status 405, matching the service's
/// long-standing wire contract. Clients distinguish causes by message text.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed ttl parameter; raised before the store is contacted
    InvalidTtl(humantime::DurationError),
    /// Malformed score parameter; raised before the store is contacted
    InvalidScore(std::num::ParseFloatError),
    /// Store address whose port does not parse
    BadAddress(String),
    /// Any failure reported by the Redis client
    Store(redis::RedisError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::InvalidTtl(err) => format!("invalid ttl: {}", err),
            ApiError::InvalidScore(err) => format!("invalid score: {}", err),
            ApiError::BadAddress(addr) => format!("invalid store address: {}", addr),
            ApiError::Store(err) => err.to_string(),
        };

        (StatusCode::METHOD_NOT_ALLOWED, message).into_response()
    }
}

impl From<redis::RedisError> for ApiError {
    fn from(err: redis::RedisError) -> Self {
        ApiError::Store(err)
    }
}
