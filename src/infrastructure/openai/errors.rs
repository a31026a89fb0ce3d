//! Errors for the chat-completions adapter.

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::ports::ServiceError;

/// Errors that can occur when talking to the completions endpoint.
#[derive(Error, Debug)]
pub enum OpenAiApiError {
    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid or missing API key (HTTP 401)
    #[error("Invalid API key - authentication failed")]
    InvalidApiKey,

    /// Forbidden - permission denied (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// Rate limit or quota exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error from the endpoint (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Unknown or unexpected error
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl OpenAiApiError {
    /// Construct an error from an HTTP status code and response body.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRequest(body),
            StatusCode::UNAUTHORIZED => Self::InvalidApiKey,
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            s if s.is_server_error() => Self::ServerError(s, body),
            s => Self::UnknownError(s, body),
        }
    }

    /// True for errors a caller could sensibly retry on a later run.
    ///
    /// The pipeline itself never retries: a failed completion call is
    /// terminal for the run.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::ServerError(_, _) | Self::Timeout | Self::NetworkError(_)
        )
    }

    /// True for errors that will not succeed on any retry.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::InvalidApiKey | Self::Forbidden(_) | Self::NotFound
        )
    }

    /// Status code associated with this error, when one exists.
    fn status(&self) -> Option<StatusCode> {
        match self {
            Self::InvalidRequest(_) => Some(StatusCode::BAD_REQUEST),
            Self::InvalidApiKey => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            Self::NotFound => Some(StatusCode::NOT_FOUND),
            Self::RateLimitExceeded => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::ServerError(s, _) | Self::UnknownError(s, _) => Some(*s),
            Self::NetworkError(_) | Self::Timeout => None,
        }
    }
}

impl From<OpenAiApiError> for ServiceError {
    fn from(error: OpenAiApiError) -> Self {
        match &error {
            OpenAiApiError::Timeout => Self::Timeout,
            OpenAiApiError::NetworkError(e) if e.is_timeout() => Self::Timeout,
            OpenAiApiError::NetworkError(e) => Self::Network(e.to_string()),
            _ => match error.status() {
                Some(status) => Self::Api {
                    status: status.as_u16(),
                    message: error.to_string(),
                },
                None => Self::Network(error.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            OpenAiApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            OpenAiApiError::InvalidApiKey
        ));
        assert!(matches!(
            OpenAiApiError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            OpenAiApiError::RateLimitExceeded
        ));
        assert!(matches!(
            OpenAiApiError::from_status(StatusCode::BAD_GATEWAY, "oops".to_string()),
            OpenAiApiError::ServerError(StatusCode::BAD_GATEWAY, _)
        ));
    }

    #[test]
    fn transient_and_permanent_are_exclusive() {
        let transient = OpenAiApiError::RateLimitExceeded;
        assert!(transient.is_transient());
        assert!(!transient.is_permanent());

        let permanent = OpenAiApiError::InvalidApiKey;
        assert!(permanent.is_permanent());
        assert!(!permanent.is_transient());
    }

    #[test]
    fn conversion_to_service_error_keeps_status() {
        let error = OpenAiApiError::from_status(StatusCode::UNAUTHORIZED, String::new());
        match ServiceError::from(error) {
            ServiceError::Api { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
