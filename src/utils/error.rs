use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("Upstream error fetching PDF: {status}")]
    UpstreamStatus { status: u16 },

    #[error("Failed to parse PDFs from {url}: {message}")]
    Listing { url: String, message: String },

    #[error("PDF host not allowed.")]
    HostNotAllowed,

    #[error("URL is not a PDF.")]
    NotAPdf,

    #[error("Failed to read PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Configuration error: {field}: {reason}")]
    InvalidConfigValue { field: String, reason: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Network { .. }
            | ApiError::UpstreamStatus { .. }
            | ApiError::Listing { .. }
            | ApiError::Http(_) => StatusCode::BAD_GATEWAY,
            ApiError::HostNotAllowed
            | ApiError::NotAPdf
            | ApiError::Pdf(_)
            | ApiError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Pattern(_)
            | ApiError::Io(_)
            | ApiError::Serialization(_)
            | ApiError::InvalidConfigValue { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Error bodies use the same {"detail": ...} shape for every failure.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_map_to_bad_gateway() {
        let err = ApiError::Network {
            url: "https://www.haysplc.com/investors".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ApiError::UpstreamStatus { status: 503 }.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_client_errors_map_to_bad_request() {
        assert_eq!(
            ApiError::HostNotAllowed.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotAPdf.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_detail_message_format() {
        let err = ApiError::UpstreamStatus { status: 404 };
        assert_eq!(err.to_string(), "Upstream error fetching PDF: 404");
    }
}
