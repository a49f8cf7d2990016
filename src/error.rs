use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum YtdError {
    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timeout for URL: {0}")]
    RequestTimeout(String),

    #[error("HTTP error {status} for URL: {url}")]
    HttpError { status: u16, url: String },

    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("Response body is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to retrieve video {video_id} ({kind}): {message}")]
    RetrievalFailed {
        video_id: String,
        kind: RetrievalKind,
        message: String,
    },

    #[error("Video is not playable ({status}): {reason}")]
    Unplayable { status: String, reason: String },

    #[error("Unexpected player response shape: {0}")]
    InvalidResponse(String),

    #[error("No suitable stream URL found")]
    StreamNotFound,
}

/// Coarse cause of a failed upstream call, logged server-side only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RetrievalKind {
    Timeout,
    Connect,
    Status,
    Decode,
    Request,
}

impl RetrievalKind {
    pub fn classify(err: &YtdError) -> Self {
        match err {
            YtdError::RequestTimeout(_) => Self::Timeout,
            YtdError::NetworkError(e) if e.is_timeout() => Self::Timeout,
            YtdError::NetworkError(e) if e.is_connect() => Self::Connect,
            YtdError::HttpError { .. } => Self::Status,
            YtdError::Utf8Error(_) | YtdError::JsonError(_) => Self::Decode,
            YtdError::NetworkError(e) if e.is_decode() || e.is_body() => Self::Decode,
            _ => Self::Request,
        }
    }
}

pub type Result<T> = std::result::Result<T, YtdError>;
