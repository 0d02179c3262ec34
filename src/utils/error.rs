use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, AggError>;

/// 單一來源抓取失敗的原因。只用於日誌診斷，不會傳播給呼叫端。
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} returned an unusable payload: {reason}")]
    BadPayload { url: String, reason: String },
}
