use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConceptifyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Please enter your API key in the settings (or set BRIA_API_KEY)")]
    AuthenticationMissing,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Request timed out")]
    NetworkTimeout,
    #[error("Connection error: {0}")]
    ConnectionFailure(String),
    #[error("HTTP error: status {status}")]
    HttpError { status: u16 },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("No valid result format found in the API response")]
    ResponseShapeUnrecognized,
    #[error("Unexpected error: {0}")]
    UnknownError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for ConceptifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ConceptifyError::NetworkTimeout
        } else if err.is_connect() {
            ConceptifyError::ConnectionFailure(err.to_string())
        } else if let Some(status) = err.status() {
            ConceptifyError::HttpError {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ConceptifyError::MalformedResponse(err.to_string())
        } else {
            ConceptifyError::UnknownError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConceptifyError {
    fn from(err: serde_json::Error) -> Self {
        ConceptifyError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConceptifyError>;
