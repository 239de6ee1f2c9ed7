use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(feature = "client")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            let url = err.url().map(|url| url.to_string()).unwrap_or_default();
            return RepositoryError::Status {
                status: status.as_u16(),
                url,
            };
        }

        if err.is_decode() {
            RepositoryError::DecodeError(format!("Malformed response body: {err}"))
        } else if err.is_timeout() {
            RepositoryError::ConnectionError(format!("Request timed out: {err}"))
        } else if err.is_connect() || err.is_request() {
            RepositoryError::ConnectionError(format!("Request failed: {err}"))
        } else if err.is_builder() {
            RepositoryError::ValidationError(format!("Invalid request: {err}"))
        } else {
            RepositoryError::Unexpected(format!("Unexpected http error: {err}"))
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::DecodeError(format!("Malformed response body: {err}"))
    }
}
