use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("{context} ({status})")]
    Http { status: StatusCode, context: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("VocabError: {0}")]
    Custom(String),
}

impl VocabError {
    pub fn http(status: StatusCode, context: impl Into<String>) -> Self {
        VocabError::Http { status, context: context.into() }
    }
}

impl From<std::io::Error> for VocabError {
    fn from(error: std::io::Error) -> Self {
        VocabError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for VocabError {
    fn from(error: reqwest::Error) -> Self {
        VocabError::Reqwest(Box::new(error))
    }
}

impl From<chrono::ParseError> for VocabError {
    fn from(error: chrono::ParseError) -> Self {
        VocabError::InvalidDate(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_context_and_status() {
        let err = VocabError::http(StatusCode::NOT_FOUND, "Failed to load dates");
        assert_eq!(err.to_string(), "Failed to load dates (404 Not Found)");
    }
}
