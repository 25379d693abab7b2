//! Topic Source failures. Any of these means "no topics this cycle".

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Page fetched but the topic list could not be found or parsed.
    #[error("malformed trending page: {0}")]
    Malformed(String),
}

impl SourceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::Http(_) => "http",
            SourceError::Status { .. } => "status",
            SourceError::Malformed(_) => "malformed",
        }
    }
}
