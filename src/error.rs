use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoViewerError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("{0}")]
    RemoteMessage(String),

    #[error("{0}")]
    RemoteCode(u16),

    #[error("Code: {code}\n{message}")]
    RemoteMessageCode { code: u16, message: String },

    #[error("Repository has no README")]
    ReadmeNotFound,

    #[error("No token stored, sign in first")]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl RepoViewerError {
    /// HTTP status carried by a remote failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RepoViewerError::RemoteCode(code) | RepoViewerError::RemoteMessageCode { code, .. } => {
                Some(*code)
            }
            RepoViewerError::ReadmeNotFound => Some(StatusCode::NOT_FOUND.as_u16()),
            _ => None,
        }
    }
}

/// How much of a failed response is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User-facing message only.
    Message,
    /// HTTP status only.
    Code,
    /// HTTP status followed by a developer-facing message.
    MessageAndCode,
}

impl Severity {
    pub fn into_error(self, status: StatusCode, message: &str) -> RepoViewerError {
        match self {
            Severity::Message => RepoViewerError::RemoteMessage(message.to_string()),
            Severity::Code if status == StatusCode::NOT_FOUND => RepoViewerError::ReadmeNotFound,
            Severity::Code => RepoViewerError::RemoteCode(status.as_u16()),
            Severity::MessageAndCode => RepoViewerError::RemoteMessageCode {
                code: status.as_u16(),
                message: message.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, RepoViewerError>;
