use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure: no response, or a response body that could not be read.
    #[error("transport error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("http {0}: {1}")]
    Http(StatusCode, String),

    /// The refresh endpoint answered 2xx without a usable token.
    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error("invalid token: {0}")]
    Token(String),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Status code of the response that produced this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(status, _) => Some(*status),
            Error::Reqwest(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::Token(err.to_string())
    }
}
