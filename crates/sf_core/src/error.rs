use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No data in response")]
    NoData,

    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Decoding error: {0}")]
    Decoding(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    NoData,
    Transport,
    Decoding,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Error::NoData => ErrorKind::NoData,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Decoding(_) => ErrorKind::Decoding,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Message safe to show to an end user. Never includes the underlying error text.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Transport(_) | Error::NoData => {
                "Something went wrong while talking to the news service."
            }
            Error::InvalidUrl(_) | Error::Decoding(_) | Error::Io(_) => "Something went wrong.",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
