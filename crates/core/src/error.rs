use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Non-success response from the metadata API, already phrased for display.
    #[error("{0}")]
    ExternalApi(String),

    /// The metadata API could not be reached or sent an unreadable body.
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Item not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound => 404,
            Error::Validation(_) => 400,
            Error::ExternalApi(_) | Error::Unavailable(_) => 502,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Unavailable(err.without_url().to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
