use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid proxy {0}")]
    InvalidProxy(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL already visited: {0}")]
    AlreadyVisited(String),

    #[error("Crawler is closed, refusing {0}")]
    Closed(String),
}

impl ScanError {
    /// Already-visited is reported through the error channel but is not a failure.
    pub fn is_already_visited(&self) -> bool {
        matches!(self, ScanError::AlreadyVisited(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ScanError::Closed(_))
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
