use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("login failed: {0}")]
    AuthenticationFailed(String),

    #[error("unexpected page structure: {0}")]
    Parse(String),

    #[error("cache i/o error: {0}")]
    CacheIo(#[from] std::io::Error),

    #[error("invalid user record: {0}")]
    Validation(String),
}
