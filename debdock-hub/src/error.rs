use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("neither debian nor ubuntu publishes a {0:?} image tag")]
    DistributionNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
