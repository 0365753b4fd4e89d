use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("changelog has no entries")]
    Empty,

    #[error("malformed changelog entry, expected `package (version) distribution; ...`: {0:?}")]
    MissingVersion(String),

    #[error("changelog entry has an empty package name: {0:?}")]
    EmptyPackage(String),

    #[error("changelog entry has no `;` after the distribution: {0:?}")]
    MissingDistribution(String),

    #[error("changelog entry has an empty distribution: {0:?}")]
    EmptyDistribution(String),

    #[error("version epoch is not numeric: {0:?}")]
    EpochNonNumeric(String),

    #[error("version has an empty upstream component: {0:?}")]
    EmptyUpstreamVersion(String),

    #[error("version has an empty revision component: {0:?}")]
    EmptyRevision(String),

    #[error("upstream version component has an illegal character: {0:?}")]
    UpstreamIllegalChar(String),

    #[error("unsupported architecture: {0:?}")]
    UnsupportedArchitecture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
