use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("changelog error: {0}")]
    Changelog(#[from] debdock_changelog::Error),

    #[error("image resolution failed: {0}")]
    Hub(#[from] debdock_hub::Error),

    #[error("docker executable not found in PATH")]
    DockerNotFound,

    #[error("command `{command}` failed: {status}")]
    Subprocess { command: String, status: ExitStatus },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
