use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] quorum_core::client::ApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Discussion {0} cannot be empty")]
    EmptyField(&'static str),
    #[error("Update needs at least one of --title/--body")]
    EmptyUpdate,
}
