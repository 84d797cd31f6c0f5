//! Error types for the console.

use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use emucon_client::ClientBuildError;

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Client(#[from] ClientBuildError),
}
