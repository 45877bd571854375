//! Error types for ZTunnel.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Registry error: {0}")]
    Registry(String),
}
