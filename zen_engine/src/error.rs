//! Engine-side error types.
//!
//! The simulation itself never fails; only loading a configuration can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
