//! Errors raised while opening a MIDI output.  Sending never fails loudly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The platform MIDI client could not be created.
    #[error("MIDI init error: {0}")]
    Init(#[from] midir::InitError),

    /// No output ports are visible at all.
    #[error("no MIDI output ports found")]
    NoPorts,

    /// Ports exist but none matches the requested name.
    #[error("no MIDI output port matches \"{0}\"")]
    PortNotFound(String),

    /// The port was found but the connection was refused.
    #[error("failed to connect to \"{port}\": {reason}")]
    Connect { port: String, reason: String },
}
