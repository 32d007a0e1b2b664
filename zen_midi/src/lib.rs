//! # zen_midi
//!
//! The MIDI transport the trigger engine talks to.  Sends are
//! fire-and-forget: there is no acknowledgment, and callers must check
//! [`MidiTransport::is_connected`] before sending.
//!
//! | Backend | Use |
//! |---|---|
//! | [`MidirTransport`] | A real output port via `midir` |
//! | [`NullTransport`] | Never connected; every send is dropped |
//! | [`RecordingTransport`] | Keeps every message in memory (tests, replays) |

pub mod error;
pub mod message;
pub mod transport;
pub mod midir_out;

pub use error::TransportError;
pub use message::MidiMessage;
pub use transport::{MidiTransport, NullTransport, RecordingTransport};
pub use midir_out::{MidirTransport, list_output_ports};
