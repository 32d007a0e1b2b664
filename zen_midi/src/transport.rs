//! The transport trait plus the two in-memory backends.

use crate::message::MidiMessage;

// ════════════════════════════════════════════════════════════════════════════
// MidiTransport — what the engine needs from a MIDI link
// ════════════════════════════════════════════════════════════════════════════

/// A MIDI link the engine can pulse notes through.
///
/// Implementations must tolerate sends while disconnected (drop them), but
/// callers are still expected to check [`MidiTransport::is_connected`] first.
pub trait MidiTransport {
    fn is_connected(&self) -> bool;
    fn send_note_on(&mut self, note: u8, velocity: u8);
    fn send_note_off(&mut self, note: u8);
}

impl<T: MidiTransport + ?Sized> MidiTransport for Box<T> {
    fn is_connected(&self) -> bool { (**self).is_connected() }
    fn send_note_on(&mut self, note: u8, velocity: u8) { (**self).send_note_on(note, velocity) }
    fn send_note_off(&mut self, note: u8) { (**self).send_note_off(note) }
}

// ── null backend (used when no MIDI port is available) ────────────────────

/// A transport that is never connected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl MidiTransport for NullTransport {
    fn is_connected(&self) -> bool { false }
    fn send_note_on(&mut self, _note: u8, _velocity: u8) {}
    fn send_note_off(&mut self, _note: u8) {}
}

// ── recording backend ─────────────────────────────────────────────────────

/// Keeps every accepted message in order.
///
/// Connected by default; flip [`RecordingTransport::connected`] to simulate
/// a dropped link.  Sends while disconnected are not recorded.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    pub connected: bool,
    pub sent:      Vec<MidiMessage>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        RecordingTransport { connected: true, sent: Vec::new() }
    }

    pub fn disconnected() -> Self {
        RecordingTransport { connected: false, sent: Vec::new() }
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<MidiMessage> {
        std::mem::take(&mut self.sent)
    }
}

impl Default for RecordingTransport {
    fn default() -> Self { RecordingTransport::new() }
}

impl MidiTransport for RecordingTransport {
    fn is_connected(&self) -> bool { self.connected }

    fn send_note_on(&mut self, note: u8, velocity: u8) {
        if self.connected {
            self.sent.push(MidiMessage::NoteOn { note, velocity });
        }
    }

    fn send_note_off(&mut self, note: u8) {
        if self.connected {
            self.sent.push(MidiMessage::NoteOff { note });
        }
    }
}
