//! Turns zone activations into note pulses.
//!
//! A pulse is a note-on sent immediately plus a note-off scheduled
//! `pulse_gap` later.  The scheduled note-offs are flushed by
//! [`NoteEventEmitter::flush_due`] on every engine poll, so nothing ever
//! sleeps inside a tick.

use std::time::Duration;

use zen_midi::MidiTransport;

/// A note-off waiting for its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingNoteOff {
    pub note: u8,
    pub due:  Duration,
}

#[derive(Debug, Clone)]
pub struct NoteEventEmitter {
    velocity:  u8,
    pulse_gap: Duration,
    pending:   Vec<PendingNoteOff>,
}

impl NoteEventEmitter {
    pub fn new(velocity: u8, pulse_gap: Duration) -> Self {
        NoteEventEmitter { velocity: velocity.min(127), pulse_gap, pending: Vec::new() }
    }

    pub fn velocity(&self) -> u8 { self.velocity }

    /// Note-offs not yet sent, oldest first.
    pub fn pending(&self) -> &[PendingNoteOff] { &self.pending }

    /// Send note-on for `note` and schedule its note-off.  Skipped entirely
    /// when the transport is not connected.  Returns true if sent.
    pub fn pulse<T>(&mut self, note: u8, now: Duration, transport: &mut T) -> bool
    where
        T: MidiTransport + ?Sized,
    {
        if !transport.is_connected() { return false; }
        let note = note.min(127);
        transport.send_note_on(note, self.velocity);
        if self.pulse_gap.is_zero() {
            transport.send_note_off(note);
        } else {
            self.pending.push(PendingNoteOff { note, due: now + self.pulse_gap });
        }
        true
    }

    /// Send every note-off whose due time has come.  Entries that come due
    /// while the transport is disconnected are dropped.  Returns how many
    /// entries were retired.
    pub fn flush_due<T>(&mut self, now: Duration, transport: &mut T) -> usize
    where
        T: MidiTransport + ?Sized,
    {
        let before = self.pending.len();
        let connected = transport.is_connected();
        self.pending.retain(|off| {
            if off.due > now { return true; }
            if connected { transport.send_note_off(off.note); }
            false
        });
        before - self.pending.len()
    }

    /// Forget all scheduled note-offs without sending them.
    pub fn cancel_all(&mut self) -> Vec<PendingNoteOff> {
        std::mem::take(&mut self.pending)
    }

    /// Send every scheduled note-off now, regardless of due time.
    pub fn release_all<T>(&mut self, transport: &mut T) -> usize
    where
        T: MidiTransport + ?Sized,
    {
        let pending = self.cancel_all();
        if transport.is_connected() {
            for off in &pending {
                transport.send_note_off(off.note);
            }
        }
        pending.len()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use zen_midi::{MidiMessage, RecordingTransport};

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    #[test]
    fn pulse_sends_on_then_scheduled_off() {
        let mut e = NoteEventEmitter::new(100, ms(5));
        let mut t = RecordingTransport::new();
        assert!(e.pulse(60, ms(1000), &mut t));
        assert_eq!(t.sent, vec![MidiMessage::NoteOn { note: 60, velocity: 100 }]);
        assert_eq!(e.pending(), &[PendingNoteOff { note: 60, due: ms(1005) }]);

        assert_eq!(e.flush_due(ms(1004), &mut t), 0);
        assert_eq!(e.flush_due(ms(1005), &mut t), 1);
        assert_eq!(t.sent, vec![
            MidiMessage::NoteOn { note: 60, velocity: 100 },
            MidiMessage::NoteOff { note: 60 },
        ]);
        assert!(e.pending().is_empty());
    }

    #[test]
    fn zero_gap_is_an_immediate_pulse() {
        let mut e = NoteEventEmitter::new(100, Duration::ZERO);
        let mut t = RecordingTransport::new();
        e.pulse(64, ms(0), &mut t);
        assert_eq!(t.sent.len(), 2);
        assert!(e.pending().is_empty());
    }

    #[test]
    fn disconnected_transport_is_skipped() {
        let mut e = NoteEventEmitter::new(100, ms(5));
        let mut t = RecordingTransport::disconnected();
        assert!(!e.pulse(60, ms(0), &mut t));
        assert!(e.pending().is_empty());
        assert!(t.sent.is_empty());
    }

    #[test]
    fn link_drop_discards_due_offs() {
        let mut e = NoteEventEmitter::new(100, ms(5));
        let mut t = RecordingTransport::new();
        e.pulse(60, ms(0), &mut t);
        t.connected = false;
        assert_eq!(e.flush_due(ms(10), &mut t), 1);
        assert_eq!(t.sent.len(), 1);
        assert!(e.pending().is_empty());
    }

    #[test]
    fn overlapping_pulses_keep_order() {
        let mut e = NoteEventEmitter::new(90, ms(5));
        let mut t = RecordingTransport::new();
        e.pulse(79, ms(0), &mut t);
        e.pulse(79, ms(2), &mut t);
        e.flush_due(ms(7), &mut t);
        assert_eq!(t.take(), vec![
            MidiMessage::NoteOn { note: 79, velocity: 90 },
            MidiMessage::NoteOn { note: 79, velocity: 90 },
            MidiMessage::NoteOff { note: 79 },
            MidiMessage::NoteOff { note: 79 },
        ]);
    }

    #[test]
    fn release_and_cancel() {
        let mut e = NoteEventEmitter::new(100, ms(50));
        let mut t = RecordingTransport::new();
        e.pulse(60, ms(0), &mut t);
        e.pulse(62, ms(0), &mut t);
        assert_eq!(e.release_all(&mut t), 2);
        assert_eq!(t.sent.len(), 4);

        e.pulse(64, ms(0), &mut t);
        let dropped = e.cancel_all();
        assert_eq!(dropped.len(), 1);
        assert_eq!(e.flush_due(ms(100), &mut t), 0);
        assert_eq!(t.sent.len(), 5);
    }

    #[test]
    fn velocity_is_clamped() {
        assert_eq!(NoteEventEmitter::new(255, ms(5)).velocity(), 127);
    }
}
