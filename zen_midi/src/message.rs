//! Channel-voice messages emitted by the engine.

/// A note message as handed to a transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn  { note: u8, velocity: u8 },
    NoteOff { note: u8 },
}

impl MidiMessage {
    pub fn note(self) -> u8 {
        match self {
            MidiMessage::NoteOn { note, .. } | MidiMessage::NoteOff { note } => note,
        }
    }

    /// Raw bytes on `channel` (0–15).  Data bytes are masked to 7 bits and
    /// note-off always carries velocity 0.
    pub fn to_bytes(self, channel: u8) -> [u8; 3] {
        let ch = channel & 0x0F;
        match self {
            MidiMessage::NoteOn { note, velocity } => [0x90 | ch, note & 0x7F, velocity & 0x7F],
            MidiMessage::NoteOff { note }          => [0x80 | ch, note & 0x7F, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_bytes() {
        let m = MidiMessage::NoteOn { note: 60, velocity: 100 };
        assert_eq!(m.to_bytes(0), [0x90, 60, 100]);
        assert_eq!(m.to_bytes(9), [0x99, 60, 100]);
    }

    #[test]
    fn note_off_has_zero_velocity() {
        assert_eq!(MidiMessage::NoteOff { note: 72 }.to_bytes(1), [0x81, 72, 0]);
    }

    #[test]
    fn channel_and_data_are_masked() {
        let m = MidiMessage::NoteOn { note: 200, velocity: 255 };
        assert_eq!(m.to_bytes(0x13), [0x93, 200 & 0x7F, 0x7F]);
        assert_eq!(m.note(), 200);
    }
}
