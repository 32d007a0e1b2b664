//! `midir` backend.

use midir::{MidiOutput, MidiOutputConnection};

use crate::error::TransportError;
use crate::message::MidiMessage;
use crate::transport::MidiTransport;

const CLIENT_NAME: &str = "zen_balls";

/// Port name fragments that usually mean "a synth that makes sound".
const SOFTSYNTH_HINTS: [&str; 5] = ["fluid", "timidity", "microsoft", "gm", "synth"];

// ════════════════════════════════════════════════════════════════════════════
// MidirTransport
// ════════════════════════════════════════════════════════════════════════════

/// An open `midir` output connection on one channel.
///
/// A failed send marks the transport disconnected; later pulses are then
/// skipped by the engine instead of erroring every tick.
pub struct MidirTransport {
    conn:      MidiOutputConnection,
    channel:   u8,
    port_name: String,
    connected: bool,
}

impl MidirTransport {
    /// Open an output port.
    ///
    /// With `wanted = Some(fragment)` the first port whose name contains
    /// `fragment` (case-insensitive) is used.  With `None` a soft synth is
    /// preferred if one is visible, otherwise the first port.
    pub fn open(wanted: Option<&str>, channel: u8) -> Result<Self, TransportError> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;
        let ports = midi_out.ports();
        if ports.is_empty() {
            return Err(TransportError::NoPorts);
        }

        let names: Vec<String> = ports.iter()
            .map(|p| midi_out.port_name(p).unwrap_or_else(|_| "Unknown".to_string()))
            .collect();

        let idx = match wanted {
            Some(fragment) => find_port(&names, fragment)
                .ok_or_else(|| TransportError::PortNotFound(fragment.to_string()))?,
            None => preferred_port(&names),
        };

        let port_name = names[idx].clone();
        log::info!("opening MIDI port: {}", port_name);

        let conn = midi_out.connect(&ports[idx], "zen-balls-out")
            .map_err(|e| TransportError::Connect {
                port:   port_name.clone(),
                reason: e.to_string(),
            })?;

        Ok(MidirTransport { conn, channel: channel & 0x0F, port_name, connected: true })
    }

    pub fn port_name(&self) -> &str { &self.port_name }

    fn send(&mut self, msg: MidiMessage) {
        if !self.connected { return; }
        if let Err(e) = self.conn.send(&msg.to_bytes(self.channel)) {
            log::warn!("MIDI send to {} failed: {} (marking disconnected)", self.port_name, e);
            self.connected = false;
        }
    }
}

impl MidiTransport for MidirTransport {
    fn is_connected(&self) -> bool { self.connected }

    fn send_note_on(&mut self, note: u8, velocity: u8) {
        self.send(MidiMessage::NoteOn { note, velocity });
    }

    fn send_note_off(&mut self, note: u8) {
        self.send(MidiMessage::NoteOff { note });
    }
}

/// Names of every visible output port.
pub fn list_output_ports() -> Result<Vec<String>, TransportError> {
    let midi_out = MidiOutput::new(CLIENT_NAME)?;
    Ok(midi_out.ports().iter()
        .map(|p| midi_out.port_name(p).unwrap_or_else(|_| "Unknown".to_string()))
        .collect())
}

// ════════════════════════════════════════════════════════════════════════════
// Port selection
// ════════════════════════════════════════════════════════════════════════════

fn find_port(names: &[String], fragment: &str) -> Option<usize> {
    let fragment = fragment.to_lowercase();
    names.iter().position(|n| n.to_lowercase().contains(&fragment))
}

/// Prefer a softsynth if visible, else port 0.
fn preferred_port(names: &[String]) -> usize {
    names.iter()
        .position(|n| {
            let n = n.to_lowercase();
            SOFTSYNTH_HINTS.iter().any(|hint| n.contains(hint))
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn find_port_is_case_insensitive() {
        let n = names(&["Midi Through Port-0", "IAC Driver Bus 1"]);
        assert_eq!(find_port(&n, "iac"), Some(1));
        assert_eq!(find_port(&n, "loopMIDI"), None);
    }

    #[test]
    fn preferred_port_picks_softsynth() {
        let n = names(&["Midi Through Port-0", "FLUID Synth (1234)"]);
        assert_eq!(preferred_port(&n), 1);
    }

    #[test]
    fn preferred_port_defaults_to_first() {
        let n = names(&["Port A", "Port B"]);
        assert_eq!(preferred_port(&n), 0);
    }
}
