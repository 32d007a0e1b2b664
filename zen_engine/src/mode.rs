//! The bouncing-ball mode: owns the balls, the zones, the clock and the
//! emitter, and drives one tick at a time.
//!
//! Per stepped tick: integrate → walls → zones → pulses → glow decay.
//! Scheduled note-offs are flushed on every call to [`ZenBalls::tick`],
//! stepped or not.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use zen_midi::MidiTransport;
use zen_scale::Scale;

use crate::ball::BallSet;
use crate::clock::SimulationClock;
use crate::collision::{self, ZoneHit};
use crate::config::{clamp_octave, ZenConfig};
use crate::emitter::NoteEventEmitter;
use crate::zone::TriggerZoneGrid;

/// What one call to [`ZenBalls::tick`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// The clock let a simulation step through.
    pub stepped:  bool,
    /// Rising-edge activations, in resolution order.
    pub hits:     Vec<ZoneHit>,
    /// Pulses actually sent (hits minus skipped sends).
    pub pulses:   usize,
    /// Scheduled note-offs retired this call.
    pub released: usize,
    /// Zones that went idle this step.
    pub lapsed:   usize,
}

pub struct ZenBalls {
    balls:   BallSet,
    zones:   TriggerZoneGrid,
    clock:   SimulationClock,
    emitter: NoteEventEmitter,
    glow:    Duration,
    octave:  u8,
    rng:     StdRng,
}

impl ZenBalls {
    /// Enter the mode.  Uses `config.seed` if set, entropy otherwise.
    pub fn enter(config: &ZenConfig, scale: &Scale) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Self::with_rng(config, scale, rng)
    }

    pub fn with_rng(config: &ZenConfig, scale: &Scale, rng: StdRng) -> Self {
        let mut mode = ZenBalls {
            balls:   BallSet::new(config.balls.clone()),
            zones:   TriggerZoneGrid::new(),
            clock:   SimulationClock::new(config.timing.tick_period()),
            emitter: NoteEventEmitter::new(config.notes.velocity(), config.timing.pulse_gap()),
            glow:    config.timing.glow_window(),
            octave:  config.octave(),
            rng,
        };
        mode.reset(scale);
        log::info!(
            "zen balls: entered with {} balls, {} zones, {} octave {}",
            mode.balls.len(), mode.zones.len(), scale.name, mode.octave
        );
        mode
    }

    /// Fresh balls and a fresh, fully idle layout.
    pub fn reset(&mut self, scale: &Scale) {
        self.balls.initialize_all(&mut self.rng);
        self.zones.layout(scale, self.octave);
    }

    /// Add one ball if a slot is free.
    pub fn add_ball(&mut self) -> bool {
        let added = self.balls.add_one(&mut self.rng);
        if added {
            log::info!("zen balls: added ball ({} live)", self.balls.len());
        }
        added
    }

    /// Move the octave by `delta`, clamped, and relayout.  Returns the new
    /// octave.
    pub fn shift_octave(&mut self, delta: i32, scale: &Scale) -> u8 {
        self.set_octave((self.octave as i32).saturating_add(delta), scale)
    }

    pub fn set_octave(&mut self, octave: i32, scale: &Scale) -> u8 {
        self.octave = clamp_octave(octave);
        self.zones.layout(scale, self.octave);
        log::info!("zen balls: octave {}", self.octave);
        self.octave
    }

    /// Relayout with a different scale at the current octave.
    pub fn set_scale(&mut self, scale: &Scale) {
        self.zones.layout(scale, self.octave);
        log::info!("zen balls: scale {}", scale.name);
    }

    /// Poll the mode at `now`.
    pub fn tick<T>(&mut self, now: Duration, transport: &mut T) -> TickReport
    where
        T: MidiTransport + ?Sized,
    {
        let mut report = TickReport {
            released: self.emitter.flush_due(now, transport),
            ..TickReport::default()
        };

        if !self.clock.tick(now) {
            return report;
        }
        report.stepped = true;

        self.balls.integrate();
        report.hits = collision::resolve(&mut self.balls, &mut self.zones, now);
        for hit in &report.hits {
            if self.emitter.pulse(hit.note, now, transport) {
                report.pulses += 1;
            }
        }
        report.lapsed = self.zones.decay(now, self.glow);
        report
    }

    /// Leave the mode, releasing any note still waiting for its note-off.
    pub fn exit<T>(mut self, transport: &mut T)
    where
        T: MidiTransport + ?Sized,
    {
        let released = self.emitter.release_all(transport);
        log::info!("zen balls: exit ({} pending note-offs released)", released);
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn balls(&self)       -> &BallSet          { &self.balls }
    pub fn zones(&self)       -> &TriggerZoneGrid  { &self.zones }
    pub fn octave(&self)      -> u8                { self.octave }
    pub fn glow_window(&self) -> Duration          { self.glow }
    pub fn emitter(&self)     -> &NoteEventEmitter { &self.emitter }

    /// Direct access for scripted setups and tests.
    pub fn balls_mut(&mut self) -> &mut BallSet { &mut self.balls }
    pub fn zones_mut(&mut self) -> &mut TriggerZoneGrid { &mut self.zones }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::{Ball, MAX_BALLS};
    use zen_midi::{MidiMessage, RecordingTransport};

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    fn make_mode() -> ZenBalls {
        let cfg = ZenConfig { seed: Some(11), ..ZenConfig::default() };
        ZenBalls::enter(&cfg, &Scale::major())
    }

    /// Mode with one scripted ball and nothing else.
    fn scripted(ball: Ball, octave: u8) -> ZenBalls {
        let cfg = ZenConfig {
            seed: Some(1),
            octave,
            balls: crate::config::BallConfig { initial_count: 0, ..Default::default() },
            ..ZenConfig::default()
        };
        let mut mode = ZenBalls::enter(&cfg, &Scale::major());
        mode.balls_mut().insert(ball);
        mode
    }

    #[test]
    fn enter_initialises_everything() {
        let mode = make_mode();
        assert_eq!(mode.balls().len(), 2);
        assert_eq!(mode.zones().len(), 12);
        assert_eq!(mode.octave(), 5);
        assert_eq!(mode.zones().active_count(), 0);
    }

    #[test]
    fn tick_is_gated_by_clock() {
        let mut mode = make_mode();
        let mut t = RecordingTransport::new();
        assert!(!mode.tick(ms(20), &mut t).stepped);
        let before = *mode.balls().get(0).unwrap();
        assert!(mode.tick(ms(40), &mut t).stepped);
        assert_ne!(*mode.balls().get(0).unwrap(), before);
    }

    #[test]
    fn add_ball_caps_at_five() {
        let mut mode = make_mode();
        let added = (0..10).filter(|_| mode.add_ball()).count();
        assert_eq!(added, MAX_BALLS - 2);
        assert_eq!(mode.balls().len(), MAX_BALLS);
    }

    #[test]
    fn octave_is_clamped() {
        let mut mode = make_mode();
        let s = Scale::major();
        assert_eq!(mode.shift_octave(1, &s), 6);
        assert_eq!(mode.shift_octave(5, &s), 7);
        assert_eq!(mode.shift_octave(-20, &s), 2);
    }

    #[test]
    fn extreme_octave_shifts_saturate() {
        let mut mode = make_mode();
        let s = Scale::major();
        assert_eq!(mode.shift_octave(i32::MAX, &s), 7);
        assert_eq!(mode.shift_octave(i32::MAX, &s), 7);
        assert_eq!(mode.shift_octave(i32::MIN, &s), 2);
        assert_eq!(mode.shift_octave(i32::MIN, &s), 2);
        assert_eq!(mode.set_octave(i32::MIN, &s), 2);
    }

    #[test]
    fn octave_change_resets_glow() {
        let mut mode = make_mode();
        mode.zones_mut().get_mut(0).unwrap().activate(ms(0));
        mode.shift_octave(1, &Scale::major());
        assert_eq!(mode.zones().active_count(), 0);
    }

    #[test]
    fn hit_pulses_and_schedules_off() {
        // Moving up into top zone 0 at octave 4 (note 60).
        let mut mode = scripted(Ball::at(52.0, 79.0, 0.6, -0.6, 10.0), 4);
        let mut t = RecordingTransport::new();
        let r = mode.tick(ms(100), &mut t);
        assert!(r.stepped);
        assert_eq!(r.hits.len(), 1);
        assert_eq!(r.pulses, 1);
        assert_eq!(t.sent, vec![MidiMessage::NoteOn { note: 60, velocity: 100 }]);

        let r = mode.tick(ms(105), &mut t);
        assert!(!r.stepped);
        assert_eq!(r.released, 1);
        assert_eq!(t.sent[1], MidiMessage::NoteOff { note: 60 });
    }

    #[test]
    fn disconnected_hits_still_glow() {
        let mut mode = scripted(Ball::at(52.0, 79.0, 0.6, -0.6, 10.0), 4);
        let mut t = RecordingTransport::disconnected();
        let r = mode.tick(ms(100), &mut t);
        assert_eq!(r.hits.len(), 1);
        assert_eq!(r.pulses, 0);
        assert!(mode.zones().get(0).unwrap().is_active());
        assert!(mode.emitter().pending().is_empty());
    }

    #[test]
    fn reset_restores_initial_balls() {
        let mut mode = make_mode();
        mode.add_ball();
        mode.add_ball();
        mode.reset(&Scale::major());
        assert_eq!(mode.balls().len(), 2);
    }

    #[test]
    fn exit_releases_pending_offs() {
        let mut mode = scripted(Ball::at(52.0, 79.0, 0.6, -0.6, 10.0), 4);
        let mut t = RecordingTransport::new();
        mode.tick(ms(100), &mut t);
        mode.exit(&mut t);
        assert_eq!(t.sent.last(), Some(&MidiMessage::NoteOff { note: 60 }));
    }

    #[test]
    fn set_scale_relayouts_at_current_octave() {
        let mut mode = make_mode();
        mode.set_scale(&Scale::minor());
        // top zone 2 is the third degree: E♭ in minor
        assert_eq!(mode.zones().get(2).unwrap().note, 75);
    }
}
