//! Mode configuration, loadable from RON.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.  Values are never rejected: each accessor clamps into the range
//! the engine can honour.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ball::MAX_BALLS;
use crate::error::ConfigError;
use crate::geometry::{ARENA_MAX_X, ARENA_MAX_Y, ARENA_MIN_X, ARENA_MIN_Y};

/// Lowest selectable octave.
pub const MIN_OCTAVE: u8 = 2;
/// Highest selectable octave.
pub const MAX_OCTAVE: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self { min: Default::default(), max: Default::default() }
    }
}

impl SpawnRange<f32> {
    /// Clamp both ends into `[lo, hi]` and make sure `min <= max`.
    pub fn clamped(self, lo: f32, hi: f32) -> Self {
        let fix = |v: f32, fallback: f32| if v.is_nan() { fallback } else { v.clamp(lo, hi) };
        let a = fix(self.min, lo);
        let b = fix(self.max, hi);
        SpawnRange { min: a.min(b), max: a.max(b) }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sections
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Simulation step period; ~30 Hz by default.
    pub tick_period_ms: u64,
    /// How long a triggered zone stays active.
    pub glow_window_ms: u64,
    /// Delay between note-on and its scheduled note-off.
    pub pulse_gap_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { tick_period_ms: 33, glow_window_ms: 200, pulse_gap_ms: 5 }
    }
}

impl TimingConfig {
    pub fn tick_period(&self) -> Duration { Duration::from_millis(self.tick_period_ms.max(1)) }
    pub fn glow_window(&self) -> Duration { Duration::from_millis(self.glow_window_ms.max(1)) }
    pub fn pulse_gap(&self)   -> Duration { Duration::from_millis(self.pulse_gap_ms) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteConfig {
    pub velocity: u8,
    pub channel:  u8,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self { velocity: 100, channel: 0 }
    }
}

impl NoteConfig {
    pub fn velocity(&self) -> u8 { self.velocity.min(127) }
    pub fn channel(&self)  -> u8 { self.channel.min(15) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub initial_count: usize,
    /// Floor applied to each velocity component's magnitude.
    pub min_speed: f32,
    /// Components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    /// Whole-pixel radius range, max exclusive.
    pub radius: SpawnRange<f32>,
    pub spawn_x: SpawnRange<f32>,
    pub spawn_y: SpawnRange<f32>,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            initial_count: 2,
            min_speed: 0.5,
            max_speed: 1.5,
            radius:  SpawnRange { min: 10.0, max: 13.0 },
            spawn_x: SpawnRange { min: 80.0, max: 240.0 },
            spawn_y: SpawnRange { min: 80.0, max: 150.0 },
        }
    }
}

impl BallConfig {
    pub fn initial_count(&self) -> usize { self.initial_count.min(MAX_BALLS) }

    pub fn min_speed(&self) -> f32 {
        if self.min_speed.is_finite() { self.min_speed.clamp(0.1, 8.0) } else { 0.5 }
    }

    pub fn max_speed(&self) -> f32 {
        let max = if self.max_speed.is_finite() { self.max_speed.min(8.0) } else { 1.5 };
        max.max(self.min_speed())
    }

    pub fn radius(&self) -> SpawnRange<f32> { self.radius.clamped(1.0, 40.0) }

    /// Spawn region, always inside the arena.
    pub fn spawn_x(&self) -> SpawnRange<f32> { self.spawn_x.clamped(ARENA_MIN_X, ARENA_MAX_X) }
    pub fn spawn_y(&self) -> SpawnRange<f32> { self.spawn_y.clamped(ARENA_MIN_Y, ARENA_MAX_Y) }
}

// ════════════════════════════════════════════════════════════════════════════
// ZenConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZenConfig {
    pub timing: TimingConfig,
    pub notes:  NoteConfig,
    pub balls:  BallConfig,
    /// Octave the mode starts in.
    pub octave: u8,
    /// Scale selector into the scale table.
    pub scale:  usize,
    /// Fixed RNG seed for reproducible runs.
    pub seed:   Option<u64>,
}

impl Default for ZenConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            notes:  NoteConfig::default(),
            balls:  BallConfig::default(),
            octave: 5,
            scale:  0,
            seed:   None,
        }
    }
}

impl ZenConfig {
    pub fn octave(&self) -> u8 { clamp_octave(self.octave as i32) }

    pub fn from_ron_str(data: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(data)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_ron_str(&data)
    }

    /// Load `path`, falling back to defaults.  The error, if any, is handed
    /// back so the caller can log it.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e)  => (Self::default(), Some(e)),
        }
    }
}

/// Clamp any octave request into `[MIN_OCTAVE, MAX_OCTAVE]`.
pub fn clamp_octave(octave: i32) -> u8 {
    octave.clamp(MIN_OCTAVE as i32, MAX_OCTAVE as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_device() {
        let c = ZenConfig::default();
        assert_eq!(c.timing.tick_period(), Duration::from_millis(33));
        assert_eq!(c.timing.glow_window(), Duration::from_millis(200));
        assert_eq!(c.notes.velocity(), 100);
        assert_eq!(c.balls.initial_count(), 2);
        assert_eq!(c.octave(), 5);
    }

    #[test]
    fn partial_ron_fills_defaults() {
        let c = ZenConfig::from_ron_str("(octave: 6, balls: (initial_count: 4))").unwrap();
        assert_eq!(c.octave, 6);
        assert_eq!(c.balls.initial_count, 4);
        assert_eq!(c.balls.min_speed, 0.5);
        assert_eq!(c.timing, TimingConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let c = ZenConfig::from_ron_str(
            "(octave: 11, notes: (velocity: 200, channel: 40), balls: (initial_count: 9))"
        ).unwrap();
        assert_eq!(c.octave(), MAX_OCTAVE);
        assert_eq!(c.notes.velocity(), 127);
        assert_eq!(c.notes.channel(), 15);
        assert_eq!(c.balls.initial_count(), MAX_BALLS);
        assert_eq!(clamp_octave(-3), MIN_OCTAVE);
    }

    #[test]
    fn spawn_region_stays_in_arena() {
        let mut b = BallConfig::default();
        b.spawn_x = SpawnRange { min: 400.0, max: 0.0 };
        let r = b.spawn_x();
        assert_eq!(r.min, ARENA_MIN_X);
        assert_eq!(r.max, ARENA_MAX_X);
    }

    #[test]
    fn speed_floor_is_positive() {
        let mut b = BallConfig::default();
        b.min_speed = 0.0;
        b.max_speed = -1.0;
        assert!(b.min_speed() > 0.0);
        assert!(b.max_speed() >= b.min_speed());
    }

    #[test]
    fn load_from_file_roundtrip() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "(scale: 3, seed: Some(42))").unwrap();
        let c = ZenConfig::load_from_file(f.path()).unwrap();
        assert_eq!(c.scale, 3);
        assert_eq!(c.seed, Some(42));
    }

    #[test]
    fn load_or_default_reports_errors() {
        let (c, err) = ZenConfig::load_or_default("/definitely/not/here.ron");
        assert_eq!(c, ZenConfig::default());
        assert!(matches!(err, Some(ConfigError::Io(_))));

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "(octave: \"high\")").unwrap();
        let (_, err) = ZenConfig::load_or_default(f.path());
        assert!(matches!(err, Some(ConfigError::Parse(_))));
    }
}
