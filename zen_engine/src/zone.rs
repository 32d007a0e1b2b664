//! Trigger zones around the arena perimeter.
//!
//! The grid is laid out in ring order (top, right, bottom, left) with a
//! fixed count per side.  Geometry depends only on side and index; notes
//! depend on the scale and octave, so an octave change re-runs
//! [`TriggerZoneGrid::layout`] and only the notes move.
//!
//! ```text
//!          [T0]   [T1]   [T2]   [T3]
//!   [L1] ┌───────────────────────────┐ [R0]
//!        │          arena            │ [R1]
//!   [L0] └───────────────────────────┘ [R2]
//!                [B2]   [B1]   [B0]
//! ```

use std::time::Duration;

use zen_scale::{note_name, NoteName, Scale};

use crate::geometry::Rect;
use crate::theme;

/// Slot capacity of a [`TriggerZoneGrid`].
pub const MAX_ZONES: usize = 12;

/// Zones are square, this many pixels on a side.
pub const ZONE_SIZE: f32 = 20.0;

/// Root pitch for degree 0 in the reference octave.
const ROOT_NOTE: i32 = 60;
/// The octave in which degree 0 sounds as [`ROOT_NOTE`].
const REFERENCE_OCTAVE: i32 = 4;

// ════════════════════════════════════════════════════════════════════════════
// Side
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Ring order.
    pub const RING: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Zones on this side.
    pub fn count(self) -> usize {
        match self {
            Side::Top    => 4,
            Side::Right  => 3,
            Side::Bottom => 3,
            Side::Left   => 2,
        }
    }

    /// Top-left corner of zone `i` on this side.
    pub fn origin(self, i: usize) -> (f32, f32) {
        let i = i as f32;
        match self {
            Side::Top    => (40.0 + i * 60.0, 50.0),
            Side::Right  => (280.0, 80.0 + i * 40.0),
            Side::Bottom => (220.0 - i * 60.0, 175.0),
            Side::Left   => (20.0, 140.0 - i * 40.0),
        }
    }

    /// Scale degree used by zone `i` (wrapped by the scale later).
    pub fn degree_index(self, i: usize) -> usize {
        match self {
            Side::Top    => i,
            Side::Right  => 4 + i,
            Side::Bottom => 6usize.saturating_sub(i),
            Side::Left   => i,
        }
    }

    /// Fixed transposition for this side; the left side sounds an octave up.
    pub fn extra_semitones(self) -> i32 {
        if self == Side::Left { 12 } else { 0 }
    }

    pub fn color(self) -> u16 {
        match self {
            Side::Top    => theme::PRIMARY,
            Side::Right  => theme::SECONDARY,
            Side::Bottom => theme::ACCENT,
            Side::Left   => theme::WARNING,
        }
    }
}

/// MIDI note for zone `i` on `side`, saturated to 0–127.
pub fn zone_note(scale: &Scale, side: Side, i: usize, octave: u8) -> u8 {
    let note = ROOT_NOTE
        + scale.degree(side.degree_index(i)) as i32
        + 12 * (octave as i32 - REFERENCE_OCTAVE)
        + side.extra_semitones();
    note.clamp(0, 127) as u8
}

// ════════════════════════════════════════════════════════════════════════════
// TriggerZone
// ════════════════════════════════════════════════════════════════════════════

/// Activation state of one zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZoneState {
    #[default]
    Idle,
    /// Triggered at `since`; stays active for the glow window.
    Active { since: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TriggerZone {
    pub rect:  Rect,
    pub note:  u8,
    pub name:  NoteName,
    pub color: u16,
    pub side:  Side,
    pub state: ZoneState,
}

impl TriggerZone {
    pub fn is_active(&self) -> bool {
        matches!(self.state, ZoneState::Active { .. })
    }

    pub fn activate(&mut self, now: Duration) {
        self.state = ZoneState::Active { since: now };
    }

    /// Glow strength in `[0, 1]`: 1 right after triggering, fading to 0 at
    /// the end of the window.  Always 0 when idle.
    pub fn glow_intensity(&self, now: Duration, window: Duration) -> f32 {
        match self.state {
            ZoneState::Idle => 0.0,
            ZoneState::Active { since } => {
                let elapsed = now.saturating_sub(since).as_secs_f32();
                (1.0 - elapsed / window.as_secs_f32()).clamp(0.0, 1.0)
            }
        }
    }

    /// Drop back to idle once the window has elapsed.  Returns true on the
    /// Active → Idle transition.
    pub fn decay(&mut self, now: Duration, window: Duration) -> bool {
        match self.state {
            ZoneState::Active { since } if now.saturating_sub(since) >= window => {
                self.state = ZoneState::Idle;
                true
            }
            _ => false,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TriggerZoneGrid
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct TriggerZoneGrid {
    slots: [TriggerZone; MAX_ZONES],
    len:   usize,
}

impl TriggerZoneGrid {
    /// An empty grid; call [`TriggerZoneGrid::layout`] before use.
    pub fn new() -> Self { Self::default() }

    /// Regenerate every zone for `scale` at `octave`.  All zones come back
    /// idle.  `octave` is expected to be clamped by the caller already;
    /// notes saturate regardless.
    pub fn layout(&mut self, scale: &Scale, octave: u8) {
        let mut n = 0;
        for side in Side::RING {
            for i in 0..side.count() {
                let (x, y) = side.origin(i);
                let note = zone_note(scale, side, i, octave);
                self.slots[n] = TriggerZone {
                    rect:  Rect::new(x, y, ZONE_SIZE, ZONE_SIZE),
                    note,
                    name:  note_name(note),
                    color: side.color(),
                    side,
                    state: ZoneState::Idle,
                };
                n += 1;
            }
        }
        self.len = n;
    }

    /// Deactivate every zone whose glow window has elapsed.  Returns how
    /// many went idle.
    pub fn decay(&mut self, now: Duration, window: Duration) -> usize {
        let mut lapsed = 0;
        for zone in self.as_mut_slice() {
            if zone.decay(now, window) { lapsed += 1; }
        }
        lapsed
    }

    pub fn len(&self)      -> usize { self.len }
    pub fn is_empty(&self) -> bool  { self.len == 0 }

    pub fn get(&self, index: usize) -> Option<&TriggerZone> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TriggerZone> {
        self.as_mut_slice().get_mut(index)
    }

    pub fn as_slice(&self) -> &[TriggerZone] { &self.slots[..self.len] }

    pub fn as_mut_slice(&mut self) -> &mut [TriggerZone] { &mut self.slots[..self.len] }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerZone> { self.as_slice().iter() }

    pub fn active_count(&self) -> usize {
        self.iter().filter(|z| z.is_active()).count()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
