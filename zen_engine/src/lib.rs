//! # zen_engine
//!
//! Physics-driven note trigger.  Balls bounce inside a rectangular arena;
//! a ring of trigger zones sits just outside it.  When a ball touches an
//! idle zone the zone lights up, the ball is deflected, and the zone's note
//! is pulsed on the MIDI transport.
//!
//! ## One tick
//!
//! | Step | Module |
//! |---|---|
//! | Flush due note-offs | [`emitter`] |
//! | Clock gate (~30 Hz, no catch-up) | [`clock`] |
//! | `position += velocity` | [`ball`] |
//! | Wall reflection, then zone hits | [`collision`] |
//! | Note-on now, note-off scheduled | [`emitter`] |
//! | Glow window expiry | [`zone`] |
//!
//! [`mode::ZenBalls`] ties these together; [`render::ZenRenderer`] draws the
//! result on any [`render::Canvas`].
//!
//! ## Zone ring
//!
//! | Side | Zones | Scale degrees | Transpose |
//! |---|---|---|---|
//! | Top | 4 | 0, 1, 2, 3 | — |
//! | Right | 3 | 4, 5, 6 | — |
//! | Bottom | 3 | 6, 5, 4 | — |
//! | Left | 2 | 0, 1 | +12 |
//!
//! Note = 60 + degree + 12 × (octave − 4) + transpose, octave in 2–7.

pub mod geometry;
pub mod theme;
pub mod error;
pub mod config;
pub mod ball;
pub mod zone;
pub mod collision;
pub mod emitter;
pub mod clock;
pub mod mode;
pub mod render;

pub use ball::{Ball, BallSet, MAX_BALLS};
pub use clock::SimulationClock;
pub use collision::{Axis, ZoneHit};
pub use config::ZenConfig;
pub use emitter::NoteEventEmitter;
pub use error::ConfigError;
pub use mode::{TickReport, ZenBalls};
pub use render::{Button, Canvas, ZenRenderer};
pub use zone::{Side, TriggerZone, TriggerZoneGrid, ZoneState, MAX_ZONES};
