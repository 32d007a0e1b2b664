//! Simulated balls.
//!
//! [`BallSet`] is a fixed arena of [`MAX_BALLS`] slots with a live count.
//! Balls are only ever addressed by slot index; the live count grows
//! through [`BallSet::add_one`] and is reset by [`BallSet::initialize_all`].

use rand::Rng;

use crate::config::{BallConfig, SpawnRange};

/// Slot capacity of a [`BallSet`].
pub const MAX_BALLS: usize = 5;

/// RGB565 color tokens are drawn from this half-open range.
const COLOR_MIN: u16 = 0x2000;
const COLOR_MAX: u16 = 0x8FFF;

// ════════════════════════════════════════════════════════════════════════════
// Ball
// ════════════════════════════════════════════════════════════════════════════

/// One particle.  Velocities are in pixels per tick.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Ball {
    pub x:      f32,
    pub y:      f32,
    /// Position before the last integration, for erasing.
    pub prev_x: f32,
    pub prev_y: f32,
    pub vx:     f32,
    pub vy:     f32,
    pub radius: f32,
    /// RGB565 display color.
    pub color:  u16,
}

impl Ball {
    /// A ball at rest at `(x, y)` with a fixed look; set velocities yourself.
    pub fn at(x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> Self {
        Ball { x, y, prev_x: x, prev_y: y, vx, vy, radius, color: COLOR_MIN }
    }

    /// Unit-step Euler move, remembering where the ball was.
    pub fn step(&mut self) {
        self.prev_x = self.x;
        self.prev_y = self.y;
        self.x += self.vx;
        self.y += self.vy;
    }
}

/// Snap a velocity component below `floor` in magnitude to `±floor`,
/// keeping its sign (zero counts as positive).
pub fn floor_speed(v: f32, floor: f32) -> f32 {
    if v.abs() >= floor {
        v
    } else if v >= 0.0 {
        floor
    } else {
        -floor
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: SpawnRange<f32>) -> f32 {
    if range.max > range.min { rng.gen_range(range.min..range.max) } else { range.min }
}

// ════════════════════════════════════════════════════════════════════════════
// BallSet
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct BallSet {
    slots:  [Ball; MAX_BALLS],
    live:   usize,
    config: BallConfig,
}

impl BallSet {
    /// An empty set spawning balls according to `config`.
    pub fn new(config: BallConfig) -> Self {
        BallSet { slots: [Ball::default(); MAX_BALLS], live: 0, config }
    }

    /// Draw a fresh ball from the spawn rules.
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Ball {
        let c = &self.config;
        let x = sample(rng, c.spawn_x());
        let y = sample(rng, c.spawn_y());
        let floor = c.min_speed();
        let top = c.max_speed();
        let speed = SpawnRange { min: -top, max: top };
        let vx = floor_speed(sample(rng, speed), floor);
        let vy = floor_speed(sample(rng, speed), floor);
        let radius = sample(rng, c.radius()).floor();
        let color = rng.gen_range(COLOR_MIN..COLOR_MAX);
        Ball { x, y, prev_x: x, prev_y: y, vx, vy, radius, color }
    }

    /// Reset to the configured initial count of freshly spawned balls.
    pub fn initialize_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in 0..MAX_BALLS {
            self.slots[i] = self.spawn(rng);
        }
        self.live = self.config.initial_count();
    }

    /// Append one freshly spawned ball.  Returns `false` (and does nothing)
    /// when every slot is taken.
    pub fn add_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_full() { return false; }
        let ball = self.spawn(rng);
        self.insert(ball)
    }

    /// Append a specific ball.  Returns `false` at capacity.
    pub fn insert(&mut self, ball: Ball) -> bool {
        if self.is_full() { return false; }
        self.slots[self.live] = ball;
        self.live += 1;
        true
    }

    /// `position += velocity` for every live ball.
    pub fn integrate(&mut self) {
        for ball in self.as_mut_slice() {
            ball.step();
        }
    }

    pub fn len(&self)      -> usize { self.live }
    pub fn is_empty(&self) -> bool  { self.live == 0 }
    pub fn is_full(&self)  -> bool  { self.live >= MAX_BALLS }

    pub fn get(&self, index: usize) -> Option<&Ball> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Ball> {
        self.as_mut_slice().get_mut(index)
    }

    /// The live balls, in slot order.
    pub fn as_slice(&self) -> &[Ball] { &self.slots[..self.live] }

    pub fn as_mut_slice(&mut self) -> &mut [Ball] { &mut self.slots[..self.live] }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> { self.as_slice().iter() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
