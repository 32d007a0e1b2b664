//! Arena-boundary reflection and ball × zone collision resolution.
//!
//! Zone tests run ball-major: every zone against ball 0, then ball 1, and
//! so on.  The first ball to reach an idle zone claims it; later balls in
//! the same tick find it active and pass straight through.

use std::time::Duration;

use crate::ball::{Ball, BallSet};
use crate::geometry::{Rect, ARENA_MAX_X, ARENA_MAX_Y, ARENA_MIN_X, ARENA_MIN_Y};
use crate::zone::TriggerZoneGrid;

/// Which velocity component a zone collision corrected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A rising-edge activation raised during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneHit {
    pub ball: usize,
    pub zone: usize,
    pub note: u8,
    pub axis: Axis,
}

// ════════════════════════════════════════════════════════════════════════════
// Arena walls
// ════════════════════════════════════════════════════════════════════════════

/// Reflect a ball that sits on or past an arena wall: flip that axis and
/// clamp the coordinate onto the wall.  Returns true if anything bounced.
pub fn bounce_off_walls(ball: &mut Ball) -> bool {
    let mut bounced = false;
    if ball.x <= ARENA_MIN_X || ball.x >= ARENA_MAX_X {
        ball.vx = -ball.vx;
        ball.x = ball.x.clamp(ARENA_MIN_X, ARENA_MAX_X);
        bounced = true;
    }
    if ball.y <= ARENA_MIN_Y || ball.y >= ARENA_MAX_Y {
        ball.vy = -ball.vy;
        ball.y = ball.y.clamp(ARENA_MIN_Y, ARENA_MAX_Y);
        bounced = true;
    }
    bounced
}

/// Wall pass over every live ball.  Returns the number that bounced.
pub fn reflect_off_arena(balls: &mut BallSet) -> usize {
    let mut bounced = 0;
    for ball in balls.as_mut_slice() {
        if bounce_off_walls(ball) { bounced += 1; }
    }
    bounced
}

// ════════════════════════════════════════════════════════════════════════════
// Zones
// ════════════════════════════════════════════════════════════════════════════

/// The ball's circumscribing square.
pub fn bounding_square(ball: &Ball) -> Rect {
    Rect::new(ball.x - ball.radius, ball.y - ball.radius, ball.radius * 2.0, ball.radius * 2.0)
}

/// Push a ball away from `zone` along the dominant axis of its offset from
/// the zone center.  Ties go vertical.  Speed is preserved.
pub fn deflect_from(ball: &mut Ball, zone: &Rect) -> Axis {
    let (cx, cy) = zone.center();
    let dx = ball.x - cx;
    let dy = ball.y - cy;
    if dx.abs() > dy.abs() {
        ball.vx = if dx > 0.0 { ball.vx.abs() } else { -ball.vx.abs() };
        Axis::Horizontal
    } else {
        ball.vy = if dy > 0.0 { ball.vy.abs() } else { -ball.vy.abs() };
        Axis::Vertical
    }
}

/// Test every ball against every zone.  Idle zones that are touched become
/// active at `now` and deflect the ball; active zones are ignored.
pub fn resolve_zones(
    balls: &mut BallSet,
    zones: &mut TriggerZoneGrid,
    now:   Duration,
) -> Vec<ZoneHit> {
    let mut hits = Vec::new();
    for (b, ball) in balls.as_mut_slice().iter_mut().enumerate() {
        for (z, zone) in zones.as_mut_slice().iter_mut().enumerate() {
            if zone.is_active() || !bounding_square(ball).overlaps(&zone.rect) {
                continue;
            }
            let axis = deflect_from(ball, &zone.rect);
            zone.activate(now);
            log::debug!("ball {} hit zone {} ({} / {})", b, z, zone.name, zone.note);
            hits.push(ZoneHit { ball: b, zone: z, note: zone.note, axis });
        }
    }
    hits
}

/// Walls first, then zones.
pub fn resolve(balls: &mut BallSet, zones: &mut TriggerZoneGrid, now: Duration) -> Vec<ZoneHit> {
    reflect_off_arena(balls);
    resolve_zones(balls, zones, now)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
