//! Screen-space rectangles and the arena bounds.
//!
//! Coordinates are pixels on the 320×240 panel, origin top-left, y down.

/// Panel width in pixels.
pub const SCREEN_W: usize = 320;
/// Panel height in pixels.
pub const SCREEN_H: usize = 240;

/// Axis-aligned rectangle, `x`/`y` being the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self)  -> f32 { self.x + self.w }
    pub fn bottom(&self) -> f32 { self.y + self.h }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Point hit-test, edges inclusive.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Overlap test against another rectangle, edges inclusive.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right()  >= other.x && self.x <= other.right() &&
        self.bottom() >= other.y && self.y <= other.bottom()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Arena — the ball-bounce boundary inside the trigger-zone ring
// ════════════════════════════════════════════════════════════════════════════

pub const ARENA_MIN_X: f32 = 50.0;
pub const ARENA_MAX_X: f32 = 270.0;
pub const ARENA_MIN_Y: f32 = 80.0;
pub const ARENA_MAX_Y: f32 = 165.0;

/// The arena as a rectangle.
pub const ARENA: Rect = Rect::new(
    ARENA_MIN_X,
    ARENA_MIN_Y,
    ARENA_MAX_X - ARENA_MIN_X,
    ARENA_MAX_Y - ARENA_MIN_Y,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::new(10.0, 10.0, 50.0, 25.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(60.0, 35.0));
        assert!(!r.contains(60.5, 20.0));
    }

    #[test]
    fn touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.1, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn arena_bounds() {
        assert_eq!(ARENA.right(), ARENA_MAX_X);
        assert_eq!(ARENA.bottom(), ARENA_MAX_Y);
        assert_eq!(ARENA.center(), (160.0, 122.5));
    }
}
