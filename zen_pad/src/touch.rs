//! Touch emulation from the mouse.
//!
//! The mode only reacts to the press edge, so each frame's mouse state is
//! folded into a [`TouchSample`] that carries the edges explicitly.

/// One frame of touch input.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TouchSample {
    pub x:             f32,
    pub y:             f32,
    pub pressed:       bool,
    /// Went down this frame.
    pub just_pressed:  bool,
    /// Came up this frame.
    pub just_released: bool,
}

/// Tracks the previous frame to derive edges.
#[derive(Debug, Default)]
pub struct TouchTracker {
    last: TouchSample,
}

impl TouchTracker {
    pub fn new() -> Self { Self::default() }

    /// Fold this frame's pointer into a sample.  `pos` is `None` when the
    /// pointer is outside the panel, which counts as not touching.
    pub fn sample(&mut self, pos: Option<(f32, f32)>, down: bool) -> TouchSample {
        let (x, y, pressed) = match pos {
            Some((x, y)) => (x, y, down),
            None         => (self.last.x, self.last.y, false),
        };
        let s = TouchSample {
            x,
            y,
            pressed,
            just_pressed:  pressed && !self.last.pressed,
            just_released: !pressed && self.last.pressed,
        };
        self.last = s;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edge_fires_once() {
        let mut t = TouchTracker::new();
        let a = t.sample(Some((30.0, 20.0)), true);
        assert!(a.pressed && a.just_pressed);
        let b = t.sample(Some((31.0, 20.0)), true);
        assert!(b.pressed && !b.just_pressed);
        let c = t.sample(Some((31.0, 20.0)), false);
        assert!(!c.pressed && c.just_released);
        let d = t.sample(Some((31.0, 20.0)), false);
        assert!(!d.just_released);
    }

    #[test]
    fn leaving_the_panel_releases() {
        let mut t = TouchTracker::new();
        t.sample(Some((5.0, 5.0)), true);
        let s = t.sample(None, true);
        assert!(!s.pressed);
        assert!(s.just_released);
        assert_eq!((s.x, s.y), (5.0, 5.0));
    }

    #[test]
    fn hovering_is_not_touching() {
        let mut t = TouchTracker::new();
        let s = t.sample(Some((100.0, 100.0)), false);
        assert_eq!(s, TouchSample { x: 100.0, y: 100.0, ..TouchSample::default() });
    }
}
