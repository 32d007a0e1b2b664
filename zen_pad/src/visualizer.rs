//! Software-rendered panel using `minifb`.
//!
//! [`Framebuffer`] is the 320×240 drawing surface and implements the
//! engine's [`Canvas`]; [`Visualizer`] owns the window, presents the
//! framebuffer at 2× and reads the mouse and keyboard.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Scale, Window, WindowOptions};

use zen_engine::geometry::{SCREEN_H, SCREEN_W};
use zen_engine::render::Canvas;
use zen_engine::theme::{self, rgb565_to_argb};

/// Glyph cell advance, 3 px wide + 1 px gap.
const GLYPH_ADVANCE: i32 = 4;
/// Our glyphs are 5 rows; the panel font is 8.  Pad to sit in the middle.
const GLYPH_TOP_PAD: i32 = 2;

// ════════════════════════════════════════════════════════════════════════════
// Framebuffer
// ════════════════════════════════════════════════════════════════════════════

pub struct Framebuffer {
    w:   i32,
    h:   i32,
    buf: Vec<u32>,
}

impl Framebuffer {
    pub fn new(w: usize, h: usize) -> Self {
        Framebuffer { w: w as i32, h: h as i32, buf: vec![rgb565_to_argb(theme::BG); w * h] }
    }

    pub fn pixels(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.w && y < self.h {
            Some((y * self.w + x) as usize)
        } else {
            None
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    /// Paint every pixel in the box for which `inside` holds; with `outline`
    /// set, only those with a 4-neighbour outside.
    fn paint<F>(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16, outline: bool, inside: F)
    where
        F: Fn(i32, i32) -> bool,
    {
        let argb = rgb565_to_argb(color);
        for py in y0.max(0)..=y1.min(self.h - 1) {
            for px in x0.max(0)..=x1.min(self.w - 1) {
                if !inside(px, py) { continue; }
                let edge = !inside(px - 1, py) || !inside(px + 1, py)
                        || !inside(px, py - 1) || !inside(px, py + 1);
                if !outline || edge {
                    self.buf[(py * self.w + px) as usize] = argb;
                }
            }
        }
    }

    fn draw_glyph(&mut self, c: char, x: i32, y: i32, fg: u32) {
        for (row, &bits) in char_glyph(c).iter().enumerate() {
            for col in 0..3 {
                if bits & (1 << (2 - col)) != 0 {
                    self.set_pixel(x + col, y + row as i32, fg);
                }
            }
        }
    }
}

fn in_circle(cx: i32, cy: i32, r: i32) -> impl Fn(i32, i32) -> bool {
    move |px, py| {
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= r * r
    }
}

fn in_round_rect(x: i32, y: i32, w: i32, h: i32, r: i32) -> impl Fn(i32, i32) -> bool {
    // keep the corner-centre box non-empty: x + r <= x + w - 1 - r
    let r = r.clamp(0, ((w.min(h) - 1) / 2).max(0));
    move |px, py| {
        if px < x || py < y || px >= x + w || py >= y + h { return false; }
        // nearest point on the inner rectangle of corner centres
        let cx = px.clamp(x + r, x + w - 1 - r);
        let cy = py.clamp(y + r, y + h - 1 - r);
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= r * r
    }
}

impl Canvas for Framebuffer {
    fn fill_screen(&mut self, color: u16) {
        self.buf.fill(rgb565_to_argb(color));
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u16) {
        self.paint(cx - r, cy - r, cx + r, cy + r, color, false, in_circle(cx, cy, r));
    }

    fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: u16) {
        self.paint(cx - r, cy - r, cx + r, cy + r, color, true, in_circle(cx, cy, r));
    }

    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u16) {
        self.paint(x, y, x + w - 1, y + h - 1, color, false, in_round_rect(x, y, w, h, r));
    }

    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u16) {
        self.paint(x, y, x + w - 1, y + h - 1, color, true, in_round_rect(x, y, w, h, r));
    }

    fn draw_text_centered(&mut self, text: &str, cx: i32, y: i32, fg: u16, bg: u16) {
        let n = text.chars().count() as i32;
        if n == 0 { return; }
        let width = n * GLYPH_ADVANCE - 1;
        let x0 = cx - width / 2;
        let top = y + GLYPH_TOP_PAD;
        let (fg, bg) = (rgb565_to_argb(fg), rgb565_to_argb(bg));
        for py in top - 1..top + 6 {
            for px in x0 - 1..x0 + width + 1 {
                self.set_pixel(px, py, bg);
            }
        }
        for (i, c) in text.chars().enumerate() {
            self.draw_glyph(c, x0 + i as i32 * GLYPH_ADVANCE, top, fg);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

/// What the window saw this frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    /// Pointer in panel coordinates; `None` outside the window.
    pub pointer:     Option<(f32, f32)>,
    pub down:        bool,
    pub cycle_scale: bool,
    pub quit:        bool,
}

pub struct Visualizer {
    window: Window,
    pub fb: Framebuffer,
}

impl Visualizer {
    pub fn new(title: &str) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            title,
            SCREEN_W, SCREEN_H,
            WindowOptions {
                resize: false,
                scale:  Scale::X2,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(60);

        Ok(Visualizer { window, fb: Framebuffer::new(SCREEN_W, SCREEN_H) })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn poll_input(&self) -> FrameInput {
        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        FrameInput {
            pointer:     self.window.get_mouse_pos(MouseMode::Discard),
            down:        self.window.get_mouse_down(MouseButton::Left),
            cycle_scale: one_shot(Key::S),
            quit:        one_shot(Key::Q) || one_shot(Key::Escape),
        }
    }

    /// Push the framebuffer to the window; this also pumps window events.
    pub fn present(&mut self) -> Result<(), minifb::Error> {
        self.window.update_with_buffer(self.fb.pixels(), SCREEN_W, SCREEN_H)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '#' => [0b101, 0b111, 0b101, 0b111, 0b101],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn fb() -> Framebuffer { Framebuffer::new(SCREEN_W, SCREEN_H) }

    #[test]
    fn filled_circle_covers_its_disc_only() {
        let mut f = fb();
        f.fill_circle(100, 100, 10, theme::TEXT);
        let white = rgb565_to_argb(theme::TEXT);
        assert_eq!(f.pixel(100, 100), Some(white));
        assert_eq!(f.pixel(110, 100), Some(white));
        assert_ne!(f.pixel(108, 108), Some(white));
    }

    #[test]
    fn outline_leaves_the_middle_alone() {
        let mut f = fb();
        f.draw_circle(50, 50, 8, theme::TEXT);
        let white = rgb565_to_argb(theme::TEXT);
        assert_eq!(f.pixel(58, 50), Some(white));
        assert_eq!(f.pixel(50, 50), Some(rgb565_to_argb(theme::BG)));
    }

    #[test]
    fn rounded_corners_are_cut() {
        let mut f = fb();
        f.fill_round_rect(40, 50, 20, 20, 6, theme::PRIMARY);
        let c = rgb565_to_argb(theme::PRIMARY);
        assert_eq!(f.pixel(50, 60), Some(c));
        assert_eq!(f.pixel(40, 60), Some(c));
        assert_ne!(f.pixel(40, 50), Some(c));
        assert_ne!(f.pixel(60, 60), Some(c));
    }

    #[test]
    fn oversized_radius_on_small_rects() {
        let mut f = fb();
        let c = rgb565_to_argb(theme::PRIMARY);
        f.fill_round_rect(10, 10, 10, 10, 6, theme::PRIMARY);
        assert_eq!(f.pixel(14, 14), Some(c));
        assert_ne!(f.pixel(10, 10), Some(c));
        f.draw_round_rect(30, 10, 9, 4, 50, theme::PRIMARY);
        f.fill_round_rect(50, 10, 1, 1, 3, theme::PRIMARY);
        assert_eq!(f.pixel(50, 10), Some(c));
        f.fill_round_rect(60, 10, 0, 5, 2, theme::PRIMARY);
        assert_ne!(f.pixel(60, 10), Some(c));
    }

    #[test]
    fn drawing_off_screen_is_clipped() {
        let mut f = fb();
        f.fill_circle(-5, -5, 10, theme::TEXT);
        f.fill_round_rect(310, 230, 40, 40, 0, theme::TEXT);
        f.draw_text_centered("EDGE", 5, 0, theme::TEXT, theme::BG);
        assert_eq!(f.pixel(319, 239), Some(rgb565_to_argb(theme::TEXT)));
    }

    #[test]
    fn text_is_centered() {
        let mut f = fb();
        // "1" glyph has its stem in the middle column.
        f.draw_text_centered("1", 160, 100, theme::TEXT, theme::BG);
        assert_eq!(f.pixel(160, 100 + GLYPH_TOP_PAD), Some(rgb565_to_argb(theme::TEXT)));
    }
}
