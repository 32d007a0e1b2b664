//! Drawing routine for the mode, against an abstract [`Canvas`].
//!
//! Layout (320 × 240):
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [BACK]        ZEN BALLS               [ADD]  │  header
//! │              Peaceful Music                  │
//! │      [T0]     [T1]     [T2]     [T3]         │
//! │ [L1] ┌──────────────────────────────┐ [R0]   │
//! │      │            arena             │ [R1]   │
//! │ [L0] └──────────────────────────────┘ [R2]   │
//! │               [B2]     [B1]     [B0]         │
//! │ [RESET] [OCT-] [OCT+]  Oct 5   Major         │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! A full frame is drawn after enter, reset, octave or scale change.  After
//! each stepped tick only the incremental frame is drawn: erase balls at
//! their previous position, redraw zones whose look changed, draw balls.

use std::time::Duration;

use crate::ball::Ball;
use crate::geometry::{Rect, SCREEN_W};
use crate::mode::ZenBalls;
use crate::theme;
use crate::zone::{TriggerZone, MAX_ZONES};

/// Corner radius of zones and buttons.
const CORNER:   i32 = 6;
const HEADER_H: i32 = 45;

/// Glow above this intensity shows the bright color.
const BRIGHT_THRESHOLD: f32 = 0.5;

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

/// Minimal display surface.  Colors are RGB565; text is drawn centered on
/// `cx` with its top edge at `y`.
pub trait Canvas {
    fn fill_screen(&mut self, color: u16);
    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u16);
    fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: u16);
    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u16);
    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u16);
    fn draw_text_centered(&mut self, text: &str, cx: i32, y: i32, fg: u16, bg: u16);
}

// ════════════════════════════════════════════════════════════════════════════
// Buttons
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Back,
    Add,
    Reset,
    OctaveDown,
    OctaveUp,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Back, Button::Add, Button::Reset, Button::OctaveDown, Button::OctaveUp,
    ];

    pub fn rect(self) -> Rect {
        match self {
            Button::Back       => Rect::new( 10.0,  10.0, 50.0, 25.0),
            Button::Add        => Rect::new(260.0,  10.0, 50.0, 25.0),
            Button::Reset      => Rect::new( 10.0, 200.0, 50.0, 25.0),
            Button::OctaveDown => Rect::new( 70.0, 200.0, 40.0, 25.0),
            Button::OctaveUp   => Rect::new(120.0, 200.0, 40.0, 25.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::Back       => "BACK",
            Button::Add        => "ADD",
            Button::Reset      => "RESET",
            Button::OctaveDown => "OCT-",
            Button::OctaveUp   => "OCT+",
        }
    }

    pub fn color(self) -> u16 {
        match self {
            Button::Back       => theme::PRIMARY,
            Button::Add        => theme::SUCCESS,
            Button::Reset      => theme::WARNING,
            Button::OctaveDown => theme::SECONDARY,
            Button::OctaveUp   => theme::SECONDARY,
        }
    }

    /// The button under `(x, y)`, if any.
    pub fn hit(x: f32, y: f32) -> Option<Button> {
        Button::ALL.iter().copied().find(|b| b.rect().contains(x, y))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ZenRenderer
// ════════════════════════════════════════════════════════════════════════════

/// How a zone was last put on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
struct ZoneLook {
    active: bool,
    bright: bool,
}

impl ZoneLook {
    fn of(zone: &TriggerZone, now: Duration, window: Duration) -> Self {
        ZoneLook {
            active: zone.is_active(),
            bright: zone.glow_intensity(now, window) > BRIGHT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZenRenderer {
    drawn: [Option<ZoneLook>; MAX_ZONES],
}

impl ZenRenderer {
    pub fn new() -> Self { Self::default() }

    /// Draw everything from scratch.
    pub fn draw_full<C: Canvas + ?Sized>(
        &mut self,
        canvas:     &mut C,
        mode:       &ZenBalls,
        scale_name: &str,
        now:        Duration,
    ) {
        canvas.fill_screen(theme::BG);
        draw_header(canvas, "ZEN BALLS", "Peaceful Music");
        for button in Button::ALL {
            draw_button(canvas, button);
        }
        let octave = format!("Oct {}", mode.octave());
        canvas.draw_text_centered(&octave, 195, 207, theme::TEXT_DIM, theme::BG);
        canvas.draw_text_centered(scale_name, 265, 207, theme::TEXT_DIM, theme::BG);

        self.drawn = [None; MAX_ZONES];
        for (i, zone) in mode.zones().iter().enumerate() {
            let look = ZoneLook::of(zone, now, mode.glow_window());
            draw_zone(canvas, zone, look);
            self.drawn[i] = Some(look);
        }
        for ball in mode.balls().iter() {
            draw_ball(canvas, ball);
        }
    }

    /// Incremental frame after a stepped tick.  Returns how many zones were
    /// redrawn.
    pub fn draw_step<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        mode:   &ZenBalls,
        now:    Duration,
    ) -> usize {
        let mut scratched = [false; MAX_ZONES];
        for ball in mode.balls().iter() {
            let r = ball.radius + 1.0;
            canvas.fill_circle(ball.prev_x as i32, ball.prev_y as i32, r as i32, theme::BG);
            let erased = Rect::new(ball.prev_x - r, ball.prev_y - r, r * 2.0, r * 2.0);
            for (i, zone) in mode.zones().iter().enumerate() {
                if erased.overlaps(&zone.rect) { scratched[i] = true; }
            }
        }

        let mut redrawn = 0;
        for (i, zone) in mode.zones().iter().enumerate() {
            let look = ZoneLook::of(zone, now, mode.glow_window());
            if self.drawn[i] == Some(look) && !scratched[i] {
                continue;
            }
            draw_zone(canvas, zone, look);
            self.drawn[i] = Some(look);
            redrawn += 1;
        }

        for ball in mode.balls().iter() {
            draw_ball(canvas, ball);
        }
        redrawn
    }
}

// ── Pieces ────────────────────────────────────────────────────────────────

fn draw_header<C: Canvas + ?Sized>(canvas: &mut C, title: &str, subtitle: &str) {
    canvas.fill_round_rect(0, 0, SCREEN_W as i32, HEADER_H, 0, theme::HEADER_BG);
    let cx = SCREEN_W as i32 / 2;
    canvas.draw_text_centered(title, cx, 12, theme::TEXT, theme::HEADER_BG);
    canvas.draw_text_centered(subtitle, cx, 28, theme::TEXT_DIM, theme::HEADER_BG);
}

fn draw_button<C: Canvas + ?Sized>(canvas: &mut C, button: Button) {
    let r = button.rect();
    let (x, y, w, h) = (r.x as i32, r.y as i32, r.w as i32, r.h as i32);
    canvas.fill_round_rect(x, y, w, h, CORNER, button.color());
    canvas.draw_round_rect(x, y, w, h, CORNER, theme::TEXT);
    canvas.draw_text_centered(button.label(), x + w / 2, y + h / 2 - 4, theme::TEXT, button.color());
}

fn draw_zone<C: Canvas + ?Sized>(canvas: &mut C, zone: &TriggerZone, look: ZoneLook) {
    let color = if look.bright { theme::TEXT } else { zone.color };
    let r = zone.rect;
    let (x, y, w, h) = (r.x as i32, r.y as i32, r.w as i32, r.h as i32);
    canvas.fill_round_rect(x, y, w, h, CORNER, color);
    canvas.draw_round_rect(x, y, w, h, CORNER, theme::TEXT);
    canvas.draw_text_centered(&zone.name.to_string(), x + w / 2, y + h / 2 - 4, theme::BG, color);
}

fn draw_ball<C: Canvas + ?Sized>(canvas: &mut C, ball: &Ball) {
    let (x, y, r) = (ball.x as i32, ball.y as i32, ball.radius as i32);
    canvas.fill_circle(x, y, r, ball.color);
    canvas.draw_circle(x, y, r, theme::TEXT);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
