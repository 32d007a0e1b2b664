//! Top-level application state.
//!
//! `AppState` owns the running [`ZenBalls`] mode, the scale table and the
//! renderer.  Each frame it turns the touch sample into a button action,
//! polls the mode and draws whatever changed.

use std::time::{Duration, Instant};

use anyhow::Context;

use zen_engine::render::{Button, Canvas, ZenRenderer};
use zen_engine::{ZenBalls, ZenConfig};
use zen_midi::MidiTransport;
use zen_scale::{Scale, ScaleTable};

use crate::touch::{TouchSample, TouchTracker};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// Actions
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Back,
    AddBall,
    Reset,
    OctaveDown,
    OctaveUp,
    CycleScale,
}

impl From<Button> for AppAction {
    fn from(b: Button) -> Self {
        match b {
            Button::Back       => AppAction::Back,
            Button::Add        => AppAction::AddBall,
            Button::Reset      => AppAction::Reset,
            Button::OctaveDown => AppAction::OctaveDown,
            Button::OctaveUp   => AppAction::OctaveUp,
        }
    }
}

/// Buttons fire on the press edge only.
pub fn action_for(touch: &TouchSample) -> Option<AppAction> {
    if !touch.just_pressed { return None; }
    Button::hit(touch.x, touch.y).map(AppAction::from)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Leave,
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    mode:        ZenBalls,
    scales:      ScaleTable,
    scale_index: usize,
    renderer:    ZenRenderer,
    full_redraw: bool,
}

impl AppState {
    pub fn new(config: &ZenConfig, scales: ScaleTable) -> Self {
        let scale_index = config.scale % scales.len();
        let mode = ZenBalls::enter(config, scales.get(scale_index));
        AppState {
            mode,
            scales,
            scale_index,
            renderer: ZenRenderer::new(),
            full_redraw: true,
        }
    }

    pub fn scale(&self) -> &Scale { self.scales.get(self.scale_index) }

    pub fn mode(&self) -> &ZenBalls { &self.mode }

    /// Apply one action.  Returns [`Flow::Leave`] for BACK.
    pub fn handle(&mut self, action: AppAction) -> Flow {
        log::debug!("action {:?}", action);
        let scale = self.scales.get(self.scale_index);
        match action {
            AppAction::Back => return Flow::Leave,
            AppAction::AddBall => {
                // the new ball shows up with the next stepped frame
                self.mode.add_ball();
            }
            AppAction::Reset => {
                self.mode.reset(scale);
                self.full_redraw = true;
            }
            AppAction::OctaveDown => {
                self.mode.shift_octave(-1, scale);
                self.full_redraw = true;
            }
            AppAction::OctaveUp => {
                self.mode.shift_octave(1, scale);
                self.full_redraw = true;
            }
            AppAction::CycleScale => {
                self.scale_index = (self.scale_index + 1) % self.scales.len();
                self.mode.set_scale(self.scales.get(self.scale_index));
                self.full_redraw = true;
            }
        }
        Flow::Continue
    }

    /// One frame: buttons, then the mode poll, then drawing.
    pub fn frame<T, C>(
        &mut self,
        now:       Duration,
        touch:     &TouchSample,
        transport: &mut T,
        canvas:    &mut C,
    ) -> Flow
    where
        T: MidiTransport + ?Sized,
        C: Canvas + ?Sized,
    {
        if let Some(action) = action_for(touch) {
            if self.handle(action) == Flow::Leave {
                return Flow::Leave;
            }
        }

        let report = self.mode.tick(now, transport);

        if self.full_redraw {
            let name = self.scales.get(self.scale_index).name;
            self.renderer.draw_full(canvas, &self.mode, name, now);
            self.full_redraw = false;
        } else if report.stepped {
            self.renderer.draw_step(canvas, &self.mode, now);
        }
        Flow::Continue
    }

    /// Leave the mode, releasing held notes.
    pub fn exit<T: MidiTransport + ?Sized>(self, transport: &mut T) {
        self.mode.exit(transport);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the window and drive the mode until BACK, Q/Esc or window close.
pub fn run(
    config:        &ZenConfig,
    scales:        ScaleTable,
    mut transport: Box<dyn MidiTransport>,
) -> anyhow::Result<()> {
    let mut vis = Visualizer::new("Zen Balls").context("failed to open window")?;
    let mut app = AppState::new(config, scales);
    let mut touch = TouchTracker::new();
    let start = Instant::now();

    while vis.is_open() {
        let input = vis.poll_input();
        if input.quit { break; }
        if input.cycle_scale {
            app.handle(AppAction::CycleScale);
        }

        let sample = touch.sample(input.pointer, input.down);
        if app.frame(start.elapsed(), &sample, transport.as_mut(), &mut vis.fb) == Flow::Leave {
            break;
        }
        vis.present().context("failed to present frame")?;
    }

    app.exit(transport.as_mut());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
