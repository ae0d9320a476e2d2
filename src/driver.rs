//! Host frame driver
//!
//! Wraps a [`GameState`] with its collaborators: polls input, runs fixed
//! ticks, draws, and pushes score changes to the display.

use crate::config::ConfigError;
use crate::consts::{FRAME_MS, MAX_SUBSTEPS};
use crate::input::InputSource;
use crate::render::{Renderer, draw_state};
use crate::score::{ScoreDisplay, ScoreWatcher};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Longest host frame accepted before clamping (tab was hidden, debugger...)
const MAX_FRAME_MS: f64 = 100.0;

pub struct FrameDriver<I, R, D> {
    state: GameState,
    input: I,
    renderer: R,
    display: D,
    watcher: ScoreWatcher,
    step_ms: f64,
    accumulator: f64,
}

impl<I: InputSource, R: Renderer, D: ScoreDisplay> FrameDriver<I, R, D> {
    pub fn new(state: GameState, input: I, renderer: R, display: D) -> Self {
        Self {
            state,
            input,
            renderer,
            display,
            watcher: ScoreWatcher::new(),
            step_ms: FRAME_MS,
            accumulator: 0.0,
        }
    }

    /// Override the fixed tick length; it must be positive and finite
    pub fn with_step_ms(mut self, step_ms: f64) -> Result<Self, ConfigError> {
        if !step_ms.is_finite() || step_ms <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "step_ms",
                value: step_ms,
            });
        }
        self.step_ms = step_ms;
        Ok(self)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Exactly one tick, for hosts that tick once per redraw
    pub fn step(&mut self) -> Vec<GameEvent> {
        let input = self.input.poll();
        let events = tick(&mut self.state, &input, self.step_ms);
        self.present();
        events
    }

    /// Advance by a variable host frame, running as many fixed ticks as fit
    ///
    /// Input is polled once; fire/restart edges go to the first tick only.
    pub fn frame(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut events = Vec::new();
        let mut substeps = 0;
        let mut input: Option<TickInput> = None;
        while self.accumulator >= self.step_ms && substeps < MAX_SUBSTEPS {
            let this_tick = match input {
                None => self.input.poll(),
                Some(held) => TickInput {
                    fire: false,
                    restart: false,
                    ..held
                },
            };
            input = Some(this_tick);
            events.extend(tick(&mut self.state, &this_tick, self.step_ms));
            self.accumulator -= self.step_ms;
            substeps += 1;
        }

        // Drop backlog we could not simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step_ms);
        }

        self.present();
        events
    }

    fn present(&mut self) {
        draw_state(&self.state, &mut self.renderer);
        self.watcher
            .observe(self.state.score, self.state.is_game_over(), &mut self.display);
    }
}
