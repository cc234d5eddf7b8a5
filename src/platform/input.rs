//! Discrete input events from the host
//!
//! Key bindings live in the presentation layer; it only forwards these
//! press/release signals.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeftStart,
    MoveLeftStop,
    MoveRightStart,
    MoveRightStop,
    Launch,
}

/// Held-key state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    moving_left: bool,
    moving_right: bool,
    launch_pending: bool,
    /// Let the autopilot play
    pub idle_mode: bool,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeftStart => self.moving_left = true,
            InputEvent::MoveLeftStop => self.moving_left = false,
            InputEvent::MoveRightStart => self.moving_right = true,
            InputEvent::MoveRightStop => self.moving_right = false,
            InputEvent::Launch => self.launch_pending = true,
        }
    }

    /// Commands for the next tick. Launch is one-shot and cleared here.
    pub fn next_tick(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.moving_left,
            move_right: self.moving_right,
            launch: self.launch_pending,
            idle_mode: self.idle_mode,
        };
        self.launch_pending = false;
        input
    }
}
