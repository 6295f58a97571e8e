//! Latched control state
//!
//! Input events may arrive at any time between ticks. They are folded into
//! [`InputState`], and each tick consumes one [`TickInput`] taken from it.
//! Held keys are last-write-wins; fire, pause and resume presses are queued
//! in arrival order so the tick can replay them against the pause state.

use serde::{Deserialize, Serialize};

/// Directional controls (WASD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
}

/// Raw events pushed by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key { control: Control, pressed: bool },
    Fire,
    PauseToggle,
    Resume,
}

impl InputEvent {
    /// Map a keyboard key the way the desktop build binds it (WASD, space, Escape)
    pub fn from_key(key: &str, pressed: bool) -> Option<Self> {
        let control = match key.to_lowercase().as_str() {
            "w" | "arrowup" => Control::Up,
            "s" | "arrowdown" => Control::Down,
            "a" | "arrowleft" => Control::Left,
            "d" | "arrowright" => Control::Right,
            // One-shots fire on key down only
            " " if pressed => return Some(InputEvent::Fire),
            "escape" if pressed => return Some(InputEvent::PauseToggle),
            _ => return None,
        };
        Some(InputEvent::Key { control, pressed })
    }
}

/// One-shot presses, kept in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Fire,
    PauseToggle,
    /// Resume button on the pause overlay
    Resume,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Presses since the previous tick, oldest first
    pub actions: Vec<Action>,
}

impl TickInput {
    /// Only one-shot presses, no held keys
    pub fn actions(actions: &[Action]) -> Self {
        Self {
            actions: actions.to_vec(),
            ..Default::default()
        }
    }
}

/// Flags written by the input adapter, read once per tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    actions: Vec<Action>,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { control, pressed } => match control {
                Control::Up => self.up = pressed,
                Control::Down => self.down = pressed,
                Control::Left => self.left = pressed,
                Control::Right => self.right = pressed,
            },
            InputEvent::Fire => self.actions.push(Action::Fire),
            InputEvent::PauseToggle => self.actions.push(Action::PauseToggle),
            InputEvent::Resume => self.actions.push(Action::Resume),
        }
    }

    /// Snapshot for the next tick. Held keys stay latched; one-shot presses are drained.
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            actions: std::mem::take(&mut self.actions),
        }
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
