//! Discrete button state
//!
//! Raw key events are mapped to actions through [`KeyBindings`] and recorded
//! as press counts plus held state. Press counts live for exactly one frame.

use serde::{Deserialize, Serialize};

use crate::settings::KeyBindings;

/// Gameplay actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    RotateCw,
    RotateCcw,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::RotateCw,
        Action::RotateCcw,
    ];
}

/// A single digital button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    /// Presses seen since the last `consume_frame`
    pub down_edge_count: u32,
    /// Currently held down
    pub held: bool,
}

impl Button {
    fn press(&mut self) {
        self.down_edge_count = self.down_edge_count.saturating_add(1);
        self.held = true;
    }

    fn release(&mut self) {
        self.held = false;
    }
}

/// Button state for every action
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
    pub rotate_cw: Button,
    pub rotate_ccw: Button,
    bindings: KeyBindings,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn button(&self, action: Action) -> &Button {
        match action {
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Up => &self.up,
            Action::Down => &self.down,
            Action::RotateCw => &self.rotate_cw,
            Action::RotateCcw => &self.rotate_ccw,
        }
    }

    fn button_mut(&mut self, action: Action) -> &mut Button {
        match action {
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::RotateCw => &mut self.rotate_cw,
            Action::RotateCcw => &mut self.rotate_ccw,
        }
    }

    /// Key pressed. Returns false (and changes nothing) for unbound keys.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        match self.bindings.action_for(key) {
            Some(action) => {
                self.button_mut(action).press();
                true
            }
            None => false,
        }
    }

    /// Key released. Returns false (and changes nothing) for unbound keys.
    pub fn on_key_up(&mut self, key: &str) -> bool {
        match self.bindings.action_for(key) {
            Some(action) => {
                self.button_mut(action).release();
                true
            }
            None => false,
        }
    }

    /// Clear press counts. Call once per frame after everything has read them;
    /// held state carries over until the matching key-up.
    pub fn consume_frame(&mut self) {
        for action in Action::ALL {
            self.button_mut(action).down_edge_count = 0;
        }
    }

    /// -1, 0 or 1 for a pair of opposing buttons
    pub fn axis(negative: &Button, positive: &Button) -> f32 {
        match (negative.held, positive.held) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
