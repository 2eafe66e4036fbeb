// Resolved input frames
//
// The movement core does not poll devices. A host resolves its keyboard /
// gamepad state into one `InputFrame` per logic tick: analog axis values
// plus edge flags for the jump control. `InputTracker` derives those edges
// for hosts that only have held-state sampling.

use glam::Vec2;

/// One logic tick's worth of resolved input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    /// Horizontal/vertical axis values, each in [-1, 1]
    pub axis: Vec2,
    /// Jump control went down this tick
    pub jump_pressed: bool,
    /// Jump control went up this tick
    pub jump_released: bool,
}

impl InputFrame {
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Derives press/release edges from per-tick held-state samples.
#[derive(Debug, Default)]
pub struct InputTracker {
    jump_was_held: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the frame for this tick from the current axis values and
    /// whether the jump control is held right now.
    pub fn frame(&mut self, axis: Vec2, jump_held: bool) -> InputFrame {
        let frame = InputFrame {
            axis,
            jump_pressed: jump_held && !self.jump_was_held,
            jump_released: !jump_held && self.jump_was_held,
        };
        self.jump_was_held = jump_held;
        frame
    }

    /// Forget the held state, e.g. when the host loses focus.
    pub fn reset(&mut self) {
        self.jump_was_held = false;
    }
}
