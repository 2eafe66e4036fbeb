// Grace-window timer bank
//
// All of the controller's "was recently true" facts are countdown timers:
// time since ground contact, time since wall contact (per side and
// combined), and time since the jump button was pressed. A window is open
// while its timer is `> 0`.

/// Identifies one of the five grace timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraceTimer {
    /// Coyote window after leaving the ground
    Ground,
    /// Coyote window after leaving a wall on the character's left
    LeftWall,
    /// Coyote window after leaving a wall on the character's right
    RightWall,
    /// Combined wall window, re-derived as max(left, right) each tick
    Wall,
    /// Jump input buffer
    JumpBuffer,
}

/// Bank of decaying countdown timers.
///
/// Timers are deliberately not floored at zero: `decay` subtracts
/// unconditionally, so a timer can go arbitrarily negative. That keeps the
/// comparisons monotonic and branch-free; callers must test `> 0` and never
/// `== 0`.
#[derive(Debug, Clone, Default)]
pub struct TimerBank {
    ground: f32,
    left_wall: f32,
    right_wall: f32,
    wall: f32,
    jump_buffer: f32,
}

impl TimerBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subtract `dt` from every timer. Call once at the start of each
    /// logic tick, before sensing refreshes anything.
    pub fn decay(&mut self, dt: f32) {
        self.ground -= dt;
        self.left_wall -= dt;
        self.right_wall -= dt;
        self.wall -= dt;
        self.jump_buffer -= dt;
    }

    /// Overwrite a timer. Used both to re-arm a grace window to the
    /// configured duration and to zero a window when an action consumes it.
    pub fn refresh(&mut self, timer: GraceTimer, value: f32) {
        *self.slot(timer) = value;
    }

    /// Seconds remaining in a window. Negative means the window closed
    /// that long ago.
    pub fn remaining(&self, timer: GraceTimer) -> f32 {
        match timer {
            GraceTimer::Ground => self.ground,
            GraceTimer::LeftWall => self.left_wall,
            GraceTimer::RightWall => self.right_wall,
            GraceTimer::Wall => self.wall,
            GraceTimer::JumpBuffer => self.jump_buffer,
        }
    }

    /// Whether a grace window is currently open.
    pub fn is_open(&self, timer: GraceTimer) -> bool {
        self.remaining(timer) > 0.0
    }

    fn slot(&mut self, timer: GraceTimer) -> &mut f32 {
        match timer {
            GraceTimer::Ground => &mut self.ground,
            GraceTimer::LeftWall => &mut self.left_wall,
            GraceTimer::RightWall => &mut self.right_wall,
            GraceTimer::Wall => &mut self.wall,
            GraceTimer::JumpBuffer => &mut self.jump_buffer,
        }
    }
}
