// Collision sensor adapter
//
// Turns the three boolean probe overlaps the host evaluates each tick
// (ground, front wall, back wall) into grace-window refreshes. The wall
// probes are anchored to the character, so which world-side wall they
// report depends on facing: facing right, front = right wall and
// back = left wall; facing left, the mapping flips.

use super::state::Facing;
use super::timers::{GraceTimer, TimerBank};

/// Probe overlap results for one logic tick. A host that cannot answer a
/// query should report `false` rather than fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactProbes {
    pub ground: bool,
    pub front_wall: bool,
    pub back_wall: bool,
}

impl ContactProbes {
    /// True if the probe on the character's right overlaps a wall.
    pub fn touching_right_wall(&self, facing: Facing) -> bool {
        match facing {
            Facing::Right => self.front_wall,
            Facing::Left => self.back_wall,
        }
    }

    /// True if the probe on the character's left overlaps a wall.
    pub fn touching_left_wall(&self, facing: Facing) -> bool {
        match facing {
            Facing::Right => self.back_wall,
            Facing::Left => self.front_wall,
        }
    }
}

/// Re-arm the coyote windows for every contact reported this tick, then
/// re-derive the combined wall window as max(left, right) so a mid-air
/// turn (which swaps the probe anchors) never drops an open window.
pub(crate) fn refresh_grace_windows(
    timers: &mut TimerBank,
    facing: Facing,
    probes: ContactProbes,
    coyote_time: f32,
) {
    if probes.ground {
        timers.refresh(GraceTimer::Ground, coyote_time);
    }
    if probes.touching_right_wall(facing) {
        timers.refresh(GraceTimer::RightWall, coyote_time);
    }
    if probes.touching_left_wall(facing) {
        timers.refresh(GraceTimer::LeftWall, coyote_time);
    }

    let combined = timers
        .remaining(GraceTimer::LeftWall)
        .max(timers.remaining(GraceTimer::RightWall));
    timers.refresh(GraceTimer::Wall, combined);
}
