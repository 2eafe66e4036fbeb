// Locomotion state
//
// The controller's jump state is a tagged enum rather than a pair of
// booleans, so "jumping and wall-jumping at the same time" is
// unrepresentable. Two orthogonal modifier bits (jump-cut, falling after
// apex) plus the per-tick slide bit live next to it; they only influence
// gravity and acceleration selection, never the transition guards' notion
// of which jump is active.
//
// Legal combinations: `sliding` requires the ground window to be closed
// and the phase not to be `Jumping`; `jump_cut` and `jump_falling` are
// meaningful only while airborne and are cleared on re-arm.

/// Direction the character is facing. Determines how the front/back wall
/// probes map onto left/right walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Horizontal sign of the facing direction (+1 right, -1 left).
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Which jump, if any, currently owns the character's ascent.
///
/// At most one variant is active by construction; this is the
/// mutual-exclusion invariant between jumping and wall-jumping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    /// No active jump ascent (grounded, coasting or falling)
    #[default]
    None,
    /// Ascending from a ground (or coyote) jump
    Jumping,
    /// Inside the wall-jump window after kicking off a wall
    WallJumping,
}

impl JumpPhase {
    pub fn is_jumping(self) -> bool {
        self == JumpPhase::Jumping
    }

    pub fn is_wall_jumping(self) -> bool {
        self == JumpPhase::WallJumping
    }
}

/// Host-facing summary of the controller's state, derived on demand from
/// the phase, the modifier bits and the ground window. Useful for
/// animation and debugging; the controller never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionState {
    /// On the ground (or inside the ground coyote window)
    Grounded,
    /// Ascending from a ground jump
    Rising,
    /// Airborne and descending
    Falling,
    /// Inside the wall-jump window
    WallJumping,
    /// Sliding down a wall
    Sliding,
}
