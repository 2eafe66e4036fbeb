// Movement tuning configuration and derived constants
//
// All tunables live in one flat struct supplied by the host at activation.
// Jump physics is specified in designer terms (max jump height and time to
// apex); the actual gravity strength and jump impulse are derived once in
// `MovementProfile`.

use glam::Vec2;
use thiserror::Error;

/// Reference simulation cadence the acceleration tunables were tuned
/// against. Acceleration rates are normalized by this so the same config
/// values feel identical at any run speed.
pub const REFERENCE_ACCEL_CADENCE: f32 = 50.0;

/// Configuration rejected at activation time.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("world gravity y must be negative and non-zero (got {0})")]
    InvalidWorldGravity(f32),
}

/// Flat movement tuning block. Immutable for the character's lifetime.
#[derive(Debug, Clone)]
pub struct MovementConfig {
    // Running
    /// Maximum horizontal run speed (units/second)
    pub run_max_speed: f32,
    /// Run acceleration tunable, clamped to [0.01, run_max_speed] at derivation
    pub run_acceleration: f32,
    /// Run deceleration tunable, clamped to [0.01, run_max_speed] at derivation
    pub run_deceleration: f32,
    /// Blend factor pulling target speed toward current velocity (1.0 = no blend)
    pub run_lerp: f32,

    // Jumping
    /// Seconds from jump press to apex
    pub time_to_apex: f32,
    /// Apex height of a full jump (units)
    pub max_jump_height: f32,
    /// |vertical velocity| below which the jump-hang window is active
    pub jump_hang_threshold: f32,
    /// Gravity multiplier inside the jump-hang window
    pub jump_hang_gravity_mult: f32,
    /// Acceleration multiplier inside the jump-hang window
    pub jump_hang_accel_mult: f32,
    /// Target-speed multiplier inside the jump-hang window
    pub jump_hang_max_speed_mult: f32,

    // Wall jumping
    /// Impulse applied on a wall jump; x is mirrored by the latched direction
    pub wall_jump_force: Vec2,
    /// Run blend factor while wall-jumping (reduced air control, 0..1)
    pub wall_jump_reduce_movement: f32,
    /// Seconds the wall-jump window stays open after firing
    pub wall_jump_time: f32,

    // Falling
    /// Gravity multiplier while descending with down held
    pub fast_fall_mult: f32,
    /// Fall speed cap while fast-falling (positive magnitude)
    pub max_fast_fall_speed: f32,
    /// Gravity multiplier while descending normally
    pub fall_mult: f32,
    /// Fall speed cap (positive magnitude)
    pub max_fall_speed: f32,

    // Wall sliding
    /// Target vertical velocity while sliding (negative = downward)
    pub slide_speed: f32,
    /// Gain of the corrective slide force
    pub slide_acceleration: f32,

    // Air control
    /// Acceleration multiplier while airborne (0..1 recommended)
    pub accel_in_air: f32,
    /// Deceleration multiplier while airborne (0..1 recommended)
    pub decel_in_air: f32,

    // Jump cut
    /// Whether releasing jump early shortens the arc
    pub jump_cut_enabled: bool,
    /// Gravity multiplier applied while the jump is cut
    pub jump_cut_gravity_mult: f32,

    /// Keep speed gained beyond run_max_speed instead of decelerating
    pub conserve_momentum: bool,

    // Grace windows
    /// Seconds a jump press is remembered before landing
    pub jump_input_buffer_time: f32,
    /// Seconds a jump stays available after losing ground/wall contact
    pub coyote_time: f32,

    // Health (tracked for the host, never read by movement logic)
    pub max_health: i32,
    pub starting_health: i32,

    // Collision probes, offsets from the body centre. Front/back wall
    // anchors mirror horizontally with facing.
    pub ground_probe_offset: Vec2,
    pub ground_probe_half_extents: Vec2,
    pub front_wall_probe_offset: Vec2,
    pub back_wall_probe_offset: Vec2,
    pub wall_probe_half_extents: Vec2,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            run_max_speed: 11.0,
            run_acceleration: 2.5,
            run_deceleration: 5.0,
            run_lerp: 1.0,

            time_to_apex: 0.35,
            max_jump_height: 3.5,
            jump_hang_threshold: 1.0,
            jump_hang_gravity_mult: 0.5,
            jump_hang_accel_mult: 1.1,
            jump_hang_max_speed_mult: 1.3,

            wall_jump_force: Vec2::new(15.0, 25.0),
            wall_jump_reduce_movement: 0.5,
            wall_jump_time: 0.15,

            fast_fall_mult: 2.0,
            max_fast_fall_speed: 30.0,
            fall_mult: 1.5,
            max_fall_speed: 25.0,

            slide_speed: -3.0,
            slide_acceleration: 25.0,

            accel_in_air: 0.65,
            decel_in_air: 0.65,

            jump_cut_enabled: true,
            jump_cut_gravity_mult: 2.0,

            conserve_momentum: true,

            jump_input_buffer_time: 0.1,
            coyote_time: 0.1,

            max_health: 100,
            starting_health: 100,

            // Tuned for a roughly 1x2 character body
            ground_probe_offset: Vec2::new(0.0, -1.0),
            ground_probe_half_extents: Vec2::new(0.245, 0.015),
            front_wall_probe_offset: Vec2::new(0.55, 0.0),
            back_wall_probe_offset: Vec2::new(-0.55, 0.0),
            wall_probe_half_extents: Vec2::new(0.25, 0.5),
        }
    }
}

impl MovementConfig {
    /// Validate the values that would otherwise poison the derived
    /// constants (divide-by-zero on time_to_apex, zero-width grace
    /// windows, rate normalization against zero speed).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("run_max_speed", self.run_max_speed),
            ("time_to_apex", self.time_to_apex),
            ("max_jump_height", self.max_jump_height),
            ("coyote_time", self.coyote_time),
            ("jump_input_buffer_time", self.jump_input_buffer_time),
        ];
        for (name, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

/// Constants derived once from a validated config and the world gravity.
#[derive(Debug, Clone, Copy)]
pub struct MovementProfile {
    /// Downward acceleration needed to hit max_jump_height at time_to_apex
    /// (negative, units/second^2)
    pub gravity_strength: f32,
    /// Upward impulse magnitude that reaches the apex under that gravity
    pub jump_force: f32,
    /// Horizontal force gain while accelerating
    pub run_accel_amount: f32,
    /// Horizontal force gain while decelerating
    pub run_decel_amount: f32,
    /// Gravity scale that realizes gravity_strength under the world gravity
    pub gravity_scale: f32,
}

impl MovementProfile {
    /// Derive the movement constants. `world_gravity_y` is the integrator's
    /// global gravity (negative, e.g. -9.81).
    pub fn derive(config: &MovementConfig, world_gravity_y: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        if world_gravity_y >= 0.0 || !world_gravity_y.is_finite() {
            return Err(ConfigError::InvalidWorldGravity(world_gravity_y));
        }

        let gravity_strength =
            -(2.0 * config.max_jump_height) / (config.time_to_apex * config.time_to_apex);
        let jump_force = gravity_strength.abs() * config.time_to_apex;

        // Clamp before rate derivation: zero acceleration would lock the
        // character in place, values above max speed blow the rate up.
        let accel = config.run_acceleration.clamp(0.01, config.run_max_speed);
        let decel = config.run_deceleration.clamp(0.01, config.run_max_speed);
        let run_accel_amount = (REFERENCE_ACCEL_CADENCE * accel) / config.run_max_speed;
        let run_decel_amount = (REFERENCE_ACCEL_CADENCE * decel) / config.run_max_speed;

        let gravity_scale = gravity_strength / world_gravity_y;

        Ok(Self {
            gravity_strength,
            jump_force,
            run_accel_amount,
            run_decel_amount,
            gravity_scale,
        })
    }
}
