// Movement controller
//
// One logic tick (any rate): decay timers -> register input -> sense
// contacts -> evaluate jump transitions -> select gravity scale.
// One physics tick (fixed rate): apply the horizontal run force and, while
// sliding, the corrective slide force.
//
// Transition guards use the velocity sampled at the start of the tick, so
// a jump impulse fired mid-tick never feeds back into the guards that
// fired it. Gravity selection and the fall-speed floors run after the
// transitions and read the live velocity, so the fire tick sees the rising
// post-impulse value and a floor can never erase a fresh impulse.

use glam::Vec2;
use log::{debug, trace};

use super::config::{ConfigError, MovementConfig, MovementProfile};
use super::sensors::{self, ContactProbes};
use super::state::{Facing, JumpPhase, LocomotionState};
use super::timers::{GraceTimer, TimerBank};
use crate::core::math::{lerp, sign};
use crate::engine::input::InputFrame;
use crate::engine::physics::PhysicsBody;

/// Near-zero threshold below which target speed counts as "no intent"
const SPEED_INTENT_EPSILON: f32 = 0.01;

/// The movement and state core of a platformer character.
///
/// Owns all mutable movement state; the host owns the rigid body and the
/// probe evaluation and passes both in each tick.
#[derive(Debug)]
pub struct MovementController {
    config: MovementConfig,
    profile: MovementProfile,

    timers: TimerBank,
    phase: JumpPhase,
    facing: Facing,

    /// Sliding down a wall; re-evaluated every logic tick, never latched
    sliding: bool,
    /// Past the apex of a ground jump, still airborne
    jump_falling: bool,
    /// Jump control released while still ascending
    jump_cut: bool,

    /// Move input for the current tick, components in [-1, 1]
    move_input: Vec2,

    /// Monotonic seconds accumulated across logic ticks
    elapsed: f32,
    /// `elapsed` at the moment the current wall jump fired
    wall_jump_started_at: f32,
    /// Horizontal direction of the last wall jump (+1 right, -1 left)
    last_wall_jump_dir: f32,

    /// Velocity sampled at the start of the most recent logic tick
    last_velocity: Vec2,

    /// Tracked for the host; movement logic never reads it
    health: i32,
}

impl MovementController {
    /// Create a controller from a tuning block and the integrator's
    /// vertical gravity. Fails fast on configuration that would poison the
    /// derived constants.
    pub fn new(config: MovementConfig, world_gravity_y: f32) -> Result<Self, ConfigError> {
        let profile = MovementProfile::derive(&config, world_gravity_y)?;
        debug!(
            "movement profile: gravity {:.2} (scale {:.2}), jump impulse {:.2}",
            profile.gravity_strength, profile.gravity_scale, profile.jump_force
        );

        let health = config.starting_health.min(config.max_health);
        Ok(Self {
            config,
            profile,
            timers: TimerBank::new(),
            phase: JumpPhase::None,
            facing: Facing::Right,
            sliding: false,
            jump_falling: false,
            jump_cut: false,
            move_input: Vec2::ZERO,
            elapsed: 0.0,
            wall_jump_started_at: 0.0,
            last_wall_jump_dir: 1.0,
            last_velocity: Vec2::ZERO,
            health,
        })
    }

    // ---- per-tick entry points ----

    /// Run one logic tick: timers, input, sensing, transitions, gravity.
    pub fn advance_logic(
        &mut self,
        dt: f32,
        input: InputFrame,
        probes: ContactProbes,
        body: &mut impl PhysicsBody,
    ) {
        self.elapsed += dt;
        self.timers.decay(dt);

        let velocity = body.velocity();
        self.last_velocity = velocity;

        self.handle_input(input);

        // Sensing is suppressed during a jump ascent so the probes cannot
        // re-arm ground/wall windows while still rising through them.
        if !self.phase.is_jumping() {
            sensors::refresh_grace_windows(
                &mut self.timers,
                self.facing,
                probes,
                self.config.coyote_time,
            );
        }

        self.update_jump_state(velocity, body);

        // A jump impulse fired above already changed the body's velocity;
        // gravity selection must see the rising post-impulse value, not the
        // tick-start snapshot, or the fire tick picks a descent branch.
        self.update_gravity(body.velocity(), body);
    }

    /// Run one fixed physics step: horizontal run force plus, while
    /// sliding, the corrective slide force. `dt` is the fixed step length.
    pub fn advance_physics(&mut self, dt: f32, body: &mut impl PhysicsBody) {
        // Reduced air control while the wall-jump window is open
        let blend = if self.phase.is_wall_jumping() {
            self.config.wall_jump_reduce_movement
        } else {
            self.config.run_lerp
        };
        self.run(blend, body);

        if self.sliding {
            self.slide(dt, body);
        }
    }

    // ---- host-triggerable actions ----

    /// Remember a jump press for the configured buffer window.
    pub fn register_jump_pressed(&mut self) {
        self.timers
            .refresh(GraceTimer::JumpBuffer, self.config.jump_input_buffer_time);
    }

    /// Register a jump release; cuts the jump short if still ascending.
    /// Uses the velocity sampled at the most recent logic tick.
    pub fn register_jump_released(&mut self) {
        if !self.config.jump_cut_enabled {
            return;
        }
        if self.can_jump_cut() || self.can_wall_jump_cut() {
            self.jump_cut = true;
        }
    }

    // ---- transition guards ----

    /// A ground (or coyote) jump is available.
    pub fn can_jump(&self) -> bool {
        self.timers.is_open(GraceTimer::Ground) && !self.phase.is_jumping()
    }

    /// A wall jump is available: buffered press, wall window open, ground
    /// window closed, and either no wall jump in flight or the open wall
    /// matches the latched direction (blocks alternating spam between two
    /// close walls).
    pub fn can_wall_jump(&self) -> bool {
        self.timers.is_open(GraceTimer::JumpBuffer)
            && self.timers.is_open(GraceTimer::Wall)
            && !self.timers.is_open(GraceTimer::Ground)
            && (!self.phase.is_wall_jumping()
                || (self.timers.is_open(GraceTimer::RightWall) && self.last_wall_jump_dir == 1.0)
                || (self.timers.is_open(GraceTimer::LeftWall) && self.last_wall_jump_dir == -1.0))
    }

    /// The current ground jump can still be cut short.
    pub fn can_jump_cut(&self) -> bool {
        self.phase.is_jumping() && self.last_velocity.y > 0.0
    }

    /// The current wall jump can still be cut short.
    pub fn can_wall_jump_cut(&self) -> bool {
        self.phase.is_wall_jumping() && self.last_velocity.y > 0.0
    }

    /// Airborne and not in a jump ascent; sliding additionally requires
    /// pushing into a wall with an open coyote window.
    pub fn can_slide(&self) -> bool {
        !self.phase.is_jumping() && !self.timers.is_open(GraceTimer::Ground)
    }

    // ---- queries ----

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_jumping(&self) -> bool {
        self.phase.is_jumping()
    }

    pub fn is_wall_jumping(&self) -> bool {
        self.phase.is_wall_jumping()
    }

    pub fn is_sliding(&self) -> bool {
        self.sliding
    }

    pub fn is_jump_falling(&self) -> bool {
        self.jump_falling
    }

    pub fn is_jump_cut(&self) -> bool {
        self.jump_cut
    }

    /// Direction of the most recent wall jump (+1 right, -1 left).
    pub fn last_wall_jump_direction(&self) -> f32 {
        self.last_wall_jump_dir
    }

    /// Grace-window timers, for animation/UI/debug use.
    pub fn timers(&self) -> &TimerBank {
        &self.timers
    }

    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn profile(&self) -> &MovementProfile {
        &self.profile
    }

    /// Summary state for animation and debugging.
    pub fn state(&self) -> LocomotionState {
        if self.sliding {
            return LocomotionState::Sliding;
        }
        match self.phase {
            JumpPhase::WallJumping => LocomotionState::WallJumping,
            JumpPhase::Jumping => LocomotionState::Rising,
            JumpPhase::None => {
                if self.timers.is_open(GraceTimer::Ground) {
                    LocomotionState::Grounded
                } else {
                    LocomotionState::Falling
                }
            }
        }
    }

    // ---- health (stored for the host, unused by movement) ----

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.config.max_health
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.config.max_health);
    }

    // ---- logic tick internals ----

    fn handle_input(&mut self, input: InputFrame) {
        self.move_input = input.axis;

        if input.axis.x != 0.0 {
            self.face_toward(input.axis.x > 0.0);
        }
        if input.jump_pressed {
            self.register_jump_pressed();
        }
        if input.jump_released {
            self.register_jump_released();
        }
    }

    fn face_toward(&mut self, moving_right: bool) {
        let wanted = if moving_right {
            Facing::Right
        } else {
            Facing::Left
        };
        if wanted != self.facing {
            self.facing = wanted;
            trace!("turned to face {:?}", self.facing);
        }
    }

    fn update_jump_state(&mut self, velocity: Vec2, body: &mut impl PhysicsBody) {
        // Passing the apex ends the ascent without a dedicated state
        if self.phase.is_jumping() && velocity.y < 0.0 {
            self.phase = JumpPhase::None;
            self.jump_falling = true;
        }

        // The wall-jump window closes on its own
        if self.phase.is_wall_jumping()
            && self.elapsed - self.wall_jump_started_at > self.config.wall_jump_time
        {
            self.phase = JumpPhase::None;
        }

        // Back on the ground (or in coyote): clear the airborne modifiers
        if self.can_jump() && !self.phase.is_wall_jumping() {
            self.jump_cut = false;
            // can_jump implies no active ascent
            self.jump_falling = false;
        }

        if self.can_jump() && self.timers.is_open(GraceTimer::JumpBuffer) {
            self.enter_jump(velocity, body);
        } else if self.can_wall_jump() && self.timers.is_open(GraceTimer::JumpBuffer) {
            self.enter_wall_jump(velocity, body);
        }
    }

    fn enter_jump(&mut self, velocity: Vec2, body: &mut impl PhysicsBody) {
        self.phase = JumpPhase::Jumping;
        self.jump_cut = false;
        self.jump_falling = false;

        // One press, one jump
        self.timers.refresh(GraceTimer::JumpBuffer, 0.0);
        self.timers.refresh(GraceTimer::Ground, 0.0);

        let mut impulse = self.profile.jump_force;
        if velocity.y < 0.0 {
            // Cancel any downward speed so coyote jumps reach full height
            impulse -= velocity.y;
        }
        body.apply_impulse(Vec2::new(0.0, impulse));
        debug!("jump fired, impulse {impulse:.2}");
    }

    fn enter_wall_jump(&mut self, velocity: Vec2, body: &mut impl PhysicsBody) {
        self.phase = JumpPhase::WallJumping;
        self.jump_cut = false;
        self.jump_falling = false;
        self.wall_jump_started_at = self.elapsed;

        // Latch the direction away from the touched wall before consuming
        // the wall windows
        self.last_wall_jump_dir = if self.timers.is_open(GraceTimer::RightWall) {
            -1.0
        } else {
            1.0
        };

        self.timers.refresh(GraceTimer::JumpBuffer, 0.0);
        self.timers.refresh(GraceTimer::Ground, 0.0);
        self.timers.refresh(GraceTimer::RightWall, 0.0);
        self.timers.refresh(GraceTimer::LeftWall, 0.0);
        self.timers.refresh(GraceTimer::Wall, 0.0);

        let mut impulse = self.config.wall_jump_force;
        impulse.x *= self.last_wall_jump_dir;
        if sign(velocity.x) != sign(impulse.x) {
            // Full redirect: cancel horizontal speed into the wall
            impulse.x -= velocity.x;
        }
        if velocity.y < 0.0 {
            impulse.y -= velocity.y;
        }
        body.apply_impulse(impulse);
        debug!(
            "wall jump fired toward {:+.0}, impulse ({:.2}, {:.2})",
            self.last_wall_jump_dir, impulse.x, impulse.y
        );
    }

    /// Gravity-scale selection, first match wins. Runs after the jump
    /// transitions, on the live velocity.
    fn update_gravity(&mut self, velocity: Vec2, body: &mut impl PhysicsBody) {
        let was_sliding = self.sliding;
        self.sliding = self.can_slide()
            && ((self.timers.is_open(GraceTimer::LeftWall) && self.move_input.x < 0.0)
                || (self.timers.is_open(GraceTimer::RightWall) && self.move_input.x > 0.0));
        if self.sliding != was_sliding {
            trace!("sliding: {}", self.sliding);
        }
        debug_assert!(
            !(self.sliding && self.timers.is_open(GraceTimer::Ground)),
            "sliding entered while grounded"
        );

        let base = self.profile.gravity_scale;
        if self.sliding {
            body.set_gravity_scale(0.0);
        } else if velocity.y < 0.0 && self.move_input.y < 0.0 {
            // Fast fall while holding down, capped
            body.set_gravity_scale(base * self.config.fast_fall_mult);
            self.floor_fall_speed(body, self.config.max_fast_fall_speed);
        } else if self.jump_cut {
            body.set_gravity_scale(base * self.config.jump_cut_gravity_mult);
            self.floor_fall_speed(body, self.config.max_fall_speed);
        } else if self.in_jump_hang(velocity.y) {
            // Softer gravity near the apex for a floatier peak
            body.set_gravity_scale(base * self.config.jump_hang_gravity_mult);
        } else if velocity.y < 0.0 {
            body.set_gravity_scale(base * self.config.fall_mult);
            self.floor_fall_speed(body, self.config.max_fall_speed);
        } else {
            body.set_gravity_scale(base);
        }
    }

    fn floor_fall_speed(&self, body: &mut impl PhysicsBody, cap: f32) {
        let live = body.velocity();
        body.set_velocity(Vec2::new(live.x, live.y.max(-cap)));
    }

    fn in_jump_hang(&self, velocity_y: f32) -> bool {
        (self.phase != JumpPhase::None || self.jump_falling)
            && velocity_y.abs() < self.config.jump_hang_threshold
    }

    // ---- physics tick internals ----

    fn run(&mut self, blend: f32, body: &mut impl PhysicsBody) {
        let velocity = body.velocity();

        let mut target_speed = self.move_input.x * self.config.run_max_speed;
        target_speed = lerp(velocity.x, target_speed, blend);

        let grounded = self.timers.is_open(GraceTimer::Ground);
        let has_intent = target_speed.abs() > SPEED_INTENT_EPSILON;
        let mut accel_rate = match (grounded, has_intent) {
            (true, true) => self.profile.run_accel_amount,
            (true, false) => self.profile.run_decel_amount,
            (false, true) => self.profile.run_accel_amount * self.config.accel_in_air,
            (false, false) => self.profile.run_decel_amount * self.config.decel_in_air,
        };

        // Near the apex both responsiveness and top speed get a boost
        if self.in_jump_hang(velocity.y) {
            accel_rate *= self.config.jump_hang_accel_mult;
            target_speed *= self.config.jump_hang_max_speed_mult;
        }

        // Don't decelerate a character already moving faster than target
        // in the desired direction; keeps wall-jump speed
        if self.config.conserve_momentum
            && velocity.x.abs() > target_speed.abs()
            && sign(velocity.x) == sign(target_speed)
            && target_speed.abs() > SPEED_INTENT_EPSILON
            && self.timers.remaining(GraceTimer::Ground) < 0.0
        {
            accel_rate = 0.0;
        }

        let force = (target_speed - velocity.x) * accel_rate;
        body.apply_force(Vec2::new(force, 0.0));
    }

    fn slide(&mut self, dt: f32, body: &mut impl PhysicsBody) {
        let velocity = body.velocity();
        let speed_diff = self.config.slide_speed - velocity.y;
        let mut movement = speed_diff * self.config.slide_acceleration;

        // One physics step must not overshoot the target slide speed
        // regardless of the step rate
        let limit = speed_diff.abs() / dt;
        movement = movement.clamp(-limit, limit);

        body.apply_force(Vec2::new(0.0, -movement.abs()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;
    const WORLD_GRAVITY: f32 = -9.81;

    /// Unit-mass recording body: impulses change velocity immediately,
    /// forces are only recorded.
    #[derive(Debug, Default)]
    struct MockBody {
        velocity: Vec2,
        gravity_scale: f32,
        impulses: Vec<Vec2>,
        forces: Vec<Vec2>,
    }

    impl PhysicsBody for MockBody {
        fn velocity(&self) -> Vec2 {
            self.velocity
        }
        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
        }
        fn apply_impulse(&mut self, impulse: Vec2) {
            self.impulses.push(impulse);
            self.velocity += impulse;
        }
        fn apply_force(&mut self, force: Vec2) {
            self.forces.push(force);
        }
        fn set_gravity_scale(&mut self, scale: f32) {
            self.gravity_scale = scale;
        }
    }

    fn controller() -> MovementController {
        MovementController::new(MovementConfig::default(), WORLD_GRAVITY).unwrap()
    }

    fn grounded() -> ContactProbes {
        ContactProbes {
            ground: true,
            ..Default::default()
        }
    }

    fn airborne() -> ContactProbes {
        ContactProbes::default()
    }

    /// Wall on the character's left while facing right
    fn left_wall() -> ContactProbes {
        ContactProbes {
            back_wall: true,
            ..Default::default()
        }
    }

    /// Wall on the character's right while facing right
    fn right_wall() -> ContactProbes {
        ContactProbes {
            front_wall: true,
            ..Default::default()
        }
    }

    fn press_jump() -> InputFrame {
        InputFrame {
            jump_pressed: true,
            ..Default::default()
        }
    }

    fn tick(ctrl: &mut MovementController, body: &mut MockBody, input: InputFrame, probes: ContactProbes) {
        ctrl.advance_logic(DT, input, probes, body);
    }

    #[test]
    fn test_grounded_jump_fires_single_derived_impulse() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());
        ctrl.register_jump_pressed();
        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());

        assert!(ctrl.is_jumping());
        assert_eq!(body.impulses.len(), 1);
        assert_eq!(body.impulses[0].x, 0.0);
        assert_relative_eq!(body.impulses[0].y, ctrl.profile().jump_force, epsilon = 1e-5);
        // Consumed on fire
        assert!(!ctrl.timers().is_open(GraceTimer::Ground));
        assert!(!ctrl.timers().is_open(GraceTimer::JumpBuffer));
    }

    #[test]
    fn test_jump_fire_tick_selects_base_gravity() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        // The impulse leaves the body rising fast, so neither the hang
        // window nor any descent branch may match on the fire tick
        tick(&mut ctrl, &mut body, press_jump(), grounded());

        assert!(ctrl.is_jumping());
        assert_relative_eq!(
            body.gravity_scale,
            ctrl.profile().gravity_scale,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_descending_coyote_jump_does_not_fast_fall_on_fire_tick() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());

        // Falling off the ledge with down held, jump pressed inside the
        // coyote window: the fire tick must not pick the fast-fall branch
        body.velocity = Vec2::new(0.0, -5.0);
        let input = InputFrame {
            axis: Vec2::new(0.0, -1.0),
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut ctrl, &mut body, input, airborne());

        assert!(ctrl.is_jumping());
        assert!(body.velocity.y > 0.0);
        assert_relative_eq!(
            body.gravity_scale,
            ctrl.profile().gravity_scale,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_jump_requires_ground_window() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, press_jump(), airborne());

        assert!(!ctrl.is_jumping());
        assert!(body.impulses.is_empty());
    }

    #[test]
    fn test_coyote_grace_window() {
        let mut ctrl = controller();
        let mut body = MockBody::default();
        let coyote = ctrl.config().coyote_time;

        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());
        assert_eq!(ctrl.timers().remaining(GraceTimer::Ground), coyote);

        // Walk off the ledge; before the window elapses a jump is allowed
        let mut elapsed = 0.0;
        while elapsed + DT < coyote {
            ctrl.advance_logic(DT, InputFrame::neutral(), airborne(), &mut body);
            elapsed += DT;
            assert!(ctrl.can_jump(), "coyote window closed early at {elapsed}");
        }

        // Strictly past the window it is gone. Repeated f32 subtraction
        // can leave the timer a few ULPs above zero right at the nominal
        // boundary, so advance one full tick beyond it.
        ctrl.advance_logic(DT, InputFrame::neutral(), airborne(), &mut body);
        ctrl.advance_logic(DT, InputFrame::neutral(), airborne(), &mut body);
        assert!(ctrl.timers().remaining(GraceTimer::Ground) < 0.0);
        assert!(!ctrl.can_jump());
    }

    #[test]
    fn test_buffered_jump_fires_on_landing() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        // Press in the air, shortly before touching down
        tick(&mut ctrl, &mut body, press_jump(), airborne());
        assert!(body.impulses.is_empty());

        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());
        assert!(ctrl.is_jumping());
        assert_eq!(body.impulses.len(), 1);
    }

    #[test]
    fn test_sensing_suppressed_while_ascending() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, press_jump(), grounded());
        assert!(ctrl.is_jumping());

        // Rising through a platform edge must not re-arm the ground window
        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());
        assert!(ctrl.is_jumping());
        assert!(!ctrl.timers().is_open(GraceTimer::Ground));
        assert!(!ctrl.can_jump());
    }

    #[test]
    fn test_apex_transition_sets_jump_falling() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, press_jump(), grounded());
        assert!(ctrl.is_jumping());

        body.velocity = Vec2::new(0.0, -0.1);
        tick(&mut ctrl, &mut body, InputFrame::neutral(), airborne());

        assert!(!ctrl.is_jumping());
        assert!(ctrl.is_jump_falling());
    }

    #[test]
    fn test_landing_clears_airborne_modifiers() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, press_jump(), grounded());
        body.velocity = Vec2::new(0.0, -0.1);
        tick(&mut ctrl, &mut body, InputFrame::neutral(), airborne());
        assert!(ctrl.is_jump_falling());

        body.velocity = Vec2::ZERO;
        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());
        assert!(!ctrl.is_jump_falling());
        assert!(!ctrl.is_jump_cut());
        assert_eq!(ctrl.state(), LocomotionState::Grounded);
    }

    #[test]
    fn test_jump_cut_only_while_ascending() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        // Released while not jumping: ignored
        ctrl.register_jump_released();
        assert!(!ctrl.is_jump_cut());

        tick(&mut ctrl, &mut body, press_jump(), grounded());
        // Sample the post-impulse (rising) velocity
        tick(&mut ctrl, &mut body, InputFrame::neutral(), airborne());
        assert!(ctrl.can_jump_cut());

        ctrl.register_jump_released();
        assert!(ctrl.is_jump_cut());

        tick(&mut ctrl, &mut body, InputFrame::neutral(), airborne());
        let expected = ctrl.profile().gravity_scale * ctrl.config().jump_cut_gravity_mult;
        assert_relative_eq!(body.gravity_scale, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_jump_cut_respects_config_flag() {
        let config = MovementConfig {
            jump_cut_enabled: false,
            ..MovementConfig::default()
        };
        let mut ctrl = MovementController::new(config, WORLD_GRAVITY).unwrap();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, press_jump(), grounded());
        tick(&mut ctrl, &mut body, InputFrame::neutral(), airborne());
        ctrl.register_jump_released();

        assert!(!ctrl.is_jump_cut());
    }

    #[test]
    fn test_wall_jump_fires_away_from_wall() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        // Airborne next to a wall on the left
        tick(&mut ctrl, &mut body, InputFrame::neutral(), left_wall());
        tick(&mut ctrl, &mut body, press_jump(), left_wall());

        assert!(ctrl.is_wall_jumping());
        assert!(!ctrl.is_jumping());
        assert_eq!(ctrl.last_wall_jump_direction(), 1.0);
        assert_eq!(body.impulses.len(), 1);
        assert!(body.impulses[0].x > 0.0);
        assert_eq!(ctrl.state(), LocomotionState::WallJumping);
    }

    #[test]
    fn test_wall_jump_direction_lock() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        // First wall jump off the left wall latches +1
        tick(&mut ctrl, &mut body, InputFrame::neutral(), left_wall());
        tick(&mut ctrl, &mut body, press_jump(), left_wall());
        assert!(ctrl.is_wall_jumping());
        assert_eq!(body.impulses.len(), 1);

        // Still inside the wall-jump window, back at the same left wall:
        // the opposite of the latched direction, so it must be rejected
        body.velocity = Vec2::new(5.0, 5.0);
        tick(&mut ctrl, &mut body, press_jump(), left_wall());
        assert!(!ctrl.can_wall_jump());
        assert_eq!(body.impulses.len(), 1);

        // Reaching the wall in the latched direction is allowed
        tick(&mut ctrl, &mut body, press_jump(), right_wall());
        assert_eq!(body.impulses.len(), 2);
        assert_eq!(ctrl.last_wall_jump_direction(), -1.0);
        assert!(body.impulses[1].x < 0.0);
    }

    #[test]
    fn test_wall_jump_redirects_opposing_velocity() {
        let mut ctrl = controller();
        let mut body = MockBody::default();
        let force = ctrl.config().wall_jump_force;

        tick(&mut ctrl, &mut body, InputFrame::neutral(), left_wall());
        // Falling toward the wall: both components should be compensated
        body.velocity = Vec2::new(-5.0, -2.0);
        tick(&mut ctrl, &mut body, press_jump(), left_wall());

        assert_eq!(body.impulses.len(), 1);
        assert_relative_eq!(body.impulses[0].x, force.x + 5.0, epsilon = 1e-5);
        assert_relative_eq!(body.impulses[0].y, force.y + 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_momentum_conservation_suppresses_deceleration() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        // Long airborne so the ground timer is strictly negative
        for _ in 0..10 {
            tick(&mut ctrl, &mut body, InputFrame::neutral(), airborne());
        }

        // Faster than target, same direction, input held toward it
        body.velocity = Vec2::new(20.0, 0.0);
        let input = InputFrame {
            axis: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        tick(&mut ctrl, &mut body, input, airborne());
        ctrl.advance_physics(DT, &mut body);

        assert_eq!(*body.forces.last().unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_run_force_toward_target_on_first_tick() {
        let config = MovementConfig {
            run_max_speed: 10.0,
            ..MovementConfig::default()
        };
        let mut ctrl = MovementController::new(config, WORLD_GRAVITY).unwrap();
        let mut body = MockBody::default();

        let input = InputFrame {
            axis: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        tick(&mut ctrl, &mut body, input, grounded());
        ctrl.advance_physics(DT, &mut body);

        let force = body.forces.last().unwrap();
        assert!(force.x > 0.0);
        assert_relative_eq!(force.x, 10.0 * ctrl.profile().run_accel_amount, epsilon = 1e-4);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_slide_overrides_fast_fall_gravity() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        // Airborne at a left wall, falling, pushing into the wall AND
        // holding down: sliding must win and zero out gravity. Pushing
        // left turns the character, so the wall sits at its front.
        let wall_at_front = ContactProbes {
            front_wall: true,
            ..Default::default()
        };
        let push_left = InputFrame {
            axis: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        tick(&mut ctrl, &mut body, push_left, wall_at_front);
        assert_eq!(ctrl.facing(), Facing::Left);

        body.velocity = Vec2::new(0.0, -3.0);
        let input = InputFrame {
            axis: Vec2::new(-1.0, -1.0),
            ..Default::default()
        };
        tick(&mut ctrl, &mut body, input, wall_at_front);

        assert!(ctrl.is_sliding());
        assert_eq!(body.gravity_scale, 0.0);
        assert_eq!(ctrl.state(), LocomotionState::Sliding);
    }

    #[test]
    fn test_slide_force_is_downward_and_clamped() {
        let config = MovementConfig {
            slide_speed: -3.0,
            slide_acceleration: 100.0,
            ..MovementConfig::default()
        };
        let mut ctrl = MovementController::new(config, WORLD_GRAVITY).unwrap();
        let mut body = MockBody::default();

        // Pushing left turns the character, so the wall sits at its front
        let wall_at_front = ContactProbes {
            front_wall: true,
            ..Default::default()
        };
        let push_left = InputFrame {
            axis: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        tick(&mut ctrl, &mut body, push_left, wall_at_front);
        body.velocity = Vec2::new(0.0, -10.0);
        tick(&mut ctrl, &mut body, push_left, wall_at_front);
        assert!(ctrl.is_sliding());

        ctrl.advance_physics(DT, &mut body);

        // speed_diff = -3 - (-10) = 7; raw force 700 clamps to 7/dt = 420
        let slide_force = body.forces.last().unwrap();
        assert_eq!(slide_force.x, 0.0);
        assert_relative_eq!(slide_force.y, -(7.0 / DT), epsilon = 1e-2);
    }

    #[test]
    fn test_fast_fall_floors_velocity() {
        let mut ctrl = controller();
        let mut body = MockBody::default();
        let cap = ctrl.config().max_fast_fall_speed;

        for _ in 0..5 {
            tick(&mut ctrl, &mut body, InputFrame::neutral(), airborne());
        }
        body.velocity = Vec2::new(1.0, -100.0);
        let input = InputFrame {
            axis: Vec2::new(0.0, -1.0),
            ..Default::default()
        };
        tick(&mut ctrl, &mut body, input, airborne());

        let expected = ctrl.profile().gravity_scale * ctrl.config().fast_fall_mult;
        assert_relative_eq!(body.gravity_scale, expected, epsilon = 1e-5);
        assert_eq!(body.velocity.y, -cap);
        assert_eq!(body.velocity.x, 1.0);
    }

    #[test]
    fn test_facing_follows_input() {
        let mut ctrl = controller();
        let mut body = MockBody::default();
        assert_eq!(ctrl.facing(), Facing::Right);

        let input = InputFrame {
            axis: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        tick(&mut ctrl, &mut body, input, grounded());
        assert_eq!(ctrl.facing(), Facing::Left);

        // No horizontal input keeps the current facing
        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());
        assert_eq!(ctrl.facing(), Facing::Left);
    }

    #[test]
    fn test_jumping_and_wall_jumping_exclusive() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, press_jump(), grounded());
        assert!(ctrl.is_jumping() && !ctrl.is_wall_jumping());

        // A wall jump fired out of an ascent replaces the phase outright
        body.velocity = Vec2::new(0.0, 5.0);
        tick(&mut ctrl, &mut body, press_jump(), airborne());
        if ctrl.is_wall_jumping() {
            assert!(!ctrl.is_jumping());
        }
    }

    #[test]
    fn test_health_is_tracked_but_inert() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        ctrl.take_damage(30);
        assert_eq!(ctrl.health(), 70);
        ctrl.take_damage(1000);
        assert_eq!(ctrl.health(), 0);
        ctrl.heal(50);
        assert_eq!(ctrl.health(), 50);
        ctrl.heal(1000);
        assert_eq!(ctrl.health(), ctrl.max_health());

        // Movement is unaffected by health
        tick(&mut ctrl, &mut body, press_jump(), grounded());
        assert!(ctrl.is_jumping());
    }

    #[test]
    fn test_state_query_mapping() {
        let mut ctrl = controller();
        let mut body = MockBody::default();

        tick(&mut ctrl, &mut body, InputFrame::neutral(), grounded());
        assert_eq!(ctrl.state(), LocomotionState::Grounded);

        for _ in 0..10 {
            tick(&mut ctrl, &mut body, InputFrame::neutral(), airborne());
        }
        assert_eq!(ctrl.state(), LocomotionState::Falling);

        tick(&mut ctrl, &mut body, press_jump(), grounded());
        assert_eq!(ctrl.state(), LocomotionState::Rising);
    }
}
