/// Two-rate cooperative scheduler
///
/// The movement core wants a variable-rate logic tick (timers, sensing,
/// transitions, gravity selection) once per frame and a fixed-rate physics
/// tick (force application) zero or more times per frame. `GameLoop` hands
/// the host both budgets each frame; the host calls
/// `MovementController::advance_logic` once with `logic_dt` and
/// `advance_physics` once per fixed step.
use std::time::{Duration, Instant};

/// Fixed physics step rate (60 steps per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
pub const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Per-frame tick budget returned by `begin_frame`.
#[derive(Debug, Clone, Copy)]
pub struct FrameBudget {
    /// Wall-clock seconds since the previous frame; feed to the logic tick
    pub logic_dt: f32,
    /// Number of fixed physics steps to run this frame
    pub physics_steps: u32,
}

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the loop started
    start_time: Instant,

    /// Whether the simulation is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total fixed steps executed
    step_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Begin a new frame and compute this frame's tick budget.
    pub fn begin_frame(&mut self) -> FrameBudget {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // If paused, neither rate advances
        if self.paused {
            return FrameBudget {
                logic_dt: 0.0,
                physics_steps: 0,
            };
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        self.step_count += steps as u64;
        FrameBudget {
            logic_dt: frame_time.as_secs_f32(),
            physics_steps: steps,
        }
    }

    /// Get the fixed timestep for physics steps (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Interpolation alpha for rendering between physics steps
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    /// Total elapsed time since the loop started
    pub fn elapsed_secs(&self) -> f32 {
        Instant::now().duration_since(self.start_time).as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Discard the pause interval entirely: a stale last_frame_time
            // would make the next frame measure the whole pause as frame
            // time and burst catch-up steps despite the empty accumulator
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Simulation resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
