// Character movement core
//
// Everything that turns resolved input and probe overlaps into locomotion
// state and physics forces:
// - `config`: tuning block, validation and derived constants
// - `timers`: decaying grace-window timer bank
// - `sensors`: probe overlaps -> timer refreshes, facing-aware
// - `state`: locomotion phase, modifier bits and facing
// - `controller`: the per-tick state machine and force model

pub mod config;
pub mod controller;
pub mod sensors;
pub mod state;
pub mod timers;

// Re-export commonly used types
pub use config::{ConfigError, MovementConfig, MovementProfile, REFERENCE_ACCEL_CADENCE};
pub use controller::MovementController;
pub use sensors::ContactProbes;
pub use state::{Facing, JumpPhase, LocomotionState};
pub use timers::{GraceTimer, TimerBank};
