// Coyote Motion - a frame-accurate 2D platformer movement core
//
// The crate converts per-tick input and collision sensing into physics
// forces and a small set of locomotion states (grounded run, jump,
// wall-jump, fall, wall slide), with the feel-tuning nonlinearities that
// make platformers responsive: coyote time, jump buffering, jump-hang
// gravity, jump cutting, momentum conservation and wall-jump direction
// locking.
//
// The movement core itself (`game::movement`) is physics-engine agnostic:
// it talks to the world through the `PhysicsBody` trait and consumes
// boolean probe overlaps. The `engine` module supplies a rapier2d-backed
// implementation of that boundary plus a fixed-timestep scheduler.

pub mod core;
pub mod engine;
pub mod game;

// Re-export the types most hosts need
pub use engine::game_loop::GameLoop;
pub use engine::input::{InputFrame, InputTracker};
pub use engine::physics::{PhysicsBody, PhysicsWorld, ProbeRig};
pub use game::movement::{
    ConfigError, ContactProbes, Facing, GraceTimer, JumpPhase, LocomotionState, MovementConfig,
    MovementController, MovementProfile, TimerBank,
};
