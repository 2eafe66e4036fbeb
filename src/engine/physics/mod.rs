// Physics integration built on rapier2d
//
// Supplies the concrete side of the movement core's boundary: a trimmed
// physics world with probe overlap queries, body construction presets, and
// the `PhysicsBody` rigid-body contract implemented for rapier bodies.

pub mod body;
pub mod probes;
pub mod world;

pub use body::{presets, PhysicsBody};
pub use probes::ProbeRig;
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{ColliderHandle, QueryFilter, RigidBodyHandle};
