// Rigid-body contract and construction presets

use glam::Vec2;
use rapier2d::prelude::*;

/// The slice of a rigid-body integrator the movement core talks to.
///
/// `apply_force` is a continuous force for the current physics step only;
/// `apply_impulse` is an instantaneous velocity change (scaled by mass).
/// The core's access pattern is read-then-write within a single tick and
/// never interleaves with another mutator.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn apply_impulse(&mut self, impulse: Vec2);
    fn apply_force(&mut self, force: Vec2);
    fn set_gravity_scale(&mut self, scale: f32);
}

impl PhysicsBody for RigidBody {
    fn velocity(&self) -> Vec2 {
        let v = self.linvel();
        Vec2::new(v.x, v.y)
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.set_linvel(vector![velocity.x, velocity.y], true);
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        RigidBody::apply_impulse(self, vector![impulse.x, impulse.y], true);
    }

    fn apply_force(&mut self, force: Vec2) {
        self.add_force(vector![force.x, force.y], true);
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        RigidBody::set_gravity_scale(self, scale, true);
    }
}

/// Ready-made bodies and colliders for the common cases.
pub mod presets {
    use super::*;

    /// Dynamic character body: rotation locked, never sleeps (a character
    /// waiting on input still needs gravity-scale updates), CCD on.
    pub fn player_body(x: f32, y: f32) -> RigidBody {
        RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .lock_rotations()
            .can_sleep(false)
            .ccd_enabled(true)
            .build()
    }

    /// Character collider: frictionless box so walls never carry the
    /// character and slide speed stays fully controller-owned. Unit mass,
    /// since the tuning (jump impulse, run force) is authored against it.
    pub fn player_collider(half_width: f32, half_height: f32) -> Collider {
        ColliderBuilder::cuboid(half_width, half_height)
            .friction(0.0)
            .restitution(0.0)
            .mass(1.0)
            .build()
    }

    /// Immovable level geometry body
    pub fn fixed_body(x: f32, y: f32) -> RigidBody {
        RigidBodyBuilder::fixed().translation(vector![x, y]).build()
    }

    /// Box collider for level geometry
    pub fn box_collider(half_width: f32, half_height: f32) -> Collider {
        ColliderBuilder::cuboid(half_width, half_height).build()
    }
}
