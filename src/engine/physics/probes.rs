// Collision probe rig
//
// Evaluates the three fixed-size overlap boxes (ground, front wall, back
// wall) against level geometry each logic tick. Probe anchors are offsets
// from the body centre; the wall anchors mirror horizontally with facing
// so "front" always means the side the character looks toward.

use glam::Vec2;
use rapier2d::prelude::{QueryFilter, QueryFilterFlags, RigidBodyHandle};

use super::world::PhysicsWorld;
use crate::game::movement::{ContactProbes, Facing, MovementConfig};

#[derive(Debug, Clone)]
pub struct ProbeRig {
    ground_offset: Vec2,
    ground_half_extents: Vec2,
    front_wall_offset: Vec2,
    back_wall_offset: Vec2,
    wall_half_extents: Vec2,
}

impl ProbeRig {
    /// Build the rig from the probe geometry in the movement config.
    /// Offsets are authored for a right-facing character.
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            ground_offset: config.ground_probe_offset,
            ground_half_extents: config.ground_probe_half_extents,
            front_wall_offset: config.front_wall_probe_offset,
            back_wall_offset: config.back_wall_probe_offset,
            wall_half_extents: config.wall_probe_half_extents,
        }
    }

    /// Evaluate all three probes for the given character body. Probes only
    /// see fixed geometry; sensors and dynamic bodies never count as
    /// ground or wall.
    pub fn sense(
        &self,
        world: &PhysicsWorld,
        body: RigidBodyHandle,
        facing: Facing,
    ) -> ContactProbes {
        let Some(body) = world.get_rigid_body(body) else {
            // A missing body answers "no contact", never an error
            return ContactProbes::default();
        };
        let center = {
            let t = body.translation();
            Vec2::new(t.x, t.y)
        };

        let filter = QueryFilter {
            flags: QueryFilterFlags::ONLY_FIXED | QueryFilterFlags::EXCLUDE_SENSORS,
            ..Default::default()
        };

        let mirror = |offset: Vec2| Vec2::new(offset.x * facing.sign(), offset.y);

        ContactProbes {
            ground: world.overlap_box(
                center + self.ground_offset,
                self.ground_half_extents,
                filter,
            ),
            front_wall: world.overlap_box(
                center + mirror(self.front_wall_offset),
                self.wall_half_extents,
                filter,
            ),
            back_wall: world.overlap_box(
                center + mirror(self.back_wall_offset),
                self.wall_half_extents,
                filter,
            ),
        }
    }
}
