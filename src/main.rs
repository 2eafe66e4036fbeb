// Headless demo: a scripted character runs at a wall, jumps, wall-slides
// and wall-jumps back out, logging every locomotion state change.

use std::thread;

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;

use coyote_motion::engine::game_loop::{FIXED_TIMESTEP, FIXED_TIMESTEP_DURATION};
use coyote_motion::engine::physics::presets;
use coyote_motion::{
    GameLoop, InputTracker, LocomotionState, MovementConfig, MovementController, PhysicsWorld,
    ProbeRig,
};

const DEMO_SECONDS: f32 = 4.0;

/// Input script over demo time: (move axis, jump held)
fn scripted_input(t: f32) -> (Vec2, bool) {
    match t {
        // Run right toward the wall
        t if t < 0.8 => (Vec2::new(1.0, 0.0), false),
        // Jump while still running
        t if t < 1.0 => (Vec2::new(1.0, 0.0), true),
        // Keep pushing into the wall to slide down it
        t if t < 2.0 => (Vec2::new(1.0, 0.0), false),
        // Wall jump away
        t if t < 2.15 => (Vec2::new(1.0, 0.0), true),
        // Drift left and land
        _ => (Vec2::new(-1.0, 0.0), false),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting movement demo...");

    // Floor along y=0 with a tall wall at x=6
    let mut world = PhysicsWorld::new();
    let floor = world.add_rigid_body(presets::fixed_body(0.0, -0.5));
    world.add_collider(presets::box_collider(30.0, 0.5), floor);
    let wall = world.add_rigid_body(presets::fixed_body(6.5, 10.0));
    world.add_collider(presets::box_collider(0.5, 10.0), wall);

    let player = world.add_rigid_body(presets::player_body(0.0, 1.0));
    world.add_collider(presets::player_collider(0.5, 1.0), player);
    world.update_query_pipeline();

    let config = MovementConfig::default();
    let rig = ProbeRig::from_config(&config);
    let mut controller = MovementController::new(config, world.gravity_y())?;
    let mut tracker = InputTracker::new();

    let mut game_loop = GameLoop::new();
    let mut last_state = LocomotionState::Grounded;

    while game_loop.elapsed_secs() < DEMO_SECONDS {
        let budget = game_loop.begin_frame();

        let (axis, jump_held) = scripted_input(game_loop.elapsed_secs());
        let input = tracker.frame(axis, jump_held);

        let probes = rig.sense(&world, player, controller.facing());
        {
            let body = world
                .get_rigid_body_mut(player)
                .context("player body missing")?;
            controller.advance_logic(budget.logic_dt, input, probes, body);
        }

        for _ in 0..budget.physics_steps {
            let body = world
                .get_rigid_body_mut(player)
                .context("player body missing")?;
            controller.advance_physics(FIXED_TIMESTEP, body);
            world.step(FIXED_TIMESTEP);
        }

        let state = controller.state();
        if state != last_state {
            let position = *world
                .get_rigid_body(player)
                .context("player body missing")?
                .translation();
            info!(
                "{:6.2}s  {:?} -> {:?} at ({:.2}, {:.2})",
                game_loop.elapsed_secs(),
                last_state,
                state,
                position.x,
                position.y
            );
            last_state = state;
        }

        thread::sleep(FIXED_TIMESTEP_DURATION);
    }

    info!(
        "Demo finished after {} frames / {} physics steps",
        game_loop.frame_count(),
        game_loop.step_count()
    );
    Ok(())
}
