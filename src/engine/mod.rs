// Engine modules: scheduling, input frames, rapier2d physics integration

pub mod game_loop;
pub mod input;
pub mod physics;
