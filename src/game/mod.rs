// Gameplay-side systems

pub mod movement;
