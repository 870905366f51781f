mod simulation;

pub use simulation::{Mode, Simulation, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, RANDOM_DENSITY};
