//! Conway's Game of Life (B3/S23) on a fixed-size bounded-or-toroidal board,
//! with a free-running simulation thread feeding a bounded snapshot queue.

pub mod engine;
pub mod error;
pub mod grid;
pub mod queue;
pub mod render;
pub mod rules;
pub mod seed;
pub mod sim;

pub use engine::next_generation;
pub use error::{Result, SeedError};
pub use grid::Grid;
pub use queue::SnapshotQueue;
pub use render::Renderer;
pub use rules::{BirthPolicy, ClassicBirth, MutatingBirth, Rules};
pub use sim::{Command, Simulation, SimulationRunner};
