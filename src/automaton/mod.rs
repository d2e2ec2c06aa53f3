//! Fixed-size Game of Life engine and its public API.

mod cell;
mod direction;
mod engine;
pub mod seeds;

pub use cell::{Cell, LifeColor, next_alive};
pub use direction::Direction;
pub use engine::{Automaton, AutomatonConfig, BoundaryMode, OldestCell, Stats, Trend};
pub use seeds::{Seed, SeedSource};
