//! Fixed-size Conway's Game of Life automaton (B3/S23) with seeding and
//! spatial transforms.

pub mod automaton;
pub mod driver;
pub mod error;
pub mod render;
pub mod storage;

pub use automaton::{Automaton, AutomatonConfig, BoundaryMode, Cell, Direction, Seed, SeedSource};
pub use driver::{Driver, PlayerSettings, TickOutcome};
pub use error::{LifeError, Result};
