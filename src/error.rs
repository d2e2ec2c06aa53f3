//! Error type shared by the automaton, its seed store and the driver.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// A coordinate lookup fell outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("unknown direction `{0}`")]
    InvalidDirection(String),

    /// `center()` has no bounding box to work with.
    #[error("no live cells")]
    NoLiveCells,

    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidConfiguration { width: i64, height: i64 },

    #[error("unknown seed `{0}`")]
    UnknownSeed(String),

    #[error("unknown render style `{0}`")]
    UnknownRenderStyle(String),

    #[error("seed store: {0}")]
    Storage(String),
}

impl From<std::io::Error> for LifeError {
    fn from(err: std::io::Error) -> Self {
        LifeError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LifeError {
    fn from(err: serde_json::Error) -> Self {
        LifeError::Storage(err.to_string())
    }
}
