//! Compass directions used for neighbor sampling, random walks and clump
//! translation. Screen coordinates: `y` grows downward.

use std::fmt;
use std::str::FromStr;

use crate::error::LifeError;

/// The 8 neighbor directions, in clockwise order starting top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    AboveLeft  = 0, // (x-1, y-1)
    Above      = 1, // (x,   y-1)
    AboveRight = 2, // (x+1, y-1)
    Right      = 3, // (x+1, y)
    BelowRight = 4, // (x+1, y+1)
    Below      = 5, // (x,   y+1)
    BelowLeft  = 6, // (x-1, y+1)
    Left       = 7, // (x-1, y)
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::AboveLeft,  Direction::Above,
        Direction::AboveRight, Direction::Right,
        Direction::BelowRight, Direction::Below,
        Direction::BelowLeft,  Direction::Left,
    ];

    /// The coordinate offset for this direction.
    #[inline]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Direction::AboveLeft  => (-1, -1),
            Direction::Above      => (0, -1),
            Direction::AboveRight => (1, -1),
            Direction::Right      => (1, 0),
            Direction::BelowRight => (1, 1),
            Direction::Below      => (0, 1),
            Direction::BelowLeft  => (-1, 1),
            Direction::Left       => (-1, 0),
        }
    }

    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::AboveLeft  => Direction::BelowRight,
            Direction::Above      => Direction::Below,
            Direction::AboveRight => Direction::BelowLeft,
            Direction::Right      => Direction::Left,
            Direction::BelowRight => Direction::AboveLeft,
            Direction::Below      => Direction::Above,
            Direction::BelowLeft  => Direction::AboveRight,
            Direction::Left       => Direction::Right,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::AboveLeft  => "aboveLeft",
            Direction::Above      => "above",
            Direction::AboveRight => "aboveRight",
            Direction::Right      => "right",
            Direction::BelowRight => "belowRight",
            Direction::Below      => "below",
            Direction::BelowLeft  => "belowLeft",
            Direction::Left       => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = LifeError;

    /// Accepts the camelCase names (`aboveLeft`), snake/kebab variants and
    /// `up`/`down` for the arrow keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        let dir = match key.as_str() {
            "aboveleft" | "upleft" => Direction::AboveLeft,
            "above" | "up" => Direction::Above,
            "aboveright" | "upright" => Direction::AboveRight,
            "right" => Direction::Right,
            "belowright" | "downright" => Direction::BelowRight,
            "below" | "down" => Direction::Below,
            "belowleft" | "downleft" => Direction::BelowLeft,
            "left" => Direction::Left,
            _ => return Err(LifeError::InvalidDirection(s.to_string())),
        };
        Ok(dir)
    }
}
