//! A single grid position: aliveness, age, and the deferred transition flags
//! that keep one generation from leaking into the next.

use serde::{Deserialize, Serialize};

/// RGB presentation color keyed by live-neighbor count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LifeColor(pub [u8; 3]);

impl LifeColor {
    const PALETTE: [LifeColor; 9] = [
        LifeColor([200, 200, 255]), // 0: starved
        LifeColor([200, 200, 200]), // 1: starved
        LifeColor([0, 0, 200]),     // 2: survives
        LifeColor([0, 200, 0]),     // 3: survives or is born
        LifeColor([200, 0, 0]),     // 4: crowded
        LifeColor([180, 180, 180]), // 5: crowded
        LifeColor([200, 200, 0]),   // 6: crowded
        LifeColor([0, 200, 200]),   // 7: crowded
        LifeColor([0, 0, 0]),       // 8: crowded
    ];

    /// Color for `neighbors` live neighbors; counts above 8 use the 8 entry.
    #[inline]
    pub fn for_neighbors(neighbors: u8) -> Self {
        Self::PALETTE[neighbors.min(8) as usize]
    }

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }
}

/// B3/S23: the state a cell takes in the next generation.
#[inline]
pub fn next_alive(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) alive: bool,
    /// Generations survived while alive; 0 for dead cells.
    pub(crate) age: u64,
    pub(crate) flagged_for_death: bool,
    pub(crate) flagged_for_revive: bool,
}

impl Cell {
    pub fn new(x: usize, y: usize, alive: bool) -> Self {
        Self {
            x,
            y,
            alive,
            age: 0,
            flagged_for_death: false,
            flagged_for_revive: false,
        }
    }

    #[inline]
    pub fn x(&self) -> usize {
        self.x
    }

    #[inline]
    pub fn y(&self) -> usize {
        self.y
    }

    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn flagged_for_death(&self) -> bool {
        self.flagged_for_death
    }

    pub fn flagged_for_revive(&self) -> bool {
        self.flagged_for_revive
    }

    /// Evaluation phase. Sets at most one flag from the current state and
    /// the neighbor count of the settled generation; never touches `alive`.
    pub fn flag_yourself_for_death_maybe(&mut self, neighbors: u8) {
        debug_assert!(neighbors <= 8);
        debug_assert!(!self.flagged_for_death && !self.flagged_for_revive);

        let survives = next_alive(self.alive, neighbors);
        if self.alive && !survives {
            self.flagged_for_death = true;
        } else if !self.alive && survives {
            self.flagged_for_revive = true;
        }
    }

    /// Apply phase. Consumes whichever flag is set.
    pub fn apply_flags(&mut self) {
        if self.flagged_for_death {
            self.kill();
            self.flagged_for_death = false;
        } else if !self.alive && self.flagged_for_revive {
            self.revive();
            self.flagged_for_revive = false;
        }
    }

    /// Age tick, once per generation.
    pub fn update(&mut self) -> &mut Self {
        if self.alive {
            self.age += 1;
        }
        self
    }

    pub fn life_color(&self, neighbors: u8) -> LifeColor {
        LifeColor::for_neighbors(neighbors)
    }

    pub fn toggle(&mut self) -> &mut Self {
        if self.alive {
            self.kill()
        } else {
            self.revive()
        }
    }

    pub fn revive(&mut self) -> &mut Self {
        self.alive = true;
        self
    }

    pub fn kill(&mut self) -> &mut Self {
        self.alive = false;
        self.age = 0;
        self
    }

    #[inline]
    pub(crate) fn is_settled(&self) -> bool {
        !self.flagged_for_death && !self.flagged_for_revive
    }
}
