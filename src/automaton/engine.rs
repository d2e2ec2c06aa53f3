//! Fixed-extent Game of Life grid: generation stepping, seeding, transforms
//! and population bookkeeping.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cell::Cell;
use super::direction::Direction;
use super::seeds::{self, Seed, SeedSource};
use crate::error::{LifeError, Result};
use crate::render::{CellView, Frame};

const DEFAULT_WIDTH: i64 = 80;
const DEFAULT_HEIGHT: i64 = 48;
const DEFAULT_CELL_UNIT: u32 = 10;

/// How neighbor sampling treats coordinates past the grid edge.
///
/// Only neighbor counting is affected. `move_clump` always drops cells that
/// leave the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Edges wrap to the opposite side.
    #[default]
    Toroidal,
    /// Positions outside the grid count as dead.
    DeadBorder,
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryMode::Toroidal => f.write_str("toroidal"),
            BoundaryMode::DeadBorder => f.write_str("dead-border"),
        }
    }
}

impl FromStr for BoundaryMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toroidal" | "wrap" | "torus" => Ok(BoundaryMode::Toroidal),
            "dead-border" | "dead" | "bounded" => Ok(BoundaryMode::DeadBorder),
            other => Err(format!(
                "unknown boundary mode: {other} (expected toroidal or dead-border)"
            )),
        }
    }
}

/// Configuration for an automaton instance.
///
/// Dimensions are signed so that nonsense input reaches validation in
/// `Automaton::with_config` instead of wrapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonConfig {
    pub width: i64,
    pub height: i64,
    /// Pixel size of one cell, passed through to renderers.
    pub cell_unit: u32,
    pub boundary: BoundaryMode,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_unit: DEFAULT_CELL_UNIT,
            boundary: BoundaryMode::default(),
        }
    }
}

impl AutomatonConfig {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn cell_unit(mut self, unit: u32) -> Self {
        self.cell_unit = unit.max(1);
        self
    }

    pub fn boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Whether the population size moved since the previous count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Evolving,
    Stabilized,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Evolving => f.write_str("Evolving"),
            Trend::Stabilized => f.write_str("Stabilized"),
        }
    }
}

/// Age and position of the oldest live cell. `position` is `None` (and `age`
/// is 0) when nothing is alive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldestCell {
    pub age: u64,
    pub position: Option<(usize, usize)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub live_cell_count: usize,
    pub max_population: usize,
    pub oldest: OldestCell,
    pub trend: Trend,
}

pub struct Automaton {
    width: usize,
    height: usize,
    unit: u32,
    boundary: BoundaryMode,
    /// Coordinates the grid was built from.
    seed: Seed,
    /// Column-major `[x][y]`: cell `(x, y)` lives at `x * height + y`.
    grid: Vec<Cell>,
    generation: u64,
    live_cell_num: usize,
    last_live_cell_num: usize,
    max_population: usize,
}

impl Automaton {
    /// Build a grid with the default cell unit and toroidal edges.
    pub fn new(width: i64, height: i64, seed: impl Into<SeedSource>) -> Result<Self> {
        Self::with_config(AutomatonConfig::new(width, height), seed)
    }

    pub fn with_config(config: AutomatonConfig, seed: impl Into<SeedSource>) -> Result<Self> {
        let invalid = LifeError::InvalidConfiguration {
            width: config.width,
            height: config.height,
        };
        if config.width <= 0 || config.height <= 0 {
            return Err(invalid);
        }
        let width = usize::try_from(config.width).map_err(|_| invalid.clone())?;
        let height = usize::try_from(config.height).map_err(|_| invalid.clone())?;
        let len = width.checked_mul(height).ok_or_else(|| invalid.clone())?;
        let mut grid: Vec<Cell> = Vec::new();
        grid.try_reserve_exact(len).map_err(|_| invalid)?;

        let seed = match seed.into() {
            SeedSource::Empty => Seed::new(),
            SeedSource::Named(name) => seeds::named(&name)
                .map(<[_]>::to_vec)
                .ok_or(LifeError::UnknownSeed(name))?,
            SeedSource::Coordinates(cells) => cells,
            SeedSource::Line { vertical } => seeds::line_seed(width, height, vertical),
        };

        // Same answer as `drop_seed`, without a scan per cell.
        let live: HashSet<(i64, i64)> = seed.iter().map(|&(x, y)| (x as i64, y as i64)).collect();
        for x in 0..width {
            for y in 0..height {
                grid.push(Cell::new(x, y, live.contains(&(x as i64, y as i64))));
            }
        }

        debug!(
            width,
            height,
            boundary = %config.boundary,
            seed_cells = seed.len(),
            "built automaton"
        );

        Ok(Self {
            width,
            height,
            unit: config.cell_unit.max(1),
            boundary: config.boundary,
            seed,
            grid,
            generation: 0,
            live_cell_num: 0,
            last_live_cell_num: 0,
            max_population: 0,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn unit(&self) -> u32 {
        self.unit
    }

    #[inline]
    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Completed calls to `update()`.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All cells in traversal order.
    pub fn cells(&self) -> &[Cell] {
        &self.grid
    }

    /// The seed this grid was built from.
    pub fn active_seed(&self) -> &[(i32, i32)] {
        &self.seed
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x * self.height + y
    }

    /// Map signed coordinates to a grid position without wrapping.
    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some((x, y))
    }

    /// Map signed coordinates to a grid position under the boundary mode.
    #[inline]
    fn resolve(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        match self.boundary {
            BoundaryMode::Toroidal => Some((
                x.rem_euclid(self.width as i64) as usize,
                y.rem_euclid(self.height as i64) as usize,
            )),
            BoundaryMode::DeadBorder => self.in_bounds(x, y),
        }
    }

    /// Visit every cell, `x` outer and `y` inner.
    pub fn traverse<F>(&self, visit: F)
    where
        F: FnMut(&Cell),
    {
        self.traverse_rows(|_| {}, visit);
    }

    /// Like `traverse`, calling `on_row_start(x)` before the cells of each
    /// outer index.
    pub fn traverse_rows<R, F>(&self, mut on_row_start: R, mut visit: F)
    where
        R: FnMut(usize),
        F: FnMut(&Cell),
    {
        for (x, row) in self.grid.chunks_exact(self.height).enumerate() {
            on_row_start(x);
            for cell in row {
                visit(cell);
            }
        }
    }

    pub fn traverse_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Cell),
    {
        for row in self.grid.chunks_exact_mut(self.height) {
            for cell in row {
                visit(cell);
            }
        }
    }

    /// True iff `(x, y)` is listed in the active seed.
    pub fn drop_seed(&self, x: usize, y: usize) -> bool {
        seed_contains(&self.seed, x, y)
    }

    /// Live cells among the 8 neighbors of `(x, y)`.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0u8;
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let alive = self
                .resolve(x as i64 + dx, y as i64 + dy)
                .is_some_and(|(nx, ny)| self.grid[self.index(nx, ny)].alive);
            count += alive as u8;
        }
        count
    }

    /// Advance one generation.
    ///
    /// Every cell is flagged against the settled grid before any cell
    /// changes; only then are the flags applied. Callers never observe a
    /// half-applied generation.
    pub fn update(&mut self) -> &mut Self {
        self.evaluate();
        self.apply();
        self.generation += 1;
        debug!(generation = self.generation, "generation complete");
        self
    }

    /// Advance `generations` generations.
    pub fn step_n(&mut self, generations: u64) -> &mut Self {
        for _ in 0..generations {
            self.update();
        }
        self
    }

    fn evaluate(&mut self) {
        for x in 0..self.width {
            for y in 0..self.height {
                let neighbors = self.live_neighbors(x, y);
                let idx = self.index(x, y);
                self.grid[idx].flag_yourself_for_death_maybe(neighbors);
            }
        }
    }

    fn apply(&mut self) {
        self.traverse_mut(|cell| {
            // Tick before applying so survivors age, and the dying reset to 0.
            cell.update();
            cell.apply_flags();
            debug_assert!(cell.is_settled());
        });
    }

    /// Recount the population, remembering the previous count.
    pub fn live_cell_count(&mut self) -> usize {
        self.last_live_cell_num = self.live_cell_num;
        let mut count = 0;
        self.traverse(|cell| {
            if cell.alive {
                count += 1;
            }
        });
        self.live_cell_num = count;
        count
    }

    /// Whether the population size changed between the last two counts.
    ///
    /// Two different configurations of equal size read as stabilized.
    pub fn evolving(&self) -> bool {
        self.last_live_cell_num != self.live_cell_num
    }

    pub fn trend(&self) -> Trend {
        if self.evolving() {
            Trend::Evolving
        } else {
            Trend::Stabilized
        }
    }

    /// Live cells in traversal order.
    pub fn live_cells(&self) -> Vec<&Cell> {
        self.grid.iter().filter(|c| c.alive).collect()
    }

    /// First live cell in traversal order with the greatest age.
    pub fn oldest_cell(&self) -> Option<&Cell> {
        let mut oldest: Option<&Cell> = None;
        for cell in self.grid.iter().filter(|c| c.alive) {
            if oldest.is_none_or(|o| cell.age > o.age) {
                oldest = Some(cell);
            }
        }
        oldest
    }

    /// Fold `count` into the running maximum and return it.
    pub fn track_max_population(&mut self, count: usize) -> usize {
        self.max_population = self.max_population.max(count);
        self.max_population
    }

    pub fn max_population(&self) -> usize {
        self.max_population
    }

    /// Aggregate view for a stats panel. `count` is the result of the most
    /// recent `live_cell_count()`.
    pub fn stats(&mut self, count: usize) -> Stats {
        let oldest = self
            .oldest_cell()
            .map(|cell| OldestCell {
                age: cell.age,
                position: Some(cell.position()),
            })
            .unwrap_or_default();
        Stats {
            live_cell_count: count,
            max_population: self.track_max_population(count),
            oldest,
            trend: self.trend(),
        }
    }

    /// Coordinates of every live cell, enough to rebuild this configuration.
    pub fn seed(&self) -> Seed {
        let mut seed = Seed::new();
        self.traverse(|cell| {
            if cell.alive {
                seed.push((cell.x as i32, cell.y as i32));
            }
        });
        seed
    }

    pub fn get_cell(&self, x: i64, y: i64) -> Result<&Cell> {
        let (cx, cy) = self.checked(x, y)?;
        Ok(&self.grid[self.index(cx, cy)])
    }

    pub fn get_cell_mut(&mut self, x: i64, y: i64) -> Result<&mut Cell> {
        let (cx, cy) = self.checked(x, y)?;
        let idx = self.index(cx, cy);
        Ok(&mut self.grid[idx])
    }

    pub fn set_alive(&mut self, x: i64, y: i64, alive: bool) -> Result<()> {
        let cell = self.get_cell_mut(x, y)?;
        if alive {
            cell.revive();
        } else {
            cell.kill();
        }
        Ok(())
    }

    /// Kill every cell.
    pub fn clear(&mut self) -> &mut Self {
        self.traverse_mut(|cell| {
            cell.kill();
        });
        self
    }

    fn checked(&self, x: i64, y: i64) -> Result<(usize, usize)> {
        self.in_bounds(x, y).ok_or(LifeError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Put fresh live cells at `positions`, replacing the occupants.
    fn place(&mut self, positions: impl IntoIterator<Item = (usize, usize)>) {
        for (x, y) in positions {
            let idx = self.index(x, y);
            self.grid[idx] = Cell::new(x, y, true);
        }
    }

    fn live_positions(&self) -> Vec<(usize, usize)> {
        self.grid
            .iter()
            .filter(|c| c.alive)
            .map(Cell::position)
            .collect()
    }

    /// Scatter random-walk clumps over the grid using entropy from the
    /// thread-local generator.
    pub fn random_seed_entropy(&mut self, max_clumps: usize, max_clump_size: usize) -> &mut Self {
        self.random_seed(max_clumps, max_clump_size, &mut rand::rng())
    }

    /// Scatter `[0, max_clumps)` clumps. Each clump draws a size in
    /// `[0, max_clump_size)` and walks that many cells from a uniformly
    /// random anchor in uniformly random directions, reviving each one. A
    /// size of 0 places nothing. Walks are not wrapped: positions that leave
    /// the grid are simply not materialized. Existing live cells are kept.
    pub fn random_seed<R>(
        &mut self,
        max_clumps: usize,
        max_clump_size: usize,
        rng: &mut R,
    ) -> &mut Self
    where
        R: Rng + ?Sized,
    {
        let clumps = if max_clumps == 0 {
            0
        } else {
            rng.random_range(0..max_clumps)
        };

        let mut walked: Vec<(i64, i64)> = Vec::new();
        for _ in 0..clumps {
            let size = if max_clump_size == 0 {
                0
            } else {
                rng.random_range(0..max_clump_size)
            };
            let mut x = rng.random_range(0..self.width) as i64;
            let mut y = rng.random_range(0..self.height) as i64;
            for _ in 0..size {
                walked.push((x, y));
                let (dx, dy) = Direction::ALL[rng.random_range(0..Direction::ALL.len())].offset();
                x += dx;
                y += dy;
            }
        }

        let positions: Vec<(usize, usize)> = walked
            .iter()
            .filter_map(|&(x, y)| self.in_bounds(x, y))
            .collect();
        debug!(
            clumps,
            walked = walked.len(),
            placed = positions.len(),
            "random seed"
        );
        self.place(positions);
        self
    }

    /// Shift every live cell one step toward `direction`. Cells pushed past
    /// the edge are dropped; this never wraps, whatever the boundary mode.
    pub fn move_clump(&mut self, direction: Direction) -> &mut Self {
        let (dx, dy) = direction.offset();
        let live = self.live_positions();
        let moved: Vec<(usize, usize)> = live
            .iter()
            .filter_map(|&(x, y)| self.in_bounds(x as i64 + dx, y as i64 + dy))
            .collect();

        self.clear();
        debug!(
            %direction,
            moved = moved.len(),
            dropped = live.len() - moved.len(),
            "moved clump"
        );
        self.place(moved);
        self
    }

    /// `move_clump` for a direction given by name.
    pub fn move_clump_named(&mut self, direction: &str) -> Result<&mut Self> {
        let direction: Direction = direction.parse()?;
        Ok(self.move_clump(direction))
    }

    /// Translate the live cells so their bounding box sits in the middle of
    /// the grid. Moved cells are recreated, so their ages restart at 0.
    pub fn center(&mut self) -> Result<&mut Self> {
        let live = self.live_positions();
        let (min_x, max_x, min_y, max_y) = bounding_box(&live).ok_or(LifeError::NoLiveCells)?;

        let tx = ((min_x + (self.width - max_x)) / 2) as i64 - min_x as i64;
        let ty = ((min_y + (self.height - max_y)) / 2) as i64 - min_y as i64;

        let targets = live
            .iter()
            .map(|&(x, y)| {
                let (nx, ny) = (x as i64 + tx, y as i64 + ty);
                self.checked(nx, ny)
            })
            .collect::<Result<Vec<_>>>()?;

        self.clear();
        self.place(targets);
        debug!(tx, ty, cells = live.len(), "centered");
        Ok(self)
    }

    /// A full row or column through this grid's midline.
    pub fn line_seed(&self, vertical: bool) -> Seed {
        seeds::line_seed(self.width, self.height, vertical)
    }

    /// Renderer-facing description of every live cell.
    pub fn cell_views(&self) -> Vec<CellView> {
        let mut views = Vec::new();
        self.traverse(|cell| {
            if cell.alive {
                let neighbors = self.live_neighbors(cell.x, cell.y);
                views.push(CellView {
                    x: cell.x,
                    y: cell.y,
                    age: cell.age,
                    neighbors,
                    color: cell.life_color(neighbors),
                });
            }
        });
        views
    }

    pub fn frame(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            unit: self.unit,
        }
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("boundary", &self.boundary)
            .field("generation", &self.generation)
            .field("live_cell_num", &self.live_cell_num)
            .field("max_population", &self.max_population)
            .finish_non_exhaustive()
    }
}

fn seed_contains(seed: &[(i32, i32)], x: usize, y: usize) -> bool {
    seed.iter()
        .any(|&(sx, sy)| sx as i64 == x as i64 && sy as i64 == y as i64)
}

fn bounding_box(positions: &[(usize, usize)]) -> Option<(usize, usize, usize, usize)> {
    let (&(x0, y0), rest) = positions.split_first()?;
    Some(rest.iter().fold(
        (x0, x0, y0, y0),
        |(min_x, max_x, min_y, max_y), &(x, y)| {
            (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
        },
    ))
}
