//! Interactive session around one automaton.
//!
//! The driver owns the automaton, the player settings and a seed store, and
//! exposes the commands a UI binds to keys or buttons. It never sleeps or
//! spawns anything: whoever hosts it calls `tick()` every `frame_interval()`.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::automaton::{Automaton, AutomatonConfig, BoundaryMode, Direction, SeedSource, Stats};
use crate::error::{LifeError, Result};
use crate::render::RenderStyle;
use crate::storage::{self, SeedStore};

/// Playback stops on its own once the population falls below this.
pub const MIN_LIVE_CELLS: usize = 3;

/// User-editable knobs, persisted alongside the seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub fps: u32,
    pub width: i64,
    pub height: i64,
    pub unit: u32,
    pub max_clumps: usize,
    pub clump_size: usize,
    pub pre_seed: String,
    pub render_style: RenderStyle,
    pub boundary: BoundaryMode,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        let config = AutomatonConfig::default();
        Self {
            fps: 10,
            width: config.width,
            height: config.height,
            unit: config.cell_unit,
            max_clumps: 40,
            clump_size: 30,
            pre_seed: "gosper".to_string(),
            render_style: RenderStyle::default(),
            boundary: config.boundary,
        }
    }
}

impl PlayerSettings {
    pub fn automaton_config(&self) -> AutomatonConfig {
        AutomatonConfig::new(self.width, self.height)
            .cell_unit(self.unit)
            .boundary(self.boundary)
    }

    /// Time between two ticks at the configured rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened.
    Paused,
    Advanced(Stats),
    /// Advanced, then stopped because the population dropped below
    /// `MIN_LIVE_CELLS`.
    Halted(Stats),
}

pub struct Driver {
    automaton: Automaton,
    settings: PlayerSettings,
    store: Box<dyn SeedStore>,
    playing: bool,
    /// Playback state to resume once a click-drag edit ends.
    was_playing: bool,
    traced: Vec<(usize, usize)>,
    /// Ticks since the last reset.
    frames: u64,
}

impl Driver {
    pub fn new(settings: PlayerSettings, store: Box<dyn SeedStore>) -> Result<Self> {
        let automaton = Automaton::with_config(
            settings.automaton_config(),
            SeedSource::Named(settings.pre_seed.clone()),
        )?;
        info!(
            width = automaton.width(),
            height = automaton.height(),
            seed = %settings.pre_seed,
            "driver ready"
        );
        Ok(Self {
            automaton,
            settings,
            store,
            playing: false,
            was_playing: false,
            traced: Vec::new(),
            frames: 0,
        })
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn automaton_mut(&mut self) -> &mut Automaton {
        &mut self.automaton
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame_interval(&self) -> Duration {
        self.settings.frame_interval()
    }

    /// Simulated time since the last reset at the configured frame rate.
    pub fn elapsed(&self) -> Duration {
        self.frame_interval() * self.frames.min(u32::MAX as u64) as u32
    }

    fn rebuild(&mut self, source: SeedSource) -> Result<()> {
        self.automaton = Automaton::with_config(self.settings.automaton_config(), source)?;
        self.frames = 0;
        Ok(())
    }

    pub fn start(&mut self) {
        if !self.playing {
            info!(generation = self.automaton.generation(), "play");
        }
        self.playing = true;
    }

    pub fn stop(&mut self) {
        if self.playing {
            info!(generation = self.automaton.generation(), "pause");
        }
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Run one generation if playing.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Paused;
        }
        self.automaton.update();
        self.frames += 1;
        let count = self.automaton.live_cell_count();
        let stats = self.automaton.stats(count);
        if count < MIN_LIVE_CELLS {
            info!(population = count, "population collapsed, stopping");
            self.playing = false;
            TickOutcome::Halted(stats)
        } else {
            TickOutcome::Advanced(stats)
        }
    }

    /// Rebuild from the configured named seed. Returns the live count.
    pub fn reset(&mut self) -> Result<usize> {
        self.stop();
        self.rebuild(SeedSource::Named(self.settings.pre_seed.clone()))?;
        Ok(self.automaton.live_cell_count())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.stop();
        self.rebuild(SeedSource::Empty)
    }

    /// Fresh grid scattered with random clumps. Returns the live count.
    pub fn random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        self.stop();
        self.rebuild(SeedSource::Empty)?;
        self.automaton
            .random_seed(self.settings.max_clumps, self.settings.clump_size, rng);
        Ok(self.automaton.live_cell_count())
    }

    /// Switch to another named seed and rebuild.
    pub fn pre_seed(&mut self, name: &str) -> Result<()> {
        self.stop();
        let automaton = Automaton::with_config(
            self.settings.automaton_config(),
            SeedSource::Named(name.to_string()),
        )?;
        self.settings.pre_seed = name.to_string();
        self.automaton = automaton;
        self.frames = 0;
        Ok(())
    }

    /// Replace the settings. The current live cells carry over into a grid
    /// of the new size; cells outside it are lost.
    pub fn apply_settings(&mut self, settings: PlayerSettings) -> Result<usize> {
        let seed = self.automaton.seed();
        let automaton = Automaton::with_config(settings.automaton_config(), seed)?;
        self.settings = settings;
        self.automaton = automaton;
        self.frames = 0;
        Ok(self.automaton.live_cell_count())
    }

    /// A full row or column through the middle, centered.
    pub fn line(&mut self, vertical: bool) -> Result<()> {
        self.stop();
        self.rebuild(SeedSource::Line { vertical })?;
        self.automaton.center()?;
        Ok(())
    }

    pub fn move_clump(&mut self, direction: Direction) {
        self.automaton.move_clump(direction);
    }

    /// Center the live cells. Returns `false` when there was nothing to move.
    pub fn center(&mut self) -> Result<bool> {
        match self.automaton.center() {
            Ok(_) => Ok(true),
            Err(LifeError::NoLiveCells) => {
                warn!("nothing to center");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Grid coordinates under a pixel position.
    pub fn pixel_to_cell(&self, px: i64, py: i64) -> (i64, i64) {
        let unit = self.automaton.unit() as i64;
        (px.div_euclid(unit), py.div_euclid(unit))
    }

    /// Start of a click-drag edit: pause, flip the cell under the pointer.
    /// Returns the cell's new state.
    pub fn toggle_cell(&mut self, px: i64, py: i64) -> Result<bool> {
        let (x, y) = self.pixel_to_cell(px, py);
        let cell = self.automaton.get_cell_mut(x, y)?;
        let alive = cell.toggle().is_alive();
        let position = cell.position();

        self.was_playing = self.playing;
        self.stop();
        self.traced.clear();
        self.traced.push(position);
        if alive {
            info!(x, y, "cell revived");
        }
        Ok(alive)
    }

    /// Drag continuation: revive each newly visited cell once.
    pub fn trace_cell(&mut self, px: i64, py: i64) -> Result<()> {
        let (x, y) = self.pixel_to_cell(px, py);
        let cell = self.automaton.get_cell_mut(x, y)?;
        let position = cell.position();
        if !self.traced.contains(&position) {
            cell.revive();
            self.traced.push(position);
        }
        Ok(())
    }

    /// End of a click-drag edit. Returns the live count.
    pub fn end_trace(&mut self) -> usize {
        self.traced.clear();
        if self.was_playing {
            self.start();
        }
        self.was_playing = false;
        self.automaton.live_cell_count()
    }

    /// Persist the current live cells and settings.
    pub fn save(&mut self) -> Result<()> {
        self.stop();
        let seed = self.automaton.seed();
        storage::save_seed(self.store.as_mut(), &seed)?;
        storage::save_settings(self.store.as_mut(), &self.settings)?;
        info!(cells = seed.len(), "saved");
        Ok(())
    }

    /// Load settings and seed from the store. Returns whether a seed was
    /// found. Nothing changes unless a seed is present and the grid it
    /// describes can be built; stored settings without a seed are ignored.
    pub fn restore(&mut self) -> Result<bool> {
        let settings = storage::load_settings(self.store.as_ref())?;
        let Some(seed) = storage::load_seed(self.store.as_ref())? else {
            return Ok(false);
        };
        let settings = settings.unwrap_or_else(|| self.settings.clone());
        let cells = seed.len();
        let automaton =
            Automaton::with_config(settings.automaton_config(), SeedSource::Coordinates(seed))?;

        self.stop();
        info!(cells, "restored");
        self.settings = settings;
        self.automaton = automaton;
        self.frames = 0;
        Ok(true)
    }
}
