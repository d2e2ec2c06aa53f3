#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use life_automaton::automaton::seeds;
use life_automaton::render::{AsciiCanvas, RenderStyle, render_frame};
use life_automaton::storage::{JsonFileStore, MemoryStore, SeedStore};
use life_automaton::{BoundaryMode, Direction, Driver, PlayerSettings, TickOutcome};
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Parser, Debug)]
#[command(name = "life-automaton", about = "Conway's Game of Life on a fixed toroidal grid")]
struct Args {
    /// Generations per second.
    #[arg(long)]
    fps: Option<u32>,
    #[arg(long)]
    width: Option<i64>,
    #[arg(long)]
    height: Option<i64>,
    /// Pixel size of a cell (reported to renderers).
    #[arg(long)]
    unit: Option<u32>,
    /// Named seed to start from (see --list-seeds).
    #[arg(long)]
    seed: Option<String>,
    /// Start from random clumps instead of a named seed.
    #[arg(long)]
    random: bool,
    #[arg(long)]
    max_clumps: Option<usize>,
    #[arg(long)]
    clump_size: Option<usize>,
    /// Start from a horizontal (`h`) or vertical (`v`) line.
    #[arg(long, value_parser = ["h", "v"])]
    line: Option<String>,
    /// Center the live cells before playing.
    #[arg(long)]
    center: bool,
    /// Shift the live cells once before playing, e.g. `left` or `belowRight`.
    #[arg(long = "move")]
    shift: Vec<String>,
    #[arg(long)]
    style: Option<String>,
    #[arg(long)]
    boundary: Option<BoundaryMode>,
    /// Stop after this many generations.
    #[arg(long, default_value_t = 200)]
    generations: u64,
    /// JSON file for saved seed and settings.
    #[arg(long)]
    store: Option<PathBuf>,
    /// Start from the seed saved in --store.
    #[arg(long)]
    restore: bool,
    /// Save the final state to --store.
    #[arg(long)]
    save: bool,
    /// Seed for --random, for reproducible runs.
    #[arg(long)]
    rng_seed: Option<u64>,
    /// Only log stats; skip drawing frames.
    #[arg(long)]
    quiet: bool,
    #[arg(long)]
    list_seeds: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<PlayerSettings> {
        let mut settings = PlayerSettings::default();
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(unit) = self.unit {
            settings.unit = unit;
        }
        if let Some(name) = &self.seed {
            settings.pre_seed = name.clone();
        }
        if let Some(n) = self.max_clumps {
            settings.max_clumps = n;
        }
        if let Some(n) = self.clump_size {
            settings.clump_size = n;
        }
        if let Some(style) = &self.style {
            settings.render_style = style.parse::<RenderStyle>()?;
        }
        if let Some(boundary) = self.boundary {
            settings.boundary = boundary;
        }
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.list_seeds {
        for name in seeds::names() {
            println!("{name}");
        }
        return Ok(());
    }
    if (args.restore || args.save) && args.store.is_none() {
        bail!("--restore and --save require --store <path>");
    }

    let settings = args.settings()?;
    let store: Box<dyn SeedStore> = match &args.store {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };
    let mut driver = Driver::new(settings, store).context("building automaton")?;

    if args.restore {
        let found = driver.restore().context("restoring saved seed")?;
        if !found {
            bail!("no saved seed in the store");
        }
    } else if let Some(line) = &args.line {
        driver.line(line == "v")?;
    } else if args.random {
        let count = match args.rng_seed {
            Some(seed) => driver.random(&mut rand::rngs::StdRng::seed_from_u64(seed))?,
            None => driver.random(&mut rand::rng())?,
        };
        info!(population = count, "random seed");
    }

    if args.center {
        driver.center()?;
    }
    for name in &args.shift {
        let direction: Direction = name.parse()?;
        driver.move_clump(direction);
    }

    run(&mut driver, &args)?;

    if args.save {
        driver.save().context("saving seed")?;
    }
    Ok(())
}

fn run(driver: &mut Driver, args: &Args) -> anyhow::Result<()> {
    let mut canvas = AsciiCanvas::new(driver.settings().render_style);
    let mut stdout = std::io::stdout().lock();
    let interval = driver.frame_interval();

    driver.start();
    for _ in 0..args.generations {
        let outcome = driver.tick();
        let stats = match outcome {
            TickOutcome::Paused => break,
            TickOutcome::Advanced(stats) | TickOutcome::Halted(stats) => stats,
        };

        if !args.quiet {
            render_frame(driver.automaton(), &mut canvas);
            write!(stdout, "{CLEAR_SCREEN}{canvas}")?;
            writeln!(
                stdout,
                "gen {} | pop {} | max {} | oldest {} | {}",
                driver.automaton().generation(),
                stats.live_cell_count,
                stats.max_population,
                stats.oldest.age,
                stats.trend
            )?;
            stdout.flush()?;
            std::thread::sleep(interval);
        }

        if let TickOutcome::Halted(_) = outcome {
            break;
        }
    }
    driver.stop();

    let automaton = driver.automaton();
    info!(
        generation = automaton.generation(),
        population = automaton.seed().len(),
        max_population = automaton.max_population(),
        elapsed_ms = driver.elapsed().as_millis() as u64,
        "finished"
    );
    Ok(())
}
