//! Generation-step timing across grid sizes and densities.
//!
//! Use with `--release` for meaningful results. Compare output across commits
//! to detect regressions.

use life_automaton::{Automaton, AutomatonConfig, BoundaryMode};
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;

struct Scenario {
    name: &'static str,
    size: i64,
    density: f64,
    warmup: u64,
    iters: u64,
    seed: u64,
}

fn seed_board(size: i64, density: f64, seed: u64, boundary: BoundaryMode) -> Automaton {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut cells = Vec::new();
    for x in 0..size as i32 {
        for y in 0..size as i32 {
            if rng.random::<f64>() < density {
                cells.push((x, y));
            }
        }
    }
    let config = AutomatonConfig::new(size, size).boundary(boundary);
    match Automaton::with_config(config, cells) {
        Ok(automaton) => automaton,
        Err(err) => panic!("scenario grid rejected: {err}"),
    }
}

fn run_scenario(s: &Scenario, boundary: BoundaryMode) -> (f64, usize) {
    let mut engine = seed_board(s.size, s.density, s.seed, boundary);

    if s.warmup > 0 {
        engine.step_n(s.warmup);
    }

    let start = Instant::now();
    engine.step_n(s.iters);
    let elapsed = start.elapsed();
    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let pop = engine.live_cell_count();
    (total_ms, pop)
}

fn main() {
    let scenarios = [
        Scenario {
            name: "small-sparse",
            size: 256,
            density: 0.10,
            warmup: 3,
            iters: 500,
            seed: 0xA1,
        },
        Scenario {
            name: "small-dense",
            size: 256,
            density: 0.42,
            warmup: 3,
            iters: 500,
            seed: 0xB2,
        },
        Scenario {
            name: "medium-sparse",
            size: 512,
            density: 0.10,
            warmup: 3,
            iters: 200,
            seed: 0xC3,
        },
        Scenario {
            name: "medium-dense",
            size: 512,
            density: 0.42,
            warmup: 3,
            iters: 200,
            seed: 0xD4,
        },
        Scenario {
            name: "large-dense",
            size: 1024,
            density: 0.42,
            warmup: 2,
            iters: 50,
            seed: 0xE5,
        },
    ];

    println!(
        "{:<20} {:>12} {:>10} {:>12} {:>12} {:>10}",
        "Scenario", "Boundary", "Iters", "Total(ms)", "Avg(ms)", "Pop"
    );
    println!("{}", "-".repeat(80));

    for boundary in [BoundaryMode::Toroidal, BoundaryMode::DeadBorder] {
        for s in &scenarios {
            let (total_ms, pop) = run_scenario(s, boundary);
            let avg_ms = total_ms / s.iters as f64;
            println!(
                "{:<20} {:>12} {:>10} {:>12.3} {:>12.6} {:>10}",
                s.name,
                boundary.to_string(),
                s.iters,
                total_ms,
                avg_ms,
                pop
            );
        }
        println!();
    }
}
