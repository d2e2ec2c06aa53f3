//! Property-based checks for the automaton.
//!
//! Every step is compared against a set-based reference stepper, and the
//! spatial transforms are checked against their closed-form descriptions.

use std::collections::HashSet;

use life_automaton::{Automaton, AutomatonConfig, BoundaryMode, Direction};
use proptest::prelude::*;

fn reference_step(
    cells: &HashSet<(i32, i32)>,
    w: i32,
    h: i32,
    wrap: bool,
) -> HashSet<(i32, i32)> {
    let mut next = HashSet::new();
    for x in 0..w {
        for y in 0..h {
            let mut neighbors = 0;
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x + dx, y + dy);
                    let n = if wrap {
                        (nx.rem_euclid(w), ny.rem_euclid(h))
                    } else {
                        (nx, ny)
                    };
                    if cells.contains(&n) {
                        neighbors += 1;
                    }
                }
            }
            let alive = cells.contains(&(x, y));
            if neighbors == 3 || (alive && neighbors == 2) {
                next.insert((x, y));
            }
        }
    }
    next
}

fn live_set(engine: &Automaton) -> HashSet<(i32, i32)> {
    engine.seed().into_iter().collect()
}

fn in_grid(cells: &[(i32, i32)], w: i32, h: i32) -> HashSet<(i32, i32)> {
    cells
        .iter()
        .copied()
        .filter(|&(x, y)| (0..w).contains(&x) && (0..h).contains(&y))
        .collect()
}

fn arb_board() -> impl Strategy<Value = (i32, i32, Vec<(i32, i32)>)> {
    (1i32..20, 1i32..20).prop_flat_map(|(w, h)| {
        let cell = (-2..w + 2, -2..h + 2);
        (Just(w), Just(h), prop::collection::vec(cell, 0..80))
    })
}

fn arb_boundary() -> impl Strategy<Value = BoundaryMode> {
    prop_oneof![Just(BoundaryMode::Toroidal), Just(BoundaryMode::DeadBorder)]
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn build(w: i32, h: i32, cells: Vec<(i32, i32)>, boundary: BoundaryMode) -> Automaton {
    let config = AutomatonConfig::new(w as i64, h as i64).boundary(boundary);
    Automaton::with_config(config, cells).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Each generation equals the reference rule applied to the previous one.
    #[test]
    fn prop_update_matches_reference((w, h, cells) in arb_board(), boundary in arb_boundary()) {
        let wrap = boundary == BoundaryMode::Toroidal;
        let mut engine = build(w, h, cells.clone(), boundary);
        let mut expected = in_grid(&cells, w, h);

        for generation in 0..6 {
            prop_assert_eq!(
                live_set(&engine),
                expected.clone(),
                "diverged at generation {}",
                generation
            );
            engine.update();
            expected = reference_step(&expected, w, h, wrap);
        }
    }

    /// The seed of a grid is exactly its in-range input cells, and rebuilding
    /// from it reproduces the grid.
    #[test]
    fn prop_seed_round_trip((w, h, cells) in arb_board()) {
        let engine = build(w, h, cells.clone(), BoundaryMode::Toroidal);
        let seed = engine.seed();
        prop_assert_eq!(seed.iter().copied().collect::<HashSet<_>>(), in_grid(&cells, w, h));
        prop_assert_eq!(seed.len(), in_grid(&cells, w, h).len());

        let rebuilt = build(w, h, seed.clone(), BoundaryMode::Toroidal);
        prop_assert_eq!(rebuilt.seed(), seed);
    }

    /// After an update no cell is left carrying a flag.
    #[test]
    fn prop_flags_cleared_after_update((w, h, cells) in arb_board(), boundary in arb_boundary()) {
        let mut engine = build(w, h, cells, boundary);
        engine.step_n(3);
        prop_assert!(engine
            .cells()
            .iter()
            .all(|c| !c.flagged_for_death() && !c.flagged_for_revive()));
    }

    /// Centering keeps the shape, lands inside the grid, and is idempotent.
    #[test]
    fn prop_center_is_idempotent((w, h, cells) in arb_board()) {
        let mut engine = build(w, h, cells, BoundaryMode::Toroidal);
        let before = engine.seed();
        prop_assume!(!before.is_empty());

        engine.center().unwrap();
        let once = live_set(&engine);
        prop_assert_eq!(once.len(), before.len());

        let min_x = before.iter().map(|c| c.0).min().unwrap();
        let min_y = before.iter().map(|c| c.1).min().unwrap();
        let new_min_x = once.iter().map(|c| c.0).min().unwrap();
        let new_min_y = once.iter().map(|c| c.1).min().unwrap();
        let shifted: HashSet<(i32, i32)> = before
            .iter()
            .map(|&(x, y)| (x - min_x + new_min_x, y - min_y + new_min_y))
            .collect();
        prop_assert_eq!(&shifted, &once);

        engine.center().unwrap();
        prop_assert_eq!(live_set(&engine), once);
    }

    /// Moving shifts every cell by the direction offset and drops the ones
    /// that leave the grid, regardless of boundary mode.
    #[test]
    fn prop_move_clump_is_a_bounded_shift(
        (w, h, cells) in arb_board(),
        boundary in arb_boundary(),
        direction in arb_direction(),
    ) {
        let mut engine = build(w, h, cells, boundary);
        let before = engine.seed();
        let (dx, dy) = direction.offset();
        let expected = in_grid(
            &before
                .iter()
                .map(|&(x, y)| (x + dx as i32, y + dy as i32))
                .collect::<Vec<_>>(),
            w,
            h,
        );

        engine.move_clump(direction);
        prop_assert_eq!(live_set(&engine), expected);
        prop_assert!(engine.live_cells().iter().all(|c| c.age() == 0));
    }

    /// Direction names parse back to the same direction, and reversing twice
    /// is the identity.
    #[test]
    fn prop_direction_names_and_reverse(direction in arb_direction()) {
        prop_assert_eq!(direction.name().parse::<Direction>().unwrap(), direction);
        prop_assert_eq!(direction.reverse().reverse(), direction);
        let (dx, dy) = direction.offset();
        prop_assert_eq!(direction.reverse().offset(), (-dx, -dy));
    }
}
