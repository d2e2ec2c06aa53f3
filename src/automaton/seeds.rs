//! Seed library: named starting patterns and generated line seeds.
//!
//! A seed is a list of `(x, y)` coordinates of initially live cells. Seeds are
//! signed so that coordinates outside the grid can be carried around; they are
//! dropped when the grid is built.

use serde::{Deserialize, Serialize};

pub type Seed = Vec<(i32, i32)>;

const GOSPER: &[(i32, i32)] = &[
    (2, 6), (2, 7), (3, 6), (3, 7), (12, 6), (12, 7), (12, 8), (13, 5), (13, 9),
    (14, 4), (14, 10), (15, 4), (15, 10), (16, 7), (17, 5), (17, 9), (18, 6),
    (18, 7), (18, 8), (19, 7), (22, 4), (22, 5), (22, 6), (23, 4), (23, 5),
    (23, 6), (24, 3), (24, 7), (26, 2), (26, 3), (26, 7), (26, 8), (36, 4),
    (36, 5), (37, 4), (37, 5),
];

const SWORD: &[(i32, i32)] = &[
    (26, 10), (26, 11), (26, 12), (26, 13), (26, 14), (26, 15), (26, 16),
    (26, 18), (26, 19), (26, 20), (26, 23), (26, 24), (26, 25), (26, 30),
    (26, 31), (26, 32), (26, 33), (26, 34), (26, 35),
];

const DIEHARD: &[(i32, i32)] = &[(8, 2), (2, 3), (3, 3), (3, 4), (7, 4), (8, 4), (9, 4)];

const F_PENTOMINO: &[(i32, i32)] = &[(3, 2), (4, 2), (2, 3), (3, 3), (3, 4)];

const RORSCHACH: &[(i32, i32)] = &[
    (43, 49), (44, 49), (44, 48), (43, 48), (45, 47), (46, 48), (46, 49),
    (47, 49), (47, 48),
];

const GLIDER: &[(i32, i32)] = &[(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)];

const BLINKER: &[(i32, i32)] = &[(1, 2), (2, 2), (3, 2)];

const BLOCK: &[(i32, i32)] = &[(1, 1), (2, 1), (1, 2), (2, 2)];

const TOAD: &[(i32, i32)] = &[(2, 2), (3, 2), (4, 2), (1, 3), (2, 3), (3, 3)];

const BEACON: &[(i32, i32)] = &[(1, 1), (2, 1), (1, 2), (4, 3), (3, 4), (4, 4)];

const LWSS: &[(i32, i32)] = &[
    (2, 1), (5, 1), (1, 2), (1, 3), (5, 3), (1, 4), (2, 4), (3, 4), (4, 4),
];

const ACORN: &[(i32, i32)] = &[(2, 1), (4, 2), (1, 3), (2, 3), (5, 3), (6, 3), (7, 3)];

const PULSAR: &[(i32, i32)] = &[
    (4, 2), (5, 2), (6, 2), (10, 2), (11, 2), (12, 2),
    (2, 4), (7, 4), (9, 4), (14, 4),
    (2, 5), (7, 5), (9, 5), (14, 5),
    (2, 6), (7, 6), (9, 6), (14, 6),
    (4, 7), (5, 7), (6, 7), (10, 7), (11, 7), (12, 7),
    (4, 9), (5, 9), (6, 9), (10, 9), (11, 9), (12, 9),
    (2, 10), (7, 10), (9, 10), (14, 10),
    (2, 11), (7, 11), (9, 11), (14, 11),
    (2, 12), (7, 12), (9, 12), (14, 12),
    (4, 14), (5, 14), (6, 14), (10, 14), (11, 14), (12, 14),
];

const LIBRARY: &[(&str, &[(i32, i32)])] = &[
    ("gosper", GOSPER),
    ("sword", SWORD),
    ("diehard", DIEHARD),
    ("fpentomino", F_PENTOMINO),
    ("rorschach", RORSCHACH),
    ("glider", GLIDER),
    ("blinker", BLINKER),
    ("block", BLOCK),
    ("toad", TOAD),
    ("beacon", BEACON),
    ("pulsar", PULSAR),
    ("lwss", LWSS),
    ("spaceship", LWSS),
    ("acorn", ACORN),
];

/// Looks up a named pattern. Names are matched case-insensitively.
pub fn named(name: &str) -> Option<&'static [(i32, i32)]> {
    LIBRARY
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, cells)| *cells)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    LIBRARY.iter().map(|(key, _)| *key)
}

/// A full row (`vertical == false`) or column through the grid's midline.
pub fn line_seed(width: usize, height: usize, vertical: bool) -> Seed {
    if vertical {
        let x = (width / 2) as i32;
        (0..height as i32).map(|y| (x, y)).collect()
    } else {
        let y = (height / 2) as i32;
        (0..width as i32).map(|x| (x, y)).collect()
    }
}

/// Where an automaton's initial live cells come from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    #[default]
    Empty,
    Named(String),
    Coordinates(Seed),
    Line { vertical: bool },
}

impl From<&str> for SeedSource {
    fn from(name: &str) -> Self {
        SeedSource::Named(name.to_string())
    }
}

impl From<Seed> for SeedSource {
    fn from(cells: Seed) -> Self {
        SeedSource::Coordinates(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::{line_seed, named, names};
    use std::collections::HashSet;

    #[test]
    fn library_sizes() {
        assert_eq!(named("gosper").map(<[_]>::len), Some(36));
        assert_eq!(named("diehard").map(<[_]>::len), Some(7));
        assert_eq!(named("pulsar").map(<[_]>::len), Some(48));
        assert_eq!(named("Glider").map(<[_]>::len), Some(5));
        assert!(named("nope").is_none());
    }

    #[test]
    fn every_named_seed_is_non_empty_and_duplicate_free() {
        for name in names() {
            let cells = named(name).expect("listed name resolves");
            assert!(!cells.is_empty(), "{name} is empty");
            let unique: HashSet<_> = cells.iter().collect();
            assert_eq!(unique.len(), cells.len(), "{name} has duplicates");
        }
    }

    #[test]
    fn line_seed_spans_the_grid() {
        let row = line_seed(7, 4, false);
        assert_eq!(row.len(), 7);
        assert!(row.iter().all(|&(_, y)| y == 2));
        assert_eq!(row.first(), Some(&(0, 2)));
        assert_eq!(row.last(), Some(&(6, 2)));

        let column = line_seed(7, 4, true);
        assert_eq!(column.len(), 4);
        assert!(column.iter().all(|&(x, _)| x == 3));
        assert_eq!(column.last(), Some(&(3, 3)));
    }
}
