use std::path::PathBuf;

use clap::Parser;

pub mod grid;
pub mod guard;
pub mod logging;
pub mod map;
pub mod patrol;
pub mod search;

#[cfg(test)]
mod test_support;

pub use grid::{Cell, Grid, Position};
pub use guard::{Direction, GuardState};
pub use map::{parse_map, read_map, MapBuilder};
pub use patrol::{patrol, Outcome, PatrolReport, PatrolSimulator, Step, VisitedSet};
pub use search::{count_loop_obstacles, find_loop_obstacles, SearchMode};

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Expect {expected} column(s) in row {row}, given {found}.")]
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Found multiple guards({0}, {1}) in given laboratory, expect one only.")]
    MultipleGuards(GuardState, GuardState),
    #[error("Invalid character({c}) at row {row}, column {col} in text of laboratory layout.")]
    InvalidChar { c: char, row: usize, col: usize },
    #[error("There's no guard in given laboratory, but expect one.")]
    NoGuard,
    #[error("Given laboratory has no tiles.")]
    EmptyMap,
}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

#[derive(Debug, Parser)]
pub struct SearchCLIArgs {
    pub input_path: PathBuf,
    /// How candidate obstacles are evaluated.
    #[arg(long, value_enum, default_value_t = SearchMode::Sequential)]
    pub mode: SearchMode,
}
