use std::collections::HashSet;

use clap::ValueEnum;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    grid::{Grid, Position},
    guard::GuardState,
    patrol::{Outcome, PatrolSimulator, VisitedSet},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchMode {
    /// Resume each candidate just before the new obstacle, seeded with the
    /// states seen so far on the baseline path.
    #[default]
    Sequential,
    /// Same as sequential, candidates are checked on rayon's thread pool.
    Parallel,
    /// Patrol every candidate grid from the start state with nothing seeded.
    Unseeded,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    obstacle: Position,
    // Baseline state right before the guard first steps onto `obstacle`.
    resume: GuardState,
    // Number of leading path states known to lead to `resume`.
    seed_len: usize,
}

/// Cells on the baseline path, in order of first visit, skipping the start.
fn candidates(start: GuardState, path: &[GuardState]) -> Vec<Candidate> {
    let mut tried = HashSet::from([start.position()]);
    path.windows(2)
        .enumerate()
        .filter_map(|(ind, pair)| {
            let obstacle = pair[1].position();
            tried.insert(obstacle).then_some(Candidate {
                obstacle,
                resume: pair[0],
                seed_len: ind,
            })
        })
        .collect()
}

fn loops_with_obstacle(
    grid: &Grid,
    obstacle: Position,
    start: GuardState,
    seed: VisitedSet,
) -> bool {
    let grid = grid.with_obstacle(obstacle);
    let outcome = PatrolSimulator::with_seed(&grid, start, seed).run_to_end();
    trace!(%obstacle, ?outcome, "checked candidate obstacle");

    outcome == Outcome::Looped
}

/// Positions where one extra obstacle traps the guard in a loop, in the order
/// the baseline `path` (as produced by [`crate::patrol()`]) first reaches them.
pub fn find_loop_obstacles(
    grid: &Grid,
    start: GuardState,
    path: &[GuardState],
    mode: SearchMode,
) -> Vec<Position> {
    let candidates = candidates(start, path);
    let found = match mode {
        SearchMode::Sequential => {
            let mut seed = VisitedSet::new();
            let mut seeded_n = 0;
            let mut found = Vec::new();
            for candidate in &candidates {
                seed.extend(&path[seeded_n..candidate.seed_len]);
                seeded_n = candidate.seed_len;
                if loops_with_obstacle(grid, candidate.obstacle, candidate.resume, seed.clone()) {
                    found.push(candidate.obstacle);
                }
            }

            found
        }
        SearchMode::Parallel => candidates
            .par_iter()
            .filter(|candidate| {
                let seed = path[..candidate.seed_len].iter().copied().collect();
                loops_with_obstacle(grid, candidate.obstacle, candidate.resume, seed)
            })
            .map(|candidate| candidate.obstacle)
            .collect(),
        SearchMode::Unseeded => candidates
            .iter()
            .filter(|candidate| {
                loops_with_obstacle(grid, candidate.obstacle, start, VisitedSet::new())
            })
            .map(|candidate| candidate.obstacle)
            .collect(),
    };

    debug!(
        ?mode,
        candidates = candidates.len(),
        loops = found.len(),
        "obstacle search finished"
    );
    found
}

pub fn count_loop_obstacles(
    grid: &Grid,
    start: GuardState,
    path: &[GuardState],
    mode: SearchMode,
) -> usize {
    find_loop_obstacles(grid, start, path, mode).len()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        grid::Cell,
        guard::Direction,
        patrol::patrol,
        test_support::{arb_layout, layout, SAMPLE},
    };

    const MODES: [SearchMode; 3] = [
        SearchMode::Sequential,
        SearchMode::Parallel,
        SearchMode::Unseeded,
    ];

    #[test]
    fn sample_has_six_loop_obstacles() {
        let (grid, guard) = layout(SAMPLE);
        let report = patrol(&grid, guard);
        for mode in MODES {
            assert_eq!(count_loop_obstacles(&grid, guard, report.path(), mode), 6);
        }

        let found = find_loop_obstacles(&grid, guard, report.path(), SearchMode::Sequential)
            .into_iter()
            .collect::<HashSet<_>>();
        let expected = [(3, 6), (6, 7), (7, 7), (1, 8), (3, 8), (7, 9)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y))
            .collect::<HashSet<_>>();
        assert_eq!(found, expected);
        assert!(!grid.is_obstacle(Position::new(3, 6)));
    }

    #[test]
    fn candidates_skip_start_and_repeats() {
        let (grid, guard) = layout(SAMPLE);
        let report = patrol(&grid, guard);
        let candidates = candidates(guard, report.path());

        assert_eq!(candidates.len(), report.distinct_positions() - 1);
        assert!(candidates.iter().all(|c| c.obstacle != guard.position()));
        assert_eq!(candidates[0].resume, guard);
        assert_eq!(candidates[0].seed_len, 0);
        assert_eq!(candidates[0].obstacle, Position::new(4, 5));
    }

    #[test]
    fn single_cell_has_no_candidates() {
        let grid = Grid::from_rows(vec![vec![Cell::Free]]).unwrap();
        let guard = GuardState::new(Position::new(0, 0), Direction::Left);
        let report = patrol(&grid, guard);
        assert_eq!(
            count_loop_obstacles(&grid, guard, report.path(), SearchMode::Sequential),
            0
        );
    }

    #[test]
    fn boxed_in_guard_has_no_candidates() {
        let (grid, guard) = layout(".#.\n#^#\n.#.");
        let report = patrol(&grid, guard);
        for mode in MODES {
            assert_eq!(count_loop_obstacles(&grid, guard, report.path(), mode), 0);
        }
    }

    #[test]
    fn straight_corridor_never_loops() {
        let (grid, guard) = layout(".....\n..^..\n.....");
        let report = patrol(&grid, guard);
        assert_eq!(report.path().len(), 2);
        assert!(
            find_loop_obstacles(&grid, guard, report.path(), SearchMode::Sequential).is_empty()
        );
    }

    proptest! {
        #[test]
        fn seeded_verdicts_match_fresh_runs((grid, guard) in arb_layout()) {
            let report = patrol(&grid, guard);
            let path = report.path();
            let sequential = find_loop_obstacles(&grid, guard, path, SearchMode::Sequential);
            let parallel = find_loop_obstacles(&grid, guard, path, SearchMode::Parallel);
            let unseeded = find_loop_obstacles(&grid, guard, path, SearchMode::Unseeded);

            prop_assert_eq!(&sequential, &unseeded);
            prop_assert_eq!(&parallel, &unseeded);
        }

        #[test]
        fn search_never_mutates_grid((grid, guard) in arb_layout()) {
            let before = grid.clone();
            let report = patrol(&grid, guard);
            find_loop_obstacles(&grid, guard, report.path(), SearchMode::Sequential);
            prop_assert_eq!(grid, before);
        }
    }
}
