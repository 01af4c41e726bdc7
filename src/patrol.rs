use std::collections::HashSet;

use tracing::debug;

use crate::{grid::Grid, guard::GuardState};

pub type VisitedSet = HashSet<GuardState>;

/// How a patrol ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The guard walked off the edge of the laboratory.
    Exited,
    /// A (position, direction) pair came up twice, the guard walks forever.
    Looped,
}

/// One element produced by [`PatrolSimulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The guard occupies a new cell. The first step is the start state,
    /// in-place turns are never reported.
    Visit(GuardState),
    Exited,
    Looped,
}

impl Step {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Step::Visit(_) => None,
            Step::Exited => Some(Outcome::Exited),
            Step::Looped => Some(Outcome::Looped),
        }
    }
}

/// Walks a guard through a grid: step forward, turn right when blocked.
///
/// The iterator yields every [`Step::Visit`] in order and finishes with
/// exactly one terminal step, after which it yields `None`. It can't be
/// restarted, build a new simulator to patrol again.
#[derive(Debug)]
pub struct PatrolSimulator<'a> {
    grid: &'a Grid,
    cur_guard: GuardState,
    visited: VisitedSet,
    started: bool,
    outcome: Option<Outcome>,
}

impl<'a> PatrolSimulator<'a> {
    pub fn new(grid: &'a Grid, start: GuardState) -> Self {
        Self::with_seed(grid, start, VisitedSet::new())
    }

    /// Treat every state in `seed` as already seen, reaching one of them
    /// counts as a loop.
    pub fn with_seed(grid: &'a Grid, start: GuardState, seed: VisitedSet) -> Self {
        debug_assert!(start.in_bounds(grid));
        Self {
            grid,
            cur_guard: start,
            visited: seed,
            started: false,
            outcome: None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Drain the remaining steps and return how the patrol ended.
    pub fn run_to_end(mut self) -> Outcome {
        self.by_ref().for_each(drop);
        match self.outcome {
            Some(outcome) => outcome,
            None => unreachable!("patrol finished without a terminal step"),
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.outcome = Some(outcome);
        match outcome {
            Outcome::Exited => Step::Exited,
            Outcome::Looped => Step::Looped,
        }
    }
}

impl Iterator for PatrolSimulator<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.outcome.is_some() {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(Step::Visit(self.cur_guard));
        }

        loop {
            if !self.visited.insert(self.cur_guard) {
                return Some(self.finish(Outcome::Looped));
            }

            let next_guard = self.cur_guard.moved_to(self.cur_guard.advance());
            if !next_guard.in_bounds(self.grid) {
                return Some(self.finish(Outcome::Exited));
            }

            if self.grid.is_obstacle(next_guard.position()) {
                self.cur_guard = self.cur_guard.turn();
                continue;
            }

            self.cur_guard = next_guard;
            return Some(Step::Visit(self.cur_guard));
        }
    }
}

/// The baseline patrol from the loaded start state.
#[derive(Debug, Clone)]
pub struct PatrolReport {
    path: Vec<GuardState>,
    outcome: Outcome,
}

impl PatrolReport {
    /// Visited states in order, starting with the start state.
    pub fn path(&self) -> &[GuardState] {
        &self.path
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn start(&self) -> GuardState {
        self.path[0]
    }

    pub fn distinct_positions(&self) -> usize {
        self.path
            .iter()
            .map(|guard| guard.position())
            .collect::<HashSet<_>>()
            .len()
    }
}

pub fn patrol(grid: &Grid, start: GuardState) -> PatrolReport {
    let mut sim = PatrolSimulator::new(grid, start);
    let path = sim
        .by_ref()
        .filter_map(|step| match step {
            Step::Visit(guard) => Some(guard),
            Step::Exited | Step::Looped => None,
        })
        .collect::<Vec<_>>();
    let outcome = sim.run_to_end();

    debug!(?outcome, steps = path.len(), "baseline patrol finished");
    PatrolReport { path, outcome }
}
