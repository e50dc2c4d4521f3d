use std::rc::Rc;

use anyhow::Result;
use fxhash::FxHashSet;

use crate::board::{Board, Puzzle, EXIT_COL, EXIT_ROW, TARGET};
use crate::frontier::{Frontier, MinHeap, Stack};
use crate::state::SearchState;

/// Heuristic estimate of moves remaining. Must never overestimate for A* to
/// stay optimal.
pub type Heuristic = fn(&Board) -> u32;

/// Returned for boards with no target piece at all; larger than any real
/// anchor distance on the board, so such boards sort behind everything else
/// while the heuristic stays total.
pub const MAX_DISTANCE: u32 = 6;

/// True iff the target piece sits on the exit anchor.
pub fn is_goal(board: &Board) -> bool {
    EXIT_ROW + 1 < board.rows()
        && EXIT_COL + 1 < board.cols()
        && board.get(EXIT_ROW, EXIT_COL) == TARGET
        && board.get(EXIT_ROW, EXIT_COL + 1) == TARGET
        && board.get(EXIT_ROW + 1, EXIT_COL) == TARGET
        && board.get(EXIT_ROW + 1, EXIT_COL + 1) == TARGET
}

/// Manhattan distance from the target piece's top-left anchor to the exit
/// anchor. Each unit needs at least one slide, so this is admissible, and one
/// slide changes it by at most one, so it is consistent as well.
pub fn manhattan_distance(board: &Board) -> u32 {
    match board.find(TARGET) {
        Some((row, col)) => {
            let rows = (row as isize - EXIT_ROW as isize).unsigned_abs();
            let cols = (col as isize - EXIT_COL as isize).unsigned_abs();
            (rows + cols) as u32
        }
        None => MAX_DISTANCE,
    }
}

/// The depth-first heuristic: with every estimate zero, priority collapses to
/// cost and exploration order is purely the frontier's discipline.
pub fn zero(_board: &Board) -> u32 {
    0
}

/// Generic graph search over any frontier discipline. Owns the per-puzzle
/// context, the frontier, and the explored set for the lifetime of one
/// search.
pub struct Solver<F: Frontier> {
    puzzle: Puzzle,
    frontier: F,
    explored: FxHashSet<String>,
    heuristic: Heuristic,
    states_checked: usize,
}

impl Solver<Stack<Rc<SearchState>>> {
    /// Depth-first search: LIFO frontier, zero heuristic. Finds *a* solution,
    /// not necessarily a shortest one.
    pub fn dfs(puzzle: Puzzle, initial: Board) -> Self {
        Solver::new(puzzle, initial, Stack::new(), zero)
    }
}

impl Solver<MinHeap<Rc<SearchState>>> {
    /// A*: min-heap frontier keyed by cost plus Manhattan distance. First
    /// goal found is optimal.
    pub fn astar(puzzle: Puzzle, initial: Board) -> Self {
        Solver::new(puzzle, initial, MinHeap::new(), manhattan_distance)
    }
}

impl<F: Frontier> Solver<F> {
    pub fn new(puzzle: Puzzle, initial: Board, mut frontier: F, heuristic: Heuristic) -> Solver<F> {
        let start = SearchState::initial(&puzzle, initial, heuristic);
        frontier.add(start.priority(), start);

        Solver {
            puzzle,
            frontier,
            explored: FxHashSet::default(),
            heuristic,
            states_checked: 0,
        }
    }

    /// Run to completion: the goal state if one is reachable, `Ok(None)` once
    /// the frontier is exhausted. Exhaustion is a normal outcome, not an
    /// error; only a structurally broken board errors.
    pub fn run(&mut self) -> Result<Option<Rc<SearchState>>> {
        while let Some(state) = self.frontier.remove() {
            // Lazy deletion: the frontier may hold several stale entries for
            // an identity that has already been finalized.
            if !self.explored.insert(state.identity.clone()) {
                continue;
            }

            self.states_checked += 1;
            if self.states_checked % 10_000 == 0 {
                tracing::debug!(
                    "checked {} states, explored {} identities",
                    self.states_checked,
                    self.explored.len()
                );
            }

            if is_goal(&state.board) {
                return Ok(Some(state));
            }

            for next in state.successors(&self.puzzle, self.heuristic)? {
                if self.explored.contains(&next.identity) {
                    continue;
                }
                self.frontier.add(next.priority(), next);
            }
        }

        Ok(None)
    }

    pub fn states_checked(&self) -> usize {
        self.states_checked
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }
}
