use std::rc::Rc;

use anyhow::Result;

use crate::board::{Board, Puzzle};
use crate::piece::extract_pieces;
use crate::solver::Heuristic;

/// One node of the search: a board plus the bookkeeping the driver needs.
/// Parent links form a tree rooted at the initial state, so plain `Rc`
/// back-references are enough. Boards are immutable once wrapped; the
/// identity key is derived once here and never recomputed.
#[derive(Debug)]
pub struct SearchState {
    pub board: Board,
    pub parent: Option<Rc<SearchState>>,
    pub cost: u32,
    pub heuristic: u32,
    pub identity: String,
}

impl Drop for SearchState {
    fn drop(&mut self) {
        // Unwind the parent chain iteratively; the derived recursive drop
        // would overflow the stack on the very deep paths DFS can produce.
        let mut parent = self.parent.take();
        while let Some(state) = parent {
            match Rc::try_unwrap(state) {
                Ok(mut state) => parent = state.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl SearchState {
    pub fn initial(puzzle: &Puzzle, board: Board, heuristic: Heuristic) -> Rc<SearchState> {
        Rc::new(SearchState {
            identity: puzzle.identity(&board),
            heuristic: heuristic(&board),
            parent: None,
            cost: 0,
            board,
        })
    }

    /// Heap key: accumulated cost plus the heuristic estimate, fixed at the
    /// moment the state is created.
    pub fn priority(&self) -> u32 {
        self.cost + self.heuristic
    }

    /// Every state one slide away, each costing one more than this state.
    /// Extraction can only fail if this state's board is structurally broken,
    /// which a board derived from a valid one never is; the error still
    /// propagates rather than being swallowed.
    pub fn successors(
        self: &Rc<Self>,
        puzzle: &Puzzle,
        heuristic: Heuristic,
    ) -> Result<Vec<Rc<SearchState>>> {
        let pieces = extract_pieces(&self.board)?;
        let mut next = Vec::new();

        for piece in &pieces {
            for board in piece.moves(&self.board) {
                next.push(Rc::new(SearchState {
                    identity: puzzle.identity(&board),
                    heuristic: heuristic(&board),
                    parent: Some(Rc::clone(self)),
                    cost: self.cost + 1,
                    board,
                }));
            }
        }

        Ok(next)
    }

    /// Walk the parent links back to the initial state and return the whole
    /// line in start-to-goal order, along with the number of moves taken.
    pub fn path(self: &Rc<Self>) -> (u32, Vec<Rc<SearchState>>) {
        let mut states = vec![Rc::clone(self)];

        let mut current = Rc::clone(self);
        while let Some(parent) = current.parent.clone() {
            states.push(Rc::clone(&parent));
            current = parent;
        }

        states.reverse();
        ((states.len() - 1) as u32, states)
    }
}
