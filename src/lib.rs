pub mod board;
pub mod direction;
pub mod frontier;
pub mod piece;
pub mod solver;
pub mod state;
pub mod trace;

pub use board::{Board, Puzzle};
pub use direction::Direction;
pub use frontier::{Frontier, MinHeap, Stack};
pub use piece::{extract_pieces, Piece};
pub use solver::{is_goal, manhattan_distance, zero, Heuristic, Solver};
pub use state::SearchState;
pub use trace::write_trace;
