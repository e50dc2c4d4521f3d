use std::io::{self, Write};
use std::rc::Rc;

use crate::board::Puzzle;
use crate::state::SearchState;

/// Write a solution trace: a header with the cost, then every board on the
/// path rendered through the puzzle's symbol map, blank-line separated.
/// Interchangeable piece instances come out as one digit per shape, so traces
/// for relabeled inputs are byte-identical.
pub fn write_trace<W: Write>(
    writer: &mut W,
    puzzle: &Puzzle,
    cost: u32,
    states: &[Rc<SearchState>],
) -> io::Result<()> {
    writeln!(writer, "Cost of the solution: {cost}")?;

    for state in states {
        writeln!(writer, "{}", state.board.render(&puzzle.symbols))?;
        writeln!(writer)?;
    }

    Ok(())
}
