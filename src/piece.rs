use anyhow::{bail, Result};

use crate::board::{Board, EMPTY, SINGLE, TARGET};
use crate::direction::Direction;

/// A rectangular group of same-labeled cells that slides as one unit,
/// anchored at its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub height: usize,
    pub width: usize,
    pub row: usize,
    pub col: usize,
    pub label: u8,
}

impl Piece {
    /// The footprint, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let Piece {
            height,
            width,
            row,
            col,
            ..
        } = *self;

        (0..height).flat_map(move |dr| (0..width).map(move |dc| (row + dr, col + dc)))
    }

    pub fn covers(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.row + self.height && col >= self.col && col < self.col + self.width
    }

    /// Every board reachable by sliding this piece one cell. A slide is legal
    /// iff each destination cell is in bounds and is empty or part of this
    /// piece already. The input board is never touched; each legal slide
    /// builds a fresh copy with the old footprint cleared and the new one
    /// written.
    pub fn moves(&self, board: &Board) -> Vec<Board> {
        let mut boards = Vec::new();

        for direction in Direction::all() {
            let (delta_row, delta_col) = direction.offset();

            let legal = self.cells().all(|(row, col)| {
                let (row, col) = (row as isize + delta_row, col as isize + delta_col);
                board.in_bounds(row, col) && {
                    let (row, col) = (row as usize, col as usize);
                    board.get(row, col) == EMPTY || self.covers(row, col)
                }
            });
            if !legal {
                continue;
            }

            let mut next = board.clone();
            for (row, col) in self.cells() {
                next.set(row, col, EMPTY);
            }
            for (row, col) in self.cells() {
                let (row, col) = (
                    (row as isize + delta_row) as usize,
                    (col as isize + delta_col) as usize,
                );
                next.set(row, col, self.label);
            }

            boards.push(next);
        }

        boards
    }
}

/// Reconstruct the piece set of a board from its cell labels. Scans row-major
/// and classifies each unclaimed non-empty cell: the singleton label is a
/// 1x1, the target label must head a full 2x2 footprint, and any other label
/// must pair with an equal cell to the right or below. Anything else is a
/// structural error; a malformed puzzle fails here rather than being silently
/// mis-read. On success every non-empty cell belongs to exactly one piece.
pub fn extract_pieces(board: &Board) -> Result<Vec<Piece>> {
    let mut claimed = vec![false; board.rows() * board.cols()];
    let mut pieces = Vec::new();

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if claimed[row * board.cols() + col] {
                continue;
            }

            let label = board.get(row, col);
            let piece = match label {
                EMPTY => continue,
                SINGLE => Piece {
                    height: 1,
                    width: 1,
                    row,
                    col,
                    label,
                },
                TARGET => {
                    let complete = board.in_bounds(row as isize + 1, col as isize + 1)
                        && board.get(row, col + 1) == TARGET
                        && board.get(row + 1, col) == TARGET
                        && board.get(row + 1, col + 1) == TARGET;
                    if !complete {
                        bail!("malformed 2x2 piece anchored at ({}, {})", row, col);
                    }
                    Piece {
                        height: 2,
                        width: 2,
                        row,
                        col,
                        label,
                    }
                }
                _ => {
                    if board.in_bounds(row as isize, col as isize + 1)
                        && board.get(row, col + 1) == label
                    {
                        Piece {
                            height: 1,
                            width: 2,
                            row,
                            col,
                            label,
                        }
                    } else if board.in_bounds(row as isize + 1, col as isize)
                        && board.get(row + 1, col) == label
                    {
                        Piece {
                            height: 2,
                            width: 1,
                            row,
                            col,
                            label,
                        }
                    } else {
                        bail!("piece label {} at ({}, {}) has no partner cell", label, row, col);
                    }
                }
            };

            for (row, col) in piece.cells() {
                let index = row * board.cols() + col;
                if claimed[index] {
                    bail!("cell ({}, {}) belongs to two pieces", row, col);
                }
                claimed[index] = true;
            }
            pieces.push(piece);
        }
    }

    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(first: &Board, second: &Board) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..first.rows() {
            for col in 0..first.cols() {
                if first.get(row, col) != second.get(row, col) {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    #[test]
    fn extract_classifies_a_lone_single() {
        let board = Board::parse("0000\n0700\n0000\n0000\n0000").unwrap();

        let pieces = extract_pieces(&board).unwrap();

        assert_eq!(
            vec![Piece {
                height: 1,
                width: 1,
                row: 1,
                col: 1,
                label: SINGLE
            }],
            pieces
        );
    }

    #[test]
    fn extract_classifies_a_horizontal_pair() {
        let board = Board::parse("0000\n0220\n0000\n0000\n0000").unwrap();

        let pieces = extract_pieces(&board).unwrap();

        assert_eq!(1, pieces.len());
        assert_eq!((1, 2, 1, 1), (pieces[0].height, pieces[0].width, pieces[0].row, pieces[0].col));
    }

    #[test]
    fn extract_classifies_a_vertical_pair() {
        let board = Board::parse("0000\n0200\n0200\n0000\n0000").unwrap();

        let pieces = extract_pieces(&board).unwrap();

        assert_eq!(1, pieces.len());
        assert_eq!((2, 1, 1, 1), (pieces[0].height, pieces[0].width, pieces[0].row, pieces[0].col));
    }

    #[test]
    fn extract_classifies_the_target() {
        let board = Board::parse("0000\n0110\n0110\n0000\n0000").unwrap();

        let pieces = extract_pieces(&board).unwrap();

        assert_eq!(1, pieces.len());
        assert_eq!((2, 2, 1, 1), (pieces[0].height, pieces[0].width, pieces[0].row, pieces[0].col));
        assert_eq!(TARGET, pieces[0].label);
    }

    #[test]
    fn extract_finds_all_ten_pieces_of_the_classic_opening() {
        let board = Board::parse("2113\n2113\n4665\n4775\n7007").unwrap();

        let pieces = extract_pieces(&board).unwrap();

        assert_eq!(10, pieces.len());
    }

    #[test]
    fn extract_partitions_every_non_empty_cell_exactly_once() {
        let board = Board::parse("2113\n2113\n4665\n4775\n7007").unwrap();

        let pieces = extract_pieces(&board).unwrap();

        let mut seen = vec![0usize; board.rows() * board.cols()];
        for piece in &pieces {
            for (row, col) in piece.cells() {
                seen[row * board.cols() + col] += 1;
            }
        }
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let expected = usize::from(board.get(row, col) != EMPTY);
                assert_eq!(expected, seen[row * board.cols() + col], "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn extract_fails_on_a_truncated_target() {
        // Three cells of the 2x2, the fourth missing.
        let board = Board::parse("1100\n1000\n0000\n0000\n0000").unwrap();

        assert!(extract_pieces(&board).is_err());
    }

    #[test]
    fn extract_fails_on_a_target_against_the_edge() {
        let board = Board::parse("0001\n0001\n0000\n0000\n0000").unwrap();

        assert!(extract_pieces(&board).is_err());
    }

    #[test]
    fn extract_fails_on_a_pair_label_with_no_partner() {
        let board = Board::parse("0000\n0200\n0000\n0000\n0000").unwrap();

        assert!(extract_pieces(&board).is_err());
    }

    #[test]
    fn single_moves_into_every_open_orthogonal_cell() {
        let board = Board::parse("909\n080\n909").unwrap();
        let piece = Piece {
            height: 1,
            width: 1,
            row: 1,
            col: 1,
            label: 8,
        };

        let successors = piece.moves(&board);

        assert_eq!(4, successors.len());
        for successor in &successors {
            assert_ne!(&board, successor);
            assert_eq!(2, diff(&board, successor).len());
        }
    }

    #[test]
    fn single_ignores_diagonals_and_occupied_cells() {
        let board = Board::parse("090\n989\n090").unwrap();
        let piece = Piece {
            height: 1,
            width: 1,
            row: 1,
            col: 1,
            label: 8,
        };

        assert!(piece.moves(&board).is_empty());
    }

    #[test]
    fn horizontal_pair_slides_each_direction_when_open() {
        let cases = [
            // Free spot to the right.
            ("0090\n9110\n0990", "0090\n9011\n0990"),
            // Free spot to the left.
            ("0090\n0119\n0990", "0090\n1109\n0990"),
            // Free row above.
            ("0000\n9119\n0990", "0110\n9009\n0990"),
            // Free row below.
            ("0990\n9119\n0000", "0990\n9009\n0110"),
        ];

        for (initial, expected) in cases {
            let board = Board::parse(initial).unwrap();
            let piece = Piece {
                height: 1,
                width: 2,
                row: 1,
                col: 1,
                label: 1,
            };

            let successors = piece.moves(&board);

            assert_eq!(1, successors.len(), "from:\n{initial}");
            assert_eq!(Board::parse(expected).unwrap(), successors[0]);
        }
    }

    #[test]
    fn vertical_pair_slides_each_direction_when_open() {
        let cases = [
            ("099\n910\n910\n990", "099\n091\n091\n990"),
            ("099\n019\n019\n990", "099\n109\n109\n990"),
            ("009\n919\n919\n990", "019\n919\n909\n990"),
            ("099\n919\n919\n900", "099\n909\n919\n910"),
        ];

        for (initial, expected) in cases {
            let board = Board::parse(initial).unwrap();
            let piece = Piece {
                height: 2,
                width: 1,
                row: 1,
                col: 1,
                label: 1,
            };

            let successors = piece.moves(&board);

            assert_eq!(1, successors.len(), "from:\n{initial}");
            assert_eq!(Board::parse(expected).unwrap(), successors[0]);
        }
    }

    #[test]
    fn target_slides_only_when_both_destination_cells_are_open() {
        let cases = [
            ("9099\n9110\n0110\n9909", "9099\n9011\n0011\n9909"),
            ("9099\n0119\n0119\n9909", "9099\n1109\n1109\n9909"),
            ("9009\n9119\n9119\n9999", "9119\n9119\n9009\n9999"),
            ("9999\n9119\n9119\n9009", "9999\n9009\n9119\n9119"),
        ];

        for (initial, expected) in cases {
            let board = Board::parse(initial).unwrap();
            let piece = Piece {
                height: 2,
                width: 2,
                row: 1,
                col: 1,
                label: 1,
            };

            let successors = piece.moves(&board);

            assert_eq!(1, successors.len(), "from:\n{initial}");
            assert_eq!(Board::parse(expected).unwrap(), successors[0]);
        }
    }

    #[test]
    fn target_with_one_open_cell_per_side_cannot_move() {
        let board = Board::parse("9099\n9110\n0110\n9909").unwrap();
        let blocked = Board::parse("9099\n9119\n0110\n9909").unwrap();
        let piece = Piece {
            height: 2,
            width: 2,
            row: 1,
            col: 1,
            label: 1,
        };

        assert_eq!(1, piece.moves(&board).len());
        assert!(piece.moves(&blocked).is_empty());
    }

    #[test]
    fn moves_only_touch_the_old_and_new_footprints() {
        let board = Board::parse("2113\n2113\n4665\n4775\n7007").unwrap();
        let pieces = extract_pieces(&board).unwrap();

        for piece in &pieces {
            for successor in piece.moves(&board) {
                assert_ne!(board, successor);
                for (row, col) in diff(&board, &successor) {
                    let was_piece = piece.covers(row, col);
                    let is_piece = successor.get(row, col) == piece.label;
                    assert!(was_piece || is_piece, "stray change at ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn moves_leave_the_input_board_untouched() {
        let board = Board::parse("2113\n2113\n4665\n4775\n7007").unwrap();
        let copy = board.clone();

        for piece in extract_pieces(&board).unwrap() {
            piece.moves(&board);
        }

        assert_eq!(copy, board);
    }
}
