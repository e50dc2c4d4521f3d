use anyhow::{anyhow, bail, Result};
use fxhash::FxHashMap;

use crate::piece::extract_pieces;

/// Cell labels as they appear in puzzle input files.
pub const EMPTY: u8 = 0;
/// The one movable 2x2 piece that has to reach the exit.
pub const TARGET: u8 = 1;
/// All 1x1 pieces share this label; every other digit names one 1x2/2x1 instance.
pub const SINGLE: u8 = 7;

/// Digits used when rendering a board. Interchangeable piece instances of the
/// same shape all render to one digit, which makes a rendering canonical: it
/// doubles as the identity key for the explored set.
pub const EMPTY_DIGIT: char = '0';
pub const TARGET_DIGIT: char = '1';
pub const HORIZONTAL_DIGIT: char = '2';
pub const VERTICAL_DIGIT: char = '3';
pub const SINGLE_DIGIT: char = '4';

/// Top-left cell the target piece must occupy to win. Fixed for the whole
/// puzzle family, not derived from the input.
pub const EXIT_ROW: usize = 3;
pub const EXIT_COL: usize = 1;

/// One grid snapshot. Pure data; never mutated after it is handed out, every
/// move builds a fresh copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Read a board from line-oriented text, one row of single digits per
    /// line, no separators. Ragged or non-digit input is rejected.
    pub fn parse(input: &str) -> Result<Board> {
        let mut rows = 0;
        let mut cols = 0;
        let mut cells = Vec::new();

        for (row, line) in input.lines().enumerate() {
            if row == 0 {
                cols = line.chars().count();
            } else if line.chars().count() != cols {
                bail!(
                    "board is not rectangular: row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    cols
                );
            }

            for (col, c) in line.chars().enumerate() {
                let label = c
                    .to_digit(10)
                    .ok_or_else(|| anyhow!("invalid cell {:?} at ({}, {})", c, row, col))?;
                cells.push(label as u8);
            }

            rows += 1;
        }

        if rows == 0 || cols == 0 {
            bail!("empty board");
        }

        Ok(Board { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, label: u8) {
        self.cells[row * self.cols + col] = label;
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Top-left anchor of the first cell carrying `label`, in row-major order.
    pub fn find(&self, label: u8) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&cell| cell == label)
            .map(|index| (index / self.cols, index % self.cols))
    }

    /// Render every cell through the label map, one row per line. Labels the
    /// map does not know render as '?' rather than panicking.
    pub fn render(&self, symbols: &FxHashMap<u8, char>) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows);

        for row in 0..self.rows {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..self.cols {
                out.push(symbols.get(&self.get(row, col)).copied().unwrap_or('?'));
            }
        }

        out
    }
}

/// Everything fixed for one puzzle instance: the dimensions and the
/// label-to-output-digit map built from the initial piece extraction. Built
/// once at load time and passed explicitly wherever rendering or identity
/// keys are needed.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub rows: usize,
    pub cols: usize,
    pub symbols: FxHashMap<u8, char>,
}

impl Puzzle {
    /// Load a puzzle: parse the grid, validate its structure by extracting
    /// the pieces once, and derive the symbol map from them.
    pub fn load(input: &str) -> Result<(Puzzle, Board)> {
        let board = Board::parse(input)?;
        let pieces = extract_pieces(&board)?;

        let mut symbols = FxHashMap::default();
        symbols.insert(EMPTY, EMPTY_DIGIT);
        for piece in &pieces {
            let digit = match (piece.height, piece.width) {
                (2, 2) => TARGET_DIGIT,
                (1, 2) => HORIZONTAL_DIGIT,
                (2, 1) => VERTICAL_DIGIT,
                _ => SINGLE_DIGIT,
            };
            symbols.insert(piece.label, digit);
        }

        let puzzle = Puzzle {
            rows: board.rows(),
            cols: board.cols(),
            symbols,
        };

        Ok((puzzle, board))
    }

    /// Canonical key for a board: the rendering through the symbol map, which
    /// erases the arbitrary labels of interchangeable piece instances.
    pub fn identity(&self, board: &Board) -> String {
        board.render(&self.symbols)
    }
}
