// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and stone placement

use crate::{Cell, Coord, GameError, Player, Result, DEFAULT_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable snapshot of the grid.
///
/// Placement returns a fresh board; a caller holding the old snapshot never
/// observes a change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

/// Wire shape of a board, validated on the way in
#[derive(Serialize, Deserialize)]
struct BoardRepr {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        Board::from_cells(repr.height, repr.width, repr.cells)
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            height: board.height,
            width: board.width,
            cells: board.cells,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl Board {
    /// Create an empty board
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
        }
    }

    /// Build a board from row-major cells
    pub fn from_cells(height: usize, width: usize, cells: Vec<Cell>) -> Result<Self> {
        if cells.len() != height * width {
            return Err(GameError::ShapeMismatch {
                expected_rows: height,
                expected_cols: width,
                rows: if width == 0 { 0 } else { cells.len() / width },
                cols: width,
            });
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Build a board from the dense integer encoding (0, +1, -1)
    pub fn from_codes(height: usize, width: usize, codes: &[i8]) -> Result<Self> {
        let cells = codes
            .iter()
            .map(|&code| Cell::try_from(code))
            .collect::<Result<Vec<_>>>()?;
        Self::from_cells(height, width, cells)
    }

    /// Build a board from nested rows; every row must be `width` long
    pub fn from_rows(rows: &[Vec<i8>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(GameError::ShapeMismatch {
                expected_rows: height,
                expected_cols: width,
                rows: height,
                cols: bad.len(),
            });
        }
        let codes: Vec<i8> = rows.iter().flatten().copied().collect();
        Self::from_codes(height, width, &codes)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells (also the number of actions)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Dense integer encoding, row-major
    pub fn codes(&self) -> Vec<i8> {
        self.cells.iter().map(Cell::code).collect()
    }

    /// Cell at a flat index
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Cell at an in-range coordinate, `None` off the board
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.row >= self.height || coord.col >= self.width {
            return None;
        }
        Some(self.cells[coord.to_action(self.width)])
    }

    /// Number of stones on the board
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Number of stones owned by `player`
    pub fn count_stones_for(&self, player: Player) -> usize {
        let target = Cell::from(player);
        self.cells.iter().filter(|&&c| c == target).count()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(Cell::is_empty)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Return a new board with `player`'s stone at `action`
    pub fn place(&self, action: usize, player: Player) -> Result<Board> {
        if action >= self.cells.len() {
            return Err(GameError::InvalidMove {
                action,
                reason: "action out of range",
            });
        }
        if !self.cells[action].is_empty() {
            return Err(GameError::InvalidMove {
                action,
                reason: "cell already occupied",
            });
        }

        let mut next = self.clone();
        next.cells[action] = Cell::from(player);
        Ok(next)
    }

    /// True wherever the cell is empty; no wrap, no proximity restriction
    pub fn raw_valid_mask(&self) -> Vec<bool> {
        self.cells.iter().map(Cell::is_empty).collect()
    }

    /// Board with every stone's owner swapped when `player` is B
    pub fn relative_to(&self, player: Player) -> Board {
        match player {
            Player::A => self.clone(),
            Player::B => Board {
                height: self.height,
                width: self.width,
                cells: self.cells.iter().map(Cell::flipped).collect(),
            },
        }
    }

    /// Exact byte encoding of the cell buffer, usable as an equality key
    pub fn transposition_key(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.code() as u8).collect()
    }

    /// 32-byte digest of the transposition key
    pub fn position_hash(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.height as u64).to_le_bytes());
        hasher.update(&(self.width as u64).to_le_bytes());
        hasher.update(&self.transposition_key());
        *hasher.finalize().as_bytes()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.width {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;

        for row in 0..self.height {
            write!(f, "{:>3}", row)?;
            for col in 0..self.width {
                let symbol = match self.cells[row * self.width + col] {
                    Cell::Empty => '.',
                    Cell::A => 'X',
                    Cell::B => 'O',
                };
                write!(f, "{:>3}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(11, 11);
        assert_eq!(board.len(), 121);
        assert!(board.is_blank());
        assert!(board.raw_valid_mask().iter().all(|&v| v));
    }

    #[test]
    fn place_returns_fresh_board() {
        let board = Board::default();
        let next = board.place(12, Player::A).unwrap();

        assert!(board.is_blank());
        assert_eq!(next.cell(12), Cell::A);
        assert_eq!(next.stone_count(), 1);
        assert_eq!(next.get(Coord::new(1, 1)), Some(Cell::A));
    }

    #[test]
    fn place_rejects_occupied_and_out_of_range() {
        let board = Board::default().place(0, Player::B).unwrap();
        assert!(matches!(
            board.place(0, Player::A),
            Err(GameError::InvalidMove { action: 0, .. })
        ));
        assert!(matches!(
            board.place(121, Player::A),
            Err(GameError::InvalidMove { action: 121, .. })
        ));
    }

    #[test]
    fn from_cells_checks_shape() {
        let err = Board::from_cells(3, 3, vec![Cell::Empty; 8]).unwrap_err();
        assert!(matches!(err, GameError::ShapeMismatch { .. }));

        let err = Board::from_rows(&[vec![0, 0], vec![0]]).unwrap_err();
        assert!(matches!(err, GameError::ShapeMismatch { cols: 1, .. }));
    }

    #[test]
    fn from_codes_rejects_unknown_values() {
        let err = Board::from_codes(1, 2, &[0, 3]).unwrap_err();
        assert!(matches!(err, GameError::InvariantViolation(_)));
    }

    #[test]
    fn relative_to_flips_for_second_player() {
        let board = Board::from_rows(&[vec![1, -1, 0]]).unwrap();
        assert_eq!(board.relative_to(Player::A), board);
        assert_eq!(board.relative_to(Player::B).codes(), vec![-1, 1, 0]);
    }

    #[test]
    fn transposition_key_is_exact() {
        let a = Board::from_rows(&[vec![1, 0], vec![0, -1]]).unwrap();
        let b = Board::from_rows(&[vec![-1, 0], vec![0, 1]]).unwrap();
        assert_ne!(a.transposition_key(), b.transposition_key());
        assert_eq!(a.transposition_key(), a.clone().transposition_key());
        assert_ne!(a.position_hash(), b.position_hash());
    }

    #[test]
    fn display_has_column_header() {
        let board = Board::from_rows(&[vec![1, 0], vec![0, -1]]).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains('0') && lines[0].contains('1'));
        assert!(lines[1].contains('X'));
        assert!(lines[2].contains('O'));
    }
}
