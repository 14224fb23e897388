// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symmetry orbit of a (board, policy) training pair.
//!
//! The rules are invariant under quarter turns and, on the torus, under
//! cyclic shifts of rows or columns. For each rotation the orbit holds the
//! rotated pair, its row-only shifts and its column-only shifts (never a
//! combined row and column shift): 4 × (1 + (H−1) + (W−1)) pairs.

use crate::{board::Board, Cell, GameError, Result};
use serde::{Deserialize, Serialize};

/// A (board, policy) pair with index-aligned policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPair {
    pub board: Board,
    pub policy: Vec<f32>,
}

/// One element of the orbit: rotate first, then shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symmetry {
    /// Counter-clockwise quarter turns, 0..4
    pub quarter_turns: u8,
    /// Rows move down by this much (cyclic)
    pub row_shift: usize,
    /// Columns move right by this much (cyclic)
    pub col_shift: usize,
}

impl Symmetry {
    pub const IDENTITY: Symmetry = Symmetry {
        quarter_turns: 0,
        row_shift: 0,
        col_shift: 0,
    };

    /// Apply to a row-major grid of shape `height`×`width`, returning the new
    /// cells and shape
    pub fn apply<T: Copy>(
        &self,
        cells: &[T],
        height: usize,
        width: usize,
    ) -> (Vec<T>, usize, usize) {
        let mut grid = cells.to_vec();
        let (mut h, mut w) = (height, width);
        for _ in 0..self.quarter_turns % 4 {
            grid = rotate_quarter(&grid, h, w);
            std::mem::swap(&mut h, &mut w);
        }
        if self.row_shift % h.max(1) != 0 || self.col_shift % w.max(1) != 0 {
            grid = roll(&grid, h, w, self.row_shift, self.col_shift);
        }
        (grid, h, w)
    }

    /// Apply to a board
    pub fn apply_board(&self, board: &Board) -> Result<Board> {
        let (cells, h, w) = self.apply::<Cell>(board.cells(), board.height(), board.width());
        Board::from_cells(h, w, cells)
    }
}

/// Every symmetry in the orbit of an `height`×`width` grid, identity first
pub fn orbit(height: usize, width: usize) -> Vec<Symmetry> {
    let mut out = Vec::with_capacity(4 * (1 + height.saturating_sub(1) + width.saturating_sub(1)));
    for quarter_turns in 0..4u8 {
        // shape after rotation
        let (h, w) = if quarter_turns % 2 == 0 {
            (height, width)
        } else {
            (width, height)
        };
        out.push(Symmetry {
            quarter_turns,
            row_shift: 0,
            col_shift: 0,
        });
        out.extend((1..w).map(|col_shift| Symmetry {
            quarter_turns,
            row_shift: 0,
            col_shift,
        }));
        out.extend((1..h).map(|row_shift| Symmetry {
            quarter_turns,
            row_shift,
            col_shift: 0,
        }));
    }
    out
}

/// Expand one training pair into its full symmetry orbit.
///
/// Each policy is permuted exactly like its board, so action indices stay
/// aligned. The first pair is the input unchanged.
pub fn expand(board: &Board, policy: &[f32]) -> Result<Vec<TrainingPair>> {
    if policy.len() != board.len() {
        return Err(GameError::ShapeMismatch {
            expected_rows: board.height(),
            expected_cols: board.width(),
            rows: 1,
            cols: policy.len(),
        });
    }

    orbit(board.height(), board.width())
        .into_iter()
        .map(|symmetry| {
            let (pi, _, _) = symmetry.apply(policy, board.height(), board.width());
            Ok(TrainingPair {
                board: symmetry.apply_board(board)?,
                policy: pi,
            })
        })
        .collect()
}

/// Counter-clockwise quarter turn: out[i][j] = in[j][w-1-i], shape w×h
fn rotate_quarter<T: Copy>(cells: &[T], height: usize, width: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(cells.len());
    for i in 0..width {
        for j in 0..height {
            out.push(cells[j * width + (width - 1 - i)]);
        }
    }
    out
}

/// Cyclic shift: out[r][c] = in[r - dr][c - dc]
fn roll<T: Copy>(cells: &[T], height: usize, width: usize, dr: usize, dc: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(cells.len());
    for r in 0..height {
        let src_r = (r + height - dr % height) % height;
        for c in 0..width {
            let src_c = (c + width - dc % width) % width;
            out.push(cells[src_r * width + src_c]);
        }
    }
    out
}
