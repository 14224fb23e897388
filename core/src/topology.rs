// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wrap-around coordinates shared by win detection, threat scoring,
//! move filtering and template matching.
//!
//! Placement does not wrap (an action decodes to a plain row/column), but
//! every line or neighbourhood query goes through [`Torus`] so a run that
//! leaves one edge continues on the opposite edge.

use crate::{board::Board, Cell};

/// One of the four undirected line directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Forward step as (row delta, column delta)
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }

    /// Bit for this axis in a per-cell axis set
    pub fn bit(&self) -> u8 {
        match self {
            Axis::Horizontal => 0b0001,
            Axis::Vertical => 0b0010,
            Axis::Diagonal => 0b0100,
            Axis::AntiDiagonal => 0b1000,
        }
    }
}

/// Modular coordinate arithmetic for an H×W torus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus {
    height: usize,
    width: usize,
}

impl Torus {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn of(board: &Board) -> Self {
        Self::new(board.height(), board.width())
    }

    /// Flat index of an arbitrary (possibly negative or oversized) coordinate
    pub fn wrap(&self, row: isize, col: isize) -> usize {
        let r = row.rem_euclid(self.height as isize) as usize;
        let c = col.rem_euclid(self.width as isize) as usize;
        r * self.width + c
    }

    /// Split a flat index into (row, col)
    pub fn split(&self, index: usize) -> (isize, isize) {
        ((index / self.width) as isize, (index % self.width) as isize)
    }

    /// Index reached by walking `distance` steps along `axis` (negative walks backward)
    pub fn step(&self, index: usize, axis: Axis, distance: isize) -> usize {
        let (row, col) = self.split(index);
        let (dr, dc) = axis.delta();
        self.wrap(row + dr * distance, col + dc * distance)
    }

    /// Shortest Chebyshev distance between two cells on the torus
    pub fn chebyshev(&self, a: usize, b: usize) -> usize {
        let (ar, ac) = self.split(a);
        let (br, bc) = self.split(b);
        let dr = ar.abs_diff(br);
        let dc = ac.abs_diff(bc);
        let dr = dr.min(self.height - dr);
        let dc = dc.min(self.width - dc);
        dr.max(dc)
    }
}

/// Read-only periodic view of a board: every coordinate is valid
#[derive(Clone, Copy)]
pub struct PeriodicView<'a> {
    board: &'a Board,
    torus: Torus,
}

impl<'a> PeriodicView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            torus: Torus::of(board),
        }
    }

    pub fn at(&self, row: isize, col: isize) -> Cell {
        self.board.cell(self.torus.wrap(row, col))
    }
}
