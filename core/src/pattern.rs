// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sliding-window template matching with wildcard cells.
//!
//! Templates are written as rows of characters: `X` for a player A stone,
//! `O` for player B, `.` for an empty cell and `?` for "anything". Windows
//! are slid over every anchor of the torus, so a shape may straddle an edge.

use crate::topology::PeriodicView;
use crate::{board::Board, Cell, GameError, Player, Result};

/// Rectangular pattern; `None` cells match anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Cell>>,
}

impl Template {
    /// Parse from rows of `X`, `O`, `.` and `?`
    pub fn parse(lines: &[&str]) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut cells = Vec::with_capacity(rows * cols);

        for line in lines {
            if line.chars().count() != cols {
                return Err(GameError::ShapeMismatch {
                    expected_rows: rows,
                    expected_cols: cols,
                    rows,
                    cols: line.chars().count(),
                });
            }
            for ch in line.chars() {
                cells.push(match ch {
                    'X' => Some(Cell::A),
                    'O' => Some(Cell::B),
                    '.' => Some(Cell::Empty),
                    '?' => None,
                    other => {
                        return Err(GameError::InvariantViolation(format!(
                            "unknown template character '{}'",
                            other
                        )))
                    }
                });
            }
        }

        Ok(Self { rows, cols, cells })
    }

    /// Same shape with the stone owners swapped
    pub fn negated(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|c| c.map(|cell| cell.flipped())).collect(),
        }
    }

    fn matches_at(&self, view: &PeriodicView<'_>, row: isize, col: isize) -> bool {
        self.cells.iter().enumerate().all(|(i, want)| match want {
            None => true,
            Some(cell) => {
                let r = row + (i / self.cols) as isize;
                let c = col + (i % self.cols) as isize;
                view.at(r, c) == *cell
            }
        })
    }
}

/// True if `template` matches anywhere on the torus
pub fn find_pattern(board: &Board, template: &Template) -> bool {
    if template.cells.is_empty() || board.is_empty() {
        return false;
    }
    let view = PeriodicView::new(board);
    (0..board.height() as isize).any(|row| {
        (0..board.width() as isize).any(|col| template.matches_at(&view, row, col))
    })
}

const SETUP_SHAPES: &[&[&str]] = &[
    &[".????", "?X???", "??X??", "???X?", "????."],
    &[".XXX."],
    &["????.", "???X?", "??X??", "?X???", ".????"],
    &[".", "X", "X", "X", "."],
    &[".?????", "?X????", "??X???", "???.??", "????X?", "?????."],
    &[".?????", "?X????", "??.???", "???X??", "????X?", "?????."],
    &[".XX.X."],
    &[".X.XX."],
    &["?????.", "????X?", "???.??", "??X???", "?X????", ".?????"],
    &["?????.", "????X?", "???X??", "??.???", "?X????", ".?????"],
    &[".", "X", "X", ".", "X", "."],
    &[".", "X", ".", "X", "X", "."],
];

/// Parse a set of drawn shapes, failing on the first malformed one
pub fn parse_templates(shapes: &[&[&str]]) -> Result<Vec<Template>> {
    shapes.iter().map(|lines| Template::parse(lines)).collect()
}

/// Open threes and split threes along every axis, drawn for player A
pub fn setup_templates() -> Result<Vec<Template>> {
    parse_templates(SETUP_SHAPES)
}

/// True if `player` holds any setup shape
pub fn has_setup(board: &Board, player: Player, templates: &[Template]) -> bool {
    templates.iter().any(|t| match player {
        Player::A => find_pattern(board, t),
        Player::B => find_pattern(board, &t.negated()),
    })
}

/// Player A if any setup template matches, else player B if a negated one does
pub fn setup_state(board: &Board) -> Result<Option<Player>> {
    let templates = setup_templates()?;
    Ok([Player::A, Player::B]
        .into_iter()
        .find(|&player| has_setup(board, player, &templates)))
}
