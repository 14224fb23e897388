// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use torus5_core::{Board, Cell};

/// Render a board with column letters and row numbers on every side
pub fn render_board(board: &Board, last_move: Option<usize>) -> String {
    let width = board.width();
    let mut output = String::new();

    let labels = column_labels(width);
    output.push_str(&labels);

    for row in 0..board.height() {
        // Row number (1-indexed)
        output.push_str(&format!("{:2} ", row + 1));

        for col in 0..width {
            let index = row * width + col;
            let symbol = match board.cell(index) {
                Cell::A if last_move == Some(index) => "◉",
                Cell::A => "●",
                Cell::B if last_move == Some(index) => "◎",
                Cell::B => "○",
                Cell::Empty => "+",
            };
            output.push_str(&format!(" {}", symbol));
        }

        output.push_str(&format!(" {}", row + 1));
        output.push('\n');
    }

    output.push_str(&labels);
    output
}

fn column_labels(width: usize) -> String {
    let mut line = String::from("   ");
    for col in 0..width {
        line.push_str(&format!(" {}", coord_to_column_char(col)));
    }
    line.push('\n');
    line
}

/// Column index to a letter; the torus has no reserved columns so 'I' is kept
fn coord_to_column_char(col: usize) -> char {
    char::from_u32('A' as u32 + col as u32 % 26).unwrap_or('?')
}
