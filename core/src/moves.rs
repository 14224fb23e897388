// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate-move masks

use crate::board::Board;
use crate::topology::Torus;

/// Chebyshev radius around existing stones that stays in the candidate set
pub const FILTER_RADIUS: isize = 2;

/// Every empty cell; identical to [`Board::raw_valid_mask`]
pub fn valid_moves(board: &Board) -> Vec<bool> {
    board.raw_valid_mask()
}

/// Empty cells within wrapped Chebyshev distance 2 of any stone.
///
/// A blank board keeps every cell so the first move is unrestricted.
pub fn filtered_moves(board: &Board) -> Vec<bool> {
    if board.is_blank() {
        return vec![true; board.len()];
    }

    let torus = Torus::of(board);
    let mut mask = vec![false; board.len()];

    for index in (0..board.len()).filter(|&i| !board.cell(i).is_empty()) {
        let (row, col) = torus.split(index);
        for dr in -FILTER_RADIUS..=FILTER_RADIUS {
            for dc in -FILTER_RADIUS..=FILTER_RADIUS {
                let near = torus.wrap(row + dr, col + dc);
                if board.cell(near).is_empty() {
                    mask[near] = true;
                }
            }
        }
    }

    mask
}

/// Action indices set in a mask
pub fn mask_actions(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(action, &on)| on.then_some(action))
        .collect()
}

/// Mask with only `action` set
pub fn single_action_mask(len: usize, action: usize) -> Vec<bool> {
    let mut mask = vec![false; len];
    if let Some(slot) = mask.get_mut(action) {
        *slot = true;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn blank_board_allows_everything() {
        let mask = filtered_moves(&Board::default());
        assert_eq!(mask.len(), 121);
        assert!(mask.iter().all(|&m| m));
    }

    #[test]
    fn single_stone_marks_wrapped_neighbourhood() {
        let board = Board::default().place(0, Player::A).unwrap();
        let torus = Torus::of(&board);
        let mask = filtered_moves(&board);

        for (index, &on) in mask.iter().enumerate() {
            let expected = index != 0 && torus.chebyshev(0, index) <= 2;
            assert_eq!(on, expected, "cell {}", index);
        }
        assert_eq!(mask_actions(&mask).len(), 24);
    }

    #[test]
    fn occupied_cells_never_candidates() {
        let board = Board::default()
            .place(60, Player::A)
            .unwrap()
            .place(61, Player::B)
            .unwrap();
        let mask = filtered_moves(&board);
        assert!(!mask[60]);
        assert!(!mask[61]);
        assert!(mask[62]);
    }

    #[test]
    fn valid_moves_match_empty_cells() {
        let board = Board::default().place(5, Player::B).unwrap();
        let mask = valid_moves(&board);
        assert!(!mask[5]);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 120);
    }

    #[test]
    fn single_action_mask_ignores_out_of_range() {
        assert_eq!(single_action_mask(3, 1), vec![false, true, false]);
        assert_eq!(single_action_mask(2, 5), vec![false, false]);
    }
}
