// SPDX-License-Identifier: MIT OR Apache-2.0

use torus5_core::moves::{filtered_moves, mask_actions, valid_moves};
use torus5_core::threat::{priority_value, threat_at};
use torus5_core::{Board, Coord, Player, Threat, Torus, TorusGame};

#[test]
fn filtered_on_empty_board_is_all_true() {
    assert!(filtered_moves(&Board::default()).iter().all(|&m| m));
}

#[test]
fn filtered_around_one_stone_matches_wrapped_distance() {
    for stone in [0usize, 5, 60, 120, 10 * 11 + 3] {
        let board = Board::default().place(stone, Player::B).unwrap();
        let torus = Torus::of(&board);
        let mask = filtered_moves(&board);
        for (cell, &on) in mask.iter().enumerate() {
            let expected = cell != stone && torus.chebyshev(stone, cell) <= 2;
            assert_eq!(on, expected, "stone {} cell {}", stone, cell);
        }
    }
}

#[test]
fn corner_stone_reaches_opposite_corner() {
    let board = Board::default().place(0, Player::A).unwrap();
    let mask = filtered_moves(&board);
    assert!(mask[120]);
    assert!(mask[10]);
    assert!(mask[110]);
    assert!(!mask[5 * 11 + 5]);
}

#[test]
fn filtered_is_subset_of_valid() {
    let board = Board::default()
        .place(12, Player::A)
        .unwrap()
        .place(13, Player::B)
        .unwrap();
    let valid = valid_moves(&board);
    for action in mask_actions(&filtered_moves(&board)) {
        assert!(valid[action]);
    }
}

#[test]
fn threat_priorities_match_classes() {
    let mut board = Board::default();
    for col in 1..5 {
        board = board.place(6 * 11 + col, Player::A).unwrap();
    }
    assert_eq!(priority_value(threat_at(&board, Coord::new(6, 5), Player::A)), 1.0);
    assert_eq!(priority_value(threat_at(&board, Coord::new(6, 0), Player::A)), 1.0);

    let lone = Board::default().place(60, Player::A).unwrap();
    assert_eq!(
        priority_value(threat_at(&lone, Coord::new(5, 5), Player::A)),
        f64::INFINITY
    );
    assert_eq!(Threat::OpenFour.priority(), 3);
}

#[test]
fn heuristic_mask_is_subset_of_valid() {
    let game = TorusGame::default();
    let mut board = game.initial_state();
    let mut player = Player::A;
    for action in [60, 61, 49, 72, 50, 38] {
        board = board.place(action, player).unwrap();
        player = player.opposite();
    }
    let valid = game.valid_moves(&board);
    let mask = game.heuristic_moves(&board, player).unwrap();
    assert!(mask.iter().any(|&m| m));
    for action in mask_actions(&mask) {
        assert!(valid[action]);
    }
}
