// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::collection::vec;
use proptest::prelude::*;
use torus5_core::{Board, GameConfig, GameError, Player, TorusGame};

const NO_FIVE_ROW: [i8; 11] = [1, 1, 1, -1, -1, -1, 1, -1, -1, -1, -1];

fn drawn_board() -> Board {
    let codes: Vec<i8> = (0..121)
        .map(|i| NO_FIVE_ROW[(i % 11 + 2 * (i / 11)) % 11])
        .collect();
    Board::from_codes(11, 11, &codes).unwrap()
}

fn won_board(winner: Player) -> Board {
    let game = TorusGame::default();
    let mut board = game.initial_state();
    for col in [9, 10, 0, 1, 2] {
        board = board.place(4 * 11 + col, winner).unwrap();
    }
    board
}

#[test]
fn initial_state_and_action_count() {
    let game = TorusGame::default();
    let board = game.initial_state();
    assert_eq!(board.len(), 121);
    assert!(board.is_blank());
    assert_eq!(game.action_count(), 121);
}

#[test]
fn step_never_mutates_input() {
    let game = TorusGame::default();
    let board = game.initial_state().place(10, Player::B).unwrap();
    let before = board.clone();

    let (next, to_move) = game.step(&board, Player::A, 20).unwrap();
    assert_eq!(board, before);
    assert_eq!(to_move, Player::B);

    // only the target cell differs
    let diff: Vec<usize> = (0..board.len())
        .filter(|&i| board.cell(i) != next.cell(i))
        .collect();
    assert_eq!(diff, vec![20]);
}

#[test]
fn step_rejects_occupied_and_out_of_range() {
    let game = TorusGame::default();
    let board = game.initial_state().place(10, Player::B).unwrap();
    assert!(matches!(
        game.step(&board, Player::A, 10),
        Err(GameError::InvalidMove { action: 10, .. })
    ));
    assert!(matches!(
        game.step(&board, Player::A, 121),
        Err(GameError::InvalidMove { action: 121, .. })
    ));
}

#[test]
fn decisive_values_are_antisymmetric() {
    let game = TorusGame::default();
    for winner in [Player::A, Player::B] {
        let board = won_board(winner);
        let a = game.terminal_value(&board, Player::A);
        let b = game.terminal_value(&board, Player::B);
        assert_eq!(a, -b);
        assert_eq!(game.terminal_value(&board, winner), 1.0);
        assert_eq!(game.terminal_value(&board, winner.opposite()), -1.0);
    }
}

#[test]
fn draw_rewards_second_mover_only() {
    let game = TorusGame::default();
    let board = drawn_board();
    assert_eq!(game.terminal_value(&board, Player::B), 0.01);
    assert_eq!(game.terminal_value(&board, Player::A), 0.0);
}

#[test]
fn draw_reward_is_configurable() {
    let game = TorusGame::new(GameConfig::penalised_draw()).unwrap();
    let board = drawn_board();
    assert_eq!(game.terminal_value(&board, Player::B), -1.0);
    assert_eq!(game.terminal_value(&board, Player::A), 0.0);
}

proptest! {
    #[test]
    fn canonical_form_flips_for_second_player(codes in vec(-1i8..=1, 121)) {
        let game = TorusGame::default();
        let board = Board::from_codes(11, 11, &codes).unwrap();

        prop_assert_eq!(game.canonical_form(&board, Player::A), board.clone());
        let flipped = game.canonical_form(&board, Player::B);
        let expected: Vec<i8> = codes.iter().map(|c| -c).collect();
        prop_assert_eq!(flipped.codes(), expected);
    }
}

#[test]
fn string_representation_is_exact_key() {
    let game = TorusGame::default();
    let a = game.initial_state().place(0, Player::A).unwrap();
    let b = game.initial_state().place(0, Player::B).unwrap();
    let a2 = game.initial_state().place(0, Player::A).unwrap();

    assert_eq!(game.string_representation(&a), game.string_representation(&a2));
    assert_ne!(game.string_representation(&a), game.string_representation(&b));
    assert_eq!(game.string_representation(&a).len(), 121);
}

#[test]
fn display_dumps_header_and_grid() {
    let game = TorusGame::default();
    let board = game.initial_state().place(0, Player::A).unwrap();
    let text = TorusGame::display(&board);
    assert_eq!(text.lines().count(), 12);
    assert!(text.lines().next().unwrap().contains("10"));
}

#[test]
fn rejects_invalid_configuration() {
    let config = GameConfig {
        height: 11,
        width: 9,
        ..GameConfig::default()
    };
    assert!(matches!(TorusGame::new(config), Err(GameError::InvalidConfig(_))));
}
