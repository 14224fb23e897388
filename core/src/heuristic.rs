// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prioritised candidate masks for playouts that are too cheap for search.
//!
//! Layers are tried in order and the first non-empty one wins: take a win,
//! stop the opponent's win, make or stop a threat, make or stop a setup,
//! otherwise stay near the stones.

use crate::moves::{filtered_moves, mask_actions, single_action_mask, valid_moves};
use crate::pattern::{has_setup, setup_templates};
use crate::threat::{threat_at, Threat};
use crate::win::{win_state, WinState, Winner};
use crate::{board::Board, Coord, GameConfig, Player, Result};

/// Candidate mask for `player` to move on `board`
pub fn heuristic_moves(board: &Board, player: Player, config: &GameConfig) -> Result<Vec<bool>> {
    let valid = valid_moves(board);
    if board.is_blank() || !valid.iter().any(|&v| v) {
        return Ok(valid);
    }

    let near = filtered_moves(board);
    let candidates = mask_actions(&near);
    let opponent = player.opposite();

    if let Some(action) = find_completing_move(board, &candidates, player)? {
        tracing::trace!(action, ?player, "winning move");
        return Ok(single_action_mask(board.len(), action));
    }
    if let Some(action) = find_completing_move(board, &candidates, opponent)? {
        tracing::trace!(action, ?player, "blocking opponent five");
        return Ok(single_action_mask(board.len(), action));
    }
    if let Some(action) = most_urgent_threat(board, &candidates, player) {
        tracing::trace!(action, ?player, "threat move");
        return Ok(single_action_mask(board.len(), action));
    }

    if config.setup_templates {
        let setups = setup_moves(board, &candidates, player)?;
        if setups.iter().any(|&s| s) {
            tracing::trace!(?player, "setup moves");
            return Ok(setups);
        }
    }

    if candidates.is_empty() {
        Ok(valid)
    } else {
        Ok(near)
    }
}

/// First candidate that wins outright for `player`
fn find_completing_move(
    board: &Board,
    candidates: &[usize],
    player: Player,
) -> Result<Option<usize>> {
    for &action in candidates {
        let next = board.place(action, player)?;
        if win_state(&next) == WinState::Ended(Winner::Player(player)) {
            return Ok(Some(action));
        }
    }
    Ok(None)
}

/// Candidate carrying the most urgent threat, own threats before blocks on ties
fn most_urgent_threat(board: &Board, candidates: &[usize], player: Player) -> Option<usize> {
    let width = board.width();
    let mut best: Option<(Threat, u8, usize)> = None;

    for &action in candidates {
        let origin = Coord::from_action(action, width);
        for (rank, side) in [player, player.opposite()].into_iter().enumerate() {
            if let Some(threat) = threat_at(board, origin, side) {
                let key = (threat, rank as u8, action);
                if best.map_or(true, |b| key < b) {
                    best = Some(key);
                }
            }
        }
    }

    best.map(|(_, _, action)| action)
}

/// Moves that give `player` a new setup shape or take one away from the opponent
fn setup_moves(board: &Board, candidates: &[usize], player: Player) -> Result<Vec<bool>> {
    let templates = setup_templates()?;
    let opponent = player.opposite();
    let had_own = has_setup(board, player, &templates);
    let had_theirs = has_setup(board, opponent, &templates);
    let mut mask = vec![false; board.len()];

    for &action in candidates {
        let creates = !had_own && has_setup(&board.place(action, player)?, player, &templates);
        let denies =
            !had_theirs && has_setup(&board.place(action, opponent)?, opponent, &templates);
        mask[action] = creates || denies;
    }

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[(usize, usize, i8)]) -> Board {
        let mut codes = vec![0i8; 121];
        for &(r, c, v) in stones {
            codes[r * 11 + c] = v;
        }
        Board::from_codes(11, 11, &codes).unwrap()
    }

    fn only(mask: &[bool]) -> Vec<usize> {
        mask_actions(mask)
    }

    #[test]
    fn blank_board_is_unrestricted() {
        let mask = heuristic_moves(&Board::default(), Player::A, &GameConfig::default()).unwrap();
        assert_eq!(only(&mask).len(), 121);
    }

    #[test]
    fn takes_the_win() {
        let b = board_with(&[(0, 9, 1), (0, 10, 1), (0, 0, 1), (0, 1, 1), (6, 6, -1)]);
        let mask = heuristic_moves(&b, Player::A, &GameConfig::default()).unwrap();
        // (0,8) or (0,2) both complete; the scan meets (0,2) first
        assert_eq!(only(&mask), vec![2]);
    }

    #[test]
    fn blocks_opponent_five() {
        let b = board_with(&[(4, 1, -1), (4, 2, -1), (4, 3, -1), (4, 4, -1), (4, 0, 1), (8, 8, 1)]);
        let mask = heuristic_moves(&b, Player::A, &GameConfig::default()).unwrap();
        assert_eq!(only(&mask), vec![4 * 11 + 5]);
    }

    #[test]
    fn prefers_open_four_over_quiet_moves() {
        let b = board_with(&[(5, 3, 1), (5, 4, 1), (5, 5, 1), (0, 0, -1)]);
        let mask = heuristic_moves(&b, Player::A, &GameConfig::default()).unwrap();
        let picked = only(&mask);
        assert_eq!(picked.len(), 1);
        assert!(picked[0] == 5 * 11 + 2 || picked[0] == 5 * 11 + 6);
    }

    #[test]
    fn falls_back_to_filtered_mask() {
        let b = board_with(&[(5, 5, 1)]);
        let mask = heuristic_moves(&b, Player::B, &GameConfig::default()).unwrap();
        assert_eq!(mask, filtered_moves(&b));
    }

    #[test]
    fn setup_layer_only_when_enabled() {
        let b = board_with(&[(5, 4, 1), (5, 5, 1), (0, 0, -1)]);
        let plain = heuristic_moves(&b, Player::A, &GameConfig::default()).unwrap();
        assert_eq!(plain, filtered_moves(&b));

        let config = GameConfig {
            setup_templates: true,
            ..GameConfig::default()
        };
        let mask = heuristic_moves(&b, Player::A, &config).unwrap();
        let picked = only(&mask);
        assert!(picked.contains(&(5 * 11 + 3)));
        assert!(picked.contains(&(5 * 11 + 6)));
        assert!(picked.len() < only(&plain).len());
    }
}
