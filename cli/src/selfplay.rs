// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parallel seeded playouts and training-example collection

use anyhow::{Context, Result};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use torus5_core::cbor::TrainingExample;
use torus5_core::{
    play_game, GameRecord, HeuristicSelector, MoveSelector, Player, RandomSelector, TorusGame,
    WinState, Winner,
};
use tracing::{info, info_span};

/// How both sides pick their moves
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Uniform over cells near existing stones
    Random,
    /// Win, block, threat and setup layers before falling back to random
    Heuristic,
}

/// Aggregate results of a batch of games
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
}

impl SelfPlayStats {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut stats = Self {
            total_games: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.result {
                WinState::Ended(Winner::Player(Player::A)) => stats.a_wins += 1,
                WinState::Ended(Winner::Player(Player::B)) => stats.b_wins += 1,
                WinState::Ended(Winner::Draw) => stats.draws += 1,
                WinState::NotEnded => {}
            }
        }
        if !records.is_empty() {
            let moves: usize = records.iter().map(|r| r.actions.len()).sum();
            stats.avg_moves = moves as f64 / records.len() as f64;
        }
        stats
    }
}

fn selector(policy: Policy, seed: u64) -> Box<dyn MoveSelector> {
    let rng = StdRng::seed_from_u64(seed);
    match policy {
        Policy::Random => Box::new(RandomSelector::new(rng)),
        Policy::Heuristic => Box::new(HeuristicSelector::new(rng)),
    }
}

/// Play `games` games in parallel; game `i` is seeded from `seed + i`
pub fn run_games(
    game: &TorusGame,
    games: usize,
    seed: u64,
    policy: Policy,
) -> Result<Vec<GameRecord>> {
    (0..games)
        .into_par_iter()
        .map(|index| {
            let span = info_span!("game", index);
            let _guard = span.enter();

            let game_seed = seed.wrapping_add(index as u64);
            // distinct streams for the two sides
            let mut side_a = selector(policy, game_seed);
            let mut side_b = selector(policy, game_seed ^ 0x9e37_79b9_7f4a_7c15);
            let record = play_game(game, side_a.as_mut(), side_b.as_mut())
                .with_context(|| format!("game {} failed", index))?;

            info!(moves = record.actions.len(), result = ?record.result, "finished");
            Ok(record)
        })
        .collect()
}

/// Turn finished games into (canonical board, one-hot policy, outcome) examples,
/// optionally expanded through the symmetry orbit
pub fn collect_examples(
    game: &TorusGame,
    records: &[GameRecord],
    augment: bool,
) -> Result<Vec<TrainingExample>> {
    let mut examples = Vec::new();

    for record in records {
        for (board, player, action) in record.positions(game)? {
            let canonical = game.canonical_form(&board, player);
            let mut policy = vec![0.0f32; canonical.len()];
            policy[action] = 1.0;
            let value = game.terminal_value(&record.final_board, player);

            if augment {
                for pair in game.symmetries(&canonical, &policy)? {
                    examples.push(TrainingExample::new(pair.board, pair.policy, value)?);
                }
            } else {
                examples.push(TrainingExample::new(canonical, policy, value)?);
            }
        }
    }

    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use torus5_core::GameConfig;

    #[test]
    fn runs_are_reproducible() {
        let game = TorusGame::new(GameConfig::square(7)).unwrap();
        let first = run_games(&game, 3, 42, Policy::Heuristic).unwrap();
        let second = run_games(&game, 3, 42, Policy::Heuristic).unwrap();
        let a: Vec<_> = first.iter().map(|r| r.actions.clone()).collect();
        let b: Vec<_> = second.iter().map(|r| r.actions.clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn stats_count_every_game() {
        let game = TorusGame::new(GameConfig::square(7)).unwrap();
        let records = run_games(&game, 4, 1, Policy::Random).unwrap();
        let stats = SelfPlayStats::from_records(&records);
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.a_wins + stats.b_wins + stats.draws, 4);
        assert!(stats.avg_moves >= 9.0);
    }

    #[test]
    fn augmentation_multiplies_examples() {
        let game = TorusGame::new(GameConfig::square(7)).unwrap();
        let records = run_games(&game, 1, 5, Policy::Heuristic).unwrap();
        let plain = collect_examples(&game, &records, false).unwrap();
        let augmented = collect_examples(&game, &records, true).unwrap();

        assert_eq!(plain.len(), records[0].actions.len());
        // 4 rotations x (1 + 6 + 6) on a 7x7 board
        assert_eq!(augmented.len(), plain.len() * 52);
    }

    #[test]
    fn examples_are_from_mover_perspective() {
        let game = TorusGame::new(GameConfig::square(7)).unwrap();
        let records = run_games(&game, 2, 9, Policy::Random).unwrap();
        for ex in collect_examples(&game, &records, false).unwrap() {
            // side to move never has fewer stones than the opponent in canonical form
            let own = ex.board.count_stones_for(Player::A);
            let theirs = ex.board.count_stones_for(Player::B);
            assert!(own == theirs || own + 1 == theirs);
            assert!((ex.policy.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        }
    }
}
