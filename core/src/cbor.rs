// SPDX-License-Identifier: MIT OR Apache-2.0

//! CBOR serialization helpers for boards and training examples
//!
//! Boards travel as `{height, width, cells}` with each cell encoded as its
//! integer code; decoding re-checks the shape and the codes.

use crate::{board::Board, GameError, Result};
use serde::{Deserialize, Serialize};

/// One training sample: canonical board, search policy and game outcome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub board: Board,
    pub policy: Vec<f32>,
    /// Outcome from the perspective of the side to move on `board`
    pub value: f32,
}

impl TrainingExample {
    pub fn new(board: Board, policy: Vec<f32>, value: f32) -> Result<Self> {
        if policy.len() != board.len() {
            return Err(GameError::ShapeMismatch {
                expected_rows: board.height(),
                expected_cols: board.width(),
                rows: 1,
                cols: policy.len(),
            });
        }
        Ok(Self {
            board,
            policy,
            value,
        })
    }
}

fn encode<T: Serialize>(value: &T, what: &str) -> Result<Vec<u8>> {
    serde_cbor::to_vec(value).map_err(|err| {
        tracing::error!("Failed to serialize {}: {}", what, err);
        GameError::Codec(err.to_string())
    })
}

fn decode<'a, T: Deserialize<'a>>(data: &'a [u8], what: &str) -> Result<T> {
    if data.is_empty() {
        return Err(GameError::Codec(format!("empty {} buffer", what)));
    }
    serde_cbor::from_slice(data).map_err(|err| {
        tracing::error!("Failed to deserialize {}: {}", what, err);
        GameError::Codec(err.to_string())
    })
}

/// Serialize a board to CBOR
pub fn serialize_board(board: &Board) -> Result<Vec<u8>> {
    encode(board, "board")
}

/// Deserialize a board from CBOR
pub fn deserialize_board(data: &[u8]) -> Result<Board> {
    decode(data, "board")
}

/// Serialize a batch of training examples to CBOR
pub fn serialize_examples(examples: &[TrainingExample]) -> Result<Vec<u8>> {
    encode(&examples, "training examples")
}

/// Deserialize a batch of training examples from CBOR
pub fn deserialize_examples(data: &[u8]) -> Result<Vec<TrainingExample>> {
    let examples: Vec<TrainingExample> = decode(data, "training examples")?;
    if let Some(bad) = examples.iter().find(|e| e.policy.len() != e.board.len()) {
        return Err(GameError::ShapeMismatch {
            expected_rows: bad.board.height(),
            expected_cols: bad.board.width(),
            rows: 1,
            cols: bad.policy.len(),
        });
    }
    Ok(examples)
}
