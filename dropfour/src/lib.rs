//! Decision engine for a two-player gravity-drop four-in-a-row game.
//!
//! Two entry styles. Drivers that own a live [`Board`] construct an agent
//! ([`AiPlayer`], [`RandomPlayer`] or [`HumanPlayer`]) and ask it for a
//! column once per turn; agents never mutate the shared board. Stateless
//! callers instead feed a move history string (pairs of player digit and
//! column digit, e.g. `1323`) plus a [`Strategy`] to [`best_move`], and the
//! engine answers for the side whose turn is next after that history.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod agent;
pub mod board;
pub mod heuristic;
pub mod search;

pub use agent::{AiPlayer, HumanPlayer, RandomPlayer};
pub use board::{Board, Cell, COLS, ROWS};
pub use heuristic::evaluate;

/// One of the two sides. An agent keeps its identity for its lifetime; the
/// other side is always [`Player::opponent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The side's digit, as used in move histories and board rendering.
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("column {column} is out of bounds")]
    ColumnOutOfBounds { column: usize },
}

/// Which agent answers a [`best_move`] request.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Minimax,
    Expectimax,
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: String,
    pub strategy: Strategy,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: usize,
}

/// One entry of a parsed move history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedMove {
    pub player: Player,
    pub column: usize,
}

pub fn parse_history(history: &str) -> Result<Vec<RecordedMove>, GameError> {
    if history.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut moves = Vec::new();
    let chars: Vec<char> = history.chars().collect();
    let mut idx = 0;
    while idx < chars.len() {
        let side = chars[idx];
        let player = match side {
            '1' => Player::One,
            '2' => Player::Two,
            _ => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("expected player 1 or 2, found {side}"),
                })
            }
        };
        idx += 1;
        if idx >= chars.len() {
            return Err(GameError::ParseMove {
                position: idx,
                reason: "missing column number".to_string(),
            });
        }
        let column_char = chars[idx];
        if !column_char.is_ascii_digit() {
            return Err(GameError::ParseMove {
                position: idx,
                reason: format!("expected column digit, found {column_char}"),
            });
        }
        let column = column_char.to_digit(10).unwrap() as usize;
        if column >= COLS {
            return Err(GameError::ParseMove {
                position: idx,
                reason: format!("column must be 0-{}", COLS - 1),
            });
        }
        moves.push(RecordedMove { player, column });
        idx += 1;
    }
    Ok(moves)
}

/// Replay a parsed history onto an empty board under gravity.
pub fn replay_history(moves: &[RecordedMove]) -> Result<Board, GameError> {
    let mut board = Board::empty();
    for mv in moves {
        if mv.column >= COLS {
            return Err(GameError::ColumnOutOfBounds { column: mv.column });
        }
        board
            .drop_piece(mv.column, mv.player)
            .ok_or(GameError::ColumnFull { column: mv.column })?;
    }
    Ok(board)
}

/// Answer a stateless move request: rebuild the board from the history,
/// then ask the requested strategy for the next column. The engine plays
/// for the side to move after the history; player 1 opens an empty one.
pub fn best_move(request: MoveRequest) -> Result<MoveResponse, GameError> {
    let moves = parse_history(&request.position)?;
    let board = replay_history(&moves)?;
    let to_move = moves
        .last()
        .map(|mv| mv.player.opponent())
        .unwrap_or(Player::One);
    let column = match request.strategy {
        Strategy::Minimax => AiPlayer::new(to_move).alpha_beta_move(&board),
        Strategy::Expectimax => AiPlayer::new(to_move).expectimax_move(&board),
        Strategy::Random => RandomPlayer::new(to_move)
            .select_move(&board)
            .unwrap_or(search::FALLBACK_COLUMN),
    };
    debug!(strategy = ?request.strategy, player = %to_move, column, "selected move");
    Ok(MoveResponse { column })
}
