//! The three player types: the search-backed AI, a uniformly random
//! chooser, and a prompt-driven human.
use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, COLS};
use crate::search::{alpha_beta_move, expectimax_move, ALPHA_BETA_DEPTH, EXPECTIMAX_DEPTH};
use crate::Player;

/// Search-backed agent. Holds its player identity for its lifetime; the
/// identity decides which side the evaluator favors.
#[derive(Clone, Copy, Debug)]
pub struct AiPlayer {
    player: Player,
}

impl AiPlayer {
    pub fn new(player: Player) -> Self {
        AiPlayer { player }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Next column under the fixed-depth alpha-beta search, which assumes
    /// a rational opponent.
    pub fn alpha_beta_move(&self, board: &Board) -> usize {
        alpha_beta_move(board, self.player, ALPHA_BETA_DEPTH)
    }

    /// Next column under the fixed-depth expectimax search, which assumes
    /// an opponent picking uniformly among legal columns.
    pub fn expectimax_move(&self, board: &Board) -> usize {
        expectimax_move(board, self.player, EXPECTIMAX_DEPTH)
    }
}

/// Uniform choice among legal columns.
pub struct RandomPlayer {
    player: Player,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(player: Player) -> Self {
        RandomPlayer {
            player,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed construction for reproducible games.
    pub fn seeded(player: Player, seed: u64) -> Self {
        RandomPlayer {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// A uniformly random legal column, or `None` on a dead board.
    pub fn select_move(&mut self, board: &Board) -> Option<usize> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.gen_range(0..legal.len())])
    }
}

/// Reads a column from an interactive reader, re-prompting until the input
/// names an open column.
pub struct HumanPlayer {
    player: Player,
}

impl HumanPlayer {
    pub fn new(player: Player) -> Self {
        HumanPlayer { player }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Prompt on `output` and read column choices from `input` until one
    /// is legal on `board`. Closed input surfaces as `UnexpectedEof`.
    pub fn select_move<R, W>(&self, board: &Board, mut input: R, mut output: W) -> io::Result<usize>
    where
        R: BufRead,
        W: Write,
    {
        loop {
            write!(
                output,
                "player {}, enter a column (0-{}): ",
                self.player,
                COLS - 1
            )?;
            output.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a column was chosen",
                ));
            }
            match line.trim().parse::<usize>() {
                Ok(column) if board.is_open(column) => return Ok(column),
                _ => {
                    writeln!(
                        output,
                        "column is full or out of range, open columns: {:?}",
                        board.legal_moves()
                    )?;
                }
            }
        }
    }
}
