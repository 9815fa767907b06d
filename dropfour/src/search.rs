//! Fixed-depth game-tree searches: alpha-beta minimax against a rational
//! opponent model, expectimax against a uniformly random one. Both explore
//! hypothetical futures on private board copies and score leaves with the
//! static evaluator from the agent's perspective.
use tracing::trace;

use crate::board::{Board, COLS};
use crate::heuristic::evaluate;
use crate::Player;

/// Plies explored below each candidate move by the alpha-beta agent.
pub const ALPHA_BETA_DEPTH: u32 = 4;
/// Plies explored below each candidate move by the expectimax agent; the
/// random opponent model gains little from deeper lookahead.
pub const EXPECTIMAX_DEPTH: u32 = 1;

/// Starting value of the running best at the root. A candidate is adopted
/// only when its value strictly exceeds the running best, so on boards
/// where every candidate scores at or below zero the drivers return
/// [`FALLBACK_COLUMN`] instead of the least-bad column.
pub const FALLBACK_THRESHOLD: f64 = 0.0;
/// Column returned when no candidate clears [`FALLBACK_THRESHOLD`].
pub const FALLBACK_COLUMN: usize = 0;

/// Bounds handed to the root alpha-beta call. They are crossed: alpha
/// starts at +inf and beta at -inf, so the cutoff tests pass after the
/// first column at every level and each node below the root explores a
/// single branch. Swapping them to the canonical (-inf, +inf) widens the
/// search and changes move choice; leave them crossed unless the agent is
/// being retuned.
pub const ROOT_ALPHA: f64 = f64::INFINITY;
pub const ROOT_BETA: f64 = f64::NEG_INFINITY;

/// Which mark a search node drops. The maximizing branch plays the
/// opponent's mark and the minimizing (or chance) branch plays the agent's
/// own, an inversion of the conventional assignment that is observable in
/// move choice. Kept as a single policy point so it can be audited or
/// swapped in one place.
fn branch_mover(agent: Player, maximizing: bool) -> Player {
    if maximizing {
        agent.opponent()
    } else {
        agent
    }
}

/// Pick a column for `agent` by valuing each legal candidate with the
/// alpha-beta search; the first strictly-improving candidate in ascending
/// column order wins. Never mutates `board`.
pub fn alpha_beta_move(board: &Board, agent: Player, depth: u32) -> usize {
    let mut best = FALLBACK_THRESHOLD;
    let mut choice = FALLBACK_COLUMN;
    for col in 0..COLS {
        if !board.is_open(col) {
            continue;
        }
        let mut child = board.clone();
        child.drop_piece(col, agent);
        let value = alpha_beta_value(&child, agent, depth, ROOT_ALPHA, ROOT_BETA, true);
        trace!(col, value, "alpha-beta candidate");
        if value > best {
            best = value;
            choice = col;
        }
    }
    choice
}

/// Recursive alpha-beta minimax. A node is a leaf when the depth is
/// exhausted or the agent already holds a win on this board; leaves are
/// scored by the static evaluator from the agent's perspective.
pub fn alpha_beta_value(
    board: &Board,
    agent: Player,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
) -> f64 {
    if depth == 0 || board.has_won(agent) {
        return evaluate(board, agent);
    }
    let mover = branch_mover(agent, maximizing);
    if maximizing {
        let mut value = f64::NEG_INFINITY;
        for col in 0..COLS {
            if board.is_open(col) {
                let mut child = board.clone();
                child.drop_piece(col, mover);
                value = value.max(alpha_beta_value(&child, agent, depth - 1, alpha, beta, false));
            }
            // the cutoff test runs even when the column was skipped as full
            if value >= beta {
                return value;
            }
            alpha = alpha.max(value);
        }
        value
    } else {
        let mut value = f64::INFINITY;
        for col in 0..COLS {
            if board.is_open(col) {
                let mut child = board.clone();
                child.drop_piece(col, mover);
                // the turn flag is handed down unchanged: once the search
                // enters a minimizing level it never returns to maximizing
                value = value.min(alpha_beta_value(
                    &child,
                    agent,
                    depth - 1,
                    alpha,
                    beta,
                    maximizing,
                ));
            }
            if value <= alpha {
                return value;
            }
            beta = beta.min(value);
        }
        value
    }
}

/// Pick a column for `agent` by valuing each legal candidate with the
/// expectimax search; tie-break and fallback policy match
/// [`alpha_beta_move`]. Never mutates `board`.
pub fn expectimax_move(board: &Board, agent: Player, depth: u32) -> usize {
    let mut best = FALLBACK_THRESHOLD;
    let mut choice = FALLBACK_COLUMN;
    for col in 0..COLS {
        if !board.is_open(col) {
            continue;
        }
        let mut child = board.clone();
        child.drop_piece(col, agent);
        let value = expectimax_value(&child, agent, depth, true);
        trace!(col, value, "expectimax candidate");
        if value > best {
            best = value;
            choice = col;
        }
    }
    choice
}

/// Recursive expectimax value. Maximizing nodes take the best child;
/// chance nodes average over every legal column, each equally likely, and
/// hand the turn flag down unchanged, so levels below a chance node stay
/// chance levels. Leaf policy matches [`alpha_beta_value`].
pub fn expectimax_value(board: &Board, agent: Player, depth: u32, maximizing: bool) -> f64 {
    if depth == 0 || board.has_won(agent) {
        return evaluate(board, agent);
    }
    let mover = branch_mover(agent, maximizing);
    if maximizing {
        let mut value = f64::NEG_INFINITY;
        for col in board.legal_moves() {
            let mut child = board.clone();
            child.drop_piece(col, mover);
            value = value.max(expectimax_value(&child, agent, depth - 1, false));
        }
        value
    } else {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return 0.0;
        }
        let weight = 1.0 / legal.len() as f64;
        let mut value = 0.0;
        for col in legal {
            let mut child = board.clone();
            child.drop_piece(col, mover);
            value += weight * expectimax_value(&child, agent, depth - 1, false);
        }
        value
    }
}
