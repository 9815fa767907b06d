//! Static board evaluation: weighted pattern counts over every four-cell
//! window, shared by both searches.
use crate::board::{Board, Cell, COLS, ROWS};
use crate::Player;

/// The perspective player's lines count double; enemy lines are discounted
/// to a third, so holding threats outweighs denying them.
const OWN_WEIGHT: f64 = 2.0;
const OPPONENT_WEIGHT: f64 = 1.0 / 3.0;

/// Score `board` from `perspective`'s point of view. For each orientation
/// (rows, columns, diagonals) the total is `2 * own - opponent / 3`; the
/// three orientation results are summed. Negative scores are meaningful:
/// they say the opponent's pattern counts outweigh ours.
pub fn evaluate(board: &Board, perspective: Player) -> f64 {
    let opponent = perspective.opponent();
    let mut score = 0.0;
    for orientation_total in [horizontal_total, vertical_total, diagonal_total] {
        score += OWN_WEIGHT * orientation_total(board, perspective)
            - OPPONENT_WEIGHT * orientation_total(board, opponent);
    }
    score
}

fn horizontal_total(board: &Board, player: Player) -> f64 {
    (0..ROWS)
        .map(|row| line_score(&board.row(row), player))
        .sum()
}

fn vertical_total(board: &Board, player: Player) -> f64 {
    (0..COLS)
        .map(|col| line_score(&board.column(col), player))
        .sum()
}

// Known quirk: the diagonal term scores the mirror image's rows, not its
// diagonal slices, so it is a second (reversed) pass over row patterns.
// See DESIGN.md before changing it; a corrected version would score the
// diagonals of both orientations.
fn diagonal_total(board: &Board, player: Player) -> f64 {
    let mirrored = board.mirrored();
    (0..ROWS)
        .map(|row| line_score(&mirrored.row(row), player))
        .sum()
}

/// Score one line for `player` by sliding a four-cell window across it.
/// A window holding three marks and one hole multiplies the running
/// accumulator by four and bumps the threat counter, so threats found
/// later in a line weigh exponentially more than earlier ones; a window
/// holding two marks and two holes adds one. The line score is the
/// accumulator plus the threat counter. Overlapping windows each count.
fn line_score(line: &[Cell], player: Player) -> f64 {
    let mark = Some(player);
    let mut accumulator = 0.0;
    let mut threes = 0.0;
    for window in line.windows(4) {
        let marks = window.iter().filter(|&&cell| cell == mark).count();
        let holes = window.iter().filter(|&&cell| cell.is_none()).count();
        if marks == 3 && holes == 1 {
            accumulator *= 4.0;
            threes += 1.0;
        } else if marks == 2 && holes == 2 {
            accumulator += 1.0;
        }
    }
    accumulator + threes
}
