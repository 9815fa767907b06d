//! The playing grid: a 6x7 board addressed `[row][col]`, row 0 on top, with
//! gravity-drop move application and four-in-a-row detection.
use std::fmt;

use crate::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// One grid cell: empty, or holding a player's mark.
pub type Cell = Option<Player>;

/// The board is value-like: search clones it freely and mutates only its
/// private copies, so the driver's board is never touched mid-search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; COLS]; ROWS],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// A column accepts a drop while its top cell is empty.
    pub fn is_open(&self, column: usize) -> bool {
        column < COLS && self.cells[0][column].is_none()
    }

    /// Open columns in ascending order. Move selection breaks ties by this
    /// ordering: the first column reaching a best value keeps it.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_open(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_open(col))
    }

    /// Drop `player`'s mark into `column` and return the landing row. A
    /// full or out-of-range column leaves the board untouched and returns
    /// `None`. Non-empty cells in a column always form a contiguous block
    /// anchored at the bottom row.
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Option<usize> {
        if !self.is_open(column) {
            return None;
        }
        for row in (0..ROWS).rev() {
            if self.cells[row][column].is_none() {
                self.cells[row][column] = Some(player);
                return Some(row);
            }
        }
        unreachable!("an open column has an empty cell")
    }

    pub fn row(&self, row: usize) -> [Cell; COLS] {
        self.cells[row]
    }

    pub fn column(&self, column: usize) -> [Cell; ROWS] {
        std::array::from_fn(|row| self.cells[row][column])
    }

    /// The left-right mirror image of this board.
    pub fn mirrored(&self) -> Board {
        let mut cells = self.cells;
        for row in cells.iter_mut() {
            row.reverse();
        }
        Board { cells }
    }

    /// Top-left-to-bottom-right diagonal `offset` columns right of the main
    /// diagonal; negative offsets start below it.
    fn diagonal(&self, offset: isize) -> Vec<Cell> {
        let (mut row, mut col) = if offset >= 0 {
            (0, offset as usize)
        } else {
            ((-offset) as usize, 0)
        };
        let mut cells = Vec::new();
        while row < ROWS && col < COLS {
            cells.push(self.cells[row][col]);
            row += 1;
            col += 1;
        }
        cells
    }

    /// True when `player` holds four consecutive marks along a row, a
    /// column, or a diagonal of the board or of its mirror image (the
    /// mirror covers the up-right diagonal family).
    pub fn has_won(&self, player: Player) -> bool {
        (0..ROWS).any(|row| contains_run(&self.cells[row], player))
            || (0..COLS).any(|col| contains_run(&self.column(col), player))
            || self.diagonals_contain_run(player)
            || self.mirrored().diagonals_contain_run(player)
    }

    // Diagonals shorter than four cells cannot hold a run and are skipped.
    fn diagonals_contain_run(&self, player: Player) -> bool {
        let lo = 4 - ROWS as isize;
        let hi = COLS as isize - 4;
        (lo..=hi).any(|offset| contains_run(&self.diagonal(offset), player))
    }
}

fn contains_run(line: &[Cell], player: Player) -> bool {
    let mark = Some(player);
    line.windows(4).any(|w| w.iter().all(|&cell| cell == mark))
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let glyph = match cell {
                    Some(player) => char::from(b'0' + player.number()),
                    None => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gravity_holds(board: &Board) -> bool {
        (0..COLS).all(|col| {
            (0..ROWS - 1)
                .all(|row| board.get(row, col).is_none() || board.get(row + 1, col).is_some())
        })
    }

    fn occupied_in_column(board: &Board, col: usize) -> usize {
        (0..ROWS).filter(|&row| board.get(row, col).is_some()).count()
    }

    #[test]
    fn drop_lands_at_bottom_then_stacks() {
        let mut board = Board::empty();
        assert_eq!(board.drop_piece(3, Player::One), Some(ROWS - 1));
        assert_eq!(board.get(ROWS - 1, 3), Some(Player::One));
        assert_eq!(board.drop_piece(3, Player::Two), Some(ROWS - 2));
        assert_eq!(board.get(ROWS - 2, 3), Some(Player::Two));
    }

    #[test]
    fn drop_on_full_column_is_a_noop() {
        let mut board = Board::empty();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            assert!(board.drop_piece(0, player).is_some());
        }
        let snapshot = board.clone();
        assert_eq!(board.drop_piece(0, Player::One), None);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn drop_out_of_range_is_a_noop() {
        let mut board = Board::empty();
        assert_eq!(board.drop_piece(COLS, Player::One), None);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn drops_preserve_gravity_and_add_one_mark() {
        let mut board = Board::empty();
        let script = [3, 3, 0, 6, 3, 5, 0, 0, 6, 1];
        for (turn, &col) in script.iter().enumerate() {
            let player = if turn % 2 == 0 { Player::One } else { Player::Two };
            let before = occupied_in_column(&board, col);
            assert!(board.drop_piece(col, player).is_some());
            assert_eq!(occupied_in_column(&board, col), before + 1);
            assert!(gravity_holds(&board));
        }
    }

    #[test]
    fn legal_moves_ascend_and_skip_full_columns() {
        let mut board = Board::empty();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            board.drop_piece(2, player);
        }
        assert_eq!(board.legal_moves(), vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn full_board_has_no_legal_moves() {
        let mut board = Board::empty();
        for col in 0..COLS {
            for i in 0..ROWS {
                let player = if i % 2 == 0 { Player::One } else { Player::Two };
                board.drop_piece(col, player);
            }
        }
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn queries_do_not_mutate() {
        let mut board = Board::empty();
        for &col in &[0, 1, 1, 4] {
            board.drop_piece(col, Player::One);
        }
        let snapshot = board.clone();
        board.legal_moves();
        board.has_won(Player::One);
        board.has_won(Player::Two);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn detects_horizontal_win() {
        let mut board = Board::empty();
        for col in 2..6 {
            board.drop_piece(col, Player::Two);
        }
        assert!(board.has_won(Player::Two));
        assert!(!board.has_won(Player::One));
    }

    #[test]
    fn detects_vertical_win() {
        let mut board = Board::empty();
        for _ in 0..4 {
            board.drop_piece(5, Player::One);
        }
        assert!(board.has_won(Player::One));
    }

    #[test]
    fn detects_up_right_diagonal_win() {
        let mut board = Board::empty();
        board.drop_piece(0, Player::One);
        board.drop_piece(1, Player::Two);
        board.drop_piece(1, Player::One);
        board.drop_piece(2, Player::Two);
        board.drop_piece(2, Player::Two);
        board.drop_piece(2, Player::One);
        board.drop_piece(3, Player::Two);
        board.drop_piece(3, Player::Two);
        board.drop_piece(3, Player::Two);
        board.drop_piece(3, Player::One);
        assert!(board.has_won(Player::One));
        assert!(!board.has_won(Player::Two));
    }

    #[test]
    fn detects_down_right_diagonal_win() {
        let mut board = Board::empty();
        board.drop_piece(6, Player::One);
        board.drop_piece(5, Player::Two);
        board.drop_piece(5, Player::One);
        board.drop_piece(4, Player::Two);
        board.drop_piece(4, Player::Two);
        board.drop_piece(4, Player::One);
        board.drop_piece(3, Player::Two);
        board.drop_piece(3, Player::Two);
        board.drop_piece(3, Player::Two);
        board.drop_piece(3, Player::One);
        assert!(board.has_won(Player::One));
    }

    #[test]
    fn three_in_a_row_is_not_a_win() {
        let mut board = Board::empty();
        for col in 0..3 {
            board.drop_piece(col, Player::One);
        }
        assert!(!board.has_won(Player::One));
    }

    #[test]
    fn renders_rows_top_down() {
        let mut board = Board::empty();
        board.drop_piece(3, Player::One);
        board.drop_piece(3, Player::Two);
        let rendered = board.to_string();
        assert_eq!(
            rendered,
            ".......\n.......\n.......\n.......\n...2...\n...1...\n"
        );
    }
}
