use std::fmt;

use crate::game::{Board, Player};

/// Search score from the maximizer's point of view.
///
/// Variants are ordered `Loss < Value(_) < Win`, so decisive results compare
/// strictly outside every interior value and saturate under `min`/`max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    Loss,
    Value(i32),
    Win,
}

impl Score {
    /// Undecided position.
    pub const NEUTRAL: Score = Score::Value(0);
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Loss => write!(f, "loss"),
            Score::Value(v) => write!(f, "{v}"),
            Score::Win => write!(f, "win"),
        }
    }
}

/// Static terminal evaluation.
///
/// Returns `Win` if `maximizer` owns a line of four, `Loss` if the opponent
/// does and `Score::NEUTRAL` otherwise. Should both own a line, the first
/// one met in scan order decides.
pub fn evaluate(board: &Board, maximizer: Player) -> Score {
    match board.first_line_owner().and_then(Player::from_cell) {
        Some(owner) if owner == maximizer => Score::Win,
        Some(_) => Score::Loss,
        None => Score::NEUTRAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn score_ordering_saturates() {
        assert!(Score::Win > Score::Value(i32::MAX));
        assert!(Score::Loss < Score::Value(i32::MIN));
        assert!(Score::Value(-1) < Score::NEUTRAL);
        assert_eq!(Score::Win.max(Score::Value(1_000_000)), Score::Win);
        assert_eq!(Score::Loss.min(Score::Value(-1_000_000)), Score::Loss);
    }

    #[test]
    fn empty_board_is_neutral() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Player::Red), Score::NEUTRAL);
        assert_eq!(evaluate(&board, Player::Yellow), Score::NEUTRAL);
    }

    #[test]
    fn four_for_one_player_is_decisive_for_that_player() {
        // Red: bottom row 0..3, Yellow stacked on 0..2
        let state = GameState::from_moves("1122334").unwrap();
        let board = state.board();
        assert_eq!(evaluate(board, Player::Red), Score::Win);
        assert_eq!(evaluate(board, Player::Yellow), Score::Loss);
    }

    #[test]
    fn vertical_and_diagonal_fours() {
        let vertical = GameState::from_moves("1212121").unwrap();
        assert_eq!(evaluate(vertical.board(), Player::Red), Score::Win);

        // Yellow completes the / diagonal from (5,1) to (2,4)
        let diagonal = GameState::from_moves("334532554435").unwrap();
        assert!(diagonal.board().has_line_of_four(Player::Yellow));
        assert_eq!(evaluate(diagonal.board(), Player::Yellow), Score::Win);
        assert_eq!(evaluate(diagonal.board(), Player::Red), Score::Loss);
    }

    #[test]
    fn horizontal_line_decides_when_both_players_own_one() {
        let mut board = Board::new();
        for col in 0..4 {
            board.apply(col, Player::Yellow).unwrap();
        }
        for _ in 0..4 {
            board.apply(6, Player::Red).unwrap();
        }
        assert!(board.has_line_of_four(Player::Red));
        assert!(board.has_line_of_four(Player::Yellow));

        // Rows are scanned before columns, so Yellow's bottom row counts
        assert_eq!(evaluate(&board, Player::Red), Score::Loss);
        assert_eq!(evaluate(&board, Player::Yellow), Score::Win);
    }

    #[test]
    fn three_in_a_row_is_neutral() {
        let state = GameState::from_moves("11223").unwrap();
        assert_eq!(evaluate(state.board(), Player::Red), Score::NEUTRAL);
    }

    #[test]
    fn full_board_without_line_is_neutral() {
        let state =
            GameState::from_moves("121212 343434 565656 212121 434343 656565 777777").unwrap();
        assert!(state.board().is_full());
        assert_eq!(evaluate(state.board(), Player::Red), Score::NEUTRAL);
    }
}
