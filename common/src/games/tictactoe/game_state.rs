use std::fmt;

use crate::games::SessionRng;
use super::board::{first_empty_cell, is_valid_move};
use super::types::{
    Board, BotMove, Evaluation, FirstPlayerMode, Mark, Outcome, BOARD_SIZE, EMPTY_BOARD,
};
use super::win_detector::outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    NotYourTurn,
    OutOfBounds(usize),
    CellOccupied(usize),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "Game is already over"),
            MoveError::NotYourTurn => write!(f, "Not your turn"),
            MoveError::OutOfBounds(index) => {
                write!(f, "Cell {} is out of bounds (0..{})", index, BOARD_SIZE)
            }
            MoveError::CellOccupied(index) => write!(f, "Cell {} is already marked", index),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_turn: Mark,
    pub status: Outcome,
    pub last_move: Option<usize>,
    pub ai_trace: Vec<Evaluation>,
}

impl TicTacToeGameState {
    pub fn new(first_player_mode: FirstPlayerMode, rng: &mut SessionRng) -> Self {
        let current_turn = match first_player_mode {
            FirstPlayerMode::Human => Mark::Human,
            FirstPlayerMode::Ai => Mark::Ai,
            FirstPlayerMode::Random => {
                if rng.random_bool() {
                    Mark::Human
                } else {
                    Mark::Ai
                }
            }
        };

        Self {
            board: EMPTY_BOARD,
            current_turn,
            status: Outcome::InProgress,
            last_move: None,
            ai_trace: Vec::new(),
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        self.status == Outcome::InProgress && self.current_turn == Mark::Ai
    }

    pub fn place_human_mark(&mut self, index: usize) -> Result<Outcome, MoveError> {
        self.ensure_turn(Mark::Human)?;

        if index >= BOARD_SIZE {
            return Err(MoveError::OutOfBounds(index));
        }
        if !is_valid_move(&self.board, index) {
            return Err(MoveError::CellOccupied(index));
        }

        self.ai_trace.clear();
        self.place(index, Mark::Human);
        Ok(self.status)
    }

    /// Plays the bot's choice and returns the cell actually marked.
    ///
    /// A choice that is out of range or already taken is replaced by the first
    /// empty cell, so a faulty selection can never corrupt the board.
    pub fn apply_bot_move(&mut self, bot_move: BotMove) -> Result<usize, MoveError> {
        self.ensure_turn(Mark::Ai)?;

        let index = if is_valid_move(&self.board, bot_move.index) {
            bot_move.index
        } else {
            first_empty_cell(&self.board).ok_or(MoveError::GameOver)?
        };

        self.ai_trace = if index == bot_move.index {
            bot_move.trace
        } else {
            Vec::new()
        };
        self.place(index, Mark::Ai);
        Ok(index)
    }

    fn ensure_turn(&self, mark: Mark) -> Result<(), MoveError> {
        if self.status != Outcome::InProgress {
            return Err(MoveError::GameOver);
        }
        if self.current_turn != mark {
            return Err(MoveError::NotYourTurn);
        }
        Ok(())
    }

    fn place(&mut self, index: usize, mark: Mark) {
        self.board[index] = mark;
        self.last_move = Some(index);
        self.status = outcome(&self.board);

        if self.status == Outcome::InProgress
            && let Some(next) = mark.opponent()
        {
            self.current_turn = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_state(first_player_mode: FirstPlayerMode) -> TicTacToeGameState {
        let mut rng = SessionRng::new(12345);
        TicTacToeGameState::new(first_player_mode, &mut rng)
    }

    #[test]
    fn test_new_game_is_empty_and_in_progress() {
        let state = create_state(FirstPlayerMode::Human);
        assert_eq!(state.board, EMPTY_BOARD);
        assert_eq!(state.current_turn, Mark::Human);
        assert_eq!(state.status, Outcome::InProgress);
        assert!(state.ai_trace.is_empty());
    }

    #[test]
    fn test_ai_first_mode_gives_ai_the_turn() {
        let state = create_state(FirstPlayerMode::Ai);
        assert!(state.is_ai_turn());
    }

    #[test]
    fn test_random_first_player_is_seeded() {
        let a = create_state(FirstPlayerMode::Random);
        let b = create_state(FirstPlayerMode::Random);
        assert_eq!(a.current_turn, b.current_turn);
        assert_ne!(a.current_turn, Mark::Empty);
    }

    #[test]
    fn test_human_move_passes_turn() {
        let mut state = create_state(FirstPlayerMode::Human);

        let result = state.place_human_mark(0);

        assert_eq!(result, Ok(Outcome::InProgress));
        assert_eq!(state.board[0], Mark::Human);
        assert_eq!(state.last_move, Some(0));
        assert!(state.is_ai_turn());
    }

    #[test]
    fn test_human_cant_move_twice() {
        let mut state = create_state(FirstPlayerMode::Human);
        state.place_human_mark(0).unwrap();

        assert_eq!(state.place_human_mark(1), Err(MoveError::NotYourTurn));
    }

    #[test]
    fn test_human_move_rejects_bad_cells() {
        let mut state = create_state(FirstPlayerMode::Human);
        state.board[3] = Mark::Ai;

        assert_eq!(state.place_human_mark(9), Err(MoveError::OutOfBounds(9)));
        assert_eq!(state.place_human_mark(3), Err(MoveError::CellOccupied(3)));
        assert_eq!(state.current_turn, Mark::Human);
    }

    #[test]
    fn test_bot_move_stores_trace() {
        let mut state = create_state(FirstPlayerMode::Ai);
        let trace = vec![Evaluation::new(4, 0), Evaluation::new(5, -2)];

        let placed = state.apply_bot_move(BotMove::new(4, trace.clone()));

        assert_eq!(placed, Ok(4));
        assert_eq!(state.board[4], Mark::Ai);
        assert_eq!(state.ai_trace, trace);
        assert_eq!(state.current_turn, Mark::Human);
    }

    #[test]
    fn test_human_move_clears_previous_trace() {
        let mut state = create_state(FirstPlayerMode::Ai);
        state
            .apply_bot_move(BotMove::new(4, vec![Evaluation::new(4, 0)]))
            .unwrap();

        state.place_human_mark(0).unwrap();

        assert!(state.ai_trace.is_empty());
    }

    #[test]
    fn test_bot_move_on_occupied_cell_falls_back_to_first_empty() {
        let mut state = create_state(FirstPlayerMode::Human);
        state.place_human_mark(0).unwrap();

        let placed = state.apply_bot_move(BotMove::new(0, vec![Evaluation::new(0, 5)]));

        assert_eq!(placed, Ok(1));
        assert_eq!(state.board[0], Mark::Human);
        assert_eq!(state.board[1], Mark::Ai);
        assert!(state.ai_trace.is_empty());
    }

    #[test]
    fn test_bot_move_out_of_range_falls_back() {
        let mut state = create_state(FirstPlayerMode::Ai);

        let placed = state.apply_bot_move(BotMove::untraced(42));

        assert_eq!(placed, Ok(0));
    }

    #[test]
    fn test_bot_cant_move_on_human_turn() {
        let mut state = create_state(FirstPlayerMode::Human);
        assert_eq!(
            state.apply_bot_move(BotMove::untraced(4)),
            Err(MoveError::NotYourTurn)
        );
    }

    #[test]
    fn test_completing_a_line_ends_the_game() {
        let mut state = create_state(FirstPlayerMode::Human);
        state.place_human_mark(0).unwrap();
        state.apply_bot_move(BotMove::untraced(3)).unwrap();
        state.place_human_mark(1).unwrap();
        state.apply_bot_move(BotMove::untraced(4)).unwrap();

        let result = state.place_human_mark(2);

        assert_eq!(result, Ok(Outcome::HumanWins));
        assert_eq!(state.status, Outcome::HumanWins);
        assert!(!state.is_ai_turn());
        assert_eq!(state.place_human_mark(5), Err(MoveError::GameOver));
        assert_eq!(state.apply_bot_move(BotMove::untraced(5)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_filling_the_board_without_a_line_is_a_draw() {
        let mut state = create_state(FirstPlayerMode::Human);
        // X O X / X O O / O X X
        for (human, ai) in [(0, 1), (2, 4), (3, 5), (7, 6)] {
            state.place_human_mark(human).unwrap();
            state.apply_bot_move(BotMove::untraced(ai)).unwrap();
        }

        let result = state.place_human_mark(8);

        assert_eq!(result, Ok(Outcome::Draw));
    }
}
