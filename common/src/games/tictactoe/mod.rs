mod board;
mod bot_controller;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::{first_empty_cell, get_available_moves, is_valid_move};
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move};
pub use game_state::{MoveError, TicTacToeGameState};
pub use session::{SessionError, TicTacToeSession, TicTacToeSessionSettings};
pub use types::{
    BOARD_SIDE, BOARD_SIZE, Board, BotMove, CENTER, CORNERS, Difficulty, EDGES, EMPTY_BOARD,
    Evaluation, FirstPlayerMode, Mark, Outcome, WinningLine,
};
pub use win_detector::{WIN_LINES, check_win, check_win_with_line, is_board_full, is_terminal, outcome};
