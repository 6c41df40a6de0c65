use super::types::{Board, Mark, Outcome, WinningLine, BOARD_SIDE};

/// Rows, then columns, then the two diagonals.
pub const WIN_LINES: [[usize; BOARD_SIDE]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    WIN_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let mark = board[a];
        if mark != Mark::Empty && mark == board[b] && mark == board[c] {
            Some(WinningLine::new(mark, line))
        } else {
            None
        }
    })
}

pub fn is_board_full(board: &Board) -> bool {
    board.iter().all(|&cell| cell != Mark::Empty)
}

pub fn is_terminal(board: &Board) -> bool {
    check_win(board).is_some() || is_board_full(board)
}

pub fn outcome(board: &Board) -> Outcome {
    match check_win(board) {
        Some(Mark::Human) => Outcome::HumanWins,
        Some(Mark::Ai) => Outcome::AiWins,
        _ if is_board_full(board) => Outcome::Draw,
        _ => Outcome::InProgress,
    }
}
