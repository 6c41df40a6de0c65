use crate::games::SessionRng;
use super::board::get_available_moves;
use super::game_state::TicTacToeGameState;
use super::types::{Board, BotMove, Difficulty, Evaluation, Mark, CENTER, CORNERS, EDGES};
use super::win_detector::{check_win, is_board_full};

const WIN_SCORE: i32 = 10;

/// Center first, then corners, then edges. Also decides ties between equally scored root moves.
const SEARCH_ORDER: [usize; 9] = [CENTER, 0, 2, 6, 8, 1, 3, 5, 7];

/// Snapshot handed to the move selector. The bot always plays [`Mark::Ai`].
pub struct BotInput {
    pub board: Board,
}

impl BotInput {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self { board: state.board }
    }
}

/// Picks the AI's next cell. Returns `None` only when the board has no empty cell.
pub fn calculate_move(
    difficulty: Difficulty,
    input: BotInput,
    rng: &mut SessionRng,
) -> Option<BotMove> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(&input, rng),
        Difficulty::Medium => calculate_positional_move(&input, rng),
        Difficulty::Hard => calculate_minimax_move(&input),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<BotMove> {
    let available_moves = get_available_moves(&input.board);
    rng.choose(&available_moves).map(BotMove::untraced)
}

fn calculate_positional_move(input: &BotInput, rng: &mut SessionRng) -> Option<BotMove> {
    if input.board[CENTER] == Mark::Empty {
        return Some(BotMove::untraced(CENTER));
    }

    let empty_in = |cells: [usize; 4]| -> Vec<usize> {
        cells
            .into_iter()
            .filter(|&idx| input.board[idx] == Mark::Empty)
            .collect()
    };

    rng.choose(&empty_in(CORNERS))
        .or_else(|| rng.choose(&empty_in(EDGES)))
        .map(BotMove::untraced)
}

/// Exhaustive minimax with alpha-beta pruning.
///
/// Every root candidate is searched with a full window, so each [`Evaluation`]
/// holds its exact score; pruning only happens below the root. The trace is
/// returned in ascending cell order. Among candidates sharing the best score
/// the first one in search order wins, so an empty board opens in the center.
pub fn calculate_minimax_move(input: &BotInput) -> Option<BotMove> {
    let available_moves = get_available_moves(&input.board);
    let &first_available = available_moves.first()?;

    if available_moves.len() == 1 || check_win(&input.board).is_some() {
        return Some(BotMove::untraced(first_available));
    }

    let mut board = input.board;
    let mut best_score = i32::MIN;
    let mut trace = Vec::with_capacity(available_moves.len());

    for index in ordered_moves(&input.board) {
        board[index] = Mark::Ai;
        let score = minimax(&mut board, 1, false, i32::MIN, i32::MAX);
        board[index] = Mark::Empty;

        trace.push(Evaluation::new(index, score));
        best_score = best_score.max(score);
    }

    let chosen = trace
        .iter()
        .find(|evaluation| evaluation.score == best_score)
        .map(|evaluation| evaluation.index)
        .unwrap_or(first_available);

    trace.sort_by_key(|evaluation| evaluation.index);
    Some(BotMove::new(chosen, trace))
}

fn ordered_moves(board: &Board) -> Vec<usize> {
    SEARCH_ORDER
        .into_iter()
        .filter(|&idx| board[idx] == Mark::Empty)
        .collect()
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match check_win(board) {
        Some(Mark::Ai) => return WIN_SCORE - depth,
        Some(Mark::Human) => return depth - WIN_SCORE,
        _ => {}
    }

    if is_board_full(board) {
        return 0;
    }

    let moves = ordered_moves(board);

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for idx in moves {
            board[idx] = Mark::Ai;
            let eval = minimax(board, depth + 1, false, alpha, beta);
            board[idx] = Mark::Empty;

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for idx in moves {
            board[idx] = Mark::Human;
            let eval = minimax(board, depth + 1, true, alpha, beta);
            board[idx] = Mark::Empty;

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
