use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    calculate_move, is_terminal, BotInput, Board, Difficulty, Mark, EMPTY_BOARD,
};

fn play_full_game(first: Mark) {
    let mut board = EMPTY_BOARD;
    let mut current_mark = first;
    let mut rng = SessionRng::new(7);

    while !is_terminal(&board) {
        let difficulty = if current_mark == Mark::Ai {
            Difficulty::Hard
        } else {
            Difficulty::Medium
        };
        // The selector always plays for the AI; swap sides for the human's turn.
        let input = if current_mark == Mark::Ai {
            BotInput::new(board)
        } else {
            BotInput::new(swap_sides(board))
        };

        let Some(bot_move) = calculate_move(difficulty, input, &mut rng) else {
            break;
        };
        board[bot_move.index] = current_mark;
        current_mark = current_mark.opponent().unwrap();
    }
}

fn swap_sides(board: Board) -> Board {
    board.map(|cell| cell.opponent().unwrap_or(Mark::Empty))
}

fn mid_game_board() -> Board {
    let mut board = EMPTY_BOARD;
    board[0] = Mark::Human;
    board[4] = Mark::Ai;
    board[8] = Mark::Human;
    board
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group.bench_function("single_move_empty", |b| {
        let mut rng = SessionRng::new(1);
        b.iter(|| calculate_move(Difficulty::Hard, BotInput::new(black_box(EMPTY_BOARD)), &mut rng))
    });

    group.bench_function("single_move_mid_game", |b| {
        let board = mid_game_board();
        let mut rng = SessionRng::new(1);
        b.iter(|| calculate_move(Difficulty::Hard, BotInput::new(black_box(board)), &mut rng))
    });

    group.bench_function("full_game_vs_medium", |b| {
        b.iter(|| play_full_game(black_box(Mark::Human)))
    });

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
