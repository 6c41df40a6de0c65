use common::games::tictactoe::{
    check_win_with_line, Difficulty, Evaluation, Mark, MoveError, Outcome, TicTacToeGameState,
    BOARD_SIDE, BOARD_SIZE,
};
use common::score_ledger::ScoreRecord;

pub const HELP: &str = "\
Commands:
  1-9                       mark a cell (numbered left to right, top to bottom)
  new                       start a new game
  difficulty <easy|medium|hard>
  trace                     toggle the AI evaluation trace
  scores                    show the scoreboard
  reset-scores              clear the scoreboard
  help                      show this help
  quit                      exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(usize),
    NewGame,
    SetDifficulty(Difficulty),
    ToggleTrace,
    Scores,
    ResetScores,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("Type a cell number or 'help'".to_string());
    };

    if let Ok(cell) = head.parse::<usize>() {
        if (1..=BOARD_SIZE).contains(&cell) {
            return Ok(Command::Play(cell - 1));
        }
        return Err(format!("Cell must be between 1 and {}", BOARD_SIZE));
    }

    match head.to_ascii_lowercase().as_str() {
        "new" | "n" => Ok(Command::NewGame),
        "difficulty" | "d" => {
            let value = parts
                .next()
                .ok_or_else(|| "Usage: difficulty <easy|medium|hard>".to_string())?;
            Ok(Command::SetDifficulty(value.parse()?))
        }
        "trace" | "t" => Ok(Command::ToggleTrace),
        "scores" | "s" => Ok(Command::Scores),
        "reset-scores" => Ok(Command::ResetScores),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command '{}', type 'help'", other)),
    }
}

pub fn render_board(state: &TicTacToeGameState) -> String {
    let winning_cells = check_win_with_line(&state.board)
        .map(|line| line.cells.to_vec())
        .unwrap_or_default();

    let rows: Vec<String> = state
        .board
        .chunks(BOARD_SIDE)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, &mark)| {
                    let index = row * BOARD_SIDE + col;
                    match mark {
                        Mark::Empty => format!(" {} ", index + 1),
                        _ if winning_cells.contains(&index) => format!("[{}]", mark),
                        _ => format!(" {} ", mark),
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    rows.join("\n---+---+---\n")
}

/// Scores the AI gave each candidate cell, laid out like the board.
pub fn render_trace(trace: &[Evaluation]) -> Option<String> {
    if trace.is_empty() {
        return None;
    }

    let mut cells = vec!["   .".to_string(); BOARD_SIZE];
    for evaluation in trace {
        if let Some(cell) = cells.get_mut(evaluation.index) {
            *cell = format!("{:>4}", evaluation.score);
        }
    }

    let rows: Vec<String> = cells.chunks(BOARD_SIDE).map(|row| row.join(" ")).collect();
    Some(format!("AI evaluation:\n{}", rows.join("\n")))
}

pub fn render_status(state: &TicTacToeGameState) -> String {
    match state.status {
        Outcome::InProgress if state.current_turn == Mark::Human => {
            "Your move (X).".to_string()
        }
        Outcome::InProgress => "AI is thinking...".to_string(),
        Outcome::HumanWins => "You win! Type 'new' to play again.".to_string(),
        Outcome::AiWins => "AI wins. Type 'new' to play again.".to_string(),
        Outcome::Draw => "Draw. Type 'new' to play again.".to_string(),
    }
}

/// Cell numbers in messages match the 1-9 the player types.
pub fn render_move_error(error: MoveError) -> String {
    match error {
        MoveError::CellOccupied(index) => format!("Cell {} is already taken", index + 1),
        MoveError::OutOfBounds(index) => format!("There is no cell {}", index + 1),
        other => other.to_string(),
    }
}

pub fn render_scores(record: &ScoreRecord) -> String {
    format!(
        "Score - you: {}  AI: {}  draws: {}",
        record.human_wins, record.ai_wins, record.draws
    )
}
