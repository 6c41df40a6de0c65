use std::io::{self, Write};

use common::games::tictactoe::{SessionError, TicTacToeSession};
use common::score_ledger::ScoreRecord;
use common::storage::{ContentProvider, DocumentSerializer};
use common::{log, log_warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;

use crate::terminal::{
    parse_command, render_board, render_move_error, render_scores, render_status, render_trace,
    Command, HELP,
};

pub struct GameLoop<TContentProvider, TSerializer>
where
    TContentProvider: ContentProvider,
    TSerializer: DocumentSerializer<ScoreRecord>,
{
    session: TicTacToeSession<TContentProvider, TSerializer>,
    scores: watch::Receiver<ScoreRecord>,
    show_trace: bool,
}

impl<TContentProvider, TSerializer> GameLoop<TContentProvider, TSerializer>
where
    TContentProvider: ContentProvider,
    TSerializer: DocumentSerializer<ScoreRecord>,
{
    pub fn new(session: TicTacToeSession<TContentProvider, TSerializer>, show_trace: bool) -> Self {
        let scores = session.ledger().subscribe();
        Self {
            session,
            scores,
            show_trace,
        }
    }

    /// Reads commands line by line until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        writeln!(output, "{}", render_scores(&self.scores.borrow_and_update()))?;
        self.start_game(output).await?;

        loop {
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command, output).await?,
                Err(message) => writeln!(output, "{}", message)?,
            }

            if self.scores.has_changed().unwrap_or(false) {
                writeln!(output, "{}", render_scores(&self.scores.borrow_and_update()))?;
            }
        }

        log!("Leaving after {} games", self.session.ledger().current().games_played());
        Ok(())
    }

    async fn handle<W: Write>(&mut self, command: Command, output: &mut W) -> io::Result<()> {
        match command {
            Command::Play(index) => {
                match self.session.resume_ai_turn().await {
                    Ok(None) => {}
                    Ok(Some(_)) => {
                        writeln!(output, "The AI has now made its pending move.")?;
                        return self.write_state(output);
                    }
                    Err(e) => return self.report(e, output),
                }
                let result = self.session.play_human_turn(index).await;
                match result {
                    Ok(_) => self.write_state(output)?,
                    Err(SessionError::Move(e)) => writeln!(output, "{}", render_move_error(e))?,
                    Err(e) => self.report(e, output)?,
                }
            }
            Command::NewGame => self.start_game(output).await?,
            Command::SetDifficulty(difficulty) => {
                self.session.set_difficulty(difficulty);
                writeln!(output, "Difficulty: {}", difficulty)?;
            }
            Command::ToggleTrace => {
                self.show_trace = !self.show_trace;
                writeln!(
                    output,
                    "AI trace {}",
                    if self.show_trace { "on" } else { "off" }
                )?;
            }
            Command::Scores => {
                writeln!(output, "{}", render_scores(&self.scores.borrow_and_update()))?;
            }
            Command::ResetScores => {
                if let Err(e) = self.session.ledger().reset() {
                    self.report(SessionError::Storage(e), output)?;
                }
            }
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    async fn start_game<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        if let Err(e) = self.session.start_game().await {
            return self.report(e, output);
        }
        writeln!(output, "New game, difficulty {}", self.session.settings().difficulty)?;
        self.write_state(output)
    }

    fn write_state<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let state = self.session.game_state();
        writeln!(output, "{}", render_board(state))?;
        if self.show_trace
            && let Some(trace) = render_trace(&state.ai_trace)
        {
            writeln!(output, "{}", trace)?;
        }
        writeln!(output, "{}", render_status(state))
    }

    fn report<W: Write>(&self, error: SessionError, output: &mut W) -> io::Result<()> {
        log_warn!("{}", error);
        writeln!(output, "Error: {}", error)?;
        if self.session.game_state().is_ai_turn() {
            writeln!(output, "Enter any cell to let the AI try again, or 'new' to restart.")?;
        }
        Ok(())
    }
}
