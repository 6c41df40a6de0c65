use std::fmt;

use crate::games::SessionRng;
use crate::score_ledger::{ScoreLedger, ScoreRecord};
use crate::storage::{ContentProvider, DocumentSerializer};
use crate::{log, log_debug, log_warn};
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::{MoveError, TicTacToeGameState};
use super::types::{Difficulty, FirstPlayerMode, Outcome};

#[derive(Debug)]
pub enum SessionError {
    Move(MoveError),
    Storage(String),
    BotTaskFailed(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Move(e) => write!(f, "{}", e),
            SessionError::Storage(e) => write!(f, "Score storage error: {}", e),
            SessionError::BotTaskFailed(e) => write!(f, "AI move computation failed: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(e: MoveError) -> Self {
        SessionError::Move(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub difficulty: Difficulty,
    pub first_player_mode: FirstPlayerMode,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            first_player_mode: FirstPlayerMode::Human,
        }
    }
}

/// One human against the AI, game after game, with results kept in a ledger.
pub struct TicTacToeSession<TContentProvider, TSerializer>
where
    TContentProvider: ContentProvider,
    TSerializer: DocumentSerializer<ScoreRecord>,
{
    game_state: TicTacToeGameState,
    settings: TicTacToeSessionSettings,
    ledger: ScoreLedger<TContentProvider, TSerializer>,
    rng: SessionRng,
    games_started: u64,
}

impl<TContentProvider, TSerializer> TicTacToeSession<TContentProvider, TSerializer>
where
    TContentProvider: ContentProvider,
    TSerializer: DocumentSerializer<ScoreRecord>,
{
    pub fn new(
        settings: TicTacToeSessionSettings,
        ledger: ScoreLedger<TContentProvider, TSerializer>,
        mut rng: SessionRng,
    ) -> Self {
        let game_state = TicTacToeGameState::new(settings.first_player_mode, &mut rng);
        Self {
            game_state,
            settings,
            ledger,
            rng,
            games_started: 0,
        }
    }

    pub fn game_state(&self) -> &TicTacToeGameState {
        &self.game_state
    }

    pub fn ledger(&self) -> &ScoreLedger<TContentProvider, TSerializer> {
        &self.ledger
    }

    pub fn settings(&self) -> TicTacToeSessionSettings {
        self.settings
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        log!("Difficulty set to {}", difficulty);
        self.settings.difficulty = difficulty;
    }

    pub fn set_first_player_mode(&mut self, first_player_mode: FirstPlayerMode) {
        self.settings.first_player_mode = first_player_mode;
    }

    /// Replaces the board with a fresh one and lets the AI open if it moves first.
    pub async fn start_game(&mut self) -> Result<(), SessionError> {
        self.game_state = TicTacToeGameState::new(self.settings.first_player_mode, &mut self.rng);
        self.games_started += 1;
        log!(
            "Game {} started ({}, {} moves first)",
            self.games_started,
            self.settings.difficulty,
            if self.game_state.is_ai_turn() { "AI" } else { "human" }
        );

        if self.game_state.is_ai_turn() {
            self.play_ai_turn().await?;
        }
        Ok(())
    }

    /// Plays the human's cell, then the AI's reply while the game is still open.
    pub async fn play_human_turn(&mut self, index: usize) -> Result<Outcome, SessionError> {
        let status = self.game_state.place_human_mark(index)?;
        log_debug!("Human played cell {}", index);

        if status.is_finished() {
            self.finish_game(status)?;
            return Ok(status);
        }

        self.play_ai_turn().await
    }

    /// Plays the AI's turn if it is still owed, e.g. after a failed computation.
    /// Returns `None` when the AI has nothing to do.
    pub async fn resume_ai_turn(&mut self) -> Result<Option<Outcome>, SessionError> {
        if !self.game_state.is_ai_turn() {
            return Ok(None);
        }
        log_warn!("Resuming pending AI turn");
        self.play_ai_turn().await.map(Some)
    }

    pub async fn play_ai_turn(&mut self) -> Result<Outcome, SessionError> {
        if !self.game_state.is_ai_turn() {
            return Err(SessionError::Move(if self.game_state.status.is_finished() {
                MoveError::GameOver
            } else {
                MoveError::NotYourTurn
            }));
        }

        let bot_input = BotInput::from_game_state(&self.game_state);
        let difficulty = self.settings.difficulty;
        let mut bot_rng = self.rng.fork();

        let calculated_move = tokio::task::spawn_blocking(move || {
            calculate_move(difficulty, bot_input, &mut bot_rng)
        })
        .await
        .map_err(|e| SessionError::BotTaskFailed(e.to_string()))?;

        let Some(bot_move) = calculated_move else {
            return Err(SessionError::Move(MoveError::GameOver));
        };

        let requested = bot_move.index;
        if !bot_move.trace.is_empty() {
            let trace: Vec<String> = bot_move
                .trace
                .iter()
                .map(|e| format!("{}:{}", e.index, e.score))
                .collect();
            log_debug!("Search trace [{}]", trace.join(", "));
        }

        let placed = self.game_state.apply_bot_move(bot_move)?;
        if placed != requested {
            log_warn!("AI chose unavailable cell {}, played {} instead", requested, placed);
        } else {
            log_debug!("AI played cell {}", placed);
        }

        let status = self.game_state.status;
        if status.is_finished() {
            self.finish_game(status)?;
        }
        Ok(status)
    }

    fn finish_game(&mut self, status: Outcome) -> Result<ScoreRecord, SessionError> {
        let record = self.ledger.record(status).map_err(SessionError::Storage)?;
        log!(
            "Game {} finished: {} (human {}, AI {}, draws {})",
            self.games_started,
            status,
            record.human_wins,
            record.ai_wins,
            record.draws
        );
        Ok(record)
    }
}
