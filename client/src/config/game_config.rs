use common::games::tictactoe::{Difficulty, FirstPlayerMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub first_player: FirstPlayerMode,
    #[serde(default)]
    pub show_trace: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            first_player: FirstPlayerMode::Human,
            show_trace: false,
        }
    }
}
