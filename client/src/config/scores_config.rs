use common::storage::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ScoresConfig {
    pub file: String,
}

impl Validate for ScoresConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file.trim().is_empty() {
            return Err("scores file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            file: "tictactoe_scores.yaml".to_string(),
        }
    }
}
