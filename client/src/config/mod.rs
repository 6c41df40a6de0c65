mod config;
mod game_config;
mod scores_config;

pub use config::{get_config_manager, resolve_cli_path};
pub use game_config::GameConfig;
pub use scores_config::ScoresConfig;
