use common::storage::{DocumentStore, FileContentProvider, Validate, YamlSerializer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{GameConfig, ScoresConfig};

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

pub type ConfigManager = DocumentStore<FileContentProvider, Config, YamlSerializer>;

fn get_base_dir() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.to_path_buf();
    }
    PathBuf::new()
}

pub fn get_config_path() -> PathBuf {
    get_base_dir().join(CONFIG_FILE_NAME)
}

pub fn get_config_manager(path: Option<&Path>) -> ConfigManager {
    match path {
        Some(path) => DocumentStore::from_yaml_file(path),
        None => DocumentStore::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub scores: ScoresConfig,
}

impl Config {
    /// Relative score files live next to the executable.
    pub fn scores_path(&self) -> PathBuf {
        let path = Path::new(&self.scores.file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            get_base_dir().join(path)
        }
    }
}

/// Paths typed on the command line are relative to the current directory,
/// unlike relative paths stored in the config file.
pub fn resolve_cli_path(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.scores.validate()?;
        Ok(())
    }
}
