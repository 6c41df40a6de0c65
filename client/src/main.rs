mod config;
mod game_loop;
mod terminal;

use std::path::PathBuf;

use clap::Parser;
use common::games::SessionRng;
use common::games::tictactoe::{
    Difficulty, FirstPlayerMode, TicTacToeSession, TicTacToeSessionSettings,
};
use common::logger::{self, LogLevel};
use common::score_ledger::ScoreLedger;
use common::{log, log_debug};
use tokio::io::BufReader;

use config::{get_config_manager, resolve_cli_path};
use game_loop::GameLoop;

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Play tic-tac-toe against the computer")]
struct Args {
    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// human, ai or random
    #[arg(long)]
    first_player: Option<FirstPlayerMode>,

    /// Print the AI's per-cell evaluation after each of its moves
    #[arg(long)]
    show_trace: bool,

    /// Score file, overrides the one in the config; relative to the current directory
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Config file, defaults to one next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the easy and medium bots and the random first player
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    let min_level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    logger::init_logger(prefix, min_level);

    let config_path = args.config.as_deref().map(resolve_cli_path).transpose()?;
    let config_manager = get_config_manager(config_path.as_deref());
    let mut config = config_manager.get()?;
    if let Some(difficulty) = args.difficulty {
        config.game.difficulty = difficulty;
    }
    if let Some(first_player) = args.first_player {
        config.game.first_player = first_player;
    }
    if args.show_trace {
        config.game.show_trace = true;
    }
    if let Some(scores_file) = &args.scores_file {
        config.scores.file = resolve_cli_path(scores_file)?.to_string_lossy().into_owned();
    }
    if args.save_config {
        config_manager.set(&config)?;
        log!("Saved config to {}", config_manager.content_provider().path().display());
    }

    let scores_path = config.scores_path();
    log_debug!("Scores file: {}", scores_path.display());
    let ledger = ScoreLedger::from_yaml_file(scores_path)?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log_debug!("Session seed: {}", rng.seed());

    let session = TicTacToeSession::new(
        TicTacToeSessionSettings {
            difficulty: config.game.difficulty,
            first_player_mode: config.game.first_player,
        },
        ledger,
        rng,
    );

    println!("Tic-tac-toe. You are X, the AI is O. Type 'help' for commands.");
    let mut game_loop = GameLoop::new(session, config.game.show_trace);
    game_loop
        .run(BufReader::new(tokio::io::stdin()), &mut std::io::stdout())
        .await?;

    Ok(())
}
