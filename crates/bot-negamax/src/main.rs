//! Negamax bot command line.
//!
//! Searches positions, lists legal moves, runs perft and plays the engine
//! against itself, all driven by the same `engine.toml` settings.

use anyhow::{Context, Result};
use chess_engine::{
    perft, perft_divide, ConfigError, EngineConfig, Game, Position, SearchConfig, Searcher,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "bot-negamax")]
#[command(about = "Negamax chess engine with alpha-beta pruning")]
struct Cli {
    /// Path to the engine configuration file
    #[arg(short, long, global = true, default_value = "engine.toml")]
    config: PathBuf,

    /// Log search and game events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a position and print the best move
    Best {
        /// Position to search, the starting position if omitted
        #[arg(short, long)]
        fen: Option<String>,
        /// Search depth, overriding the configuration
        #[arg(short, long)]
        depth: Option<u32>,
    },
    /// List the legal moves of the side to move
    Moves {
        #[arg(short, long)]
        fen: Option<String>,
    },
    /// Let the engine play both sides
    Selfplay {
        #[arg(short, long)]
        fen: Option<String>,
        #[arg(short, long)]
        depth: Option<u32>,
        /// Stop after this many plies, overriding the configuration
        #[arg(short, long)]
        max_plies: Option<u32>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        #[arg(short, long)]
        fen: Option<String>,
        #[arg(short, long, default_value = "3")]
        depth: u32,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = EngineConfig::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Best { fen, depth } => {
            let position = load_position(fen.as_deref())?;
            let search = search_config(&config, depth)?;
            let side = position.side_to_move();
            let result = Searcher::new(&search).search(&position, side, search.depth);

            match result.best_move {
                Some(m) => println!("bestmove {} ({})", m, result.score()),
                None => println!("no move: {}", chess_engine::game_status(&position)),
            }
            info!(nodes = result.nodes, cutoffs = result.cutoffs, "search done");
        }
        Commands::Moves { fen } => {
            let position = load_position(fen.as_deref())?;
            let moves = chess_engine::legal_moves(&position, position.side_to_move());

            for (from, targets) in moves.by_source() {
                let list: Vec<String> = targets.iter().map(|m| m.to().to_string()).collect();
                println!("{}: {}", from, list.join(" "));
            }
            println!("{} legal moves", moves.len());
        }
        Commands::Selfplay {
            fen,
            depth,
            max_plies,
        } => {
            let mut game = match fen {
                Some(fen) => Game::from_fen(&fen).context("parsing FEN")?,
                None => Game::new(),
            };
            let search = search_config(&config, depth)?;
            let max_plies = max_plies.unwrap_or(config.player.max_plies) as usize;

            println!("{} plays itself at depth {}", config.player.name, search.depth);
            while !game.is_game_over() && game.ply_count() < max_plies {
                let side = game.position().side_to_move();
                let result = game.play_engine_move(&search)?;
                if let Some(m) = result.best_move {
                    println!("{:>3}. {} {} ({})", game.ply_count(), side, m, result.score());
                }
            }

            if game.is_game_over() {
                println!("Result: {}", game.status());
            } else {
                println!("Stopped after {} plies", game.ply_count());
            }
            println!("{}", game.position());
            println!("{}", game.to_fen());
        }
        Commands::Perft { fen, depth, divide } => {
            let position = load_position(fen.as_deref())?;
            if divide {
                let results = perft_divide(&position, depth);
                let mut total = 0;
                for (m, nodes) in &results {
                    println!("{}: {}", m, nodes);
                    total += nodes;
                }
                println!("\nNodes searched: {}", total);
            } else {
                println!("Nodes searched: {}", perft(&position, depth));
            }
        }
    }

    Ok(())
}

fn load_position(fen: Option<&str>) -> Result<Position> {
    match fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("parsing FEN {:?}", fen)),
        None => Ok(Position::startpos()),
    }
}

/// Applies a command-line depth over the configured one.
fn search_config(config: &EngineConfig, depth: Option<u32>) -> Result<SearchConfig, ConfigError> {
    let mut search = config.search;
    if let Some(depth) = depth {
        search.depth = depth;
    }
    search.validate()?;
    Ok(search)
}
