//! Dropfour: a four-in-a-row move engine.
//!
//! ## Usage
//!
//! - `dropfour` - Show a demo
//! - `dropfour protocol` - Start the text protocol for host integration
//! - `dropfour best --board <rows> [--level hard] [--ai-first]` - Pick a move

use anyhow::Context;
use clap::{Parser, Subcommand};

use dropfour::board::{Board, Token};
use dropfour::protocol::ProtocolEngine;
use dropfour::search::{AUTOMATED, Difficulty, rank_moves, select_move};

/// Position used by the demo.
const DEMO_BOARD: &str = "_______/_______/___O___/___XO__/__OOXX_/__XOXX_";

/// Dropfour: a four-in-a-row move engine
#[derive(Parser)]
#[command(name = "dropfour")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the line-based text protocol on stdin/stdout
    Protocol {
        /// Seed for the easy tier's random choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the column the engine would play
    Best {
        /// Board rows from top to bottom, separated by '/' (X, O, _)
        #[arg(long)]
        board: String,
        #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
        level: Difficulty,
        /// The engine made the first move of the game
        #[arg(long)]
        ai_first: bool,
    },
    /// Run a short demo of the engine
    Demo,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Protocol { seed }) => {
            let mut engine = match seed {
                Some(seed) => ProtocolEngine::with_seed(seed),
                None => ProtocolEngine::new(),
            };
            engine.run()
        }
        Some(Commands::Best {
            board,
            level,
            ai_first,
        }) => {
            let board: Board = board.parse().context("invalid --board")?;
            anyhow::ensure!(
                !board.valid_columns().is_empty(),
                "board has no valid column"
            );
            println!("{}", select_move(&board, ai_first, level));
            Ok(())
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_demo() -> anyhow::Result<()> {
    println!("Dropfour: four-in-a-row move engine\n");

    let board: Board = DEMO_BOARD.parse()?;
    println!("{board}");
    println!(
        "{} = player, {} = engine, engine moved first\n",
        Token::Player.symbol(),
        Token::Enemy.symbol()
    );

    println!("=== One-ply scores ===");
    for scored in rank_moves(&board, AUTOMATED, true) {
        println!("column {}: {}", scored.column, scored.score);
    }

    println!("\n=== Choices ===");
    for level in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        println!("{level:>6}: column {}", select_move(&board, true, level));
    }
    Ok(())
}
