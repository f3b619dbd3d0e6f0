//! Line-oriented text protocol for driving the engine from a host program.
//!
//! The framing follows GTP: one command per line, an optional numeric id in
//! front, and replies of the form `=id message` or `?id message` followed by
//! a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `clear_board` - Reset to an empty 6x7 board
//! - `first <ai|human>` - Record which side made the first move
//! - `level <easy|medium|hard|0|1|2>` - Select the difficulty
//! - `play <column>` - Drop a human token
//! - `genmove` - Let the engine choose and drop its token
//! - `setboard <rows>` - Load a position in text notation (`row0/row1/...`)
//! - `showboard` - Print the board
//! - `status` - `none`, `draw`, or `winner X|O`
//! - `score <column>` - One-ply score of an engine drop in that column

use std::io::{self, BufRead, Write};

use anyhow::Context;
use log::{debug, info};

use crate::board::{Board, Outcome};
use crate::heuristic::score_move;
use crate::search::{AUTOMATED, Difficulty, HUMAN, select_move_with_rng};

/// Version reported by `protocol_version`.
const PROTOCOL_VERSION: &str = "1";

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "first",
    "genmove",
    "known_command",
    "level",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "setboard",
    "showboard",
    "status",
    "version",
];

/// Protocol session state.
pub struct ProtocolEngine {
    /// Current position
    board: Board,
    /// Whether the engine made the first move of the game
    automated_moved_first: bool,
    difficulty: Difficulty,
    /// Random source for the easy tier
    rng: fastrand::Rng,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create a session with an empty board, easy difficulty, and the human
    /// moving first.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Create a session whose easy tier draws from a seeded generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            board: Board::standard(),
            automated_moved_first: false,
            difficulty: Difficulty::default(),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
            .context("protocol I/O failed")
    }

    /// Run the command loop until `quit` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        info!("protocol session started");

        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            debug!("{command} {args:?} -> {success} {message:?}");

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }

        info!("protocol session ended");
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_column(&self, arg: Option<&&str>) -> Result<usize, String> {
        let arg = arg.ok_or("missing argument")?;
        let column = arg
            .parse::<usize>()
            .map_err(|_| format!("invalid column '{arg}'"))?;
        if column >= self.board.width() {
            return Err(format!(
                "column {column} is out of range (width {})",
                self.board.width()
            ));
        }
        Ok(column)
    }

    fn game_over(&self) -> bool {
        self.board.is_terminal() != Outcome::NoWinner
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.board = Board::standard();
                (true, String::new())
            }

            "first" => match args.first().map(|s| s.to_lowercase()).as_deref() {
                Some("ai" | "engine" | "o") => {
                    self.automated_moved_first = true;
                    (true, String::new())
                }
                Some("human" | "player" | "x") => {
                    self.automated_moved_first = false;
                    (true, String::new())
                }
                Some(other) => (false, format!("unknown side '{other}'")),
                None => (false, "missing argument".to_string()),
            },

            "level" => match args.first().map(|s| s.parse::<Difficulty>()) {
                Some(Ok(difficulty)) => {
                    self.difficulty = difficulty;
                    (true, String::new())
                }
                Some(Err(e)) => (false, e.to_string()),
                None => (false, "missing argument".to_string()),
            },

            "play" => {
                let column = match self.parse_column(args.first()) {
                    Ok(column) => column,
                    Err(e) => return (false, e),
                };
                if self.game_over() {
                    return (false, "game is over".to_string());
                }
                match self.board.drop_token(column, HUMAN) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                if self.game_over() {
                    return (false, "game is over".to_string());
                }
                let column = select_move_with_rng(
                    &self.board,
                    self.automated_moved_first,
                    self.difficulty,
                    &mut self.rng,
                );
                match self.board.drop_token(column, AUTOMATED) {
                    Ok(_) => (true, column.to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "setboard" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args.concat().parse::<Board>() {
                    Ok(board) => {
                        self.board = board;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.board.to_string().trim_end())),

            "status" => {
                let status = match self.board.is_terminal() {
                    Outcome::NoWinner => "none".to_string(),
                    Outcome::Draw => "draw".to_string(),
                    Outcome::Winner(token) => format!("winner {}", token.symbol()),
                };
                (true, status)
            }

            "score" => {
                let column = match self.parse_column(args.first()) {
                    Ok(column) => column,
                    Err(e) => return (false, e),
                };
                let score = score_move(&self.board, column, AUTOMATED, self.automated_moved_first);
                (true, score.map_or("-inf".to_string(), |s| s.to_string()))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
