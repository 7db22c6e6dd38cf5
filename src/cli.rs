//! CLI - Command Line Interface for blip
//!
//! Every backend operation the TUI performs is scriptable. Output is
//! JSON when piped or with `--json`.
//!
//! # Examples
//!
//! ```bash
//! # Candidates on two platforms
//! blip discover --platforms netflix,hbo-max --limit 5
//!
//! # Rate a movie
//! blip rate 603 loved
//!
//! # Whole watchlist as JSON
//! blip watchlist --all --json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{Opinion, Platform};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Backend unreachable or returned an error
    NetworkError = 3,
    /// Discovery returned nothing
    NoMovies = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// blip - swipe through movies from your terminal
///
/// Run without arguments to launch the interactive TUI.
/// Use subcommands for scripting.
#[derive(Parser, Debug)]
#[command(
    name = "blip",
    version,
    about = "Swipe through movies from your terminal",
    long_about = "Discover movies on the streaming platforms you use, rate them \
                  with a swipe, and keep a watchlist of the ones you want to see.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  blip                                  Launch interactive TUI\n\
                  blip discover -p netflix,prime-video  List candidates\n\
                  blip rate 603 watch                   Add to watchlist\n\
                  blip watchlist --all --json           Dump the watchlist"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Backend base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// User whose opinions are read and written
    #[arg(long, global = true, value_name = "ID")]
    pub user_id: Option<u64>,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch discovery candidates
    #[command(visible_alias = "d")]
    Discover(DiscoverCmd),

    /// Record an opinion on a movie
    #[command(visible_alias = "r")]
    Rate(RateCmd),

    /// List saved movies
    #[command(visible_alias = "wl")]
    Watchlist(WatchlistCmd),

    /// List known streaming platforms
    Platforms(PlatformsCmd),
}

/// Fetch discovery candidates for a platform filter
#[derive(Args, Debug)]
pub struct DiscoverCmd {
    /// Platforms to include, comma separated (default: config or the
    /// five majors)
    #[arg(long, short = 'p', value_delimiter = ',')]
    pub platforms: Vec<Platform>,

    /// Maximum number of movies to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// Record an opinion on a movie
#[derive(Args, Debug)]
pub struct RateCmd {
    /// Movie id
    pub movie_id: u64,

    /// What you thought of it
    #[arg(value_enum)]
    pub opinion: OpinionArg,
}

/// Opinion as typed on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpinionArg {
    /// Loved it (swipe right)
    Loved,
    /// Didn't like it (swipe left)
    Disliked,
    /// Want to watch (swipe up)
    Watch,
    /// No opinion (swipe down)
    Pass,
}

impl From<OpinionArg> for Opinion {
    fn from(arg: OpinionArg) -> Self {
        match arg {
            OpinionArg::Loved => Opinion::LovedIt,
            OpinionArg::Disliked => Opinion::DidntLikeIt,
            OpinionArg::Watch => Opinion::WantToWatch,
            OpinionArg::Pass => Opinion::Pass,
        }
    }
}

/// List movies saved with an opinion
#[derive(Args, Debug)]
pub struct WatchlistCmd {
    /// Page to fetch (1-based)
    #[arg(long, default_value = "1", conflicts_with = "all")]
    pub page: u32,

    /// Fetch every page
    #[arg(long)]
    pub all: bool,

    /// Which list to show
    #[arg(long, value_enum, default_value = "watch")]
    pub opinion: OpinionArg,
}

/// List known platforms
#[derive(Args, Debug)]
pub struct PlatformsCmd {}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Response to `rate`
#[derive(Debug, Serialize, Deserialize)]
pub struct RateResponse {
    pub status: String,
    pub movie_id: u64,
    pub opinion: Opinion,
}

/// One row of `platforms`
#[derive(Debug, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub name: String,
    pub slug: String,
    pub default: bool,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print human-readable lines, or the JSON wrapper in JSON mode
    pub fn print_lines<T: Serialize>(&self, data: T, lines: &[String]) -> anyhow::Result<()> {
        if self.json {
            self.print(data)
        } else {
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
