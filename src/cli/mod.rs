//! Command-line interface.

pub mod completions;
pub mod keys;
pub mod list;
pub mod output;
pub mod status;
pub mod switch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::Settings;
use crate::core::env::Syntax;
use crate::error::Result;

/// claude-key-switch - Rotate through multiple API keys sequentially.
#[derive(Parser)]
#[command(
    name = "claude-key-switch",
    about = "Rotate through multiple API keys sequentially",
    version = concat!("v", env!("CARGO_PKG_VERSION")),
    after_help = "With no command, rotates to the next key (same as `rotate`).\n\
                  Exit codes: 3 no keys, 4 all keys disabled, 5 corrupt or unreadable store, 6 store busy, 7 write failed."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Key store file [default: ~/.claude-key-switch/keys.toml]
    #[arg(long, global = true, env = "CLAUDE_KEY_SWITCH_STORE", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Milliseconds to wait for the store lock before giving up [default: 2000]
    #[arg(
        long,
        global = true,
        env = "CLAUDE_KEY_SWITCH_LOCK_TIMEOUT",
        value_name = "MS"
    )]
    pub lock_timeout: Option<u64>,
}

/// Output options for commands that hand out a key.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Print a shell assignment for `eval` instead of the bare key
    #[arg(short, long)]
    pub export: bool,

    /// Shell syntax used with --export
    #[arg(long, value_enum, default_value_t = ExportShell::Posix)]
    pub shell: ExportShell,

    /// Variable assigned with --export [default: ANTHROPIC_API_KEY]
    #[arg(long, env = "CLAUDE_KEY_SWITCH_VAR", value_name = "NAME")]
    pub var: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Switch to the next key and print it
    Rotate(ExportArgs),

    /// Print the active key without switching
    Current(ExportArgs),

    /// Append a key to the rotation
    Add {
        /// API key, or `-` to read it from stdin
        secret: String,
        /// Label shown in listings
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Remove a key
    Rm {
        /// Position (from `list`) or label
        target: String,
    },

    /// Skip a key during rotation
    Disable {
        /// Position (from `list`) or label
        target: String,
    },

    /// Include a disabled key in rotation again
    Enable {
        /// Position (from `list`) or label
        target: String,
    },

    /// Make a key the active one
    Use {
        /// Position (from `list`) or label
        target: String,
    },

    /// List keys in rotation order (masked)
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show store location and rotation state
    Status,

    /// Print the key store path
    Path,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Shell syntax for `--export`.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportShell {
    /// sh, bash, zsh
    #[default]
    Posix,
    Fish,
}

impl From<ExportShell> for Syntax {
    fn from(shell: ExportShell) -> Self {
        match shell {
            ExportShell::Posix => Syntax::Posix,
            ExportShell::Fish => Syntax::Fish,
        }
    }
}

/// Execute a command. No command means `rotate`.
pub fn execute(command: Option<Command>, global: GlobalArgs) -> Result<()> {
    use Command::*;

    let command = command.unwrap_or_else(|| Rotate(ExportArgs::default()));
    let settings = |var: Option<String>| {
        Settings::resolve(global.store.clone(), global.lock_timeout, var)
    };

    match command {
        Rotate(args) => switch::rotate(&settings(args.var.clone())?, &args),
        Current(args) => switch::current(&settings(args.var.clone())?, &args),
        Add { secret, label } => keys::add(&settings(None)?, &secret, label.as_deref()),
        Rm { target } => keys::rm(&settings(None)?, &target),
        Disable { target } => keys::disable(&settings(None)?, &target),
        Enable { target } => keys::enable(&settings(None)?, &target),
        Use { target } => keys::select(&settings(None)?, &target),
        List { json } => list::execute(&settings(None)?, json),
        Status => status::execute(&settings(None)?),
        Path => {
            println!("{}", settings(None)?.store_path.display());
            Ok(())
        }
        Completions { shell } => completions::execute(shell),
    }
}
