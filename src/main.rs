//! claude-key-switch - Rotate through multiple API keys sequentially.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use claude_key_switch::cli::output;
use claude_key_switch::cli::{execute, Cli};
use claude_key_switch::core::constants;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for the key.
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("claude_key_switch=debug")
        } else {
            EnvFilter::new("claude_key_switch=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.global) {
        output::error(&e.to_string());
        // Scripts get exactly one line; people at a terminal get a hint too.
        if let Some(hint) = e.hint().filter(|_| output::stderr_is_term()) {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}
