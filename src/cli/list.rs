//! List command.

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::store::Store;
use crate::error::{Error, Result};

/// List keys in rotation order, masked.
pub fn execute(settings: &Settings, json: bool) -> Result<()> {
    let store = Store::open(settings);
    let summaries = store.list()?;

    if json {
        let out = serde_json::to_string_pretty(&summaries)
            .map_err(|e| Error::Other(format!("failed to encode listing: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    if summaries.is_empty() {
        output::dimmed("no keys configured");
        return Ok(());
    }

    output::section("Keys");
    for s in &summaries {
        let marker = if s.current { "▸" } else { " " };
        let label = s.label.as_deref().unwrap_or("-");
        let mut line = format!("{} {:>2}  {:<16} {}", marker, s.position, label, s.masked);
        if s.disabled {
            line.push_str("  (disabled)");
        }
        if let Some(at) = s.last_used {
            line.push_str(&format!("  used {}", at.format("%Y-%m-%d %H:%M")));
        }
        if s.disabled {
            output::dimmed(&line);
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}
