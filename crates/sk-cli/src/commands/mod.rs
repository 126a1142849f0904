pub mod log;
pub mod report;
pub mod run;

use std::path::Path;

use colored::Colorize;
use sk_core::{EventLog, RaceConfig};

/// Load a race config, mapping errors to a printable message.
fn load_config(path: &Path) -> Result<RaceConfig, String> {
    RaceConfig::load(path).map_err(|e| e.to_string())
}

/// Load an event log. Malformed lines are skipped with a warning unless
/// `strict` is set.
fn load_events(path: &Path, strict: bool) -> Result<EventLog, String> {
    let parsed = EventLog::load(path).map_err(|e| e.to_string())?;
    if strict {
        return parsed.into_strict().map_err(|e| e.to_string());
    }

    let skipped = parsed.rejected.len();
    if skipped > 0 {
        eprintln!(
            "  {} {} malformed line{} skipped",
            "warning:".yellow().bold(),
            skipped,
            if skipped == 1 { "" } else { "s" },
        );
    }
    Ok(parsed.log)
}
