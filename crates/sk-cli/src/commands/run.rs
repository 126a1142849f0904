use std::path::Path;

use colored::Colorize;
use sk_core::{RaceConfig, build_table, narrate_all, render};

pub fn run(config: &Path, events: &Path, strict: bool) -> Result<(), String> {
    let config = super::load_config(config)?;
    let log = super::load_events(events, strict)?;

    println!("{} {}", "Race:".bold(), summary(&config));
    println!();

    for line in narrate_all(log.chronological()) {
        println!("{line}");
    }
    println!();

    print!("{}", render(&build_table(&config, &log.by_competitor())));

    Ok(())
}

fn summary(config: &RaceConfig) -> String {
    let mut out = format!(
        "{} lap{} of {} m, penalty loop {} m, {} firing line{}",
        config.laps,
        if config.laps == 1 { "" } else { "s" },
        config.lap_len,
        config.penalty_len,
        config.firing_lines,
        if config.firing_lines == 1 { "" } else { "s" },
    );
    if let Some(start) = &config.start {
        out.push_str(&format!(", start {start}"));
        if let Some(delta) = &config.start_delta {
            out.push_str(&format!(" every {delta}"));
        }
    }
    out
}
