use std::path::Path;

use comfy_table::{Cell, Color, ContentArrangement, Table};
use sk_core::table::{render_cell, sorted};
use sk_core::{CompetitorReport, Status, build_table, render, render_json};

pub fn run(config: &Path, events: &Path, format: &str, strict: bool) -> Result<(), String> {
    let config = super::load_config(config)?;
    let log = super::load_events(events, strict)?;
    let reports = build_table(&config, &log.by_competitor());
    tracing::debug!(competitors = reports.len(), %format, "built results table");

    match format {
        "text" => print!("{}", render(&reports)),
        "json" => {
            let json = render_json(&reports).map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        "table" => {
            if reports.is_empty() {
                println!("  No competitors found.");
                return Ok(());
            }
            println!("{}", results_table(&reports));
            println!();
            println!("  {} competitors", reports.len());
        }
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: text, json, table"
            ));
        }
    }

    Ok(())
}

fn results_table(reports: &[CompetitorReport]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Status",
        "Competitor",
        "Total",
        "Laps",
        "Penalty",
        "Hits/Shots",
    ]);

    for report in sorted(reports) {
        let laps: Vec<String> = report
            .laps
            .iter()
            .map(|lap| render_cell(lap.time, lap.speed))
            .collect();
        table.add_row(vec![
            Cell::new(report.status).fg(status_color(report.status)),
            Cell::new(report.competitor),
            Cell::new(report.total_time),
            Cell::new(laps.join("\n")),
            Cell::new(render_cell(report.penalty.time, report.penalty.speed)),
            Cell::new(report.shooting),
        ]);
    }

    table
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Finished => Color::Green,
        Status::Started => Color::Yellow,
        Status::NotFinished => Color::Red,
        Status::NotStarted => Color::Grey,
    }
}
