//! Results table: one report per competitor, rendered as fixed-format text.

use std::collections::BTreeMap;

use crate::config::RaceConfig;
use crate::engine::{CompetitorReport, reconstruct};
use crate::event::{CompetitorId, Event};
use crate::time::{CLOCK_WIDTH, Elapsed};

/// Reconstruct every competitor in `events_by_competitor`.
///
/// The output follows the map's iteration order; [`render`] sorts anyway.
pub fn build_table(
    config: &RaceConfig,
    events_by_competitor: &BTreeMap<CompetitorId, Vec<Event>>,
) -> Vec<CompetitorReport> {
    events_by_competitor
        .iter()
        .map(|(&competitor, events)| reconstruct(config, competitor, events))
        .collect()
}

/// Sort reports by competitor id, borrowing them.
pub fn sorted(reports: &[CompetitorReport]) -> Vec<&CompetitorReport> {
    let mut sorted: Vec<&CompetitorReport> = reports.iter().collect();
    sorted.sort_by_key(|report| report.competitor);
    sorted
}

/// Render one `{time, speed}` cell, or `{,}` when the time is absent.
pub fn render_cell(time: Option<Elapsed>, speed: f64) -> String {
    match time {
        Some(time) => format!("{{{time:.width$}, {speed:.3}}}", width = CLOCK_WIDTH),
        None => "{,}".to_string(),
    }
}

/// Render a single report row, without the trailing newline.
pub fn render_row(report: &CompetitorReport) -> String {
    let laps: Vec<String> = report
        .laps
        .iter()
        .map(|lap| render_cell(lap.time, lap.speed))
        .collect();
    format!(
        "[{}] {} [{}] {} {}",
        report.status,
        report.competitor,
        laps.join(", "),
        render_cell(report.penalty.time, report.penalty.speed),
        report.shooting,
    )
}

/// Render all reports, one line each, sorted by competitor id.
///
/// An empty slice renders as the empty string.
pub fn render(reports: &[CompetitorReport]) -> String {
    let mut out = String::new();
    for report in sorted(reports) {
        out.push_str(&render_row(report));
        out.push('\n');
    }
    out
}

/// Render all reports as a pretty JSON array, sorted by competitor id.
pub fn render_json(reports: &[CompetitorReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&sorted(reports))
}
