//! Core of Skilog: reconstructs per-competitor race results from a
//! chronological event log.
//!
//! The flow is: parse an [`EventLog`], group it by competitor, fold each
//! group into a [`CompetitorReport`] with [`reconstruct`], then render the
//! table with [`render`]. [`narrate`] independently turns each event into a
//! log sentence. Every operation past parsing is infallible.

/// Race configuration and its JSON loading.
pub mod config;
/// Per-competitor reconstruction engine.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// Event records, event-log parsing and grouping.
pub mod event;
/// Human-readable narration of events.
pub mod narrate;
/// Results table assembly and rendering.
pub mod table;
/// Wall-clock parsing and duration arithmetic.
pub mod time;

/// Re-export configuration types.
pub use config::RaceConfig;
/// Re-export report types and the reconstruction entry point.
pub use engine::{CompetitorReport, LapInfo, PenaltyInfo, Shooting, Status, reconstruct};
/// Re-export error types.
pub use error::{LineError, SkError, SkResult};
/// Re-export event types.
pub use event::{CompetitorId, Event, EventKind, EventLog, ParsedLog, RejectedLine};
/// Re-export narration.
pub use narrate::{narrate, narrate_all};
/// Re-export table assembly and rendering.
pub use table::{build_table, render, render_json};
/// Re-export duration helpers.
pub use time::{Elapsed, duration_between, duration_to_seconds, format_duration};
