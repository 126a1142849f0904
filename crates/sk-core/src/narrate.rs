//! Human-readable narration of single events.

use crate::event::{Event, EventKind};

/// Describe one event as a log sentence.
pub fn narrate(event: &Event) -> String {
    let Event {
        time,
        kind,
        competitor: id,
        extra,
    } = event;
    match kind {
        EventKind::Registered => format!("[{time}] The competitor({id}) registered"),
        EventKind::StartTimeDrawn => {
            format!("[{time}] The start time for the competitor({id}) was set by a draw to {extra}")
        }
        EventKind::OnStartLine => format!("[{time}] The competitor({id}) is on the start line"),
        EventKind::Started => format!("[{time}] The competitor({id}) has started"),
        EventKind::OnFiringRange => {
            format!("[{time}] The competitor({id}) is on the firing range({extra})")
        }
        EventKind::TargetHit => {
            format!("[{time}] The target({extra}) has been hit by competitor({id})")
        }
        EventKind::LeftFiringRange => format!("[{time}] The competitor({id}) left the firing range"),
        EventKind::EnteredPenaltyLaps => {
            format!("[{time}] The competitor({id}) entered the penalty laps")
        }
        EventKind::LeftPenaltyLaps => format!("[{time}] The competitor({id}) left the penalty laps"),
        EventKind::LapCompleted => format!("[{time}] The competitor({id}) ended the main lap"),
        EventKind::CannotContinue => format!("[{time}] The competitor({id}) can't continue: {extra}"),
        EventKind::Disqualified => format!("[{time}] The competitor({id}) is disqualified"),
        EventKind::Finished => format!("[{time}] The competitor({id}) has finished"),
        EventKind::Unknown(code) => format!("Unknown event {code} for competitor {id}"),
    }
}

/// Narrate a sequence of events in the order given, one sentence each.
pub fn narrate_all<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<String> {
    events.into_iter().map(narrate).collect()
}
