//! Race events: the record type, line parsing, and grouping.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::error::{LineError, SkError, SkResult};
use crate::time::parse_clock;

/// Identifier of a competitor as it appears in the event log.
pub type CompetitorId = u32;

/// What happened in a single event, keyed by its numeric code in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// 1: the competitor registered.
    Registered,
    /// 2: the start time was drawn; extra param is the planned start.
    StartTimeDrawn,
    /// 3: the competitor is on the start line.
    OnStartLine,
    /// 4: the competitor started.
    Started,
    /// 5: the competitor entered a firing range; extra param is the line.
    OnFiringRange,
    /// 6: a target was hit; extra param is the target.
    TargetHit,
    /// 7: the competitor left the firing range.
    LeftFiringRange,
    /// 8: the competitor entered the penalty laps.
    EnteredPenaltyLaps,
    /// 9: the competitor left the penalty laps.
    LeftPenaltyLaps,
    /// 10: the competitor ended a main lap.
    LapCompleted,
    /// 11: the competitor cannot continue; extra param is the reason.
    CannotContinue,
    /// 32: the competitor was disqualified.
    Disqualified,
    /// 33: the competitor finished.
    Finished,
    /// Any code without a known meaning.
    Unknown(u32),
}

impl EventKind {
    /// Map a numeric event code to its kind.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Registered,
            2 => Self::StartTimeDrawn,
            3 => Self::OnStartLine,
            4 => Self::Started,
            5 => Self::OnFiringRange,
            6 => Self::TargetHit,
            7 => Self::LeftFiringRange,
            8 => Self::EnteredPenaltyLaps,
            9 => Self::LeftPenaltyLaps,
            10 => Self::LapCompleted,
            11 => Self::CannotContinue,
            32 => Self::Disqualified,
            33 => Self::Finished,
            other => Self::Unknown(other),
        }
    }

    /// The numeric code used in the event log.
    pub fn code(self) -> u32 {
        match self {
            Self::Registered => 1,
            Self::StartTimeDrawn => 2,
            Self::OnStartLine => 3,
            Self::Started => 4,
            Self::OnFiringRange => 5,
            Self::TargetHit => 6,
            Self::LeftFiringRange => 7,
            Self::EnteredPenaltyLaps => 8,
            Self::LeftPenaltyLaps => 9,
            Self::LapCompleted => 10,
            Self::CannotContinue => 11,
            Self::Disqualified => 32,
            Self::Finished => 33,
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

/// One timestamped line of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Wall-clock time of day, `HH:MM:SS.mmm`.
    pub time: String,
    /// Event kind.
    pub kind: EventKind,
    /// Competitor the event refers to.
    pub competitor: CompetitorId,
    /// Free-text parameter; meaning depends on `kind`.
    pub extra: String,
}

impl Event {
    /// Build an event with an empty extra parameter.
    pub fn new(time: impl Into<String>, kind: EventKind, competitor: CompetitorId) -> Self {
        Self {
            time: time.into(),
            kind,
            competitor,
            extra: String::new(),
        }
    }

    /// Set the extra parameter.
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    /// Parse a line of the form `[HH:MM:SS.mmm] <event id> <competitor id> [extra...]`.
    ///
    /// Extra params are re-joined with single spaces.
    pub fn parse_line(line: &str) -> Result<Self, LineError> {
        let line = line.trim();
        let rest = line
            .strip_prefix('[')
            .ok_or(LineError::MissingOpenBracket)?;
        let (time, rest) = rest
            .split_once(']')
            .ok_or(LineError::MissingCloseBracket)?;
        if parse_clock(time).is_none() {
            return Err(LineError::InvalidTime(time.to_string()));
        }

        let mut fields = rest.split_whitespace();
        let (Some(event_id), Some(competitor)) = (fields.next(), fields.next()) else {
            return Err(LineError::MissingFields);
        };
        let code: u32 = event_id
            .parse()
            .map_err(|_| LineError::InvalidEventId(event_id.to_string()))?;
        let competitor: CompetitorId = competitor
            .parse()
            .map_err(|_| LineError::InvalidCompetitorId(competitor.to_string()))?;
        let extra = fields.collect::<Vec<_>>().join(" ");

        Ok(Self::new(time, EventKind::from_code(code), competitor).with_extra(extra))
    }
}

/// A line that [`EventLog::parse`] dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number.
    pub line: usize,
    /// The raw line text.
    pub text: String,
    /// Why it was rejected.
    pub reason: LineError,
}

/// Result of parsing an event log: the accepted events and the dropped lines.
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    /// Events from well-formed lines, in file order.
    pub log: EventLog,
    /// Malformed lines that were skipped.
    pub rejected: Vec<RejectedLine>,
}

impl ParsedLog {
    /// Fail on the first rejected line instead of skipping it.
    pub fn into_strict(self) -> SkResult<EventLog> {
        match self.rejected.into_iter().next() {
            Some(rejected) => Err(SkError::InvalidLine {
                line: rejected.line,
                reason: rejected.reason,
            }),
            None => Ok(self.log),
        }
    }
}

/// All events of a race, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Wrap already-parsed events.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Parse event-log text. Blank lines are skipped; malformed lines are
    /// collected in [`ParsedLog::rejected`].
    pub fn parse(text: &str) -> ParsedLog {
        let mut parsed = ParsedLog::default();
        for (idx, raw) in text.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            match Event::parse_line(raw) {
                Ok(event) => parsed.log.events.push(event),
                Err(reason) => {
                    tracing::warn!(line = idx + 1, %reason, "skipping malformed event line");
                    parsed.rejected.push(RejectedLine {
                        line: idx + 1,
                        text: raw.to_string(),
                        reason,
                    });
                }
            }
        }
        tracing::debug!(
            accepted = parsed.log.len(),
            rejected = parsed.rejected.len(),
            "parsed event log"
        );
        parsed
    }

    /// Read and parse an event-log file.
    pub fn load(path: &Path) -> SkResult<ParsedLog> {
        let text = std::fs::read_to_string(path).map_err(|source| SkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Events in file order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Group events by competitor, keeping file order within each group.
    pub fn by_competitor(&self) -> BTreeMap<CompetitorId, Vec<Event>> {
        let mut groups: BTreeMap<CompetitorId, Vec<Event>> = BTreeMap::new();
        for event in &self.events {
            groups
                .entry(event.competitor)
                .or_default()
                .push(event.clone());
        }
        groups
    }

    /// Events ordered by time of day. Events sharing a timestamp keep their
    /// file order.
    pub fn chronological(&self) -> Vec<&Event> {
        let mut ordered: Vec<&Event> = self.events.iter().collect();
        ordered.sort_by_key(|event| parse_clock(&event.time));
        ordered
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if there are no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Event> for EventLog {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
