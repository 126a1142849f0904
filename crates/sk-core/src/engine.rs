//! Per-competitor reconstruction: folds a competitor's events into a report.

use std::fmt;

use serde::Serialize;

use crate::config::{RaceConfig, TARGETS_PER_FIRING_LINE};
use crate::event::{CompetitorId, Event, EventKind};
use crate::time::Elapsed;

/// Race status of a competitor. The last status-setting event wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    /// Registered or drawn, no start seen yet.
    #[default]
    NotStarted,
    /// Started and still racing.
    Started,
    /// Could not continue or was disqualified.
    NotFinished,
    /// Crossed the finish.
    Finished,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "NotStarted",
            Self::Started => "Started",
            Self::NotFinished => "NotFinished",
            Self::Finished => "Finished",
        };
        f.pad(name)
    }
}

/// Split and average speed of one main lap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LapInfo {
    /// Lap duration; `None` if the lap was not completed.
    pub time: Option<Elapsed>,
    /// Metres per second; zero when the duration is absent or zero.
    pub speed: f64,
}

/// Aggregate time and average speed on the penalty loops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PenaltyInfo {
    /// Time between entering and leaving the penalty loops; `None` unless
    /// both were recorded.
    pub time: Option<Elapsed>,
    /// Metres per second over the missed-target distance.
    pub speed: f64,
}

/// Shooting tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Shooting {
    /// Targets hit.
    pub hits: u32,
    /// Shots fired, five per firing-line visit.
    pub shots: u32,
}

impl Shooting {
    /// Missed targets. Negative if more hits than shots were logged.
    pub fn misses(&self) -> i64 {
        i64::from(self.shots) - i64::from(self.hits)
    }
}

impl fmt::Display for Shooting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hits, self.shots)
    }
}

/// Everything derived about one competitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorReport {
    /// The competitor.
    pub competitor: CompetitorId,
    /// Final status.
    pub status: Status,
    /// Time from planned start to finish (or to the last status-ending event).
    pub total_time: Elapsed,
    /// One entry per configured lap, completed or not.
    pub laps: Vec<LapInfo>,
    /// Penalty loop summary.
    pub penalty: PenaltyInfo,
    /// Hits and shots.
    pub shooting: Shooting,
}

impl CompetitorReport {
    /// Hits over shots as `"<hits>/<shots>"`.
    pub fn hits_shots(&self) -> String {
        self.shooting.to_string()
    }
}

/// Scalar state gathered in one pass over a competitor's events.
#[derive(Debug, Default)]
struct Tracker<'a> {
    status: Status,
    planned_start: Option<&'a str>,
    actual_start: Option<&'a str>,
    finish: Option<&'a str>,
    last_relevant: Option<&'a str>,
    penalty_entry: Option<&'a str>,
    penalty_exit: Option<&'a str>,
    hits: u32,
    firing_line_visits: u32,
    lap_ends: Vec<&'a str>,
}

impl<'a> Tracker<'a> {
    fn apply(&mut self, event: &'a Event) {
        let time = event.time.as_str();
        match event.kind {
            EventKind::StartTimeDrawn => {
                self.planned_start = Some(event.extra.as_str());
                self.status = Status::NotStarted;
            }
            EventKind::Started => {
                self.actual_start = Some(time);
                self.status = Status::Started;
            }
            EventKind::OnFiringRange => self.firing_line_visits += 1,
            EventKind::TargetHit => self.hits += 1,
            EventKind::EnteredPenaltyLaps => self.penalty_entry = Some(time),
            EventKind::LeftPenaltyLaps => self.penalty_exit = Some(time),
            EventKind::LapCompleted => self.lap_ends.push(time),
            EventKind::CannotContinue | EventKind::Disqualified => {
                self.status = Status::NotFinished;
                self.last_relevant = Some(time);
            }
            EventKind::Finished => {
                self.finish = Some(time);
                self.status = Status::Finished;
            }
            EventKind::Registered
            | EventKind::OnStartLine
            | EventKind::LeftFiringRange
            | EventKind::Unknown(_) => {}
        }
    }

    fn total_time(&self) -> Elapsed {
        match self.status {
            Status::NotStarted => Elapsed::zero(),
            Status::NotFinished => Elapsed::between_opt(self.planned_start, self.last_relevant),
            Status::Finished => Elapsed::between_opt(self.planned_start, self.finish),
            Status::Started => match (self.actual_start, self.last_relevant) {
                (Some(_), Some(last)) => Elapsed::between_opt(self.planned_start, Some(last)),
                _ => Elapsed::zero(),
            },
        }
    }

    fn laps(&self, config: &RaceConfig) -> Vec<LapInfo> {
        (0..config.laps as usize)
            .map(|i| {
                let Some(&end) = self.lap_ends.get(i) else {
                    return LapInfo::default();
                };
                let start = if i == 0 {
                    self.actual_start
                } else {
                    Some(self.lap_ends[i - 1])
                };
                let time = Elapsed::between_opt(start, Some(end));
                LapInfo {
                    time: Some(time),
                    speed: speed(f64::from(config.lap_len), time),
                }
            })
            .collect()
    }

    fn penalty(&self, config: &RaceConfig, shooting: Shooting) -> PenaltyInfo {
        let (Some(entry), Some(exit)) = (self.penalty_entry, self.penalty_exit) else {
            return PenaltyInfo::default();
        };
        let time = Elapsed::between(entry, exit);
        let distance = shooting.misses() * i64::from(config.penalty_len);
        PenaltyInfo {
            time: Some(time),
            speed: speed(distance as f64, time),
        }
    }
}

/// Average speed over `distance` metres, or zero for a non-positive duration.
fn speed(distance: f64, time: Elapsed) -> f64 {
    let secs = time.as_secs_f64();
    if secs > 0.0 { distance / secs } else { 0.0 }
}

/// Fold one competitor's chronologically ordered events into a report.
///
/// Never fails: malformed times degrade the quantities they feed to zero.
pub fn reconstruct(
    config: &RaceConfig,
    competitor: CompetitorId,
    events: &[Event],
) -> CompetitorReport {
    let mut tracker = Tracker::default();
    for event in events {
        tracker.apply(event);
    }

    let shooting = Shooting {
        hits: tracker.hits,
        shots: tracker.firing_line_visits * TARGETS_PER_FIRING_LINE,
    };
    let report = CompetitorReport {
        competitor,
        status: tracker.status,
        total_time: tracker.total_time(),
        laps: tracker.laps(config),
        penalty: tracker.penalty(config, shooting),
        shooting,
    };

    tracing::debug!(
        competitor,
        events = events.len(),
        status = %report.status,
        total = %report.total_time,
        "reconstructed competitor"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind::*;

    fn config() -> RaceConfig {
        RaceConfig::new(2, 3651, 50, 1)
    }

    fn ev(time: &str, kind: EventKind) -> Event {
        Event::new(time, kind, 1)
    }

    fn drawn(time: &str, start: &str) -> Event {
        ev(time, StartTimeDrawn).with_extra(start)
    }

    fn lap(expected: &str, start: &str, end: &str, lap_len: f64) -> LapInfo {
        let split = Elapsed::between(start, end);
        assert_eq!(split.to_string(), expected);
        LapInfo {
            time: Some(split),
            speed: lap_len / split.as_secs_f64(),
        }
    }

    #[test]
    fn no_events_is_not_started() {
        let report = reconstruct(&config(), 7, &[]);

        assert_eq!(report.competitor, 7);
        assert_eq!(report.status, Status::NotStarted);
        assert!(report.total_time.is_zero());
        assert_eq!(report.laps, vec![LapInfo::default(); 2]);
        assert_eq!(report.penalty, PenaltyInfo::default());
        assert_eq!(report.hits_shots(), "0/0");
    }

    #[test]
    fn finished_race() {
        let events = [
            drawn("09:00:00.000", "09:00:00.000"),
            ev("09:00:01.000", Started),
            ev("09:02:00.000", OnFiringRange).with_extra("1"),
            ev("09:02:01.000", TargetHit).with_extra("1"),
            ev("09:02:02.000", TargetHit).with_extra("2"),
            ev("09:05:00.000", LapCompleted),
            ev("09:10:00.000", LapCompleted),
            ev("09:15:00.000", Finished),
        ];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.status, Status::Finished);
        assert_eq!(report.total_time.to_string(), "00:15:00.000");
        assert_eq!(
            report.laps,
            vec![
                lap("00:04:59.000", "09:00:01.000", "09:05:00.000", 3651.0),
                lap("00:05:00.000", "09:05:00.000", "09:10:00.000", 3651.0),
            ]
        );
        assert!((report.laps[0].speed - 12.211).abs() < 1e-3);
        assert!((report.laps[1].speed - 12.170).abs() < 1e-3);
        assert_eq!(report.penalty, PenaltyInfo::default());
        assert_eq!(report.hits_shots(), "2/5");
    }

    #[test]
    fn penalty_speed_uses_missed_targets() {
        let events = [
            drawn("09:00:00.000", "09:00:00.000"),
            ev("09:00:01.000", Started),
            ev("09:03:00.000", OnFiringRange),
            ev("09:03:01.000", TargetHit),
            ev("09:06:00.000", LapCompleted),
            ev("09:08:00.000", EnteredPenaltyLaps),
            ev("09:08:30.000", LeftPenaltyLaps),
            ev("09:12:00.000", LapCompleted),
            ev("09:18:00.000", Finished),
        ];
        let report = reconstruct(&config(), 2, &events);

        assert_eq!(report.total_time.to_string(), "00:18:00.000");
        assert_eq!(report.penalty.time.unwrap().to_string(), "00:00:30.000");
        assert_eq!(report.penalty.speed, 200.0 / 30.0);
        assert_eq!(report.hits_shots(), "1/5");
    }

    #[test]
    fn drawn_only_is_not_started() {
        let report = reconstruct(&config(), 1, &[drawn("09:00:00.000", "09:00:00.000")]);
        assert_eq!(report.status, Status::NotStarted);
        assert!(report.total_time.is_zero());
        assert_eq!(report.laps, vec![LapInfo::default(); 2]);
    }

    #[test]
    fn cannot_continue_measures_to_last_event() {
        let events = [
            drawn("09:00:00.000", "09:00:00.000"),
            ev("09:00:01.000", Started),
            ev("09:05:00.000", LapCompleted),
            ev("09:10:00.000", CannotContinue).with_extra("Lost in the forest"),
        ];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.status, Status::NotFinished);
        assert_eq!(report.total_time.to_string(), "00:10:00.000");
        assert_eq!(report.laps[0].time.unwrap().to_string(), "00:04:59.000");
        assert_eq!(report.laps[1], LapInfo::default());
    }

    #[test]
    fn disqualified_is_not_finished() {
        let events = [
            drawn("09:00:00.000", "09:30:00.000"),
            ev("09:30:05.000", Started),
            ev("09:40:00.000", Disqualified),
        ];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.status, Status::NotFinished);
        assert_eq!(report.total_time.to_string(), "00:10:00.000");
    }

    #[test]
    fn total_time_counts_from_planned_start() {
        let events = [
            drawn("08:00:00.000", "09:00:00.000"),
            ev("09:00:30.000", Started),
            ev("09:10:00.000", Finished),
        ];
        let report = reconstruct(&config(), 1, &events);
        assert_eq!(report.total_time.to_string(), "00:10:00.000");
    }

    #[test]
    fn malformed_lap_time_degrades_to_zero() {
        let events = [
            drawn("09:00:00.000", "09:00:00.000"),
            ev("09:00:01.000", Started),
            ev("invalid", LapCompleted),
            ev("09:15:00.000", Finished),
        ];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.status, Status::Finished);
        assert_eq!(report.total_time.to_string(), "00:15:00.000");
        assert_eq!(
            report.laps,
            vec![
                LapInfo {
                    time: Some(Elapsed::zero()),
                    speed: 0.0
                },
                LapInfo::default(),
            ]
        );
    }

    #[test]
    fn missing_planned_start_gives_zero_total() {
        let events = [ev("09:00:01.000", Started), ev("09:10:00.000", Finished)];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.status, Status::Finished);
        assert!(report.total_time.is_zero());
    }

    #[test]
    fn lap_without_actual_start_is_zero() {
        let events = [ev("09:05:00.000", LapCompleted)];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.laps[0].time, Some(Elapsed::zero()));
        assert_eq!(report.laps[0].speed, 0.0);
    }

    #[test]
    fn extra_lap_completions_are_ignored() {
        let events = [
            ev("09:00:00.000", Started),
            ev("09:05:00.000", LapCompleted),
            ev("09:10:00.000", LapCompleted),
            ev("09:15:00.000", LapCompleted),
        ];
        let report = reconstruct(&config(), 1, &events);
        assert_eq!(report.laps.len(), 2);

        let zero_laps = reconstruct(&RaceConfig::new(0, 3651, 50, 1), 1, &events);
        assert!(zero_laps.laps.is_empty());
    }

    #[test]
    fn last_status_event_wins() {
        let events = [
            ev("09:00:01.000", Started),
            drawn("09:00:02.000", "09:00:00.000"),
        ];
        let report = reconstruct(&config(), 1, &events);
        assert_eq!(report.status, Status::NotStarted);
        assert!(report.total_time.is_zero());
    }

    #[test]
    fn restarted_after_not_finished_keeps_last_time() {
        let events = [
            drawn("09:00:00.000", "09:00:00.000"),
            ev("09:05:00.000", CannotContinue),
            ev("09:06:00.000", Started),
        ];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.status, Status::Started);
        assert_eq!(report.total_time.to_string(), "00:05:00.000");
    }

    #[test]
    fn started_without_end_has_zero_total() {
        let events = [
            drawn("09:00:00.000", "09:00:00.000"),
            ev("09:00:01.000", Started),
        ];
        let report = reconstruct(&config(), 1, &events);
        assert_eq!(report.status, Status::Started);
        assert!(report.total_time.is_zero());
    }

    #[test]
    fn penalty_without_status_events() {
        let events = [
            ev("09:08:00.000", EnteredPenaltyLaps),
            ev("09:08:30.000", LeftPenaltyLaps),
        ];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.status, Status::NotStarted);
        assert_eq!(report.penalty.time.unwrap().to_string(), "00:00:30.000");
        assert_eq!(report.penalty.speed, 0.0);
    }

    #[test]
    fn penalty_keeps_last_entry_and_exit() {
        let events = [
            ev("09:00:00.000", OnFiringRange),
            ev("09:01:00.000", EnteredPenaltyLaps),
            ev("09:01:10.000", LeftPenaltyLaps),
            ev("09:05:00.000", EnteredPenaltyLaps),
            ev("09:05:50.000", LeftPenaltyLaps),
        ];
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.penalty.time.unwrap().to_string(), "00:00:50.000");
        assert_eq!(report.penalty.speed, 250.0 / 50.0);
    }

    #[test]
    fn penalty_needs_both_ends() {
        let report = reconstruct(&config(), 1, &[ev("09:08:00.000", EnteredPenaltyLaps)]);
        assert_eq!(report.penalty, PenaltyInfo::default());
    }

    #[test]
    fn penalty_exit_before_entry_is_zero() {
        let events = [
            ev("09:00:00.000", OnFiringRange),
            ev("09:08:30.000", LeftPenaltyLaps),
            ev("09:09:00.000", EnteredPenaltyLaps),
        ];
        let report = reconstruct(&config(), 1, &events);
        assert_eq!(report.penalty.time, Some(Elapsed::zero()));
        assert_eq!(report.penalty.speed, 0.0);
    }

    #[test]
    fn surplus_hits_give_negative_penalty_speed() {
        let mut events = vec![ev("09:00:00.000", OnFiringRange)];
        events.extend((0..6).map(|_| ev("09:00:01.000", TargetHit)));
        events.push(ev("09:01:00.000", EnteredPenaltyLaps));
        events.push(ev("09:01:10.000", LeftPenaltyLaps));
        let report = reconstruct(&config(), 1, &events);

        assert_eq!(report.shooting.misses(), -1);
        assert_eq!(report.penalty.speed, -50.0 / 10.0);
    }

    #[test]
    fn narration_only_kinds_have_no_effect() {
        let events = [
            ev("09:00:00.000", Registered),
            ev("09:00:01.000", OnStartLine),
            ev("09:00:02.000", LeftFiringRange),
            ev("09:00:03.000", Unknown(99)),
        ];
        assert_eq!(
            reconstruct(&config(), 1, &events),
            reconstruct(&config(), 1, &[])
        );
    }

    #[test]
    fn status_display_names() {
        assert_eq!(Status::NotStarted.to_string(), "NotStarted");
        assert_eq!(Status::NotFinished.to_string(), "NotFinished");
        assert_eq!(format!("[{:<8}]", Status::Started), "[Started ]");
    }
}
