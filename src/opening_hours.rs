//! Evaluation of OSM `opening_hours` specifications.
//!
//! A specification is parsed into an ordered [RuleSet], resolved into a
//! weekly schedule and then queried relative to a reference instant: open or
//! closed right now, when the state flips next, and the open intervals of the
//! coming seven days.
//!
//! All instants are civil [NaiveDateTime]s; resolving the venue's timezone is
//! the caller's concern.

pub(crate) mod parser;
mod schedule;

use chrono::NaiveDateTime;
use tracing::warn;

pub use parser::{Rule, RuleSet, TimeSpan, Weekday, parse_opening_hours};

use crate::ParseError;
use crate::opening_hours::schedule::WeekSchedule;

/// Bound on forward state-pair hops when searching for the next open/closed
/// flip. Schedules that never change state (`24/7`, everything `off`, or
/// pathological back-to-back spans) would otherwise loop forever.
const MAX_STATE_HOPS: usize = 10;

/// Snapshot of an `opening_hours` schedule relative to a reference instant.
#[derive(Debug, Clone)]
pub struct OpeningHours {
    schedule: WeekSchedule,
    now: NaiveDateTime,
    is_open: bool,
    next_change: NextChange,
}

/// Outcome of the bounded forward search for the next state flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextChange {
    At(NaiveDateTime),
    /// The search exhausted its hop bound without observing a flip; the
    /// schedule may never change state. Callers must treat the next change
    /// as unknown, not as "never".
    Unresolved,
}

impl NextChange {
    pub const fn instant(self) -> Option<NaiveDateTime> {
        match self {
            Self::At(instant) => Some(instant),
            Self::Unresolved => None,
        }
    }
}

/// Open intervals of one calendar day, clipped to that day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayIntervals {
    pub day: Weekday,
    pub intervals: Vec<OpenInterval>,
}

/// One contiguous open span within a single calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// The span continues beyond the day it was clipped to.
    pub truncated: bool,
    /// Comment carried by the rule that produced the span.
    pub comment: Option<String>,
}

impl OpeningHours {
    /// Parses an OSM `opening_hours` string and evaluates it at `now`.
    pub fn from_osm_string(spec: &str, now: NaiveDateTime) -> Result<Self, ParseError> {
        let rules = parse_opening_hours(spec)?;
        Ok(Self::new(&rules, now))
    }

    /// Evaluates an already parsed rule set at `now`.
    pub fn new(rules: &RuleSet, now: NaiveDateTime) -> Self {
        let schedule = WeekSchedule::resolve(rules);
        let (is_open, first_boundary) = schedule.state_pair(now);

        // Hop forward through state pairs until the state flips. Boundaries
        // where it does not flip (back-to-back spans of the same state) are
        // skipped rather than reported as spurious changes.
        let mut next_change = NextChange::Unresolved;
        let mut boundary = first_boundary;
        let mut hops = 0;

        while let Some(instant) = boundary {
            let (state, next) = schedule.state_pair(instant);
            if state != is_open {
                next_change = NextChange::At(instant);
                break;
            }

            hops += 1;
            if hops == MAX_STATE_HOPS {
                warn!(
                    hops = MAX_STATE_HOPS,
                    "no state change found within the hop bound; opening hours \
                     appear to never change"
                );
                break;
            }
            boundary = next;
        }

        Self {
            schedule,
            now,
            is_open,
            next_change,
        }
    }

    /// Whether the reference instant falls inside an open interval.
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// The next instant at which [Self::is_open] flips, when known.
    pub const fn next_change(&self) -> NextChange {
        self.next_change
    }

    /// Whether the next change falls on the reference instant's calendar day.
    /// `None` when the next change is unresolved.
    pub fn next_change_is_today(&self) -> Option<bool> {
        self.next_change
            .instant()
            .map(|instant| instant.date() == self.now.date())
    }

    /// Whether the next change falls on the day after the reference instant.
    /// `None` when the next change is unresolved.
    pub fn next_change_is_tomorrow(&self) -> Option<bool> {
        self.next_change
            .instant()
            .map(|instant| Some(instant.date()) == self.now.date().succ_opt())
    }

    /// The open intervals of the seven calendar days starting at the
    /// reference instant's day, each clipped to its day.
    pub fn weekly_ranges(&self) -> Vec<DayIntervals> {
        (0..7)
            .map(|offset| {
                let date = self.now.date() + chrono::Days::new(offset);
                DayIntervals {
                    day: Weekday::from(chrono::Datelike::weekday(&date)),
                    intervals: self.schedule.open_intervals_on(date),
                }
            })
            .collect()
    }
}
