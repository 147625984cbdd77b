use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::opening_hours::OpenInterval;
use crate::opening_hours::parser::{MINUTES_PER_DAY, RuleSet, TimeSpan};

/// Per-weekday open spans after applying all rules left to right.
///
/// All queries materialize spans as absolute start/end instants before
/// comparing, so spans crossing midnight cannot be off by a day.
#[derive(Debug, Clone, Default)]
pub(crate) struct WeekSchedule {
    days: [Vec<DaySpan>; 7],
}

#[derive(Debug, Clone)]
struct DaySpan {
    span: TimeSpan,
    comment: Option<String>,
}

impl WeekSchedule {
    /// Later rules replace the spans of every day they select; `off` rules
    /// leave their days empty.
    pub(crate) fn resolve(rules: &RuleSet) -> Self {
        let mut days: [Vec<DaySpan>; 7] = Default::default();

        for rule in &rules.rules {
            for &day in &rule.days {
                days[day.index()] = rule
                    .spans
                    .iter()
                    .map(|&span| DaySpan {
                        span,
                        comment: rule.comment.clone(),
                    })
                    .collect();
            }
        }

        for spans in &mut days {
            spans.sort_by_key(|day_span| day_span.span.start);
        }

        Self { days }
    }

    /// Returns the open state at `instant` and the first span boundary
    /// strictly after it, if the schedule has any boundary at all.
    pub(crate) fn state_pair(&self, instant: NaiveDateTime) -> (bool, Option<NaiveDateTime>) {
        (self.is_open_at(instant), self.next_boundary_after(instant))
    }

    fn is_open_at(&self, instant: NaiveDateTime) -> bool {
        let today = instant.date();
        // a cross-midnight span of the previous day may still cover `instant`
        let yesterday = today - Days::new(1);

        [today, yesterday].into_iter().any(|date| {
            self.spans_on(date)
                .any(|(start, end, _)| start <= instant && instant < end)
        })
    }

    fn next_boundary_after(&self, instant: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut next: Option<NaiveDateTime> = None;

        // yesterday (cross-midnight ends) through a full weekly cycle ahead
        let first = instant.date() - Days::new(1);
        for offset in 0..10 {
            let date = first + Days::new(offset);
            for (start, end, _) in self.spans_on(date) {
                for boundary in [start, end] {
                    if boundary > instant && next.is_none_or(|best| boundary < best) {
                        next = Some(boundary);
                    }
                }
            }
        }

        next
    }

    /// Open spans overlapping the calendar day, clipped to it, in
    /// chronological order.
    pub(crate) fn open_intervals_on(&self, date: NaiveDate) -> Vec<OpenInterval> {
        let day_start = date.and_time(NaiveTime::MIN);
        let next_midnight = (date + Days::new(1)).and_time(NaiveTime::MIN);
        let day_end = next_midnight - chrono::Duration::milliseconds(1);

        let mut intervals = Vec::new();
        for source_date in [date - Days::new(1), date] {
            for (start, end, day_span) in self.spans_on(source_date) {
                if end <= day_start || start > day_end {
                    continue;
                }
                intervals.push(OpenInterval {
                    start: start.max(day_start),
                    end: end.min(day_end),
                    truncated: start < day_start || end > next_midnight,
                    comment: day_span.comment.clone(),
                });
            }
        }

        intervals.sort_by_key(|interval| interval.start);
        intervals
    }

    /// Spans scheduled on the given date, as absolute instants.
    fn spans_on(
        &self,
        date: NaiveDate,
    ) -> impl Iterator<Item = (NaiveDateTime, NaiveDateTime, &DaySpan)> {
        let weekday = date.weekday().num_days_from_sunday() as usize;

        self.days[weekday].iter().map(move |day_span| {
            let TimeSpan { start, end } = day_span.span;
            let start = date.and_time(clock(start));
            let end_date = date + Days::new(u64::from(end / MINUTES_PER_DAY));
            let end = end_date.and_time(clock(end % MINUTES_PER_DAY));
            (start, end, day_span)
        })
    }
}

fn clock(minutes: u16) -> NaiveTime {
    // the parser guarantees minutes fit within a day
    NaiveTime::from_num_seconds_from_midnight_opt(u32::from(minutes) * 60, 0)
        .unwrap_or(NaiveTime::MIN)
}
