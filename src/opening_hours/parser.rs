use std::str::FromStr;

use strum::{Display, EnumString};
use tracing::debug;

use crate::ParseError;

pub(crate) const MINUTES_PER_DAY: u16 = 24 * 60;

/// Weekday in OSM `opening_hours` order, Sunday first. Parses from the OSM
/// two-letter tokens and displays as the three-letter English label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString,
)]
#[repr(u8)]
pub enum Weekday {
    #[strum(serialize = "Su", to_string = "Sun")]
    Sunday = 0,
    #[strum(serialize = "Mo", to_string = "Mon")]
    Monday = 1,
    #[strum(serialize = "Tu", to_string = "Tue")]
    Tuesday = 2,
    #[strum(serialize = "We", to_string = "Wed")]
    Wednesday = 3,
    #[strum(serialize = "Th", to_string = "Thu")]
    Thursday = 4,
    #[strum(serialize = "Fr", to_string = "Fri")]
    Friday = 5,
    #[strum(serialize = "Sa", to_string = "Sat")]
    Saturday = 6,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    const fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % 7]
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        use chrono::Weekday::*;
        match day {
            Sun => Self::Sunday,
            Mon => Self::Monday,
            Tue => Self::Tuesday,
            Wed => Self::Wednesday,
            Thu => Self::Thursday,
            Fri => Self::Friday,
            Sat => Self::Saturday,
        }
    }
}

/// Ordered `opening_hours` rules. Later rules replace, for every day they
/// select, whatever earlier rules assigned to that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Days the rule applies to, in selector order.
    pub days: Vec<Weekday>,
    /// Open spans for those days; empty means the rule closes them (`off`).
    pub spans: Vec<TimeSpan>,
    /// Trailing quoted comment, carried onto the intervals the rule produces.
    pub comment: Option<String>,
}

/// Clock span in minutes since midnight. An `end` beyond 24:00 crosses into
/// the following calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: u16,
    pub end: u16,
}

/// Parses an OSM `opening_hours` specification into an ordered rule set.
///
/// Supported grammar: weekday selectors (single days, ranges including
/// wrapping ones, comma lists), comma-separated `HH:MM-HH:MM` spans, `off`,
/// `24/7`, rules without a day selector (whole week) and one trailing quoted
/// comment per rule. Anything else is rejected rather than approximated.
pub fn parse_opening_hours(spec: &str) -> Result<RuleSet, ParseError> {
    let mut rules = Vec::new();

    for part in spec.split(';') {
        let part = part.trim();
        // dangling semicolons are common in OSM tag values
        if part.is_empty() {
            continue;
        }
        rules.push(parse_rule(part)?);
    }

    if rules.is_empty() {
        return Err(ParseError::EmptyRule);
    }

    debug!(rules = rules.len(), "parsed opening_hours specification");
    Ok(RuleSet { rules })
}

fn parse_rule(rule: &str) -> Result<Rule, ParseError> {
    let (rule, comment) = split_comment(rule)?;
    let rule = rule.trim();

    if rule == "24/7" {
        return Ok(Rule {
            days: Weekday::ALL.to_vec(),
            spans: vec![TimeSpan {
                start: 0,
                end: MINUTES_PER_DAY,
            }],
            comment,
        });
    }

    let (days, body) = match rule.split_once(char::is_whitespace) {
        Some((selector, body)) if !starts_with_digit(selector) => {
            (parse_day_selector(selector)?, body.trim())
        }
        // no day selector: the rule covers the whole week
        _ if starts_with_digit(rule) => (Weekday::ALL.to_vec(), rule),
        _ => return Err(ParseError::UnsupportedSyntax(rule.to_string())),
    };

    if body == "off" || body == "closed" {
        return Ok(Rule {
            days,
            spans: vec![],
            comment,
        });
    }

    let mut spans = Vec::new();
    for token in body.split(',') {
        spans.push(parse_time_span(token.trim())?);
    }

    Ok(Rule {
        days,
        spans,
        comment,
    })
}

fn split_comment(rule: &str) -> Result<(&str, Option<String>), ParseError> {
    if !rule.ends_with('"') {
        return Ok((rule, None));
    }

    let body = &rule[..rule.len() - 1];
    match body.rfind('"') {
        Some(open) => Ok((&rule[..open], Some(body[open + 1..].to_string()))),
        None => Err(ParseError::UnsupportedSyntax(rule.to_string())),
    }
}

fn starts_with_digit(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}

fn parse_day_selector(selector: &str) -> Result<Vec<Weekday>, ParseError> {
    let mut days = Vec::new();

    for item in selector.split(',') {
        match item.split_once('-') {
            Some((from, to)) => {
                let from = parse_weekday(from)?;
                let to = parse_weekday(to)?;

                // walk forward modulo 7, so "Sa-Su" and "Fr-Mo" wrap
                let mut day = from;
                loop {
                    days.push(day);
                    if day == to {
                        break;
                    }
                    day = day.next();
                }
            }
            None => days.push(parse_weekday(item)?),
        }
    }

    Ok(days)
}

fn parse_weekday(token: &str) -> Result<Weekday, ParseError> {
    Weekday::from_str(token).map_err(|_| ParseError::UnknownWeekday(token.to_string()))
}

fn parse_time_span(token: &str) -> Result<TimeSpan, ParseError> {
    let Some((start, end)) = token.split_once('-') else {
        return Err(ParseError::InvalidTimeRange(token.to_string()));
    };

    let start = parse_clock(start.trim())?;
    let mut end = parse_clock(end.trim())?;

    if start >= MINUTES_PER_DAY {
        return Err(ParseError::TimeOutOfRange(token.to_string()));
    }
    // an end at or before the start crosses midnight into the next day
    if end <= start {
        end += MINUTES_PER_DAY;
    }

    Ok(TimeSpan { start, end })
}

fn parse_clock(token: &str) -> Result<u16, ParseError> {
    let Some((hours, minutes)) = token.split_once(':') else {
        return Err(ParseError::InvalidTimeRange(token.to_string()));
    };

    let hours: u16 = hours
        .parse()
        .map_err(|_| ParseError::InvalidTimeRange(token.to_string()))?;
    let minutes: u16 = minutes
        .parse()
        .map_err(|_| ParseError::InvalidTimeRange(token.to_string()))?;

    if hours > 24 || minutes > 59 || (hours == 24 && minutes > 0) {
        return Err(ParseError::TimeOutOfRange(token.to_string()));
    }

    Ok(hours * 60 + minutes)
}
