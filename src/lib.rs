#![doc = include_str!("../README.md")]

mod error;
mod model;
mod opening_hours;
mod polyline;

pub use error::{DecodeError, ParseError};
pub use model::{Coordinate, ElevatedCoordinate, Precision};
pub use opening_hours::{
    DayIntervals, NextChange, OpenInterval, OpeningHours, Rule, RuleSet, TimeSpan, Weekday,
    parse_opening_hours,
};
pub use polyline::{
    decode_polyline, decode_polyline_with_elevation, encode_polyline,
    encode_polyline_with_elevation,
};
