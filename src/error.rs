use thiserror::Error;

/// Errors raised while decoding an encoded polyline string.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DecodeError {
    #[error("polyline ends in the middle of a varint chunk sequence")]
    TruncatedVarint,
    #[error("polyline varint exceeds the 64-bit value range")]
    OverlongVarint,
    #[error("polyline ends after an incomplete coordinate group")]
    IncompletePoint,
    #[error("polyline byte {0:#04x} is outside the encoding alphabet")]
    InvalidByte(u8),
}

/// Errors raised while parsing an OSM `opening_hours` specification.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("opening_hours specification is empty")]
    EmptyRule,
    #[error("unknown weekday token: {0:?}")]
    UnknownWeekday(String),
    #[error("malformed time range: {0:?}")]
    InvalidTimeRange(String),
    #[error("time of day out of range: {0:?}")]
    TimeOutOfRange(String),
    #[error("unsupported opening_hours syntax: {0:?}")]
    UnsupportedSyntax(String),
}
