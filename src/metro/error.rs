use thiserror::Error;

/// Every business-rule violation gets its own variant so callers can tell
/// "line not found" apart from "duplicate station" and so on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetroError {
    #[error("a line with color {0:?} already exists")]
    DuplicateLine(String),
    #[error("no line with color {0:?}")]
    LineNotFound(String),
    #[error("a station named {0:?} already exists in the network")]
    DuplicateStation(String),
    #[error("line {0:?} already has stations")]
    LineNotEmpty(String),
    #[error("line {0:?} has no station to extend from")]
    NoPreviousStation(String),
    #[error("station {0:?} already has a next station")]
    StationAlreadyHasNext(String),
    #[error("transit duration must be positive")]
    InvalidDuration,
    #[error("no station named {0:?}")]
    StationNotFound(String),
    #[error("start and end station are both {0:?}")]
    SameStation(String),
    #[error("no interchange station between lines {from:?} and {to:?}")]
    NoInterchange { from: String, to: String },
    #[error("no route from {from:?} to {to:?}")]
    NoRoute { from: String, to: String },
}
