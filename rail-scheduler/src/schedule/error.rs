//! Schedule loading error types.

use std::fmt;
use std::path::PathBuf;

use crate::domain::{DomainError, StationId, TimeError};

/// Which kind of record a loading error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Station,
    Trip,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Station => f.write_str("station"),
            RecordKind::Trip => f.write_str("trip"),
        }
    }
}

/// Why a single record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Wrong field count or a field that is not a number
    #[error("{0}")]
    Syntax(String),

    /// Station id 0
    #[error("station id must be positive")]
    ZeroStationId,

    /// Two stations share an id
    #[error("duplicate station id {0}")]
    DuplicateStationId(u32),

    /// Station ids skip a value
    #[error("station ids must run contiguously from 1; expected {expected}, found {found}")]
    StationIdGap { expected: StationId, found: u32 },

    /// A departure or arrival field is not a valid HHMM time
    #[error("{field} {raw}: {source}")]
    InvalidTime {
        field: &'static str,
        raw: u32,
        #[source]
        source: TimeError,
    },

    /// The trip breaks a domain rule (unknown station, overnight, same station)
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Errors that prevent a schedule from being built.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Data file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record failed parsing or validation.
    ///
    /// `line` is 1-based, or 0 when the record was not read from a file.
    #[error("malformed {kind} record on line {line}: {reason}")]
    MalformedInput {
        kind: RecordKind,
        line: usize,
        #[source]
        reason: RecordError,
    },
}

impl ScheduleError {
    pub(crate) fn malformed(kind: RecordKind, line: usize, reason: impl Into<RecordError>) -> Self {
        ScheduleError::MalformedInput {
            kind,
            line,
            reason: reason.into(),
        }
    }

    /// The typed cause of a malformed record, if this is one.
    pub fn record_error(&self) -> Option<&RecordError> {
        match self {
            ScheduleError::MalformedInput { reason, .. } => Some(reason),
            ScheduleError::Io { .. } => None,
        }
    }
}
