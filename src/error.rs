use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type returned when a trace (or task-set file) cannot be
/// turned into a layout at all.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace source does not exist.
    #[error("trace source {} not found", path.display())]
    NotFound { path: PathBuf },

    /// The trace source exists but could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The engine configuration is unusable.
    #[error("invalid engine configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl TraceError {
    /// Classify an I/O failure on `path`, singling out a missing source.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            TraceError::NotFound { path }
        } else {
            TraceError::Io { path, source }
        }
    }
}

/// Why a single trace record was skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("expected at least {required} fields, found {found}")]
    TooFewFields { found: usize, required: usize },

    #[error("time field {text:?} is not a number")]
    InvalidTime { text: String },
}

/// Diagnostic for a malformed record that was skipped during parsing.
///
/// Skipped lines never abort parsing; they are collected so that
/// callers can report them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct SkippedLine {
    /// One-based line number within the trace text, header included.
    pub line: usize,
    pub reason: SkipReason,
}
