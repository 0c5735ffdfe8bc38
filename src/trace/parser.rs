use std::fs;
use std::iter::{Enumerate, Skip};
use std::path::Path;
use std::str::Lines;

use super::{EventKind, TraceEvent};
use crate::config::EngineConfig;
use crate::error::{SkipReason, SkippedLine, TraceError};

/// Minimum number of fields of a well-formed record.
pub const REQUIRED_FIELDS: usize = 5;

/// An execution trace, fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    text: String,
}

impl Trace {
    /// Read the trace stored at `path`.
    ///
    /// Fails with [TraceError::NotFound] if there is no such file. Bytes
    /// that are not valid UTF-8 are replaced, which affects only the
    /// records containing them.
    pub fn open(path: impl AsRef<Path>) -> Result<Trace, TraceError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| TraceError::from_io(path, e))?;
        Ok(Trace::from_text(String::from_utf8_lossy(&bytes)))
    }

    /// Wrap trace text that is already in memory.
    pub fn from_text(text: impl Into<String>) -> Trace {
        Trace { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of record lines following the header.
    pub fn record_count(&self, config: &EngineConfig) -> usize {
        self.text.lines().skip(config.header_lines).count()
    }

    /// Iterate the records of the trace in order.
    ///
    /// Each call yields a fresh iterator starting from the first record.
    /// Malformed records show up as [SkippedLine] items and do not
    /// affect the records that follow them.
    pub fn events<'a>(&'a self, config: &EngineConfig) -> Events<'a> {
        Events {
            lines: self.text.lines().enumerate().skip(config.header_lines),
            delimiter: config.delimiter,
        }
    }
}

/// Lazy iterator over the records of a [Trace].
#[derive(Debug, Clone)]
pub struct Events<'a> {
    lines: Skip<Enumerate<Lines<'a>>>,
    delimiter: char,
}

impl<'a> Iterator for Events<'a> {
    type Item = Result<TraceEvent<'a>, SkippedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, line) = self.lines.next()?;
        Some(parse_record(line, self.delimiter).map_err(|reason| SkippedLine {
            line: idx + 1,
            reason,
        }))
    }
}

fn parse_record(line: &str, delimiter: char) -> Result<TraceEvent<'_>, SkipReason> {
    let fields: Vec<&str> = line.trim().split(delimiter).map(str::trim).collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(SkipReason::TooFewFields {
            found: fields.len(),
            required: REQUIRED_FIELDS,
        });
    }
    let time = match fields[0].parse::<f64>() {
        Ok(t) if t.is_finite() => t,
        _ => {
            return Err(SkipReason::InvalidTime {
                text: fields[0].to_string(),
            })
        }
    };
    Ok(TraceEvent {
        time,
        task_id: fields[2],
        description: fields[3],
        kind: EventKind::from(fields[4]),
    })
}
