//! Commute log parsing.
//!
//! The recorder appends one `<date> <time> <label>` line per switch change, but
//! the file may pick up unrelated lines along the way. Anything that does not
//! have exactly that shape is skipped rather than treated as an error.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::event::{Event, EventKind, TIMESTAMP_FORMAT};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("commute log not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to open commute log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LogError {
    /// Returns true when the run failed because the input log is absent.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Parses a single log line.
///
/// Returns `None` for anything that is not exactly three fields with a valid
/// timestamp and a known label.
pub fn parse_line(line: &str) -> Option<Event> {
    let mut fields = line.split_whitespace();
    let (Some(date), Some(time), Some(label), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };

    let kind: EventKind = label.parse().ok()?;
    let timestamp =
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), TIMESTAMP_FORMAT).ok()?;

    Some(Event::new(timestamp, kind))
}

/// Lazily parses lines into events, dropping the ones that don't match.
pub fn parse_lines<I, S>(lines: I) -> impl Iterator<Item = Event>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().enumerate().filter_map(|(idx, line)| {
        let line = line.as_ref();
        let event = parse_line(line);
        if event.is_none() && !line.trim().is_empty() {
            tracing::debug!(line = idx + 1, "skipping unrecognised log line");
        }
        event
    })
}

/// Reads every event from the commute log at `path`, in file order.
///
/// A missing file is reported as [`LogError::NotFound`]; nothing else about
/// the content can make this fail.
pub fn read_log(path: &Path) -> Result<Vec<Event>, LogError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LogError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(LogError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    // Lines that fail to decode are treated like any other foreign line.
    let lines = BufReader::new(file).lines().map_while(|line| match line {
        Ok(l) => Some(l),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Some(String::new()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "stopped reading commute log early");
            None
        }
    });

    let events: Vec<Event> = parse_lines(lines).collect();
    tracing::debug!(path = %path.display(), count = events.len(), "read commute log");
    Ok(events)
}

/// Orders events by timestamp, keeping input order for equal timestamps.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by_key(|e| e.timestamp);
}
