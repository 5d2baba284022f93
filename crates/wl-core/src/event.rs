//! Clock-in / clock-out events as recorded in the commute log.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

/// Timestamp layout used by the commute log and every rendered report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log label written by the recorder when the switch turns on.
pub const CLOCK_IN_LABEL: &str = "출근";

/// Log label written by the recorder when the switch turns off.
pub const CLOCK_OUT_LABEL: &str = "퇴근";

/// Which side of a shift an event marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ClockIn,
    ClockOut,
}

impl EventKind {
    /// The label this kind carries in the commute log.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ClockIn => CLOCK_IN_LABEL,
            Self::ClockOut => CLOCK_OUT_LABEL,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventKind {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CLOCK_IN_LABEL => Ok(Self::ClockIn),
            CLOCK_OUT_LABEL => Ok(Self::ClockOut),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// A label that is neither the clock-in nor the clock-out marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown commute label: {}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

/// A single parsed log entry.
///
/// Timestamps are local wall-clock time with no zone attached; the recorder
/// has already shifted them into the worker's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: NaiveDateTime,
    pub kind: EventKind,
}

impl Event {
    pub const fn new(timestamp: NaiveDateTime, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

impl fmt::Display for Event {
    /// Formats the event exactly as the recorder writes it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp.format(TIMESTAMP_FORMAT), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip() {
        for kind in [EventKind::ClockIn, EventKind::ClockOut] {
            let parsed: EventKind = kind.to_string().parse().expect("should parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn english_labels_are_unknown() {
        let err = "on".parse::<EventKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown commute label: on");
        assert!("off".parse::<EventKind>().is_err());
        assert!("알 수 없음".parse::<EventKind>().is_err());
    }

    #[test]
    fn event_displays_as_log_line() {
        let timestamp =
            NaiveDateTime::parse_from_str("2025-03-20 12:41:53", TIMESTAMP_FORMAT).unwrap();
        let event = Event::new(timestamp, EventKind::ClockIn);
        assert_eq!(event.to_string(), "2025-03-20 12:41:53 출근");
    }
}
