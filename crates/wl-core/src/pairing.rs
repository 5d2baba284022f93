//! Shift pairing.
//!
//! Turns a time-ordered event sequence into completed work sessions.
//!
//! # Policy
//!
//! The scan carries at most one pending clock-in.
//!
//! - A clock-in while one is already pending is a bounce: the earlier
//!   clock-in is kept and a [`Notice::DuplicateClockIn`] is recorded.
//! - A clock-out with nothing pending is an orphan: it is dropped and a
//!   [`Notice::OrphanClockOut`] is recorded.
//! - A clock-in still pending at the end of the log produces no session and a
//!   [`Notice::UnterminatedShift`].
//!
//! Every consumer (console report, CSV export) goes through
//! [`pair_sessions`], so the policy is applied in exactly one place.

use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::event::{Event, EventKind, TIMESTAMP_FORMAT};

/// 2025 Korean statutory minimum hourly wage, in won.
pub const DEFAULT_HOURLY_RATE: f64 = 10_030.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// An hourly rate that is negative or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("hourly rate must be a finite, non-negative number, got {0}")]
pub struct InvalidRate(pub f64);

/// Pay settings applied to every session of a run.
///
/// The rate is always finite and non-negative, so every session wage is too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WageConfig {
    hourly_rate: f64,
}

impl WageConfig {
    pub fn new(hourly_rate: f64) -> Result<Self, InvalidRate> {
        if hourly_rate.is_finite() && hourly_rate >= 0.0 {
            Ok(Self { hourly_rate })
        } else {
            Err(InvalidRate(hourly_rate))
        }
    }

    /// Currency units paid per hour worked.
    pub const fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }
}

impl Default for WageConfig {
    fn default() -> Self {
        Self {
            hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }
}

/// A completed clock-in / clock-out pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Elapsed hours between `start` and `end`. Not capped at a day.
    pub duration_hours: f64,
    /// `duration_hours * hourly_rate`, unrounded.
    pub wage: f64,
}

impl Session {
    /// Builds a session, computing duration and wage from the full date-times.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, config: &WageConfig) -> Self {
        let seconds = (end - start).num_seconds().max(0);
        let duration_hours = seconds as f64 / SECONDS_PER_HOUR;
        Self {
            start,
            end,
            duration_hours,
            wage: duration_hours * config.hourly_rate,
        }
    }
}

/// Something odd in the log that was absorbed instead of failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A second clock-in arrived while `pending` was still open; `ignored` was dropped.
    DuplicateClockIn {
        pending: NaiveDateTime,
        ignored: NaiveDateTime,
    },
    /// A clock-out with no clock-in to close.
    OrphanClockOut { at: NaiveDateTime },
    /// The log ended with a clock-in still open.
    UnterminatedShift { since: NaiveDateTime },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateClockIn { pending, ignored } => write!(
                f,
                "duplicate clock-in at {} ignored; keeping clock-in at {}",
                ignored.format(TIMESTAMP_FORMAT),
                pending.format(TIMESTAMP_FORMAT)
            ),
            Self::OrphanClockOut { at } => write!(
                f,
                "clock-out at {} has no matching clock-in",
                at.format(TIMESTAMP_FORMAT)
            ),
            Self::UnterminatedShift { since } => write!(
                f,
                "shift started at {} has not been clocked out",
                since.format(TIMESTAMP_FORMAT)
            ),
        }
    }
}

/// Output of a pairing scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pairing {
    pub sessions: Vec<Session>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Copy)]
enum ShiftState {
    Idle,
    Open { since: NaiveDateTime },
}

/// Pairs clock-ins with clock-outs.
///
/// Events must already be sorted by timestamp (see
/// [`sort_events`](crate::reader::sort_events)). The result depends only on
/// `events` and `config`.
pub fn pair_sessions(events: &[Event], config: &WageConfig) -> Pairing {
    let mut state = ShiftState::Idle;
    let mut pairing = Pairing::default();

    for event in events {
        state = match (state, event.kind) {
            (ShiftState::Idle, EventKind::ClockIn) => ShiftState::Open {
                since: event.timestamp,
            },
            (ShiftState::Open { since }, EventKind::ClockIn) => {
                pairing.notices.push(Notice::DuplicateClockIn {
                    pending: since,
                    ignored: event.timestamp,
                });
                ShiftState::Open { since }
            }
            (ShiftState::Open { since }, EventKind::ClockOut) => {
                pairing
                    .sessions
                    .push(Session::new(since, event.timestamp, config));
                ShiftState::Idle
            }
            (ShiftState::Idle, EventKind::ClockOut) => {
                pairing
                    .notices
                    .push(Notice::OrphanClockOut { at: event.timestamp });
                ShiftState::Idle
            }
        };
    }

    if let ShiftState::Open { since } = state {
        pairing.notices.push(Notice::UnterminatedShift { since });
    }

    pairing
}
