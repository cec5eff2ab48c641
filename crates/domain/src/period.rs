//! Periods, windows and the aggregation delta.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::Timestamp;

/// Why a `(start, end)` pair was rejected as a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("period start is missing")]
    MissingStart,

    #[error("period end is missing")]
    MissingEnd,

    #[error("period start must be strictly before its end")]
    StartNotBeforeEnd,

    #[error("period end must not be in the future")]
    EndInFuture,
}

/// A caller-supplied interval that satisfies `start < end <= now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    start: Timestamp,
    end: Timestamp,
}

impl Period {
    /// Validate a pair of bounds against the instant `now`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PeriodError`] that applies: a missing bound, a
    /// start not strictly before the end, or an end after `now`.
    pub fn new(
        start: Option<Timestamp>,
        end: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<Self, PeriodError> {
        let start = start.ok_or(PeriodError::MissingStart)?;
        let end = end.ok_or(PeriodError::MissingEnd)?;
        if start >= end {
            return Err(PeriodError::StartNotBeforeEnd);
        }
        if end > now {
            return Err(PeriodError::EndInFuture);
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Split the period into consecutive windows of at most `delta`.
    ///
    /// Windows are ordered, contiguous and cover `[start, end)` exactly; the
    /// last one is shorter when the period length is not a multiple of `delta`.
    /// They are produced lazily, one at a time.
    pub fn split(&self, delta: Delta) -> impl Iterator<Item = TimeWindow> + use<> {
        let step = delta.as_time_delta();
        let end = self.end;
        let window_from = move |start: Timestamp| {
            (start < end).then(|| TimeWindow {
                start,
                end: (start + step).min(end),
            })
        };
        std::iter::successors(window_from(self.start), move |prev| window_from(prev.end))
    }
}

/// A sub-interval of a [`Period`] produced by [`Period::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    /// Length of the window.
    #[must_use]
    pub fn length(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Strictly positive number of seconds used both as the simultaneity
/// tolerance and as the window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Delta(u32);

impl Delta {
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroDelta`] when `seconds` is zero.
    pub fn from_secs(seconds: u32) -> Result<Self, ValidationError> {
        if seconds == 0 {
            return Err(ValidationError::ZeroDelta);
        }
        Ok(Self(seconds))
    }

    #[must_use]
    pub fn as_secs(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_time_delta(self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.0))
    }
}

impl TryFrom<u32> for Delta {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_secs(value)
    }
}

impl From<Delta> for u32 {
    fn from(value: Delta) -> Self {
        value.0
    }
}
