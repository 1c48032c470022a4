use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};

/// Closed time interval in Unix epoch seconds, always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    start: f64,
    end: f64,
}

impl TimeSpan {
    /// Builds a span, swapping the edges when they arrive reversed.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    #[must_use]
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
        )
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[must_use]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    #[must_use]
    pub fn start_datetime(self) -> Option<DateTime<Utc>> {
        unix_seconds_to_datetime(self.start)
    }

    #[must_use]
    pub fn end_datetime(self) -> Option<DateTime<Utc>> {
        unix_seconds_to_datetime(self.end)
    }
}

/// Earliest and latest sample timestamps known for a series (or a set of them).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub min: f64,
    pub max: f64,
}

impl DataBounds {
    /// Returns `None` when either edge is not finite.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        Some(Self {
            min: min.min(max),
            max: min.max(max),
        })
    }

    #[must_use]
    pub fn from_datetimes(min: DateTime<Utc>, max: DateTime<Utc>) -> Option<Self> {
        Self::new(datetime_to_unix_seconds(min), datetime_to_unix_seconds(max))
    }

    #[must_use]
    pub fn single(time: f64) -> Option<Self> {
        Self::new(time, time)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Union across every present entry; `None` when all are absent.
    #[must_use]
    pub fn union_all<I>(bounds: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        bounds
            .into_iter()
            .flatten()
            .reduce(|acc, next| acc.union(next))
    }

    /// Grows the bounds so they include `time`.
    #[must_use]
    pub fn extend_to(self, time: f64) -> Self {
        if !time.is_finite() {
            return self;
        }
        Self {
            min: self.min.min(time),
            max: self.max.max(time),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }

    #[must_use]
    pub fn at(time: DateTime<Utc>, value: f64) -> Self {
        Self::new(datetime_to_unix_seconds(time), value)
    }
}

/// Observed value range of the currently loaded samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueExtent {
    pub min: f64,
    pub max: f64,
}

impl ValueExtent {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Extent over finite sample values; `None` when there are none.
    #[must_use]
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for sample in samples {
            if !sample.value.is_finite() {
                continue;
            }
            min = min.min(sample.value);
            max = max.max(sample.value);
        }

        (min <= max).then_some(Self { min, max })
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn is_flat(self) -> bool {
        self.min == self.max
    }
}
