//! Candle — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable OHLCV bar for a single instrument.
///
/// `timestamp` is the period start in epoch seconds; `close_time()` derives the
/// period end. Sequences handed to the engine must be ascending by timestamp
/// with no duplicates (duplicates are a data-quality defect — see
/// [`crate::source::integrity`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Period start, epoch seconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub interval_seconds: i64,
}

impl Candle {
    /// Period end, epoch seconds: `timestamp + interval_seconds`.
    pub fn close_time(&self) -> i64 {
        self.timestamp + self.interval_seconds
    }

    /// Period end as a UTC datetime, for display and export.
    pub fn close_time_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.close_time(), 0)
    }

    /// Returns true if every price field is finite and positive.
    pub fn has_finite_prices(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }

    /// Basic OHLCV sanity check: finite positive prices, high >= low,
    /// range contains open and close, non-negative volume.
    pub fn is_sane(&self) -> bool {
        self.has_finite_prices()
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= 0.0
            && self.interval_seconds > 0
    }
}
