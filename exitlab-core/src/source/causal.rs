//! Causal candle access — the no-look-ahead boundary.
//!
//! The candle-source collaborator promises that no bar with
//! `close_time > as_of` is ever handed to the engine. `CausalSlice` re-checks
//! that promise at construction, so a violation surfaces as a typed error at
//! the boundary instead of silently contaminating decisions downstream.

use crate::domain::Candle;
use thiserror::Error;

/// Violation of the causal input contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CausalityError {
    #[error("candle {index} closes at {close_time}, beyond the as-of time {as_of}")]
    FutureCandle {
        index: usize,
        close_time: i64,
        as_of: i64,
    },
    #[error("candles must be ascending by timestamp (violated at index {index})")]
    OutOfOrder { index: usize },
}

/// An as-of-bounded view over an ordered candle sequence.
#[derive(Debug, Clone, Copy)]
pub struct CausalSlice<'a> {
    candles: &'a [Candle],
    as_of: i64,
}

impl<'a> CausalSlice<'a> {
    /// Wrap a candle sequence, rejecting any bar that closes after `as_of`
    /// and any ordering violation.
    pub fn new(candles: &'a [Candle], as_of: i64) -> Result<Self, CausalityError> {
        for (index, candle) in candles.iter().enumerate() {
            if candle.close_time() > as_of {
                return Err(CausalityError::FutureCandle {
                    index,
                    close_time: candle.close_time(),
                    as_of,
                });
            }
            if index > 0 && candle.timestamp < candles[index - 1].timestamp {
                return Err(CausalityError::OutOfOrder { index });
            }
        }
        Ok(Self { candles, as_of })
    }

    pub fn candles(&self) -> &'a [Candle] {
        self.candles
    }

    pub fn as_of(&self) -> i64 {
        self.as_of
    }

    /// The prefix of bars that had already closed at simulated time `t`.
    /// This is the only view a decision made at `t` may legally consume.
    pub fn closed_by(&self, t: i64) -> &'a [Candle] {
        let end = self.candles.partition_point(|c| c.close_time() <= t);
        &self.candles[..end]
    }
}
