//! Entry resolution — map an alert timestamp onto the candle sequence.

use crate::domain::Candle;

/// A resolved entry: the bar the trade starts on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryPoint {
    /// Index of the entry candle within the sequence.
    pub index: usize,
    /// Entry candle timestamp, epoch seconds.
    pub timestamp: i64,
    /// Entry price: the entry candle's close.
    pub price: f64,
}

/// Resolve the entry bar for an alert.
///
/// The entry candle is the first one with `timestamp * 1000 >= alert_ts_ms`;
/// an alert before the first candle enters on the first candle. Fails closed
/// to `None` when the sequence is empty, the alert lands after all data, or
/// the resolved entry price is non-finite or non-positive. Pure function,
/// no side effects.
pub fn resolve_entry(alert_ts_ms: i64, candles: &[Candle]) -> Option<EntryPoint> {
    let index = candles
        .iter()
        .position(|c| c.timestamp * 1000 >= alert_ts_ms)?;
    let candle = &candles[index];
    if !candle.close.is_finite() || candle.close <= 0.0 {
        return None;
    }
    Some(EntryPoint {
        index,
        timestamp: candle.timestamp,
        price: candle.close,
    })
}
