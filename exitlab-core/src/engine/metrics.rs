//! Trade metrics — excursion tracking and return arithmetic.
//!
//! The tracker runs incrementally alongside every policy, independent of
//! which one is active. All math is plain `f64` add/multiply/compare — no
//! transcendental functions — so identical inputs produce bit-identical
//! output on any IEEE-754 platform.

use crate::domain::{Candle, FeeModel};

/// Basis points per unit return.
pub const BPS: f64 = 10_000.0;

/// Incremental peak / adverse-excursion tracker for one simulation.
#[derive(Debug, Clone)]
pub struct ExcursionTracker {
    entry_price: f64,
    /// Highest high observed since entry; starts at entry, non-decreasing.
    peak_high: f64,
    /// Worst drawdown below entry in bps; starts at 0, non-increasing.
    mae_bps: f64,
}

impl ExcursionTracker {
    pub fn new(entry_price: f64) -> Self {
        Self {
            entry_price,
            peak_high: entry_price,
            mae_bps: 0.0,
        }
    }

    /// Fold one bar into the excursion state.
    pub fn update(&mut self, candle: &Candle) {
        self.peak_high = self.peak_high.max(candle.high);
        let low_bps = (candle.low / self.entry_price - 1.0) * BPS;
        self.mae_bps = self.mae_bps.min(low_bps);
    }

    /// Worst drawdown below entry, bps. Zero if price never dipped below entry.
    pub fn mae_bps(&self) -> f64 {
        self.mae_bps
    }

    /// Peak unrealized gain, bps. Zero if price never exceeded entry.
    pub fn peak_return_bps(&self) -> f64 {
        (self.peak_high / self.entry_price - 1.0) * BPS
    }

    /// Fraction of the peak gain realized at exit, capped at 1.0.
    /// `None` when no gain ever occurred — capture is meaningless then.
    pub fn tail_capture(&self, realized_return_bps: f64) -> Option<f64> {
        let peak = self.peak_return_bps();
        if peak <= 0.0 {
            return None;
        }
        Some((realized_return_bps / peak).min(1.0))
    }
}

/// Gross return in bps over a set of (price, fraction) fills, weighted by
/// fraction of the original position. Fractions are expected to sum to 1.
pub fn weighted_gross_return_bps(entry_price: f64, fills: &[(f64, f64)]) -> f64 {
    fills
        .iter()
        .map(|(price, fraction)| fraction * (price / entry_price - 1.0) * BPS)
        .sum()
}

/// Fee-adjusted return: round-trip taker fee plus one slippage charge,
/// applied once at final exit regardless of how many partial fills occurred.
pub fn net_return_bps(gross_return_bps: f64, fees: &FeeModel) -> f64 {
    gross_return_bps - fees.round_trip_bps()
}
