//! Trade result assembly.
//!
//! Collects partial fills during the fold and assembles the final immutable
//! `TradeResult` when the machine (or end-of-data) produces an exit. Output
//! invariants are checked with `debug_assert!` — loud in development builds,
//! free in release.

use crate::domain::{FeeModel, PartialExit, TradeResult};
use crate::engine::entry::EntryPoint;
use crate::engine::metrics::{net_return_bps, weighted_gross_return_bps, ExcursionTracker};
use crate::engine::policies::ExitDecision;

#[derive(Debug)]
pub struct ResultBuilder {
    entry: EntryPoint,
    fees: FeeModel,
    partial_exits: Vec<PartialExit>,
}

impl ResultBuilder {
    pub fn new(entry: EntryPoint, fees: FeeModel) -> Self {
        Self {
            entry,
            fees,
            partial_exits: Vec::new(),
        }
    }

    pub fn record_partials(&mut self, fills: Vec<PartialExit>) {
        self.partial_exits.extend(fills);
    }

    /// Assemble the terminal record. `remaining_fraction` is whatever the
    /// final exit closes (zero when a ladder fully completed).
    pub fn finish(
        self,
        exit: ExitDecision,
        remaining_fraction: f64,
        tracker: &ExcursionTracker,
    ) -> TradeResult {
        let mut fills: Vec<(f64, f64)> = self
            .partial_exits
            .iter()
            .map(|p| (p.price, p.fraction))
            .collect();
        fills.push((exit.price, remaining_fraction));

        let gross = weighted_gross_return_bps(self.entry.price, &fills);
        let realized_return_bps = net_return_bps(gross, &self.fees);
        let tail_capture = tracker.tail_capture(realized_return_bps);
        let time_exposed_ms = (exit.timestamp - self.entry.timestamp) * 1000;

        debug_assert!(
            exit.timestamp >= self.entry.timestamp,
            "exit at {} precedes entry at {}",
            exit.timestamp,
            self.entry.timestamp
        );
        debug_assert!(tracker.mae_bps() <= 0.0);
        debug_assert!(tail_capture.map_or(true, |t| t <= 1.0));
        debug_assert!(
            (fills.iter().map(|(_, f)| f).sum::<f64>() - 1.0).abs() < 1e-9,
            "fill fractions must conserve the original position"
        );

        TradeResult {
            entry_timestamp: self.entry.timestamp,
            entry_price: self.entry.price,
            exit_timestamp: exit.timestamp,
            exit_price: exit.price,
            exit_reason: exit.reason,
            exit_detail: exit.detail,
            realized_return_bps,
            stop_out: exit.reason.is_stop_out(),
            max_adverse_excursion_bps: tracker.mae_bps(),
            time_exposed_ms,
            tail_capture,
            partial_exits: self.partial_exits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candle, ExitReason};

    fn entry() -> EntryPoint {
        EntryPoint {
            index: 0,
            timestamp: 1_000,
            price: 100.0,
        }
    }

    fn tracked(highs_lows: &[(f64, f64)]) -> ExcursionTracker {
        let mut tracker = ExcursionTracker::new(100.0);
        for &(high, low) in highs_lows {
            tracker.update(&Candle {
                timestamp: 1_000,
                open: 100.0,
                high,
                low,
                close: 100.0,
                volume: 10.0,
                interval_seconds: 60,
            });
        }
        tracker
    }

    #[test]
    fn simple_full_exit() {
        let builder = ResultBuilder::new(entry(), FeeModel::frictionless());
        let tracker = tracked(&[(120.0, 95.0)]);
        let result = builder.finish(
            ExitDecision::new(1_060, 110.0, ExitReason::TakeProfit),
            1.0,
            &tracker,
        );
        assert_eq!(result.realized_return_bps, 1_000.0);
        assert_eq!(result.exit_price, 110.0);
        assert_eq!(result.max_adverse_excursion_bps, -500.0);
        assert_eq!(result.time_exposed_ms, 60_000);
        assert!(!result.stop_out);
        assert_eq!(result.tail_capture, Some(0.5));
    }

    #[test]
    fn stop_exit_sets_stop_out() {
        let builder = ResultBuilder::new(entry(), FeeModel::frictionless());
        let tracker = tracked(&[(101.0, 78.0)]);
        let result = builder.finish(
            ExitDecision::new(1_060, 80.0, ExitReason::StopLoss),
            1.0,
            &tracker,
        );
        assert!(result.stop_out);
        assert_eq!(result.realized_return_bps, -2_000.0);
        assert!(result.tail_capture.is_some());
    }

    #[test]
    fn fees_reduce_realized_return() {
        let builder = ResultBuilder::new(entry(), FeeModel::new(10.0, 5.0));
        let tracker = tracked(&[(120.0, 100.0)]);
        let result = builder.finish(
            ExitDecision::new(1_060, 110.0, ExitReason::TakeProfit),
            1.0,
            &tracker,
        );
        assert_eq!(result.realized_return_bps, 975.0);
    }

    #[test]
    fn partial_fills_weight_the_return() {
        let mut builder = ResultBuilder::new(entry(), FeeModel::frictionless());
        builder.record_partials(vec![PartialExit {
            timestamp: 1_060,
            price: 200.0,
            fraction: 0.5,
            level: 0,
        }]);
        let tracker = tracked(&[(210.0, 100.0), (210.0, 78.0)]);
        let result = builder.finish(
            ExitDecision::new(1_120, 80.0, ExitReason::StopLoss),
            0.5,
            &tracker,
        );
        // 0.5 * +100% + 0.5 * -20% = +40%.
        assert!((result.realized_return_bps - 4_000.0).abs() < 1e-9);
        assert_eq!(result.partial_exits.len(), 1);
    }
}
