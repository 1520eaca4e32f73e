//! Time stop — exit at close once the holding period expires.
//!
//! Take-profit is checked before the clock (see [`TIME_STOP_CHECKS`]) — the
//! reverse of the fixed-stop ordering, preserved exactly because downstream
//! results are calibrated against it.

use crate::domain::{Candle, ExitReason};
use crate::engine::precedence::{ExitCondition, TIME_STOP_CHECKS};

use super::{BarStep, ExitDecision};

#[derive(Debug, Clone)]
pub struct TimeStopMachine {
    entry_price: f64,
    entry_ts_ms: i64,
    max_hold_ms: i64,
    take_profit_pct: Option<f64>,
}

impl TimeStopMachine {
    pub fn new(
        entry_price: f64,
        entry_ts_ms: i64,
        max_hold_ms: i64,
        take_profit_pct: Option<f64>,
    ) -> Self {
        Self {
            entry_price,
            entry_ts_ms,
            max_hold_ms,
            take_profit_pct,
        }
    }

    pub fn step(&mut self, candle: &Candle) -> BarStep {
        for &check in TIME_STOP_CHECKS {
            match check {
                ExitCondition::TakeProfit => {
                    if let Some(tp) = self.take_profit_pct {
                        let target = self.entry_price * (1.0 + tp);
                        if candle.high >= target {
                            return BarStep::exited(ExitDecision::new(
                                candle.timestamp,
                                target,
                                ExitReason::TakeProfit,
                            ));
                        }
                    }
                }
                ExitCondition::TimeLimit => {
                    if candle.timestamp * 1000 >= self.entry_ts_ms + self.max_hold_ms {
                        // Time exits fill at the expiry bar's close.
                        return BarStep::exited(ExitDecision::new(
                            candle.timestamp,
                            candle.close,
                            ExitReason::TimeStop,
                        ));
                    }
                }
                // Not in this policy's check set.
                _ => {}
            }
        }
        BarStep::hold()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::bar;
    use super::*;

    const HOUR_MS: i64 = 3_600_000;

    fn machine(tp: Option<f64>) -> TimeStopMachine {
        TimeStopMachine::new(100.0, 1_000_000, HOUR_MS, tp)
    }

    #[test]
    fn holds_before_expiry() {
        let mut m = machine(None);
        let step = m.step(&bar(1, 105.0, 95.0, 101.0));
        assert!(step.exit.is_none());
    }

    #[test]
    fn time_exit_fills_at_close() {
        let mut m = machine(None);
        // Bar at entry + 1h: timestamp 1000 + 3600 = 4600s.
        let mut candle = bar(60, 105.0, 95.0, 102.5);
        candle.timestamp = 4_600;
        let exit = m.step(&candle).exit.unwrap();
        assert_eq!(exit.price, 102.5);
        assert_eq!(exit.reason, ExitReason::TimeStop);
    }

    #[test]
    fn take_profit_wins_over_clock_on_same_bar() {
        let mut m = machine(Some(0.10));
        let mut candle = bar(60, 112.0, 95.0, 102.0);
        candle.timestamp = 4_600; // already past expiry, but target also tagged
        let exit = m.step(&candle).exit.unwrap();
        assert_eq!(exit.reason, ExitReason::TakeProfit);
        assert_eq!(exit.price, 110.0);
    }

    #[test]
    fn take_profit_before_expiry() {
        let mut m = machine(Some(0.10));
        let exit = m.step(&bar(1, 111.0, 99.0, 110.5)).exit.unwrap();
        assert_eq!(exit.reason, ExitReason::TakeProfit);
    }
}
