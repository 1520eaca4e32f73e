//! Fixed stop — hard stop below entry, optional take-profit above.
//!
//! Both conditions are always live; the stop is checked first on every bar
//! (see [`FIXED_STOP_CHECKS`]). Exits fill at the configured level price, not
//! the bar extreme: a gap through the stop still fills at the stop.

use crate::domain::{Candle, ExitReason};
use crate::engine::precedence::{ExitCondition, FIXED_STOP_CHECKS};

use super::{BarStep, ExitDecision};

#[derive(Debug, Clone)]
pub struct FixedStopMachine {
    entry_price: f64,
    stop_pct: f64,
    take_profit_pct: Option<f64>,
}

impl FixedStopMachine {
    pub fn new(entry_price: f64, stop_pct: f64, take_profit_pct: Option<f64>) -> Self {
        Self {
            entry_price,
            stop_pct,
            take_profit_pct,
        }
    }

    /// The price the stop fills at: `entry * (1 - stop_pct)`.
    pub fn stop_price(&self) -> f64 {
        self.entry_price * (1.0 - self.stop_pct)
    }

    pub fn step(&mut self, candle: &Candle) -> BarStep {
        for &check in FIXED_STOP_CHECKS {
            match check {
                ExitCondition::StopLoss => {
                    let stop_price = self.stop_price();
                    if candle.low <= stop_price {
                        return BarStep::exited(ExitDecision::new(
                            candle.timestamp,
                            stop_price,
                            ExitReason::StopLoss,
                        ));
                    }
                }
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
                // Not in this policy's check set.
                _ => {}
            }
        }
        BarStep::hold()
    }
}
