//! Trailing stop — arm above entry, then trail the high watermark.
//!
//! States: pre-activation → activated → exited. Activation is one-way; the
//! trail peak is monotonically non-decreasing once armed. On every activated
//! bar the order is: update peak, recompute threshold, then test — so a bar
//! that both raises the peak and tags the old trail level exits on the new
//! level's basis. The optional hard stop fires from either state and is
//! checked first (see [`TRAILING_STOP_CHECKS`]).

use crate::domain::{Candle, ExitReason};
use crate::engine::precedence::{ExitCondition, TRAILING_STOP_CHECKS};

use super::{BarStep, ExitDecision};

#[derive(Debug, Clone)]
pub struct TrailingStopMachine {
    entry_price: f64,
    activation_pct: f64,
    trail_pct: f64,
    hard_stop_pct: Option<f64>,
    activated: bool,
    trail_peak: f64,
}

impl TrailingStopMachine {
    pub fn new(
        entry_price: f64,
        activation_pct: f64,
        trail_pct: f64,
        hard_stop_pct: Option<f64>,
    ) -> Self {
        Self {
            entry_price,
            activation_pct,
            trail_pct,
            hard_stop_pct,
            activated: false,
            trail_peak: entry_price,
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn step(&mut self, candle: &Candle) -> BarStep {
        for &check in TRAILING_STOP_CHECKS {
            match check {
                ExitCondition::HardStop => {
                    if let Some(hs) = self.hard_stop_pct {
                        let stop_price = self.entry_price * (1.0 - hs);
                        if candle.low <= stop_price {
                            return BarStep::exited(ExitDecision::new(
                                candle.timestamp,
                                stop_price,
                                ExitReason::HardStop,
                            ));
                        }
                    }
                }
                ExitCondition::TrailingStop => {
                    if !self.activated {
                        let activation_price = self.entry_price * (1.0 + self.activation_pct);
                        if candle.high < activation_price {
                            // Without a hard stop, no exit is possible before
                            // activation — the trade waits for it or for data
                            // to end.
                            continue;
                        }
                        self.activated = true;
                    }
                    // Peak update precedes the stop test on the same bar.
                    self.trail_peak = self.trail_peak.max(candle.high);
                    let trail_stop_price = self.trail_peak * (1.0 - self.trail_pct);
                    if candle.low <= trail_stop_price {
                        return BarStep::exited(ExitDecision::new(
                            candle.timestamp,
                            trail_stop_price,
                            ExitReason::TrailingStop,
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
