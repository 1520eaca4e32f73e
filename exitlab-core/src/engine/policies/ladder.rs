//! Ladder — partial exits at ascending price multiples.
//!
//! Levels are single-fire, and at most ONE level fires per bar: a bar that
//! gaps past several untriggered levels fills only the first untested one;
//! the rest become eligible on subsequent bars. This is deliberate and
//! downstream results are calibrated against it — do not "fix" it to fill
//! every eligible level in one bar.
//!
//! Level fills price at the level's target (`entry * multiple`), never the
//! bar's high. The optional stop-loss applies to whatever fraction remains
//! and is consulted after the level check on the same bar (see
//! [`LADDER_CHECKS`]).

use crate::domain::{Candle, ExitReason, LadderLevel, PartialExit, PositionState};
use crate::engine::precedence::{ExitCondition, LADDER_CHECKS};

use super::{BarStep, ExitDecision};

#[derive(Debug, Clone)]
pub struct LadderMachine {
    entry_price: f64,
    levels: Vec<LadderLevel>,
    stop_pct: Option<f64>,
    /// Single-fire latch per level, in level order.
    triggered: Vec<bool>,
}

impl LadderMachine {
    pub fn new(entry_price: f64, levels: Vec<LadderLevel>, stop_pct: Option<f64>) -> Self {
        let triggered = vec![false; levels.len()];
        Self {
            entry_price,
            levels,
            stop_pct,
            triggered,
        }
    }

    pub fn all_levels_triggered(&self) -> bool {
        self.triggered.iter().all(|&t| t)
    }

    pub fn step(&mut self, candle: &Candle, position: &mut PositionState) -> BarStep {
        let mut out = BarStep::hold();

        for &check in LADDER_CHECKS {
            match check {
                ExitCondition::LadderLevels => {
                    // Only the first untested level is examined this bar.
                    let Some(index) = self.triggered.iter().position(|&t| !t) else {
                        continue;
                    };
                    let level = self.levels[index];
                    let target = self.entry_price * level.multiple;
                    if candle.high < target {
                        continue;
                    }
                    self.triggered[index] = true;
                    let fraction = position.take_fraction(level.fraction);
                    out.partial_exits.push(PartialExit {
                        timestamp: candle.timestamp,
                        price: target,
                        fraction,
                        level: index,
                    });
                    if position.is_closed() {
                        out.exit = Some(ExitDecision::new(
                            candle.timestamp,
                            target,
                            ExitReason::LadderComplete,
                        ));
                        return out;
                    }
                }
                ExitCondition::StopLoss => {
                    let Some(sp) = self.stop_pct else { continue };
                    let stop_price = self.entry_price * (1.0 - sp);
                    if candle.low <= stop_price {
                        out.exit = Some(ExitDecision::new(
                            candle.timestamp,
                            stop_price,
                            ExitReason::StopLoss,
                        ));
                        return out;
                    }
                }
                // Not in this policy's check set.
                _ => {}
            }
        }

        out
    }
}
