//! Policy state machines — one per policy kind.
//!
//! Each machine consumes candles one at a time from the entry bar forward and
//! emits a [`BarStep`]: possibly some partial exits (ladder fills), possibly a
//! full exit. Machines walk their policy's precedence constant (see
//! [`crate::engine::precedence`]) so same-bar ties resolve by documented
//! order, not by code layout.
//!
//! [`PolicyMachine`] is a closed enum over the five kinds, dispatched by
//! exhaustive match — adding a policy kind without handling it everywhere is
//! a compile error.

pub mod combo;
pub mod fixed_stop;
pub mod ladder;
pub mod time_stop;
pub mod trailing_stop;

pub use combo::ComboMachine;
pub use fixed_stop::FixedStopMachine;
pub use ladder::LadderMachine;
pub use time_stop::TimeStopMachine;
pub use trailing_stop::TrailingStopMachine;

use crate::domain::{Candle, ExitReason, PartialExit, PolicyConfig, PositionState};
use crate::engine::entry::EntryPoint;

/// A full exit picked by a machine: when, at what price, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitDecision {
    /// Timestamp of the bar the exit fired on, epoch seconds.
    pub timestamp: i64,
    pub price: f64,
    pub reason: ExitReason,
    /// Set by combos: which sub-policy fired.
    pub detail: Option<String>,
}

impl ExitDecision {
    pub fn new(timestamp: i64, price: f64, reason: ExitReason) -> Self {
        Self {
            timestamp,
            price,
            reason,
            detail: None,
        }
    }
}

/// What one bar produced: zero or more partial fills, at most one full exit.
/// A ladder bar can fill a level AND stop out the remainder, in that order.
#[derive(Debug, Clone, Default)]
pub struct BarStep {
    pub partial_exits: Vec<PartialExit>,
    pub exit: Option<ExitDecision>,
}

impl BarStep {
    pub fn hold() -> Self {
        Self::default()
    }

    pub fn exited(exit: ExitDecision) -> Self {
        Self {
            partial_exits: Vec::new(),
            exit: Some(exit),
        }
    }
}

/// The closed set of runnable policy machines.
#[derive(Debug, Clone)]
pub enum PolicyMachine {
    FixedStop(FixedStopMachine),
    TimeStop(TimeStopMachine),
    TrailingStop(TrailingStopMachine),
    Ladder(LadderMachine),
    Combo(ComboMachine),
}

impl PolicyMachine {
    /// Build the machine for a validated config at a resolved entry.
    pub fn build(config: &PolicyConfig, entry: &EntryPoint) -> Self {
        match config {
            PolicyConfig::FixedStop {
                stop_pct,
                take_profit_pct,
            } => PolicyMachine::FixedStop(FixedStopMachine::new(
                entry.price,
                *stop_pct,
                *take_profit_pct,
            )),
            PolicyConfig::TimeStop {
                max_hold_ms,
                take_profit_pct,
            } => PolicyMachine::TimeStop(TimeStopMachine::new(
                entry.price,
                entry.timestamp * 1000,
                *max_hold_ms,
                *take_profit_pct,
            )),
            PolicyConfig::TrailingStop {
                activation_pct,
                trail_pct,
                hard_stop_pct,
            } => PolicyMachine::TrailingStop(TrailingStopMachine::new(
                entry.price,
                *activation_pct,
                *trail_pct,
                *hard_stop_pct,
            )),
            PolicyConfig::Ladder { levels, stop_pct } => {
                PolicyMachine::Ladder(LadderMachine::new(entry.price, levels.clone(), *stop_pct))
            }
            PolicyConfig::Combo { sub_policies } => PolicyMachine::Combo(ComboMachine::new(
                sub_policies
                    .iter()
                    .map(|sub| PolicyMachine::build(sub, entry))
                    .collect(),
            )),
        }
    }

    /// Machine-readable kind name, matching the config's serde tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PolicyMachine::FixedStop(_) => "fixed_stop",
            PolicyMachine::TimeStop(_) => "time_stop",
            PolicyMachine::TrailingStop(_) => "trailing_stop",
            PolicyMachine::Ladder(_) => "ladder",
            PolicyMachine::Combo(_) => "combo",
        }
    }

    /// Advance the machine by one candle.
    pub fn step(&mut self, candle: &Candle, position: &mut PositionState) -> BarStep {
        match self {
            PolicyMachine::FixedStop(m) => m.step(candle),
            PolicyMachine::TimeStop(m) => m.step(candle),
            PolicyMachine::TrailingStop(m) => m.step(candle),
            PolicyMachine::Ladder(m) => m.step(candle, position),
            PolicyMachine::Combo(m) => m.step(candle, position),
        }
    }

    /// The exit reason to report when data runs out with the position open.
    pub fn end_of_data_reason(&self) -> ExitReason {
        match self {
            PolicyMachine::Ladder(m) if m.all_levels_triggered() => ExitReason::LadderComplete,
            _ => ExitReason::EndOfData,
        }
    }
}
