//! TradeResult — the immutable outcome of one (alert, policy) simulation.

use serde::{Deserialize, Serialize};

/// Why a simulation ended. Serialized in snake_case; these strings are the
/// machine-readable reasons consumed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Entry could not be resolved (empty data, alert after all data, or an
    /// unusable entry price). The result is a defined sentinel, not an error.
    NoEntry,
    StopLoss,
    TakeProfit,
    TimeStop,
    HardStop,
    TrailingStop,
    /// Ladder finished: every level fired (or only a rounding residual was
    /// left when data ended).
    LadderComplete,
    /// Data ran out with the position still open; force-closed at last close.
    EndOfData,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::NoEntry => "no_entry",
            ExitReason::StopLoss => "stop_loss",
            ExitReason::TakeProfit => "take_profit",
            ExitReason::TimeStop => "time_stop",
            ExitReason::HardStop => "hard_stop",
            ExitReason::TrailingStop => "trailing_stop",
            ExitReason::LadderComplete => "ladder_complete",
            ExitReason::EndOfData => "end_of_data",
        }
    }

    /// A stop-out realizes a loss-limiting stop. Trailing-stop exits lock in
    /// gains above the activation threshold and do not count.
    pub fn is_stop_out(&self) -> bool {
        matches!(self, ExitReason::StopLoss | ExitReason::HardStop)
    }
}

/// One ladder fill: `fraction` of the ORIGINAL position exited at the level's
/// target price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialExit {
    /// Timestamp of the bar that fired the level, epoch seconds.
    pub timestamp: i64,
    pub price: f64,
    pub fraction: f64,
    /// Index of the ladder level that fired.
    pub level: usize,
}

/// Cost model applied once at final exit: entry + exit taker fee plus one
/// slippage charge. Never compounded per partial fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeModel {
    pub taker_fee_bps: f64,
    pub slippage_bps: f64,
}

impl FeeModel {
    pub fn new(taker_fee_bps: f64, slippage_bps: f64) -> Self {
        Self {
            taker_fee_bps,
            slippage_bps,
        }
    }

    /// Zero-cost model, the default for tests and raw-path comparisons.
    pub fn frictionless() -> Self {
        Self {
            taker_fee_bps: 0.0,
            slippage_bps: 0.0,
        }
    }

    /// Total round-trip cost in bps: taker fee both ways plus one slippage charge.
    pub fn round_trip_bps(&self) -> f64 {
        self.taker_fee_bps * 2.0 + self.slippage_bps
    }
}

impl Default for FeeModel {
    fn default() -> Self {
        Self::frictionless()
    }
}

/// The terminal state of a simulation. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    /// Entry bar timestamp, epoch seconds (0 for no-entry results).
    pub entry_timestamp: i64,
    pub entry_price: f64,
    /// Exit bar timestamp, epoch seconds.
    pub exit_timestamp: i64,
    pub exit_price: f64,
    pub exit_reason: ExitReason,
    /// Qualifier for combo exits: which sub-policy fired (e.g. "combo[1]:time_stop").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_detail: Option<String>,
    /// Fee- and slippage-adjusted realized return, bps of entry.
    pub realized_return_bps: f64,
    pub stop_out: bool,
    /// Worst drawdown below entry observed during the trade, bps (<= 0).
    pub max_adverse_excursion_bps: f64,
    pub time_exposed_ms: i64,
    /// Fraction of the peak unrealized gain realized at exit, capped at 1.0.
    /// `None` when no gain ever occurred (capture is meaningless).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_capture: Option<f64>,
    /// Ladder fills in firing order; empty for all other policies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partial_exits: Vec<PartialExit>,
}

impl TradeResult {
    /// The fail-closed sentinel for unresolvable entries.
    pub fn no_entry() -> Self {
        Self {
            entry_timestamp: 0,
            entry_price: 0.0,
            exit_timestamp: 0,
            exit_price: 0.0,
            exit_reason: ExitReason::NoEntry,
            exit_detail: None,
            realized_return_bps: 0.0,
            stop_out: false,
            max_adverse_excursion_bps: 0.0,
            time_exposed_ms: 0,
            tail_capture: None,
            partial_exits: Vec::new(),
        }
    }

    pub fn is_no_entry(&self) -> bool {
        self.exit_reason == ExitReason::NoEntry
    }
}
