//! The simulation fold — one pass, entry to exit.
//!
//! Per (alert, policy) invocation:
//! 1. Validate the policy config (hard reject before touching data)
//! 2. Resolve the entry bar (fail closed to a no-entry result)
//! 3. Fold candles from the entry bar forward: excursion tracking first,
//!    then the policy machine, which may emit partial fills and/or an exit
//! 4. If data ends first, force-close the remainder at the last close
//!
//! The fold is strictly sequential, owns all of its state, and reads only
//! the current bar plus machine state — a decision at bar t can never see a
//! bar that closes after t.

use crate::domain::{
    Alert, Candle, FeeModel, PolicyConfig, PolicyValidationError, PositionState, TradeResult,
};
use crate::engine::entry::resolve_entry;
use crate::engine::metrics::ExcursionTracker;
use crate::engine::policies::{ExitDecision, PolicyMachine};
use crate::engine::result::ResultBuilder;

/// Run one simulation. Pure compute: no I/O, no shared state, O(n) in bars.
///
/// Returns `Err` only for invalid configuration; every data condition
/// (no entry, end of data) yields a well-formed `TradeResult`.
pub fn run_simulation(
    alert: &Alert,
    candles: &[Candle],
    policy: &PolicyConfig,
    fees: &FeeModel,
) -> Result<TradeResult, PolicyValidationError> {
    policy.validate()?;

    let Some(entry) = resolve_entry(alert.alert_timestamp_ms, candles) else {
        return Ok(TradeResult::no_entry());
    };

    let mut machine = PolicyMachine::build(policy, &entry);
    let mut position = PositionState::new();
    let mut tracker = ExcursionTracker::new(entry.price);
    let mut builder = ResultBuilder::new(entry, *fees);

    let mut last_ts: Option<i64> = None;
    for candle in &candles[entry.index..] {
        debug_assert!(candle.is_sane(), "malformed candle at ts {}", candle.timestamp);

        // Duplicate timestamps are an upstream data defect; the first
        // encountered bar wins and the rest are ignored. Known limitation —
        // dedupe upstream (see source::integrity), this is not a repair.
        if last_ts == Some(candle.timestamp) {
            continue;
        }
        last_ts = Some(candle.timestamp);

        tracker.update(candle);
        let step = machine.step(candle, &mut position);
        builder.record_partials(step.partial_exits);

        if let Some(exit) = step.exit {
            return Ok(builder.finish(exit, position.remaining_fraction, &tracker));
        }
    }

    // Data exhausted with the position open: force-close at the last close.
    let last = &candles[candles.len() - 1];
    let exit = ExitDecision::new(last.timestamp, last.close, machine.end_of_data_reason());
    Ok(builder.finish(exit, position.remaining_fraction, &tracker))
}
