//! Exit-condition precedence, captured as data.
//!
//! When multiple exit conditions fire on the same bar, exactly one must win,
//! and the winner must not depend on source-code read-order. Each policy's
//! check order is a `const` slice; the machines walk their slice and take the
//! first condition that triggers. Tests enumerate these orderings.

use serde::{Deserialize, Serialize};

/// The individual conditions a policy may check on a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitCondition {
    StopLoss,
    TakeProfit,
    TimeLimit,
    HardStop,
    TrailingStop,
    LadderLevels,
}

/// Fixed Stop: the stop is senior to the target on every bar.
pub const FIXED_STOP_CHECKS: &[ExitCondition] =
    &[ExitCondition::StopLoss, ExitCondition::TakeProfit];

/// Time Stop: the target is senior to the clock — the reverse of
/// [`FIXED_STOP_CHECKS`], and intentional.
pub const TIME_STOP_CHECKS: &[ExitCondition] =
    &[ExitCondition::TakeProfit, ExitCondition::TimeLimit];

/// Trailing Stop: the hard stop fires from any state, before activation or
/// trailing logic runs.
pub const TRAILING_STOP_CHECKS: &[ExitCondition] =
    &[ExitCondition::HardStop, ExitCondition::TrailingStop];

/// Ladder: level fills happen before the stop is consulted on the remainder.
pub const LADDER_CHECKS: &[ExitCondition] =
    &[ExitCondition::LadderLevels, ExitCondition::StopLoss];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_stop_checks_stop_before_target() {
        assert_eq!(
            FIXED_STOP_CHECKS,
            &[ExitCondition::StopLoss, ExitCondition::TakeProfit]
        );
    }

    #[test]
    fn time_stop_checks_target_before_clock() {
        assert_eq!(
            TIME_STOP_CHECKS,
            &[ExitCondition::TakeProfit, ExitCondition::TimeLimit]
        );
    }

    #[test]
    fn fixed_and_time_stop_orderings_are_reversed() {
        // Both check a stop-like and a target condition; their relative order
        // differs and downstream results are calibrated against that.
        assert_eq!(FIXED_STOP_CHECKS[0], ExitCondition::StopLoss);
        assert_eq!(TIME_STOP_CHECKS[0], ExitCondition::TakeProfit);
    }

    #[test]
    fn trailing_checks_hard_stop_first() {
        assert_eq!(TRAILING_STOP_CHECKS[0], ExitCondition::HardStop);
    }

    #[test]
    fn ladder_checks_levels_before_stop() {
        assert_eq!(
            LADDER_CHECKS,
            &[ExitCondition::LadderLevels, ExitCondition::StopLoss]
        );
    }
}
