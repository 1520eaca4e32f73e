//! Policy execution engine — entry resolution, per-policy state machines,
//! precedence, metrics, and result assembly.
//!
//! One invocation per (alert, policy) pair, independent across pairs:
//! a single-threaded fold over an ordered candle slice with no suspension
//! points and no shared mutable state. Batch drivers parallelize across
//! invocations; nothing here needs to know about that.

pub mod entry;
pub mod metrics;
pub mod policies;
pub mod precedence;
pub mod result;
pub mod simulate;

pub use entry::{resolve_entry, EntryPoint};
pub use metrics::{net_return_bps, weighted_gross_return_bps, ExcursionTracker, BPS};
pub use policies::{BarStep, ExitDecision, PolicyMachine};
pub use precedence::{
    ExitCondition, FIXED_STOP_CHECKS, LADDER_CHECKS, TIME_STOP_CHECKS, TRAILING_STOP_CHECKS,
};
pub use result::ResultBuilder;
pub use simulate::run_simulation;
