//! ExitLab Core — deterministic backtesting of exit policies against
//! alert-triggered price paths.
//!
//! Given an entry signal at time T, a subsequent candle sequence, and an
//! exit-policy configuration, the engine answers: when and at what price
//! would that policy have exited, and with what realized outcome?
//!
//! - Domain types (candles, alerts, policy configs, trade results)
//! - Entry resolution (fail-closed)
//! - Per-policy exit state machines with precedence captured as data
//! - Excursion metrics (peak capture, MAE, tail capture, fee-adjusted return)
//! - Causal candle access (no decision at time t may see data closing after t)
//! - Run fingerprinting for the byte-identity determinism contract

pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod source;
