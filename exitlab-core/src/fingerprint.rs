//! Run fingerprinting — deterministic identity for simulations and results.
//!
//! The determinism contract says: identical (candles, alert, policy) must
//! produce byte-identical results, across runs and across machines. Content
//! hashes make that checkable — equal input fingerprints must imply equal
//! result hashes, and the test suites assert exactly that.
//!
//! Candle hashing feeds raw IEEE-754 bit patterns into blake3, so two series
//! hash equal iff they are bit-identical; policy and result hashing use
//! canonical JSON (struct field order is fixed by the type definitions).

use crate::domain::{Alert, Candle, PolicyConfig, TradeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content hash of a candle series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesHash(pub String);

impl fmt::Display for SeriesHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content hash of a policy configuration (kind + all parameter values).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyHash(pub String);

impl fmt::Display for PolicyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content hash of a finished trade result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultHash(pub String);

impl fmt::Display for ResultHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash a candle series by its raw bit content.
pub fn hash_candles(candles: &[Candle]) -> SeriesHash {
    let mut hasher = blake3::Hasher::new();
    for candle in candles {
        hasher.update(&candle.timestamp.to_le_bytes());
        hasher.update(&candle.open.to_bits().to_le_bytes());
        hasher.update(&candle.high.to_bits().to_le_bytes());
        hasher.update(&candle.low.to_bits().to_le_bytes());
        hasher.update(&candle.close.to_bits().to_le_bytes());
        hasher.update(&candle.volume.to_bits().to_le_bytes());
        hasher.update(&candle.interval_seconds.to_le_bytes());
    }
    SeriesHash(hasher.finalize().to_hex().to_string())
}

/// Hash a policy config via its canonical JSON form.
pub fn hash_policy(policy: &PolicyConfig) -> PolicyHash {
    let json = serde_json::to_string(policy).expect("PolicyConfig must serialize");
    PolicyHash(blake3::hash(json.as_bytes()).to_hex().to_string())
}

/// Hash a trade result via its canonical JSON form.
pub fn hash_result(result: &TradeResult) -> ResultHash {
    let json = serde_json::to_string(result).expect("TradeResult must serialize");
    ResultHash(blake3::hash(json.as_bytes()).to_hex().to_string())
}

/// Complete identity of one simulation invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationFingerprint {
    pub alert_id: String,
    pub series_hash: SeriesHash,
    pub policy_hash: PolicyHash,
}

impl SimulationFingerprint {
    pub fn new(alert: &Alert, candles: &[Candle], policy: &PolicyConfig) -> Self {
        Self {
            alert_id: alert.id.clone(),
            series_hash: hash_candles(candles),
            policy_hash: hash_policy(policy),
        }
    }
}
