//! Data-quality checks for candle series.
//!
//! The engine does not repair defective data — given duplicate timestamps it
//! deterministically acts on the first-encountered bar, which is a documented
//! limitation, not a guaranteed-correct fallback. This checker lets upstreams
//! detect and dedupe before simulation.

use crate::domain::Candle;
use thiserror::Error;

/// A single data-quality finding. Advisory; the checker never mutates input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityIssue {
    #[error("candle {index}: duplicate timestamp {timestamp}")]
    DuplicateTimestamp { index: usize, timestamp: i64 },
    #[error("candle {index}: timestamp not ascending")]
    OutOfOrder { index: usize },
    #[error("candle {index}: non-finite or non-positive price field")]
    BadPrice { index: usize },
    #[error("candle {index}: negative volume {volume}")]
    NegativeVolume { index: usize, volume: f64 },
    #[error("candle {index}: high {high} below low {low}")]
    InvertedRange { index: usize, high: f64, low: f64 },
}

/// Scan a candle series and report every defect found.
pub fn check_series(candles: &[Candle]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    for (index, candle) in candles.iter().enumerate() {
        if index > 0 {
            let prev = &candles[index - 1];
            if candle.timestamp == prev.timestamp {
                issues.push(IntegrityIssue::DuplicateTimestamp {
                    index,
                    timestamp: candle.timestamp,
                });
            } else if candle.timestamp < prev.timestamp {
                issues.push(IntegrityIssue::OutOfOrder { index });
            }
        }

        if !candle.has_finite_prices() {
            issues.push(IntegrityIssue::BadPrice { index });
        } else if candle.high < candle.low {
            issues.push(IntegrityIssue::InvertedRange {
                index,
                high: candle.high,
                low: candle.low,
            });
        }

        if candle.volume < 0.0 {
            issues.push(IntegrityIssue::NegativeVolume {
                index,
                volume: candle.volume,
            });
        }
    }

    issues
}
