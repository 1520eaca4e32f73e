//! Policy configuration — the closed set of exit-policy variants.
//!
//! `PolicyConfig` is a serde tagged union; its JSON form is the wire schema
//! for policy configuration. Validation is hard-reject: an invalid config is
//! refused before any candle is touched, never silently clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One rung of a ladder: exit `fraction` of the original position when price
/// reaches `entry * multiple`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderLevel {
    /// Price target as a multiple of entry (2.0 = 2x entry).
    pub multiple: f64,
    /// Fraction of the ORIGINAL position to exit at this level.
    pub fraction: f64,
}

/// Exit-policy configuration. Exactly one variant per policy kind; the engine
/// matches exhaustively, so adding a variant without handling it is a compile
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// Hard stop below entry, optional take-profit above. Stop-loss is
    /// checked before take-profit on every bar.
    FixedStop {
        stop_pct: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        take_profit_pct: Option<f64>,
    },
    /// Exit at close once the holding period expires, optional take-profit.
    /// Take-profit is checked before the time check — the reverse of
    /// FixedStop's ordering, and intentional.
    TimeStop {
        max_hold_ms: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        take_profit_pct: Option<f64>,
    },
    /// Arms at `entry * (1 + activation_pct)`, then trails the high watermark
    /// by `trail_pct`. Optional hard stop active from entry, checked first.
    TrailingStop {
        activation_pct: f64,
        trail_pct: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hard_stop_pct: Option<f64>,
    },
    /// Partial-exit ladder: ascending single-fire levels, at most one level
    /// per bar, optional stop-loss on the remaining fraction.
    Ladder {
        levels: Vec<LadderLevel>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stop_pct: Option<f64>,
    },
    /// Coordinator over sub-policies evaluated in list order; the first
    /// sub-policy to produce a full exit on a bar wins. Order is
    /// semantically load-bearing.
    Combo { sub_policies: Vec<PolicyConfig> },
}

/// Rejection reasons for invalid policy configuration.
///
/// Fatal to the single (alert, policy) invocation only — never a process-level
/// failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyValidationError {
    #[error("{policy}.{param} must be finite and > 0, got {value}")]
    NonPositiveParam {
        policy: &'static str,
        param: &'static str,
        value: f64,
    },
    #[error("{policy}.{param} must be < 1.0, got {value}")]
    FractionTooLarge {
        policy: &'static str,
        param: &'static str,
        value: f64,
    },
    #[error("time_stop.max_hold_ms must be > 0, got {0}")]
    NonPositiveHold(i64),
    #[error("ladder must have at least one level")]
    EmptyLadder,
    #[error("ladder level {index}: multiple must be finite and > 1.0, got {multiple}")]
    BadLadderMultiple { index: usize, multiple: f64 },
    #[error("ladder level {index}: fraction must be finite and > 0, got {fraction}")]
    BadLadderFraction { index: usize, fraction: f64 },
    #[error("ladder levels must be strictly ascending by multiple (violated at index {index})")]
    UnsortedLadder { index: usize },
    #[error("ladder fractions sum to {total}, must be <= 1.0")]
    OverweightLadder { total: f64 },
    #[error("combo must have at least one sub-policy")]
    EmptyCombo,
}

fn require_positive_pct(
    policy: &'static str,
    param: &'static str,
    value: f64,
) -> Result<(), PolicyValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PolicyValidationError::NonPositiveParam {
            policy,
            param,
            value,
        });
    }
    Ok(())
}

/// A percentage that is subtracted from 1.0 to form a price below entry must
/// stay below 1.0, or the resulting level is zero or negative.
fn require_sub_unit_pct(
    policy: &'static str,
    param: &'static str,
    value: f64,
) -> Result<(), PolicyValidationError> {
    require_positive_pct(policy, param, value)?;
    if value >= 1.0 {
        return Err(PolicyValidationError::FractionTooLarge {
            policy,
            param,
            value,
        });
    }
    Ok(())
}

impl PolicyConfig {
    /// Machine-readable kind name, matching the serde tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PolicyConfig::FixedStop { .. } => "fixed_stop",
            PolicyConfig::TimeStop { .. } => "time_stop",
            PolicyConfig::TrailingStop { .. } => "trailing_stop",
            PolicyConfig::Ladder { .. } => "ladder",
            PolicyConfig::Combo { .. } => "combo",
        }
    }

    /// Hard-reject validation. Runs before simulation; recursive for combos.
    pub fn validate(&self) -> Result<(), PolicyValidationError> {
        match self {
            PolicyConfig::FixedStop {
                stop_pct,
                take_profit_pct,
            } => {
                require_sub_unit_pct("fixed_stop", "stop_pct", *stop_pct)?;
                if let Some(tp) = take_profit_pct {
                    require_positive_pct("fixed_stop", "take_profit_pct", *tp)?;
                }
                Ok(())
            }
            PolicyConfig::TimeStop {
                max_hold_ms,
                take_profit_pct,
            } => {
                if *max_hold_ms <= 0 {
                    return Err(PolicyValidationError::NonPositiveHold(*max_hold_ms));
                }
                if let Some(tp) = take_profit_pct {
                    require_positive_pct("time_stop", "take_profit_pct", *tp)?;
                }
                Ok(())
            }
            PolicyConfig::TrailingStop {
                activation_pct,
                trail_pct,
                hard_stop_pct,
            } => {
                require_positive_pct("trailing_stop", "activation_pct", *activation_pct)?;
                require_sub_unit_pct("trailing_stop", "trail_pct", *trail_pct)?;
                if let Some(hs) = hard_stop_pct {
                    require_sub_unit_pct("trailing_stop", "hard_stop_pct", *hs)?;
                }
                Ok(())
            }
            PolicyConfig::Ladder { levels, stop_pct } => {
                if levels.is_empty() {
                    return Err(PolicyValidationError::EmptyLadder);
                }
                let mut total = 0.0;
                for (index, level) in levels.iter().enumerate() {
                    if !level.multiple.is_finite() || level.multiple <= 1.0 {
                        return Err(PolicyValidationError::BadLadderMultiple {
                            index,
                            multiple: level.multiple,
                        });
                    }
                    if !level.fraction.is_finite() || level.fraction <= 0.0 {
                        return Err(PolicyValidationError::BadLadderFraction {
                            index,
                            fraction: level.fraction,
                        });
                    }
                    if index > 0 && level.multiple <= levels[index - 1].multiple {
                        return Err(PolicyValidationError::UnsortedLadder { index });
                    }
                    total += level.fraction;
                }
                if total > 1.0 + 1e-9 {
                    return Err(PolicyValidationError::OverweightLadder { total });
                }
                if let Some(sp) = stop_pct {
                    require_sub_unit_pct("ladder", "stop_pct", *sp)?;
                }
                Ok(())
            }
            PolicyConfig::Combo { sub_policies } => {
                if sub_policies.is_empty() {
                    return Err(PolicyValidationError::EmptyCombo);
                }
                for sub in sub_policies {
                    sub.validate()?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_ladder() -> PolicyConfig {
        PolicyConfig::Ladder {
            levels: vec![
                LadderLevel {
                    multiple: 2.0,
                    fraction: 0.5,
                },
                LadderLevel {
                    multiple: 3.0,
                    fraction: 0.3,
                },
            ],
            stop_pct: Some(0.2),
        }
    }

    #[test]
    fn valid_fixed_stop_passes() {
        let policy = PolicyConfig::FixedStop {
            stop_pct: 0.2,
            take_profit_pct: Some(1.0),
        };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn fixed_stop_rejects_full_stop() {
        let policy = PolicyConfig::FixedStop {
            stop_pct: 1.0,
            take_profit_pct: None,
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyValidationError::FractionTooLarge { .. })
        ));
    }

    #[test]
    fn fixed_stop_rejects_nan() {
        let policy = PolicyConfig::FixedStop {
            stop_pct: f64::NAN,
            take_profit_pct: None,
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyValidationError::NonPositiveParam { .. })
        ));
    }

    #[test]
    fn time_stop_rejects_zero_hold() {
        let policy = PolicyConfig::TimeStop {
            max_hold_ms: 0,
            take_profit_pct: None,
        };
        assert_eq!(
            policy.validate(),
            Err(PolicyValidationError::NonPositiveHold(0))
        );
    }

    #[test]
    fn valid_ladder_passes() {
        assert!(two_level_ladder().validate().is_ok());
    }

    #[test]
    fn ladder_rejects_overweight_fractions() {
        let policy = PolicyConfig::Ladder {
            levels: vec![
                LadderLevel {
                    multiple: 2.0,
                    fraction: 0.7,
                },
                LadderLevel {
                    multiple: 3.0,
                    fraction: 0.5,
                },
            ],
            stop_pct: None,
        };
        assert!(matches!(
            policy.validate(),
            Err(PolicyValidationError::OverweightLadder { .. })
        ));
    }

    #[test]
    fn ladder_rejects_unsorted_levels() {
        let policy = PolicyConfig::Ladder {
            levels: vec![
                LadderLevel {
                    multiple: 3.0,
                    fraction: 0.3,
                },
                LadderLevel {
                    multiple: 2.0,
                    fraction: 0.3,
                },
            ],
            stop_pct: None,
        };
        assert_eq!(
            policy.validate(),
            Err(PolicyValidationError::UnsortedLadder { index: 1 })
        );
    }

    #[test]
    fn combo_rejects_empty() {
        let policy = PolicyConfig::Combo {
            sub_policies: vec![],
        };
        assert_eq!(policy.validate(), Err(PolicyValidationError::EmptyCombo));
    }

    #[test]
    fn combo_validates_recursively() {
        let policy = PolicyConfig::Combo {
            sub_policies: vec![
                PolicyConfig::FixedStop {
                    stop_pct: 0.2,
                    take_profit_pct: None,
                },
                PolicyConfig::TimeStop {
                    max_hold_ms: -5,
                    take_profit_pct: None,
                },
            ],
        };
        assert_eq!(
            policy.validate(),
            Err(PolicyValidationError::NonPositiveHold(-5))
        );
    }

    #[test]
    fn tagged_json_roundtrip() {
        let policy = two_level_ladder();
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("\"kind\":\"ladder\""));
        let deser: PolicyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, deser);
    }

    #[test]
    fn tagged_json_parses_external_config() {
        let json = r#"{
            "kind": "trailing_stop",
            "activation_pct": 0.2,
            "trail_pct": 0.1
        }"#;
        let policy: PolicyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            policy,
            PolicyConfig::TrailingStop {
                activation_pct: 0.2,
                trail_pct: 0.1,
                hard_stop_pct: None,
            }
        );
    }
}
