//! Combo — a coordinator over sub-policies, not a new state machine.
//!
//! Sub-policies run independently against the same candle stream, each with
//! its own trigger state. On each bar they are evaluated in list order; the
//! first one whose own precedence rules produce a full exit wins for the
//! whole combo, and later sub-policies are not consulted on that bar.
//! List order is caller-supplied and semantically load-bearing: swapping it
//! can change the outcome when two sub-policies would fire on the same bar.

use crate::domain::{Candle, PositionState};

use super::{BarStep, PolicyMachine};

#[derive(Debug, Clone)]
pub struct ComboMachine {
    subs: Vec<PolicyMachine>,
}

impl ComboMachine {
    pub fn new(subs: Vec<PolicyMachine>) -> Self {
        Self { subs }
    }

    pub fn step(&mut self, candle: &Candle, position: &mut PositionState) -> BarStep {
        let mut out = BarStep::hold();

        for (index, sub) in self.subs.iter_mut().enumerate() {
            let kind = sub.kind_name();
            let step = sub.step(candle, position);
            out.partial_exits.extend(step.partial_exits);

            if let Some(mut exit) = step.exit {
                exit.detail = Some(match exit.detail.take() {
                    Some(inner) => format!("combo[{index}].{inner}"),
                    None => format!("combo[{index}]:{kind}"),
                });
                out.exit = Some(exit);
                return out;
            }
        }

        out
    }
}
