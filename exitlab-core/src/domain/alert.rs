//! Alert — a timestamped entry signal for one instrument.

use serde::{Deserialize, Serialize};

/// A discrete entry signal. Owned by the caller of the engine, referenced but
/// never mutated during a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Opaque caller-supplied identifier.
    pub id: String,
    /// Instrument reference (symbol, pair, contract — engine treats it as opaque).
    pub instrument: String,
    /// Signal time, epoch milliseconds.
    pub alert_timestamp_ms: i64,
}

impl Alert {
    pub fn new(id: impl Into<String>, instrument: impl Into<String>, alert_timestamp_ms: i64) -> Self {
        Self {
            id: id.into(),
            instrument: instrument.into(),
            alert_timestamp_ms,
        }
    }
}
