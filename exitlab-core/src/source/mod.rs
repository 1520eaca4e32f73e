//! Candle-source boundary: causal access and data-quality checks.
//!
//! Ingestion, storage, and wire formats live in external collaborators; the
//! engine consumes an already-resolved, in-memory candle slice. What belongs
//! here is the part of the boundary the engine must be able to defend:
//! the no-look-ahead contract and defect detection.

pub mod causal;
pub mod integrity;

pub use causal::{CausalSlice, CausalityError};
pub use integrity::{check_series, IntegrityIssue};
