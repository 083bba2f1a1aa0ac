//! Row-local constraint evaluation for the AVM proving backend.
//!
//! Every trace row is checked against a set of relations: named lists of
//! polynomial identities over the row's columns. A relation never fails; it
//! adds each identity's value, scaled by a per-row factor, into accumulators
//! owned by the caller. Valid rows contribute zero everywhere.

pub mod config;
pub mod error;
pub mod math;
pub mod relations;
pub mod vm;

pub use config::EvaluationConfig;
pub use error::RelationError;
pub use relations::{
    AccumulatorSlot, Accumulators, Relation, RelationParameters, RowValue,
    SubrelationAccumulator,
};
pub use vm::{Column, ExecutionTrace, FullRow, NUM_COLUMNS};
