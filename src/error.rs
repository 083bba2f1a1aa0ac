//! Errors raised while building rows, accumulators and relation sets.
//!
//! Evaluating a relation never fails. Everything here is either a structural
//! defect caught before proving starts, or a failing subrelation reported by
//! the debug check.

use thiserror::Error;

use crate::relations::registry::SubrelationFailure;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    #[error("row holds {got} values, layout defines {expected} columns")]
    RowWidthMismatch { expected: usize, got: usize },

    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    #[error("relation `{relation}` has {expected} subrelations, got {got} accumulators")]
    SubrelationCountMismatch {
        relation: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(
        "accumulator {index} of relation `{relation}` holds {got} evaluations, subrelation needs {required}"
    )]
    AccumulatorTooShort {
        relation: &'static str,
        index: usize,
        required: usize,
        got: usize,
    },

    #[error(
        "accumulator {index} of relation `{relation}` needs {required} evaluation points, rows carry {points}"
    )]
    EdgeTooShort {
        relation: &'static str,
        index: usize,
        required: usize,
        points: usize,
    },

    #[error("relation `{relation}` subrelation {index} has invalid partial length {length}")]
    InvalidPartialLength {
        relation: &'static str,
        index: usize,
        length: usize,
    },

    #[error("relation `{0}` is already registered")]
    DuplicateRelation(&'static str),

    #[error("{rows} rows but {factors} scaling factors")]
    ScalingFactorCountMismatch { rows: usize, factors: usize },

    #[error(
        "relation `{relation}` subrelation {index} ({label}) needs partial length {measured}, declares {declared}"
    )]
    PartialLengthTooSmall {
        relation: &'static str,
        index: usize,
        label: String,
        declared: usize,
        measured: usize,
    },

    #[error("{value} does not fit a range check of {bits} bits")]
    RangeCheckOutOfBounds { value: u128, bits: u32 },

    #[error("{0}")]
    SubrelationFailed(SubrelationFailure),
}
