//! Row builders shared by the integration tests.

#![allow(dead_code)]

use ark_bls12_381::Fr;
use avm_relations::relations::range_check;
use avm_relations::{Column, ExecutionTrace, FullRow};

/// An addition row `a + b = c` with the selector set.
pub fn alu_add_row(a: u64, b: u64, c: u64) -> FullRow<Fr> {
    let mut row = FullRow::default();
    row[Column::AluSelOpAdd] = Fr::from(1u64);
    row[Column::AluIa] = Fr::from(a);
    row[Column::AluIb] = Fr::from(b);
    row[Column::AluIc] = Fr::from(c);
    row
}

/// An active range-check row proving `value < 2^bits`.
pub fn range_check_row(value: u128, bits: u32) -> FullRow<Fr> {
    range_check::range_check_row(value, bits).expect("value fits in bits")
}

/// Row 0 adds `3 + 5 = 8`; row 1 range-checks `12345` in 14 bits.
pub fn two_row_trace() -> ExecutionTrace<Fr> {
    ExecutionTrace::from_rows(vec![alu_add_row(3, 5, 8), range_check_row(12_345, 14)])
}
