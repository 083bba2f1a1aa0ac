//! Trace layout for the virtual machine.
//!
//! Defines the column enumeration, the row type relations read from, and the
//! execution trace that witness generation fills.

pub mod columns;
pub mod row;
pub mod trace;

pub use columns::{Column, NUM_COLUMNS};
pub use row::FullRow;
pub use trace::ExecutionTrace;
