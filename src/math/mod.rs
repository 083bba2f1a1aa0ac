//! Polynomial helpers for the degree-extension side of relation evaluation.
//!
//! [`polynomial`] holds dense coefficient-form polynomials; [`univariate`]
//! holds the evaluation-form values and accumulators a sum-check prover
//! feeds through relations.

pub mod polynomial;
pub mod univariate;

pub use polynomial::Polynomial;
pub use univariate::{Univariate, UnivariateAccumulator};
