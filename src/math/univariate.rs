//! Univariates over a sum-check edge.
//!
//! A [`Univariate`] is a polynomial in one variable stored by its values at
//! the points `0, 1, ..., N - 1`. Rows of univariates let a relation be
//! evaluated on an entire edge at once. A [`UnivariateAccumulator`] stores a
//! subrelation's running sum at `0..partial_length`, which is enough to pin
//! down a polynomial of degree `partial_length - 1`.

use ark_ff::PrimeField;
use std::ops::{Add, Mul, Sub};

use super::polynomial::Polynomial;
use crate::relations::{AccumulatorSlot, RowValue, SubrelationAccumulator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Univariate<F, const N: usize> {
    evaluations: [F; N],
}

impl<F: PrimeField, const N: usize> Univariate<F, N> {
    pub fn new(evaluations: [F; N]) -> Self {
        Self { evaluations }
    }

    pub fn constant(value: F) -> Self {
        Self {
            evaluations: [value; N],
        }
    }

    /// The degree-one univariate `at_zero + slope * X`.
    pub fn linear(at_zero: F, slope: F) -> Self {
        Self {
            evaluations: std::array::from_fn(|i| at_zero + slope * F::from(i as u64)),
        }
    }

    pub fn evaluations(&self) -> &[F; N] {
        &self.evaluations
    }

    /// Interpolates the univariate through its `N` stored points.
    pub fn to_polynomial(&self) -> Option<Polynomial<F>> {
        let xs: Vec<F> = (0..N as u64).map(F::from).collect();
        Polynomial::interpolate(&xs, &self.evaluations)
    }
}

impl<F: PrimeField, const N: usize> Default for Univariate<F, N> {
    fn default() -> Self {
        Self::constant(F::zero())
    }
}

impl<F: PrimeField, const N: usize> From<F> for Univariate<F, N> {
    fn from(value: F) -> Self {
        Self::constant(value)
    }
}

impl<F: PrimeField, const N: usize> Add for Univariate<F, N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            evaluations: std::array::from_fn(|i| self.evaluations[i] + rhs.evaluations[i]),
        }
    }
}

impl<F: PrimeField, const N: usize> Sub for Univariate<F, N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            evaluations: std::array::from_fn(|i| self.evaluations[i] - rhs.evaluations[i]),
        }
    }
}

impl<F: PrimeField, const N: usize> Mul for Univariate<F, N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            evaluations: std::array::from_fn(|i| self.evaluations[i] * rhs.evaluations[i]),
        }
    }
}

impl<F: PrimeField, const N: usize> Mul<F> for Univariate<F, N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: F) -> Self {
        Self {
            evaluations: self.evaluations.map(|e| e * rhs),
        }
    }
}

impl<F: PrimeField, const N: usize> RowValue<F> for Univariate<F, N> {
    const POINTS: Option<usize> = Some(N);
}

/// Running sum of one subrelation, stored at the points `0..partial_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnivariateAccumulator<F> {
    evaluations: Vec<F>,
}

impl<F: PrimeField> UnivariateAccumulator<F> {
    pub fn new(evaluations: Vec<F>) -> Self {
        Self { evaluations }
    }

    pub fn evaluations(&self) -> &[F] {
        &self.evaluations
    }

    pub fn to_polynomial(&self) -> Option<Polynomial<F>> {
        let xs: Vec<F> = (0..self.evaluations.len() as u64).map(F::from).collect();
        Polynomial::interpolate(&xs, &self.evaluations)
    }
}

impl<F: PrimeField> AccumulatorSlot for UnivariateAccumulator<F> {
    fn empty(partial_length: usize) -> Self {
        Self {
            evaluations: vec![F::zero(); partial_length],
        }
    }

    fn partial_length(&self) -> Option<usize> {
        Some(self.evaluations.len())
    }

    fn combine(&mut self, other: Self) {
        if other.evaluations.len() > self.evaluations.len() {
            self.evaluations.resize(other.evaluations.len(), F::zero());
        }
        for (acc, value) in self.evaluations.iter_mut().zip(other.evaluations) {
            *acc += value;
        }
    }

    fn vanishes(&self) -> bool {
        self.evaluations.iter().all(|e| e.is_zero())
    }
}

/// A base field value lifts to the constant univariate.
impl<F: PrimeField> SubrelationAccumulator<F> for UnivariateAccumulator<F> {
    fn add_view(&mut self, value: F) {
        for acc in self.evaluations.iter_mut() {
            *acc += value;
        }
    }
}

/// An edge univariate lifts to its first `partial_length` evaluations.
///
/// The edge must carry at least `partial_length` points: a subrelation's
/// value is a pointwise product of row univariates, so its values past `N`
/// are not determined by the `N` computed ones.
/// [`Accumulators::check_points`](crate::relations::Accumulators::check_points)
/// reports the mismatch as an error.
impl<F: PrimeField, const N: usize> SubrelationAccumulator<Univariate<F, N>>
    for UnivariateAccumulator<F>
{
    fn add_view(&mut self, value: Univariate<F, N>) {
        debug_assert!(
            self.evaluations.len() <= N,
            "{N}-point edge added to a {}-point accumulator",
            self.evaluations.len()
        );
        for (acc, e) in self.evaluations.iter_mut().zip(value.evaluations) {
            *acc += e;
        }
    }
}
