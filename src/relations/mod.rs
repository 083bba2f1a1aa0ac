//! Relations and the protocol for accumulating them.
//!
//! A relation is a named list of subrelations, each a polynomial identity
//! over one row that must vanish on valid rows. The relation does not decide
//! how its values are folded into a proof: [`Relation::accumulate`] scales
//! each subrelation's value by the caller's factor, lifts it into the
//! caller's accumulator type and adds it there.
//!
//! Degree bounds are expressed as *partial lengths*: a subrelation of degree
//! `d` in the row's columns needs `d + 1` evaluation points, so its partial
//! length must be at least `d + 1`.

pub mod alu;
pub mod degree;
pub mod engine;
pub mod macros;
pub mod range_check;
pub mod registry;

use ark_ff::PrimeField;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Sub};

use crate::error::RelationError;
use crate::vm::FullRow;

pub use alu::{Alu, GatedAlu};
pub use range_check::RangeCheck;
pub use registry::{RelationRegistry, SubrelationFailure};

/// Values a relation can be evaluated over: field elements, or univariates
/// over a sum-check edge.
pub trait RowValue<F: PrimeField>:
    Copy
    + Send
    + Sync
    + fmt::Debug
    + From<F>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Mul<F, Output = Self>
{
    /// Number of evaluation points the value carries, or `None` for a base
    /// field value, which is the same at every point.
    const POINTS: Option<usize> = None;
}

impl<F: PrimeField> RowValue<F> for F {}

/// One subrelation's accumulator, independent of the values added into it.
pub trait AccumulatorSlot: Sized + Send {
    /// The additive identity for a subrelation with the given partial length.
    fn empty(partial_length: usize) -> Self;

    /// Number of evaluation points held, or `None` for an accumulator with no
    /// degree limit.
    fn partial_length(&self) -> Option<usize>;

    fn combine(&mut self, other: Self);

    fn vanishes(&self) -> bool;
}

/// Lifts a row value `V` into the accumulator representation and adds it.
pub trait SubrelationAccumulator<V>: AccumulatorSlot {
    fn add_view(&mut self, value: V);
}

/// Plain field accumulation, used by verifiers and the debug check.
impl<F: PrimeField> AccumulatorSlot for F {
    fn empty(_partial_length: usize) -> Self {
        F::zero()
    }

    fn partial_length(&self) -> Option<usize> {
        None
    }

    fn combine(&mut self, other: Self) {
        *self += other;
    }

    fn vanishes(&self) -> bool {
        self.is_zero()
    }
}

impl<F: PrimeField> SubrelationAccumulator<F> for F {
    #[inline]
    fn add_view(&mut self, value: F) {
        *self += value;
    }
}

/// Round-shared challenges. The AVM relations in this crate do not read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationParameters<F> {
    pub eta: F,
    pub beta: F,
    pub gamma: F,
    pub public_input_delta: F,
}

/// A set of row-local identities with one accumulation entry point.
pub trait Relation: Sized + Send + Sync + 'static {
    const NAME: &'static str;

    /// Partial length of every subrelation, in accumulation order.
    const SUBRELATION_PARTIAL_LENGTHS: &'static [usize];

    const NUM_SUBRELATIONS: usize = Self::SUBRELATION_PARTIAL_LENGTHS.len();

    /// Short diagnostic label; unlabelled subrelations report their index.
    fn subrelation_label(index: usize) -> Cow<'static, str>;

    /// Adds `scaling_factor` times every subrelation's value on `row` into
    /// the matching slot of `evals`.
    fn accumulate<F, V, A>(
        evals: &mut Accumulators<Self, A>,
        row: &FullRow<V>,
        params: &RelationParameters<F>,
        scaling_factor: F,
    ) where
        F: PrimeField,
        V: RowValue<F>,
        A: SubrelationAccumulator<V>;

    /// Every subrelation's value on a single row.
    fn evaluate<F: PrimeField>(row: &FullRow<F>, params: &RelationParameters<F>) -> Vec<F> {
        let mut evals = Accumulators::<Self, F>::new();
        Self::accumulate(&mut evals, row, params, F::ONE);
        evals.into_slots()
    }
}

/// One accumulator per subrelation of `R`, sized from its partial lengths.
pub struct Accumulators<R, A> {
    slots: Vec<A>,
    _relation: PhantomData<fn() -> R>,
}

impl<R: Relation, A: AccumulatorSlot> Accumulators<R, A> {
    pub fn new() -> Self {
        Self {
            slots: R::SUBRELATION_PARTIAL_LENGTHS
                .iter()
                .map(|&length| A::empty(length))
                .collect(),
            _relation: PhantomData,
        }
    }

    /// Wraps caller-supplied slots after checking them against `R`.
    ///
    /// # Errors
    ///
    /// * [`RelationError::SubrelationCountMismatch`] if there is not exactly
    ///   one slot per subrelation.
    /// * [`RelationError::AccumulatorTooShort`] if a slot holds fewer
    ///   evaluations than its subrelation's partial length.
    pub fn from_slots(slots: Vec<A>) -> Result<Self, RelationError> {
        if slots.len() != R::NUM_SUBRELATIONS {
            return Err(RelationError::SubrelationCountMismatch {
                relation: R::NAME,
                expected: R::NUM_SUBRELATIONS,
                got: slots.len(),
            });
        }
        for (index, (slot, &required)) in slots
            .iter()
            .zip(R::SUBRELATION_PARTIAL_LENGTHS)
            .enumerate()
        {
            if let Some(got) = slot.partial_length() {
                if got < required {
                    return Err(RelationError::AccumulatorTooShort {
                        relation: R::NAME,
                        index,
                        required,
                        got,
                    });
                }
            }
        }
        Ok(Self {
            slots,
            _relation: PhantomData,
        })
    }

    /// Checks that rows of `V` carry enough points to fill every slot.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::EdgeTooShort`] for the first slot holding
    /// more evaluations than a `V` value has points.
    pub fn check_points<F, V>(&self) -> Result<(), RelationError>
    where
        F: PrimeField,
        V: RowValue<F>,
    {
        let Some(points) = V::POINTS else {
            return Ok(());
        };
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(required) = slot.partial_length() {
                if required > points {
                    return Err(RelationError::EdgeTooShort {
                        relation: R::NAME,
                        index,
                        required,
                        points,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn slots(&self) -> &[A] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&A> {
        self.slots.get(index)
    }

    pub fn into_slots(self) -> Vec<A> {
        self.slots
    }

    /// Adds another container slot by slot.
    pub fn combine(&mut self, other: Self) {
        for (slot, other) in self.slots.iter_mut().zip(other.slots) {
            slot.combine(other);
        }
    }

    /// True when every subrelation's sum is zero.
    pub fn vanishes(&self) -> bool {
        self.slots.iter().all(AccumulatorSlot::vanishes)
    }

    /// Indices of subrelations whose sum is nonzero.
    pub fn nonzero_subrelations(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.vanishes())
            .map(|(index, _)| index)
            .collect()
    }

    /// Scales `values[i]` by `scaling_factor` and adds it into slot `i`.
    #[inline]
    pub fn add_scaled<F, V, const N: usize>(&mut self, values: [V; N], scaling_factor: F)
    where
        F: PrimeField,
        V: RowValue<F>,
        A: SubrelationAccumulator<V>,
    {
        debug_assert_eq!(N, self.slots.len(), "subrelation count of `{}`", R::NAME);
        for (slot, value) in self.slots.iter_mut().zip(values) {
            slot.add_view(value * scaling_factor);
        }
    }
}

impl<R: Relation, A: AccumulatorSlot> Default for Accumulators<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, A: Clone> Clone for Accumulators<R, A> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            _relation: PhantomData,
        }
    }
}

impl<R: Relation, A: fmt::Debug> fmt::Debug for Accumulators<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulators")
            .field("relation", &R::NAME)
            .field("slots", &self.slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::UnivariateAccumulator;
    use ark_bls12_381::Fr;
    use ark_ff::Zero;

    #[test]
    fn test_new_sizes_slots_from_partial_lengths() {
        let evals = Accumulators::<RangeCheck, UnivariateAccumulator<Fr>>::new();
        let lengths: Vec<_> = evals
            .slots()
            .iter()
            .map(|slot| slot.partial_length().unwrap())
            .collect();
        assert_eq!(lengths, RangeCheck::SUBRELATION_PARTIAL_LENGTHS);
        assert!(evals.vanishes());
    }

    #[test]
    fn test_from_slots_rejects_wrong_count() {
        let result = Accumulators::<Alu, Fr>::from_slots(vec![Fr::zero(); 3]);
        assert_eq!(
            result.unwrap_err(),
            RelationError::SubrelationCountMismatch {
                relation: "alu",
                expected: 2,
                got: 3,
            }
        );
    }

    #[test]
    fn test_from_slots_rejects_short_slot() {
        let slots = vec![
            UnivariateAccumulator::<Fr>::empty(3),
            UnivariateAccumulator::<Fr>::empty(1),
        ];
        let result = Accumulators::<Alu, _>::from_slots(slots);
        assert_eq!(
            result.unwrap_err(),
            RelationError::AccumulatorTooShort {
                relation: "alu",
                index: 1,
                required: 2,
                got: 1,
            }
        );

        let longer = vec![
            UnivariateAccumulator::<Fr>::empty(5),
            UnivariateAccumulator::<Fr>::empty(5),
        ];
        assert!(Accumulators::<Alu, _>::from_slots(longer).is_ok());
    }

    #[test]
    fn test_check_points_against_edge_width() {
        use crate::math::Univariate;

        let evals = Accumulators::<Alu, UnivariateAccumulator<Fr>>::new();
        assert_eq!(
            evals.check_points::<Fr, Univariate<Fr, 2>>(),
            Err(RelationError::EdgeTooShort {
                relation: "alu",
                index: 0,
                required: 3,
                points: 2,
            })
        );
        assert!(evals.check_points::<Fr, Univariate<Fr, 3>>().is_ok());
        assert!(evals.check_points::<Fr, Fr>().is_ok());
    }

    #[test]
    fn test_accumulate_adds_instead_of_overwriting() {
        let mut row = FullRow::<Fr>::default();
        row[crate::vm::Column::AluIa] = Fr::from(1u64);

        let mut evals = Accumulators::<Alu, Fr>::new();
        let params = RelationParameters::default();
        Alu::accumulate(&mut evals, &row, &params, Fr::from(2u64));
        Alu::accumulate(&mut evals, &row, &params, Fr::from(5u64));
        assert_eq!(evals.get(Alu::ALU_ADD), Some(&Fr::from(7u64)));
        assert_eq!(evals.nonzero_subrelations(), vec![Alu::ALU_ADD]);
    }

    #[test]
    fn test_combine_sums_slots() {
        let mut a =
            Accumulators::<Alu, Fr>::from_slots(vec![Fr::from(1u64), Fr::from(2u64)]).unwrap();
        let b =
            Accumulators::<Alu, Fr>::from_slots(vec![Fr::from(3u64), -Fr::from(2u64)]).unwrap();
        a.combine(b);
        assert_eq!(a.slots(), &[Fr::from(4u64), Fr::zero()]);
        assert_eq!(a.nonzero_subrelations(), vec![0]);
    }
}
