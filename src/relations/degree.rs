//! Measuring subrelation degrees.
//!
//! A relation evaluated on a random edge (every column linear in `X`) gives,
//! per subrelation, a univariate whose degree is the subrelation's total
//! degree with overwhelming probability. Sampling it at
//! [`MAX_PARTIAL_LENGTH`] points and interpolating recovers that degree,
//! which is then compared against the declared partial lengths.

use ark_ff::PrimeField;
use rand::Rng;

use super::engine::edge_row;
use super::{AccumulatorSlot, Accumulators, Relation, RelationParameters};
use crate::error::RelationError;
use crate::math::{Univariate, UnivariateAccumulator};
use crate::vm::FullRow;

/// Largest partial length this crate measures; subrelations of degree 7 or
/// more are out of range.
pub const MAX_PARTIAL_LENGTH: usize = 8;

fn random_row<F: PrimeField, G: Rng + ?Sized>(rng: &mut G) -> FullRow<F> {
    FullRow::new(std::array::from_fn(|_| F::rand(rng)))
}

/// The smallest partial length each subrelation of `R` needs, measured on
/// one random edge.
///
/// # Errors
///
/// Returns [`RelationError::AccumulatorTooShort`] if `R` declares a partial
/// length above [`MAX_PARTIAL_LENGTH`].
pub fn measure_partial_lengths<R, F, G>(rng: &mut G) -> Result<Vec<usize>, RelationError>
where
    R: Relation,
    F: PrimeField,
    G: Rng + ?Sized,
{
    let lo = random_row::<F, G>(rng);
    let hi = random_row::<F, G>(rng);
    let edge: FullRow<Univariate<F, MAX_PARTIAL_LENGTH>> = edge_row(&lo, &hi);
    let params = RelationParameters {
        eta: F::rand(rng),
        beta: F::rand(rng),
        gamma: F::rand(rng),
        public_input_delta: F::rand(rng),
    };

    // every slot is widened so nothing is truncated to the declared length
    let slots = (0..R::NUM_SUBRELATIONS)
        .map(|_| UnivariateAccumulator::empty(MAX_PARTIAL_LENGTH))
        .collect();
    let mut evals = Accumulators::<R, UnivariateAccumulator<F>>::from_slots(slots)?;
    evals.check_points::<F, Univariate<F, MAX_PARTIAL_LENGTH>>()?;
    R::accumulate(&mut evals, &edge, &params, F::ONE);

    Ok(evals
        .slots()
        .iter()
        .map(|slot| match slot.to_polynomial() {
            Some(poly) if !poly.is_zero() => poly.degree() + 1,
            _ => 1,
        })
        .collect())
}

/// Checks that no subrelation of `R` undercounts its partial length.
///
/// # Errors
///
/// Returns [`RelationError::PartialLengthTooSmall`] for the first
/// subrelation whose measured length exceeds the declared one, or the error
/// of [`measure_partial_lengths`].
pub fn check_partial_lengths<R, F, G>(rng: &mut G) -> Result<(), RelationError>
where
    R: Relation,
    F: PrimeField,
    G: Rng + ?Sized,
{
    let measured = measure_partial_lengths::<R, F, G>(rng)?;
    for (index, (&declared, &measured)) in R::SUBRELATION_PARTIAL_LENGTHS
        .iter()
        .zip(&measured)
        .enumerate()
    {
        if measured > declared {
            return Err(RelationError::PartialLengthTooSmall {
                relation: R::NAME,
                index,
                label: R::subrelation_label(index).into_owned(),
                declared,
                measured,
            });
        }
    }
    Ok(())
}
