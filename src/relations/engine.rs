//! Accumulating one relation over many rows.
//!
//! Accumulation is a plain sum over rows, so rows can be split across the
//! rayon pool: each task folds its share into private accumulators and the
//! partial sums are reduced at the end.

use ark_ff::PrimeField;
use rayon::prelude::*;
use tracing::debug;

use super::{Accumulators, Relation, RelationParameters, RowValue, SubrelationAccumulator};
use crate::config::EvaluationConfig;
use crate::error::RelationError;
use crate::math::Univariate;
use crate::vm::FullRow;

/// Sums `scaling_factors[i]` times every subrelation of `R` on `rows[i]`.
///
/// # Errors
///
/// * [`RelationError::ScalingFactorCountMismatch`] unless there is exactly
///   one scaling factor per row.
/// * [`RelationError::EdgeTooShort`] if the rows are univariates with fewer
///   points than some subrelation's partial length.
pub fn accumulate_rows<R, F, V, A>(
    rows: &[FullRow<V>],
    params: &RelationParameters<F>,
    scaling_factors: &[F],
    config: &EvaluationConfig,
) -> Result<Accumulators<R, A>, RelationError>
where
    R: Relation,
    F: PrimeField,
    V: RowValue<F>,
    A: SubrelationAccumulator<V>,
{
    if rows.len() != scaling_factors.len() {
        return Err(RelationError::ScalingFactorCountMismatch {
            rows: rows.len(),
            factors: scaling_factors.len(),
        });
    }
    Accumulators::<R, A>::new().check_points::<F, V>()?;

    let evals = if config.parallel {
        rows.par_iter()
            .zip(scaling_factors.par_iter())
            .with_min_len(config.chunk_len())
            .fold(Accumulators::<R, A>::new, |mut evals, (row, &factor)| {
                R::accumulate(&mut evals, row, params, factor);
                evals
            })
            .reduce(Accumulators::<R, A>::new, |mut left, right| {
                left.combine(right);
                left
            })
    } else {
        let mut evals = Accumulators::<R, A>::new();
        for (row, &factor) in rows.iter().zip(scaling_factors) {
            R::accumulate(&mut evals, row, params, factor);
        }
        evals
    };

    debug!(
        relation = R::NAME,
        rows = rows.len(),
        parallel = config.parallel,
        nonzero = evals.nonzero_subrelations().len(),
        "accumulated rows"
    );
    Ok(evals)
}

/// The row of univariates interpolating `lo` at `X = 0` and `hi` at `X = 1`,
/// sampled at `0..N`.
pub fn edge_row<F: PrimeField, const N: usize>(
    lo: &FullRow<F>,
    hi: &FullRow<F>,
) -> FullRow<Univariate<F, N>> {
    FullRow::new(std::array::from_fn(|i| {
        let (at_zero, at_one) = (lo.as_slice()[i], hi.as_slice()[i]);
        Univariate::linear(at_zero, at_one - at_zero)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::UnivariateAccumulator;
    use crate::relations::{AccumulatorSlot, Alu};
    use crate::vm::Column;
    use ark_bls12_381::Fr;
    use ark_ff::Zero;

    fn alu_rows(n: u64, broken: Option<u64>) -> Vec<FullRow<Fr>> {
        (0..n)
            .map(|i| {
                let mut row = FullRow::default();
                row[Column::AluSelOpAdd] = Fr::from(1u64);
                row[Column::AluIa] = Fr::from(i);
                row[Column::AluIb] = Fr::from(2 * i);
                row[Column::AluIc] = Fr::from(3 * i);
                if broken == Some(i) {
                    row[Column::AluIc] += Fr::from(1u64);
                }
                row
            })
            .collect()
    }

    #[test]
    fn test_mismatched_factor_count() {
        let rows = alu_rows(3, None);
        let result = accumulate_rows::<Alu, Fr, Fr, Fr>(
            &rows,
            &RelationParameters::default(),
            &[Fr::from(1u64)],
            &EvaluationConfig::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            RelationError::ScalingFactorCountMismatch { rows: 3, factors: 1 }
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rows = alu_rows(100, Some(37));
        let factors: Vec<Fr> = (0..100u64).map(|i| Fr::from(i * i + 1)).collect();
        let params = RelationParameters::default();

        let parallel = EvaluationConfig {
            min_rows_per_task: 8,
            ..EvaluationConfig::default()
        };
        let a = accumulate_rows::<Alu, Fr, Fr, Fr>(&rows, &params, &factors, &parallel).unwrap();
        let b = accumulate_rows::<Alu, Fr, Fr, Fr>(
            &rows,
            &params,
            &factors,
            &EvaluationConfig::sequential(),
        )
        .unwrap();
        assert_eq!(a.slots(), b.slots());
        // -(37^2 + 1)
        assert_eq!(a.slots()[Alu::ALU_ADD], -Fr::from(1370u64));
        assert!(a.slots()[Alu::SEL_ADD_BINARY].is_zero());
    }

    #[test]
    fn test_empty_input_vanishes() {
        let evals = accumulate_rows::<Alu, Fr, Fr, UnivariateAccumulator<Fr>>(
            &[],
            &RelationParameters::default(),
            &[],
            &EvaluationConfig::default(),
        )
        .unwrap();
        assert!(evals.vanishes());
        assert_eq!(evals.slots()[0].partial_length(), Some(3));
    }

    #[test]
    fn test_edge_rows_into_univariate_accumulators() {
        let rows = alu_rows(4, None);
        let edges: Vec<FullRow<Univariate<Fr, 3>>> = rows
            .chunks(2)
            .map(|pair| edge_row(&pair[0], &pair[1]))
            .collect();
        let factors = vec![Fr::from(5u64); edges.len()];
        let evals = accumulate_rows::<Alu, Fr, _, UnivariateAccumulator<Fr>>(
            &edges,
            &RelationParameters::default(),
            &factors,
            &EvaluationConfig::sequential(),
        )
        .unwrap();
        // valid rows on both ends of a linear edge keep every point at zero
        assert!(evals.vanishes());
    }

    #[test]
    fn test_degree_two_subrelation_needs_three_points() {
        // sel goes 0 -> 1 across the edge, so sel * (1 - sel) is 0, 0, -2
        let lo = FullRow::<Fr>::default();
        let mut hi = FullRow::<Fr>::default();
        hi[Column::AluSelOpAdd] = Fr::from(1u64);
        let params = RelationParameters::default();
        let factors = [Fr::from(1u64)];

        let narrow = [edge_row::<Fr, 2>(&lo, &hi)];
        let result = accumulate_rows::<Alu, Fr, _, UnivariateAccumulator<Fr>>(
            &narrow,
            &params,
            &factors,
            &EvaluationConfig::sequential(),
        );
        assert_eq!(
            result.unwrap_err(),
            RelationError::EdgeTooShort {
                relation: "alu",
                index: Alu::SEL_ADD_BINARY,
                required: 3,
                points: 2,
            }
        );

        let wide = [edge_row::<Fr, 3>(&lo, &hi)];
        let evals = accumulate_rows::<Alu, Fr, _, UnivariateAccumulator<Fr>>(
            &wide,
            &params,
            &factors,
            &EvaluationConfig::sequential(),
        )
        .unwrap();
        assert_eq!(
            evals.slots()[Alu::SEL_ADD_BINARY].evaluations(),
            &[Fr::zero(), Fr::zero(), -Fr::from(2u64)]
        );
    }

    #[test]
    fn test_edge_row_endpoints() {
        let rows = alu_rows(2, None);
        let edge = edge_row::<Fr, 4>(&rows[0], &rows[1]);
        let ic = edge[Column::AluIc].evaluations();
        assert_eq!(ic[0], rows[0][Column::AluIc]);
        assert_eq!(ic[1], rows[1][Column::AluIc]);
        assert_eq!(ic[3], Fr::from(9u64));
    }
}
