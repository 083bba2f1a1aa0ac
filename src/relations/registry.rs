//! Relation sets and the trace debug check.
//!
//! A [`RelationRegistry`] holds relations behind the object-safe
//! [`RelationCheck`] so that one trace can be checked against a
//! heterogeneous set. Checking evaluates every relation on every row with
//! plain field accumulators and reports subrelations that do not vanish.

use ark_ff::PrimeField;
use rayon::prelude::*;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

use super::{Alu, RangeCheck, Relation, RelationParameters};
use crate::config::EvaluationConfig;
use crate::error::RelationError;
use crate::vm::{ExecutionTrace, FullRow};

/// A subrelation that did not vanish on some row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubrelationFailure {
    pub relation: &'static str,
    pub subrelation: usize,
    pub label: String,
    pub row: usize,
}

impl fmt::Display for SubrelationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "relation `{}` subrelation {} ({}) fails at row {}",
            self.relation, self.subrelation, self.label, self.row
        )
    }
}

/// Object-safe view of a [`Relation`] over the field `F`.
pub trait RelationCheck<F: PrimeField>: Send + Sync {
    fn name(&self) -> &'static str;

    fn partial_lengths(&self) -> &'static [usize];

    fn label(&self, index: usize) -> Cow<'static, str>;

    /// Value of every subrelation on `row`, unscaled.
    fn evaluate(&self, row: &FullRow<F>, params: &RelationParameters<F>) -> Vec<F>;
}

struct Registered<R>(PhantomData<fn() -> R>);

impl<F: PrimeField, R: Relation> RelationCheck<F> for Registered<R> {
    fn name(&self) -> &'static str {
        R::NAME
    }

    fn partial_lengths(&self) -> &'static [usize] {
        R::SUBRELATION_PARTIAL_LENGTHS
    }

    fn label(&self, index: usize) -> Cow<'static, str> {
        R::subrelation_label(index)
    }

    fn evaluate(&self, row: &FullRow<F>, params: &RelationParameters<F>) -> Vec<F> {
        R::evaluate(row, params)
    }
}

/// Ordered set of relations with unique names.
pub struct RelationRegistry<F: PrimeField> {
    relations: Vec<Box<dyn RelationCheck<F>>>,
}

impl<F: PrimeField> Default for RelationRegistry<F> {
    fn default() -> Self {
        Self {
            relations: Vec::new(),
        }
    }
}

impl<F: PrimeField> RelationRegistry<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The relations of the AVM: [`Alu`] and [`RangeCheck`].
    pub fn avm() -> Self {
        let mut registry = Self::default();
        registry.insert::<Alu>();
        registry.insert::<RangeCheck>();
        registry
    }

    /// Adds `R` after checking its name and partial lengths.
    ///
    /// # Errors
    ///
    /// * [`RelationError::DuplicateRelation`] if a relation with the same
    ///   name is already registered.
    /// * [`RelationError::InvalidPartialLength`] if `R` declares no
    ///   subrelations or a partial length of zero.
    pub fn register<R: Relation>(&mut self) -> Result<(), RelationError> {
        if self.get(R::NAME).is_some() {
            return Err(RelationError::DuplicateRelation(R::NAME));
        }
        if R::SUBRELATION_PARTIAL_LENGTHS.is_empty() {
            return Err(RelationError::InvalidPartialLength {
                relation: R::NAME,
                index: 0,
                length: 0,
            });
        }
        if let Some(index) = R::SUBRELATION_PARTIAL_LENGTHS.iter().position(|&l| l == 0) {
            return Err(RelationError::InvalidPartialLength {
                relation: R::NAME,
                index,
                length: 0,
            });
        }
        self.insert::<R>();
        Ok(())
    }

    fn insert<R: Relation>(&mut self) {
        debug!(
            relation = R::NAME,
            subrelations = R::NUM_SUBRELATIONS,
            "registered relation"
        );
        self.relations.push(Box::new(Registered::<R>(PhantomData)));
    }

    pub fn get(&self, name: &str) -> Option<&dyn RelationCheck<F>> {
        self.relations
            .iter()
            .find(|relation| relation.name() == name)
            .map(|relation| relation.as_ref())
    }

    /// Relations in registration order.
    pub fn relations(&self) -> impl Iterator<Item = &dyn RelationCheck<F>> {
        self.relations.iter().map(|relation| relation.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.relations.iter().map(|relation| relation.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Failing subrelations of one row, in (relation, subrelation) order.
    pub fn row_failures<'a>(
        &'a self,
        row_index: usize,
        row: &'a FullRow<F>,
        params: &'a RelationParameters<F>,
    ) -> impl Iterator<Item = SubrelationFailure> + 'a {
        self.relations.iter().flat_map(move |relation| {
            relation
                .evaluate(row, params)
                .into_iter()
                .enumerate()
                .filter(|(_, value)| !value.is_zero())
                .map(move |(subrelation, _)| SubrelationFailure {
                    relation: relation.name(),
                    subrelation,
                    label: relation.label(subrelation).into_owned(),
                    row: row_index,
                })
        })
    }

    /// Checks every row against every relation.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::SubrelationFailed`] with the first failure in
    /// (row, relation, subrelation) order.
    pub fn check_trace(
        &self,
        trace: &ExecutionTrace<F>,
        params: &RelationParameters<F>,
        config: &EvaluationConfig,
    ) -> Result<(), RelationError> {
        let first = if config.parallel {
            trace
                .rows()
                .par_iter()
                .enumerate()
                .with_min_len(config.chunk_len())
                .find_map_first(|(i, row)| self.row_failures(i, row, params).next())
        } else {
            trace
                .rows()
                .iter()
                .enumerate()
                .find_map(|(i, row)| self.row_failures(i, row, params).next())
        };

        match first {
            Some(failure) => {
                warn!(
                    relation = failure.relation,
                    subrelation = failure.subrelation,
                    label = %failure.label,
                    row = failure.row,
                    "relation check failed"
                );
                Err(RelationError::SubrelationFailed(failure))
            }
            None => {
                info!(
                    rows = trace.height(),
                    relations = self.len(),
                    "relation check passed"
                );
                Ok(())
            }
        }
    }

    /// Every failure on the trace in (row, relation, subrelation) order, at
    /// most `config.max_reported_failures` of them.
    pub fn failures(
        &self,
        trace: &ExecutionTrace<F>,
        params: &RelationParameters<F>,
        config: &EvaluationConfig,
    ) -> Vec<SubrelationFailure> {
        let limit = config.max_reported_failures;
        let mut failures: Vec<SubrelationFailure> = if config.parallel {
            trace
                .rows()
                .par_iter()
                .enumerate()
                .with_min_len(config.chunk_len())
                .flat_map_iter(|(i, row)| self.row_failures(i, row, params))
                .collect()
        } else {
            trace
                .rows()
                .iter()
                .enumerate()
                .flat_map(|(i, row)| self.row_failures(i, row, params))
                .take(limit.saturating_add(1))
                .collect()
        };

        if failures.len() > limit {
            warn!(
                reported = limit,
                "more failing subrelations than reported, output truncated"
            );
            failures.truncate(limit);
        }
        failures
    }
}

impl<F: PrimeField> fmt::Debug for RelationRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationRegistry")
            .field("relations", &self.names())
            .finish()
    }
}
