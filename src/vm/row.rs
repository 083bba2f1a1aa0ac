//! One trace step: a fixed-layout tuple of column values.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::mem::size_of;
use std::ops::{Index, IndexMut};

use super::columns::{Column, NUM_COLUMNS};
use crate::error::RelationError;

/// Column values of one trace row, indexed by [`Column`].
///
/// `V` is usually a field element. Sum-check provers instantiate it with a
/// univariate over one edge, which lets the same relation code evaluate
/// extended rows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct FullRow<V> {
    values: [V; NUM_COLUMNS],
}

// Zero-copy consumers read a buffer of rows as a flat slice of field elements.
const _: () = assert!(
    size_of::<FullRow<ark_bls12_381::Fr>>() == size_of::<ark_bls12_381::Fr>() * NUM_COLUMNS
);

impl<V> FullRow<V> {
    pub fn new(values: [V; NUM_COLUMNS]) -> Self {
        Self { values }
    }

    /// Builds a row from a flat buffer laid out in [`Column`] order.
    pub fn from_values(values: Vec<V>) -> Result<Self, RelationError> {
        let got = values.len();
        let values = <[V; NUM_COLUMNS]>::try_from(values).map_err(|_| {
            RelationError::RowWidthMismatch {
                expected: NUM_COLUMNS,
                got,
            }
        })?;
        Ok(Self { values })
    }

    pub fn get_mut(&mut self, column: Column) -> &mut V {
        &mut self.values[column.index()]
    }

    pub fn set(&mut self, column: Column, value: V) {
        self.values[column.index()] = value;
    }

    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    pub fn into_values(self) -> [V; NUM_COLUMNS] {
        self.values
    }

    /// Column names in the same order as [`FullRow::iter`].
    pub fn names() -> impl Iterator<Item = &'static str> + Clone {
        Column::ALL.iter().map(|column| column.name())
    }

    /// `(name, value)` pairs in canonical column order.
    ///
    /// Meant for serialization and debug output; relations use the named
    /// accessors instead.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &V)> + Clone {
        Column::ALL
            .iter()
            .map(move |column| (column.name(), &self.values[column.index()]))
    }

    /// Applies `f` to every column, e.g. to lift a row of field elements
    /// into univariates.
    pub fn map<W>(self, f: impl FnMut(V) -> W) -> FullRow<W> {
        FullRow {
            values: self.values.map(f),
        }
    }
}

impl<V: Copy> FullRow<V> {
    #[inline]
    pub fn get(&self, column: Column) -> V {
        self.values[column.index()]
    }
}

impl<V: Default> Default for FullRow<V> {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|_| V::default()),
        }
    }
}

impl<V> Index<Column> for FullRow<V> {
    type Output = V;

    fn index(&self, column: Column) -> &V {
        &self.values[column.index()]
    }
}

impl<V> IndexMut<Column> for FullRow<V> {
    fn index_mut(&mut self, column: Column) -> &mut V {
        &mut self.values[column.index()]
    }
}

impl<V: fmt::Display> fmt::Display for FullRow<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Serializes as a map from column name to the value's decimal string.
impl<V: fmt::Display> Serialize for FullRow<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(NUM_COLUMNS))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value.to_string())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr;

    #[test]
    fn test_named_and_indexed_access_agree() {
        let mut row = FullRow::<Fr>::default();
        row[Column::AluIa] = Fr::from(3u64);
        row.set(Column::AluIb, Fr::from(5u64));
        *row.get_mut(Column::AluIc) = Fr::from(8u64);

        assert_eq!(row.alu_ia(), Fr::from(3u64));
        assert_eq!(row.alu_ib(), row.get(Column::AluIb));
        assert_eq!(row.as_slice()[Column::AluIc.index()], Fr::from(8u64));
    }

    #[test]
    fn test_from_values_checks_width() {
        let values: Vec<Fr> = (0..NUM_COLUMNS as u64).map(Fr::from).collect();
        let row = FullRow::from_values(values).unwrap();
        assert_eq!(row.range_check_dyn_diff(), Fr::from(NUM_COLUMNS as u64 - 1));

        let short = vec![Fr::from(1u64); NUM_COLUMNS - 1];
        assert_eq!(
            FullRow::from_values(short),
            Err(RelationError::RowWidthMismatch {
                expected: NUM_COLUMNS,
                got: NUM_COLUMNS - 1,
            })
        );
    }

    #[test]
    fn test_iter_is_restartable_and_ordered() {
        let row = FullRow::new(std::array::from_fn::<u64, NUM_COLUMNS, _>(|i| i as u64));
        let pairs = row.iter();
        let first: Vec<_> = pairs.clone().map(|(name, _)| name).collect();
        let second: Vec<_> = FullRow::<u64>::names().collect();
        assert_eq!(first, second);
        assert_eq!(pairs.count(), NUM_COLUMNS);
        assert_eq!(row.iter().nth(3), Some(("alu_ic", &3)));
    }

    #[test]
    fn test_serialize_as_named_map() {
        let mut row = FullRow::<Fr>::default();
        row[Column::AluIc] = Fr::from(8u64);
        let json = serde_json::to_value(&row).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), NUM_COLUMNS);
        assert_eq!(map["alu_ic"], "8");
    }

    #[test]
    fn test_display_lists_every_column() {
        let row = FullRow::<u64>::default();
        let rendered = row.to_string();
        assert!(rendered.starts_with("alu_sel_op_add: 0, alu_ia: 0"));
        assert!(rendered.ends_with("range_check_dyn_diff: 0"));
    }
}
