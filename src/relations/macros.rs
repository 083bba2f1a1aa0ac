//! Declarative relation definitions.
//!
//! [`define_relation!`](crate::define_relation) expands a list of row
//! identities into a zero-sized type implementing
//! [`Relation`](crate::relations::Relation):
//!
//! ```ignore
//! define_relation! {
//!     pub struct Alu = "alu";
//!     fn accumulate<F>(row, params, one) {
//!         let sel = row.alu_sel_op_add();
//!         subrelation SEL_ADD_BINARY [3] = sel * (one - sel);
//!         subrelation ALU_ADD [2] = (row.alu_ia() + row.alu_ib()) - row.alu_ic();
//!     }
//! }
//! ```
//!
//! Each `subrelation` line gives an optional label, the partial length in
//! brackets and the expression that must vanish. Labelled subrelations get
//! an associated index constant (`Alu::ALU_ADD == 1`). Inside the body `row`
//! is a `&FullRow<V>`, `one` is `V::from(F::ONE)` and `F` is the field.

/// Position of `label` in `labels`, evaluated at compile time by
/// [`define_relation!`](crate::define_relation).
#[doc(hidden)]
pub const fn subrelation_index(labels: &[Option<&str>], label: &str) -> usize {
    let mut i = 0;
    while i < labels.len() {
        if let Some(candidate) = labels[i] {
            if str_eq(candidate, label) {
                return i;
            }
        }
        i += 1;
    }
    panic!("label is not a subrelation of this relation")
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

#[macro_export]
macro_rules! define_relation {
    (@label $label:ident) => {
        ::core::option::Option::Some(stringify!($label))
    };
    (@label) => {
        ::core::option::Option::None
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $relation_name:literal;
        fn accumulate<$field:ident>($row:ident, $params:ident, $one:ident) {
            $( let $var:ident = $value:expr; )*
            $( subrelation $($label:ident)? [$len:literal] = $expr:expr; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis struct $name;

        impl $name {
            /// Subrelation labels in accumulation order.
            pub const LABELS: &'static [::core::option::Option<&'static str>] =
                &[ $( $crate::define_relation!(@label $($label)?) ),+ ];

            $( $(
                pub const $label: usize =
                    $crate::relations::macros::subrelation_index(Self::LABELS, stringify!($label));
            )? )+
        }

        impl $crate::relations::Relation for $name {
            const NAME: &'static str = $relation_name;

            const SUBRELATION_PARTIAL_LENGTHS: &'static [usize] = &[ $( $len ),+ ];

            fn subrelation_label(index: usize) -> ::std::borrow::Cow<'static, str> {
                match Self::LABELS.get(index) {
                    ::core::option::Option::Some(::core::option::Option::Some(label)) => {
                        ::std::borrow::Cow::Borrowed(*label)
                    }
                    _ => ::std::borrow::Cow::Owned(index.to_string()),
                }
            }

            #[allow(unused_variables)]
            fn accumulate<$field, V, A>(
                evals: &mut $crate::relations::Accumulators<Self, A>,
                $row: &$crate::vm::FullRow<V>,
                $params: &$crate::relations::RelationParameters<$field>,
                scaling_factor: $field,
            ) where
                $field: ::ark_ff::PrimeField,
                V: $crate::relations::RowValue<$field>,
                A: $crate::relations::SubrelationAccumulator<V>,
            {
                let $one = V::from(<$field as ::ark_ff::Field>::ONE);
                $( let $var = $value; )*
                evals.add_scaled([ $( $expr ),+ ], scaling_factor);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::Relation;
    use ark_bls12_381::Fr;
    use ark_ff::Zero;

    crate::define_relation! {
        /// Two identities over the ALU registers, only the second labelled.
        struct Doubling = "doubling";
        fn accumulate<F>(row, params, one) {
            let a = row.alu_ia();
            subrelation [2] = a - a;
            subrelation TWICE [3] = a * (one + one) - row.alu_ic() * row.alu_ib();
        }
    }

    #[test]
    fn test_generated_metadata() {
        assert_eq!(Doubling::NAME, "doubling");
        assert_eq!(Doubling::SUBRELATION_PARTIAL_LENGTHS, &[2, 3]);
        assert_eq!(Doubling::NUM_SUBRELATIONS, 2);
        assert_eq!(Doubling::TWICE, 1);
        assert_eq!(Doubling::subrelation_label(0), "0");
        assert_eq!(Doubling::subrelation_label(1), "TWICE");
        assert_eq!(Doubling::subrelation_label(7), "7");
    }

    #[test]
    fn test_generated_accumulate() {
        let mut row = crate::vm::FullRow::<Fr>::default();
        row[crate::vm::Column::AluIa] = Fr::from(3u64);
        row[crate::vm::Column::AluIb] = Fr::from(1u64);
        row[crate::vm::Column::AluIc] = Fr::from(6u64);
        let params = crate::relations::RelationParameters::default();
        assert!(Doubling::evaluate(&row, &params).iter().all(Zero::is_zero));

        row[crate::vm::Column::AluIc] = Fr::from(5u64);
        assert_eq!(Doubling::evaluate(&row, &params), vec![Fr::zero(), Fr::from(1u64)]);
    }

    #[test]
    fn test_subrelation_index_lookup() {
        let labels = [None, Some("A"), Some("AB")];
        assert_eq!(subrelation_index(&labels, "A"), 1);
        assert_eq!(subrelation_index(&labels, "AB"), 2);
        assert!(!str_eq("AB", "AC"));
    }
}
