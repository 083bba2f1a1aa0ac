//! Column layout shared by witness generation and relation evaluation.
//!
//! The order of [`Column`] is the binding contract between the two sides:
//! a flat buffer of `NUM_COLUMNS` values per row is read in exactly this
//! order.

use super::row::FullRow;

macro_rules! define_columns {
    ( $( $variant:ident => $accessor:ident ),+ $(,)? ) => {
        /// Every committed column of a trace row, in canonical order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(usize)]
        pub enum Column {
            $( $variant ),+
        }

        impl Column {
            /// All columns in canonical order.
            pub const ALL: &'static [Column] = &[ $( Column::$variant ),+ ];

            /// Position of the column inside a row.
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Snake-case column name, as printed in diagnostics.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Column::$variant => stringify!($accessor) ),+
                }
            }
        }

        impl<V: Copy> FullRow<V> {
            $(
                #[inline]
                pub fn $accessor(&self) -> V {
                    self.get(Column::$variant)
                }
            )+
        }
    };
}

define_columns! {
    AluSelOpAdd => alu_sel_op_add,
    AluIa => alu_ia,
    AluIb => alu_ib,
    AluIc => alu_ic,
    RangeCheckSelRngChk => range_check_sel_rng_chk,
    RangeCheckValue => range_check_value,
    RangeCheckRngChkBits => range_check_rng_chk_bits,
    RangeCheckIsLteU16 => range_check_is_lte_u16,
    RangeCheckIsLteU32 => range_check_is_lte_u32,
    RangeCheckIsLteU48 => range_check_is_lte_u48,
    RangeCheckIsLteU64 => range_check_is_lte_u64,
    RangeCheckIsLteU80 => range_check_is_lte_u80,
    RangeCheckIsLteU96 => range_check_is_lte_u96,
    RangeCheckIsLteU112 => range_check_is_lte_u112,
    RangeCheckIsLteU128 => range_check_is_lte_u128,
    RangeCheckU16R0 => range_check_u16_r0,
    RangeCheckU16R1 => range_check_u16_r1,
    RangeCheckU16R2 => range_check_u16_r2,
    RangeCheckU16R3 => range_check_u16_r3,
    RangeCheckU16R4 => range_check_u16_r4,
    RangeCheckU16R5 => range_check_u16_r5,
    RangeCheckU16R6 => range_check_u16_r6,
    RangeCheckU16R7 => range_check_u16_r7,
    RangeCheckSelLookup0 => range_check_sel_lookup_0,
    RangeCheckSelLookup1 => range_check_sel_lookup_1,
    RangeCheckSelLookup2 => range_check_sel_lookup_2,
    RangeCheckSelLookup3 => range_check_sel_lookup_3,
    RangeCheckSelLookup4 => range_check_sel_lookup_4,
    RangeCheckSelLookup5 => range_check_sel_lookup_5,
    RangeCheckSelLookup6 => range_check_sel_lookup_6,
    RangeCheckDynRngChkBits => range_check_dyn_rng_chk_bits,
    RangeCheckDynRngChkPow2 => range_check_dyn_rng_chk_pow_2,
    RangeCheckDynDiff => range_check_dyn_diff,
}

/// Number of columns in a [`FullRow`].
pub const NUM_COLUMNS: usize = Column::ALL.len();

impl Column {
    /// Looks a column up by its snake-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|column| column.name() == name)
    }
}

impl std::str::FromStr for Column {
    type Err = crate::error::RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| crate::error::RelationError::UnknownColumn(s.to_string()))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
