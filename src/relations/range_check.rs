//! Range checks of up to 128 bits over 16-bit limbs.
//!
//! An active row (`range_check_sel_rng_chk = 1`) proves `value < 2^bits`.
//! Exactly one width selector `is_lte_uW` is set, for the smallest
//! `W ∈ {16, 32, ..., 128}` with `bits <= W`. The value is split into limbs
//! `u16_r0..u16_r6` of 16 bits each, plus the top limb `u16_r7`, which always
//! carries the most significant part. For width `W` the lower `W/16 - 1`
//! limbs sit at their natural positions and `r7` sits at `2^(W - 16)`.
//!
//! The top limb holds only `dyn_bits = bits - (W - 16)` bits. That is proven
//! by `dyn_diff = 2^dyn_bits - r7 - 1` being a 16-bit value; the binding of
//! `dyn_rng_chk_pow_2` to `2^dyn_bits` and the 16-bit membership of the limbs
//! are lookups into external tables. The lookup selectors `sel_lookup_k`
//! switch on the table lookup for limb `r_k` whenever the width uses it.

use ark_ff::PrimeField;

use crate::define_relation;
use crate::error::RelationError;
use crate::vm::{Column, FullRow};

/// Bit widths with a dedicated selector, smallest first.
pub const WIDTHS: [u32; 8] = [16, 32, 48, 64, 80, 96, 112, 128];

/// `is_lte_uW` columns, parallel to [`WIDTHS`].
pub const WIDTH_SELECTORS: [Column; 8] = [
    Column::RangeCheckIsLteU16,
    Column::RangeCheckIsLteU32,
    Column::RangeCheckIsLteU48,
    Column::RangeCheckIsLteU64,
    Column::RangeCheckIsLteU80,
    Column::RangeCheckIsLteU96,
    Column::RangeCheckIsLteU112,
    Column::RangeCheckIsLteU128,
];

/// 16-bit limbs; the last one is the top limb.
pub const LIMBS: [Column; 8] = [
    Column::RangeCheckU16R0,
    Column::RangeCheckU16R1,
    Column::RangeCheckU16R2,
    Column::RangeCheckU16R3,
    Column::RangeCheckU16R4,
    Column::RangeCheckU16R5,
    Column::RangeCheckU16R6,
    Column::RangeCheckU16R7,
];

/// `sel_lookup_k` is set when limb `r_k` takes part in the recomposition.
pub const LOOKUP_SELECTORS: [Column; 7] = [
    Column::RangeCheckSelLookup0,
    Column::RangeCheckSelLookup1,
    Column::RangeCheckSelLookup2,
    Column::RangeCheckSelLookup3,
    Column::RangeCheckSelLookup4,
    Column::RangeCheckSelLookup5,
    Column::RangeCheckSelLookup6,
];

/// `2^(16 k)`, the weight of a limb at position `k`.
#[inline]
fn limb_weight<F: PrimeField>(k: u32) -> F {
    F::from(1u128 << (16 * k))
}

define_relation! {
    /// Dynamic-width range check.
    pub struct RangeCheck = "range_check";
    fn accumulate<F>(row, params, one) {
        let sel = row.range_check_sel_rng_chk();
        let lte_u16 = row.range_check_is_lte_u16();
        let lte_u32 = row.range_check_is_lte_u32();
        let lte_u48 = row.range_check_is_lte_u48();
        let lte_u64 = row.range_check_is_lte_u64();
        let lte_u80 = row.range_check_is_lte_u80();
        let lte_u96 = row.range_check_is_lte_u96();
        let lte_u112 = row.range_check_is_lte_u112();
        let lte_u128 = row.range_check_is_lte_u128();

        let r0 = row.range_check_u16_r0();
        let r1 = row.range_check_u16_r1();
        let r2 = row.range_check_u16_r2();
        let r3 = row.range_check_u16_r3();
        let r4 = row.range_check_u16_r4();
        let r5 = row.range_check_u16_r5();
        let r6 = row.range_check_u16_r6();
        let r7 = row.range_check_u16_r7();

        let w1 = limb_weight::<F>(1);
        let w2 = limb_weight::<F>(2);
        let w3 = limb_weight::<F>(3);
        let w4 = limb_weight::<F>(4);
        let w5 = limb_weight::<F>(5);
        let w6 = limb_weight::<F>(6);
        let w7 = limb_weight::<F>(7);

        // low limbs of each width, r7 excluded
        let low_32 = r0;
        let low_48 = low_32 + r1 * w1;
        let low_64 = low_48 + r2 * w2;
        let low_80 = low_64 + r3 * w3;
        let low_96 = low_80 + r4 * w4;
        let low_112 = low_96 + r5 * w5;
        let low_128 = low_112 + r6 * w6;

        let recomposed = lte_u16 * r7
            + lte_u32 * (low_32 + r7 * w1)
            + lte_u48 * (low_48 + r7 * w2)
            + lte_u64 * (low_64 + r7 * w3)
            + lte_u80 * (low_80 + r7 * w4)
            + lte_u96 * (low_96 + r7 * w5)
            + lte_u112 * (low_112 + r7 * w6)
            + lte_u128 * (low_128 + r7 * w7);

        // bits covered by the lower limbs of the selected width
        let low_bits = lte_u32 * F::from(16u64)
            + lte_u48 * F::from(32u64)
            + lte_u64 * F::from(48u64)
            + lte_u80 * F::from(64u64)
            + lte_u96 * F::from(80u64)
            + lte_u112 * F::from(96u64)
            + lte_u128 * F::from(112u64);

        subrelation [3] = sel * (one - sel);
        subrelation [3] = lte_u16 * (one - lte_u16);
        subrelation [3] = lte_u32 * (one - lte_u32);
        subrelation [3] = lte_u48 * (one - lte_u48);
        subrelation [3] = lte_u64 * (one - lte_u64);
        subrelation [3] = lte_u80 * (one - lte_u80);
        subrelation [3] = lte_u96 * (one - lte_u96);
        subrelation [3] = lte_u112 * (one - lte_u112);
        subrelation [3] = lte_u128 * (one - lte_u128);
        subrelation [2] = (lte_u16 + lte_u32 + lte_u48 + lte_u64 + lte_u80 + lte_u96 + lte_u112
            + lte_u128)
            - sel;
        subrelation CHECK_RECOMPOSITION [4] = sel * (recomposed - row.range_check_value());
        subrelation [2] = row.range_check_dyn_rng_chk_bits()
            - (row.range_check_rng_chk_bits() - low_bits);
        subrelation [3] = sel
            * (row.range_check_dyn_diff() - (row.range_check_dyn_rng_chk_pow_2() - r7 - one));
        subrelation [2] = row.range_check_sel_lookup_0()
            - (lte_u32 + lte_u48 + lte_u64 + lte_u80 + lte_u96 + lte_u112 + lte_u128);
        subrelation [2] = row.range_check_sel_lookup_1()
            - (lte_u48 + lte_u64 + lte_u80 + lte_u96 + lte_u112 + lte_u128);
        subrelation [2] = row.range_check_sel_lookup_2()
            - (lte_u64 + lte_u80 + lte_u96 + lte_u112 + lte_u128);
        subrelation [2] = row.range_check_sel_lookup_3() - (lte_u80 + lte_u96 + lte_u112 + lte_u128);
        subrelation [2] = row.range_check_sel_lookup_4() - (lte_u96 + lte_u112 + lte_u128);
        subrelation [2] = row.range_check_sel_lookup_5() - (lte_u112 + lte_u128);
        subrelation [2] = row.range_check_sel_lookup_6() - lte_u128;
    }
}

/// Writes the range-check block of `row` for an active check of
/// `value < 2^bits`: selectors, limbs, lookup selectors and the dynamic top
/// limb bound. Columns outside the block are left as they are.
///
/// # Errors
///
/// Returns [`RelationError::RangeCheckOutOfBounds`] if `bits` exceeds 128 or
/// `value` needs more than `bits` bits.
pub fn write_range_check<F: PrimeField>(
    row: &mut FullRow<F>,
    value: u128,
    bits: u32,
) -> Result<(), RelationError> {
    let width_index = WIDTHS
        .iter()
        .position(|&w| bits <= w)
        .ok_or(RelationError::RangeCheckOutOfBounds { value, bits })?;
    if bits < 128 && value >> bits != 0 {
        return Err(RelationError::RangeCheckOutOfBounds { value, bits });
    }
    let width = WIDTHS[width_index];
    let top = value >> (width - 16);
    let dyn_bits = bits - (width - 16);

    row[Column::RangeCheckSelRngChk] = F::ONE;
    row[Column::RangeCheckValue] = F::from(value);
    row[Column::RangeCheckRngChkBits] = F::from(bits as u64);
    for (i, &selector) in WIDTH_SELECTORS.iter().enumerate() {
        row[selector] = F::from((i == width_index) as u64);
    }
    for (k, &limb) in LIMBS[..7].iter().enumerate() {
        let part = if k < width_index {
            (value >> (16 * k)) & 0xffff
        } else {
            0
        };
        row[limb] = F::from(part);
    }
    row[Column::RangeCheckU16R7] = F::from(top);
    for (k, &lookup) in LOOKUP_SELECTORS.iter().enumerate() {
        row[lookup] = F::from((k < width_index) as u64);
    }
    row[Column::RangeCheckDynRngChkBits] = F::from(dyn_bits as u64);
    row[Column::RangeCheckDynRngChkPow2] = F::from(1u128 << dyn_bits);
    row[Column::RangeCheckDynDiff] = F::from((1u128 << dyn_bits) - top - 1);
    Ok(())
}

/// A row whose only active block is a range check of `value < 2^bits`.
///
/// # Errors
///
/// See [`write_range_check`].
pub fn range_check_row<F: PrimeField>(
    value: u128,
    bits: u32,
) -> Result<FullRow<F>, RelationError> {
    let mut row = FullRow::default();
    write_range_check(&mut row, value, bits)?;
    Ok(row)
}

impl RangeCheck {
    /// First subrelation of the width-selector booleanity block.
    pub const FIRST_WIDTH_BOOLEAN: usize = 1;
    /// `Σ is_lte_uW = sel_rng_chk`.
    pub const WIDTH_PARTITION: usize = 9;
    /// `dyn_rng_chk_bits` matches the width selected.
    pub const DYN_BITS: usize = 11;
    /// `dyn_diff = 2^dyn_bits - r7 - 1`.
    pub const DYN_DIFF: usize = 12;
    /// Subrelation for `sel_lookup_0`; the others follow in order.
    pub const FIRST_LOOKUP_CASCADE: usize = 13;
}
