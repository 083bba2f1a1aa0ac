//! ALU addition.
//!
//! `alu_sel_op_add` flags rows performing an addition; on every row the
//! output register must equal the field sum of the two inputs.

use crate::define_relation;

define_relation! {
    /// Addition relation over `alu_ia + alu_ib = alu_ic`.
    ///
    /// The sum identity is not gated by the selector, so rows that do not
    /// add must still satisfy it (zero-filled rows do).
    pub struct Alu = "alu";
    fn accumulate<F>(row, params, one) {
        let sel = row.alu_sel_op_add();
        subrelation SEL_ADD_BINARY [3] = sel * (one - sel);
        subrelation ALU_ADD [2] = (row.alu_ia() + row.alu_ib()) - row.alu_ic();
    }
}

define_relation! {
    /// [`Alu`] with the sum identity enforced only where `alu_sel_op_add` is
    /// set, for traces that share the ALU registers between operations.
    pub struct GatedAlu = "alu_gated";
    fn accumulate<F>(row, params, one) {
        let sel = row.alu_sel_op_add();
        subrelation SEL_ADD_BINARY [3] = sel * (one - sel);
        subrelation ALU_ADD [3] = sel * ((row.alu_ia() + row.alu_ib()) - row.alu_ic());
    }
}
