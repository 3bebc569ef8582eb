use ark_ff::Field;

use super::{Relation, RelationParameters};
use crate::flavor::entities::AllEntities;

/// Standard width-4 arithmetic gate:
/// `q_arith (q_m w_l w_r + q_l w_l + q_r w_r + q_o w_o + q_4 w_4 + q_c) = 0`.
pub struct ArithmeticRelation;

impl<F: Field> Relation<F> for ArithmeticRelation {
    const NAME: &'static str = "Arithmetic";
    const SUBRELATION_PARTIAL_LENGTHS: &'static [usize] = &[5];

    fn accumulate(evals: &AllEntities<F>, _params: &RelationParameters<F>, out: &mut [F]) {
        let gate = evals.q_m * evals.w_l * evals.w_r
            + evals.q_l * evals.w_l
            + evals.q_r * evals.w_r
            + evals.q_o * evals.w_o
            + evals.q_4 * evals.w_4
            + evals.q_c;
        out[0] = evals.q_arith * gate;
    }
}
