use ark_ff::Field;

use super::{Relation, RelationParameters};
use crate::flavor::entities::AllEntities;

/// Sorted-list range check: with `q_delta_range` on, each consecutive wire
/// difference `w_r - w_l, w_o - w_r, w_4 - w_o, w_l_shift - w_4` lies in
/// `{0, 1, 2, 3}`.
pub struct DeltaRangeRelation;

impl<F: Field> Relation<F> for DeltaRangeRelation {
    const NAME: &'static str = "DeltaRange";
    const SUBRELATION_PARTIAL_LENGTHS: &'static [usize] = &[6, 6, 6, 6];

    fn accumulate(evals: &AllEntities<F>, _params: &RelationParameters<F>, out: &mut [F]) {
        let deltas = [
            evals.w_r - evals.w_l,
            evals.w_o - evals.w_r,
            evals.w_4 - evals.w_o,
            evals.w_l_shift - evals.w_4,
        ];
        let one = F::one();
        let two = one + one;
        let three = two + one;
        for (slot, delta) in out.iter_mut().zip(deltas) {
            *slot = evals.q_delta_range * delta * (delta - one) * (delta - two) * (delta - three);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::{One, Zero};

    #[test]
    fn steps_up_to_three() {
        let mut evals = AllEntities::<Fr> {
            q_delta_range: Fr::one(),
            w_l: Fr::from(6u64),
            w_r: Fr::from(7u64),
            w_o: Fr::from(9u64),
            w_4: Fr::from(12u64),
            w_l_shift: Fr::from(12u64),
            ..Default::default()
        };
        let mut out = [Fr::zero(); 4];
        DeltaRangeRelation::accumulate(&evals, &RelationParameters::default(), &mut out);
        assert!(out.iter().all(Zero::is_zero));

        evals.w_l_shift = Fr::from(16u64);
        DeltaRangeRelation::accumulate(&evals, &RelationParameters::default(), &mut out);
        assert!(!out[3].is_zero());
        assert!(out[..3].iter().all(Zero::is_zero));
    }
}
