//! Polynomial identities checked row by row by sumcheck.
//!
//! Each relation contributes one or more subrelations. The verifier
//! evaluates them once, at the sumcheck challenge point, and batches them
//! with powers of `alpha`.

mod arithmetic;
mod delta_range;
mod permutation;

use ark_ff::Field;

pub use arithmetic::ArithmeticRelation;
pub use delta_range::DeltaRangeRelation;
pub use permutation::{compute_public_input_delta, PermutationRelation};

use crate::flavor::entities::AllEntities;

/// Challenges and derived values shared by every relation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelationParameters<F> {
    pub beta: F,
    pub gamma: F,
    pub public_input_delta: F,
}

pub trait Relation<F: Field> {
    const NAME: &'static str;

    /// Partial length (degree + 1) of each subrelation. The extra degree from
    /// the gate separator is added once, in the flavor's batched length.
    const SUBRELATION_PARTIAL_LENGTHS: &'static [usize];

    /// Writes the value of each subrelation at `evals` into `out`, which has
    /// exactly `SUBRELATION_PARTIAL_LENGTHS.len()` slots.
    fn accumulate(evals: &AllEntities<F>, params: &RelationParameters<F>, out: &mut [F]);
}

/// A fixed list of relations, implemented for tuples.
pub trait RelationSet<F: Field> {
    const NUM_SUBRELATIONS: usize;
    const MAX_PARTIAL_LENGTH: usize;

    fn accumulate(evals: &AllEntities<F>, params: &RelationParameters<F>, out: &mut [F]);

    /// `Σ_k α^k R_k(evals)` over every subrelation of the set.
    fn evaluate_batched(evals: &AllEntities<F>, params: &RelationParameters<F>, alpha: F) -> F {
        let mut subrelations = vec![F::zero(); Self::NUM_SUBRELATIONS];
        Self::accumulate(evals, params, &mut subrelations);
        subrelations
            .iter()
            .rev()
            .fold(F::zero(), |acc, value| acc * alpha + value)
    }
}

const fn max_length(lengths: &[usize], floor: usize) -> usize {
    let mut max = floor;
    let mut i = 0;
    while i < lengths.len() {
        if lengths[i] > max {
            max = lengths[i];
        }
        i += 1;
    }
    max
}

macro_rules! impl_relation_set {
    ($($relation:ident),+) => {
        impl<F: Field, $($relation: Relation<F>),+> RelationSet<F> for ($($relation,)+) {
            const NUM_SUBRELATIONS: usize = 0 $(+ $relation::SUBRELATION_PARTIAL_LENGTHS.len())+;
            const MAX_PARTIAL_LENGTH: usize = {
                let mut max = 0;
                $(max = max_length($relation::SUBRELATION_PARTIAL_LENGTHS, max);)+
                max
            };

            fn accumulate(evals: &AllEntities<F>, params: &RelationParameters<F>, out: &mut [F]) {
                let mut offset = 0;
                $(
                    let len = $relation::SUBRELATION_PARTIAL_LENGTHS.len();
                    $relation::accumulate(evals, params, &mut out[offset..offset + len]);
                    offset += len;
                )+
                debug_assert_eq!(offset, out.len());
            }
        }
    };
}

impl_relation_set!(A, B);
impl_relation_set!(A, B, C);

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;

    type UltraSet = (ArithmeticRelation, PermutationRelation);
    type MegaSet = (ArithmeticRelation, PermutationRelation, DeltaRangeRelation);

    #[test]
    fn set_shapes() {
        assert_eq!(<UltraSet as RelationSet<Fr>>::NUM_SUBRELATIONS, 3);
        assert_eq!(<UltraSet as RelationSet<Fr>>::MAX_PARTIAL_LENGTH, 6);
        assert_eq!(<MegaSet as RelationSet<Fr>>::NUM_SUBRELATIONS, 7);
        assert_eq!(<MegaSet as RelationSet<Fr>>::MAX_PARTIAL_LENGTH, 6);
    }

    #[test]
    fn batching_uses_alpha_powers() {
        let evals = AllEntities::<Fr> {
            q_arith: Fr::from(1u64),
            q_c: Fr::from(5u64),
            lagrange_last: Fr::from(1u64),
            z_perm_shift: Fr::from(3u64),
            ..Default::default()
        };
        let params = RelationParameters::default();
        let alpha = Fr::from(10u64);
        let mut out = vec![Fr::from(0u64); 3];
        <UltraSet as RelationSet<Fr>>::accumulate(&evals, &params, &mut out);
        let expected = out[0] + alpha * out[1] + alpha * alpha * out[2];
        assert_eq!(
            <UltraSet as RelationSet<Fr>>::evaluate_batched(&evals, &params, alpha),
            expected
        );
        assert_eq!(out[0], Fr::from(5u64));
        assert_eq!(out[2], Fr::from(3u64));
    }
}
