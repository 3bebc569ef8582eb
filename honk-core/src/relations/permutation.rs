use ark_ff::Field;

use super::{Relation, RelationParameters};
use crate::flavor::entities::AllEntities;

/// Grand-product copy constraint.
///
/// Subrelation 0 enforces
/// `(z + L_first) Π_k (w_k + β id_k + γ) = (z_shift + L_last δ) Π_k (w_k + β σ_k + γ)`,
/// subrelation 1 enforces `L_last · z_shift = 0`.
pub struct PermutationRelation;

impl<F: Field> Relation<F> for PermutationRelation {
    const NAME: &'static str = "Permutation";
    const SUBRELATION_PARTIAL_LENGTHS: &'static [usize] = &[6, 3];

    fn accumulate(evals: &AllEntities<F>, params: &RelationParameters<F>, out: &mut [F]) {
        let RelationParameters {
            beta,
            gamma,
            public_input_delta,
        } = *params;
        let wires = [evals.w_l, evals.w_r, evals.w_o, evals.w_4];
        let ids = [evals.id_1, evals.id_2, evals.id_3, evals.id_4];
        let sigmas = [evals.sigma_1, evals.sigma_2, evals.sigma_3, evals.sigma_4];

        let numerator: F = wires
            .iter()
            .zip(&ids)
            .map(|(w, id)| *w + beta * id + gamma)
            .product();
        let denominator: F = wires
            .iter()
            .zip(&sigmas)
            .map(|(w, sigma)| *w + beta * sigma + gamma)
            .product();

        out[0] = (evals.z_perm + evals.lagrange_first) * numerator
            - (evals.z_perm_shift + evals.lagrange_last * public_input_delta) * denominator;
        out[1] = evals.lagrange_last * evals.z_perm_shift;
    }
}

/// `δ = Π_i (γ + x_i + β (n + offset + i)) / (γ + x_i - β (offset + i + 1))`
///
/// Accounts for the public input values in the grand product without the
/// verifier ever touching the witness. Returns `None` if the denominator
/// vanishes.
pub fn compute_public_input_delta<F: Field>(
    public_inputs: &[F],
    beta: F,
    gamma: F,
    circuit_size: u64,
    offset: u64,
) -> Option<F> {
    let mut numerator = F::one();
    let mut denominator = F::one();
    let mut numerator_acc = gamma + beta * F::from(circuit_size + offset);
    let mut denominator_acc = gamma - beta * F::from(offset + 1);
    for x in public_inputs {
        numerator *= numerator_acc + x;
        denominator *= denominator_acc + x;
        numerator_acc += beta;
        denominator_acc -= beta;
    }
    denominator.inverse().map(|inverse| numerator * inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::{One, Zero};
    use ark_std::{test_rng, UniformRand};

    #[test]
    fn public_input_delta_closed_form() {
        let mut rng = test_rng();
        let beta = Fr::rand(&mut rng);
        let gamma = Fr::rand(&mut rng);
        let inputs = [Fr::from(7u64), Fr::from(2u64)];
        let n = 16u64;
        let offset = 1u64;

        let mut expected = Fr::one();
        for (i, x) in inputs.iter().enumerate() {
            let i = i as u64;
            let num = gamma + x + beta * Fr::from(n + offset + i);
            let den = gamma + x - beta * Fr::from(offset + i + 1);
            expected *= num / den;
        }
        assert_eq!(
            compute_public_input_delta(&inputs, beta, gamma, n, offset),
            Some(expected)
        );
        assert_eq!(
            compute_public_input_delta(&[], beta, gamma, n, offset),
            Some(Fr::one())
        );
    }

    #[test]
    fn zero_denominator() {
        // γ + x_0 - β (offset + 1) = 0
        let beta = Fr::from(3u64);
        let gamma = Fr::from(6u64);
        let x = Fr::zero();
        assert_eq!(compute_public_input_delta(&[x], beta, gamma, 16, 1), None);
    }

    #[test]
    fn last_row_requires_zero_shift() {
        let evals = AllEntities::<Fr> {
            lagrange_last: Fr::one(),
            z_perm_shift: Fr::from(4u64),
            ..Default::default()
        };
        let mut out = [Fr::zero(); 2];
        PermutationRelation::accumulate(&evals, &RelationParameters::default(), &mut out);
        assert_eq!(out[1], Fr::from(4u64));
    }
}
