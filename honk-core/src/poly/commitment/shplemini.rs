//! Gemini + Shplonk + KZG batch opening, reduced to a single pairing check.
//!
//! All multilinear claims at the sumcheck point `u` are batched with powers
//! of `rho` into one claim `(F + G↺, v)`. Gemini folds that claim into `log_n`
//! univariate openings `A_l(±r^{2^l})`, Shplonk batches them with powers of
//! `nu` into one quotient `Q`, and KZG opens the result at `z`.

use ark_bn254::{Fr, G1Affine};
use ark_ec::CurveGroup;
use ark_ff::{batch_inversion, Field, One, Zero};

use super::kzg::{msm, PairingPoints};
use super::srs::KzgVerifierKey;
use crate::transcripts::{ProofReader, Transcript};
use crate::utils::errors::ProofVerifyError;

pub(crate) const RHO_LABEL: &str = "rho";
pub(crate) const GEMINI_FOLD_COMMITMENT_LABEL: &str = "Gemini:FOLD";
pub(crate) const GEMINI_R_LABEL: &str = "Gemini:r";
pub(crate) const GEMINI_FOLD_EVALUATION_LABEL: &str = "Gemini:a";
pub(crate) const SHPLONK_NU_LABEL: &str = "Shplonk:nu";
pub(crate) const SHPLONK_Q_LABEL: &str = "Shplonk:Q";
pub(crate) const SHPLONK_Z_LABEL: &str = "Shplonk:z";
pub(crate) const KZG_W_LABEL: &str = "KZG:W";

/// Multilinear opening claims at the sumcheck point. Shifted evaluations are
/// claims about the polynomials behind `to_be_shifted_commitments`, shifted
/// down by one row.
#[derive(Clone, Debug, Default)]
pub struct BatchOpeningClaim {
    pub unshifted_commitments: Vec<G1Affine>,
    pub unshifted_evaluations: Vec<Fr>,
    pub to_be_shifted_commitments: Vec<G1Affine>,
    pub shifted_evaluations: Vec<Fr>,
}

/// Reads the opening proof and reduces every claim to the two pairing inputs.
#[tracing::instrument(skip_all, name = "Shplemini::verify")]
pub fn verify<T: Transcript>(
    claim: &BatchOpeningClaim,
    challenge_point: &[Fr],
    key: &KzgVerifierKey,
    reader: &mut ProofReader<'_, T>,
) -> Result<PairingPoints, ProofVerifyError> {
    let log_n = challenge_point.len();
    debug_assert!(log_n >= 1);
    debug_assert_eq!(
        claim.unshifted_commitments.len(),
        claim.unshifted_evaluations.len()
    );
    debug_assert_eq!(
        claim.to_be_shifted_commitments.len(),
        claim.shifted_evaluations.len()
    );

    let rho: Fr = reader.challenge(RHO_LABEL);
    let num_claims = claim.unshifted_evaluations.len() + claim.shifted_evaluations.len();
    let mut rho_powers = Vec::with_capacity(num_claims);
    let mut rho_power = Fr::one();
    for _ in 0..num_claims {
        rho_powers.push(rho_power);
        rho_power *= rho;
    }
    let batched_evaluation: Fr = claim
        .unshifted_evaluations
        .iter()
        .chain(&claim.shifted_evaluations)
        .zip(&rho_powers)
        .map(|(eval, rho_power)| *eval * rho_power)
        .sum();

    let fold_commitments: Vec<G1Affine> =
        reader.receive_many(GEMINI_FOLD_COMMITMENT_LABEL, log_n - 1)?;
    let r: Fr = reader.challenge(GEMINI_R_LABEL);
    let fold_neg_evaluations: Vec<Fr> =
        reader.receive_many(GEMINI_FOLD_EVALUATION_LABEL, log_n)?;
    let nu: Fr = reader.challenge(SHPLONK_NU_LABEL);
    let quotient: G1Affine = reader.receive(SHPLONK_Q_LABEL)?;
    let z: Fr = reader.challenge(SHPLONK_Z_LABEL);
    let kzg_witness: G1Affine = reader.receive(KZG_W_LABEL)?;

    let r_squares = squares(r, log_n);
    let fold_pos_evaluations = compute_fold_pos_evaluations(
        challenge_point,
        batched_evaluation,
        &fold_neg_evaluations,
        &r_squares,
    )?;

    // [1/(z - r_0), 1/(z + r_0), 1/(z - r_1), ..., 1/r]
    let mut inverses: Vec<Fr> = r_squares
        .iter()
        .flat_map(|r_l| [z - r_l, z + r_l])
        .chain([r])
        .collect();
    if inverses.iter().any(Zero::is_zero) {
        return Err(ProofVerifyError::NonInvertible("Shplonk denominators"));
    }
    batch_inversion(&mut inverses);
    let pos_inverse = |l: usize| inverses[2 * l];
    let neg_inverse = |l: usize| inverses[2 * l + 1];
    let r_inverse = inverses[2 * log_n];

    // A_0(r) = F(r) + G(r)/r and A_0(-r) = F(-r) - G(-r)/r, opened with ν^0 and ν^1
    let unshifted_scalar = pos_inverse(0) + nu * neg_inverse(0);
    let shifted_scalar = r_inverse * (pos_inverse(0) - nu * neg_inverse(0));

    let num_commitments = num_claims + log_n + 2;
    let mut bases = Vec::with_capacity(num_commitments);
    let mut scalars = Vec::with_capacity(num_commitments);

    let (unshifted_rho, shifted_rho) = rho_powers.split_at(claim.unshifted_commitments.len());
    for (commitment, rho_power) in claim.unshifted_commitments.iter().zip(unshifted_rho) {
        bases.push(*commitment);
        scalars.push(unshifted_scalar * rho_power);
    }
    for (commitment, rho_power) in claim.to_be_shifted_commitments.iter().zip(shifted_rho) {
        bases.push(*commitment);
        scalars.push(shifted_scalar * rho_power);
    }

    let mut constant_term = fold_pos_evaluations[0] * pos_inverse(0)
        + nu * fold_neg_evaluations[0] * neg_inverse(0);
    let nu_squared = nu.square();
    let mut nu_power = nu_squared;
    for l in 1..log_n {
        let pos_scaling = nu_power * pos_inverse(l);
        let neg_scaling = nu_power * nu * neg_inverse(l);
        bases.push(fold_commitments[l - 1]);
        scalars.push(pos_scaling + neg_scaling);
        constant_term +=
            pos_scaling * fold_pos_evaluations[l] + neg_scaling * fold_neg_evaluations[l];
        nu_power *= nu_squared;
    }

    // P0 = Σ s_i C_i - c·[1]_1 - [Q] + z·[W]
    bases.push(key.g1);
    scalars.push(-constant_term);
    bases.push(quotient);
    scalars.push(-Fr::one());
    bases.push(kzg_witness);
    scalars.push(z);

    let p0 = msm(&bases, &scalars)?.into_affine();
    Ok(PairingPoints {
        p0,
        p1: -kzg_witness,
    })
}

/// `[r, r^2, r^4, ..., r^{2^{n-1}}]`
pub(crate) fn squares(r: Fr, n: usize) -> Vec<Fr> {
    let mut squares = Vec::with_capacity(n);
    let mut current = r;
    for _ in 0..n {
        squares.push(current);
        current.square_in_place();
    }
    squares
}

/// Recovers `A_l(r^{2^l})` for every fold from the negative evaluations,
/// walking down from `A_{log_n} = v`:
///
/// `A_l(r_l) = (2 r_l A_{l+1}(r_{l+1}) - A_l(-r_l) (r_l (1 - u_l) - u_l)) / (r_l (1 - u_l) + u_l)`
fn compute_fold_pos_evaluations(
    challenge_point: &[Fr],
    batched_evaluation: Fr,
    fold_neg_evaluations: &[Fr],
    r_squares: &[Fr],
) -> Result<Vec<Fr>, ProofVerifyError> {
    let log_n = challenge_point.len();
    let mut fold_pos_evaluations = vec![Fr::zero(); log_n];
    let mut eval_pos = batched_evaluation;
    for l in (0..log_n).rev() {
        let r_l = r_squares[l];
        let u_l = challenge_point[l];
        let eval_neg = fold_neg_evaluations[l];
        let denominator = r_l * (Fr::one() - u_l) + u_l;
        let inverse = denominator
            .inverse()
            .ok_or(ProofVerifyError::NonInvertible("Gemini fold evaluation"))?;
        eval_pos = (r_l * (eval_pos + eval_pos) - eval_neg * (r_l * (Fr::one() - u_l) - u_l))
            * inverse;
        fold_pos_evaluations[l] = eval_pos;
    }
    Ok(fold_pos_evaluations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::unipoly::UniPoly;
    use ark_std::{test_rng, UniformRand};

    // Folds coefficients the way the prover does: A_{l+1}[j] = (1 - u) A_l[2j] + u A_l[2j+1].
    fn fold(coeffs: &[Fr], u: Fr) -> Vec<Fr> {
        coeffs
            .chunks(2)
            .map(|pair| (Fr::one() - u) * pair[0] + u * pair[1])
            .collect()
    }

    #[test]
    fn positive_evaluations_follow_from_negative_ones() {
        let mut rng = test_rng();
        let log_n = 4;
        let coeffs: Vec<Fr> = (0..1 << log_n).map(|_| Fr::rand(&mut rng)).collect();
        let u: Vec<Fr> = (0..log_n).map(|_| Fr::rand(&mut rng)).collect();
        let r = Fr::rand(&mut rng);

        let mut folds = vec![coeffs];
        for u_l in &u {
            let next = fold(folds.last().unwrap(), *u_l);
            folds.push(next);
        }
        let v = folds[log_n][0];
        let r_squares = squares(r, log_n);
        let negative: Vec<Fr> = (0..log_n)
            .map(|l| UniPoly::from_coeff(folds[l].clone()).evaluate(&-r_squares[l]))
            .collect();
        let positive = compute_fold_pos_evaluations(&u, v, &negative, &r_squares).unwrap();
        for l in 0..log_n {
            assert_eq!(
                positive[l],
                UniPoly::from_coeff(folds[l].clone()).evaluate(&r_squares[l])
            );
        }
    }

    #[test]
    fn squares_of_challenge() {
        let r = Fr::from(3u64);
        assert_eq!(
            squares(r, 3),
            vec![Fr::from(3u64), Fr::from(9u64), Fr::from(81u64)]
        );
    }
}
