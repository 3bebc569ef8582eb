use ark_bn254::Fr;
use ark_ff::{Field, One};

use super::ProverSrs;
use crate::poly::commitment::shplemini::{
    squares, GEMINI_FOLD_COMMITMENT_LABEL, GEMINI_FOLD_EVALUATION_LABEL, GEMINI_R_LABEL,
    KZG_W_LABEL, RHO_LABEL, SHPLONK_NU_LABEL, SHPLONK_Q_LABEL, SHPLONK_Z_LABEL,
};
use crate::poly::unipoly::UniPoly;
use crate::transcripts::{ProofWriter, Transcript};

/// Opens `unshifted` and the shifts of `to_be_shifted` at `challenge_point`.
/// Both lists are tables over the hypercube, read as univariate coefficients.
#[tracing::instrument(skip_all, name = "Shplemini::prove")]
pub(super) fn prove<T: Transcript>(
    writer: &mut ProofWriter<T>,
    srs: &ProverSrs,
    unshifted: &[&Vec<Fr>],
    to_be_shifted: &[&Vec<Fr>],
    challenge_point: &[Fr],
) {
    let log_n = challenge_point.len();
    let n = 1 << log_n;

    let rho: Fr = writer.challenge(RHO_LABEL);
    let mut batched_unshifted = UniPoly::zero(n);
    let mut batched_to_be_shifted = UniPoly::zero(n);
    let mut rho_power = Fr::one();
    for poly in unshifted {
        batched_unshifted.add_scaled(&UniPoly::from_coeff(poly.to_vec()), rho_power);
        rho_power *= rho;
    }
    for poly in to_be_shifted {
        batched_to_be_shifted.add_scaled(&UniPoly::from_coeff(poly.to_vec()), rho_power);
        rho_power *= rho;
    }

    // A_0 = F + G/X, exact because every to-be-shifted table is zero on row 0
    let mut a_0 = batched_unshifted.clone();
    let shifted = UniPoly::from_coeff(batched_to_be_shifted.coeffs[1..].to_vec());
    a_0.add_scaled(&shifted, Fr::one());

    let mut folds = vec![a_0];
    for u_l in &challenge_point[..log_n - 1] {
        let previous = folds.last().expect("at least A_0");
        let next: Vec<Fr> = previous
            .coeffs
            .chunks(2)
            .map(|pair| (Fr::one() - u_l) * pair[0] + *u_l * pair[1])
            .collect();
        folds.push(UniPoly::from_coeff(next));
    }
    for fold in &folds[1..] {
        writer.send(GEMINI_FOLD_COMMITMENT_LABEL, &srs.commit(&fold.coeffs));
    }

    let r: Fr = writer.challenge(GEMINI_R_LABEL);
    let r_squares = squares(r, log_n);
    let fold_neg_evaluations: Vec<Fr> = folds
        .iter()
        .zip(&r_squares)
        .map(|(fold, r_l)| fold.evaluate(&-*r_l))
        .collect();
    writer.send_many(GEMINI_FOLD_EVALUATION_LABEL, &fold_neg_evaluations);
    let nu: Fr = writer.challenge(SHPLONK_NU_LABEL);

    // Claims in the order they are weighted by powers of ν.
    let r_inverse = r.inverse().expect("Gemini challenge is non-zero");
    let mut positive = batched_unshifted.clone();
    positive.add_scaled(&batched_to_be_shifted, r_inverse);
    let mut negative = batched_unshifted;
    negative.add_scaled(&batched_to_be_shifted, -r_inverse);
    let mut claims = vec![(positive, r), (negative, -r)];
    for (fold, r_l) in folds.iter().zip(&r_squares).skip(1) {
        claims.push((fold.clone(), *r_l));
        claims.push((fold.clone(), -*r_l));
    }

    // Q = Σ ν^k (P_k - v_k) / (X - z_k)
    let mut quotient = UniPoly::zero(n);
    let mut nu_power = Fr::one();
    for (poly, point) in &claims {
        let (q, _) = poly.divide_by_linear(*point);
        quotient.add_scaled(&q, nu_power);
        nu_power *= nu;
    }
    writer.send(SHPLONK_Q_LABEL, &srs.commit(&quotient.coeffs));

    let z: Fr = writer.challenge(SHPLONK_Z_LABEL);
    // L = Σ ν^k (P_k - v_k) / (z - z_k) - Q vanishes at z
    let mut linearized = UniPoly::zero(n);
    nu_power = Fr::one();
    for (poly, point) in &claims {
        let scaling = nu_power * (z - point).inverse().expect("Shplonk challenge is fresh");
        linearized.add_scaled(poly, scaling);
        linearized.coeffs[0] -= scaling * poly.evaluate(point);
        nu_power *= nu;
    }
    linearized.add_scaled(&quotient, -Fr::one());
    let (witness, remainder) = linearized.divide_by_linear(z);
    debug_assert!(remainder == Fr::from(0u64));
    writer.send(KZG_W_LABEL, &srs.commit(&witness.coeffs));
}
