//! Inner-product-argument opening of a univariate polynomial committed over
//! Grumpkin, following the Bulletproofs folding scheme without blinding.
//!
//! The prover claims `v = p(x)` for a commitment `C = <a, G>` to the
//! coefficients `a` of `p`. Each round halves the vectors; the verifier
//! folds the generators only once, through the `s` vector.

use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{batch_inversion, Field, One, Zero};
use ark_grumpkin::{
    Affine as GrumpkinAffine, Fr as GrumpkinScalar, Projective as GrumpkinProjective,
};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use crate::transcripts::{ProofReader, Transcript};
use crate::utils::errors::{ProofVerifyError, SetupError};

pub(crate) const IPA_TRANSCRIPT_LABEL: &[u8] = b"ipa";
pub(crate) const MAIN_TRANSCRIPT_STATE_LABEL: &[u8] = b"main_transcript_state";
pub(crate) const IPA_CLAIM_LABEL: &str = "IPA:claim";
pub(crate) const IPA_COMMITMENT_LABEL: &[u8] = b"IPA:C";
pub(crate) const IPA_OPENING_POINT_LABEL: &[u8] = b"IPA:x";
pub(crate) const IPA_EVALUATION_LABEL: &[u8] = b"IPA:v";
pub(crate) const IPA_GENERATOR_CHALLENGE_LABEL: &str = "IPA:generator_challenge";
pub(crate) const IPA_L_LABEL: &str = "IPA:L";
pub(crate) const IPA_R_LABEL: &str = "IPA:R";
pub(crate) const IPA_ROUND_CHALLENGE_LABEL: &str = "IPA:round_challenge";
pub(crate) const IPA_A_0_LABEL: &str = "IPA:a_0";

/// Commitment key of the IPA: a power-of-two number of generators and the
/// auxiliary generator `U` that carries the inner product.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct IpaVerificationKey {
    generators: Vec<GrumpkinAffine>,
    u_generator: GrumpkinAffine,
}

impl IpaVerificationKey {
    pub fn new(
        generators: Vec<GrumpkinAffine>,
        u_generator: GrumpkinAffine,
    ) -> Result<Self, SetupError> {
        let key = IpaVerificationKey {
            generators,
            u_generator,
        };
        key.validate()?;
        Ok(key)
    }

    /// Deterministic generators derived from `label`.
    pub fn from_seed(size: usize, label: &[u8]) -> Result<Self, SetupError> {
        let mut rng = ChaCha20Rng::seed_from_u64(
            label
                .iter()
                .fold(0u64, |acc, &b| acc.wrapping_mul(31).wrapping_add(b as u64)),
        );
        let points: Vec<GrumpkinProjective> =
            (0..=size).map(|_| GrumpkinProjective::rand(&mut rng)).collect();
        let mut generators = GrumpkinProjective::normalize_batch(&points);
        let u_generator = generators.pop().unwrap_or_default();
        Self::new(generators, u_generator)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let size = self.generators.len();
        if size < 2 || !size.is_power_of_two() {
            return Err(SetupError::InvalidIpaKey(format!(
                "generator count {size} is not a power of two >= 2"
            )));
        }
        if self.u_generator.is_zero() || self.generators.iter().any(|g| g.is_zero()) {
            return Err(SetupError::InvalidIpaKey(
                "generators must not be the identity".to_string(),
            ));
        }
        Ok(())
    }

    pub fn generators(&self) -> &[GrumpkinAffine] {
        &self.generators
    }

    pub fn u_generator(&self) -> GrumpkinAffine {
        self.u_generator
    }

    pub fn num_rounds(&self) -> usize {
        self.generators.len().trailing_zeros() as usize
    }
}

/// The claim `p(opening_point) = evaluation` about the polynomial behind
/// `commitment`, carried inside the main proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct IpaClaim {
    pub commitment: GrumpkinAffine,
    pub opening_point: GrumpkinScalar,
    pub evaluation: GrumpkinScalar,
}

/// Fresh IPA transcript bound to the final state of the main transcript.
pub(crate) fn ipa_transcript<T: Transcript>(main_transcript_state: &[u8], claim: &IpaClaim) -> T {
    let mut transcript = T::new(IPA_TRANSCRIPT_LABEL);
    transcript.append_bytes(MAIN_TRANSCRIPT_STATE_LABEL, main_transcript_state);
    transcript.append_point(IPA_COMMITMENT_LABEL, &claim.commitment);
    transcript.append_scalar(IPA_OPENING_POINT_LABEL, &claim.opening_point);
    transcript.append_scalar(IPA_EVALUATION_LABEL, &claim.evaluation);
    transcript
}

/// Checks an IPA opening proof.
///
/// With `U' = ξ U`, the check is
/// `C + v U' + Σ_j (u_j² L_j + u_j⁻² R_j) = a_0 (<s, G> + b_0 U')`
/// where `s_i = Π_j u_j^{±1}` and `b_0 = Π_j (u_j⁻¹ + u_j x^{2^{k-1-j}})`.
#[tracing::instrument(skip_all, name = "IPA::verify")]
pub fn verify<T: Transcript>(
    key: &IpaVerificationKey,
    claim: &IpaClaim,
    reader: &mut ProofReader<'_, T>,
) -> Result<(), ProofVerifyError> {
    let generator_challenge: GrumpkinScalar = reader.challenge(IPA_GENERATOR_CHALLENGE_LABEL);
    if generator_challenge.is_zero() {
        return Err(ProofVerifyError::NonInvertible("IPA generator challenge"));
    }
    let u_prime = key.u_generator * generator_challenge;

    let num_rounds = key.num_rounds();
    let mut bases = Vec::with_capacity(2 * num_rounds);
    let mut round_challenges = Vec::with_capacity(num_rounds);
    for _ in 0..num_rounds {
        let l: GrumpkinAffine = reader.receive(IPA_L_LABEL)?;
        let r: GrumpkinAffine = reader.receive(IPA_R_LABEL)?;
        let u: GrumpkinScalar = reader.challenge(IPA_ROUND_CHALLENGE_LABEL);
        if u.is_zero() {
            return Err(ProofVerifyError::NonInvertible("IPA round challenge"));
        }
        bases.extend([l, r]);
        round_challenges.push(u);
    }
    let a_0: GrumpkinScalar = reader.receive(IPA_A_0_LABEL)?;

    let mut round_inverses = round_challenges.clone();
    batch_inversion(&mut round_inverses);

    let round_scalars: Vec<GrumpkinScalar> = round_challenges
        .iter()
        .zip(&round_inverses)
        .flat_map(|(u, u_inv)| [u.square(), u_inv.square()])
        .collect();
    let lr_sum = GrumpkinProjective::msm(&bases, &round_scalars)
        .map_err(ProofVerifyError::MsmLengthMismatch)?;
    let lhs = claim.commitment.into_group() + u_prime * claim.evaluation + lr_sum;

    let s = compute_s_vector(&round_challenges, &round_inverses);
    let folded_generator = GrumpkinProjective::msm(&key.generators, &s)
        .map_err(ProofVerifyError::MsmLengthMismatch)?;
    let b_0 = compute_b_zero(&round_challenges, &round_inverses, claim.opening_point);
    let rhs = (folded_generator + u_prime * b_0) * a_0;

    if lhs == rhs {
        Ok(())
    } else {
        Err(ProofVerifyError::IpaCheckFailed)
    }
}

/// `s_i = Π_j (bit_{k-1-j}(i) ? u_j : u_j⁻¹)`: round `j` folds the top
/// remaining bit of the generator index.
fn compute_s_vector(
    round_challenges: &[GrumpkinScalar],
    round_inverses: &[GrumpkinScalar],
) -> Vec<GrumpkinScalar> {
    let mut s = vec![GrumpkinScalar::one()];
    for (u, u_inv) in round_challenges.iter().zip(round_inverses) {
        s = s.iter().flat_map(|v| [*v * u_inv, *v * u]).collect();
    }
    s
}

fn compute_b_zero(
    round_challenges: &[GrumpkinScalar],
    round_inverses: &[GrumpkinScalar],
    opening_point: GrumpkinScalar,
) -> GrumpkinScalar {
    let num_rounds = round_challenges.len();
    let mut x_power = opening_point;
    let mut x_squares = Vec::with_capacity(num_rounds);
    for _ in 0..num_rounds {
        x_squares.push(x_power);
        x_power.square_in_place();
    }
    round_challenges
        .iter()
        .zip(round_inverses)
        .zip(x_squares.iter().rev())
        .map(|((u, u_inv), x_power)| *u_inv + *u * x_power)
        .product()
}
