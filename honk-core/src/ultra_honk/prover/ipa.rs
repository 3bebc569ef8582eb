use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_ff::{Field, One, Zero};
use ark_grumpkin::{Fr as GrumpkinScalar, Projective as GrumpkinProjective};
use ark_std::UniformRand;
use rand_core::RngCore;

use crate::poly::commitment::ipa::{
    ipa_transcript, IpaClaim, IpaVerificationKey, IPA_A_0_LABEL, IPA_GENERATOR_CHALLENGE_LABEL,
    IPA_L_LABEL, IPA_R_LABEL, IPA_ROUND_CHALLENGE_LABEL,
};
use crate::transcripts::{ProofWriter, Transcript};
use crate::ultra_honk::proof::IpaProof;

/// A polynomial over Grumpkin's scalar field and the point it is opened at.
#[derive(Clone, Debug)]
pub struct IpaWitness {
    pub coefficients: Vec<GrumpkinScalar>,
    pub opening_point: GrumpkinScalar,
}

fn inner_product(a: &[GrumpkinScalar], b: &[GrumpkinScalar]) -> GrumpkinScalar {
    a.iter().zip(b).map(|(a, b)| *a * b).sum()
}

fn msm(
    bases: &[ark_grumpkin::Affine],
    scalars: &[GrumpkinScalar],
) -> GrumpkinProjective {
    GrumpkinProjective::msm(bases, scalars).expect("bases and scalars have equal length")
}

impl IpaWitness {
    pub fn random<R: RngCore>(key: &IpaVerificationKey, rng: &mut R) -> Self {
        IpaWitness {
            coefficients: (0..key.generators().len())
                .map(|_| GrumpkinScalar::rand(rng))
                .collect(),
            opening_point: GrumpkinScalar::rand(rng),
        }
    }

    fn opening_vector(&self) -> Vec<GrumpkinScalar> {
        let mut power = GrumpkinScalar::one();
        self.coefficients
            .iter()
            .map(|_| {
                let current = power;
                power *= self.opening_point;
                current
            })
            .collect()
    }

    pub fn claim(&self, key: &IpaVerificationKey) -> IpaClaim {
        IpaClaim {
            commitment: msm(key.generators(), &self.coefficients).into_affine(),
            opening_point: self.opening_point,
            evaluation: inner_product(&self.coefficients, &self.opening_vector()),
        }
    }
}

/// Proves the claim of `witness`, bound to the main proof's final transcript state.
#[tracing::instrument(skip_all, name = "IPA::prove")]
pub fn prove_ipa<T: Transcript>(
    key: &IpaVerificationKey,
    witness: &IpaWitness,
    main_transcript_state: &[u8],
) -> IpaProof {
    assert_eq!(witness.coefficients.len(), key.generators().len());
    let claim = witness.claim(key);
    let mut writer = ProofWriter::new(ipa_transcript::<T>(main_transcript_state, &claim));

    let generator_challenge: GrumpkinScalar = writer.challenge(IPA_GENERATOR_CHALLENGE_LABEL);
    let u_prime = key.u_generator() * generator_challenge;

    let mut a = witness.coefficients.clone();
    let mut b = witness.opening_vector();
    let mut g = key.generators().to_vec();
    while a.len() > 1 {
        let half = a.len() / 2;
        let (a_lo, a_hi) = a.split_at(half);
        let (b_lo, b_hi) = b.split_at(half);
        let (g_lo, g_hi) = g.split_at(half);

        let l = msm(g_hi, a_lo) + u_prime * inner_product(a_lo, b_hi);
        let r = msm(g_lo, a_hi) + u_prime * inner_product(a_hi, b_lo);
        writer.send(IPA_L_LABEL, &l.into_affine());
        writer.send(IPA_R_LABEL, &r.into_affine());

        let u: GrumpkinScalar = writer.challenge(IPA_ROUND_CHALLENGE_LABEL);
        assert!(!u.is_zero());
        let u_inv = u.inverse().expect("non-zero challenge");

        let next_a: Vec<GrumpkinScalar> = a_lo
            .iter()
            .zip(a_hi)
            .map(|(lo, hi)| u * lo + u_inv * hi)
            .collect();
        let next_b: Vec<GrumpkinScalar> = b_lo
            .iter()
            .zip(b_hi)
            .map(|(lo, hi)| u_inv * lo + u * hi)
            .collect();
        let next_g: Vec<GrumpkinProjective> = g_lo
            .iter()
            .zip(g_hi)
            .map(|(lo, hi)| *lo * u_inv + *hi * u)
            .collect();
        a = next_a;
        b = next_b;
        g = GrumpkinProjective::normalize_batch(&next_g);
    }
    writer.send(IPA_A_0_LABEL, &a[0]);

    let (bytes, _) = writer.finish();
    IpaProof::new(bytes)
}
