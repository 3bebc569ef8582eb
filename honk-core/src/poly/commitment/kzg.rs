use ark_bn254::{Bn254, Fr, G1Affine, G1Projective};
use ark_ec::pairing::Pairing;
use ark_ec::VariableBaseMSM;
use ark_ff::One;

use super::srs::KzgVerifierKey;
use crate::utils::errors::ProofVerifyError;

/// The two G1 inputs of the final KZG check `e(P0, [1]_2) · e(P1, [τ]_2) = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingPoints {
    pub p0: G1Affine,
    pub p1: G1Affine,
}

impl PairingPoints {
    #[tracing::instrument(skip_all, name = "KZG::pairing_check")]
    pub fn check(&self, key: &KzgVerifierKey) -> bool {
        Bn254::multi_pairing([self.p0, self.p1], [key.g2, key.tau_g2])
            .0
            .is_one()
    }
}

pub fn msm(bases: &[G1Affine], scalars: &[Fr]) -> Result<G1Projective, ProofVerifyError> {
    G1Projective::msm(bases, scalars).map_err(ProofVerifyError::MsmLengthMismatch)
}
