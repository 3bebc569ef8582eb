use crate::flavor::entities::NUM_ALL_ENTITIES;
use crate::flavor::Flavor;
use crate::utils::errors::SetupError;

use super::verification_key::VerificationKey;

/// Every proof element (scalar, BN254 G1 point or Grumpkin point) takes 32
/// bytes in compressed form.
pub const PROOF_ELEMENT_SIZE: usize = 32;

/// Serialized main proof. The verifier interprets it only through the
/// transcript replay, so it stays opaque bytes until then.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HonkProof(Vec<u8>);

/// Serialized auxiliary IPA proof; empty when the flavor needs none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IpaProof(Vec<u8>);

impl HonkProof {
    pub fn new(bytes: Vec<u8>) -> Self {
        HonkProof(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of elements a well-formed proof of flavor `F` carries for `vk`.
    /// Fails if `vk` itself is invalid.
    pub fn expected_num_elements<F: Flavor>(vk: &VerificationKey) -> Result<usize, SetupError> {
        vk.validate()?;
        let log_n = vk.log_n();
        let ipa_claim = if F::HAS_IPA_ACCUMULATOR { 3 } else { 0 };
        // libra commitment and sum up front, evaluation after sumcheck
        let libra = if F::HAS_ZK { 3 } else { 0 };
        // log_n >= 1 for a valid key
        Ok(vk.num_public_inputs as usize
            + ipa_claim
            + 5
            + libra
            + log_n * F::BATCHED_RELATION_PARTIAL_LENGTH
            + NUM_ALL_ENTITIES
            + (log_n - 1)
            + log_n
            + 2)
    }

    pub fn expected_size<F: Flavor>(vk: &VerificationKey) -> Result<usize, SetupError> {
        Ok(Self::expected_num_elements::<F>(vk)? * PROOF_ELEMENT_SIZE)
    }
}

impl IpaProof {
    pub fn new(bytes: Vec<u8>) -> Self {
        IpaProof(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for HonkProof {
    fn from(bytes: Vec<u8>) -> Self {
        HonkProof(bytes)
    }
}

impl From<Vec<u8>> for IpaProof {
    fn from(bytes: Vec<u8>) -> Self {
        IpaProof(bytes)
    }
}
