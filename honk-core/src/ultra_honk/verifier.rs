use std::marker::PhantomData;
use std::sync::Arc;

use rayon::prelude::*;

use super::decider_verification_key::DeciderVerificationKey;
use super::decider_verifier::DeciderVerifier;
use super::proof::{HonkProof, IpaProof};
use super::verification_key::VerificationKey;
#[cfg(feature = "starknet")]
use crate::flavor::UltraStarknetFlavor;
use crate::flavor::{
    Flavor, MegaFlavor, MegaZKFlavor, UltraFlavor, UltraKeccakFlavor, UltraRollupFlavor,
};
use crate::poly::commitment::ipa::{self, IpaVerificationKey};
use crate::transcripts::{ProofReader, Transcript};
use crate::utils::errors::{ProofVerifyError, SetupError};

/// The stage that runs after the decider accepted.
#[derive(Clone, Debug)]
pub enum AuxiliaryVerifier {
    None,
    Ipa(Arc<IpaVerificationKey>),
}

/// Verifies Honk proofs of flavor `F` against one verification key.
///
/// Every call replays its own transcript, so a verifier can be shared across
/// threads and reused for any number of proofs.
pub struct HonkVerifier<F: Flavor> {
    key: Arc<DeciderVerificationKey>,
    auxiliary: AuxiliaryVerifier,
    _flavor: PhantomData<F>,
}

pub type UltraVerifier = HonkVerifier<UltraFlavor>;
pub type UltraKeccakVerifier = HonkVerifier<UltraKeccakFlavor>;
pub type UltraRollupVerifier = HonkVerifier<UltraRollupFlavor>;
pub type MegaVerifier = HonkVerifier<MegaFlavor>;
pub type MegaZKVerifier = HonkVerifier<MegaZKFlavor>;
#[cfg(feature = "starknet")]
pub type UltraStarknetVerifier = HonkVerifier<UltraStarknetFlavor>;

impl<F: Flavor> HonkVerifier<F> {
    pub fn new(verification_key: Arc<VerificationKey>) -> Result<Self, SetupError> {
        let key = DeciderVerificationKey::new(verification_key)?;
        Self::from_decider_key(Arc::new(key), AuxiliaryVerifier::None)
    }

    pub fn with_ipa(
        verification_key: Arc<VerificationKey>,
        ipa_key: Arc<IpaVerificationKey>,
    ) -> Result<Self, SetupError> {
        let key = DeciderVerificationKey::new(verification_key)?;
        Self::from_decider_key(Arc::new(key), AuxiliaryVerifier::Ipa(ipa_key))
    }

    /// Builds a verifier over an existing decider key, e.g. to share one key
    /// between verifiers with different auxiliary stages.
    pub fn from_decider_key(
        key: Arc<DeciderVerificationKey>,
        auxiliary: AuxiliaryVerifier,
    ) -> Result<Self, SetupError> {
        if let AuxiliaryVerifier::Ipa(ipa_key) = &auxiliary {
            if !F::HAS_IPA_ACCUMULATOR {
                return Err(SetupError::UnexpectedIpaKey(F::NAME));
            }
            ipa_key.validate()?;
        }
        Ok(HonkVerifier {
            key,
            auxiliary,
            _flavor: PhantomData,
        })
    }

    pub fn decider_key(&self) -> &Arc<DeciderVerificationKey> {
        &self.key
    }

    pub fn auxiliary(&self) -> &AuxiliaryVerifier {
        &self.auxiliary
    }

    pub fn verify_proof(&self, proof: &HonkProof) -> bool {
        self.verify_proof_with_ipa(proof, &IpaProof::default())
    }

    pub fn verify_proof_with_ipa(&self, proof: &HonkProof, ipa_proof: &IpaProof) -> bool {
        self.verify_proof_with_transcript(
            proof,
            ipa_proof,
            F::Transcript::new(F::TRANSCRIPT_LABEL),
        )
    }

    /// Verifies `proof` starting from a caller-supplied transcript, which must
    /// be fresh unless the caller deliberately binds extra context into it.
    #[tracing::instrument(skip_all, name = "HonkVerifier::verify_proof", fields(flavor = F::NAME))]
    pub fn verify_proof_with_transcript(
        &self,
        proof: &HonkProof,
        ipa_proof: &IpaProof,
        transcript: F::Transcript,
    ) -> bool {
        match self.verify(proof, ipa_proof, transcript) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "proof rejected");
                false
            }
        }
    }

    /// Verifies independent proofs in parallel, one transcript each.
    pub fn verify_proofs(&self, proofs: &[HonkProof]) -> Vec<bool> {
        proofs
            .par_iter()
            .map(|proof| self.verify_proof(proof))
            .collect()
    }

    fn verify(
        &self,
        proof: &HonkProof,
        ipa_proof: &IpaProof,
        transcript: F::Transcript,
    ) -> Result<(), ProofVerifyError> {
        let reader = ProofReader::new(transcript, proof.as_bytes());
        let output = DeciderVerifier::<F>::new(&self.key).verify(reader)?;

        if ipa_proof.is_empty() {
            return Ok(());
        }
        let ipa_key = match &self.auxiliary {
            AuxiliaryVerifier::Ipa(ipa_key) => ipa_key,
            AuxiliaryVerifier::None => {
                tracing::warn!(
                    flavor = F::NAME,
                    "IPA proof supplied to a verifier without an IPA key"
                );
                return Err(ProofVerifyError::MissingIpaKey);
            }
        };
        let claim = output
            .ipa_claim
            .ok_or(ProofVerifyError::MissingIpaClaim(F::NAME))?;

        let transcript = ipa::ipa_transcript::<F::Transcript>(&output.transcript_state, &claim);
        let mut reader = ProofReader::new(transcript, ipa_proof.as_bytes());
        ipa::verify(ipa_key, &claim, &mut reader)?;
        reader.finish()?;
        Ok(())
    }
}
