use std::sync::Arc;

use super::verification_key::VerificationKey;
use crate::poly::commitment::srs::{self, KzgVerifierKey};
use crate::transcripts::Transcript;
use crate::utils::errors::SetupError;

/// A validated verification key bound to the process-wide KZG parameters.
///
/// Immutable once built, so one instance can back any number of concurrent
/// verifications. Everything derived from a particular proof lives in the
/// per-call outputs of the Oink and decider phases instead.
#[derive(Debug)]
pub struct DeciderVerificationKey {
    verification_key: Arc<VerificationKey>,
    pcs_key: &'static KzgVerifierKey,
    log_n: usize,
    preamble: [(&'static [u8], u64); 3],
}

impl DeciderVerificationKey {
    #[tracing::instrument(skip_all, name = "DeciderVerificationKey::new")]
    pub fn new(verification_key: Arc<VerificationKey>) -> Result<Self, SetupError> {
        verification_key.validate()?;
        let pcs_key = srs::verifier_srs()?;
        let log_n = verification_key.log_n();
        let preamble = verification_key.preamble();
        tracing::debug!(
            circuit_size = verification_key.circuit_size,
            num_public_inputs = verification_key.num_public_inputs,
            "decider verification key ready"
        );
        Ok(DeciderVerificationKey {
            verification_key,
            pcs_key,
            log_n,
            preamble,
        })
    }

    pub fn verification_key(&self) -> &VerificationKey {
        &self.verification_key
    }

    pub fn pcs_key(&self) -> &'static KzgVerifierKey {
        self.pcs_key
    }

    pub fn log_n(&self) -> usize {
        self.log_n
    }

    /// Seeds a fresh transcript with the circuit parameters.
    pub fn absorb_preamble<T: Transcript>(&self, transcript: &mut T) {
        for (label, value) in self.preamble {
            transcript.append_u64(label, value);
        }
    }
}
