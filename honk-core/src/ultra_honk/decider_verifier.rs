use std::marker::PhantomData;

use ark_bn254::Fr;

use super::decider_verification_key::DeciderVerificationKey;
use super::oink_verifier::OinkVerifier;
use crate::flavor::entities::AllEntities;
use crate::flavor::Flavor;
use crate::poly::commitment::ipa::IpaClaim;
use crate::poly::commitment::kzg::PairingPoints;
use crate::poly::commitment::shplemini::{self, BatchOpeningClaim};
use crate::subprotocols::sumcheck::SumcheckVerifier;
use crate::transcripts::{ProofReader, Transcript};
use crate::utils::errors::ProofVerifyError;

/// What a successfully decided proof leaves behind for the auxiliary stage.
#[derive(Clone, Debug)]
pub struct DeciderOutput {
    pub public_inputs: Vec<Fr>,
    pub challenge_point: Vec<Fr>,
    pub claimed_evaluations: AllEntities<Fr>,
    pub pairing_points: PairingPoints,
    pub ipa_claim: Option<IpaClaim>,
    /// Digest of the main transcript once every proof element was absorbed.
    pub transcript_state: Vec<u8>,
}

/// Runs Oink, sumcheck and Shplemini over one proof, then the pairing check.
pub struct DeciderVerifier<'a, F: Flavor> {
    key: &'a DeciderVerificationKey,
    _flavor: PhantomData<F>,
}

impl<'a, F: Flavor> DeciderVerifier<'a, F> {
    pub fn new(key: &'a DeciderVerificationKey) -> Self {
        DeciderVerifier {
            key,
            _flavor: PhantomData,
        }
    }

    #[tracing::instrument(skip_all, name = "DeciderVerifier::verify")]
    pub fn verify(
        &self,
        mut reader: ProofReader<'_, F::Transcript>,
    ) -> Result<DeciderOutput, ProofVerifyError> {
        let oink = OinkVerifier::<F>::new(self.key).verify(&mut reader)?;

        let sumcheck = SumcheckVerifier::<F>::new(
            &oink.relation_parameters,
            oink.alpha,
            &oink.gate_challenges,
        )
        .verify(&mut reader)?;

        let evaluations = &sumcheck.claimed_evaluations;
        let mut claim = BatchOpeningClaim {
            unshifted_commitments: self
                .key
                .verification_key()
                .commitments
                .get_all()
                .into_iter()
                .chain(oink.witness_commitments.get_all())
                .copied()
                .collect(),
            unshifted_evaluations: evaluations.unshifted().into_iter().copied().collect(),
            to_be_shifted_commitments: oink.witness_commitments.into_vec(),
            shifted_evaluations: evaluations.shifted().into_iter().copied().collect(),
        };
        if let Some(libra) = &sumcheck.libra {
            claim.unshifted_commitments.push(libra.commitment);
            claim.unshifted_evaluations.push(libra.evaluation);
        }

        let pairing_points = shplemini::verify(
            &claim,
            &sumcheck.challenge_point,
            self.key.pcs_key(),
            &mut reader,
        )?;
        let transcript = reader.finish()?;

        if !pairing_points.check(self.key.pcs_key()) {
            return Err(ProofVerifyError::PairingCheckFailed);
        }

        Ok(DeciderOutput {
            public_inputs: oink.public_inputs,
            challenge_point: sumcheck.challenge_point,
            claimed_evaluations: sumcheck.claimed_evaluations,
            pairing_points,
            ipa_claim: oink.ipa_claim,
            transcript_state: transcript.state(),
        })
    }
}
