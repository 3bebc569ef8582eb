use std::marker::PhantomData;

use ark_bn254::{Fr, G1Affine};

use super::decider_verification_key::DeciderVerificationKey;
use crate::flavor::entities::WitnessEntities;
use crate::flavor::Flavor;
use crate::poly::commitment::ipa::{IpaClaim, IPA_CLAIM_LABEL};
use crate::relations::{compute_public_input_delta, RelationParameters};
use crate::transcripts::ProofReader;
use crate::utils::errors::ProofVerifyError;

pub(crate) const PUBLIC_INPUT_LABEL: &str = "public_input";
pub(crate) const W_L_LABEL: &str = "W_L";
pub(crate) const W_R_LABEL: &str = "W_R";
pub(crate) const W_O_LABEL: &str = "W_O";
pub(crate) const W_4_LABEL: &str = "W_4";
pub(crate) const Z_PERM_LABEL: &str = "Z_PERM";
pub(crate) const BETA_LABEL: &str = "beta";
pub(crate) const GAMMA_LABEL: &str = "gamma";
pub(crate) const ALPHA_LABEL: &str = "alpha";
pub(crate) const GATE_CHALLENGE_LABEL: &str = "gate_challenge";

/// Everything the Oink phase extracts from one proof.
#[derive(Clone, Debug)]
pub struct OinkOutput {
    pub public_inputs: Vec<Fr>,
    pub ipa_claim: Option<IpaClaim>,
    pub witness_commitments: WitnessEntities<G1Affine>,
    pub relation_parameters: RelationParameters<Fr>,
    pub alpha: Fr,
    pub gate_challenges: Vec<Fr>,
}

/// Replays the pre-sumcheck part of the transcript: public inputs, witness
/// commitments and the challenges derived from them.
pub struct OinkVerifier<'a, F: Flavor> {
    key: &'a DeciderVerificationKey,
    _flavor: PhantomData<F>,
}

impl<'a, F: Flavor> OinkVerifier<'a, F> {
    pub fn new(key: &'a DeciderVerificationKey) -> Self {
        OinkVerifier {
            key,
            _flavor: PhantomData,
        }
    }

    #[tracing::instrument(skip_all, name = "OinkVerifier::verify")]
    pub fn verify(
        &self,
        reader: &mut ProofReader<'_, F::Transcript>,
    ) -> Result<OinkOutput, ProofVerifyError> {
        let vk = self.key.verification_key();
        self.key.absorb_preamble(reader.transcript_mut());

        let public_inputs: Vec<Fr> =
            reader.receive_many(PUBLIC_INPUT_LABEL, vk.num_public_inputs as usize)?;
        let ipa_claim = if F::HAS_IPA_ACCUMULATOR {
            Some(reader.receive::<IpaClaim>(IPA_CLAIM_LABEL)?)
        } else {
            None
        };

        let w_l: G1Affine = reader.receive(W_L_LABEL)?;
        let w_r: G1Affine = reader.receive(W_R_LABEL)?;
        let w_o: G1Affine = reader.receive(W_O_LABEL)?;
        let w_4: G1Affine = reader.receive(W_4_LABEL)?;
        let beta: Fr = reader.challenge(BETA_LABEL);
        let gamma: Fr = reader.challenge(GAMMA_LABEL);

        let z_perm: G1Affine = reader.receive(Z_PERM_LABEL)?;
        let alpha: Fr = reader.challenge(ALPHA_LABEL);
        let gate_challenges: Vec<Fr> = reader.challenges(GATE_CHALLENGE_LABEL, self.key.log_n());

        let public_input_delta = compute_public_input_delta(
            &public_inputs,
            beta,
            gamma,
            vk.circuit_size,
            vk.pub_inputs_offset,
        )
        .ok_or(ProofVerifyError::NonInvertible("public input delta"))?;

        Ok(OinkOutput {
            public_inputs,
            ipa_claim,
            witness_commitments: WitnessEntities {
                w_l,
                w_r,
                w_o,
                w_4,
                z_perm,
            },
            relation_parameters: RelationParameters {
                beta,
                gamma,
                public_input_delta,
            },
            alpha,
            gate_challenges,
        })
    }
}
