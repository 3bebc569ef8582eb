//! Reference prover producing proofs the verifier accepts. Built for tests
//! and benchmarks only; it favors clarity over speed and is not hardened.

mod circuit;
mod ipa;
mod shplemini;
mod sumcheck;

use std::marker::PhantomData;

use ark_bn254::{Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{batch_inversion, One, Zero};
use ark_std::UniformRand;
use rand_core::RngCore;

pub use circuit::{example_circuit, Cell, CircuitBuilder, CircuitTables, Gate, PUB_INPUTS_OFFSET};
pub use ipa::{prove_ipa, IpaWitness};

use super::oink_verifier::{
    ALPHA_LABEL, BETA_LABEL, GAMMA_LABEL, GATE_CHALLENGE_LABEL, PUBLIC_INPUT_LABEL, W_4_LABEL,
    W_L_LABEL, W_O_LABEL, W_R_LABEL, Z_PERM_LABEL,
};
use super::proof::HonkProof;
use super::verification_key::VerificationKey;
use crate::flavor::entities::{AllEntities, WitnessEntities};
use crate::flavor::Flavor;
use crate::poly::commitment::ipa::{IpaClaim, IPA_CLAIM_LABEL};
use crate::poly::commitment::srs::KzgVerifierKey;
use crate::relations::{compute_public_input_delta, RelationParameters};
use crate::subprotocols::sumcheck::{LIBRA_CHALLENGE_LABEL, LIBRA_COMMITMENT_LABEL, LIBRA_SUM_LABEL};
use crate::transcripts::{ProofWriter, Transcript};

/// Powers `[τ^i]_1` for committing, plus the matching verifier key.
pub struct ProverSrs {
    powers: Vec<G1Affine>,
    verifier_key: KzgVerifierKey,
}

impl ProverSrs {
    /// Structured reference string for a known `τ`. Only suitable for tests.
    pub fn from_tau(tau: Fr, size: usize) -> Self {
        let g1 = G1Affine::generator();
        let mut power = Fr::one();
        let powers: Vec<G1Projective> = (0..size)
            .map(|_| {
                let point = g1 * power;
                power *= tau;
                point
            })
            .collect();
        let g2 = G2Affine::generator();
        ProverSrs {
            powers: G1Projective::normalize_batch(&powers),
            verifier_key: KzgVerifierKey {
                g1,
                g2,
                tau_g2: (g2 * tau).into_affine(),
            },
        }
    }

    pub fn verifier_key(&self) -> &KzgVerifierKey {
        &self.verifier_key
    }

    pub fn size(&self) -> usize {
        self.powers.len()
    }

    pub fn commit(&self, coeffs: &[Fr]) -> G1Affine {
        assert!(coeffs.len() <= self.powers.len(), "SRS too small");
        G1Projective::msm(&self.powers[..coeffs.len()], coeffs)
            .expect("bases and scalars have equal length")
            .into_affine()
    }
}

/// Proof bytes and the final main-transcript digest the IPA proof binds to.
pub struct ProverOutput {
    pub proof: HonkProof,
    pub transcript_state: Vec<u8>,
}

pub struct HonkProver<'a, F: Flavor> {
    srs: &'a ProverSrs,
    circuit: &'a CircuitTables,
    ipa_claim: Option<IpaClaim>,
    _flavor: PhantomData<F>,
}

impl<'a, F: Flavor> HonkProver<'a, F> {
    pub fn new(srs: &'a ProverSrs, circuit: &'a CircuitTables) -> Self {
        assert!(circuit.circuit_size() <= srs.size(), "SRS too small");
        HonkProver {
            srs,
            circuit,
            ipa_claim: None,
            _flavor: PhantomData,
        }
    }

    pub fn with_ipa_claim(mut self, claim: IpaClaim) -> Self {
        self.ipa_claim = Some(claim);
        self
    }

    pub fn verification_key(&self) -> VerificationKey {
        let circuit = self.circuit;
        VerificationKey {
            circuit_size: circuit.circuit_size() as u64,
            log_circuit_size: circuit.log_n as u64,
            num_public_inputs: circuit.public_inputs.len() as u64,
            pub_inputs_offset: circuit.pub_inputs_offset as u64,
            commitments: circuit.precomputed.map(|table| self.srs.commit(table)),
        }
    }

    pub fn prove<R: RngCore>(&self, rng: &mut R) -> ProverOutput {
        self.prove_with_transcript(F::Transcript::new(F::TRANSCRIPT_LABEL), rng)
    }

    #[tracing::instrument(skip_all, name = "HonkProver::prove", fields(flavor = F::NAME))]
    pub fn prove_with_transcript<R: RngCore>(
        &self,
        transcript: F::Transcript,
        rng: &mut R,
    ) -> ProverOutput {
        assert_eq!(
            F::HAS_IPA_ACCUMULATOR,
            self.ipa_claim.is_some(),
            "an IPA claim is required exactly for IPA-accumulating flavors"
        );
        let circuit = self.circuit;
        let n = circuit.circuit_size();
        let vk = self.verification_key();

        let mut writer = ProofWriter::new(transcript);
        vk.absorb_preamble(writer.transcript_mut());
        writer.send_many(PUBLIC_INPUT_LABEL, &circuit.public_inputs);
        if let Some(claim) = &self.ipa_claim {
            writer.send(IPA_CLAIM_LABEL, claim);
        }

        for (label, wire) in [W_L_LABEL, W_R_LABEL, W_O_LABEL, W_4_LABEL]
            .into_iter()
            .zip(&circuit.wires)
        {
            writer.send(label, &self.srs.commit(wire));
        }
        let beta: Fr = writer.challenge(BETA_LABEL);
        let gamma: Fr = writer.challenge(GAMMA_LABEL);

        let z_perm = compute_grand_product(circuit, beta, gamma);
        writer.send(Z_PERM_LABEL, &self.srs.commit(&z_perm));
        let alpha: Fr = writer.challenge(ALPHA_LABEL);
        let gate_challenges: Vec<Fr> = writer.challenges(GATE_CHALLENGE_LABEL, circuit.log_n);

        let public_input_delta = compute_public_input_delta(
            &circuit.public_inputs,
            beta,
            gamma,
            n as u64,
            circuit.pub_inputs_offset as u64,
        )
        .expect("non-zero denominator");
        let relation_parameters = RelationParameters {
            beta,
            gamma,
            public_input_delta,
        };

        let [w_l, w_r, w_o, w_4] = circuit.wires.clone();
        let witness = WitnessEntities {
            w_l,
            w_r,
            w_o,
            w_4,
            z_perm,
        };
        let shifted = witness.map(|table| {
            let mut shifted = table[1..].to_vec();
            shifted.push(Fr::zero());
            shifted
        });
        let tables = AllEntities::from_parts(circuit.precomputed.clone(), witness.clone(), shifted);

        let libra = if F::HAS_ZK {
            let masking: Vec<Fr> = (0..n).map(|_| Fr::rand(rng)).collect();
            writer.send(LIBRA_COMMITMENT_LABEL, &self.srs.commit(&masking));
            writer.send(LIBRA_SUM_LABEL, &masking.iter().sum::<Fr>());
            let challenge: Fr = writer.challenge(LIBRA_CHALLENGE_LABEL);
            Some((masking, challenge))
        } else {
            None
        };
        let masking = libra.as_ref().map(|(table, _)| table.clone());

        let sumcheck = sumcheck::prove::<F>(
            &mut writer,
            tables,
            &relation_parameters,
            alpha,
            &gate_challenges,
            libra,
        );
        debug_assert_eq!(sumcheck.libra_evaluation.is_some(), F::HAS_ZK);

        let mut unshifted: Vec<&Vec<Fr>> = circuit.precomputed.get_all();
        unshifted.extend(witness.get_all());
        unshifted.extend(masking.as_ref());
        shplemini::prove(
            &mut writer,
            self.srs,
            &unshifted,
            &witness.get_all(),
            &sumcheck.challenge_point,
        );

        let (bytes, transcript) = writer.finish();
        ProverOutput {
            proof: HonkProof::new(bytes),
            transcript_state: transcript.state(),
        }
    }
}

/// `z[0] = 0`, `z[i + 1] = Π_{j <= i} num_j / den_j`.
fn compute_grand_product(circuit: &CircuitTables, beta: Fr, gamma: Fr) -> Vec<Fr> {
    let n = circuit.circuit_size();
    let p = &circuit.precomputed;
    let ids = [&p.id_1, &p.id_2, &p.id_3, &p.id_4];
    let sigmas = [&p.sigma_1, &p.sigma_2, &p.sigma_3, &p.sigma_4];

    let mut numerators = vec![Fr::one(); n];
    let mut denominators = vec![Fr::one(); n];
    for row in 0..n {
        for k in 0..4 {
            let w = circuit.wires[k][row];
            numerators[row] *= w + beta * ids[k][row] + gamma;
            denominators[row] *= w + beta * sigmas[k][row] + gamma;
        }
    }
    batch_inversion(&mut denominators);

    let mut z_perm = vec![Fr::zero(); n];
    let mut product = Fr::one();
    for row in 0..n - 1 {
        product *= numerators[row] * denominators[row];
        z_perm[row + 1] = product;
    }
    z_perm
}
