use std::sync::Arc;

use ark_bn254::Fr;
use ark_std::UniformRand;
use once_cell::sync::OnceCell;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use super::prover::{example_circuit, prove_ipa, CircuitTables, HonkProver, IpaWitness, ProverSrs};
use super::{HonkProof, HonkVerifier, IpaProof, VerificationKey};
use crate::flavor::Flavor;
use crate::poly::commitment::ipa::IpaVerificationKey;
use crate::poly::commitment::srs::init_verifier_srs;

mod soundness_test;

const TEST_SRS_SIZE: usize = 64;
const TEST_IPA_SIZE: usize = 16;

/// Shared SRS with a fixed τ; also installs the process-wide verifier key.
pub(crate) fn test_srs() -> &'static ProverSrs {
    static SRS: OnceCell<ProverSrs> = OnceCell::new();
    SRS.get_or_init(|| {
        let tau = Fr::rand(&mut ChaCha20Rng::seed_from_u64(0x5eed));
        let srs = ProverSrs::from_tau(tau, TEST_SRS_SIZE);
        init_verifier_srs(srs.verifier_key().clone()).expect("test SRS installed once");
        srs
    })
}

pub(crate) fn test_ipa_key() -> &'static IpaVerificationKey {
    static KEY: OnceCell<IpaVerificationKey> = OnceCell::new();
    KEY.get_or_init(|| IpaVerificationKey::from_seed(TEST_IPA_SIZE, b"honk-core-test-ipa").unwrap())
}

pub(crate) struct Fixture {
    pub vk: Arc<VerificationKey>,
    pub proof: HonkProof,
    pub ipa_proof: IpaProof,
    pub transcript_state: Vec<u8>,
    pub ipa_witness: Option<IpaWitness>,
}

/// Proves `circuit` with flavor `F`. IPA-accumulating flavors get a random
/// IPA witness derived from `ipa_seed` and a matching IPA proof.
pub(crate) fn prove_circuit<F: Flavor>(circuit: &CircuitTables, ipa_seed: u64) -> Fixture {
    let srs = test_srs();
    let ipa_witness = F::HAS_IPA_ACCUMULATOR
        .then(|| IpaWitness::random(test_ipa_key(), &mut ChaCha20Rng::seed_from_u64(ipa_seed)));

    let mut prover = HonkProver::<F>::new(srs, circuit);
    if let Some(witness) = &ipa_witness {
        prover = prover.with_ipa_claim(witness.claim(test_ipa_key()));
    }
    let vk = Arc::new(prover.verification_key());
    let output = prover.prove(&mut ChaCha20Rng::seed_from_u64(7));

    let ipa_proof = match &ipa_witness {
        Some(witness) => {
            prove_ipa::<F::Transcript>(test_ipa_key(), witness, &output.transcript_state)
        }
        None => IpaProof::default(),
    };
    Fixture {
        vk,
        proof: output.proof,
        ipa_proof,
        transcript_state: output.transcript_state,
        ipa_witness,
    }
}

pub(crate) fn prove_example<F: Flavor>(log_n: usize) -> Fixture {
    prove_circuit::<F>(&example_circuit(log_n), 1)
}

pub(crate) fn verifier_for<F: Flavor>(fixture: &Fixture) -> HonkVerifier<F> {
    if F::HAS_IPA_ACCUMULATOR {
        HonkVerifier::with_ipa(fixture.vk.clone(), Arc::new(test_ipa_key().clone())).unwrap()
    } else {
        HonkVerifier::new(fixture.vk.clone()).unwrap()
    }
}
