use ark_bn254::Fr;

use super::*;
use crate::flavor::{MegaFlavor, MegaZKFlavor, UltraFlavor, UltraKeccakFlavor, UltraRollupFlavor};
use crate::poly::commitment::shplemini::KZG_W_LABEL;
use crate::transcripts::{Blake2bTranscript, ProofReader, Transcript};
use crate::ultra_honk::decider_verification_key::DeciderVerificationKey;
use crate::ultra_honk::decider_verifier::DeciderVerifier;
use crate::ultra_honk::proof::PROOF_ELEMENT_SIZE;
use crate::utils::errors::ProofVerifyError;

fn decide<F: Flavor>(fixture: &Fixture, bytes: &[u8]) -> Result<(), ProofVerifyError> {
    let key = DeciderVerificationKey::new(fixture.vk.clone()).unwrap();
    let reader = ProofReader::new(F::Transcript::new(F::TRANSCRIPT_LABEL), bytes);
    DeciderVerifier::<F>::new(&key).verify(reader).map(|_| ())
}

fn assert_every_element_binds<F: Flavor>() {
    let fixture = prove_example::<F>(4);
    let verifier = verifier_for::<F>(&fixture);
    let bytes = fixture.proof.as_bytes();
    for (i, offset) in (0..bytes.len()).step_by(PROOF_ELEMENT_SIZE).enumerate() {
        let mut tampered = bytes.to_vec();
        tampered[offset] ^= 1;
        assert!(
            !verifier.verify_proof_with_ipa(&HonkProof::new(tampered), &fixture.ipa_proof),
            "{}: flipping element {i} was accepted",
            F::NAME
        );
    }
}

#[test]
fn ultra_rejects_any_modified_element() {
    assert_every_element_binds::<UltraFlavor>();
}

#[test]
fn mega_zk_rejects_any_modified_element() {
    assert_every_element_binds::<MegaZKFlavor>();
}

#[test]
fn ultra_rollup_rejects_any_modified_element() {
    assert_every_element_binds::<UltraRollupFlavor>();
}

#[test]
fn truncated_proofs_are_malformed() {
    let fixture = prove_example::<UltraFlavor>(4);
    let bytes = fixture.proof.as_bytes();
    let len = bytes.len();

    for cut in [1, PROOF_ELEMENT_SIZE] {
        assert_eq!(
            decide::<UltraFlavor>(&fixture, &bytes[..len - cut]),
            Err(ProofVerifyError::MalformedProof {
                label: KZG_W_LABEL,
                offset: len - PROOF_ELEMENT_SIZE,
            })
        );
    }
    assert!(matches!(
        decide::<UltraFlavor>(&fixture, &[]),
        Err(ProofVerifyError::MalformedProof { offset: 0, .. })
    ));
    assert!(!verifier_for::<UltraFlavor>(&fixture).verify_proof(&HonkProof::default()));
}

#[test]
fn trailing_bytes_are_rejected() {
    let fixture = prove_example::<UltraFlavor>(4);
    let mut bytes = fixture.proof.clone().into_bytes();
    bytes.push(0);
    assert_eq!(
        decide::<UltraFlavor>(&fixture, &bytes),
        Err(ProofVerifyError::TrailingBytes(1))
    );
    bytes.extend([0u8; PROOF_ELEMENT_SIZE - 1]);
    assert!(!verifier_for::<UltraFlavor>(&fixture).verify_proof(&HonkProof::new(bytes)));
}

fn swap_elements(bytes: &[u8], i: usize, j: usize) -> HonkProof {
    let mut swapped = bytes.to_vec();
    for k in 0..PROOF_ELEMENT_SIZE {
        swapped.swap(i * PROOF_ELEMENT_SIZE + k, j * PROOF_ELEMENT_SIZE + k);
    }
    HonkProof::new(swapped)
}

#[test]
fn reordered_messages_are_rejected() {
    let fixture = prove_example::<UltraFlavor>(4);
    let verifier = verifier_for::<UltraFlavor>(&fixture);
    let bytes = fixture.proof.as_bytes();

    // public inputs 7 and 2
    assert!(!verifier.verify_proof(&swap_elements(bytes, 0, 1)));
    // W_L and W_R
    assert!(!verifier.verify_proof(&swap_elements(bytes, 2, 3)));
    // S(1) and S(2) of the first round univariate
    let first_round = fixture.vk.num_public_inputs as usize + 5;
    assert!(!verifier.verify_proof(&swap_elements(bytes, first_round + 1, first_round + 2)));
}

#[test]
fn sumcheck_round_mismatch_is_reported() {
    let fixture = prove_example::<UltraFlavor>(4);
    let first_round = fixture.vk.num_public_inputs as usize + 5;
    let mut bytes = fixture.proof.clone().into_bytes();
    // S(0) += 1 keeps the element canonical but breaks S(0) + S(1) = 0
    let offset = first_round * PROOF_ELEMENT_SIZE;
    let mut reader = &bytes[offset..offset + PROOF_ELEMENT_SIZE];
    let value: Fr =
        ark_serialize::CanonicalDeserialize::deserialize_compressed(&mut reader).unwrap();
    let mut patched = Vec::new();
    ark_serialize::CanonicalSerialize::serialize_compressed(&(value + Fr::from(1u64)), &mut patched)
        .unwrap();
    bytes[offset..offset + PROOF_ELEMENT_SIZE].copy_from_slice(&patched);

    assert_eq!(
        decide::<UltraFlavor>(&fixture, &bytes),
        Err(ProofVerifyError::SumcheckRoundMismatch { round: 0 })
    );
}

#[test]
fn transcript_domain_separation() {
    let fixture = prove_example::<UltraFlavor>(4);
    let verifier = verifier_for::<UltraFlavor>(&fixture);
    assert!(verifier.verify_proof_with_transcript(
        &fixture.proof,
        &IpaProof::default(),
        Blake2bTranscript::new(UltraFlavor::TRANSCRIPT_LABEL),
    ));
    assert!(!verifier.verify_proof_with_transcript(
        &fixture.proof,
        &IpaProof::default(),
        Blake2bTranscript::new(b"another_protocol"),
    ));

    // binding extra context on one side only
    let mut transcript = Blake2bTranscript::new(UltraFlavor::TRANSCRIPT_LABEL);
    transcript.append_u64(b"session", 1);
    assert!(!verifier.verify_proof_with_transcript(
        &fixture.proof,
        &IpaProof::default(),
        transcript
    ));
}

#[test]
fn proofs_do_not_verify_across_flavors() {
    let ultra = prove_example::<UltraFlavor>(4);
    let keccak = prove_example::<UltraKeccakFlavor>(4);
    let mega = prove_example::<MegaFlavor>(4);
    let rollup = prove_example::<UltraRollupFlavor>(4);

    // the verification key does not depend on the flavor
    assert_eq!(ultra.vk, keccak.vk);
    assert_eq!(ultra.vk, mega.vk);

    let ultra_verifier = verifier_for::<UltraFlavor>(&ultra);
    assert!(!ultra_verifier.verify_proof(&keccak.proof));
    assert!(!ultra_verifier.verify_proof(&mega.proof));
    assert!(!ultra_verifier.verify_proof(&rollup.proof));
    assert!(!verifier_for::<MegaFlavor>(&mega).verify_proof(&ultra.proof));
    assert!(!verifier_for::<MegaZKFlavor>(&mega).verify_proof(&mega.proof));
    assert!(!verifier_for::<UltraKeccakFlavor>(&keccak).verify_proof(&ultra.proof));
}
