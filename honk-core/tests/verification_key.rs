//! Verification-key handling. This binary never installs a verifier SRS.

use std::sync::Arc;

use ark_bn254::{Fr, G1Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use honk_core::flavor::entities::{PrecomputedEntities, NUM_PRECOMPUTED_ENTITIES};
use honk_core::flavor::MAX_LOG_CIRCUIT_SIZE;
use honk_core::poly::commitment::srs::verifier_srs;
use honk_core::ultra_honk::{DeciderVerificationKey, UltraVerifier, VerificationKey};
use honk_core::SetupError;

fn random_key(log_n: u64) -> VerificationKey {
    let mut rng = ChaCha20Rng::seed_from_u64(log_n);
    let commitments = (0..NUM_PRECOMPUTED_ENTITIES)
        .map(|_| (G1Affine::generator() * Fr::rand(&mut rng)).into_affine());
    VerificationKey {
        circuit_size: 1 << log_n,
        log_circuit_size: log_n,
        num_public_inputs: 3,
        pub_inputs_offset: 1,
        commitments: PrecomputedEntities::from_iter_exact(commitments).unwrap(),
    }
}

#[test]
fn serialization_round_trip() {
    let vk = random_key(10);
    let mut bytes = Vec::new();
    vk.serialize_compressed(&mut bytes).unwrap();
    assert_eq!(bytes.len(), vk.compressed_size());
    assert_eq!(bytes.len(), 4 * 8 + NUM_PRECOMPUTED_ENTITIES * 32);
    assert_eq!(VerificationKey::deserialize_compressed(bytes.as_slice()).unwrap(), vk);

    let mut uncompressed = Vec::new();
    vk.serialize_uncompressed(&mut uncompressed).unwrap();
    assert_eq!(
        VerificationKey::deserialize_uncompressed(uncompressed.as_slice()).unwrap(),
        vk
    );

    assert!(VerificationKey::deserialize_compressed(&bytes[..bytes.len() - 1]).is_err());
}

#[test]
fn validation() {
    assert_eq!(random_key(4).validate(), Ok(()));
    assert_eq!(random_key(MAX_LOG_CIRCUIT_SIZE as u64).validate(), Ok(()));

    let cases: [fn(&mut VerificationKey); 6] = [
        |vk| vk.circuit_size = 24,
        |vk| vk.circuit_size = 1,
        |vk| vk.log_circuit_size += 1,
        |vk| vk.pub_inputs_offset = 0,
        |vk| vk.num_public_inputs = vk.circuit_size,
        |vk| vk.pub_inputs_offset = u64::MAX,
    ];
    for mutate in cases {
        let mut vk = random_key(4);
        mutate(&mut vk);
        assert!(matches!(
            vk.validate(),
            Err(SetupError::InvalidVerificationKey(_))
        ));
    }

    let mut too_large = random_key(4);
    too_large.log_circuit_size = MAX_LOG_CIRCUIT_SIZE as u64 + 1;
    too_large.circuit_size = 1 << too_large.log_circuit_size;
    assert!(too_large.validate().is_err());
}

#[test]
fn construction_requires_srs() {
    assert_eq!(verifier_srs().err(), Some(SetupError::SrsNotInitialized));
    let vk = Arc::new(random_key(4));
    assert_eq!(
        DeciderVerificationKey::new(vk.clone()).err(),
        Some(SetupError::SrsNotInitialized)
    );
    assert!(matches!(
        UltraVerifier::new(vk),
        Err(SetupError::SrsNotInitialized)
    ));

    // key validation comes first
    let mut invalid = random_key(4);
    invalid.circuit_size = 3;
    assert!(matches!(
        DeciderVerificationKey::new(Arc::new(invalid)),
        Err(SetupError::InvalidVerificationKey(_))
    ));
}
