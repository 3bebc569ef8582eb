use ark_ff::PrimeField;
use blake2::Blake2b512;
use digest::Digest;
use sha3::Keccak256;

use super::Transcript;

/// Transcript over any `digest` hash function.
#[derive(Clone)]
pub struct DigestTranscript<D> {
    hasher: D,
}

pub type Blake2bTranscript = DigestTranscript<Blake2b512>;
pub type KeccakTranscript = DigestTranscript<Keccak256>;
#[cfg(feature = "starknet")]
pub type Sha3Transcript = DigestTranscript<sha3::Sha3_256>;

impl<D> Transcript for DigestTranscript<D>
where
    D: Digest + Clone + Send + Sync + 'static,
{
    fn new(label: &[u8]) -> Self {
        let mut hasher = <D as Digest>::new();
        Digest::update(&mut hasher, label);
        Self { hasher }
    }

    fn append_bytes(&mut self, label: &[u8], bytes: &[u8]) {
        Digest::update(&mut self.hasher, label);
        Digest::update(&mut self.hasher, (bytes.len() as u64).to_le_bytes());
        Digest::update(&mut self.hasher, bytes);
    }

    fn challenge_scalar<F: PrimeField>(&mut self, label: &[u8]) -> F {
        Digest::update(&mut self.hasher, label);
        let digest = self.hasher.clone().finalize();
        let challenge = F::from_le_bytes_mod_order(&digest);
        Digest::update(&mut self.hasher, &digest);
        challenge
    }

    fn state(&self) -> Vec<u8> {
        self.hasher.clone().finalize().to_vec()
    }
}
