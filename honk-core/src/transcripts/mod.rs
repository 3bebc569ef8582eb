//! Fiat-Shamir transcripts and the proof channel that drives them.

mod fiat_shamir;
mod reader;

use ark_ff::{BigInteger, PrimeField};
use ark_serialize::CanonicalSerialize;

#[cfg(feature = "starknet")]
pub use fiat_shamir::Sha3Transcript;
pub use fiat_shamir::{Blake2bTranscript, DigestTranscript, KeccakTranscript};
#[cfg(any(test, feature = "prover"))]
pub use reader::ProofWriter;
pub use reader::ProofReader;

/// A hash-based Fiat-Shamir transcript.
///
/// Absorbed messages are framed as `label || len (u64 LE) || bytes`, so two
/// transcripts agree on every challenge iff they absorbed the same messages
/// in the same order.
pub trait Transcript: Clone + Send + Sync + 'static {
    fn new(label: &[u8]) -> Self;

    fn append_bytes(&mut self, label: &[u8], bytes: &[u8]);

    fn append_u64(&mut self, label: &[u8], x: u64) {
        self.append_bytes(label, &x.to_le_bytes());
    }

    fn append_scalar<F: PrimeField>(&mut self, label: &[u8], x: &F) {
        self.append_bytes(label, &x.into_bigint().to_bytes_le());
    }

    fn append_point<G: CanonicalSerialize>(&mut self, label: &[u8], g: &G) {
        let mut bytes = Vec::with_capacity(g.compressed_size());
        g.serialize_compressed(&mut bytes)
            .expect("Serialization should not fail");
        self.append_bytes(label, &bytes);
    }

    fn challenge_scalar<F: PrimeField>(&mut self, label: &[u8]) -> F;

    fn challenge_scalars<F: PrimeField>(&mut self, label: &[u8], len: usize) -> Vec<F> {
        (0..len).map(|_| self.challenge_scalar(label)).collect()
    }

    /// Digest of everything absorbed so far. Does not advance the transcript.
    fn state(&self) -> Vec<u8>;
}
