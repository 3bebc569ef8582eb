use ark_ff::PrimeField;
#[cfg(any(test, feature = "prover"))]
use ark_serialize::CanonicalSerialize;
use ark_serialize::CanonicalDeserialize;

use super::Transcript;
use crate::utils::errors::ProofVerifyError;

/// Verifier side of the proof channel.
///
/// Elements are read in compressed canonical form and the exact bytes that
/// were consumed are absorbed into the transcript under the element's label.
pub struct ProofReader<'a, T: Transcript> {
    transcript: T,
    proof: &'a [u8],
    offset: usize,
}

impl<'a, T: Transcript> ProofReader<'a, T> {
    pub fn new(transcript: T, proof: &'a [u8]) -> Self {
        Self {
            transcript,
            proof,
            offset: 0,
        }
    }

    pub fn receive<V: CanonicalDeserialize>(
        &mut self,
        label: &'static str,
    ) -> Result<V, ProofVerifyError> {
        let start = self.offset;
        let mut remaining = &self.proof[start..];
        let value = V::deserialize_compressed(&mut remaining).map_err(|_| {
            ProofVerifyError::MalformedProof {
                label,
                offset: start,
            }
        })?;
        let end = self.proof.len() - remaining.len();
        self.transcript
            .append_bytes(label.as_bytes(), &self.proof[start..end]);
        self.offset = end;
        Ok(value)
    }

    pub fn receive_many<V: CanonicalDeserialize>(
        &mut self,
        label: &'static str,
        count: usize,
    ) -> Result<Vec<V>, ProofVerifyError> {
        (0..count).map(|_| self.receive(label)).collect()
    }

    pub fn challenge<F: PrimeField>(&mut self, label: &'static str) -> F {
        self.transcript.challenge_scalar(label.as_bytes())
    }

    pub fn challenges<F: PrimeField>(&mut self, label: &'static str, len: usize) -> Vec<F> {
        self.transcript.challenge_scalars(label.as_bytes(), len)
    }

    pub fn transcript_mut(&mut self) -> &mut T {
        &mut self.transcript
    }

    pub fn bytes_read(&self) -> usize {
        self.offset
    }

    /// Ends the session, rejecting proofs with unread bytes.
    pub fn finish(self) -> Result<T, ProofVerifyError> {
        match self.proof.len() - self.offset {
            0 => Ok(self.transcript),
            trailing => Err(ProofVerifyError::TrailingBytes(trailing)),
        }
    }
}

/// Prover side of the proof channel: serializes elements in compressed form
/// and absorbs them exactly as [`ProofReader`] will.
#[cfg(any(test, feature = "prover"))]
pub struct ProofWriter<T: Transcript> {
    transcript: T,
    proof: Vec<u8>,
}

#[cfg(any(test, feature = "prover"))]
impl<T: Transcript> ProofWriter<T> {
    pub fn new(transcript: T) -> Self {
        Self {
            transcript,
            proof: Vec::new(),
        }
    }

    pub fn send<V: CanonicalSerialize>(&mut self, label: &'static str, value: &V) {
        let start = self.proof.len();
        value
            .serialize_compressed(&mut self.proof)
            .expect("Serialization should not fail");
        self.transcript
            .append_bytes(label.as_bytes(), &self.proof[start..]);
    }

    pub fn send_many<V: CanonicalSerialize>(&mut self, label: &'static str, values: &[V]) {
        for value in values {
            self.send(label, value);
        }
    }

    pub fn challenge<F: PrimeField>(&mut self, label: &'static str) -> F {
        self.transcript.challenge_scalar(label.as_bytes())
    }

    pub fn challenges<F: PrimeField>(&mut self, label: &'static str, len: usize) -> Vec<F> {
        self.transcript.challenge_scalars(label.as_bytes(), len)
    }

    pub fn transcript_mut(&mut self) -> &mut T {
        &mut self.transcript
    }

    pub fn finish(self) -> (Vec<u8>, T) {
        (self.proof, self.transcript)
    }
}
