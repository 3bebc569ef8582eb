use ark_bn254::G1Affine;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};

use crate::flavor::entities::{PrecomputedEntities, NUM_PRECOMPUTED_ENTITIES};
use crate::flavor::MAX_LOG_CIRCUIT_SIZE;
use crate::transcripts::Transcript;
use crate::utils::errors::SetupError;

pub(crate) const CIRCUIT_SIZE_LABEL: &[u8] = b"circuit_size";
pub(crate) const NUM_PUBLIC_INPUTS_LABEL: &[u8] = b"public_input_size";
pub(crate) const PUB_INPUTS_OFFSET_LABEL: &[u8] = b"pub_inputs_offset";

/// Circuit description the verifier is given out of band: sizes plus
/// commitments to every precomputed polynomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKey {
    pub circuit_size: u64,
    pub log_circuit_size: u64,
    pub num_public_inputs: u64,
    pub pub_inputs_offset: u64,
    pub commitments: PrecomputedEntities<G1Affine>,
}

impl VerificationKey {
    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |reason: String| Err(SetupError::InvalidVerificationKey(reason));

        if self.circuit_size < 2 || !self.circuit_size.is_power_of_two() {
            return invalid(format!(
                "circuit size {} is not a power of two >= 2",
                self.circuit_size
            ));
        }
        if self.log_circuit_size != u64::from(self.circuit_size.trailing_zeros()) {
            return invalid(format!(
                "log circuit size {} does not match circuit size {}",
                self.log_circuit_size, self.circuit_size
            ));
        }
        if self.log_circuit_size > MAX_LOG_CIRCUIT_SIZE as u64 {
            return invalid(format!(
                "log circuit size {} exceeds {MAX_LOG_CIRCUIT_SIZE}",
                self.log_circuit_size
            ));
        }
        // Row 0 holds no public inputs so that shiftable polynomials vanish there.
        if self.pub_inputs_offset == 0 {
            return invalid("public inputs must not start at row 0".to_string());
        }
        match self.pub_inputs_offset.checked_add(self.num_public_inputs) {
            Some(end) if end <= self.circuit_size => Ok(()),
            _ => invalid(format!(
                "{} public inputs at offset {} do not fit in {} rows",
                self.num_public_inputs, self.pub_inputs_offset, self.circuit_size
            )),
        }
    }

    pub fn log_n(&self) -> usize {
        self.log_circuit_size as usize
    }

    /// The labelled circuit parameters every proof session starts from.
    pub fn preamble(&self) -> [(&'static [u8], u64); 3] {
        [
            (CIRCUIT_SIZE_LABEL, self.circuit_size),
            (NUM_PUBLIC_INPUTS_LABEL, self.num_public_inputs),
            (PUB_INPUTS_OFFSET_LABEL, self.pub_inputs_offset),
        ]
    }

    pub fn absorb_preamble<T: Transcript>(&self, transcript: &mut T) {
        for (label, value) in self.preamble() {
            transcript.append_u64(label, value);
        }
    }
}

impl CanonicalSerialize for VerificationKey {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.circuit_size.serialize_with_mode(&mut writer, compress)?;
        self.log_circuit_size
            .serialize_with_mode(&mut writer, compress)?;
        self.num_public_inputs
            .serialize_with_mode(&mut writer, compress)?;
        self.pub_inputs_offset
            .serialize_with_mode(&mut writer, compress)?;
        for commitment in self.commitments.get_all() {
            commitment.serialize_with_mode(&mut writer, compress)?;
        }
        Ok(())
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        4 * 0u64.serialized_size(compress)
            + self
                .commitments
                .get_all()
                .iter()
                .map(|commitment| commitment.serialized_size(compress))
                .sum::<usize>()
    }
}

impl Valid for VerificationKey {
    fn check(&self) -> Result<(), SerializationError> {
        for commitment in self.commitments.get_all() {
            commitment.check()?;
        }
        Ok(())
    }
}

impl CanonicalDeserialize for VerificationKey {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let circuit_size = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        let log_circuit_size = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        let num_public_inputs = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        let pub_inputs_offset = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        let commitments = (0..NUM_PRECOMPUTED_ENTITIES)
            .map(|_| G1Affine::deserialize_with_mode(&mut reader, compress, validate))
            .collect::<Result<Vec<_>, _>>()?;
        let commitments = PrecomputedEntities::from_iter_exact(commitments)
            .ok_or(SerializationError::InvalidData)?;
        Ok(VerificationKey {
            circuit_size,
            log_circuit_size,
            num_public_inputs,
            pub_inputs_offset,
            commitments,
        })
    }
}
