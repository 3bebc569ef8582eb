use super::Flavor;
use crate::relations::{ArithmeticRelation, DeltaRangeRelation, PermutationRelation};
use crate::transcripts::Blake2bTranscript;

pub type MegaRelations = (ArithmeticRelation, PermutationRelation, DeltaRangeRelation);

/// Ultra plus the delta-range relation.
pub struct MegaFlavor;

impl Flavor for MegaFlavor {
    const NAME: &'static str = "Mega";
    const TRANSCRIPT_LABEL: &'static [u8] = b"honk_mega";

    type Transcript = Blake2bTranscript;
    type Relations = MegaRelations;
}

/// Mega with a Libra masking polynomial added to the sumcheck.
///
/// The reference prover masks only the round univariates. Witness
/// evaluations and the Gemini data it emits are unmasked, so its proofs are
/// not zero-knowledge; the verifier checks them the same way either way.
pub struct MegaZKFlavor;

impl Flavor for MegaZKFlavor {
    const NAME: &'static str = "MegaZK";
    const TRANSCRIPT_LABEL: &'static [u8] = b"honk_mega_zk";
    const HAS_ZK: bool = true;

    type Transcript = Blake2bTranscript;
    type Relations = MegaRelations;
}
