use super::Flavor;
use crate::relations::{ArithmeticRelation, PermutationRelation};
use crate::transcripts::{Blake2bTranscript, KeccakTranscript};

pub type UltraRelations = (ArithmeticRelation, PermutationRelation);

pub struct UltraFlavor;

impl Flavor for UltraFlavor {
    const NAME: &'static str = "Ultra";
    const TRANSCRIPT_LABEL: &'static [u8] = b"honk_ultra";

    type Transcript = Blake2bTranscript;
    type Relations = UltraRelations;
}

/// Ultra with a Keccak-256 transcript, for verifiers living on EVM chains.
pub struct UltraKeccakFlavor;

impl Flavor for UltraKeccakFlavor {
    const NAME: &'static str = "UltraKeccak";
    const TRANSCRIPT_LABEL: &'static [u8] = b"honk_ultra_keccak";

    type Transcript = KeccakTranscript;
    type Relations = UltraRelations;
}

/// Ultra whose proofs carry an IPA opening claim over Grumpkin, checked
/// against a separate IPA proof.
pub struct UltraRollupFlavor;

impl Flavor for UltraRollupFlavor {
    const NAME: &'static str = "UltraRollup";
    const TRANSCRIPT_LABEL: &'static [u8] = b"honk_ultra_rollup";
    const HAS_IPA_ACCUMULATOR: bool = true;

    type Transcript = Blake2bTranscript;
    type Relations = UltraRelations;
}

#[cfg(feature = "starknet")]
pub struct UltraStarknetFlavor;

#[cfg(feature = "starknet")]
impl Flavor for UltraStarknetFlavor {
    const NAME: &'static str = "UltraStarknet";
    const TRANSCRIPT_LABEL: &'static [u8] = b"honk_ultra_starknet";

    type Transcript = crate::transcripts::Sha3Transcript;
    type Relations = UltraRelations;
}
