//! Protocol variants. A flavor fixes the transcript hash, the relation set
//! and whether the proof carries ZK masking or an IPA claim.

pub mod entities;
mod mega;
mod ultra;

use ark_bn254::Fr;

pub use mega::{MegaFlavor, MegaRelations, MegaZKFlavor};
#[cfg(feature = "starknet")]
pub use ultra::UltraStarknetFlavor;
pub use ultra::{UltraFlavor, UltraKeccakFlavor, UltraRelations, UltraRollupFlavor};

use crate::relations::RelationSet;
use crate::transcripts::Transcript;

/// Largest supported `log2(circuit_size)`.
pub const MAX_LOG_CIRCUIT_SIZE: usize = 28;

pub trait Flavor: Send + Sync + 'static {
    const NAME: &'static str;
    /// Domain separator the main transcript is initialized with.
    const TRANSCRIPT_LABEL: &'static [u8];
    /// Proof carries a Libra masking commitment, sum and evaluation.
    const HAS_ZK: bool = false;
    /// Proof carries an IPA opening claim checked by the auxiliary verifier.
    const HAS_IPA_ACCUMULATOR: bool = false;
    /// Number of evaluations per sumcheck round univariate.
    const BATCHED_RELATION_PARTIAL_LENGTH: usize =
        <Self::Relations as RelationSet<Fr>>::MAX_PARTIAL_LENGTH + 1;

    type Transcript: Transcript;
    type Relations: RelationSet<Fr>;
}
