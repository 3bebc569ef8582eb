//! Verifier for Honk proofs, organized the way the protocol runs: Oink
//! (commitments and challenges), the decider (sumcheck and the batched
//! opening) and the optional IPA stage.

pub mod decider_verification_key;
pub mod decider_verifier;
pub mod oink_verifier;
pub mod proof;
#[cfg(any(test, feature = "prover"))]
pub mod prover;
pub mod verification_key;
pub mod verifier;

#[cfg(test)]
mod tests;

pub use decider_verification_key::DeciderVerificationKey;
pub use proof::{HonkProof, IpaProof};
pub use verification_key::VerificationKey;
#[cfg(feature = "starknet")]
pub use verifier::UltraStarknetVerifier;
pub use verifier::{
    AuxiliaryVerifier, HonkVerifier, MegaVerifier, MegaZKVerifier, UltraKeccakVerifier,
    UltraRollupVerifier, UltraVerifier,
};
