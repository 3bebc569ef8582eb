//! # honk-core
//!
//! Verifier for Honk proofs over BN254.
//!
//! A proof is checked by replaying its Fiat-Shamir transcript: the Oink phase
//! absorbs the witness commitments and derives the relation parameters, the
//! sumcheck verifier reduces the batched relation to claimed evaluations at a
//! random point, and Shplemini (Gemini folding, Shplonk batching and KZG)
//! reduces those claims to a single pairing check. Rollup proofs also carry an
//! IPA opening claim over Grumpkin, checked against a separate IPA proof.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use honk_core::poly::commitment::srs::init_verifier_srs;
//! use honk_core::ultra_honk::{HonkProof, UltraVerifier};
//!
//! init_verifier_srs(srs_key)?;
//! let verifier = UltraVerifier::new(Arc::new(verification_key))?;
//! assert!(verifier.verify_proof(&HonkProof::new(proof_bytes)));
//! ```
//!
//! The reference prover under [`ultra_honk::prover`] is only compiled with the
//! `prover` feature and exists to produce fixtures.

pub mod flavor;
pub mod numeric;
pub mod poly;
pub mod relations;
pub mod subprotocols;
pub mod transcripts;
pub mod ultra_honk;
pub mod utils;

pub use flavor::Flavor;
pub use ultra_honk::{HonkProof, HonkVerifier, IpaProof, VerificationKey};
pub use utils::errors::{ProofVerifyError, SetupError};
