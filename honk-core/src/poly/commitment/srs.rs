//! Process-wide KZG verifier parameters.

use ark_bn254::{G1Affine, G2Affine};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use once_cell::sync::OnceCell;

use crate::utils::errors::SetupError;

/// The three points the KZG opening check needs: `[1]_1`, `[1]_2`, `[τ]_2`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct KzgVerifierKey {
    pub g1: G1Affine,
    pub g2: G2Affine,
    pub tau_g2: G2Affine,
}

static VERIFIER_SRS: OnceCell<KzgVerifierKey> = OnceCell::new();

/// Installs the verifier SRS for the lifetime of the process.
///
/// Installing the key that is already present is a no-op; installing a
/// different one fails with [`SetupError::SrsAlreadyInitialized`].
pub fn init_verifier_srs(key: KzgVerifierKey) -> Result<&'static KzgVerifierKey, SetupError> {
    match VERIFIER_SRS.set(key) {
        Ok(()) => {
            tracing::debug!("verifier SRS installed");
            verifier_srs()
        }
        Err(rejected) => match VERIFIER_SRS.get() {
            Some(installed) if *installed == rejected => Ok(installed),
            _ => Err(SetupError::SrsAlreadyInitialized),
        },
    }
}

pub fn verifier_srs() -> Result<&'static KzgVerifierKey, SetupError> {
    VERIFIER_SRS.get().ok_or(SetupError::SrsNotInitialized)
}
