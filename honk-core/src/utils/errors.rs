use thiserror::Error;

/// Every way a proof can be rejected.
///
/// The top-level verifier collapses these into `false`; the variants exist
/// so that rejections can be logged and asserted on in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofVerifyError {
    #[error("malformed proof element `{label}` at byte offset {offset}")]
    MalformedProof { label: &'static str, offset: usize },
    #[error("proof has {0} unread trailing bytes")]
    TrailingBytes(usize),
    #[error("sumcheck round {round}: S(0) + S(1) does not match the running claim")]
    SumcheckRoundMismatch { round: usize },
    #[error("sumcheck: batched relation evaluation does not match the final claim")]
    SumcheckFinalMismatch,
    #[error("non-invertible value while computing {0}")]
    NonInvertible(&'static str),
    #[error("MSM input length mismatch ({0})")]
    MsmLengthMismatch(usize),
    #[error("KZG pairing check failed")]
    PairingCheckFailed,
    #[error("IPA opening check failed")]
    IpaCheckFailed,
    #[error("IPA proof supplied but no IPA verification key is configured")]
    MissingIpaKey,
    #[error("IPA proof supplied but flavor `{0}` carries no IPA claim")]
    MissingIpaClaim(&'static str),
}

/// Errors raised while constructing verifier state, before any proof is seen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("invalid verification key: {0}")]
    InvalidVerificationKey(String),
    #[error("verifier SRS has not been initialized")]
    SrsNotInitialized,
    #[error("a different verifier SRS is already installed")]
    SrsAlreadyInitialized,
    #[error("invalid IPA verification key: {0}")]
    InvalidIpaKey(String),
    #[error("flavor `{0}` does not accumulate IPA claims")]
    UnexpectedIpaKey(&'static str),
}
