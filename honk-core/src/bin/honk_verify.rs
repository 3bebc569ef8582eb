//! Verifies a Honk proof from files on disk.
//!
//! ```bash
//! honk-verify --flavor ultra --srs srs.bin --vk vk.bin --proof proof.bin
//! RUST_LOG=debug honk-verify --flavor ultra-rollup --srs srs.bin --vk vk.bin \
//!     --proof proof.bin --ipa-vk ipa_vk.bin --ipa-proof ipa_proof.bin
//! ```
//!
//! Exits with 0 if the proof is accepted, 1 if it is rejected and 2 if the
//! inputs could not be loaded.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use ark_serialize::CanonicalDeserialize;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use honk_core::flavor::{
    Flavor, MegaFlavor, MegaZKFlavor, UltraFlavor, UltraKeccakFlavor, UltraRollupFlavor,
};
use honk_core::poly::commitment::ipa::IpaVerificationKey;
use honk_core::poly::commitment::srs::{init_verifier_srs, KzgVerifierKey};
use honk_core::ultra_honk::{HonkProof, HonkVerifier, IpaProof, VerificationKey};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FlavorArg {
    Ultra,
    UltraKeccak,
    UltraRollup,
    Mega,
    MegaZk,
    #[cfg(feature = "starknet")]
    UltraStarknet,
}

#[derive(Parser, Debug)]
#[command(name = "honk-verify", about = "Verify a Honk proof")]
struct Cli {
    #[clap(long, value_enum, default_value = "ultra")]
    flavor: FlavorArg,

    /// KZG verifier key `([1]_1, [1]_2, [τ]_2)`, ark-serialize compressed
    #[clap(long)]
    srs: PathBuf,

    /// Verification key, ark-serialize compressed
    #[clap(long)]
    vk: PathBuf,

    /// Raw proof bytes
    #[clap(long)]
    proof: PathBuf,

    /// IPA verification key, required to check an IPA proof
    #[clap(long)]
    ipa_vk: Option<PathBuf>,

    /// Raw IPA proof bytes. Without `--ipa-vk` the proof is rejected.
    #[clap(long)]
    ipa_proof: Option<PathBuf>,
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_canonical<T: CanonicalDeserialize>(path: &Path) -> Result<T> {
    let bytes = read_bytes(path)?;
    T::deserialize_compressed(bytes.as_slice())
        .with_context(|| format!("failed to deserialize {}", path.display()))
}

fn verify<F: Flavor>(cli: &Cli) -> Result<bool> {
    let vk: VerificationKey = read_canonical(&cli.vk)?;
    let vk = Arc::new(vk);
    let verifier = match &cli.ipa_vk {
        Some(path) => {
            let ipa_key: IpaVerificationKey = read_canonical(path)?;
            HonkVerifier::<F>::with_ipa(vk, Arc::new(ipa_key))
        }
        None => HonkVerifier::<F>::new(vk),
    }
    .context("failed to construct verifier")?;

    let proof = HonkProof::new(read_bytes(&cli.proof)?);
    let ipa_proof = match &cli.ipa_proof {
        Some(path) => IpaProof::new(read_bytes(path)?),
        None => IpaProof::default(),
    };
    Ok(verifier.verify_proof_with_ipa(&proof, &ipa_proof))
}

fn run(cli: &Cli) -> Result<bool> {
    let srs: KzgVerifierKey = read_canonical(&cli.srs)?;
    init_verifier_srs(srs).context("failed to install verifier SRS")?;

    match cli.flavor {
        FlavorArg::Ultra => verify::<UltraFlavor>(cli),
        FlavorArg::UltraKeccak => verify::<UltraKeccakFlavor>(cli),
        FlavorArg::UltraRollup => verify::<UltraRollupFlavor>(cli),
        FlavorArg::Mega => verify::<MegaFlavor>(cli),
        FlavorArg::MegaZk => verify::<MegaZKFlavor>(cli),
        #[cfg(feature = "starknet")]
        FlavorArg::UltraStarknet => verify::<honk_core::flavor::UltraStarknetFlavor>(cli),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => {
            println!("proof accepted");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("proof rejected");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
