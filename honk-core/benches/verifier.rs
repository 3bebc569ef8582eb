use std::sync::Arc;

use ark_bn254::Fr;
use ark_std::UniformRand;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use honk_core::flavor::{MegaZKFlavor, UltraFlavor};
use honk_core::poly::commitment::srs::init_verifier_srs;
use honk_core::ultra_honk::prover::{example_circuit, HonkProver, ProverSrs};
use honk_core::ultra_honk::{HonkProof, HonkVerifier};
use honk_core::Flavor;

const LOG_SIZES: [usize; 3] = [8, 10, 12];

fn prove<F: Flavor>(srs: &ProverSrs, log_n: usize) -> (HonkVerifier<F>, HonkProof) {
    let circuit = example_circuit(log_n);
    let prover = HonkProver::<F>::new(srs, &circuit);
    let vk = Arc::new(prover.verification_key());
    let proof = prover.prove(&mut ChaCha20Rng::seed_from_u64(0)).proof;
    let verifier = HonkVerifier::new(vk).expect("valid verification key");
    (verifier, proof)
}

fn bench_verify<F: Flavor>(c: &mut Criterion, srs: &ProverSrs) {
    let mut group = c.benchmark_group(format!("{} verify", F::NAME));
    group.sample_size(20);
    for log_n in LOG_SIZES {
        let (verifier, proof) = prove::<F>(srs, log_n);
        assert!(verifier.verify_proof(&proof));
        group.bench_with_input(BenchmarkId::from_parameter(log_n), &proof, |bench, proof| {
            bench.iter(|| verifier.verify_proof(black_box(proof)))
        });
    }
    group.finish();
}

fn bench_verifiers(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let srs = ProverSrs::from_tau(Fr::rand(&mut rng), 1 << LOG_SIZES[LOG_SIZES.len() - 1]);
    init_verifier_srs(srs.verifier_key().clone()).expect("fresh process");

    bench_verify::<UltraFlavor>(c, &srs);
    bench_verify::<MegaZKFlavor>(c, &srs);
}

criterion_group!(benches, bench_verifiers);
criterion_main!(benches);
