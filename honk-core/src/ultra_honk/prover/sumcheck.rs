use ark_bn254::Fr;
use ark_ff::Zero;
use rayon::prelude::*;

use crate::flavor::entities::AllEntities;
use crate::flavor::Flavor;
use crate::poly::pow_poly::PowPolynomial;
use crate::relations::{RelationParameters, RelationSet};
use crate::subprotocols::sumcheck::{
    LIBRA_EVALUATION_LABEL, SUMCHECK_CHALLENGE_LABEL, SUMCHECK_EVALUATIONS_LABEL,
    SUMCHECK_UNIVARIATE_LABEL,
};
use crate::transcripts::ProofWriter;

pub(super) struct SumcheckProverOutput {
    pub challenge_point: Vec<Fr>,
    pub libra_evaluation: Option<Fr>,
}

/// `table[2j] + t (table[2j+1] - table[2j])`
fn extend(table: &[Fr], j: usize, t: Fr) -> Fr {
    table[2 * j] + t * (table[2 * j + 1] - table[2 * j])
}

fn bind(table: &mut Vec<Fr>, u: Fr) {
    let half = table.len() / 2;
    for j in 0..half {
        table[j] = extend(table, j, u);
    }
    table.truncate(half);
}

/// Naive sumcheck over full tables, evaluating every round univariate at
/// `0..BATCHED_RELATION_PARTIAL_LENGTH`.
#[tracing::instrument(skip_all, name = "Sumcheck::prove")]
pub(super) fn prove<F: Flavor>(
    writer: &mut ProofWriter<F::Transcript>,
    tables: AllEntities<Vec<Fr>>,
    relation_parameters: &RelationParameters<Fr>,
    alpha: Fr,
    gate_challenges: &[Fr],
    libra: Option<(Vec<Fr>, Fr)>,
) -> SumcheckProverOutput {
    let mut tables = tables.into_vec();
    let mut pow = PowPolynomial::new(gate_challenges.to_vec()).evals();
    let (mut libra_table, libra_challenge) = match libra {
        Some((table, challenge)) => (Some(table), challenge),
        None => (None, Fr::zero()),
    };

    let mut challenge_point = Vec::with_capacity(gate_challenges.len());
    for _ in 0..gate_challenges.len() {
        let half = pow.len() / 2;
        let univariate: Vec<Fr> = (0..F::BATCHED_RELATION_PARTIAL_LENGTH)
            .into_par_iter()
            .map(|t| {
                let t = Fr::from(t as u64);
                let mut acc = Fr::zero();
                for j in 0..half {
                    let evals = AllEntities::from_iter_exact(
                        tables.iter().map(|table| extend(table, j, t)),
                    )
                    .expect("one table per entity");
                    acc += extend(&pow, j, t)
                        * F::Relations::evaluate_batched(&evals, relation_parameters, alpha);
                    if let Some(libra_table) = &libra_table {
                        acc += libra_challenge * extend(libra_table, j, t);
                    }
                }
                acc
            })
            .collect();
        writer.send_many(SUMCHECK_UNIVARIATE_LABEL, &univariate);

        let u: Fr = writer.challenge(SUMCHECK_CHALLENGE_LABEL);
        for table in tables
            .iter_mut()
            .chain([&mut pow])
            .chain(libra_table.as_mut())
        {
            bind(table, u);
        }
        challenge_point.push(u);
    }

    let evaluations: Vec<Fr> = tables.iter().map(|table| table[0]).collect();
    writer.send_many(SUMCHECK_EVALUATIONS_LABEL, &evaluations);
    let libra_evaluation = libra_table.map(|table| table[0]);
    if let Some(evaluation) = &libra_evaluation {
        writer.send(LIBRA_EVALUATION_LABEL, evaluation);
    }

    SumcheckProverOutput {
        challenge_point,
        libra_evaluation,
    }
}
