use std::marker::PhantomData;

use ark_bn254::{Fr, G1Affine};
use ark_ff::Zero;

use crate::flavor::entities::{AllEntities, NUM_ALL_ENTITIES};
use crate::flavor::Flavor;
use crate::poly::pow_poly::PowPolynomial;
use crate::poly::unipoly::evaluate_from_evals;
use crate::relations::{RelationParameters, RelationSet};
use crate::transcripts::ProofReader;
use crate::utils::errors::ProofVerifyError;

pub(crate) const LIBRA_COMMITMENT_LABEL: &str = "Libra:commitment";
pub(crate) const LIBRA_SUM_LABEL: &str = "Libra:sum";
pub(crate) const LIBRA_CHALLENGE_LABEL: &str = "Libra:challenge";
pub(crate) const LIBRA_EVALUATION_LABEL: &str = "Libra:evaluation";
pub(crate) const SUMCHECK_UNIVARIATE_LABEL: &str = "Sumcheck:univariate";
pub(crate) const SUMCHECK_CHALLENGE_LABEL: &str = "Sumcheck:u";
pub(crate) const SUMCHECK_EVALUATIONS_LABEL: &str = "Sumcheck:evaluations";

/// Commitment to the Libra masking polynomial together with its claimed
/// evaluation at the sumcheck point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LibraOpening {
    pub commitment: G1Affine,
    pub evaluation: Fr,
}

#[derive(Clone, Debug)]
pub struct SumcheckOutput {
    pub challenge_point: Vec<Fr>,
    pub claimed_evaluations: AllEntities<Fr>,
    pub libra: Option<LibraOpening>,
}

/// Verifies `Σ_{x ∈ {0,1}^d} pow_β(x) Σ_k α^k R_k(x) = 0` for the relation set
/// of `F`, reducing it to claimed evaluations at a random point.
pub struct SumcheckVerifier<'a, F: Flavor> {
    relation_parameters: &'a RelationParameters<Fr>,
    alpha: Fr,
    gate_challenges: &'a [Fr],
    _flavor: PhantomData<F>,
}

impl<'a, F: Flavor> SumcheckVerifier<'a, F> {
    pub fn new(
        relation_parameters: &'a RelationParameters<Fr>,
        alpha: Fr,
        gate_challenges: &'a [Fr],
    ) -> Self {
        SumcheckVerifier {
            relation_parameters,
            alpha,
            gate_challenges,
            _flavor: PhantomData,
        }
    }

    #[tracing::instrument(skip_all, name = "Sumcheck::verify")]
    pub fn verify(
        &self,
        reader: &mut ProofReader<'_, F::Transcript>,
    ) -> Result<SumcheckOutput, ProofVerifyError> {
        let num_rounds = self.gate_challenges.len();

        // ZK flavors mask the round univariates with λ·g, whose hypercube sum
        // is sent up front.
        let libra = if F::HAS_ZK {
            let commitment: G1Affine = reader.receive(LIBRA_COMMITMENT_LABEL)?;
            let sum: Fr = reader.receive(LIBRA_SUM_LABEL)?;
            let challenge: Fr = reader.challenge(LIBRA_CHALLENGE_LABEL);
            Some((commitment, sum, challenge))
        } else {
            None
        };
        let mut target = libra.map_or(Fr::zero(), |(_, sum, challenge)| challenge * sum);

        let mut pow = PowPolynomial::new(self.gate_challenges.to_vec());
        let mut challenge_point = Vec::with_capacity(num_rounds);
        for round in 0..num_rounds {
            let univariate: Vec<Fr> =
                reader.receive_many(SUMCHECK_UNIVARIATE_LABEL, F::BATCHED_RELATION_PARTIAL_LENGTH)?;
            if univariate[0] + univariate[1] != target {
                tracing::debug!(round, "sumcheck round check failed");
                return Err(ProofVerifyError::SumcheckRoundMismatch { round });
            }
            let u: Fr = reader.challenge(SUMCHECK_CHALLENGE_LABEL);
            target = evaluate_from_evals(&univariate, u);
            pow.partially_evaluate(u);
            challenge_point.push(u);
        }

        let evaluations: Vec<Fr> =
            reader.receive_many(SUMCHECK_EVALUATIONS_LABEL, NUM_ALL_ENTITIES)?;
        let claimed_evaluations = AllEntities::from_iter_exact(evaluations).ok_or(
            ProofVerifyError::MalformedProof {
                label: SUMCHECK_EVALUATIONS_LABEL,
                offset: reader.bytes_read(),
            },
        )?;

        let mut full_evaluation = pow.partial_evaluation()
            * F::Relations::evaluate_batched(
                &claimed_evaluations,
                self.relation_parameters,
                self.alpha,
            );
        let libra = match libra {
            Some((commitment, _, challenge)) => {
                let evaluation: Fr = reader.receive(LIBRA_EVALUATION_LABEL)?;
                full_evaluation += challenge * evaluation;
                Some(LibraOpening {
                    commitment,
                    evaluation,
                })
            }
            None => None,
        };

        if full_evaluation != target {
            return Err(ProofVerifyError::SumcheckFinalMismatch);
        }

        Ok(SumcheckOutput {
            challenge_point,
            claimed_evaluations,
            libra,
        })
    }
}
