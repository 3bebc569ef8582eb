use ark_ff::Field;

/// The gate-separator polynomial `pow_β(X) = Π_i (1 + X_i (β_i - 1))`.
///
/// Sumcheck multiplies the batched relation by `pow_β` so that the claim
/// `Σ_x pow_β(x) F(x) = 0` implies `F` vanishes on every row with high
/// probability. Variables are bound low bit first, matching the row index
/// layout of the prover's tables.
pub struct PowPolynomial<F> {
    betas: Vec<F>,
    partial_evaluation: F,
    current_round: usize,
}

impl<F: Field> PowPolynomial<F> {
    pub fn new(betas: Vec<F>) -> Self {
        PowPolynomial {
            betas,
            partial_evaluation: F::one(),
            current_round: 0,
        }
    }

    /// Binds the next variable to `challenge`.
    pub fn partially_evaluate(&mut self, challenge: F) {
        let beta = self.betas[self.current_round];
        self.partial_evaluation *= F::one() + challenge * (beta - F::one());
        self.current_round += 1;
    }

    /// `Π_{i < round} (1 + u_i (β_i - 1))` over the variables bound so far.
    pub fn partial_evaluation(&self) -> F {
        self.partial_evaluation
    }

    #[cfg(test)]
    pub fn evaluate(&self, point: &[F]) -> F {
        assert_eq!(self.betas.len(), point.len());
        self.betas
            .iter()
            .zip(point)
            .map(|(beta, u)| F::one() + *u * (*beta - F::one()))
            .product()
    }

    /// Computes the table `{pow_β(x) : x ∈ {0, 1}^n}`, where bit `i` of the
    /// index selects `β_i`.
    #[cfg(any(test, feature = "prover"))]
    #[tracing::instrument(skip_all, name = "PowPolynomial::evals")]
    pub fn evals(&self) -> Vec<F> {
        let mut evals = Vec::with_capacity(1 << self.betas.len());
        evals.push(F::one());
        for beta in &self.betas {
            let high: Vec<F> = evals.iter().map(|eval| *eval * beta).collect();
            evals.extend(high);
        }
        evals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_std::{test_rng, UniformRand};

    #[test]
    fn table_matches_boolean_evaluations() {
        let mut rng = test_rng();
        let betas: Vec<Fr> = (0..4).map(|_| Fr::rand(&mut rng)).collect();
        let pow = PowPolynomial::new(betas.clone());
        let evals = pow.evals();
        assert_eq!(evals.len(), 16);
        for (index, eval) in evals.iter().enumerate() {
            let point: Vec<Fr> = (0..4)
                .map(|bit| Fr::from(((index >> bit) & 1) as u64))
                .collect();
            assert_eq!(*eval, pow.evaluate(&point));
        }
    }

    #[test]
    fn partial_evaluation_accumulates() {
        let mut rng = test_rng();
        let betas: Vec<Fr> = (0..5).map(|_| Fr::rand(&mut rng)).collect();
        let point: Vec<Fr> = (0..5).map(|_| Fr::rand(&mut rng)).collect();
        let mut pow = PowPolynomial::new(betas);
        for u in &point {
            pow.partially_evaluate(*u);
        }
        assert_eq!(pow.partial_evaluation(), pow.evaluate(&point));
    }
}
