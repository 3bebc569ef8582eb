use ark_ff::{batch_inversion, Field};

/// Evaluates the unique polynomial of degree `< evals.len()` taking the
/// values `evals[i]` at `X = i` at the point `x`, in barycentric form.
pub fn evaluate_from_evals<F: Field>(evals: &[F], x: F) -> F {
    let domain: Vec<F> = (0..evals.len() as u64).map(F::from).collect();
    if let Some(index) = domain.iter().position(|point| *point == x) {
        return evals[index];
    }

    // d_i = (x - i) Π_{j != i} (i - j)
    let mut denominators: Vec<F> = domain
        .iter()
        .enumerate()
        .map(|(i, point_i)| {
            let weight: F = domain
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, point_j)| *point_i - point_j)
                .product();
            weight * (x - point_i)
        })
        .collect();
    batch_inversion(&mut denominators);

    let vanishing: F = domain.iter().map(|point| x - point).product();
    vanishing
        * evals
            .iter()
            .zip(&denominators)
            .map(|(eval, inverse)| *eval * inverse)
            .sum::<F>()
}

/// Dense univariate polynomial, coefficients from low to high degree.
#[cfg(any(test, feature = "prover"))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniPoly<F> {
    pub coeffs: Vec<F>,
}

#[cfg(any(test, feature = "prover"))]
impl<F: Field> UniPoly<F> {
    pub fn from_coeff(coeffs: Vec<F>) -> Self {
        UniPoly { coeffs }
    }

    pub fn zero(len: usize) -> Self {
        UniPoly {
            coeffs: vec![F::zero(); len],
        }
    }

    pub fn evaluate(&self, x: &F) -> F {
        self.coeffs
            .iter()
            .rev()
            .fold(F::zero(), |acc, coeff| acc * x + coeff)
    }

    /// `self += scalar * other`
    pub fn add_scaled(&mut self, other: &Self, scalar: F) {
        if self.coeffs.len() < other.coeffs.len() {
            self.coeffs.resize(other.coeffs.len(), F::zero());
        }
        for (coeff, other) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *coeff += scalar * other;
        }
    }

    /// Synthetic division by `X - root`, returning the quotient and remainder.
    pub fn divide_by_linear(&self, root: F) -> (Self, F) {
        if self.coeffs.is_empty() {
            return (Self::from_coeff(vec![]), F::zero());
        }
        let mut quotient = vec![F::zero(); self.coeffs.len() - 1];
        let mut carry = F::zero();
        for i in (1..self.coeffs.len()).rev() {
            carry = self.coeffs[i] + carry * root;
            quotient[i - 1] = carry;
        }
        let remainder = self.coeffs[0] + carry * root;
        (Self::from_coeff(quotient), remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_std::{test_rng, UniformRand};

    #[test]
    fn barycentric_matches_horner() {
        let mut rng = test_rng();
        let poly = UniPoly::from_coeff((0..7).map(|_| Fr::rand(&mut rng)).collect());
        let evals: Vec<Fr> = (0..7u64).map(|i| poly.evaluate(&Fr::from(i))).collect();

        let x = Fr::rand(&mut rng);
        assert_eq!(evaluate_from_evals(&evals, x), poly.evaluate(&x));
        // points of the domain short-circuit
        assert_eq!(evaluate_from_evals(&evals, Fr::from(3u64)), evals[3]);
    }

    #[test]
    fn synthetic_division() {
        let mut rng = test_rng();
        let poly = UniPoly::from_coeff((0..9).map(|_| Fr::rand(&mut rng)).collect());
        let root = Fr::rand(&mut rng);
        let (quotient, remainder) = poly.divide_by_linear(root);
        assert_eq!(remainder, poly.evaluate(&root));

        let x = Fr::rand(&mut rng);
        assert_eq!(
            quotient.evaluate(&x) * (x - root) + remainder,
            poly.evaluate(&x)
        );
    }
}
