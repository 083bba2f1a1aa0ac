//! Dense univariate polynomials, used to measure the degree of subrelation
//! expressions over a sum-check edge.

use ark_ff::{Field, Zero};
use ark_poly::{DenseUVPolynomial, Polynomial as _, univariate::DensePolynomial};
use std::fmt;

/// Polynomial with finite field coefficients.
///
/// Coefficients are stored in ascending order of power, so `[1, 2, 3]`
/// represents 3x² + 2x + 1. Trailing zero coefficients are always trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<F: Field> {
    poly: DensePolynomial<F>,
}

impl<F: Field> Polynomial<F> {
    /// Creates a polynomial from coefficients, dropping trailing zeros.
    pub fn new(coefficients: Vec<F>) -> Self {
        Self {
            poly: DensePolynomial::from_coefficients_vec(coefficients),
        }
    }

    pub fn zero() -> Self {
        Self {
            poly: DensePolynomial::zero(),
        }
    }

    /// Returns the degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.poly.degree()
    }

    pub fn is_zero(&self) -> bool {
        self.poly.is_zero()
    }

    pub fn coefficients(&self) -> &[F] {
        &self.poly.coeffs
    }

    pub fn evaluate(&self, x: F) -> F {
        self.poly.evaluate(&x)
    }

    /// Adds two polynomials.
    pub fn add(&self, other: &Polynomial<F>) -> Polynomial<F> {
        Self {
            poly: &self.poly + &other.poly,
        }
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale(&self, factor: F) -> Polynomial<F> {
        Self::new(self.poly.coeffs.iter().map(|&c| c * factor).collect())
    }

    /// Multiplies the polynomial by the linear factor `(x - root)`.
    pub fn mul_by_root(&self, root: F) -> Polynomial<F> {
        if self.is_zero() {
            return Self::zero();
        }
        let coeffs = &self.poly.coeffs;
        let mut result = vec![F::zero(); coeffs.len() + 1];
        for (i, &coeff) in coeffs.iter().enumerate() {
            result[i + 1] += coeff;
            result[i] -= coeff * root;
        }
        Self::new(result)
    }

    /// Lagrange interpolation through the points `(xs[i], ys[i])`.
    ///
    /// # Returns
    ///
    /// The unique polynomial of degree below `xs.len()` through the points,
    /// or `None` if the slices differ in length or two `xs` coincide.
    pub fn interpolate(xs: &[F], ys: &[F]) -> Option<Polynomial<F>> {
        if xs.len() != ys.len() {
            return None;
        }

        let mut result = Self::zero();
        for (i, (&xi, &yi)) in xs.iter().zip(ys.iter()).enumerate() {
            if yi.is_zero() {
                continue;
            }
            let mut basis = Self::new(vec![F::one()]);
            let mut denominator = F::one();
            for (j, &xj) in xs.iter().enumerate() {
                if i != j {
                    basis = basis.mul_by_root(xj);
                    denominator *= xi - xj;
                }
            }
            let scale = yi * denominator.inverse()?;
            result = result.add(&basis.scale(scale));
        }
        Some(result)
    }

    pub fn from_dense_poly(poly: DensePolynomial<F>) -> Self {
        Self::new(poly.coeffs)
    }

    pub fn into_dense_poly(self) -> DensePolynomial<F> {
        self.poly
    }
}

impl<F: Field> fmt::Display for Polynomial<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = Vec::new();
        for (i, &coeff) in self.coefficients().iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }
            let term = match i {
                0 => format!("{}", coeff),
                1 => format!("{}x", coeff),
                _ => format!("{}x^{}", coeff, i),
            };
            terms.push(term);
        }

        if terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", terms.join(" + "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr;

    #[test]
    fn test_interpolate_recovers_quadratic() {
        // 3x^2 + 2x + 1
        let poly = Polynomial::new(vec![Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)]);
        let xs: Vec<Fr> = (0..5u64).map(Fr::from).collect();
        let ys: Vec<Fr> = xs.iter().map(|&x| poly.evaluate(x)).collect();

        let interpolated = Polynomial::interpolate(&xs, &ys).unwrap();
        assert_eq!(interpolated, poly);
        assert_eq!(interpolated.degree(), 2);
    }

    #[test]
    fn test_interpolate_rejects_repeated_points() {
        let xs = [Fr::from(1u64), Fr::from(1u64)];
        let ys = [Fr::from(2u64), Fr::from(3u64)];
        assert!(Polynomial::interpolate(&xs, &ys).is_none());
        assert!(Polynomial::interpolate(&xs, &ys[..1]).is_none());
    }

    #[test]
    fn test_mul_by_root() {
        // (x + 1)(x - 2) = x^2 - x - 2
        let poly = Polynomial::new(vec![Fr::from(1u64), Fr::from(1u64)]).mul_by_root(Fr::from(2u64));
        assert_eq!(
            poly.coefficients(),
            &[-Fr::from(2u64), -Fr::from(1u64), Fr::from(1u64)]
        );
        assert!(poly.evaluate(Fr::from(2u64)).is_zero());
    }

    #[test]
    fn test_zero_polynomial() {
        let zero = Polynomial::<Fr>::new(vec![Fr::zero(), Fr::zero()]);
        assert!(zero.is_zero());
        assert_eq!(zero.degree(), 0);
        assert_eq!(zero.to_string(), "0");
        assert!(zero.mul_by_root(Fr::from(5u64)).is_zero());
    }

    #[test]
    fn test_dense_poly_round_trip() {
        let poly = Polynomial::new(vec![Fr::from(4u64), Fr::from(0u64), Fr::from(7u64)]);
        let dense = poly.clone().into_dense_poly();
        assert_eq!(Polynomial::from_dense_poly(dense), poly);
    }
}
