//! Dense univariate polynomials over Z_q, used as the credential polynomial:
//! the board multiplies in a factor (X - u) for every admitted credential u,
//! so the polynomial's roots are exactly the admitted credentials.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::arith::ZModPrime;
use crate::error::Error;

/// A polynomial in Z_q[X], coefficients ordered ascending by degree.
///
/// All operations return new polynomials; operands are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polynomial {
    #[serde(rename = "coeffs", with = "crate::tools::serde_decimal::vec")]
    coeffs: Vec<BigUint>,
    #[serde(rename = "zmod")]
    ring: ZModPrime,
}

impl Polynomial {
    /// Creates a polynomial from coefficients and the ring they live in.
    pub fn new(coeffs: Vec<BigUint>, ring: ZModPrime) -> Self {
        Self { coeffs, ring }
    }

    /// The constant polynomial 1, the credential polynomial of an empty
    /// voter set.
    pub fn one(ring: ZModPrime) -> Self {
        Self::new(vec![BigUint::one()], ring)
    }

    pub fn ring(&self) -> &ZModPrime {
        &self.ring
    }

    pub fn coeffs(&self) -> &[BigUint] {
        &self.coeffs
    }

    /// The coefficient of X^i, zero beyond the stored length.
    pub fn coeff(&self, i: usize) -> BigUint {
        self.coeffs.get(i).cloned().unwrap_or_else(BigUint::zero)
    }

    /// The largest i with a nonzero coefficient, or 0 for the zero
    /// polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|c| !c.is_zero())
            .unwrap_or(0)
    }

    /// Drops trailing zero coefficients, keeping a single coefficient for
    /// the zero polynomial.
    pub fn trim(&self) -> Polynomial {
        let len = self.degree() + 1;
        Self::new(self.coeffs[..len.min(self.coeffs.len())].to_vec(), self.ring.clone())
    }

    /// Adds two polynomials, padding the shorter operand with zeros.
    pub fn add(&self, other: &Polynomial) -> Result<Polynomial, Error> {
        if self.ring != other.ring {
            return Err(Error::RingMismatch);
        }
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut coeffs = Vec::with_capacity(len);
        for i in 0..len {
            let mut value = BigUint::zero();
            if let Some(c) = self.coeffs.get(i) {
                value = self.ring.add(&value, c);
            }
            if let Some(c) = other.coeffs.get(i) {
                value = self.ring.add(&value, c);
            }
            coeffs.push(value);
        }
        Ok(Self::new(coeffs, self.ring.clone()))
    }

    /// Multiplies every coefficient by a scalar.
    pub fn mul_scalar(&self, scalar: &BigUint) -> Polynomial {
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| self.ring.mul(c, scalar))
            .collect();
        Self::new(coeffs, self.ring.clone()).trim()
    }

    /// Multiplies two polynomials by coefficient convolution.
    pub fn mul(&self, other: &Polynomial) -> Result<Polynomial, Error> {
        if self.ring != other.ring {
            return Err(Error::RingMismatch);
        }
        Ok(Self::new(self.mul_raw(&other.coeffs), self.ring.clone()))
    }

    fn mul_raw(&self, other: &[BigUint]) -> Vec<BigUint> {
        if self.coeffs.is_empty() || other.is_empty() {
            return vec![BigUint::zero()];
        }
        let mut coeffs = vec![BigUint::zero(); self.coeffs.len() + other.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.iter().enumerate() {
                coeffs[i + j] = self.ring.add(&coeffs[i + j], &self.ring.mul(a, b));
            }
        }
        coeffs
    }

    /// Admits the credential `u` by multiplying with the factor (X - u).
    pub fn include_credential(&self, u: &BigUint) -> Polynomial {
        let factor = [self.ring.additive_invert(u), BigUint::one()];
        Self::new(self.mul_raw(&factor), self.ring.clone())
    }

    /// Evaluates the polynomial at `x` by Horner's rule.
    pub fn evaluate(&self, x: &BigUint) -> BigUint {
        let mut acc = BigUint::zero();
        for c in self.coeffs.iter().rev() {
            acc = self.ring.add(&self.ring.mul(&acc, x), c);
        }
        acc
    }
}
