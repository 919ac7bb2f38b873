//! Generalized Pedersen commitments.
//!
//! A scheme over a group G with randomization generator $h_r$ and message
//! generators $h_1 ... h_n$ commits to $n$ messages at a time:
//! $Com(r; m_1 ... m_n) = h_r^r \prod_i h_i^{m_i} \mod m$.
//! The commitment is perfectly hiding for uniform $r$ and computationally
//! binding under the discrete logarithm assumption in G.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::arith::GStarModPrime;
use crate::error::Error;

/// A Pedersen commitment scheme over a prime-order group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenCommitmentScheme {
    /// The cyclic multiplicative group the generators live in.
    #[serde(rename = "g")]
    group: GStarModPrime,
    /// The randomization generator h_r.
    #[serde(rename = "hr", with = "crate::tools::serde_decimal")]
    h_r: BigUint,
    /// The message generators h_1 to h_n.
    #[serde(rename = "hm", with = "crate::tools::serde_decimal::vec")]
    h_m: Vec<BigUint>,
}

impl PedersenCommitmentScheme {
    /// Creates a scheme from the given group and generators. Every generator
    /// must be an element of the group.
    pub fn new(
        group: GStarModPrime,
        h_r: BigUint,
        h_m: Vec<BigUint>,
    ) -> Result<Self, Error> {
        if !group.contains(&h_r) || h_m.iter().any(|h| !group.contains(h)) {
            return Err(Error::GeneratorOutsideGroup);
        }
        Ok(Self { group, h_r, h_m })
    }

    pub fn group(&self) -> &GStarModPrime {
        &self.group
    }

    pub fn randomness_generator(&self) -> &BigUint {
        &self.h_r
    }

    pub fn message_generators(&self) -> &[BigUint] {
        &self.h_m
    }

    /// Commits to `msgs` with randomness `r`.
    ///
    /// The number of messages must equal the number of message generators,
    /// and `r` and every message must be an element of the order ring
    /// [0, ord(G)).
    pub fn commit(&self, r: &BigUint, msgs: &[&BigUint]) -> Result<BigUint, Error> {
        if msgs.len() != self.h_m.len() {
            return Err(Error::MessageCount {
                expected: self.h_m.len(),
                got: msgs.len(),
            });
        }
        let order = self.group.order();
        if r >= order || msgs.iter().any(|msg| *msg >= order) {
            return Err(Error::ValueOutOfRange);
        }

        let mut product = self.group.exp(&self.h_r, r);
        for (h, msg) in self.h_m.iter().zip(msgs) {
            product = self.group.mul(&product, &self.group.exp(h, msg));
        }
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rand_core::OsRng;

    use super::PedersenCommitmentScheme;
    use crate::arith::GStarModPrime;
    use crate::error::Error;

    fn toy_scheme(n_msgs: usize) -> PedersenCommitmentScheme {
        let group = GStarModPrime::new(BigUint::from(23u32), BigUint::from(11u32)).unwrap();
        let h_r = group.random_generator(&mut OsRng);
        let h_m = (0..n_msgs)
            .map(|_| group.random_generator(&mut OsRng))
            .collect();
        PedersenCommitmentScheme::new(group, h_r, h_m).unwrap()
    }

    #[test]
    fn commitment_matches_formula() {
        let scheme = toy_scheme(2);
        let r = BigUint::from(5u32);
        let m1 = BigUint::from(7u32);
        let m2 = BigUint::from(3u32);
        let commitment = scheme.commit(&r, &[&m1, &m2]).unwrap();

        let group = scheme.group();
        let expected = group.mul(
            &group.mul(
                &group.exp(scheme.randomness_generator(), &r),
                &group.exp(&scheme.message_generators()[0], &m1),
            ),
            &group.exp(&scheme.message_generators()[1], &m2),
        );
        assert_eq!(commitment, expected);
        assert!(group.contains(&commitment));
    }

    #[test]
    fn rejects_wrong_message_count() {
        let scheme = toy_scheme(2);
        let r = BigUint::from(5u32);
        let m = BigUint::from(7u32);
        assert_eq!(
            scheme.commit(&r, &[&m]),
            Err(Error::MessageCount {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn rejects_values_outside_order_ring() {
        let scheme = toy_scheme(1);
        let ord = BigUint::from(11u32);
        let ok = BigUint::from(10u32);
        assert_eq!(scheme.commit(&ord, &[&ok]), Err(Error::ValueOutOfRange));
        assert_eq!(scheme.commit(&ok, &[&ord]), Err(Error::ValueOutOfRange));
        assert!(scheme.commit(&ok, &[&ok]).is_ok());
    }

    #[test]
    fn rejects_generator_outside_group() {
        let group = GStarModPrime::new(BigUint::from(23u32), BigUint::from(11u32)).unwrap();
        let h_r = group.random_generator(&mut OsRng);
        // 5 generates all of Z*_23, so it is not in the order-11 subgroup.
        let res = PedersenCommitmentScheme::new(group, h_r, vec![BigUint::from(5u32)]);
        assert_eq!(res, Err(Error::GeneratorOutsideGroup));
    }
}
