use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::random::rand_int;
use crate::tools::serde_decimal;

/// The ring of integers modulo a prime p, written Z_p.
///
/// Elements are residues in [0, p); addition and multiplication reduce
/// modulo p. On the wire the ring is just its modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZModPrime {
    modulus: BigUint,
}

impl Serialize for ZModPrime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_decimal::serialize(&self.modulus, serializer)
    }
}

impl<'de> Deserialize<'de> for ZModPrime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_decimal::deserialize(deserializer).map(Self::new)
    }
}

impl ZModPrime {
    /// Creates the ring with modulus `p`, which must be prime.
    pub fn new(modulus: BigUint) -> Self {
        Self { modulus }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The ring's order, p - 1 for prime p.
    pub fn order(&self) -> BigUint {
        &self.modulus - 1u32
    }

    pub fn contains(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }

    pub fn additive_identity(&self) -> BigUint {
        BigUint::zero()
    }

    pub fn multiplicative_identity(&self) -> BigUint {
        BigUint::one()
    }

    pub fn random_element(&self, rng: &mut impl CryptoRngCore) -> BigUint {
        rand_int(rng, &self.modulus)
    }

    pub fn add(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x + y) % &self.modulus
    }

    pub fn mul(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x * y) % &self.modulus
    }

    pub fn exp(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// The additive inverse p - x mod p. Operands outside [0, p) are reduced
    /// first.
    pub fn additive_invert(&self, x: &BigUint) -> BigUint {
        let reduced = x % &self.modulus;
        if reduced.is_zero() {
            reduced
        } else {
            &self.modulus - reduced
        }
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rand_core::OsRng;

    use super::ZModPrime;

    fn z23() -> ZModPrime {
        ZModPrime::new(BigUint::from(23u32))
    }

    #[test]
    fn ring_operations() {
        let ring = z23();
        let x = BigUint::from(17u32);
        let y = BigUint::from(19u32);
        assert_eq!(ring.add(&x, &y), BigUint::from(13u32));
        assert_eq!(ring.mul(&x, &y), BigUint::from(1u32));
        assert_eq!(ring.exp(&x, &y), BigUint::from(5u32));
        assert_eq!(ring.order(), BigUint::from(22u32));
    }

    #[test]
    fn additive_inverse_cancels() {
        let ring = z23();
        for value in 0u32..23 {
            let x = BigUint::from(value);
            let inv = ring.additive_invert(&x);
            assert_eq!(ring.add(&x, &inv), BigUint::from(0u32));
        }
        // Operands beyond the modulus reduce first.
        assert_eq!(
            ring.additive_invert(&BigUint::from(24u32)),
            BigUint::from(22u32)
        );
        assert_eq!(
            ring.additive_invert(&BigUint::from(46u32)),
            BigUint::from(0u32)
        );
    }

    #[test]
    fn random_element_in_range() {
        let ring = z23();
        for _ in 0..64 {
            assert!(ring.contains(&ring.random_element(&mut OsRng)));
        }
    }
}
