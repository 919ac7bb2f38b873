//! Prime-order subgroups of the multiplicative group of integers modulo a
//! prime, also known as Schnorr groups. The decisional Diffie-Hellman
//! assumption is believed to hold in such groups.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::random::rand_int_in_range;
use super::ring::ZModPrime;
use crate::error::Error;
use crate::tools::serde_decimal;

/// The subgroup of Z*_m of prime order q, for primes m and q with
/// q | (m - 1).
///
/// An integer v is an element of the group iff 1 <= v < m and
/// v^q = 1 (mod m).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GStarModPrime {
    /// The group's modulus m. A prime number.
    #[serde(rename = "mod", with = "crate::tools::serde_decimal")]
    modulus: BigUint,
    /// The group's order q. A prime number dividing m - 1.
    #[serde(rename = "ord", with = "crate::tools::serde_decimal")]
    order: BigUint,
}

impl GStarModPrime {
    /// Creates the group of order `order` inside Z*_`modulus`.
    ///
    /// Both arguments must be prime; primality is the responsibility of the
    /// parameter ceremony and is not re-checked here. The structural
    /// requirement q | (m - 1) is checked and violating it is an error.
    pub fn new(modulus: BigUint, order: BigUint) -> Result<Self, Error> {
        if order <= BigUint::one() || order >= modulus {
            return Err(Error::InvalidGroup);
        }
        if ((&modulus - 1u32) % &order) != BigUint::zero() {
            return Err(Error::InvalidGroup);
        }
        Ok(Self { modulus, order })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// The ring of integers modulo this group's order.
    pub fn z_mod_order(&self) -> ZModPrime {
        ZModPrime::new(self.order.clone())
    }

    /// The multiplicative group Z*_m of which this group is a subgroup.
    pub fn z_star_mod_modulus(&self) -> ZStarModPrime {
        ZStarModPrime::new(self.modulus.clone())
    }

    /// The multiplicative group of integers modulo this group's order.
    pub fn z_star_mod_order(&self) -> ZStarModPrime {
        ZStarModPrime::new(self.order.clone())
    }

    /// The cofactor (m - 1) / q of the Schnorr group construction.
    pub fn cofactor(&self) -> BigUint {
        self.z_star_mod_modulus().order() / &self.order
    }

    /// The identity element, always 1.
    pub fn identity_element(&self) -> BigUint {
        BigUint::one()
    }

    /// Checks group membership with the full order test v^q = 1 (mod m).
    pub fn contains(&self, value: &BigUint) -> bool {
        !value.is_zero()
            && value < &self.modulus
            && value.modpow(&self.order, &self.modulus).is_one()
    }

    /// A random group element, obtained by raising a random element of Z*_m
    /// to the cofactor.
    pub fn random_element(&self, rng: &mut impl CryptoRngCore) -> BigUint {
        let elem = self.z_star_mod_modulus().random_element(rng);
        elem.modpow(&self.cofactor(), &self.modulus)
    }

    /// A randomly selected generator, per FIPS 186-4 appendix A.2.1: sample
    /// Z*_m elements and raise to the cofactor until the result is not the
    /// identity.
    pub fn random_generator(&self, rng: &mut impl CryptoRngCore) -> BigUint {
        loop {
            let candidate = self.random_element(rng);
            if !candidate.is_one() {
                return candidate;
            }
        }
    }

    /// The deterministic default generator: the first h = 1, 2, ... whose
    /// cofactor power is not the identity.
    pub fn default_generator(&self) -> BigUint {
        let cofactor = self.cofactor();
        let mut h = BigUint::one();
        loop {
            let candidate = h.modpow(&cofactor, &self.modulus);
            if !candidate.is_one() {
                return candidate;
            }
            h += 1u32;
        }
    }

    pub fn mul(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x * y) % &self.modulus
    }

    pub fn exp(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// The multiplicative inverse of a group element, or `None` for values
    /// sharing a factor with the modulus.
    pub fn invert(&self, value: &BigUint) -> Option<BigUint> {
        value.modinv(&self.modulus)
    }
}

/// The multiplicative group of integers modulo a prime p, written Z*_p.
/// Its order is p - 1. On the wire the group is just its modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZStarModPrime {
    modulus: BigUint,
}

impl Serialize for ZStarModPrime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_decimal::serialize(&self.modulus, serializer)
    }
}

impl<'de> Deserialize<'de> for ZStarModPrime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_decimal::deserialize(deserializer).map(Self::new)
    }
}

impl ZStarModPrime {
    /// Creates the group with modulus `p`, which must be prime.
    pub fn new(modulus: BigUint) -> Self {
        Self { modulus }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn order(&self) -> BigUint {
        &self.modulus - 1u32
    }

    pub fn identity_element(&self) -> BigUint {
        BigUint::one()
    }

    /// A random element, uniform in [1, p).
    pub fn random_element(&self, rng: &mut impl CryptoRngCore) -> BigUint {
        rand_int_in_range(rng, &BigUint::one(), &self.modulus)
    }

    pub fn mul(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x * y) % &self.modulus
    }

    pub fn exp(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    pub fn invert(&self, value: &BigUint) -> Option<BigUint> {
        value.modinv(&self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::One;
    use rand_core::OsRng;

    use super::{GStarModPrime, ZStarModPrime};
    use crate::error::Error;
    use crate::params::GroupSet;

    fn toy_group() -> GStarModPrime {
        // 23 = 2 * 11 + 1
        GStarModPrime::new(BigUint::from(23u32), BigUint::from(11u32)).unwrap()
    }

    #[test]
    fn rejects_order_not_dividing() {
        // 7 does not divide 22.
        let res = GStarModPrime::new(BigUint::from(23u32), BigUint::from(7u32));
        assert_eq!(res, Err(Error::InvalidGroup));
        // An order as large as the modulus is rejected as well.
        let res = GStarModPrime::new(BigUint::from(23u32), BigUint::from(23u32));
        assert_eq!(res, Err(Error::InvalidGroup));
    }

    #[test]
    fn rejects_mismatched_election_primes() {
        let p = GroupSet::Small.group_p();
        let q = GroupSet::Small.group_q();
        // ord(G_q) does not divide mod(G_p) - 1.
        let res = GStarModPrime::new(p.modulus().clone(), q.order().clone());
        assert_eq!(res, Err(Error::InvalidGroup));
    }

    #[test]
    fn membership_of_random_elements() {
        let group = toy_group();
        for _ in 0..16 {
            assert!(group.contains(&group.random_element(&mut OsRng)));
        }
        assert!(!group.contains(&BigUint::from(0u8)));
        assert!(!group.contains(group.modulus()));
    }

    #[test]
    fn random_generator_has_group_order() {
        let group = toy_group();
        let gen = group.random_generator(&mut OsRng);
        assert!(!gen.is_one());
        assert!(group.exp(&gen, group.order()).is_one());
    }

    #[test]
    fn generators_in_election_group() {
        let group = GroupSet::Small.group_q();
        let gen = group.random_generator(&mut OsRng);
        assert!(group.contains(&gen));
        assert!(group.exp(&gen, group.order()).is_one());
    }

    #[test]
    fn default_generator_is_deterministic() {
        let group = toy_group();
        let first = group.default_generator();
        assert_eq!(first, group.default_generator());
        assert!(group.contains(&first));
    }

    #[test]
    fn inversion() {
        let group = toy_group();
        let elem = group.random_element(&mut OsRng);
        let inv = group.invert(&elem).unwrap();
        assert!(group.mul(&elem, &inv).is_one());
    }

    #[test]
    fn z_star_sampling_excludes_zero() {
        let group = ZStarModPrime::new(BigUint::from(23u32));
        for _ in 0..32 {
            let elem = group.random_element(&mut OsRng);
            assert!(elem >= BigUint::one() && &elem < group.modulus());
        }
    }

    #[test]
    fn cofactor_of_election_groups() {
        let gp = GroupSet::Small.group_p();
        let gq = GroupSet::Small.group_q();
        assert_eq!(gq.modulus(), gp.order());
        assert!((&(gp.modulus() - 1u32) % gp.order()).bits() == 0);
        assert!((&(gq.modulus() - 1u32) % gq.order()).bits() == 0);
    }
}
