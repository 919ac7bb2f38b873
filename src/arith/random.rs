//! Uniform sampling of big integers from a cryptographically secure source.
//!
//! All sampling takes the RNG as `&mut impl CryptoRngCore`, so a non-secure
//! generator is rejected at the type level. A failing entropy source aborts
//! inside the generator itself.

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;

/// Draws up to `bitlen` uniform random bits, big-endian.
///
/// The top byte is masked down to `bitlen % 8` bits. When `exact` is set, the
/// highest requested bit is forced to one so the result has exactly `bitlen`
/// bits.
pub fn random_bits(rng: &mut impl CryptoRngCore, bitlen: usize, exact: bool) -> Vec<u8> {
    let mut bytes = vec![0u8; (bitlen + 7) / 8];
    rng.fill_bytes(&mut bytes);
    let highbits = bitlen & 7;
    if highbits != 0 {
        bytes[0] &= !(0xffu8 << highbits);
    }
    if exact {
        if highbits != 0 {
            bytes[0] |= 1 << (highbits - 1);
        } else {
            bytes[0] |= 0x80;
        }
    }
    bytes
}

/// Chooses a uniform random integer in (0, `excl_max`) by rejection sampling
/// over `excl_max`'s bit length.
pub fn rand_int(rng: &mut impl CryptoRngCore, excl_max: &BigUint) -> BigUint {
    let bitlen = excl_max.bits() as usize;
    loop {
        let i = BigUint::from_bytes_be(&random_bits(rng, bitlen, false));
        if !i.is_zero() && &i < excl_max {
            return i;
        }
    }
}

/// Chooses a uniform random integer in [`min`, `excl_max`).
pub fn rand_int_in_range(rng: &mut impl CryptoRngCore, min: &BigUint, excl_max: &BigUint) -> BigUint {
    let bitlen = excl_max.bits() as usize;
    loop {
        let i = BigUint::from_bytes_be(&random_bits(rng, bitlen, false));
        if &i >= min && &i < excl_max {
            return i;
        }
    }
}
