//! Modular arithmetic substrate: the prime-order Schnorr groups the protocol
//! lives in, the rings their orders induce, and uniform sampling.

mod group;
mod random;
mod ring;

pub use group::{GStarModPrime, ZStarModPrime};
pub use random::{rand_int, rand_int_in_range, random_bits};
pub use ring::ZModPrime;

use num_bigint::BigUint;
use num_traits::Zero;

/// The canonical byte form of a big integer: minimal-length big-endian bytes,
/// with zero mapping to the empty string.
///
/// This form feeds the Fiat-Shamir transcript hash and doubles as the map key
/// under which the bulletin board indexes accepted ballots by their election
/// pseudonym.
pub fn to_bytes_be(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}
