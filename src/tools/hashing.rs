//! Challenge derivation for the non-interactive proof systems.
//!
//! All three proof systems derive their challenge from the same transcript
//! hash: SHA-256 over the concatenated byte forms of every public value,
//! followed by the UTF-8 bytes of the vote string, reduced into the response
//! ring of the calling proof system. The byte form of an integer is its
//! minimal-length big-endian representation, with zero mapping to the empty
//! string. Any deviation here breaks verification across implementations, so
//! the transcript is pinned by a test vector below.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::arith::to_bytes_be;

/// Hashes ordered groups of public values and the vote string into a
/// challenge in [0, modulus).
pub(crate) fn challenge(groups: &[&[BigUint]], vote: &str, modulus: &BigUint) -> BigUint {
    let mut digest = Sha256::new();
    for group in groups {
        for elem in *group {
            digest.update(to_bytes_be(elem));
        }
    }
    digest.update(vote.as_bytes());
    BigUint::from_bytes_be(&digest.finalize()) % modulus
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::challenge;
    use crate::params::GroupSet;

    fn uints(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|v| BigUint::from(*v)).collect()
    }

    #[test]
    fn pinned_transcript_vector() {
        // Exercises the zero-serializes-to-empty rule (first element) and
        // multi-byte minimal encodings.
        let elems = uints(&[0, 1, 255, 256, 65536]);
        let q = GroupSet::Small.group_q().order().clone();
        let ch = challenge(&[elems.as_slice()], "yes", &q);
        let expected = BigUint::parse_bytes(
            b"469954055976016740292476756498073605518454624441",
            10,
        )
        .unwrap();
        assert_eq!(ch, expected);
    }

    #[test]
    fn pinned_transcript_vector_small_modulus() {
        let first = uints(&[3, 5]);
        let second = uints(&[7]);
        let ch = challenge(&[first.as_slice(), second.as_slice()], "no", &BigUint::from(97u32));
        assert_eq!(ch, BigUint::from(22u32));
    }

    #[test]
    fn deterministic() {
        let elems = uints(&[17, 23]);
        let modulus = BigUint::from(1000003u64);
        assert_eq!(
            challenge(&[elems.as_slice()], "yes", &modulus),
            challenge(&[elems.as_slice()], "yes", &modulus)
        );
    }

    #[test]
    fn vote_bytes_matter() {
        let elems = uints(&[17, 23]);
        let modulus = GroupSet::Small.group_q().order().clone();
        assert_ne!(
            challenge(&[elems.as_slice()], "yes", &modulus),
            challenge(&[elems.as_slice()], "yes ", &modulus)
        );
    }
}
