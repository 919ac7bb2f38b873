//! Preimage equality proof.
//!
//! Proves that the $\beta$ hidden inside the representation commitment $d$
//! is the same exponent that forms the election pseudonym
//! $\hat{u} = \hat{h}^\beta$, linking the pseudonym to the committed
//! credentials without revealing them. A standard sigma-protocol made
//! non-interactive; all arithmetic lives in Z_q.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::arith::{GStarModPrime, ZModPrime};
use crate::commitment::PedersenCommitmentScheme;
use crate::error::Error;
use crate::tools::hashing;
use crate::tools::timing::ExecutionTimer;
use crate::voter::Voter;

/// The preimage equality proof system over the election generator and the
/// representation scheme.
#[derive(Debug, Clone)]
pub struct PreimageEqualityProofSystem {
    h_hat: BigUint,
    scheme: PedersenCommitmentScheme,
    group: GStarModPrime,
    ring: ZModPrime,
}

/// A transcript of a preimage equality proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreimageEqualityProof {
    /// Commitment to the masked representation.
    #[serde(rename = "comm", with = "crate::tools::serde_decimal")]
    pub(crate) comm: BigUint,
    /// The election generator raised to the beta mask.
    #[serde(rename = "comm_h_hat", with = "crate::tools::serde_decimal")]
    pub(crate) comm_h_hat: BigUint,
    /// Response opening alpha.
    #[serde(rename = "resp_a", with = "crate::tools::serde_decimal")]
    pub(crate) resp_a: BigUint,
    /// Response opening beta.
    #[serde(rename = "resp_b", with = "crate::tools::serde_decimal")]
    pub(crate) resp_b: BigUint,
    /// Response opening the commitment randomness.
    #[serde(rename = "resp_s", with = "crate::tools::serde_decimal")]
    pub(crate) resp_s: BigUint,
}

impl PreimageEqualityProofSystem {
    /// Creates the proof system from the election generator and the scheme
    /// the representation commitment was made under.
    pub fn new(
        h_hat: BigUint,
        scheme: PedersenCommitmentScheme,
    ) -> Result<Self, Error> {
        if scheme.message_generators().len() != 2 {
            return Err(Error::MessageCount {
                expected: 2,
                got: scheme.message_generators().len(),
            });
        }
        let group = scheme.group().clone();
        let ring = scheme.group().z_mod_order();
        Ok(Self {
            h_hat,
            scheme,
            group,
            ring,
        })
    }

    /// Generates a proof that the voter's beta forms the pseudonym `u_hat`
    /// and sits inside `comm_to_ab` with randomness `comm_to_ab_rand`.
    pub fn prove(
        &self,
        rng: &mut impl CryptoRngCore,
        voter: &Voter,
        comm_to_ab: &BigUint,
        comm_to_ab_rand: &BigUint,
        u_hat: &BigUint,
        vote: &str,
    ) -> Result<PreimageEqualityProof, Error> {
        let _timer = ExecutionTimer::start("preimage equality proof generation");

        let r_a = self.ring.random_element(rng);
        let r_b = self.ring.random_element(rng);
        let r_s = self.ring.random_element(rng);

        let comm = self.scheme.commit(&r_s, &[&r_a, &r_b])?;
        let comm_h_hat = self.group.exp(&self.h_hat, &r_b);

        let ch = self.challenge(comm_to_ab, u_hat, &comm, &comm_h_hat, vote);

        Ok(PreimageEqualityProof {
            resp_a: self.ring.add(&r_a, &self.ring.mul(voter.alpha(), &ch)),
            resp_b: self.ring.add(&r_b, &self.ring.mul(voter.beta(), &ch)),
            resp_s: self.ring.add(&r_s, &self.ring.mul(comm_to_ab_rand, &ch)),
            comm,
            comm_h_hat,
        })
    }

    /// Verifies a proof transcript against the commitment d and the
    /// pseudonym.
    pub fn verify(
        &self,
        proof: &PreimageEqualityProof,
        comm_to_ab: &BigUint,
        u_hat: &BigUint,
        vote: &str,
    ) -> bool {
        let _timer = ExecutionTimer::start("preimage equality proof verification");

        let ch = self.challenge(comm_to_ab, u_hat, &proof.comm, &proof.comm_h_hat, vote);

        let Ok(opened) = self
            .scheme
            .commit(&proof.resp_s, &[&proof.resp_a, &proof.resp_b])
        else {
            return false;
        };
        if opened != self.group.mul(&proof.comm, &self.group.exp(comm_to_ab, &ch)) {
            return false;
        }
        self.group.exp(&self.h_hat, &proof.resp_b)
            == self
                .group
                .mul(&proof.comm_h_hat, &self.group.exp(u_hat, &ch))
    }

    fn challenge(
        &self,
        comm_to_ab: &BigUint,
        u_hat: &BigUint,
        comm: &BigUint,
        comm_h_hat: &BigUint,
        vote: &str,
    ) -> BigUint {
        let public = [comm_to_ab.clone(), u_hat.clone()];
        let commitments = [comm.clone(), comm_h_hat.clone()];
        hashing::challenge(&[&public[..], &commitments[..]], vote, self.ring.modulus())
    }
}
