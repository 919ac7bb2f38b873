//! Voter credentials: the secret pair (alpha, beta) and the public
//! credential u = h_1^alpha * h_2^beta derived from it in G_q.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::commitment::PedersenCommitmentScheme;
use crate::error::Error;
use crate::tools::hide_debug::HideDebug;

/// The credential triple of a single voter.
///
/// The private credentials never leave this process; only `u` is published
/// to the bulletin board. The election pseudonym is derived separately per
/// election and is not part of the triple.
#[derive(Debug, Clone)]
pub struct Voter {
    alpha: HideDebug<BigUint>,
    beta: HideDebug<BigUint>,
    u: BigUint,
}

impl Voter {
    /// Draws fresh private credentials and derives the public credential.
    ///
    /// `comm_q` is the commitment scheme in G_q; its two message generators
    /// double as the base generators h_1 and h_2 of the credential.
    pub fn generate(
        rng: &mut impl CryptoRngCore,
        comm_q: &PedersenCommitmentScheme,
    ) -> Result<Self, Error> {
        let generators = comm_q.message_generators();
        if generators.len() != 2 {
            return Err(Error::MessageCount {
                expected: 2,
                got: generators.len(),
            });
        }
        let group = comm_q.group();
        let ring = group.z_mod_order();
        let alpha = ring.random_element(rng);
        let beta = ring.random_element(rng);
        let u = group.mul(
            &group.exp(&generators[0], &alpha),
            &group.exp(&generators[1], &beta),
        );
        Ok(Self::new(alpha, beta, u))
    }

    /// Rebuilds a voter from stored credentials.
    pub fn new(alpha: BigUint, beta: BigUint, u: BigUint) -> Self {
        Self {
            alpha: alpha.into(),
            beta: beta.into(),
            u,
        }
    }

    /// The private credential alpha.
    pub fn alpha(&self) -> &BigUint {
        &self.alpha
    }

    /// The private credential beta.
    pub fn beta(&self) -> &BigUint {
        &self.beta
    }

    /// The public credential u.
    pub fn u(&self) -> &BigUint {
        &self.u
    }
}
