//! Proof of known representation of a committed value.
//!
//! The credential commitment $c$ in G_p hides $u$, and $d$ in G_q hides the
//! pair $(\alpha, \beta)$. This system proves that the hidden $u$ is exactly
//! $h_1^\alpha h_2^\beta$, the G_q element represented by the hidden pair,
//! binding the two commitments to the same voter. Based on Au et al.,
//! "Proof-of-Knowledge of Representation of Committed Value and Its
//! Applications". The name comes from the proof generalizing double
//! discrete log proofs.
//!
//! The challenge is consumed bit by bit, one cut-and-choose round per bit,
//! so the security parameter k bounds the cheating probability by 2^-k.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::arith::{GStarModPrime, ZModPrime};
use crate::commitment::PedersenCommitmentScheme;
use crate::error::Error;
use crate::tools::hashing;
use crate::tools::timing::ExecutionTimer;
use crate::voter::Voter;

/// The representation proof system over the two commitment schemes.
#[derive(Debug, Clone)]
pub struct DoubleDiscreteLogProofSystem {
    comm_p: PedersenCommitmentScheme,
    comm_q: PedersenCommitmentScheme,
    security_param: usize,
    zp: ZModPrime,
    zq: ZModPrime,
    gp: GStarModPrime,
    gq: GStarModPrime,
}

/// A transcript of a representation proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdLogProof {
    /// Commitment to the masked credential in G_p.
    #[serde(rename = "t", with = "crate::tools::serde_decimal")]
    pub(crate) t: BigUint,
    /// Per-bit commitments in G_p, length k.
    #[serde(rename = "t1_arr", with = "crate::tools::serde_decimal::vec")]
    pub(crate) t1: Vec<BigUint>,
    /// Per-bit commitments in G_q, length k.
    #[serde(rename = "t2_arr", with = "crate::tools::serde_decimal::vec")]
    pub(crate) t2: Vec<BigUint>,
    /// Response opening the credential mask.
    #[serde(rename = "zx", with = "crate::tools::serde_decimal")]
    pub(crate) z_x: BigUint,
    /// Response opening the commitment randomness mask.
    #[serde(rename = "zr", with = "crate::tools::serde_decimal")]
    pub(crate) z_r: BigUint,
    /// Per-bit representation responses, k rows of one entry per message
    /// slot.
    #[serde(rename = "zm_arr", with = "crate::tools::serde_decimal::mat")]
    pub(crate) z_m: Vec<Vec<BigUint>>,
    /// Per-bit randomness responses in Z_q, length k.
    #[serde(rename = "zs_arr", with = "crate::tools::serde_decimal::vec")]
    pub(crate) z_s: Vec<BigUint>,
    /// Per-bit randomness responses in Z_p, length k.
    #[serde(rename = "zr_arr", with = "crate::tools::serde_decimal::vec")]
    pub(crate) z_r_arr: Vec<BigUint>,
}

impl DoubleDiscreteLogProofSystem {
    /// Creates the proof system over the credential scheme in G_p and the
    /// representation scheme in G_q.
    ///
    /// The group orders must satisfy p = rq + 1, the representation scheme
    /// must carry exactly two message generators and the security parameter
    /// must satisfy 2^k < p.
    pub fn new(
        comm_p: PedersenCommitmentScheme,
        comm_q: PedersenCommitmentScheme,
        security_param: usize,
    ) -> Result<Self, Error> {
        let p = comm_p.group().order();
        let q = comm_q.group().order();
        if ((p - 1u32) % q) != BigUint::zero() {
            return Err(Error::IncompatibleGroups);
        }
        if *p <= (BigUint::one() << security_param) {
            return Err(Error::SecurityParamTooLarge);
        }
        if comm_q.message_generators().len() != 2 {
            return Err(Error::MessageCount {
                expected: 2,
                got: comm_q.message_generators().len(),
            });
        }
        let zp = comm_p.group().z_mod_order();
        let zq = comm_q.group().z_mod_order();
        let gp = comm_p.group().clone();
        let gq = comm_q.group().clone();
        Ok(Self {
            comm_p,
            comm_q,
            security_param,
            zp,
            zq,
            gp,
            gq,
        })
    }

    /// The product of the representation generators raised to the given
    /// exponents, an element of G_q.
    fn generator_product(&self, exponents: &[BigUint]) -> BigUint {
        let mut product = BigUint::one();
        for (h, e) in self.comm_q.message_generators().iter().zip(exponents) {
            product = self.gq.mul(&product, &self.gq.exp(h, e));
        }
        product
    }

    /// Generates a representation proof for the voter's credentials.
    ///
    /// `comm_to_u` and `comm_to_ab` are the commitments c and d with their
    /// randomness values `comm_to_u_rand` and `comm_to_ab_rand`.
    pub fn prove(
        &self,
        rng: &mut impl CryptoRngCore,
        voter: &Voter,
        comm_to_u: &BigUint,
        comm_to_u_rand: &BigUint,
        comm_to_ab: &BigUint,
        comm_to_ab_rand: &BigUint,
        vote: &str,
    ) -> Result<DdLogProof, Error> {
        let _timer = ExecutionTimer::start("double discrete log proof generation");
        let k = self.security_param;
        let n_slots = self.comm_q.message_generators().len();

        let rho_x = self.zp.random_element(rng);
        let rho_r = self.zp.random_element(rng);
        let t = self.comm_p.commit(&rho_r, &[&rho_x])?;

        let mut rho_m = Vec::with_capacity(k);
        let mut rho_s = Vec::with_capacity(k);
        let mut rho_r_arr = Vec::with_capacity(k);
        let mut t1 = Vec::with_capacity(k);
        let mut t2 = Vec::with_capacity(k);
        for i in 0..k {
            rho_s.push(self.zq.random_element(rng));
            rho_r_arr.push(self.zp.random_element(rng));
            let slots: Vec<BigUint> =
                (0..n_slots).map(|_| self.zq.random_element(rng)).collect();
            // The generator product is an element of G_q and therefore lies
            // in Z_p when used as a message in G_p.
            let h_product = self.generator_product(&slots);
            t1.push(self.comm_p.commit(&rho_r_arr[i], &[&h_product])?);
            let refs: Vec<&BigUint> = slots.iter().collect();
            t2.push(self.comm_q.commit(&rho_s[i], &refs)?);
            rho_m.push(slots);
        }

        // Only the low k bits of the challenge are consumed, one per round.
        let ch = self.challenge(comm_to_u, comm_to_ab, &t, &t1, &t2, vote);

        let z_x = self
            .zp
            .add(&rho_x, &self.zp.additive_invert(&self.zp.mul(voter.u(), &ch)));
        let z_r = self.zp.add(
            &rho_r,
            &self.zp.additive_invert(&self.zp.mul(comm_to_u_rand, &ch)),
        );

        let secrets = [voter.alpha(), voter.beta()];
        let mut z_m = Vec::with_capacity(k);
        let mut z_s = Vec::with_capacity(k);
        let mut z_r_arr = Vec::with_capacity(k);
        for i in 0..k {
            let bit = if ch.bit(i as u64) {
                BigUint::one()
            } else {
                BigUint::zero()
            };
            let mut row = Vec::with_capacity(n_slots);
            for j in 0..n_slots {
                row.push(self.zq.add(
                    &rho_m[i][j],
                    &self.zq.additive_invert(&self.zq.mul(secrets[j], &bit)),
                ));
            }
            z_s.push(self.zq.add(
                &rho_s[i],
                &self.zq.additive_invert(&self.zq.mul(comm_to_ab_rand, &bit)),
            ));
            let h_product = self.generator_product(&row);
            z_r_arr.push(self.zp.add(
                &rho_r_arr[i],
                &self.zp.additive_invert(
                    &self.zp.mul(&self.zp.mul(&bit, &h_product), comm_to_u_rand),
                ),
            ));
            z_m.push(row);
        }

        Ok(DdLogProof {
            t,
            t1,
            t2,
            z_x,
            z_r,
            z_m,
            z_s,
            z_r_arr,
        })
    }

    /// Verifies a proof transcript against the commitments c and d.
    pub fn verify(
        &self,
        proof: &DdLogProof,
        comm_to_u: &BigUint,
        comm_to_ab: &BigUint,
        vote: &str,
    ) -> bool {
        let _timer = ExecutionTimer::start("double discrete log proof verification");
        let k = self.security_param;
        let n_slots = self.comm_q.message_generators().len();

        if proof.t1.len() != k
            || proof.t2.len() != k
            || proof.z_m.len() != k
            || proof.z_s.len() != k
            || proof.z_r_arr.len() != k
            || proof.z_m.iter().any(|row| row.len() != n_slots)
        {
            return false;
        }

        let ch = self.challenge(comm_to_u, comm_to_ab, &proof.t, &proof.t1, &proof.t2, vote);

        let Ok(comm) = self.comm_p.commit(&proof.z_r, &[&proof.z_x]) else {
            return false;
        };
        if proof.t != self.gp.mul(&self.gp.exp(comm_to_u, &ch), &comm) {
            return false;
        }

        for i in 0..k {
            let bit_set = ch.bit(i as u64);
            let bit = if bit_set { BigUint::one() } else { BigUint::zero() };

            let refs: Vec<&BigUint> = proof.z_m[i].iter().collect();
            let Ok(comm) = self.comm_q.commit(&proof.z_s[i], &refs) else {
                return false;
            };
            if proof.t2[i] != self.gq.mul(&self.gq.exp(comm_to_ab, &bit), &comm) {
                return false;
            }

            let h_product = self.generator_product(&proof.z_m[i]);
            if bit_set {
                // With the bit set the prover demonstrates that the opened
                // representation unlocks the credential commitment.
                let expected = self.gp.mul(
                    &self.gp.exp(comm_to_u, &h_product),
                    &self
                        .gp
                        .exp(self.comm_p.randomness_generator(), &proof.z_r_arr[i]),
                );
                if proof.t1[i] != expected {
                    return false;
                }
            } else {
                let Ok(comm) = self.comm_p.commit(&proof.z_r_arr[i], &[&h_product]) else {
                    return false;
                };
                if proof.t1[i] != comm {
                    return false;
                }
            }
        }

        true
    }

    fn challenge(
        &self,
        comm_to_u: &BigUint,
        comm_to_ab: &BigUint,
        t: &BigUint,
        t1: &[BigUint],
        t2: &[BigUint],
        vote: &str,
    ) -> BigUint {
        let public = [comm_to_u.clone(), comm_to_ab.clone(), t.clone()];
        hashing::challenge(&[&public[..], t1, t2], vote, self.zp.modulus())
    }
}

#[cfg(test)]
mod tests {
    use rand_core::OsRng;

    use super::DoubleDiscreteLogProofSystem;
    use crate::error::Error;
    use crate::params::{GroupSet, Params};
    use crate::voter::Voter;

    const TEST_SECURITY_PARAM: usize = 4;

    struct Fixture {
        params: Params,
        voter: Voter,
    }

    fn fixture() -> Fixture {
        let params = Params::generate(&mut OsRng, GroupSet::Small, TEST_SECURITY_PARAM).unwrap();
        let voter = Voter::generate(&mut OsRng, params.comm_q()).unwrap();
        Fixture { params, voter }
    }

    #[test]
    fn prove_and_verify() {
        let fx = fixture();
        let comm_p = fx.params.comm_p();
        let comm_q = fx.params.comm_q();

        let r_c = comm_p.group().z_mod_order().random_element(&mut OsRng);
        let c = comm_p.commit(&r_c, &[fx.voter.u()]).unwrap();
        let r_d = comm_q.group().z_mod_order().random_element(&mut OsRng);
        let d = comm_q
            .commit(&r_d, &[fx.voter.alpha(), fx.voter.beta()])
            .unwrap();

        let ps = DoubleDiscreteLogProofSystem::new(
            comm_p.clone(),
            comm_q.clone(),
            TEST_SECURITY_PARAM,
        )
        .unwrap();
        let proof = ps
            .prove(&mut OsRng, &fx.voter, &c, &r_c, &d, &r_d, "yes")
            .unwrap();
        assert!(ps.verify(&proof, &c, &d, "yes"));
        // The vote string is bound by the challenge.
        assert!(!ps.verify(&proof, &c, &d, "no"));
    }

    #[test]
    fn foreign_commitment_fails() {
        let fx = fixture();
        let comm_p = fx.params.comm_p();
        let comm_q = fx.params.comm_q();

        let r_c = comm_p.group().z_mod_order().random_element(&mut OsRng);
        let c = comm_p.commit(&r_c, &[fx.voter.u()]).unwrap();
        let r_d = comm_q.group().z_mod_order().random_element(&mut OsRng);
        let d = comm_q
            .commit(&r_d, &[fx.voter.alpha(), fx.voter.beta()])
            .unwrap();

        let ps = DoubleDiscreteLogProofSystem::new(
            comm_p.clone(),
            comm_q.clone(),
            TEST_SECURITY_PARAM,
        )
        .unwrap();
        let proof = ps
            .prove(&mut OsRng, &fx.voter, &c, &r_c, &d, &r_d, "yes")
            .unwrap();

        // A commitment to another voter's representation does not verify.
        let other = Voter::generate(&mut OsRng, comm_q).unwrap();
        let r_d2 = comm_q.group().z_mod_order().random_element(&mut OsRng);
        let d2 = comm_q
            .commit(&r_d2, &[other.alpha(), other.beta()])
            .unwrap();
        assert!(!ps.verify(&proof, &c, &d2, "yes"));
    }

    // Transcript composition is pinned so that the hash input order can
    // never drift silently; the value comes from an independent evaluation.
    #[test]
    fn pinned_challenge_composition() {
        use num_bigint::BigUint;

        let fx = fixture();
        let ps = DoubleDiscreteLogProofSystem::new(
            fx.params.comm_p().clone(),
            fx.params.comm_q().clone(),
            TEST_SECURITY_PARAM,
        )
        .unwrap();
        let t1 = [BigUint::from(8u8), BigUint::from(9u8)];
        let t2 = [BigUint::from(10u8), BigUint::from(11u8)];
        let ch = ps.challenge(
            &BigUint::from(5u8),
            &BigUint::from(6u8),
            &BigUint::from(7u8),
            &t1,
            &t2,
            "no",
        );
        let expected = BigUint::parse_bytes(
            b"111738952933368700342421884911688811330608683992048667921473070674223455240087",
            10,
        )
        .unwrap();
        assert_eq!(ch, expected);
    }

    #[test]
    fn rejects_swapped_schemes() {
        let fx = fixture();
        // q does not divide p - 1 the other way around.
        let res = DoubleDiscreteLogProofSystem::new(
            fx.params.comm_q().clone(),
            fx.params.comm_p().clone(),
            TEST_SECURITY_PARAM,
        );
        assert!(matches!(res, Err(Error::IncompatibleGroups)));
    }

    #[test]
    fn rejects_oversized_security_param() {
        let fx = fixture();
        let res = DoubleDiscreteLogProofSystem::new(
            fx.params.comm_p().clone(),
            fx.params.comm_q().clone(),
            2048,
        );
        assert!(matches!(res, Err(Error::SecurityParamTooLarge)));
    }
}
