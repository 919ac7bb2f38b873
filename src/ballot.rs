//! Ballot assembly and verification.
//!
//! A ballot bundles the two credential commitments, the vote string, the
//! election pseudonym and the three proof transcripts. The bulletin board
//! accepts a ballot iff all three proofs verify against the shared public
//! inputs; rejecting a second ballot under the same pseudonym is the board's
//! policy decision, which is why the pseudonym is exposed in clear along
//! with its canonical byte form.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::arith::to_bytes_be;
use crate::error::Error;
use crate::params::Params;
use crate::polynomial::Polynomial;
use crate::sigma::{
    DdLogProof, DoubleDiscreteLogProofSystem, PolyEvalProof, PolynomialEvaluationProofSystem,
    PreimageEqualityProof, PreimageEqualityProofSystem,
};
use crate::voter::Voter;

/// A cast ballot, immutable once formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Commitment to the public credential u, in G_p.
    #[serde(rename = "c", with = "crate::tools::serde_decimal")]
    pub(crate) c: BigUint,
    /// Commitment to the representation (alpha, beta), in G_q.
    #[serde(rename = "d", with = "crate::tools::serde_decimal")]
    pub(crate) d: BigUint,
    /// The vote itself, opaque to the core.
    #[serde(rename = "v")]
    pub(crate) v: String,
    /// The election pseudonym.
    #[serde(rename = "u_hat", with = "crate::tools::serde_decimal")]
    pub(crate) u_hat: BigUint,
    #[serde(rename = "p1")]
    pub(crate) proof1: PolyEvalProof,
    #[serde(rename = "p2")]
    pub(crate) proof2: DdLogProof,
    #[serde(rename = "p3")]
    pub(crate) proof3: PreimageEqualityProof,
}

impl Ballot {
    /// Forms a ballot for the given vote: derives the pseudonym, commits to
    /// the credentials with fresh randomness and generates the three proofs
    /// over the same vote string.
    pub fn generate(
        rng: &mut impl CryptoRngCore,
        params: &Params,
        voter: &Voter,
        polynomial: &Polynomial,
        vote: &str,
    ) -> Result<Ballot, Error> {
        let comm_p = params.comm_p();
        let comm_q = params.comm_q();

        let u_hat = comm_q.group().exp(params.h_hat(), voter.beta());

        let r_c = comm_p.group().z_mod_order().random_element(rng);
        let c = comm_p.commit(&r_c, &[voter.u()])?;

        let r_d = comm_q.group().z_mod_order().random_element(rng);
        let d = comm_q.commit(&r_d, &[voter.alpha(), voter.beta()])?;

        let ps1 = PolynomialEvaluationProofSystem::new(comm_p.clone(), polynomial.clone())?;
        let proof1 = ps1.prove(rng, voter.u(), &r_c, &c, vote)?;

        let ps2 = DoubleDiscreteLogProofSystem::new(
            comm_p.clone(),
            comm_q.clone(),
            params.security_param(),
        )?;
        let proof2 = ps2.prove(rng, voter, &c, &r_c, &d, &r_d, vote)?;

        let ps3 = PreimageEqualityProofSystem::new(params.h_hat().clone(), comm_q.clone())?;
        let proof3 = ps3.prove(rng, voter, &d, &r_d, &u_hat, vote)?;

        Ok(Ballot {
            c,
            d,
            v: vote.to_owned(),
            u_hat,
            proof1,
            proof2,
            proof3,
        })
    }

    /// Verifies all three proofs against the given parameters and
    /// credential polynomial snapshot.
    ///
    /// Never fails with an error: parameters under which the proof systems
    /// cannot even be constructed verify nothing.
    pub fn verify(&self, params: &Params, polynomial: &Polynomial) -> bool {
        let Ok(ps1) =
            PolynomialEvaluationProofSystem::new(params.comm_p().clone(), polynomial.clone())
        else {
            return false;
        };
        if !ps1.verify(&self.proof1, &self.c, &self.v) {
            return false;
        }

        let Ok(ps2) = DoubleDiscreteLogProofSystem::new(
            params.comm_p().clone(),
            params.comm_q().clone(),
            params.security_param(),
        ) else {
            return false;
        };
        if !ps2.verify(&self.proof2, &self.c, &self.d, &self.v) {
            return false;
        }

        let Ok(ps3) =
            PreimageEqualityProofSystem::new(params.h_hat().clone(), params.comm_q().clone())
        else {
            return false;
        };
        ps3.verify(&self.proof3, &self.d, &self.u_hat, &self.v)
    }

    /// The vote string.
    pub fn vote(&self) -> &str {
        &self.v
    }

    /// The election pseudonym, in clear for duplicate detection.
    pub fn election_credential(&self) -> &BigUint {
        &self.u_hat
    }

    /// The canonical byte form of the pseudonym, the key under which the
    /// board indexes accepted ballots.
    pub fn election_credential_bytes(&self) -> Vec<u8> {
        to_bytes_be(&self.u_hat)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rand_core::OsRng;

    use super::Ballot;
    use crate::params::{GroupSet, Params};
    use crate::polynomial::Polynomial;
    use crate::voter::Voter;
    use crate::wire;

    const TEST_SECURITY_PARAM: usize = 8;

    struct Board {
        params: Params,
        polynomial: Polynomial,
    }

    impl Board {
        fn new() -> Self {
            let params = Params::generate(&mut OsRng, GroupSet::Small, TEST_SECURITY_PARAM).unwrap();
            let polynomial = Polynomial::one(params.comm_p().group().z_mod_order());
            Self { params, polynomial }
        }

        fn register(&mut self) -> Voter {
            let voter = Voter::generate(&mut OsRng, self.params.comm_q()).unwrap();
            self.polynomial = self.polynomial.include_credential(voter.u());
            voter
        }
    }

    #[test]
    fn cast_and_verify() {
        let mut board = Board::new();
        let voter1 = board.register();
        board.register();
        board.register();

        let ballot = Ballot::generate(&mut OsRng, &board.params, &voter1, &board.polynomial, "yes")
            .unwrap();
        assert!(ballot.verify(&board.params, &board.polynomial));
    }

    #[test]
    fn recast_keeps_pseudonym() {
        // A second ballot from the same voter verifies cryptographically;
        // only the repeated pseudonym lets the board reject it.
        let mut board = Board::new();
        let voter1 = board.register();
        board.register();

        let first = Ballot::generate(&mut OsRng, &board.params, &voter1, &board.polynomial, "yes")
            .unwrap();
        let second = Ballot::generate(&mut OsRng, &board.params, &voter1, &board.polynomial, "yes")
            .unwrap();
        assert!(first.verify(&board.params, &board.polynomial));
        assert!(second.verify(&board.params, &board.polynomial));
        assert_ne!(first.c, second.c);
        assert_eq!(first.election_credential(), second.election_credential());
        assert_eq!(
            first.election_credential_bytes(),
            second.election_credential_bytes()
        );
    }

    #[test]
    fn swapped_membership_proof_fails() {
        let mut board = Board::new();
        let voter1 = board.register();
        let voter2 = board.register();

        let mut ballot =
            Ballot::generate(&mut OsRng, &board.params, &voter1, &board.polynomial, "yes")
                .unwrap();
        let foreign =
            Ballot::generate(&mut OsRng, &board.params, &voter2, &board.polynomial, "yes")
                .unwrap();
        // The commitment c binds the membership proof to the voter.
        ballot.proof1 = foreign.proof1;
        assert!(!ballot.verify(&board.params, &board.polynomial));
    }

    #[test]
    fn unregistered_voter_fails_membership_only() {
        let mut board = Board::new();
        board.register();
        board.register();
        board.register();
        let outsider = Voter::generate(&mut OsRng, board.params.comm_q()).unwrap();

        let ballot =
            Ballot::generate(&mut OsRng, &board.params, &outsider, &board.polynomial, "no")
                .unwrap();
        assert!(!ballot.verify(&board.params, &board.polynomial));

        // Only the membership proof is at fault.
        let ps2 = crate::sigma::DoubleDiscreteLogProofSystem::new(
            board.params.comm_p().clone(),
            board.params.comm_q().clone(),
            board.params.security_param(),
        )
        .unwrap();
        assert!(ps2.verify(&ballot.proof2, &ballot.c, &ballot.d, &ballot.v));
        let ps3 = crate::sigma::PreimageEqualityProofSystem::new(
            board.params.h_hat().clone(),
            board.params.comm_q().clone(),
        )
        .unwrap();
        assert!(ps3.verify(&ballot.proof3, &ballot.d, &ballot.u_hat, &ballot.v));
    }

    #[test]
    fn wire_round_trip_and_tamper_detection() {
        let mut board = Board::new();
        let voter1 = board.register();
        board.register();

        let ballot = Ballot::generate(&mut OsRng, &board.params, &voter1, &board.polynomial, "yes")
            .unwrap();

        let bytes = wire::to_bytes(&ballot).unwrap();
        let reloaded: Ballot = wire::from_bytes(&bytes).unwrap();
        assert_eq!(reloaded, ballot);
        assert!(reloaded.verify(&board.params, &board.polynomial));

        let json = wire::to_json(&ballot).unwrap();
        let from_json: Ballot = wire::from_json(&json).unwrap();
        assert_eq!(from_json, ballot);
        assert!(from_json.verify(&board.params, &board.polynomial));

        // Disturbing a single transcript value invalidates the ballot.
        let mut tampered = reloaded;
        let flipped = &tampered.proof2.t1[0] ^ BigUint::from(1u8);
        tampered.proof2.t1[0] = flipped;
        assert!(!tampered.verify(&board.params, &board.polynomial));
    }
}
