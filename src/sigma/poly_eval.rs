//! Set-membership proof: the committed credential is a root of the
//! credential polynomial.
//!
//! Given a Pedersen commitment $c$ in G_p to a credential $u$, proves
//! $\Phi(u) = 0$ without revealing $u$, where $\Phi$ is the credential
//! polynomial of all admitted voters. Based on Brands et al., "A practical
//! system for globally revoking the unlinkable pseudonyms of unknown users".
//!
//! The prover works with the square chain $u^{2^0}, ..., u^{2^d}$ for
//! $d = \lfloor \log_2 \deg \Phi \rfloor$ and ties the chain links together
//! with auxiliary commitments, so proof size is logarithmic in the number of
//! admitted voters.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::arith::{GStarModPrime, ZModPrime};
use crate::commitment::PedersenCommitmentScheme;
use crate::error::Error;
use crate::polynomial::Polynomial;
use crate::tools::hashing;
use crate::tools::timing::ExecutionTimer;

/// The set-membership proof system over a credential polynomial snapshot.
#[derive(Debug, Clone)]
pub struct PolynomialEvaluationProofSystem {
    scheme: PedersenCommitmentScheme,
    polynomial: Polynomial,
    group: GStarModPrime,
    ring: ZModPrime,
    /// Length of the square chain minus one, floor(log2(deg poly)).
    d: usize,
}

/// A transcript of a polynomial evaluation proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyEvalProof {
    /// Commitments to the square chain, c_1 ... c_d. The commitment to u
    /// itself is public input and not part of the transcript.
    #[serde(rename = "c", with = "crate::tools::serde_decimal::vec")]
    pub(crate) c: Vec<BigUint>,
    /// Commitments to the masking values, c^f_0 ... c^f_d.
    #[serde(rename = "cf", with = "crate::tools::serde_decimal::vec")]
    pub(crate) cf: Vec<BigUint>,
    /// Commitments to the delta coefficients, c^delta_0 ... c^delta_d.
    #[serde(rename = "cd", with = "crate::tools::serde_decimal::vec")]
    pub(crate) cd: Vec<BigUint>,
    /// Commitments to the mask-times-square products, c^fu_0 ... c^fu_d-1.
    #[serde(rename = "cfu", with = "crate::tools::serde_decimal::vec")]
    pub(crate) cfu: Vec<BigUint>,
    /// Responses opening the square chain, length d + 1.
    #[serde(rename = "fBar", with = "crate::tools::serde_decimal::vec")]
    pub(crate) f_bar: Vec<BigUint>,
    /// Responses opening the chain randomness, length d + 1.
    #[serde(rename = "rBar", with = "crate::tools::serde_decimal::vec")]
    pub(crate) r_bar: Vec<BigUint>,
    /// Response opening the delta commitments.
    #[serde(rename = "tBar", with = "crate::tools::serde_decimal")]
    pub(crate) t_bar: BigUint,
    /// Responses tying consecutive chain links, length d.
    #[serde(rename = "xiBar", with = "crate::tools::serde_decimal::vec")]
    pub(crate) xi_bar: Vec<BigUint>,
}

impl PolynomialEvaluationProofSystem {
    /// Creates the proof system for the given commitment scheme (the one the
    /// credential commitment was made under) and credential polynomial.
    pub fn new(
        scheme: PedersenCommitmentScheme,
        polynomial: Polynomial,
    ) -> Result<Self, Error> {
        if scheme.group().order() != polynomial.ring().modulus() {
            return Err(Error::RingMismatch);
        }
        let degree = polynomial.degree();
        if degree < 1 {
            return Err(Error::EmptyPolynomial);
        }
        let group = scheme.group().clone();
        let ring = scheme.group().z_mod_order();
        Ok(Self {
            scheme,
            polynomial,
            group,
            ring,
            d: degree.ilog2() as usize,
        })
    }

    /// Generates a membership proof for the credential `u` committed in
    /// `comm_to_u` with randomness `r`.
    pub fn prove(
        &self,
        rng: &mut impl CryptoRngCore,
        u: &BigUint,
        r: &BigUint,
        comm_to_u: &BigUint,
        vote: &str,
    ) -> Result<PolyEvalProof, Error> {
        let _timer = ExecutionTimer::start("polynomial evaluation proof generation");
        let d = self.d;

        let mut r_arr: Vec<BigUint> =
            (0..=d).map(|_| self.ring.random_element(rng)).collect();
        r_arr[0] = r.clone();
        let f_arr: Vec<BigUint> = (0..=d).map(|_| self.ring.random_element(rng)).collect();
        let s_arr: Vec<BigUint> = (0..=d).map(|_| self.ring.random_element(rng)).collect();
        let t_arr: Vec<BigUint> = (0..=d).map(|_| self.ring.random_element(rng)).collect();
        let xi_arr: Vec<BigUint> = (0..d).map(|_| self.ring.random_element(rng)).collect();

        // The square chain u^(2^i), i = 0 ... d.
        let mut u_pows = Vec::with_capacity(d + 1);
        u_pows.push(u.clone());
        for i in 1..=d {
            u_pows.push(self.ring.mul(&u_pows[i - 1], &u_pows[i - 1]));
        }

        let mut c_arr = Vec::with_capacity(d);
        for i in 1..=d {
            c_arr.push(self.scheme.commit(&r_arr[i], &[&u_pows[i]])?);
        }

        let mut cf = Vec::with_capacity(d + 1);
        for i in 0..=d {
            cf.push(self.scheme.commit(&s_arr[i], &[&f_arr[i]])?);
        }

        let deltas = self.delta_coeffs(&u_pows, &f_arr);
        let mut cd = Vec::with_capacity(d + 1);
        for i in 0..=d {
            cd.push(self.scheme.commit(&t_arr[i], &[&deltas[i]])?);
        }

        let mut cfu = Vec::with_capacity(d);
        for i in 0..d {
            let fu = self.ring.mul(&f_arr[i], &u_pows[i]);
            cfu.push(self.scheme.commit(&xi_arr[i], &[&fu])?);
        }

        let ch = self.challenge(comm_to_u, &c_arr, &cf, &cd, &cfu, vote);

        let mut f_bar = Vec::with_capacity(d + 1);
        let mut r_bar = Vec::with_capacity(d + 1);
        for i in 0..=d {
            f_bar.push(self.ring.add(&self.ring.mul(&u_pows[i], &ch), &f_arr[i]));
            r_bar.push(self.ring.add(&self.ring.mul(&r_arr[i], &ch), &s_arr[i]));
        }

        // The public evaluation commitment opens to zero with randomness
        // zero, so its ch^(d+1) term vanishes and only the sum remains.
        let mut t_bar = BigUint::zero();
        let mut x = BigUint::one();
        for t in t_arr.iter() {
            t_bar = self.ring.add(&t_bar, &self.ring.mul(t, &x));
            x = self.ring.mul(&x, &ch);
        }

        let mut xi_bar = Vec::with_capacity(d);
        for i in 0..d {
            let lifted = self.ring.mul(&r_arr[i + 1], &ch);
            let cancel = self.ring.additive_invert(&self.ring.mul(&f_bar[i], &r_arr[i]));
            xi_bar.push(self.ring.add(&self.ring.add(&lifted, &cancel), &xi_arr[i]));
        }

        Ok(PolyEvalProof {
            c: c_arr,
            cf,
            cd,
            cfu,
            f_bar,
            r_bar,
            t_bar,
            xi_bar,
        })
    }

    /// Verifies a proof transcript against the commitment to u.
    pub fn verify(&self, proof: &PolyEvalProof, comm_to_u: &BigUint, vote: &str) -> bool {
        let _timer = ExecutionTimer::start("polynomial evaluation proof verification");
        let d = self.d;

        if proof.c.len() != d
            || proof.cf.len() != d + 1
            || proof.cd.len() != d + 1
            || proof.cfu.len() != d
            || proof.f_bar.len() != d + 1
            || proof.r_bar.len() != d + 1
            || proof.xi_bar.len() != d
        {
            return false;
        }

        let ch = self.challenge(comm_to_u, &proof.c, &proof.cf, &proof.cd, &proof.cfu, vote);

        let mut c_full = Vec::with_capacity(d + 1);
        c_full.push(comm_to_u.clone());
        c_full.extend(proof.c.iter().cloned());
        let cx: Vec<BigUint> = c_full.iter().map(|c| self.group.exp(c, &ch)).collect();

        for i in 0..=d {
            let Ok(comm) = self.scheme.commit(&proof.r_bar[i], &[&proof.f_bar[i]]) else {
                return false;
            };
            if self.group.mul(&cx[i], &proof.cf[i]) != comm {
                return false;
            }
        }

        let zero = BigUint::zero();
        for i in 0..d {
            let Ok(comm) = self.scheme.commit(&proof.xi_bar[i], &[&zero]) else {
                return false;
            };
            let c_exp_f = self
                .group
                .exp(&c_full[i], &self.ring.additive_invert(&proof.f_bar[i]));
            if self.group.mul(&self.group.mul(&cx[i + 1], &c_exp_f), &proof.cfu[i]) != comm {
                return false;
            }
        }

        // The evaluation commitment is trivial (value 1), so its ch^(d+1)
        // power contributes the identity.
        let v_comm = BigUint::one();
        let d_plus_one = BigUint::from(d as u64 + 1);
        let mut left = self.group.exp(&v_comm, &self.ring.exp(&ch, &d_plus_one));
        let mut x = BigUint::one();
        for cd_i in proof.cd.iter() {
            left = self.group.mul(&left, &self.group.exp(cd_i, &x));
            x = self.ring.mul(&x, &ch);
        }

        let d_bar = self.delta_bar(&proof.f_bar, &ch);
        let Ok(right) = self.scheme.commit(&proof.t_bar, &[&d_bar]) else {
            return false;
        };
        left == right
    }

    fn challenge(
        &self,
        comm_to_u: &BigUint,
        c: &[BigUint],
        cf: &[BigUint],
        cd: &[BigUint],
        cfu: &[BigUint],
        vote: &str,
    ) -> BigUint {
        // The public input pairs the credential commitment with the trivial
        // commitment to the zero evaluation.
        let public = [comm_to_u.clone(), BigUint::one()];
        hashing::challenge(&[&public[..], c, cf, cd, cfu], vote, self.ring.modulus())
    }

    /// Walks the binary expansion tree of the product
    /// $\prod_i (f_i + u^{2^i} X)$ against the polynomial's coefficients.
    ///
    /// Every node at level `lvl` descends twice: once scaling the
    /// accumulator by X (or by the challenge) and once absorbing the level's
    /// linear factor (or its opened response), the latter advancing the
    /// coefficient index by 2^(lvl-1) and only while it stays within the
    /// polynomial's degree. The leaf order of this traversal defines which
    /// delta coefficient is which, so both instantiations below share it.
    fn delta_tree<A>(
        &self,
        lvl: usize,
        deg: usize,
        acc: &A,
        on_x: &impl Fn(&A) -> A,
        on_factor: &impl Fn(&A, usize) -> A,
        at_leaf: &mut impl FnMut(usize, &A),
    ) {
        if lvl == 0 {
            at_leaf(deg, acc);
            return;
        }
        self.delta_tree(lvl - 1, deg, &on_x(acc), on_x, on_factor, at_leaf);
        let next = deg + (1 << (lvl - 1));
        if next <= self.polynomial.degree() {
            self.delta_tree(lvl - 1, next, &on_factor(acc, lvl - 1), on_x, on_factor, at_leaf);
        }
    }

    /// The committed delta coefficients: the traversal with a polynomial
    /// accumulator, truncated to the d + 1 committed coefficients.
    fn delta_coeffs(&self, u_pows: &[BigUint], f: &[BigUint]) -> Vec<BigUint> {
        let ring = &self.ring;
        let poly = &self.polynomial;
        let mut out = vec![BigUint::zero(); self.d + 2];
        self.delta_tree(
            self.d + 1,
            0,
            &vec![BigUint::one()],
            &|acc: &Vec<BigUint>| {
                let mut shifted = Vec::with_capacity(acc.len() + 1);
                shifted.push(BigUint::zero());
                shifted.extend_from_slice(acc);
                shifted
            },
            &|acc, i| {
                // Convolution with the linear factor (f_i + u^(2^i) X).
                let mut prod = vec![BigUint::zero(); acc.len() + 1];
                for (k, a) in acc.iter().enumerate() {
                    prod[k] = ring.add(&prod[k], &ring.mul(a, &f[i]));
                    prod[k + 1] = ring.add(&prod[k + 1], &ring.mul(a, &u_pows[i]));
                }
                prod
            },
            &mut |deg, acc| {
                let coeff = poly.coeff(deg);
                for (k, a) in acc.iter().enumerate() {
                    out[k] = ring.add(&out[k], &ring.mul(a, &coeff));
                }
            },
        );
        out.truncate(self.d + 1);
        out
    }

    /// The verifier's scalar evaluation of the same traversal at the
    /// challenge point, with the opened responses in place of the factors.
    fn delta_bar(&self, f_bar: &[BigUint], ch: &BigUint) -> BigUint {
        let ring = &self.ring;
        let poly = &self.polynomial;
        let mut out = BigUint::zero();
        self.delta_tree(
            self.d + 1,
            0,
            &BigUint::one(),
            &|acc: &BigUint| ring.mul(acc, ch),
            &|acc, i| ring.mul(acc, &f_bar[i]),
            &mut |deg, acc| {
                out = ring.add(&out, &ring.mul(acc, &poly.coeff(deg)));
            },
        );
        out
    }
}
