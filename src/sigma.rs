//! The three non-interactive proof systems a ballot carries.
//!
//! All three are sigma-protocols made non-interactive with the Fiat-Shamir
//! transform over a shared transcript-hash format. They interlock through
//! the commitments c (to the public credential u, in G_p) and d (to the
//! representation (alpha, beta), in G_q) and the vote string, which enters
//! every challenge.

mod ddlog;
mod poly_eval;
mod preimage_eq;

pub use ddlog::{DdLogProof, DoubleDiscreteLogProofSystem};
pub use poly_eval::{PolyEvalProof, PolynomialEvaluationProofSystem};
pub use preimage_eq::{PreimageEqualityProof, PreimageEqualityProofSystem};
