#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(rust_2018_idioms, trivial_casts, trivial_numeric_casts, unused_qualifications)]

mod arith;
mod ballot;
mod commitment;
mod error;
mod params;
mod polynomial;
mod sigma;
mod tools;
mod voter;
pub mod wire;

pub use arith::{
    rand_int, rand_int_in_range, random_bits, to_bytes_be, GStarModPrime, ZModPrime,
    ZStarModPrime,
};
pub use ballot::Ballot;
pub use commitment::PedersenCommitmentScheme;
pub use error::Error;
pub use params::{GroupSet, Params, DEFAULT_SECURITY_PARAM};
pub use polynomial::Polynomial;
pub use sigma::{
    DdLogProof, DoubleDiscreteLogProofSystem, PolyEvalProof, PolynomialEvaluationProofSystem,
    PreimageEqualityProof, PreimageEqualityProofSystem,
};
pub use voter::Voter;
