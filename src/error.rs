use displaydoc::Display;

/// Errors surfaced by the cryptographic core.
///
/// Proof verification is never an error: a transcript that does not verify
/// yields `false` from the relevant `verify` method. The variants here are
/// contract violations (the caller holds malformed inputs) and codec failures.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Error {
    /// the group order must be a prime divisor of the order of Z*_m
    InvalidGroup,
    /// a commitment generator is not an element of the scheme's group
    GeneratorOutsideGroup,
    /// the group orders are not related by p = rq + 1
    IncompatibleGroups,
    /// expected {expected} messages, got {got}
    MessageCount {
        /// Number of message generators in the scheme.
        expected: usize,
        /// Number of messages supplied.
        got: usize,
    },
    /// message or randomness is not an element of the order ring
    ValueOutOfRange,
    /// operands belong to different rings
    RingMismatch,
    /// the credential polynomial contains no credentials
    EmptyPolynomial,
    /// the security parameter k must satisfy 2^k < ord(G_p)
    SecurityParamTooLarge,
    /// encoding failed: {0}
    Encode(String),
    /// decoding failed: {0}
    Decode(String),
}

impl std::error::Error for Error {}
