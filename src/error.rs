//! Error kinds returned by the core. See spec §7.
//!
//! Structural failures (bad encodings, out-of-range arguments, the
//! negligible-probability signing collision) are raised immediately with a
//! stable kind. Cryptographic mismatches never appear here: `verify` and
//! `proof_verify` report those as `Ok(false)`, never as an `Err`.
use thiserror::Error;

/// Errors produced while encoding, decoding, or invoking the core API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A length, Zcash encoding, identity-where-forbidden, scalar range,
    /// or subgroup-membership check failed.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),

    /// An argument was out of the range the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A cryptographic precondition failed during a computation that must
    /// abort rather than silently produce a weakened result (e.g. `sk + e
    /// \u{2261} 0 mod r` during signing, or exhausting the rejection-sampling
    /// budget for a random scalar).
    #[error("crypto failure: {0}")]
    CryptoFailure(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
