//! BBS signatures and zero-knowledge selective-disclosure proofs over
//! BLS12-381, per the IRTF CFRG BBS draft.
//!
//! An issuer signs an ordered vector of messages with [`sign`]; a holder
//! derives an unlinkable proof disclosing a chosen subset with
//! [`proof::proof_gen`], and a verifier checks it with
//! [`proof::proof_verify`] without learning the undisclosed messages.
//! [`ciphersuite::Ciphersuite`] selects between the SHA-256/XMD and
//! SHAKE-256/XOF parameter sets; everything else in this crate is a pure
//! function of its inputs plus the per-ciphersuite generator cache
//! described in [`generators`].

mod ciphersuite;
mod domain;
mod error;
mod field;
mod generators;
mod hash2curve;
mod keys;
mod messages;
mod proof;
mod signature;
mod util;
mod validate;

pub use ciphersuite::Ciphersuite;
pub use error::{Error, Result};
pub use generators::{create_generators, create_generators_from};
pub use keys::{keygen, keygen_random, octets_to_pub_key, sk2pk, PublicKeyBytes, SecretKey};
pub use proof::{calculate_random_scalars, proof_gen, proof_verify, ProofBytes};
pub use signature::{sign, verify, SignatureBytes};
pub use validate::{proof_valid, pubkey_valid, signature_valid};

pub use blstrs::{G1Projective, G2Projective, Scalar};
