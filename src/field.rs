//! Wide-byte reduction into `Fp`/`Fr`, and `hash_to_scalar`/
//! `hash_to_field_m1_c2` (spec §4.2, §4.3).
//!
//! Grounded on `other_examples/a49c5462_aptos-labs-aptos-core__crates-
//! aptos-crypto-src-blstrs-mod.rs.rs`, which reduces a uniform byte string
//! modulo the BLS12-381 scalar field order with `num-bigint` rather than
//! hand-rolled modular bignum arithmetic (`scalar_from_uniform_be_bytes`,
//! `biguint_to_scalar`). This core follows the same technique for both the
//! scalar field `Fr` (hash-to-scalar) and the base field `Fp` (the `u1,
//! u2` inputs to the SWU map).

use blstrs::{Fp, Scalar};
use num_bigint::BigUint;
use num_integer::Integer;
use once_cell::sync::Lazy;

use crate::ciphersuite::Ciphersuite;
use crate::error::Result;
use crate::hash2curve::expand::{expand_message_xmd, expand_message_xof};

/// The BLS12-381 base field modulus, `p`.
static P: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
        16,
    )
    .expect("hard-coded BLS12-381 base field modulus")
});

/// The BLS12-381 G1/G2 subgroup order, `r`.
static R: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
        16,
    )
    .expect("hard-coded BLS12-381 scalar field modulus")
});

fn reduce_be(bytes: &[u8], modulus: &BigUint, out_len: usize) -> Vec<u8> {
    let value = BigUint::from_bytes_be(bytes);
    let reduced = value.mod_floor(modulus);
    let mut be = reduced.to_bytes_be();
    while be.len() < out_len {
        be.insert(0, 0);
    }
    debug_assert_eq!(be.len(), out_len);
    be
}

/// Reduce a uniform byte string modulo `p`, returning a canonical `Fp`.
pub fn fp_from_uniform_bytes(bytes: &[u8]) -> Fp {
    let be = reduce_be(bytes, &P, 48);
    let arr: [u8; 48] = be.try_into().expect("reduce_be always returns 48 octets");
    Fp::from_bytes_be(&arr).unwrap()
}

/// Reduce a uniform byte string modulo `r`, returning a canonical `Scalar`.
pub fn scalar_from_uniform_bytes(bytes: &[u8]) -> Scalar {
    let be = reduce_be(bytes, &R, 32);
    let arr: [u8; 32] = be.try_into().expect("reduce_be always returns 32 octets");
    Scalar::from_bytes_be(&arr).unwrap()
}

/// Dispatch to the ciphersuite's expand-message primitive (XMD for
/// SHA-256, XOF for SHAKE-256). Exposed crate-wide since the generator
/// engine and `P1` derivation also need raw `expand` output, not just the
/// `hash_to_field`/`hash_to_scalar` specializations below.
pub(crate) fn expand_for(cs: Ciphersuite, msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>> {
    match cs {
        Ciphersuite::Sha256 => expand_message_xmd(msg, dst, len_in_bytes),
        Ciphersuite::Shake256 => expand_message_xof(msg, dst, len_in_bytes),
    }
}

/// `hash_to_field` specialized to `m=1, count=2` (spec §4.2): two `Fp`
/// elements from 128 uniform octets (64 each).
pub fn hash_to_field_m1_c2(cs: Ciphersuite, msg: &[u8], dst: &[u8]) -> Result<[Fp; 2]> {
    let uniform = expand_for(cs, msg, dst, 128)?;
    let u0 = fp_from_uniform_bytes(&uniform[0..64]);
    let u1 = fp_from_uniform_bytes(&uniform[64..128]);
    Ok([u0, u1])
}

/// `hash_to_scalar(cs, msg, dst)` (spec §4.3): expand to 48 uniform octets
/// and reduce modulo `r`. The BBS draft requires the result to be nonzero;
/// this function does not retry — callers that need nonzero scalars
/// (signing, keygen) check explicitly, per spec §4.3.
pub fn hash_to_scalar(cs: Ciphersuite, msg: &[u8], dst: &[u8]) -> Result<Scalar> {
    let uniform = expand_for(cs, msg, dst, 48)?;
    Ok(scalar_from_uniform_bytes(&uniform))
}
