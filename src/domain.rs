//! `calculate_domain`, the subroutine shared by sign, verify, proof_gen,
//! and proof_verify (spec §4.6 step 3, "Equivalently the implementation
//! computes `calculate_domain(cs, PK, Q1, H, header)`; the byte layout
//! above is normative").

use blstrs::{G1Projective, Scalar};

use crate::ciphersuite::Ciphersuite;
use crate::error::Result;
use crate::field::hash_to_scalar;
use crate::keys::PublicKeyBytes;
use crate::util::{i2osp, serialize, Elem};

pub fn calculate_domain(
    cs: Ciphersuite,
    pk: &PublicKeyBytes,
    q1: &G1Projective,
    h: &[G1Projective],
    header: &[u8],
) -> Result<Scalar> {
    let mut elems = Vec::with_capacity(h.len() + 2);
    elems.push(Elem::Int(h.len() as u64));
    elems.push(Elem::G1(q1));
    elems.extend(h.iter().map(Elem::G1));

    let mut bytes = serialize(&elems);
    bytes.extend_from_slice(cs.api_id());
    bytes.extend_from_slice(pk.as_ref());
    bytes.extend_from_slice(&i2osp(header.len() as u64, 8)?);
    bytes.extend_from_slice(header);

    hash_to_scalar(cs, &bytes, &cs.hash_to_scalar_dst())
}
