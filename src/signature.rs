//! Sign / verify (spec §4.6, §4.7, component 8).

use blstrs::{Bls12, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Scalar};
use ff::Field;
use group::Group;
use pairing::{MillerLoopResult, MultiMillerLoop};
use serde::{Deserialize, Serialize};

use crate::ciphersuite::Ciphersuite;
use crate::domain::calculate_domain;
use crate::error::{Error, Result};
use crate::field::hash_to_scalar;
use crate::generators::create_generators;
use crate::keys::{octets_to_pub_key, PublicKeyBytes, SecretKey};
use crate::messages::messages_to_scalars;
use crate::util::{serialize, Elem};

/// `A (48) || e (32)`, 80 octets (spec §3, §6.2).
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBytes(#[serde(with = "serde_bytes_array")] [u8; 80]);

mod serde_bytes_array {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 80], s: S) -> Result<S::Ok, S::Error> {
        serde_bytes::serialize(bytes.as_slice(), s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 80], D::Error> {
        let v: Vec<u8> = serde_bytes::deserialize(d)?;
        v.try_into().map_err(|_| serde::de::Error::custom("signature must be 80 octets"))
    }
}

impl SignatureBytes {
    pub const LEN: usize = 80;

    pub const fn new(bytes: [u8; 80]) -> Self {
        Self(bytes)
    }

    /// Wrap an arbitrary-length octet buffer, checking the 80-octet
    /// length a host-supplied value is not guaranteed to have (spec §8
    /// scenario 6: a 79-octet buffer must surface `InvalidEncoding`, not
    /// a panic).
    pub fn from_slice(octets: &[u8]) -> Result<Self> {
        let bytes: [u8; 80] = octets
            .try_into()
            .map_err(|_| Error::InvalidEncoding("signature must be 80 octets"))?;
        Ok(Self(bytes))
    }

    pub fn validate(&self) -> Result<()> {
        decode_signature(self).map(|_| ())
    }
}

impl AsRef<[u8]> for SignatureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Checks the "reject `A` equal to the G1 generator" sentinel (spec §3:
/// "the implementation rejects `A` equal to the G1 generator as a
/// sentinel"), on top of the ordinary identity/subgroup decode checks
/// `G1Affine::from_compressed` already performs.
pub(crate) fn decode_signature(sig: &SignatureBytes) -> Result<(G1Projective, Scalar)> {
    if sig.0.len() != SignatureBytes::LEN {
        return Err(Error::InvalidEncoding("signature must be 80 octets"));
    }
    let mut a_bytes = [0u8; 48];
    a_bytes.copy_from_slice(&sig.0[..48]);
    let mut e_bytes = [0u8; 32];
    e_bytes.copy_from_slice(&sig.0[48..]);

    let a_affine = G1Affine::from_compressed(&a_bytes);
    if !bool::from(a_affine.is_some()) {
        return Err(Error::InvalidEncoding("signature A does not decode"));
    }
    let a = G1Projective::from(a_affine.unwrap());
    if bool::from(a.is_identity()) {
        return Err(Error::InvalidEncoding("signature A is the identity"));
    }
    if a == G1Projective::generator() {
        return Err(Error::InvalidEncoding("signature A equals the G1 generator sentinel"));
    }

    let e_candidate = Scalar::from_bytes_be(&e_bytes);
    if !bool::from(e_candidate.is_some()) {
        return Err(Error::InvalidEncoding("signature e is not a canonical scalar"));
    }
    let e = e_candidate.unwrap();
    if bool::from(e.is_zero()) {
        return Err(Error::InvalidEncoding("signature e must be nonzero"));
    }
    Ok((a, e))
}

fn split_generators(generators: &[G1Projective]) -> (&G1Projective, &[G1Projective]) {
    (&generators[0], &generators[1..])
}

/// `B = P1 + Q1 * domain + sum(Hi * msg_scalar_i)` (spec §4.6 step 5).
fn compute_b(p1: G1Projective, q1: &G1Projective, domain: Scalar, h: &[G1Projective], msg_scalars: &[Scalar]) -> G1Projective {
    let mut b = p1 + *q1 * domain;
    for (hi, mi) in h.iter().zip(msg_scalars) {
        b += *hi * *mi;
    }
    b
}

/// `sign(cs, SK, PK, header, messages)` (spec §4.6).
pub fn sign(cs: Ciphersuite, sk: &SecretKey, pk: &PublicKeyBytes, header: &[u8], messages: &[&[u8]]) -> Result<SignatureBytes> {
    let msg_scalars = messages_to_scalars(cs, messages)?;
    let l = msg_scalars.len() as u64;
    let generators = create_generators(cs, l + 1)?;
    let (q1, h) = split_generators(&generators);

    let domain = calculate_domain(cs, pk, q1, h, header)?;

    let mut e_input = serialize(&[Elem::Scalar(&sk.scalar()), Elem::Scalar(&domain)]);
    e_input.extend(serialize(&msg_scalars.iter().map(Elem::Scalar).collect::<Vec<_>>()));
    let e = hash_to_scalar(cs, &e_input, &cs.hash_to_scalar_dst())?;

    let p1 = cs.p1()?;
    let b = compute_b(p1, q1, domain, h, &msg_scalars);

    let sk_plus_e = sk.scalar() + e;
    if bool::from(sk_plus_e.is_zero()) {
        return Err(Error::CryptoFailure("secret key plus e is zero mod r"));
    }
    let a = b * sk_plus_e.invert().unwrap();

    let mut out = [0u8; 80];
    out[..48].copy_from_slice(&a.to_compressed());
    out[48..].copy_from_slice(&e.to_bytes_be());
    Ok(SignatureBytes(out))
}

pub(crate) fn pairing_eq(p1: G1Affine, q1: G2Affine, p2: G1Affine, q2: G2Affine) -> bool {
    let q1p = G2Prepared::from(q1);
    let q2p = G2Prepared::from(q2);
    let neg_p2 = -p2;
    let terms = [(&p1, &q1p), (&neg_p2, &q2p)];
    bool::from(Bls12::multi_miller_loop(&terms).final_exponentiation().is_identity())
}

/// `verify(cs, PK, signature, header, messages)` (spec §4.7). Structural
/// failures (bad encoding, wrong length) surface as `Err`; an authentic
/// "does not verify" surfaces as `Ok(false)` (spec §7).
pub fn verify(cs: Ciphersuite, pk: &PublicKeyBytes, signature: &SignatureBytes, header: &[u8], messages: &[&[u8]]) -> Result<bool> {
    let (a, e) = decode_signature(signature)?;
    let w = octets_to_pub_key(pk)?;

    let msg_scalars = messages_to_scalars(cs, messages)?;
    let l = msg_scalars.len() as u64;
    let generators = create_generators(cs, l + 1)?;
    let (q1, h) = split_generators(&generators);

    let domain = calculate_domain(cs, pk, q1, h, header)?;
    let p1 = cs.p1()?;
    let b = compute_b(p1, q1, domain, h, &msg_scalars);

    let lhs_g2 = G2Projective::from(w) + G2Projective::generator() * e;
    Ok(pairing_eq(
        G1Affine::from(a),
        G2Affine::from(lhs_g2),
        G1Affine::from(b),
        G2Affine::from(G2Projective::generator()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{keygen, sk2pk};

    fn setup(messages: &[&[u8]]) -> (PublicKeyBytes, SecretKey, SignatureBytes) {
        let sk = keygen(Ciphersuite::Sha256, &[5u8; 32], b"").unwrap();
        let pk = sk2pk(&sk);
        let sig = sign(Ciphersuite::Sha256, &sk, &pk, b"", messages).unwrap();
        (pk, sk, sig)
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let messages: &[&[u8]] = &[b"hello", b"world"];
        let (pk, _sk, sig) = setup(messages);
        assert!(verify(Ciphersuite::Sha256, &pk, &sig, b"", messages).unwrap());
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let messages: &[&[u8]] = &[b"hello", b"world"];
        let (pk, _sk, sig) = setup(messages);
        let tampered: &[&[u8]] = &[b"hello", b"worlds"];
        assert!(!verify(Ciphersuite::Sha256, &pk, &sig, b"", tampered).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_signature() {
        let (pk, _sk, _sig) = setup(&[b"m"]);
        let short = SignatureBytes([0u8; 80]);
        assert!(verify(Ciphersuite::Sha256, &pk, &short, b"", &[b"m"]).is_err());
    }

    #[test]
    fn signing_is_deterministic() {
        let messages: &[&[u8]] = &[b"a"];
        let sk = keygen(Ciphersuite::Sha256, &[1u8; 32], b"").unwrap();
        let pk = sk2pk(&sk);
        let s1 = sign(Ciphersuite::Sha256, &sk, &pk, b"", messages).unwrap();
        let s2 = sign(Ciphersuite::Sha256, &sk, &pk, b"", messages).unwrap();
        assert_eq!(s1.0, s2.0);
    }
}
