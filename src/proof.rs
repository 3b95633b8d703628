//! Proof generation / verification (spec §4.8, §4.9, components 9-10): a
//! Fiat–Shamir-transformed Σ-protocol proof of knowledge of a valid BBS
//! signature over an undisclosed subset of the signed messages.

use blstrs::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use group::Group;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::ciphersuite::Ciphersuite;
use crate::domain::calculate_domain;
use crate::error::{Error, Result};
use crate::field::hash_to_scalar;
use crate::generators::create_generators;
use crate::keys::{octets_to_pub_key, PublicKeyBytes};
use crate::messages::messages_to_scalars;
use crate::signature::{decode_signature, pairing_eq, SignatureBytes};
use crate::util::{i2osp, serialize, Elem};

/// `3*48 + (4+U)*32` octets, `U` = number of undisclosed messages (spec
/// §3, floor length 304 for `U = 0`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBytes(#[serde(with = "serde_bytes")] Vec<u8>);

const POINT_BLOCK_LEN: usize = 3 * 48;
const FIXED_SCALAR_COUNT: usize = 4;
const FLOOR_LEN: usize = POINT_BLOCK_LEN + FIXED_SCALAR_COUNT * 32;

impl ProofBytes {
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        validate_shape(&bytes)?;
        Ok(Self(bytes))
    }

    pub fn undisclosed_count(&self) -> usize {
        (self.0.len() - FLOOR_LEN) / 32
    }

    pub fn validate(&self) -> Result<()> {
        decode_proof(self).map(|_| ())
    }
}

impl AsRef<[u8]> for ProofBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn validate_shape(bytes: &[u8]) -> Result<()> {
    if bytes.len() < FLOOR_LEN || (bytes.len() - FLOOR_LEN) % 32 != 0 {
        return Err(Error::InvalidEncoding("proof length must be 304 + 32*U octets"));
    }
    Ok(())
}

fn decode_g1(bytes: &[u8]) -> Result<G1Projective> {
    let mut arr = [0u8; 48];
    arr.copy_from_slice(bytes);
    let affine = G1Affine::from_compressed(&arr);
    if !bool::from(affine.is_some()) {
        return Err(Error::InvalidEncoding("proof point does not decode"));
    }
    let point = G1Projective::from(affine.unwrap());
    if bool::from(point.is_identity()) {
        return Err(Error::InvalidEncoding("proof point is the identity"));
    }
    Ok(point)
}

fn decode_scalar(bytes: &[u8]) -> Result<Scalar> {
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    let candidate = Scalar::from_bytes_be(&arr);
    if !bool::from(candidate.is_some()) {
        return Err(Error::InvalidEncoding("proof scalar is not canonical"));
    }
    let s = candidate.unwrap();
    if bool::from(s.is_zero()) {
        return Err(Error::InvalidEncoding("proof scalar must be nonzero"));
    }
    Ok(s)
}

struct DecodedProof {
    abar: G1Projective,
    bbar: G1Projective,
    d: G1Projective,
    e_hat: Scalar,
    r1_hat: Scalar,
    r3_hat: Scalar,
    m_hat: Vec<Scalar>,
    c: Scalar,
}

fn decode_proof(proof: &ProofBytes) -> Result<DecodedProof> {
    validate_shape(&proof.0)?;
    let b = &proof.0;
    let abar = decode_g1(&b[0..48])?;
    let bbar = decode_g1(&b[48..96])?;
    let d = decode_g1(&b[96..144])?;

    let u = proof.undisclosed_count();
    let e_hat = decode_scalar(&b[144..176])?;
    let r1_hat = decode_scalar(&b[176..208])?;
    let r3_hat = decode_scalar(&b[208..240])?;
    let mut m_hat = Vec::with_capacity(u);
    for i in 0..u {
        let start = 240 + i * 32;
        m_hat.push(decode_scalar(&b[start..start + 32])?);
    }
    let c_start = 240 + u * 32;
    let c = decode_scalar(&b[c_start..c_start + 32])?;

    Ok(DecodedProof { abar, bbar, d, e_hat, r1_hat, r3_hat, m_hat, c })
}

fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Scalar> {
    const MAX_ATTEMPTS: u32 = 128;
    for _ in 0..MAX_ATTEMPTS {
        let mut buf = [0u8; 32];
        rng.fill_bytes(&mut buf);
        let candidate = Scalar::from_bytes_be(&buf);
        if bool::from(candidate.is_some()) {
            return Ok(candidate.unwrap());
        }
    }
    Err(Error::CryptoFailure("random scalar rejection sampling exceeded 128 iterations"))
}

/// `calculate_random_scalars(k)` (spec §4.8 step 4, §5 "Randomness"): the
/// only non-deterministic step, and the entire source of unlinkability.
pub fn calculate_random_scalars<R: RngCore + CryptoRng>(rng: &mut R, count: usize) -> Result<Vec<Scalar>> {
    (0..count).map(|_| random_scalar(rng)).collect()
}

fn undisclosed_indexes(l: usize, disclosed: &[usize]) -> Vec<usize> {
    (1..=l).filter(|i| !disclosed.contains(i)).collect()
}

/// Shared Fiat–Shamir challenge computation (spec §4.8 step 11, reused
/// verbatim by verification step 7).
#[allow(clippy::too_many_arguments)]
fn compute_challenge(
    cs: Ciphersuite,
    abar: &G1Projective,
    bbar: &G1Projective,
    d: &G1Projective,
    t1: &G1Projective,
    t2: &G1Projective,
    domain: Scalar,
    disclosed_indexes: &[usize],
    disclosed_msg_scalars: &[Scalar],
    ph: &[u8],
) -> Result<Scalar> {
    let mut elems = vec![Elem::G1(abar), Elem::G1(bbar), Elem::G1(d), Elem::G1(t1), Elem::G1(t2), Elem::Int(disclosed_indexes.len() as u64)];
    let zero_based: Vec<u64> = disclosed_indexes.iter().map(|&i| (i - 1) as u64).collect();
    elems.extend(zero_based.iter().map(|i| Elem::Int(*i)));
    elems.extend(disclosed_msg_scalars.iter().map(Elem::Scalar));
    elems.push(Elem::Scalar(&domain));

    let mut bytes = serialize(&elems);
    bytes.extend_from_slice(&i2osp(ph.len() as u64, 8)?);
    bytes.extend_from_slice(ph);
    hash_to_scalar(cs, &bytes, &cs.hash_to_scalar_dst())
}

fn compute_b_all(p1: G1Projective, q1: &G1Projective, domain: Scalar, h: &[G1Projective], msg_scalars: &[Scalar]) -> G1Projective {
    let mut b = p1 + *q1 * domain;
    for (hi, mi) in h.iter().zip(msg_scalars) {
        b += *hi * *mi;
    }
    b
}

/// `proof_gen(cs, PK, signature, header, ph, messages, disclosed_indexes)`
/// (spec §4.8). `disclosed_indexes` are 1-based and must be sorted and
/// unique; out-of-range indexes are an `InvalidArgument`.
pub fn proof_gen<R: RngCore + CryptoRng>(
    cs: Ciphersuite,
    pk: &PublicKeyBytes,
    signature: &SignatureBytes,
    header: &[u8],
    ph: &[u8],
    messages: &[&[u8]],
    disclosed_indexes: &[usize],
    rng: &mut R,
) -> Result<ProofBytes> {
    let (a, e) = decode_signature(signature)?;
    let l = messages.len();
    for &idx in disclosed_indexes {
        if idx == 0 || idx > l {
            return Err(Error::InvalidArgument("disclosed index out of range"));
        }
    }

    let msg_scalars = messages_to_scalars(cs, messages)?;
    let generators = create_generators(cs, l as u64 + 1)?;
    let q1 = &generators[0];
    let h = &generators[1..];

    let undisclosed = undisclosed_indexes(l, disclosed_indexes);
    let u = undisclosed.len();

    let randoms = calculate_random_scalars(rng, 5 + u)?;
    let (r1, r2, e_tilde, r1_tilde, r3_tilde) = (randoms[0], randoms[1], randoms[2], randoms[3], randoms[4]);
    let m_tilde = &randoms[5..];

    let domain = calculate_domain(cs, pk, q1, h, header)?;
    let p1 = cs.p1()?;
    let b = compute_b_all(p1, q1, domain, h, &msg_scalars);

    let d = b * r2;
    let abar = a * (r1 * r2);
    let bbar = d * r1 - abar * e;

    let t1 = abar * e_tilde + d * r1_tilde;
    let mut t2 = d * r3_tilde;
    for (j, &idx) in undisclosed.iter().enumerate() {
        t2 += h[idx - 1] * m_tilde[j];
    }

    let disclosed_msg_scalars: Vec<Scalar> = disclosed_indexes.iter().map(|&i| msg_scalars[i - 1]).collect();
    let c = compute_challenge(cs, &abar, &bbar, &d, &t1, &t2, domain, disclosed_indexes, &disclosed_msg_scalars, ph)?;

    let r3 = r2.invert().unwrap();
    let e_hat = e_tilde + e * c;
    let r1_hat = r1_tilde - r1 * c;
    let r3_hat = r3_tilde - r3 * c;
    let m_hat: Vec<Scalar> = undisclosed.iter().enumerate().map(|(j, &idx)| m_tilde[j] + msg_scalars[idx - 1] * c).collect();

    let mut elems = vec![Elem::G1(&abar), Elem::G1(&bbar), Elem::G1(&d), Elem::Scalar(&e_hat), Elem::Scalar(&r1_hat), Elem::Scalar(&r3_hat)];
    elems.extend(m_hat.iter().map(Elem::Scalar));
    elems.push(Elem::Scalar(&c));
    let bytes = serialize(&elems);

    ProofBytes::new(bytes)
}

/// `proof_verify(cs, PK, proof, header, ph, disclosed_messages,
/// disclosed_indexes)` (spec §4.9).
pub fn proof_verify(
    cs: Ciphersuite,
    pk: &PublicKeyBytes,
    proof: &ProofBytes,
    header: &[u8],
    ph: &[u8],
    disclosed_messages: &[&[u8]],
    disclosed_indexes: &[usize],
) -> Result<bool> {
    if disclosed_messages.len() != disclosed_indexes.len() {
        return Err(Error::InvalidArgument("disclosed_messages and disclosed_indexes must have equal length"));
    }
    let decoded = decode_proof(proof)?;
    let w = octets_to_pub_key(pk)?;

    let r = disclosed_indexes.len();
    let u = decoded.m_hat.len();
    let l = r + u;
    for &idx in disclosed_indexes {
        if idx == 0 || idx > l {
            return Err(Error::InvalidArgument("disclosed index out of range"));
        }
    }

    let generators = create_generators(cs, l as u64 + 1)?;
    let q1 = &generators[0];
    let h = &generators[1..];

    let undisclosed = undisclosed_indexes(l, disclosed_indexes);
    let disclosed_msg_scalars = messages_to_scalars(cs, disclosed_messages)?;

    let domain = calculate_domain(cs, pk, q1, h, header)?;
    let p1 = cs.p1()?;

    let t1 = decoded.bbar * decoded.c + decoded.abar * decoded.e_hat + decoded.d * decoded.r1_hat;

    let mut bv = p1 + *q1 * domain;
    for (&idx, mi) in disclosed_indexes.iter().zip(&disclosed_msg_scalars) {
        bv += h[idx - 1] * mi;
    }
    let mut t2 = bv * decoded.c + decoded.d * decoded.r3_hat;
    for (j, &idx) in undisclosed.iter().enumerate() {
        t2 += h[idx - 1] * decoded.m_hat[j];
    }

    let c_prime = compute_challenge(cs, &decoded.abar, &decoded.bbar, &decoded.d, &t1, &t2, domain, disclosed_indexes, &disclosed_msg_scalars, ph)?;

    if c_prime != decoded.c {
        return Ok(false);
    }

    // spec §4.9 step 8: pairing(W, Abar) == pairing(g2, Bbar).
    Ok(pairing_eq(
        G1Affine::from(decoded.abar),
        G2Affine::from(w),
        G1Affine::from(decoded.bbar),
        G2Affine::from(G2Projective::generator()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{keygen, sk2pk};
    use crate::signature::sign;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn setup() -> (PublicKeyBytes, SignatureBytes, Vec<&'static [u8]>) {
        let sk = keygen(Ciphersuite::Sha256, &[11u8; 32], b"").unwrap();
        let pk = sk2pk(&sk);
        let messages: Vec<&'static [u8]> = vec![b"a", b"b", b"c", b"d", b"e"];
        let sig = sign(Ciphersuite::Sha256, &sk, &pk, b"", &messages).unwrap();
        (pk, sig, messages)
    }

    #[test]
    fn proof_gen_then_verify_round_trips_on_disclosed_subset() {
        let (pk, sig, messages) = setup();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let disclosed = [1usize, 3];
        let proof = proof_gen(Ciphersuite::Sha256, &pk, &sig, b"", b"ph", &messages, &disclosed, &mut rng).unwrap();
        let disclosed_messages: Vec<&[u8]> = disclosed.iter().map(|&i| messages[i - 1]).collect();
        assert!(proof_verify(Ciphersuite::Sha256, &pk, &proof, b"", b"ph", &disclosed_messages, &disclosed).unwrap());
    }

    #[test]
    fn full_hiding_proof_verifies_with_no_disclosed_messages() {
        let (pk, sig, messages) = setup();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let proof = proof_gen(Ciphersuite::Sha256, &pk, &sig, b"", b"", &messages, &[], &mut rng).unwrap();
        assert_eq!(proof.undisclosed_count(), messages.len());
        assert!(proof_verify(Ciphersuite::Sha256, &pk, &proof, b"", b"", &[], &[]).unwrap());
    }

    #[test]
    fn tampering_with_presentation_header_breaks_verification() {
        let (pk, sig, messages) = setup();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let proof = proof_gen(Ciphersuite::Sha256, &pk, &sig, b"", b"ph", &messages, &[], &mut rng).unwrap();
        assert!(!proof_verify(Ciphersuite::Sha256, &pk, &proof, b"", b"different", &[], &[]).unwrap());
    }

    #[test]
    fn proof_gen_rejects_out_of_range_index() {
        let (pk, sig, messages) = setup();
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        assert!(proof_gen(Ciphersuite::Sha256, &pk, &sig, b"", b"", &messages, &[99], &mut rng).is_err());
    }
}
