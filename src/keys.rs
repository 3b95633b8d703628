//! Keygen and public-key derivation (spec §4.5, component 7).

use blstrs::{G2Affine, G2Projective, Scalar};
use ff::Field;
use group::Group;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ciphersuite::Ciphersuite;
use crate::error::{Error, Result};
use crate::field::hash_to_scalar;
use crate::util::i2osp;

/// A nonzero `Fr` secret key, held as its canonical 32-byte big-endian
/// encoding so the wrapper can derive `Zeroize`/`ZeroizeOnDrop` directly
/// (`blstrs::Scalar` itself carries no zeroize support) — grounded on the
/// teacher's identical treatment of `SecureScalar`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    pub fn scalar(&self) -> Scalar {
        Scalar::from_bytes_be(&self.0).unwrap()
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self> {
        let candidate = Scalar::from_bytes_be(&bytes);
        if !bool::from(candidate.is_some()) {
            return Err(Error::InvalidEncoding("secret key bytes are not a canonical scalar"));
        }
        if bool::from(candidate.unwrap().is_zero()) {
            return Err(Error::InvalidEncoding("secret key scalar is zero"));
        }
        Ok(Self(bytes))
    }
}

/// 96-byte Zcash-compressed G2 public key (spec §3, §6.2).
///
/// `Serialize`/`Deserialize` are derived for hosts that want to carry this
/// type through `serde` rather than handling raw octets themselves
/// (SPEC_FULL.md §H); this crate's own operations all take `&[u8]`/
/// `AsRef<[u8]>` and never require `serde` internally.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyBytes(#[serde(with = "serde_bytes_array")] [u8; 96]);

mod serde_bytes_array {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 96], s: S) -> Result<S::Ok, S::Error> {
        serde_bytes::serialize(bytes.as_slice(), s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 96], D::Error> {
        let v: Vec<u8> = serde_bytes::deserialize(d)?;
        v.try_into().map_err(|_| serde::de::Error::custom("public key must be 96 octets"))
    }
}

impl PublicKeyBytes {
    pub const fn new(bytes: [u8; 96]) -> Self {
        Self(bytes)
    }

    /// Wrap an arbitrary-length octet buffer, checking the 96-octet
    /// length a host-supplied value is not guaranteed to have.
    pub fn from_slice(octets: &[u8]) -> Result<Self> {
        let bytes: [u8; 96] = octets
            .try_into()
            .map_err(|_| Error::InvalidEncoding("public key must be 96 octets"))?;
        Ok(Self(bytes))
    }

    pub fn validate(&self) -> Result<()> {
        octets_to_pub_key(self).map(|_| ())
    }
}

impl AsRef<[u8]> for PublicKeyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn derive_input(ikm: &[u8], key_info: &[u8]) -> Result<Vec<u8>> {
    if ikm.len() < 32 {
        return Err(Error::InvalidArgument("IKM must be at least 32 octets"));
    }
    if key_info.len() >= (1 << 16) {
        return Err(Error::InvalidArgument("key_info must be shorter than 2^16 octets"));
    }
    let mut input = ikm.to_vec();
    input.extend_from_slice(&i2osp(key_info.len() as u64, 2)?);
    input.extend_from_slice(key_info);
    Ok(input)
}

/// `keygen(cs, IKM, key_info)` (spec §4.5). Callers without their own IKM
/// should use [`keygen_random`] instead.
pub fn keygen(cs: Ciphersuite, ikm: &[u8], key_info: &[u8]) -> Result<SecretKey> {
    let input = derive_input(ikm, key_info)?;
    let sk = hash_to_scalar(cs, &input, &cs.key_dst())?;
    if bool::from(sk.is_zero()) {
        return Err(Error::CryptoFailure("derived secret key scalar is zero"));
    }
    Ok(SecretKey(sk.to_bytes_be()))
}

/// `keygen` with a fresh 32-byte `IKM` drawn from `rng` (spec §5:
/// "Keygen uses the same RNG when IKM is not supplied").
pub fn keygen_random<R: RngCore + CryptoRng>(cs: Ciphersuite, rng: &mut R, key_info: &[u8]) -> Result<SecretKey> {
    let mut ikm = [0u8; 32];
    rng.fill_bytes(&mut ikm);
    keygen(cs, &ikm, key_info)
}

/// `sk2pk(SK) = Zcash-encode(g2 * SK)` (spec §4.5).
pub fn sk2pk(sk: &SecretKey) -> PublicKeyBytes {
    let w = G2Projective::generator() * sk.scalar();
    PublicKeyBytes(w.to_compressed())
}

/// `octets_to_pub_key(PK)` (spec §4.5): decode, reject the identity.
///
/// `G2Affine::from_compressed` already performs the curve-equation and
/// subgroup checks Zcash-format decompression requires; this core does not
/// additionally multiply by `r` as a `Scalar` to re-check subgroup
/// membership, since `Scalar`'s own modulus *is* `r` — representing the
/// literal integer `r` as a `Scalar` degenerates to zero, which would make
/// the check pass for every point rather than test anything.
pub fn octets_to_pub_key(pk: &PublicKeyBytes) -> Result<G2Projective> {
    let affine = G2Affine::from_compressed(&pk.0);
    if !bool::from(affine.is_some()) {
        return Err(Error::InvalidEncoding("public key does not decode"));
    }
    let point = G2Projective::from(affine.unwrap());
    if bool::from(point.is_identity()) {
        return Err(Error::InvalidEncoding("public key is the identity"));
    }
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn keygen_rejects_short_ikm() {
        assert!(keygen(Ciphersuite::Sha256, &[0u8; 31], b"").is_err());
    }

    #[test]
    fn keygen_is_deterministic_given_fixed_ikm() {
        let ikm = [7u8; 32];
        let a = keygen(Ciphersuite::Sha256, &ikm, b"").unwrap();
        let b = keygen(Ciphersuite::Sha256, &ikm, b"").unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn sk2pk_round_trips_through_octets_to_pub_key() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let sk = keygen_random(Ciphersuite::Sha256, &mut rng, b"").unwrap();
        let pk = sk2pk(&sk);
        let w = octets_to_pub_key(&pk).unwrap();
        assert_eq!(w, G2Projective::generator() * sk.scalar());
    }

    #[test]
    fn equal_secret_keys_yield_equal_public_keys() {
        let ikm = [9u8; 32];
        let sk1 = keygen(Ciphersuite::Sha256, &ikm, b"").unwrap();
        let sk2 = keygen(Ciphersuite::Sha256, &ikm, b"").unwrap();
        assert_eq!(sk2pk(&sk1).0, sk2pk(&sk2).0);
    }
}
