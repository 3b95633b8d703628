//! Octet/integer conversions and the polymorphic `serialize` helper (spec §4.1).
//!
//! Grounded on the teacher's preference for small, explicit value types
//! over dynamic dispatch (`HashOutput`, `Randomizer`, `Commitment` in
//! `crypto/hash.rs`/`crypto/random.rs`/`crypto/commit.rs`): `Elem` is a
//! tagged sum over the four shapes the BBS wire format ever serializes,
//! rather than a trait object.

use blstrs::{G1Projective, G2Projective, Scalar};
use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Big-endian `n`-octet encoding of `x`. Fails if `x >= 256^n`.
///
/// `n` is at most 8 at every call site in this crate (message counts and
/// header/key_info lengths), so `x` is taken as `u64` rather than an
/// arbitrary-precision integer.
pub fn i2osp(x: u64, n: usize) -> Result<Vec<u8>> {
    if n == 0 || n > 8 {
        return Err(Error::InvalidArgument("i2osp: n out of supported range"));
    }
    if n < 8 && x >= 1u64 << (8 * n) {
        return Err(Error::InvalidArgument("i2osp: integer too large for n octets"));
    }
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, x);
    Ok(buf[8 - n..].to_vec())
}

/// Inverse of `i2osp` for octet strings that fit in a `u128`.
///
/// This core never needs to invert lengths longer than 16 octets (all
/// lengths it handles are message/header sizes), so wider inputs are
/// rejected rather than silently truncated.
pub fn os2ip(octets: &[u8]) -> Result<u128> {
    if octets.len() > 16 {
        return Err(Error::InvalidArgument("os2ip: input wider than 16 octets"));
    }
    let mut buf = [0u8; 16];
    buf[16 - octets.len()..].copy_from_slice(octets);
    Ok(u128::from_be_bytes(buf))
}

/// One element of a `serialize(list)` call (spec §4.1).
pub enum Elem<'a> {
    G1(&'a G1Projective),
    G2(&'a G2Projective),
    Scalar(&'a Scalar),
    /// A small nonnegative integer, encoded as 8 big-endian octets.
    Int(u64),
}

/// Concatenate the wire encoding of each element in order.
///
/// G1/G2 map to their 48/96-octet Zcash-compressed form, `Scalar` to 32
/// big-endian octets, `Int` to 8 big-endian octets. The shape of each call
/// site is fixed by the algorithm that calls it (§4.1): callers build a
/// `Vec<Elem>` of the exact fixed arity their step of the protocol needs.
pub fn serialize(list: &[Elem<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    for elem in list {
        match elem {
            Elem::G1(p) => out.extend_from_slice(&p.to_compressed()),
            Elem::G2(p) => out.extend_from_slice(&p.to_compressed()),
            Elem::Scalar(s) => out.extend_from_slice(&s.to_bytes_be()),
            Elem::Int(n) => {
                let mut buf = [0u8; 8];
                BigEndian::write_u64(&mut buf, *n);
                out.extend_from_slice(&buf);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2osp_roundtrips_through_os2ip() {
        let encoded = i2osp(4660, 8).unwrap();
        assert_eq!(encoded.len(), 8);
        assert_eq!(os2ip(&encoded).unwrap(), 4660);
    }

    #[test]
    fn i2osp_rejects_overflow() {
        assert!(i2osp(256, 1).is_err());
        assert!(i2osp(255, 1).is_ok());
    }

    #[test]
    fn serialize_concatenates_in_order() {
        let s = Scalar::from(7u64);
        let out = serialize(&[Elem::Int(3), Elem::Scalar(&s)]);
        assert_eq!(out.len(), 8 + 32);
        assert_eq!(&out[0..8], &3u64.to_be_bytes());
    }
}
