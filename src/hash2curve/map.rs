//! `map_to_curve` and the `hash_to_curve` composition (spec §4.2).
//!
//! The simplified-SWU map, the 11-isogeny back to `E`, and cofactor
//! clearing are the three steps `blst` itself implements as a single
//! `blst_map_to_g1` call — the same call the pack's `bluealloy-revm`
//! BLS12-381 precompile uses (`bls12_381/blst.rs::map_fp_to_g1`) to turn a
//! field element into a curve point. Delegating to it here means this
//! core carries no hand-transcribed isogeny coefficient table: the
//! mapping is exactly the one `blst`'s C implementation ships, reached
//! through the same FFI crate `blstrs` itself wraps.
//!
//! `blstrs::G1Affine`/`G1Projective` expose no public constructor from raw
//! affine coordinates, so the point `blst_map_to_g1` returns is read back
//! out as big-endian `(x, y)`, re-assembled into the 48-byte Zcash-
//! compressed form (compression bit, infinity bit, lexicographic sign
//! bit, big-endian `x`), and hand back to `blstrs`'s own
//! `G1Affine::from_compressed` — which now succeeds unconditionally,
//! since a `blst_map_to_g1` output is always on-curve and already cleared
//! into the prime-order subgroup.

use blst::{blst_bendian_from_fp, blst_fp, blst_fp_from_bendian, blst_map_to_g1, blst_p1, blst_p1_affine, blst_p1_to_affine};
use blstrs::{Fp, G1Affine, G1Projective};

use crate::ciphersuite::Ciphersuite;
use crate::error::{Error, Result};
use crate::field::hash_to_field_m1_c2;

/// `map_to_curve(u)`: the simplified-SWU map composed with the 11-isogeny,
/// delegated to `blst_map_to_g1` (hash-to-curve draft §6.6.2 / §4.2).
/// Returns the resulting point's affine `(x, y)` in `Fp`; the point is
/// already on `E` and already cofactor-cleared into the prime-order
/// subgroup.
fn map_to_curve(u: Fp) -> (Fp, Fp) {
    let mut u_raw = blst_fp::default();
    // SAFETY: `u_be` is a 48-byte big-endian buffer, `u_raw` a plain blst value.
    unsafe { blst_fp_from_bendian(&mut u_raw, u.to_bytes_be().as_ptr()) };

    let mut p = blst_p1::default();
    // SAFETY: `p` and `u_raw` are valid blst values; the third argument is
    // an optional secondary field element `blst` accepts and is unused
    // here, matching the pack's own `map_fp_to_g1` call.
    unsafe { blst_map_to_g1(&mut p, &u_raw, core::ptr::null()) };

    let mut affine = blst_p1_affine::default();
    // SAFETY: `affine` and `p` are valid blst values.
    unsafe { blst_p1_to_affine(&mut affine, &p) };

    let mut x_be = [0u8; 48];
    let mut y_be = [0u8; 48];
    // SAFETY: `x_be`/`y_be` are 48-byte buffers, `affine.x`/`affine.y` valid blst values.
    unsafe {
        blst_bendian_from_fp(x_be.as_mut_ptr(), &affine.x);
        blst_bendian_from_fp(y_be.as_mut_ptr(), &affine.y);
    }

    (Fp::from_bytes_be(&x_be).unwrap(), Fp::from_bytes_be(&y_be).unwrap())
}

/// Assemble a Zcash-compressed G1 encoding from raw affine coordinates and
/// decompress it with `blstrs`'s own (public, curve- and subgroup-
/// checking) decoder.
fn fp_pair_to_g1(x: Fp, y: Fp) -> Result<G1Projective> {
    let neg_y = -y;
    let y_be = y.to_bytes_be();
    let neg_y_be = neg_y.to_bytes_be();
    let y_is_larger = y_be > neg_y_be;

    let mut compressed = x.to_bytes_be();
    compressed[0] |= 0x80;
    if y_is_larger {
        compressed[0] |= 0x20;
    }

    let affine = G1Affine::from_compressed(&compressed);
    if bool::from(affine.is_some()) {
        Ok(G1Projective::from(affine.unwrap()))
    } else {
        Err(Error::InvalidEncoding("map_to_curve output did not decompress to a curve point"))
    }
}

/// `hash_to_curve(cs, msg, dst) = map_to_curve(u1) + map_to_curve(u2)`
/// (hash-to-curve draft §3; cofactor clearing already happened inside
/// each `map_to_curve` call, and the prime-order subgroup is closed under
/// addition, so summing the two cleared points is equivalent to clearing
/// the sum once).
pub fn hash_to_curve(cs: Ciphersuite, msg: &[u8], dst: &[u8]) -> Result<G1Projective> {
    let [u1, u2] = hash_to_field_m1_c2(cs, msg, dst)?;

    let (x1, y1) = map_to_curve(u1);
    let p1 = fp_pair_to_g1(x1, y1)?;

    let (x2, y2) = map_to_curve(u2);
    let p2 = fp_pair_to_g1(x2, y2)?;

    Ok(p1 + p2)
}
