//! Standalone structural validators (spec §4.10, component 11): pure,
//! total checks that a host can run before a key/message is in hand, e.g.
//! from a schema-validation callback as values cross into the §6.3 heap.
//!
//! These are free-function wrappers over the inherent `validate()` already
//! on [`PublicKeyBytes`], [`SignatureBytes`], and [`ProofBytes`], so a host
//! that only holds raw octets (not yet a typed wrapper) has a direct
//! entry point too.

use crate::error::Result;
use crate::keys::PublicKeyBytes;
use crate::proof::ProofBytes;
use crate::signature::SignatureBytes;

/// `pubkey_valid(o)` (spec §4.10): 96 octets, decodes, not identity, in
/// the G2 subgroup.
pub fn pubkey_valid(octets: &[u8]) -> Result<()> {
    PublicKeyBytes::from_slice(octets)?.validate()
}

/// `signature_valid(o)` (spec §4.10): 80 octets, `A` decodes and is
/// neither the identity nor the G1 generator sentinel, `e` strictly in
/// `(0, r)`.
pub fn signature_valid(octets: &[u8]) -> Result<()> {
    SignatureBytes::from_slice(octets)?.validate()
}

/// `proof_valid(o)` (spec §4.10): length `>= 304` and `\u{2261} 304 mod 32`,
/// all three points decode and are non-identity, all scalars strictly in
/// `(0, r)`.
pub fn proof_valid(octets: &[u8]) -> Result<()> {
    ProofBytes::new(octets.to_vec())?.validate()
}
