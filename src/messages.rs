//! Message preprocessing (spec §4.6, component 6): each message octet
//! string maps to an `Fr` scalar via `hash_to_scalar` under the
//! ciphersuite's `map_msg_dst`.

use blstrs::Scalar;

use crate::ciphersuite::Ciphersuite;
use crate::error::Result;
use crate::field::hash_to_scalar;

pub fn messages_to_scalars(cs: Ciphersuite, messages: &[&[u8]]) -> Result<Vec<Scalar>> {
    let dst = cs.map_msg_dst();
    messages.iter().map(|m| hash_to_scalar(cs, m, &dst)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_messages_map_to_distinct_scalars() {
        let scalars = messages_to_scalars(Ciphersuite::Sha256, &[b"a", b"b"]).unwrap();
        assert_ne!(scalars[0], scalars[1]);
    }

    #[test]
    fn mapping_is_deterministic() {
        let a = messages_to_scalars(Ciphersuite::Sha256, &[b"hello"]).unwrap();
        let b = messages_to_scalars(Ciphersuite::Sha256, &[b"hello"]).unwrap();
        assert_eq!(a, b);
    }
}
