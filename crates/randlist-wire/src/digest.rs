//! SHA-256 fingerprints of encoded lists.
//!
//! The wire format carries no checksum of its own; a digest of the encoded
//! stream identifies a list's content and topology for display and
//! comparison.

use std::io::{self, Write};

use sha2::{Digest as _, Sha256};

use randlist_core::List;

use crate::format::{encode, WireError};

/// A 32-byte SHA-256 digest.
pub type Digest = [u8; 32];

/// Compute the SHA-256 digest of raw bytes.
pub fn digest(bytes: &[u8]) -> Digest {
    Sha256::digest(bytes).into()
}

/// Compute the digest of `list`'s encoding without buffering it.
pub fn list_digest(list: &List) -> Result<Digest, WireError> {
    let mut sink = HashSink(Sha256::new());
    encode(list, &mut sink)?;
    Ok(sink.0.finalize().into())
}

/// Format a digest as a lowercase hex string.
pub fn hash_hex(hash: &Digest) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

struct HashSink(Sha256);

impl Write for HashSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::encode_to_vec;

    #[test]
    fn list_digest_matches_digest_of_bytes() {
        let mut list: List = ["a", "b", "c"].into_iter().collect();
        list.set_rand(0, 2);
        let bytes = encode_to_vec(&list).unwrap();
        assert_eq!(list_digest(&list).unwrap(), digest(&bytes));
    }

    #[test]
    fn rand_topology_changes_digest() {
        let mut a: List = ["x", "y"].into_iter().collect();
        let b = a.clone();
        a.set_rand(1, 0);
        assert_ne!(list_digest(&a).unwrap(), list_digest(&b).unwrap());
    }

    #[test]
    fn empty_list_digest() {
        // SHA-256 of four zero bytes.
        let hex = hash_hex(&list_digest(&List::new()).unwrap());
        assert_eq!(
            hex,
            "df3f619804a92fdb4057192dc43dd748ea778adc52bc498ce80524c014b81119"
        );
    }

    #[test]
    fn hash_hex_format() {
        let hex = hash_hex(&digest(b"hello"));
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
