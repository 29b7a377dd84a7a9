//! Binary wire format for lists with auxiliary node references.
//!
//! Pointer identity does not survive a round trip, so every `rand` link is
//! written as the chain position of its target. `prev`/`next` are implied by
//! record order and are not stored.
//!
//! ## Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ node_count: u32              │  4 bytes
//! ├──────────────────────────────┤
//! │ repeated node_count times,   │
//! │ in chain order:              │
//! │   payload_len: u32           │  4 bytes
//! │   payload                    │  payload_len bytes
//! │   rand_index: i32            │  4 bytes, -1 = no link
//! └──────────────────────────────┘
//! ```
//!
//! There is no magic number, version field, or checksum. Reader and writer
//! are expected to agree on the layout.

mod digest;
mod file;
mod format;

pub use digest::{digest, hash_hex, list_digest, Digest};
pub use file::{load_from_path, load_from_path_with_limits, save_to_path};
pub use format::{
    decode, decode_from_slice, decode_into, decode_with_limits, encode, encode_to_vec,
    encoded_len, DecodeLimits, Field, WireError, NO_RAND,
};
