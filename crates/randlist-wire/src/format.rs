//! Encoder and decoder for the list wire format.
//!
//! Encoding walks the chain from the head and writes one record per node.
//! Decoding reads every record into a [`ListBuilder`] first and links the
//! nodes only after the last record has been read, so a truncated stream
//! never yields a partially built list.

use std::fmt;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, trace, warn};

use randlist_core::{List, ListBuilder};

/// Wire value of a `rand_index` field for a node without a `rand` link.
pub const NO_RAND: i32 = -1;

/// Upper bound on records preallocated from an untrusted `node_count`.
const PREALLOC_LIMIT: usize = 4096;

/// Size of one fixed-width integer field.
const INT_SIZE: usize = 4;

/// A field of the wire layout, used to report where I/O stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    NodeCount,
    PayloadLength,
    Payload,
    RandIndex,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::NodeCount => write!(f, "node count"),
            Field::PayloadLength => write!(f, "payload length"),
            Field::Payload => write!(f, "payload"),
            Field::RandIndex => write!(f, "rand index"),
        }
    }
}

/// Errors that can occur while encoding or decoding a list.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("cannot open {} for writing: {source}", .path.display())]
    SinkUnavailable { path: PathBuf, source: io::Error },

    #[error("cannot open {} for reading: {source}", .path.display())]
    SourceUnavailable { path: PathBuf, source: io::Error },

    #[error("short write on {field}: sink accepted {written} of {expected} byte(s)")]
    ShortWrite {
        field: Field,
        expected: usize,
        written: usize,
    },

    #[error("short read on {field}: got {actual} of {expected} byte(s)")]
    ShortRead {
        field: Field,
        expected: usize,
        actual: usize,
    },

    #[error("{what} {len} does not fit its wire field")]
    LengthOverflow { what: &'static str, len: usize },

    #[error("{what} {value} exceeds configured limit {limit}")]
    LimitExceeded {
        what: &'static str,
        value: u32,
        limit: u32,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Optional upper bounds applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Largest accepted `node_count`.
    pub max_nodes: Option<u32>,
    /// Largest accepted `payload_len` of a single node.
    pub max_payload_len: Option<u32>,
}

impl DecodeLimits {
    /// No bounds.
    pub const UNLIMITED: DecodeLimits = DecodeLimits {
        max_nodes: None,
        max_payload_len: None,
    };

    fn check(what: &'static str, value: u32, limit: Option<u32>) -> Result<(), WireError> {
        match limit {
            Some(limit) if value > limit => Err(WireError::LimitExceeded { what, value, limit }),
            _ => Ok(()),
        }
    }
}

/// Encode `list` to `writer`.
///
/// Output already written when an error occurs is left in place.
pub fn encode<W: Write>(list: &List, writer: &mut W) -> Result<(), WireError> {
    let count = wire_len("node count", list.count())?;
    write_field(writer, Field::NodeCount, &count.to_le_bytes())?;

    // Arena index == chain position, so a node id is already its wire index.
    for (position, (_, node)) in list.iter().enumerate() {
        let data = node.data();
        let len = wire_len("payload length", data.len())?;
        write_field(writer, Field::PayloadLength, &len.to_le_bytes())?;
        write_field(writer, Field::Payload, data)?;

        let rand = match node.rand() {
            Some(target) => i32::try_from(target.index()).map_err(|_| {
                WireError::LengthOverflow {
                    what: "rand index",
                    len: target.index(),
                }
            })?,
            None => NO_RAND,
        };
        write_field(writer, Field::RandIndex, &rand.to_le_bytes())?;
        trace!(position, len, rand, "encoded node");
    }

    debug!(nodes = count, bytes = encoded_len(list), "encoded list");
    Ok(())
}

/// Encode `list` into a fresh byte vector.
pub fn encode_to_vec(list: &List) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::with_capacity(encoded_len(list));
    encode(list, &mut buf)?;
    Ok(buf)
}

/// Exact number of bytes [`encode`] writes for `list`.
pub fn encoded_len(list: &List) -> usize {
    INT_SIZE
        + list
            .iter()
            .map(|(_, node)| 2 * INT_SIZE + node.data().len())
            .sum::<usize>()
}

/// Decode a list from `reader` without size limits.
pub fn decode<R: Read>(reader: &mut R) -> Result<List, WireError> {
    decode_with_limits(reader, &DecodeLimits::UNLIMITED)
}

/// Decode a list from `reader`, rejecting counts and lengths above `limits`.
///
/// Bytes after the last record are not consumed.
pub fn decode_with_limits<R: Read>(
    reader: &mut R,
    limits: &DecodeLimits,
) -> Result<List, WireError> {
    let count = read_u32(reader, Field::NodeCount)?;
    DecodeLimits::check("node count", count, limits.max_nodes)?;

    let mut builder = ListBuilder::with_capacity((count as usize).min(PREALLOC_LIMIT));
    for position in 0..count {
        let len = read_u32(reader, Field::PayloadLength)?;
        DecodeLimits::check("payload length", len, limits.max_payload_len)?;
        let data = read_payload(reader, len)?;

        let raw = read_i32(reader, Field::RandIndex)?;
        if raw < NO_RAND {
            warn!(position, rand = raw, "negative rand index; treating as absent");
        }
        trace!(position, len, rand = raw, "decoded node");
        builder.push(data, usize::try_from(raw).ok());
    }

    let unresolved = builder.unresolved_rand_count();
    if unresolved > 0 {
        warn!(
            unresolved,
            nodes = count,
            "rand index past the last node; treating as absent"
        );
    }

    let list = builder.finish();
    debug!(nodes = list.count(), "decoded list");
    Ok(list)
}

/// Decode a list from an in-memory buffer.
pub fn decode_from_slice(mut bytes: &[u8]) -> Result<List, WireError> {
    decode(&mut bytes)
}

/// Replace the contents of `list` with a list decoded from `reader`.
///
/// `list` is cleared before reading starts. It receives the decoded nodes
/// only if the whole stream decodes; on error it is left empty.
pub fn decode_into<R: Read>(list: &mut List, reader: &mut R) -> Result<(), WireError> {
    list.clear();
    *list = decode(reader)?;
    Ok(())
}

fn wire_len(what: &'static str, len: usize) -> Result<u32, WireError> {
    u32::try_from(len).map_err(|_| WireError::LengthOverflow { what, len })
}

/// Write all of `bytes`, failing with [`WireError::ShortWrite`] if the sink
/// stops accepting data.
fn write_field<W: Write>(writer: &mut W, field: Field, bytes: &[u8]) -> Result<(), WireError> {
    let mut written = 0;
    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => {
                return Err(WireError::ShortWrite {
                    field,
                    expected: bytes.len(),
                    written,
                })
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Fill `buf` completely, failing with [`WireError::ShortRead`] at end of stream.
fn read_field<R: Read>(reader: &mut R, field: Field, buf: &mut [u8]) -> Result<(), WireError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(WireError::ShortRead {
                    field,
                    expected: buf.len(),
                    actual: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn read_u32<R: Read>(reader: &mut R, field: Field) -> Result<u32, WireError> {
    let mut buf = [0u8; INT_SIZE];
    read_field(reader, field, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_i32<R: Read>(reader: &mut R, field: Field) -> Result<i32, WireError> {
    let mut buf = [0u8; INT_SIZE];
    read_field(reader, field, &mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a payload of `len` bytes. The buffer grows with the data actually
/// read, so a bogus length on a short stream fails without a large allocation.
fn read_payload<R: Read>(reader: &mut R, len: u32) -> Result<Vec<u8>, WireError> {
    let expected = len as usize;
    let mut data = Vec::with_capacity(expected.min(PREALLOC_LIMIT));
    reader.by_ref().take(u64::from(len)).read_to_end(&mut data)?;
    if data.len() < expected {
        return Err(WireError::ShortRead {
            field: Field::Payload,
            expected,
            actual: data.len(),
        });
    }
    Ok(data)
}
