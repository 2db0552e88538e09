//! Group read buffer codec.
//!
//! With `PERF_FORMAT_GROUP | PERF_FORMAT_ID` the leader fd reads as
//! native-endian 64-bit words:
//!
//! ```text
//! struct read_format {
//!     u64 nr;
//!     {
//!         u64 value;
//!         u64 id;
//!     } cntr[nr];
//! };
//! ```
//!
//! The order of `cntr` is up to the kernel, members are told apart by `id`.

use crate::error::ProtocolMismatch;

const WORD: usize = size_of::<u64>();

/// A decoded `cntr` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdValue {
    pub id: u64,
    pub value: u64,
}

/// Bytes needed to read a group of `n` events.
pub fn read_buf_size(n: usize) -> usize {
    (2 * n + 1) * WORD
}

/// Builds a read buffer from `(value, id)` pairs, in the given order.
pub fn encode(pairs: &[(u64, u64)]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(read_buf_size(pairs.len()));
    buf.extend_from_slice(&(pairs.len() as u64).to_ne_bytes());
    for (value, id) in pairs {
        buf.extend_from_slice(&value.to_ne_bytes());
        buf.extend_from_slice(&id.to_ne_bytes());
    }
    buf
}

/// Validates the buffer and iterates its entries in wire order.
pub fn pairs(buf: &[u8]) -> Result<impl ExactSizeIterator<Item = IdValue> + '_, ProtocolMismatch> {
    let bytes = buf.len();
    if bytes < WORD {
        return Err(ProtocolMismatch::Truncated { bytes });
    }
    if bytes % WORD != 0 {
        return Err(ProtocolMismatch::Unaligned { bytes });
    }

    let words = bytes / WORD;
    let nr = word(&buf[..WORD]);
    let expected = nr.checked_mul(2).and_then(|it| it.checked_add(1));
    if expected != Some(words as u64) {
        return Err(ProtocolMismatch::Length { words, nr });
    }

    let entries = buf[WORD..].chunks_exact(2 * WORD).map(|entry| IdValue {
        value: word(&entry[..WORD]),
        id: word(&entry[WORD..]),
    });
    Ok(entries)
}

/// Decodes every entry, in wire order.
pub fn decode(buf: &[u8]) -> Result<Vec<IdValue>, ProtocolMismatch> {
    Ok(pairs(buf)?.collect())
}

fn word(bytes: &[u8]) -> u64 {
    let mut word = [0; WORD];
    word.copy_from_slice(bytes);
    u64::from_ne_bytes(word)
}
