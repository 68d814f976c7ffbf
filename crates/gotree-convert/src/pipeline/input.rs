//! Length-prefixed batch framing.
//!
//! A batch is a sequence of entries, each a little-endian `i32` name
//! length, the name bytes, a little-endian `i32` content length and the
//! content bytes, repeated to the end of the buffer.

use gotree_core::errors::InputError;
use gotree_core::logging::names;

const LENGTH_BYTES: usize = 4;

/// One file of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub name: String,
    pub content: String,
}

impl BatchEntry {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Splits `bytes` into entries in wire order.
pub fn decode_batch(bytes: &[u8]) -> Result<Vec<BatchEntry>, InputError> {
    let _span = tracing::debug_span!(names::DECODE_BATCH, bytes = bytes.len()).entered();
    let mut entries = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let (name, next) = read_text(bytes, offset)?;
        let (content, next) = read_text(bytes, next)?;
        entries.push(BatchEntry { name, content });
        offset = next;
    }
    tracing::debug!(entries = entries.len(), "decoded batch");
    Ok(entries)
}

/// Inverse of [`decode_batch`].
pub fn encode_batch(entries: &[BatchEntry]) -> Vec<u8> {
    let size = entries
        .iter()
        .map(|e| 2 * LENGTH_BYTES + e.name.len() + e.content.len())
        .sum();
    let mut out = Vec::with_capacity(size);
    for entry in entries {
        write_text(&mut out, &entry.name);
        write_text(&mut out, &entry.content);
    }
    out
}

fn read_text(bytes: &[u8], offset: usize) -> Result<(String, usize), InputError> {
    let header = take(bytes, offset, LENGTH_BYTES)?;
    let mut raw = [0u8; LENGTH_BYTES];
    raw.copy_from_slice(header);
    let length = i32::from_le_bytes(raw);
    let length = usize::try_from(length).map_err(|_| InputError::NegativeLength { offset, length })?;

    let start = offset + LENGTH_BYTES;
    let body = take(bytes, start, length)?;
    let text = std::str::from_utf8(body)
        .map_err(|_| InputError::InvalidUtf8 { offset: start })?
        .to_string();
    Ok((text, start + length))
}

fn take(bytes: &[u8], offset: usize, needed: usize) -> Result<&[u8], InputError> {
    let available = bytes.len().saturating_sub(offset);
    if available < needed {
        return Err(InputError::TruncatedFrame {
            offset,
            needed,
            available,
        });
    }
    Ok(&bytes[offset..offset + needed])
}

fn write_text(out: &mut Vec<u8>, text: &str) {
    // Lengths past i32::MAX are clamped.
    let length = i32::try_from(text.len()).unwrap_or(i32::MAX);
    out.extend_from_slice(&length.to_le_bytes());
    out.extend_from_slice(text.as_bytes());
}
