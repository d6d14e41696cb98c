//! Encoding and decoding of `tEXt` payloads: `key || 0x00 || value`.

use crate::checksum;
use crate::chunk::ChunkType;
use crate::error::{Error, Result};

/// The separator must sit within the first `KEY_SEARCH_WINDOW` payload bytes,
/// so a recoverable key is at most `KEY_SEARCH_WINDOW - 1` bytes long.
///
/// Files produced by existing writers rely on this exact limit; a payload whose
/// separator falls outside the window decodes as an empty key and value.
pub const KEY_SEARCH_WINDOW: usize = 70;

/// A decoded key/value pair carried by one `tEXt` chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TextEntry {
    pub key: String,
    pub value: String,
}

impl TextEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Decodes a `tEXt` payload.
    ///
    /// The key runs up to the first NUL found in the search window; everything
    /// after that NUL (further NULs included) is the value. Invalid UTF-8 is
    /// replaced with U+FFFD rather than rejected.
    pub fn decode(payload: &[u8]) -> Self {
        let window = &payload[..payload.len().min(KEY_SEARCH_WINDOW)];
        match window.iter().position(|&b| b == 0) {
            Some(sep) => Self {
                key: String::from_utf8_lossy(&payload[..sep]).into_owned(),
                value: String::from_utf8_lossy(&payload[sep + 1..]).into_owned(),
            },
            None => {
                log::debug!(
                    "tEXt payload of {} bytes has no key separator in the first {} bytes",
                    payload.len(),
                    KEY_SEARCH_WINDOW
                );
                Self::default()
            }
        }
    }
}

/// Payload length of a text chunk for `key` and `value`, checked against the
/// 32-bit length field.
pub fn encoded_len(key: &str, value: &str) -> Result<u32> {
    let len = key.len() + 1 + value.len();
    u32::try_from(len).map_err(|_| Error::TooLarge { len })
}

/// The 8 bytes that open a text chunk: big-endian payload length, then the type tag.
pub(crate) fn header(key: &str, value: &str) -> Result<[u8; 8]> {
    let len = encoded_len(key, value)?.to_be_bytes();
    let ty = ChunkType::tEXt.0;
    Ok([len[0], len[1], len[2], len[3], ty[0], ty[1], ty[2], ty[3]])
}

/// The CRC trailer of a text chunk for `key` and `value`.
pub(crate) fn crc(key: &str, value: &str) -> [u8; 4] {
    checksum::chunk_crc_parts(ChunkType::tEXt, &[key.as_bytes(), &[0], value.as_bytes()])
        .to_be_bytes()
}
