use crate::chunk::ChunkType;
use thiserror::Error;

/// Custom error types for the pngtext library.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O errors from the sink (or a streaming source).
    ///
    /// The original `std::io::Error` is carried as-is so callers can tell
    /// storage failures apart from format failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte stream does not follow the chunk layout.
    #[error("Malformed stream at offset {offset}: {message}")]
    Malformed { offset: usize, message: String },

    /// Stored chunk CRC does not match the one computed over type and payload.
    #[error("CRC mismatch in {chunk_type:?} chunk at offset {offset}: expected {expected:#010x}, got {calculated:#010x}")]
    CrcMismatch {
        chunk_type: ChunkType,
        offset: usize,
        expected: u32,
        calculated: u32,
    },

    /// A chunk writer session was used after `close`.
    #[error("Chunk writer session is already closed")]
    SessionClosed,

    /// A text payload does not fit the 32-bit chunk length field.
    #[error("Text payload of {len} bytes exceeds 32-bit chunk length limit")]
    TooLarge { len: usize },
}

impl Error {
    /// Create a new `Malformed` error at the given stream offset.
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            offset,
            message: message.into(),
        }
    }

    /// Create a new `CrcMismatch` error with the stored and computed values.
    pub fn crc_mismatch(chunk_type: ChunkType, offset: usize, expected: u32, calculated: u32) -> Self {
        Self::CrcMismatch {
            chunk_type,
            offset,
            expected,
            calculated,
        }
    }
}

/// Result type alias for the library operations.
pub type Result<T> = std::result::Result<T, Error>;
