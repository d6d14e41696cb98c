//! # pngtext
//!
//! Embed and extract key/value metadata in PNG chunk streams through `tEXt`
//! chunks, without touching the image data around them.
//!
//! ## Overview
//!
//! A PNG stream is an 8-byte signature followed by chunks, each laid out as
//! `[4-byte BE length | 4-byte type | payload | 4-byte BE CRC-32]`, ending with
//! an `IEND` chunk. A `tEXt` chunk carries one `key || 0x00 || value` pair.
//! This crate lets the image file itself carry structured application data.
//!
//! ## Key Features
//!
//! * **One chunk walker**: every operation is built on [`ChunkCursor`]
//! * **Bulk and lazy reads**: [`read`] for a filtered map, [`text_chunks`] for a pull-based iterator
//! * **Trimming**: [`trim`] drops every `tEXt` chunk and keeps all others byte-for-byte
//! * **Streaming writes**: [`write`] and [`write_to`] share one emission path, so an
//!   in-memory result and a sink receive identical bytes
//! * **Incremental sessions**: [`ChunkWriter`] spreads a write across explicit calls
//! * **Opt-in integrity checks**: CRC verification on read via [`ReadOptions::checked`]
//!
//! ## Quick Start
//!
//! ```rust
//! use pngtext::*;
//!
//! fn main() -> Result<()> {
//!     // Smallest possible stream: signature + IEND.
//!     let mut png = SIGNATURE.to_vec();
//!     png.extend_from_slice(&[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
//!
//!     let tagged = write(&png, [("chara", "{\"name\":\"Ann\"}"), ("version", "2")])?;
//!
//!     let found = read(&tagged, ["chara"], ReadOptions::checked())?;
//!     assert_eq!(found["chara"], "{\"name\":\"Ann\"}");
//!
//!     for entry in text_chunks(&tagged, ReadOptions::default()) {
//!         let entry = entry?;
//!         println!("{} = {}", entry.key, entry.value);
//!     }
//!
//!     assert_eq!(trim(&tagged)?, png);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! The crate reports through the `log` facade and stays silent unless the
//! application installs a logger.

pub mod checksum;
pub mod chunk;
pub mod cursor;
pub mod error;
#[cfg(feature = "tokio")]
pub mod nonblocking;
pub mod reader;
pub mod text;
pub mod trim;
pub mod writer;

/// Ordered key/value metadata; iteration order is stream order.
pub type Metadata = indexmap::IndexMap<String, String>;

// Re-export the main public API for user convenience.
pub use checksum::crc32;
pub use chunk::{Chunk, ChunkType, SIGNATURE};
pub use cursor::ChunkCursor;
pub use error::{Error, Result};
pub use reader::{read, text_chunks, ReadOptions, TextChunks};
pub use text::{TextEntry, KEY_SEARCH_WINDOW};
pub use trim::trim;
pub use writer::{write, write_to, ChunkWriter};

#[cfg(feature = "tokio")]
pub use nonblocking::{write_async, AsyncChunkWriter};
