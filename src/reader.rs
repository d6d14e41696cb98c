//! Readers that pull `tEXt` metadata out of an in-memory stream.
//!
//! Two access patterns are provided:
//!
//! 1. **Bulk** ([`read`]): walks the whole stream and returns the wanted keys as
//!    an ordered [`Metadata`] map.
//! 2. **Lazy** ([`text_chunks`]): a pull-based iterator over every text chunk,
//!    unfiltered, for callers that want to stop early or filter themselves.
//!
//! Both default to skipping CRC verification; see [`ReadOptions::checked`].

use std::collections::HashSet;

use crate::cursor::ChunkCursor;
use crate::error::Result;
use crate::text::TextEntry;
use crate::Metadata;

/// Per-call read configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Verify every chunk's CRC and fail on the first mismatch.
    pub check_crc: bool,
}

impl ReadOptions {
    /// Options with CRC verification enabled.
    pub fn checked() -> Self {
        Self { check_crc: true }
    }
}

/// Reads the text entries whose keys appear in `wanted`.
///
/// Entries are returned in stream order. If a key occurs in more than one
/// chunk, the last value wins while the key keeps its first position. Any
/// error aborts the read; no partial map is returned.
///
/// ```rust
/// # use pngtext::{read, write, ReadOptions};
/// # let png = pngtext::SIGNATURE.iter().copied()
/// #     .chain([0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82])
/// #     .collect::<Vec<u8>>();
/// let tagged = write(&png, [("chara", "{\"name\":\"Ann\"}")])?;
/// let found = read(&tagged, ["chara"], ReadOptions::default())?;
/// assert_eq!(found["chara"], "{\"name\":\"Ann\"}");
/// # Ok::<(), pngtext::Error>(())
/// ```
pub fn read<I>(bytes: &[u8], wanted: I, options: ReadOptions) -> Result<Metadata>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let wanted: HashSet<String> = wanted
        .into_iter()
        .map(|k| k.as_ref().to_owned())
        .collect();

    let mut found = Metadata::new();
    for entry in text_chunks(bytes, options) {
        let entry = entry?;
        if wanted.contains(&entry.key) {
            found.insert(entry.key, entry.value);
        }
    }
    Ok(found)
}

/// Returns a lazy iterator over every text chunk in `bytes`.
///
/// Each call starts a fresh walk from the first chunk. Keys that cannot be
/// recovered (see [`KEY_SEARCH_WINDOW`](crate::KEY_SEARCH_WINDOW)) come through
/// as an empty entry.
pub fn text_chunks(bytes: &[u8], options: ReadOptions) -> TextChunks<'_> {
    TextChunks {
        cursor: ChunkCursor::new(bytes).with_crc_check(options.check_crc),
    }
}

/// Iterator returned by [`text_chunks`].
///
/// Cloning it yields an independent iterator positioned at the same chunk.
/// After an error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct TextChunks<'a> {
    cursor: ChunkCursor<'a>,
}

impl Iterator for TextChunks<'_> {
    type Item = Result<TextEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        for chunk in self.cursor.by_ref() {
            match chunk {
                Ok(chunk) if chunk.ty().is_text() => {
                    return Some(Ok(TextEntry::decode(chunk.payload())));
                }
                Ok(_) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

impl std::iter::FusedIterator for TextChunks<'_> {}
