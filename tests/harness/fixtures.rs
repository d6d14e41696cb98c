use pngtext::checksum::chunk_crc;
use pngtext::{ChunkType, SIGNATURE};

/// Appends one correctly checksummed chunk.
pub fn push_chunk(out: &mut Vec<u8>, ty: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(ty);
    out.extend_from_slice(payload);
    out.extend_from_slice(&chunk_crc(ChunkType(*ty), payload).to_be_bytes());
}

/// A small image-like stream with metadata interleaved between image chunks.
pub fn sample_png() -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();
    push_chunk(&mut out, b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]);
    push_chunk(&mut out, b"tEXt", b"Software\0paint");
    push_chunk(&mut out, b"gAMA", &[0, 0, 0xB1, 0x8F]);
    push_chunk(&mut out, b"IDAT", &[0x78, 0x9C, 0x63, 0x00, 0x01]);
    push_chunk(&mut out, b"tEXt", b"chara\0old profile");
    push_chunk(&mut out, b"IDAT", &[0x00, 0x05, 0x00, 0x01]);
    push_chunk(&mut out, b"IEND", &[]);
    out
}

/// Bytes of every chunk in `bytes` whose type is neither `tEXt` nor `IEND`, in order.
pub fn passthrough_chunks(bytes: &[u8]) -> Vec<Vec<u8>> {
    pngtext::ChunkCursor::new(bytes)
        .map(|c| c.unwrap())
        .filter(|c| c.is_passthrough())
        .map(|c| c.raw().to_vec())
        .collect()
}
