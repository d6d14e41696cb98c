//! Embeds a character profile into a PNG and reads it back.
//!
//! Usage: `cargo run --example embed_profile -- [input.png] [output.png]`
//! Without arguments a minimal 1x1 image is generated in a temp directory.

use pngtext::checksum::chunk_crc;
use pngtext::*;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

fn minimal_png() -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();
    for (ty, payload) in [
        (*b"IHDR", vec![0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]),
        (*b"IDAT", vec![0x78, 0x9C, 0x63, 0x60, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01]),
        (*b"IEND", vec![]),
    ] {
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&ty);
        out.extend_from_slice(&payload);
        out.extend_from_slice(&chunk_crc(ChunkType(ty), &payload).to_be_bytes());
    }
    out
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let scratch = std::env::temp_dir();
    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            let path = scratch.join("pngtext_demo_in.png");
            std::fs::write(&path, minimal_png())?;
            path
        }
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| scratch.join("pngtext_demo_out.png"));

    // Stream the source straight into the destination file.
    let source = BufReader::new(File::open(&input)?);
    let sink = BufWriter::new(File::create(&output)?);
    let mut writer = ChunkWriter::open_reader(source, sink)?;
    writer.write("chara", r#"{"name":"Ann","description":"A travelling cartographer."}"#)?;
    writer.write("version", "2")?;
    writer.close()?;
    drop(writer.into_inner());

    let tagged = std::fs::read(&output)?;
    println!("wrote {} ({} bytes)", output.display(), tagged.len());
    for entry in text_chunks(&tagged, ReadOptions::checked()) {
        let entry = entry?;
        println!("  {} = {}", entry.key, entry.value);
    }

    let clean = trim(&tagged)?;
    println!("trimmed back to {} bytes", clean.len());
    Ok(())
}
