#![no_main]
use libfuzzer_sys::fuzz_target;
use pngtext::{read, text_chunks, trim, write, ChunkCursor, ReadOptions};

fuzz_target!(|data: &[u8]| {
    let _ = ChunkCursor::new(data).with_crc_check(true).count();
    let _ = read(data, ["chara"], ReadOptions::default());
    let _ = text_chunks(data, ReadOptions::checked()).count();
    if let Ok(trimmed) = trim(data) {
        assert_eq!(trim(&trimmed).ok().as_deref(), Some(&trimmed[..]));
    }
    let _ = write(data, [("k", "v")]);
});
