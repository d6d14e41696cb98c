use std::io::{Read, Result};

pub struct FaultyReader<R: Read> {
    inner: R,
    mode: FaultMode,
    counter: usize,
}

pub enum FaultMode {
    OneByteChunks,
    PrematureEofAt(usize),
}

impl<R: Read> FaultyReader<R> {
    pub fn new(inner: R, mode: FaultMode) -> Self {
        Self {
            inner,
            mode,
            counter: 0,
        }
    }
}

impl<R: Read> Read for FaultyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.counter += 1;
        match self.mode {
            FaultMode::OneByteChunks => {
                let n = buf.len().min(1);
                self.inner.read(&mut buf[..n])
            }
            FaultMode::PrematureEofAt(n) if self.counter >= n => Ok(0),
            FaultMode::PrematureEofAt(_) => self.inner.read(buf),
        }
    }
}
