#![allow(dead_code)]
/// in separate folder so its not ran as integration test
use std::io;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use seekbuf::{BufferedReader, MemorySource, RefillPolicy, SeekableSource};

/// Size of the reference data set most tests run against.
pub const DATA_LEN: usize = 20_000;

/// Deterministic pseudo-random bytes covering the full 0..=255 range.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0u8; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    data
}

pub fn buffered(data: &[u8], capacity: usize, policy: RefillPolicy) -> BufferedReader<MemorySource> {
    BufferedReader::builder(MemorySource::new(data))
        .with_capacity(capacity)
        .with_refill_policy(policy)
        .build()
        .unwrap()
}

/// Keeps calling `read` until `buf` is full or the reader stops producing bytes.
/// Returns the number of bytes read.
pub fn read_until_full<S: SeekableSource>(reader: &mut BufferedReader<S>, buf: &mut [u8]) -> usize {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]).unwrap() {
            Some(n) if n > 0 => total += n,
            _ => break,
        }
    }
    total
}

/// Source of arbitrary length whose byte at offset `o` is [`PatternSource::byte_at`]`(o)`.
///
/// Nothing is allocated, so lengths far beyond `u32::MAX` are cheap.
pub struct PatternSource {
    length: u64,
    position: u64,
    max_chunk: usize,
}

impl PatternSource {
    pub fn new(length: u64) -> Self {
        PatternSource {
            length,
            position: 0,
            max_chunk: usize::MAX,
        }
    }

    /// Limits how many bytes a single `read` call hands out.
    pub fn with_max_chunk(mut self, max_chunk: usize) -> Self {
        self.max_chunk = max_chunk;
        self
    }

    pub fn byte_at(offset: u64) -> u8 {
        (offset ^ (offset >> 11) ^ (offset >> 29) ^ (offset >> 37)) as u8
    }
}

impl SeekableSource for PatternSource {
    fn length(&self) -> io::Result<u64> {
        Ok(self.length)
    }

    fn position(&self) -> io::Result<u64> {
        Ok(self.position)
    }

    fn seek(&mut self, pos: u64) -> io::Result<()> {
        self.position = pos;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.length.saturating_sub(self.position);
        let n = (buf.len().min(self.max_chunk) as u64).min(remaining) as usize;
        for (i, byte) in buf[..n].iter_mut().enumerate() {
            *byte = Self::byte_at(self.position + i as u64);
        }
        self.position += n as u64;
        Ok(n)
    }

    fn source(&self) -> &str {
        "pattern"
    }
}

/// Source whose reads always fail, for error propagation tests.
pub struct FailingSource {
    pub length: u64,
}

impl SeekableSource for FailingSource {
    fn length(&self) -> io::Result<u64> {
        Ok(self.length)
    }

    fn position(&self) -> io::Result<u64> {
        Ok(0)
    }

    fn seek(&mut self, _pos: u64) -> io::Result<()> {
        Ok(())
    }

    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
    }

    fn close(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "already closed"))
    }

    fn source(&self) -> &str {
        "failing"
    }
}
