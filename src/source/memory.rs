use std::io;

use super::SeekableSource;

/// In-memory source.
///
/// Useful for data that was fetched in one piece and for testing readers.
#[derive(Clone, Debug)]
pub struct MemorySource {
    data: Vec<u8>,
    position: u64,
    name: String,
}

impl MemorySource {
    /// Wraps `data`, labelled `"memory"`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self::with_name(data, "memory")
    }

    /// Wraps `data` with a custom label returned by [`SeekableSource::source`].
    pub fn with_name(data: impl Into<Vec<u8>>, name: impl Into<String>) -> Self {
        MemorySource {
            data: data.into(),
            position: 0,
            name: name.into(),
        }
    }

    /// The wrapped bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Unwraps the source, returning the underlying bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl SeekableSource for MemorySource {
    #[inline]
    fn length(&self) -> io::Result<u64> {
        Ok(self.data.len() as u64)
    }

    #[inline]
    fn position(&self) -> io::Result<u64> {
        Ok(self.position)
    }

    #[inline]
    fn seek(&mut self, pos: u64) -> io::Result<()> {
        self.position = pos;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.data.len() as u64;
        if self.position >= len {
            return Ok(0);
        }
        let start = self.position as usize;
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }

    #[inline]
    fn source(&self) -> &str {
        &self.name
    }
}
